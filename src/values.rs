//! Geometric value types with the vendor textual notation.
//!
//! Both types parse leniently: malformed or absent input falls back to a
//! documented default instead of failing, matching the best-effort read
//! policy of the rest of the model. Equality is exact component-wise `f64`
//! comparison; the textual form carries decimal literals, so parse → format
//! → parse reproduces identical values.

use std::fmt;

/// 4×4 row-major transform.
///
/// Rows 1–3 carry rotation and scale, row 4 the translation. The fourth
/// column is fixed at `0.0` by format convention and is not serialized:
/// the textual form is four brace groups of three comma-separated floats,
/// `{u1,u2,u3}{v1,v2,v3}{w1,w2,w3}{x,y,z}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix(pub [[f64; 4]; 4]);

impl Matrix {
    /// Default transform: identity rotation, zero translation.
    pub const IDENTITY: Matrix = Matrix([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 0.0],
    ]);

    /// Parse the brace-grouped textual form.
    ///
    /// Returns [`Matrix::IDENTITY`] when the input is absent-equivalent
    /// (`"0"`), malformed, or does not contain exactly twelve components.
    pub fn from_str_repr(s: &str) -> Matrix {
        Matrix::parse(s).unwrap_or(Matrix::IDENTITY)
    }

    fn parse(s: &str) -> Option<Matrix> {
        let s = s.trim();
        if s.is_empty() || s == "0" {
            return None;
        }
        let flat = s.replace("}{", ",").replace(['{', '}'], "");
        let mut components = [0.0f64; 12];
        let mut count = 0;
        for part in flat.split(',') {
            if count == 12 {
                return None;
            }
            components[count] = part.trim().parse::<f64>().ok()?;
            count += 1;
        }
        if count != 12 {
            return None;
        }
        let mut rows = [[0.0f64; 4]; 4];
        for (i, row) in rows.iter_mut().enumerate() {
            row[..3].copy_from_slice(&components[i * 3..i * 3 + 3]);
        }
        Some(Matrix(rows))
    }

    /// The vendor textual form used inside `<Matrix>` elements.
    pub fn str_repr(&self) -> String {
        self.to_string()
    }

    /// Translation component (row 4).
    pub fn translation(&self) -> [f64; 3] {
        [self.0[3][0], self.0[3][1], self.0[3][2]]
    }

    /// Build a transform with identity rotation and the given translation.
    pub fn from_translation(x: f64, y: f64, z: f64) -> Matrix {
        let mut m = Matrix::IDENTITY;
        m.0[3][0] = x;
        m.0[3][1] = y;
        m.0[3][2] = z;
        m
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix::IDENTITY
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.0 {
            write!(f, "{{{},{},{}}}", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}

/// CIE xyY color triple, serialized as `x,y,Y` comma-separated text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorCie {
    /// CIE x chromaticity
    pub x: f64,
    /// CIE y chromaticity
    pub y: f64,
    /// Luminance Y
    pub luminance: f64,
}

impl ColorCie {
    /// Standard illuminant white, the fallback for absent or malformed input.
    pub const WHITE: ColorCie = ColorCie {
        x: 0.3127,
        y: 0.3290,
        luminance: 100.0,
    };

    /// Parse comma-separated `x,y,Y` text, falling back to white.
    pub fn from_str_repr(s: &str) -> ColorCie {
        let mut parts = s.split(',');
        let mut next = || parts.next().and_then(|p| p.trim().parse::<f64>().ok());
        match (next(), next(), next()) {
            (Some(x), Some(y), Some(luminance)) => ColorCie { x, y, luminance },
            _ => ColorCie::WHITE,
        }
    }
}

impl Default for ColorCie {
    fn default() -> Self {
        ColorCie::WHITE
    }
}

impl fmt::Display for ColorCie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.luminance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn matrix_parses_brace_groups() {
        let m = Matrix::from_str_repr("{1,0,0}{0,1,0}{0,0,1}{5000,5000,5000}");
        assert_eq!(m.0[0], [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(m.translation(), [5000.0, 5000.0, 5000.0]);
    }

    #[test]
    fn matrix_defaults_on_malformed_input() {
        assert_eq!(Matrix::from_str_repr(""), Matrix::IDENTITY);
        assert_eq!(Matrix::from_str_repr("0"), Matrix::IDENTITY);
        assert_eq!(Matrix::from_str_repr("{1,2}{3}"), Matrix::IDENTITY);
        assert_eq!(Matrix::from_str_repr("{a,b,c}{d,e,f}{g,h,i}{j,k,l}"), Matrix::IDENTITY);
        // thirteen components
        assert_eq!(
            Matrix::from_str_repr("{1,0,0}{0,1,0}{0,0,1}{0,0,0,9}"),
            Matrix::IDENTITY
        );
    }

    #[test]
    fn matrix_round_trips_through_text() {
        let m = Matrix::from_str_repr("{0.5,-0.25,0}{0.25,0.5,0}{0,0,1}{-120.75,45.5,3000}");
        assert_eq!(Matrix::from_str_repr(&m.str_repr()), m);
    }

    #[test]
    fn color_parses_and_defaults() {
        let c = ColorCie::from_str_repr("0.4254,0.3768,42.2");
        assert_eq!(c.x, 0.4254);
        assert_eq!(c.luminance, 42.2);
        assert_eq!(ColorCie::from_str_repr("not,a,color"), ColorCie::WHITE);
        assert_eq!(ColorCie::from_str_repr(""), ColorCie::WHITE);
        assert_eq!(ColorCie::from_str_repr("0.1,0.2"), ColorCie::WHITE);
    }

    #[test]
    fn color_round_trips_through_text() {
        let c = ColorCie {
            x: 0.3127,
            y: 0.329,
            luminance: 100.0,
        };
        assert_eq!(ColorCie::from_str_repr(&c.to_string()), c);
    }

    proptest! {
        #[test]
        fn matrix_text_round_trip_is_exact(values in proptest::array::uniform12(-1.0e6f64..1.0e6)) {
            let mut rows = [[0.0f64; 4]; 4];
            for (i, row) in rows.iter_mut().enumerate() {
                row[..3].copy_from_slice(&values[i * 3..i * 3 + 3]);
            }
            let m = Matrix(rows);
            prop_assert_eq!(Matrix::from_str_repr(&m.str_repr()), m);
        }
    }
}
