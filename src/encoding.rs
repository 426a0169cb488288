//! Legacy text-encoding normalization for file name references.
//!
//! Historical producers wrote `GDTFSpec` and 3D-geometry `fileName` values
//! assuming an 8-bit IBM PC code page, and naive consumers re-decoded those
//! bytes as UTF-8. The read path reverses this by taking the UTF-8 bytes of
//! the already-decoded string and re-decoding them as CP437. This shim is
//! read-only; the write path always emits plain UTF-8.

use std::borrow::Cow;

use codepage_437::{BorrowFromCp437, CP437_CONTROL};

/// Re-decode an already-UTF-8-decoded string under CP437.
///
/// Pure ASCII input is returned unchanged.
pub(crate) fn decode_legacy_text(s: &str) -> String {
    Cow::borrow_from_cp437(s.as_bytes(), &CP437_CONTROL).into_owned()
}

/// Normalize a raw `GDTFSpec` value: apply the CP437 shim, then append the
/// `.gdtf` suffix when it is missing and the name is long enough to carry
/// one (names of five characters or fewer are left alone).
pub(crate) fn normalize_gdtf_spec(raw: &str) -> String {
    let mut spec = decode_legacy_text(raw);
    if spec.chars().count() > 5 && !spec.to_lowercase().ends_with(".gdtf") {
        spec.push_str(".gdtf");
    }
    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_passes_through() {
        assert_eq!(decode_legacy_text("Robe Robin 600"), "Robe Robin 600");
    }

    #[test]
    fn non_ascii_is_reinterpreted_as_cp437() {
        // U+00E9 encodes as 0xC3 0xA9, which CP437 maps to '├' and '⌐'.
        assert_eq!(decode_legacy_text("\u{00E9}"), "\u{251C}\u{2310}");
    }

    #[test]
    fn gdtf_suffix_is_appended_when_missing() {
        assert_eq!(normalize_gdtf_spec("MAC Viper"), "MAC Viper.gdtf");
        assert_eq!(normalize_gdtf_spec("MAC Viper.gdtf"), "MAC Viper.gdtf");
        assert_eq!(normalize_gdtf_spec("spot.GDTF"), "spot.GDTF");
        // too short for the suffix rule
        assert_eq!(normalize_gdtf_spec("spot"), "spot");
    }
}
