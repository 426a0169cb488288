//! Typed ordered collection wrappers.
//!
//! Each wrapper reads repeated child elements into an ordered list and
//! serializes them back under a container tag named after the wrapper.
//! Serialization of an empty wrapper is the owner's concern: owners skip
//! the container element entirely when the collection is empty, which is a
//! load-bearing round-trip invariant of the format.

use crate::xml::XmlElement;

use super::leaf::{
    Address, Alignment, Connection, CustomCommand, Mapping, Network, Overwrite, Projection,
    Protocol, Source,
};
use super::scene::Layer;

macro_rules! collection_node {
    ($(#[$meta:meta])* $name:ident, $item:ident, $tag:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            items: Vec<$item>,
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            /// Read the repeated child elements of the container, in
            /// document order.
            pub fn from_xml(node: &XmlElement) -> Self {
                Self {
                    items: node.find_all($tag).map($item::from_xml).collect(),
                }
            }

            pub fn to_xml(&self) -> XmlElement {
                let mut element = XmlElement::new(stringify!($name));
                for item in &self.items {
                    element.add_child(item.to_xml());
                }
                element
            }

            pub fn push(&mut self, item: $item) {
                self.items.push(item);
            }

            pub fn insert(&mut self, index: usize, item: $item) {
                self.items.insert(index, item);
            }

            /// Remove and return the item at `index`.
            pub fn remove(&mut self, index: usize) -> $item {
                self.items.remove(index)
            }

            /// Remove the first item equal to `item`; returns whether one was found.
            pub fn remove_item(&mut self, item: &$item) -> bool {
                match self.items.iter().position(|candidate| candidate == item) {
                    Some(index) => {
                        self.items.remove(index);
                        true
                    }
                    None => false,
                }
            }

            pub fn pop(&mut self) -> Option<$item> {
                self.items.pop()
            }

            pub fn clear(&mut self) {
                self.items.clear();
            }

            pub fn len(&self) -> usize {
                self.items.len()
            }

            pub fn is_empty(&self) -> bool {
                self.items.is_empty()
            }

            pub fn get(&self, index: usize) -> Option<&$item> {
                self.items.get(index)
            }

            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.items.iter()
            }
        }

        impl std::ops::Index<usize> for $name {
            type Output = $item;

            fn index(&self, index: usize) -> &$item {
                &self.items[index]
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.items.iter()
            }
        }

        impl Extend<$item> for $name {
            fn extend<T: IntoIterator<Item = $item>>(&mut self, iter: T) {
                self.items.extend(iter);
            }
        }

        impl FromIterator<$item> for $name {
            fn from_iter<T: IntoIterator<Item = $item>>(iter: T) -> Self {
                Self {
                    items: iter.into_iter().collect(),
                }
            }
        }
    };
}

collection_node!(
    /// Ordered `<Protocol>` entries under `<Protocols>`.
    Protocols, Protocol, "Protocol"
);
collection_node!(
    /// Ordered `<Alignment>` entries under `<Alignments>`.
    Alignments, Alignment, "Alignment"
);
collection_node!(
    /// Ordered `<CustomCommand>` entries under `<CustomCommands>`.
    CustomCommands, CustomCommand, "CustomCommand"
);
collection_node!(
    /// Ordered `<Overwrite>` entries under `<Overwrites>`.
    Overwrites, Overwrite, "Overwrite"
);
collection_node!(
    /// Ordered `<Connection>` entries under `<Connections>`.
    Connections, Connection, "Connection"
);
collection_node!(
    /// Ordered `<Mapping>` entries under `<Mappings>`.
    Mappings, Mapping, "Mapping"
);
collection_node!(
    /// Ordered `<Source>` entries under `<Sources>`.
    Sources, Source, "Source"
);
collection_node!(
    /// Ordered `<Projection>` entries under `<Projections>`.
    Projections, Projection, "Projection"
);
collection_node!(
    /// Ordered `<Layer>` entries under `<Layers>`.
    Layers, Layer, "Layer"
);

/// The `<Addresses>` container: DMX addresses plus network patch entries.
///
/// Emptiness counts both kinds combined, so a container holding only
/// `<Network>` entries still serializes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Addresses {
    /// DMX addresses in document order
    pub address: Vec<Address>,
    /// Network patch entries in document order
    pub network: Vec<Network>,
}

impl Addresses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_xml(node: &XmlElement) -> Self {
        Addresses {
            address: node.find_all("Address").map(Address::from_xml).collect(),
            network: node.find_all("Network").map(Network::from_xml).collect(),
        }
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("Addresses");
        for address in &self.address {
            element.add_child(address.to_xml());
        }
        for network in &self.network {
            element.add_child(network.to_xml());
        }
        element
    }

    /// Combined count of DMX addresses and network entries.
    pub fn len(&self) -> usize {
        self.address.len() + self.network.len()
    }

    pub fn is_empty(&self) -> bool {
        self.address.is_empty() && self.network.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_reads_children_in_document_order() {
        let node = XmlElement::parse(
            r#"<Protocols>
                <Protocol name="Art-Net" type="DMX"/>
                <Protocol name="sACN"/>
            </Protocols>"#,
        )
        .unwrap();
        let protocols = Protocols::from_xml(&node);
        assert_eq!(protocols.len(), 2);
        assert_eq!(protocols[0].name, "Art-Net");
        assert_eq!(protocols[1].name, "sACN");
    }

    #[test]
    fn collection_mutation_operations() {
        let mut commands = CustomCommands::new();
        assert!(commands.is_empty());

        let first = CustomCommand {
            command: Some("Body_Pan,f 50".to_string()),
        };
        commands.push(first.clone());
        commands.insert(
            0,
            CustomCommand {
                command: Some("Head_Tilt,f 10".to_string()),
            },
        );
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[1], first);

        assert!(commands.remove_item(&first));
        assert!(!commands.remove_item(&first));
        assert_eq!(
            commands.pop().and_then(|c| c.command).as_deref(),
            Some("Head_Tilt,f 10")
        );
        assert!(commands.is_empty());
    }

    #[test]
    fn addresses_count_networks_toward_emptiness() {
        let mut addresses = Addresses::new();
        assert!(addresses.is_empty());
        addresses.network.push(Network {
            geometry: "NetworkInOut_1".to_string(),
            ..Network::default()
        });
        assert!(!addresses.is_empty());
        assert_eq!(addresses.len(), 1);
    }

    #[test]
    fn addresses_serialize_dmx_before_network() {
        let mut addresses = Addresses::new();
        addresses.network.push(Network::default());
        addresses.address.push(Address::new(1, 1, 1));
        let element = addresses.to_xml();
        assert_eq!(element.children[0].tag, "Address");
        assert_eq!(element.children[1].tag, "Network");
    }
}
