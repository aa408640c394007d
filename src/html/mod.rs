//! Classification of HTML element and attribute names.
//!
//! The HTML writer needs to know a few things about elements and attributes
//! it writes: whether an element is void (has no end tag), whether its text
//! must not be escaped, whether an attribute is boolean or holds a URI. This
//! module answers those questions with a case-insensitive lookup in static
//! [ternary search trees]. Unknown names have no properties.
//!
//! ```
//! # use xml_emit::html::{classifier, AttributeProperties, ElementProperties};
//! let html = classifier();
//! assert!(html.element("BR").contains(ElementProperties::EMPTY));
//! assert!(html.element("Script").contains(ElementProperties::NO_ENTITIES));
//! assert_eq!(html.element("custom-element"), ElementProperties::DEFAULT);
//! assert!(html.attribute("checked").contains(AttributeProperties::BOOLEAN));
//! ```
//!
//! [ternary search trees]: https://en.wikipedia.org/wiki/Ternary_search_tree

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::sync::OnceLock;

mod tables;

macro_rules! properties {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$flag_meta:meta])*
                const $flag:ident = $value:expr;
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name(u8);

        impl $name {
            /// No properties.
            pub const DEFAULT: Self = Self(0);
            $(
                $(#[$flag_meta])*
                pub const $flag: Self = Self($value);
            )*

            /// Creates properties from their raw bit representation.
            #[inline]
            pub const fn from_bits(bits: u8) -> Self {
                Self(bits)
            }

            /// Returns the raw bit representation.
            #[inline]
            pub const fn bits(&self) -> u8 {
                self.0
            }

            /// Returns `true` if all properties of `other` are set.
            #[inline]
            pub const fn contains(&self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            /// Returns `true` if any property of `other` is set.
            #[inline]
            pub const fn intersects(&self, other: Self) -> bool {
                self.0 & other.0 != 0
            }

            /// Returns `true` if no properties are set.
            #[inline]
            pub const fn is_empty(&self) -> bool {
                self.0 == 0
            }
        }

        impl BitOr for $name {
            type Output = Self;

            #[inline]
            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl BitOrAssign for $name {
            #[inline]
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }

        impl BitAnd for $name {
            type Output = Self;

            #[inline]
            fn bitand(self, rhs: Self) -> Self {
                Self(self.0 & rhs.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(concat!(stringify!($name), "("))?;
                let mut first = true;
                $(
                    if self.contains(Self::$flag) {
                        if !first {
                            f.write_str(" | ")?;
                        }
                        first = false;
                        f.write_str(stringify!($flag))?;
                    }
                )*
                if first {
                    f.write_str("DEFAULT")?;
                }
                f.write_str(")")
            }
        }
    };
}

properties! {
    /// Properties of an HTML element.
    pub struct ElementProperties {
        /// The element can have attributes holding URIs.
        const URI_PARENT = 0x01;
        /// The element can have boolean attributes.
        const BOOL_PARENT = 0x02;
        /// The element can have a `name` attribute which is written as a URI.
        const NAME_PARENT = 0x04;
        /// Void element: written without an end tag and cannot have content.
        const EMPTY = 0x08;
        /// Text inside the element is written without escaping.
        const NO_ENTITIES = 0x10;
        /// The `<head>` element, after which the content-type `<META>` is injected.
        const HEAD = 0x20;
        /// Block-level element: a line break before and after it does not
        /// change rendering, so indentation may be inserted around it.
        const BLOCK_WS = 0x40;
        /// The element is in a namespace and is written with XML rules.
        const HAS_NS = 0x80;
    }
}

properties! {
    /// Properties of an HTML attribute.
    ///
    /// Each property takes effect only on elements that have the matching
    /// `*_PARENT` [element property](ElementProperties); see
    /// [`AttributeProperties::on`].
    pub struct AttributeProperties {
        /// The value is a URI.
        const URI = 0x01;
        /// The attribute is boolean and is written without a value.
        const BOOLEAN = 0x02;
        /// The value is a name, written with the same rules as URIs.
        const NAME = 0x04;
    }
}

impl AttributeProperties {
    /// Returns the properties that take effect when the attribute is
    /// written on an element with the specified properties.
    #[inline]
    pub const fn on(self, element: ElementProperties) -> Self {
        // `*_PARENT` bits of the element use the same positions
        Self(self.0 & element.0 & 0x07)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// A read-only ternary search tree stored in a flat byte table.
///
/// Each node takes four bytes: the character, relative offsets of the nodes
/// with smaller and greater characters, and the payload of the name ending
/// at the node. A zero character terminates a name.
#[derive(Clone, Copy)]
pub struct TernaryTree {
    nodes: &'static [u8],
}

impl TernaryTree {
    const CHAR: usize = 0;
    const LOW: usize = 1;
    const HIGH: usize = 2;
    const DATA: usize = 3;

    /// Wraps a precomputed table.
    #[inline]
    pub const fn new(nodes: &'static [u8]) -> Self {
        Self { nodes }
    }

    /// Looks up the payload of `name`, comparing ASCII letters without regard
    /// to case. Returns `0` for names not stored in the tree, including names
    /// with characters above `z` and prefixes of stored names.
    pub fn find_case_insensitive(&self, name: &str) -> u8 {
        let mut chars = name.bytes();
        let mut node = 0;
        let mut ch = match chars.next() {
            Some(b) => match normalize(b) {
                Some(ch) => ch,
                None => return 0,
            },
            None => 0,
        };
        loop {
            let pos = node * 4;
            let Some(entry) = self.nodes.get(pos..pos + 4) else {
                return 0;
            };
            let offset = if ch < entry[Self::CHAR] {
                entry[Self::LOW]
            } else if ch > entry[Self::CHAR] {
                entry[Self::HIGH]
            } else if ch == 0 {
                return entry[Self::DATA];
            } else {
                // the node of the next character always follows
                ch = match chars.next() {
                    Some(b) => match normalize(b) {
                        Some(ch) => ch,
                        None => return 0,
                    },
                    None => 0,
                };
                1
            };
            if offset == 0 {
                return 0;
            }
            node += offset as usize;
        }
    }
}

/// Converts the byte to uppercase, or returns `None` for bytes that cannot
/// appear in the tree.
#[inline]
fn normalize(b: u8) -> Option<u8> {
    match b {
        0 => None,
        b'a'..=b'z' => Some(b - (b'a' - b'A')),
        _ if b > b'z' => None,
        _ => Some(b),
    }
}

impl fmt::Debug for TernaryTree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TernaryTree {{ {} nodes }}", self.nodes.len() / 4)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// Lookup of HTML element and attribute properties.
#[derive(Debug)]
pub struct HtmlClassifier {
    elements: TernaryTree,
    attributes: TernaryTree,
}

impl HtmlClassifier {
    fn new() -> Self {
        log::trace!("initializing HTML name classifier");
        Self {
            elements: TernaryTree::new(&tables::HTML_ELEMENTS),
            attributes: TernaryTree::new(&tables::HTML_ATTRIBUTES),
        }
    }

    /// Returns properties of the element with the specified local name.
    #[inline]
    pub fn element(&self, local_name: &str) -> ElementProperties {
        ElementProperties(self.elements.find_case_insensitive(local_name))
    }

    /// Returns properties of the attribute with the specified local name,
    /// regardless of the element it is written on.
    #[inline]
    pub fn attribute(&self, local_name: &str) -> AttributeProperties {
        AttributeProperties(self.attributes.find_case_insensitive(local_name))
    }
}

/// Returns the process-wide classifier. It is built on first use and never
/// changes afterwards.
pub fn classifier() -> &'static HtmlClassifier {
    static CLASSIFIER: OnceLock<HtmlClassifier> = OnceLock::new();
    CLASSIFIER.get_or_init(HtmlClassifier::new)
}
