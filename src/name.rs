//! Module for handling names of elements and attributes as the writer sees
//! them: a prefix, a local name and the namespace the prefix is bound to.
//!
//! The writer never resolves prefixes itself; the caller passes the namespace
//! alongside each name.

use std::fmt::{self, Debug, Display, Formatter};

/// A borrowed qualified name of an element or attribute.
///
/// An empty `prefix` means no prefix and an empty `namespace` means that the
/// name is in no namespace.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct QName<'a> {
    /// Prefix of the name, written before the `:`.
    pub prefix: &'a str,
    /// Local part of the name.
    pub local: &'a str,
    /// Namespace URI bound to the prefix.
    pub namespace: &'a str,
}

impl<'a> QName<'a> {
    /// Creates a name with all three parts.
    #[inline]
    pub const fn new(prefix: &'a str, local: &'a str, namespace: &'a str) -> Self {
        Self {
            prefix,
            local,
            namespace,
        }
    }

    /// Creates a name without prefix that is in no namespace.
    #[inline]
    pub const fn local(local: &'a str) -> Self {
        Self::new("", local, "")
    }

    /// Returns `true` if the name has a non-empty prefix.
    #[inline]
    pub fn has_prefix(&self) -> bool {
        !self.prefix.is_empty()
    }

    /// Returns `true` if the name is in no namespace.
    #[inline]
    pub fn is_in_no_namespace(&self) -> bool {
        self.namespace.is_empty()
    }

    /// Converts the name into an owned name.
    pub fn to_owned(&self) -> OwnedQName {
        OwnedQName {
            prefix: self.prefix.to_owned(),
            local: self.local.to_owned(),
            namespace: self.namespace.to_owned(),
        }
    }

    /// Returns the namespace and the local name which together identify the
    /// element or attribute independently of the chosen prefix.
    #[inline]
    pub fn expanded(&self) -> ExpandedName {
        ExpandedName::new(self.namespace, self.local)
    }
}

impl<'a> Debug for QName<'a> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "QName({}", self)?;
        if !self.namespace.is_empty() {
            write!(f, " in {:?}", self.namespace)?;
        }
        f.write_str(")")
    }
}

/// Formats the name as it appears in markup: `prefix:local` or `local`.
impl<'a> Display for QName<'a> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.has_prefix() {
            write!(f, "{}:{}", self.prefix, self.local)
        } else {
            f.write_str(self.local)
        }
    }
}

impl<'a> From<&'a str> for QName<'a> {
    /// Creates a name without prefix and namespace
    #[inline]
    fn from(local: &'a str) -> Self {
        Self::local(local)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// An owned version of [`QName`], used where names must outlive the call
/// that supplied them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct OwnedQName {
    /// Prefix of the name
    pub prefix: String,
    /// Local part of the name
    pub local: String,
    /// Namespace URI bound to the prefix
    pub namespace: String,
}

impl OwnedQName {
    /// Borrows the name.
    #[inline]
    pub fn borrow(&self) -> QName {
        QName::new(&self.prefix, &self.local, &self.namespace)
    }
}

impl<'a> From<QName<'a>> for OwnedQName {
    #[inline]
    fn from(name: QName<'a>) -> Self {
        name.to_owned()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// A pair of namespace URI and local name.
///
/// Two qualified names with different prefixes bound to the same namespace
/// have equal expanded names.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde-types", derive(serde::Deserialize, serde::Serialize))]
pub struct ExpandedName {
    /// Namespace URI, empty if the name is in no namespace
    pub namespace: String,
    /// Local part of the name
    pub local: String,
}

impl ExpandedName {
    /// Creates a new expanded name.
    pub fn new<N: Into<String>, L: Into<String>>(namespace: N, local: L) -> Self {
        Self {
            namespace: namespace.into(),
            local: local.into(),
        }
    }

    /// Returns `true` if this expanded name identifies `name`.
    #[inline]
    pub fn matches(&self, name: QName) -> bool {
        self.local == name.local && self.namespace == name.namespace
    }
}

impl<'a> From<&'a str> for ExpandedName {
    /// Creates a name in no namespace
    #[inline]
    fn from(local: &'a str) -> Self {
        Self::new("", local)
    }
}

impl Display for ExpandedName {
    /// Formats the name in the James Clark notation: `{namespace}local`
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.namespace.is_empty() {
            f.write_str(&self.local)
        } else {
            write!(f, "{{{}}}{}", self.namespace, self.local)
        }
    }
}
