// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::collections::BTreeMap;
use alloc::collections::btree_map;
use alloc::sync::Arc;

use smallvec::SmallVec;

/// The ordered set of formats active on a single character.
///
/// Order is significant: earlier formats enclose later ones when the value is turned into a
/// tree.
pub type Formats = SmallVec<[Arc<Format>; 2]>;

/// Attributes carried by a [`Format`], keyed by name.
///
/// Keys are kept sorted so that two attribute maps with the same entries compare equal and
/// serialize identically regardless of insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Attributes {
    entries: BTreeMap<Arc<str>, Arc<str>>,
}

impl Attributes {
    /// Creates an empty attribute map.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the attribute `name`, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<Arc<str>>, value: impl Into<Arc<str>>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds or replaces the attribute `name`, returning the previous value.
    pub fn insert(
        &mut self,
        name: impl Into<Arc<str>>,
        value: impl Into<Arc<str>>,
    ) -> Option<Arc<str>> {
        self.entries.insert(name.into(), value.into())
    }

    /// Returns the value of the attribute `name`.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|value| &**value)
    }

    /// Returns `true` if the attribute `name` is present.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns the number of attributes.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no attributes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, value)` pairs in name order.
    #[inline]
    pub fn iter(&self) -> AttributesIter<'_> {
        AttributesIter {
            inner: self.entries.iter(),
        }
    }
}

impl<K: Into<Arc<str>>, V: Into<Arc<str>>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for (name, value) in iter {
            attributes.insert(name, value);
        }
        attributes
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a str, &'a str);
    type IntoIter = AttributesIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of an [`Attributes`] map.
#[derive(Clone, Debug)]
pub struct AttributesIter<'a> {
    inner: btree_map::Iter<'a, Arc<str>, Arc<str>>,
}

impl<'a> Iterator for AttributesIter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(name, value)| (&**name, &**value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for AttributesIter<'_> {}

/// A single inline formatting instance, such as bold or a link.
///
/// Two formats are the same instance (and adjacent runs carrying them merge into one element)
/// exactly when they compare equal: same tag, same attributes, same object flag.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Format {
    tag: Arc<str>,
    attributes: Attributes,
    object: bool,
}

impl Format {
    /// Creates a format with the given element tag and no attributes.
    pub fn new(tag: impl Into<Arc<str>>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Attributes::new(),
            object: false,
        }
    }

    /// Creates a void inline object, such as an image.
    ///
    /// Objects occupy a single [`OBJECT_REPLACEMENT_CHARACTER`](crate::OBJECT_REPLACEMENT_CHARACTER)
    /// and never have children.
    pub fn object(tag: impl Into<Arc<str>>) -> Self {
        Self {
            object: true,
            ..Self::new(tag)
        }
    }

    /// Replaces the attributes of this format.
    #[must_use]
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Adds or replaces a single attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<Arc<str>>, value: impl Into<Arc<str>>) -> Self {
        self.attributes.insert(name, value);
        self
    }

    /// The element tag this format renders as.
    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The attributes of this format.
    #[inline]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Returns `true` for void inline objects.
    #[inline]
    pub fn is_object(&self) -> bool {
        self.object
    }
}

#[cfg(test)]
mod tests {
    use super::{Attributes, Format};
    use alloc::vec::Vec;

    #[test]
    fn attribute_order_does_not_affect_equality() {
        let a = Attributes::new().with("href", "#a").with("rel", "nofollow");
        let b = Attributes::new().with("rel", "nofollow").with("href", "#a");
        assert_eq!(a, b);
        let names: Vec<_> = a.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["href", "rel"]);
    }

    #[test]
    fn formats_compare_deeply() {
        let link = |href: &str| Format::new("a").with_attribute("href", href);
        assert_eq!(link("#x"), link("#x"));
        assert_ne!(link("#x"), link("#y"));
        assert_ne!(Format::new("img"), Format::object("img"));
    }

    #[test]
    fn insert_replaces_existing_value() {
        let mut attributes = Attributes::new();
        assert!(attributes.insert("href", "#a").is_none());
        assert_eq!(attributes.insert("href", "#b").as_deref(), Some("#a"));
        assert_eq!(attributes.get("href"), Some("#b"));
        assert_eq!(attributes.len(), 1);
    }
}
