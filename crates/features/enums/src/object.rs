//! Enumerations over arbitrary objects.
//!
//! Objects need not be comparable or hashable: each one is moved into an arena
//! and keyed by the [`ObjectToken`] it receives on insertion.

use crate::choices::Choices;
use crate::enumeration::Enumeration;
use crate::error::EnumError;
use crate::item::EnumerationItem;
use std::fmt;
use std::ops::Deref;

/// Stable handle of an object inside an [`ObjectEnumeration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectToken(usize);

impl ObjectToken {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ObjectToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object#{}", self.0)
    }
}

/// An enumeration whose values are arbitrary objects, keyed by arena token.
///
/// Dereferences to the underlying token-keyed [`Enumeration`], so `get`,
/// `find`, `extra` and friends work with tokens.
#[derive(Debug, Clone)]
pub struct ObjectEnumeration<T> {
    objects: Vec<T>,
    tokens: Enumeration<ObjectToken>,
}

impl<T> ObjectEnumeration<T> {
    /// Moves every item's object into the arena and builds the token-keyed enumeration.
    ///
    /// # Errors
    /// Propagates [`EnumError`] from the underlying construction.
    pub fn new(
        doc: impl Into<String>,
        items: impl IntoIterator<Item = EnumerationItem<T>>,
    ) -> Result<Self, EnumError> {
        let mut objects = Vec::new();
        let items: Vec<_> = items
            .into_iter()
            .map(|item| {
                item.map_value(|object| {
                    objects.push(object);
                    ObjectToken(objects.len() - 1)
                })
            })
            .collect();

        let tokens = Enumeration::new(doc, items)?;
        Ok(Self { objects, tokens })
    }

    /// Builds from `(object, description)` pairs.
    ///
    /// # Errors
    /// Propagates [`EnumError`] from the underlying construction.
    pub fn from_pairs<D: Into<String>>(
        doc: impl Into<String>,
        pairs: impl IntoIterator<Item = (T, D)>,
    ) -> Result<Self, EnumError> {
        Self::new(doc, pairs.into_iter().map(|(object, desc)| EnumerationItem::new(object, desc)))
    }

    pub fn object(&self, token: ObjectToken) -> Option<&T> {
        self.objects.get(token.0)
    }

    /// Token of an object borrowed from this enumeration, found by its slot in the arena.
    ///
    /// Zero-sized objects all share one address, so they can never be told apart
    /// and always resolve to `None`; look those up by token instead.
    pub fn token_of(&self, object: &T) -> Option<ObjectToken> {
        let size = size_of::<T>();
        if size == 0 {
            return None;
        }
        let offset = std::ptr::from_ref(object).addr().checked_sub(self.objects.as_ptr().addr())?;
        let index = offset / size;
        (offset % size == 0 && index < self.objects.len()).then_some(ObjectToken(index))
    }

    /// Strict lookup by object identity.
    ///
    /// # Errors
    /// Returns [`EnumError::InvalidItem`] if `object` does not live in this enumeration.
    pub fn get_object(&self, object: &T) -> Result<&EnumerationItem<ObjectToken>, EnumError> {
        let token = self.token_of(object).ok_or_else(|| EnumError::InvalidItem {
            message: "object is not part of this enumeration".into(),
            context: (!self.tokens.doc().is_empty()).then(|| self.tokens.doc().to_owned().into()),
        })?;
        self.tokens.get(&token)
    }

    /// Items paired with their objects, in order.
    pub fn iter_objects(&self) -> impl Iterator<Item = (&EnumerationItem<ObjectToken>, &T)> {
        self.tokens.iter().map(|item| (item, &self.objects[item.value().0]))
    }

    /// Visible `(object, description)` pairs.
    pub fn object_pairs(&self) -> Vec<(&T, &str)> {
        self.iter_objects()
            .filter(|(item, _)| !item.is_hidden())
            .map(|(item, object)| (object, item.description()))
            .collect()
    }
}

impl<T> Deref for ObjectEnumeration<T> {
    type Target = Enumeration<ObjectToken>;

    fn deref(&self) -> &Self::Target {
        &self.tokens
    }
}

impl<T> Choices for ObjectEnumeration<T> {
    type Value = ObjectToken;

    fn as_pairs(&self) -> Vec<(ObjectToken, String)> {
        self.tokens.as_pairs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Widget {
        label: &'static str,
    }

    #[test]
    fn objects_are_keyed_by_token() {
        let e = ObjectEnumeration::from_pairs(
            "Widgets",
            [(Widget { label: "a" }, "First"), (Widget { label: "b" }, "Second")],
        )
        .unwrap();

        let pairs = e.as_pairs();
        assert_eq!(pairs.len(), 2);
        assert_eq!(e.object(pairs[1].0).map(|w| w.label), Some("b"));
        assert_eq!(e.description(&pairs[0].0), "First");
    }

    #[test]
    fn identity_lookup_distinguishes_equal_looking_objects() {
        let e = ObjectEnumeration::from_pairs(
            "Twins",
            [(Widget { label: "same" }, "Left"), (Widget { label: "same" }, "Right")],
        )
        .unwrap();

        let (_, right) = e.iter_objects().nth(1).unwrap();
        assert_eq!(e.get_object(right).unwrap().description(), "Right");

        let stranger = Widget { label: "same" };
        assert!(matches!(e.get_object(&stranger), Err(EnumError::InvalidItem { .. })));
    }

    #[derive(Debug)]
    struct Marker;

    #[test]
    fn zero_sized_objects_are_only_reachable_by_token() {
        let e = ObjectEnumeration::from_pairs("", [(Marker, "First"), (Marker, "Second")]).unwrap();

        let (item, second) = e.iter_objects().nth(1).unwrap();
        assert_eq!(item.description(), "Second");
        assert_eq!(e.token_of(second), None);
        assert!(matches!(e.get_object(second), Err(EnumError::InvalidItem { .. })));
        assert_eq!(e.get(item.value()).unwrap().description(), "Second");
    }

    #[test]
    fn hidden_objects_leave_the_listing() {
        let e = ObjectEnumeration::new(
            "",
            [
                EnumerationItem::new(Widget { label: "x" }, "X").with_hidden(true),
                EnumerationItem::new(Widget { label: "y" }, "Y"),
            ],
        )
        .unwrap();

        let labels: Vec<_> = e.object_pairs().into_iter().map(|(w, _)| w.label).collect();
        assert_eq!(labels, vec!["y"]);
        assert_eq!(e.len(), 2);
    }
}
