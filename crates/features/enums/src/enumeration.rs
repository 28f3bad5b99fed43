use crate::choices::Choices;
use crate::error::EnumError;
use crate::item::{EnumerationItem, GROUP};
use forma_domain::Value;
use indexmap::IndexMap;
use indexmap::map::Entry;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{debug, trace};

/// Bound shared by every enumeration key.
pub trait EnumKey: Clone + Debug + Eq + Hash {}
impl<T: Clone + Debug + Eq + Hash> EnumKey for T {}

/// An ordered, labelled value domain.
///
/// Items keep their insertion order and are keyed by their value; no two items
/// may share a key. After construction only an item's visibility and extra
/// metadata may change.
///
/// # Example
///
/// ```rust
/// use forma_enums::{Enumeration, EnumerationItem};
///
/// let colours = Enumeration::new(
///     "Colours",
///     [
///         EnumerationItem::new("r", "Red").with_extra("warm", true),
///         EnumerationItem::new("b", "Blue").with_extra("warm", false),
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(colours.description(&"b"), "Blue");
/// assert_eq!(colours.find_by("warm", true).map(|i| *i.value()), Some("r"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumeration<V: EnumKey = Value> {
    doc: String,
    items: IndexMap<V, EnumerationItem<V>>,
}

/// Input shapes accepted by [`Enumeration::from_grouped`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupedList<V> {
    /// Plain `(value, description)` pairs, treated as one unnamed group.
    Flat(Vec<(V, String)>),
    /// `(group name, pairs)` tuples; `None` names an unnamed group.
    Grouped(Vec<(Option<String>, Vec<(V, String)>)>),
}

impl<V: EnumKey> Enumeration<V> {
    /// Builds an enumeration from items, in order.
    ///
    /// # Errors
    /// Returns [`EnumError::DuplicateValue`] naming the first key seen twice.
    pub fn new(
        doc: impl Into<String>,
        items: impl IntoIterator<Item = EnumerationItem<V>>,
    ) -> Result<Self, EnumError> {
        let doc = doc.into();
        let mut map = IndexMap::new();

        for item in items {
            match map.entry(item.value().clone()) {
                Entry::Occupied(entry) => {
                    debug!(doc = %doc, key = ?entry.key(), "Rejecting duplicate enumeration value");
                    return Err(EnumError::DuplicateValue {
                        message: format!("{:?}", entry.key()).into(),
                        context: (!doc.is_empty()).then(|| doc.clone().into()),
                    });
                },
                Entry::Vacant(entry) => {
                    entry.insert(item);
                },
            }
        }

        trace!(doc = %doc, len = map.len(), "Enumeration constructed");
        Ok(Self { doc, items: map })
    }

    /// Builds an enumeration from `(value, description)` pairs without metadata.
    ///
    /// # Errors
    /// Returns [`EnumError::DuplicateValue`] if a value repeats.
    pub fn from_pairs<D: Into<String>>(
        doc: impl Into<String>,
        pairs: impl IntoIterator<Item = (V, D)>,
    ) -> Result<Self, EnumError> {
        Self::new(doc, pairs.into_iter().map(|(value, desc)| EnumerationItem::new(value, desc)))
    }

    /// Builds an enumeration from a flat or grouped list.
    ///
    /// Every item gets a [`GROUP`] extra holding its group name (`Null` for the
    /// unnamed group). The resulting enumeration has an empty doc.
    ///
    /// # Errors
    /// Returns [`EnumError::DuplicateValue`] if a value repeats, even across groups.
    pub fn from_grouped(list: GroupedList<V>) -> Result<Self, EnumError> {
        let groups = match list {
            GroupedList::Flat(pairs) => vec![(None, pairs)],
            GroupedList::Grouped(groups) => groups,
        };

        let items = groups.into_iter().flat_map(|(group, pairs)| {
            pairs.into_iter().map(move |(value, desc)| {
                EnumerationItem::new(value, desc).with_extra(GROUP, group.clone())
            })
        });

        Self::new(String::new(), items)
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, value: &V) -> bool {
        self.items.contains_key(value)
    }

    /// All items in insertion order, hidden ones included.
    pub fn iter(&self) -> impl Iterator<Item = &EnumerationItem<V>> {
        self.items.values()
    }

    /// All values in insertion order, hidden ones included.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.items.keys()
    }

    /// Strict lookup by value.
    ///
    /// # Errors
    /// Returns [`EnumError::InvalidItem`] if no item has this value.
    pub fn get(&self, value: &V) -> Result<&EnumerationItem<V>, EnumError> {
        self.items.get(value).ok_or_else(|| self.invalid(value))
    }

    /// Strict lookup for mutation; only visibility and extras can be changed.
    ///
    /// # Errors
    /// Returns [`EnumError::InvalidItem`] if no item has this value.
    pub fn get_mut(&mut self, value: &V) -> Result<&mut EnumerationItem<V>, EnumError> {
        match self.items.get_index_of(value) {
            Some(index) => Ok(&mut self.items[index]),
            None => Err(self.invalid(value)),
        }
    }

    /// The item's description, or `""` for an unknown value.
    pub fn description(&self, value: &V) -> &str {
        self.items.get(value).map_or("", EnumerationItem::description)
    }

    /// The item's named extra, or `default` if the value or the extra is absent.
    pub fn extra(&self, value: &V, name: &str, default: Value) -> Value {
        match self.items.get(value) {
            Some(item) => item.extra_or(name, default),
            None => default,
        }
    }

    /// First item (in order) whose extra metadata matches the single criterion.
    ///
    /// # Errors
    /// Returns [`EnumError::QueryArity`] unless exactly one criterion is given.
    pub fn find<'c>(
        &self,
        criteria: impl IntoIterator<Item = (&'c str, Value)>,
    ) -> Result<Option<&EnumerationItem<V>>, EnumError> {
        Ok(self.find_all(criteria)?.next())
    }

    /// Lazily yields every item whose extra metadata matches the single criterion.
    ///
    /// Each call returns a fresh iterator.
    ///
    /// # Errors
    /// Returns [`EnumError::QueryArity`] unless exactly one criterion is given.
    pub fn find_all<'c>(
        &self,
        criteria: impl IntoIterator<Item = (&'c str, Value)>,
    ) -> Result<Matches<'_, V>, EnumError> {
        let (name, expected) = single_criterion(criteria)?;
        Ok(self.matches(name, expected))
    }

    /// [`Self::find`] with the criterion spelled out.
    pub fn find_by(&self, name: &str, expected: impl Into<Value>) -> Option<&EnumerationItem<V>> {
        self.matches(name, expected.into()).next()
    }

    /// [`Self::find_all`] with the criterion spelled out.
    pub fn find_all_by(&self, name: &str, expected: impl Into<Value>) -> Matches<'_, V> {
        self.matches(name, expected.into())
    }

    /// Visible `(value, description)` pairs grouped by their [`GROUP`] extra.
    ///
    /// Groups appear in the order of their first visible item; items without a
    /// group land in the `Null` group.
    pub fn as_grouped_pairs(&self) -> Vec<(Value, Vec<(V, String)>)> {
        let mut groups: IndexMap<Value, Vec<(V, String)>> = IndexMap::new();
        for item in self.iter().filter(|item| !item.is_hidden()) {
            let group = item.extra_or(GROUP, Value::Null);
            groups
                .entry(group)
                .or_default()
                .push((item.value().clone(), item.description().to_owned()));
        }
        groups.into_iter().collect()
    }

    fn matches(&self, name: &str, expected: Value) -> Matches<'_, V> {
        Matches { items: self.items.values(), name: name.to_owned(), expected }
    }

    fn invalid(&self, value: &V) -> EnumError {
        EnumError::InvalidItem {
            message: format!("{value:?}").into(),
            context: (!self.doc.is_empty()).then(|| self.doc.clone().into()),
        }
    }
}

impl<V: EnumKey> Choices for Enumeration<V> {
    type Value = V;

    fn as_pairs(&self) -> Vec<(V, String)> {
        self.iter()
            .filter(|item| !item.is_hidden())
            .map(|item| (item.value().clone(), item.description().to_owned()))
            .collect()
    }
}

impl<'a, V: EnumKey> IntoIterator for &'a Enumeration<V> {
    type Item = &'a EnumerationItem<V>;
    type IntoIter = indexmap::map::Values<'a, V, EnumerationItem<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.values()
    }
}

/// Iterator over the items matching one metadata criterion, in enumeration order.
#[derive(Debug, Clone)]
pub struct Matches<'a, V> {
    items: indexmap::map::Values<'a, V, EnumerationItem<V>>,
    name: String,
    expected: Value,
}

impl<'a, V> Iterator for Matches<'a, V> {
    type Item = &'a EnumerationItem<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let Self { items, name, expected } = self;
        items.find(|item| item.matches(name, expected))
    }
}

fn single_criterion<'c>(
    criteria: impl IntoIterator<Item = (&'c str, Value)>,
) -> Result<(&'c str, Value), EnumError> {
    let mut criteria = criteria.into_iter();
    match (criteria.next(), criteria.next()) {
        (Some(criterion), None) => Ok(criterion),
        (None, _) => Err(EnumError::QueryArity {
            message: "exactly one criterion is required, none given".into(),
            context: None,
        }),
        (Some(_), Some(_)) => Err(EnumError::QueryArity {
            message: format!("exactly one criterion is required, {} given", 2 + criteria.count())
                .into(),
            context: None,
        }),
    }
}
