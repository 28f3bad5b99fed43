//! # Enumerations
//!
//! Ordered, immutable collections of labelled values with optional per-item metadata.
//!
//! * [`Enumeration`]: keyed by item value; built from items, `(value, description)`
//!   pairs, or a [`GroupedList`].
//! * [`ObjectEnumeration`]: over arbitrary objects, keyed by arena token.
//! * [`Choices`]: the `(value, description)` listing consumed by display code; plain
//!   lists of pairs implement it too.
//!
//! Strict lookups ([`Enumeration::get`]) fail with [`EnumError::InvalidItem`]; the
//! tolerant ones ([`Enumeration::description`], [`Enumeration::extra`]) substitute defaults.

mod choices;
mod enumeration;
mod error;
mod item;
pub mod object;

pub use crate::choices::Choices;
pub use crate::enumeration::{EnumKey, Enumeration, GroupedList, Matches};
pub use crate::error::{EnumError, EnumErrorExt};
pub use crate::item::{EnumerationItem, GROUP};
pub use crate::object::{ObjectEnumeration, ObjectToken};
