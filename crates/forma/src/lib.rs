//! Facade crate for Forma.
//! Re-exports the domain values, enumerations and models; with the `kernel`
//! feature (on by default) also config loading and logging bootstrap.
//! Keep this crate thin: it composes the other crates and implements nothing.
//!
//! ## Usage
//! ```rust
//! use forma::prelude::*;
//!
//! let pairs = [(Value::from("s"), "Small"), (Value::from("l"), "Large")];
//! let sizes = Enumeration::from_pairs("Sizes", pairs)?;
//! let mut order = Model::new([
//!     Box::new(EnumParam::new("size", sizes).with_value("l")) as Box<dyn Parameter>,
//!     Box::new(ValueParam::new("note").with_value("gift").with_constraint(length_at_most(20))),
//! ]);
//! assert_eq!(order.process()?["size"], Value::from("l"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use forma_domain as domain;
pub use forma_enums as enums;
#[cfg(feature = "kernel")]
pub use forma_kernel as kernel;
pub use forma_model as model;

/// The types most applications need, in one import.
pub mod prelude {
    pub use forma_domain::config::{DuplicatePolicy, FormaConfig, ModelConfig};
    pub use forma_domain::{Data, RecordId, Value};
    pub use forma_enums::{Choices, EnumError, Enumeration, EnumerationItem, GroupedList};
    pub use forma_model::constraint::{
        between, digits_only, has_length, length_at_least, length_at_most, mandatory,
    };
    pub use forma_model::{
        Constraint, EnumParam, ItemModel, ListParam, Model, ModelError, MultiEnumParam,
        Parameter, Store, ValueParam,
    };
}
