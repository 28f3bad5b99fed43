//! # Models
//!
//! Validation and processing of form data.
//!
//! * [`Parameter`]: a named value checked by an ordered list of [`Constraint`]s.
//!   Variants add their own checks ahead of the ones attached from outside, and
//!   the first failing check decides the error message.
//! * [`Model`]: named parameters validated together, then handed to a callback.
//!   Validation stops at the first failure.
//! * [`ItemModel`]: a model synthesised from a [`RecordSchema`] that creates or
//!   updates a record in a [`Store`] when processed.
//!
//! ## Example
//!
//! ```rust
//! use forma_model::constraint::mandatory;
//! use forma_model::{Model, ModelError, Parameter, ValueParam};
//!
//! let mut model = Model::builder()
//!     .param(ValueParam::new("name").with_constraint(mandatory()))
//!     .param(ValueParam::new("age").with_value(42))
//!     .callback(|data| Ok::<_, ModelError>(format!("{} is {}", data["name"], data["age"])))
//!     .build()
//!     .unwrap();
//!
//! assert!(model.process().is_err());
//! model.param_mut("name").unwrap().set_value("Ada".into());
//! assert_eq!(model.process().unwrap(), "Ada is 42");
//! ```

pub mod constraint;
mod error;
mod item;
mod model;
mod param;
mod schema;
mod store;

pub use crate::constraint::Constraint;
pub use crate::error::{ModelError, ModelErrorExt};
pub use crate::item::{ItemModel, ItemModelBuilder};
pub use crate::model::{Model, ModelBuilder, NoCallback, WithCallback};
pub use crate::param::{
    DecimalParam, EnumParam, ListParam, MultiEnumParam, Parameter, ReferenceParam, StoreIdParam,
    ValueParam,
};
pub use crate::schema::{
    AttributeDescriptor, AttributeKind, RecordSchema, param_from_attribute, params_from_schema,
};
pub use crate::store::{MemoryStore, Store};
