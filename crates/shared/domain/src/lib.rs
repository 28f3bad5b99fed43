//! # Domain
//!
//! Shared types for the Forma crates: the dynamic [`Value`] that flows through parameters,
//! enumeration metadata and model callbacks, plus configuration models.
//! Keep it lean: data and simple helpers only.

pub mod config;
pub mod value;

pub use crate::value::{Data, RecordId, Value};
pub use chrono::{DateTime, Utc};
pub use rust_decimal::Decimal;
