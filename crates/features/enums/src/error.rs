use std::borrow::Cow;

/// Error types specific to enumerations.
#[forma_derive::forma_error]
pub enum EnumError {
    /// Two items produced the same key during construction.
    #[error("Duplicate enumeration value{}: {message}", format_context(.context))]
    DuplicateValue { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Strict lookup of a value that is not part of the enumeration.
    #[error("Invalid enumeration item{}: {message}", format_context(.context))]
    InvalidItem { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// `find`/`find_all` called with zero or several criteria.
    #[error("Invalid enumeration query{}: {message}", format_context(.context))]
    QueryArity { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Attribute-style access to metadata that was never supplied.
    #[error("Unknown enumeration item attribute{}: {message}", format_context(.context))]
    UnknownAttribute { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
