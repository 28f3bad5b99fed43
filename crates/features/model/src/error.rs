use forma_enums::EnumError;
use std::borrow::Cow;

/// Error types specific to parameters and models.
#[forma_derive::forma_error]
pub enum ModelError {
    /// A parameter's current value failed one of its constraints.
    ///
    /// `message` is the first failing constraint's message; `context` names the parameter.
    #[error("Constraint violated{}: {message}", format_context(.context))]
    Constraint { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A model could not be assembled from what it was given.
    #[error("Invalid model{}: {message}", format_context(.context))]
    Construction { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The persistence collaborator refused or failed an operation.
    #[error("Store failure{}: {message}", format_context(.context))]
    Store { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Lookup of a parameter the model does not have.
    #[error("Unknown parameter{}: {message}", format_context(.context))]
    UnknownParameter { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// An enumeration failed while a parameter was being built.
    #[error("Enumeration failure{}: {source}", format_context(.context))]
    Enumeration { source: EnumError, context: Option<Cow<'static, str>> },

    #[error("Internal model error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ModelError {
    /// Constraint failure for the named parameter.
    pub(crate) fn constraint(name: &str, message: Cow<'static, str>) -> Self {
        Self::Constraint { message, context: Some(name.to_owned().into()) }
    }

    pub(crate) fn unknown_parameter(name: &str) -> Self {
        Self::UnknownParameter { message: format!("'{name}'").into(), context: None }
    }

    pub(crate) fn store(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Store { message: message.into(), context: None }
    }
}
