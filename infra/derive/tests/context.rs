use forma_derive::forma_error;
use std::borrow::Cow;

#[forma_error]
pub enum ProbeError {
    #[error("Parse failure{}: {source}", format_context(.context))]
    Parse { source: std::num::ParseIntError, context: Option<Cow<'static, str>> },

    #[error("Rejected{}: {message}", format_context(.context))]
    Rejected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal probe error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn parse(raw: &str) -> Result<i64, ProbeError> {
    raw.parse::<i64>().context("Parsing probe input")
}

#[test]
fn source_errors_convert_with_context() {
    let err = parse("nope").unwrap_err();
    assert_eq!(err.kind(), "Parse");
    assert!(err.to_string().starts_with("Parse failure (Parsing probe input): "));
}

#[test]
fn context_is_attached_to_own_variants() {
    let result: Result<(), ProbeError> =
        Err(ProbeError::Rejected { message: "value too large".into(), context: None });
    let err = result.context("Checking limit").unwrap_err();
    assert_eq!(err.to_string(), "Rejected (Checking limit): value too large");
}

#[test]
fn strings_become_internal_errors() {
    let err: ProbeError = String::from("unexpected").into();
    assert_eq!(err.kind(), "Internal");
    assert_eq!(err.to_string(), "Internal probe error: unexpected");
}
