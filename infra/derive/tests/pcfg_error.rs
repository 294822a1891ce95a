use pcfg_derive::pcfg_error;
use std::borrow::Cow;

#[pcfg_error]
pub enum DemoError {
    #[error("Parse error{}: {source}", format_context(.context))]
    Parse { source: std::num::ParseIntError, context: Option<Cow<'static, str>> },

    #[error("Unknown step{}: {step}", format_context(.context))]
    UnknownStep { step: String, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn parse(raw: &str) -> Result<u32, DemoError> {
    Ok(raw.parse::<u32>()?)
}

#[test]
fn ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/pcfg_error_pass.rs");
}

#[test]
fn source_errors_convert_through_question_mark() {
    let err = parse("x").expect_err("not a number");
    assert!(matches!(err, DemoError::Parse { context: None, .. }));
}

#[test]
fn context_is_attached_to_source_results() {
    let err = "x".parse::<u32>().context("reading arrangement").expect_err("not a number");
    assert!(err.to_string().starts_with("Parse error (reading arrangement): "));
}

#[test]
fn context_is_attached_to_own_results() {
    let result: Result<(), DemoError> =
        Err(DemoError::UnknownStep { step: "colour".to_owned(), context: None });
    let err = result.context("selecting").expect_err("error expected");
    assert_eq!(err.to_string(), "Unknown step (selecting): colour");
}

#[test]
fn internal_conversions_from_strings() {
    let borrowed = DemoError::from("boom");
    assert_eq!(borrowed.to_string(), "Internal error: boom");

    let owned = DemoError::from(format!("boom {}", 2));
    assert!(matches!(owned, DemoError::Internal { message: Cow::Owned(_), .. }));
}
