use std::borrow::Cow;

/// Authoring errors in an allowlist.
#[pcfg_derive::pcfg_error]
pub enum AllowlistError {
    #[error("Allowlist entry does not parse{}: {code}", format_context(.context))]
    Unparseable { code: String, context: Option<Cow<'static, str>> },

    /// `build(parse(code))` did not reproduce `code`.
    #[error("Allowlist entry breaks the round trip{}: {code} rebuilt as {rebuilt}", format_context(.context))]
    RoundTrip { code: String, rebuilt: String, context: Option<Cow<'static, str>> },

    #[error("Duplicate allowlist entry{}: {code}", format_context(.context))]
    Duplicate { code: String, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal allowlist error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
