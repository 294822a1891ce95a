use pcfg_allowlist::AllowlistError;
use pcfg_constraints::ConstraintError;
use std::borrow::Cow;

/// Error types specific to catalog loading and registry construction.
#[pcfg_derive::pcfg_error]
pub enum CatalogError {
    #[error("Constraint data rejected{}: {source}", format_context(.context))]
    Constraint { source: ConstraintError, context: Option<Cow<'static, str>> },

    #[error("Allowlist rejected{}: {source}", format_context(.context))]
    Allowlist { source: AllowlistError, context: Option<Cow<'static, str>> },

    #[error("Catalog I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Catalog document is not valid JSON{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Model registered twice{}: {id}", format_context(.context))]
    DuplicateModel { id: String, context: Option<Cow<'static, str>> },

    #[error("Unknown model{}: {id}", format_context(.context))]
    UnknownModel { id: String, context: Option<Cow<'static, str>> },

    /// Allowlisted codes that the model's own matrices would block.
    #[error("Allowlist entries blocked by matrices{}: {model}: {}", format_context(.context), .codes.join(", "))]
    CoverageGap { model: String, codes: Vec<String>, context: Option<Cow<'static, str>> },

    /// A model declared to have pairwise false positives has no allowlist gate.
    #[error("Model needs an allowlist{}: {model}", format_context(.context))]
    MissingAllowlist { model: String, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal catalog error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
