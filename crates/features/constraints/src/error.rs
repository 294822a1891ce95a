use crate::consistency::Violation;
use std::borrow::Cow;

/// Authoring errors in a model's constraint data.
#[pcfg_derive::pcfg_error]
pub enum ConstraintError {
    /// One or more violations found by the startup consistency check.
    #[error(
        "Inconsistent constraints for model '{model}'{}: {}",
        format_context(.context),
        render(.violations)
    )]
    Inconsistent {
        model: String,
        violations: Vec<Violation>,
        context: Option<Cow<'static, str>>,
    },

    /// A legacy `dependsOn`/`availableFor` pair collides with an authored matrix.
    #[error("Legacy dependency conflict{}: {message}", format_context(.context))]
    LegacyConflict { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal constraint error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn render(violations: &[Violation]) -> String {
    violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}
