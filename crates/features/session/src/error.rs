use pcfg_catalog::CatalogError;
use pcfg_product_code::ProductCodeError;
use std::borrow::Cow;

/// Misuse of a session: ids that the current model does not define.
#[pcfg_derive::pcfg_error]
pub enum SessionError {
    #[error("Unknown step{}: {model}.{step}", format_context(.context))]
    UnknownStep { model: String, step: String, context: Option<Cow<'static, str>> },

    #[error("Unknown option{}: {step}={option}", format_context(.context))]
    UnknownOption { step: String, option: String, context: Option<Cow<'static, str>> },

    #[error("Model lookup failed{}: {source}", format_context(.context))]
    Catalog { source: CatalogError, context: Option<Cow<'static, str>> },

    #[error("Product code failed{}: {source}", format_context(.context))]
    ProductCode { source: ProductCodeError, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal session error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
