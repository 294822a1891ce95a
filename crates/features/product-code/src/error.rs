use std::borrow::Cow;

#[pcfg_derive::pcfg_error]
pub enum ProductCodeError {
    /// The configuration holds an option the model does not define.
    #[error("Unknown option{}: {step}={option}", format_context(.context))]
    UnknownOption { step: String, option: String, context: Option<Cow<'static, str>> },
}
