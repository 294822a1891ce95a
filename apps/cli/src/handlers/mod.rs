pub(crate) mod catalog;
pub(crate) mod codes;
pub(crate) mod configure;
