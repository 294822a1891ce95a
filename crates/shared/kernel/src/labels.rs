//! Label resolution seam.
//!
//! The core never loads translations itself. Callers hand in an already-resolved
//! [`LabelLookup`]; keys follow `"{model}.{step}"` for step titles and
//! `"{model}.{step}.{option}"` for options. Missing keys fall back to the catalog text.

use fxhash::FxHashMap;
use pcfg_domain::ModelDefinition;
use std::borrow::Cow;

pub trait LabelLookup: Send + Sync {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>>;
}

/// Lookup that always falls back to catalog labels.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLabels;

impl LabelLookup for NoLabels {
    fn lookup(&self, _key: &str) -> Option<Cow<'_, str>> {
        None
    }
}

/// In-memory key -> label table.
#[derive(Debug, Default, Clone)]
pub struct StaticLabels {
    labels: FxHashMap<String, String>,
}

impl StaticLabels {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self { labels: pairs.into_iter().map(|(k, v)| (k.to_owned(), v.to_owned())).collect() }
    }

    pub fn insert(&mut self, key: impl Into<String>, label: impl Into<String>) {
        self.labels.insert(key.into(), label.into());
    }
}

impl LabelLookup for StaticLabels {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        self.labels.get(key).map(|label| Cow::Borrowed(label.as_str()))
    }
}

/// Display label of a step. Unknown steps render as their id.
pub fn step_title<'a>(
    labels: &'a dyn LabelLookup,
    model: &'a ModelDefinition,
    step: &'a str,
) -> Cow<'a, str> {
    labels.lookup(&format!("{}.{step}", model.id)).unwrap_or_else(|| {
        model.step(step).map_or(Cow::Borrowed(step), |s| Cow::Borrowed(s.title.as_str()))
    })
}

/// Display label of an option. Unknown options render as their id.
pub fn option_label<'a>(
    labels: &'a dyn LabelLookup,
    model: &'a ModelDefinition,
    step: &'a str,
    option: &'a str,
) -> Cow<'a, str> {
    labels.lookup(&format!("{}.{step}.{option}", model.id)).unwrap_or_else(|| {
        model.option(step, option).map_or(Cow::Borrowed(option), |o| Cow::Borrowed(o.label.as_str()))
    })
}
