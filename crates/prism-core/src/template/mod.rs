//! Prompt templates: built-in catalog, user overrides, and alias resolution.
//!
//! Templates turn short names like `remove-bg` into full editing prompts.
//! Built-ins are registered first; user templates from `templates.toml`
//! override by name and can claim aliases.

pub(crate) mod builtin;
pub(crate) mod registry;

pub use registry::{Template, TemplateRegistry};
