//! Template storage with name and alias lookup.
//!
//! A registry maps template names to prompt templates, with a second map for
//! alias indirection. User templates loaded from disk can override built-ins
//! by name and take over aliases (last write wins).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// A named prompt template.
///
/// `name` and `prompt` are required when deserializing user template files;
/// `description` and `aliases` may be omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    /// Primary lookup key
    pub name: String,

    /// Full prompt text sent to the provider
    pub prompt: String,

    /// One-line description for listings
    #[serde(default)]
    pub description: String,

    /// Alternative lookup keys
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// User template file shape: a list of `[[template]]` records.
#[derive(Debug, Deserialize)]
struct UserTemplateFile {
    #[serde(default)]
    template: Vec<Template>,
}

/// Registry of prompt templates with alias resolution.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
    aliases: HashMap<String, String>,
}

impl TemplateRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with the built-in templates.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for template in super::builtin::builtin_templates() {
            registry.register(template);
        }
        registry
    }

    /// Register a template, replacing any existing one with the same name.
    ///
    /// Aliases are claimed last-write-wins: registering a template whose
    /// alias already points elsewhere silently reassigns it.
    pub fn register(&mut self, template: Template) {
        for alias in &template.aliases {
            if let Some(previous) = self.aliases.insert(alias.clone(), template.name.clone()) {
                if previous != template.name {
                    tracing::debug!(
                        "Alias '{alias}' reassigned from '{previous}' to '{}'",
                        template.name
                    );
                }
            }
        }
        self.templates.insert(template.name.clone(), template);
    }

    /// Look up a template by name or alias.
    ///
    /// Names take precedence: an alias can never shadow a primary name.
    pub fn get(&self, name_or_alias: &str) -> Option<&Template> {
        if let Some(template) = self.templates.get(name_or_alias) {
            return Some(template);
        }
        self.aliases
            .get(name_or_alias)
            .and_then(|name| self.templates.get(name))
    }

    /// All registered templates, in no particular order.
    pub fn list_all(&self) -> Vec<&Template> {
        self.templates.values().collect()
    }

    /// Number of registered templates (aliases not counted).
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Resolve an input string to a prompt.
    ///
    /// A template or alias hit returns its prompt text; anything else is
    /// returned unchanged. Never fails.
    pub fn resolve_prompt<'a>(&'a self, input: &'a str) -> &'a str {
        self.get(input).map(|t| t.prompt.as_str()).unwrap_or(input)
    }

    /// Load user templates from a TOML file of `[[template]]` records.
    ///
    /// A missing file is a no-op. An unreadable or malformed file (including
    /// any record missing `name` or `prompt`) skips the whole load and
    /// leaves the registry untouched; user templates must never break the
    /// built-in catalog.
    pub fn load_user_templates(&mut self, path: &Path) {
        if !path.exists() {
            return;
        }
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Skipping user templates, cannot read {}: {e}", path.display());
                return;
            }
        };
        let file: UserTemplateFile = match toml::from_str(&content) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!("Skipping user templates, cannot parse {}: {e}", path.display());
                return;
            }
        };
        for template in file.template {
            self.register(template);
        }
    }
}
