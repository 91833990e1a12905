//! Prompt templates.
//!
//! A template is a text pattern with `{{variable}}` placeholders substituted
//! before submission to the provider. Rendering never fails: any value that
//! serializes to text is substituted verbatim, so callers can pass arbitrary
//! path input (a year of `0`, a non-numeric string) and still get a
//! syntactically valid prompt.

use crate::error::PromptError;
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// A prompt template.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// Template name (used in error reporting).
    pub name: String,
    /// Template content with placeholders.
    pub content: String,
    /// Optional system prompt.
    pub system_prompt: Option<String>,
    /// Names of variables that must be provided when rendering.
    required: Vec<String>,
}

impl PromptTemplate {
    /// Creates a new prompt template.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            system_prompt: None,
            required: Vec::new(),
        }
    }

    /// Sets the system prompt.
    #[must_use]
    pub fn with_system_prompt(mut self, system: impl Into<String>) -> Self {
        self.system_prompt = Some(system.into());
        self
    }

    /// Marks a variable as required.
    #[must_use]
    pub fn with_required_variable(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    /// Renders the template with the given variables.
    ///
    /// Variables are substituted using `{{variable_name}}` syntax. String
    /// values render bare (no surrounding quotes); other JSON values render
    /// via their JSON representation, so numbers appear as written.
    #[must_use]
    pub fn render(&self, variables: &HashMap<String, JsonValue>) -> String {
        let mut result = self.content.clone();

        for (name, value) in variables {
            let placeholder = format!("{{{{{name}}}}}");
            let replacement = match value {
                JsonValue::String(s) => s.clone(),
                other => other.to_string(),
            };
            result = result.replace(&placeholder, &replacement);
        }

        result
    }

    /// Validates that all required variables are provided.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::MissingVariable`] for the first missing variable.
    pub fn validate_variables(
        &self,
        variables: &HashMap<String, JsonValue>,
    ) -> Result<(), PromptError> {
        for name in &self.required {
            if !variables.contains_key(name) {
                return Err(PromptError::MissingVariable {
                    template: self.name.clone(),
                    variable: name.clone(),
                });
            }
        }
        Ok(())
    }
}
