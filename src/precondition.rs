// ABOUTME: Stack and template preconditions for a change-set update.
// ABOUTME: The stack must be updatable; the template must take our two parameters.

use serde::Deserialize;
use serde::de::IgnoredAny;
use std::collections::BTreeMap;
use std::path::Path;

use crate::deploy::{DeployError, Stage};
use crate::platform::{StackPlatform, StackStatus, StackSummary};

/// Find `stack_name` among stacks that are ready for an update.
///
/// Every page of the listing is read until the stack turns up.
///
/// # Errors
///
/// `DeployError::Precondition` if no page lists it.
pub async fn check_stack_updatable<P: StackPlatform + ?Sized>(
    platform: &P,
    stack_name: &str,
) -> Result<StackSummary, DeployError> {
    let filter = StackStatus::updatable();
    let mut next_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = platform
            .list_stacks(&filter, next_token.as_deref())
            .await
            .map_err(DeployError::platform(Stage::Precondition))?;
        pages += 1;

        if let Some(stack) = page.stacks.into_iter().find(|s| s.stack_name == stack_name) {
            tracing::debug!(
                "Stack {} is {} (found on page {})",
                stack_name,
                stack.stack_status,
                pages
            );
            return Ok(stack);
        }

        match page.next_token {
            Some(token) => next_token = Some(token),
            None => break,
        }
    }

    Err(DeployError::Precondition(format!(
        "stack '{stack_name}' either does not exist or is not ready for update"
    )))
}

/// Parameter declarations read from a template.
#[derive(Debug, Clone, Default)]
pub struct TemplateParameters {
    declared: BTreeMap<String, bool>,
}

impl TemplateParameters {
    /// Parse the `Parameters` section of a JSON or YAML template.
    pub fn parse(content: &str) -> Result<Self, String> {
        let doc: TemplateDoc = if content.trim_start().starts_with('{') {
            serde_json::from_str(content).map_err(|e| e.to_string())?
        } else {
            serde_yaml::from_str(content).map_err(|e| e.to_string())?
        };

        Ok(Self {
            declared: doc
                .parameters
                .into_iter()
                .map(|(name, decl)| (name, decl.default.is_some()))
                .collect(),
        })
    }

    pub fn declares(&self, name: &str) -> bool {
        self.declared.contains_key(name)
    }

    pub fn has_default(&self, name: &str) -> bool {
        self.declared.get(name).copied().unwrap_or(false)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declared.keys().map(String::as_str)
    }
}

#[derive(Debug, Deserialize)]
struct TemplateDoc {
    #[serde(rename = "Parameters", default)]
    parameters: BTreeMap<String, ParameterDeclaration>,
}

#[derive(Debug, Deserialize)]
struct ParameterDeclaration {
    #[serde(rename = "Default")]
    default: Option<IgnoredAny>,
}

/// Check the template declares every `required` parameter and defaults the rest.
///
/// # Errors
///
/// `DeployError::Precondition` naming the template and the offending
/// parameter, or if the template cannot be read or parsed.
pub async fn check_template_parameters(
    template: &Path,
    required: &[&str],
) -> Result<TemplateParameters, DeployError> {
    let content = tokio::fs::read_to_string(template).await.map_err(|e| {
        DeployError::Precondition(format!(
            "template '{}' could not be read: {}",
            template.display(),
            e
        ))
    })?;

    let parameters = TemplateParameters::parse(&content).map_err(|e| {
        DeployError::Precondition(format!(
            "template '{}' is not valid JSON or YAML: {}",
            template.display(),
            e
        ))
    })?;

    check_declarations(&parameters, template, required)?;
    Ok(parameters)
}

fn check_declarations(
    parameters: &TemplateParameters,
    template: &Path,
    required: &[&str],
) -> Result<(), DeployError> {
    for name in required {
        if !parameters.declares(name) {
            return Err(DeployError::Precondition(format!(
                "parameter '{}' not present in template '{}'",
                name,
                template.display()
            )));
        }
    }

    if let Some(undefaulted) = parameters
        .names()
        .find(|name| !required.contains(name) && !parameters.has_default(name))
    {
        return Err(DeployError::Precondition(format!(
            "additional parameters in template '{}' without defaults (e.g. '{}')",
            template.display(),
            undefaulted
        )));
    }

    Ok(())
}
