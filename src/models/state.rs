use serde::{Deserialize, Serialize};

use crate::models::template::Template;

/// User-declared fields of a template resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSpec {
    pub name: String,
    pub body: String,
    #[serde(rename = "type")]
    pub template_type: String,
    pub subject: String,
}

impl TemplateSpec {
    pub fn new(
        name: impl Into<String>,
        body: impl Into<String>,
        template_type: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
            template_type: template_type.into(),
            subject: subject.into(),
        }
    }

    pub fn to_draft(&self) -> Template {
        Template::draft(&self.name, &self.body, &self.template_type, &self.subject)
    }
}

/// Orchestrator-visible state of one template instance.
///
/// Computed fields are `None` until the server has reported them. The
/// identifier is kept as the string the orchestrator stores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateState {
    pub id: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub name: Option<String>,
    pub body: Option<String>,
    #[serde(rename = "type")]
    pub template_type: Option<String>,
    pub is_default: Option<bool>,
    pub subject: Option<String>,
}

impl TemplateState {
    /// State holding only an identifier, as produced by import.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Declared fields copied from `spec`, computed fields unset.
    pub fn planned(spec: &TemplateSpec) -> Self {
        Self {
            name: Some(spec.name.clone()),
            body: Some(spec.body.clone()),
            template_type: Some(spec.template_type.clone()),
            subject: Some(spec.subject.clone()),
            ..Default::default()
        }
    }

    /// Full state taken from a server record, identifier included.
    pub fn from_template(template: &Template) -> Self {
        Self {
            id: Some(template.id.to_string()),
            ..Default::default()
        }
        .refreshed_from(template)
    }

    /// Overwrites every server-owned and mutable field from `template`,
    /// keeping the stored identifier.
    pub fn refreshed_from(mut self, template: &Template) -> Self {
        self.created_at = Some(template.created_at.clone());
        self.updated_at = Some(template.updated_at.clone());
        self.name = Some(template.name.clone());
        self.body = Some(template.body.clone());
        self.template_type = Some(template.template_type.clone());
        self.is_default = Some(template.is_default);
        self.subject = Some(template.subject.clone());
        self
    }

    pub fn id_str(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}
