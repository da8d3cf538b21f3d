use serde::{Deserialize, Serialize};

/// A listmonk template as returned by the API.
///
/// `id`, `created_at`, `updated_at` and `is_default` are owned by the server
/// and stay at their zero values on a draft that has not been created yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Template {
    pub id: i64,
    pub created_at: String,
    pub updated_at: String,
    pub name: String,
    pub body: String,
    #[serde(rename = "type")]
    pub template_type: String,
    pub is_default: bool,
    pub subject: String,
}

impl Template {
    pub fn draft(
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
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn payload(&self) -> TemplatePayload<'_> {
        TemplatePayload {
            name: &self.name,
            body: &self.body,
            template_type: &self.template_type,
            subject: &self.subject,
        }
    }
}

/// Request body for create and update.
///
/// Only the mutable fields are sent. The API replaces the whole record on
/// update, so all four are always present.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TemplatePayload<'a> {
    pub name: &'a str,
    pub body: &'a str,
    #[serde(rename = "type")]
    pub template_type: &'a str,
    pub subject: &'a str,
}
