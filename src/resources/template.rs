use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::{
    clients::listmonk::ListmonkClient,
    error::{Operation, OperationError},
    models::state::{TemplateSpec, TemplateState},
    resources::Resource,
    utils::parse_template_id,
};

/// Reconciles `listmonk_template` resources.
#[derive(Debug, Clone)]
pub struct TemplateResource {
    client: Arc<ListmonkClient>,
}

impl TemplateResource {
    pub fn new(client: Arc<ListmonkClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Resource for TemplateResource {
    type Desired = TemplateSpec;
    type State = TemplateState;

    async fn create(&self, desired: &TemplateSpec) -> Result<TemplateState, OperationError> {
        debug!(name = %desired.name, template_type = %desired.template_type, "Creating template");

        let created = self
            .client
            .create_template(&desired.to_draft())
            .await
            .map_err(|e| OperationError::new(Operation::Create, e))?;

        // Declared fields stay as planned; only computed ones come from the server.
        let mut state = TemplateState::planned(desired);
        state.id = Some(created.id.to_string());
        state.created_at = Some(created.created_at);
        state.updated_at = Some(created.updated_at);
        state.is_default = Some(created.is_default);

        Ok(state)
    }

    async fn read(&self, state: &TemplateState) -> Result<TemplateState, OperationError> {
        let id = parse_template_id(state.id_str())
            .map_err(|e| OperationError::new(Operation::Read, e))?;

        info!(template_id = id, "Reading template");

        let template = self
            .client
            .get_template(id)
            .await
            .map_err(|e| OperationError::new(Operation::Read, e))?;

        Ok(state.clone().refreshed_from(&template))
    }

    async fn update(
        &self,
        state: &TemplateState,
        desired: &TemplateSpec,
    ) -> Result<TemplateState, OperationError> {
        let id = parse_template_id(state.id_str())
            .map_err(|e| OperationError::new(Operation::Update, e))?;

        debug!(template_id = id, "Updating template");

        let updated = self
            .client
            .update_template(&desired.to_draft().with_id(id))
            .await
            .map_err(|e| OperationError::new(Operation::Update, e))?;

        let mut next = TemplateState::planned(desired);
        next.id = state.id.clone();
        next.created_at = state.created_at.clone();
        next.updated_at = Some(updated.updated_at);
        next.is_default = Some(updated.is_default);

        Ok(next)
    }

    async fn delete(&self, state: &TemplateState) -> Result<(), OperationError> {
        let id = parse_template_id(state.id_str())
            .map_err(|e| OperationError::new(Operation::Delete, e))?;

        self.client
            .delete_template(id)
            .await
            .map_err(|e| OperationError::new(Operation::Delete, e))
    }

    fn import(&self, external_id: &str) -> TemplateState {
        debug!(external_id, "Importing template");
        TemplateState::with_id(external_id)
    }
}
