use std::sync::Arc;

use tracing::debug;

use crate::{
    clients::listmonk::ListmonkClient,
    error::{Operation, OperationError},
    models::state::TemplateState,
    utils::parse_template_id,
};

/// Read-only lookup of an existing template by identifier.
#[derive(Debug, Clone)]
pub struct TemplateDataSource {
    client: Arc<ListmonkClient>,
}

impl TemplateDataSource {
    pub fn new(client: Arc<ListmonkClient>) -> Self {
        Self { client }
    }

    pub async fn read(&self, id: &str) -> Result<TemplateState, OperationError> {
        let id = parse_template_id(id)
            .map_err(|e| OperationError::new(Operation::DataSourceRead, e))?;

        debug!(template_id = id, "Looking up template");

        let template = self
            .client
            .get_template(id)
            .await
            .map_err(|e| OperationError::new(Operation::DataSourceRead, e))?;

        Ok(TemplateState::from_template(&template))
    }
}
