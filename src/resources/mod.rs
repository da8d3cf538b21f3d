use async_trait::async_trait;

use crate::error::OperationError;

pub mod data_source;
pub mod template;

/// Lifecycle contract the orchestrator drives for one resource type.
///
/// Calls for unrelated instances may arrive concurrently; implementations
/// hold no per-instance state between calls.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Fields the user declares.
    type Desired: Send + Sync;
    /// What the orchestrator persists between calls.
    type State: Send + Sync;

    async fn create(&self, desired: &Self::Desired) -> Result<Self::State, OperationError>;

    async fn read(&self, state: &Self::State) -> Result<Self::State, OperationError>;

    async fn update(
        &self,
        state: &Self::State,
        desired: &Self::Desired,
    ) -> Result<Self::State, OperationError>;

    async fn delete(&self, state: &Self::State) -> Result<(), OperationError>;

    /// Adopts an externally supplied identifier without contacting the API.
    fn import(&self, external_id: &str) -> Self::State;
}
