use std::{sync::Arc, time::Instant};

use chrono::Utc;
use reqwest::Method;
use tracing::{debug, warn};

use crate::{
    clients::listmonk::ListmonkClient,
    models::health::{HealthCheckResponse, ServiceHealth},
};

const HEALTH_PATH: &str = "/api/health";

pub struct HealthChecker {
    client: Arc<ListmonkClient>,
}

impl HealthChecker {
    pub fn new(client: Arc<ListmonkClient>) -> Self {
        Self { client }
    }

    pub async fn check_all(&self) -> HealthCheckResponse {
        let listmonk = self.check_listmonk().await;

        HealthCheckResponse {
            status: listmonk.status.clone(),
            timestamp: Utc::now(),
            listmonk,
        }
    }

    async fn check_listmonk(&self) -> ServiceHealth {
        let start = Instant::now();

        match self
            .client
            .send_request(Method::GET, HEALTH_PATH, None::<&()>)
            .await
        {
            Ok(_) => {
                let elapsed = start.elapsed().as_millis() as u64;
                debug!(response_time_ms = elapsed, "Listmonk health check passed");
                ServiceHealth::healthy(elapsed)
            }
            Err(e) => {
                warn!(error = %e, "Listmonk health check failed");
                ServiceHealth::unhealthy(e.to_string())
            }
        }
    }
}
