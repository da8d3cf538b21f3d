use std::sync::Arc;

use listmonk_template_provider::{clients::listmonk::ListmonkClient, config::ProviderConfig};
use serde_json::{Value, json};
use wiremock::MockServer;

pub const CREATED_AT: &str = "2024-06-01T09:00:00.000000+00:00";
pub const UPDATED_AT: &str = "2024-06-01T09:00:00.000000+00:00";

pub fn client_for(server: &MockServer) -> Arc<ListmonkClient> {
    let config = ProviderConfig::new(server.uri()).with_credentials("listmonk", "listmonk");
    Arc::new(ListmonkClient::new(&config).expect("mock server config is valid"))
}

pub fn template_record(id: i64, name: &str, subject: &str, updated_at: &str) -> Value {
    json!({
        "id": id,
        "created_at": CREATED_AT,
        "updated_at": updated_at,
        "name": name,
        "type": "tx",
        "subject": subject,
        "body": "<html><body><h1>Test Template</h1></body></html>",
        "body_source": null,
        "is_default": false
    })
}

pub fn data(value: Value) -> Value {
    json!({ "data": value })
}
