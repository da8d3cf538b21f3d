use std::{sync::Arc, time::Duration};

use anyhow::{Result, anyhow};
use listmonk_template_provider::{
    clients::listmonk::ListmonkClient,
    config::ProviderConfig,
    models::state::TemplateSpec,
    resources::{Resource, template::TemplateResource},
};
use testcontainers::{
    ContainerAsync, GenericImage, ImageExt,
    core::{IntoContainerPort, WaitFor},
    runners::AsyncRunner,
};
use tokio::time::sleep;
use uuid::Uuid;

const LISTMONK_PORT: u16 = 9000;

struct Listmonk {
    _database: ContainerAsync<GenericImage>,
    _app: ContainerAsync<GenericImage>,
    host: String,
}

/// Starts postgres and a freshly installed listmonk on a private network.
async fn start_listmonk() -> Result<Listmonk> {
    let suffix = Uuid::new_v4().simple().to_string();
    let network = format!("listmonk-e2e-{}", suffix);
    let db_host = format!("listmonk-db-{}", suffix);

    let database = GenericImage::new("postgres", "13-alpine")
        .with_wait_for(WaitFor::message_on_stderr("PostgreSQL init process complete"))
        .with_wait_for(WaitFor::message_on_stderr(
            "database system is ready to accept connections",
        ))
        .with_env_var("POSTGRES_PASSWORD", "listmonk")
        .with_env_var("POSTGRES_USER", "listmonk")
        .with_env_var("POSTGRES_DB", "listmonk")
        .with_network(network.clone())
        .with_container_name(db_host.clone())
        .start()
        .await?;

    let app = GenericImage::new("listmonk/listmonk", "v2.5.1")
        .with_exposed_port(LISTMONK_PORT.tcp())
        .with_env_var("LISTMONK_app__address", format!("0.0.0.0:{}", LISTMONK_PORT))
        .with_env_var("LISTMONK_app__admin_username", "listmonk")
        .with_env_var("LISTMONK_app__admin_password", "listmonk")
        .with_env_var("LISTMONK_db__host", db_host)
        .with_env_var("LISTMONK_db__port", "5432")
        .with_env_var("LISTMONK_db__user", "listmonk")
        .with_env_var("LISTMONK_db__password", "listmonk")
        .with_env_var("LISTMONK_db__database", "listmonk")
        .with_network(network)
        .with_cmd(["sh", "-c", "yes | ./listmonk --install && ./listmonk"])
        .start()
        .await?;

    let port = app.get_host_port_ipv4(LISTMONK_PORT.tcp()).await?;
    let host = format!("http://{}:{}", app.get_host().await?, port);

    wait_until_healthy(&host).await?;

    Ok(Listmonk {
        _database: database,
        _app: app,
        host,
    })
}

async fn wait_until_healthy(host: &str) -> Result<()> {
    let url = format!("{}/health", host);

    for _ in 0..60 {
        if let Ok(response) = reqwest::get(&url).await
            && response.status().is_success()
        {
            return Ok(());
        }
        sleep(Duration::from_secs(1)).await;
    }

    Err(anyhow!("listmonk at {} did not become healthy", host))
}

/// Test: Create, update, read and delete against a real listmonk
#[tokio::test]
#[ignore = "requires a Docker engine"]
async fn test_template_lifecycle_against_listmonk() -> Result<()> {
    let listmonk = start_listmonk().await?;

    let config = ProviderConfig::new(&listmonk.host).with_credentials("listmonk", "listmonk");
    let client = Arc::new(ListmonkClient::new(&config)?);
    let resource = TemplateResource::new(Arc::clone(&client));

    let existing = client.list_templates().await?;
    assert!(!existing.is_empty(), "a fresh install ships default templates");

    let body = "<html><body><h1>Test Template</h1></body></html>";
    let created = resource
        .create(&TemplateSpec::new("Test Template", body, "tx", "Test Template"))
        .await?;

    let id = created.id.clone().unwrap_or_default();
    assert_ne!(id, "0");
    assert!(!id.is_empty());

    let read_back = resource.read(&created).await?;
    assert_eq!(read_back.name.as_deref(), Some("Test Template"));
    assert_eq!(read_back.body.as_deref(), Some(body));

    // listmonk timestamps have second precision in some versions
    sleep(Duration::from_millis(1100)).await;

    let desired = TemplateSpec::new("Test Template Updated", body, "tx", "Test Template Upd");
    let updated = resource.update(&read_back, &desired).await?;
    assert_eq!(updated.created_at, read_back.created_at);

    let refreshed = resource.read(&updated).await?;
    assert_eq!(refreshed.name.as_deref(), Some("Test Template Updated"));
    assert_eq!(refreshed.subject.as_deref(), Some("Test Template Upd"));
    assert_ne!(refreshed.updated_at, read_back.updated_at);

    resource.delete(&refreshed).await?;

    let err = resource.read(&refreshed).await.unwrap_err();
    assert!(err.source.status().is_some(), "expected a remote error, got {}", err);

    Ok(())
}
