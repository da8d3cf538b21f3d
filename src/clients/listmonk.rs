use std::fmt::{Debug, Formatter};

use reqwest::{
    Client, Method, StatusCode,
    header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info, warn};

use crate::{
    config::ProviderConfig,
    error::{Error, Result},
    models::{response::DataResponse, template::Template},
};

const TEMPLATES_PATH: &str = "/api/templates";

/// HTTP client for one listmonk instance.
///
/// Immutable after construction; share it behind an `Arc` across tasks.
#[derive(Clone)]
pub struct ListmonkClient {
    http_client: Client,
    base_url: String,
    username: Option<String>,
    password: Option<String>,
    headers: HeaderMap,
}

impl Debug for ListmonkClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListmonkClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl ListmonkClient {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| Error::Config(format!("invalid header name {:?}", name)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| Error::Config(format!("invalid value for header {:?}", name)))?;
            headers.insert(name, value);
        }

        info!(
            base_url = %config.base_url(),
            authenticated = config.has_credentials(),
            extra_headers = config.headers.len(),
            "Listmonk client initialized"
        );

        Ok(Self {
            http_client,
            base_url: config.base_url().to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
            headers,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends one request and returns the raw body of a 200 response.
    ///
    /// Any other status becomes [`Error::Remote`] with the body attached.
    pub async fn send_request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.http_client.request(method.clone(), &url);
        if self.username.is_some() || self.password.is_some() {
            request = request.basic_auth(
                self.username.as_deref().unwrap_or_default(),
                self.password.as_deref(),
            );
        }
        request = request.headers(self.headers.clone());

        if let Some(body) = body {
            let payload = serde_json::to_vec(body).map_err(Error::Encode)?;
            request = request.body(payload);
        }

        debug!(%method, path, "Sending listmonk request");

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        if status != StatusCode::OK {
            warn!(%method, path, %status, "Listmonk request failed");
            return Err(Error::Remote {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(body)
    }

    async fn request_data<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let raw = self.send_request(method, path, body).await?;

        serde_json::from_slice::<DataResponse<T>>(&raw)
            .map(|envelope| envelope.data)
            .map_err(|source| Error::Decode {
                source,
                body: String::from_utf8_lossy(&raw).into_owned(),
            })
    }

    pub async fn list_templates(&self) -> Result<Vec<Template>> {
        self.request_data(Method::GET, TEMPLATES_PATH, None::<&()>).await
    }

    pub async fn get_template(&self, id: i64) -> Result<Template> {
        let path = format!("{}/{}", TEMPLATES_PATH, id);
        self.request_data(Method::GET, &path, None::<&()>).await
    }

    pub async fn create_template(&self, draft: &Template) -> Result<Template> {
        let created: Template = self
            .request_data(Method::POST, TEMPLATES_PATH, Some(&draft.payload()))
            .await?;

        info!(template_id = created.id, name = %created.name, "Template created");
        Ok(created)
    }

    /// Replaces every mutable field of an existing template.
    pub async fn update_template(&self, template: &Template) -> Result<Template> {
        if template.id <= 0 {
            return Err(Error::identifier(
                template.id.to_string(),
                "template must have a server-assigned ID before it can be updated",
            ));
        }

        let path = format!("{}/{}", TEMPLATES_PATH, template.id);
        let updated: Template = self
            .request_data(Method::PUT, &path, Some(&template.payload()))
            .await?;

        info!(template_id = updated.id, "Template updated");
        Ok(updated)
    }

    pub async fn delete_template(&self, id: i64) -> Result<()> {
        let path = format!("{}/{}", TEMPLATES_PATH, id);
        let deleted: bool = self.request_data(Method::DELETE, &path, None::<&()>).await?;

        if deleted {
            info!(template_id = id, "Template deleted");
        } else {
            warn!(template_id = id, "Listmonk reported delete as not applied");
        }

        Ok(())
    }
}
