//! Upstream client for calling the product backend

use reqwest::{header, Client, Response};
use tokio::time::Duration;

use crate::proxy::error::ProxyError;

#[derive(Clone)]
pub struct BackendClient {
    http_client: Client,
    origin: String,
}

impl BackendClient {
    /// Fails only if the TLS backend or system resolver cannot be initialised.
    pub fn new(
        origin: impl Into<String>,
        request_timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().user_agent(concat!(
            "product-proxy/",
            env!("CARGO_PKG_VERSION")
        ));

        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
            tracing::info!("Backend request timeout: {:?}", timeout);
        }

        let http_client = builder.build()?;
        Ok(Self {
            http_client,
            origin: origin.into(),
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// `id` is interpolated as-is; rejecting odd identifiers is the backend's job.
    pub fn product_url(&self, id: &str) -> String {
        format!("{}/api/products/{}", self.origin, id)
    }

    /// Issue the DELETE for one product.
    ///
    /// Any response the backend produces comes back as `Ok`, whatever its
    /// status. Only failures to complete the call map to `ProxyError::Transport`.
    /// A missing `cookie` is sent as an empty `Cookie` header.
    pub async fn delete_product(
        &self,
        id: &str,
        cookie: Option<header::HeaderValue>,
    ) -> Result<Response, ProxyError> {
        let url = self.product_url(id);

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::COOKIE,
            cookie.unwrap_or_else(|| header::HeaderValue::from_static("")),
        );

        tracing::debug!("Forwarding DELETE {}", url);

        self.http_client
            .delete(&url)
            .headers(headers)
            .send()
            .await
            .map_err(ProxyError::Transport)
    }
}
