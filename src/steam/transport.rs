use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::warn;

/// Issues a single GET request and returns the raw response body.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<String, reqwest::Error>;
}

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(client: Client) -> ReqwestTransport {
        ReqwestTransport { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<String, reqwest::Error> {
        let response = self.client.get(url.clone()).send().await?;

        // The body is decoded regardless of status, error pages surface as decode errors.
        if !response.status().is_success() {
            warn!(
                "Steam api responded with {} for {}",
                response.status(),
                url.path()
            );
        }

        response.text().await
    }
}
