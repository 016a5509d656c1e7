use async_trait::async_trait;
use shared::{IncrRequest, Slug};

use crate::error::{ReportError, ReportResult};

#[async_trait]
pub trait ReportTransport: Send + Sync + 'static {
    async fn report(&self, slug: &Slug) -> ReportResult<()>;
}

/// Posts views to a running server's `/api/incr`.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/api/incr", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl ReportTransport for HttpTransport {
    async fn report(&self, slug: &Slug) -> ReportResult<()> {
        let res = self
            .client
            .post(&self.endpoint)
            .json(&IncrRequest {
                slug: Some(slug.to_string()),
            })
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(ReportError::Status(status.as_u16()));
        }

        Ok(())
    }
}
