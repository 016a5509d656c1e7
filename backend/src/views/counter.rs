use std::{sync::Arc, time::Duration};

use shared::Slug;
use tracing::instrument;

use super::keys::{dedup_key, hash_client, pageview_key};
use crate::store::{Result, Store};

pub const DEDUP_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RecordOutcome {
    Counted,
    Deduplicated,
}

#[derive(Clone)]
pub struct ViewCounter {
    store: Arc<dyn Store>,
    dedup_ttl: Duration,
}

impl ViewCounter {
    pub fn new(store: Arc<dyn Store>, dedup_ttl: Duration) -> Self {
        Self { store, dedup_ttl }
    }

    /// Counts a view of `slug`, at most once per client within the
    /// deduplication window.
    ///
    /// Without a client identifier the view is always counted.
    ///
    /// The marker and the counter are written in two steps. If the
    /// increment fails after the marker was set, the view is lost and a
    /// retry from the same client within the window is deduplicated.
    #[instrument(skip(self, client), err)]
    pub async fn record_view(&self, slug: &Slug, client: Option<&str>) -> Result<RecordOutcome> {
        if let Some(client) = client {
            let marker = dedup_key(&hash_client(client), slug);

            if !self.store.set_if_absent(&marker, self.dedup_ttl).await? {
                tracing::debug!("duplicate view skipped");
                return Ok(RecordOutcome::Deduplicated);
            }
        } else {
            tracing::debug!("no client identifier, counting without deduplication");
        }

        let views = self.store.incr(&pageview_key(slug)).await?;

        tracing::debug!(views, "view counted");

        Ok(RecordOutcome::Counted)
    }
}
