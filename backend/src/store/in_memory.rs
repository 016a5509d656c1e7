use super::{Result, Store};
use async_trait::async_trait;
use shared::ViewCount;
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::{sync::Mutex, time::Instant};
use tracing::instrument;

#[derive(Debug, Clone, Copy)]
struct Entry {
    value: ViewCount,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|expires_at| expires_at > now)
    }
}

/// Store kept in process memory. Expiry follows the tokio clock, so a
/// paused test runtime can step over a ttl.
#[derive(Default, Clone)]
pub struct InMemoryStore {
    db: Arc<Mutex<HashMap<String, Entry>>>,
}

impl InMemoryStore {
    async fn live_value(&self, key: &str) -> Option<ViewCount> {
        let now = Instant::now();

        self.db
            .lock()
            .await
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value)
    }
}

#[async_trait]
impl Store for InMemoryStore {
    #[instrument(skip(self), err)]
    async fn incr(&self, key: &str) -> Result<ViewCount> {
        let now = Instant::now();
        let mut db = self.db.lock().await;

        let entry = db
            .entry(key.to_string())
            .and_modify(|entry| {
                if !entry.is_live(now) {
                    *entry = Entry {
                        value: 0,
                        expires_at: None,
                    };
                }
            })
            .or_insert(Entry {
                value: 0,
                expires_at: None,
            });

        entry.value = entry.value.saturating_add(1);

        Ok(entry.value)
    }

    #[instrument(skip(self), err)]
    async fn set_if_absent(&self, key: &str, ttl: Duration) -> Result<bool> {
        let now = Instant::now();
        let mut db = self.db.lock().await;

        if db.get(key).is_some_and(|entry| entry.is_live(now)) {
            return Ok(false);
        }

        db.insert(
            key.to_string(),
            Entry {
                value: 1,
                expires_at: Some(now + ttl),
            },
        );

        Ok(true)
    }

    #[instrument(skip(self), err)]
    async fn get(&self, key: &str) -> Result<Option<ViewCount>> {
        Ok(self.live_value(key).await)
    }

    #[instrument(skip(self), err)]
    async fn get_many(&self, keys: &[String]) -> Result<Vec<Option<ViewCount>>> {
        let now = Instant::now();
        let db = self.db.lock().await;

        Ok(keys
            .iter()
            .map(|key| {
                db.get(key)
                    .filter(|entry| entry.is_live(now))
                    .map(|entry| entry.value)
            })
            .collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_incr_starts_at_one() {
        let store = InMemoryStore::default();

        assert_eq!(store.get("a").await.unwrap(), None);
        assert_eq!(store.incr("a").await.unwrap(), 1);
        assert_eq!(store.incr("a").await.unwrap(), 2);
        assert_eq!(store.get("a").await.unwrap(), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_if_absent_expires() {
        let store = InMemoryStore::default();
        let ttl = Duration::from_secs(10);

        assert!(store.set_if_absent("m", ttl).await.unwrap());
        assert!(!store.set_if_absent("m", ttl).await.unwrap());

        tokio::time::advance(Duration::from_secs(9)).await;
        assert!(!store.set_if_absent("m", ttl).await.unwrap());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(store.get("m").await.unwrap(), None);
        assert!(store.set_if_absent("m", ttl).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_many_keeps_order() {
        let store = InMemoryStore::default();
        store.incr("b").await.unwrap();
        store.incr("b").await.unwrap();
        store.incr("c").await.unwrap();

        let keys = vec![String::from("c"), String::from("a"), String::from("b")];

        assert_eq!(
            store.get_many(&keys).await.unwrap(),
            vec![Some(1), None, Some(2)]
        );
        assert!(store.get_many(&[]).await.unwrap().is_empty());
    }
}
