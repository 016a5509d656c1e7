use std::sync::Arc;

use shared::{Slug, ViewCount, ViewsBySlug};
use tracing::instrument;

use super::keys::pageview_key;
use crate::store::{Result, Store};

#[derive(Clone)]
pub struct ViewReader {
    store: Arc<dyn Store>,
}

impl ViewReader {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    #[instrument(skip(self), err)]
    pub async fn get_view(&self, slug: &Slug) -> Result<ViewCount> {
        Ok(self
            .store
            .get(&pageview_key(slug))
            .await?
            .unwrap_or_default())
    }

    /// One round trip for all `slugs`. Every requested slug gets an
    /// entry, zero when nothing was recorded yet.
    #[instrument(skip(self), err)]
    pub async fn get_views(&self, slugs: &[Slug]) -> Result<ViewsBySlug> {
        let mut views: ViewsBySlug = slugs.iter().map(|slug| (slug.to_string(), 0)).collect();

        if slugs.is_empty() {
            return Ok(views);
        }

        let keys: Vec<String> = slugs.iter().map(pageview_key).collect();
        let counts = self.store.get_many(&keys).await?;

        for (slug, count) in slugs.iter().zip(counts) {
            if let Some(count) = count {
                views.insert(slug.to_string(), count);
            }
        }

        Ok(views)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::store::{InMemoryStore, MockStore, StoreError};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn slugs(v: &[&str]) -> Vec<Slug> {
        v.iter().map(|s| Slug::parse(*s).unwrap()).collect()
    }

    #[tokio::test]
    async fn test_get_view_missing_is_zero() {
        let reader = ViewReader::new(Arc::new(InMemoryStore::default()));

        assert_eq!(
            reader.get_view(&Slug::parse("docs").unwrap()).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_get_views_defaults_and_order() {
        let store = InMemoryStore::default();
        store.incr("pageviews:projects:s2").await.unwrap();
        store.incr("pageviews:projects:s2").await.unwrap();
        store.incr("pageviews:projects:s3").await.unwrap();

        let reader = ViewReader::new(Arc::new(store));

        let forward = reader.get_views(&slugs(&["s1", "s2", "s3"])).await.unwrap();
        let backward = reader.get_views(&slugs(&["s3", "s2", "s1"])).await.unwrap();

        assert_eq!(forward.len(), 3);
        assert_eq!(forward.get("s1"), Some(&0));
        assert_eq!(forward.get("s2"), Some(&2));
        assert_eq!(forward.get("s3"), Some(&1));
        assert_eq!(forward, backward);
    }

    #[tokio::test]
    async fn test_get_views_single_round_trip() {
        let mut store = MockStore::new();
        store
            .expect_get_many()
            .withf(|keys: &[String]| {
                keys == ["pageviews:projects:a", "pageviews:projects:b"]
            })
            .times(1)
            .returning(|_| Ok(vec![Some(7)]));
        store.expect_get().never();

        let reader = ViewReader::new(Arc::new(store));
        let views = reader.get_views(&slugs(&["a", "b"])).await.unwrap();

        assert_eq!(views.get("a"), Some(&7));
        assert_eq!(views.get("b"), Some(&0));
    }

    #[tokio::test]
    async fn test_get_views_empty_skips_store() {
        let mut store = MockStore::new();
        store.expect_get_many().never();

        let reader = ViewReader::new(Arc::new(store));

        assert!(reader.get_views(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut store = MockStore::new();
        store
            .expect_get()
            .returning(|_| Err(StoreError::Timeout(Duration::from_millis(100))));

        let reader = ViewReader::new(Arc::new(store));

        assert!(reader
            .get_view(&Slug::parse("docs").unwrap())
            .await
            .is_err());
    }
}
