use std::{sync::Arc, time::Duration};

use shared::{ProjectDetail, ProjectViews, ProjectsPage, Slug, SlugViews, ViewsBySlug};

use crate::{
    catalog::Catalog,
    error::{InternalError, Result},
    store::Store,
    views::{RecordOutcome, ViewCounter, ViewReader},
};

#[derive(Clone)]
pub struct App {
    counter: ViewCounter,
    reader: ViewReader,
    catalog: Arc<Catalog>,
    featured: Arc<Vec<Slug>>,
}

impl App {
    pub fn new(
        store: Arc<dyn Store>,
        catalog: Catalog,
        dedup_ttl: Duration,
        featured: &[String],
    ) -> Self {
        let featured = featured
            .iter()
            .filter_map(|slug| match Slug::parse(slug.as_str()) {
                Ok(slug) if catalog.get(&slug).is_some() => Some(slug),
                _ => {
                    tracing::warn!("featured project not in catalog: {slug}");
                    None
                }
            })
            .collect();

        Self {
            counter: ViewCounter::new(Arc::clone(&store), dedup_ttl),
            reader: ViewReader::new(store),
            catalog: Arc::new(catalog),
            featured: Arc::new(featured),
        }
    }

    pub async fn record_view(&self, slug: &Slug, client: Option<&str>) -> Result<RecordOutcome> {
        Ok(self.counter.record_view(slug, client).await?)
    }

    pub async fn views(&self, slug: Slug) -> Result<SlugViews> {
        let views = self.reader.get_view(&slug).await?;

        Ok(SlugViews {
            slug: slug.into(),
            views,
        })
    }

    pub async fn views_batch(&self, slugs: &[Slug]) -> Result<ViewsBySlug> {
        Ok(self.reader.get_views(slugs).await?)
    }

    /// Featured projects first, in configured order, then every other
    /// published project newest first. One store round trip.
    pub async fn projects_page(&self) -> Result<ProjectsPage> {
        let published = self.catalog.published();

        let slugs: Vec<Slug> = published.iter().map(|p| p.slug.clone()).collect();
        let views = self.reader.get_views(&slugs).await?;

        let with_views = |slug: &Slug| -> Option<ProjectViews> {
            let project = self.catalog.get(slug)?;
            Some(ProjectViews {
                project: project.info.clone(),
                views: views.get(slug.as_str()).copied().unwrap_or_default(),
            })
        };

        let featured = self
            .featured
            .iter()
            .filter(|slug| slugs.contains(slug))
            .filter_map(&with_views)
            .collect();

        let projects = slugs
            .iter()
            .filter(|slug| !self.featured.contains(slug))
            .filter_map(&with_views)
            .collect();

        Ok(ProjectsPage { featured, projects })
    }

    pub async fn project(&self, slug: &Slug) -> Result<ProjectDetail> {
        let project = self
            .catalog
            .get(slug)
            .ok_or_else(|| InternalError::NotFound(slug.to_string()))?;

        let views = self.reader.get_view(slug).await?;

        Ok(ProjectDetail {
            project: project.info.clone(),
            views,
            body: project.body.clone(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{catalog::Project, store::InMemoryStore, views::DEDUP_TTL};
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn project(slug: &str, date: Option<&str>, published: bool) -> Project {
        let date = date.map(|d| format!("date: {d}\n")).unwrap_or_default();
        Project::parse(
            Slug::parse(slug).unwrap(),
            Path::new(slug),
            &format!("---\ntitle: {slug}\ndescription: d\n{date}published: {published}\n---\nbody\n"),
        )
        .unwrap()
    }

    fn app(featured: &[&str]) -> App {
        let catalog = Catalog::new(vec![
            project("poker-scientist", Some("2024-02-01"), true),
            project("crypto-prices", Some("2023-09-01"), true),
            project("ether.com", Some("2023-01-01"), true),
            project("docs", Some("2022-01-01"), true),
            project("draft", Some("2025-01-01"), false),
        ]);

        let featured: Vec<String> = featured.iter().map(ToString::to_string).collect();

        App::new(
            Arc::new(InMemoryStore::default()),
            catalog,
            DEDUP_TTL,
            &featured,
        )
    }

    fn slug(v: &str) -> Slug {
        Slug::parse(v).unwrap()
    }

    #[tokio::test]
    async fn test_projects_page() {
        let app = app(&["crypto-prices", "poker-scientist", "unknown"]);

        app.record_view(&slug("docs"), Some("1.1.1.1")).await.unwrap();
        app.record_view(&slug("docs"), Some("2.2.2.2")).await.unwrap();
        app.record_view(&slug("crypto-prices"), None).await.unwrap();

        let page = app.projects_page().await.unwrap();

        let featured: Vec<(&str, u64)> = page
            .featured
            .iter()
            .map(|p| (p.project.slug.as_str(), p.views))
            .collect();
        assert_eq!(featured, vec![("crypto-prices", 1), ("poker-scientist", 0)]);

        let rest: Vec<(&str, u64)> = page
            .projects
            .iter()
            .map(|p| (p.project.slug.as_str(), p.views))
            .collect();
        assert_eq!(rest, vec![("ether.com", 0), ("docs", 2)]);
    }

    #[tokio::test]
    async fn test_project_detail() {
        let app = app(&[]);

        app.record_view(&slug("docs"), None).await.unwrap();

        let detail = app.project(&slug("docs")).await.unwrap();
        assert_eq!(detail.views, 1);
        assert_eq!(detail.body, "body\n");

        assert!(matches!(
            app.project(&slug("missing")).await,
            Err(InternalError::NotFound(_))
        ));
    }
}
