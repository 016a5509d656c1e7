//! Read-only catalog of the projects shown on the site.
//!
//! Projects live as `.mdx`/`.md` documents below `<content>/projects/`.
//! Each starts with a yaml front matter block; the slug is the path
//! below `projects/` without extension, joined with `/`.

mod error;
mod front_matter;

pub use error::CatalogError;

use std::{
    collections::HashMap,
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use error::Result;
use shared::{ProjectInfo, Slug};

#[derive(Debug, Clone)]
pub struct Project {
    pub slug: Slug,
    pub info: ProjectInfo,
    pub body: String,
}

impl Project {
    pub fn parse(slug: Slug, path: &Path, source: &str) -> Result<Self> {
        let (yaml, body) = front_matter::split(source)
            .ok_or_else(|| CatalogError::MissingFrontMatter(path.to_path_buf()))?;

        let fm: front_matter::FrontMatter = serde_yaml::from_str(yaml)
            .map_err(|e| CatalogError::Yaml(path.to_path_buf(), e))?;

        Ok(Self {
            info: ProjectInfo {
                slug: slug.to_string(),
                title: fm.title,
                description: fm.description,
                date: fm.date,
                published: fm.published,
                url: fm.url,
                repository: fm.repository,
            },
            slug,
            body: body.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    projects: HashMap<Slug, Project>,
}

impl Catalog {
    pub fn new(projects: impl IntoIterator<Item = Project>) -> Self {
        Self {
            projects: projects
                .into_iter()
                .map(|project| (project.slug.clone(), project))
                .collect(),
        }
    }

    pub fn load(content_dir: &Path) -> Result<Self> {
        let root = content_dir.join("projects");

        if !root.is_dir() {
            tracing::warn!("no projects found at {}", root.display());
            return Ok(Self::default());
        }

        let mut files = Vec::new();
        collect_documents(&root, &mut files)?;

        let mut projects = Vec::with_capacity(files.len());
        for path in files {
            let slug = slug_for(&root, &path)?;
            let source = fs::read_to_string(&path)?;
            projects.push(Project::parse(slug, &path, &source)?);
        }

        Ok(Self::new(projects))
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, slug: &Slug) -> Option<&Project> {
        self.projects.get(slug)
    }

    /// Published projects, newest first. Projects without a date are
    /// upcoming and sort before everything else.
    pub fn published(&self) -> Vec<&Project> {
        let mut projects: Vec<&Project> = self
            .projects
            .values()
            .filter(|project| project.info.published)
            .collect();

        projects.sort_by(|a, b| {
            let a_date = a.info.date.unwrap_or(NaiveDate::MAX);
            let b_date = b.info.date.unwrap_or(NaiveDate::MAX);
            b_date.cmp(&a_date).then_with(|| a.slug.cmp(&b.slug))
        });

        projects
    }
}

fn collect_documents(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_dir() {
            collect_documents(&path, files)?;
        } else if matches!(
            path.extension().and_then(OsStr::to_str),
            Some("mdx" | "md")
        ) {
            files.push(path);
        }
    }

    Ok(())
}

fn slug_for(root: &Path, path: &Path) -> Result<Slug> {
    let relative = path
        .strip_prefix(root)
        .unwrap_or(path)
        .with_extension("");

    let slug = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    Slug::parse(slug).map_err(|e| CatalogError::Slug(path.to_path_buf(), e))
}
