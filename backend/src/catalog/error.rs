use std::path::PathBuf;

use shared::SlugError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Front Matter Error in {0}: {1}")]
    Yaml(PathBuf, serde_yaml::Error),

    #[error("Missing Front Matter: {0}")]
    MissingFrontMatter(PathBuf),

    #[error("Invalid Slug for {0}: {1}")]
    Slug(PathBuf, SlugError),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
