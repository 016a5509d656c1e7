use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use serde::{Deserialize, Serialize};

pub const SLUG_MAX_LEN: usize = 256;

///
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SlugError {
    Empty,
    MaxLength(usize, usize),
}

impl Display for SlugError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "slug is empty"),
            Self::MaxLength(len, max) => write!(f, "slug too long: {len} > {max}"),
        }
    }
}

impl Error for SlugError {}

/// Identifies a piece of content. Non-empty and bounded in length,
/// otherwise opaque: uniqueness is up to the content catalog.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    pub fn parse(value: impl Into<String>) -> Result<Self, SlugError> {
        let value = value.into();

        if value.trim().is_empty() {
            Err(SlugError::Empty)
        } else if value.len() > SLUG_MAX_LEN {
            Err(SlugError::MaxLength(value.len(), SLUG_MAX_LEN))
        } else {
            Ok(Self(value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Slug {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}
