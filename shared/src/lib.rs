mod validation;

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
pub use validation::{Slug, SlugError, SLUG_MAX_LEN};

pub type ViewCount = u64;

/// Body of `POST /api/incr`. `slug` stays optional so that a missing
/// field can be told apart from malformed json.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Default)]
pub struct IncrRequest {
    pub slug: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct ProjectInfo {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub date: Option<NaiveDate>,
    pub published: bool,
    pub url: Option<String>,
    pub repository: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct ProjectViews {
    pub project: ProjectInfo,
    pub views: ViewCount,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Default)]
pub struct ProjectsPage {
    pub featured: Vec<ProjectViews>,
    pub projects: Vec<ProjectViews>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct ProjectDetail {
    pub project: ProjectInfo,
    pub views: ViewCount,
    pub body: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct SlugViews {
    pub slug: String,
    pub views: ViewCount,
}

pub type ViewsBySlug = HashMap<String, ViewCount>;

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_incr_request_missing_slug() {
        let req: IncrRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.slug, None);

        let req: IncrRequest = serde_json::from_str(r#"{"slug":"docs"}"#).unwrap();
        assert_eq!(req.slug.as_deref(), Some("docs"));

        assert!(serde_json::from_str::<IncrRequest>(r#"{"slug":42}"#).is_err());
    }

    #[test]
    fn test_project_date_format() {
        let info = ProjectInfo {
            slug: String::from("poker-scientist"),
            title: String::from("Poker Scientist"),
            description: String::from("poker odds"),
            date: NaiveDate::from_ymd_opt(2023, 5, 20),
            published: true,
            url: None,
            repository: Some(String::from("https://github.com/x/poker")),
        };

        let json = serde_json::to_value(&info).unwrap();

        assert_eq!(json["date"], "2023-05-20");
        assert_eq!(json["url"], serde_json::Value::Null);
    }
}
