use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct FrontMatter {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub published: bool,
    pub date: Option<NaiveDate>,
    pub url: Option<String>,
    pub repository: Option<String>,
}

/// Splits a document into its yaml header and the body that follows.
/// The header is delimited by `---` lines and must open the document.
pub fn split(source: &str) -> Option<(&str, &str)> {
    let rest = source.strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let (yaml, after) = rest.split_once("\n---")?;
    let body = after.split_once('\n').map_or("", |(_, body)| body);

    Some((yaml, body))
}
