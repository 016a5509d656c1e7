use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Http Error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected Status: {0}")]
    Status(u16),
}

pub type ReportResult<T> = std::result::Result<T, ReportError>;
