use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("missing data: {0}")]
    MissingData(String),
    #[error("invalid metric: {0}")]
    InvalidMetric(String),
    #[error("invalid document: {0}")]
    InvalidDocument(String),
    #[error("unknown tab: {0}")]
    UnknownTab(String),
    #[error("document parse error: {0}")]
    DocumentParse(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("config parse error: {0}")]
    ConfigParse(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("cli error: {0}")]
    Cli(String),
    #[error("render error: {0}")]
    Render(String),
}
