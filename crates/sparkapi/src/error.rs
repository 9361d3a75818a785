#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("Missing access token: pass --token or set SPARK_ACCESS_TOKEN")]
    MissingToken,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid attribute '{0}': expected KEY=VALUE")]
    InvalidAttribute(String),
}
