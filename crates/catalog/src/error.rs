#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    /// The product source could not be read or decoded
    #[error("Product source unavailable: {0}")]
    SourceUnavailable(String),
}
