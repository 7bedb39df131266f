/// Error while exporting pages into a base document.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("no base document loaded")]
    MissingBaseDocument,
    #[error("there are no pages to merge")]
    NoPages,
    #[error("rasterizing failed: {0}")]
    Rasterize(String),
    #[error("composing failed: {0}")]
    Compose(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
