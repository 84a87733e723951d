use std::path::PathBuf;

use rooms::WorkflowError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("nothing to update; pass at least one field")]
    EmptyUpdate,
}

impl CliError {
    pub fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
