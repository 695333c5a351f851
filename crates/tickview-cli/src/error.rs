use thiserror::Error;

use tickview_core::{DashboardError, HttpError, SourceErrorKind};

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] tickview_core::ValidationError),

    #[error(transparent)]
    Dashboard(#[from] DashboardError),

    #[error("http client setup failed: {0}")]
    Transport(#[from] HttpError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Dashboard(DashboardError::Validation(_)) => 2,
            Self::Dashboard(DashboardError::Source(source))
                if source.kind() == SourceErrorKind::Unavailable =>
            {
                6
            }
            Self::Dashboard(_) => 3,
            Self::Serialization(_) => 4,
            Self::Transport(_) => 6,
            Self::Io(_) => 10,
        }
    }
}
