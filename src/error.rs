use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("either milestone or issues must be set")]
    MissingSelector,

    #[error("owner and repository must be set, either as flags or in the config file")]
    MissingRepository,

    #[error("{0:?} is not an issue number")]
    InvalidIssueNumber(String),

    #[error("configuration error: {0:#}")]
    Config(anyhow::Error),

    #[error("cannot fetch issues: {0:#}")]
    Fetch(anyhow::Error),

    #[error("cannot print html: {0}")]
    Render(#[from] std::io::Error),
}

impl AppError {
    /// Usage errors are reported together with the usage line.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            AppError::MissingSelector
                | AppError::MissingRepository
                | AppError::InvalidIssueNumber(_)
        )
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_usage() {
            2
        } else {
            1
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
