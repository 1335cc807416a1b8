use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaybookError {
    #[error(transparent)]
    Note(#[from] crate::domain::NoteError),

    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    #[error(transparent)]
    Style(#[from] crate::style::DecodeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("note not stored yet")]
    Unsaved,
}

pub type DaybookResult<T> = Result<T, DaybookError>;
