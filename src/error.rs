pub type LogosmithResult<T> = Result<T, LogosmithError>;

#[derive(thiserror::Error, Debug)]
pub enum LogosmithError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("script error: {0}")]
    Script(String),

    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LogosmithError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn script(msg: impl Into<String>) -> Self {
        Self::Script(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}
