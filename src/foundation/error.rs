pub type DrawoutResult<T> = Result<T, DrawoutError>;

#[derive(thiserror::Error, Debug)]
pub enum DrawoutError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("markup error: {0}")]
    Markup(String),

    #[error("unsupported shape: <{0}> has no length function")]
    UnsupportedShape(String),

    #[error("timeline error: {0}")]
    Timeline(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DrawoutError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn markup(msg: impl Into<String>) -> Self {
        Self::Markup(msg.into())
    }

    pub fn unsupported_shape(tag: impl Into<String>) -> Self {
        Self::UnsupportedShape(tag.into())
    }

    pub fn timeline(msg: impl Into<String>) -> Self {
        Self::Timeline(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
