pub type StrangeloopResult<T> = Result<T, StrangeloopError>;

#[derive(thiserror::Error, Debug)]
pub enum StrangeloopError {
    /// A `Pop` was applied to an empty frame stack. This is an internal
    /// invariant violation in a process's event generation, not a
    /// recoverable runtime condition.
    #[error("stack underflow: pop applied to an empty frame stack")]
    StackUnderflow,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("derivation error: {0}")]
    Derivation(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StrangeloopError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn derivation(msg: impl Into<String>) -> Self {
        Self::Derivation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
