pub type StagelintResult<T> = Result<T, StagelintError>;

#[derive(thiserror::Error, Debug)]
pub enum StagelintError {
    #[error("discovery error: {0}")]
    Discovery(String),

    #[error("scene error: {0}")]
    Scene(String),

    #[error("animation error: {0}")]
    Animation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StagelintError {
    pub fn discovery(msg: impl Into<String>) -> Self {
        Self::Discovery(msg.into())
    }

    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene(msg.into())
    }

    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }
}
