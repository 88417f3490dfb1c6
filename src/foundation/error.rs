pub type VizResult<T> = Result<T, VizError>;

#[derive(thiserror::Error, Debug)]
pub enum VizError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("animation error: {0}")]
    Animation(String),

    #[error("evaluation error: {0}")]
    Evaluation(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("playback error: {0}")]
    Playback(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error("Invalid GitHub PR URL.")]
    InvalidPrUrl,

    #[error("Pull Request not found. Please check the URL or repository permissions.")]
    PullRequestNotFound,

    #[error("GitHub API authentication error. Check your GITHUB_TOKEN.")]
    GitHubAuth,

    #[error("Failed to fetch PR data: {0}")]
    GitHub(String),

    #[error("insight generation failed: {0}")]
    Insight(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VizError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Map a GitHub HTTP status to the matching user-facing error.
    pub fn from_github_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            404 => Self::PullRequestNotFound,
            401 | 403 => Self::GitHubAuth,
            _ => Self::GitHub(message.into()),
        }
    }

    /// Return `true` for errors the user can fix by editing their input.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidPrUrl | Self::Validation(_))
    }
}

impl From<serde_json::Error> for VizError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
