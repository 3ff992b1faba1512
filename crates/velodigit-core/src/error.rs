//! Error types for the scene layer.

/// Failure reported by the host, carrying its own error code.
///
/// The scene never interprets the code; it hands the error back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("host error {code}: {message}")]
pub struct HostError {
    pub code: i32,
    pub message: String,
}

impl HostError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}


#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error("glyph code {0} is outside 0..=12")]
    InvalidGlyph(u8),

    #[error("scene used before gl_init succeeded")]
    NotInitialized,

    #[error("invalid scene config: {0}")]
    Config(#[from] serde_json::Error),
}

impl SceneError {
    /// Host error code, if this error came from the host.
    pub fn host_code(&self) -> Option<i32> {
        match self {
            Self::Host(e) => Some(e.code),
            _ => None,
        }
    }
}
