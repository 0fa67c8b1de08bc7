/// Runtime errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RuntimeError {
    /// The worker is gone; no further commands can be processed.
    #[error("runtime command channel closed")]
    ChannelClosed,

    /// The worker dropped a reply before answering.
    #[error("runtime reply dropped")]
    ReplyDropped,

    /// Loading scene content failed.
    #[error("failed to load level: {0}")]
    LevelLoad(String),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
