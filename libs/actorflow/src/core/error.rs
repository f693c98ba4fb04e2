use thiserror::Error;

#[derive(Error, Debug)]
pub enum StreamError {
    #[error("Buffer overflow: {0}")]
    BufferOverflow(String),

    #[error("Flow cancelled: {0}")]
    Cancelled(String),

    #[error("Mailbox error: {0}")]
    Mailbox(String),

    #[error("Spawn failed: {0}")]
    Spawn(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, StreamError>;
