use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid feature id {id:?}: {reason}")]
    InvalidId { id: String, reason: String },
    #[error("stored _id is not an ObjectId: {0}")]
    ForeignId(String),
    #[error("failed to connect to mongo: {0}")]
    Connect(String),
    #[error("cannot ping mongo: {0}")]
    Ping(String),
}
