use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridsteadError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Tile out of bounds: ({0}, {1})")]
    OutOfBounds(i32, i32),

    #[error("Tile already occupied: ({0}, {1})")]
    TileOccupied(i32, i32),

    #[error("No vacant tile available")]
    WorldFull,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GridsteadError>;
