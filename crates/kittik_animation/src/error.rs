//! Animation error types

use thiserror::Error;

/// Errors surfaced by animation configuration, runs and (de)serialization
#[derive(Error, Debug)]
pub enum AnimationError {
    /// Easing name is not present in the easing table
    #[error("Unknown easing: {0}")]
    UnknownEasing(String),

    /// Duration must be a positive number of milliseconds
    #[error("Invalid duration: {0}ms, duration must be greater than zero")]
    InvalidDuration(u64),

    /// The base animation was asked to animate without a concrete transition
    #[error("You must implement animate() method")]
    NotImplemented,

    /// Serialized form is missing `type` or `options`
    #[error("It looks like the object is not a representation of the {expected}")]
    InvalidRepresentation { expected: &'static str },

    /// Serialized form belongs to another animation type
    #[error("{found} is not an object representation of the {expected}")]
    TypeMismatch {
        found: String,
        expected: &'static str,
    },

    /// Target does not expose the property and no explicit value was given
    #[error("Shape has no numeric property '{0}'")]
    MissingProperty(String),

    /// Run was cancelled through its cancellation token
    #[error("Animation of '{0}' was cancelled")]
    Cancelled(String),

    /// A chunk animation dropped its continuation without calling it
    #[error("Chunk animation finished without calling its continuation")]
    ContinuationDropped,

    /// Spawned run panicked or was aborted by the runtime
    #[error("Animation task failed: {0}")]
    Join(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
