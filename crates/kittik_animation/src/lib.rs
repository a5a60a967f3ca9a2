//! Kittik Animation
//!
//! Time-based property interpolation for terminal shapes.
//!
//! # Features
//!
//! - **Easing**: 31 named easing curves (`linear`, `inQuad` ... `inOutBounce`)
//! - **Property runs**: wall-clock tick loops that write eased values into a shape
//! - **Observers**: callbacks, event channels, futures and chunk streams over
//!   one observer interface
//! - **Cancellation**: spawned runs return a handle that stops them
//! - **Serialization**: `{"type": ..., "options": {...}}` object form

pub mod driver;
pub mod easing;
pub mod error;
pub mod handle;
pub mod observer;
pub mod options;
pub mod repr;
pub mod request;
pub mod shape;
pub mod stream;
pub mod transitions;

pub use driver::{Animatable, Animation};
pub use easing::Easing;
pub use error::{AnimationError, Result};
pub use handle::{AnimationHandle, RunState};
pub use observer::{AnimationEvent, Observer, TickCallback};
pub use options::AnimationOptions;
pub use repr::{Describe, Representation};
pub use request::PropertyRequest;
pub use shape::{share, Shape, SharedShape};
pub use stream::{Chunk, ChunkAnimation, Continuation, Transform};
pub use transitions::Slide;
