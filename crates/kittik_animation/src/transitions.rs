//! Ready-made transitions built on [`Animation`]

use async_trait::async_trait;

use crate::driver::{Animatable, Animation};
use crate::error::{AnimationError, Result};
use crate::options::AnimationOptions;
use crate::repr::Describe;
use crate::request::PropertyRequest;
use crate::shape::{Shape, SharedShape};

/// Column a sliding shape enters from
pub const SLIDE_ORIGIN: f64 = 1.0;

/// Slides a shape in from the left edge to where it currently stands.
///
/// Animates `x` from column 1 to the shape's current `x`.
#[derive(Debug)]
pub struct Slide<S: Shape> {
    animation: Animation<S>,
}

impl<S: Shape> Slide<S> {
    pub fn new(options: AnimationOptions) -> Self {
        Self {
            animation: Animation::new(options),
        }
    }

    /// Underlying animation, e.g. to register observers
    pub fn animation(&self) -> &Animation<S> {
        &self.animation
    }

    pub fn animation_mut(&mut self) -> &mut Animation<S> {
        &mut self.animation
    }
}

impl<S: Shape> Default for Slide<S> {
    fn default() -> Self {
        Self::new(AnimationOptions::default())
    }
}

#[async_trait]
impl<S: Shape> Animatable<S> for Slide<S> {
    async fn animate(&self, target: SharedShape<S>) -> Result<SharedShape<S>> {
        let destination = target.lock().get("x");
        let Some(destination) = destination else {
            return Err(self.animation.fail(AnimationError::MissingProperty("x".to_string())));
        };

        let request = PropertyRequest::new(&target, "x")
            .start(SLIDE_ORIGIN)
            .end(destination);
        self.animation.animate_property(request).await
    }
}

impl<S: Shape> Describe for Slide<S> {
    const TYPE_NAME: &'static str = "Slide";

    fn options(&self) -> &AnimationOptions {
        self.animation.options()
    }

    fn from_options(options: AnimationOptions) -> Self {
        Self::new(options)
    }
}
