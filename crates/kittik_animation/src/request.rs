//! Property animation requests

use std::fmt;
use std::sync::Arc;

use crate::easing::Easing;
use crate::error::{AnimationError, Result};
use crate::options::AnimationOptions;
use crate::shape::{Shape, SharedShape};

/// Describes one property transition on a target.
///
/// Values left unset fall back to the target's current property value
/// (`start`, `end`) or to the animation's options (`duration`, `easing`).
/// An omitted `end` therefore means "stay where you are": the run completes
/// immediately with a single tick.
pub struct PropertyRequest<S: Shape> {
    pub(crate) target: SharedShape<S>,
    pub(crate) property: String,
    pub(crate) start: Option<f64>,
    pub(crate) end: Option<f64>,
    pub(crate) by: Option<f64>,
    pub(crate) duration: Option<u64>,
    pub(crate) easing: Option<Easing>,
}

impl<S: Shape> PropertyRequest<S> {
    pub fn new(target: &SharedShape<S>, property: impl Into<String>) -> Self {
        Self {
            target: Arc::clone(target),
            property: property.into(),
            start: None,
            end: None,
            by: None,
            duration: None,
            easing: None,
        }
    }

    pub fn start(mut self, value: f64) -> Self {
        self.start = Some(value);
        self
    }

    pub fn end(mut self, value: f64) -> Self {
        self.end = Some(value);
        self
    }

    /// Change in value; takes precedence over `end - start`
    pub fn by(mut self, delta: f64) -> Self {
        self.by = Some(delta);
        self
    }

    /// Duration in milliseconds for this property only
    pub fn duration(mut self, duration: u64) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    /// Fill in every unset value from the target and `options`
    pub(crate) fn resolve(&self, options: &AnimationOptions) -> Result<Resolved> {
        let current = || {
            self.target
                .lock()
                .get(&self.property)
                .ok_or_else(|| AnimationError::MissingProperty(self.property.clone()))
        };

        let start = match self.start {
            Some(value) => value,
            None => current()?,
        };
        let delta = match (self.by, self.end) {
            (Some(by), _) => by,
            (None, Some(end)) => end - start,
            (None, None) => current()? - start,
        };
        let duration = match self.duration {
            Some(0) => return Err(AnimationError::InvalidDuration(0)),
            Some(duration) => duration,
            None => options.duration(),
        };

        Ok(Resolved {
            start,
            delta,
            duration,
            easing: self.easing.unwrap_or(options.easing()),
        })
    }
}

impl<S: Shape> fmt::Debug for PropertyRequest<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyRequest")
            .field("property", &self.property)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("by", &self.by)
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .finish_non_exhaustive()
    }
}

/// A request with every value decided
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Resolved {
    pub start: f64,
    pub delta: f64,
    pub duration: u64,
    pub easing: Easing,
}

impl Resolved {
    /// Rounded value at `elapsed_ms` into the run
    pub fn value_at(&self, elapsed_ms: f64) -> f64 {
        let elapsed = elapsed_ms.clamp(0.0, self.duration as f64);
        self.easing.ease_rounded(elapsed, self.start, self.delta, self.duration as f64)
    }

    pub fn final_value(&self) -> f64 {
        (self.start + self.delta).round()
    }
}
