//! Animation driver
//!
//! [`Animation`] owns the timing configuration and runs one tick loop per
//! animated property. Concrete transitions implement [`Animatable`] and call
//! [`Animation::animate_property`] for every property they move.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::try_join_all;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::easing::Easing;
use crate::error::{AnimationError, Result};
use crate::handle::{AnimationHandle, RunState};
use crate::observer::{AnimationEvent, Observer, ObserverSet, TickCallback};
use crate::options::AnimationOptions;
use crate::request::{PropertyRequest, Resolved};
use crate::shape::{Shape, SharedShape};

/// Shortest wait between two ticks of a run, in milliseconds
pub const MIN_TICK_INTERVAL_MS: f64 = 1.0;

/// A transition that can be played on a shape
#[async_trait]
pub trait Animatable<S: Shape>: Send + Sync {
    /// Animate `target`, resolving with it once every property has finished
    async fn animate(&self, target: SharedShape<S>) -> Result<SharedShape<S>>;
}

/// Base animation: configuration, observers and the property tick loop
pub struct Animation<S: Shape> {
    options: AnimationOptions,
    observers: ObserverSet<S>,
}

impl<S: Shape> Animation<S> {
    pub fn new(options: AnimationOptions) -> Self {
        Self {
            options,
            observers: ObserverSet::new(),
        }
    }

    /// Create an animation from a duration and an easing name
    pub fn from_parts(duration: u64, easing: &str) -> Result<Self> {
        Ok(Self::new(AnimationOptions::parse(duration, easing)?))
    }

    pub fn options(&self) -> &AnimationOptions {
        &self.options
    }

    pub fn duration(&self) -> u64 {
        self.options.duration()
    }

    /// Set the duration in milliseconds
    pub fn set_duration(&mut self, duration: u64) -> Result<&mut Self> {
        self.options.set_duration(duration)?;
        Ok(self)
    }

    pub fn easing(&self) -> Easing {
        self.options.easing()
    }

    /// Set the easing by name. Unknown names fail with
    /// [`AnimationError::UnknownEasing`] and keep the current easing.
    pub fn set_easing(&mut self, name: &str) -> Result<&mut Self> {
        self.options.set_easing_name(name)?;
        Ok(self)
    }

    /// Register an observer for every run of this animation
    pub fn observe<O>(&mut self, observer: O) -> &mut Self
    where
        O: Observer<S> + 'static,
    {
        self.observers.push(Arc::new(observer));
        self
    }

    /// Register a callback invoked on every tick
    pub fn when_ticks<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&SharedShape<S>, &str, f64) + Send + Sync + 'static,
    {
        self.observe(TickCallback(callback))
    }

    /// Receive tick, end and error events as they happen.
    ///
    /// The receiver is unbounded: every tick of every run is kept until read.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<AnimationEvent<S>> {
        self.observers.subscribe()
    }

    /// Eased value rounded to the nearest integer
    pub fn ease(easing: Easing, time: f64, start: f64, delta: f64, duration: f64) -> f64 {
        easing.ease_rounded(time, start, delta, duration)
    }

    /// Wait for `ms` milliseconds
    pub async fn delay(&self, ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    /// Animate one property and resolve with the target once its final
    /// value has been written.
    pub async fn animate_property(&self, request: PropertyRequest<S>) -> Result<SharedShape<S>> {
        self.animate_property_with(request, CancellationToken::new()).await
    }

    /// Like [`animate_property`](Self::animate_property), stopping with
    /// [`AnimationError::Cancelled`] once `cancel` fires.
    pub async fn animate_property_with(
        &self,
        request: PropertyRequest<S>,
        cancel: CancellationToken,
    ) -> Result<SharedShape<S>> {
        let (state, _) = watch::channel(RunState::Idle);
        self.tick_loop(request, cancel, state)?.run().await
    }

    /// Animate several properties concurrently, resolving once all are done
    pub async fn animate_properties(&self, requests: Vec<PropertyRequest<S>>) -> Result<()> {
        try_join_all(requests.into_iter().map(|request| self.animate_property(request))).await?;
        Ok(())
    }

    /// Run the property animation as a separate tokio task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_property(&self, request: PropertyRequest<S>) -> AnimationHandle<S> {
        let cancel = CancellationToken::new();
        let (state, state_rx) = watch::channel(RunState::Idle);

        let task = match self.tick_loop(request, cancel.clone(), state) {
            Ok(tick_loop) => tokio::spawn(tick_loop.run()),
            Err(err) => tokio::spawn(async move { Err(err) }),
        };

        AnimationHandle::new(task, state_rx, cancel)
    }

    /// Notify observers of `error` and hand it back for returning
    pub(crate) fn fail(&self, error: AnimationError) -> AnimationError {
        self.observers.error(&error);
        error
    }

    fn tick_loop(
        &self,
        request: PropertyRequest<S>,
        cancel: CancellationToken,
        state: watch::Sender<RunState>,
    ) -> Result<TickLoop<S>> {
        let run = match request.resolve(&self.options) {
            Ok(run) => run,
            Err(err) => {
                state.send_replace(RunState::Failed);
                return Err(self.fail(err));
            }
        };

        Ok(TickLoop {
            target: request.target,
            property: request.property,
            run,
            observers: self.observers.clone(),
            cancel,
            state,
        })
    }
}

impl<S: Shape> fmt::Debug for Animation<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("options", &self.options)
            .field("observers", &self.observers)
            .finish()
    }
}

impl<S: Shape> Default for Animation<S> {
    fn default() -> Self {
        Self::new(AnimationOptions::default())
    }
}

/// The base animation has nothing to animate by itself
#[async_trait]
impl<S: Shape> Animatable<S> for Animation<S> {
    async fn animate(&self, _target: SharedShape<S>) -> Result<SharedShape<S>> {
        tracing::warn!("animate() called on the base animation");
        Err(self.fail(AnimationError::NotImplemented))
    }
}

/// One self-contained run over a single property
struct TickLoop<S: Shape> {
    target: SharedShape<S>,
    property: String,
    run: Resolved,
    observers: ObserverSet<S>,
    cancel: CancellationToken,
    state: watch::Sender<RunState>,
}

impl<S: Shape> TickLoop<S> {
    async fn run(self) -> Result<SharedShape<S>> {
        self.state.send_replace(RunState::Running);
        tracing::debug!(
            property = %self.property,
            start = self.run.start,
            delta = self.run.delta,
            duration_ms = self.run.duration,
            easing = %self.run.easing,
            "animation.run.start"
        );

        // Zero delta has no cadence to derive; finish with the single value
        if self.run.delta == 0.0 {
            self.deliver(self.run.final_value());
            return Ok(self.complete());
        }

        let interval = tick_interval(&self.run);
        let start = Instant::now();
        let end = start + Duration::from_millis(self.run.duration);
        let mut last = None;

        loop {
            if self.cancel.is_cancelled() {
                return Err(self.cancelled());
            }

            let now = Instant::now();
            if now >= end {
                let value = self.run.final_value();
                if last != Some(value) {
                    self.deliver(value);
                }
                break;
            }

            let elapsed_ms = (now - start).as_secs_f64() * 1000.0;
            let value = self.run.value_at(elapsed_ms);
            if last != Some(value) {
                self.deliver(value);
                last = Some(value);
            }

            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(self.cancelled()),
                _ = tokio::time::sleep_until((now + interval).min(end)) => {}
            }
        }

        Ok(self.complete())
    }

    /// Write `value` to the target, then notify observers
    fn deliver(&self, value: f64) {
        self.target.lock().set(&self.property, value);
        tracing::trace!(property = %self.property, value, "animation.tick");
        self.observers.tick(&self.target, &self.property, value);
    }

    fn complete(self) -> SharedShape<S> {
        self.observers.end(&self.target, &self.property);
        self.state.send_replace(RunState::Completed);
        tracing::debug!(property = %self.property, "animation.run.end");
        self.target
    }

    fn cancelled(&self) -> AnimationError {
        tracing::debug!(property = %self.property, "animation.run.cancelled");
        let error = AnimationError::Cancelled(self.property.clone());
        self.observers.error(&error);
        self.state.send_replace(RunState::Cancelled);
        error
    }
}

/// Wait between ticks: the time one unit of change takes at linear speed,
/// never longer than the run itself
fn tick_interval(run: &Resolved) -> Duration {
    let ms = run.duration as f64 / run.delta.abs();
    let ms = ms.min(run.duration as f64).max(MIN_TICK_INTERVAL_MS);
    Duration::from_secs_f64(ms / 1000.0)
}
