//! Tick observation
//!
//! Every run reports through one [`Observer`] interface. Plain callbacks and
//! the event channels are adapters over it, so the tick loop only knows about
//! [`ObserverSet`].

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::error::AnimationError;
use crate::shape::{Shape, SharedShape};

/// Receives progress of animation runs.
///
/// Observers are notified after the new value has been written to the
/// target, so reading the property from `target` yields `value`.
pub trait Observer<S: Shape>: Send + Sync {
    fn on_tick(&self, _target: &SharedShape<S>, _property: &str, _value: f64) {}

    fn on_end(&self, _target: &SharedShape<S>, _property: &str) {}

    fn on_error(&self, _error: &AnimationError) {}
}

/// Adapter turning a closure into a tick observer
pub struct TickCallback<F>(pub F);

impl<S, F> Observer<S> for TickCallback<F>
where
    S: Shape,
    F: Fn(&SharedShape<S>, &str, f64) + Send + Sync,
{
    fn on_tick(&self, target: &SharedShape<S>, property: &str, value: f64) {
        (self.0)(target, property, value)
    }
}

/// Notification sent to subscribers of an animation
pub enum AnimationEvent<S: Shape> {
    /// A new value was written to `property`
    Tick {
        target: SharedShape<S>,
        property: String,
        value: f64,
    },
    /// The run animating `property` finished
    End {
        target: SharedShape<S>,
        property: String,
    },
    /// A run or an `animate` call failed; carries the error message
    Error(String),
}

impl<S: Shape> Clone for AnimationEvent<S> {
    fn clone(&self) -> Self {
        match self {
            AnimationEvent::Tick {
                target,
                property,
                value,
            } => AnimationEvent::Tick {
                target: Arc::clone(target),
                property: property.clone(),
                value: *value,
            },
            AnimationEvent::End { target, property } => AnimationEvent::End {
                target: Arc::clone(target),
                property: property.clone(),
            },
            AnimationEvent::Error(message) => AnimationEvent::Error(message.clone()),
        }
    }
}

impl<S: Shape> fmt::Debug for AnimationEvent<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimationEvent::Tick {
                property, value, ..
            } => f
                .debug_struct("Tick")
                .field("property", property)
                .field("value", value)
                .finish_non_exhaustive(),
            AnimationEvent::End { property, .. } => f
                .debug_struct("End")
                .field("property", property)
                .finish_non_exhaustive(),
            AnimationEvent::Error(message) => f.debug_tuple("Error").field(message).finish(),
        }
    }
}

/// Observers of one animation plus its event subscribers.
///
/// Clones share the subscriber list, so a subscription made while a run is
/// in flight still receives the rest of that run.
pub struct ObserverSet<S: Shape> {
    observers: Vec<Arc<dyn Observer<S>>>,
    subscribers: Arc<Mutex<Vec<mpsc::UnboundedSender<AnimationEvent<S>>>>>,
}

impl<S: Shape> ObserverSet<S> {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn push(&mut self, observer: Arc<dyn Observer<S>>) {
        self.observers.push(observer);
    }

    /// New event receiver. Each subscriber has its own unbounded queue, so a
    /// slow reader never loses events.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<AnimationEvent<S>> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.subscribers.lock().push(sender);
        receiver
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    /// Deliver `event` to every live subscriber, forgetting dropped ones
    fn emit(&self, event: AnimationEvent<S>) {
        self.subscribers
            .lock()
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn tick(&self, target: &SharedShape<S>, property: &str, value: f64) {
        for observer in &self.observers {
            observer.on_tick(target, property, value);
        }
        self.emit(AnimationEvent::Tick {
            target: Arc::clone(target),
            property: property.to_string(),
            value,
        });
    }

    pub fn end(&self, target: &SharedShape<S>, property: &str) {
        for observer in &self.observers {
            observer.on_end(target, property);
        }
        self.emit(AnimationEvent::End {
            target: Arc::clone(target),
            property: property.to_string(),
        });
    }

    pub fn error(&self, error: &AnimationError) {
        for observer in &self.observers {
            observer.on_error(error);
        }
        self.emit(AnimationEvent::Error(error.to_string()));
    }
}

impl<S: Shape> Clone for ObserverSet<S> {
    fn clone(&self) -> Self {
        Self {
            observers: self.observers.clone(),
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

impl<S: Shape> Default for ObserverSet<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Shape> fmt::Debug for ObserverSet<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverSet")
            .field("observers", &self.observers.len())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
