//! Integration tests for the animation driver
//!
//! These tests verify that:
//! - Concrete transitions can drive several properties of one shape at once
//! - Every observation surface (callbacks, events, handles) sees the same run
//! - Spawned runs can be cancelled, detached and joined

use std::sync::Arc;
use std::time::Duration;

use kittik_animation::{
    share, Animatable, Animation, AnimationError, AnimationEvent, AnimationOptions, Describe,
    Easing, PropertyRequest, Result, RunState, Shape, SharedShape,
};
use parking_lot::Mutex;
use tokio::time::Instant;

/// Minimal stand-in for a terminal rectangle
#[derive(Debug, Default)]
struct Rectangle {
    x: f64,
    y: f64,
    background: f64,
}

impl Rectangle {
    fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }
}

impl Shape for Rectangle {
    fn get(&self, property: &str) -> Option<f64> {
        match property {
            "x" => Some(self.x),
            "y" => Some(self.y),
            "background" => Some(self.background),
            _ => None,
        }
    }

    fn set(&mut self, property: &str, value: f64) -> &mut Self {
        match property {
            "x" => self.x = value,
            "y" => self.y = value,
            "background" => self.background = value,
            _ => {}
        }
        self
    }
}

/// Moves a rectangle to a fixed spot while fading its background
struct Travel {
    animation: Animation<Rectangle>,
    to: (f64, f64),
}

#[async_trait::async_trait]
impl Animatable<Rectangle> for Travel {
    async fn animate(&self, target: SharedShape<Rectangle>) -> Result<SharedShape<Rectangle>> {
        self.animation
            .animate_properties(vec![
                PropertyRequest::new(&target, "x")
                    .easing(Easing::OutBounce)
                    .end(self.to.0),
                PropertyRequest::new(&target, "y")
                    .easing(Easing::OutBounce)
                    .end(self.to.1),
                PropertyRequest::new(&target, "background").end(255.0),
            ])
            .await?;
        Ok(target)
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_properties_reach_their_targets() {
    init_tracing();
    let ticks = Arc::new(Mutex::new(Vec::new()));
    let sink = ticks.clone();

    let mut animation = Animation::new(AnimationOptions::parse(2000, "outQuad").unwrap());
    animation.when_ticks(move |_, property, _| sink.lock().push(property.to_string()));
    let travel = Travel {
        animation,
        to: (80.0, 25.0),
    };

    let started = Instant::now();
    let target = travel.animate(share(Rectangle::at(10.0, 20.0))).await.unwrap();
    assert!(started.elapsed() <= Duration::from_millis(2010));

    let rectangle = target.lock();
    assert_eq!((rectangle.x, rectangle.y, rectangle.background), (80.0, 25.0, 255.0));

    // Runs interleave rather than finishing one after another
    let ticks = ticks.lock();
    let first_y = ticks.iter().position(|p| p == "y").unwrap();
    let last_x = ticks.iter().rposition(|p| p == "x").unwrap();
    assert!(first_y < last_x);
}

#[tokio::test(start_paused = true)]
async fn test_events_report_ticks_then_end() {
    let animation = Animation::new(AnimationOptions::parse(100, "linear").unwrap());
    let mut events = animation.subscribe();
    let target = share(Rectangle::default());

    animation
        .animate_property(PropertyRequest::new(&target, "x").start(-10.0).end(10.0))
        .await
        .unwrap();

    let mut values = Vec::new();
    loop {
        match events.recv().await.unwrap() {
            AnimationEvent::Tick {
                target: shape,
                property,
                value,
            } => {
                assert!(Arc::ptr_eq(&shape, &target));
                assert_eq!(property, "x");
                values.push(value);
            }
            AnimationEvent::End { property, .. } => {
                assert_eq!(property, "x");
                break;
            }
            AnimationEvent::Error(message) => panic!("unexpected error: {message}"),
        }
    }

    assert_eq!(values.first(), Some(&-10.0));
    assert_eq!(values.last(), Some(&10.0));
    assert!(values.windows(2).all(|pair| pair[0] < pair[1]));
}

#[tokio::test(start_paused = true)]
async fn test_late_reader_receives_every_tick_of_a_long_run() {
    let animation = Animation::new(AnimationOptions::parse(1000, "linear").unwrap());
    let mut events = animation.subscribe();
    let target = share(Rectangle::default());

    // Nothing is read until the run is over
    animation
        .animate_property(PropertyRequest::new(&target, "x").start(0.0).end(1000.0))
        .await
        .unwrap();

    let mut values = Vec::new();
    let mut ended = false;
    while let Ok(event) = events.try_recv() {
        match event {
            AnimationEvent::Tick { value, .. } => values.push(value),
            AnimationEvent::End { .. } => ended = true,
            AnimationEvent::Error(message) => panic!("unexpected error: {message}"),
        }
    }

    assert!(ended);
    assert!(values.len() > 500, "only {} ticks", values.len());
    assert_eq!(values.first(), Some(&0.0));
    assert_eq!(values.last(), Some(&1000.0));
    assert!(values.windows(2).all(|pair| pair[0] < pair[1]));
}

#[tokio::test(start_paused = true)]
async fn test_spawned_run_completes() {
    let animation = Animation::new(AnimationOptions::parse(300, "inOutCubic").unwrap());
    let target = share(Rectangle::default());

    let mut handle = animation.spawn_property(PropertyRequest::new(&target, "y").end(-30.0));
    assert_eq!(handle.finished().await, RunState::Completed);
    assert_eq!(handle.state(), RunState::Completed);

    let shape = handle.join().await.unwrap();
    assert_eq!(shape.lock().y, -30.0);
}

#[tokio::test(start_paused = true)]
async fn test_spawned_run_can_be_cancelled() {
    let animation = Animation::new(AnimationOptions::parse(1000, "linear").unwrap());
    let mut events = animation.subscribe();
    let target = share(Rectangle::default());

    let mut handle = animation.spawn_property(PropertyRequest::new(&target, "x").end(100.0));
    tokio::time::sleep(Duration::from_millis(500)).await;
    handle.cancel();

    assert_eq!(handle.finished().await, RunState::Cancelled);
    assert!(matches!(handle.join().await, Err(AnimationError::Cancelled(_))));

    let x = target.lock().x;
    assert!(x > 0.0 && x < 100.0, "x = {x}");

    let mut saw_error = false;
    while let Ok(event) = events.try_recv() {
        saw_error |= matches!(event, AnimationEvent::Error(_));
    }
    assert!(saw_error);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_handle_stops_run() {
    let animation = Animation::new(AnimationOptions::parse(1000, "linear").unwrap());
    let target = share(Rectangle::default());

    let handle = animation.spawn_property(PropertyRequest::new(&target, "x").end(100.0));
    tokio::time::sleep(Duration::from_millis(200)).await;
    drop(handle);

    tokio::time::sleep(Duration::from_millis(50)).await;
    let stopped_at = target.lock().x;
    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert_eq!(target.lock().x, stopped_at);
    assert!(stopped_at < 100.0);
}

#[tokio::test(start_paused = true)]
async fn test_detached_run_keeps_going() {
    let animation = Animation::new(AnimationOptions::parse(400, "outSine").unwrap());
    let target = share(Rectangle::default());

    animation
        .spawn_property(PropertyRequest::new(&target, "background").end(200.0))
        .detach();

    tokio::time::sleep(Duration::from_millis(450)).await;
    assert_eq!(target.lock().background, 200.0);
}

#[tokio::test]
async fn test_spawn_with_bad_request_fails() {
    let animation = Animation::<Rectangle>::default();
    let target = share(Rectangle::default());

    let mut handle = animation.spawn_property(PropertyRequest::new(&target, "depth").end(3.0));
    assert_eq!(handle.finished().await, RunState::Failed);
    assert!(matches!(handle.join().await, Err(AnimationError::MissingProperty(_))));
}

#[tokio::test]
async fn test_base_animation_reports_not_implemented_everywhere() {
    let errors = Arc::new(Mutex::new(Vec::new()));

    struct ErrorLog(Arc<Mutex<Vec<String>>>);

    impl kittik_animation::Observer<Rectangle> for ErrorLog {
        fn on_error(&self, error: &AnimationError) {
            self.0.lock().push(error.to_string());
        }
    }

    let mut animation = Animation::<Rectangle>::default();
    animation.observe(ErrorLog(errors.clone()));
    let mut events = animation.subscribe();

    let result = animation.animate(share(Rectangle::default())).await;
    assert!(matches!(result, Err(AnimationError::NotImplemented)));
    assert_eq!(*errors.lock(), vec!["You must implement animate() method".to_string()]);
    assert!(matches!(
        events.recv().await.unwrap(),
        AnimationEvent::Error(ref message) if message == "You must implement animate() method"
    ));
}

#[test]
fn test_from_json_scenario() {
    let animation = Animation::<Rectangle>::from_json(
        r#"{"type":"Animation","options":{"duration":1,"easing":"inExpo"}}"#,
    )
    .unwrap();
    assert_eq!(animation.duration(), 1);
    assert_eq!(animation.easing().as_str(), "inExpo");
}

#[test]
fn test_options_from_toml_config() {
    let options = AnimationOptions::from_toml("duration = 2000\neasing = \"outExpo\"").unwrap();
    let animation = Animation::<Rectangle>::new(options);
    assert_eq!(animation.duration(), 2000);
    assert_eq!(animation.easing(), Easing::OutExpo);
}
