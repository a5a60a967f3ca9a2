//! Animation targets
//!
//! The animation never owns what it animates. A target only has to expose
//! numeric properties by name.

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::sync::Arc;

use parking_lot::Mutex;

/// Something with named numeric properties that can be animated
pub trait Shape: Send + 'static {
    /// Current value of `property`, `None` if the shape has no such property
    fn get(&self, property: &str) -> Option<f64>;

    /// Write a new value for `property`
    fn set(&mut self, property: &str, value: f64) -> &mut Self;
}

/// A shape shared between the caller and concurrently running animations
pub type SharedShape<S> = Arc<Mutex<S>>;

/// Wrap a shape so it can be handed to animations
pub fn share<S: Shape>(shape: S) -> SharedShape<S> {
    Arc::new(Mutex::new(shape))
}

impl<H> Shape for HashMap<String, f64, H>
where
    H: BuildHasher + Send + 'static,
{
    fn get(&self, property: &str) -> Option<f64> {
        HashMap::get(self, property).copied()
    }

    fn set(&mut self, property: &str, value: f64) -> &mut Self {
        self.insert(property.to_string(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    #[test]
    fn test_map_shape_get_set() {
        let mut shape: FxHashMap<String, f64> = FxHashMap::default();
        assert_eq!(Shape::get(&shape, "x"), None);

        Shape::set(&mut shape, "x", 4.0).set("y", 8.0);
        assert_eq!(Shape::get(&shape, "x"), Some(4.0));
        assert_eq!(Shape::get(&shape, "y"), Some(8.0));
    }

    #[test]
    fn test_shared_shape_is_visible_to_all_handles() {
        let shape = share(HashMap::from([("x".to_string(), 1.0)]));
        let other = Arc::clone(&shape);

        Shape::set(&mut *other.lock(), "x", 2.0);
        assert_eq!(Shape::get(&*shape.lock(), "x"), Some(2.0));
    }
}
