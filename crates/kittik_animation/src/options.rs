//! Animation configuration
//!
//! Options are a plain struct rather than free-form storage: only the
//! duration and the easing are configurable. They load from JSON (the
//! serialized form of an animation) or from a TOML file.

use serde::{Deserialize, Deserializer, Serialize};

use crate::easing::Easing;
use crate::error::{AnimationError, Result};

/// Duration used when none is configured, in milliseconds
pub const DEFAULT_DURATION_MS: u64 = 1000;

/// Timing configuration owned by one animation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationOptions {
    /// Animation duration in milliseconds (always > 0)
    #[serde(deserialize_with = "positive_duration")]
    duration: u64,
    /// Easing used when a property request does not name one
    easing: Easing,
}

fn positive_duration<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let duration = u64::deserialize(deserializer)?;
    if duration == 0 {
        return Err(serde::de::Error::custom(AnimationError::InvalidDuration(0)));
    }
    Ok(duration)
}

impl AnimationOptions {
    pub fn new(duration: u64, easing: Easing) -> Result<Self> {
        let mut options = Self::default();
        options.set_duration(duration)?;
        options.set_easing(easing);
        Ok(options)
    }

    /// Build options from a duration and an easing name, validating both
    pub fn parse(duration: u64, easing: &str) -> Result<Self> {
        Self::new(duration, easing.parse()?)
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Set a new duration in milliseconds; zero is rejected and the previous
    /// value kept.
    pub fn set_duration(&mut self, duration: u64) -> Result<&mut Self> {
        if duration == 0 {
            return Err(AnimationError::InvalidDuration(duration));
        }
        self.duration = duration;
        Ok(self)
    }

    pub fn set_easing(&mut self, easing: Easing) -> &mut Self {
        self.easing = easing;
        self
    }

    /// Set the easing by name; unknown names are rejected and the previous
    /// value kept.
    pub fn set_easing_name(&mut self, name: &str) -> Result<&mut Self> {
        let easing = name.parse()?;
        Ok(self.set_easing(easing))
    }

    /// Load options from TOML, e.g. `duration = 2000` / `easing = "outBounce"`
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION_MS,
            easing: Easing::OutQuad,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = AnimationOptions::default();
        assert_eq!(options.duration(), 1000);
        assert_eq!(options.easing(), Easing::OutQuad);
    }

    #[test]
    fn test_parse_validates_name() {
        let options = AnimationOptions::parse(2000, "outExpo").unwrap();
        assert_eq!(options.duration(), 2000);
        assert_eq!(options.easing(), Easing::OutExpo);

        assert!(matches!(
            AnimationOptions::parse(2000, "sideways"),
            Err(AnimationError::UnknownEasing(_))
        ));
    }

    #[test]
    fn test_failed_setters_keep_previous_values() {
        let mut options = AnimationOptions::parse(500, "inQuad").unwrap();

        assert!(options.set_easing_name("wrong").is_err());
        assert!(options.set_duration(0).is_err());

        assert_eq!(options.duration(), 500);
        assert_eq!(options.easing(), Easing::InQuad);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let options = AnimationOptions::from_json("{}").unwrap();
        assert_eq!(options, AnimationOptions::default());

        let options = AnimationOptions::from_json(r#"{"easing":"inSine"}"#).unwrap();
        assert_eq!(options.duration(), 1000);
        assert_eq!(options.easing(), Easing::InSine);
    }

    #[test]
    fn test_invalid_json_values_are_rejected() {
        assert!(AnimationOptions::from_json(r#"{"duration":0}"#).is_err());
        assert!(AnimationOptions::from_json(r#"{"easing":"wrong"}"#).is_err());
        assert!(AnimationOptions::from_json(r#"{"duration":-5}"#).is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let content = "duration = 250\neasing = \"outBounce\"\n";
        let options = AnimationOptions::from_toml(content).unwrap();
        assert_eq!(options.duration(), 250);
        assert_eq!(options.easing(), Easing::OutBounce);

        let text = options.to_toml().unwrap();
        assert_eq!(AnimationOptions::from_toml(&text).unwrap(), options);
    }
}
