//! Serialized form of animations
//!
//! `{"type": "<Name>", "options": {"duration": <ms>, "easing": "<name>"}}`

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::driver::Animation;
use crate::easing::Easing;
use crate::error::{AnimationError, Result};
use crate::options::AnimationOptions;
use crate::shape::Shape;

/// Object representation of an animation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Representation {
    #[serde(rename = "type")]
    pub kind: String,
    pub options: AnimationOptions,
}

/// `options` as found in untrusted input, validated after parsing so the
/// caller gets configuration errors rather than parse errors.
#[derive(Deserialize)]
struct RawOptions {
    duration: Option<u64>,
    easing: Option<String>,
}

impl RawOptions {
    fn validate(self) -> Result<AnimationOptions> {
        let mut options = AnimationOptions::default();
        if let Some(duration) = self.duration {
            options.set_duration(duration)?;
        }
        if let Some(easing) = self.easing {
            options.set_easing(easing.parse::<Easing>()?);
        }
        Ok(options)
    }
}

/// Animations that can be written to and restored from their object form
pub trait Describe: Sized {
    /// Name stored in the `type` field
    const TYPE_NAME: &'static str;

    fn options(&self) -> &AnimationOptions;

    fn from_options(options: AnimationOptions) -> Self;

    fn create(options: AnimationOptions) -> Self {
        Self::from_options(options)
    }

    fn to_object(&self) -> Representation {
        Representation {
            kind: Self::TYPE_NAME.to_string(),
            options: *self.options(),
        }
    }

    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_object())?)
    }

    /// Restore from an object representation, checking that it describes
    /// this type.
    fn from_object(object: &Value) -> Result<Self> {
        let invalid = || AnimationError::InvalidRepresentation {
            expected: Self::TYPE_NAME,
        };

        let kind = object
            .get("type")
            .and_then(Value::as_str)
            .filter(|kind| !kind.is_empty())
            .ok_or_else(invalid)?;
        let options = object
            .get("options")
            .filter(|options| options.is_object())
            .ok_or_else(invalid)?;
        if kind != Self::TYPE_NAME {
            return Err(AnimationError::TypeMismatch {
                found: kind.to_string(),
                expected: Self::TYPE_NAME,
            });
        }

        let options = RawOptions::deserialize(options)?.validate()?;
        Ok(Self::from_options(options))
    }

    fn from_representation(representation: &Representation) -> Result<Self> {
        Self::from_object(&serde_json::to_value(representation)?)
    }

    fn from_json(json: &str) -> Result<Self> {
        let object: Value = serde_json::from_str(json)?;
        Self::from_object(&object)
    }
}

impl<S: Shape> Describe for Animation<S> {
    const TYPE_NAME: &'static str = "Animation";

    fn options(&self) -> &AnimationOptions {
        Animation::options(self)
    }

    fn from_options(options: AnimationOptions) -> Self {
        Animation::new(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    type Base = Animation<HashMap<String, f64>>;

    #[test]
    fn test_to_object() {
        let animation = Base::default();
        assert_eq!(
            serde_json::to_value(animation.to_object()).unwrap(),
            json!({"type": "Animation", "options": {"duration": 1000, "easing": "outQuad"}})
        );
    }

    #[test]
    fn test_to_json() {
        assert_eq!(
            Base::default().to_json().unwrap(),
            r#"{"type":"Animation","options":{"duration":1000,"easing":"outQuad"}}"#
        );
    }

    #[test]
    fn test_create() {
        let animation = Base::create(AnimationOptions::parse(1, "outQuad").unwrap());
        assert_eq!(animation.duration(), 1);
    }

    #[test]
    fn test_invalid_representation() {
        let err = Base::from_object(&json!({})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "It looks like the object is not a representation of the Animation"
        );
        assert!(matches!(
            Base::from_object(&json!({"type": "Animation"})),
            Err(AnimationError::InvalidRepresentation { .. })
        ));
    }

    #[test]
    fn test_malformed_type_or_options_is_invalid() {
        let malformed = [
            json!({"type": "Animation", "options": null}),
            json!({"type": "Animation", "options": 5}),
            json!({"type": "Animation", "options": "fast"}),
            json!({"type": "", "options": {}}),
            json!({"type": null, "options": {}}),
            json!({"type": 7, "options": {}}),
        ];

        for object in malformed {
            let err = Base::from_object(&object).unwrap_err();
            assert!(
                matches!(err, AnimationError::InvalidRepresentation { expected: "Animation" }),
                "{object} gave {err:?}"
            );
        }

        assert!(matches!(
            Base::from_json(r#"{"type":"Animation","options":null}"#),
            Err(AnimationError::InvalidRepresentation { .. })
        ));
    }

    #[test]
    fn test_type_mismatch_names_both_types() {
        let err = Base::from_object(&json!({"type": "Slide", "options": {}})).unwrap_err();
        assert!(matches!(err, AnimationError::TypeMismatch { .. }));
        assert_eq!(err.to_string(), "Slide is not an object representation of the Animation");
    }

    #[test]
    fn test_from_object() {
        let object = json!({"type": "Animation", "options": {"duration": 1, "easing": "inExpo"}});
        let animation = Base::from_object(&object).unwrap();
        assert_eq!(animation.duration(), 1);
        assert_eq!(animation.easing(), Easing::InExpo);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{"type":"Animation","options":{"duration":1,"easing":"inExpo"}}"#;
        let animation = Base::from_json(json).unwrap();
        assert_eq!(animation.duration(), 1);
        assert_eq!(animation.easing(), Easing::InExpo);
    }

    #[test]
    fn test_empty_options_take_defaults() {
        let animation = Base::from_object(&json!({"type": "Animation", "options": {}})).unwrap();
        assert_eq!(animation.options(), &AnimationOptions::default());
    }

    #[test]
    fn test_bad_options_are_configuration_errors() {
        assert!(matches!(
            Base::from_object(&json!({"type": "Animation", "options": {"easing": "wrong"}})),
            Err(AnimationError::UnknownEasing(_))
        ));
        assert!(matches!(
            Base::from_object(&json!({"type": "Animation", "options": {"duration": 0}})),
            Err(AnimationError::InvalidDuration(0))
        ));
    }

    #[test]
    fn test_round_trip_preserves_configuration() {
        for easing in Easing::ALL {
            let original = Base::new(AnimationOptions::new(1234, easing).unwrap());
            let restored = Base::from_representation(&original.to_object()).unwrap();
            assert_eq!(restored.duration(), 1234);
            assert_eq!(restored.easing(), easing);
        }
    }
}
