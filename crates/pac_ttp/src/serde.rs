//! Text form of TTP files
//!

use std::fmt;

use serde::{
    de::{self, MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use serde_json::error::Category;
use tracing::instrument;

use crate::error::{Error, Result};
use crate::types::{ResName, TtpAnimation};

const RAW_FIELD: &str = "raw";

impl Serialize for ResName {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.to_text() {
            Some(text) => serializer.serialize_str(&text),
            None => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(RAW_FIELD, self.as_bytes())?;
                map.end()
            }
        }
    }
}

struct ResNameVisitor;

impl<'de> Visitor<'de> for ResNameVisitor {
    type Value = ResName;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string or a map with a raw byte array")
    }

    fn visit_str<E>(self, v: &str) -> core::result::Result<Self::Value, E>
    where
        E: de::Error,
    {
        ResName::from_text(v).map_err(E::custom)
    }

    fn visit_map<M>(self, mut access: M) -> core::result::Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut raw: Option<Vec<u8>> = None;
        while let Some(key) = access.next_key::<String>()? {
            if key != RAW_FIELD {
                return Err(de::Error::unknown_field(&key, &[RAW_FIELD]));
            }
            if raw.is_some() {
                return Err(de::Error::duplicate_field(RAW_FIELD));
            }
            raw = Some(access.next_value()?);
        }

        raw.map(ResName::new)
            .ok_or_else(|| de::Error::missing_field(RAW_FIELD))
    }
}

impl<'de> Deserialize<'de> for ResName {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ResNameVisitor)
    }
}

/// Render an animation as pretty printed JSON
#[instrument(skip_all, err, fields(frames = animation.frames.len()))]
pub fn to_json(animation: &TtpAnimation) -> Result<String> {
    Ok(serde_json::to_string_pretty(animation)?)
}

/// Parse the JSON produced by [`to_json`], possibly edited by hand.
///
/// Text that parses as JSON but does not describe a valid animation (a negative or too large
/// number, a missing field, a `frame_count` that disagrees with `frames`) is reported as
/// [`Error::SchemaViolation`].
#[instrument(skip_all, err, fields(size = text.len()))]
pub fn from_json(text: &str) -> Result<TtpAnimation> {
    serde_json::from_str(text).map_err(|e| match e.classify() {
        Category::Data => Error::SchemaViolation(e.to_string()),
        _ => Error::JsonError(e),
    })
}

#[cfg(test)]
mod test {
    use pretty_assertions::{assert_eq, assert_str_eq};

    use crate::error::{Error, Result};
    use crate::serde::{from_json, to_json};
    use crate::types::{ResName, TtpAnimation, TtpFrame};

    fn sample() -> TtpAnimation {
        TtpAnimation {
            unknown: 1,
            window_width: 640,
            window_height: 480,
            frames: vec![TtpFrame {
                sprite_name: ResName::new(b"chr01".to_vec()),
                se_name: ResName::new(vec![0x81]),
                textbox_name: ResName::default(),
                values: [10, 20, 30, 40, 50],
            }],
            trailer: Vec::new(),
        }
    }

    #[test]
    fn write_json() -> Result<()> {
        let expected = r#"{
  "unknown": 1,
  "frame_count": 1,
  "window_width": 640,
  "window_height": 480,
  "frames": [
    {
      "sprite_name": "chr01",
      "se_name": {
        "raw": [
          129
        ]
      },
      "textbox_name": "",
      "values": [
        10,
        20,
        30,
        40,
        50
      ]
    }
  ]
}"#;

        assert_str_eq!(to_json(&sample())?, expected);

        Ok(())
    }

    #[test]
    fn json_round_trip() -> Result<()> {
        let mut animation = sample();
        animation.trailer = vec![0x01];

        assert_eq!(from_json(&to_json(&animation)?)?, animation);

        Ok(())
    }

    #[test]
    fn frame_count_is_optional() -> Result<()> {
        let text = r#"{
            "unknown": 0, "window_width": 1, "window_height": 2,
            "frames": []
        }"#;

        let animation = from_json(text)?;
        assert!(animation.frames.is_empty());

        Ok(())
    }

    #[test]
    fn frame_count_mismatch_is_rejected() {
        let text = r#"{
            "unknown": 0, "frame_count": 2, "window_width": 1, "window_height": 2,
            "frames": []
        }"#;

        assert!(matches!(from_json(text), Err(Error::SchemaViolation(_))));
    }

    #[test]
    fn negative_value_is_rejected() {
        let text = r#"{
            "unknown": -1, "window_width": 1, "window_height": 2,
            "frames": []
        }"#;

        assert!(matches!(from_json(text), Err(Error::SchemaViolation(_))));
    }

    #[test]
    fn oversized_value_is_rejected() {
        let text = r#"{
            "unknown": 0, "window_width": 4294967296, "window_height": 2,
            "frames": []
        }"#;

        assert!(matches!(from_json(text), Err(Error::SchemaViolation(_))));
    }

    #[test]
    fn raw_byte_out_of_range_is_rejected() {
        let text = r#"{
            "unknown": 0, "window_width": 1, "window_height": 2,
            "frames": [{
                "sprite_name": { "raw": [256] }, "se_name": "", "textbox_name": "",
                "values": [0, 0, 0, 0, 0]
            }]
        }"#;

        assert!(matches!(from_json(text), Err(Error::SchemaViolation(_))));
    }

    #[test]
    fn name_changed_by_encoding_is_rejected() {
        let text = r#"{
            "unknown": 0, "window_width": 1, "window_height": 2,
            "frames": [{
                "sprite_name": "chr¥01", "se_name": "", "textbox_name": "",
                "values": [0, 0, 0, 0, 0]
            }]
        }"#;

        assert!(matches!(from_json(text), Err(Error::SchemaViolation(_))));
    }

    #[test]
    fn short_values_are_rejected() {
        let text = r#"{
            "unknown": 0, "window_width": 1, "window_height": 2,
            "frames": [{
                "sprite_name": "a", "se_name": "", "textbox_name": "",
                "values": [0, 0, 0, 0]
            }]
        }"#;

        assert!(matches!(from_json(text), Err(Error::SchemaViolation(_))));
    }

    #[test]
    fn broken_json_is_not_a_schema_violation() {
        assert!(matches!(from_json("{ \"unknown\": "), Err(Error::JsonError(_))));
    }
}
