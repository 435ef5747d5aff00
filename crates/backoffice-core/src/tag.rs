// Tag DTOs
//
// Tags are the one resource with numeric identity. Some backend payloads send
// the id as a JSON string, so TagId accepts both forms on input and always
// writes a number.

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::resource::{Resource, ResourceKind};

/// Numeric tag identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TagId(pub i64);

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TagId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(TagId)
    }
}

impl From<i64> for TagId {
    fn from(id: i64) -> Self {
        TagId(id)
    }
}

struct TagIdVisitor;

impl Visitor<'_> for TagIdVisitor {
    type Value = TagId;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer or a string holding an integer")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<TagId, E> {
        Ok(TagId(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<TagId, E> {
        i64::try_from(v)
            .map(TagId)
            .map_err(|_| E::custom(format!("tag id out of range: {v}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<TagId, E> {
        v.parse()
            .map_err(|_| E::custom(format!("invalid tag id: {v:?}")))
    }
}

impl<'de> Deserialize<'de> for TagId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TagIdVisitor)
    }
}

/// Tag as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a tag
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateTag {
    pub name: String,
    pub slug: String,
}

/// Partial update of a tag
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// Tag resource
pub struct Tags;

impl Resource for Tags {
    type Id = TagId;
    type Item = Tag;
    type Create = CreateTag;
    type Update = UpdateTag;

    const KIND: ResourceKind = ResourceKind::Tags;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tag_id_accepts_number_and_string() {
        let from_number: TagId = serde_json::from_value(json!(7)).unwrap();
        let from_string: TagId = serde_json::from_value(json!("7")).unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(serde_json::to_value(from_string).unwrap(), json!(7));
    }

    #[test]
    fn test_tag_id_rejects_garbage() {
        assert!(serde_json::from_value::<TagId>(json!("seven")).is_err());
        assert!(serde_json::from_value::<TagId>(json!(true)).is_err());
        assert!(serde_json::from_value::<TagId>(json!(u64::MAX)).is_err());
    }

    #[test]
    fn test_tag_with_string_id() {
        let tag: Tag = serde_json::from_value(json!({
            "id": "12",
            "name": "Rust",
            "slug": "rust",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(tag.id, TagId(12));
    }
}
