//! The list item entity and its backend-assigned identifier

use std::fmt;

use mongodb::bson::oid::ObjectId;
use serde::{Serialize, Serializer};

/// Backend-assigned identifier of a list item.
///
/// Relational and in-memory stores hand out serial integers; the document
/// store hands out 12-byte ObjectIds. Both serialize under the same `id` key:
/// serials as JSON numbers, ObjectIds as 24-char lowercase hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemId {
    Serial(i32),
    Object(ObjectId),
}

impl ItemId {
    pub fn as_serial(&self) -> Option<i32> {
        match self {
            Self::Serial(id) => Some(*id),
            Self::Object(_) => None,
        }
    }

    pub fn as_object_id(&self) -> Option<ObjectId> {
        match self {
            Self::Object(oid) => Some(*oid),
            Self::Serial(_) => None,
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serial(id) => write!(f, "{}", id),
            Self::Object(oid) => write!(f, "{}", oid.to_hex()),
        }
    }
}

impl Serialize for ItemId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Serial(id) => serializer.serialize_i32(*id),
            Self::Object(oid) => serializer.serialize_str(&oid.to_hex()),
        }
    }
}

impl From<i32> for ItemId {
    fn from(id: i32) -> Self {
        Self::Serial(id)
    }
}

impl From<ObjectId> for ItemId {
    fn from(oid: ObjectId) -> Self {
        Self::Object(oid)
    }
}

/// A persisted list item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub id: ItemId,
    pub list: String,
}

impl ListItem {
    pub fn new(id: impl Into<ItemId>, list: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            list: list.into(),
        }
    }
}
