use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A stored player record.
///
/// `id` is generated by the service on creation and never changes. The other
/// fields are caller-supplied, untyped, and stored verbatim; a field that was
/// never supplied is omitted from responses.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<Value>,
}

/// Caller-supplied fields for create/update requests. Carries no id; the
/// service mints one.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PlayerInput {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub country: Option<Value>,
    #[serde(default)]
    pub rank: Option<Value>,
}

impl Player {
    /// Build a new record from caller input plus a freshly generated id.
    pub fn create(input: PlayerInput) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            country: input.country,
            rank: input.rank,
        }
    }

    /// Partial update: a field overwrites only when present and non-null in
    /// the input. Both `null` and absent leave the stored value unchanged,
    /// so callers can update a subset of fields without resending the rest.
    pub fn apply(&mut self, input: PlayerInput) {
        if let Some(v) = input.name {
            if !v.is_null() {
                self.name = Some(v);
            }
        }
        if let Some(v) = input.country {
            if !v.is_null() {
                self.country = Some(v);
            }
        }
        if let Some(v) = input.rank {
            if !v.is_null() {
                self.rank = Some(v);
            }
        }
    }
}
