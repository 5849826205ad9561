//! JSON-level edits applied to typed sections.
//!
//! The forms speak in `(field name, JSON value)` pairs. Each edit goes
//! through the section's serde representation, so field names are checked
//! against the real schema and values are type-checked on the way back in.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::StoreError;
use crate::models::entries::repair_ids;
use crate::models::{ItemId, ListEntry};

fn invalid(section: &str) -> impl FnOnce(serde_json::Error) -> StoreError + '_ {
    move |source| StoreError::InvalidValue {
        section: section.to_string(),
        source,
    }
}

/// Returns `current` with every member named in `patch` replaced.
/// Keys listed in `ignored` are skipped; any other unknown key is an error.
pub(crate) fn merge<T>(
    current: &T,
    patch: &Map<String, Value>,
    ignored: &[&str],
    section: &str,
) -> Result<T, StoreError>
where
    T: Serialize + DeserializeOwned,
{
    let mut value = serde_json::to_value(current).map_err(invalid(section))?;
    let Some(object) = value.as_object_mut() else {
        return Err(StoreError::UnknownField {
            section: section.to_string(),
            field: patch.keys().next().cloned().unwrap_or_default(),
        });
    };

    for (field, field_value) in patch {
        if ignored.contains(&field.as_str()) {
            continue;
        }
        match object.get_mut(field) {
            Some(slot) => *slot = field_value.clone(),
            None => {
                return Err(StoreError::UnknownField {
                    section: section.to_string(),
                    field: field.clone(),
                })
            }
        }
    }

    serde_json::from_value(value).map_err(invalid(section))
}

/// Builds a whole value from JSON; members missing from `value` take their
/// defaults.
pub(crate) fn replace<T: DeserializeOwned>(value: &Value, section: &str) -> Result<T, StoreError> {
    T::deserialize(value).map_err(invalid(section))
}

/// One edit of a list section.
pub(crate) enum ListOp<'a> {
    Update {
        id: &'a ItemId,
        fields: &'a Map<String, Value>,
    },
    Append {
        id: ItemId,
        fields: &'a Map<String, Value>,
    },
    Remove {
        id: &'a ItemId,
    },
    Replace {
        value: &'a Value,
    },
}

impl ListOp<'_> {
    /// Applies the edit. Returns false, leaving `items` untouched, when the
    /// edit changes nothing.
    pub(crate) fn apply<T: ListEntry>(
        &self,
        items: &mut Arc<Vec<T>>,
        section: &str,
    ) -> Result<bool, StoreError> {
        match self {
            ListOp::Update { id, fields } => {
                let Some(index) = items.iter().position(|item| item.id() == *id) else {
                    return Ok(false);
                };
                let updated = merge(&items[index], fields, &["id"], section)?;
                if updated == items[index] {
                    return Ok(false);
                }
                Arc::make_mut(items)[index] = updated;
                Ok(true)
            }
            ListOp::Append { id, fields } => {
                let mut entry = merge(&T::default(), fields, &["id"], section)?;
                *entry.id_mut() = id.clone();
                Arc::make_mut(items).push(entry);
                Ok(true)
            }
            ListOp::Remove { id } => {
                if !items.iter().any(|item| item.id() == *id) {
                    return Ok(false);
                }
                Arc::make_mut(items).retain(|item| item.id() != *id);
                Ok(true)
            }
            ListOp::Replace { value } => {
                let mut replacement: Vec<T> = replace(value, section)?;
                repair_ids(&mut replacement);
                if replacement == **items {
                    return Ok(false);
                }
                *items = Arc::new(replacement);
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::{Contact, Skill};

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_merge_replaces_named_members_only() {
        let contact = Contact {
            email: "old@example.com".into(),
            phone: "555-123-4567".into(),
            ..Default::default()
        };
        let merged = merge(
            &contact,
            &fields(json!({ "email": "a@b.com" })),
            &[],
            "contact",
        )
        .unwrap();
        assert_eq!(merged.email, "a@b.com");
        assert_eq!(merged.phone, "555-123-4567");
    }

    #[test]
    fn test_merge_rejects_unknown_and_mistyped_members() {
        let contact = Contact::default();
        let unknown = merge(&contact, &fields(json!({ "fax": "1" })), &[], "contact");
        assert!(matches!(unknown, Err(StoreError::UnknownField { field, .. }) if field == "fax"));
        let mistyped = merge(&contact, &fields(json!({ "email": 42 })), &[], "contact");
        assert!(matches!(mistyped, Err(StoreError::InvalidValue { .. })));
    }

    #[test]
    fn test_update_ignores_id_in_patch() {
        let mut items = Arc::new(vec![Skill {
            id: "1".into(),
            name: "Rust".into(),
            ..Default::default()
        }]);
        let id = ItemId::from("1");
        let patch = fields(json!({ "id": "hijack", "level": 95 }));
        let changed = ListOp::Update { id: &id, fields: &patch }
            .apply(&mut items, "skills")
            .unwrap();
        assert!(changed);
        assert_eq!(items[0].id.as_str(), "1");
        assert_eq!(items[0].level, 95);
    }

    #[test]
    fn test_noop_update_keeps_identity() {
        let mut items = Arc::new(vec![Skill {
            id: "1".into(),
            level: 40,
            ..Default::default()
        }]);
        let before = Arc::clone(&items);
        let id = ItemId::from("1");
        let patch = fields(json!({ "level": 40 }));
        let changed = ListOp::Update { id: &id, fields: &patch }
            .apply(&mut items, "skills")
            .unwrap();
        assert!(!changed);
        assert!(Arc::ptr_eq(&before, &items));
    }
}
