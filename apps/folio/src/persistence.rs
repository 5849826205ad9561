//! Persisted form of the portfolio document.
//!
//! The stored blob is the document's JSON with one extra `schemaVersion`
//! member. Blobs written before versioning existed carry no version and are
//! schema 1; they are migrated step by step up to [`SCHEMA_VERSION`].

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::PortfolioDocument;

pub const SCHEMA_VERSION: u32 = 2;
const VERSION_KEY: &str = "schemaVersion";

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Malformed portfolio JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("Persisted portfolio is not a JSON object")]
    NotAnObject,

    #[error("Schema version is not a positive integer: {0}")]
    InvalidVersion(Value),

    #[error("Unsupported schema version {found} (newest supported is {newest})")]
    UnsupportedVersion { found: u64, newest: u32 },

    #[error("Persisted portfolio does not match the document shape: {0}")]
    Shape(#[source] serde_json::Error),
}

#[derive(Serialize)]
struct Envelope<'a> {
    #[serde(rename = "schemaVersion")]
    schema_version: u32,
    #[serde(flatten)]
    document: &'a PortfolioDocument,
}

pub fn encode(document: &PortfolioDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string(&Envelope {
        schema_version: SCHEMA_VERSION,
        document,
    })
}

/// Parses a stored blob, migrating older schemas and repairing list ids.
pub fn decode(raw: &str) -> Result<PortfolioDocument, DecodeError> {
    let mut value: Value = serde_json::from_str(raw).map_err(DecodeError::Malformed)?;
    let object = value.as_object_mut().ok_or(DecodeError::NotAnObject)?;

    let version = match object.remove(VERSION_KEY) {
        None => 1,
        Some(v) => match v.as_u64() {
            Some(n) if n > 0 => n,
            _ => return Err(DecodeError::InvalidVersion(v)),
        },
    };
    if version > u64::from(SCHEMA_VERSION) {
        return Err(DecodeError::UnsupportedVersion {
            found: version,
            newest: SCHEMA_VERSION,
        });
    }

    // MIGRATIONS[i] upgrades schema i + 1 to i + 2.
    for migrate in &MIGRATIONS[(version - 1) as usize..] {
        migrate(&mut *object);
    }

    let mut document: PortfolioDocument =
        serde_json::from_value(value).map_err(DecodeError::Shape)?;
    document.repair_ids();
    Ok(document)
}

type Migration = fn(&mut Map<String, Value>);

const MIGRATIONS: [Migration; (SCHEMA_VERSION - 1) as usize] = [migrate_personal_info];

/// Schema 1 kept name, title, bio, avatar and contact scalars together in
/// `personalInfo`. Schema 2 splits them between `hero` and `contact`.
fn migrate_personal_info(object: &mut Map<String, Value>) {
    let Some(Value::Object(personal)) = object.remove("personalInfo") else {
        return;
    };

    if !object.contains_key("hero") {
        let hero: Map<String, Value> = [
            ("fullName", "fullName"),
            ("title", "tagline"),
            ("bio", "shortBio"),
            ("avatar", "photo"),
        ]
        .into_iter()
        .filter_map(|(from, to)| personal.get(from).map(|v| (to.to_string(), v.clone())))
        .collect();
        object.insert("hero".to_string(), Value::Object(hero));
    }

    let contact = object
        .entry("contact")
        .or_insert_with(|| Value::Object(Map::new()));
    if let Some(contact) = contact.as_object_mut() {
        for key in ["email", "phone", "location"] {
            let missing = contact
                .get(key)
                .and_then(Value::as_str)
                .map_or(true, str::is_empty);
            if let (true, Some(v)) = (missing, personal.get(key)) {
                contact.insert(key.to_string(), v.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_encode_stamps_version() {
        let raw = encode(&PortfolioDocument::starter()).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[VERSION_KEY], json!(SCHEMA_VERSION));
        assert_eq!(value["hero"]["fullName"], "Alex Rivera");
    }

    #[test]
    fn test_decode_restores_encoded_document() {
        let doc = PortfolioDocument::starter();
        assert_eq!(decode(&encode(&doc).unwrap()).unwrap(), doc);
    }

    #[test]
    fn test_decode_migrates_personal_info() {
        let legacy = json!({
            "personalInfo": {
                "fullName": "John Doe",
                "title": "Full Stack Developer",
                "email": "john.doe@example.com",
                "phone": "+1 (555) 123-4567",
                "location": "San Francisco, CA",
                "bio": "Passionate developer",
                "avatar": ""
            },
            "skills": [{ "id": "1", "name": "React", "level": 90 }],
            "projects": [{ "id": "1", "title": "Shop", "technologies": "React, Stripe" }],
            "contact": { "github": "https://github.com/johndoe" }
        });

        let doc = decode(&legacy.to_string()).unwrap();
        assert_eq!(doc.hero.full_name, "John Doe");
        assert_eq!(doc.hero.tagline, "Full Stack Developer");
        assert_eq!(doc.hero.short_bio, "Passionate developer");
        assert_eq!(doc.contact.email, "john.doe@example.com");
        assert_eq!(doc.contact.github, "https://github.com/johndoe");
        assert_eq!(doc.projects[0].technologies, vec!["React", "Stripe"]);
        assert!(doc.about.strengths.is_empty());
        assert!(doc.certifications.is_empty());
    }

    #[test]
    fn test_migration_keeps_existing_contact_values() {
        let legacy = json!({
            "personalInfo": { "email": "old@example.com", "phone": "555-000-1111" },
            "contact": { "email": "new@example.com", "phone": "" }
        });
        let doc = decode(&legacy.to_string()).unwrap();
        assert_eq!(doc.contact.email, "new@example.com");
        assert_eq!(doc.contact.phone, "555-000-1111");
    }

    #[test]
    fn test_decode_rejects_future_schema() {
        let raw = json!({ "schemaVersion": 99 }).to_string();
        assert!(matches!(
            decode(&raw),
            Err(DecodeError::UnsupportedVersion { found: 99, .. })
        ));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode("{not json"), Err(DecodeError::Malformed(_))));
        assert!(matches!(decode("[1, 2]"), Err(DecodeError::NotAnObject)));
        assert!(matches!(
            decode(r#"{"schemaVersion": "two"}"#),
            Err(DecodeError::InvalidVersion(_))
        ));
        assert!(matches!(
            decode(r#"{"schemaVersion": 2, "skills": "lots"}"#),
            Err(DecodeError::Shape(_))
        ));
    }

    #[test]
    fn test_decode_repairs_duplicate_ids() {
        let raw = json!({
            "schemaVersion": 2,
            "experience": [{ "id": "1" }, { "id": "1" }, {}]
        })
        .to_string();
        let doc = decode(&raw).unwrap();
        assert_eq!(doc.experience[0].id.as_str(), "1");
        assert_ne!(doc.experience[1].id, doc.experience[0].id);
        assert!(!doc.experience[2].id.is_empty());
    }
}
