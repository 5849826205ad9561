use std::collections::HashSet;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Identifier of one element of a list section.
///
/// Assigned by the store when an element is created. Legacy documents may
/// carry numeric ids, which are read back as their decimal string.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// A fresh random (v4) identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Number(number) => Self(number.to_string()),
        })
    }
}

/// An element of a list section: anything carrying a store-assigned [`ItemId`].
pub trait ListEntry: Clone + Default + PartialEq + Serialize + DeserializeOwned {
    fn id(&self) -> &ItemId;
    fn id_mut(&mut self) -> &mut ItemId;
}

macro_rules! list_entry {
    ($($entry:ty),+ $(,)?) => {
        $(
            impl ListEntry for $entry {
                fn id(&self) -> &ItemId {
                    &self.id
                }

                fn id_mut(&mut self) -> &mut ItemId {
                    &mut self.id
                }
            }
        )+
    };
}

list_entry!(Strength, Skill, Project, Experience, Education, Certification);

/// Gives a fresh id to every element whose id is empty or already taken by
/// an earlier element. Returns true when anything was rewritten.
pub fn repair_ids<T: ListEntry>(items: &mut [T]) -> bool {
    let mut seen = HashSet::new();
    let mut repaired = false;
    for item in items.iter_mut() {
        if item.id().is_empty() || !seen.insert(item.id().clone()) {
            let fresh = ItemId::generate();
            seen.insert(fresh.clone());
            *item.id_mut() = fresh;
            repaired = true;
        }
    }
    repaired
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Strength {
    pub id: ItemId,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Skill {
    pub id: ItemId,
    pub name: String,
    /// Proficiency in percent, always within 0..=100.
    #[serde(deserialize_with = "clamped_level")]
    pub level: u8,
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    #[serde(deserialize_with = "list_or_comma_separated")]
    pub technologies: Vec<String>,
    /// Self-contained `data:image/...` URIs, at most five.
    pub images: Vec<String>,
    pub github_link: String,
    pub live_link: String,
    pub featured: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    pub id: ItemId,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    pub id: ItemId,
    pub degree: String,
    pub school: String,
    pub location: String,
    pub year: String,
    pub description: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Certification {
    pub id: ItemId,
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub credential_id: String,
    #[serde(alias = "credentialUrl")]
    pub url: String,
    pub description: String,
}

/// Accepts any JSON number (or numeric string) and clamps it into 0..=100.
fn clamped_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawLevel {
        Number(f64),
        Text(String),
    }

    let level = match RawLevel::deserialize(deserializer)? {
        RawLevel::Number(n) => n,
        RawLevel::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("'{text}' is not a skill level")))?,
    };
    if level.is_nan() {
        return Ok(0);
    }
    Ok(level.round().clamp(0.0, 100.0) as u8)
}

/// Older documents stored technologies as one comma-separated string.
fn list_or_comma_separated<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawList {
        List(Vec<String>),
        Text(String),
    }

    Ok(match RawList::deserialize(deserializer)? {
        RawList::List(items) => items,
        RawList::Text(text) => text
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generated_ids_are_unique() {
        let ids: HashSet<_> = (0..1000).map(|_| ItemId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_numeric_id_is_read_as_string() {
        let skill: Skill = serde_json::from_value(json!({ "id": 1700000000000u64 })).unwrap();
        assert_eq!(skill.id.as_str(), "1700000000000");
    }

    #[test]
    fn test_skill_level_is_clamped() {
        let high: Skill = serde_json::from_value(json!({ "level": 140 })).unwrap();
        let low: Skill = serde_json::from_value(json!({ "level": -3 })).unwrap();
        let text: Skill = serde_json::from_value(json!({ "level": "72.6" })).unwrap();
        assert_eq!(high.level, 100);
        assert_eq!(low.level, 0);
        assert_eq!(text.level, 73);
    }

    #[test]
    fn test_skill_level_rejects_words() {
        assert!(serde_json::from_value::<Skill>(json!({ "level": "expert" })).is_err());
    }

    #[test]
    fn test_technologies_accept_legacy_string() {
        let project: Project =
            serde_json::from_value(json!({ "technologies": "React, Node.js, , MongoDB" })).unwrap();
        assert_eq!(project.technologies, vec!["React", "Node.js", "MongoDB"]);
    }

    #[test]
    fn test_certification_accepts_credential_url_alias() {
        let cert: Certification =
            serde_json::from_value(json!({ "credentialUrl": "https://aws.amazon.com/verification" }))
                .unwrap();
        assert_eq!(cert.url, "https://aws.amazon.com/verification");
        assert!(serde_json::to_value(&cert).unwrap().get("url").is_some());
    }

    #[test]
    fn test_repair_ids_fixes_missing_and_duplicates() {
        let mut items = vec![
            Strength {
                id: "1".into(),
                ..Default::default()
            },
            Strength::default(),
            Strength {
                id: "1".into(),
                ..Default::default()
            },
        ];
        assert!(repair_ids(&mut items));
        assert_eq!(items[0].id.as_str(), "1");
        let ids: HashSet<_> = items.iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids.len(), 3);
        assert!(!repair_ids(&mut items));
    }
}
