//! Editor commands: one JSON object per user action, tagged by `op`.
//!
//! ```json
//! {"op": "updateField", "section": "contact", "field": "email", "value": "a@b.com"}
//! {"op": "addItem", "section": "skills", "fields": {"name": "Rust", "level": 80}}
//! {"op": "removeItem", "section": "about.strengths", "id": "2"}
//! ```

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::models::{EditorStep, ItemId, TemplateId, Theme};
use crate::store::{ListSection, RecordSection, Section};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum EditorCommand {
    UpdateField {
        section: RecordSection,
        field: String,
        value: Value,
    },
    UpdateSection {
        section: Section,
        value: Value,
    },
    UpdateItem {
        section: ListSection,
        id: ItemId,
        fields: Map<String, Value>,
    },
    AddItem {
        section: ListSection,
        #[serde(default)]
        fields: Map<String, Value>,
    },
    RemoveItem {
        section: ListSection,
        id: ItemId,
    },
    AttachImage {
        project: ItemId,
        image: String,
    },
    RemoveImage {
        project: ItemId,
        index: usize,
    },
    SetPhoto {
        image: String,
    },
    ClearPhoto,
    SetTheme {
        theme: Theme,
    },
    ApplyColorPreset {
        name: String,
    },
    SelectTemplate {
        template: TemplateId,
    },
    SetFullPreview {
        enabled: bool,
    },
    SetStep {
        step: EditorStep,
    },
    Save,
    Reset,
    Validate,
    Status,
    Show,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(value: Value) -> EditorCommand {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_update_field() {
        let cmd = parse(json!({
            "op": "updateField",
            "section": "colorScheme",
            "field": "primary",
            "value": "#000000"
        }));
        assert_eq!(
            cmd,
            EditorCommand::UpdateField {
                section: RecordSection::ColorScheme,
                field: "primary".into(),
                value: json!("#000000"),
            }
        );
    }

    #[test]
    fn test_section_of_either_kind() {
        let cmd = parse(json!({ "op": "updateSection", "section": "skills", "value": [] }));
        assert!(matches!(
            cmd,
            EditorCommand::UpdateSection { section: Section::List(ListSection::Skills), .. }
        ));
        let cmd = parse(json!({ "op": "updateSection", "section": "hero", "value": {} }));
        assert!(matches!(
            cmd,
            EditorCommand::UpdateSection { section: Section::Record(RecordSection::Hero), .. }
        ));
    }

    #[test]
    fn test_item_commands_accept_numeric_ids() {
        let cmd = parse(json!({ "op": "removeItem", "section": "about.strengths", "id": 2 }));
        assert_eq!(
            cmd,
            EditorCommand::RemoveItem {
                section: ListSection::Strengths,
                id: ItemId::from("2"),
            }
        );
    }

    #[test]
    fn test_add_item_fields_default_to_empty() {
        let cmd = parse(json!({ "op": "addItem", "section": "education" }));
        assert_eq!(
            cmd,
            EditorCommand::AddItem {
                section: ListSection::Education,
                fields: Map::new(),
            }
        );
    }

    #[test]
    fn test_unit_and_selection_commands() {
        assert_eq!(parse(json!({ "op": "save" })), EditorCommand::Save);
        assert_eq!(parse(json!({ "op": "clearPhoto" })), EditorCommand::ClearPhoto);
        assert_eq!(
            parse(json!({ "op": "setStep", "step": "projects" })),
            EditorCommand::SetStep { step: EditorStep::Projects }
        );
        assert_eq!(
            parse(json!({ "op": "setTheme", "theme": "creative" })),
            EditorCommand::SetTheme { theme: Theme::Creative }
        );
    }

    #[test]
    fn test_rejects_unknown_ops_and_sections() {
        assert!(serde_json::from_value::<EditorCommand>(json!({ "op": "explode" })).is_err());
        assert!(serde_json::from_value::<EditorCommand>(
            json!({ "op": "addItem", "section": "hero" })
        )
        .is_err());
    }
}
