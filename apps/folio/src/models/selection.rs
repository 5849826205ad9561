use serde::{Deserialize, Serialize};

/// Template used for the live preview and the PDF export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateId {
    #[default]
    Minimal,
    Modern,
    Professional,
    Creative,
    Tech,
}

impl TemplateId {
    pub fn display_name(self) -> &'static str {
        match self {
            TemplateId::Minimal => "Minimal",
            TemplateId::Modern => "Modern",
            TemplateId::Professional => "Professional",
            TemplateId::Creative => "Creative",
            TemplateId::Tech => "Tech Portfolio",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TemplateId::Minimal => "Clean and simple design with focus on content",
            TemplateId::Modern => "Contemporary design with bold typography",
            TemplateId::Professional => "Classic layout perfect for corporate roles",
            TemplateId::Creative => "Vibrant and colorful design for creative professionals",
            TemplateId::Tech => "Developer-focused with terminal vibes",
        }
    }
}

/// Tab of the editor form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorStep {
    #[default]
    Personal,
    Experience,
    Education,
    Skills,
    Projects,
    Contact,
}

impl EditorStep {
    const ORDER: [EditorStep; 6] = [
        EditorStep::Personal,
        EditorStep::Experience,
        EditorStep::Education,
        EditorStep::Skills,
        EditorStep::Projects,
        EditorStep::Contact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EditorStep::Personal => "Personal",
            EditorStep::Experience => "Experience",
            EditorStep::Education => "Education",
            EditorStep::Skills => "Skills",
            EditorStep::Projects => "Projects",
            EditorStep::Contact => "Contact",
        }
    }

    /// The following tab, or `None` on the last one.
    pub fn next(self) -> Option<EditorStep> {
        let index = Self::ORDER.iter().position(|s| *s == self)?;
        Self::ORDER.get(index + 1).copied()
    }
}

/// UI selection state. Lives for the session only and is never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSelection {
    pub template: TemplateId,
    pub full_preview: bool,
    pub current_step: EditorStep,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_id_wire_names() {
        assert_eq!(serde_json::to_string(&TemplateId::Tech).unwrap(), "\"tech\"");
        let parsed: TemplateId = serde_json::from_str("\"professional\"").unwrap();
        assert_eq!(parsed, TemplateId::Professional);
        assert!(serde_json::from_str::<TemplateId>("\"brutalist\"").is_err());
    }

    #[test]
    fn test_step_next_stops_at_contact() {
        assert_eq!(EditorStep::Personal.next(), Some(EditorStep::Experience));
        assert_eq!(EditorStep::Contact.next(), None);
    }
}
