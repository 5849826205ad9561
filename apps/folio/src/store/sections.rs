use std::fmt;

use serde::{Deserialize, Serialize};

/// Record-valued sections: `update_field` edits one member at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordSection {
    Hero,
    About,
    Contact,
    ColorScheme,
}

impl RecordSection {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordSection::Hero => "hero",
            RecordSection::About => "about",
            RecordSection::Contact => "contact",
            RecordSection::ColorScheme => "colorScheme",
        }
    }
}

/// List-valued sections whose elements carry store-assigned ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListSection {
    Skills,
    Projects,
    Experience,
    Education,
    Certifications,
    /// `about.strengths`, nested inside the about record.
    #[serde(rename = "about.strengths", alias = "strengths")]
    Strengths,
}

impl ListSection {
    pub fn as_str(self) -> &'static str {
        match self {
            ListSection::Skills => "skills",
            ListSection::Projects => "projects",
            ListSection::Experience => "experience",
            ListSection::Education => "education",
            ListSection::Certifications => "certifications",
            ListSection::Strengths => "about.strengths",
        }
    }
}

/// Any section, for whole-section replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Section {
    Record(RecordSection),
    List(ListSection),
}

impl Section {
    pub fn as_str(self) -> &'static str {
        match self {
            Section::Record(section) => section.as_str(),
            Section::List(section) => section.as_str(),
        }
    }
}

impl From<RecordSection> for Section {
    fn from(section: RecordSection) -> Self {
        Section::Record(section)
    }
}

impl From<ListSection> for Section {
    fn from(section: ListSection) -> Self {
        Section::List(section)
    }
}

impl fmt::Display for RecordSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ListSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
