use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::entries::{
    repair_ids, Certification, Education, Experience, Project, Skill, Strength,
};

/// The whole portfolio: every section the forms edit and the templates render.
///
/// Each section sits behind its own `Arc`, so a mutation that rewrites one
/// section shares every other section with the previous snapshot. Missing
/// sections deserialize to their empty defaults; the document is never
/// partially defined.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PortfolioDocument {
    pub hero: Arc<Hero>,
    pub about: Arc<About>,
    pub skills: Arc<Vec<Skill>>,
    pub projects: Arc<Vec<Project>>,
    pub experience: Arc<Vec<Experience>>,
    pub education: Arc<Vec<Education>>,
    pub certifications: Arc<Vec<Certification>>,
    pub contact: Arc<Contact>,
    pub color_scheme: Arc<ColorScheme>,
    pub theme: Theme,
}

impl PortfolioDocument {
    /// Ensures every list element has an id unique within its list.
    /// Returns true when any id had to be replaced.
    pub fn repair_ids(&mut self) -> bool {
        let mut repaired = false;
        if needs_repair(&self.about.strengths) {
            repaired |= repair_ids(&mut Arc::make_mut(&mut self.about).strengths);
        }
        repaired |= repair_list(&mut self.skills);
        repaired |= repair_list(&mut self.projects);
        repaired |= repair_list(&mut self.experience);
        repaired |= repair_list(&mut self.education);
        repaired |= repair_list(&mut self.certifications);
        repaired
    }
}

fn repair_list<T: crate::models::ListEntry>(items: &mut Arc<Vec<T>>) -> bool {
    needs_repair(items) && repair_ids(Arc::make_mut(items).as_mut_slice())
}

/// Checks without cloning so untouched sections keep their identity.
fn needs_repair<T: crate::models::ListEntry>(items: &[T]) -> bool {
    let mut seen = std::collections::HashSet::new();
    items
        .iter()
        .any(|item| item.id().is_empty() || !seen.insert(item.id()))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Hero {
    pub full_name: String,
    pub tagline: String,
    pub short_bio: String,
    /// Empty, or a `data:image/...;base64,` URI.
    pub photo: String,
    pub hero_background: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct About {
    pub headline: String,
    pub story: String,
    pub strengths: Vec<Strength>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub location: String,
    pub github: String,
    pub linkedin: String,
    pub twitter: String,
    pub website: String,
    pub message: String,
}

impl Contact {
    /// The social profile links, keyed by their field name.
    pub fn social_links(&self) -> [(&'static str, &str); 4] {
        [
            ("github", &self.github),
            ("linkedin", &self.linkedin),
            ("twitter", &self.twitter),
            ("website", &self.website),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColorScheme {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        COLOR_PRESETS[0].scheme()
    }
}

/// A named colour scheme offered by the colour picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPreset {
    pub name: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
}

impl ColorPreset {
    pub fn scheme(&self) -> ColorScheme {
        ColorScheme {
            primary: self.primary.to_string(),
            secondary: self.secondary.to_string(),
            accent: self.accent.to_string(),
        }
    }

    pub fn find(name: &str) -> Option<&'static ColorPreset> {
        COLOR_PRESETS
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
    }

    /// The preset whose three colours equal `scheme`, if any.
    pub fn matching(scheme: &ColorScheme) -> Option<&'static ColorPreset> {
        COLOR_PRESETS.iter().find(|p| {
            p.primary == scheme.primary
                && p.secondary == scheme.secondary
                && p.accent == scheme.accent
        })
    }
}

pub const COLOR_PRESETS: &[ColorPreset] = &[
    ColorPreset {
        name: "Classic Blue",
        primary: "#3b82f6",
        secondary: "#1e293b",
        accent: "#10b981",
    },
    ColorPreset {
        name: "Professional Purple",
        primary: "#8b5cf6",
        secondary: "#1e1b4b",
        accent: "#f59e0b",
    },
    ColorPreset {
        name: "Modern Teal",
        primary: "#14b8a6",
        secondary: "#0f172a",
        accent: "#ec4899",
    },
    ColorPreset {
        name: "Elegant Navy",
        primary: "#1e40af",
        secondary: "#172554",
        accent: "#06b6d4",
    },
    ColorPreset {
        name: "Bold Red",
        primary: "#ef4444",
        secondary: "#18181b",
        accent: "#fbbf24",
    },
    ColorPreset {
        name: "Fresh Green",
        primary: "#22c55e",
        secondary: "#052e16",
        accent: "#a855f7",
    },
];

/// Visual theme of the rendered portfolio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Creative,
}

impl Theme {
    pub fn display_name(self) -> &'static str {
        match self {
            Theme::Light => "Light Minimalist",
            Theme::Dark => "Dark Modern",
            Theme::Creative => "Creative Gradient",
        }
    }
}
