pub mod document;
pub mod entries;
pub mod selection;
mod starter;

pub use document::{
    About, ColorPreset, ColorScheme, Contact, Hero, PortfolioDocument, Theme, COLOR_PRESETS,
};
pub use entries::{
    Certification, Education, Experience, ItemId, ListEntry, Project, Skill, Strength,
};
pub use selection::{EditorSelection, EditorStep, TemplateId};
