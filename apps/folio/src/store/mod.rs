//! The portfolio data store: single owner of the document.
//!
//! Every read goes through [`PortfolioStore::document`], which hands out an
//! immutable snapshot. Every write replaces the snapshot with a new one that
//! shares all untouched sections, then notifies subscribers. A write that
//! changes nothing notifies nobody.

use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::{Map, Value};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::errors::{PersistError, StoreError};
use crate::models::entries::repair_ids;
use crate::models::{
    About, ColorPreset, EditorSelection, EditorStep, ItemId, PortfolioDocument, TemplateId, Theme,
};
use crate::persistence;
use crate::storage::PortfolioStorage;

pub mod patch;
pub mod sections;

use patch::{merge, replace, ListOp};
pub use sections::{ListSection, RecordSection, Section};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "portfolioData";

pub struct PortfolioStore {
    storage: Arc<dyn PortfolioStorage>,
    key: String,
    document: watch::Sender<Arc<PortfolioDocument>>,
    selection: watch::Sender<EditorSelection>,
    /// Snapshot last written to (or read from) storage.
    saved: Mutex<Option<Arc<PortfolioDocument>>>,
}

impl PortfolioStore {
    /// Loads the persisted document under `key`. A missing, unreadable or
    /// corrupt blob falls back to the starter document; the failure is
    /// logged and never returned.
    pub fn open(storage: Arc<dyn PortfolioStorage>, key: impl Into<String>) -> Self {
        let key = key.into();
        let document = match storage.get_item(&key) {
            Ok(Some(raw)) => match persistence::decode(&raw) {
                Ok(document) => {
                    info!("Loaded saved portfolio from '{key}'");
                    document
                }
                Err(e) => {
                    warn!("Error loading saved portfolio from '{key}': {e}; using starter portfolio");
                    PortfolioDocument::starter()
                }
            },
            Ok(None) => {
                info!("No saved portfolio under '{key}'; using starter portfolio");
                PortfolioDocument::starter()
            }
            Err(e) => {
                warn!("Error reading portfolio storage '{key}': {e}; using starter portfolio");
                PortfolioDocument::starter()
            }
        };
        Self::with_document(storage, key, document)
    }

    /// Starts from `document` without touching storage.
    pub fn with_document(
        storage: Arc<dyn PortfolioStorage>,
        key: impl Into<String>,
        mut document: PortfolioDocument,
    ) -> Self {
        document.repair_ids();
        let document = Arc::new(document);
        let saved = Mutex::new(Some(Arc::clone(&document)));
        let (document, _) = watch::channel(document);
        let (selection, _) = watch::channel(EditorSelection::default());
        Self {
            storage,
            key: key.into(),
            document,
            selection,
            saved,
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// The current snapshot. Cheap: clones an `Arc`.
    pub fn document(&self) -> Arc<PortfolioDocument> {
        Arc::clone(&self.document.borrow())
    }

    /// Receives every committed document.
    pub fn subscribe(&self) -> watch::Receiver<Arc<PortfolioDocument>> {
        self.document.subscribe()
    }

    /// Replaces one member of a record section. The empty field name is not
    /// a member of anything: whole-section writes go through
    /// [`PortfolioStore::update_section`].
    pub fn update_field(
        &self,
        section: RecordSection,
        field: &str,
        value: Value,
    ) -> Result<bool, StoreError> {
        let mut patch = Map::new();
        patch.insert(field.to_string(), value);
        let name = section.as_str();

        let changed = self.commit(|current| {
            let mut next = current.clone();
            match section {
                RecordSection::Hero => next.hero = Arc::new(merge(&*current.hero, &patch, &[], name)?),
                RecordSection::About => {
                    let mut about = merge(&*current.about, &patch, &[], name)?;
                    repair_ids(&mut about.strengths);
                    next.about = Arc::new(about);
                }
                RecordSection::Contact => {
                    next.contact = Arc::new(merge(&*current.contact, &patch, &[], name)?)
                }
                RecordSection::ColorScheme => {
                    next.color_scheme = Arc::new(merge(&*current.color_scheme, &patch, &[], name)?)
                }
            }
            Ok((next != *current).then_some(next))
        })?;
        if changed {
            debug!("Updated {name}.{field}");
        }
        Ok(changed)
    }

    /// Replaces a whole section. List elements without an id, or repeating
    /// an earlier element's id, get a fresh one.
    pub fn update_section(&self, section: Section, value: Value) -> Result<bool, StoreError> {
        let changed = match section {
            Section::List(list) => self.edit_list(list, ListOp::Replace { value: &value })?,
            Section::Record(record) => {
                let name = record.as_str();
                self.commit(|current| {
                    let mut next = current.clone();
                    match record {
                        RecordSection::Hero => next.hero = Arc::new(replace(&value, name)?),
                        RecordSection::About => {
                            let mut about: About = replace(&value, name)?;
                            repair_ids(&mut about.strengths);
                            next.about = Arc::new(about);
                        }
                        RecordSection::Contact => next.contact = Arc::new(replace(&value, name)?),
                        RecordSection::ColorScheme => {
                            next.color_scheme = Arc::new(replace(&value, name)?)
                        }
                    }
                    Ok((next != *current).then_some(next))
                })?
            }
        };
        if changed {
            debug!("Replaced section {section}");
        }
        Ok(changed)
    }

    /// Merges `fields` into the element `id` of `section`. An unknown id is
    /// a silent no-op (`Ok(false)`); the `id` member of `fields` is ignored.
    pub fn update_array_item(
        &self,
        section: ListSection,
        id: &ItemId,
        fields: &Map<String, Value>,
    ) -> Result<bool, StoreError> {
        self.edit_list(section, ListOp::Update { id, fields })
    }

    /// Appends a new element built from `fields` and returns its fresh id.
    /// Members absent from `fields` take their empty defaults.
    pub fn add_array_item(
        &self,
        section: ListSection,
        fields: &Map<String, Value>,
    ) -> Result<ItemId, StoreError> {
        let id = ItemId::generate();
        self.edit_list(
            section,
            ListOp::Append {
                id: id.clone(),
                fields,
            },
        )?;
        debug!("Added {id} to {section}");
        Ok(id)
    }

    /// Removes the element `id`; removing an absent id changes nothing.
    pub fn remove_array_item(&self, section: ListSection, id: &ItemId) -> bool {
        let removed = matches!(self.edit_list(section, ListOp::Remove { id }), Ok(true));
        if removed {
            debug!("Removed {id} from {section}");
        }
        removed
    }

    pub fn set_theme(&self, theme: Theme) -> bool {
        self.commit(|current| {
            Ok((current.theme != theme).then(|| PortfolioDocument {
                theme,
                ..current.clone()
            }))
        })
        .unwrap_or(false)
    }

    pub fn apply_color_preset(&self, name: &str) -> Result<bool, StoreError> {
        let preset =
            ColorPreset::find(name).ok_or_else(|| StoreError::UnknownPreset(name.to_string()))?;
        let scheme = serde_json::to_value(preset.scheme()).map_err(|source| {
            StoreError::InvalidValue {
                section: RecordSection::ColorScheme.to_string(),
                source,
            }
        })?;
        self.update_section(RecordSection::ColorScheme.into(), scheme)
    }

    /// Writes the current document to storage. Never panics; failures are
    /// logged and reported as `false`.
    pub fn save_portfolio(&self) -> bool {
        match self.try_save() {
            Ok(()) => {
                debug!("Saved portfolio to '{}'", self.key);
                true
            }
            Err(e) => {
                warn!("Error saving portfolio to '{}': {e}", self.key);
                false
            }
        }
    }

    pub fn try_save(&self) -> Result<(), PersistError> {
        let document = self.document();
        let raw = persistence::encode(&document)?;
        self.storage.set_item(&self.key, &raw)?;
        *self.saved() = Some(document);
        Ok(())
    }

    /// True when the current document differs from the last one saved.
    /// Read synchronously, so an edit made just now is always seen.
    pub fn has_unsaved_changes(&self) -> bool {
        let current = self.document();
        !matches!(&*self.saved(), Some(saved) if Arc::ptr_eq(saved, &current))
    }

    fn saved(&self) -> MutexGuard<'_, Option<Arc<PortfolioDocument>>> {
        self.saved.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Back to the starter document; the persisted copy is removed.
    pub fn reset_portfolio(&self) {
        self.document
            .send_replace(Arc::new(PortfolioDocument::starter()));
        *self.saved() = None;
        match self.storage.remove_item(&self.key) {
            Ok(()) => info!("Portfolio reset; cleared '{}'", self.key),
            Err(e) => warn!("Portfolio reset, but clearing '{}' failed: {e}", self.key),
        }
    }

    pub fn selection(&self) -> EditorSelection {
        *self.selection.borrow()
    }

    pub fn subscribe_selection(&self) -> watch::Receiver<EditorSelection> {
        self.selection.subscribe()
    }

    pub fn set_selected_template(&self, template: TemplateId) -> bool {
        self.select(|s| s.template = template)
    }

    pub fn set_full_preview(&self, enabled: bool) -> bool {
        self.select(|s| s.full_preview = enabled)
    }

    pub fn set_current_step(&self, step: EditorStep) -> bool {
        self.select(|s| s.current_step = step)
    }

    fn select(&self, edit: impl FnOnce(&mut EditorSelection)) -> bool {
        self.selection.send_if_modified(|selection| {
            let before = *selection;
            edit(selection);
            *selection != before
        })
    }

    fn edit_list(&self, section: ListSection, op: ListOp<'_>) -> Result<bool, StoreError> {
        let name = section.as_str();
        self.commit(|current| {
            let mut next = current.clone();
            let changed = match section {
                ListSection::Skills => op.apply(&mut next.skills, name)?,
                ListSection::Projects => op.apply(&mut next.projects, name)?,
                ListSection::Experience => op.apply(&mut next.experience, name)?,
                ListSection::Education => op.apply(&mut next.education, name)?,
                ListSection::Certifications => op.apply(&mut next.certifications, name)?,
                ListSection::Strengths => {
                    let mut strengths = Arc::new(current.about.strengths.clone());
                    let changed = op.apply(&mut strengths, name)?;
                    if changed {
                        Arc::make_mut(&mut next.about).strengths =
                            Arc::try_unwrap(strengths).unwrap_or_else(|shared| (*shared).clone());
                    }
                    changed
                }
            };
            Ok(changed.then_some(next))
        })
    }

    /// Runs `edit` against the current snapshot under the channel's lock.
    /// `Ok(Some(next))` publishes `next`; `Ok(None)` and errors publish
    /// nothing.
    fn commit<F>(&self, edit: F) -> Result<bool, StoreError>
    where
        F: FnOnce(&PortfolioDocument) -> Result<Option<PortfolioDocument>, StoreError>,
    {
        let mut outcome = Ok(false);
        self.document.send_if_modified(|current| match edit(&**current) {
            Ok(Some(next)) => {
                *current = Arc::new(next);
                outcome = Ok(true);
                true
            }
            Ok(None) => false,
            Err(e) => {
                outcome = Err(e);
                false
            }
        });
        outcome
    }
}
