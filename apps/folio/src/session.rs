//! An editing session: the store plus its auto-save, driven by commands.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::autosave::{AutoSave, AutoSaveOptions, SaveStatus};
use crate::commands::EditorCommand;
use crate::config::Config;
use crate::errors::CommandError;
use crate::media;
use crate::models::ColorPreset;
use crate::storage::{FileStorage, PortfolioStorage};
use crate::store::PortfolioStore;
use crate::validation::validate_document;

pub struct Session {
    store: Arc<PortfolioStore>,
    autosave: AutoSave,
}

impl Session {
    /// Must be called inside a tokio runtime.
    pub fn open(config: &Config) -> Result<Self> {
        let storage = FileStorage::new(&config.data_dir).with_context(|| {
            format!("Failed to open data directory {}", config.data_dir.display())
        })?;
        info!("Portfolio data directory: {}", storage.dir().display());
        Ok(Self::with_storage(
            Arc::new(storage),
            &config.storage_key,
            config.autosave_options(),
        ))
    }

    pub fn with_storage(
        storage: Arc<dyn PortfolioStorage>,
        key: &str,
        options: AutoSaveOptions,
    ) -> Self {
        let store = Arc::new(PortfolioStore::open(storage, key));
        let saver = Arc::clone(&store);
        let autosave = AutoSave::spawn(store.subscribe(), move || saver.save_portfolio(), options);
        Self { store, autosave }
    }

    pub fn store(&self) -> &PortfolioStore {
        &self.store
    }

    pub fn save_status(&self) -> SaveStatus {
        self.autosave.status()
    }

    pub fn apply(&self, command: EditorCommand) -> Result<Value, CommandError> {
        let store = &self.store;
        let reply = match command {
            EditorCommand::UpdateField { section, field, value } => {
                changed(store.update_field(section, &field, value)?)
            }
            EditorCommand::UpdateSection { section, value } => {
                changed(store.update_section(section, value)?)
            }
            EditorCommand::UpdateItem { section, id, fields } => {
                changed(store.update_array_item(section, &id, &fields)?)
            }
            EditorCommand::AddItem { section, fields } => {
                let id = store.add_array_item(section, &fields)?;
                json!({ "ok": true, "id": id })
            }
            EditorCommand::RemoveItem { section, id } => {
                changed(store.remove_array_item(section, &id))
            }
            EditorCommand::AttachImage { project, image } => {
                media::attach_project_image(store, &project, &image)?;
                changed(true)
            }
            EditorCommand::RemoveImage { project, index } => {
                changed(media::remove_project_image(store, &project, index)?)
            }
            EditorCommand::SetPhoto { image } => {
                media::set_hero_photo(store, &image)?;
                changed(true)
            }
            EditorCommand::ClearPhoto => changed(media::clear_hero_photo(store)?),
            EditorCommand::SetTheme { theme } => changed(store.set_theme(theme)),
            EditorCommand::ApplyColorPreset { name } => {
                changed(store.apply_color_preset(&name)?)
            }
            EditorCommand::SelectTemplate { template } => {
                changed(store.set_selected_template(template))
            }
            EditorCommand::SetFullPreview { enabled } => changed(store.set_full_preview(enabled)),
            EditorCommand::SetStep { step } => changed(store.set_current_step(step)),
            EditorCommand::Save => {
                if !store.save_portfolio() {
                    return Err(CommandError::SaveFailed);
                }
                json!({ "ok": true })
            }
            EditorCommand::Reset => {
                store.reset_portfolio();
                json!({ "ok": true })
            }
            EditorCommand::Validate => {
                json!({ "ok": true, "report": validate_document(&store.document()) })
            }
            EditorCommand::Status => {
                let status = self.save_status();
                let selection = store.selection();
                let document = store.document();
                json!({
                    "ok": true,
                    "pending": status.pending,
                    "saving": status.saving,
                    "lastSaved": status.last_saved,
                    "label": status.label(Utc::now()),
                    "unsaved": store.has_unsaved_changes(),
                    "selection": selection,
                    "template": {
                        "name": selection.template.display_name(),
                        "description": selection.template.description(),
                    },
                    "step": {
                        "label": selection.current_step.label(),
                        "next": selection.current_step.next(),
                    },
                    "theme": document.theme.display_name(),
                    "colorPreset": ColorPreset::matching(&document.color_scheme).map(|p| p.name),
                })
            }
            EditorCommand::Show => json!({ "ok": true, "document": &*store.document() }),
        };
        Ok(reply)
    }

    /// Parses and applies one command line. Failures become error replies.
    pub fn handle_line(&self, line: &str) -> Value {
        let result = serde_json::from_str::<EditorCommand>(line)
            .map_err(CommandError::from)
            .and_then(|command| {
                debug!("Applying {command:?}");
                self.apply(command)
            });
        match result {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Command rejected: {e}");
                e.into_reply()
            }
        }
    }

    /// Stops auto-save. Edits not yet written are saved immediately.
    pub fn shutdown(self) -> bool {
        self.autosave.shutdown();
        if self.store.has_unsaved_changes() {
            info!("Flushing unsaved changes");
            return self.store.save_portfolio();
        }
        true
    }
}

fn changed(changed: bool) -> Value {
    json!({ "ok": true, "changed": changed })
}
