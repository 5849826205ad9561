//! Inline images.
//!
//! Uploaded pictures live in the document as `data:` URIs, so the whole
//! portfolio stays a single self-contained blob.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::errors::StoreError;
use crate::models::ItemId;
use crate::store::{ListSection, PortfolioStore, RecordSection};

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
pub const MAX_PROJECT_IMAGES: usize = 5;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Image is {size} bytes; the limit is {max} bytes")]
    TooLarge { size: usize, max: usize },

    #[error("Unsupported image type '{0}'")]
    UnsupportedType(String),

    #[error("A project can hold at most {max} images")]
    TooManyImages { max: usize },

    #[error("Project '{0}' not found")]
    ProjectNotFound(ItemId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// `data:<mime>;base64,<payload>` for an image upload.
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> Result<String, MediaError> {
    let mime = mime.trim().to_ascii_lowercase();
    if !is_image_mime(&mime) {
        return Err(MediaError::UnsupportedType(mime));
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(MediaError::TooLarge {
            size: bytes.len(),
            max: MAX_IMAGE_BYTES,
        });
    }
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

/// True for `data:image/<subtype>;base64,<payload>` with a decodable payload.
pub fn is_data_uri(value: &str) -> bool {
    let Some(rest) = value.strip_prefix("data:") else {
        return false;
    };
    let Some((mime, payload)) = rest.split_once(";base64,") else {
        return false;
    };
    is_image_mime(mime) && STANDARD.decode(payload).is_ok()
}

fn is_image_mime(mime: &str) -> bool {
    match mime.strip_prefix("image/") {
        Some(subtype) => {
            !subtype.is_empty()
                && subtype
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

fn check_image(data_uri: &str) -> Result<(), MediaError> {
    if !is_data_uri(data_uri) {
        return Err(MediaError::UnsupportedType(
            data_uri.chars().take(32).collect(),
        ));
    }
    Ok(())
}

/// Appends `data_uri` to the project's gallery.
pub fn attach_project_image(
    store: &PortfolioStore,
    project: &ItemId,
    data_uri: &str,
) -> Result<(), MediaError> {
    check_image(data_uri)?;
    let document = store.document();
    let current = document
        .projects
        .iter()
        .find(|p| &p.id == project)
        .ok_or_else(|| MediaError::ProjectNotFound(project.clone()))?;
    if current.images.len() >= MAX_PROJECT_IMAGES {
        return Err(MediaError::TooManyImages {
            max: MAX_PROJECT_IMAGES,
        });
    }

    let mut images = current.images.clone();
    images.push(data_uri.to_string());
    store.update_array_item(ListSection::Projects, project, &images_patch(images))?;
    debug!("Attached image to project {project}");
    Ok(())
}

/// Removes the image at `index`; returns false when there is none.
pub fn remove_project_image(
    store: &PortfolioStore,
    project: &ItemId,
    index: usize,
) -> Result<bool, MediaError> {
    let document = store.document();
    let Some(current) = document.projects.iter().find(|p| &p.id == project) else {
        return Ok(false);
    };
    if index >= current.images.len() {
        return Ok(false);
    }
    let mut images = current.images.clone();
    images.remove(index);
    Ok(store.update_array_item(ListSection::Projects, project, &images_patch(images))?)
}

pub fn set_hero_photo(store: &PortfolioStore, data_uri: &str) -> Result<(), MediaError> {
    check_image(data_uri)?;
    store.update_field(RecordSection::Hero, "photo", json!(data_uri))?;
    Ok(())
}

pub fn clear_hero_photo(store: &PortfolioStore) -> Result<bool, MediaError> {
    Ok(store.update_field(RecordSection::Hero, "photo", json!(""))?)
}

fn images_patch(images: Vec<String>) -> Map<String, Value> {
    let mut patch = Map::new();
    patch.insert("images".to_string(), json!(images));
    patch
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::MemoryStorage;

    const PIXEL: &[u8] = b"\x89PNG\r\n\x1a\n";

    fn store() -> PortfolioStore {
        PortfolioStore::open(Arc::new(MemoryStorage::new()), "media")
    }

    #[test]
    fn test_encode_data_uri() {
        let uri = encode_data_uri("image/png", PIXEL).unwrap();
        assert_eq!(uri, "data:image/png;base64,iVBORw0KGgo=");
        assert!(is_data_uri(&uri));
    }

    #[test]
    fn test_encode_rejects_non_images_and_oversized_payloads() {
        assert!(matches!(
            encode_data_uri("application/pdf", PIXEL),
            Err(MediaError::UnsupportedType(_))
        ));
        let big = vec![0u8; MAX_IMAGE_BYTES + 1];
        assert!(matches!(
            encode_data_uri("image/jpeg", &big),
            Err(MediaError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_is_data_uri() {
        assert!(is_data_uri("data:image/svg+xml;base64,PHN2Zy8+"));
        assert!(!is_data_uri("https://example.com/a.png"));
        assert!(!is_data_uri("data:text/plain;base64,aGk="));
        assert!(!is_data_uri("data:image/png;base64,not base64!"));
    }

    #[test]
    fn test_project_image_limit() {
        let store = store();
        let project = store.document().projects[0].id.clone();
        let uri = encode_data_uri("image/png", PIXEL).unwrap();

        for _ in 0..MAX_PROJECT_IMAGES {
            attach_project_image(&store, &project, &uri).unwrap();
        }
        assert!(matches!(
            attach_project_image(&store, &project, &uri),
            Err(MediaError::TooManyImages { max: 5 })
        ));
        assert_eq!(store.document().projects[0].images.len(), MAX_PROJECT_IMAGES);

        assert!(remove_project_image(&store, &project, 0).unwrap());
        assert!(!remove_project_image(&store, &project, 99).unwrap());
        assert_eq!(store.document().projects[0].images.len(), 4);
    }

    #[test]
    fn test_attach_to_missing_project() {
        let store = store();
        let uri = encode_data_uri("image/gif", b"GIF89a").unwrap();
        assert!(matches!(
            attach_project_image(&store, &ItemId::from("nope"), &uri),
            Err(MediaError::ProjectNotFound(_))
        ));
    }

    #[test]
    fn test_hero_photo() {
        let store = store();
        let uri = encode_data_uri("image/webp", b"RIFF").unwrap();
        set_hero_photo(&store, &uri).unwrap();
        assert_eq!(store.document().hero.photo, uri);
        assert!(clear_hero_photo(&store).unwrap());
        assert!(store.document().hero.photo.is_empty());
        assert!(set_hero_photo(&store, "not an image").is_err());
    }
}
