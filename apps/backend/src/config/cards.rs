//! Card template loading.
//!
//! The catalog is read once at startup. Any problem with the file is logged
//! and the built-in placeholder catalog is used instead, so the server always
//! starts with something playable.

use std::fs;
use std::path::Path;

use tracing::{error, info, warn};

use crate::domain::cards::CardTemplate;
use crate::domain::catalog::CardCatalog;
use crate::error::AppError;

/// Parse a JSON array of templates into a non-empty catalog.
pub fn parse_card_catalog(raw: &str) -> Result<CardCatalog, AppError> {
    let templates: Vec<CardTemplate> = serde_json::from_str(raw)
        .map_err(|e| AppError::config(format!("card templates are not valid JSON: {e}")))?;
    CardCatalog::new(templates).map_err(|e| AppError::config(e.to_string()))
}

pub fn load_card_catalog(path: &Path) -> CardCatalog {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            error!(
                path = %path.display(),
                error = %err,
                "Card templates unreadable, using placeholder catalog"
            );
            return CardCatalog::placeholder();
        }
    };

    match parse_card_catalog(&raw) {
        Ok(catalog) => {
            info!(path = %path.display(), templates = catalog.len(), "Card templates loaded");
            catalog
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "Card templates invalid, using placeholder catalog"
            );
            CardCatalog::placeholder()
        }
    }
}
