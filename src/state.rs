//! Shared application state.
//!
//! The Odoo client is the only resource that outlives a request (its
//! authenticated session is cached inside it). It is constructed once at
//! process start and injected here rather than living in a global.

use std::sync::Arc;

use crate::letter::{LetterGenerator, TemplateStore};
use crate::odoo::{OdooClient, OdooConfig, RecordStore};

pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub generator: LetterGenerator,
}

impl AppState {
    /// Build the state from the environment (`.env` is honored).
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = OdooConfig::from_env()?;
        let store: Arc<dyn RecordStore> = Arc::new(OdooClient::new(config));
        Ok(Self {
            store,
            generator: LetterGenerator::new(TemplateStore::from_env()),
        })
    }

    /// Assemble state from parts; the seam tests use to swap in a stub store.
    pub fn with_parts(store: Arc<dyn RecordStore>, templates: TemplateStore) -> Self {
        Self {
            store,
            generator: LetterGenerator::new(templates),
        }
    }
}
