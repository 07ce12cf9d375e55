//! Record-store connection settings, loaded from the environment.

use anyhow::Context;
use std::env;

#[derive(Debug, Clone)]
pub struct OdooConfig {
    pub url: String,
    pub db: String,
    pub username: String,
    pub password: String,
}

impl OdooConfig {
    /// Read `ODOO_URL`, `ODOO_DB`, `ODOO_USERNAME` and `ODOO_PASSWORD`.
    /// `.env` loading is the caller's responsibility (see `AppState`).
    pub fn from_env() -> anyhow::Result<Self> {
        let url = env::var("ODOO_URL").context("ODOO_URL must be set")?;
        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            db: env::var("ODOO_DB").context("ODOO_DB must be set")?,
            username: env::var("ODOO_USERNAME").context("ODOO_USERNAME must be set")?,
            password: env::var("ODOO_PASSWORD").context("ODOO_PASSWORD must be set")?,
        })
    }
}
