//! Record-store boundary: an authenticated JSON-RPC client for an
//! Odoo-style HR business suite.
//!
//! The rest of the crate talks to the store through the [`RecordStore`]
//! trait so tests can substitute an in-memory implementation.

pub mod client;
pub mod config;
pub mod rpc;

pub use client::OdooClient;
pub use config::OdooConfig;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Unvalidated record as delivered by the external HR store.
///
/// Odoo encodes absent fields as `false` and relation fields as
/// `[id, "Display Label"]` arrays, so no shape is guaranteed here; callers
/// probe defensively via `crate::employee::record`.
pub type RawRecord = serde_json::Map<String, Value>;

/// Errors raised at the record-store boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("authentication with the record store was rejected")]
    Authentication,
    #[error("record store transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("record store fault: {0}")]
    Fault(String),
    #[error("unexpected record store response: {0}")]
    Protocol(String),
}

/// Query capability over the external HR store.
///
/// `domain` is an Odoo search domain, e.g.
/// `[["identification_id", "=", "1234"]]`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Return the ids of the records matching `domain`.
    async fn search(&self, model: &str, domain: Value) -> Result<Vec<i64>, StoreError>;

    /// Read `fields` for the given record ids.
    async fn read(&self, model: &str, ids: &[i64], fields: &[&str])
        -> Result<Vec<RawRecord>, StoreError>;

    /// Combined search + read with an optional result limit.
    async fn search_read(
        &self,
        model: &str,
        domain: Value,
        fields: &[&str],
        limit: Option<u32>,
    ) -> Result<Vec<RawRecord>, StoreError>;
}
