//! Authenticated Odoo JSON-RPC client.
//!
//! One client is constructed at process start and injected through
//! `AppState`; the authenticated uid is cached for the process lifetime and
//! re-established only when absent.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Mutex;

use super::config::OdooConfig;
use super::rpc::{RpcRequest, RpcResponse};
use super::{RawRecord, RecordStore, StoreError};

pub struct OdooClient {
    http: reqwest::Client,
    config: OdooConfig,
    // Held across the authenticate round trip, hence the tokio mutex.
    session: Mutex<Option<i64>>,
    next_id: AtomicU64,
}

impl OdooClient {
    pub fn new(config: OdooConfig) -> Self {
        let http = reqwest::Client::builder()
            .pool_idle_timeout(std::time::Duration::from_secs(900))
            .user_agent("hr-letters-server/1.0")
            .build()
            .expect("Failed to create reqwest client");

        Self {
            http,
            config,
            session: Mutex::new(None),
            next_id: AtomicU64::new(1),
        }
    }

    async fn call(&self, service: &str, method: &str, args: Value) -> Result<Value, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest::call(service, method, args, id);
        let endpoint = format!("{}/jsonrpc", self.config.url);

        let response = self
            .http
            .post(&endpoint)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        let body: RpcResponse = response.json().await?;

        if let Some(fault) = body.error {
            return Err(StoreError::Fault(fault.description()));
        }
        body.result.ok_or_else(|| {
            StoreError::Protocol("response carried neither result nor error".to_string())
        })
    }

    /// Authenticated uid, established on first use and reused afterwards.
    async fn uid(&self) -> Result<i64, StoreError> {
        let mut session = self.session.lock().await;
        if let Some(uid) = *session {
            return Ok(uid);
        }

        let result = self
            .call(
                "common",
                "authenticate",
                json!([
                    self.config.db,
                    self.config.username,
                    self.config.password,
                    {}
                ]),
            )
            .await?;

        // Odoo answers `false` instead of a uid when credentials are bad.
        let uid = result.as_i64().ok_or(StoreError::Authentication)?;
        log::info!("authenticated with the record store as uid {uid}");
        *session = Some(uid);
        Ok(uid)
    }

    async fn execute_kw(
        &self,
        model: &str,
        method: &str,
        args: Value,
        kwargs: Value,
    ) -> Result<Value, StoreError> {
        let uid = self.uid().await?;
        self.call(
            "object",
            "execute_kw",
            json!([
                self.config.db,
                uid,
                self.config.password,
                model,
                method,
                args,
                kwargs
            ]),
        )
        .await
    }
}

fn into_records(model: &str, value: Value) -> Result<Vec<RawRecord>, StoreError> {
    let items = value.as_array().cloned().ok_or_else(|| {
        StoreError::Protocol(format!("{model}: expected a record list, got a scalar"))
    })?;
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(record) => Ok(record),
            other => Err(StoreError::Protocol(format!(
                "{model}: expected a record object, got {other}"
            ))),
        })
        .collect()
}

#[async_trait]
impl RecordStore for OdooClient {
    async fn search(&self, model: &str, domain: Value) -> Result<Vec<i64>, StoreError> {
        let result = self
            .execute_kw(model, "search", json!([domain]), json!({}))
            .await?;
        let ids = result.as_array().cloned().ok_or_else(|| {
            StoreError::Protocol(format!("{model}: search returned a non-list result"))
        })?;
        Ok(ids.iter().filter_map(Value::as_i64).collect())
    }

    async fn read(
        &self,
        model: &str,
        ids: &[i64],
        fields: &[&str],
    ) -> Result<Vec<RawRecord>, StoreError> {
        let result = self
            .execute_kw(model, "read", json!([ids]), json!({ "fields": fields }))
            .await?;
        into_records(model, result)
    }

    async fn search_read(
        &self,
        model: &str,
        domain: Value,
        fields: &[&str],
        limit: Option<u32>,
    ) -> Result<Vec<RawRecord>, StoreError> {
        let mut kwargs = json!({ "fields": fields });
        if let Some(limit) = limit {
            kwargs["limit"] = json!(limit);
        }
        let result = self
            .execute_kw(model, "search_read", json!([domain]), kwargs)
            .await?;
        into_records(model, result)
    }
}
