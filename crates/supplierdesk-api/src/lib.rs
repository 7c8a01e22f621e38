// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use reqwest::StatusCode;
use reqwest::blocking::{Client as HttpClient, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use supplierdesk_app::{
    CallFailure, SupplierBackend, SupplierId, SupplierPayload, SupplierRecord,
};
use thiserror::Error;
use url::Url;

/// Failures talking to the supplier service.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("cannot reach {base_url} -- is the supplier service running? ({source})")]
    Connect {
        base_url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("decode {what}: {detail}")]
    Decode { what: &'static str, detail: String },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Connect { .. } | Self::Decode { .. } => None,
        }
    }
}

impl From<ApiError> for CallFailure {
    fn from(error: ApiError) -> Self {
        CallFailure::new(error.status(), error.to_string())
    }
}

/// Blocking client for the `/suppliers` REST resource.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            bail!("server.base_url must not be empty");
        }
        let parsed = Url::parse(&base_url)
            .with_context(|| format!("server.base_url {base_url:?} is not a valid URL"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!(
                "server.base_url must use http or https, got {:?}",
                parsed.scheme()
            );
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url,
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Issues one default list request. Used by `--check`.
    pub fn ping(&self) -> Result<usize> {
        let records = self
            .list("sort_by=id")
            .with_context(|| format!("list suppliers at {}", self.base_url))?;
        Ok(records.len())
    }

    pub fn create(&self, payload: &SupplierPayload) -> Result<SupplierRecord, ApiError> {
        let request = self.http.post(self.url("/suppliers")).json(payload);
        let response = self.send(request)?;
        decode(response, "created supplier")
    }

    pub fn update(
        &self,
        id: SupplierId,
        payload: &SupplierPayload,
    ) -> Result<SupplierRecord, ApiError> {
        let request = self
            .http
            .put(self.url(&format!("/suppliers/{id}")))
            .json(payload);
        let response = self.send(request)?;
        decode(response, "updated supplier")
    }

    /// Marks a supplier unavailable. The service answers with the record,
    /// but an empty body is accepted too.
    pub fn mark_unavailable(&self, id: SupplierId) -> Result<Option<SupplierRecord>, ApiError> {
        let request = self
            .http
            .put(self.url(&format!("/suppliers/{id}/unavailable")));
        let response = self.send(request)?;
        let body = response.text().map_err(|error| ApiError::Decode {
            what: "disabled supplier",
            detail: error.to_string(),
        })?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|error| ApiError::Decode {
                what: "disabled supplier",
                detail: error.to_string(),
            })
    }

    pub fn get(&self, id: SupplierId) -> Result<SupplierRecord, ApiError> {
        let request = self.http.get(self.url(&format!("/suppliers/{id}")));
        let response = self.send(request)?;
        decode(response, "supplier")
    }

    pub fn delete(&self, id: SupplierId) -> Result<(), ApiError> {
        let request = self.http.delete(self.url(&format!("/suppliers/{id}")));
        self.send(request)?;
        Ok(())
    }

    /// `query` is appended verbatim; it is expected to be encoded already.
    pub fn list(&self, query: &str) -> Result<Vec<SupplierRecord>, ApiError> {
        let path = if query.is_empty() {
            "/suppliers".to_owned()
        } else {
            format!("/suppliers?{query}")
        };
        let request = self.http.get(self.url(&path));
        let response = self.send(request)?;
        decode(response, "supplier list")
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().map_err(|source| ApiError::Connect {
            base_url: self.base_url.clone(),
            source,
        })?;

        let status = response.status();
        tracing::debug!(
            status = status.as_u16(),
            url = %response.url(),
            "supplier service responded"
        );
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(clean_error_response(status, &body));
        }
        Ok(response)
    }
}

impl SupplierBackend for Client {
    fn create_supplier(&self, payload: &SupplierPayload) -> Result<SupplierRecord, CallFailure> {
        Ok(self.create(payload)?)
    }

    fn update_supplier(
        &self,
        id: SupplierId,
        payload: &SupplierPayload,
    ) -> Result<SupplierRecord, CallFailure> {
        Ok(self.update(id, payload)?)
    }

    fn disable_supplier(&self, id: SupplierId) -> Result<Option<SupplierRecord>, CallFailure> {
        Ok(self.mark_unavailable(id)?)
    }

    fn get_supplier(&self, id: SupplierId) -> Result<SupplierRecord, CallFailure> {
        Ok(self.get(id)?)
    }

    fn delete_supplier(&self, id: SupplierId) -> Result<(), CallFailure> {
        Ok(self.delete(id)?)
    }

    fn list_suppliers(&self, query: &str) -> Result<Vec<SupplierRecord>, CallFailure> {
        Ok(self.list(query)?)
    }
}

fn decode<T: DeserializeOwned>(response: Response, what: &'static str) -> Result<T, ApiError> {
    response.json().map_err(|error| ApiError::Decode {
        what,
        detail: error.to_string(),
    })
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

fn clean_error_response(status: StatusCode, body: &str) -> ApiError {
    let status = status.as_u16();
    if let Ok(parsed) = serde_json::from_str::<ErrorEnvelope>(body) {
        if let Some(message) = parsed.message.filter(|message| !message.is_empty()) {
            return ApiError::Server { status, message };
        }
        if let Some(error) = parsed.error.filter(|error| !error.is_empty()) {
            return ApiError::Server {
                status,
                message: error,
            };
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() && trimmed.len() < 100 && !trimmed.contains('{') {
        return ApiError::Server {
            status,
            message: trimmed.to_owned(),
        };
    }

    ApiError::Server {
        status,
        message: format!("server returned {status}"),
    }
}
