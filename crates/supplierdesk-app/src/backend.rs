// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::fmt;

use crate::{SupplierId, SupplierPayload, SupplierRecord};

/// Backend-reported failure classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Validation,
    NotFound,
    Server,
}

/// A failed backend call. `message` is shown to the operator verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallFailure {
    pub status: Option<u16>,
    pub message: String,
}

impl CallFailure {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self.status {
            Some(400) => FailureKind::Validation,
            Some(404) => FailureKind::NotFound,
            _ => FailureKind::Server,
        }
    }
}

impl fmt::Display for CallFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} ({status})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for CallFailure {}

/// The supplier REST resource.
pub trait SupplierBackend {
    fn create_supplier(&self, payload: &SupplierPayload) -> Result<SupplierRecord, CallFailure>;
    fn update_supplier(
        &self,
        id: SupplierId,
        payload: &SupplierPayload,
    ) -> Result<SupplierRecord, CallFailure>;
    /// Some backends answer with an empty body.
    fn disable_supplier(&self, id: SupplierId) -> Result<Option<SupplierRecord>, CallFailure>;
    fn get_supplier(&self, id: SupplierId) -> Result<SupplierRecord, CallFailure>;
    fn delete_supplier(&self, id: SupplierId) -> Result<(), CallFailure>;
    fn list_suppliers(&self, query: &str) -> Result<Vec<SupplierRecord>, CallFailure>;
}

#[cfg(test)]
mod tests {
    use super::{CallFailure, FailureKind};

    #[test]
    fn failure_kind_follows_status() {
        assert_eq!(
            CallFailure::new(Some(400), "missing name").kind(),
            FailureKind::Validation
        );
        assert_eq!(
            CallFailure::new(Some(404), "gone").kind(),
            FailureKind::NotFound
        );
        assert_eq!(
            CallFailure::new(Some(503), "busy").kind(),
            FailureKind::Server
        );
        assert_eq!(
            CallFailure::new(None, "cannot reach").kind(),
            FailureKind::Server
        );
    }

    #[test]
    fn display_includes_status_when_known() {
        assert_eq!(CallFailure::new(Some(404), "gone").to_string(), "gone (404)");
        assert_eq!(CallFailure::new(None, "offline").to_string(), "offline");
    }
}
