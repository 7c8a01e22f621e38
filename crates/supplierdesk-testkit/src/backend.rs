// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use supplierdesk_app::{
    CallFailure, SortKey, SupplierBackend, SupplierId, SupplierPayload, SupplierRecord,
};
use url::form_urlencoded;

use crate::SupplierFaker;

#[derive(Debug, Default)]
struct FakeStore {
    suppliers: BTreeMap<SupplierId, SupplierRecord>,
    next_id: i64,
    calls: Vec<String>,
    injected: VecDeque<CallFailure>,
}

/// In-memory supplier service with the filter and sort rules of the real
/// backend: one filter per list request (name, then email, then address,
/// then available), otherwise `sort_by`, otherwise id order.
#[derive(Debug, Default)]
pub struct FakeBackend {
    store: Mutex<FakeStore>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(seed: u64, count: usize) -> Self {
        let backend = Self::new();
        let mut faker = SupplierFaker::new(seed);
        for _ in 0..count {
            backend.insert(faker.supplier());
        }
        backend
    }

    pub fn insert(&self, payload: SupplierPayload) -> SupplierRecord {
        let mut store = self.lock();
        store.next_id += 1;
        let record = payload.into_record(SupplierId::new(store.next_id));
        store.suppliers.insert(record.id, record.clone());
        record
    }

    /// The next call fails with `failure` instead of touching the store.
    pub fn fail_next(&self, failure: CallFailure) {
        self.lock().injected.push_back(failure);
    }

    /// Every call received so far, as `METHOD path`.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn record(&self, id: SupplierId) -> Option<SupplierRecord> {
        self.lock().suppliers.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().suppliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().suppliers.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, FakeStore> {
        match self.store.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn begin(&self, call: String) -> Result<MutexGuard<'_, FakeStore>, CallFailure> {
        let mut store = self.lock();
        store.calls.push(call);
        match store.injected.pop_front() {
            Some(failure) => Err(failure),
            None => Ok(store),
        }
    }
}

fn not_found(id: SupplierId) -> CallFailure {
    CallFailure::new(
        Some(404),
        format!("Supplier with id '{id}' was not found."),
    )
}

fn validate(payload: &SupplierPayload) -> Result<(), CallFailure> {
    for (field, value) in [
        ("name", &payload.name),
        ("email", &payload.email),
        ("address", &payload.address),
    ] {
        if value.is_empty() {
            return Err(CallFailure::new(
                Some(400),
                format!("Invalid Supplier: missing {field}"),
            ));
        }
    }
    Ok(())
}

impl SupplierBackend for FakeBackend {
    fn create_supplier(&self, payload: &SupplierPayload) -> Result<SupplierRecord, CallFailure> {
        let mut store = self.begin("POST /suppliers".to_owned())?;
        validate(payload)?;
        store.next_id += 1;
        let record = payload.clone().into_record(SupplierId::new(store.next_id));
        store.suppliers.insert(record.id, record.clone());
        Ok(record)
    }

    fn update_supplier(
        &self,
        id: SupplierId,
        payload: &SupplierPayload,
    ) -> Result<SupplierRecord, CallFailure> {
        let mut store = self.begin(format!("PUT /suppliers/{id}"))?;
        let Some(existing) = store.suppliers.get_mut(&id) else {
            return Err(not_found(id));
        };
        validate(payload)?;
        *existing = payload.clone().into_record(id);
        Ok(existing.clone())
    }

    fn disable_supplier(&self, id: SupplierId) -> Result<Option<SupplierRecord>, CallFailure> {
        let mut store = self.begin(format!("PUT /suppliers/{id}/unavailable"))?;
        let Some(existing) = store.suppliers.get_mut(&id) else {
            return Err(not_found(id));
        };
        existing.available = false;
        Ok(Some(existing.clone()))
    }

    fn get_supplier(&self, id: SupplierId) -> Result<SupplierRecord, CallFailure> {
        let store = self.begin(format!("GET /suppliers/{id}"))?;
        store.suppliers.get(&id).cloned().ok_or_else(|| not_found(id))
    }

    fn delete_supplier(&self, id: SupplierId) -> Result<(), CallFailure> {
        let mut store = self.begin(format!("DELETE /suppliers/{id}"))?;
        store.suppliers.remove(&id);
        Ok(())
    }

    fn list_suppliers(&self, query: &str) -> Result<Vec<SupplierRecord>, CallFailure> {
        let store = self.begin(format!("GET /suppliers?{query}"))?;
        let params = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect::<BTreeMap<String, String>>();
        let param = |key: &str| params.get(key).filter(|value| !value.is_empty());
        let all = store.suppliers.values().cloned();

        let mut records: Vec<SupplierRecord> = if let Some(name) = param("name") {
            all.filter(|record| &record.name == name).collect()
        } else if let Some(email) = param("email") {
            all.filter(|record| &record.email == email).collect()
        } else if let Some(address) = param("address") {
            all.filter(|record| &record.address == address).collect()
        } else if let Some(available) = param("available") {
            let wanted = available == "true";
            all.filter(|record| record.available == wanted).collect()
        } else {
            all.collect()
        };

        match param("sort_by").and_then(|key| SortKey::parse(key)) {
            Some(SortKey::Name) => records.sort_by(|a, b| a.name.cmp(&b.name)),
            Some(SortKey::Email) => records.sort_by(|a, b| a.email.cmp(&b.email)),
            Some(SortKey::Address) => records.sort_by(|a, b| a.address.cmp(&b.address)),
            Some(SortKey::Id) | None => {}
        }
        Ok(records)
    }
}
