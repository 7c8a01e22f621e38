// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::VecDeque;

use crate::notice::{DELETE_FAILED, DELETED, DISABLED, SUCCESS};
use crate::{
    CallFailure, ControllerState, DisableAffordance, PayloadMode, SortKey, SupplierBackend,
    SupplierId, SupplierPayload, SupplierRecord, build_list_query, build_search_query,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Retrieve,
    Delete,
    Disable(SupplierId),
    Search,
    List(SortKey),
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPurpose {
    /// Results also load the first row into the form.
    Search,
    /// Results replace the table; the sort becomes current once they land.
    Refresh(SortKey),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Create(SupplierPayload),
    Update(SupplierId, SupplierPayload),
    Retrieve(SupplierId),
    Delete(SupplierId),
    Disable(SupplierId),
    List { query: String, purpose: ListPurpose },
}

impl ApiCall {
    pub fn execute(&self, backend: &dyn SupplierBackend) -> Result<CallOutcome, CallFailure> {
        match self {
            Self::Create(payload) => backend.create_supplier(payload).map(CallOutcome::Record),
            Self::Update(id, payload) => backend
                .update_supplier(*id, payload)
                .map(CallOutcome::Record),
            Self::Retrieve(id) => backend.get_supplier(*id).map(CallOutcome::Record),
            Self::Delete(id) => backend.delete_supplier(*id).map(|()| CallOutcome::Done),
            Self::Disable(id) => backend
                .disable_supplier(*id)
                .map(|record| record.map_or(CallOutcome::Done, CallOutcome::Record)),
            Self::List { query, .. } => backend.list_suppliers(query).map(CallOutcome::Records),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List { .. })
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Create(_) => "POST /suppliers".to_owned(),
            Self::Update(id, _) => format!("PUT /suppliers/{id}"),
            Self::Retrieve(id) => format!("GET /suppliers/{id}"),
            Self::Delete(id) => format!("DELETE /suppliers/{id}"),
            Self::Disable(id) => format!("PUT /suppliers/{id}/unavailable"),
            Self::List { query, .. } => format!("GET /suppliers?{query}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    Record(SupplierRecord),
    Records(Vec<SupplierRecord>),
    Done,
}

/// A backend call the controller wants issued, tagged with its sequence
/// number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCall {
    pub seq: u64,
    pub call: ApiCall,
}

impl ControllerState {
    /// Starts `operation`. Returns the calls to issue; nothing is sent here.
    pub fn dispatch(&mut self, operation: Operation) -> Vec<PendingCall> {
        tracing::debug!(?operation, "dispatch");
        match operation {
            Operation::Create => {
                let payload = self.form.read_payload(PayloadMode::Create);
                vec![self.issue(ApiCall::Create(payload))]
            }
            Operation::Update => {
                let Some(id) = self.require_id() else {
                    return Vec::new();
                };
                let payload = self.form.read_payload(PayloadMode::Update);
                vec![self.issue(ApiCall::Update(id, payload))]
            }
            Operation::Retrieve => match self.require_id() {
                Some(id) => vec![self.issue(ApiCall::Retrieve(id))],
                None => Vec::new(),
            },
            Operation::Delete => match self.require_id() {
                Some(id) => vec![self.issue(ApiCall::Delete(id))],
                None => Vec::new(),
            },
            Operation::Disable(id) => vec![self.issue(ApiCall::Disable(id))],
            Operation::Search => {
                let query = build_search_query(&self.form);
                vec![self.issue(ApiCall::List {
                    query,
                    purpose: ListPurpose::Search,
                })]
            }
            Operation::List(sort) => vec![self.issue(ApiCall::List {
                query: build_list_query(Some(sort)),
                purpose: ListPurpose::Refresh(sort),
            })],
            Operation::Clear => {
                self.form.clear_all();
                vec![self.refresh()]
            }
        }
    }

    /// Delegated handler for every row's disable control.
    pub fn request_disable(&mut self, affordance: &DisableAffordance) -> Vec<PendingCall> {
        match self.table.activate(affordance) {
            Some(id) => self.dispatch(Operation::Disable(id)),
            None => {
                tracing::debug!(
                    element = affordance.element_id(),
                    "ignoring disable control from an earlier render"
                );
                Vec::new()
            }
        }
    }

    /// Copies a rendered row into the form without a backend round trip.
    pub fn load_row(&mut self, index: usize) -> bool {
        let Some(row) = self.table.rows().get(index) else {
            return false;
        };
        let record = row.record.clone();
        self.form.project(Some(&record));
        true
    }

    /// Applies the response to `pending`. Returns follow-up calls.
    ///
    /// List responses older than the newest issued list call are dropped.
    /// Everything else lands in arrival order.
    pub fn complete(
        &mut self,
        pending: &PendingCall,
        result: Result<CallOutcome, CallFailure>,
    ) -> Vec<PendingCall> {
        if pending.call.is_list() && pending.seq < self.latest_list_seq {
            tracing::warn!(
                seq = pending.seq,
                latest = self.latest_list_seq,
                call = %pending.call.describe(),
                "discarding stale list response"
            );
            return Vec::new();
        }

        if let Err(failure) = &result {
            tracing::warn!(
                call = %pending.call.describe(),
                kind = ?failure.kind(),
                %failure,
                "backend call failed"
            );
        }

        match (&pending.call, result) {
            (ApiCall::Create(_) | ApiCall::Update(..), Ok(CallOutcome::Record(record))) => {
                tracing::info!(id = %record.id, call = %pending.call.describe(), "supplier saved");
                self.form.project(Some(&record));
                self.notices.info(SUCCESS);
                vec![self.refresh()]
            }
            (ApiCall::Retrieve(_), Ok(CallOutcome::Record(record))) => {
                self.form.project(Some(&record));
                self.notices.info(SUCCESS);
                Vec::new()
            }
            (ApiCall::Retrieve(_), Err(failure)) => {
                self.form.clear();
                self.notices.error(failure.message);
                Vec::new()
            }
            (ApiCall::Delete(id), Ok(_)) => {
                tracing::info!(%id, "supplier deleted");
                self.form.clear_all();
                self.notices.info(DELETED);
                vec![self.refresh()]
            }
            (ApiCall::Delete(_), Err(_)) => {
                self.notices.error(DELETE_FAILED);
                Vec::new()
            }
            (ApiCall::Disable(id), Ok(_)) => {
                tracing::info!(%id, "supplier disabled");
                self.form.clear();
                self.notices.info(DISABLED);
                vec![self.refresh()]
            }
            (
                ApiCall::List {
                    purpose: ListPurpose::Search,
                    ..
                },
                Ok(CallOutcome::Records(records)),
            ) => {
                let first = self.table.render(records).cloned();
                self.form.project(first.as_ref());
                self.notices.info(SUCCESS);
                Vec::new()
            }
            (
                ApiCall::List {
                    purpose: ListPurpose::Refresh(sort),
                    ..
                },
                Ok(CallOutcome::Records(records)),
            ) => {
                self.last_sort = *sort;
                self.table.render(records);
                Vec::new()
            }
            (_, Err(failure)) => {
                self.notices.error(failure.message);
                Vec::new()
            }
            (call, Ok(outcome)) => {
                tracing::warn!(call = %call.describe(), ?outcome, "unexpected response shape");
                self.notices
                    .error(format!("unexpected response to {}", call.describe()));
                Vec::new()
            }
        }
    }

    /// Runs `operation` and every follow-up against `backend` in order.
    pub fn drive(&mut self, operation: Operation, backend: &dyn SupplierBackend) {
        let mut queue = self.dispatch(operation).into_iter().collect::<VecDeque<_>>();
        while let Some(pending) = queue.pop_front() {
            let result = pending.call.execute(backend);
            queue.extend(self.complete(&pending, result));
        }
    }

    fn require_id(&mut self) -> Option<SupplierId> {
        match self.form.current_id() {
            Ok(id) => Some(id),
            Err(error) => {
                self.notices.error(error.to_string());
                None
            }
        }
    }

    /// List refresh after a mutation or clear: always the default sort.
    fn refresh(&mut self) -> PendingCall {
        self.issue(ApiCall::List {
            query: build_list_query(None),
            purpose: ListPurpose::Refresh(SortKey::default()),
        })
    }

    fn issue(&mut self, call: ApiCall) -> PendingCall {
        let seq = self.issue_seq();
        if call.is_list() {
            self.latest_list_seq = seq;
        }
        tracing::debug!(seq, call = %call.describe(), "issue");
        PendingCall { seq, call }
    }
}
