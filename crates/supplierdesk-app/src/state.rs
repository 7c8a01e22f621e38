// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Notifications, ResultTable, SortKey, SupplierForm};

/// Everything the controller owns: the form, the result table and the
/// status line, plus the bookkeeping used to order list responses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControllerState {
    pub form: SupplierForm,
    pub table: ResultTable,
    pub notices: Notifications,
    pub last_sort: SortKey,
    pub(crate) next_seq: u64,
    pub(crate) latest_list_seq: u64,
}

impl ControllerState {
    pub(crate) fn issue_seq(&mut self) -> u64 {
        self.next_seq = self.next_seq.saturating_add(1);
        self.next_seq
    }
}
