// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{SupplierId, SupplierRecord};

const AFFORDANCE_PREFIX: &str = "disable-";
const AFFORDANCE_SUFFIX: &str = "-btn";

pub const COLUMNS: [&str; 6] = ["id", "name", "email", "address", "phone_number", "available"];

/// Handle to the "Disable" control of one rendered row.
///
/// Carries the render generation it was created in, so a handle kept
/// across a redraw no longer resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisableAffordance {
    generation: u64,
    element_id: String,
}

impl DisableAffordance {
    fn new(generation: u64, id: SupplierId) -> Self {
        Self {
            generation,
            element_id: format!("{AFFORDANCE_PREFIX}{id}{AFFORDANCE_SUFFIX}"),
        }
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    fn supplier_id(&self) -> Option<SupplierId> {
        self.element_id
            .strip_prefix(AFFORDANCE_PREFIX)?
            .strip_suffix(AFFORDANCE_SUFFIX)?
            .parse()
            .ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub record: SupplierRecord,
    pub disable: Option<DisableAffordance>,
}

impl TableRow {
    pub fn cells(&self) -> [String; 6] {
        [
            self.record.id.to_string(),
            self.record.name.clone(),
            self.record.email.clone(),
            self.record.address.clone(),
            self.record.phone_number.clone().unwrap_or_default(),
            self.record.available.to_string(),
        ]
    }

    pub fn is_unavailable(&self) -> bool {
        !self.record.available
    }
}

/// The result list. Every render replaces all rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultTable {
    rows: Vec<TableRow>,
    generation: u64,
}

impl ResultTable {
    /// Replaces the rows with `records` in the order given and returns the
    /// first record, if any.
    pub fn render(&mut self, records: Vec<SupplierRecord>) -> Option<&SupplierRecord> {
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        self.rows = records
            .into_iter()
            .map(|record| {
                let disable = record
                    .available
                    .then(|| DisableAffordance::new(generation, record.id));
                TableRow { record, disable }
            })
            .collect();
        tracing::debug!(rows = self.rows.len(), generation, "rendered result table");
        self.rows.first().map(|row| &row.record)
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn affordance(&self, row: usize) -> Option<&DisableAffordance> {
        self.rows.get(row)?.disable.as_ref()
    }

    /// Single delegated handler for every disable control in the table.
    /// Resolves only affordances that belong to the current render.
    pub fn activate(&self, affordance: &DisableAffordance) -> Option<SupplierId> {
        if affordance.generation != self.generation {
            return None;
        }
        let id = affordance.supplier_id()?;
        self.rows
            .iter()
            .filter_map(|row| row.disable.as_ref())
            .any(|current| current == affordance)
            .then_some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::{DisableAffordance, ResultTable};
    use crate::{SupplierId, SupplierRecord};

    fn record(id: i64, available: bool) -> SupplierRecord {
        SupplierRecord {
            id: SupplierId::new(id),
            name: format!("Supplier {id}"),
            email: format!("s{id}@x.com"),
            address: format!("{id} Rd"),
            phone_number: None,
            available,
            products: Vec::new(),
        }
    }

    #[test]
    fn render_keeps_backend_order_and_returns_first() {
        let mut table = ResultTable::default();
        let first = table
            .render(vec![record(5, true), record(2, false), record(9, true)])
            .map(|record| record.id);

        assert_eq!(first, Some(SupplierId::new(5)));
        let ids = table
            .rows()
            .iter()
            .map(|row| row.record.id.get())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![5, 2, 9]);
    }

    #[test]
    fn affordances_exist_only_for_available_rows() {
        let mut table = ResultTable::default();
        table.render(vec![record(1, true), record(2, false), record(3, true)]);

        assert!(table.affordance(0).is_some());
        assert!(table.affordance(1).is_none());
        assert!(table.rows()[1].is_unavailable());
        assert!(table.affordance(2).is_some());
        assert_eq!(
            table.affordance(2).map(DisableAffordance::element_id),
            Some("disable-3-btn")
        );
    }

    #[test]
    fn activating_row_affordance_yields_that_rows_id() {
        let mut table = ResultTable::default();
        let records = vec![record(4, true), record(8, false), record(15, true)];
        table.render(records.clone());

        for (index, record) in records.iter().enumerate() {
            let resolved = table
                .affordance(index)
                .and_then(|affordance| table.activate(affordance));
            let expected = record.available.then_some(record.id);
            assert_eq!(resolved, expected, "row {index}");
        }
    }

    #[test]
    fn affordances_from_previous_render_no_longer_fire() {
        let mut table = ResultTable::default();
        table.render(vec![record(1, true), record(2, true)]);
        let stale = table.affordance(0).cloned().expect("row 0 is available");

        table.render(vec![record(1, true), record(3, true)]);
        assert_eq!(table.activate(&stale), None);

        let fresh = table.affordance(0).cloned().expect("row 0 is available");
        assert_eq!(table.activate(&fresh), Some(SupplierId::new(1)));
    }

    #[test]
    fn empty_render_clears_rows() {
        let mut table = ResultTable::default();
        table.render(vec![record(1, true)]);
        assert!(table.render(Vec::new()).is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn absent_phone_renders_empty_cell() {
        let mut table = ResultTable::default();
        table.render(vec![record(1, false)]);
        let cells = table.rows()[0].cells();
        assert_eq!(cells[4], "");
        assert_eq!(cells[5], "false");
    }
}
