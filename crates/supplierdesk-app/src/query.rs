// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use url::form_urlencoded::byte_serialize;

use crate::{SortKey, SupplierForm};

pub fn build_list_query(sort: Option<SortKey>) -> String {
    format!("sort_by={}", sort.unwrap_or_default().as_str())
}

/// Filters on every non-empty text field. `available` always comes last
/// and reflects the form's availability toggle.
pub fn build_search_query(form: &SupplierForm) -> String {
    let filters = [
        ("name", form.name.as_str()),
        ("email", form.email.as_str()),
        ("address", form.address.as_str()),
        ("phone_number", form.phone_number.as_str()),
    ];

    let mut params = filters
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{key}={}", encode(value)))
        .collect::<Vec<_>>();
    params.push(format!("available={}", form.availability.as_bool()));
    params.join("&")
}

fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}
