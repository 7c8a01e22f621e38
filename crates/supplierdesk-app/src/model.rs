// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::ids::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    Id,
    Name,
    Email,
    Address,
}

impl SortKey {
    pub const ALL: [Self; 4] = [Self::Id, Self::Name, Self::Email, Self::Address];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Email => "email",
            Self::Address => "address",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            "address" => Some(Self::Address),
            _ => None,
        }
    }
}

/// Two-state radio shared by create/update and search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Availability {
    #[default]
    Available,
    Unavailable,
}

impl Availability {
    pub const fn from_bool(available: bool) -> Self {
        if available {
            Self::Available
        } else {
            Self::Unavailable
        }
    }

    pub const fn as_bool(self) -> bool {
        matches!(self, Self::Available)
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Available => Self::Unavailable,
            Self::Unavailable => Self::Available,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Unavailable => "unavailable",
        }
    }
}

/// A supplier as the backend returns it.
///
/// Older backends omit `available` and `products` from responses, so both
/// fall back to their creation defaults. Products are owned by another
/// service and are never read back into the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierRecord {
    pub id: SupplierId,
    pub name: String,
    pub email: String,
    pub address: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default, skip_deserializing)]
    pub products: Vec<ProductId>,
}

impl SupplierRecord {
    pub fn payload(&self) -> SupplierPayload {
        SupplierPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
            phone_number: self.phone_number.clone(),
            available: self.available,
            products: Vec::new(),
        }
    }
}

/// Request body for create and update: a full record without its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierPayload {
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone_number: Option<String>,
    pub available: bool,
    #[serde(default)]
    pub products: Vec<ProductId>,
}

impl SupplierPayload {
    pub fn into_record(self, id: SupplierId) -> SupplierRecord {
        SupplierRecord {
            id,
            name: self.name,
            email: self.email,
            address: self.address,
            phone_number: self.phone_number,
            available: self.available,
            products: self.products,
        }
    }
}

const fn default_available() -> bool {
    true
}
