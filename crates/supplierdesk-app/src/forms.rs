// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};

use crate::{Availability, SupplierId, SupplierPayload, SupplierRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Id,
    Name,
    Email,
    Address,
    PhoneNumber,
    Available,
}

impl FormField {
    pub const ALL: [Self; 6] = [
        Self::Id,
        Self::Name,
        Self::Email,
        Self::Address,
        Self::PhoneNumber,
        Self::Available,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Email => "email",
            Self::Address => "address",
            Self::PhoneNumber => "phone_number",
            Self::Available => "available",
        }
    }

    pub const fn is_text(self) -> bool {
        !matches!(self, Self::Available)
    }
}

/// How the phone field is read back. Create treats an empty phone as
/// absent; update sends whatever text is in the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadMode {
    Create,
    Update,
}

/// The editable form. Holds raw text exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SupplierForm {
    pub id: String,
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone_number: String,
    pub availability: Availability,
}

impl SupplierForm {
    /// Writes `record` into the fields. `None` leaves the form untouched.
    pub fn project(&mut self, record: Option<&SupplierRecord>) {
        let Some(record) = record else {
            return;
        };
        self.id = record.id.to_string();
        self.name = record.name.clone();
        self.email = record.email.clone();
        self.address = record.address.clone();
        self.phone_number = record.phone_number.clone().unwrap_or_default();
        self.availability = Availability::from_bool(record.available);
    }

    /// Resets the editable fields; the id is kept.
    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.address.clear();
        self.phone_number.clear();
        self.availability = Availability::Available;
    }

    /// Resets every field, id included.
    pub fn clear_all(&mut self) {
        self.id.clear();
        self.clear();
    }

    pub fn read_payload(&self, mode: PayloadMode) -> SupplierPayload {
        let phone_number = match mode {
            PayloadMode::Create if self.phone_number.is_empty() => None,
            PayloadMode::Create | PayloadMode::Update => Some(self.phone_number.clone()),
        };
        SupplierPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
            phone_number,
            available: self.availability.as_bool(),
            products: Vec::new(),
        }
    }

    pub fn current_id(&self) -> Result<SupplierId> {
        if self.id.trim().is_empty() {
            return Err(anyhow!(
                "supplier id is required; retrieve or create a supplier first"
            ));
        }
        self.id
            .parse::<SupplierId>()
            .map_err(|_| anyhow!("supplier id {:?} is not a number", self.id))
    }

    pub fn text(&self, field: FormField) -> String {
        match field {
            FormField::Id => self.id.clone(),
            FormField::Name => self.name.clone(),
            FormField::Email => self.email.clone(),
            FormField::Address => self.address.clone(),
            FormField::PhoneNumber => self.phone_number.clone(),
            FormField::Available => self.availability.as_bool().to_string(),
        }
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Id => Some(&mut self.id),
            FormField::Name => Some(&mut self.name),
            FormField::Email => Some(&mut self.email),
            FormField::Address => Some(&mut self.address),
            FormField::PhoneNumber => Some(&mut self.phone_number),
            FormField::Available => None,
        }
    }

    pub fn push_char(&mut self, field: FormField, value: char) {
        if let Some(text) = self.text_mut(field) {
            text.push(value);
        }
    }

    pub fn pop_char(&mut self, field: FormField) {
        if let Some(text) = self.text_mut(field) {
            text.pop();
        }
    }

    pub fn toggle_availability(&mut self) {
        self.availability = self.availability.toggled();
    }
}
