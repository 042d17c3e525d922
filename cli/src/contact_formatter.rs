// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;

use almanac_core::Contact;

use crate::table::{PaddingDirection, Table, TableColumn};
use crate::util::OutputFormat;

/// A contact together with its position in the store.
#[derive(Debug, Clone)]
pub struct ContactRow {
    pub index: usize,
    pub contact: Contact,
}

const COLUMNS: [ContactColumn; 5] = [
    ContactColumn::Index,
    ContactColumn::Name,
    ContactColumn::Company,
    ContactColumn::Email,
    ContactColumn::Phone,
];

pub fn format_contacts(contacts: &[ContactRow], format: OutputFormat) -> String {
    Table::new(format, &COLUMNS, contacts).to_string()
}

#[derive(Debug, Clone, Copy)]
pub enum ContactColumn {
    Index,
    Name,
    Company,
    Email,
    Phone,
}

impl TableColumn<ContactRow> for ContactColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            ContactColumn::Index => "index",
            ContactColumn::Name => "name",
            ContactColumn::Company => "company",
            ContactColumn::Email => "email",
            ContactColumn::Phone => "phone",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a ContactRow) -> Cow<'a, str> {
        let contact = &data.contact;
        let optional =
            |s: &'a Option<String>| -> Cow<'a, str> { s.as_deref().unwrap_or("").into() };
        match self {
            ContactColumn::Index => format!("#{}", data.index).into(),
            ContactColumn::Name => contact.name.as_str().into(),
            ContactColumn::Company => optional(&contact.company),
            ContactColumn::Email => optional(&contact.email),
            ContactColumn::Phone => optional(&contact.phone),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            ContactColumn::Index => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }
}
