// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use sqlx::{SqliteConnection, SqlitePool};

use crate::Contact;

#[derive(Debug, Clone)]
pub struct Contacts {
    pool: SqlitePool,
}

impl Contacts {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<ContactRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT name, company, email, phone
FROM contacts
ORDER BY id ASC;
";

        sqlx::query_as(SQL).fetch_all(&self.pool).await
    }

    /// Deletes every contact and inserts `records` in one transaction.
    pub async fn replace_all(&self, records: &[ContactRecord]) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        Self::write_all(&mut *tx, records).await?;
        tx.commit().await
    }

    pub(crate) async fn write_all(
        conn: &mut SqliteConnection,
        records: &[ContactRecord],
    ) -> Result<(), sqlx::Error> {
        const SQL: &str = "INSERT INTO contacts (name, company, email, phone) VALUES (?, ?, ?, ?);";

        sqlx::query("DELETE FROM contacts;")
            .execute(&mut *conn)
            .await?;
        for record in records {
            sqlx::query(SQL)
                .bind(&record.name)
                .bind(&record.company)
                .bind(&record.email)
                .bind(&record.phone)
                .execute(&mut *conn)
                .await?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ContactRecord {
    pub name: String,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ContactRecord {
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            company: contact.company.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
        }
    }

    pub fn into_contact(self) -> Contact {
        Contact {
            name: self.name,
            company: self.company,
            email: self.email,
            phone: self.phone,
        }
    }
}
