// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use sqlx::{SqliteConnection, SqlitePool};

use crate::contact::non_empty;
use crate::datetime::{format_stable, parse_stable};
use crate::{Alarm, Contact, Event};

#[derive(Debug, Clone)]
pub struct Events {
    pool: SqlitePool,
}

impl Events {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Lists every event in insertion order.
    pub async fn list(&self) -> Result<Vec<EventRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT title, start_at, end_at, note, place, alarm_due, alarm_sound,
       contact_name, contact_company, contact_email, contact_phone
FROM events
ORDER BY id ASC;
";

        sqlx::query_as(SQL).fetch_all(&self.pool).await
    }

    /// Deletes every event and inserts `records` in one transaction.
    pub async fn replace_all(&self, records: &[EventRecord]) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        Self::write_all(&mut *tx, records).await?;
        tx.commit().await
    }

    /// Deletes every event and inserts `records` on `conn`, which is expected
    /// to be inside a transaction.
    pub(crate) async fn write_all(
        conn: &mut SqliteConnection,
        records: &[EventRecord],
    ) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
INSERT INTO events (
    title, start_at, end_at, note, place, alarm_due, alarm_sound,
    contact_name, contact_company, contact_email, contact_phone
)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?);
";

        sqlx::query("DELETE FROM events;").execute(&mut *conn).await?;
        for record in records {
            sqlx::query(SQL)
                .bind(&record.title)
                .bind(&record.start_at)
                .bind(&record.end_at)
                .bind(&record.note)
                .bind(&record.place)
                .bind(&record.alarm_due)
                .bind(&record.alarm_sound)
                .bind(&record.contact_name)
                .bind(&record.contact_company)
                .bind(&record.contact_email)
                .bind(&record.contact_phone)
                .execute(&mut *conn)
                .await?;
        }
        Ok(())
    }
}

/// One row of the `events` table. Timestamps are stored as ISO 8601 text.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct EventRecord {
    pub title: String,
    pub start_at: String,
    pub end_at: String,
    pub note: Option<String>,
    pub place: Option<String>,
    pub alarm_due: Option<String>,
    pub alarm_sound: Option<String>,
    pub contact_name: Option<String>,
    pub contact_company: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

impl EventRecord {
    pub fn from_event(event: &Event) -> Self {
        let contact = event.contact.as_ref();
        Self {
            title: event.title.clone(),
            start_at: format_stable(&event.start),
            end_at: format_stable(&event.end),
            note: event.note.clone(),
            place: event.place.clone(),
            alarm_due: event.alarm.as_ref().map(|a| format_stable(&a.due)),
            alarm_sound: event.alarm.as_ref().map(|a| a.sound.clone()),
            contact_name: contact.map(|c| c.name.clone()),
            contact_company: contact.and_then(|c| c.company.clone()),
            contact_email: contact.and_then(|c| c.email.clone()),
            contact_phone: contact.and_then(|c| c.phone.clone()),
        }
    }

    /// Converts the row back into an event. Alarms stored without a sound
    /// get `default_sound`.
    pub fn into_event(self, default_sound: &str) -> Result<Event, String> {
        let start = parse_timestamp(&self.start_at)?;
        let end = parse_timestamp(&self.end_at)?;

        let alarm = match self.alarm_due {
            Some(due) => {
                let sound = self
                    .alarm_sound
                    .and_then(non_empty)
                    .unwrap_or_else(|| default_sound.to_string());
                Some(Alarm::new(parse_timestamp(&due)?, sound))
            }
            None => None,
        };

        let contact = self.contact_name.map(|name| Contact {
            name,
            company: self.contact_company,
            email: self.contact_email,
            phone: self.contact_phone,
        });

        Ok(Event {
            title: self.title,
            start,
            end,
            note: self.note,
            place: self.place,
            alarm,
            contact,
        })
    }
}

fn parse_timestamp(s: &str) -> Result<jiff::civil::DateTime, String> {
    parse_stable(s).map_err(|e| format!("invalid timestamp {s:?}: {e}"))
}
