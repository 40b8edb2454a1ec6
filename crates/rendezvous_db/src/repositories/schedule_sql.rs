//! SQL implementation of the schedule repository
//!
//! Dates are stored as `YYYY-MM-DD` text and times as `HH:MM:SS` text, which
//! keeps lexical and chronological order identical and sidesteps the date
//! types `sqlx::Any` cannot decode.

use crate::client::DbTransaction;
use crate::error::DbError;
use crate::repositories::schedule::{OverlapQuery, ScheduleRepository};
use crate::DbClient;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rendezvous_common::models::{
    hhmm, AvailabilitySlot, MeetingAssignment, NewAvailabilitySlot, NewParty, Party, PartyKind,
    RecordId, ResolvedSelection, ScheduledMeeting, Selection, UnscheduledMeeting,
};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS availability_slots (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        timezone_label TEXT NOT NULL,
        date TEXT NOT NULL,
        start_time TEXT NOT NULL,
        end_time TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_availability_slots_timezone ON availability_slots (timezone_label)",
    r#"
    CREATE TABLE IF NOT EXISTS investors (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        company TEXT NOT NULL,
        timezone_label TEXT NOT NULL,
        email TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS portfolio_companies (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        company TEXT NOT NULL,
        timezone_label TEXT NOT NULL,
        email TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS selections (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        investor_id INTEGER NOT NULL,
        portfolio_company_id INTEGER NOT NULL,
        UNIQUE (investor_id, portfolio_company_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS scheduled_meetings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        selection_id INTEGER NOT NULL,
        portfolio_company_id INTEGER NOT NULL,
        investor_id INTEGER NOT NULL,
        date TEXT NOT NULL,
        start_time TEXT NOT NULL,
        end_time TEXT NOT NULL,
        duration_minutes INTEGER NOT NULL,
        created_at TEXT,
        updated_at TEXT
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_scheduled_meetings_date ON scheduled_meetings (date)",
    r#"
    CREATE TABLE IF NOT EXISTS unscheduled_meetings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        selection_id INTEGER NOT NULL,
        portfolio_company_id INTEGER NOT NULL,
        investor_id INTEGER NOT NULL,
        date TEXT NOT NULL,
        start_time TEXT NOT NULL,
        end_time TEXT NOT NULL,
        duration_minutes INTEGER NOT NULL,
        created_at TEXT,
        updated_at TEXT
    )
    "#,
];

const MEETING_COLUMNS: &str = "id, selection_id, portfolio_company_id, investor_id, date, \
     start_time, end_time, duration_minutes, created_at, updated_at";

const SLOT_COLUMNS: &str = "id, timezone_label, date, start_time, end_time";

const PARTY_COLUMNS: &str = "id, name, company, timezone_label, email";

fn party_table(kind: PartyKind) -> &'static str {
    match kind {
        PartyKind::Investor => "investors",
        PartyKind::PortfolioCompany => "portfolio_companies",
    }
}

fn selection_column(kind: PartyKind) -> &'static str {
    match kind {
        PartyKind::Investor => "investor_id",
        PartyKind::PortfolioCompany => "portfolio_company_id",
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// Fixed width keeps the lexical comparisons in the overlap query correct.
fn format_time(time: NaiveTime) -> String {
    time.format(hhmm::FORMAT_WITH_SECONDS).to_string()
}

fn parse_date(raw: &str) -> Result<NaiveDate, DbError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| DbError::DecodeError(format!("invalid date '{}': {}", raw, e)))
}

fn parse_time(raw: &str) -> Result<NaiveTime, DbError> {
    hhmm::parse(raw).map_err(|e| DbError::DecodeError(format!("invalid time '{}': {}", raw, e)))
}

fn parse_timestamp(raw: Option<String>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn slot_from_row(row: &AnyRow) -> Result<AvailabilitySlot, DbError> {
    Ok(AvailabilitySlot {
        id: row.try_get("id")?,
        timezone_label: row.try_get("timezone_label")?,
        date: parse_date(&row.try_get::<String, _>("date")?)?,
        start_time: parse_time(&row.try_get::<String, _>("start_time")?)?,
        end_time: parse_time(&row.try_get::<String, _>("end_time")?)?,
    })
}

fn party_from_row(row: &AnyRow) -> Result<Party, DbError> {
    Ok(Party {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        company: row.try_get("company")?,
        timezone_label: row.try_get("timezone_label")?,
        email: row.try_get("email")?,
    })
}

fn resolved_selection_from_row(row: &AnyRow) -> Result<ResolvedSelection, DbError> {
    Ok(ResolvedSelection {
        selection_id: row.try_get("selection_id")?,
        investor_id: row.try_get("investor_id")?,
        portfolio_company_id: row.try_get("portfolio_company_id")?,
        investor_timezone: row.try_get("investor_timezone")?,
        portfolio_company_timezone: row.try_get("portfolio_company_timezone")?,
    })
}

/// Decoded meeting row: id, assignment and both timestamps.
type MeetingRow = (
    RecordId,
    MeetingAssignment,
    Option<DateTime<Utc>>,
    Option<DateTime<Utc>>,
);

fn meeting_from_row(row: &AnyRow) -> Result<MeetingRow, DbError> {
    let assignment = MeetingAssignment {
        selection_id: row.try_get("selection_id")?,
        portfolio_company_id: row.try_get("portfolio_company_id")?,
        investor_id: row.try_get("investor_id")?,
        date: parse_date(&row.try_get::<String, _>("date")?)?,
        start_time: parse_time(&row.try_get::<String, _>("start_time")?)?,
        end_time: parse_time(&row.try_get::<String, _>("end_time")?)?,
        duration_minutes: row.try_get("duration_minutes")?,
    };
    Ok((
        row.try_get("id")?,
        assignment,
        parse_timestamp(row.try_get("created_at")?),
        parse_timestamp(row.try_get("updated_at")?),
    ))
}

fn scheduled_from_row(row: &AnyRow) -> Result<ScheduledMeeting, DbError> {
    let (id, assignment, created_at, updated_at) = meeting_from_row(row)?;
    Ok(ScheduledMeeting {
        id,
        assignment,
        created_at,
        updated_at,
    })
}

fn unscheduled_from_row(row: &AnyRow) -> Result<UnscheduledMeeting, DbError> {
    let (id, assignment, created_at, updated_at) = meeting_from_row(row)?;
    Ok(UnscheduledMeeting {
        id,
        assignment,
        created_at,
        updated_at,
    })
}

async fn insert_assignment(
    tx: &mut DbTransaction<'_>,
    table: &str,
    meeting: &MeetingAssignment,
    stamp: &str,
) -> Result<RecordId, DbError> {
    let query = format!(
        "INSERT INTO {} (selection_id, portfolio_company_id, investor_id, date, start_time, \
         end_time, duration_minutes, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING id",
        table
    );
    let row = sqlx::query(&query)
        .bind(meeting.selection_id)
        .bind(meeting.portfolio_company_id)
        .bind(meeting.investor_id)
        .bind(format_date(meeting.date))
        .bind(format_time(meeting.start_time))
        .bind(format_time(meeting.end_time))
        .bind(meeting.duration_minutes)
        .bind(stamp)
        .bind(stamp)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            error!("Failed to insert into {}: {}", table, e);
            DbError::QueryError(e.to_string())
        })?;
    Ok(row.try_get("id")?)
}

/// SQL implementation of the schedule repository
#[derive(Debug, Clone)]
pub struct SqlScheduleRepository {
    db_client: DbClient,
}

impl SqlScheduleRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    async fn fetch_slots(&self, timezone_label: Option<&str>) -> Result<Vec<AvailabilitySlot>, DbError> {
        let rows = match timezone_label {
            Some(label) => {
                let query = format!(
                    "SELECT {} FROM availability_slots WHERE timezone_label = $1 ORDER BY id",
                    SLOT_COLUMNS
                );
                sqlx::query(&query)
                    .bind(label)
                    .fetch_all(self.db_client.pool())
                    .await
            }
            None => {
                let query = format!("SELECT {} FROM availability_slots ORDER BY id", SLOT_COLUMNS);
                sqlx::query(&query).fetch_all(self.db_client.pool()).await
            }
        }
        .map_err(|e| {
            error!("Failed to list availability slots: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        rows.iter().map(slot_from_row).collect()
    }

    async fn fetch_resolved(&self, selection_id: Option<RecordId>) -> Result<Vec<ResolvedSelection>, DbError> {
        let mut query = String::from(
            "SELECT s.id AS selection_id, s.investor_id, s.portfolio_company_id, \
             i.timezone_label AS investor_timezone, p.timezone_label AS portfolio_company_timezone \
             FROM selections s \
             JOIN investors i ON i.id = s.investor_id \
             JOIN portfolio_companies p ON p.id = s.portfolio_company_id",
        );
        if selection_id.is_some() {
            query.push_str(" WHERE s.id = $1");
        }
        query.push_str(" ORDER BY s.id");

        let mut q = sqlx::query(&query);
        if let Some(id) = selection_id {
            q = q.bind(id);
        }
        let rows = q.fetch_all(self.db_client.pool()).await.map_err(|e| {
            error!("Failed to resolve selections: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        rows.iter().map(resolved_selection_from_row).collect()
    }
}

impl ScheduleRepository for SqlScheduleRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing schedule schema");
        for statement in SCHEMA {
            self.db_client.execute(statement).await?;
        }
        info!("Schedule schema initialized successfully");
        Ok(())
    }

    async fn insert_slots(&self, slots: Vec<NewAvailabilitySlot>) -> Result<Vec<AvailabilitySlot>, DbError> {
        debug!("Inserting {} availability slots", slots.len());
        let mut tx = self.db_client.begin().await?;
        let mut inserted = Vec::with_capacity(slots.len());
        for slot in slots {
            let row = sqlx::query(
                "INSERT INTO availability_slots (timezone_label, date, start_time, end_time) \
                 VALUES ($1, $2, $3, $4) RETURNING id",
            )
            .bind(&slot.timezone_label)
            .bind(format_date(slot.date))
            .bind(format_time(slot.start_time))
            .bind(format_time(slot.end_time))
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                error!("Failed to insert availability slot: {}", e);
                DbError::QueryError(e.to_string())
            })?;
            inserted.push(AvailabilitySlot {
                id: row.try_get("id")?,
                timezone_label: slot.timezone_label,
                date: slot.date,
                start_time: slot.start_time,
                end_time: slot.end_time,
            });
        }
        tx.commit().await?;
        Ok(inserted)
    }

    async fn list_slots(&self) -> Result<Vec<AvailabilitySlot>, DbError> {
        self.fetch_slots(None).await
    }

    async fn list_slots_by_timezone(&self, timezone_label: &str) -> Result<Vec<AvailabilitySlot>, DbError> {
        self.fetch_slots(Some(timezone_label)).await
    }

    async fn insert_party(&self, kind: PartyKind, party: NewParty) -> Result<Party, DbError> {
        let table = party_table(kind);
        debug!("Inserting into {}: {}", table, party.name);
        let query = format!(
            "INSERT INTO {} (name, company, timezone_label, email) VALUES ($1, $2, $3, $4) RETURNING id",
            table
        );
        let row = sqlx::query(&query)
            .bind(&party.name)
            .bind(&party.company)
            .bind(&party.timezone_label)
            .bind(&party.email)
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to insert into {}: {}", table, e);
                DbError::QueryError(e.to_string())
            })?;
        Ok(Party {
            id: row.try_get("id")?,
            name: party.name,
            company: party.company,
            timezone_label: party.timezone_label,
            email: party.email,
        })
    }

    async fn list_parties(&self, kind: PartyKind) -> Result<Vec<Party>, DbError> {
        let query = format!("SELECT {} FROM {} ORDER BY id", PARTY_COLUMNS, party_table(kind));
        let rows = sqlx::query(&query)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;
        rows.iter().map(party_from_row).collect()
    }

    async fn delete_party(&self, kind: PartyKind, id: RecordId) -> Result<bool, DbError> {
        let table = party_table(kind);
        let column = selection_column(kind);
        debug!("Deleting {} {} with its selections", table, id);

        let mut tx = self.db_client.begin().await?;
        for meetings in ["scheduled_meetings", "unscheduled_meetings"] {
            let query = format!(
                "DELETE FROM {} WHERE selection_id IN (SELECT id FROM selections WHERE {} = $1)",
                meetings, column
            );
            sqlx::query(&query).bind(id).execute(&mut *tx).await?;
        }
        let query = format!("DELETE FROM selections WHERE {} = $1", column);
        sqlx::query(&query).bind(id).execute(&mut *tx).await?;
        let query = format!("DELETE FROM {} WHERE id = $1", table);
        let result = sqlx::query(&query).bind(id).execute(&mut *tx).await?;
        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_selections(&self, pairs: Vec<(RecordId, RecordId)>) -> Result<usize, DbError> {
        debug!("Inserting up to {} selections", pairs.len());
        let mut tx = self.db_client.begin().await?;
        let mut created = 0usize;
        for (investor_id, portfolio_company_id) in pairs {
            let result = sqlx::query(
                "INSERT INTO selections (investor_id, portfolio_company_id) VALUES ($1, $2) \
                 ON CONFLICT (investor_id, portfolio_company_id) DO NOTHING",
            )
            .bind(investor_id)
            .bind(portfolio_company_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!("Failed to insert selection: {}", e);
                DbError::QueryError(e.to_string())
            })?;
            created += result.rows_affected() as usize;
        }
        tx.commit().await?;
        Ok(created)
    }

    async fn list_selections(&self) -> Result<Vec<Selection>, DbError> {
        let rows = sqlx::query("SELECT id, investor_id, portfolio_company_id FROM selections ORDER BY id")
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;
        rows.iter()
            .map(|row| {
                Ok::<_, DbError>(Selection {
                    id: row.try_get("id")?,
                    investor_id: row.try_get("investor_id")?,
                    portfolio_company_id: row.try_get("portfolio_company_id")?,
                })
            })
            .collect()
    }

    async fn list_resolved_selections(&self) -> Result<Vec<ResolvedSelection>, DbError> {
        self.fetch_resolved(None).await
    }

    async fn find_resolved_selection(&self, selection_id: RecordId) -> Result<Option<ResolvedSelection>, DbError> {
        Ok(self.fetch_resolved(Some(selection_id)).await?.into_iter().next())
    }

    async fn replace_schedule(
        &self,
        confirmed: Vec<MeetingAssignment>,
        rejected: Vec<MeetingAssignment>,
    ) -> Result<(Vec<ScheduledMeeting>, Vec<UnscheduledMeeting>), DbError> {
        debug!(
            "Replacing schedule: {} confirmed, {} rejected",
            confirmed.len(),
            rejected.len()
        );
        let now = Utc::now();
        let stamp = now.to_rfc3339();

        // Dropping the transaction on any early return rolls it back.
        let mut tx = self.db_client.begin().await?;
        sqlx::query("DELETE FROM scheduled_meetings").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM unscheduled_meetings").execute(&mut *tx).await?;
        sqlx::query(
            "DELETE FROM sqlite_sequence WHERE name IN ('scheduled_meetings', 'unscheduled_meetings')",
        )
        .execute(&mut *tx)
        .await?;

        let mut scheduled = Vec::with_capacity(confirmed.len());
        for assignment in confirmed {
            let id = insert_assignment(&mut tx, "scheduled_meetings", &assignment, &stamp).await?;
            scheduled.push(ScheduledMeeting {
                id,
                assignment,
                created_at: Some(now),
                updated_at: Some(now),
            });
        }

        let mut unscheduled = Vec::with_capacity(rejected.len());
        for assignment in rejected {
            let id = insert_assignment(&mut tx, "unscheduled_meetings", &assignment, &stamp).await?;
            unscheduled.push(UnscheduledMeeting {
                id,
                assignment,
                created_at: Some(now),
                updated_at: Some(now),
            });
        }

        tx.commit().await.map_err(|e| {
            error!("Failed to commit schedule replacement: {}", e);
            DbError::TransactionError(e.to_string())
        })?;

        info!(
            "Schedule replaced: {} scheduled, {} unscheduled",
            scheduled.len(),
            unscheduled.len()
        );
        Ok((scheduled, unscheduled))
    }

    async fn list_scheduled_meetings(&self) -> Result<Vec<ScheduledMeeting>, DbError> {
        let query = format!("SELECT {} FROM scheduled_meetings ORDER BY id", MEETING_COLUMNS);
        let rows = sqlx::query(&query)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;
        rows.iter().map(scheduled_from_row).collect()
    }

    async fn list_unscheduled_meetings(&self) -> Result<Vec<UnscheduledMeeting>, DbError> {
        let query = format!("SELECT {} FROM unscheduled_meetings ORDER BY id", MEETING_COLUMNS);
        let rows = sqlx::query(&query)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;
        rows.iter().map(unscheduled_from_row).collect()
    }

    async fn find_overlapping_meetings(&self, query: OverlapQuery) -> Result<Vec<ScheduledMeeting>, DbError> {
        // Placeholders are numbered in the order they are appended.
        let mut sql = format!(
            "SELECT {} FROM scheduled_meetings \
             WHERE date = $1 AND (investor_id = $2 OR portfolio_company_id = $3)",
            MEETING_COLUMNS
        );
        let mut next = 4;
        if query.window.is_some() {
            sql.push_str(&format!(" AND start_time < ${} AND ${} < end_time", next, next + 1));
            next += 2;
        }
        if query.exclude_selection_id.is_some() {
            sql.push_str(&format!(" AND selection_id <> ${}", next));
            next += 1;
        }
        if query.exclude_meeting_id.is_some() {
            sql.push_str(&format!(" AND id <> ${}", next));
        }
        sql.push_str(" ORDER BY id");

        let mut q = sqlx::query(&sql)
            .bind(format_date(query.date))
            .bind(query.investor_id)
            .bind(query.portfolio_company_id);
        if let Some(window) = query.window {
            q = q
                .bind(format_time(window.end_time))
                .bind(format_time(window.start_time));
        }
        if let Some(selection_id) = query.exclude_selection_id {
            q = q.bind(selection_id);
        }
        if let Some(meeting_id) = query.exclude_meeting_id {
            q = q.bind(meeting_id);
        }

        let rows = q.fetch_all(self.db_client.pool()).await.map_err(|e| {
            error!("Failed to query overlapping meetings: {}", e);
            DbError::QueryError(e.to_string())
        })?;
        rows.iter().map(scheduled_from_row).collect()
    }

    async fn insert_meeting(&self, meeting: MeetingAssignment) -> Result<ScheduledMeeting, DbError> {
        let now = Utc::now();
        let mut tx = self.db_client.begin().await?;
        let id = insert_assignment(&mut tx, "scheduled_meetings", &meeting, &now.to_rfc3339()).await?;
        tx.commit().await?;
        Ok(ScheduledMeeting {
            id,
            assignment: meeting,
            created_at: Some(now),
            updated_at: Some(now),
        })
    }

    async fn update_meeting(
        &self,
        id: RecordId,
        meeting: MeetingAssignment,
    ) -> Result<Option<ScheduledMeeting>, DbError> {
        let result = sqlx::query(
            "UPDATE scheduled_meetings SET selection_id = $1, portfolio_company_id = $2, \
             investor_id = $3, date = $4, start_time = $5, end_time = $6, duration_minutes = $7, \
             updated_at = $8 WHERE id = $9",
        )
        .bind(meeting.selection_id)
        .bind(meeting.portfolio_company_id)
        .bind(meeting.investor_id)
        .bind(format_date(meeting.date))
        .bind(format_time(meeting.start_time))
        .bind(format_time(meeting.end_time))
        .bind(meeting.duration_minutes)
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to update meeting {}: {}", id, e);
            DbError::QueryError(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_meeting(id).await
    }

    async fn find_meeting(&self, id: RecordId) -> Result<Option<ScheduledMeeting>, DbError> {
        let query = format!("SELECT {} FROM scheduled_meetings WHERE id = $1", MEETING_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;
        row.as_ref().map(scheduled_from_row).transpose()
    }

    async fn delete_meeting(&self, id: RecordId) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM scheduled_meetings WHERE id = $1")
            .bind(id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to delete meeting {}: {}", id, e);
                DbError::QueryError(e.to_string())
            })?;
        Ok(result.rows_affected() > 0)
    }
}
