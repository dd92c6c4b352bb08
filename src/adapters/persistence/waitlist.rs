use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    entities::{Interest, NewWaitlistEntry, Stage, WaitlistEntry},
    use_cases::waitlist::WaitlistRepo,
};

// Waitlist entry as stored in the db.
#[derive(sqlx::FromRow, Debug)]
struct WaitlistRow {
    id: Uuid,
    email: String,
    first_name: String,
    last_name: String,
    company: Option<String>,
    role: Option<String>,
    stage: String,
    motivation: String,
    interests: Vec<String>,
    newsletter: bool,
    created_at: DateTime<Utc>,
}

impl WaitlistRow {
    fn into_entry(self) -> WaitlistEntry {
        let stage = self.stage.parse::<Stage>().unwrap_or_else(|_| {
            tracing::warn!(entry_id = %self.id, stage = %self.stage, "unknown stage value, defaulting to other");
            Stage::Other
        });
        let interests = self
            .interests
            .iter()
            .filter_map(|raw| match raw.parse::<Interest>() {
                Ok(interest) => Some(interest),
                Err(_) => {
                    tracing::warn!(entry_id = %self.id, interest = %raw, "dropping unknown interest tag");
                    None
                }
            })
            .collect();

        WaitlistEntry {
            id: self.id,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            company: self.company,
            role: self.role,
            stage,
            motivation: self.motivation,
            interests,
            newsletter: self.newsletter,
            created_at: self.created_at,
        }
    }
}

const COLUMNS: &str =
    "id, email, first_name, last_name, company, role, stage, motivation, interests, newsletter, created_at";

#[async_trait]
impl WaitlistRepo for PostgresPersistence {
    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        let row = sqlx::query("SELECT 1 FROM waitlist WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?;
        Ok(row.is_some())
    }

    async fn insert(&self, entry: NewWaitlistEntry) -> AppResult<WaitlistEntry> {
        let id = Uuid::new_v4();
        let interests: Vec<String> = entry
            .interests
            .iter()
            .map(|interest| interest.as_str().to_string())
            .collect();

        let sql = format!(
            r#"
                INSERT INTO waitlist
                    (id, email, first_name, last_name, company, role, stage, motivation, interests, newsletter)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING {COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, WaitlistRow>(&sql)
            .bind(id)
            .bind(&entry.email)
            .bind(&entry.first_name)
            .bind(&entry.last_name)
            .bind(&entry.company)
            .bind(&entry.role)
            .bind(entry.stage.as_str())
            .bind(&entry.motivation)
            .bind(&interests)
            .bind(entry.newsletter)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(row.into_entry())
    }

    async fn list_all(&self) -> AppResult<Vec<WaitlistEntry>> {
        let sql = format!("SELECT {COLUMNS} FROM waitlist ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, WaitlistRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)?;
        Ok(rows.into_iter().map(WaitlistRow::into_entry).collect())
    }
}
