//! Read-only administration view over the collected entries: listing with a
//! search filter, aggregate statistics and a CSV export. No write path.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::instrument;

use crate::app_error::{AppError, AppResult};
use crate::entities::WaitlistEntry;
use crate::use_cases::waitlist::WaitlistRepo;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaitlistStats {
    pub total: usize,
    pub with_details: usize,
    pub newsletter_only: usize,
    pub by_stage: BTreeMap<&'static str, usize>,
}

pub struct AdminUseCases {
    repo: Arc<dyn WaitlistRepo>,
}

impl AdminUseCases {
    pub fn new(repo: Arc<dyn WaitlistRepo>) -> Self {
        Self { repo }
    }

    /// All entries, newest first, optionally narrowed by a case-insensitive
    /// substring search over email, names and company.
    #[instrument(skip(self))]
    pub async fn list(&self, search: Option<&str>) -> AppResult<Vec<WaitlistEntry>> {
        let entries = self.repo.list_all().await?;
        Ok(match search.map(str::trim) {
            Some(query) if !query.is_empty() => filter_entries(entries, query),
            _ => entries,
        })
    }

    #[instrument(skip(self))]
    pub async fn stats(&self) -> AppResult<WaitlistStats> {
        Ok(compute_stats(&self.repo.list_all().await?))
    }

    #[instrument(skip(self))]
    pub async fn export_csv(&self) -> AppResult<String> {
        render_csv(&self.repo.list_all().await?)
    }
}

pub fn filter_entries(entries: Vec<WaitlistEntry>, query: &str) -> Vec<WaitlistEntry> {
    let needle = query.to_lowercase();
    entries
        .into_iter()
        .filter(|entry| matches_query(entry, &needle))
        .collect()
}

fn matches_query(entry: &WaitlistEntry, needle: &str) -> bool {
    entry.email.to_lowercase().contains(needle)
        || entry.first_name.to_lowercase().contains(needle)
        || entry.last_name.to_lowercase().contains(needle)
        || entry
            .company
            .as_deref()
            .is_some_and(|company| company.to_lowercase().contains(needle))
}

pub fn compute_stats(entries: &[WaitlistEntry]) -> WaitlistStats {
    let total = entries.len();
    let with_details = entries
        .iter()
        .filter(|entry| !entry.is_newsletter_only())
        .count();

    let mut by_stage: BTreeMap<&'static str, usize> = BTreeMap::new();
    for entry in entries {
        *by_stage.entry(entry.stage.as_str()).or_default() += 1;
    }

    WaitlistStats {
        total,
        with_details,
        newsletter_only: total - with_details,
        by_stage,
    }
}

pub fn render_csv(entries: &[WaitlistEntry]) -> AppResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([
            "Email",
            "First Name",
            "Last Name",
            "Company",
            "Role",
            "Stage",
            "Motivation",
            "Interests",
            "Newsletter",
            "Created At",
        ])
        .map_err(csv_error)?;

    for entry in entries {
        let interests = entry
            .interests
            .iter()
            .map(|interest| interest.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let created = entry.created_at.format("%Y-%m-%d").to_string();
        writer
            .write_record([
                entry.email.as_str(),
                entry.first_name.as_str(),
                entry.last_name.as_str(),
                entry.company.as_deref().unwrap_or(""),
                entry.role.as_deref().unwrap_or(""),
                entry.stage.as_str(),
                entry.motivation.as_str(),
                interests.as_str(),
                if entry.newsletter { "Yes" } else { "No" },
                created.as_str(),
            ])
            .map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| AppError::Internal(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| AppError::Internal(err.to_string()))
}

/// Download name for the export, stamped with the current date.
pub fn export_filename(today: NaiveDate) -> String {
    format!("waitlist-{}.csv", today.format("%Y-%m-%d"))
}

fn csv_error(err: csv::Error) -> AppError {
    AppError::Internal(err.to_string())
}
