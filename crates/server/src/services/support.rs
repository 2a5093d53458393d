//! Support tickets: filing, answering and per-user lookup.

use chrono::{DateTime, Utc};

use coinhall_core::{Email, EventKind, ReportId};

use super::ServiceError;
use super::ledger::ADMIN_ACTOR;
use crate::models::{LogEntry, Report};
use crate::store::StoreData;

/// Support desk over the store's report list.
pub struct SupportDesk<'a> {
    data: &'a mut StoreData,
    now: DateTime<Utc>,
}

impl<'a> SupportDesk<'a> {
    #[must_use]
    pub const fn new(data: &'a mut StoreData, now: DateTime<Utc>) -> Self {
        Self { data, now }
    }

    /// File a new question and log a `SUPPORT` entry.
    ///
    /// The sender does not need an account.
    pub fn submit(&mut self, email: &Email, question: &str) -> ReportId {
        let id = self.data.next_report_id();
        self.data.reports.insert(
            0,
            Report {
                id,
                email: email.clone(),
                question: question.to_owned(),
                answer: None,
                date: self.now,
            },
        );
        self.data.logs.record(LogEntry::new(
            self.now,
            EventKind::Support,
            email.as_str(),
            format!("Asked: \"{question}\""),
        ));

        tracing::info!(%email, report_id = %id, "Support report filed");
        id
    }

    /// Set the answer on a report and log a `SUPPORT` entry by the admin.
    ///
    /// # Errors
    ///
    /// `ReportNotFound` when no report has this ID.
    pub fn reply(&mut self, id: ReportId, answer: &str) -> Result<(), ServiceError> {
        let report = self
            .data
            .reports
            .iter_mut()
            .find(|report| report.id == id)
            .ok_or(ServiceError::ReportNotFound(id))?;
        report.answer = Some(answer.to_owned());
        let recipient = report.email.clone();

        self.data.logs.record(LogEntry::new(
            self.now,
            EventKind::Support,
            ADMIN_ACTOR,
            format!("Answered {recipient}: \"{answer}\""),
        ));

        tracing::info!(report_id = %id, %recipient, "Support report answered");
        Ok(())
    }
}

/// Reports filed by `email`, newest first.
#[must_use]
pub fn reports_for(data: &StoreData, email: &Email) -> Vec<Report> {
    data.reports
        .iter()
        .filter(|report| &report.email == email)
        .cloned()
        .collect()
}
