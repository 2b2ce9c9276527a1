//! Audit reports and their summary counts

use crate::record::{DiscrepancyRecord, Status};
use std::fmt;

/// Identifier for one audit run, based on UUIDv7
///
/// Only used to correlate log lines and output for a single run; nothing is
/// persisted under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AuditId(u128);

impl AuditId {
    /// Generate a new UUIDv7-based AuditId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create an AuditId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for AuditId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AuditId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Display-only decoration for a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMarker {
    /// The row reports a discrepancy
    Flagged,
    /// Anything else
    Cleared,
}

impl StatusMarker {
    /// Marker for a status
    pub fn for_status(status: Status) -> Self {
        if status.is_discrepancy() {
            StatusMarker::Flagged
        } else {
            StatusMarker::Cleared
        }
    }

    /// Glyph shown in front of the status
    pub fn symbol(&self) -> &'static str {
        match self {
            StatusMarker::Flagged => "🚩",
            StatusMarker::Cleared => "✅",
        }
    }
}

/// A record paired with its marker
#[derive(Debug, Clone, Copy)]
pub struct ReportRow<'a> {
    /// Marker derived from the record's status
    pub marker: StatusMarker,
    /// The record itself
    pub record: &'a DiscrepancyRecord,
}

impl ReportRow<'_> {
    /// Status text with the marker prepended, e.g. `🚩 DISCREPANCY`
    pub fn decorated_status(&self) -> String {
        format!("{} {}", self.marker.symbol(), self.record.status)
    }
}

/// Summary counts for a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuditSummary {
    /// Number of records
    pub total_checks: usize,
    /// Records with status DISCREPANCY
    pub discrepancies: usize,
    /// Records with status MATCH
    pub matches: usize,
    /// Records with status NOT_COMPARABLE
    pub not_comparable: usize,
}

/// The result of one audit run
///
/// Built once from the parsed records and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct AuditReport {
    id: AuditId,
    model: String,
    records: Vec<DiscrepancyRecord>,
    raw_response: String,
}

impl AuditReport {
    /// Build a report from parsed records
    pub fn new(
        id: AuditId,
        model: impl Into<String>,
        records: Vec<DiscrepancyRecord>,
        raw_response: impl Into<String>,
    ) -> Self {
        Self {
            id,
            model: model.into(),
            records,
            raw_response: raw_response.into(),
        }
    }

    /// Run identifier
    pub fn id(&self) -> AuditId {
        self.id
    }

    /// Model that produced the records
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Records in model order
    pub fn records(&self) -> &[DiscrepancyRecord] {
        &self.records
    }

    /// Response text exactly as the model returned it
    pub fn raw_response(&self) -> &str {
        &self.raw_response
    }

    /// Records with their display markers
    pub fn rows(&self) -> impl Iterator<Item = ReportRow<'_>> {
        self.records.iter().map(|record| ReportRow {
            marker: StatusMarker::for_status(record.status),
            record,
        })
    }

    /// Whether the model returned no records at all
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total number of checks
    pub fn total_checks(&self) -> usize {
        self.records.len()
    }

    /// Number of records whose status is a discrepancy
    pub fn discrepancy_count(&self) -> usize {
        self.count(Status::Discrepancy)
    }

    /// Number of MATCH records
    pub fn match_count(&self) -> usize {
        self.count(Status::Match)
    }

    /// Number of NOT_COMPARABLE records
    pub fn not_comparable_count(&self) -> usize {
        self.count(Status::NotComparable)
    }

    /// All counts at once
    pub fn summary(&self) -> AuditSummary {
        AuditSummary {
            total_checks: self.total_checks(),
            discrepancies: self.discrepancy_count(),
            matches: self.match_count(),
            not_comparable: self.not_comparable_count(),
        }
    }

    fn count(&self, status: Status) -> usize {
        self.records.iter().filter(|r| r.status == status).count()
    }
}
