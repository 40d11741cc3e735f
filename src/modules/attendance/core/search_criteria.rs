use crate::modules::attendance::core::record::AttendanceRecord;
use crate::shared::core::calendar_date::{end_of_day, start_of_day};
use chrono::NaiveDate;

/// Inclusive check-in date range. A missing bound leaves that side open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl SearchCriteria {
    pub fn between(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none()
    }

    /// A record matches when its check-in day at midnight lies within
    /// `[start 00:00:00.000, end 23:59:59.999]`.
    pub fn matches(&self, record: &AttendanceRecord) -> bool {
        let checked_in_at = start_of_day(record.check_in_date);
        let after_start = self
            .start_date
            .is_none_or(|start| checked_in_at >= start_of_day(start));
        let before_end = self
            .end_date
            .is_none_or(|end| checked_in_at <= end_of_day(end));
        after_start && before_end
    }

    /// Matching records, in their original order.
    pub fn apply(&self, records: &[AttendanceRecord]) -> Vec<AttendanceRecord> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}
