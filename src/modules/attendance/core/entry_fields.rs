// Editable attendance fields, as typed by a user.
//
// Purpose
// - Back both the add/update form and the per-row quick-edit shadow copy.
//
// Responsibilities
// - Validate every field and report each failure separately, so the user sees one message
//   per wrong field.
// - Produce an `AttendanceDraft` only when all fields are valid.

use crate::modules::attendance::core::record::{AttendanceDraft, AttendanceRecord};
use crate::shared::core::time_of_day::is_wall_clock_time;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Check-in date is required")]
    MissingCheckInDate,

    #[error("Check-in time must be in HH:MM format (00:00-23:59)")]
    InvalidCheckInTime,

    #[error("Check-out time must be in HH:MM format (00:00-23:59)")]
    InvalidCheckOutTime,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFields {
    pub check_in_date: Option<NaiveDate>,
    pub check_in_time: String,
    /// Empty means not checked out yet.
    pub check_out_time: String,
}

impl EntryFields {
    pub fn new(
        check_in_date: Option<NaiveDate>,
        check_in_time: impl Into<String>,
        check_out_time: impl Into<String>,
    ) -> Self {
        Self {
            check_in_date,
            check_in_time: check_in_time.into(),
            check_out_time: check_out_time.into(),
        }
    }

    pub fn validate(&self) -> Result<AttendanceDraft, Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.check_in_date.is_none() {
            errors.push(FieldError::MissingCheckInDate);
        }
        let check_in_time = self.check_in_time.trim();
        if !is_wall_clock_time(check_in_time) {
            errors.push(FieldError::InvalidCheckInTime);
        }
        let check_out_time = self.check_out_time.trim();
        if !check_out_time.is_empty() && !is_wall_clock_time(check_out_time) {
            errors.push(FieldError::InvalidCheckOutTime);
        }

        match self.check_in_date {
            Some(check_in_date) if errors.is_empty() => Ok(AttendanceDraft {
                check_in_date,
                check_in_time: check_in_time.to_string(),
                check_out_time: (!check_out_time.is_empty()).then(|| check_out_time.to_string()),
            }),
            _ => Err(errors),
        }
    }
}

impl From<&AttendanceRecord> for EntryFields {
    fn from(record: &AttendanceRecord) -> Self {
        Self {
            check_in_date: Some(record.check_in_date),
            check_in_time: record.check_in_time.clone(),
            check_out_time: record.check_out_time.clone().unwrap_or_default(),
        }
    }
}
