// Attendance records, in memory and on the wire.
//
// Purpose
// - `AttendanceRecord` is what the store holds and publishes. `AttendanceDraft` is a record
//   without an id: the payload of add and update.
// - The `*Dto` types are the transport shape of `/api/attendance`, with the check-in date as
//   a `YYYY-MM-DD` string.
//
// Responsibilities
// - Convert wire records into domain records, rejecting records without an id or with an
//   unreadable date.
// - Never shift dates across timezones. See `shared::core::calendar_date`.

use crate::shared::core::calendar_date::{InvalidDate, format_wire_date, parse_wire_date};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub id: String,
    pub check_in_date: NaiveDate,
    pub check_in_time: String,
    pub check_out_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceDraft {
    pub check_in_date: NaiveDate,
    pub check_in_time: String,
    pub check_out_time: Option<String>,
}

impl AttendanceRecord {
    pub fn from_draft(id: impl Into<String>, draft: AttendanceDraft) -> Self {
        Self {
            id: id.into(),
            check_in_date: draft.check_in_date,
            check_in_time: draft.check_in_time,
            check_out_time: draft.check_out_time,
        }
    }

    /// Replaces every field but the id.
    pub fn apply(&mut self, draft: &AttendanceDraft) {
        self.check_in_date = draft.check_in_date;
        self.check_in_time = draft.check_in_time.clone();
        self.check_out_time = draft.check_out_time.clone();
    }

    pub fn is_checked_out(&self) -> bool {
        self.check_out_time.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRecord {
    #[error("record has no id")]
    MissingId,

    #[error(transparent)]
    CheckInDate(#[from] InvalidDate),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecordDto {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub check_in_date: String,
    pub check_in_time: String,
    #[serde(default)]
    pub check_out_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceDraftDto {
    pub check_in_date: String,
    pub check_in_time: String,
    #[serde(default)]
    pub check_out_time: Option<String>,
}

impl AttendanceRecordDto {
    pub fn from_draft(id: impl Into<String>, draft: AttendanceDraftDto) -> Self {
        Self {
            id: id.into(),
            check_in_date: draft.check_in_date,
            check_in_time: draft.check_in_time,
            check_out_time: draft.check_out_time,
        }
    }
}

impl TryFrom<AttendanceRecordDto> for AttendanceRecord {
    type Error = InvalidRecord;

    fn try_from(dto: AttendanceRecordDto) -> Result<Self, Self::Error> {
        if dto.id.trim().is_empty() {
            return Err(InvalidRecord::MissingId);
        }
        Ok(Self {
            id: dto.id,
            check_in_date: parse_wire_date(&dto.check_in_date)?,
            check_in_time: dto.check_in_time,
            check_out_time: dto.check_out_time.filter(|time| !time.trim().is_empty()),
        })
    }
}

impl From<&AttendanceRecord> for AttendanceRecordDto {
    fn from(record: &AttendanceRecord) -> Self {
        Self {
            id: record.id.clone(),
            check_in_date: format_wire_date(record.check_in_date),
            check_in_time: record.check_in_time.clone(),
            check_out_time: record.check_out_time.clone(),
        }
    }
}

impl From<&AttendanceDraft> for AttendanceDraftDto {
    fn from(draft: &AttendanceDraft) -> Self {
        Self {
            check_in_date: format_wire_date(draft.check_in_date),
            check_in_time: draft.check_in_time.clone(),
            check_out_time: draft.check_out_time.clone(),
        }
    }
}

// Backends disagree on whether ids are strings or numbers.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}
