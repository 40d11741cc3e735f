// Session-wide source of truth for attendance records.
//
// Purpose
// - Hold the list of records fetched from the attendance API and keep it consistent with
//   the server after every mutation.
//
// Responsibilities
// - Publish the whole list to every subscriber after each successful change. There are no
//   deltas: a subscriber always receives a full snapshot.
// - Change local state only after the server confirmed the change. Nothing is applied
//   optimistically, so a failed request never needs a rollback.
// - Reduce every remote failure to one user-facing message.
//
// Concurrency
// - The list lives inside the watch channel and is only touched through `send_modify` in
//   the success path of a request. Overlapping updates of the same id are not ordered:
//   whichever response arrives last wins.

use crate::modules::attendance::core::record::{AttendanceDraft, AttendanceDraftDto, AttendanceRecord, AttendanceRecordDto};
use crate::modules::attendance::core::search_criteria::SearchCriteria;
use crate::modules::attendance::use_cases::synchronize_records::api_port::AttendanceApi;
use crate::shared::core::user_facing_error::UserFacingError;
use crate::shared::infrastructure::http_api::ApiError;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

pub struct AttendanceStore<TApi>
where
    TApi: AttendanceApi + ?Sized,
{
    api: Arc<TApi>,
    records: watch::Sender<Vec<AttendanceRecord>>,
}

impl<TApi> AttendanceStore<TApi>
where
    TApi: AttendanceApi + ?Sized,
{
    pub fn new(api: Arc<TApi>) -> Self {
        let (records, _) = watch::channel(Vec::new());
        Self { api, records }
    }

    /// A receiver that sees the current list right away and every later publish.
    pub fn subscribe(&self) -> watch::Receiver<Vec<AttendanceRecord>> {
        self.records.subscribe()
    }

    pub fn snapshot(&self) -> Vec<AttendanceRecord> {
        self.records.borrow().clone()
    }

    /// Replaces the list with the server's. On failure the published list is emptied.
    pub async fn load(&self) -> Result<Vec<AttendanceRecord>, UserFacingError> {
        match self.fetch_all().await {
            Ok(records) => {
                info!(count = records.len(), "attendance records loaded");
                self.records.send_replace(records.clone());
                Ok(records)
            }
            Err(err) => {
                error!(error = %err, "loading attendance records failed");
                self.records.send_replace(Vec::new());
                Err(UserFacingError::with_context("Failed to load attendance records", err))
            }
        }
    }

    /// Filters the list as it is now. Never talks to the server.
    pub fn search(&self, criteria: &SearchCriteria) -> Vec<AttendanceRecord> {
        let found = criteria.apply(&self.records.borrow());
        debug!(?criteria, count = found.len(), "attendance records searched");
        found
    }

    pub async fn add(&self, draft: AttendanceDraft) -> Result<AttendanceRecord, UserFacingError> {
        let payload = AttendanceDraftDto::from(&draft);
        let created = self
            .api
            .create(&payload)
            .await
            .and_then(parse_record)
            .map_err(|err| failure("Failed to add attendance record", err))?;

        info!(id = %created.id, "attendance record added");
        self.records.send_modify(|records| records.push(created.clone()));
        Ok(created)
    }

    /// Replaces the record `id` with the server's version. When the id is not in the local
    /// list the publish changes nothing.
    pub async fn update(&self, id: &str, draft: AttendanceDraft) -> Result<AttendanceRecord, UserFacingError> {
        let payload = AttendanceDraftDto::from(&draft);
        let updated = self
            .api
            .update(id, &payload)
            .await
            .and_then(parse_record)
            .map_err(|err| failure("Failed to update attendance record", err))?;

        info!(%id, "attendance record updated");
        self.records.send_modify(|records| {
            match records.iter_mut().find(|record| record.id == id) {
                Some(record) => *record = updated.clone(),
                None => warn!(%id, "updated record is not in the local list"),
            }
        });
        Ok(updated)
    }

    /// A record the server no longer knows (404) counts as deleted.
    pub async fn delete(&self, id: &str) -> Result<(), UserFacingError> {
        match self.api.delete(id).await {
            Ok(()) => info!(%id, "attendance record deleted"),
            Err(err) if err.is_not_found() => info!(%id, "attendance record was already gone"),
            Err(err) => return Err(failure("Failed to delete attendance record", err)),
        }
        self.records.send_modify(|records| records.retain(|record| record.id != id));
        Ok(())
    }

    /// Fetches one record straight from the server. The local list is left alone.
    pub async fn get_by_id(&self, id: &str) -> Result<AttendanceRecord, UserFacingError> {
        self.api
            .get(id)
            .await
            .and_then(parse_record)
            .map_err(|err| failure("Failed to fetch attendance record", err))
    }

    async fn fetch_all(&self) -> Result<Vec<AttendanceRecord>, ApiError> {
        self.api
            .list()
            .await?
            .into_iter()
            .map(parse_record)
            .collect()
    }
}

fn parse_record(dto: AttendanceRecordDto) -> Result<AttendanceRecord, ApiError> {
    AttendanceRecord::try_from(dto).map_err(|err| ApiError::Parse(err.to_string()))
}

fn failure(context: &str, err: ApiError) -> UserFacingError {
    error!(error = %err, "{context}");
    UserFacingError::with_context(context, err)
}
