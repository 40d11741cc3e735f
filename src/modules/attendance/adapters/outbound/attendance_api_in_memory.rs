// In memory attendance backend.
//
// Purpose
// - Exercise the store and views without a server, and back the terminal front end when
//   it runs with `ATTENDANCE_API_URL=memory`.
//
// Responsibilities
// - Behave like the REST resource: assign ids on create, answer 404 for unknown ids.
// - Allow tests to simulate an unreachable backend, slow responses and one-off failures.

use crate::modules::attendance::core::record::{AttendanceDraftDto, AttendanceRecordDto};
use crate::modules::attendance::use_cases::synchronize_records::api_port::AttendanceApi;
use crate::shared::infrastructure::http_api::ApiError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryAttendanceApi {
    records: RwLock<Vec<AttendanceRecordDto>>,
    scripted_failures: Mutex<VecDeque<ApiError>>,
    is_offline: AtomicBool,
    delay_ms: AtomicU64,
    requests: AtomicUsize,
}

impl InMemoryAttendanceApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<AttendanceRecordDto>) -> Self {
        Self {
            records: RwLock::new(records),
            ..Self::default()
        }
    }

    /// Three working days at the start of August 2025.
    pub fn with_sample_data() -> Self {
        let sample = [
            ("1", "2025-08-01", "08:00", "17:00"),
            ("2", "2025-08-02", "08:30", "17:30"),
            ("3", "2025-08-03", "09:15", "16:45"),
        ];
        Self::with_records(
            sample
                .into_iter()
                .map(|(id, day, check_in, check_out)| AttendanceRecordDto {
                    id: id.to_string(),
                    check_in_date: day.to_string(),
                    check_in_time: check_in.to_string(),
                    check_out_time: Some(check_out.to_string()),
                })
                .collect(),
        )
    }

    pub fn set_offline(&self, offline: bool) {
        self.is_offline.store(offline, Ordering::SeqCst);
    }

    pub fn set_delay_ms(&self, delay_ms: u64) {
        self.delay_ms.store(delay_ms, Ordering::SeqCst);
    }

    /// The next request fails with `error` instead of being served.
    pub async fn fail_next(&self, error: ApiError) {
        self.scripted_failures.lock().await.push_back(error);
    }

    /// Number of requests received, served or not.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub async fn stored(&self) -> Vec<AttendanceRecordDto> {
        self.records.read().await.clone()
    }

    async fn admit(&self) -> Result<(), ApiError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let delay_ms = self.delay_ms.load(Ordering::SeqCst);
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
        if self.is_offline.load(Ordering::SeqCst) {
            return Err(ApiError::Network("attendance backend offline".to_string()));
        }
        match self.scripted_failures.lock().await.pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AttendanceApi for InMemoryAttendanceApi {
    async fn list(&self) -> Result<Vec<AttendanceRecordDto>, ApiError> {
        self.admit().await?;
        Ok(self.records.read().await.clone())
    }

    async fn create(&self, draft: &AttendanceDraftDto) -> Result<AttendanceRecordDto, ApiError> {
        self.admit().await?;
        let created = AttendanceRecordDto::from_draft(Uuid::now_v7().to_string(), draft.clone());
        self.records.write().await.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, draft: &AttendanceDraftDto) -> Result<AttendanceRecordDto, ApiError> {
        self.admit().await?;
        let mut guard = self.records.write().await;
        let stored = guard
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(ApiError::not_found)?;
        *stored = AttendanceRecordDto::from_draft(id, draft.clone());
        Ok(stored.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.admit().await?;
        let mut guard = self.records.write().await;
        let before = guard.len();
        guard.retain(|record| record.id != id);
        if guard.len() == before {
            return Err(ApiError::not_found());
        }
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<AttendanceRecordDto, ApiError> {
        self.admit().await?;
        self.records
            .read()
            .await
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or_else(ApiError::not_found)
    }
}
