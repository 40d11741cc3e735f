// What the attendance store needs from the remote attendance resource.
//
// Boundaries
// - Works on transport shapes. Parsing dates and ids is the store's job, so every backend
//   is held to the same rules.
// - Reports failures as `ApiError` exactly as observed. Deciding which failures are
//   tolerable (a 404 on delete) is also the store's job.

use crate::modules::attendance::core::record::{AttendanceDraftDto, AttendanceRecordDto};
use crate::shared::infrastructure::http_api::ApiError;
use async_trait::async_trait;

#[async_trait]
pub trait AttendanceApi: Send + Sync {
    async fn list(&self) -> Result<Vec<AttendanceRecordDto>, ApiError>;
    async fn create(&self, draft: &AttendanceDraftDto) -> Result<AttendanceRecordDto, ApiError>;
    async fn update(&self, id: &str, draft: &AttendanceDraftDto) -> Result<AttendanceRecordDto, ApiError>;
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
    async fn get(&self, id: &str) -> Result<AttendanceRecordDto, ApiError>;
}
