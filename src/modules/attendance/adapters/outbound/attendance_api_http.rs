use crate::modules::attendance::core::record::{AttendanceDraftDto, AttendanceRecordDto};
use crate::modules::attendance::use_cases::synchronize_records::api_port::AttendanceApi;
use crate::shared::infrastructure::http_api::ApiError;
use crate::shared::infrastructure::http_api::client::HttpApi;
use async_trait::async_trait;
use reqwest::{Method, Url};

const RESOURCE: &str = "/api/attendance";

/// `/api/attendance` over HTTP.
pub struct HttpAttendanceApi {
    http: HttpApi,
}

impl HttpAttendanceApi {
    pub fn new(http: HttpApi) -> Self {
        Self { http }
    }

    fn record_url(&self, id: &str) -> Result<Url, ApiError> {
        self.http.item_endpoint(RESOURCE, id)
    }
}

#[async_trait]
impl AttendanceApi for HttpAttendanceApi {
    async fn list(&self) -> Result<Vec<AttendanceRecordDto>, ApiError> {
        self.http.get(self.http.endpoint(RESOURCE)?).await
    }

    async fn create(&self, draft: &AttendanceDraftDto) -> Result<AttendanceRecordDto, ApiError> {
        self.http
            .send_json(Method::POST, self.http.endpoint(&format!("{RESOURCE}/save"))?, draft)
            .await
    }

    async fn update(&self, id: &str, draft: &AttendanceDraftDto) -> Result<AttendanceRecordDto, ApiError> {
        self.http
            .send_json(Method::PUT, self.record_url(id)?, draft)
            .await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.http.delete(self.record_url(id)?).await
    }

    async fn get(&self, id: &str) -> Result<AttendanceRecordDto, ApiError> {
        self.http.get(self.record_url(id)?).await
    }
}
