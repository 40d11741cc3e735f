use crate::modules::attendance::adapters::outbound::attendance_api_http::HttpAttendanceApi;
use crate::modules::attendance::adapters::outbound::attendance_api_in_memory::InMemoryAttendanceApi;
use crate::modules::attendance::use_cases::synchronize_records::api_port::AttendanceApi;
use crate::modules::attendance::use_cases::synchronize_records::store::AttendanceStore;
use crate::modules::personal_info::adapters::outbound::personal_info_api_http::HttpPersonalInfoApi;
use crate::modules::personal_info::adapters::outbound::personal_info_api_in_memory::InMemoryPersonalInfoApi;
use crate::modules::personal_info::use_cases::manage_profile::api_port::PersonalInfoApi;
use crate::modules::personal_info::use_cases::manage_profile::service::PersonalInfoService;
use crate::shared::infrastructure::http_api::ApiError;
use crate::shared::infrastructure::http_api::client::HttpApi;
use crate::shell::config::{Backend, Config};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub attendance: Arc<AttendanceStore<dyn AttendanceApi>>,
    pub personal_info: Arc<PersonalInfoService<dyn PersonalInfoApi>>,
    pub notice_duration: Duration,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let attendance_api: Arc<dyn AttendanceApi>;
        let personal_info_api: Arc<dyn PersonalInfoApi>;
        match &config.backend {
            Backend::Http(base_url) => {
                let http = HttpApi::new(base_url, config.request_timeout)?;
                info!(base_url = %http.base_url(), "using the attendance HTTP API");
                attendance_api = Arc::new(HttpAttendanceApi::new(http.clone()));
                personal_info_api = Arc::new(HttpPersonalInfoApi::new(http));
            }
            Backend::InMemory => {
                info!("using the in-memory backend with sample data");
                attendance_api = Arc::new(InMemoryAttendanceApi::with_sample_data());
                personal_info_api = Arc::new(InMemoryPersonalInfoApi::new());
            }
        }

        Ok(Self {
            attendance: Arc::new(AttendanceStore::new(attendance_api)),
            personal_info: Arc::new(PersonalInfoService::new(personal_info_api)),
            notice_duration: config.notice_duration,
        })
    }
}

#[cfg(test)]
mod app_state_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn it_should_wire_the_in_memory_backend() {
        let config = Config {
            backend: Backend::InMemory,
            request_timeout: Duration::from_secs(1),
            notice_duration: Duration::from_millis(500),
        };

        let state = AppState::from_config(&config).unwrap();

        assert_eq!(state.attendance.load().await.unwrap().len(), 3);
        assert!(state.personal_info.get().await.is_err());
        assert_eq!(state.notice_duration, Duration::from_millis(500));
    }

    #[rstest]
    fn it_should_wire_the_http_backend_without_contacting_it() {
        let config = Config {
            backend: Backend::Http("http://127.0.0.1:9/".to_string()),
            request_timeout: Duration::from_secs(1),
            notice_duration: Duration::from_secs(3),
        };

        let state = AppState::from_config(&config).unwrap();

        assert_eq!(state.attendance.snapshot(), vec![]);
    }
}
