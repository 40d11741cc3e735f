// Personal information use cases.
//
// Purpose
// - Thin pass-through to the personal-info API that reduces failures to the messages users
//   see on the profile screen.

use crate::modules::personal_info::core::profile::PersonalInfo;
use crate::modules::personal_info::use_cases::manage_profile::api_port::PersonalInfoApi;
use crate::shared::core::user_facing_error::UserFacingError;
use crate::shared::infrastructure::http_api::ApiError;
use std::sync::Arc;
use tracing::{error, info};

pub struct PersonalInfoService<TApi>
where
    TApi: PersonalInfoApi + ?Sized,
{
    api: Arc<TApi>,
}

impl<TApi> PersonalInfoService<TApi>
where
    TApi: PersonalInfoApi + ?Sized,
{
    pub fn new(api: Arc<TApi>) -> Self {
        Self { api }
    }

    pub async fn get(&self) -> Result<PersonalInfo, UserFacingError> {
        self.api.get().await.map_err(|err| reject("get", err))
    }

    /// Creates the profile.
    pub async fn save(&self, profile: &PersonalInfo) -> Result<PersonalInfo, UserFacingError> {
        let saved = self.api.save(profile).await.map_err(|err| reject("save", err))?;
        info!(employee_id = %saved.employee_id, "personal information created");
        Ok(saved)
    }

    pub async fn update(&self, profile: &PersonalInfo) -> Result<PersonalInfo, UserFacingError> {
        let updated = self.api.update(profile).await.map_err(|err| reject("update", err))?;
        info!(employee_id = %updated.employee_id, "personal information updated");
        Ok(updated)
    }

    pub async fn delete(&self) -> Result<(), UserFacingError> {
        self.api.delete().await.map_err(|err| reject("delete", err))?;
        info!("personal information deleted");
        Ok(())
    }
}

fn reject(operation: &str, err: ApiError) -> UserFacingError {
    error!(operation, error = ?err, "personal information request failed");
    UserFacingError::new(describe(&err))
}

pub fn describe(err: &ApiError) -> String {
    match err {
        ApiError::Client(detail) => format!("Client Error: {detail}"),
        ApiError::Network(_) => "Unable to reach the personal information service".to_string(),
        ApiError::Parse(_) => "Unexpected response from the personal information service".to_string(),
        ApiError::Server { status: 404, .. } => "Personal information not found".to_string(),
        ApiError::Server { status: 400, body, .. } => format!("Error: {body}"),
        ApiError::Server { status: 500, .. } => {
            "Internal server error occurred. Please try again later".to_string()
        }
        ApiError::Server { status, body, .. } => format!("Server Error: {status} - {body}"),
    }
}

#[cfg(test)]
mod personal_info_service_tests {
    use super::*;
    use crate::modules::personal_info::adapters::outbound::personal_info_api_in_memory::InMemoryPersonalInfoApi;
    use rstest::rstest;

    #[rstest]
    #[case(ApiError::Client("builder error".into()), "Client Error: builder error")]
    #[case(ApiError::Network("refused".into()), "Unable to reach the personal information service")]
    #[case(ApiError::Parse("eof".into()), "Unexpected response from the personal information service")]
    #[case(ApiError::not_found(), "Personal information not found")]
    #[case(ApiError::server(400, "Bad Request", "email is taken"), "Error: email is taken")]
    #[case(ApiError::server(500, "Internal Server Error", "trace"), "Internal server error occurred. Please try again later")]
    #[case(ApiError::server(503, "Service Unavailable", "maintenance"), "Server Error: 503 - maintenance")]
    fn it_should_describe_failures_for_the_profile_screen(#[case] err: ApiError, #[case] expected: &str) {
        assert_eq!(describe(&err), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_report_a_missing_profile() {
        let service = PersonalInfoService::new(Arc::new(InMemoryPersonalInfoApi::new()));
        let result = service.get().await;
        assert_eq!(result.unwrap_err().message(), "Personal information not found");
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_create_update_and_delete_the_profile() {
        let service = PersonalInfoService::new(Arc::new(InMemoryPersonalInfoApi::new()));
        let mut profile = PersonalInfo {
            employee_id: "EMP001".to_string(),
            ..PersonalInfo::default()
        };

        service.save(&profile).await.unwrap();
        profile.department = "Finance".to_string();
        service.update(&profile).await.unwrap();
        assert_eq!(service.get().await.unwrap().department, "Finance");

        service.delete().await.unwrap();
        assert!(service.get().await.is_err());
    }
}
