use crate::modules::personal_info::core::profile::PersonalInfo;
use crate::shared::infrastructure::http_api::ApiError;
use async_trait::async_trait;

/// The single-profile `/api/personal-info` resource.
#[async_trait]
pub trait PersonalInfoApi: Send + Sync {
    async fn get(&self) -> Result<PersonalInfo, ApiError>;
    async fn save(&self, profile: &PersonalInfo) -> Result<PersonalInfo, ApiError>;
    async fn update(&self, profile: &PersonalInfo) -> Result<PersonalInfo, ApiError>;
    async fn delete(&self) -> Result<(), ApiError>;
}
