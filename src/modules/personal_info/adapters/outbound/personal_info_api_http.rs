use crate::modules::personal_info::core::profile::PersonalInfo;
use crate::modules::personal_info::use_cases::manage_profile::api_port::PersonalInfoApi;
use crate::shared::infrastructure::http_api::ApiError;
use crate::shared::infrastructure::http_api::client::HttpApi;
use async_trait::async_trait;
use reqwest::Method;

const PERSONAL_INFO_PATH: &str = "/api/personal-info";

pub struct HttpPersonalInfoApi {
    http: HttpApi,
}

impl HttpPersonalInfoApi {
    pub fn new(http: HttpApi) -> Self {
        Self { http }
    }
}

#[async_trait]
impl PersonalInfoApi for HttpPersonalInfoApi {
    async fn get(&self) -> Result<PersonalInfo, ApiError> {
        self.http.get(self.http.endpoint(PERSONAL_INFO_PATH)?).await
    }

    async fn save(&self, profile: &PersonalInfo) -> Result<PersonalInfo, ApiError> {
        self.http
            .send_json(Method::POST, self.http.endpoint(PERSONAL_INFO_PATH)?, profile)
            .await
    }

    async fn update(&self, profile: &PersonalInfo) -> Result<PersonalInfo, ApiError> {
        self.http
            .send_json(Method::PUT, self.http.endpoint(PERSONAL_INFO_PATH)?, profile)
            .await
    }

    async fn delete(&self) -> Result<(), ApiError> {
        self.http.delete(self.http.endpoint(PERSONAL_INFO_PATH)?).await
    }
}
