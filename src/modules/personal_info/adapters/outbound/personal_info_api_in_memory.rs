use crate::modules::personal_info::core::profile::PersonalInfo;
use crate::modules::personal_info::use_cases::manage_profile::api_port::PersonalInfoApi;
use crate::shared::infrastructure::http_api::ApiError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::{Mutex, RwLock};

/// Holds at most one profile. Reads of an empty slot answer 404 like the real service.
#[derive(Default)]
pub struct InMemoryPersonalInfoApi {
    profile: RwLock<Option<PersonalInfo>>,
    scripted_failures: Mutex<VecDeque<ApiError>>,
    is_offline: AtomicBool,
    creations: AtomicUsize,
}

impl InMemoryPersonalInfoApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: PersonalInfo) -> Self {
        Self {
            profile: RwLock::new(Some(profile)),
            ..Self::default()
        }
    }

    pub fn set_offline(&self, is_offline: bool) {
        self.is_offline.store(is_offline, Ordering::SeqCst);
    }

    pub async fn fail_next(&self, err: ApiError) {
        self.scripted_failures.lock().await.push_back(err);
    }

    pub fn creations(&self) -> usize {
        self.creations.load(Ordering::SeqCst)
    }

    pub async fn stored(&self) -> Option<PersonalInfo> {
        self.profile.read().await.clone()
    }

    async fn admit(&self) -> Result<(), ApiError> {
        if self.is_offline.load(Ordering::SeqCst) {
            return Err(ApiError::Network("personal information backend offline".to_string()));
        }
        match self.scripted_failures.lock().await.pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PersonalInfoApi for InMemoryPersonalInfoApi {
    async fn get(&self) -> Result<PersonalInfo, ApiError> {
        self.admit().await?;
        self.profile.read().await.clone().ok_or_else(ApiError::not_found)
    }

    async fn save(&self, profile: &PersonalInfo) -> Result<PersonalInfo, ApiError> {
        self.admit().await?;
        *self.profile.write().await = Some(profile.clone());
        self.creations.fetch_add(1, Ordering::SeqCst);
        Ok(profile.clone())
    }

    async fn update(&self, profile: &PersonalInfo) -> Result<PersonalInfo, ApiError> {
        self.admit().await?;
        let mut stored = self.profile.write().await;
        match stored.as_mut() {
            Some(current) => {
                *current = profile.clone();
                Ok(profile.clone())
            }
            None => Err(ApiError::not_found()),
        }
    }

    async fn delete(&self) -> Result<(), ApiError> {
        self.admit().await?;
        match self.profile.write().await.take() {
            Some(_) => Ok(()),
            None => Err(ApiError::not_found()),
        }
    }
}

#[cfg(test)]
mod in_memory_personal_info_api_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn it_should_answer_not_found_for_an_empty_slot() {
        let api = InMemoryPersonalInfoApi::new();
        assert!(api.get().await.unwrap_err().is_not_found());
        assert!(api.update(&PersonalInfo::default()).await.unwrap_err().is_not_found());
        assert!(api.delete().await.unwrap_err().is_not_found());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_while_offline() {
        let api = InMemoryPersonalInfoApi::with_profile(PersonalInfo::default());
        api.set_offline(true);
        assert!(matches!(api.get().await, Err(ApiError::Network(_))));
        api.set_offline(false);
        assert!(api.get().await.is_ok());
    }
}
