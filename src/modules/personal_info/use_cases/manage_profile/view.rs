// Personal information screen, without the pixels.
//
// Purpose
// - Hold the profile form and its edit mode, and persist it through the service.
//
// Responsibilities
// - Entering edit mode snapshots the form so cancelling can restore it.
// - The first save of a profile that was never loaded creates it; later saves update it.
// - Invalid forms are never sent.

use crate::modules::personal_info::core::profile::{PersonalInfo, ProfileFieldError};
use crate::modules::personal_info::use_cases::manage_profile::api_port::PersonalInfoApi;
use crate::modules::personal_info::use_cases::manage_profile::service::PersonalInfoService;
use crate::shared::core::flow_outcome::FlowOutcome;
use crate::shared::infrastructure::notifications::{DEFAULT_NOTICE_DURATION, Notice, Notifier};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

pub const INVALID_FORM_MESSAGE: &str = "Please fill in all required fields correctly.";
const QUICK_SAVE_NOTICE: Duration = Duration::from_millis(2500);
const CANCEL_NOTICE: Duration = Duration::from_millis(2000);

pub type ProfileOutcome = FlowOutcome<ProfileFieldError>;

#[derive(Debug, Default)]
struct FormState {
    form: PersonalInfo,
    snapshot: Option<PersonalInfo>,
    is_persisted: bool,
}

pub struct PersonalInfoView<TApi>
where
    TApi: PersonalInfoApi + ?Sized,
{
    service: Arc<PersonalInfoService<TApi>>,
    notifier: Arc<dyn Notifier>,
    notice_duration: Duration,
    state: Mutex<FormState>,
}

impl<TApi> PersonalInfoView<TApi>
where
    TApi: PersonalInfoApi + ?Sized,
{
    pub fn new(service: Arc<PersonalInfoService<TApi>>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            notifier,
            notice_duration: DEFAULT_NOTICE_DURATION,
            state: Mutex::new(FormState::default()),
        }
    }

    pub fn with_notice_duration(mut self, duration: Duration) -> Self {
        self.notice_duration = duration;
        self
    }

    pub async fn form(&self) -> PersonalInfo {
        self.state.lock().await.form.clone()
    }

    pub async fn is_edit_mode(&self) -> bool {
        self.state.lock().await.snapshot.is_some()
    }

    /// Fills the form from the server. A missing profile leaves an empty form to create.
    pub async fn load(&self) -> ProfileOutcome {
        match self.service.get().await {
            Ok(profile) => {
                let mut state = self.state.lock().await;
                state.form = profile;
                state.is_persisted = true;
                FlowOutcome::Completed
            }
            Err(err) => {
                self.notify(Notice::error(err.message()));
                FlowOutcome::Failed(err)
            }
        }
    }

    pub async fn enable_edit_mode(&self) {
        let mut state = self.state.lock().await;
        if state.snapshot.is_none() {
            state.snapshot = Some(state.form.clone());
        }
    }

    /// Changes the form. Ignored outside edit mode.
    pub async fn edit(&self, change: impl FnOnce(&mut PersonalInfo)) -> bool {
        let mut state = self.state.lock().await;
        if state.snapshot.is_none() {
            return false;
        }
        change(&mut state.form);
        true
    }

    pub async fn save(&self) -> ProfileOutcome {
        let outcome = self.persist().await;
        if outcome.is_completed() {
            self.state.lock().await.snapshot = None;
            self.notify(Notice::success("Personal information saved successfully!"));
        }
        outcome
    }

    /// Persists without leaving edit mode. The snapshot moves to the saved values.
    pub async fn quick_save(&self) -> ProfileOutcome {
        let outcome = self.persist().await;
        if outcome.is_completed() {
            let mut state = self.state.lock().await;
            if state.snapshot.is_some() {
                state.snapshot = Some(state.form.clone());
            }
            drop(state);
            self.notifier
                .show(Notice::success("Information saved successfully!").with_duration(QUICK_SAVE_NOTICE));
        }
        outcome
    }

    /// Restores the snapshot taken when edit mode started. The notice is shown either way;
    /// `Cancelled` means there was nothing to restore.
    pub async fn cancel_edit(&self) -> ProfileOutcome {
        let restored = {
            let mut state = self.state.lock().await;
            match state.snapshot.take() {
                Some(snapshot) => {
                    state.form = snapshot;
                    true
                }
                None => false,
            }
        };
        self.notifier
            .show(Notice::info("Changes cancelled.").with_duration(CANCEL_NOTICE));
        if restored {
            FlowOutcome::Completed
        } else {
            FlowOutcome::Cancelled
        }
    }

    async fn persist(&self) -> ProfileOutcome {
        let (form, is_persisted) = {
            let state = self.state.lock().await;
            (state.form.clone(), state.is_persisted)
        };
        if let Err(errors) = form.validate() {
            debug!(?errors, "personal information form rejected");
            self.notify(Notice::error(INVALID_FORM_MESSAGE));
            return FlowOutcome::Invalid(errors);
        }

        let saved = if is_persisted {
            self.service.update(&form).await
        } else {
            self.service.save(&form).await
        };
        match saved {
            Ok(profile) => {
                let mut state = self.state.lock().await;
                state.form = profile;
                state.is_persisted = true;
                FlowOutcome::Completed
            }
            Err(err) => {
                self.notify(Notice::error(err.message()));
                FlowOutcome::Failed(err)
            }
        }
    }

    fn notify(&self, notice: Notice) {
        self.notifier.show(notice.with_duration(self.notice_duration));
    }
}
