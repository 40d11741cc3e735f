// Dialogs that answer from a script instead of a user.
//
// Purpose
// - Drive the attendance view in tests and demos without a terminal.
//
// Responsibilities
// - Answer forms and confirmations in the order they were scripted. An exhausted script
//   cancels, which is what a user closing the dialog would do.
// - Remember what was asked, so callers can assert on it.

use crate::modules::attendance::core::entry_fields::EntryFields;
use crate::modules::attendance::use_cases::browse_records::dialogs_port::{AttendanceDialogs, FormMode};
use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::Mutex;

#[derive(Default)]
pub struct ScriptedDialogs {
    forms: Mutex<VecDeque<Option<EntryFields>>>,
    confirmations: Mutex<VecDeque<bool>>,
    opened: Mutex<Vec<FormMode>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedDialogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submit(&self, fields: EntryFields) -> &Self {
        self.forms.lock().await.push_back(Some(fields));
        self
    }

    pub async fn cancel(&self) -> &Self {
        self.forms.lock().await.push_back(None);
        self
    }

    pub async fn answer(&self, confirmed: bool) -> &Self {
        self.confirmations.lock().await.push_back(confirmed);
        self
    }

    pub async fn opened_forms(&self) -> Vec<FormMode> {
        self.opened.lock().await.clone()
    }

    pub async fn asked_questions(&self) -> Vec<String> {
        self.asked.lock().await.clone()
    }
}

#[async_trait]
impl AttendanceDialogs for ScriptedDialogs {
    async fn open_form(&self, mode: FormMode) -> Option<EntryFields> {
        self.opened.lock().await.push(mode);
        self.forms.lock().await.pop_front().flatten()
    }

    async fn confirm(&self, question: &str) -> bool {
        self.asked.lock().await.push(question.to_string());
        self.confirmations.lock().await.pop_front().unwrap_or(false)
    }
}

#[cfg(test)]
mod scripted_dialogs_tests {
    use super::*;
    use crate::tests::fixtures::{date, record};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn it_should_answer_in_scripted_order_then_cancel() {
        let dialogs = ScriptedDialogs::new();
        let fields = EntryFields::new(Some(date("2025-08-01")), "08:00", "");
        dialogs.submit(fields.clone()).await.cancel().await;

        assert_eq!(dialogs.open_form(FormMode::Create).await, Some(fields));
        assert_eq!(dialogs.open_form(FormMode::Create).await, None);
        assert_eq!(dialogs.open_form(FormMode::Create).await, None);
        assert_eq!(dialogs.opened_forms().await.len(), 3);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_decline_when_no_answer_is_scripted() {
        let dialogs = ScriptedDialogs::new();
        dialogs.answer(true).await;

        assert!(dialogs.confirm("Delete?").await);
        assert!(!dialogs.confirm("Delete?").await);
        assert_eq!(dialogs.asked_questions().await, vec!["Delete?", "Delete?"]);
    }

    #[rstest]
    fn it_should_prefill_the_update_form_from_the_record() {
        let mode = FormMode::Update(record("1", "2025-08-01", "08:00", Some("17:00")));
        assert_eq!(mode.title(), "Update Attendance Record");
        assert_eq!(mode.initial_fields(), EntryFields::new(Some(date("2025-08-01")), "08:00", "17:00"));
        assert_eq!(FormMode::Create.initial_fields(), EntryFields::default());
    }
}
