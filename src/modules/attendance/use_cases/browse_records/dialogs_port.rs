use crate::modules::attendance::core::entry_fields::EntryFields;
use crate::modules::attendance::core::record::AttendanceRecord;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update(AttendanceRecord),
}

impl FormMode {
    pub fn title(&self) -> &'static str {
        match self {
            FormMode::Create => "Add Attendance Record",
            FormMode::Update(_) => "Update Attendance Record",
        }
    }

    /// What the form shows when it opens.
    pub fn initial_fields(&self) -> EntryFields {
        match self {
            FormMode::Create => EntryFields::default(),
            FormMode::Update(record) => EntryFields::from(record),
        }
    }
}

/// Modal interactions the attendance view needs from its host.
#[async_trait]
pub trait AttendanceDialogs: Send + Sync {
    /// `None` when the user cancels the form.
    async fn open_form(&self, mode: FormMode) -> Option<EntryFields>;

    /// `true` only on an explicit yes.
    async fn confirm(&self, question: &str) -> bool;
}
