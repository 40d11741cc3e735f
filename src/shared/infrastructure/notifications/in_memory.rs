use crate::shared::infrastructure::notifications::{Notice, NoticeLevel, Notifier};
use std::sync::{Mutex, PoisonError};

/// Keeps every notice it is asked to show, in order.
#[derive(Default)]
pub struct InMemoryNotifier {
    shown: Mutex<Vec<Notice>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.shown.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notices().into_iter().map(|notice| notice.message).collect()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices().pop()
    }

    pub fn count(&self, level: NoticeLevel) -> usize {
        self.notices().iter().filter(|notice| notice.level == level).count()
    }

    pub fn clear(&self) {
        self.shown.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl Notifier for InMemoryNotifier {
    fn show(&self, notice: Notice) {
        self.shown.lock().unwrap_or_else(PoisonError::into_inner).push(notice);
    }
}
