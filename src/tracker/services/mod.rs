//! Service layer orchestration for the tracker.

mod lifecycle;
mod people;
mod reporting;

pub use lifecycle::{
    Approval, CHAT_PROJECT_DESCRIPTION, LifecycleError, LifecycleResult, Registration,
    TrackerService,
};
pub use people::Promotion;
pub use reporting::DailyReportDraft;
