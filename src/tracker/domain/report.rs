//! Append-only sprint records: daily reports, reviews, retrospectives.

use super::{DailyReportId, RetrospectiveId, SprintId, SprintReviewId, TrackerDomainError, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Discussion text stored on retrospectives created by sprint closure.
pub const AUTOMATIC_RETROSPECTIVE: &str = "Automatic wrap-up.";

/// A developer's stand-up report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyReport {
    /// Internal identifier.
    pub id: DailyReportId,
    /// Reporting user.
    pub user_id: UserId,
    /// Active sprint at submission time.
    pub sprint_id: SprintId,
    /// Day of the report.
    pub report_date: NaiveDate,
    /// Work finished since the last report.
    pub completed: String,
    /// Work planned for today.
    pub planned: String,
    /// Anything blocking progress.
    pub blockers: String,
}

/// A daily report that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDailyReport {
    /// Reporting user.
    pub user_id: UserId,
    /// Active sprint at submission time.
    pub sprint_id: SprintId,
    /// Day of the report.
    pub report_date: NaiveDate,
    /// Work finished since the last report.
    pub completed: String,
    /// Work planned for today.
    pub planned: String,
    /// Anything blocking progress.
    pub blockers: String,
}

/// A sprint review written by a product owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SprintReview {
    /// Internal identifier.
    pub id: SprintReviewId,
    /// Reviewed sprint.
    pub sprint_id: SprintId,
    /// Author.
    pub author_id: UserId,
    /// Day of the review.
    pub review_date: NaiveDate,
    /// Review notes.
    pub notes: String,
    /// Share of sprint work completed, from 0 to 100.
    pub completion_percentage: f64,
}

/// A sprint review that has not been stored yet.
///
/// Only [`NewSprintReview::new`] builds one, so the completion percentage is
/// always a number from 0 to 100.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSprintReview {
    sprint_id: SprintId,
    author_id: UserId,
    review_date: NaiveDate,
    notes: String,
    completion_percentage: f64,
}

impl NewSprintReview {
    /// Validates and creates a review draft.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::CompletionOutOfRange`] when
    /// `completion_percentage` is NaN or outside `0..=100`.
    pub fn new(
        sprint_id: SprintId,
        author_id: UserId,
        review_date: NaiveDate,
        notes: impl Into<String>,
        completion_percentage: f64,
    ) -> Result<Self, TrackerDomainError> {
        if !(0.0..=100.0).contains(&completion_percentage) {
            return Err(TrackerDomainError::CompletionOutOfRange);
        }
        Ok(Self {
            sprint_id,
            author_id,
            review_date,
            notes: notes.into(),
            completion_percentage,
        })
    }

    /// Reviewed sprint.
    #[must_use]
    pub const fn sprint_id(&self) -> SprintId {
        self.sprint_id
    }

    /// Author.
    #[must_use]
    pub const fn author_id(&self) -> UserId {
        self.author_id
    }

    /// Day of the review.
    #[must_use]
    pub const fn review_date(&self) -> NaiveDate {
        self.review_date
    }

    /// Review notes.
    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Share of sprint work completed.
    #[must_use]
    pub const fn completion_percentage(&self) -> f64 {
        self.completion_percentage
    }
}

impl SprintReview {
    /// Materialises a freshly inserted review.
    #[must_use]
    pub fn from_new(id: SprintReviewId, review: NewSprintReview) -> Self {
        Self {
            id,
            sprint_id: review.sprint_id,
            author_id: review.author_id,
            review_date: review.review_date,
            notes: review.notes,
            completion_percentage: review.completion_percentage,
        }
    }
}

/// A post-sprint retrospective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Retrospective {
    /// Internal identifier.
    pub id: RetrospectiveId,
    /// The closed sprint.
    pub sprint_id: SprintId,
    /// The user who closed the sprint.
    pub held_by: UserId,
    /// Day of the retrospective.
    pub held_on: NaiveDate,
    /// Discussion summary.
    pub discussion: String,
}

/// A retrospective that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRetrospective {
    /// The closed sprint.
    pub sprint_id: SprintId,
    /// The user who closed the sprint.
    pub held_by: UserId,
    /// Day of the retrospective.
    pub held_on: NaiveDate,
    /// Discussion summary.
    pub discussion: String,
}

impl NewRetrospective {
    /// Creates the retrospective generated when a sprint is finalized.
    #[must_use]
    pub fn automatic(sprint_id: SprintId, held_by: UserId, held_on: NaiveDate) -> Self {
        Self {
            sprint_id,
            held_by,
            held_on,
            discussion: AUTOMATIC_RETROSPECTIVE.to_owned(),
        }
    }
}
