//! Submission manager: visitor proposals waiting for review.

use chrono::{DateTime, Utc};
use m5_core::{Product, Submission, SubmissionDraft, SubmissionId};

use super::Catalog;

/// Pending submissions in the order they arrived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionQueue {
    submissions: Vec<Submission>,
}

impl SubmissionQueue {
    #[must_use]
    pub const fn new(submissions: Vec<Submission>) -> Self {
        Self { submissions }
    }

    /// Append a pending submission built from `draft`, submitted at `now`.
    pub fn create(&mut self, draft: SubmissionDraft, now: DateTime<Utc>) -> Submission {
        let id = SubmissionId::generate(now, |candidate| self.get(candidate).is_some());
        let submission = draft.into_submission(id, now);
        self.submissions.push(submission.clone());
        submission
    }

    /// Publish the submission with `id` into `catalog` and drop it from the
    /// queue.
    ///
    /// The new product copies the submission's product fields and gets a
    /// fresh id and creation time. Returns `None` (changing nothing) if no
    /// submission has that id.
    pub fn approve(
        &mut self,
        id: &SubmissionId,
        catalog: &mut Catalog,
        now: DateTime<Utc>,
    ) -> Option<Product> {
        let submission = self.take(id)?;
        Some(catalog.create(submission.product_draft(), now))
    }

    /// Remove the submission with `id`, returning it if it existed.
    ///
    /// There is no undo; callers confirm with the operator first.
    pub fn reject(&mut self, id: &SubmissionId) -> Option<Submission> {
        self.take(id)
    }

    fn take(&mut self, id: &SubmissionId) -> Option<Submission> {
        let index = self.submissions.iter().position(|s| &s.id == id)?;
        Some(self.submissions.remove(index))
    }

    #[must_use]
    pub fn get(&self, id: &SubmissionId) -> Option<&Submission> {
        self.submissions.iter().find(|s| &s.id == id)
    }

    /// Every pending submission, oldest first.
    #[must_use]
    pub fn list(&self) -> &[Submission] {
        &self.submissions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.submissions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }

    /// Swap in a whole submission list (imports).
    pub(crate) fn replace(&mut self, submissions: Vec<Submission>) {
        self.submissions = submissions;
    }
}
