//! Reconcile the topics a host wants with the topics the broker has.

use tracing::info;

use crate::client::{TopicClient, WriteOutcome};
use crate::error::ApiError;
use crate::session::HttpSession;
use crate::types::TopicMap;

/// Writes needed to turn `remote` into `desired`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    pub create: Vec<(String, String)>,
    pub rename: Vec<(String, String)>,
    pub delete: Vec<String>,
}

impl SyncPlan {
    /// Diff two topic maps. Topics outside `prefix` on either side are left
    /// out, they would be skipped by the client anyway.
    pub fn between(remote: &TopicMap, desired: &TopicMap, prefix: &str) -> Self {
        let mut plan = SyncPlan::default();
        for (topic, name) in desired.iter().filter(|(t, _)| t.starts_with(prefix)) {
            match remote.get(topic) {
                None => plan.create.push((topic.clone(), name.clone())),
                Some(current) if current != name => plan.rename.push((topic.clone(), name.clone())),
                Some(_) => {}
            }
        }
        plan.delete = remote
            .keys()
            .filter(|topic| topic.starts_with(prefix) && !desired.contains_key(*topic))
            .cloned()
            .collect();
        plan
    }

    pub fn is_empty(&self) -> bool {
        self.create.is_empty() && self.rename.is_empty() && self.delete.is_empty()
    }

    pub fn len(&self) -> usize {
        self.create.len() + self.rename.len() + self.delete.len()
    }
}

/// What `sync_topics` did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub created: usize,
    pub renamed: usize,
    pub deleted: usize,
    /// Writes that failed in transit and were ignored.
    pub failed: usize,
}

impl SyncReport {
    /// Count a failure; true when the write went through.
    fn tally(&mut self, outcome: &WriteOutcome) -> bool {
        match outcome {
            WriteOutcome::Sent { .. } => true,
            WriteOutcome::Failed(_) => {
                self.failed += 1;
                false
            }
            WriteOutcome::Skipped => false,
        }
    }
}

impl<S: HttpSession + ?Sized> TopicClient<'_, S> {
    /// Fetch the broker's topics and apply the writes that make them match
    /// `desired`, one at a time: deletes, then renames, then creates.
    ///
    /// Fetch errors propagate. Write failures are only counted.
    pub async fn sync_topics(&self, desired: &TopicMap) -> Result<SyncReport, ApiError> {
        let remote = self.fetch_all_topics().await?;
        let plan = SyncPlan::between(&remote, desired, &self.api().config().topic_prefix);
        if plan.is_empty() {
            return Ok(SyncReport::default());
        }

        let mut report = SyncReport::default();
        for topic in &plan.delete {
            if report.tally(&self.delete_topic(topic).await) {
                report.deleted += 1;
            }
        }
        for (topic, name) in &plan.rename {
            if report.tally(&self.rename_topic(topic, name).await) {
                report.renamed += 1;
            }
        }
        for (topic, name) in &plan.create {
            if report.tally(&self.create_topic(topic, name).await) {
                report.created += 1;
            }
        }

        info!(
            uid = %self.user_id(),
            created = report.created,
            renamed = report.renamed,
            deleted = report.deleted,
            failed = report.failed,
            "topics synced"
        );
        Ok(report)
    }
}
