use std::time::Duration;
use tracing::{info, instrument};

use crate::config::DEFAULT_PACING_DELAY_MS;
use crate::model::{BatchSummary, Entry, InsertResult};
use crate::supabase::WaitlistService;

/// Pushes entries one at a time, pausing between inserts.
#[derive(Debug, Clone, Copy)]
pub struct BatchRunner {
    pacing: Duration,
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_PACING_DELAY_MS))
    }
}

impl BatchRunner {
    pub fn new(pacing: Duration) -> Self {
        Self { pacing }
    }

    /// Insert every entry in order. A failed insert does not stop the batch;
    /// the returned results line up with `entries`.
    #[instrument(skip_all, fields(total = entries.len()))]
    pub async fn run(&self, service: &dyn WaitlistService, entries: &[Entry]) -> Vec<InsertResult> {
        let total = entries.len();
        let mut results = Vec::with_capacity(total);

        for (i, entry) in entries.iter().enumerate() {
            println!("Processing entry {}/{}...", i + 1, total);
            results.push(service.insert(entry).await);

            if !self.pacing.is_zero() {
                tokio::time::sleep(self.pacing).await;
            }
        }

        let summary = BatchSummary::from_results(&results);
        println!(
            "\nSummary: {} successful, {} failed",
            summary.successful, summary.failed
        );
        info!(
            successful = summary.successful,
            failed = summary.failed,
            "batch finished"
        );
        results
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    /// Records inserted payloads; fails for any email in `fail_emails`.
    #[derive(Clone, Default)]
    pub(crate) struct RecordingService {
        fail_emails: HashSet<String>,
        calls: Arc<Mutex<Vec<Entry>>>,
    }

    impl RecordingService {
        pub(crate) fn failing_for(emails: &[&str]) -> Self {
            Self {
                fail_emails: emails.iter().map(|e| e.to_string()).collect(),
                ..Default::default()
            }
        }

        pub(crate) async fn calls(&self) -> Vec<Entry> {
            self.calls.lock().await.clone()
        }
    }

    #[async_trait]
    impl WaitlistService for RecordingService {
        async fn insert(&self, entry: &Entry) -> InsertResult {
            self.calls.lock().await.push(entry.clone());
            if self.fail_emails.contains(&entry.email) {
                InsertResult::failed(entry.to_payload(), "duplicate key value")
            } else {
                InsertResult::inserted(entry.to_payload(), 201)
            }
        }

        async fn count(&self) -> u64 {
            self.calls.lock().await.len() as u64
        }
    }

    pub(crate) fn entry(email: &str) -> Entry {
        Entry {
            email: email.into(),
            name: "Test User".into(),
            phone: "+15551112222".into(),
            gender: "Other".into(),
            age: 30,
            instagram: "@test".into(),
            linkedin: None,
            twitter: None,
            batch_number: Some(2),
        }
    }

    #[tokio::test]
    async fn results_preserve_length_and_order() {
        let service = RecordingService::default();
        let entries = vec![entry("a@x.com"), entry("b@x.com"), entry("c@x.com")];

        let results = BatchRunner::new(Duration::ZERO).run(&service, &entries).await;

        assert_eq!(results.len(), entries.len());
        let emails: Vec<_> = results.iter().map(|r| r.data["email"].clone()).collect();
        assert_eq!(emails, vec!["a@x.com", "b@x.com", "c@x.com"]);
        assert_eq!(service.calls().await, entries);
    }

    #[tokio::test]
    async fn failures_do_not_block_later_entries() {
        let service = RecordingService::failing_for(&["b@x.com"]);
        let entries = vec![entry("a@x.com"), entry("b@x.com"), entry("c@x.com")];

        let results = BatchRunner::new(Duration::ZERO).run(&service, &entries).await;

        assert_eq!(service.calls().await.len(), 3);
        assert!(results[0].success);
        assert!(!results[1].success);
        assert_eq!(results[1].error.as_deref(), Some("duplicate key value"));
        assert!(results[2].success);

        let summary = BatchSummary::from_results(&results);
        assert_eq!(summary.successful, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total(), entries.len());
    }

    #[tokio::test]
    async fn empty_batch_makes_no_calls() {
        let service = RecordingService::default();
        let results = BatchRunner::default().run(&service, &[]).await;
        assert!(results.is_empty());
        assert!(service.calls().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn paces_between_inserts() {
        let service = RecordingService::default();
        let entries = vec![entry("a@x.com"), entry("b@x.com")];
        let started = tokio::time::Instant::now();

        BatchRunner::new(Duration::from_millis(100))
            .run(&service, &entries)
            .await;

        assert!(started.elapsed() >= Duration::from_millis(200));
    }
}
