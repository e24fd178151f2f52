// Copyright 2026 imdb-scrape contributors
// SPDX-License-Identifier: Apache-2.0

//! Progress event types and broadcast channel for batch scraping.
//!
//! The batch driver emits `ProgressEvent`s as rows complete, which flow
//! through a `tokio::sync::broadcast` channel to any subscriber (the CLI
//! progress bar, tests). When no subscriber exists, events are dropped.

use serde::{Deserialize, Serialize};

/// A progress event emitted during a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// The batch run this event belongs to.
    pub request_id: String,
    /// Monotonically increasing sequence number.
    pub seq: u64,
    /// The kind of progress event.
    pub event: ProgressEventKind,
}

/// The specific kind of progress event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProgressEventKind {
    /// A batch run has started.
    BatchStarted { total: usize },
    /// One input row finished, whether or not its page could be fetched.
    ItemProcessed {
        index: usize,
        url: String,
        fetched: bool,
        /// The row's metascore on the 0 to 10 scale, after fallback.
        meta_score: Option<f64>,
        /// Rows completed so far as a whole percentage of the batch.
        percent_complete: u8,
    },
    /// The batch run finished.
    BatchComplete {
        total: usize,
        unavailable: usize,
        elapsed_ms: u64,
    },
}

/// Sender handle for emitting progress events.
pub type ProgressSender = tokio::sync::broadcast::Sender<ProgressEvent>;

/// Receiver handle for consuming progress events.
pub type ProgressReceiver = tokio::sync::broadcast::Receiver<ProgressEvent>;

/// Create a new progress broadcast channel with a bounded buffer.
pub fn channel() -> (ProgressSender, ProgressReceiver) {
    tokio::sync::broadcast::channel(256)
}

/// Emit a progress event, ignoring send errors (no receivers listening).
pub fn emit(
    tx: Option<&ProgressSender>,
    request_id: &str,
    seq: &mut u64,
    event: ProgressEventKind,
) {
    if let Some(sender) = tx {
        *seq += 1;
        let _ = sender.send(ProgressEvent {
            request_id: request_id.to_string(),
            seq: *seq,
            event,
        });
    }
}

/// Whole percentage of `completed` out of `total`; an empty batch is 100%.
pub fn percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    (completed.min(total) * 100 / total) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_event_serialization() {
        let event = ProgressEvent {
            request_id: "batch-1".to_string(),
            seq: 3,
            event: ProgressEventKind::ItemProcessed {
                index: 2,
                url: "https://www.imdb.com/title/tt0111161".to_string(),
                fetched: true,
                meta_score: Some(8.0),
                percent_complete: 75,
            },
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("ItemProcessed"));
        assert!(json.contains("tt0111161"));

        let parsed: ProgressEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.request_id, "batch-1");
        assert_eq!(parsed.seq, 3);
        assert_eq!(parsed.event, event.event);
    }

    #[test]
    fn test_emit_increments_seq() {
        let (tx, mut rx) = channel();
        let mut seq = 0;
        emit(
            Some(&tx),
            "run",
            &mut seq,
            ProgressEventKind::BatchStarted { total: 2 },
        );
        emit(
            Some(&tx),
            "run",
            &mut seq,
            ProgressEventKind::BatchComplete {
                total: 2,
                unavailable: 0,
                elapsed_ms: 5,
            },
        );
        assert_eq!(seq, 2);

        let first = tokio_test::block_on(rx.recv()).unwrap();
        assert_eq!(first.seq, 1);
        assert_eq!(first.event, ProgressEventKind::BatchStarted { total: 2 });
    }

    #[test]
    fn test_channel_no_receivers() {
        let (tx, rx) = channel();
        drop(rx);
        emit(
            Some(&tx),
            "test",
            &mut 0,
            ProgressEventKind::BatchStarted { total: 0 },
        );
    }

    #[test]
    fn test_emit_none_sender() {
        let mut seq = 0;
        emit(
            None,
            "test",
            &mut seq,
            ProgressEventKind::BatchStarted { total: 1 },
        );
        assert_eq!(seq, 0);
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0, 4), 0);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(4, 4), 100);
        assert_eq!(percent(0, 0), 100);
    }
}
