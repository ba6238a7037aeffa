//! Feeds a JSON Lines file of decoded events to an [`EventProcessor`]

use std::io::BufRead;

use crate::application::indexer::processor_trait::EventProcessor;
use crate::domain::errors::IndexerError;
use crate::domain::models::EventEnvelope;
use crate::utils::logging;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub processed: u64,
    /// Events already committed by an earlier run
    pub skipped: u64,
    pub data_sources_created: u64,
    pub invariant_violations: u64,
}

pub struct EventReplayer {
    progress_log_interval: u64,
}

impl EventReplayer {
    pub fn new(progress_log_interval: u64) -> Self {
        Self {
            progress_log_interval: progress_log_interval.max(1),
        }
    }

    /// Replays every line of `input`, stopping at the first failure
    ///
    /// Events at or before the processor's committed position when the replay
    /// starts are skipped. Any later event out of order is an error.
    pub async fn replay<P, R>(
        &self,
        processor: &mut P,
        input: R,
    ) -> Result<ReplaySummary, IndexerError>
    where
        P: EventProcessor,
        R: BufRead,
    {
        let resume_after = processor.last_committed();
        let mut summary = ReplaySummary::default();

        for (index, line) in input.lines().enumerate() {
            let line = line?;
            let payload = line.trim();
            if payload.is_empty() {
                continue;
            }

            let envelope: EventEnvelope = serde_json::from_str(payload)
                .map_err(|source| IndexerError::JsonError {
                    line: index + 1,
                    source,
                })?;

            if resume_after.map_or(false, |last| envelope.cursor() <= last) {
                summary.skipped += 1;
                continue;
            }

            let outcome = match processor.process(&envelope).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    logging::log_error(&format!("Replay stopped on line {}: {}", index + 1, e));
                    return Err(e);
                }
            };

            summary.processed += 1;
            summary.data_sources_created += outcome.data_sources.len() as u64;
            summary.invariant_violations += outcome.invariant_violations.len() as u64;

            if summary.processed % self.progress_log_interval == 0 {
                logging::log_info(&format!(
                    "Processed {} events, last at {}",
                    summary.processed, outcome.cursor
                ));
            }
        }

        logging::log_info(&format!(
            "Replay finished: {} processed, {} skipped, {} data sources, {} invariant violations",
            summary.processed,
            summary.skipped,
            summary.data_sources_created,
            summary.invariant_violations
        ));

        Ok(summary)
    }
}

impl Default for EventReplayer {
    fn default() -> Self {
        Self::new(1_000)
    }
}
