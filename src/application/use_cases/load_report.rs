use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task;

use crate::application::dto::RawPayload;
use crate::ports::outbound::ProgressReporter;
use crate::report_aggregation::domain::AggregationModel;
use crate::report_aggregation::services::payload_decoder::{self, PayloadEncoding};
use crate::report_aggregation::services::{aggregator, report_parser};
use crate::shared::error::ReportError;
use crate::shared::Result;

/// State of the load pipeline.
///
/// Transitions are strictly sequential: `Idle → Decoding → Inflating (gzip
/// payloads only) → Parsing → Aggregating → Ready`. Any stage failure goes
/// straight to terminal `Failed`; `Ready` is the only state in which the
/// model exists. An unexpanded placeholder payload jumps from `Idle` to
/// `Failed` without ever entering `Decoding`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Decoding,
    Inflating,
    Parsing,
    Aggregating,
    Ready,
    Failed,
}

impl LoadPhase {
    /// Progress percentage shown for this phase
    pub fn percentage(&self) -> usize {
        match self {
            LoadPhase::Idle => 0,
            LoadPhase::Decoding => 10,
            LoadPhase::Inflating => 20,
            LoadPhase::Parsing => 55,
            LoadPhase::Aggregating => 95,
            LoadPhase::Ready | LoadPhase::Failed => 100,
        }
    }

    /// Progress message shown for this phase
    pub fn message(&self) -> &'static str {
        match self {
            LoadPhase::Idle => "Waiting for report data...",
            LoadPhase::Decoding => "Loading scan report data...",
            LoadPhase::Inflating => "Uncompressing scan report data...",
            LoadPhase::Parsing => "Parsing scan report data...",
            LoadPhase::Aggregating => "Processing scan results...",
            LoadPhase::Ready => "Scan report ready",
            LoadPhase::Failed => "Scan report could not be loaded",
        }
    }
}

impl std::fmt::Display for LoadPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LoadPhase::Idle => "idle",
            LoadPhase::Decoding => "decoding",
            LoadPhase::Inflating => "inflating",
            LoadPhase::Parsing => "parsing",
            LoadPhase::Aggregating => "aggregating",
            LoadPhase::Ready => "ready",
            LoadPhase::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// LoadReportUseCase - drives the whole ingestion pipeline for one payload
///
/// The CPU-heavy pipeline body (decode, inflate, parse, aggregate) runs in a
/// single blocking task per load; phase transitions stream back over a
/// channel for progress reporting, and the task's join handle is the one
/// completion signal, awaited exactly once. There is no cancellation: a
/// failed load is recovered only by executing a fresh one.
///
/// # Type Parameters
/// * `PR` - ProgressReporter implementation
pub struct LoadReportUseCase<PR: ProgressReporter> {
    progress_reporter: PR,
}

impl<PR: ProgressReporter> LoadReportUseCase<PR> {
    /// Creates a new LoadReportUseCase with the injected reporter
    pub fn new(progress_reporter: PR) -> Self {
        Self { progress_reporter }
    }

    /// Executes the load pipeline and returns the aggregation model
    ///
    /// # Arguments
    /// * `payload` - The embedded report data block, undecoded
    ///
    /// # Returns
    /// The immutable aggregation model on success; recoverable aggregation
    /// issues are reported as warnings, not errors.
    pub async fn execute(&self, payload: RawPayload) -> Result<AggregationModel> {
        let (phase_tx, mut phase_rx) = mpsc::unbounded_channel();

        let pipeline = task::spawn_blocking(move || run_pipeline(payload, phase_tx));

        // The channel closes when the pipeline drops its sender, so this
        // loop ends exactly when the blocking task is done producing phases.
        while let Some(phase) = phase_rx.recv().await {
            self.report_phase(phase);
        }

        let outcome = pipeline
            .await
            .map_err(|e| anyhow::anyhow!("Report load task did not complete: {}", e))?;

        match outcome {
            Ok(model) => {
                for issue in model.issues() {
                    self.progress_reporter
                        .report_error(&format!("⚠️  Warning: {}", issue));
                }
                self.progress_reporter.report_completion(&format!(
                    "✅ Scan report ready: {} package(s), {} rule violation(s), {} vulnerability(ies)",
                    model.packages().len(),
                    model.rule_violations().len(),
                    model.vulnerabilities().len()
                ));
                Ok(model)
            }
            Err(error) => {
                self.progress_reporter
                    .report_error("❌ No scan results could be loaded...");
                Err(error.into())
            }
        }
    }

    fn report_phase(&self, phase: LoadPhase) {
        match phase {
            LoadPhase::Decoding
            | LoadPhase::Inflating
            | LoadPhase::Parsing
            | LoadPhase::Aggregating => {
                self.progress_reporter
                    .report_progress(phase.percentage(), 100, Some(phase.message()));
            }
            // Ready and Failed are reported after the join, with detail
            LoadPhase::Idle | LoadPhase::Ready | LoadPhase::Failed => {}
        }
    }
}

/// The pipeline body; runs on the blocking thread pool.
///
/// Emits each phase right before entering it. Send failures are ignored:
/// the receiver going away only means nobody is watching progress anymore.
fn run_pipeline(
    payload: RawPayload,
    phases: UnboundedSender<LoadPhase>,
) -> std::result::Result<AggregationModel, ReportError> {
    // Placeholder detection happens while still idle; an untouched report
    // template never enters the decode stage.
    if payload_decoder::is_absent(&payload.text) {
        let _ = phases.send(LoadPhase::Failed);
        return Err(ReportError::DataAbsent);
    }

    let _ = phases.send(LoadPhase::Decoding);
    let encoding = payload_decoder::encoding_for(&payload.content_type)
        .map_err(|e| fail(&phases, e))?;
    let json = match encoding {
        PayloadEncoding::Json => payload.text,
        PayloadEncoding::GzipBase64 => {
            let bytes =
                payload_decoder::decode_base64(&payload.text).map_err(|e| fail(&phases, e))?;
            let _ = phases.send(LoadPhase::Inflating);
            payload_decoder::inflate_to_utf8(&bytes).map_err(|e| fail(&phases, e))?
        }
    };

    let _ = phases.send(LoadPhase::Parsing);
    let raw = report_parser::parse(&json).map_err(|e| fail(&phases, e))?;

    let _ = phases.send(LoadPhase::Aggregating);
    let model = aggregator::aggregate(raw);

    let _ = phases.send(LoadPhase::Ready);
    Ok(model)
}

fn fail(phases: &UnboundedSender<LoadPhase>, error: ReportError) -> ReportError {
    let _ = phases.send(LoadPhase::Failed);
    error
}
