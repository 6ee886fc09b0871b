use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use crate::data::observation::Observation;
use crate::narrative::{NarrativeGenerator, CONNECTION_ERROR_MESSAGE};
use crate::processing::engine::{analyze_with_horizon, Analysis};

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisPhase {
    Idle,
    /// A narrative request is outstanding.
    Analyzing,
}

/// One complete, published analysis result.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub request_id: RequestId,
    /// Where the series came from: a preset name or a file name.
    pub source: String,
    pub series: Vec<Observation>,
    pub analysis: Analysis,
    /// `None` until the narrative request settles.
    pub narrative: Option<String>,
    pub created_at: DateTime<Local>,
}

impl AnalysisReport {
    fn with_narrative(&self, text: String) -> Self {
        Self {
            narrative: Some(text),
            ..self.clone()
        }
    }
}

struct PendingNarrative {
    request_id: RequestId,
    cancel: CancellationToken,
    rx: oneshot::Receiver<String>,
}

/// Runs one analysis at a time and tracks its narrative request.
pub struct Orchestrator {
    runtime: Handle,
    narrator: Arc<dyn NarrativeGenerator>,
    horizon: usize,
    current: Option<Arc<AnalysisReport>>,
    pending: Option<PendingNarrative>,
    next_request: RequestId,
}

impl Orchestrator {
    pub fn new(runtime: Handle, narrator: Arc<dyn NarrativeGenerator>, horizon: usize) -> Self {
        Self {
            runtime,
            narrator,
            horizon,
            current: None,
            pending: None,
            next_request: 1,
        }
    }

    pub fn phase(&self) -> AnalysisPhase {
        if self.pending.is_some() {
            AnalysisPhase::Analyzing
        } else {
            AnalysisPhase::Idle
        }
    }

    pub fn current(&self) -> Option<Arc<AnalysisReport>> {
        self.current.clone()
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Analyse `series` and start its narrative request.
    ///
    /// Series with fewer than two observations are ignored and `None` is
    /// returned. Otherwise any in-flight narrative is cancelled and a new
    /// report, without narrative, replaces the current one.
    pub fn request(&mut self, source: impl Into<String>, series: Vec<Observation>) -> Option<RequestId> {
        if series.len() < 2 {
            tracing::debug!(points = series.len(), "analysis request ignored");
            return None;
        }

        if let Some(previous) = self.pending.take() {
            tracing::debug!(request_id = previous.request_id, "superseding narrative request");
            previous.cancel.cancel();
        }

        let request_id = self.next_request;
        self.next_request += 1;

        let analysis = analyze_with_horizon(&series, self.horizon);
        let stats = analysis.statistics();
        let source = source.into();
        tracing::info!(
            request_id,
            source = %source,
            points = series.len(),
            slope = stats.slope(),
            quad_a = stats.quad_a(),
            "analysis complete"
        );

        let narrative = self.narrator.generate(series.clone(), stats);
        self.current = Some(Arc::new(AnalysisReport {
            request_id,
            source,
            series,
            analysis,
            narrative: None,
            created_at: Local::now(),
        }));

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let (tx, rx) = oneshot::channel();
        self.runtime.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                text = narrative => {
                    let _ = tx.send(text);
                }
            }
        });

        self.pending = Some(PendingNarrative {
            request_id,
            cancel,
            rx,
        });
        Some(request_id)
    }

    /// Check the outstanding narrative without blocking. Returns true when a
    /// request settled during this call.
    pub fn poll(&mut self) -> bool {
        let Some(pending) = self.pending.as_mut() else {
            return false;
        };
        let text = match pending.rx.try_recv() {
            Ok(text) => text,
            Err(oneshot::error::TryRecvError::Empty) => return false,
            Err(oneshot::error::TryRecvError::Closed) => CONNECTION_ERROR_MESSAGE.to_string(),
        };
        let request_id = pending.request_id;
        self.pending = None;
        self.attach(request_id, text);
        true
    }

    /// Wait for the outstanding narrative, if any, and attach it.
    pub async fn settle(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        let text = pending
            .rx
            .await
            .unwrap_or_else(|_| CONNECTION_ERROR_MESSAGE.to_string());
        self.attach(pending.request_id, text);
    }

    /// Drop any outstanding narrative request and return to idle.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel.cancel();
        }
    }

    fn attach(&mut self, request_id: RequestId, text: String) {
        match &self.current {
            Some(report) if report.request_id == request_id => {
                self.current = Some(Arc::new(report.with_narrative(text)));
            }
            _ => tracing::debug!(request_id, "discarding stale narrative"),
        }
    }
}

impl Drop for Orchestrator {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::observation::from_values;
    use crate::processing::statistics::StatisticsBundle;
    use futures::future::{BoxFuture, FutureExt};

    struct Echo;

    impl NarrativeGenerator for Echo {
        fn generate(&self, series: Vec<Observation>, stats: StatisticsBundle) -> BoxFuture<'static, String> {
            async move { format!("{} points, slope {:.1}", series.len(), stats.slope()) }.boxed()
        }
    }

    fn orchestrator() -> Orchestrator {
        Orchestrator::new(Handle::current(), Arc::new(Echo), 5)
    }

    #[tokio::test]
    async fn test_attach_ignores_other_request_ids() {
        let mut orch = orchestrator();
        let id = orch.request("line", from_values(&[10.0, 20.0, 30.0])).unwrap();
        orch.cancel();

        orch.attach(id + 1, "late".to_string());
        assert!(orch.current().unwrap().narrative.is_none());

        orch.attach(id, "on time".to_string());
        assert_eq!(orch.current().unwrap().narrative.as_deref(), Some("on time"));
    }

    #[tokio::test]
    async fn test_request_ids_increase() {
        let mut orch = orchestrator();
        let first = orch.request("a", from_values(&[1.0, 2.0])).unwrap();
        let second = orch.request("b", from_values(&[1.0, 2.0])).unwrap();
        assert!(second > first);
    }
}
