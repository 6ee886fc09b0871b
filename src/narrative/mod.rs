pub mod gemini;
pub mod prompt;

use futures::future::BoxFuture;

use crate::data::observation::Observation;
use crate::error::NarrativeError;
use crate::processing::statistics::StatisticsBundle;

pub use gemini::GeminiNarrator;

pub const MISSING_CREDENTIALS_MESSAGE: &str =
    "API key not configured. Set GEMINI_API_KEY to generate the AI report.";
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Error connecting to the AI service to generate the text report.";
pub const EMPTY_REPORT_MESSAGE: &str = "The AI service returned an empty report.";

/// Produces a markdown report for an analysed series.
///
/// The returned future always resolves to displayable text: failures are
/// reported through one of the fallback messages, never as an error.
pub trait NarrativeGenerator: Send + Sync {
    fn generate(
        &self,
        series: Vec<Observation>,
        stats: StatisticsBundle,
    ) -> BoxFuture<'static, String>;
}

/// Fallback text shown in place of a report that could not be produced.
pub fn fallback_message(err: &NarrativeError) -> &'static str {
    match err {
        NarrativeError::MissingCredentials => MISSING_CREDENTIALS_MESSAGE,
        NarrativeError::EmptyResponse => EMPTY_REPORT_MESSAGE,
        NarrativeError::Transport(_) | NarrativeError::Http { .. } => CONNECTION_ERROR_MESSAGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallbacks_are_distinct() {
        assert_eq!(
            fallback_message(&NarrativeError::MissingCredentials),
            MISSING_CREDENTIALS_MESSAGE
        );
        assert_eq!(
            fallback_message(&NarrativeError::Http {
                status: 503,
                message: "unavailable".into()
            }),
            CONNECTION_ERROR_MESSAGE
        );
        assert_ne!(MISSING_CREDENTIALS_MESSAGE, CONNECTION_ERROR_MESSAGE);
    }
}
