//! Confidence scoring and cache admission

use once_cell::sync::Lazy;
use regex::Regex;

use super::LegalResponse;

/// Upper bound of any computed confidence
pub const MAX_CONFIDENCE: f32 = 0.95;

const SUCCESS_BONUS: f32 = 0.1;
const CITATION_BONUS: f32 = 0.1;
const LENGTH_BONUS: f32 = 0.05;

/// Answers longer than this many characters earn the length bonus
const DETAILED_ANSWER_CHARS: usize = 500;

/// Tokens indicating the answer cites legislation
static CITATION_INDICATORS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:acts?|sections?|articles?|constitution|regulations?|cap)\b").unwrap()
});

/// Outcome of an admission check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdmissionDecision {
    pub confidence: f32,
    pub admit: bool,
}

/// Decides whether a generated response is worth caching
#[derive(Debug, Clone)]
pub struct AdmissionController {
    threshold: f32,
}

impl AdmissionController {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Score a response: its declared confidence plus bonuses for success,
    /// legislative citations and a detailed answer, capped at 0.95.
    pub fn score(&self, response: &LegalResponse) -> f32 {
        let mut confidence = response.confidence;

        if response.success {
            confidence += SUCCESS_BONUS;
        }

        if CITATION_INDICATORS.is_match(&response.answer) {
            confidence += CITATION_BONUS;
        }

        if response.answer.chars().count() > DETAILED_ANSWER_CHARS {
            confidence += LENGTH_BONUS;
        }

        confidence.clamp(0.0, MAX_CONFIDENCE)
    }

    /// Forced admissions skip the threshold but still carry the computed score
    pub fn should_admit(&self, response: &LegalResponse, forced: bool) -> AdmissionDecision {
        let confidence = self.score(response);

        AdmissionDecision {
            confidence,
            admit: forced || confidence >= self.threshold,
        }
    }
}

impl Default for AdmissionController {
    fn default() -> Self {
        Self::new(0.6)
    }
}
