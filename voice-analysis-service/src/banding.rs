//! UPDRS severity banding
//!
//! One canonical threshold set drives everything derived from a score:
//! the four severity bands at 20/40/60, the coarser three-level risk
//! classification at 20/40, the per-band recommendation texts and the
//! display metadata. Keeping a single source of truth here is what makes
//! the band boundaries testable.

use crate::models::RiskLevel;
use serde::{Deserialize, Serialize};

/// Severity stage derived from a UPDRS score.
///
/// Bands are exhaustive and non-overlapping over the score domain:
/// [0,20] Mild, (20,40] Moderate, (40,60] Advanced, (60,inf) Severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Mild,
    Moderate,
    Advanced,
    Severe,
}

impl Severity {
    pub fn from_score(score: f64) -> Self {
        if score <= 20.0 {
            Severity::Mild
        } else if score <= 40.0 {
            Severity::Moderate
        } else if score <= 60.0 {
            Severity::Advanced
        } else {
            Severity::Severe
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::Advanced => "Advanced",
            Severity::Severe => "Severe",
        }
    }
}

impl RiskLevel {
    /// Risk classification from the same canonical thresholds.
    pub fn from_score(score: f64) -> Self {
        if score <= 20.0 {
            RiskLevel::Low
        } else if score <= 40.0 {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }
}

/// Display metadata for a severity band.
#[derive(Debug, Clone, Serialize)]
pub struct SeverityInfo {
    pub severity: Severity,
    pub label: &'static str,
    pub interpretation: &'static str,
    pub urgency: &'static str,
}

impl SeverityInfo {
    pub fn for_score(score: f64) -> Self {
        match Severity::from_score(score) {
            Severity::Mild => Self {
                severity: Severity::Mild,
                label: "Mild motor symptoms",
                interpretation: "Voice pattern suggests very light or early signs.",
                urgency: "low",
            },
            Severity::Moderate => Self {
                severity: Severity::Moderate,
                label: "Moderate severity",
                interpretation: "Some tremor, speech changes, or slower movement possible.",
                urgency: "medium",
            },
            Severity::Advanced => Self {
                severity: Severity::Advanced,
                label: "Advanced stage",
                interpretation: "Noticeable speech/movement difficulties.",
                urgency: "medium-high",
            },
            Severity::Severe => Self {
                severity: Severity::Severe,
                label: "Severe stage",
                interpretation: "Significant motor impairment.",
                urgency: "high",
            },
        }
    }
}

/// Five recommendation strings per severity band.
pub fn recommendations_for_score(score: f64) -> Vec<String> {
    let texts: [&str; 5] = match Severity::from_score(score) {
        Severity::Severe => [
            "Immediate consultation with a movement disorder specialist is strongly recommended",
            "Consider comprehensive neurological evaluation",
            "Discuss advanced treatment options with your doctor",
            "Physical therapy and speech therapy may be beneficial",
            "Regular monitoring and medication adjustments may be needed",
        ],
        Severity::Advanced => [
            "Schedule an appointment with a neurologist soon",
            "Consider speech therapy to address communication difficulties",
            "Physical therapy may help with movement challenges",
            "Regular exercise within your comfort level",
            "Monitor symptoms and report changes to your doctor",
        ],
        Severity::Moderate => [
            "Consult with a neurologist for proper evaluation",
            "Regular exercise and physical activity are important",
            "Consider speech exercises if speech changes are noted",
            "Maintain a healthy diet and lifestyle",
            "Keep a symptom diary for medical appointments",
        ],
        Severity::Mild => [
            "Continue regular health monitoring",
            "Maintain an active lifestyle with regular exercise",
            "Consider baseline neurological evaluation if concerned",
            "Practice good vocal hygiene and speech exercises",
            "Stay informed about early signs and symptoms",
        ],
    };
    texts.iter().map(|s| (*s).to_string()).collect()
}
