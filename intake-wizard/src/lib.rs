//! Recording wizard for NeuroVoice Engine
//!
//! Orchestrates the submission workflow: collect patient details, attach
//! exactly one voice sample (microphone capture or file), preview, and
//! submit through the scoring pipeline. Single-threaded and event-driven;
//! the owning UI loop calls [`IntakeWizard::poll_capture`] to drive the
//! recording ceiling.
//!
//! The completed [`voice_analysis_service::VoiceRecording`] is returned
//! from [`IntakeWizard::submit`] directly; result handoff to a results
//! view is by value or by recording id, never through shared mutable
//! state.

pub mod analyzer;
pub mod error;
pub mod wizard;

pub use analyzer::VoiceAnalyzer;
pub use error::{WizardError, WizardResult};
pub use wizard::{IntakeWizard, WizardStep};
