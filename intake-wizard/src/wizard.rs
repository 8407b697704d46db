//! The 4-step recording and submission wizard
//!
//! `Information -> UploadRecord -> Preview -> Submit`, linear with free
//! backward navigation. Direct jumps re-run the same guards as linear
//! advance; a failed guard aborts the jump with no state change. The
//! wizard owns the capture controller and enforces the one-audio-source
//! invariant the capture crate deliberately leaves to it.

use crate::analyzer::VoiceAnalyzer;
use crate::error::{WizardError, WizardResult};
use audio_capture::{
    AudioFile, AudioSource, CaptureController, CaptureEvent, InputSource, RecordedAudio,
    StopReason, WAV_MIME,
};
use tracing::info;
use voice_analysis_service::{AudioPayload, Gender, PatientInfo, VoiceRecording};

/// Wizard steps in order. The discriminant order drives the guard
/// comparisons, so keep it matching the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    Information,
    UploadRecord,
    Preview,
    Submit,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Information,
        WizardStep::UploadRecord,
        WizardStep::Preview,
        WizardStep::Submit,
    ];

    /// 1-based step number as shown on the step indicator.
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Information => 1,
            WizardStep::UploadRecord => 2,
            WizardStep::Preview => 3,
            WizardStep::Submit => 4,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.number() == n)
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Information => "Information",
            WizardStep::UploadRecord => "Upload/Record",
            WizardStep::Preview => "Preview",
            WizardStep::Submit => "Submit",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WizardStep::Information => "Patient basic details",
            WizardStep::UploadRecord => "Voice sample",
            WizardStep::Preview => "Review your recording",
            WizardStep::Submit => "Confirm and analyze",
        }
    }

    fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    fn prev(&self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }
}

pub struct IntakeWizard {
    step: WizardStep,
    patient: PatientInfo,
    capture: CaptureController,
    file: Option<AudioFile>,
    recorded: Option<RecordedAudio>,
}

impl IntakeWizard {
    /// Create a wizard capturing from the given input source.
    pub fn new(source: Box<dyn InputSource>) -> Self {
        Self::with_capture(CaptureController::new(source))
    }

    /// Create a wizard around an existing capture controller (tests use
    /// this to shorten the recording ceiling).
    pub fn with_capture(capture: CaptureController) -> Self {
        Self {
            step: WizardStep::Information,
            patient: PatientInfo {
                full_name: String::new(),
                age: 0,
                gender: Gender::Male,
                test_time: 0.0,
            },
            capture,
            file: None,
            recorded: None,
        }
    }

    pub fn current_step(&self) -> WizardStep {
        self.step
    }

    pub fn patient_info(&self) -> &PatientInfo {
        &self.patient
    }

    pub fn set_patient_info(&mut self, patient: PatientInfo) {
        self.patient = patient;
    }

    // === Navigation ===

    /// Advance one step, running the guard for the target step.
    /// Already on Submit is a no-op.
    pub fn next(&mut self) -> WizardResult<WizardStep> {
        match self.step.next() {
            Some(target) => {
                self.guard_for(target)?;
                self.step = target;
                Ok(target)
            }
            None => Ok(self.step),
        }
    }

    /// Backward navigation is always allowed.
    pub fn back(&mut self) -> WizardStep {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
        self.step
    }

    /// Jump directly to a step via the indicator. Re-validates the same
    /// guards as linear advance; on failure the current step is kept.
    pub fn go_to(&mut self, target: WizardStep) -> WizardResult<()> {
        self.guard_for(target)?;
        self.step = target;
        Ok(())
    }

    /// Whether the Next button should be enabled on the current step.
    pub fn can_proceed(&self) -> bool {
        match self.step {
            WizardStep::Information => self.patient.validate().is_ok(),
            WizardStep::UploadRecord => self.has_audio(),
            WizardStep::Preview => self.has_audio() && self.patient.validate().is_ok(),
            WizardStep::Submit => true,
        }
    }

    fn guard_for(&self, target: WizardStep) -> WizardResult<()> {
        if target >= WizardStep::UploadRecord {
            self.patient
                .validate()
                .map_err(WizardError::InvalidPatientInfo)?;
        }
        if target >= WizardStep::Preview && !self.has_audio() {
            return Err(WizardError::NoAudioSource);
        }
        Ok(())
    }

    // === Audio input, one source at a time ===

    /// Start a microphone capture. Any previously selected file or
    /// recorded sample is discarded first; a device failure leaves the
    /// wizard unchanged apart from that.
    pub fn start_recording(&mut self) -> WizardResult<()> {
        self.file = None;
        self.recorded = None;
        self.capture.start()?;
        Ok(())
    }

    /// Stop the capture manually and keep the finished sample.
    pub fn stop_recording(&mut self) -> WizardResult<StopReason> {
        let audio = self.capture.stop()?;
        let reason = audio.stop_reason;
        self.recorded = Some(audio);
        Ok(reason)
    }

    /// Drive the capture ceiling. Call from the owning event loop; when
    /// the ceiling stops a capture the finished sample is kept exactly
    /// as a manual stop would have kept it.
    pub fn poll_capture(&mut self) -> Option<WizardResult<StopReason>> {
        match self.capture.poll() {
            Some(CaptureEvent::Stopped { audio }) => {
                let reason = audio.stop_reason;
                self.file = None;
                self.recorded = Some(audio);
                Some(Ok(reason))
            }
            Some(CaptureEvent::Failed(e)) => Some(Err(e.into())),
            None => None,
        }
    }

    /// Attach a user-selected file. Rejected while the microphone is
    /// live; otherwise any recorded sample is discarded.
    pub fn attach_file(&mut self, file: AudioFile) -> WizardResult<()> {
        if self.capture.is_recording() {
            return Err(WizardError::RecordingInProgress);
        }
        self.recorded = None;
        self.file = Some(file);
        Ok(())
    }

    pub fn remove_file(&mut self) {
        self.file = None;
    }

    pub fn remove_recording(&mut self) {
        self.recorded = None;
    }

    pub fn is_recording(&self) -> bool {
        self.capture.is_recording()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.capture.elapsed_secs()
    }

    pub fn has_audio(&self) -> bool {
        self.file.is_some() || self.recorded.is_some()
    }

    /// The attached source, for the preview step.
    pub fn audio_source(&self) -> Option<AudioSource> {
        if let Some(f) = &self.file {
            Some(AudioSource::File(f.clone()))
        } else {
            self.recorded.clone().map(AudioSource::Recorded)
        }
    }

    fn audio_payload(&self) -> Option<AudioPayload> {
        if let Some(f) = &self.file {
            Some(AudioPayload {
                file_name: Some(f.file_name.clone()),
                mime_type: f.mime_type.clone(),
                data: f.data.clone(),
            })
        } else {
            self.recorded.as_ref().map(|r| AudioPayload {
                file_name: None,
                mime_type: WAV_MIME.into(),
                data: r.data.clone(),
            })
        }
    }

    // === Terminal action ===

    /// Submit the collected input through the upload pipeline.
    ///
    /// Both guards are re-checked first; nothing reaches the network on
    /// a validation failure. On success the completed recording (with
    /// its prediction result) is returned for the caller to hand to the
    /// results view. On failure the wizard keeps its step and inputs, so
    /// the submission can simply be retried.
    pub async fn submit<A>(&mut self, analyzer: &A) -> WizardResult<VoiceRecording>
    where
        A: VoiceAnalyzer + Sync + ?Sized,
    {
        let payload = self.audio_payload().ok_or(WizardError::NoAudioSource)?;
        self.patient
            .validate()
            .map_err(WizardError::InvalidPatientInfo)?;

        info!(step = self.step.number(), "Submitting voice sample for analysis");
        let recording = analyzer.upload_recording(&self.patient, payload).await?;
        Ok(recording)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::VoiceAnalyzer;
    use async_trait::async_trait;
    use audio_capture::{ActiveInput, InputHandle, SampleSink};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use voice_analysis_service::{
        AnalysisError, AnalysisResult, PredictionResult, RecordingStatus, RiskLevel, VoiceFeatures,
    };

    struct ScriptedSource {
        sink_slot: Arc<Mutex<Option<SampleSink>>>,
    }

    struct ScriptedHandle;
    impl InputHandle for ScriptedHandle {}

    impl InputSource for ScriptedSource {
        fn open(&mut self, sink: SampleSink) -> audio_capture::Result<ActiveInput> {
            *self.sink_slot.lock() = Some(sink);
            Ok(ActiveInput {
                sample_rate: 16_000,
                handle: Box::new(ScriptedHandle),
            })
        }
    }

    struct DeniedSource;
    impl InputSource for DeniedSource {
        fn open(&mut self, _sink: SampleSink) -> audio_capture::Result<ActiveInput> {
            Err(audio_capture::CaptureError::Device("access denied".into()))
        }
    }

    fn scripted_wizard() -> (IntakeWizard, Arc<Mutex<Option<SampleSink>>>) {
        scripted_wizard_with_ceiling(Duration::from_secs(30))
    }

    fn scripted_wizard_with_ceiling(
        ceiling: Duration,
    ) -> (IntakeWizard, Arc<Mutex<Option<SampleSink>>>) {
        let sink_slot = Arc::new(Mutex::new(None));
        let source = ScriptedSource {
            sink_slot: Arc::clone(&sink_slot),
        };
        let capture = CaptureController::with_ceiling(Box::new(source), ceiling);
        (IntakeWizard::with_capture(capture), sink_slot)
    }

    fn jane_doe() -> PatientInfo {
        PatientInfo {
            full_name: "Jane Doe".into(),
            age: 63,
            gender: Gender::Female,
            test_time: 1.5,
        }
    }

    fn sample_file() -> AudioFile {
        AudioFile::from_bytes("voice.mp3".into(), vec![1, 2, 3, 4]).unwrap()
    }

    fn record_sample(wizard: &mut IntakeWizard, sink: &Arc<Mutex<Option<SampleSink>>>) {
        wizard.start_recording().unwrap();
        sink.lock().as_ref().unwrap().push(&[0.25; 64]);
        wizard.stop_recording().unwrap();
    }

    /// Stub pipeline with call counting; fails when `fail` is set.
    struct StubAnalyzer {
        fail: bool,
        calls: AtomicUsize,
    }

    impl StubAnalyzer {
        fn ok() -> Self {
            Self { fail: false, calls: AtomicUsize::new(0) }
        }

        fn failing() -> Self {
            Self { fail: true, calls: AtomicUsize::new(0) }
        }
    }

    #[async_trait]
    impl VoiceAnalyzer for StubAnalyzer {
        async fn upload_recording(
            &self,
            patient: &PatientInfo,
            audio: AudioPayload,
        ) -> AnalysisResult<VoiceRecording> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AnalysisError::Transport("model backend offline".into()));
            }
            let id = voice_analysis_service::new_recording_id();
            Ok(VoiceRecording {
                id: id.clone(),
                user_id: "default-user".into(),
                file_name: audio.file_name.unwrap_or_else(|| "recording.wav".into()),
                file_url: None,
                file_size: audio.data.len() as u64,
                mime_type: Some(audio.mime_type),
                duration: patient.test_time,
                created_at: chrono::Utc::now(),
                status: RecordingStatus::Completed,
                result: Some(PredictionResult {
                    id: voice_analysis_service::new_result_id(),
                    recording_id: id,
                    score: 45.2,
                    confidence: 0.85,
                    risk_level: RiskLevel::High,
                    features: VoiceFeatures::default(),
                    recommendations: vec!["rest".into(); 5],
                    created_at: chrono::Utc::now(),
                    patient_name: Some(patient.full_name.clone()),
                    updrs_score: 45.2,
                }),
                metadata: None,
            })
        }
    }

    #[test]
    fn starts_on_information() {
        let (wizard, _sink) = scripted_wizard();
        assert_eq!(wizard.current_step(), WizardStep::Information);
        assert!(!wizard.can_proceed());
    }

    #[test]
    fn invalid_patient_blocks_advance_with_field_errors() {
        let (mut wizard, _sink) = scripted_wizard();
        let err = wizard.next().unwrap_err();
        match err {
            WizardError::InvalidPatientInfo(errors) => {
                assert!(errors.iter().any(|e| e.field == "fullName"));
                assert!(errors.iter().any(|e| e.field == "age"));
            }
            other => panic!("expected patient-info error, got {:?}", other),
        }
        assert_eq!(wizard.current_step(), WizardStep::Information);
    }

    #[test]
    fn linear_walk_through_all_steps() {
        let (mut wizard, _sink) = scripted_wizard();
        wizard.set_patient_info(jane_doe());
        assert_eq!(wizard.next().unwrap(), WizardStep::UploadRecord);

        // No audio yet: step 3 is gated
        assert!(matches!(wizard.next(), Err(WizardError::NoAudioSource)));

        wizard.attach_file(sample_file()).unwrap();
        assert_eq!(wizard.next().unwrap(), WizardStep::Preview);
        assert_eq!(wizard.next().unwrap(), WizardStep::Submit);

        // Next on the last step stays put
        assert_eq!(wizard.next().unwrap(), WizardStep::Submit);
    }

    #[test]
    fn back_is_always_allowed() {
        let (mut wizard, _sink) = scripted_wizard();
        wizard.set_patient_info(jane_doe());
        wizard.attach_file(sample_file()).unwrap();
        wizard.go_to(WizardStep::Submit).unwrap();

        assert_eq!(wizard.back(), WizardStep::Preview);
        assert_eq!(wizard.back(), WizardStep::UploadRecord);
        assert_eq!(wizard.back(), WizardStep::Information);
        assert_eq!(wizard.back(), WizardStep::Information);
    }

    #[test]
    fn direct_jump_revalidates_guards_without_state_change() {
        let (mut wizard, _sink) = scripted_wizard();
        wizard.set_patient_info(jane_doe());

        let err = wizard.go_to(WizardStep::Preview).unwrap_err();
        assert!(matches!(err, WizardError::NoAudioSource));
        assert_eq!(wizard.current_step(), WizardStep::Information);

        wizard.attach_file(sample_file()).unwrap();
        wizard.go_to(WizardStep::Submit).unwrap();
        assert_eq!(wizard.current_step(), WizardStep::Submit);
    }

    #[test]
    fn jump_is_blocked_when_patient_info_went_invalid_again() {
        let (mut wizard, _sink) = scripted_wizard();
        wizard.set_patient_info(jane_doe());
        wizard.attach_file(sample_file()).unwrap();
        wizard.go_to(WizardStep::Preview).unwrap();

        // Patient info edited into an invalid state afterwards
        wizard.set_patient_info(PatientInfo { age: 7, ..jane_doe() });
        assert!(matches!(
            wizard.go_to(WizardStep::Submit),
            Err(WizardError::InvalidPatientInfo(_))
        ));
        assert_eq!(wizard.current_step(), WizardStep::Preview);
    }

    #[test]
    fn recording_clears_selected_file() {
        let (mut wizard, sink) = scripted_wizard();
        wizard.attach_file(sample_file()).unwrap();
        assert!(wizard.audio_source().is_some());

        record_sample(&mut wizard, &sink);
        match wizard.audio_source() {
            Some(AudioSource::Recorded(_)) => {}
            other => panic!("expected recorded source, got {:?}", other),
        }
    }

    #[test]
    fn attaching_file_clears_recorded_sample() {
        let (mut wizard, sink) = scripted_wizard();
        record_sample(&mut wizard, &sink);

        wizard.attach_file(sample_file()).unwrap();
        match wizard.audio_source() {
            Some(AudioSource::File(f)) => assert_eq!(f.file_name, "voice.mp3"),
            other => panic!("expected file source, got {:?}", other),
        }
    }

    #[test]
    fn attaching_file_while_recording_is_rejected() {
        let (mut wizard, _sink) = scripted_wizard();
        wizard.start_recording().unwrap();

        assert!(matches!(
            wizard.attach_file(sample_file()),
            Err(WizardError::RecordingInProgress)
        ));
        // The live capture is untouched
        assert!(wizard.is_recording());
    }

    #[test]
    fn denied_microphone_reports_capture_error_and_changes_nothing() {
        let mut wizard = IntakeWizard::new(Box::new(DeniedSource));
        wizard.set_patient_info(jane_doe());

        let err = wizard.start_recording().unwrap_err();
        assert!(matches!(err, WizardError::Capture(_)));
        assert_eq!(err.user_message(), "Could not access microphone");
        assert!(!wizard.is_recording());
        assert!(!wizard.has_audio());
    }

    #[test]
    fn ceiling_stop_keeps_the_sample() {
        let (mut wizard, sink) = scripted_wizard_with_ceiling(Duration::from_millis(30));
        wizard.start_recording().unwrap();
        sink.lock().as_ref().unwrap().push(&[0.5; 128]);

        std::thread::sleep(Duration::from_millis(60));
        match wizard.poll_capture() {
            Some(Ok(StopReason::Ceiling)) => {}
            other => panic!("expected ceiling stop, got {:?}", other.map(|r| r.map(|_| ()))),
        }
        assert!(wizard.has_audio());
        assert!(wizard.poll_capture().is_none());
    }

    #[tokio::test]
    async fn submit_returns_recording_for_the_results_view() {
        let (mut wizard, sink) = scripted_wizard();
        wizard.set_patient_info(jane_doe());
        record_sample(&mut wizard, &sink);
        wizard.go_to(WizardStep::Submit).unwrap();

        let analyzer = StubAnalyzer::ok();
        let recording = wizard.submit(&analyzer).await.unwrap();
        let result = recording.result.expect("result travels with the recording");
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_submission_is_retryable() {
        let (mut wizard, sink) = scripted_wizard();
        wizard.set_patient_info(jane_doe());
        record_sample(&mut wizard, &sink);
        wizard.go_to(WizardStep::Submit).unwrap();

        let failing = StubAnalyzer::failing();
        let err = wizard.submit(&failing).await.unwrap_err();
        assert!(matches!(err, WizardError::Analysis(_)));

        // Step and inputs survive the failure; a retry succeeds
        assert_eq!(wizard.current_step(), WizardStep::Submit);
        assert!(wizard.has_audio());
        let retry = StubAnalyzer::ok();
        assert!(wizard.submit(&retry).await.is_ok());
    }

    #[tokio::test]
    async fn submit_without_audio_never_reaches_the_pipeline() {
        let (mut wizard, _sink) = scripted_wizard();
        wizard.set_patient_info(jane_doe());

        let analyzer = StubAnalyzer::ok();
        let err = wizard.submit(&analyzer).await.unwrap_err();
        assert!(matches!(err, WizardError::NoAudioSource));
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn step_numbers_round_trip() {
        for step in WizardStep::ALL {
            assert_eq!(WizardStep::from_number(step.number()), Some(step));
        }
        assert_eq!(WizardStep::from_number(0), None);
        assert_eq!(WizardStep::from_number(5), None);
    }
}
