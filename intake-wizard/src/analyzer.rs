//! Seam between the wizard and the scoring pipeline.

use async_trait::async_trait;
use voice_analysis_service::{AnalysisClient, AnalysisResult, AudioPayload, PatientInfo, VoiceRecording};

/// Upload-and-score pipeline as seen by the wizard. The production
/// implementation is [`AnalysisClient`]; tests substitute a stub.
#[async_trait]
pub trait VoiceAnalyzer {
    async fn upload_recording(
        &self,
        patient: &PatientInfo,
        audio: AudioPayload,
    ) -> AnalysisResult<VoiceRecording>;
}

#[async_trait]
impl VoiceAnalyzer for AnalysisClient {
    async fn upload_recording(
        &self,
        patient: &PatientInfo,
        audio: AudioPayload,
    ) -> AnalysisResult<VoiceRecording> {
        AnalysisClient::upload_recording(self, patient, audio).await
    }
}
