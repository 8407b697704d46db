//! Input stream sources
//!
//! `InputSource` is the seam between the capture controller and the
//! platform audio stack. Production code uses the cpal-backed
//! [`MicrophoneSource`]; tests drive the controller through a scripted
//! source instead of a real device.

use crate::error::{CaptureError, Result};
use crate::shared::SampleSink;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{error, info};

/// A running input stream. Dropping the handle releases the device.
pub trait InputHandle {}

/// An opened input stream plus its negotiated format.
pub struct ActiveInput {
    /// Sample rate the source delivers, in Hz
    pub sample_rate: u32,
    /// Keep-alive handle for the underlying stream
    pub handle: Box<dyn InputHandle>,
}

/// Source of mono f32 audio samples.
///
/// `open` must either start delivering samples into `sink` and return a
/// handle, or fail without side effects (no partially opened device).
pub trait InputSource {
    fn open(&mut self, sink: SampleSink) -> Result<ActiveInput>;
}

/// Default-input-device source backed by cpal.
pub struct MicrophoneSource;

impl MicrophoneSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MicrophoneSource {
    fn default() -> Self {
        Self::new()
    }
}

struct CpalHandle {
    _stream: cpal::Stream,
}

impl InputHandle for CpalHandle {}

impl InputSource for MicrophoneSource {
    fn open(&mut self, sink: SampleSink) -> Result<ActiveInput> {
        let host = cpal::default_host();

        let device = host
            .default_input_device()
            .ok_or_else(|| CaptureError::Device("No input device available".into()))?;

        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        info!("Using input device: {}", device_name);

        let supported_config = device.default_input_config().map_err(|e| {
            CaptureError::Device(format!("Failed to get input config: {}", e))
        })?;

        let config: cpal::StreamConfig = supported_config.into();
        let sample_rate = config.sample_rate.0;
        let channels = config.channels as usize;

        info!("Audio config: {}Hz, {} channel(s)", sample_rate, channels);

        let err_fn = |err| {
            error!("Audio input stream error: {}", err);
        };

        let stream = device
            .build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if channels == 1 {
                        sink.push(data);
                    } else {
                        // Average interleaved frames down to mono
                        let mono: Vec<f32> = data
                            .chunks(channels)
                            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
                            .collect();
                        sink.push(&mono);
                    }
                },
                err_fn,
                None,
            )
            .map_err(|e| CaptureError::Stream(format!("Failed to build input stream: {}", e)))?;

        stream
            .play()
            .map_err(|e| CaptureError::Stream(format!("Failed to start input stream: {}", e)))?;

        Ok(ActiveInput {
            sample_rate,
            handle: Box::new(CpalHandle { _stream: stream }),
        })
    }
}
