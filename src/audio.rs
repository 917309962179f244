use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    Device, StreamConfig,
};
use log::{error, info, warn};

use crate::config::MAX_VALUE;
use crate::error::{Error, Result};

// Frequency a bar of MAX_VALUE maps to
const MAX_FREQUENCY: f32 = 880.0;
const VOLUME: f32 = 0.3;

pub enum AudioSignal {
    Tone(f32),
    Silence,
}

/// Pitch for an element value, scaled linearly up to `MAX_FREQUENCY`.
pub fn frequency_for(value: i32) -> f32 {
    MAX_FREQUENCY * (value.max(0) as f32 / MAX_VALUE as f32)
}

pub struct AudioDevice {
    pub device: Device,
    pub config: StreamConfig,
}

impl AudioDevice {
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::Audio("no default output device found".to_string()))?;
        let config: StreamConfig = device
            .default_output_config()
            .map_err(|e| Error::Audio(e.to_string()))?
            .into();

        info!(
            "audio output on {} ({:?})",
            device.name().unwrap_or_else(|_| "unknown device".to_string()),
            config
        );
        Ok(Self { device, config })
    }

    /// Spawns a thread that owns the output stream and plays whatever tone
    /// was sent last. Stop it with [`LiveAudio::stop`].
    pub fn play_live(&self) -> LiveAudio {
        let (tx, rx): (Sender<AudioSignal>, Receiver<AudioSignal>) = mpsc::channel();
        let config = self.config.clone();
        let device = self.device.clone();
        let stopped = Arc::new(AtomicBool::new(false));
        let thread_stopped = Arc::clone(&stopped);

        let handle = thread::spawn(move || {
            let sample_rate = config.sample_rate.0 as f32;
            let channels = config.channels as usize;
            let mut frequency = 0.0f32;
            let mut phase = 0.0f32;
            let err_fn = |err| error!("an error occurred on stream: {}", err);

            let stream = device.build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    while let Ok(signal) = rx.try_recv() {
                        frequency = match signal {
                            AudioSignal::Tone(f) => f,
                            AudioSignal::Silence => 0.0,
                        };
                    }
                    let increment = frequency * 2.0 * std::f32::consts::PI / sample_rate;
                    for frame in data.chunks_mut(channels) {
                        let value = if frequency > 0.0 {
                            // Fundamental plus a softer octave
                            (phase.sin() + (phase * 2.0).sin() * 0.5) * VOLUME
                        } else {
                            0.0
                        };
                        phase = (phase + increment) % (2.0 * std::f32::consts::PI);
                        for sample in frame.iter_mut() {
                            *sample = value;
                        }
                    }
                },
                err_fn,
                None,
            );

            let stream = match stream {
                Ok(stream) => stream,
                Err(err) => {
                    error!("failed to build output stream: {err}");
                    return;
                }
            };
            if let Err(err) = stream.play() {
                error!("failed to start output stream: {err}");
                return;
            }

            // Keep the stream alive until stopped
            park_until(&thread_stopped);
        });

        LiveAudio {
            sender: tx,
            stopped,
            handle: Some(handle),
        }
    }
}

/// Parks the current thread until `flag` is set. Wakeups without the flag
/// go back to sleep.
fn park_until(flag: &AtomicBool) {
    while !flag.load(Ordering::Acquire) {
        thread::park();
    }
}

pub struct LiveAudio {
    sender: Sender<AudioSignal>,
    stopped: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl LiveAudio {
    pub fn sender(&self) -> Sender<AudioSignal> {
        self.sender.clone()
    }

    pub fn stop(&mut self) {
        self.sender.send(AudioSignal::Silence).unwrap_or_default();
        self.stopped.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            if handle.join().is_err() {
                warn!("audio thread panicked");
            }
        }
    }
}

impl Drop for LiveAudio {
    fn drop(&mut self) {
        self.stop();
    }
}
