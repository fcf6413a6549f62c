//! Live audio capture via cpal.
//!
//! [`CaptureStream`] opens an input device (a microphone, or a
//! virtual/loopback device carrying system audio), converts whatever
//! the hardware delivers into normalized mono `f32` blocks, and feeds
//! them to the pipeline through the [`BlockSource`] interface.
//!
//! The cpal audio callback only pushes blocks into a bounded channel;
//! all extraction happens on the thread calling
//! [`run`](BlockSource::run), so no pipeline state is ever touched from
//! two threads. When the pipeline falls behind, whole blocks are
//! dropped at the channel rather than queued without bound.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, SyncSender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, FromSample, Host, Sample, SampleFormat, SizedSample};

use crate::source::{BlockSource, StopHandle};
use crate::{Error, Result};

/// Extract device name via `description()` (cpal 0.17+).
fn device_name(device: &Device) -> std::result::Result<String, cpal::DeviceNameError> {
    device.description().map(|d| d.name().to_string())
}

/// Audio input device information.
#[derive(Debug, Clone)]
pub struct AudioDevice {
    /// Human-readable device name.
    pub name: String,
    /// Default sample rate in Hz.
    pub default_sample_rate: u32,
    /// Default channel count.
    pub default_channels: u16,
}

/// List all available audio input devices.
pub fn list_devices() -> Result<Vec<AudioDevice>> {
    let host = cpal::default_host();
    let mut devices = Vec::new();

    if let Ok(inputs) = host.input_devices() {
        for device in inputs {
            if let Ok(name) = device_name(&device) {
                let (sample_rate, channels) = device
                    .default_input_config()
                    .map(|c| (c.sample_rate(), c.channels()))
                    .unwrap_or((48000, 2));
                devices.push(AudioDevice {
                    name,
                    default_sample_rate: sample_rate,
                    default_channels: channels,
                });
            }
        }
    }

    Ok(devices)
}

/// Get the default input device info, if any.
pub fn default_input() -> Result<Option<AudioDevice>> {
    let host = cpal::default_host();
    Ok(host.default_input_device().and_then(|d| {
        device_name(&d).ok().map(|name| {
            let (sample_rate, channels) = d
                .default_input_config()
                .map(|c| (c.sample_rate(), c.channels()))
                .unwrap_or((48000, 2));
            AudioDevice {
                name,
                default_sample_rate: sample_rate,
                default_channels: channels,
            }
        })
    }))
}

/// Capture configuration.
#[derive(Debug, Clone, Default)]
pub struct CaptureConfig {
    /// Input device selector: numeric index, exact name, or
    /// case-insensitive partial name. Uses the system default if `None`.
    pub device: Option<String>,
}

/// Live capture source backed by a cpal input stream.
///
/// The device's native configuration is negotiated once at
/// construction; the actual sample rate is available via
/// [`sample_rate`](BlockSource::sample_rate) before the pipeline is
/// built. Interleaved channels are averaged down to one analysis
/// channel, and integer sample formats are normalized to [-1.0, 1.0].
pub struct CaptureStream {
    device: Device,
    config: cpal::SupportedStreamConfig,
    device_label: String,
    stop: StopHandle,
}

impl CaptureStream {
    /// Open an input device for capture.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoDevice`] when the system has no default input,
    /// [`Error::DeviceNotFound`] when a selector matches nothing, and
    /// [`Error::Stream`] when the device refuses to report a config.
    pub fn open(capture: &CaptureConfig) -> Result<Self> {
        let host = cpal::default_host();
        let device = match &capture.device {
            Some(selector) => find_input_device(&host, selector)?,
            None => host.default_input_device().ok_or(Error::NoDevice)?,
        };

        let config = device
            .default_input_config()
            .map_err(|e| Error::Stream(e.to_string()))?;
        let device_label = device_name(&device).unwrap_or_else(|_| "unknown".to_string());

        tracing::info!(
            device = %device_label,
            sample_rate = config.sample_rate(),
            channels = config.channels(),
            format = ?config.sample_format(),
            "capture device opened"
        );

        Ok(Self {
            device,
            config,
            device_label,
            stop: StopHandle::new(),
        })
    }

    /// Name of the opened device.
    pub fn device_label(&self) -> &str {
        &self.device_label
    }
}

impl BlockSource for CaptureStream {
    fn name(&self) -> &str {
        "capture"
    }

    fn sample_rate(&self) -> u32 {
        self.config.sample_rate()
    }

    fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    fn run(&mut self, on_block: &mut dyn FnMut(&[f32])) -> Result<()> {
        let channels = self.config.channels() as usize;

        // Bounded hand-off from the audio thread; the processing loop
        // drains fully before sleeping, so latency stays bounded by
        // producer cadence and overflow drops whole blocks.
        let (tx, rx) = mpsc::sync_channel::<Vec<f32>>(8);
        let dropped = Arc::new(AtomicU64::new(0));
        let failure: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));

        let stream_config: cpal::StreamConfig = self.config.clone().into();
        let stream = match self.config.sample_format() {
            SampleFormat::F32 => build_stream::<f32>,
            SampleFormat::I16 => build_stream::<i16>,
            SampleFormat::U16 => build_stream::<u16>,
            SampleFormat::I32 => build_stream::<i32>,
            other => return Err(Error::UnsupportedFormat(format!("{other:?}"))),
        }(
            &self.device,
            &stream_config,
            channels,
            tx,
            Arc::clone(&dropped),
            Arc::clone(&failure),
        )?;

        stream.play().map_err(|e| Error::Stream(e.to_string()))?;
        tracing::info!(device = %self.device_label, "capture stream started");

        let mut warned = false;
        let result = 'outer: loop {
            if self.stop.is_stopped() {
                break Ok(());
            }
            if let Some(message) = take_failure(&failure) {
                break Err(Error::Stream(message));
            }

            let mut received = false;
            loop {
                match rx.try_recv() {
                    Ok(block) => {
                        received = true;
                        on_block(&block);
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        break 'outer Err(Error::Stream("capture channel closed".into()));
                    }
                }
            }

            if !warned {
                let count = dropped.load(Ordering::Relaxed);
                if count > 0 {
                    tracing::warn!(dropped = count, "processing fell behind, dropping blocks");
                    warned = true;
                }
            }

            if !received {
                std::thread::sleep(Duration::from_millis(10));
            }
        };

        // Dropping the stream releases the device on every exit path.
        drop(stream);
        let total_dropped = dropped.load(Ordering::Relaxed);
        tracing::info!(dropped = total_dropped, "capture stream stopped");
        result
    }
}

fn take_failure(failure: &Mutex<Option<String>>) -> Option<String> {
    failure.lock().ok().and_then(|mut slot| slot.take())
}

fn build_stream<T>(
    device: &Device,
    config: &cpal::StreamConfig,
    channels: usize,
    tx: SyncSender<Vec<f32>>,
    dropped: Arc<AtomicU64>,
    failure: Arc<Mutex<Option<String>>>,
) -> Result<cpal::Stream>
where
    T: Sample + SizedSample,
    f32: FromSample<T>,
{
    let stream = device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                let mut block = Vec::with_capacity(data.len() / channels.max(1));
                for frame in data.chunks(channels.max(1)) {
                    let mut sum = 0.0f32;
                    for &s in frame {
                        sum += s.to_sample::<f32>();
                    }
                    block.push(sum / frame.len() as f32);
                }
                if tx.try_send(block).is_err() {
                    dropped.fetch_add(1, Ordering::Relaxed);
                }
            },
            move |err| {
                if let Ok(mut slot) = failure.lock() {
                    *slot = Some(err.to_string());
                }
            },
            None,
        )
        .map_err(|e| Error::Stream(e.to_string()))?;
    Ok(stream)
}

/// Find an input device by index, exact name, or fuzzy match.
///
/// The selector can be:
/// - A numeric index (e.g., "0", "1") into the input device list
/// - An exact device name
/// - A partial device name (case-insensitive match)
fn find_input_device(host: &Host, selector: &str) -> Result<Device> {
    let devices: Vec<_> = host
        .input_devices()
        .map_err(|e| Error::Stream(e.to_string()))?
        .collect();

    // Try parsing as index first
    if let Ok(index) = selector.parse::<usize>() {
        return devices.get(index).cloned().ok_or_else(|| {
            Error::DeviceNotFound(format!(
                "input device index {} (only {} devices available)",
                index,
                devices.len()
            ))
        });
    }

    // Try exact match
    for device in &devices {
        if device_name(device).is_ok_and(|n| n == selector) {
            return Ok(device.clone());
        }
    }

    // Try case-insensitive partial match
    let search_lower = selector.to_lowercase();
    let mut matches: Vec<_> = devices
        .iter()
        .filter_map(|d| {
            device_name(d).ok().and_then(|name| {
                if name.to_lowercase().contains(&search_lower) {
                    Some((d.clone(), name))
                } else {
                    None
                }
            })
        })
        .collect();

    match matches.len() {
        0 => Err(Error::DeviceNotFound(format!(
            "no input device matching '{selector}'"
        ))),
        1 => Ok(matches.remove(0).0),
        _ => {
            let names: Vec<_> = matches.iter().map(|(_, n)| n.as_str()).collect();
            tracing::warn!(
                selector,
                matches = ?names,
                "selector matches multiple input devices, using first"
            );
            Ok(matches.remove(0).0)
        }
    }
}
