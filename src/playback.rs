//! Paces frames out of the engine: a background ticker and a player that pulls
//! one unit of work per tick.

use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TrySendError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use log::{debug, info, warn};

#[cfg(feature = "audio")]
use crate::audio::{frequency_for, AudioSignal};
use crate::config::{frame_interval, ANIMATION_DELAY_MAX, ANIMATION_DELAY_MIN};
use crate::error::Result;
use crate::sorting_algorithms::{Element, History, Snapshot, SortDriver};
use crate::sorting_graph::SortGraph;

// Upper bound on how long the timer thread sleeps before rechecking its flags
const TIMER_SLICE: Duration = Duration::from_millis(10);
const KEY_POLL: Duration = Duration::from_millis(5);

/// Repeating timer on its own thread. Ticks coalesce when the consumer falls
/// behind; the interval can change while running.
pub struct Ticker {
    interval_ms: Arc<AtomicU64>,
    running: Arc<AtomicBool>,
    ticks: Receiver<()>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn start(interval: Duration) -> Self {
        let (tx, rx) = mpsc::sync_channel(1);
        let interval_ms = Arc::new(AtomicU64::new(interval.as_millis() as u64));
        let running = Arc::new(AtomicBool::new(true));

        let handle = {
            let interval_ms = Arc::clone(&interval_ms);
            let running = Arc::clone(&running);
            thread::spawn(move || {
                let mut elapsed = Duration::ZERO;
                while running.load(Ordering::Acquire) {
                    let target = Duration::from_millis(interval_ms.load(Ordering::Acquire));
                    if elapsed >= target {
                        elapsed = Duration::ZERO;
                        match tx.try_send(()) {
                            Ok(()) | Err(TrySendError::Full(())) => {}
                            Err(TrySendError::Disconnected(())) => break,
                        }
                    }
                    let slice = target
                        .saturating_sub(elapsed)
                        .clamp(Duration::from_millis(1), TIMER_SLICE);
                    thread::sleep(slice);
                    elapsed += slice;
                }
            })
        };

        Ticker {
            interval_ms,
            running,
            ticks: rx,
            handle: Some(handle),
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.load(Ordering::Acquire))
    }

    pub fn set_interval(&self, interval: Duration) {
        self.interval_ms
            .store(interval.as_millis() as u64, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Waits up to `timeout` for a tick. A stopped timer counts as ticking so
    /// callers never wait on it forever.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        match self.ticks.recv_timeout(timeout) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => true,
            Err(RecvTimeoutError::Timeout) => false,
        }
    }

    /// Cancels the timer and joins its thread.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("ticker thread panicked");
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Where the player gets its frames from.
pub enum FrameSource<'a> {
    /// Snapshots recorded by `full_sort`, replayed in order.
    History(VecDeque<Snapshot>),
    /// A live driver, advanced with `sort_next` once per frame.
    Stepper(&'a mut dyn SortDriver),
}

impl<'a> FrameSource<'a> {
    pub fn from_history(history: History) -> Self {
        FrameSource::History(history.into_queue())
    }

    pub fn stepper(driver: &'a mut dyn SortDriver) -> Self {
        FrameSource::Stepper(driver)
    }

    fn first_frame(&mut self) -> Option<Vec<Element>> {
        match self {
            FrameSource::History(queue) => queue.pop_front().map(Snapshot::into_elements),
            FrameSource::Stepper(driver) => Some(driver.init().to_vec()),
        }
    }

    fn next_frame(&mut self) -> Option<Vec<Element>> {
        match self {
            FrameSource::History(queue) => queue.pop_front().map(Snapshot::into_elements),
            FrameSource::Stepper(driver) => {
                if driver.has_next() {
                    Some(driver.sort_next().to_vec())
                } else {
                    None
                }
            }
        }
    }
}

/// Receives every frame the player shows.
pub trait FrameSink {
    fn show(&mut self, elements: &[Element], status: &str) -> io::Result<()>;
}

impl FrameSink for SortGraph {
    fn show(&mut self, elements: &[Element], status: &str) -> io::Result<()> {
        self.display(elements, Some(status))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Control {
    Continue,
    Quit,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackReport {
    pub frames: usize,
    pub cancelled: bool,
}

pub struct Player<S: FrameSink> {
    sink: S,
    delay: u64,
    interactive: bool,
    #[cfg(feature = "audio")]
    audio: Option<mpsc::Sender<AudioSignal>>,
}

impl<S: FrameSink> Player<S> {
    pub fn new(sink: S, delay: u64) -> Self {
        Player {
            sink,
            delay: delay.clamp(ANIMATION_DELAY_MIN, ANIMATION_DELAY_MAX),
            interactive: false,
            #[cfg(feature = "audio")]
            audio: None,
        }
    }

    /// Reads `+` (faster), `-` (slower) and `q`/`Esc` (stop) while playing.
    /// The terminal must be in raw mode, see [`RawModeGuard`].
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    #[cfg(feature = "audio")]
    pub fn with_audio(mut self, sender: mpsc::Sender<AudioSignal>) -> Self {
        self.audio = Some(sender);
        self
    }

    pub fn delay(&self) -> u64 {
        self.delay
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Shows the first frame immediately, then one more per tick until the
    /// source runs dry or the user quits.
    pub fn play(&mut self, mut source: FrameSource<'_>) -> Result<PlaybackReport> {
        let mut ticker = Ticker::start(frame_interval(self.delay));
        let mut report = PlaybackReport::default();
        info!("playback started, delay {}", self.delay);

        let mut frame = source.first_frame();
        while let Some(elements) = frame {
            report.frames += 1;
            self.voice(&elements);
            let status = self.status(report.frames);
            self.sink.show(&elements, &status)?;

            if self.wait_for_tick(&ticker)? == Control::Quit {
                report.cancelled = true;
                break;
            }
            frame = source.next_frame();
        }

        ticker.stop();
        self.silence();
        info!(
            "playback {} after {} frames",
            if report.cancelled { "cancelled" } else { "finished" },
            report.frames
        );
        Ok(report)
    }

    fn status(&self, frame: usize) -> String {
        if self.interactive {
            format!("frame {frame} | delay {} | +/- speed, q quit", self.delay)
        } else {
            format!("frame {frame} | delay {}", self.delay)
        }
    }

    fn wait_for_tick(&mut self, ticker: &Ticker) -> Result<Control> {
        loop {
            if ticker.wait_timeout(KEY_POLL) {
                return Ok(Control::Continue);
            }
            if self.interactive && self.read_controls(ticker)? == Control::Quit {
                return Ok(Control::Quit);
            }
        }
    }

    fn read_controls(&mut self, ticker: &Ticker) -> Result<Control> {
        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(Control::Quit),
                KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_delay(ticker, -1),
                KeyCode::Char('-') => self.adjust_delay(ticker, 1),
                _ => {}
            }
        }
        Ok(Control::Continue)
    }

    fn adjust_delay(&mut self, ticker: &Ticker, notches: i64) {
        let delay = (self.delay as i64 + notches)
            .clamp(ANIMATION_DELAY_MIN as i64, ANIMATION_DELAY_MAX as i64) as u64;
        if delay != self.delay {
            self.delay = delay;
            ticker.set_interval(frame_interval(delay));
            debug!("delay changed to {delay}");
        }
    }

    #[cfg(feature = "audio")]
    fn voice(&self, elements: &[Element]) {
        if let Some(sender) = &self.audio {
            let signal = match elements.iter().find(|e| e.current) {
                Some(e) => AudioSignal::Tone(frequency_for(e.value)),
                None => AudioSignal::Silence,
            };
            sender.send(signal).unwrap_or_default();
        }
    }

    #[cfg(not(feature = "audio"))]
    fn voice(&self, _elements: &[Element]) {}

    #[cfg(feature = "audio")]
    fn silence(&self) {
        if let Some(sender) = &self.audio {
            sender.send(AudioSignal::Silence).unwrap_or_default();
        }
    }

    #[cfg(not(feature = "audio"))]
    fn silence(&self) {}
}

/// Keeps the terminal in raw mode for as long as it lives.
pub struct RawModeGuard;

impl RawModeGuard {
    pub fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(RawModeGuard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(err) = disable_raw_mode() {
            warn!("failed to leave raw mode: {err}");
        }
    }
}
