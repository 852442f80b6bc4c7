//! The playback engine state machine.

use crate::error::{PlaybackError, Result};
use crate::events::PlayerEvent;
use crate::output::{AudioOutput, OutputError};
use crate::session::{MediaSessionPort, NoopMediaSession, NowPlaying};
use crate::types::{QueueTrack, RepeatMode, TransportState};
use std::time::Duration;

type Listener = Box<dyn Fn(&PlayerEvent) + Send>;

/// Single-threaded, event-driven playback engine.
///
/// Owns the queue, the current index, the transport state, and the one
/// active audio output. Commands come from the UI; the output reports back
/// the end-of-track signal through [`Player::handle_track_ended`].
///
/// The `Playing` state is only entered when the output confirms that
/// playback started; a platform refusal (autoplay policy) leaves the
/// engine paused rather than drifting from reality.
pub struct Player {
    queue: Vec<QueueTrack>,
    index: usize,
    state: TransportState,
    volume: f32,
    repeat: RepeatMode,
    output: Box<dyn AudioOutput>,
    session: Box<dyn MediaSessionPort>,
    listeners: Vec<Listener>,
}

impl Player {
    /// Engine over an audio output, without media-session integration.
    pub fn new(output: Box<dyn AudioOutput>) -> Self {
        Self::with_session(output, Box::new(NoopMediaSession))
    }

    /// Engine with a platform media-session bridge.
    pub fn with_session(output: Box<dyn AudioOutput>, session: Box<dyn MediaSessionPort>) -> Self {
        Self {
            queue: Vec::new(),
            index: 0,
            state: TransportState::Empty,
            volume: 0.8,
            repeat: RepeatMode::Off,
            output,
            session,
            listeners: Vec::new(),
        }
    }

    /// Register an event listener (player bar, views).
    pub fn subscribe(&mut self, listener: impl Fn(&PlayerEvent) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// The current queue.
    pub fn queue(&self) -> &[QueueTrack] {
        &self.queue
    }

    /// Current queue index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current transport state.
    pub fn state(&self) -> TransportState {
        self.state
    }

    /// Current repeat mode.
    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    /// Current volume in [0, 1].
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// The current track, if any.
    pub fn current(&self) -> Option<&QueueTrack> {
        self.queue.get(self.index)
    }

    /// Current playback position, from the output.
    pub fn position(&self) -> Duration {
        self.output.position()
    }

    /// Replace the queue wholesale and start playing at `start_index`.
    ///
    /// An empty queue clears the engine back to `Empty`.
    pub fn set_queue(&mut self, tracks: Vec<QueueTrack>, start_index: usize) -> Result<()> {
        if tracks.is_empty() {
            self.queue.clear();
            self.index = 0;
            self.output.pause();
            self.set_state(TransportState::Empty);
            self.emit(&PlayerEvent::QueueReplaced { length: 0 });
            return Ok(());
        }
        if start_index >= tracks.len() {
            return Err(PlaybackError::IndexOutOfBounds(start_index));
        }

        self.queue = tracks;
        self.index = start_index;
        self.emit(&PlayerEvent::QueueReplaced {
            length: self.queue.len(),
        });
        self.bind_current()
    }

    /// Resume playback. No-op on an empty queue.
    pub fn play(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        self.start_confirmed();
    }

    /// Pause playback. No-op on an empty queue.
    pub fn pause(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        self.output.pause();
        self.set_state(TransportState::Paused);
    }

    /// Advance circularly. A single-track queue restarts the track from
    /// zero instead of advancing.
    pub fn next(&mut self) -> Result<()> {
        match self.queue.len() {
            0 => Ok(()),
            1 => {
                self.restart_current();
                Ok(())
            }
            len => {
                self.index = (self.index + 1) % len;
                self.bind_current()
            }
        }
    }

    /// Step back circularly (wraps to the end before index 0).
    pub fn prev(&mut self) -> Result<()> {
        match self.queue.len() {
            0 => Ok(()),
            1 => {
                self.restart_current();
                Ok(())
            }
            len => {
                self.index = (self.index + len - 1) % len;
                self.bind_current()
            }
        }
    }

    /// Jump to a position. Clamping is the output's responsibility.
    pub fn seek(&mut self, position: Duration) {
        if self.queue.is_empty() {
            return;
        }
        self.output.seek(position);
    }

    /// Set volume, clamped to [0, 1], applied immediately.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.output.set_volume(self.volume);
        self.emit(&PlayerEvent::VolumeChanged {
            volume: self.volume,
        });
    }

    /// Set the repeat mode.
    pub fn set_repeat(&mut self, mode: RepeatMode) {
        self.repeat = mode;
        self.emit(&PlayerEvent::RepeatChanged { mode });
    }

    /// Toggle repeat through off → all → one → off.
    pub fn cycle_repeat(&mut self) {
        self.set_repeat(self.repeat.cycle());
    }

    /// End-of-track signal from the output.
    ///
    /// Repeat-one restarts the track; otherwise the queue advances, wraps
    /// under repeat-all, or stops with the index unchanged and the
    /// position left at the end.
    pub fn handle_track_ended(&mut self) -> Result<()> {
        if self.queue.is_empty() {
            return Ok(());
        }

        if self.repeat == RepeatMode::One {
            self.restart_current();
            return Ok(());
        }

        let last = self.index + 1 >= self.queue.len();
        if !last {
            self.index += 1;
            return self.bind_current();
        }

        if self.repeat == RepeatMode::All {
            self.index = 0;
            return self.bind_current();
        }

        self.set_state(TransportState::Paused);
        Ok(())
    }

    /// Load the current track into the output, publish its metadata, and
    /// try to start it.
    fn bind_current(&mut self) -> Result<()> {
        let track = self
            .queue
            .get(self.index)
            .cloned()
            .ok_or(PlaybackError::QueueEmpty)?;

        self.output
            .load(&track)
            .map_err(|e| PlaybackError::Output(e.to_string()))?;
        self.session.publish(&NowPlaying::from(&track));
        self.emit(&PlayerEvent::TrackChanged {
            public_id: track.public_id.clone(),
            index: self.index,
        });

        self.start_confirmed();
        Ok(())
    }

    /// Restart the current track from zero and try to keep playing.
    fn restart_current(&mut self) {
        self.output.seek(Duration::ZERO);
        self.start_confirmed();
    }

    /// Ask the output to start; only a confirmed start moves the engine to
    /// `Playing`. A blocked or failed start leaves it paused.
    fn start_confirmed(&mut self) {
        match self.output.start() {
            Ok(()) => self.set_state(TransportState::Playing),
            Err(OutputError::StartBlocked) | Err(OutputError::Failed(_)) => {
                self.set_state(TransportState::Paused);
            }
        }
    }

    fn set_state(&mut self, state: TransportState) {
        if self.state != state {
            self.state = state;
            self.emit(&PlayerEvent::StateChanged { state });
        }
    }

    fn emit(&self, event: &PlayerEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}
