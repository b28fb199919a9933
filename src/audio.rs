//! Fire-and-forget sound cues emitted by the simulation.

/// A sound cue raised during a tick, in the order it happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioEvent {
    Shoot,
    Hit,
    GameOver,
    PowerUp,
}

/// Receives cues after each tick. Implementations must never fail; if the
/// device is missing they drop the event.
pub trait AudioSink {
    fn play(&mut self, event: AudioEvent);
}

/// Sink used when no audio device is available.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _event: AudioEvent) {}
}

/// Forward every event to `sink`.
pub fn dispatch(sink: &mut dyn AudioSink, events: &[AudioEvent]) {
    for &event in events {
        sink.play(event);
    }
}
