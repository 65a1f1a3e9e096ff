//! Per-tick buffers for audio and FX events.

use gravwar_core::events::{AudioEvent, FxEvent};

/// Events accumulated during one tick, drained into the snapshot.
#[derive(Debug, Default)]
pub struct EventLog {
    pub audio: Vec<AudioEvent>,
    pub fx: Vec<FxEvent>,
}

impl EventLog {
    pub fn audio(&mut self, event: AudioEvent) {
        self.audio.push(event);
    }

    pub fn fx(&mut self, event: FxEvent) {
        self.fx.push(event);
    }

    /// Take everything recorded so far, leaving the log empty.
    pub fn take(&mut self) -> (Vec<AudioEvent>, Vec<FxEvent>) {
        (
            std::mem::take(&mut self.audio),
            std::mem::take(&mut self.fx),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.audio.is_empty() && self.fx.is_empty()
    }
}
