use std::io::{self, Write};
use sugoroku_core::{AudioBackend, AudioError, Channel, SilentAudio};

/// Terminals have no mixer: channels are tracked silently and sound effects
/// can optionally ring the terminal bell.
pub struct TerminalAudio<W = io::Stdout> {
    inner: SilentAudio,
    bell: Option<W>,
}

impl TerminalAudio {
    pub fn new(bell: bool) -> Self {
        Self::with_bell(bell.then(io::stdout))
    }
}

impl<W: Write> TerminalAudio<W> {
    fn with_bell(bell: Option<W>) -> Self {
        Self {
            inner: SilentAudio::new(),
            bell,
        }
    }
}

impl<W: Write> AudioBackend for TerminalAudio<W> {
    fn play(&mut self, channel: Channel) -> Result<(), AudioError> {
        // a channel only counts as playing once the bell went out
        if let (false, Some(out)) = (channel.is_bgm(), self.bell.as_mut()) {
            out.write_all(b"\x07")
                .and_then(|_| out.flush())
                .map_err(|err| AudioError::Failed(err.to_string()))?;
        }
        self.inner.play(channel)
    }

    fn stop(&mut self, channel: Channel) {
        self.inner.stop(channel);
    }
}
