//! Audio output abstraction
//!
//! The controller never decodes or plays audio itself. The platform provides a
//! single [`AudioOutput`] handle; the controller starts at most one clip on it
//! at a time and is told when that clip finishes through
//! [`SessionController::on_playback_finished`](crate::SessionController::on_playback_finished).

use crate::error::Result;
use crate::types::PlaybackToken;

/// Platform audio output
///
/// Implementations must report the end of every clip started with [`start`]
/// (unless [`halt`] was called first) by passing the same token back to the
/// controller. Reporting after `halt` is harmless; the token is stale by then.
///
/// [`start`]: AudioOutput::start
/// [`halt`]: AudioOutput::halt
pub trait AudioOutput {
    /// Begin playing the clip at `url`
    ///
    /// Any clip still playing has already been halted by the controller.
    /// An error here is treated like a failed clip.
    fn start(&mut self, url: &str, token: PlaybackToken) -> Result<()>;

    /// Stop the current clip and release its resources
    ///
    /// Must be a no-op when nothing is playing.
    fn halt(&mut self);
}

impl<T: AudioOutput + ?Sized> AudioOutput for Box<T> {
    fn start(&mut self, url: &str, token: PlaybackToken) -> Result<()> {
        (**self).start(url, token)
    }

    fn halt(&mut self) {
        (**self).halt();
    }
}
