//! Platform-agnostic media handle trait
//!
//! Abstracts the audio/video element for different platforms (browser, desktop, tests)

use crate::error::Result;
use url::Url;

/// Platform-agnostic media element
///
/// `PlaybackQueue` drives an attached handle whenever the current item changes.
/// The queue never waits on the handle: an `Err` is logged, recorded as
/// [`PlaybackHealth::Failed`](crate::PlaybackHealth) and emitted as an event.
///
/// Handles that start playback asynchronously should return `Ok(())` from
/// [`play`](MediaHandle::play) once the request is issued and report the final
/// outcome through [`PlaybackQueue::report_playback_outcome`](crate::PlaybackQueue::report_playback_outcome)
/// together with the generation that was current when the request was made.
pub trait MediaHandle: Send {
    /// Point the element at a new absolute source
    fn set_source(&mut self, url: &Url) -> Result<()>;

    /// Start (or restart) playback of the current source
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    ///
    /// Called on `stop()`. Elements without a pause concept can ignore it.
    fn pause(&mut self) -> Result<()> {
        Ok(())
    }
}
