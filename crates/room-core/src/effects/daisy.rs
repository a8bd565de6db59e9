use crate::constants::DAISY_TRACK;
use crate::error::RoomError;
use crate::event::{EventContext, MiniEvent, StopHandle};
use std::borrow::Cow;

/// Loops a song until stopped; stopping pauses and rewinds.
#[derive(Clone, Debug)]
pub struct DaisySong {
    track: Cow<'static, str>,
}

impl DaisySong {
    pub fn new(track: impl Into<Cow<'static, str>>) -> Self {
        Self {
            track: track.into(),
        }
    }
}

impl Default for DaisySong {
    fn default() -> Self {
        Self::new(DAISY_TRACK)
    }
}

impl MiniEvent for DaisySong {
    fn start(&self, ctx: &EventContext) -> Result<StopHandle, RoomError> {
        if self.track.is_empty() {
            return Err(RoomError::Variant {
                id: "daisy".into(),
                reason: "no track configured".into(),
            });
        }
        ctx.soundtrack.borrow_mut().play_loop(&self.track);
        let soundtrack = ctx.soundtrack.clone();
        Ok(StopHandle::new(move || soundtrack.borrow_mut().stop()))
    }
}
