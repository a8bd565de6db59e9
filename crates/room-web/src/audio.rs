use room_core::Soundtrack;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Autoplay rejections arrive through the promise, not the call.
fn watch_playback(src: String, promise: js_sys::Promise) {
    spawn_local(async move {
        if let Err(e) = JsFuture::from(promise).await {
            log::warn!("[audio] playback of {} rejected: {:?}", src, e);
        }
    });
}

/// Looping `<audio>` element; created lazily on the first `play_loop`.
#[derive(Default)]
pub struct HtmlSoundtrack {
    element: Option<web::HtmlAudioElement>,
    src: String,
}

impl HtmlSoundtrack {
    pub fn new() -> Self {
        Self::default()
    }

    fn element_for(&mut self, src: &str) -> Option<&web::HtmlAudioElement> {
        if self.element.is_none() || self.src != src {
            match web::HtmlAudioElement::new_with_src(src) {
                Ok(el) => {
                    el.set_loop(true);
                    self.element = Some(el);
                    self.src = src.to_string();
                }
                Err(e) => {
                    log::error!("[audio] cannot create <audio> for {}: {:?}", src, e);
                    return None;
                }
            }
        }
        self.element.as_ref()
    }
}

impl Soundtrack for HtmlSoundtrack {
    fn play_loop(&mut self, src: &str) {
        if let Some(el) = self.element_for(src) {
            el.set_current_time(0.0);
            match el.play() {
                Ok(promise) => {
                    log::info!("[audio] looping {}", src);
                    watch_playback(src.to_string(), promise);
                }
                Err(e) => log::warn!("[audio] play {} failed: {:?}", src, e),
            }
        }
    }

    fn stop(&mut self) {
        if let Some(el) = &self.element {
            _ = el.pause();
            el.set_current_time(0.0);
            log::info!("[audio] stopped {}", self.src);
        }
    }
}
