use std::cell::RefCell;
use std::rc::Rc;

/// Presentation collaborator. The core only says what to show; styling and
/// DOM structure belong to the implementation.
pub trait Presenter {
    fn show_caption(&mut self, text: &str);
    fn hide_caption(&mut self);
    /// Game prompt or result panel, optionally with an action button that
    /// comes back as [`crate::InputEvent::PanelAction`].
    fn show_panel(&mut self, text: &str, action: Option<&str>);
    fn hide_panel(&mut self);
    fn set_pointer_cursor(&mut self, pointer: bool);
}

pub type SharedPresenter = Rc<RefCell<dyn Presenter>>;

/// Looping background music.
pub trait Soundtrack {
    fn play_loop(&mut self, src: &str);
    /// Pause and rewind.
    fn stop(&mut self);
}

pub type SharedSoundtrack = Rc<RefCell<dyn Soundtrack>>;
