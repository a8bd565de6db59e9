use crate::constants::*;
use crate::error::RoomError;
use crate::event::{EventContext, MiniEvent, StopHandle};
use crate::input::InputEvent;
use crate::presenter::SharedPresenter;
use crate::schedule::ActiveFlag;
use rand::rngs::StdRng;
use rand::Rng;

/// Magic eight ball. Typed keys build a question on the panel; Enter or the
/// panel button asks it, and a pointer press anywhere shakes the ball for an
/// answer straight away.
#[derive(Clone, Copy, Debug)]
pub struct EightBall {
    answers: &'static [&'static str],
}

impl EightBall {
    pub fn new(answers: &'static [&'static str]) -> Self {
        Self { answers }
    }
}

impl Default for EightBall {
    fn default() -> Self {
        Self::new(EIGHT_BALL_ANSWERS)
    }
}

const ASK_ACTION: &str = "Ask!";

struct Session {
    answers: &'static [&'static str],
    question: String,
    rng: StdRng,
    presenter: SharedPresenter,
}

impl Session {
    fn show_question(&self) {
        let text = if self.question.is_empty() {
            EIGHT_BALL_PROMPT
        } else {
            self.question.as_str()
        };
        self.presenter.borrow_mut().show_panel(text, Some(ASK_ACTION));
    }

    fn shake(&mut self) {
        let answer = self.answers[self.rng.gen_range(0..self.answers.len())];
        log::debug!("[eight-ball] {answer}");
        self.presenter.borrow_mut().show_caption(answer);
    }

    fn ask(&mut self) {
        if self.question.trim().is_empty() {
            self.presenter.borrow_mut().show_caption(EIGHT_BALL_EMPTY);
        } else {
            self.shake();
        }
    }

    fn on_input(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerDown => self.shake(),
            InputEvent::PanelAction => self.ask(),
            InputEvent::Key(key) if key == ANSWER_KEY => self.ask(),
            InputEvent::Key(key) if key == "Backspace" => {
                self.question.pop();
                self.show_question();
            }
            InputEvent::Key(key) if key.chars().count() == 1 => {
                self.question.push_str(key);
                self.show_question();
            }
            InputEvent::Key(_) => {}
        }
    }
}

impl MiniEvent for EightBall {
    fn start(&self, ctx: &EventContext) -> Result<StopHandle, RoomError> {
        if self.answers.is_empty() {
            return Err(RoomError::Variant {
                id: "eight-ball".into(),
                reason: "no answers configured".into(),
            });
        }
        let mut session = Session {
            answers: self.answers,
            question: String::new(),
            rng: ctx.rng(),
            presenter: ctx.presenter.clone(),
        };
        session.show_question();

        let flag = ActiveFlag::new();
        let listener = {
            let flag = flag.clone();
            ctx.input.attach(move |event| {
                if flag.is_active() {
                    session.on_input(event);
                }
            })
        };

        let input = ctx.input.clone();
        let presenter = ctx.presenter.clone();
        Ok(StopHandle::new(move || {
            flag.clear();
            input.detach(listener);
            presenter.borrow_mut().hide_panel();
        }))
    }
}
