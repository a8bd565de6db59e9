//! The room's identifier → behaviour table.

use crate::constants::*;
use crate::effects::{
    AquariusLetters, DaisySong, EightBall, FlappyBook, GhostOrbs, GlobeTour, SheepRain,
    WolfSpirits,
};
use crate::event::AmbientOverride;
use crate::orchestrator::{EventEntry, EventTable};
use crate::scene::{Fog, Rgb};

/// Every object in the room that reacts to hover and clicks.
pub const INTERACTIVE_NAMES: &[&str] = &[
    "book1", "book2", "book3", "book4", "book5", "book6", "book53", "globe", "mug", "daisy",
];

pub fn ghost_fog() -> Fog {
    Fog {
        color: Rgb(GHOST_BACKGROUND),
        near: GHOST_FOG_NEAR,
        far: GHOST_FOG_FAR,
    }
}

pub fn room_events() -> EventTable {
    EventTable::new()
        .with(
            "book1",
            EventEntry::caption("This is book 1, full of adventures!").with_event(AquariusLetters),
        )
        .with(
            "book2",
            EventEntry::caption("Book 2: mystery awaits.")
                .with_event(GhostOrbs)
                .with_ambient(AmbientOverride::background(GHOST_BACKGROUND).with_fog(ghost_fog())),
        )
        .with(
            "book3",
            EventEntry::caption("Book 3: a classic tale.")
                .with_event(SheepRain)
                .with_ambient(AmbientOverride::background(SHEEP_BACKGROUND)),
        )
        .with(
            "book4",
            EventEntry::caption("Book 4: fun stories inside.")
                .with_event(WolfSpirits)
                .with_ambient(AmbientOverride::background(WOLF_BACKGROUND)),
        )
        .with(
            "book5",
            EventEntry::caption("Book 5: secrets revealed.").with_event(FlappyBook::default()),
        )
        .with(
            "book6",
            EventEntry::caption("Book 6: learn something new!").with_event(EightBall::default()),
        )
        .with("book53", EventEntry::caption("Book 53: the hidden gem."))
        .with(
            "globe",
            EventEntry::caption("A tiny globe of the world!")
                .with_event(GlobeTour)
                .with_ambient(AmbientOverride::background(GLOBE_BACKGROUND)),
        )
        .with("mug", EventEntry::caption("A cute mug for your coffee."))
        .with(
            "daisy",
            EventEntry::caption("A cheerful daisy plant.").with_event(DaisySong::default()),
        )
}
