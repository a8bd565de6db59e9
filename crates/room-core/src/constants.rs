use glam::Vec3;

// Shared room tuning constants used by the core and the web front-end.

// Palette
pub const DEFAULT_BACKGROUND: u32 = 0x0b1e3f;
pub const SHEEP_BACKGROUND: u32 = 0xd6ecc4; // pasture green while the sheep are out
pub const GLOBE_BACKGROUND: u32 = 0x9fd3ff; // clear-sky blue for the globe tour
pub const GHOST_BACKGROUND: u32 = 0x05070f;
pub const WOLF_BACKGROUND: u32 = 0x1a0610;

// Ghost fog
pub const GHOST_FOG_NEAR: f32 = 4.0;
pub const GHOST_FOG_FAR: f32 = 18.0;

// Camera
pub const CAMERA_EYE: [f32; 3] = [0.0, 5.0, 8.0];
pub const CAMERA_TARGET: [f32; 3] = [0.0, 1.0, 0.0];
pub const CAMERA_FOVY_DEGREES: f32 = 70.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;

// Hover
pub const HOVER_LIFT: f32 = 0.3; // world units an object rises while hovered
pub const HOVER_BLEND: f32 = 0.1; // per-frame blend toward the target lift

// Flappy physics (per tick, frame-coupled)
pub const FLAPPY_GRAVITY: f64 = 0.002;
pub const FLAPPY_FLAP_IMPULSE: f64 = 0.04;
pub const FLAPPY_PIPE_SPEED: f64 = 0.015;
pub const FLAPPY_FLOOR: f64 = -0.7;
pub const FLAPPY_CEILING: f64 = 0.7;
pub const FLAPPY_SPAWN_INTERVAL_MS: f64 = 1800.0;

// Flappy layout (play-field local units)
pub const FLAPPY_BIRD_X: f64 = -0.4;
pub const FLAPPY_PIPE_START_X: f64 = 1.2;
pub const FLAPPY_DESPAWN_X: f64 = -1.5; // scored pipes keep scrolling until here
pub const FLAPPY_GAP_BAND: f64 = 0.25; // gap centre drawn from [-band, band]
pub const FLAPPY_BARRIER_OFFSET: f64 = 0.6; // barrier centres sit at gap +/- offset
pub const FLAPPY_BARRIER_SIZE: [f32; 3] = [0.15, 0.6, 0.1];
pub const FLAPPY_HIT_DX: f64 = 0.12;
pub const FLAPPY_HIT_DY: f64 = 0.3;
pub const FLAPPY_FIELD_POSITION: [f32; 3] = [5.0, 6.0, 1.0];
pub const FLAPPY_FIELD_SCALE: f32 = 2.0;
pub const FLAPPY_BIRD_SIZE: f32 = 0.3;

// Flappy colours
pub const FLAPPY_BIRD_GLYPH: &str = "\u{1F41F}"; // fish
pub const FLAPPY_BIRD_COLOR: u32 = 0xffd54f;
pub const FLAPPY_PIPE_COLOR: u32 = 0x4caf50;

pub const FLAPPY_INTRO: &str = "Press SPACE to flap!\nClick START to begin!";
pub const FLAPPY_ACTION: &str = "START";

// Sheep rain
pub const SHEEP_COUNT: usize = 20;
pub const SHEEP_GLYPH: &str = "\u{1F411}";
pub const SHEEP_MIN_MS: f64 = 2000.0;
pub const SHEEP_MAX_MS: f64 = 3000.0;
pub const SHEEP_RISE: f32 = 0.6; // world units, about 100 css px at the sheep plane
pub const SHEEP_DISTANCE: f32 = 4.0; // from the eye along the view axis
pub const SHEEP_MIN_SIZE: f32 = 0.15;
pub const SHEEP_MAX_SIZE: f32 = 0.35;

// Globe tour
pub const GLOBE_CARD_INTERVAL_MS: f64 = 1000.0;
pub const GLOBE_CARD_FADE_IN_MS: f64 = 1500.0;
pub const GLOBE_CARD_HOLD_MS: f64 = 4000.0;
pub const GLOBE_CARD_FADE_OUT_MS: f64 = 2000.0;
pub const GLOBE_CARD_DISTANCE: f32 = 5.0;
pub const GLOBE_PLANE_GLYPH: &str = "\u{2708}\u{FE0F}";
pub const GLOBE_PLANE_CROSS_MS: f64 = 5000.0;
pub const GLOBE_PLANE_HOLD_MS: f64 = 2000.0;
pub const GLOBE_PLANE_FADE_MS: f64 = 1000.0;

// Ghost orbs
pub const GHOST_ORB_COUNT: usize = 50;
pub const GHOST_ORB_COLOR: u32 = 0xc8ffff;

// Aquarius letters
pub const AQUARIUS_TEXT: &str = "Aquarius Independence";
pub const AQUARIUS_COLOR: u32 = 0x66ccff;
pub const AQUARIUS_DISTANCE: f32 = 2.0;
pub const AQUARIUS_SPACING: f32 = 0.3;
pub const AQUARIUS_LETTER_SIZE: f32 = 0.5;
pub const AQUARIUS_MIN_SPEED: f32 = 0.002;
pub const AQUARIUS_MAX_SPEED: f32 = 0.005;
pub const AQUARIUS_BOOST: f32 = 0.003; // added to every letter's speed per press
pub const AQUARIUS_SWAY: f32 = 0.002;

// Wolf spirits
pub const WOLF_HEART_COUNT: usize = 3000;
pub const WOLF_HEART_COLOR: u32 = 0xff4f79;
pub const WOLF_POINT_SIZE: f32 = 0.08;
pub const WOLF_OPACITY: f32 = 0.9;
pub const WOLF_CURVE_SCALE: f32 = 23.0;
pub const WOLF_SQUASH_Y: f32 = 0.9;
pub const WOLF_POSITION: [f32; 3] = [3.0, 8.5, 3.0];
pub const WOLF_CONVERGE: f32 = 0.005; // per-tick blend toward the curve
pub const WOLF_SPIN: f32 = 0.0015; // radians per tick

// Eight ball
pub const EIGHT_BALL_ANSWERS: &[&str] = &[
    "\u{2705}",
    "\u{274C}",
    "\u{1F4AF}",
    "\u{02BB}Ae",
    "\u{02BB}A\u{02BB}ole",
    "Si",
    "\u{1F937}\u{200D}\u{2640}\u{FE0F}",
];
pub const EIGHT_BALL_PROMPT: &str = "Ask a question...";
pub const EIGHT_BALL_EMPTY: &str = "You need to ask something!";

// Keys (KeyboardEvent.key values)
pub const DISMISS_KEY: &str = "Escape";
pub const ANSWER_KEY: &str = "Enter";

// Audio
pub const DAISY_TRACK: &str = "/audio/daisies.mp3";

#[inline]
pub fn camera_eye_vec3() -> Vec3 {
    Vec3::from(CAMERA_EYE)
}

#[inline]
pub fn camera_target_vec3() -> Vec3 {
    Vec3::from(CAMERA_TARGET)
}

/// Space flaps; browsers report it as `" "` (older ones as `"Spacebar"`).
#[inline]
pub fn is_flap_key(key: &str) -> bool {
    matches!(key, " " | "Spacebar")
}
