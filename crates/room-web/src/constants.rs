// Front-end tuning: element ids, overlay styling and renderer sizing.

// DOM
pub const CANVAS_ID: &str = "app-canvas";
pub const CAPTION_ID: &str = "room-caption";
pub const CAPTION_TEXT_ID: &str = "room-caption-text";
pub const CAPTION_CLOSE_ID: &str = "room-caption-close";
pub const PANEL_ID: &str = "room-panel";
pub const PANEL_TEXT_ID: &str = "room-panel-text";
pub const PANEL_BUTTON_ID: &str = "room-panel-button";

pub const CAPTION_STYLE: &str = "position:fixed;left:50%;bottom:8%;transform:translateX(-50%);\
max-width:60%;padding:10px 16px;border-radius:8px;background:rgba(10,14,24,0.82);\
color:#f3ead7;font:15px Georgia,serif;text-align:center;pointer-events:none;";
pub const CAPTION_CLOSE_STYLE: &str = "margin-top:8px;padding:3px 12px;border:none;border-radius:6px;\
background:#f3ead7;color:#1a1a1a;font:12px system-ui;cursor:pointer;pointer-events:auto;";
pub const CAPTION_CLOSE_LABEL: &str = "Close";
pub const PANEL_STYLE: &str = "position:fixed;left:50%;top:50%;transform:translate(-50%,-50%);\
min-width:240px;padding:18px 22px;border-radius:10px;background:rgba(10,14,24,0.9);\
color:#f3ead7;font:16px Georgia,serif;text-align:center;white-space:pre-line;";
pub const PANEL_BUTTON_STYLE: &str = "margin-top:12px;padding:6px 18px;border:none;border-radius:6px;\
background:#ffd54f;color:#1a1a1a;font:bold 14px system-ui;cursor:pointer;";

// Renderer
pub const MIN_INSTANCE_CAPACITY: usize = 256;
pub const SPRITE_TINT_FLOOR: f32 = 0.35; // keep dark glyph colours visible against the room

// Instance kinds understood by the shader
pub const KIND_BOX: f32 = 0.0;
pub const KIND_SPRITE: f32 = 1.0;
pub const KIND_POINT: f32 = 2.0;
