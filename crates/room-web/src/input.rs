use glam::Vec2;

/// Maps a pointer position in CSS pixels (relative to the canvas' top-left)
/// to normalized device coordinates. Positions outside the canvas, or a
/// collapsed canvas, give `None`.
#[inline]
pub fn css_to_ndc(x_css: f32, y_css: f32, width: f32, height: f32) -> Option<Vec2> {
    if !(width > 0.0 && height > 0.0) {
        return None;
    }
    if !(0.0..=width).contains(&x_css) || !(0.0..=height).contains(&y_css) {
        return None;
    }
    Some(Vec2::new(
        (x_css / width) * 2.0 - 1.0,
        1.0 - (y_css / height) * 2.0,
    ))
}

/// Keys whose browser default (scrolling, history navigation) would fight the room.
#[inline]
pub fn suppresses_default(key: &str) -> bool {
    matches!(key, " " | "Spacebar" | "Backspace")
}

#[inline]
pub fn aspect_of(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}
