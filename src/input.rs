//! Platform input mapping
//!
//! Translates key codes, key names and touch positions into game keys.
//! Anything unrecognised maps to `None` and is ignored.

use crate::consts::{DOWN_KEY, LEFT_KEY, RIGHT_KEY, UP_KEY};
use crate::sim::Key;

/// Map a legacy `keyCode` to a game key
pub fn key_from_code(code: u32) -> Option<Key> {
    match code {
        LEFT_KEY => Some(Key::Left),
        UP_KEY => Some(Key::Up),
        RIGHT_KEY => Some(Key::Right),
        DOWN_KEY => Some(Key::Down),
        _ => None,
    }
}

/// Map a `KeyboardEvent.key` value to a game key
pub fn key_from_name(name: &str) -> Option<Key> {
    match name {
        "ArrowLeft" | "Left" => Some(Key::Left),
        "ArrowUp" | "Up" => Some(Key::Up),
        "ArrowRight" | "Right" => Some(Key::Right),
        "ArrowDown" | "Down" => Some(Key::Down),
        _ => None,
    }
}

/// Touches on the left half steer left, the right half steers right
pub fn key_from_touch(client_x: f32, canvas_width: f32) -> Key {
    if client_x < canvas_width / 2.0 {
        Key::Left
    } else {
        Key::Right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes() {
        assert_eq!(key_from_code(37), Some(Key::Left));
        assert_eq!(key_from_code(38), Some(Key::Up));
        assert_eq!(key_from_code(39), Some(Key::Right));
        assert_eq!(key_from_code(40), Some(Key::Down));
        assert_eq!(key_from_code(32), None);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(key_from_name("ArrowRight"), Some(Key::Right));
        assert_eq!(key_from_name("a"), None);
    }

    #[test]
    fn test_touch_halves() {
        assert_eq!(key_from_touch(10.0, 800.0), Key::Left);
        assert_eq!(key_from_touch(400.0, 800.0), Key::Right);
        assert_eq!(key_from_touch(799.0, 800.0), Key::Right);
    }
}
