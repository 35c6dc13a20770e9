use cgmath::Vector2;

/// Keys the exercises react to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Q,
    E,
    Z,
    C,
    R,
    Escape,
}

impl Key {
    /// Letter keys by their lowercase or uppercase character.
    pub fn from_char(c: char) -> Option<Self> {
        Some(match c.to_ascii_lowercase() {
            'w' => Key::W,
            'a' => Key::A,
            's' => Key::S,
            'd' => Key::D,
            'q' => Key::Q,
            'e' => Key::E,
            'z' => Key::Z,
            'c' => Key::C,
            'r' => Key::R,
            _ => return None,
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Movement keys currently held down.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct HeldKeys {
    pub w: bool,
    pub a: bool,
    pub s: bool,
    pub d: bool,
}

impl HeldKeys {
    pub fn set(&mut self, key: Key, state: KeyState) {
        let pressed = state == KeyState::Pressed;

        match key {
            Key::W => self.w = pressed,
            Key::A => self.a = pressed,
            Key::S => self.s = pressed,
            Key::D => self.d = pressed,
            _ => {}
        }
    }

    pub fn any(&self) -> bool {
        self.w || self.a || self.s || self.d
    }

    /// Screen space displacement for `speed` px/s over `dt` seconds, y pointing down.
    pub fn delta(&self, speed: f32, dt: f32) -> Vector2<f32> {
        let step = speed * dt;
        let mut delta = Vector2::new(0.0, 0.0);

        if self.w {
            delta.y -= step;
        }
        if self.s {
            delta.y += step;
        }
        if self.a {
            delta.x -= step;
        }
        if self.d {
            delta.x += step;
        }

        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_keys_cancel() {
        let mut keys = HeldKeys::default();
        keys.set(Key::W, KeyState::Pressed);
        keys.set(Key::S, KeyState::Pressed);
        keys.set(Key::D, KeyState::Pressed);

        assert_eq!(keys.delta(200.0, 0.5), Vector2::new(100.0, 0.0));

        keys.set(Key::D, KeyState::Released);
        keys.set(Key::S, KeyState::Released);
        assert_eq!(keys.delta(200.0, 0.5), Vector2::new(0.0, -100.0));
    }

    #[test]
    fn non_movement_keys_are_ignored() {
        let mut keys = HeldKeys::default();
        keys.set(Key::R, KeyState::Pressed);

        assert!(!keys.any());
    }

    #[test]
    fn keys_from_chars() {
        assert_eq!(Key::from_char('Q'), Some(Key::Q));
        assert_eq!(Key::from_char('r'), Some(Key::R));
        assert_eq!(Key::from_char('x'), None);
    }
}
