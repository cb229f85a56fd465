//! Keys, pointer events and the actions they map to

/// Key input to the device, as reported by the host
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Space,
    Escape,
    Backspace,
    Char(char),
}

impl Key {
    /// Parses a key name, as used by scripts and the command line
    ///
    /// Named keys are matched case-insensitively; anything else must be a
    /// single character.
    pub fn from_name(s: &str) -> Option<Self> {
        let k = match s.to_ascii_lowercase().as_str() {
            "up" | "arrowup" => Key::Up,
            "down" | "arrowdown" => Key::Down,
            "left" | "arrowleft" => Key::Left,
            "right" | "arrowright" => Key::Right,
            "enter" | "return" => Key::Enter,
            "space" => Key::Space,
            "esc" | "escape" => Key::Escape,
            "backspace" => Key::Backspace,
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(' '), None) => Key::Space,
                    (Some(c), None) => Key::Char(c),
                    _ => return None,
                }
            }
        };
        Some(k)
    }

    /// Checks whether two keys are the same
    ///
    /// Letters are compared case-insensitively; every other key must match
    /// exactly.
    pub fn matches(&self, other: &Key) -> bool {
        match (self, other) {
            (Key::Char(a), Key::Char(b)) => {
                a == b || a.to_lowercase().eq(b.to_lowercase())
            }
            (a, b) => a == b,
        }
    }
}

/// Logical navigation action
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Action {
    Up,
    Down,
    Confirm,
    Cancel,
}

impl Action {
    /// Maps a key onto its action, if it has one
    pub fn from_key(k: Key) -> Option<Self> {
        let a = match k {
            Key::Up => Action::Up,
            Key::Down => Action::Down,
            Key::Enter | Key::Space => Action::Confirm,
            Key::Escape | Key::Backspace => Action::Cancel,
            Key::Char(c) if c.eq_ignore_ascii_case(&'a') => Action::Confirm,
            Key::Char(c) if c.eq_ignore_ascii_case(&'b') => Action::Cancel,
            _ => return None,
        };
        Some(a)
    }
}

/// Pointer event over a listed row (menu entry or project)
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Pointer {
    /// The pointer is over the row; moves the highlight without confirming
    Hover(usize),
    /// The row was clicked; moves the highlight then confirms
    Click(usize),
}

/// Input to [`Device::update`](crate::Device::update)
#[derive(Clone, Debug, Default)]
pub struct Input {
    /// Keys pressed since the last update, in order
    pub keys: Vec<Key>,

    /// On-screen buttons pressed since the last update
    pub buttons: Vec<Action>,

    /// Pointer events over listed rows
    pub pointer: Vec<Pointer>,
}

impl Input {
    /// Builds an input with a single key press
    pub fn key(k: Key) -> Self {
        Self {
            keys: vec![k],
            ..Self::default()
        }
    }

    /// Builds an input with a single on-screen button press
    pub fn button(a: Action) -> Self {
        Self {
            buttons: vec![a],
            ..Self::default()
        }
    }

    /// Builds an input with a single pointer event
    pub fn pointer(p: Pointer) -> Self {
        Self {
            pointer: vec![p],
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn key_actions() {
        assert_eq!(Action::from_key(Key::Up), Some(Action::Up));
        assert_eq!(Action::from_key(Key::Down), Some(Action::Down));
        for k in [Key::Enter, Key::Space, Key::Char('a'), Key::Char('A')] {
            assert_eq!(Action::from_key(k), Some(Action::Confirm), "{k:?}");
        }
        for k in [Key::Escape, Key::Backspace, Key::Char('b'), Key::Char('B')]
        {
            assert_eq!(Action::from_key(k), Some(Action::Cancel), "{k:?}");
        }
        assert_eq!(Action::from_key(Key::Left), None);
        assert_eq!(Action::from_key(Key::Right), None);
        assert_eq!(Action::from_key(Key::Char('x')), None);
    }

    #[test]
    fn key_names() {
        assert_eq!(Key::from_name("UP"), Some(Key::Up));
        assert_eq!(Key::from_name("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_name("esc"), Some(Key::Escape));
        assert_eq!(Key::from_name(" "), Some(Key::Space));
        assert_eq!(Key::from_name("B"), Some(Key::Char('B')));
        assert_eq!(Key::from_name("bogus"), None);
        assert_eq!(Key::from_name(""), None);
    }

    #[test]
    fn key_matching() {
        assert!(Key::Char('a').matches(&Key::Char('A')));
        assert!(!Key::Char('a').matches(&Key::Char('b')));
        assert!(Key::Up.matches(&Key::Up));
        assert!(!Key::Up.matches(&Key::Down));
        assert!(!Key::Char('a').matches(&Key::Enter));
    }
}
