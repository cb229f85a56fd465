//! Hidden key sequence detector
use crate::Key;
use std::collections::VecDeque;

/// The unlock sequence
pub const CODE: [Key; 10] = [
    Key::Up,
    Key::Up,
    Key::Down,
    Key::Down,
    Key::Left,
    Key::Right,
    Key::Left,
    Key::Right,
    Key::Char('b'),
    Key::Char('a'),
];

/// Watches the most recent key presses for a fixed sequence
///
/// Once the sequence is seen, the detector latches and ignores every key
/// until [`SecretCode::reset`] is called.
pub struct SecretCode {
    code: &'static [Key],
    window: VecDeque<Key>,
    activated: bool,
}

impl Default for SecretCode {
    fn default() -> Self {
        Self::new(&CODE)
    }
}

impl SecretCode {
    /// Builds a detector for the given sequence
    pub fn new(code: &'static [Key]) -> Self {
        Self {
            code,
            window: VecDeque::with_capacity(code.len()),
            activated: false,
        }
    }

    /// Checks whether the sequence has been entered
    pub fn activated(&self) -> bool {
        self.activated
    }

    /// Records a key press
    ///
    /// Returns `true` exactly once, on the key that completes the sequence.
    pub fn push(&mut self, k: Key) -> bool {
        if self.activated || self.code.is_empty() {
            return false;
        }
        self.window.push_back(k);
        while self.window.len() > self.code.len() {
            self.window.pop_front();
        }
        if self.window.len() == self.code.len()
            && self.window.iter().zip(self.code).all(|(a, b)| a.matches(b))
        {
            self.activated = true;
        }
        self.activated
    }

    /// Clears the window and the latch
    pub fn reset(&mut self) {
        self.window.clear();
        self.activated = false;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    fn feed(s: &mut SecretCode, keys: &[Key]) -> usize {
        keys.iter().filter(|k| s.push(**k)).count()
    }

    #[test]
    fn exact_sequence() {
        let mut s = SecretCode::default();
        for k in &CODE[..CODE.len() - 1] {
            assert!(!s.push(*k));
        }
        assert!(s.push(Key::Char('a')));
        assert!(s.activated());
    }

    #[test]
    fn letters_fold_case() {
        let mut s = SecretCode::default();
        let mut keys = CODE.to_vec();
        keys[8] = Key::Char('B');
        keys[9] = Key::Char('A');
        assert_eq!(feed(&mut s, &keys), 1);
    }

    #[test]
    fn noise_before_sequence() {
        let mut s = SecretCode::default();
        let mut keys = vec![Key::Char('x'), Key::Up, Key::Enter, Key::Up];
        keys.extend(CODE);
        assert_eq!(feed(&mut s, &keys), 1);
    }

    #[test]
    fn broken_sequence() {
        let mut s = SecretCode::default();
        let mut keys = CODE.to_vec();
        keys.insert(5, Key::Enter);
        assert_eq!(feed(&mut s, &keys), 0);
        assert!(!s.activated());
    }

    #[test]
    fn latches_until_reset() {
        let mut s = SecretCode::default();
        assert_eq!(feed(&mut s, &CODE), 1);
        assert_eq!(feed(&mut s, &CODE), 0);
        assert!(s.activated());

        s.reset();
        assert!(!s.activated());
        assert_eq!(feed(&mut s, &CODE[..5]), 0);
        assert_eq!(feed(&mut s, &CODE), 1);
    }

    fn any_key() -> impl Strategy<Value = Key> {
        prop_oneof![
            Just(Key::Up),
            Just(Key::Down),
            Just(Key::Left),
            Just(Key::Right),
            Just(Key::Enter),
            Just(Key::Char('a')),
            Just(Key::Char('A')),
            Just(Key::Char('b')),
            Just(Key::Char('B')),
        ]
    }

    proptest! {
        #[test]
        fn activates_iff_tail_matches(
            keys in proptest::collection::vec(any_key(), 0..40)
        ) {
            let mut s = SecretCode::default();
            let mut fired = None;
            for (i, k) in keys.iter().enumerate() {
                if s.push(*k) {
                    prop_assert!(fired.is_none());
                    fired = Some(i);
                }
            }

            // First index at which the trailing window matches the code
            let expected = (CODE.len()..=keys.len()).find(|&end| {
                keys[end - CODE.len()..end]
                    .iter()
                    .zip(&CODE)
                    .all(|(a, b)| a.matches(b))
            });
            prop_assert_eq!(fired, expected.map(|end| end - 1));
        }
    }
}
