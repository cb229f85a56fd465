//! Logical screens, the main menu and blanked transitions
use std::time::Duration;

/// One logical full-device view
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Screen {
    /// Startup animation
    Boot,
    /// Main menu
    Menu,
    /// Project list
    Projects,
    /// A single project, given as an index into [`PROJECTS`](crate::PROJECTS)
    ProjectDetail {
        /// Index of the selected project
        project: usize,
    },
    /// About text
    About,
    /// Skill meters
    Skills,
    /// Contact links
    Contact,
    /// Hidden credits roll
    Credits,
}

impl Screen {
    /// Checks whether cancel returns from this screen to the menu
    pub fn is_content(&self) -> bool {
        matches!(
            self,
            Screen::Projects
                | Screen::About
                | Screen::Skills
                | Screen::Contact
                | Screen::Credits
        )
    }
}

/// Entry in the main menu
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MenuEntry {
    /// Text shown in the menu
    pub label: &'static str,
    /// Screen opened by confirming this entry
    pub target: Screen,
}

const MENU: [MenuEntry; 5] = [
    MenuEntry {
        label: "PROJECTS",
        target: Screen::Projects,
    },
    MenuEntry {
        label: "ABOUT",
        target: Screen::About,
    },
    MenuEntry {
        label: "SKILLS",
        target: Screen::Skills,
    },
    MenuEntry {
        label: "CONTACT",
        target: Screen::Contact,
    },
    MenuEntry {
        label: "CREDITS",
        target: Screen::Credits,
    },
];

/// Returns the menu entries, with the credits entry only once unlocked
pub fn menu(credits: bool) -> &'static [MenuEntry] {
    if credits {
        &MENU
    } else {
        &MENU[..MENU.len() - 1]
    }
}

/// Moves an index back by one, wrapping to the end of the list
pub fn wrap_prev(i: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if i == 0 || i >= len {
        len - 1
    } else {
        i - 1
    }
}

/// Moves an index forward by one, wrapping to the start of the list
pub fn wrap_next(i: usize, len: usize) -> usize {
    if i + 1 >= len { 0 } else { i + 1 }
}

/// Blanking time before the new screen is swapped in
const BLANK: Duration = Duration::from_millis(150);

/// Blanking time after the new screen is swapped in
const SETTLE: Duration = Duration::from_millis(50);

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Stage {
    /// Old screen is still active, but hidden
    Blank,
    /// New screen is active, but still hidden
    Settle,
}

/// Two-phase hardware blink between screens
#[derive(Copy, Clone, Debug)]
pub struct Transition {
    target: Screen,
    stage: Stage,
    deadline: Duration,
}

impl Transition {
    /// Starts a transition to `target`
    pub fn new(target: Screen, now: Duration) -> Self {
        Self {
            target,
            stage: Stage::Blank,
            deadline: now + BLANK,
        }
    }

    /// Time of the next pending step
    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Runs the pending step if it is due
    ///
    /// Returns the screen to swap in (once) and whether the transition is
    /// still in flight afterwards.
    pub fn step(&mut self, now: Duration) -> (Option<Screen>, bool) {
        if self.deadline > now {
            return (None, true);
        }
        match self.stage {
            Stage::Blank => {
                self.stage = Stage::Settle;
                self.deadline += SETTLE;
                (Some(self.target), true)
            }
            Stage::Settle => (None, false),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn wrapping() {
        assert_eq!(wrap_prev(0, 4), 3);
        assert_eq!(wrap_prev(3, 4), 2);
        assert_eq!(wrap_next(3, 4), 0);
        assert_eq!(wrap_next(0, 4), 1);
        assert_eq!(wrap_prev(0, 1), 0);
        assert_eq!(wrap_next(0, 1), 0);
    }

    #[test]
    fn menu_unlock() {
        assert_eq!(menu(false).len(), 4);
        assert_eq!(menu(true).len(), 5);
        assert_eq!(menu(true)[4].target, Screen::Credits);
        assert!(menu(false).iter().all(|e| e.target != Screen::Credits));
    }

    #[test]
    fn transition_stages() {
        let ms = Duration::from_millis;
        let mut t = Transition::new(Screen::Menu, ms(1000));
        assert_eq!(t.step(ms(1149)), (None, true));
        assert_eq!(t.step(ms(1150)), (Some(Screen::Menu), true));
        assert_eq!(t.deadline(), ms(1200));
        assert_eq!(t.step(ms(1199)), (None, true));
        assert_eq!(t.step(ms(1200)), (None, false));
    }
}
