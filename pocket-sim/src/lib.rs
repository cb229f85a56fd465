//! A handheld game console, simulated as a portfolio menu system
//!
//! The [`Device`] owns every piece of state; the host feeds it [`Input`] with
//! the current time and draws the returned [`Output`]. Time is always passed
//! in by the caller, so the whole state machine runs without real timers.
#![warn(missing_docs)]
use log::{debug, info};
use std::time::Duration;

mod audio;
pub mod boot;
pub mod catalog;
mod input;
pub mod scale;
mod screen;
mod secret;
mod sound;
mod storage;
mod view;

pub use audio::{Mixer, SoundCue, Voice, CHANNELS as AUDIO_CHANNELS};
pub use audio::SAMPLE_RATE as AUDIO_SAMPLE_RATE;
pub use boot::BootPhase;
pub use catalog::{Project, PROJECTS};
pub use input::{Action, Input, Key, Pointer};
pub use screen::{MenuEntry, Screen};
pub use secret::{SecretCode, CODE as SECRET_CODE};
pub use sound::{Speaker, SOUND_KEY};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use view::{Row, View};

use boot::{Boot, BootEvent};
use screen::Transition;

/// Output from [`Device::update`]
pub struct Output {
    /// Active screen
    pub screen: Screen,

    /// Screen contents to draw
    pub view: View,

    /// Sound cues fired during this update, in order
    pub cues: Vec<SoundCue>,
}

/// Handle to the simulated device
pub struct Device {
    /// Latest time seen; time never runs backwards
    now: Duration,

    screen: Screen,
    boot: Boot,

    /// In-flight screen change, if any
    transition: Option<Transition>,

    menu_index: usize,
    project_index: usize,

    /// Set once the secret code is entered; lasts for the session
    credits: bool,

    secret: SecretCode,
}

impl Device {
    /// Powers on a new device at time `now`
    pub fn new(now: Duration) -> Self {
        Self {
            now,
            screen: Screen::Boot,
            boot: Boot::new(now),
            transition: None,
            menu_index: 0,
            project_index: 0,
            credits: false,
            secret: SecretCode::default(),
        }
    }

    /// Returns the active screen
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns the current boot phase
    pub fn boot_phase(&self) -> BootPhase {
        self.boot.phase()
    }

    /// Checks whether the boot sequence has completed
    pub fn booted(&self) -> bool {
        self.boot.done()
    }

    /// Checks whether the screen is blanked by a transition
    pub fn transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Checks whether the credits entry has been unlocked
    pub fn credits_unlocked(&self) -> bool {
        self.credits
    }

    /// Returns the menu entries currently available
    pub fn menu(&self) -> &'static [MenuEntry] {
        screen::menu(self.credits)
    }

    /// Returns the highlighted menu index
    pub fn menu_index(&self) -> usize {
        self.menu_index
    }

    /// Returns the highlighted project index
    pub fn project_index(&self) -> usize {
        self.project_index
    }

    /// Returns the project being viewed, if the detail screen is active
    pub fn selected_project(&self) -> Option<&'static Project> {
        match self.screen {
            Screen::ProjectDetail { project } => PROJECTS.get(project),
            _ => None,
        }
    }

    /// Re-arms the secret code detector
    ///
    /// The credits entry stays unlocked.
    pub fn reset_secret(&mut self) {
        self.secret.reset();
    }

    /// Returns the time at which the device next changes on its own
    ///
    /// The host should call [`Device::update`] no later than this.
    pub fn next_deadline(&self) -> Option<Duration> {
        let boot = match self.screen {
            Screen::Boot if self.boot.phase() == BootPhase::Ready => {
                // Blinking cursor
                let period = boot::CURSOR_BLINK.as_millis() as u64;
                let ms = self.now.as_millis() as u64;
                Some(Duration::from_millis((ms / period + 1) * period))
            }
            Screen::Boot => self.boot.deadline(),
            _ => None,
        };
        let blink = self.transition.map(|t| t.deadline());
        match (boot, blink) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Advances time to `now`, then handles incoming events
    #[must_use]
    pub fn update(&mut self, now: Duration, input: Input) -> Output {
        let mut cues = vec![];
        self.advance(now, &mut cues);

        for k in input.keys {
            if let Some(a) = Action::from_key(k) {
                self.apply(a, &mut cues);
            }
            // The secret code watches every key, in parallel with the
            // router, and its navigation wins.
            if self.secret.push(k) {
                info!("secret code entered");
                cues.push(SoundCue::Secret);
                self.credits = true;
                self.change_screen(Screen::Credits);
            }
        }
        for a in input.buttons {
            self.apply(a, &mut cues);
        }
        for p in input.pointer {
            self.point(p, &mut cues);
        }

        Output {
            screen: self.screen,
            view: self.view(),
            cues,
        }
    }

    /// Runs every boot and transition step due at or before `now`
    fn advance(&mut self, now: Duration, cues: &mut Vec<SoundCue>) {
        let now = now.max(self.now);
        loop {
            let boot = match self.screen {
                Screen::Boot => self.boot.deadline(),
                _ => None,
            };
            let blink = self.transition.map(|t| t.deadline());
            let next = match (boot, blink) {
                (Some(a), Some(b)) => a.min(b),
                (Some(a), None) | (None, Some(a)) => a,
                (None, None) => break,
            };
            if next > now {
                break;
            }
            self.now = next;
            if boot == Some(next) {
                self.step_boot(next, cues);
            } else {
                self.step_transition(next);
            }
        }
        self.now = now;
    }

    fn step_boot(&mut self, at: Duration, cues: &mut Vec<SoundCue>) {
        if let Some(e) = self.boot.step(at) {
            debug!("boot: {e:?}");
            if e == BootEvent::Phase(BootPhase::Logo) {
                cues.push(SoundCue::Startup);
            }
        }
        if self.boot.settle().is_some() {
            info!("boot complete at {at:?}");
        }
    }

    fn step_transition(&mut self, at: Duration) {
        let Some(t) = self.transition.as_mut() else {
            return;
        };
        let (swap, live) = t.step(at);
        if !live {
            self.transition = None;
        }
        if let Some(s) = swap {
            self.enter(s);
        }
    }

    /// Swaps in a new screen
    fn enter(&mut self, s: Screen) {
        if self.screen == Screen::Boot && s != Screen::Boot {
            self.boot.cancel();
        }
        info!("screen: {:?} -> {s:?}", self.screen);
        self.screen = s;
    }

    /// Starts a blanked transition; the latest call wins
    fn change_screen(&mut self, target: Screen) {
        self.transition = Some(Transition::new(target, self.now));
    }

    /// Applies a logical action to the current state
    fn apply(&mut self, a: Action, cues: &mut Vec<SoundCue>) {
        match a {
            Action::Up | Action::Down => {
                let len = match self.screen {
                    Screen::Menu => self.menu().len(),
                    Screen::Projects => PROJECTS.len(),
                    _ => return,
                };
                let i = if self.screen == Screen::Menu {
                    &mut self.menu_index
                } else {
                    &mut self.project_index
                };
                *i = if a == Action::Up {
                    screen::wrap_prev(*i, len)
                } else {
                    screen::wrap_next(*i, len)
                };
                cues.push(SoundCue::Navigate);
            }
            Action::Confirm => {
                let target = match self.screen {
                    Screen::Boot if self.boot.phase() == BootPhase::Ready => {
                        Screen::Menu
                    }
                    Screen::Menu => match self.menu().get(self.menu_index) {
                        Some(e) => e.target,
                        None => return,
                    },
                    Screen::Projects => Screen::ProjectDetail {
                        project: self.project_index,
                    },
                    _ => return,
                };
                cues.push(SoundCue::Confirm);
                self.change_screen(target);
            }
            Action::Cancel => {
                let target = match self.screen {
                    Screen::ProjectDetail { .. } => Screen::Projects,
                    s if s.is_content() => Screen::Menu,
                    _ => return,
                };
                cues.push(SoundCue::Cancel);
                self.change_screen(target);
            }
        }
    }

    /// Handles a pointer event over a listed row
    fn point(&mut self, p: Pointer, cues: &mut Vec<SoundCue>) {
        let (Pointer::Hover(i) | Pointer::Click(i)) = p;
        let index = match self.screen {
            Screen::Menu if i < self.menu().len() => &mut self.menu_index,
            Screen::Projects if i < PROJECTS.len() => &mut self.project_index,
            _ => return,
        };
        *index = i;
        if matches!(p, Pointer::Click(..)) {
            self.apply(Action::Confirm, cues);
        }
    }
}
