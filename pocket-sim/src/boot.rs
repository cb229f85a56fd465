//! Startup sequence, driven by deadlines rather than timers
use std::time::Duration;

/// Sub-state of the boot screen
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum BootPhase {
    Flicker,
    Logo,
    Text,
    Ready,
}

/// How long each timed phase lasts before moving to the next one
const TIMELINE: [(BootPhase, Duration); 2] = [
    (BootPhase::Flicker, Duration::from_millis(300)),
    (BootPhase::Logo, Duration::from_millis(800)),
];

/// Interval between script lines in [`BootPhase::Text`]
const LINE_INTERVAL: Duration = Duration::from_millis(250);

/// Blink period of the text cursor
pub const CURSOR_BLINK: Duration = Duration::from_millis(500);

/// Lines printed during [`BootPhase::Text`]
pub const SCRIPT: [&str; 5] =
    ["", "LOADING...", "████████████ OK", "", "PRESS START"];

/// Something that happened while advancing the boot sequence
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BootEvent {
    /// Moved to a new phase
    Phase(BootPhase),
    /// Appended the script line with the given index
    Line(usize),
}

/// One-shot boot driver
pub struct Boot {
    phase: BootPhase,
    lines: usize,

    /// Time at which the next step is due, if one is armed
    deadline: Option<Duration>,

    /// Survives every later screen change
    done: bool,
}

impl Boot {
    /// Builds a boot sequence starting in [`BootPhase::Flicker`] at `now`
    pub fn new(now: Duration) -> Self {
        Self {
            phase: BootPhase::Flicker,
            lines: 0,
            deadline: Some(now + TIMELINE[0].1),
            done: false,
        }
    }

    /// Current phase
    pub fn phase(&self) -> BootPhase {
        self.phase
    }

    /// Checks whether the boot sequence has run to completion
    pub fn done(&self) -> bool {
        self.done
    }

    /// Script lines shown so far
    pub fn lines(&self) -> &'static [&'static str] {
        &SCRIPT[..self.lines]
    }

    /// Time of the next pending step
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Drops the pending step, e.g. because the boot screen was left early
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Runs the next step if it is due at `now`
    ///
    /// Each step arms the following one relative to its own deadline, so a
    /// caller that falls behind still sees every step, in order, by calling
    /// this in a loop.
    pub fn step(&mut self, now: Duration) -> Option<BootEvent> {
        let due = self.deadline.filter(|d| *d <= now)?;
        if self.done {
            self.deadline = None;
            return None;
        }
        let event = match self.phase {
            BootPhase::Flicker | BootPhase::Logo => {
                let next = match self.phase {
                    BootPhase::Flicker => BootPhase::Logo,
                    _ => BootPhase::Text,
                };
                self.phase = next;
                self.deadline = Some(
                    due + TIMELINE
                        .iter()
                        .find(|(p, _)| *p == next)
                        .map(|(_, d)| *d)
                        .unwrap_or(LINE_INTERVAL),
                );
                BootEvent::Phase(next)
            }
            BootPhase::Text => {
                let i = self.lines;
                self.lines += 1;
                if self.lines == SCRIPT.len() {
                    self.deadline = None;
                } else {
                    self.deadline = Some(due + LINE_INTERVAL);
                }
                BootEvent::Line(i)
            }
            BootPhase::Ready => {
                self.deadline = None;
                return None;
            }
        };
        Some(event)
    }

    /// Moves to [`BootPhase::Ready`] once the last line is printed
    ///
    /// This is split from [`Boot::step`] so that the final line and the
    /// phase change are reported as separate events.
    pub fn settle(&mut self) -> Option<BootEvent> {
        if self.phase == BootPhase::Text && self.lines == SCRIPT.len() {
            self.phase = BootPhase::Ready;
            self.done = true;
            Some(BootEvent::Phase(BootPhase::Ready))
        } else {
            None
        }
    }
}

/// Checks whether the blinking cursor is lit at `now`
pub fn cursor_visible(now: Duration) -> bool {
    (now.as_millis() / CURSOR_BLINK.as_millis()) % 2 == 0
}

#[cfg(test)]
mod test {
    use super::*;

    fn ms(t: u64) -> Duration {
        Duration::from_millis(t)
    }

    fn drain(b: &mut Boot, now: Duration) -> Vec<BootEvent> {
        let mut out = vec![];
        loop {
            if let Some(e) = b.settle() {
                out.push(e);
                continue;
            }
            match b.step(now) {
                Some(e) => out.push(e),
                None => break,
            }
        }
        out
    }

    #[test]
    fn timeline() {
        let mut b = Boot::new(ms(0));
        assert_eq!(b.phase(), BootPhase::Flicker);
        assert!(drain(&mut b, ms(299)).is_empty());
        assert_eq!(drain(&mut b, ms(300)), [BootEvent::Phase(BootPhase::Logo)]);
        assert!(drain(&mut b, ms(1099)).is_empty());
        assert_eq!(
            drain(&mut b, ms(1100)),
            [BootEvent::Phase(BootPhase::Text)]
        );
        assert!(b.lines().is_empty());
        assert_eq!(drain(&mut b, ms(1350)), [BootEvent::Line(0)]);
        assert_eq!(b.lines(), &SCRIPT[..1]);
        assert_eq!(
            drain(&mut b, ms(2350)),
            [
                BootEvent::Line(1),
                BootEvent::Line(2),
                BootEvent::Line(3),
                BootEvent::Line(4),
                BootEvent::Phase(BootPhase::Ready),
            ]
        );
        assert!(b.done());
        assert_eq!(b.deadline(), None);
        assert!(drain(&mut b, ms(100_000)).is_empty());
    }

    #[test]
    fn late_clock_keeps_order() {
        let mut b = Boot::new(ms(0));
        let events = drain(&mut b, ms(60_000));
        let phases: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                BootEvent::Phase(p) => Some(*p),
                _ => None,
            })
            .collect();
        assert_eq!(
            phases,
            [BootPhase::Logo, BootPhase::Text, BootPhase::Ready]
        );
        assert_eq!(events.len(), 3 + SCRIPT.len());
        assert_eq!(b.lines(), &SCRIPT);
    }

    #[test]
    fn cancelled_boot_stalls() {
        let mut b = Boot::new(ms(0));
        b.cancel();
        assert!(drain(&mut b, ms(60_000)).is_empty());
        assert_eq!(b.phase(), BootPhase::Flicker);
        assert!(!b.done());
    }

    #[test]
    fn cursor_blinks() {
        assert!(cursor_visible(ms(0)));
        assert!(cursor_visible(ms(499)));
        assert!(!cursor_visible(ms(500)));
        assert!(cursor_visible(ms(1000)));
    }
}
