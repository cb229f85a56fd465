//! Screen contents, as a list of rows for the front end to draw
use crate::{
    boot::{cursor_visible, BootPhase},
    catalog::{self, Icon, Link, Skill, CONTACT, PROJECTS, SKILLS},
    Device, Screen,
};

/// One line of screen content
#[derive(Clone, Debug, PartialEq)]
pub enum Row {
    /// Large centered heading, with an optional icon to its left
    Title {
        /// Heading text
        text: String,
        /// Icon drawn before the heading
        icon: Option<Icon>,
    },
    /// Top bar with a back label and a hint
    Header {
        /// Back label, on the left
        back: String,
        /// Hint, on the right
        hint: &'static str,
    },
    /// Body text, wrapped by the front end
    Text(String),
    /// De-emphasized text
    Dim(String),
    /// Empty spacer line
    Blank,
    /// Selectable row, which accepts pointer hover and click
    Item {
        /// Position in its list, as used by [`Pointer`](crate::Pointer)
        index: usize,
        /// Main label
        label: &'static str,
        /// Second line under the label
        detail: Option<&'static str>,
        /// Marker on the right side
        badge: Option<&'static str>,
        /// Icon to the left of the label
        icon: Option<Icon>,
        /// Whether this is the highlighted row
        selected: bool,
    },
    /// Labelled bar out of [`Skill::MAX`]
    Meter {
        /// Skill name
        label: &'static str,
        /// Filled cells
        level: u8,
    },
    /// Row of short boxed tags
    Tags(&'static [&'static str]),
    /// External link, opened by the front end on click
    Link(Link),
}

/// Everything needed to draw the screen at one instant
#[derive(Clone, Debug, Default, PartialEq)]
pub struct View {
    /// Rows, top to bottom
    pub rows: Vec<Row>,

    /// The screen is powering on and should flicker
    pub flicker: bool,

    /// The screen is blanked by a transition
    pub blank: bool,
}

impl View {
    /// Renders the rows as plain text, one line per row
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for r in &self.rows {
            let line = match r {
                Row::Title { text, .. } => text.clone(),
                Row::Header { back, hint } => format!("{back}  {hint}"),
                Row::Text(s) | Row::Dim(s) => s.clone(),
                Row::Blank => String::new(),
                Row::Item {
                    label,
                    detail,
                    badge,
                    selected,
                    ..
                } => {
                    let mut s = format!(
                        "{}{label}",
                        if *selected { "▶ " } else { "  " }
                    );
                    if let Some(d) = detail {
                        s += &format!(" - {d}");
                    }
                    if let Some(b) = badge {
                        s += &format!(" {b}");
                    }
                    s
                }
                Row::Meter { label, level } => {
                    let full = usize::from((*level).min(Skill::MAX));
                    let empty = usize::from(Skill::MAX) - full;
                    let bar = "█".repeat(full) + &"░".repeat(empty);
                    format!("{label:<12} {bar}")
                }
                Row::Tags(tags) => tags
                    .iter()
                    .map(|t| format!("[{t}]"))
                    .collect::<Vec<_>>()
                    .join(" "),
                Row::Link(l) => format!("{} <{}>", l.label, l.url),
            };
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }

    /// Returns the index of the highlighted item, if any
    pub fn selected(&self) -> Option<usize> {
        self.rows.iter().find_map(|r| match r {
            Row::Item {
                index,
                selected: true,
                ..
            } => Some(*index),
            _ => None,
        })
    }
}

fn header(back: &str) -> Row {
    Row::Header {
        back: format!("◀ {back}"),
        hint: "B:BACK",
    }
}

fn title(text: &str) -> Row {
    Row::Title {
        text: text.to_owned(),
        icon: None,
    }
}

impl Device {
    /// Builds the contents of the active screen
    pub fn view(&self) -> View {
        let mut v = View {
            blank: self.transitioning(),
            ..View::default()
        };
        let rows = &mut v.rows;
        match self.screen() {
            Screen::Boot => match self.boot_phase() {
                BootPhase::Flicker => v.flicker = true,
                phase => {
                    rows.push(title(&format!("◆ {} ◆", catalog::OWNER)));
                    if phase != BootPhase::Logo {
                        let lines = self.boot.lines();
                        for (i, line) in lines.iter().enumerate() {
                            let cursor = i == lines.len() - 1
                                && phase == BootPhase::Ready
                                && cursor_visible(self.now);
                            let mut s = line.to_string();
                            if cursor {
                                s += " _";
                            }
                            rows.push(Row::Text(s));
                        }
                    }
                }
            },
            Screen::Menu => {
                rows.push(title(catalog::OWNER));
                rows.push(Row::Dim(catalog::ROLE.to_owned()));
                rows.push(Row::Blank);
                for (i, e) in self.menu().iter().enumerate() {
                    rows.push(Row::Item {
                        index: i,
                        label: e.label,
                        detail: None,
                        badge: (e.target == Screen::Credits).then_some("★"),
                        icon: None,
                        selected: i == self.menu_index(),
                    });
                }
                rows.push(Row::Blank);
                rows.push(Row::Dim(catalog::VERSION.to_owned()));
            }
            Screen::Projects => {
                rows.push(header("PROJECTS"));
                for (i, p) in PROJECTS.iter().enumerate() {
                    rows.push(Row::Item {
                        index: i,
                        label: p.name,
                        detail: Some(p.subtitle),
                        badge: Some(p.status),
                        icon: Some(p.icon),
                        selected: i == self.project_index(),
                    });
                }
            }
            Screen::ProjectDetail { .. } => {
                if let Some(p) = self.selected_project() {
                    rows.push(header(p.name));
                    rows.push(Row::Title {
                        text: p.name.to_owned(),
                        icon: Some(p.icon),
                    });
                    rows.push(Row::Dim(p.subtitle.to_owned()));
                    let when = format!("{} • {}", p.year, p.status);
                    rows.push(Row::Text(when));
                    rows.push(Row::Blank);
                    rows.push(Row::Text(p.description.to_owned()));
                    rows.push(Row::Blank);
                    rows.push(Row::Tags(p.tags));
                }
            }
            Screen::About => {
                rows.push(header("ABOUT"));
                rows.extend(
                    catalog::ABOUT.iter().map(|s| Row::Text(s.to_string())),
                );
            }
            Screen::Skills => {
                rows.push(header("SKILLS"));
                rows.extend(SKILLS.iter().map(|s| Row::Meter {
                    label: s.name,
                    level: s.level,
                }));
            }
            Screen::Contact => {
                rows.push(header("CONTACT"));
                rows.push(Row::Text("LET'S BUILD SOMETHING.".to_owned()));
                rows.push(Row::Blank);
                rows.extend(CONTACT.iter().map(|l| Row::Link(*l)));
            }
            Screen::Credits => {
                rows.push(title("★ CREDITS ★"));
                for (heading, lines) in catalog::CREDITS {
                    rows.push(Row::Blank);
                    rows.push(Row::Dim(heading.to_owned()));
                    rows.extend(lines.iter().map(|s| Row::Text(s.to_string())));
                }
            }
        }
        v
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Action, Input, Pointer};
    use std::time::Duration;

    #[test]
    fn flicker_then_logo() {
        let mut d = Device::new(Duration::ZERO);
        let v = d.view();
        assert!(v.flicker);
        assert!(v.rows.is_empty());

        let out = d.update(Duration::from_millis(300), Input::default());
        assert!(!out.view.flicker);
        assert_eq!(out.view.to_text(), "◆ ALEC ◆\n");
    }

    #[test]
    fn ready_cursor_blinks() {
        let mut d = Device::new(Duration::ZERO);
        let lit = d.update(Duration::from_millis(3000), Input::default());
        assert!(lit.view.to_text().ends_with("PRESS START _\n"));
        let dark = d.update(Duration::from_millis(3500), Input::default());
        assert!(dark.view.to_text().ends_with("PRESS START\n"));
    }

    #[test]
    fn menu_text() {
        let mut d = Device::new(Duration::ZERO);
        let _ = d.update(Duration::from_secs(3), Input::default());
        let confirm = Input::button(Action::Confirm);
        let _ = d.update(Duration::from_secs(3), confirm);
        let out = d.update(Duration::from_secs(4), Input::default());
        assert_eq!(out.view.selected(), Some(0));
        assert_eq!(
            out.view.to_text(),
            "ALEC\nDEVELOPER\n\n▶ PROJECTS\n  ABOUT\n  SKILLS\n  CONTACT\n\n\
             v11 • 2025\n"
        );
    }

    #[test]
    fn back_header_on_content_screens() {
        let mut d = Device::new(Duration::ZERO);
        let confirm = Input::button(Action::Confirm);
        let _ = d.update(Duration::from_secs(3), confirm);
        let mut t = Duration::from_secs(4);
        for i in 0..4 {
            let _ = d.update(t, Input::pointer(Pointer::Click(i)));
            t += Duration::from_secs(1);
            let out = d.update(t, Input::default());
            assert!(out.screen.is_content(), "{:?}", out.screen);
            assert!(
                matches!(
                    out.view.rows.first(),
                    Some(Row::Header { hint: "B:BACK", .. })
                ),
                "no back header on {:?}",
                out.screen
            );
            let _ = d.update(t, Input::button(Action::Cancel));
            t += Duration::from_secs(1);
            let _ = d.update(t, Input::default());
            assert_eq!(d.screen(), Screen::Menu);
        }
    }

    #[test]
    fn meter_text() {
        let v = View {
            rows: vec![Row::Meter {
                label: "UI/UX",
                level: 8,
            }],
            ..View::default()
        };
        assert_eq!(v.to_text(), "UI/UX        ████████░░\n");
    }
}
