//! Painting the handheld and its screen
use eframe::egui::{
    self, Align2, Color32, FontId, Pos2, Rect, Response, Sense, Vec2,
};
use pocket_sim::{catalog::Icon, catalog::Skill, Row, View};

/// Four-shade screen palette
pub const LIGHTEST: Color32 = Color32::from_rgb(0x9b, 0xbc, 0x0f);
pub const LIGHT: Color32 = Color32::from_rgb(0x8b, 0xac, 0x0f);
pub const DARK: Color32 = Color32::from_rgb(0x30, 0x62, 0x30);
pub const DARKEST: Color32 = Color32::from_rgb(0x0f, 0x38, 0x0f);

pub const BACKGROUND: Color32 = Color32::from_rgb(0x1a, 0x1a, 0x1a);
const BODY: Color32 = Color32::from_rgb(0xa8, 0xa8, 0xa8);
const HOUSING: Color32 = Color32::from_rgb(0x44, 0x44, 0x54);
const PLASTIC: Color32 = Color32::from_rgb(0x30, 0x30, 0x30);
const BUTTON: Color32 = Color32::from_rgb(0x9b, 0x1b, 0x30);
const PILL: Color32 = Color32::from_rgb(0x5c, 0x5c, 0x5c);
const INK: Color32 = Color32::from_rgb(0x1a, 0x1a, 0x8c);

/// Maps unscaled device coordinates onto the window
#[derive(Copy, Clone)]
pub struct Layout {
    pub origin: Pos2,
    pub scale: f32,
}

impl Layout {
    fn pt(&self, x: f32, y: f32) -> Pos2 {
        self.origin + Vec2::new(x, y) * self.scale
    }
    fn rect(&self, x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::from_min_size(self.pt(x, y), Vec2::new(w, h) * self.scale)
    }
    fn len(&self, v: f32) -> f32 {
        v * self.scale
    }
    fn font(&self, size: f32) -> FontId {
        FontId::monospace(size * self.scale)
    }

    /// Area of the LCD, in window coordinates
    pub fn screen(&self) -> Rect {
        self.rect(36.0, 48.0, 248.0, 260.0)
    }
}

/// Control on the device body that the user can press
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
    A,
    B,
    Start,
    Select,
    Sound,
}

/// Pointer interactions from one frame of drawing
#[derive(Default)]
pub struct Hits {
    /// Controls clicked this frame
    pub controls: Vec<Control>,
    /// Listed row under the pointer
    pub hovered: Option<usize>,
    /// Listed row clicked this frame
    pub clicked: Option<usize>,
    /// Link clicked this frame
    pub link: Option<&'static str>,
    /// The back header was clicked this frame
    pub back: bool,
}

fn control(ui: &mut egui::Ui, rect: Rect, c: Control, hits: &mut Hits) {
    let r: Response =
        ui.interact(rect, ui.id().with(("control", c as u8)), Sense::click());
    if r.clicked() {
        hits.controls.push(c);
    }
}

/// Draws the device body and its controls
pub fn body(ui: &mut egui::Ui, l: Layout, sound: bool, hits: &mut Hits) {
    let p = ui.painter().clone();

    p.rect_filled(l.rect(0.0, 0.0, 320.0, 540.0), l.len(14.0), BODY);
    p.rect_filled(l.rect(20.0, 20.0, 280.0, 300.0), l.len(8.0), HOUSING);
    p.rect_filled(l.screen().expand(l.len(2.0)), l.len(4.0), DARKEST);

    p.text(
        l.pt(36.0, 34.0),
        Align2::LEFT_CENTER,
        "DOT MATRIX WITH STEREO SOUND",
        l.font(7.0),
        Color32::from_gray(0xb0),
    );
    let toggle = l.rect(262.0, 26.0, 22.0, 16.0);
    p.text(
        toggle.center(),
        Align2::CENTER_CENTER,
        if sound { "♪" } else { "×" },
        l.font(11.0),
        if sound { LIGHTEST } else { Color32::from_gray(0x90) },
    );
    control(ui, toggle, Control::Sound, hits);

    p.text(
        l.pt(24.0, 340.0),
        Align2::LEFT_CENTER,
        "Pocket",
        FontId::proportional(l.len(18.0)),
        INK,
    );

    // D-pad
    let (cx, cy, arm) = (70.0, 420.0, 26.0);
    let horizontal = l.rect(cx - arm * 1.5, cy - arm / 2.0, arm * 3.0, arm);
    let vertical = l.rect(cx - arm / 2.0, cy - arm * 1.5, arm, arm * 3.0);
    p.rect_filled(horizontal, l.len(3.0), PLASTIC);
    p.rect_filled(vertical, l.len(3.0), PLASTIC);
    for (c, dx, dy) in [
        (Control::Up, 0.0, -1.0),
        (Control::Down, 0.0, 1.0),
        (Control::Left, -1.0, 0.0),
        (Control::Right, 1.0, 0.0),
    ] {
        let r = l.rect(
            cx - arm / 2.0 + dx * arm,
            cy - arm / 2.0 + dy * arm,
            arm,
            arm,
        );
        control(ui, r, c, hits);
    }

    // A and B
    for (c, x, y, label) in
        [(Control::B, 212.0, 430.0, "B"), (Control::A, 262.0, 406.0, "A")]
    {
        let center = l.pt(x, y);
        p.circle_filled(center, l.len(18.0), BUTTON);
        p.text(
            l.pt(x, y + 30.0),
            Align2::CENTER_CENTER,
            label,
            l.font(10.0),
            INK,
        );
        let r = Rect::from_center_size(center, Vec2::splat(l.len(36.0)));
        control(ui, r, c, hits);
    }

    // START and SELECT
    for (c, x, label) in
        [(Control::Select, 110.0, "SELECT"), (Control::Start, 170.0, "START")]
    {
        let r = l.rect(x, 486.0, 40.0, 10.0);
        p.rect_filled(r, l.len(5.0), PILL);
        p.text(
            l.pt(x + 20.0, 504.0),
            Align2::CENTER_CENTER,
            label,
            l.font(7.0),
            INK,
        );
        control(ui, r.expand(l.len(4.0)), c, hits);
    }

    // Speaker grille
    for i in 0..6 {
        let x = 232.0 + i as f32 * 10.0;
        p.line_segment(
            [l.pt(x, 500.0), l.pt(x + 12.0, 470.0)],
            egui::Stroke::new(l.len(3.0), Color32::from_gray(0x80)),
        );
    }
}

fn icon(p: &egui::Painter, at: Pos2, size: f32, icon: Icon) {
    let px = size / 8.0;
    for y in 0..8 {
        for x in 0..8 {
            if icon.pixel(x, y) {
                let min = at + Vec2::new(x as f32, y as f32) * px;
                p.rect_filled(
                    Rect::from_min_size(min, Vec2::splat(px)),
                    0.0,
                    LIGHTEST,
                );
            }
        }
    }
}

/// Draws the screen contents, recording pointer interactions with its rows
pub fn screen(
    ui: &mut egui::Ui,
    l: Layout,
    view: &View,
    time: f64,
    hits: &mut Hits,
) {
    let area = l.screen();
    let p = ui.painter().with_clip_rect(area);

    if view.blank {
        p.rect_filled(area, 0.0, DARKEST);
        return;
    }
    if view.flicker {
        let lit = (time * 20.0) as u64 % 3 == 0;
        p.rect_filled(area, 0.0, if lit { DARK } else { DARKEST });
        return;
    }

    let pad = l.len(8.0);
    let width = area.width() - pad * 2.0;
    let left = area.left() + pad;
    let mut y = area.top() + pad;
    let text = |s: &str, size: f32, color: Color32| {
        p.layout(s.to_owned(), l.font(size), color, width)
    };

    // Boot screens are centered vertically
    if matches!(view.rows.first(), Some(Row::Title { .. }))
        && view
            .rows
            .iter()
            .all(|r| matches!(r, Row::Title { .. } | Row::Text(..)))
    {
        y = area.center().y - l.len(12.0) * view.rows.len() as f32 / 2.0;
    }

    for row in &view.rows {
        match row {
            Row::Title { text: t, icon: i } => {
                let g = text(t, 14.0, LIGHTEST);
                let h = g.size().y.max(l.len(20.0));
                let mut x = area.center().x - g.size().x / 2.0;
                if let Some(i) = i {
                    let s = l.len(20.0);
                    x += s / 2.0 + pad / 2.0;
                    icon(&p, Pos2::new(x - s - pad, y), s, *i);
                }
                p.galley(Pos2::new(x, y), g, LIGHTEST);
                y += h + l.len(4.0);
            }
            Row::Header { back, hint } => {
                let r = Rect::from_min_size(
                    Pos2::new(left, y),
                    Vec2::new(width, l.len(12.0)),
                );
                let resp = ui.interact(r, ui.id().with("back"), Sense::click());
                if resp.hovered() {
                    p.rect_filled(r, 0.0, DARK);
                }
                if resp.clicked() {
                    hits.back = true;
                }
                p.text(
                    Pos2::new(left, y),
                    Align2::LEFT_TOP,
                    back,
                    l.font(8.0),
                    LIGHT,
                );
                p.text(
                    Pos2::new(area.right() - pad, y),
                    Align2::RIGHT_TOP,
                    hint,
                    l.font(8.0),
                    LIGHT,
                );
                y += l.len(16.0);
            }
            Row::Text(s) | Row::Dim(s) => {
                let dim = matches!(row, Row::Dim(..));
                let color = if dim { LIGHT } else { LIGHTEST };
                let g = text(s, 9.0, color);
                let h = g.size().y.max(l.len(11.0));
                let x = if dim {
                    area.center().x - g.size().x / 2.0
                } else {
                    left
                };
                p.galley(Pos2::new(x, y), g, color);
                y += h + l.len(2.0);
            }
            Row::Blank => y += l.len(8.0),
            Row::Item {
                index,
                label,
                detail,
                badge,
                icon: i,
                selected,
            } => {
                let h = l.len(if detail.is_some() { 30.0 } else { 20.0 });
                let r = Rect::from_min_size(
                    Pos2::new(left, y),
                    Vec2::new(width, h),
                );
                if *selected {
                    p.rect_filled(r, 0.0, DARK);
                }
                let mut x = left + l.len(4.0);
                p.text(
                    Pos2::new(x, r.center().y),
                    Align2::LEFT_CENTER,
                    if *selected { "▶" } else { " " },
                    l.font(9.0),
                    LIGHTEST,
                );
                x += l.len(14.0);
                if let Some(i) = i {
                    let s = l.len(16.0);
                    icon(&p, Pos2::new(x, r.center().y - s / 2.0), s, *i);
                    x += s + l.len(6.0);
                }
                let (at, align) = match detail {
                    Some(d) => {
                        p.text(
                            Pos2::new(x, r.bottom() - l.len(4.0)),
                            Align2::LEFT_BOTTOM,
                            d,
                            l.font(7.0),
                            LIGHT,
                        );
                        (Pos2::new(x, r.top() + l.len(4.0)), Align2::LEFT_TOP)
                    }
                    None => (Pos2::new(x, r.center().y), Align2::LEFT_CENTER),
                };
                p.text(at, align, label, l.font(10.0), LIGHTEST);
                if let Some(b) = badge {
                    p.text(
                        Pos2::new(r.right() - l.len(4.0), r.center().y),
                        Align2::RIGHT_CENTER,
                        b,
                        l.font(7.0),
                        LIGHT,
                    );
                }
                let id = ui.id().with(("row", *index));
                let resp = ui.interact(r, id, Sense::click());
                if resp.hovered() {
                    hits.hovered = Some(*index);
                }
                if resp.clicked() {
                    hits.clicked = Some(*index);
                }
                y += h + l.len(2.0);
            }
            Row::Meter { label, level } => {
                p.text(
                    Pos2::new(left, y),
                    Align2::LEFT_TOP,
                    label,
                    l.font(8.0),
                    LIGHTEST,
                );
                y += l.len(11.0);
                let bar = Rect::from_min_size(
                    Pos2::new(left, y),
                    Vec2::new(width, l.len(5.0)),
                );
                p.rect_filled(bar, 0.0, DARK);
                let frac = f32::from((*level).min(Skill::MAX))
                    / f32::from(Skill::MAX);
                let mut fill = bar;
                fill.set_width(bar.width() * frac);
                p.rect_filled(fill, 0.0, LIGHTEST);
                y += l.len(10.0);
            }
            Row::Tags(tags) => {
                let mut x = left;
                for t in tags.iter() {
                    let g = text(t, 7.0, DARKEST);
                    let r = Rect::from_min_size(
                        Pos2::new(x, y),
                        g.size() + Vec2::splat(l.len(6.0)),
                    );
                    p.rect_filled(r, l.len(2.0), LIGHTEST);
                    p.galley(r.min + Vec2::splat(l.len(3.0)), g, DARKEST);
                    x = r.right() + l.len(4.0);
                }
                y += l.len(18.0);
            }
            Row::Link(link) => {
                let r = Rect::from_min_size(
                    Pos2::new(left, y),
                    Vec2::new(width, l.len(22.0)),
                );
                let resp = ui.interact(
                    r,
                    ui.id().with(("link", link.label)),
                    Sense::click(),
                );
                let fill = if resp.hovered() { DARK } else { DARKEST };
                p.rect_filled(r, 0.0, fill);
                p.text(
                    r.center(),
                    Align2::CENTER_CENTER,
                    link.label,
                    l.font(10.0),
                    LIGHTEST,
                );
                if resp.clicked() {
                    hits.link = Some(link.url);
                }
                y += l.len(26.0);
            }
        }
    }

    // Scanlines
    let mut s = area.top();
    while s < area.bottom() {
        p.line_segment(
            [Pos2::new(area.left(), s), Pos2::new(area.right(), s)],
            egui::Stroke::new(l.len(1.0), Color32::from_black_alpha(40)),
        );
        s += l.len(4.0);
    }
}
