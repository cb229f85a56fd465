use pocket_sim::{
    scale, Action, Device, Input, Key, Mixer, Pointer, Screen, Speaker, View,
    AUDIO_CHANNELS, AUDIO_SAMPLE_RATE,
};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use cpal::traits::StreamTrait;
use eframe::egui;
use log::{info, warn};

mod draw;
use draw::{Control, Hits, Layout};

#[cfg(not(target_arch = "wasm32"))]
pub mod native;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Live audio output, kept alive for as long as sound can play
type Audio = (cpal::Device, cpal::Stream);

pub struct Stage {
    dev: Device,
    speaker: Speaker,

    /// Time origin passed to the device
    start: web_time::Instant,

    /// Fixed scale factor, overriding the viewport-derived one
    scale: Option<f32>,

    /// Audio output, opened the first time sound is enabled
    audio: Option<Audio>,

    /// Never open an audio stream (set after a failure, or by the user)
    audio_disabled: bool,

    /// Input collected while drawing, handed to the device next frame
    pending: Input,

    /// Row under the pointer in the previous frame
    hovered: Option<usize>,

    /// Screen drawn in the previous frame
    screen: Screen,

    view: View,
}

impl Stage {
    pub fn new(speaker: Speaker, scale: Option<f32>, mute: bool) -> Self {
        let start = web_time::Instant::now();
        let dev = Device::new(std::time::Duration::ZERO);
        let view = dev.view();
        let screen = dev.screen();
        let mut s = Stage {
            dev,
            speaker,
            start,
            scale,
            audio: None,
            audio_disabled: mute,
            pending: Input::default(),
            hovered: None,
            screen,
            view,
        };
        s.check_audio();
        s
    }

    /// Opens the audio stream if sound is on and it isn't open yet
    fn check_audio(&mut self) {
        if self.audio.is_some()
            || self.audio_disabled
            || !self.speaker.enabled()
        {
            return;
        }
        match audio_setup(self.speaker.mixer()) {
            Ok(a) => {
                info!("audio output ready");
                self.audio = Some(a);
                self.speaker.set_attached(true);
            }
            Err(e) => {
                warn!("audio disabled: {e:#}");
                self.audio_disabled = true;
            }
        }
    }

    /// Takes a new view from the device
    ///
    /// A different screen has a different list under the pointer, so the
    /// hover is forgotten and re-sent on the next frame.
    fn show(&mut self, screen: Screen, view: View) {
        if screen != self.screen {
            self.hovered = None;
            self.screen = screen;
        }
        self.view = view;
    }

    /// Handles what the user clicked or hovered while drawing
    fn handle_hits(&mut self, ctx: &egui::Context, hits: Hits) {
        for c in hits.controls {
            let a = match c {
                Control::Up => Action::Up,
                Control::Down => Action::Down,
                Control::A | Control::Start => Action::Confirm,
                Control::B | Control::Select => Action::Cancel,
                Control::Left | Control::Right => continue,
                Control::Sound => {
                    self.speaker.toggle();
                    self.check_audio();
                    continue;
                }
            };
            self.pending.buttons.push(a);
        }
        if hits.back {
            self.pending.buttons.push(Action::Cancel);
        }
        if hits.hovered != self.hovered {
            if let Some(i) = hits.hovered {
                self.pending.pointer.push(Pointer::Hover(i));
            }
            self.hovered = hits.hovered;
        }
        if let Some(i) = hits.clicked {
            self.pending.pointer.push(Pointer::Click(i));
        }
        if let Some(url) = hits.link {
            ctx.open_url(egui::OpenUrl::new_tab(url));
        }
    }
}

impl eframe::App for Stage {
    // Required by eframe 0.34; all drawing happens in `update`, which the
    // runner still calls before `ui`.
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let time = ctx.input(|i| {
            for e in i.events.iter() {
                if let egui::Event::Key {
                    key, pressed: true, ..
                } = e
                {
                    if let Some(k) = decode_key(*key) {
                        self.pending.keys.push(k);
                    }
                }
            }
            i.time
        });

        let now = self.start.elapsed();
        let out = self.dev.update(now, std::mem::take(&mut self.pending));
        for c in out.cues {
            self.speaker.play(c);
        }
        self.show(out.screen, out.view);

        let mut hits = Hits::default();
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(draw::BACKGROUND))
            .show(ctx, |ui| {
                let area = ui.max_rect();
                let k = self.scale.unwrap_or_else(|| {
                    scale::scale(area.width(), area.height())
                });
                let size = egui::Vec2::new(
                    scale::DEVICE_WIDTH,
                    scale::DEVICE_HEIGHT,
                ) * k;
                let layout = Layout {
                    origin: area.center() - size / 2.0,
                    scale: k,
                };
                draw::body(ui, layout, self.speaker.enabled(), &mut hits);
                draw::screen(ui, layout, &self.view, time, &mut hits);
            });
        self.handle_hits(ctx, hits);

        if !self.pending.buttons.is_empty() || !self.pending.pointer.is_empty()
        {
            ctx.request_repaint();
        } else if self.view.flicker {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        } else if let Some(t) = self.dev.next_deadline() {
            ctx.request_repaint_after(t.saturating_sub(now));
        }
    }
}

/// Opens the default output device and feeds it from the mixer
pub fn audio_setup(mixer: Arc<Mutex<Mixer>>) -> Result<Audio> {
    use cpal::traits::{DeviceTrait, HostTrait};
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow!("no output device available"))?;
    let mut supported_configs_range = device
        .supported_output_configs()
        .context("error while querying configs")?;

    let supported_config = supported_configs_range
        .find_map(|c| {
            c.try_with_sample_rate(AUDIO_SAMPLE_RATE)
        })
        .filter(|c| usize::from(c.channels()) == AUDIO_CHANNELS)
        .ok_or_else(|| anyhow!("no supported config"))?;
    let config = supported_config.config();

    let stream = device
        .build_output_stream(
            &config,
            move |data: &mut [f32], _opt: &cpal::OutputCallbackInfo| {
                match mixer.lock() {
                    Ok(mut m) => m.next(data),
                    Err(_) => data.fill(0.0),
                }
            },
            move |err| {
                warn!("audio stream error: {err}");
            },
            None,
        )
        .context("could not build stream")?;
    stream.play().context("could not start stream")?;
    Ok((device, stream))
}

fn decode_key(k: egui::Key) -> Option<Key> {
    let c = match k {
        egui::Key::ArrowUp => Key::Up,
        egui::Key::ArrowDown => Key::Down,
        egui::Key::ArrowLeft => Key::Left,
        egui::Key::ArrowRight => Key::Right,
        egui::Key::Enter => Key::Enter,
        egui::Key::Space => Key::Space,
        egui::Key::Escape => Key::Escape,
        egui::Key::Backspace => Key::Backspace,
        k => {
            // Letter keys are reported without case, by name
            let mut chars = k.name().chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphabetic() => {
                    Key::Char(c.to_ascii_lowercase())
                }
                _ => return None,
            }
        }
    };
    Some(c)
}

#[cfg(test)]
mod test {
    use super::*;

    use pocket_sim::MemoryStorage;

    fn stage() -> Stage {
        let speaker = Speaker::new(Box::new(MemoryStorage::new()));
        Stage::new(speaker, None, true)
    }

    #[test]
    fn back_header_cancels() {
        let mut s = stage();
        let ctx = egui::Context::default();
        let hits = Hits {
            back: true,
            ..Hits::default()
        };
        s.handle_hits(&ctx, hits);
        assert_eq!(s.pending.buttons, [Action::Cancel]);
    }

    #[test]
    fn hover_resent_after_screen_change() {
        let mut s = stage();
        let ctx = egui::Context::default();
        let hover = || Hits {
            hovered: Some(1),
            ..Hits::default()
        };
        s.handle_hits(&ctx, hover());
        assert_eq!(s.pending.pointer, [Pointer::Hover(1)]);
        s.pending = Input::default();

        // Same row, same screen: nothing new to report
        s.handle_hits(&ctx, hover());
        assert!(s.pending.pointer.is_empty());

        s.show(Screen::Projects, View::default());
        s.handle_hits(&ctx, hover());
        assert_eq!(s.pending.pointer, [Pointer::Hover(1)]);
    }

    #[test]
    fn muted_stage_never_attaches() {
        let mut speaker = Speaker::new(Box::new(MemoryStorage::new()));
        speaker.set_enabled(true);
        let s = Stage::new(speaker, None, true);
        assert!(s.audio.is_none());
        s.speaker.play(pocket_sim::SoundCue::Confirm);
        assert_eq!(s.speaker.mixer().lock().unwrap().active(), 0);
    }

    #[test]
    fn keys() {
        assert_eq!(decode_key(egui::Key::ArrowUp), Some(Key::Up));
        assert_eq!(decode_key(egui::Key::A), Some(Key::Char('a')));
        assert_eq!(decode_key(egui::Key::B), Some(Key::Char('b')));
        assert_eq!(decode_key(egui::Key::Escape), Some(Key::Escape));
        assert_eq!(decode_key(egui::Key::F1), None);
        assert_eq!(decode_key(egui::Key::Num1), None);
    }
}
