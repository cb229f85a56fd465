//! User-facing sound output, gated by a persisted preference
use crate::{Mixer, SoundCue, Storage};
use log::{debug, info, warn};
use std::sync::{Arc, Mutex};

/// Storage key for the sound preference
pub const SOUND_KEY: &str = "pocket-sound";

/// Plays sound cues, gated by the user's persisted preference
pub struct Speaker {
    enabled: bool,

    /// An audio output is draining the mixer
    attached: bool,

    storage: Box<dyn Storage>,
    mixer: Arc<Mutex<Mixer>>,
}

impl Speaker {
    /// Builds a speaker, loading the preference once from `storage`
    ///
    /// A missing or unreadable preference leaves sound off.
    pub fn new(storage: Box<dyn Storage>) -> Self {
        let enabled = match storage.get(SOUND_KEY) {
            Ok(v) => v.as_deref() == Some("true"),
            Err(e) => {
                warn!("could not load sound preference: {e}");
                false
            }
        };
        info!("sound is {}", if enabled { "on" } else { "off" });
        Self {
            enabled,
            attached: false,
            storage,
            mixer: Arc::new(Mutex::new(Mixer::new())),
        }
    }

    /// Checks whether cues are audible
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Marks whether an audio output is consuming [`Speaker::mixer`]
    ///
    /// Voices only expire as the mixer is drained, so cues are dropped
    /// while nothing is attached.
    pub fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
        if !attached {
            if let Ok(mut m) = self.mixer.lock() {
                m.stop();
            }
        }
    }

    /// Flips the preference, persisting it immediately
    pub fn toggle(&mut self) {
        self.set_enabled(!self.enabled);
    }

    /// Sets the preference, persisting it immediately
    ///
    /// A failed write is logged; the new value still applies to this session.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            if let Ok(mut m) = self.mixer.lock() {
                m.stop();
            }
        }
        let v = if enabled { "true" } else { "false" };
        if let Err(e) = self.storage.set(SOUND_KEY, v) {
            warn!("could not save sound preference: {e}");
        }
    }

    /// Plays the given cue, if sound is enabled and an output is attached
    pub fn play(&self, cue: SoundCue) {
        if !self.enabled || !self.attached {
            return;
        }
        debug!("playing {cue:?}");
        match self.mixer.lock() {
            Ok(mut m) => m.play(cue),
            Err(_) => warn!("audio mixer is poisoned"),
        }
    }

    /// Returns a handle to the mixer, for the audio backend to drain
    pub fn mixer(&self) -> Arc<Mutex<Mixer>> {
        self.mixer.clone()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{MemoryStorage, StorageError};
    use std::{cell::RefCell, rc::Rc};

    /// Storage shared with the test, to simulate a reload
    #[derive(Clone, Default)]
    struct Shared(Rc<RefCell<MemoryStorage>>);

    impl Storage for Shared {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.borrow().get(key)
        }
        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            self.0.borrow_mut().set(key, value)
        }
    }

    struct Broken;

    impl Storage for Broken {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disabled".to_owned()))
        }
        fn set(&mut self, _: &str, _: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disabled".to_owned()))
        }
    }

    #[test]
    fn defaults_off() {
        let s = Speaker::new(Box::new(MemoryStorage::new()));
        assert!(!s.enabled());
        s.play(SoundCue::Confirm);
        assert_eq!(s.mixer().lock().unwrap().active(), 0);
    }

    #[test]
    fn survives_reload() {
        let store = Shared::default();
        let mut s = Speaker::new(Box::new(store.clone()));
        s.toggle();
        assert!(s.enabled());
        drop(s);

        let mut s = Speaker::new(Box::new(store.clone()));
        assert!(s.enabled());
        s.toggle();
        drop(s);

        let s = Speaker::new(Box::new(store));
        assert!(!s.enabled());
    }

    #[test]
    fn gated_play() {
        let mut s = Speaker::new(Box::new(MemoryStorage::new()));
        s.set_attached(true);
        s.set_enabled(true);
        s.play(SoundCue::Secret);
        assert_eq!(s.mixer().lock().unwrap().active(), 4);

        // Muting silences whatever is still ringing
        s.set_enabled(false);
        assert_eq!(s.mixer().lock().unwrap().active(), 0);
        s.play(SoundCue::Secret);
        assert_eq!(s.mixer().lock().unwrap().active(), 0);
    }

    #[test]
    fn undrained_mixer_stays_empty() {
        let mut s = Speaker::new(Box::new(MemoryStorage::new()));
        s.set_enabled(true);
        for _ in 0..10_000 {
            s.play(SoundCue::Navigate);
        }
        assert_eq!(s.mixer().lock().unwrap().active(), 0);

        s.set_attached(true);
        s.play(SoundCue::Navigate);
        assert_eq!(s.mixer().lock().unwrap().active(), 1);

        // Losing the output drops whatever was queued
        s.set_attached(false);
        assert_eq!(s.mixer().lock().unwrap().active(), 0);
        s.play(SoundCue::Navigate);
        assert_eq!(s.mixer().lock().unwrap().active(), 0);
    }

    #[test]
    fn broken_storage_degrades() {
        let mut s = Speaker::new(Box::new(Broken));
        assert!(!s.enabled());
        s.toggle();
        assert!(s.enabled());
    }
}
