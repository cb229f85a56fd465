use anyhow::{anyhow, Result};
use eframe::wasm_bindgen::JsCast;
use log::{info, warn};

use pocket_sim::{MemoryStorage, Speaker, Storage, StorageError};

use crate::Stage;

/// Preferences kept in the browser's `localStorage`
struct LocalStorage(web_sys::Storage);

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.0
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }
}

pub fn run() -> Result<()> {
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let window =
        web_sys::window().ok_or_else(|| anyhow!("could not get window"))?;
    let storage: Box<dyn Storage> = match window.local_storage() {
        Ok(Some(s)) => Box::new(LocalStorage(s)),
        Ok(None) | Err(_) => {
            warn!("localStorage is unavailable; settings will not persist");
            Box::new(MemoryStorage::default())
        }
    };
    let speaker = Speaker::new(storage);

    let canvas = window
        .document()
        .ok_or_else(|| anyhow!("could not get document"))?
        .get_element_by_id("pocket")
        .ok_or_else(|| anyhow!("could not find pocket canvas"))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|e| anyhow!("could not cast to HtmlCanvasElement: {e:?}"))?;

    info!("starting web runner");
    wasm_bindgen_futures::spawn_local(async move {
        let r = eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(move |_cc| {
                    Ok(Box::new(Stage::new(speaker, None, false)))
                }),
            )
            .await;
        if let Err(e) = r {
            log::error!("failed to start eframe: {e:?}");
        }
    });

    Ok(())
}
