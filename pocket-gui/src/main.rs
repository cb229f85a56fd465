#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    pocket_gui::native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() -> anyhow::Result<()> {
    pocket_gui::web::run()
}
