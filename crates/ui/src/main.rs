#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("glide_core=info")),
        )
        .init();

    eframe::run_native(
        "glide",
        eframe::NativeOptions::default(),
        Box::new(|cc| Ok(Box::new(glide_ui::GlideApp::new(cc)))),
    )
}

// The wasm32 build starts through `glide_ui::start` instead.
#[cfg(target_arch = "wasm32")]
fn main() {}
