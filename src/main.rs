use anyhow::{Context, Result};
use tracing::{info, warn};

use cajas::config::{project_dirs, AppConfig};
use cajas::telemetry;
use cajas::ui::app::App;

fn ensure_webview_data_dir() -> Result<std::path::PathBuf> {
    let project_dirs = project_dirs()?;
    let webview_data_dir = project_dirs.data_local_dir().join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

fn main() -> Result<()> {
    let loaded = AppConfig::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    telemetry::init(&config.logging.filter);
    if let Err(err) = &loaded {
        warn!(error = %err, "using default configuration");
    }
    info!(role = %config.permissions.role, "starting cajas");

    let webview_data_dir = ensure_webview_data_dir()?;

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("Cajas"))
                .with_data_directory(webview_data_dir),
        )
        .with_context(config)
        .launch(App);
    Ok(())
}
