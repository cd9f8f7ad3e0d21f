mod domain;
mod infra;
mod platform;
mod settings;
mod ui;
mod usecase;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use anyhow::{Context, Result};
use rfd::{MessageButtons, MessageDialog, MessageLevel};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::infra::source_reader::LocalOrRemoteReader;
use crate::platform::desktop::paths::default_webview_data_dir;
use crate::settings::Settings;
use crate::ui::app::App;
use crate::usecase::services::load_service::LoadService;
use crate::usecase::services::query_service::QueryService;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    if let Err(err) = run() {
        tracing::error!("{err:#}");
        MessageDialog::new()
            .set_level(MessageLevel::Error)
            .set_title("Dashboard Vendas")
            .set_description(format!("Não foi possível iniciar o dashboard:\n{err:#}"))
            .set_buttons(MessageButtons::Ok)
            .show();
        std::process::exit(1);
    }
}

/// Loads everything up front; no window opens unless all four sources load.
fn run() -> Result<()> {
    let settings = Settings::load()?;
    let sources = settings.dataset_sources();

    let reader = Arc::new(LocalOrRemoteReader::new(settings.http_timeout())?);
    let table = LoadService::new(reader)
        .load(&sources)
        .context("failed to load sales data")?;
    let service = QueryService::new(Arc::new(table));

    let webview_data_dir = default_webview_data_dir()?;
    tracing::info!(title = %settings.window_title, "opening dashboard window");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new().with_title(settings.window_title),
                )
                .with_data_directory(webview_data_dir),
        )
        .with_context(service)
        .launch(App);
    Ok(())
}
