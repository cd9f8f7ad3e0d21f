use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::platform::desktop::paths::{user_config_file, CONFIG_FILE_NAME};
use crate::usecase::ports::source::SourceLocation;
use crate::usecase::services::load_service::DatasetSources;

pub const ENV_PREFIX: &str = "DASHBOARD";

const DEFAULT_SALES: &str = "base vendas unificada.xlsx";
const DEFAULT_CUSTOMERS: &str = "Cadastro Clientes.xlsx";
const DEFAULT_STORES: &str = "Cadastro Lojas.xlsx";
const DEFAULT_PRODUCTS: &str = "Cadastro Produtos.xlsx";
const DEFAULT_WINDOW_TITLE: &str = "Dashboard Vendas";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceSettings {
    pub sales: String,
    pub customers: String,
    pub stores: String,
    pub products: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub sources: SourceSettings,
    pub window_title: String,
    #[serde(default)]
    pub http_timeout_secs: Option<u64>,
}

impl Settings {
    /// Defaults, then the per-user file, then `./dashboard.toml`, then
    /// `DASHBOARD_*` environment variables.
    pub fn load() -> Result<Self> {
        let mut files = Vec::new();
        if let Some(user_file) = user_config_file() {
            files.push(user_file);
        }
        files.push(PathBuf::from(CONFIG_FILE_NAME));
        Self::load_from(&files, environment())
    }

    pub fn load_from(files: &[PathBuf], environment: Environment) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("sources.sales", DEFAULT_SALES)?
            .set_default("sources.customers", DEFAULT_CUSTOMERS)?
            .set_default("sources.stores", DEFAULT_STORES)?
            .set_default("sources.products", DEFAULT_PRODUCTS)?
            .set_default("window_title", DEFAULT_WINDOW_TITLE)?;
        for file in files {
            builder = builder.add_source(File::from(file.as_path()).required(false));
        }

        builder
            .add_source(environment)
            .build()
            .context("failed to read settings")?
            .try_deserialize()
            .context("failed to deserialise settings")
    }

    pub fn dataset_sources(&self) -> DatasetSources {
        DatasetSources {
            sales: SourceLocation::parse(&self.sources.sales),
            customers: SourceLocation::parse(&self.sources.customers),
            stores: SourceLocation::parse(&self.sources.stores),
            products: SourceLocation::parse(&self.sources.products),
        }
    }

    pub fn http_timeout(&self) -> Option<Duration> {
        self.http_timeout_secs.map(Duration::from_secs)
    }
}

/// `DASHBOARD_SOURCES__SALES=...` sets `sources.sales`.
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
