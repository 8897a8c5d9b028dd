//! Storage Config

use std::path::PathBuf;

use clap::Args;

/// Where the storefront keeps its state.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Directory holding the cart snapshot and session record
    #[arg(long, env = "STOREFRONT_DATA_DIR", default_value = ".storefront")]
    pub data_dir: PathBuf,

    /// YAML catalog to load instead of the built-in one
    #[arg(long, env = "CATALOG_PATH")]
    pub catalog: Option<PathBuf>,
}
