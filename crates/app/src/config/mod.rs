//! Storefront configuration module

use clap::Args;

use crate::config::{logging::LoggingConfig, payment::PaymentConfig, storage::StorageConfig};

pub mod logging;
pub mod payment;
pub mod storage;

/// Storefront configuration, read from CLI flags with environment fallbacks.
#[derive(Debug, Args)]
pub struct StorefrontConfig {
    /// Local storage and catalog settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Payment processor settings.
    #[command(flatten)]
    pub payment: PaymentConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}
