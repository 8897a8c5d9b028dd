//! App Context

use std::sync::Arc;

use storefront::{
    cart::{CartError, CartStore},
    catalog::{Catalog, CatalogError},
    checkout::CheckoutController,
    session::Session,
    storage::{PersistentStore, StoreError},
};
use thiserror::Error;
use tracing::debug;

use crate::{config::StorefrontConfig, gateway::HttpPaymentGateway, storage::JsonFileStore};

/// Startup failures.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The catalog file is missing or malformed.
    #[error("failed to load catalog")]
    Catalog(#[source] CatalogError),

    /// The data directory could not be created.
    #[error("failed to open data directory")]
    Storage(#[source] StoreError),
}

/// Long-lived collaborators shared by every command.
pub struct AppContext {
    pub catalog: Arc<Catalog>,
    pub store: Arc<dyn PersistentStore>,
    pub session: Session,
    pub checkout: CheckoutController,
}

impl AppContext {
    /// Build the application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the catalog cannot be loaded or the data
    /// directory cannot be created.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, AppInitError> {
        let catalog = match &config.storage.catalog {
            Some(path) => Catalog::load(path),
            None => Catalog::seeded(),
        }
        .map_err(AppInitError::Catalog)?;

        let store: Arc<dyn PersistentStore> = Arc::new(
            JsonFileStore::open(&config.storage.data_dir).map_err(AppInitError::Storage)?,
        );

        let gateway = HttpPaymentGateway::new(config.payment.payment_endpoint.clone());

        debug!(
            products = catalog.len(),
            data_dir = %config.storage.data_dir.display(),
            endpoint = gateway.endpoint(),
            "initialised storefront"
        );

        Ok(Self {
            catalog: Arc::new(catalog),
            session: Session::new(store.clone()),
            checkout: CheckoutController::new(Arc::new(gateway)),
            store,
        })
    }

    /// Restores the cart from its last snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be read.
    pub fn cart(&self) -> Result<CartStore, CartError> {
        CartStore::restore(self.catalog.clone(), self.store.clone())
    }
}
