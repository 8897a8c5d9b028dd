//! Storefront application: concrete storage and payment adapters, configuration
//! and logging for the command-line front end.

pub mod config;
pub mod context;
pub mod gateway;
pub mod logging;
pub mod storage;

#[cfg(test)]
mod test;
