pub mod config;
pub mod logging;

pub mod addon_list;
pub mod catalog;
pub mod error;
pub mod fetch;
pub mod integrity;
pub mod output;
pub mod platform;
pub mod transport;

pub use catalog::{AddonId, CatalogResolver, InstallOption};
pub use error::{FetchError, FetchResult};
pub use fetch::{AddonSource, PackageBytes, Session};
