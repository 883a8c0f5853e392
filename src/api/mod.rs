//! API client for the streaming catalog.
//!
//! - [`CatalogApi`]: token, browse, album and playlist endpoints
//! - [`Transport`]: the HTTP seam, with [`HttpTransport`] for real requests

pub mod public;
pub mod transport;

pub use public::{CatalogApi, LoadedContext};
pub use transport::{HttpTransport, Transport};
