//! High-level state management: the credential supplier, the playlist
//! library (the reconciliation engine owning the local collection), the
//! search aggregator and the import/export codec.
//!
//! Everything here is generic over [`crate::spotify::CatalogApi`] so the
//! reconciliation discipline (remote call first, local mutation only on
//! remote success) can be tested against a scripted catalog.

mod auth;
mod library;
mod search;
mod transfer;

pub use auth::TokenManager;
pub use library::PlaylistLibrary;
pub use search::SEARCH_PAGE_SIZE;
pub use search::aggregate_search;
pub use transfer::export_document;
pub use transfer::import_document;
