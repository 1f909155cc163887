//! California Speaks skill server library
//!
//! Voice skill backend that plays California Speaks episodes from a storage
//! bucket, plus the feed ingestion pipeline that fills the bucket.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod skill;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{EpisodeCatalog, Ingestor, SiteClient, SyncReport, TranscodingService};
pub use state::AppState;
