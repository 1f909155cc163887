/// Server services
pub mod catalog;
pub mod feed;
pub mod ingest;
pub mod site;
pub mod transcoding;

pub use catalog::{CatalogEntry, EpisodeCatalog};
pub use ingest::{Ingestor, SyncReport};
pub use site::SiteClient;
pub use transcoding::{AudioProfile, TranscodingService};
