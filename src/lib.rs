pub mod config;
pub mod error;
pub mod snapshot;
pub mod util;

pub use config::Config;
pub use error::SnapshotError;
pub use snapshot::{rewrite_header, SnapshotReport, Snapshotter};
