//! CSV record loading and snapshot output
//!
//! Loaders are generic over `io::Read` and skip malformed rows with a
//! warning instead of failing the whole file.

pub mod records;
pub mod trajectory;
pub mod stars;
pub mod snapshot;

pub use records::LoadReport;
pub use trajectory::{load_trajectory, read_trajectory};
pub use stars::{covariance_from_upper, read_covariances, read_stars, StarCatalog, StarRow};
pub use snapshot::SnapshotWriter;
