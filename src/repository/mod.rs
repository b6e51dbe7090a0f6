//! Repository identity and file listings shared by fetching and detection

mod handle;
mod listing;

pub use handle::{RepositoryError, RepositoryHandle};
pub use listing::{FileEntry, FileListing};
