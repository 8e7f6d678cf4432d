//! In-memory index of pending withdrawals and the address search over it.

mod holder;
mod index;

use std::path::PathBuf;

pub use holder::{IndexSnapshot, IndexSource, IndexStatus, WithdrawalIndexHolder};
pub use index::WithdrawalIndex;

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch {url}")]
    Fetch {
        url: url::Url,
        #[source]
        source: reqwest::Error,
    },
    #[error("withdrawal document is not a JSON object")]
    Parse(
        #[from]
        #[source]
        serde_json::Error,
    ),
}

/// No withdrawal matches the hash or address.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("no withdrawals found for {0}")]
pub struct NotFound(pub String);
