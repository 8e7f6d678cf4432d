use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use tracing::{debug, error, info};
use url::Url;

use crate::{IndexError, WithdrawalIndex};

/// Where the externally maintained withdrawal document lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IndexSource {
    File(PathBuf),
    Url(Url),
}

impl IndexSource {
    async fn fetch(&self, http: &reqwest::Client) -> Result<WithdrawalIndex, IndexError> {
        match self {
            Self::File(path) => WithdrawalIndex::load(path).await,
            Self::Url(url) => {
                let fetch = |source| IndexError::Fetch {
                    url: url.clone(),
                    source,
                };
                let bytes = http
                    .get(url.clone())
                    .send()
                    .await
                    .and_then(reqwest::Response::error_for_status)
                    .map_err(fetch)?
                    .bytes()
                    .await
                    .map_err(fetch)?;
                WithdrawalIndex::from_json(&bytes)
            }
        }
    }
}

impl FromStr for IndexSource {
    type Err = url::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            s.parse().map(Self::Url)
        } else {
            Ok(Self::File(PathBuf::from(s)))
        }
    }
}

impl Display for IndexSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IndexStatus {
    Loaded,
    /// The source could not be loaded. The index is served empty.
    Unavailable(String),
}

#[derive(Debug)]
pub struct IndexSnapshot {
    pub index: WithdrawalIndex,
    pub status: IndexStatus,
}

/// Hands out the current [`WithdrawalIndex`] snapshot and swaps it on reload.
///
/// Readers never block: each request takes its own `Arc` of the snapshot.
pub struct WithdrawalIndexHolder {
    snapshot: ArcSwap<IndexSnapshot>,
    source: Option<IndexSource>,
    http: reqwest::Client,
}

impl WithdrawalIndexHolder {
    /// Loads the index once. A failure is logged and leaves an empty, unavailable index.
    pub async fn load(source: IndexSource) -> Self {
        let http = reqwest::Client::new();
        let snapshot = match source.fetch(&http).await {
            Ok(index) => {
                info!(%source, withdrawals = index.len(), "Loaded withdrawals");
                IndexSnapshot {
                    index,
                    status: IndexStatus::Loaded,
                }
            }
            Err(err) => {
                let reason = report(&err);
                error!(%source, "Failed to load withdrawal data: {reason}");
                IndexSnapshot {
                    index: WithdrawalIndex::default(),
                    status: IndexStatus::Unavailable(reason),
                }
            }
        };

        Self {
            snapshot: ArcSwap::from_pointee(snapshot),
            source: Some(source),
            http,
        }
    }

    /// Serves a fixed index. [`Self::reload`] is a no-op.
    pub fn from_index(index: WithdrawalIndex) -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(IndexSnapshot {
                index,
                status: IndexStatus::Loaded,
            }),
            source: None,
            http: reqwest::Client::new(),
        }
    }

    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        self.snapshot.load_full()
    }

    /// Re-reads the source and swaps in the new index. On failure the current snapshot
    /// is kept.
    pub async fn reload(&self) -> Result<usize, IndexError> {
        let Some(source) = &self.source else {
            return Ok(self.snapshot.load().index.len());
        };

        let index = source.fetch(&self.http).await?;
        let withdrawals = index.len();
        self.snapshot.store(Arc::new(IndexSnapshot {
            index,
            status: IndexStatus::Loaded,
        }));
        Ok(withdrawals)
    }

    pub async fn refresh_task(self: Arc<Self>, refresh_rate: Duration) {
        let start = tokio::time::Instant::now() + refresh_rate;
        let mut interval = tokio::time::interval_at(start, refresh_rate);
        loop {
            interval.tick().await;
            match self.reload().await {
                Ok(withdrawals) => debug!(withdrawals, "Withdrawal index reloaded"),
                Err(err) => error!("Failed to reload withdrawal data: {}", report(&err)),
            }
        }
    }
}

fn report(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
