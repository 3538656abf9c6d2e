use std::{
    io,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};

use thiserror::Error;

use crate::model::TradeRequest;

// Makes every in-flight write use its own temp file.
static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("io error on {0}: {1}")]
    Io(PathBuf, io::Error),
    #[error("could not encode trade order: {0}")]
    Encode(bincode::Error),
    #[error("could not decode trade order: {0}")]
    Decode(bincode::Error),
}

/// Single-slot file holding the most recent trade order.
///
/// Every `replace` overwrites the whole file. The new bytes go to a sibling
/// temp file unique to that call and are renamed over the target, so readers
/// see either the old order or a complete new one. Concurrent writers each
/// succeed and the last rename wins.
#[derive(Debug, Clone)]
pub struct TradeOrderStore {
    path: PathBuf,
}

impl TradeOrderStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TradeOrderStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling of the target named `<file>.<pid>.<seq>.tmp`.
    fn temp_path(&self) -> PathBuf {
        let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(format!(".{}.{}.tmp", std::process::id(), seq));
        PathBuf::from(tmp)
    }

    /// Overwrites the stored order with `trade`.
    pub async fn replace(&self, trade: &TradeRequest) -> Result<(), StoreError> {
        let bytes = bincode::serialize(trade).map_err(StoreError::Encode)?;
        let tmp = self.temp_path();
        if let Err(e) = tokio::fs::write(&tmp, bytes).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(StoreError::Io(tmp, e));
        }
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(StoreError::Io(self.path.clone(), e));
        }
        log::debug!("trade order written to {}", self.path.display());
        Ok(())
    }

    /// Reads the stored order back. `None` when no trade has been written yet.
    pub async fn load(&self) -> Result<Option<TradeRequest>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(self.path.clone(), e)),
        };
        bincode::deserialize(&bytes)
            .map(Some)
            .map_err(StoreError::Decode)
    }
}
