use arpdns_application::ports::{RefreshOutcome, StaticHostTable};
use arpdns_domain::{EthersError, MacAddress};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Parsed ethers entries: canonical MAC → hostnames in file order.
#[derive(Debug, Default)]
pub struct EthersTable {
    addr: HashMap<String, Vec<String>>,
}

impl EthersTable {
    /// Parses ethers content.
    ///
    /// Format: `<hw-address> <hostname> [<alias> ...]`, `#` starts a comment.
    /// Lines with fewer than two fields are ignored. An invalid hardware
    /// address rejects the whole content.
    pub fn parse(content: &str) -> Result<Self, EthersError> {
        let mut table = Self::default();

        for (line_num, line) in content.lines().enumerate() {
            let line = match line.find('#') {
                Some(i) => &line[..i],
                None => line,
            };

            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 2 {
                continue;
            }

            let mac: MacAddress = fields[0].parse().map_err(|_| EthersError::MalformedEntry {
                line: line_num + 1,
                value: fields[0].to_string(),
            })?;

            // Names keep their original case.
            table
                .addr
                .entry(mac.to_string())
                .or_default()
                .extend(fields[1..].iter().map(|name| name.to_string()));
        }

        Ok(table)
    }

    pub fn get(&self, mac: &str) -> Option<&[String]> {
        self.addr.get(mac).map(Vec::as_slice)
    }

    /// Total number of hostnames across all addresses.
    pub fn len(&self) -> usize {
        self.addr.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.addr.is_empty()
    }

    pub fn address_count(&self) -> usize {
        self.addr.len()
    }
}

struct Snapshot {
    table: Arc<EthersTable>,
    mtime: Option<SystemTime>,
    size: Option<u64>,
}

impl Snapshot {
    /// Without a modification time (unsupported platform) only size counts.
    fn matches(&self, mtime: Option<SystemTime>, size: u64) -> bool {
        self.size == Some(size) && self.mtime == mtime
    }
}

/// Ethers file backed host table with mtime/size change detection.
///
/// Table and metadata share one lock, taken exclusively only to swap in a
/// freshly parsed table; reading and parsing happen outside it.
pub struct EthersFile {
    path: PathBuf,
    state: RwLock<Snapshot>,
    reload: Mutex<()>,
}

impl EthersFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: RwLock::new(Snapshot {
                table: Arc::new(EthersTable::default()),
                mtime: None,
                size: None,
            }),
            reload: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of hostnames in the current table.
    pub fn len(&self) -> usize {
        self.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table().is_empty()
    }

    fn table(&self) -> Arc<EthersTable> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&state.table)
    }

    fn unavailable(&self, e: std::io::Error) -> EthersError {
        EthersError::FileUnavailable {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        }
    }

    async fn read_if_changed(
        &self,
    ) -> Result<Option<(String, Option<SystemTime>, u64)>, EthersError> {
        let mut file = File::open(&self.path).await.map_err(|e| self.unavailable(e))?;
        let metadata = file.metadata().await.map_err(|e| self.unavailable(e))?;
        let mtime = metadata.modified().ok();
        let size = metadata.len();

        {
            let state = self.state.read().unwrap_or_else(|e| e.into_inner());
            if state.matches(mtime, size) {
                return Ok(None);
            }
        }

        let mut bytes = Vec::with_capacity(size as usize);
        file.read_to_end(&mut bytes)
            .await
            .map_err(|e| self.unavailable(e))?;

        Ok(Some((String::from_utf8_lossy(&bytes).into_owned(), mtime, size)))
    }
}

#[async_trait]
impl StaticHostTable for EthersFile {
    async fn refresh_if_stale(&self) -> Result<RefreshOutcome, EthersError> {
        let _reload = self.reload.lock().await;

        let Some((content, mtime, size)) = self.read_if_changed().await? else {
            return Ok(RefreshOutcome::Unchanged);
        };

        match EthersTable::parse(&content) {
            Ok(table) => {
                let entries = table.len();
                debug!(
                    path = %self.path.display(),
                    entries,
                    addresses = table.address_count(),
                    "Parsed ethers file"
                );

                let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
                state.table = Arc::new(table);
                state.mtime = mtime;
                state.size = Some(size);

                Ok(RefreshOutcome::Reloaded { entries })
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Keeping previous ethers table");

                // Remember the broken revision so it is not re-parsed per query.
                let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
                state.mtime = mtime;
                state.size = Some(size);

                Err(e)
            }
        }
    }

    fn lookup(&self, hardware_address: &str) -> Vec<String> {
        let Some(key) = MacAddress::canonicalize(hardware_address) else {
            return Vec::new();
        };

        self.table()
            .get(&key)
            .map(<[String]>::to_vec)
            .unwrap_or_default()
    }
}
