//! finance-storage-json
//!
//! Filesystem persistence for the finance record: one pretty-printed JSON
//! file per storage key, plus timestamped backups.

use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, NaiveDateTime, Utc};
use finance_core::{CoreError, StateStorage};
use finance_domain::{Category, FinanceState, Transaction};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Storage key used when callers do not pick one.
pub const DEFAULT_STORAGE_KEY: &str = "finance-storage";
/// Highest envelope version this build can read.
pub const STATE_SCHEMA_VERSION: u32 = 1;

const FILE_EXTENSION: &str = "json";
const BACKUP_DIR: &str = "backups";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S%3f";
const BACKUP_TIMESTAMP_LEN: usize = 18;
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// Filesystem-backed JSON persistence for the finance state and its backups.
#[derive(Debug, Clone)]
pub struct JsonStateStorage {
    key: String,
    state_path: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

/// Describes one backup file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupInfo {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub path: PathBuf,
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    state: &'a FinanceState,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredRecord {
    Envelope { version: u32, state: FinanceState },
    Bare(BareRecord),
}

/// Unwrapped `{ transactions, categories }` layout; both fields required.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BareRecord {
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
}

impl JsonStateStorage {
    /// Stores state under [`DEFAULT_STORAGE_KEY`] inside `root`.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, CoreError> {
        Self::with_key(root, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(root: impl Into<PathBuf>, key: &str) -> Result<Self, CoreError> {
        let root = root.into();
        let key = canonical_key(key);
        let backups_dir = root.join(BACKUP_DIR);
        fs::create_dir_all(&root)?;
        fs::create_dir_all(&backups_dir)?;
        Ok(Self {
            state_path: root.join(format!("{}.{}", key, FILE_EXTENSION)),
            backups_dir,
            key,
            retention: DEFAULT_RETENTION,
        })
    }

    /// Number of backups kept after each new backup; at least one.
    pub fn with_retention(mut self, retention: usize) -> Self {
        self.retention = retention.max(1);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    pub fn backups_dir(&self) -> &Path {
        &self.backups_dir
    }

    /// Writes a timestamped copy of `state` and prunes old backups.
    pub fn backup(&self, state: &FinanceState, note: Option<&str>) -> Result<BackupInfo, CoreError> {
        fs::create_dir_all(&self.backups_dir)?;
        let now = Utc::now();
        let base = format!("{}_{}", self.key, now.format(BACKUP_TIMESTAMP_FORMAT));
        let seq = self
            .list_backups()?
            .iter()
            .filter(|info| info.id.starts_with(&base))
            .filter_map(|info| parse_backup_stamp(&self.key, &info.id))
            .map(|(_, seq)| seq)
            .max()
            .map_or(1, |last| last + 1);
        let mut stem = base;
        if seq > 1 {
            stem.push_str(&format!("-{seq}"));
        }
        if let Some(label) = sanitize_note(note) {
            stem.push('_');
            stem.push_str(&label);
        }
        let path = self.backups_dir.join(format!("{}.{}", stem, FILE_EXTENSION));

        write_atomic(&path, &serialize_state(state)?)?;
        let id = file_name(&path);
        debug!(backup = %id, "finance state backup written");
        self.prune_backups()?;
        Ok(BackupInfo {
            created_at: parse_backup_stamp(&self.key, &id).map(|(stamp, _)| stamp),
            id,
            path,
        })
    }

    /// Lists backups newest-first.
    pub fn list_backups(&self) -> Result<Vec<BackupInfo>, CoreError> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            let id = file_name(&path);
            let Some(stamp) = parse_backup_stamp(&self.key, &id) else {
                continue;
            };
            let info = BackupInfo {
                created_at: Some(stamp.0),
                id,
                path,
            };
            entries.push((stamp, info));
        }
        entries.sort_by_key(|(stamp, _)| Reverse(*stamp));
        Ok(entries.into_iter().map(|(_, info)| info).collect())
    }

    /// Finds a backup by exact file name or by a unique prefix of it.
    pub fn find_backup(&self, id: &str) -> Result<BackupInfo, CoreError> {
        let backups = self.list_backups()?;
        if let Some(exact) = backups.iter().find(|info| info.id == id) {
            return Ok(exact.clone());
        }
        let mut matches = backups.into_iter().filter(|info| info.id.starts_with(id));
        match (matches.next(), matches.next()) {
            (Some(info), None) => Ok(info),
            (Some(_), Some(_)) => Err(CoreError::Ambiguous(id.to_string())),
            (None, _) => Err(CoreError::Storage(format!("backup `{}` not found", id))),
        }
    }

    /// Copies a backup over the live file and returns the restored state.
    pub fn restore(&self, backup: &BackupInfo) -> Result<FinanceState, CoreError> {
        if !backup.path.exists() {
            return Err(CoreError::Storage(format!(
                "backup `{}` not found",
                backup.id
            )));
        }
        let state = read_state(&backup.path)?
            .ok_or_else(|| CoreError::Storage(format!("backup `{}` is empty", backup.id)))?;
        self.save(&state)?;
        debug!(backup = %backup.id, "finance state restored from backup");
        Ok(state)
    }

    fn prune_backups(&self) -> Result<(), CoreError> {
        for stale in self.list_backups()?.into_iter().skip(self.retention) {
            let _ = fs::remove_file(&stale.path);
        }
        Ok(())
    }
}

impl StateStorage for JsonStateStorage {
    fn load(&self) -> Result<Option<FinanceState>, CoreError> {
        read_state(&self.state_path)
    }

    fn save(&self, state: &FinanceState) -> Result<(), CoreError> {
        let tmp = tmp_path(&self.state_path);
        write_atomic(&tmp, &serialize_state(state)?)?;
        fs::rename(&tmp, &self.state_path)?;
        debug!(path = %self.state_path.display(), "finance state saved");
        Ok(())
    }
}

/// Reads a state file, returning `None` when it does not exist yet.
pub fn read_state(path: &Path) -> Result<Option<FinanceState>, CoreError> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path)?;
    let record: StoredRecord =
        serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))?;
    match record {
        StoredRecord::Envelope { version, state } => {
            if version > STATE_SCHEMA_VERSION {
                return Err(CoreError::Storage(format!(
                    "state file `{}` uses schema v{} which is newer than supported v{}",
                    path.display(),
                    version,
                    STATE_SCHEMA_VERSION
                )));
            }
            Ok(Some(state))
        }
        StoredRecord::Bare(BareRecord {
            transactions,
            categories,
        }) => Ok(Some(FinanceState {
            transactions,
            categories,
        })),
    }
}

fn serialize_state(state: &FinanceState) -> Result<String, CoreError> {
    let envelope = EnvelopeRef {
        version: STATE_SCHEMA_VERSION,
        state,
    };
    serde_json::to_string_pretty(&envelope).map_err(|err| CoreError::Serde(err.to_string()))
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches(|c| c == '_' || c == '-').is_empty() {
        DEFAULT_STORAGE_KEY.into()
    } else {
        sanitized
    }
}

fn sanitize_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    let mut sanitized = String::new();
    let mut last_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !sanitized.is_empty() && !last_dash {
            sanitized.push('-');
            last_dash = true;
        }
    }
    let trimmed = sanitized.trim_matches('-').to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Extracts `(timestamp, sequence)` from `<key>_<stamp>[-seq][_note].json`.
fn parse_backup_stamp(key: &str, id: &str) -> Option<(DateTime<Utc>, u32)> {
    let rest = id.strip_prefix(key)?.strip_prefix('_')?;
    let stamp = rest.get(..BACKUP_TIMESTAMP_LEN)?;
    let naive = NaiveDateTime::parse_from_str(stamp, BACKUP_TIMESTAMP_FORMAT).ok()?;
    let tail = &rest[BACKUP_TIMESTAMP_LEN..];
    let seq = match tail.strip_prefix('-') {
        Some(after) => after
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect::<String>()
            .parse()
            .ok()?,
        None => 1,
    };
    Some((DateTime::from_naive_utc_and_offset(naive, Utc), seq))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string()
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
