//! Reading and writing `config.json`.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{Config, ConfigError};

pub const CONFIG_FILE_NAME: &str = "config.json";

impl Config {
    /// `<base>/config.json`.
    pub fn file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE_NAME)
    }

    /// Reads `path`, or returns the defaults when it does not exist yet.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(data) => {
                serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Writes pretty JSON next to `path` and renames it into place.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let json =
            serde_json::to_string_pretty(self).map_err(|err| ConfigError::Serde(err.to_string()))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Loads `<base>/config.json`, writing the defaults there on first run.
    pub fn load_or_init(base: &Path) -> Result<Self, ConfigError> {
        let path = Self::file_in(base);
        let existed = path.exists();
        let config = Self::load_from(&path)?;
        if !existed {
            config.save_to(&path)?;
        }
        Ok(config)
    }
}
