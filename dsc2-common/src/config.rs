//! Configuration loading and data folder resolution

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Environment variable naming the data folder
pub const DATA_FOLDER_ENV: &str = "DSC2_DATA_FOLDER";

/// Fixed input/asset locations inside the resolved data folder
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub folder: PathBuf,
}

impl DataPaths {
    pub fn new(folder: PathBuf) -> DataPaths {
        DataPaths { folder }
    }

    /// IVA event log (tabular source)
    pub fn iva_log(&self) -> PathBuf {
        self.folder.join("iva_logs.csv")
    }

    /// Access-control decision log (JSON source)
    pub fn access_log(&self) -> PathBuf {
        self.folder.join("access_logs.json")
    }

    /// Externally-produced activity heatmap image
    pub fn heatmap(&self) -> PathBuf {
        self.folder.join("heatmap.png")
    }
}

/// Data folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file (`data_folder` key)
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_data_folder(cli_arg: Option<&Path>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(DATA_FOLDER_ENV) {
        return PathBuf::from(path);
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = locate_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Some(folder) = data_folder_from_toml(&toml_content) {
                return folder;
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    default_data_folder()
}

/// Extract the `data_folder` key from a TOML config document
fn data_folder_from_toml(content: &str) -> Option<PathBuf> {
    let config = toml::from_str::<toml::Value>(content).ok()?;
    config
        .get("data_folder")
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
}

/// Get configuration file path for the platform
fn locate_config_file() -> Result<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("dsc2").join("config.toml"));

    if let Some(path) = &user_config {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/dsc2/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config("No config file found".to_string()))
}

/// Get OS-dependent default data folder path
fn default_data_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("dsc2"))
        .unwrap_or_else(|| PathBuf::from("./dsc2_data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_argument_wins() {
        let folder = resolve_data_folder(Some(Path::new("/tmp/dsc2-test")));
        assert_eq!(folder, PathBuf::from("/tmp/dsc2-test"));
    }

    #[test]
    fn test_data_folder_from_toml() {
        let parsed = data_folder_from_toml("data_folder = \"/srv/dsc2\"\n");
        assert_eq!(parsed, Some(PathBuf::from("/srv/dsc2")));
    }

    #[test]
    fn test_data_folder_from_toml_missing_key() {
        assert_eq!(data_folder_from_toml("port = 5730\n"), None);
        assert_eq!(data_folder_from_toml("not valid toml ["), None);
    }

    #[test]
    fn test_data_paths_fixed_names() {
        let paths = DataPaths::new(PathBuf::from("/data"));
        assert_eq!(paths.iva_log(), PathBuf::from("/data/iva_logs.csv"));
        assert_eq!(paths.access_log(), PathBuf::from("/data/access_logs.json"));
        assert_eq!(paths.heatmap(), PathBuf::from("/data/heatmap.png"));
    }
}
