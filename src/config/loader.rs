//! 設定ファイルの読み込み関数

use std::path::{
    Path,
    PathBuf,
};

use super::types::APP_NAME;
use super::{
    ConfigError,
    ViewerSettings,
};

/// 設定ファイル名
const CONFIG_FILE: &str = "config.json";

/// ユーザー設定ファイルのデフォルトパス
///
/// `<config dir>/cldr-viewer/config.json`
pub(super) fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
}

/// 設定ファイルを読み込む
///
/// # Arguments
/// * `config_path` - 設定ファイルのパス
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
pub(super) fn load_from_path(config_path: &Path) -> Result<Option<ViewerSettings>, ConfigError> {
    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(config_path)?;
    let settings: ViewerSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    /// `load_from_path`: 設定ファイルが存在する場合
    #[rstest]
    fn test_load_from_path_with_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&config_path, r#"{"referenceLocale": "fr"}"#).unwrap();

        let result = load_from_path(&config_path);

        assert!(result.is_ok());
        let settings = result.unwrap();
        assert!(settings.is_some());
        assert_eq!(settings.unwrap().reference_locale, "fr");
    }

    /// `load_from_path`: 設定ファイルが存在しない場合
    #[rstest]
    fn test_load_from_path_no_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_from_path(&temp_dir.path().join(CONFIG_FILE));

        assert!(result.is_ok());
        assert!(result.unwrap().is_none());
    }

    /// `load_from_path`: JSON パースエラー
    #[rstest]
    fn test_load_from_path_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "invalid json").unwrap();

        let result = load_from_path(&config_path);

        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    /// `default_config_path`: アプリ名のディレクトリ配下
    #[rstest]
    fn test_default_config_path_layout() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("cldr-viewer/config.json"));
        }
    }
}
