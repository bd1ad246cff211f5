//! 設定管理を行うモジュール

use std::path::Path;

use super::{
    ConfigError,
    ViewerSettings,
    loader,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: ViewerSettings,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: ViewerSettings::default() }
    }

    /// 設定を読み込む
    ///
    /// # Arguments
    /// * `config_path` - 明示的な設定ファイルのパス。`None` の場合はユーザー設定ディレクトリを探す
    ///
    /// # Returns
    /// - `Ok(())`: 設定の読み込みとバリデーション成功
    /// - `Err(ConfigError)`: エラー
    ///
    /// # Errors
    /// - 明示的に指定したファイルが存在しない
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, config_path: Option<&Path>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings from: {:?}", config_path);

        let settings = if let Some(path) = config_path {
            // 明示的に指定されたファイルは必須
            loader::load_from_path(path)?.ok_or_else(|| {
                ConfigError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("{} does not exist", path.display()),
                ))
            })?
        } else if let Some(default_path) = loader::default_config_path() {
            loader::load_from_path(&default_path)?.unwrap_or_default()
        } else {
            ViewerSettings::default()
        };

        // バリデーション
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        // 設定を保存
        self.current_settings = settings;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &ViewerSettings {
        &self.current_settings
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    /// new: デフォルト値で作成される
    #[rstest]
    fn test_new_creates_default_settings() {
        let manager = ConfigManager::new();

        assert_eq!(manager.get_settings(), &ViewerSettings::default());
    }

    /// load_settings: 設定ファイルを指定した場合
    #[rstest]
    fn test_load_settings_with_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("viewer.json");
        fs::write(&config_path, r#"{"referenceLocale": "sv", "maxConcurrentFetches": 2}"#)
            .unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(&config_path));

        assert!(result.is_ok());
        assert_eq!(manager.get_settings().reference_locale, "sv");
        assert_eq!(manager.get_settings().concurrency(), 2);
    }

    /// load_settings: 指定したファイルが存在しない場合はエラー
    #[rstest]
    fn test_load_settings_missing_explicit_file() {
        let temp_dir = TempDir::new().unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(&temp_dir.path().join("missing.json")));

        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    /// load_settings: バリデーションエラーの場合は設定を変更しない
    #[rstest]
    fn test_load_settings_invalid_keeps_previous() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("viewer.json");
        fs::write(&config_path, r#"{"baseUrl": "file:///cldr"}"#).unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(&config_path));

        assert!(matches!(result, Err(ConfigError::ValidationErrors(_))));
        assert_eq!(manager.get_settings(), &ViewerSettings::default());
    }
}
