//! TOML 设置文件。
//!
//! ```toml
//! domains = ["qq.com", "gmail.com"]
//! domains_file = "domains.txt"   # 相对于本文件
//!
//! [presentation]
//! width = "input"
//! offset_top = -1
//! offset_left = 0
//! z_index = 10
//! ```
//!
//! 展示项按松散的 TOML 值读取：写错类型不会导致加载失败，而是由 core 回退到默认值。
use std::path::{Path, PathBuf};

use mailtip_core::config::{OptionValue, Options};
use serde::Deserialize;
use tracing::info;

use crate::{LoadError, load_domains, read_file};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSettings {
    domains: Option<Vec<String>>,
    domains_file: Option<PathBuf>,
    presentation: RawPresentation,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPresentation {
    width: Option<toml::Value>,
    offset_top: Option<toml::Value>,
    offset_left: Option<toml::Value>,
    z_index: Option<toml::Value>,
}

/// 加载后的设置；`domains` 为 `None` 时使用内置列表。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub domains: Option<Vec<String>>,
    pub width: Option<OptionValue>,
    pub offset_top: Option<OptionValue>,
    pub offset_left: Option<OptionValue>,
    pub z_index: Option<OptionValue>,
}

impl Settings {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let settings = Self::from_toml_str(&read_file(path)?, path.parent())?;
        info!(path = %path.display(), "已加载设置");
        Ok(settings)
    }

    /// `base_dir` 用来解析相对的 `domains_file`。
    ///
    /// 同时给出 `domains` 与 `domains_file` 时，文件中的域名追加在内联列表之后。
    pub fn from_toml_str(s: &str, base_dir: Option<&Path>) -> Result<Self, LoadError> {
        let raw: RawSettings = toml::from_str(s)?;

        let mut domains = raw.domains;
        if let Some(file) = raw.domains_file {
            let file = match base_dir {
                Some(dir) if file.is_relative() => dir.join(file),
                _ => file,
            };
            domains
                .get_or_insert_with(Vec::new)
                .extend(load_domains(&file)?);
        }

        let presentation = raw.presentation;
        Ok(Self {
            domains,
            width: presentation.width.map(option_value),
            offset_top: presentation.offset_top.map(option_value),
            offset_left: presentation.offset_left.map(option_value),
            z_index: presentation.z_index.map(option_value),
        })
    }

    /// 转成 core 的原始选项（回调由调用方另行设置）。
    pub fn into_options(self) -> Options {
        Options {
            domains: self.domains,
            on_select: None,
            width: self.width,
            offset_top: self.offset_top,
            offset_left: self.offset_left,
            z_index: self.z_index,
        }
    }
}

fn option_value(value: toml::Value) -> OptionValue {
    match value {
        toml::Value::Integer(n) => OptionValue::Number(n as f64),
        toml::Value::Float(n) => OptionValue::Number(n),
        toml::Value::String(s) => OptionValue::Text(s),
        other => OptionValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailtip_core::config::{Config, Presentation, Width};

    #[test]
    fn empty_file_means_all_defaults() {
        let settings = Settings::from_toml_str("", None).unwrap();
        assert_eq!(settings, Settings::default());
        let config = Config::from_options(settings.into_options());
        assert_eq!(config.domains().len(), 12);
    }

    #[test]
    fn reads_domains_and_presentation() {
        let settings = Settings::from_toml_str(
            r#"
            domains = ["qq.com", "Gmail.com"]
            [presentation]
            width = 320
            offset_top = 2.5
            z_index = 100
            "#,
            None,
        )
        .unwrap();
        let config = Config::from_options(settings.into_options());
        assert_eq!(config.domains(), ["qq.com", "Gmail.com"]);
        let p = config.presentation();
        assert_eq!(p.width, Width::Fixed(320.0));
        assert_eq!(p.offset_top, 2.5);
        assert_eq!(p.offset_left, 0.0);
        assert_eq!(p.z_index, 100.0);
    }

    #[test]
    fn malformed_presentation_degrades_to_defaults() {
        let settings = Settings::from_toml_str(
            r#"
            [presentation]
            width = true
            offset_top = "up"
            offset_left = nan
            z_index = [1]
            "#,
            None,
        )
        .unwrap();
        let config = Config::from_options(settings.into_options());
        assert_eq!(*config.presentation(), Presentation::default());
    }

    #[test]
    fn domains_file_is_resolved_relative_to_settings() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("extra.txt"), "189.com\n").unwrap();
        let toml_path = dir.path().join("mailtip.toml");
        std::fs::write(
            &toml_path,
            "domains = [\"qq.com\"]\ndomains_file = \"extra.txt\"\n",
        )
        .unwrap();

        let settings = Settings::from_path(&toml_path).unwrap();
        assert_eq!(settings.domains.unwrap(), ["qq.com", "189.com"]);
    }

    #[test]
    fn invalid_toml_is_reported() {
        let err = Settings::from_toml_str("domains = [", None).unwrap_err();
        assert!(matches!(err, LoadError::Toml(_)));
    }
}
