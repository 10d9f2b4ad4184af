//! 从文件加载补全配置：域名列表（纯文本）与设置（TOML）。
//!
//! 结果统一落到 [`mailtip_core::config::Options`]，校验与回退仍由 core 完成。
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

mod settings;

pub use settings::Settings;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("读取 {} 失败", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("第 {line} 行不是合法域名：{text:?}")]
    InvalidDomain { line: usize, text: String },
    #[error("解析 TOML 失败")]
    Toml(#[from] toml::de::Error),
}

pub(crate) fn read_file(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// 域名列表文件：
///
/// - 每行一个域名，例如 `gmail.com`
/// - 允许 `#` 开头注释行与空行
/// - 保持文件顺序，不去重
pub fn load_domains(path: impl AsRef<Path>) -> Result<Vec<String>, LoadError> {
    parse_domains(&read_file(path.as_ref())?)
}

pub fn parse_domains(s: &str) -> Result<Vec<String>, LoadError> {
    let mut domains = Vec::new();
    for (idx, line) in s.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.chars().any(|c| c.is_whitespace() || c == ',' || c == '@') {
            return Err(LoadError::InvalidDomain {
                line: idx + 1,
                text: line.to_string(),
            });
        }
        domains.push(line.to_string());
    }
    Ok(domains)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_lines_in_order_skipping_comments() {
        let domains = parse_domains("# 常用\nqq.com\n\n  gmail.com  \nqq.com\n").unwrap();
        assert_eq!(domains, ["qq.com", "gmail.com", "qq.com"]);
    }

    #[test]
    fn reports_the_offending_line() {
        let err = parse_domains("qq.com\nfoo bar.com\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidDomain { line: 2, .. }));
        assert!(matches!(
            parse_domains("a@b.com").unwrap_err(),
            LoadError::InvalidDomain { line: 1, .. }
        ));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "163.com\nsina.com").unwrap();
        assert_eq!(load_domains(file.path()).unwrap(), ["163.com", "sina.com"]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_domains("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("not/here.txt"));
    }
}
