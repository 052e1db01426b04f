//! 配置文件 (~/.hostsguard/config.toml)
//!
//! ```toml
//! database_dir = "hosts"
//! latest_file = "hosts_latest"
//! basename = "hosts"
//! system_hosts = "/etc/hosts"
//! ```

use crate::error::{HostsError, Result};
use crate::utils::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// 按日期保存的快照目录
    pub database_dir: PathBuf,
    /// 最近一次安装的副本
    pub latest_file: PathBuf,
    /// 快照文件名前缀：<basename>-<YYMMDD>
    pub basename: String,
    /// 安装目标
    pub system_hosts: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_dir: PathBuf::from("hosts"),
            latest_file: PathBuf::from("hosts_latest"),
            basename: "hosts".to_string(),
            system_hosts: PathBuf::from("/etc/hosts"),
        }
    }
}

impl Settings {
    /// 加载配置
    ///
    /// 显式指定的文件必须存在；默认位置的文件不存在时使用默认值。
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from_file(path),
            None => {
                let path = paths::default_config_file()?;
                if paths::file_exists(&path) {
                    Self::load_from_file(&path)
                } else {
                    tracing::debug!(path = %path.display(), "配置文件不存在，使用默认配置");
                    Ok(Self::default())
                }
            }
        }
    }

    /// 从文件加载配置
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = paths::read_file(path)?;
        let settings: Settings = toml::from_str(&content).map_err(|source| HostsError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.basename.trim().is_empty() || self.basename.contains(['/', '\\']) {
            return Err(HostsError::Config(format!("无效的 basename: {:?}", self.basename)));
        }
        Ok(())
    }

    /// 快照文件路径：<database_dir>/<basename>-<stamp>
    pub fn snapshot_path(&self, stamp: &str) -> Result<PathBuf> {
        let dir = paths::resolve(&self.database_dir)?;
        Ok(dir.join(format!("{}-{}", self.basename, stamp)))
    }

    pub fn latest_path(&self) -> Result<PathBuf> {
        paths::resolve(&self.latest_file)
    }

    pub fn system_hosts_path(&self) -> Result<PathBuf> {
        paths::resolve(&self.system_hosts)
    }
}
