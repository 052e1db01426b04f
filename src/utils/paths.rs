//! 跨平台路径处理工具 (传统原则：常识性接口设计)

use crate::error::{HostsError, Result};
use std::path::{Path, PathBuf};

const CONFIG_DIR_NAME: &str = ".hostsguard";
const CONFIG_FILE_NAME: &str = "config.toml";

/// 获取用户配置目录：~/.hostsguard
pub fn get_config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| HostsError::Config("无法找到用户主目录".to_string()))?;

    Ok(home.join(CONFIG_DIR_NAME))
}

/// 默认配置文件路径：~/.hostsguard/config.toml
pub fn default_config_file() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

/// 相对路径按当前目录解析
pub fn resolve(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let current_dir = std::env::current_dir()
        .map_err(|e| HostsError::Config(format!("无法获取当前目录: {}", e)))?;
    Ok(current_dir.join(path))
}

/// 检查文件是否存在
pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}

/// 读取文件内容，错误按类型归类并带上路径
pub fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| HostsError::from_io(path, e))
}
