//! 安装内容指纹

use sha2::{Digest, Sha256};

/// 计算文本的 SHA-256，返回小写十六进制
pub fn sha256_hex(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}
