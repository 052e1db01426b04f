//! 核心引擎：语法、分类、修复、计数、回环规范化
//!
//! 数据流：文档 → find_invalid_lines → repair → (确认后) restore_loopback

pub mod classifier;
pub mod counter;
pub mod grammar;
pub mod normalizer;
pub mod ports;
pub mod repair;
pub mod session;

pub use classifier::find_invalid_lines;
pub use counter::{count_canonical, read_declared_count, write_declared_count};
pub use grammar::Grammar;
pub use normalizer::restore_loopback;
pub use ports::{DryRunInstaller, Fetcher, FileFetcher, InstallRequest, Installer};
pub use repair::{repair, repair_detailed};
pub use session::{Fetched, Freshness, InstallOutcome, Inspection, UpdateSession};
