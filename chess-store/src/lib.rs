//! 局面存储
//!
//! 将局面以 36 字节二进制记录（`.pcgpf`）保存在本地目录中，
//! 并提供存储目录配置。

mod config;
mod storage;

pub use config::StoreConfig;
pub use storage::{SavedPositionInfo, StorageManager};
