//! 存储配置
//!
//! JSON 格式，缺失的字段取默认值。

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chess_core::POSITION_FILE_EXTENSION;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 默认数据目录下的应用子目录
const APP_DIR: &str = "proton-chess";

/// 局面文件子目录
const POSITIONS_DIR: &str = "positions";

/// 存储配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// 局面文件目录，未设置时使用平台数据目录
    pub saves_dir: Option<PathBuf>,
    /// 局面文件扩展名（不含点）
    pub extension: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            saves_dir: None,
            extension: POSITION_FILE_EXTENSION.to_string(),
        }
    }
}

impl StoreConfig {
    /// 使用指定目录
    pub fn with_saves_dir(saves_dir: impl Into<PathBuf>) -> Self {
        Self {
            saves_dir: Some(saves_dir.into()),
            ..Self::default()
        }
    }

    /// 从 JSON 文件加载，文件不存在时返回默认配置
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {:?}", path))?;
        serde_json::from_str(&content).with_context(|| format!("解析配置文件失败: {:?}", path))
    }

    /// 保存为 JSON 文件
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("无法创建配置目录: {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self).context("序列化配置失败")?;
        fs::write(path, content).with_context(|| format!("写入配置文件失败: {:?}", path))
    }

    /// 实际使用的局面目录
    pub fn resolve_saves_dir(&self) -> Result<PathBuf> {
        match &self.saves_dir {
            Some(dir) => Ok(dir.clone()),
            None => {
                let data_dir = dirs::data_dir().context("无法获取应用数据目录")?;
                Ok(data_dir.join(APP_DIR).join(POSITIONS_DIR))
            }
        }
    }
}
