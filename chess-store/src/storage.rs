//! 局面存储系统
//!
//! 每个局面保存为一个二进制记录文件，文件名为 `<时间戳>_<标签>.<扩展名>`。

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chess_core::{BoardState, Fen};
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{info, warn};

use crate::config::StoreConfig;

/// 文件名中时间戳的格式
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// 时间戳部分的长度（`YYYYmmdd_HHMMSS`）
const TIMESTAMP_LEN: usize = 15;

/// 存储管理器
pub struct StorageManager {
    saves_dir: PathBuf,
    extension: String,
}

impl StorageManager {
    /// 使用默认配置创建
    pub fn new() -> Result<Self> {
        Self::with_config(&StoreConfig::default())
    }

    /// 按配置创建，目录不存在时自动创建
    pub fn with_config(config: &StoreConfig) -> Result<Self> {
        let saves_dir = config.resolve_saves_dir()?;

        if !saves_dir.exists() {
            fs::create_dir_all(&saves_dir)
                .with_context(|| format!("无法创建存储目录: {:?}", saves_dir))?;
        }

        Ok(Self {
            saves_dir,
            extension: config.extension.clone(),
        })
    }

    /// 保存局面，返回局面 ID（文件名）
    pub fn save_position(&self, label: &str, state: &BoardState) -> Result<String> {
        let bytes = state.to_record_bytes().context("编码局面记录失败")?;

        let timestamp = Utc::now();
        let mut attempt = 0;
        let mut filename = generate_filename(&timestamp, label, &self.extension, attempt);
        while self.saves_dir.join(&filename).exists() {
            attempt += 1;
            filename = generate_filename(&timestamp, label, &self.extension, attempt);
        }

        let filepath = self.saves_dir.join(&filename);
        fs::write(&filepath, bytes).with_context(|| format!("写入文件失败: {:?}", filepath))?;

        info!("Saved position {} ({})", filename, Fen::encode(state));
        Ok(filename)
    }

    /// 加载局面
    pub fn load_position(&self, position_id: &str) -> Result<BoardState> {
        let filepath = self.position_path(position_id)?;

        if !filepath.exists() {
            anyhow::bail!("局面文件不存在: {}", position_id);
        }

        Self::import_from(&filepath)
    }

    /// 列出所有保存的局面，最新的在前
    pub fn list_positions(&self) -> Result<Vec<SavedPositionInfo>> {
        let mut positions = Vec::new();

        if !self.saves_dir.exists() {
            return Ok(positions);
        }

        let entries = fs::read_dir(&self.saves_dir)
            .with_context(|| format!("读取存储目录失败: {:?}", self.saves_dir))?;

        for entry in entries {
            let entry = entry.context("读取目录项失败")?;
            let path = entry.path();

            if path.extension().and_then(|s| s.to_str()) != Some(self.extension.as_str()) {
                continue;
            }
            let Some(filename) = path.file_name().and_then(|s| s.to_str()) else {
                continue;
            };

            match Self::import_from(&path) {
                Ok(state) => {
                    let saved_at = parse_timestamp(filename).unwrap_or_else(|| {
                        // 使用文件修改时间作为后备
                        entry
                            .metadata()
                            .and_then(|m| m.modified())
                            .map(DateTime::from)
                            .unwrap_or_else(|_| Utc::now())
                    });
                    positions.push(SavedPositionInfo {
                        position_id: filename.to_string(),
                        label: parse_label(filename, &self.extension),
                        saved_at,
                        fen: Fen::encode(&state),
                    });
                }
                Err(e) => {
                    warn!("Skipping unreadable position file {:?}: {:#}", path, e);
                }
            }
        }

        positions.sort_by(|a, b| {
            b.saved_at
                .cmp(&a.saved_at)
                .then_with(|| b.position_id.cmp(&a.position_id))
        });
        Ok(positions)
    }

    /// 删除保存的局面
    pub fn delete_position(&self, position_id: &str) -> Result<()> {
        let filepath = self.position_path(position_id)?;

        if filepath.exists() {
            fs::remove_file(&filepath)
                .with_context(|| format!("删除文件失败: {:?}", filepath))?;
            info!("Deleted position {}", position_id);
        }

        Ok(())
    }

    /// 将局面写入任意路径
    pub fn export_to(path: &Path, state: &BoardState) -> Result<()> {
        let file = fs::File::create(path).with_context(|| format!("创建文件失败: {:?}", path))?;
        state
            .write_record(file)
            .with_context(|| format!("写入局面记录失败: {:?}", path))
    }

    /// 从任意路径读取局面
    pub fn import_from(path: &Path) -> Result<BoardState> {
        let bytes = fs::read(path).with_context(|| format!("读取文件失败: {:?}", path))?;
        BoardState::from_record_bytes(&bytes)
            .with_context(|| format!("解析局面文件失败: {:?}", path))
    }

    /// 获取存储目录路径
    pub fn saves_directory(&self) -> &Path {
        &self.saves_dir
    }

    fn position_path(&self, position_id: &str) -> Result<PathBuf> {
        if position_id.contains(['/', '\\']) || position_id == ".." {
            anyhow::bail!("无效的局面 ID: {}", position_id);
        }
        Ok(self.saves_dir.join(position_id))
    }
}

/// 保存的局面信息
#[derive(Debug, Clone)]
pub struct SavedPositionInfo {
    /// 局面 ID（文件名）
    pub position_id: String,
    /// 保存时的标签
    pub label: String,
    /// 保存时间
    pub saved_at: DateTime<Utc>,
    /// 局面 FEN
    pub fen: String,
}

/// 生成文件名，`attempt > 0` 时附加序号避免覆盖
fn generate_filename(timestamp: &DateTime<Utc>, label: &str, extension: &str, attempt: u32) -> String {
    let timestamp_str = timestamp.format(TIMESTAMP_FORMAT).to_string();
    let clean_label = sanitize_filename(label);

    if attempt == 0 {
        format!("{}_{}.{}", timestamp_str, clean_label, extension)
    } else {
        format!("{}_{}_{}.{}", timestamp_str, clean_label, attempt, extension)
    }
}

/// 从文件名解析保存时间
fn parse_timestamp(filename: &str) -> Option<DateTime<Utc>> {
    let prefix = filename.get(..TIMESTAMP_LEN)?;
    NaiveDateTime::parse_from_str(prefix, TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// 从文件名解析标签
fn parse_label(filename: &str, extension: &str) -> String {
    let stem = filename
        .strip_suffix(extension)
        .and_then(|s| s.strip_suffix('.'))
        .unwrap_or(filename);

    match parse_timestamp(stem) {
        Some(_) => stem
            .get(TIMESTAMP_LEN + 1..)
            .unwrap_or_default()
            .to_string(),
        None => stem.to_string(),
    }
}

/// 清理文件名中的特殊字符
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}
