//! 错误类型定义

use thiserror::Error;

/// 局面编码错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChessError {
    /// 无效的 FEN 字符串
    #[error("Malformed FEN string: {reason}")]
    MalformedFen { reason: String },

    /// 文件字母超出 A-H
    #[error("Coordinate out of range: file {file:?}")]
    InvalidFile { file: char },

    /// 横排数字超出 1-8
    #[error("Coordinate out of range: rank {rank}")]
    InvalidRank { rank: u8 },

    /// 线性格子索引超出 0-63
    #[error("Coordinate out of range: square index {index}")]
    InvalidSquareIndex { index: u8 },

    /// 既不是空格也不是已定义棋子的半字节编码
    #[error("Invalid piece code: {code:#04x}")]
    InvalidPieceCode { code: u8 },

    /// 十进制数超出 0-255
    #[error("Number out of range: {text}")]
    NumberOutOfRange { text: String },

    /// 目标缓冲区不足
    #[error("Buffer too small: need {needed} bytes, got {capacity}")]
    BufferTooSmall { needed: usize, capacity: usize },
}

impl ChessError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        ChessError::MalformedFen {
            reason: reason.into(),
        }
    }

    /// 是否属于坐标越界类错误
    pub fn is_coordinate_out_of_range(&self) -> bool {
        matches!(
            self,
            ChessError::InvalidFile { .. }
                | ChessError::InvalidRank { .. }
                | ChessError::InvalidSquareIndex { .. }
        )
    }
}

/// 二进制局面记录错误
#[derive(Error, Debug)]
pub enum RecordError {
    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 序列化错误（bincode）
    #[error("Bincode serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    /// 记录长度不符
    #[error("Record length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// 字段值不合法
    #[error("Invalid record field {field}: {value}")]
    InvalidField { field: &'static str, value: u8 },

    /// 回合数过大，无法放入单字节的走子计数器
    #[error("Fullmove number {fullmove_number} does not fit in the record move counter")]
    MoveCounterOverflow { fullmove_number: u8 },

    /// 局面数据错误
    #[error("Chess error: {0}")]
    Chess(#[from] ChessError),
}

/// 二进制记录操作结果类型
pub type Result<T> = std::result::Result<T, RecordError>;
