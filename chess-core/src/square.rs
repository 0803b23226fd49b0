//! 棋盘坐标
//!
//! 三种等价表示：
//! - 文件字母 + 横排数字，如 `('E', 2)`
//! - 线性索引 0-63，`index = rank_id * 8 + file_id`
//! - 代数记法，两个字符，文件小写，如 `"e2"`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, SQUARE_COUNT};
use crate::error::ChessError;

/// 文件字母转换为 0-7
///
/// 大小写都接受。
pub fn file_id(file: char) -> Result<u8, ChessError> {
    match file {
        'A'..='H' => Ok(file as u8 - b'A'),
        'a'..='h' => Ok(file as u8 - b'a'),
        _ => Err(ChessError::InvalidFile { file }),
    }
}

/// 横排数字 1-8 转换为 0-7
pub fn rank_id(rank: u8) -> Result<u8, ChessError> {
    if (1..=BOARD_SIZE).contains(&rank) {
        Ok(rank - 1)
    } else {
        Err(ChessError::InvalidRank { rank })
    }
}

/// 文件字母与横排数字转换为线性索引
pub fn square_index(file: char, rank: u8) -> Result<u8, ChessError> {
    Square::from_coords(file, rank).map(Square::index)
}

/// 线性索引转换为代数记法
pub fn notation(index: u8) -> Result<SquareName, ChessError> {
    Square::from_index(index).map(Square::notation)
}

/// 计算格子所在的存储字节下标
///
/// 同一横排相邻的两个文件共用一个字节，偶数文件在高半字节。
pub const fn container_index(file_id: u8, rank_id: u8) -> usize {
    (rank_id as usize * BOARD_SIZE as usize + file_id as usize) / 2
}

/// 棋盘格子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Square(u8);

impl Square {
    /// 从线性索引创建
    pub fn new(index: u8) -> Option<Self> {
        if (index as usize) < SQUARE_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// 从线性索引创建（内部使用，调用方保证在 0-63 内）
    pub(crate) const fn new_unchecked(index: u8) -> Self {
        Self(index)
    }

    /// 从线性索引创建，越界时返回错误
    pub fn from_index(index: u8) -> Result<Self, ChessError> {
        Self::new(index).ok_or(ChessError::InvalidSquareIndex { index })
    }

    /// 从文件、横排编号（均为 0-7）创建
    pub fn from_ids(file_id: u8, rank_id: u8) -> Option<Self> {
        if file_id < BOARD_SIZE && rank_id < BOARD_SIZE {
            Some(Self(rank_id * BOARD_SIZE + file_id))
        } else {
            None
        }
    }

    /// 从文件字母与横排数字创建
    pub fn from_coords(file: char, rank: u8) -> Result<Self, ChessError> {
        let file_id = file_id(file)?;
        let rank_id = rank_id(rank)?;
        Ok(Self(rank_id * BOARD_SIZE + file_id))
    }

    /// 解析两个字符的代数记法，如 `"e3"`
    pub fn parse(text: &str) -> Result<Self, ChessError> {
        let mut chars = text.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => {
                let rank = rank
                    .to_digit(10)
                    .ok_or(ChessError::InvalidRank { rank: 0 })?;
                Self::from_coords(file, rank as u8)
            }
            _ => Err(ChessError::malformed(format!(
                "Square notation must be two characters, got {:?}",
                text
            ))),
        }
    }

    /// 按索引顺序遍历全部 64 个格子
    pub fn all() -> impl Iterator<Item = Square> {
        (0..SQUARE_COUNT as u8).map(Square)
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// 文件编号 0-7
    pub const fn file_id(self) -> u8 {
        self.0 % BOARD_SIZE
    }

    /// 横排编号 0-7
    pub const fn rank_id(self) -> u8 {
        self.0 / BOARD_SIZE
    }

    /// 文件字母（大写）
    pub const fn file(self) -> char {
        (b'A' + self.file_id()) as char
    }

    /// 横排数字 1-8
    pub const fn rank(self) -> u8 {
        self.rank_id() + 1
    }

    /// 所在的存储字节下标
    pub const fn container_index(self) -> usize {
        container_index(self.file_id(), self.rank_id())
    }

    /// 是否存放在字节的高半字节
    pub const fn is_high_nibble(self) -> bool {
        self.file_id() % 2 == 0
    }

    /// 代数记法
    pub const fn notation(self) -> SquareName {
        SquareName([b'a' + self.file_id(), b'1' + self.rank_id()])
    }
}

impl TryFrom<u8> for Square {
    type Error = ChessError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::from_index(index)
    }
}

impl From<Square> for u8 {
    fn from(square: Square) -> u8 {
        square.0
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation())
    }
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// 两字符代数记法，按值返回
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SquareName([u8; 2]);

impl SquareName {
    pub fn as_bytes(&self) -> &[u8; 2] {
        &self.0
    }

    /// 文件字母（小写）
    pub fn file(&self) -> char {
        char::from(self.0[0])
    }

    /// 横排数字字符
    pub fn rank(&self) -> char {
        char::from(self.0[1])
    }
}

impl fmt::Display for SquareName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl PartialEq<str> for SquareName {
    fn eq(&self, other: &str) -> bool {
        other.as_bytes() == self.0
    }
}

impl PartialEq<&str> for SquareName {
    fn eq(&self, other: &&str) -> bool {
        other.as_bytes() == self.0
    }
}
