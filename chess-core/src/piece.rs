//! 棋子定义
//!
//! 每个棋子编码为 4 位：颜色位 (`BLACK` = 0b1000) 与棋子类型 (1-6) 按位或，
//! 0 表示空格子。

use serde::{Deserialize, Serialize};

use crate::constants::EMPTY_SQUARE;
use crate::error::ChessError;

/// 白方颜色位
pub const WHITE: u8 = 0;

/// 黑方颜色位
pub const BLACK: u8 = 0b1000;

/// 取棋子类型的掩码
pub const TYPE_MASK: u8 = 0b0111;

/// 棋子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceType {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl PieceType {
    /// 全部棋子类型
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    /// 子力分值（用于局面点数评估）
    pub fn value(&self) -> u32 {
        match self {
            PieceType::Pawn => 1,
            PieceType::Knight => 3,
            PieceType::Bishop => 3,
            PieceType::Rook => 5,
            PieceType::Queen => 9,
            PieceType::King => 0,
        }
    }

    /// 类型编码 (1-6)
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// 从类型编码解析
    pub fn from_code(code: u8) -> Option<PieceType> {
        PieceType::ALL.into_iter().find(|t| t.code() == code)
    }

    /// 获取 FEN 字符（白方大写，黑方小写）
    pub fn to_fen_char(&self, color: Color) -> char {
        let c = match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<(PieceType, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let piece_type = match c.to_ascii_lowercase() {
            'p' => PieceType::Pawn,
            'n' => PieceType::Knight,
            'b' => PieceType::Bishop,
            'r' => PieceType::Rook,
            'q' => PieceType::Queen,
            'k' => PieceType::King,
            _ => return None,
        };
        Some((piece_type, color))
    }
}

/// 阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Color {
    /// 白方（先手）
    #[default]
    White,
    /// 黑方
    Black,
}

impl Color {
    /// 获取对方阵营
    pub fn opponent(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// 颜色位
    pub fn bit(&self) -> u8 {
        match self {
            Color::White => WHITE,
            Color::Black => BLACK,
        }
    }

    /// 获取 FEN 走子方字符
    pub fn to_fen_char(&self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    /// 从 FEN 走子方字符解析
    pub fn from_fen_char(c: char) -> Option<Color> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }
}

/// 棋子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    /// 创建新棋子
    pub fn new(piece_type: PieceType, color: Color) -> Self {
        Self { piece_type, color }
    }

    /// 4 位棋子编码
    pub fn code(&self) -> u8 {
        self.color.bit() | self.piece_type.code()
    }

    /// 从 4 位编码解析
    ///
    /// 0 为空格子；未定义的编码（7、8、15 以及超过 4 位的值）返回错误。
    pub fn from_code(code: u8) -> Result<Option<Piece>, ChessError> {
        if code == EMPTY_SQUARE {
            return Ok(None);
        }
        if code > (BLACK | TYPE_MASK) {
            return Err(ChessError::InvalidPieceCode { code });
        }
        let color = if code & BLACK != 0 {
            Color::Black
        } else {
            Color::White
        };
        PieceType::from_code(code & TYPE_MASK)
            .map(|piece_type| Some(Piece { piece_type, color }))
            .ok_or(ChessError::InvalidPieceCode { code })
    }

    /// 编码是否为空格子或已定义的棋子
    pub fn is_valid_code(code: u8) -> bool {
        Self::from_code(code).is_ok()
    }

    /// 棋盘图示使用的 Unicode 符号
    pub fn display_char(&self) -> char {
        match (self.piece_type, self.color) {
            (PieceType::King, Color::White) => '♔',
            (PieceType::Queen, Color::White) => '♕',
            (PieceType::Rook, Color::White) => '♖',
            (PieceType::Bishop, Color::White) => '♗',
            (PieceType::Knight, Color::White) => '♘',
            (PieceType::Pawn, Color::White) => '♙',
            (PieceType::King, Color::Black) => '♚',
            (PieceType::Queen, Color::Black) => '♛',
            (PieceType::Rook, Color::Black) => '♜',
            (PieceType::Bishop, Color::Black) => '♝',
            (PieceType::Knight, Color::Black) => '♞',
            (PieceType::Pawn, Color::Black) => '♟',
        }
    }

    /// 获取 FEN 字符
    pub fn to_fen_char(&self) -> char {
        self.piece_type.to_fen_char(self.color)
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<Piece> {
        PieceType::from_fen_char(c).map(|(piece_type, color)| Piece { piece_type, color })
    }

    /// 获取棋子分值
    pub fn value(&self) -> u32 {
        self.piece_type.value()
    }
}
