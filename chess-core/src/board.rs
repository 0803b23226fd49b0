//! 棋盘状态
//!
//! 64 个格子压缩在 32 字节中，每个字节存放同一横排相邻的两个格子：
//! 偶数文件在高半字节，奇数文件在低半字节。

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, EMPTY_SQUARE, NIBBLE_MASK, PACKED_BOARD_BYTES};
use crate::error::ChessError;
use crate::piece::{Color, Piece, PieceType};
use crate::square::Square;

/// 标准开局的打包布局
///
/// 等价于 FEN `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`
pub const INITIAL_POSITION: [u8; PACKED_BOARD_BYTES] = [
    0x42, 0x35, 0x63, 0x24, // 1: R N B Q K B N R
    0x11, 0x11, 0x11, 0x11, // 2: P P P P P P P P
    0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, //
    0x99, 0x99, 0x99, 0x99, // 7: p p p p p p p p
    0xCA, 0xBD, 0xEB, 0xAC, // 8: r n b q k b n r
];

/// 打包棋盘
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; 32]", into = "[u8; 32]")]
pub struct Board {
    squares: [u8; PACKED_BOARD_BYTES],
}

impl Board {
    /// 创建空棋盘
    pub const fn empty() -> Self {
        Self {
            squares: [0; PACKED_BOARD_BYTES],
        }
    }

    /// 创建标准开局棋盘
    pub const fn initial() -> Self {
        Self {
            squares: INITIAL_POSITION,
        }
    }

    /// 从原始字节创建，校验每个半字节都是合法编码
    pub fn from_bytes(bytes: [u8; PACKED_BOARD_BYTES]) -> Result<Self, ChessError> {
        for byte in bytes {
            Piece::from_code(byte >> 4)?;
            Piece::from_code(byte & NIBBLE_MASK)?;
        }
        Ok(Self { squares: bytes })
    }

    /// 原始打包字节
    pub fn as_bytes(&self) -> &[u8; PACKED_BOARD_BYTES] {
        &self.squares
    }

    /// 读取格子的 4 位编码
    pub fn code_at(&self, square: Square) -> u8 {
        let byte = self.squares[square.container_index()];
        if square.is_high_nibble() {
            byte >> 4
        } else {
            byte & NIBBLE_MASK
        }
    }

    /// 写入格子的 4 位编码，只改动目标半字节
    pub fn set_code(&mut self, square: Square, code: u8) -> Result<(), ChessError> {
        Piece::from_code(code)?;
        self.write_nibble(square, code);
        Ok(())
    }

    fn write_nibble(&mut self, square: Square, code: u8) {
        let byte = &mut self.squares[square.container_index()];
        if square.is_high_nibble() {
            *byte = (*byte & NIBBLE_MASK) | (code << 4);
        } else {
            *byte = (*byte & !NIBBLE_MASK) | code;
        }
    }

    /// 按文件字母与横排数字读取编码
    pub fn get(&self, file: char, rank: u8) -> Result<u8, ChessError> {
        Ok(self.code_at(Square::from_coords(file, rank)?))
    }

    /// 按文件字母与横排数字写入编码
    ///
    /// 坐标或编码非法时不触碰存储。
    pub fn set(&mut self, file: char, rank: u8, code: u8) -> Result<(), ChessError> {
        let square = Square::from_coords(file, rank)?;
        self.set_code(square, code)
    }

    /// 获取指定格子的棋子
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        // 存储中只会出现合法编码
        Piece::from_code(self.code_at(square)).ok().flatten()
    }

    /// 放置或清除指定格子的棋子
    pub fn put(&mut self, square: Square, piece: Option<Piece>) {
        self.write_nibble(square, piece.map_or(EMPTY_SQUARE, |p| p.code()));
    }

    /// 移动棋子（不检查规则），返回被覆盖的棋子
    pub fn move_piece(&mut self, from: Square, to: Square) -> Option<Piece> {
        let moved = self.code_at(from);
        let captured = self.piece_at(to);
        self.write_nibble(from, EMPTY_SQUARE);
        self.write_nibble(to, moved);
        captured
    }

    /// 获取所有棋子
    pub fn all_pieces(&self) -> Vec<(Square, Piece)> {
        Square::all()
            .filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
            .collect()
    }

    /// 获取指定阵营的所有棋子
    pub fn pieces(&self, color: Color) -> Vec<(Square, Piece)> {
        self.all_pieces()
            .into_iter()
            .filter(|(_, piece)| piece.color == color)
            .collect()
    }

    /// 查找指定阵营的王
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.all_pieces()
            .into_iter()
            .find(|(_, piece)| piece.piece_type == PieceType::King && piece.color == color)
            .map(|(square, _)| square)
    }

    /// 空格子数量
    pub fn empty_count(&self) -> usize {
        Square::all().filter(|&square| self.code_at(square) == EMPTY_SQUARE).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl TryFrom<[u8; PACKED_BOARD_BYTES]> for Board {
    type Error = ChessError;

    fn try_from(bytes: [u8; PACKED_BOARD_BYTES]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl From<Board> for [u8; PACKED_BOARD_BYTES] {
    fn from(board: Board) -> Self {
        board.squares
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank_id in (0..BOARD_SIZE).rev() {
            write!(f, "{} ", rank_id + 1)?;
            for file_id in 0..BOARD_SIZE {
                let square = Square::new_unchecked(rank_id * BOARD_SIZE + file_id);
                let c = self.piece_at(square).map_or('.', |p| p.display_char());
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "  abcdefgh")
    }
}

/// 易位权，四个标志位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: CastlingRights = CastlingRights(0b0001);
    pub const WHITE_QUEENSIDE: CastlingRights = CastlingRights(0b0010);
    pub const BLACK_KINGSIDE: CastlingRights = CastlingRights(0b0100);
    pub const BLACK_QUEENSIDE: CastlingRights = CastlingRights(0b1000);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// FEN 规范顺序 `KQkq`
    pub const FEN_ORDER: [(CastlingRights, char); 4] = [
        (CastlingRights::WHITE_KINGSIDE, 'K'),
        (CastlingRights::WHITE_QUEENSIDE, 'Q'),
        (CastlingRights::BLACK_KINGSIDE, 'k'),
        (CastlingRights::BLACK_QUEENSIDE, 'q'),
    ];

    /// 从标志位创建，含未定义位时返回 None
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::ALL.0 == 0 {
            Some(Self(bits))
        } else {
            None
        }
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: CastlingRights) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: CastlingRights) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: CastlingRights) {
        self.0 &= !other.0;
    }

    /// 从 FEN 易位字符解析
    pub fn from_fen_char(c: char) -> Option<Self> {
        Self::FEN_ORDER
            .into_iter()
            .find(|&(_, letter)| letter == c)
            .map(|(right, _)| right)
    }
}

impl TryFrom<u8> for CastlingRights {
    type Error = String;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Self::from_bits(bits).ok_or_else(|| format!("undefined castling bits {:#06b}", bits))
    }
}

impl From<CastlingRights> for u8 {
    fn from(rights: CastlingRights) -> u8 {
        rights.0
    }
}

/// 完整的局面记录（棋盘、走子方、易位权、过路兵、计数器）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    /// 棋盘
    pub board: Board,
    /// 当前走子方
    pub side_to_move: Color,
    /// FEN 回合数
    pub fullmove_number: u8,
    /// 五十步规则计数（半回合）
    pub halfmove_clock: u8,
    /// 易位权
    pub castling_rights: CastlingRights,
    /// 过路兵目标格
    pub en_passant: Option<Square>,
}

impl BoardState {
    /// 创建空白记录：空棋盘，白方走，所有计数为 0，无易位权
    pub fn blank() -> Self {
        Self {
            board: Board::empty(),
            side_to_move: Color::White,
            fullmove_number: 0,
            halfmove_clock: 0,
            castling_rights: CastlingRights::NONE,
            en_passant: None,
        }
    }

    /// 创建标准开局
    pub fn initial() -> Self {
        Self {
            board: Board::initial(),
            side_to_move: Color::White,
            fullmove_number: 1,
            halfmove_clock: 0,
            castling_rights: CastlingRights::ALL,
            en_passant: None,
        }
    }

    /// 重置为标准开局
    pub fn reset(&mut self) {
        *self = Self::initial();
    }

    /// 合并计数：`2 × 回合数 + (黑方走 ? 1 : 0)`
    pub fn move_counter(&self) -> u16 {
        let side = match self.side_to_move {
            Color::White => 0,
            Color::Black => 1,
        };
        u16::from(self.fullmove_number) * 2 + side
    }

    /// 从合并计数拆分出走子方与回合数
    pub fn set_move_counter(&mut self, counter: u8) {
        self.side_to_move = if counter % 2 == 0 {
            Color::White
        } else {
            Color::Black
        };
        self.fullmove_number = counter / 2;
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::parse(name).unwrap()
    }

    #[test]
    fn test_initial_board() {
        let board = Board::initial();

        assert_eq!(board.get('A', 1).unwrap(), PieceType::Rook.code());
        assert_eq!(board.get('B', 1).unwrap(), PieceType::Knight.code());
        assert_eq!(
            board.get('E', 8).unwrap(),
            Piece::new(PieceType::King, Color::Black).code()
        );
        assert_eq!(
            board.get('H', 8).unwrap(),
            Piece::new(PieceType::Rook, Color::Black).code()
        );
        assert_eq!(board.get('F', 4).unwrap(), EMPTY_SQUARE);
        assert_eq!(board.empty_count(), 32);
    }

    #[test]
    fn test_set_board_value() {
        let mut board = Board::initial();

        let black_king = Piece::new(PieceType::King, Color::Black).code();
        board.set('A', 1, black_king).unwrap();
        assert_eq!(board.get('A', 1).unwrap(), black_king);

        let white_knight = Piece::new(PieceType::Knight, Color::White).code();
        board.set('D', 7, white_knight).unwrap();
        assert_eq!(board.get('D', 7).unwrap(), white_knight);

        board.set('H', 4, EMPTY_SQUARE).unwrap();
        assert_eq!(board.get('H', 4).unwrap(), EMPTY_SQUARE);
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut board = Board::initial();
        let before = board;

        assert_eq!(board.set('J', 1, 1), Err(ChessError::InvalidFile { file: 'J' }));
        assert_eq!(board.set('A', 0, 1), Err(ChessError::InvalidRank { rank: 0 }));
        assert_eq!(
            board.set('A', 1, 0x10),
            Err(ChessError::InvalidPieceCode { code: 0x10 })
        );
        assert_eq!(
            board.set('A', 1, 7),
            Err(ChessError::InvalidPieceCode { code: 7 })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_nibble_isolation() {
        let codes: Vec<u8> = (0..=0x0F).filter(|&c| Piece::is_valid_code(c)).collect();
        assert_eq!(codes.len(), 13);

        for square in Square::all() {
            for &code in &codes {
                let mut board = Board::initial();
                let before = board;
                board.set(square.file(), square.rank(), code).unwrap();
                assert_eq!(board.get(square.file(), square.rank()).unwrap(), code);

                for other in Square::all().filter(|&o| o != square) {
                    assert_eq!(board.code_at(other), before.code_at(other), "{} changed", other);
                }
            }
        }
    }

    #[test]
    fn test_move_piece() {
        let mut board = Board::initial();

        let captured = board.move_piece(sq("e2"), sq("e4"));
        assert!(captured.is_none());
        assert!(board.piece_at(sq("e2")).is_none());
        assert_eq!(
            board.piece_at(sq("e4")),
            Some(Piece::new(PieceType::Pawn, Color::White))
        );
    }

    #[test]
    fn test_find_king() {
        let board = Board::initial();
        assert_eq!(board.find_king(Color::White), Some(sq("e1")));
        assert_eq!(board.find_king(Color::Black), Some(sq("e8")));
        assert_eq!(Board::empty().find_king(Color::White), None);
        assert_eq!(board.pieces(Color::Black).len(), 16);
    }

    #[test]
    fn test_board_from_bytes() {
        assert_eq!(Board::from_bytes(INITIAL_POSITION), Ok(Board::initial()));

        let mut bytes = INITIAL_POSITION;
        bytes[10] = 0x07;
        assert_eq!(
            Board::from_bytes(bytes),
            Err(ChessError::InvalidPieceCode { code: 7 })
        );
    }

    #[test]
    fn test_board_display() {
        let text = Board::initial().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "8 ♜♞♝♛♚♝♞♜");
        assert_eq!(lines[4], "4 ........");
        assert_eq!(lines[7], "1 ♖♘♗♕♔♗♘♖");
        assert_eq!(lines[8], "  abcdefgh");
    }

    #[test]
    fn test_castling_rights() {
        let mut rights = CastlingRights::NONE;
        assert!(rights.is_empty());

        rights.insert(CastlingRights::WHITE_KINGSIDE);
        rights.insert(CastlingRights::BLACK_QUEENSIDE);
        assert!(rights.contains(CastlingRights::WHITE_KINGSIDE));
        assert!(!rights.contains(CastlingRights::WHITE_QUEENSIDE));
        assert_eq!(rights.bits(), 0b1001);

        rights.remove(CastlingRights::WHITE_KINGSIDE);
        assert_eq!(rights, CastlingRights::BLACK_QUEENSIDE);

        assert_eq!(CastlingRights::from_bits(0b1111), Some(CastlingRights::ALL));
        assert_eq!(CastlingRights::from_bits(0b1_0000), None);
        assert_eq!(
            CastlingRights::from_fen_char('q'),
            Some(CastlingRights::BLACK_QUEENSIDE)
        );
        assert_eq!(CastlingRights::from_fen_char('x'), None);
    }

    #[test]
    fn test_initial_state() {
        let state = BoardState::initial();
        assert_eq!(state.board.as_bytes(), &INITIAL_POSITION);
        assert_eq!(state.side_to_move, Color::White);
        assert_eq!(state.halfmove_clock, 0);
        assert_eq!(state.castling_rights, CastlingRights::ALL);
        assert_eq!(state.en_passant, None);
        assert_eq!(state.move_counter(), 2);
    }

    #[test]
    fn test_blank_state() {
        let state = BoardState::blank();
        assert_eq!(state.board.empty_count(), 64);
        assert_eq!(state.move_counter(), 0);
        assert!(state.castling_rights.is_empty());
        assert_eq!(state.en_passant, None);
    }

    #[test]
    fn test_move_counter() {
        let mut state = BoardState::blank();
        state.set_move_counter(45);
        assert_eq!(state.side_to_move, Color::Black);
        assert_eq!(state.fullmove_number, 22);
        assert_eq!(state.move_counter(), 45);

        state.set_move_counter(12);
        assert_eq!(state.side_to_move, Color::White);
        assert_eq!(state.fullmove_number, 6);
    }

    #[test]
    fn test_state_serde() {
        let state = BoardState::initial();
        let json = serde_json::to_string(&state).unwrap();
        let parsed: BoardState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }
}
