//! FEN 格式解析和生成
//!
//! 国际象棋 FEN 格式（六个字段，单个空格分隔）：
//! `<棋盘> <走子方> <易位权> <过路兵> <半回合计数> <回合数>`
//!
//! 示例：
//! `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1`
//!
//! 解析严格按规范格式进行：字段之间只能有一个空格，数字必须是最短十进制形式。
//! 对这类输入，`encode(decode(s)) == s` 逐字节成立。

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::board::{Board, BoardState, CastlingRights};
use crate::constants::{BOARD_SIZE, FEN_NOTATION_LENGTH};
use crate::decimal::{push_unsigned, scan_unsigned};
use crate::error::ChessError;
use crate::piece::{Color, Piece};
use crate::square::Square;

/// 初始局面 FEN
pub const INITIAL_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// FEN 字段数
const FIELD_COUNT: usize = 6;

/// FEN 格式处理
pub struct Fen;

impl Fen {
    /// 解析 FEN 字符串为局面记录
    pub fn decode(fen: &str) -> Result<BoardState, ChessError> {
        let result = Self::decode_fields(fen);
        if let Err(ref e) = result {
            debug!("Rejected FEN {:?}: {}", fen, e);
        }
        result
    }

    fn decode_fields(fen: &str) -> Result<BoardState, ChessError> {
        let fields: Vec<&str> = fen.split(' ').collect();
        if fields.len() != FIELD_COUNT {
            return Err(ChessError::malformed(format!(
                "Expected {} space-separated fields, got {}",
                FIELD_COUNT,
                fields.len()
            )));
        }

        Ok(BoardState {
            board: Self::parse_board(fields[0])?,
            side_to_move: Self::parse_side(fields[1])?,
            castling_rights: Self::parse_castling(fields[2])?,
            en_passant: Self::parse_en_passant(fields[3])?,
            halfmove_clock: Self::parse_counter(fields[4], "halfmove clock")?,
            fullmove_number: Self::parse_counter(fields[5], "fullmove number")?,
        })
    }

    /// 解析棋盘部分
    fn parse_board(board_str: &str) -> Result<Board, ChessError> {
        let mut board = Board::empty();
        let rows: Vec<&str> = board_str.split('/').collect();

        if rows.len() != BOARD_SIZE as usize {
            return Err(ChessError::malformed(format!(
                "Expected 8 ranks, got {}",
                rows.len()
            )));
        }

        // FEN 从上到下是第 8 排到第 1 排
        for (row_idx, row) in rows.iter().enumerate() {
            let rank_id = BOARD_SIZE - 1 - row_idx as u8;
            let mut file_id = 0u8;

            for c in row.chars() {
                if let Some(empty_count) = c.to_digit(10) {
                    if !(1..=BOARD_SIZE as u32).contains(&empty_count) {
                        return Err(ChessError::malformed(format!(
                            "Invalid empty-square run: {}",
                            c
                        )));
                    }
                    // 新棋盘本身为空，只需前移
                    file_id += empty_count as u8;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    if file_id < BOARD_SIZE {
                        board.put(Square::new_unchecked(rank_id * BOARD_SIZE + file_id), Some(piece));
                    }
                    file_id += 1;
                } else {
                    return Err(ChessError::malformed(format!(
                        "Invalid piece character: {:?}",
                        c
                    )));
                }

                if file_id > BOARD_SIZE {
                    return Err(ChessError::malformed(format!(
                        "Rank {} has too many files",
                        rank_id + 1
                    )));
                }
            }

            if file_id != BOARD_SIZE {
                return Err(ChessError::malformed(format!(
                    "Rank {} has {} files, expected 8",
                    rank_id + 1,
                    file_id
                )));
            }
        }

        Ok(board)
    }

    fn parse_side(field: &str) -> Result<Color, ChessError> {
        let mut chars = field.chars();
        match (chars.next().and_then(Color::from_fen_char), chars.next()) {
            (Some(color), None) => Ok(color),
            _ => Err(ChessError::malformed(format!(
                "Invalid side to move: {:?}",
                field
            ))),
        }
    }

    /// 易位权接受任意顺序，生成时总是 `KQkq` 顺序
    fn parse_castling(field: &str) -> Result<CastlingRights, ChessError> {
        if field == "-" {
            return Ok(CastlingRights::NONE);
        }
        if field.is_empty() {
            return Err(ChessError::malformed("Empty castling field"));
        }

        let mut rights = CastlingRights::NONE;
        for c in field.chars() {
            let right = CastlingRights::from_fen_char(c).ok_or_else(|| {
                ChessError::malformed(format!("Invalid castling character: {:?}", c))
            })?;
            rights.insert(right);
        }
        Ok(rights)
    }

    fn parse_en_passant(field: &str) -> Result<Option<Square>, ChessError> {
        if field == "-" {
            return Ok(None);
        }
        Square::parse(field).map(Some).map_err(|e| {
            ChessError::malformed(format!("Invalid en passant square {:?}: {}", field, e))
        })
    }

    /// 解析计数字段，整个字段必须都是数字
    fn parse_counter(field: &str, name: &str) -> Result<u8, ChessError> {
        let (value, digits) = scan_unsigned(field, 0)?;
        if digits == 0 || digits != field.len() {
            return Err(ChessError::malformed(format!(
                "Invalid {}: {:?}",
                name, field
            )));
        }
        Ok(value)
    }

    /// 将局面记录转换为 FEN 字符串
    pub fn encode(state: &BoardState) -> String {
        let mut fen = String::with_capacity(FEN_NOTATION_LENGTH);

        Self::push_board(&mut fen, &state.board);

        fen.push(' ');
        fen.push(state.side_to_move.to_fen_char());

        fen.push(' ');
        if state.castling_rights.is_empty() {
            fen.push('-');
        } else {
            for (right, letter) in CastlingRights::FEN_ORDER {
                if state.castling_rights.contains(right) {
                    fen.push(letter);
                }
            }
        }

        fen.push(' ');
        match state.en_passant {
            Some(square) => {
                let name = square.notation();
                fen.push(name.file());
                fen.push(name.rank());
            }
            None => fen.push('-'),
        }

        fen.push(' ');
        push_unsigned(&mut fen, state.halfmove_clock);
        fen.push(' ');
        push_unsigned(&mut fen, state.fullmove_number);

        fen
    }

    /// 将 FEN 写入调用方提供的缓冲区，末尾加 `\0`
    ///
    /// 返回写入的字节数（含结束符）。空间不足时直接拒绝，不写入任何内容。
    pub fn encode_into(state: &BoardState, buffer: &mut [u8]) -> Result<usize, ChessError> {
        let fen = Self::encode(state);
        let needed = fen.len() + 1;
        if buffer.len() < needed {
            return Err(ChessError::BufferTooSmall {
                needed,
                capacity: buffer.len(),
            });
        }

        buffer[..fen.len()].copy_from_slice(fen.as_bytes());
        buffer[fen.len()] = 0;
        Ok(needed)
    }

    /// 将棋盘转换为 FEN 棋盘部分
    pub fn board_to_string(board: &Board) -> String {
        let mut out = String::with_capacity(FEN_NOTATION_LENGTH);
        Self::push_board(&mut out, board);
        out
    }

    fn push_board(out: &mut String, board: &Board) {
        for rank_id in (0..BOARD_SIZE).rev() {
            let mut empty_count = 0u8;

            for file_id in 0..BOARD_SIZE {
                let square = Square::new_unchecked(rank_id * BOARD_SIZE + file_id);
                if let Some(piece) = board.piece_at(square) {
                    if empty_count > 0 {
                        push_unsigned(out, empty_count);
                        empty_count = 0;
                    }
                    out.push(piece.to_fen_char());
                } else {
                    empty_count += 1;
                }
            }

            if empty_count > 0 {
                push_unsigned(out, empty_count);
            }
            if rank_id > 0 {
                out.push('/');
            }
        }
    }
}

impl BoardState {
    /// 从 FEN 载入局面，失败时保持原记录不变
    pub fn load_fen(&mut self, fen: &str) -> Result<(), ChessError> {
        *self = Fen::decode(fen)?;
        Ok(())
    }

    /// 生成 FEN 字符串
    pub fn to_fen(&self) -> String {
        Fen::encode(self)
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Fen::encode(self))
    }
}

impl FromStr for BoardState {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fen::decode(s)
    }
}
