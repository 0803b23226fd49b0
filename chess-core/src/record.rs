//! 二进制局面记录
//!
//! 36 字节定长格式，字段依次为：
//! `board[32]`、`move_counter`、`halfmove_clock`、`castling_rights`、`ep_target_square_index`。
//! `move_counter = 2 × 回合数 + (黑方走 ? 1 : 0)`，无过路兵时为 255。
//! 与按字段顺序逐字节转储得到的 `.pcgpf` 文件兼容。

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardState, CastlingRights};
use crate::constants::{NO_EN_PASSANT, PACKED_BOARD_BYTES, RECORD_LENGTH};
use crate::error::{RecordError, Result};
use crate::square::Square;

/// 磁盘上的原始布局
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct RawRecord {
    board: [u8; PACKED_BOARD_BYTES],
    move_counter: u8,
    halfmove_clock: u8,
    castling_rights: u8,
    ep_target_square_index: u8,
}

impl TryFrom<&BoardState> for RawRecord {
    type Error = RecordError;

    fn try_from(state: &BoardState) -> Result<Self> {
        let move_counter =
            u8::try_from(state.move_counter()).map_err(|_| RecordError::MoveCounterOverflow {
                fullmove_number: state.fullmove_number,
            })?;

        Ok(Self {
            board: *state.board.as_bytes(),
            move_counter,
            halfmove_clock: state.halfmove_clock,
            castling_rights: state.castling_rights.bits(),
            ep_target_square_index: state.en_passant.map_or(NO_EN_PASSANT, Square::index),
        })
    }
}

impl TryFrom<RawRecord> for BoardState {
    type Error = RecordError;

    fn try_from(raw: RawRecord) -> Result<Self> {
        let castling_rights = CastlingRights::from_bits(raw.castling_rights).ok_or(
            RecordError::InvalidField {
                field: "castling_rights",
                value: raw.castling_rights,
            },
        )?;
        let en_passant = match raw.ep_target_square_index {
            NO_EN_PASSANT => None,
            index => Some(Square::from_index(index)?),
        };

        let mut state = BoardState {
            board: Board::from_bytes(raw.board)?,
            halfmove_clock: raw.halfmove_clock,
            castling_rights,
            en_passant,
            ..BoardState::blank()
        };
        state.set_move_counter(raw.move_counter);
        Ok(state)
    }
}

impl BoardState {
    /// 编码为 36 字节的二进制记录
    pub fn to_record_bytes(&self) -> Result<Vec<u8>> {
        let raw = RawRecord::try_from(self)?;
        Ok(bincode::serialize(&raw)?)
    }

    /// 从二进制记录解码，校验每个字段
    pub fn from_record_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != RECORD_LENGTH {
            return Err(RecordError::LengthMismatch {
                expected: RECORD_LENGTH,
                actual: bytes.len(),
            });
        }
        let raw: RawRecord = bincode::deserialize(bytes)?;
        BoardState::try_from(raw)
    }

    /// 写入二进制记录
    pub fn write_record<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(&self.to_record_bytes()?)?;
        Ok(())
    }

    /// 读取一条二进制记录
    pub fn read_record<R: Read>(mut reader: R) -> Result<Self> {
        let mut buffer = [0u8; RECORD_LENGTH];
        reader.read_exact(&mut buffer)?;
        Self::from_record_bytes(&buffer)
    }
}
