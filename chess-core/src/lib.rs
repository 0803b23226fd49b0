//! 国际象棋局面核心库
//!
//! 包含:
//! - 紧凑的 32 字节打包棋盘与局面记录
//! - 坐标转换（文件/横排、线性索引、代数记法）
//! - FEN 解析与生成（逐字节往返）
//! - 小整数十进制编解码
//! - 无条件棋子搬移、子力点数评估
//! - 36 字节二进制局面记录

mod board;
mod constants;
mod decimal;
mod error;
mod evaluate;
mod fen;
mod movement;
mod piece;
mod record;
mod square;

pub use board::{Board, BoardState, CastlingRights, INITIAL_POSITION};
pub use constants::*;
pub use decimal::{read_unsigned, scan_unsigned, write_unsigned};
pub use error::{ChessError, RecordError, Result};
pub use evaluate::{Evaluation, Evaluator};
pub use fen::{Fen, INITIAL_FEN};
pub use movement::{apply as apply_movement, Movement};
pub use piece::{Color, Piece, PieceType, BLACK, TYPE_MASK, WHITE};
pub use square::{container_index, file_id, notation, rank_id, square_index, Square, SquareName};
