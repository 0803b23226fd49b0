//! 棋子移动
//!
//! 只做无条件的搬移：起点清空，终点被覆盖（吃子）。不检查规则、走子方或将军。

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::board::Board;
use crate::error::ChessError;
use crate::piece::Piece;
use crate::square::Square;

/// 一次搬移
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Movement {
    pub from: Square,
    pub to: Square,
}

impl Movement {
    /// 创建新搬移
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// 从线性索引创建
    pub fn from_indices(from_index: u8, to_index: u8) -> Result<Self, ChessError> {
        Ok(Self {
            from: Square::from_index(from_index)?,
            to: Square::from_index(to_index)?,
        })
    }

    /// 在棋盘上执行，返回被覆盖的棋子
    pub fn apply(&self, board: &mut Board) -> Option<Piece> {
        let captured = board.move_piece(self.from, self.to);
        trace!("Moved {} -> {} (captured: {:?})", self.from, self.to, captured);
        captured
    }
}

/// 按线性索引搬移棋子，索引越界时不触碰棋盘
pub fn apply(board: &mut Board, from_index: u8, to_index: u8) -> Result<Option<Piece>, ChessError> {
    Ok(Movement::from_indices(from_index, to_index)?.apply(board))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::EMPTY_SQUARE;
    use crate::fen::Fen;
    use crate::piece::{Color, PieceType};
    use crate::square::square_index;

    #[test]
    fn test_perform_movement() {
        let mut board = Board::initial();

        let from = square_index('A', 2).unwrap();
        let to = square_index('A', 3).unwrap();
        assert_eq!(apply(&mut board, from, to).unwrap(), None);

        assert_eq!(board.get('A', 2).unwrap(), EMPTY_SQUARE);
        assert_eq!(
            board.get('A', 3).unwrap(),
            Piece::new(PieceType::Pawn, Color::White).code()
        );

        let from = square_index('D', 7).unwrap();
        let to = square_index('D', 6).unwrap();
        apply(&mut board, from, to).unwrap();

        assert_eq!(board.get('D', 7).unwrap(), EMPTY_SQUARE);
        assert_eq!(
            board.get('D', 6).unwrap(),
            Piece::new(PieceType::Pawn, Color::Black).code()
        );
    }

    #[test]
    fn test_movement_captures() {
        let mut state =
            Fen::decode("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2").unwrap();

        let movement = Movement::new(Square::parse("e4").unwrap(), Square::parse("d5").unwrap());
        let captured = movement.apply(&mut state.board);

        assert_eq!(captured, Some(Piece::new(PieceType::Pawn, Color::Black)));
        assert_eq!(
            state.board.piece_at(movement.to),
            Some(Piece::new(PieceType::Pawn, Color::White))
        );
        assert_eq!(state.board.piece_at(movement.from), None);
        assert_eq!(state.board.pieces(Color::Black).len(), 15);
        assert_eq!(
            Fen::board_to_string(&state.board),
            "rnbqkbnr/ppp1pppp/8/3P4/8/8/PPPP1PPP/RNBQKBNR"
        );
    }

    #[test]
    fn test_movement_from_empty_square() {
        let mut board = Board::initial();
        let captured = apply(&mut board, square_index('E', 4).unwrap(), square_index('E', 2).unwrap())
            .unwrap();

        // 空格子"移动"后终点被清空
        assert_eq!(captured, Some(Piece::new(PieceType::Pawn, Color::White)));
        assert_eq!(board.get('E', 2).unwrap(), EMPTY_SQUARE);
    }

    #[test]
    fn test_movement_out_of_range() {
        let mut board = Board::initial();
        assert_eq!(
            apply(&mut board, 8, 64),
            Err(ChessError::InvalidSquareIndex { index: 64 })
        );
        assert_eq!(board, Board::initial());
    }
}
