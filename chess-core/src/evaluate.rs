//! 子力点数评估

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::piece::Color;

/// 双方子力点数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Evaluation {
    pub white_points: u32,
    pub black_points: u32,
}

impl Evaluation {
    /// 白方视角的差值，正值对白方有利
    pub fn balance(&self) -> i64 {
        i64::from(self.white_points) - i64::from(self.black_points)
    }

    /// 指定阵营的点数
    pub fn points(&self, color: Color) -> u32 {
        match color {
            Color::White => self.white_points,
            Color::Black => self.black_points,
        }
    }
}

/// 评估器
pub struct Evaluator;

impl Evaluator {
    /// 累加棋盘上双方的子力分值
    pub fn evaluate(board: &Board) -> Evaluation {
        let mut evaluation = Evaluation::default();

        for (_, piece) in board.all_pieces() {
            match piece.color {
                Color::White => evaluation.white_points += piece.value(),
                Color::Black => evaluation.black_points += piece.value(),
            }
        }

        evaluation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;
    use crate::piece::PieceType;

    #[test]
    fn test_initial_evaluation() {
        let expected = 8 * PieceType::Pawn.value()
            + 2 * PieceType::Rook.value()
            + 2 * PieceType::Knight.value()
            + 2 * PieceType::Bishop.value()
            + PieceType::Queen.value()
            + PieceType::King.value();

        let evaluation = Evaluator::evaluate(&Board::initial());
        assert_eq!(evaluation.white_points, expected);
        assert_eq!(evaluation.black_points, expected);
        assert_eq!(evaluation.white_points, 39);
        assert_eq!(evaluation.balance(), 0);
    }

    #[test]
    fn test_material_imbalance() {
        let state = Fen::decode("2k5/pp4pp/8/2p2n2/8/1P2QN2/P3NPPK/1q6 w - - 6 26").unwrap();
        let evaluation = Evaluator::evaluate(&state.board);

        // 白：后 + 两马 + 四兵；黑：后 + 马 + 五兵
        assert_eq!(evaluation.points(Color::White), 9 + 3 + 3 + 4);
        assert_eq!(evaluation.points(Color::Black), 9 + 3 + 5);
        assert_eq!(evaluation.balance(), 2);
    }

    #[test]
    fn test_empty_board() {
        assert_eq!(Evaluator::evaluate(&Board::empty()), Evaluation::default());
    }
}
