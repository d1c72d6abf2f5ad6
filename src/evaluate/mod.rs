use crate::board::{Actor, Board};
use crate::searcher::node::{NodePayload, SearchNode};

pub use crate::board::WIN_THRESHOLD;

/// Multiplier applied to the raw connection strength so that depth bonuses
/// stay integral.
pub const SCORE_SCALE: i32 = 100;

/// Smallest magnitude of a score that reflects a decided game. Heuristic
/// (undecided) leaves always score strictly below this.
pub const WIN_SCORE: i32 = WIN_THRESHOLD * SCORE_SCALE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnding {
    Win(Actor),
    Draw,
}

/// Returns the game ending state if the game has ended, otherwise returns None.
pub fn game_ending(board: &Board) -> Option<GameEnding> {
    for actor in Actor::ALL.iter() {
        if board.has_connection(*actor) {
            return Some(GameEnding::Win(*actor));
        }
    }

    if board.is_draw() {
        return Some(GameEnding::Draw);
    }

    None
}

#[inline]
pub fn is_end_of_game(board: &Board) -> bool {
    game_ending(board).is_some()
}

/// Static score of `board` from `actor`'s point of view. The stronger side's
/// best partial connection decides the sign; level positions and drawn
/// boards score zero.
pub fn score(board: &Board, actor: Actor) -> i32 {
    let own = board.evaluate(actor);
    let other = board.evaluate(actor.opposite());

    if own == other || (board.is_draw() && own < WIN_THRESHOLD && other < WIN_THRESHOLD) {
        return 0;
    }

    if own > other {
        own * SCORE_SCALE
    } else {
        -other * SCORE_SCALE
    }
}

/// Converts a raw score, taken from the root actor's point of view, into the
/// point of view of the actor to move at a node `ply_from_root` plies deep.
/// The result is scaled by `remaining_depth + 1` so that earlier wins and
/// later losses are preferred.
///
/// Flipping at odd plies is the same as flipping once when the remaining
/// depth is odd and again when the configured depth is odd, since
/// `remaining + configured = 2 * configured - ply`.
pub fn normalize(raw_score: i32, ply_from_root: u8, configured_depth: u8) -> i32 {
    let remaining_depth = configured_depth.saturating_sub(ply_from_root) as i32;
    let signed = if ply_from_root % 2 == 1 {
        -raw_score
    } else {
        raw_score
    };
    signed * (remaining_depth + 1)
}

/// Normalized score of a leaf or terminal search node.
pub fn leaf_score<P: NodePayload>(node: &SearchNode<P>, configured_depth: u8) -> i32 {
    let raw_score = score(node.board(), node.root_actor());
    normalize(raw_score, node.ply(), configured_depth)
}

#[inline]
pub fn is_win_score(score: i32) -> bool {
    score.abs() >= WIN_SCORE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board_position;

    #[test]
    fn test_normalize_flips_sign_at_odd_plies() {
        assert_eq!(normalize(300, 0, 4), 1500);
        assert_eq!(normalize(300, 1, 4), -1200);
        assert_eq!(normalize(300, 2, 4), 900);
        assert_eq!(normalize(-300, 3, 4), 600);
        assert_eq!(normalize(300, 4, 4), 300);
    }

    #[test]
    fn test_normalize_matches_remaining_depth_parity() {
        for configured in 1..8u8 {
            for ply in 0..=configured {
                let remaining = configured - ply;
                let mut expected = 250 * (remaining as i32 + 1);
                if remaining % 2 == 1 {
                    expected = -expected;
                }
                if configured % 2 == 1 {
                    expected = -expected;
                }
                assert_eq!(normalize(250, ply, configured), expected);
            }
        }
    }

    #[test]
    fn test_score_prefers_the_stronger_side() {
        let board = board_position! {
            ......./
            ......./
            ......./
            ......./
            ......./
            ..AAA.O
        };
        assert_eq!(score(&board, Actor::AI), 500);
        assert_eq!(score(&board, Actor::Opponent), -500);
    }

    #[test]
    fn test_score_of_a_win() {
        let board = board_position! {
            ....../
            ....../
            O...../
            O...../
            O..A../
            O..AA.
        };
        assert_eq!(score(&board, Actor::Opponent), WIN_SCORE);
        assert_eq!(score(&board, Actor::AI), -WIN_SCORE);
        assert_eq!(game_ending(&board), Some(GameEnding::Win(Actor::Opponent)));
    }

    #[test]
    fn test_drawn_board_scores_zero() {
        let board = board_position! {
            OAOA/
            OAOA/
            AOAO/
            AOAO
        };
        assert_eq!(score(&board, Actor::AI), 0);
        assert_eq!(game_ending(&board), Some(GameEnding::Draw));
    }

    #[test]
    fn test_empty_board_is_level() {
        let board = Board::default();
        assert_eq!(score(&board, Actor::AI), 0);
        assert_eq!(game_ending(&board), None);
    }
}
