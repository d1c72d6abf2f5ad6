use super::*;
use crate::board_position;
use crate::evaluate::{is_end_of_game, is_win_score};

fn searchers() -> Vec<Box<dyn Searcher>> {
    vec![
        Box::new(Minimax),
        Box::new(NegaMax),
        Box::new(NegaScout),
        Box::new(Pvs),
        Box::new(Mtdf::seeded(100_003, 64, 17)),
        Box::new(Aspiration::default()),
        Box::new(Aspiration::new(Pvs, 50)),
    ]
}

/// Exact value of every legal column, from the mover's point of view.
fn column_values(board: &Board, to_move: Actor, depth: u8) -> Vec<(usize, i32)> {
    let mut context = SearchContext::new(depth);
    let root = SearchNode::root(board.clone(), to_move);
    root.children(&())
        .map(|child| {
            let value = -NegaMax
                .search_window(&mut context, &child, NEG_INFINITY, INFINITY)
                .score;
            (child.column().unwrap(), value)
        })
        .collect()
}

fn positions() -> Vec<(Board, Actor)> {
    vec![
        (Board::new(4, 4).unwrap(), Actor::AI),
        (
            board_position! {
                ..../
                ..../
                .O../
                AAO.
            },
            Actor::AI,
        ),
        (
            board_position! {
                ..../
                .A../
                .OO./
                AOA.
            },
            Actor::Opponent,
        ),
        (
            board_position! {
                ...../
                ...../
                ..A../
                .OO../
                AOAA.
            },
            Actor::Opponent,
        ),
        (Board::default(), Actor::Opponent),
    ]
}

#[test]
fn test_all_searchers_agree_on_score() {
    for (board, to_move) in positions() {
        let max_depth = if board.capacity() > 25 { 3 } else { 5 };
        for depth in 1..=max_depth {
            let values = column_values(&board, to_move, depth);
            let best = values.iter().map(|(_, value)| *value).max().unwrap();

            for mut searcher in searchers() {
                let mut context = SearchContext::new(depth);
                let decision = searcher.search(&mut context, &board, to_move).unwrap();
                let chosen = values
                    .iter()
                    .find(|(column, _)| *column == decision.column)
                    .map(|(_, value)| *value);

                assert_eq!(
                    decision.score,
                    best,
                    "{} at depth {} on\n{}",
                    searcher.name(),
                    depth,
                    board
                );
                assert_eq!(
                    chosen,
                    Some(best),
                    "{} picked column {} at depth {} on\n{}",
                    searcher.name(),
                    decision.column,
                    depth,
                    board
                );
            }
        }
    }
}

#[test]
fn test_negascout_agrees_at_every_research_threshold() {
    for (board, to_move) in positions() {
        let max_depth = if board.capacity() > 25 { 4 } else { 6 };
        for depth in 1..=max_depth {
            let expected = NegaMax
                .search(&mut SearchContext::new(depth), &board, to_move)
                .unwrap();

            for threshold in 0..=depth + 1 {
                let mut context = SearchContext::new(depth).with_research_threshold(threshold);
                let decision = NegaScout.search(&mut context, &board, to_move).unwrap();
                assert_eq!(
                    decision.score, expected.score,
                    "depth {} threshold {} on\n{}",
                    depth, threshold, board
                );
            }
        }
    }
}

#[test]
fn test_searcher_state_carries_across_calls() {
    for mut searcher in searchers() {
        let mut capacity = None;

        for (board, to_move) in positions() {
            if capacity.map_or(false, |capacity| capacity != board.capacity()) {
                searcher.reinitialize(board.capacity());
            }
            capacity = Some(board.capacity());

            let max_depth = if board.capacity() > 25 { 3 } else { 5 };
            for depth in (1..=max_depth).rev().chain(1..=max_depth) {
                let mut context = SearchContext::new(depth);
                let expected = NegaMax
                    .search(&mut SearchContext::new(depth), &board, to_move)
                    .unwrap();
                let decision = searcher.search(&mut context, &board, to_move).unwrap();
                assert_eq!(
                    decision.score,
                    expected.score,
                    "{} at depth {} on\n{}",
                    searcher.name(),
                    depth,
                    board
                );
            }
        }
    }
}

#[test]
fn test_takes_the_winning_column() {
    let board = board_position! {
        ......./
        ......./
        ......./
        ......./
        ..OO.../
        .OAAA..
    };

    for depth in 1..=4 {
        for mut searcher in searchers() {
            let mut context = SearchContext::new(depth);
            let decision = searcher.search(&mut context, &board, Actor::AI).unwrap();
            assert_eq!(decision.column, 5, "{} at depth {}", searcher.name(), depth);
            assert!(is_win_score(decision.score), "{}", searcher.name());
        }
    }
}

#[test]
fn test_blocks_the_opponents_win() {
    let board = board_position! {
        ......./
        ......./
        ......./
        ......./
        ......A/
        OOO..AA
    };

    for mut searcher in searchers() {
        let mut context = SearchContext::new(2);
        let decision = searcher.search(&mut context, &board, Actor::AI).unwrap();
        assert_eq!(decision.column, 3, "{}", searcher.name());
    }
}

#[test]
fn test_depth_zero_is_rejected() {
    for mut searcher in searchers() {
        let mut context = SearchContext::new(0);
        assert_eq!(
            searcher.search(&mut context, &Board::default(), Actor::AI),
            Err(SearchError::DepthTooLow),
            "{}",
            searcher.name()
        );
    }
}

#[test]
fn test_finished_games_are_rejected() {
    let drawn = board_position! {
        OAOA/
        OAOA/
        AOAO/
        AOAO
    };
    let won = board_position! {
        A.../
        A.../
        A.../
        AOOO
    };

    for board in [drawn, won].iter() {
        for mut searcher in searchers() {
            let mut context = SearchContext::new(3);
            assert_eq!(
                searcher.search(&mut context, board, Actor::Opponent),
                Err(SearchError::InvalidState),
                "{}",
                searcher.name()
            );
        }
        let mut random = RandomColumn::seeded(1);
        let mut context = SearchContext::new(3);
        assert_eq!(
            random.search(&mut context, board, Actor::Opponent),
            Err(SearchError::InvalidState)
        );
    }
}

#[test]
fn test_single_legal_column() {
    let board = board_position! {
        OAO./
        OAOA/
        AOAO/
        AOAO
    };

    for mut searcher in searchers() {
        let mut context = SearchContext::new(4);
        let decision = searcher.search(&mut context, &board, Actor::AI).unwrap();
        assert_eq!(decision.column, 3, "{}", searcher.name());
    }
}

#[test]
fn test_pruning_visits_fewer_positions() {
    let board = Board::default();

    let mut minimax_context = SearchContext::new(4);
    Minimax
        .search(&mut minimax_context, &board, Actor::AI)
        .unwrap();

    let mut negamax_context = SearchContext::new(4);
    NegaMax
        .search(&mut negamax_context, &board, Actor::AI)
        .unwrap();

    assert_eq!(
        minimax_context.stats().searched_position_count(),
        1 + 7 + 49 + 343 + 2401
    );
    assert!(
        negamax_context.stats().searched_position_count()
            < minimax_context.stats().searched_position_count()
    );
    assert!(negamax_context.stats().cutoff_count() > 0);
}

#[test]
fn test_aspiration_follows_a_game() {
    let mut aspiration = Aspiration::default();
    let mut aspiration_context = SearchContext::new(4);
    let mut board = Board::default();

    for opponent_column in [3, 2, 4, 4, 1].iter() {
        board = match board.drop_disc(*opponent_column, Actor::Opponent) {
            Ok((next, _)) => next,
            Err(_) => break,
        };
        if is_end_of_game(&board) {
            break;
        }

        let expected = NegaMax
            .search(&mut SearchContext::new(4), &board, Actor::AI)
            .unwrap();
        let decision = aspiration
            .search(&mut aspiration_context, &board, Actor::AI)
            .unwrap();

        assert_eq!(decision.score, expected.score);
        assert_eq!(aspiration.previous_score(), Some(decision.score));

        board = board.drop_disc(decision.column, Actor::AI).unwrap().0;
        if is_end_of_game(&board) {
            break;
        }
    }
    assert!(aspiration_context.stats().searches() >= 2);

    aspiration.reinitialize(board.capacity());
    assert_eq!(aspiration.previous_score(), None);
}

#[test]
fn test_stats_accumulate_across_searches() {
    let mut context = SearchContext::new(2);
    let board = Board::new(4, 4).unwrap();

    NegaMax.search(&mut context, &board, Actor::AI).unwrap();
    let first = context.stats().searched_position_count();
    NegaMax.search(&mut context, &board, Actor::AI).unwrap();

    assert_eq!(context.stats().searches(), 2);
    assert_eq!(context.stats().searched_position_count(), first);
    assert_eq!(context.stats().mean_position_count(), first as f64);
    assert!(context.stats().last_duration().is_some());

    context.reset_stats();
    assert_eq!(context.stats().searches(), 0);
}

#[test]
fn test_random_column_is_legal() {
    let board = board_position! {
        A.A./
        O.O./
        A.A./
        O.O.
    };
    let mut random = RandomColumn::seeded(9);
    let mut context = SearchContext::new(1);

    for _ in 0..50 {
        let decision = random.search(&mut context, &board, Actor::AI).unwrap();
        assert!(decision.column == 1 || decision.column == 3);
    }
}
