use proptest::{prelude::*, sample::Index};
use rand::{rngs::StdRng, SeedableRng};
use textsweeper::{
    AdjacencyRule, Board, BoardConfig, Cell, GameError, GameState, Position, RevealOutcome,
};

fn fixed_board(
    width: usize,
    height: usize,
    rule: AdjacencyRule,
    mines: &[(usize, usize)],
) -> Board {
    let mines: Vec<Position> = mines.iter().copied().map(Position::from).collect();
    Board::from_mine_positions(&BoardConfig::new(width, height, 0, rule), &mines).unwrap()
}

fn opened_count(board: &Board) -> usize {
    board.cells().filter(|cell| cell.is_opened()).count()
}

#[test]
fn test_two_by_two_single_mine_is_solved_after_three_opens() {
    let mut board = fixed_board(2, 2, AdjacencyRule::Standard, &[(0, 0)]);
    for pos in [(0, 1), (1, 0), (1, 1)] {
        assert!(!board.is_solved());
        board.open(Position::from(pos)).unwrap();
    }
    assert!(board.is_solved());
    assert!(board.is_playing());
    assert_eq!(board.state(), GameState::Won);
}

#[test]
fn test_single_cell_board() {
    let board_config = BoardConfig::new(1, 1, 0, AdjacencyRule::Standard);
    let mut board = Board::new(&board_config).unwrap();
    assert!(!board.is_solved());
    assert_eq!(
        board.open(Position::new(0, 0)),
        Ok(RevealOutcome::Revealed(1))
    );
    assert!(board.is_solved());
}

#[test]
fn test_orthogonal_rule_ignores_diagonal_mine() {
    let board = fixed_board(3, 3, AdjacencyRule::Orthogonal, &[(1, 1)]);
    assert_eq!(board.count_mines(Position::new(0, 0)), Ok(0));
}

#[test]
fn test_large_empty_board_cascades_without_recursion() {
    for (rule, expected) in [
        (AdjacencyRule::Standard, 400 * 400),
        (AdjacencyRule::Orthogonal, 400 * 400),
        (AdjacencyRule::Knight, 400 * 400),
        // Diagonal moves never change the colour of a checkerboard square.
        (AdjacencyRule::Diagonal, 400 * 400 / 2),
    ] {
        let mut board = Board::new(&BoardConfig::new(400, 400, 0, rule)).unwrap();
        assert_eq!(
            board.open(Position::new(0, 0)),
            Ok(RevealOutcome::Revealed(expected)),
            "{rule}"
        );
        assert_eq!(opened_count(&board), expected);
        assert_eq!(board.is_solved(), rule != AdjacencyRule::Diagonal);
    }
}

#[test]
fn test_cascade_does_not_chord_through_opened_cells() {
    let mut board = fixed_board(6, 1, AdjacencyRule::Standard, &[(0, 5)]);
    board.open(Position::new(0, 4)).unwrap();
    // Misplaced flag: if the cascade chorded (0, 4) it would detonate (0, 5).
    board.toggle_flag(Position::new(0, 3)).unwrap();

    assert_eq!(
        board.open(Position::new(0, 0)),
        Ok(RevealOutcome::Revealed(4))
    );
    assert!(board.is_playing());
    assert!(!board.cell(Position::new(0, 5)).unwrap().is_opened());

    // The engine never clears flags on its own.
    let flagged = board.cell(Position::new(0, 3)).unwrap();
    assert!(flagged.is_opened() && flagged.is_flagged());
    assert_eq!(board.display_char(Position::new(0, 3)), Ok('0'));
}

#[test]
fn test_chord_opens_exactly_unflagged_closed_neighbors() {
    let mut board = fixed_board(5, 1, AdjacencyRule::Standard, &[(0, 0), (0, 4)]);
    board.open(Position::new(0, 1)).unwrap();
    board.toggle_flag(Position::new(0, 0)).unwrap();

    assert_eq!(
        board.chord(Position::new(0, 1)),
        Ok(RevealOutcome::Revealed(2))
    );
    assert!(!board.cell(Position::new(0, 0)).unwrap().is_opened());
    assert!(!board.cell(Position::new(0, 4)).unwrap().is_opened());
    assert_eq!(board.state(), GameState::Won);
}

#[test]
fn test_loss_freezes_board() {
    let mut board = fixed_board(3, 3, AdjacencyRule::Knight, &[(0, 0)]);
    assert_eq!(
        board.open(Position::new(0, 0)),
        Ok(RevealOutcome::HitMine(Position::new(0, 0)))
    );
    for row in 0..3 {
        for col in 0..3 {
            assert_eq!(
                board.open(Position::new(row, col)),
                Ok(RevealOutcome::NoChange)
            );
        }
    }
    assert_eq!(opened_count(&board), 0);
    assert!(!board.is_solved());
    assert_eq!(board.state(), GameState::Lost);
}

#[test]
fn test_errors() {
    let mut board = fixed_board(3, 3, AdjacencyRule::Standard, &[]);
    assert_eq!(
        board.open(Position::new(3, 3)),
        Err(GameError::OutOfBounds(Position::new(3, 3)))
    );
    assert!(matches!(
        Board::new(&BoardConfig::new(3, 3, 10, AdjacencyRule::Standard)),
        Err(GameError::InvalidConfiguration(_))
    ));
    assert_eq!(
        "queen".parse::<AdjacencyRule>(),
        Err(GameError::UnknownAdjacencyRule("queen".to_string()))
    );
}

fn rule_strategy() -> impl Strategy<Value = AdjacencyRule> {
    prop::sample::select(AdjacencyRule::ALL.to_vec())
}

fn board_strategy() -> impl Strategy<Value = (BoardConfig, u64)> {
    (1usize..12, 1usize..12, rule_strategy())
        .prop_flat_map(|(width, height, rule)| {
            (
                Just(width),
                Just(height),
                0..=width * height,
                Just(rule),
                any::<u64>(),
            )
        })
        .prop_map(|(width, height, mines, rule, seed)| {
            (BoardConfig::new(width, height, mines, rule), seed)
        })
}

fn seeded(config: &BoardConfig, seed: u64) -> Board {
    Board::with_rng(config, &mut StdRng::seed_from_u64(seed)).unwrap()
}

proptest! {
    #[test]
    fn prop_exact_mine_count((config, seed) in board_strategy()) {
        let board = seeded(&config, seed);
        prop_assert_eq!(board.mine_count(), config.mines);
        prop_assert_eq!(board.cells().filter(|cell| cell.is_mine()).count(), config.mines);
        prop_assert!(board.is_playing());
    }

    #[test]
    fn prop_neighbors_in_bounds_and_symmetric((config, seed) in board_strategy()) {
        let board = seeded(&config, seed);
        for cell in board.cells() {
            let pos = cell.position();
            let neighbors = board.neighbors(pos).unwrap();
            prop_assert!(neighbors.len() <= config.rule.offsets().len());
            for next in neighbors {
                prop_assert!(board.contains(next));
                prop_assert!(board.neighbors(next).unwrap().contains(&pos));
            }
        }
    }

    #[test]
    fn prop_cascade_is_closed((config, seed) in board_strategy(), pick in any::<Index>()) {
        let mut board = seeded(&config, seed);
        let safe: Vec<Position> = board
            .cells()
            .filter(|cell| !cell.is_mine())
            .map(Cell::position)
            .collect();
        prop_assume!(!safe.is_empty());
        let start = safe[pick.index(safe.len())];

        let outcome = board.open(start).unwrap();
        prop_assert_eq!(outcome, RevealOutcome::Revealed(opened_count(&board)));
        prop_assert!(board.is_playing());

        for cell in board.cells().filter(|cell| cell.is_opened()) {
            let pos = cell.position();
            prop_assert!(!cell.is_mine());
            if board.count_mines(pos).unwrap() == 0 {
                for next in board.neighbors(pos).unwrap() {
                    prop_assert!(board.cell(next).unwrap().is_opened());
                }
            }
            if pos != start {
                let reached_from_zero = board.neighbors(pos).unwrap().into_iter().any(|next| {
                    board.cell(next).unwrap().is_opened() && board.count_mines(next).unwrap() == 0
                });
                prop_assert!(reached_from_zero);
            }
        }
    }

    #[test]
    fn prop_flag_toggle_round_trips((config, seed) in board_strategy(), pick in any::<Index>()) {
        let mut board = seeded(&config, seed);
        let cells: Vec<Position> = board.cells().map(Cell::position).collect();
        let pos = cells[pick.index(cells.len())];
        prop_assume!(board.state() == GameState::Playing);

        board.toggle_flag(pos).unwrap();
        prop_assert!(board.cell(pos).unwrap().is_flagged());
        board.toggle_flag(pos).unwrap();
        prop_assert!(!board.cell(pos).unwrap().is_flagged());
    }
}
