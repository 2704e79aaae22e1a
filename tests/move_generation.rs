use caissa::chess::core::Player;
use caissa::chess::game::{Game, Outcome};
use caissa::chess::perft::perft;
use itertools::Itertools;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use shakmaty::{CastlingMode, Chess, Position as ShakmatyPosition};

fn setup(input: &str) -> Game {
    Game::from_fen(input).unwrap_or_else(|e| panic!("parsing legal position {input}: {e}"))
}

fn get_moves(game: &Game) -> Vec<String> {
    game.board()
        .legal_moves_for(game.side_to_move())
        .iter()
        .map(ToString::to_string)
        .sorted()
        .collect()
}

fn sorted_moves(moves: &[&str]) -> Vec<String> {
    moves
        .iter()
        .map(|m| (*m).to_string())
        .sorted()
        .collect()
}

/// Legal moves according to shakmaty with promotions collapsed into a single
/// move (pawns here always become queens). The positions must have neither
/// castling rights nor an en passant square.
fn reference_moves(fen: &str) -> Option<Vec<String>> {
    let setup: shakmaty::fen::Fen = fen.parse().ok()?;
    let position: Chess = setup.into_position(CastlingMode::Standard).ok()?;
    Some(
        position
            .legal_moves()
            .iter()
            .filter_map(|m| m.from().map(|from| format!("{from}{}", m.to())))
            .sorted()
            .dedup()
            .collect(),
    )
}

#[test]
fn starting_moves() {
    assert_eq!(
        get_moves(&Game::new()),
        sorted_moves(&[
            "a2a3", "a2a4", "b1a3", "b1c3", "b2b3", "b2b4", "c2c3", "c2c4", "d2d3", "d2d4", "e2e3",
            "e2e4", "f2f3", "f2f4", "g1f3", "g1h3", "g2g3", "g2g4", "h2h3", "h2h4"
        ])
    );
    assert_eq!(
        get_moves(&setup(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b"
        ))
        .len(),
        20
    );
}

#[test]
fn basic_moves() {
    // Promotions are a single move each: the pawn always becomes a queen.
    assert_eq!(
        get_moves(&setup("2n4k/1PP5/6K1/3Pp1Q1/3N4/3P4/P3R3/8 w - - 0 1")),
        sorted_moves(&[
            "a2a3", "a2a4", "d5d6", "b7b8", "b7c8", "e2e1", "e2e3", "e2e4", "e2e5", "e2b2",
            "e2c2", "e2d2", "e2f2", "e2g2", "e2h2", "d4b3", "d4c2", "d4f3", "d4b5", "d4c6",
            "d4e6", "d4f5", "g5c1", "g5d2", "g5e3", "g5f4", "g5g4", "g5g3", "g5g2", "g5g1",
            "g5h4", "g5e5", "g5f5", "g5h5", "g5h6", "g5f6", "g5e7", "g5d8", "g6f5", "g6h5",
            "g6f6", "g6h6", "g6f7",
        ])
    );
}

#[test]
fn double_check_evasions() {
    assert_eq!(
        get_moves(&setup("3kn3/R2p1N2/8/8/7B/6K1/3R4/8 b - - 0 1")),
        sorted_moves(&["d8c8"])
    );
    assert_eq!(
        get_moves(&setup("8/5Nk1/7p/4Bp2/3q4/8/8/5KR1 b - - 0 1")),
        sorted_moves(&["g7f8", "g7f7", "g7h7"])
    );
}

#[test]
fn check_evasions() {
    assert_eq!(
        get_moves(&setup("3kn3/R2p4/8/6B1/8/6K1/3R4/8 b - - 0 1")),
        sorted_moves(&["e8f6", "d8c8"])
    );
    assert_eq!(
        get_moves(&setup("2R5/8/6k1/8/8/8/PPn5/KR6 w - - 0 1")),
        sorted_moves(&["c8c2"])
    );
}

#[test]
fn pins() {
    // The pawn is pinned by the queen along the diagonal.
    assert_eq!(
        get_moves(&setup("6qk/8/8/3Pp3/8/8/K7/8 w - - 0 1")),
        sorted_moves(&["a2a1", "a2a3", "a2b1", "a2b2", "a2b3"])
    );
    assert_eq!(
        get_moves(&setup("k7/1p6/8/8/8/8/8/4K2B b - - 0 1")),
        sorted_moves(&["a8a7", "a8b8"])
    );
}

#[test]
fn fuzzing_artifact_moves() {
    assert_eq!(
        get_moves(&setup(
            "2r3r1/3p3k/1p3pp1/1B5P/5P2/2P1pqP1/PP4KP/3R4 w - - 0 34"
        )),
        sorted_moves(&["g2g1", "g2f3", "g2h3"])
    );
    assert_eq!(
        get_moves(&setup(
            "2r3r1/3p3k/1p3pp1/1B5p/5P2/2P2pP1/PP4KP/3R4 w - - 0 34"
        )),
        sorted_moves(&["g2f1", "g2f2", "g2f3", "g2g1", "g2h1", "g2h3"])
    );
}

#[test]
fn agrees_with_reference() {
    for fen in [
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w - - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w - - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w - - 1 8",
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        "2n4k/1PP5/6K1/3Pp1Q1/3N4/3P4/P3R3/8 w - - 0 1",
        "3kn3/R2p1N2/8/8/7B/6K1/3R4/8 b - - 0 1",
        "2r3r1/3p3k/1p3pp1/1B5P/5p2/2P1p1P1/PP4KP/3R4 w - - 0 34",
    ] {
        let expected = reference_moves(fen).unwrap_or_else(|| panic!("reference rejected {fen}"));
        assert_eq!(get_moves(&setup(fen)), expected, "{fen}");
    }
}

/// Plays random games and compares every visited position with the reference
/// implementation. Neither castling nor en passant are ever possible in the
/// reference because the position is always passed without those fields.
#[test]
fn random_games_agree_with_reference() {
    const GAMES: usize = 10;
    const MAX_PLIES: usize = 120;

    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..GAMES {
        let mut game = Game::new();
        for _ in 0..MAX_PLIES {
            let fen = format!("{game} - - 0 1");
            let moves = game.board().legal_moves_for(game.side_to_move());
            if let Some(expected) = reference_moves(&fen) {
                assert_eq!(get_moves(&game), expected, "{fen}");
            }
            let Some(mv) = moves.choose(&mut rng) else {
                break;
            };
            let mover = game.side_to_move();
            let outcome = game.apply(mv.from(), mv.to());
            assert!(!game.board().is_in_check(mover), "{fen} {mv}");
            if outcome == Outcome::Checkmate {
                break;
            }
        }
    }
}

#[test]
fn perft_starting_position() {
    let mut game = Game::new();
    assert_eq!(perft(&mut game, 1), 20);
    assert_eq!(perft(&mut game, 2), 400);
    assert_eq!(perft(&mut game, 3), 8902);
    assert_eq!(perft(&mut game, 4), 197_281);
    assert_eq!(game.side_to_move(), Player::White);
    assert_eq!(game.history_len(), 0);
}
