//! PGN read/write utilities for game history interchange.
//!
//! Writing emits the Seven Tag Roster in canonical order followed by
//! numbered SAN movetext. Reading replays movetext on a fresh session and is
//! best-effort: a token that cannot be resolved is recorded and skipped, and
//! replay continues with the next token.

use tracing::{debug, warn};

use crate::chess_errors::{ChessError, ChessResult};
use crate::game::chess_game::{ChessGame, MoveOutcome};
use crate::game_state::chess_types::PieceKind;
use crate::game_state::game_state::GameState;

pub const SEVEN_TAG_ROSTER: [&str; 7] = ["Event", "Site", "Date", "Round", "White", "Black", "Result"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgnTags {
    pub event: String,
    pub site: String,
    pub date: String,
    pub round: String,
    pub white: String,
    pub black: String,
    pub result: String,
}

impl Default for PgnTags {
    fn default() -> Self {
        Self {
            event: "Casual Game".to_owned(),
            site: "Local".to_owned(),
            date: chrono::Local::now().format("%Y.%m.%d").to_string(),
            round: "-".to_owned(),
            white: "White".to_owned(),
            black: "Black".to_owned(),
            result: "*".to_owned(),
        }
    }
}

impl PgnTags {
    /// Tags in Seven Tag Roster order.
    pub fn pairs(&self) -> [(&'static str, &str); 7] {
        [
            (SEVEN_TAG_ROSTER[0], self.event.as_str()),
            (SEVEN_TAG_ROSTER[1], self.site.as_str()),
            (SEVEN_TAG_ROSTER[2], self.date.as_str()),
            (SEVEN_TAG_ROSTER[3], self.round.as_str()),
            (SEVEN_TAG_ROSTER[4], self.white.as_str()),
            (SEVEN_TAG_ROSTER[5], self.black.as_str()),
            (SEVEN_TAG_ROSTER[6], normalize_result(&self.result)),
        ]
    }
}

/// One movetext token that could not be replayed.
#[derive(Debug)]
pub struct ReplayError {
    /// 1-based index of the token among the move tokens.
    pub ply: usize,
    pub token: String,
    pub error: ChessError,
}

#[derive(Debug)]
pub struct PgnGame {
    /// Tag pairs in file order.
    pub tags: Vec<(String, String)>,
    pub game: ChessGame,
    pub result: String,
    pub replay_errors: Vec<ReplayError>,
}

impl PgnGame {
    pub fn tag(&self, key: &str) -> Option<&str> {
        find_tag(&self.tags, key)
    }
}

pub fn write_pgn(game: &ChessGame, tags: &PgnTags) -> String {
    let mut out = String::new();

    for (key, value) in tags.pairs() {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    let initial = game.initial_state();
    if *initial != GameState::new_game() {
        out.push_str("[SetUp \"1\"]\n");
        out.push_str(&format!("[FEN \"{}\"]\n", initial.get_fen()));
    }
    out.push('\n');

    let first_ply = initial.move_counter;
    let mut movetext_parts = Vec::<String>::with_capacity(game.history().len() + 1);
    for (index, played) in game.history().iter().enumerate() {
        let ply = first_ply + index as u32;
        let number = ply / 2 + 1;
        if ply % 2 == 0 {
            movetext_parts.push(format!("{number}. {}", played.san));
        } else if index == 0 {
            movetext_parts.push(format!("{number}... {}", played.san));
        } else {
            movetext_parts.push(played.san.clone());
        }
    }
    movetext_parts.push(normalize_result(&tags.result).to_owned());

    out.push_str(&movetext_parts.join(" "));
    out.push('\n');
    out
}

pub fn read_pgn(pgn: &str) -> ChessResult<PgnGame> {
    let mut tags = Vec::<(String, String)>::new();
    let mut movetext_lines = Vec::<&str>::new();

    for line in pgn.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('[') {
            tags.push(parse_header_line(trimmed)?);
        } else {
            movetext_lines.push(trimmed);
        }
    }

    let mut game = if find_tag(&tags, "SetUp") == Some("1") {
        let fen = find_tag(&tags, "FEN").ok_or_else(|| {
            ChessError::InvalidPgnHeader("SetUp is 1 but the FEN tag is missing".to_owned())
        })?;
        ChessGame::from_state(GameState::from_fen(fen)?)
    } else {
        ChessGame::new()
    };

    let mut result = None;
    let mut replay_errors = Vec::new();
    let mut ply = 0usize;

    let movetext = strip_pgn_comments_and_variations(&movetext_lines.join(" "));
    for raw in movetext.split_whitespace() {
        if is_result_token(raw) {
            result = Some(raw.to_owned());
            break;
        }
        let Some(token) = strip_move_number(raw) else {
            continue;
        };

        ply += 1;
        if let Err(error) = replay_token(&mut game, token) {
            warn!(ply, token, %error, "skipping unreplayable PGN token");
            replay_errors.push(ReplayError {
                ply,
                token: token.to_owned(),
                error,
            });
        }
    }

    let result = result
        .or_else(|| find_tag(&tags, "Result").map(|r| normalize_result(r).to_owned()))
        .unwrap_or_else(|| "*".to_owned());
    debug!(
        plies = game.history().len(),
        errors = replay_errors.len(),
        %result,
        "PGN replayed"
    );

    Ok(PgnGame {
        tags,
        game,
        result,
        replay_errors,
    })
}

fn find_tag<'a>(tags: &'a [(String, String)], key: &str) -> Option<&'a str> {
    tags.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

/// SAN without a promotion suffix onto the last rank promotes to a queen.
fn replay_token(game: &mut ChessGame, token: &str) -> ChessResult<()> {
    match game.commit_san(token)? {
        MoveOutcome::Applied => Ok(()),
        MoveOutcome::PromotionPending => game.choose_promotion(PieceKind::Queen).map(|_| ()),
        MoveOutcome::RejectedIllegal | MoveOutcome::RejectedLeavesKingInCheck => {
            Err(ChessError::UnresolvedSan(token.to_owned()))
        }
    }
}

fn parse_header_line(line: &str) -> ChessResult<(String, String)> {
    let invalid = || ChessError::InvalidPgnHeader(line.to_owned());
    let inner = line
        .strip_prefix('[')
        .and_then(|l| l.strip_suffix(']'))
        .ok_or_else(invalid)?;
    let (key, value_raw) = inner.trim().split_once(' ').ok_or_else(invalid)?;
    let value = value_raw
        .trim()
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or_else(invalid)?;
    if key.is_empty() {
        return Err(invalid());
    }
    Ok((key.to_owned(), value.replace("\\\"", "\"")))
}

fn strip_pgn_comments_and_variations(text: &str) -> String {
    let mut out = String::new();
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;

    for ch in text.chars() {
        match ch {
            '{' => brace_depth = brace_depth.saturating_add(1),
            '}' => brace_depth = brace_depth.saturating_sub(1),
            '(' => paren_depth = paren_depth.saturating_add(1),
            ')' => paren_depth = paren_depth.saturating_sub(1),
            _ if brace_depth == 0 && paren_depth == 0 => out.push(ch),
            _ => {}
        }
    }

    out
}

/// `12.`, `12...` and `$1` give `None`; `12.Nf3` gives `Nf3`.
fn strip_move_number(token: &str) -> Option<&str> {
    if token.starts_with('$') {
        return None;
    }
    let san = match token.rfind('.') {
        Some(dot) => &token[dot + 1..],
        None => token,
    };
    (!san.is_empty()).then_some(san)
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn normalize_result(result: &str) -> &str {
    if is_result_token(result) {
        result
    } else {
        "*"
    }
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Color, Piece};
    use crate::utils::algebraic::algebraic_to_square;

    fn played(moves: &[&str]) -> ChessGame {
        let mut game = ChessGame::new();
        for text in moves {
            assert_eq!(game.commit_move(text).expect("parse"), MoveOutcome::Applied);
        }
        game
    }

    #[test]
    fn round_trip_restores_history_and_position() {
        let game = played(&["e2e4", "e7e5", "g1f3", "b8c6", "f1b5"]);
        let pgn = write_pgn(&game, &PgnTags::default());
        assert!(pgn.ends_with("\n1. e4 e5 2. Nf3 Nc6 3. Bb5 *\n"));

        let parsed = read_pgn(&pgn).expect("PGN should parse");
        assert!(parsed.replay_errors.is_empty());
        assert_eq!(parsed.game.state(), game.state());
        assert_eq!(parsed.game.history(), game.history());
        assert_eq!(parsed.result, "*");
    }

    #[test]
    fn tags_follow_roster_order() {
        let tags = PgnTags {
            white: "Ann \"The Rook\"".to_owned(),
            result: "1-0".to_owned(),
            ..PgnTags::default()
        };
        let pgn = write_pgn(&ChessGame::new(), &tags);
        let keys: Vec<&str> = pgn
            .lines()
            .take(7)
            .filter_map(|line| line.strip_prefix('['))
            .filter_map(|line| line.split(' ').next())
            .collect();
        assert_eq!(keys, SEVEN_TAG_ROSTER);
        assert!(!pgn.contains("SetUp"));

        let parsed = read_pgn(&pgn).expect("PGN should parse");
        assert_eq!(parsed.tag("White"), Some("Ann \"The Rook\""));
        assert_eq!(parsed.result, "1-0");
    }

    #[test]
    fn reader_skips_comments_variations_and_numbers() {
        let pgn = "[Event \"x\"]\n\n1.e4 {main line} e5 (1... c5 2. Nf3) 2. Nf3 $1 Nc6 1/2-1/2 3. Bb5";
        let parsed = read_pgn(pgn).expect("PGN should parse");
        assert!(parsed.replay_errors.is_empty());
        assert_eq!(parsed.game.history().len(), 4);
        assert_eq!(parsed.result, "1/2-1/2");
    }

    #[test]
    fn replay_continues_past_unresolvable_token() {
        let parsed = read_pgn("1. e4 e5 2. Qe7 Nf3 *").expect("PGN should parse");
        assert_eq!(parsed.replay_errors.len(), 1);
        assert_eq!(parsed.replay_errors[0].ply, 3);
        assert_eq!(parsed.replay_errors[0].token, "Qe7");
        assert!(matches!(
            parsed.replay_errors[0].error,
            ChessError::UnresolvedSan(_)
        ));

        let sans: Vec<&str> = parsed.game.history().iter().map(|p| p.san.as_str()).collect();
        assert_eq!(sans, ["e4", "e5", "Nf3"]);
    }

    #[test]
    fn bad_header_is_rejected() {
        assert!(matches!(
            read_pgn("[Event Casual]\n\n1. e4 *"),
            Err(ChessError::InvalidPgnHeader(_))
        ));
    }

    #[test]
    fn setup_position_round_trips_with_dark_first() {
        let state = GameState::from_fen("4k3/8/8/8/8/8/4P3/4K3 b - - 0 1").expect("FEN should parse");
        let mut game = ChessGame::from_state(state.clone());
        assert_eq!(game.commit_move("e8d8").expect("parse"), MoveOutcome::Applied);

        let pgn = write_pgn(&game, &PgnTags::default());
        assert!(pgn.contains("[SetUp \"1\"]"));
        assert!(pgn.contains("1... Kd8 *"));

        let parsed = read_pgn(&pgn).expect("PGN should parse");
        assert_eq!(parsed.game.initial_state().get_fen(), state.get_fen());
        assert_eq!(parsed.game.state(), game.state());
    }

    #[test]
    fn bare_promotion_replays_as_queen() {
        let pgn = "[SetUp \"1\"]\n[FEN \"8/P7/8/8/8/8/8/k6K w - - 0 1\"]\n\n1. a8 *";
        let parsed = read_pgn(pgn).expect("PGN should parse");
        assert!(parsed.replay_errors.is_empty());
        let a8 = algebraic_to_square("a8").expect("square should parse");
        assert_eq!(
            parsed.game.state().piece_at(a8),
            Some(Piece::new(Color::Light, PieceKind::Queen))
        );
        assert_eq!(parsed.game.history()[0].san, "a8=Q+");
    }
}
