//! PGN import: tag pairs plus movetext resolved against a live board.
//!
//! Only the first game of the input is read. Comments, variations and
//! numeric annotation glyphs are skipped; the mainline moves are resolved
//! one by one, so every returned move is legal in the position it is
//! played from. Any unresolvable mainline token aborts the whole parse.

use std::collections::BTreeMap;

use crate::board::{Board, Move};
use crate::error::{ParseError, SanError};

/// A parsed game: its tag pairs and the resolved mainline moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub headers: BTreeMap<String, String>,
    pub moves: Vec<Move>,
}

impl Game {
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    pub fn summary(&self) -> String {
        let header = |name: &str| self.headers.get(name).map(String::as_str).unwrap_or("?");
        format!(
            "{} vs {} - {}",
            header("White"),
            header("Black"),
            header("Result")
        )
    }
}

/// The Seven Tag Roster, with the placeholder values the PGN standard
/// assigns to unknown tags. Tags present in the input overwrite these.
fn default_headers() -> BTreeMap<String, String> {
    [
        ("Event", "?"),
        ("Site", "?"),
        ("Date", "????.??.??"),
        ("Round", "?"),
        ("White", "?"),
        ("Black", "?"),
        ("Result", "*"),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value.to_string()))
    .collect()
}

/// Parses one `[Name "value"]` tag pair, honoring `\"` and `\\` escapes.
/// Returns `None` when the line is not a well-formed tag pair.
fn parse_tag_line(line: &str) -> Option<(String, String)> {
    let rest = line.trim().strip_prefix('[')?;
    let name_end = rest.find(|c: char| !c.is_ascii_alphanumeric() && c != '_')?;
    let (name, rest) = rest.split_at(name_end);
    if name.is_empty() {
        return None;
    }

    let rest = rest.trim_start().strip_prefix('"')?;
    let mut value = String::new();
    let mut chars = rest.chars();
    loop {
        match chars.next()? {
            '\\' => value.push(chars.next()?),
            '"' => break,
            c => value.push(c),
        }
    }

    let rest = chars.as_str().trim_start().strip_prefix(']')?;
    if !rest.trim().is_empty() {
        return None;
    }
    Some((name.to_string(), value))
}

/// Skips a parenthesized variation, including nested ones. Brace and
/// rest-of-line comments inside the variation hide any parentheses they
/// contain. An unterminated variation runs to the end of the input.
fn skip_variation(mut rest: &str) -> &str {
    let mut depth = 1usize;
    while let Some(c) = rest.chars().next() {
        rest = &rest[c.len_utf8()..];
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            '{' => {
                rest = match rest.find('}') {
                    Some(end) => &rest[end + 1..],
                    None => "",
                };
            }
            ';' => {
                rest = match rest.find('\n') {
                    Some(end) => &rest[end + 1..],
                    None => "",
                };
            }
            _ => {}
        }
    }
    rest
}

fn is_word_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '.' | '{' | '}' | '(' | ')' | ';' | '$' | '*')
}

/// Parses the first game of a PGN text.
///
/// The move list is validated as it is read: each mainline token must
/// resolve to exactly one legal move in the current position. Tokens that
/// are not move-shaped at all (stray words, annotations) are skipped.
pub fn parse(text: &str) -> Result<Game, ParseError> {
    let mut headers = default_headers();
    let mut saw_structure = false;
    let mut movetext = String::new();
    let mut in_movetext = false;
    let mut in_comment = false;

    // Line phase: collect tag pairs, accumulate everything else as
    // movetext. A tag pair after movetext has begun opens the next game,
    // unless it sits inside an unclosed brace comment.
    for line in text.lines() {
        if !in_comment {
            if let Some((name, value)) = parse_tag_line(line) {
                if in_movetext {
                    break;
                }
                headers.insert(name, value);
                saw_structure = true;
                continue;
            }
        }
        if !line.trim().is_empty() {
            in_movetext = true;
        }
        for c in line.chars() {
            match c {
                '{' => in_comment = true,
                '}' => in_comment = false,
                _ => {}
            }
        }
        movetext.push_str(line);
        movetext.push('\n');
    }

    let mut board = Board::new();
    let mut moves = Vec::new();
    let mut rest = movetext.as_str();

    while let Some(c) = rest.chars().next() {
        match c {
            c if c.is_whitespace() => rest = &rest[c.len_utf8()..],
            '.' | '}' | ')' => rest = &rest[1..],
            '{' => {
                saw_structure = true;
                rest = match rest.find('}') {
                    Some(end) => &rest[end + 1..],
                    None => "",
                };
            }
            ';' => {
                saw_structure = true;
                rest = match rest.find('\n') {
                    Some(end) => &rest[end + 1..],
                    None => "",
                };
            }
            '(' => {
                saw_structure = true;
                rest = skip_variation(&rest[1..]);
            }
            '$' => {
                saw_structure = true;
                rest = rest[1..].trim_start_matches(|c: char| c.is_ascii_digit());
            }
            '*' => {
                saw_structure = true;
                break;
            }
            _ => {
                let end = rest.find(is_word_delimiter).unwrap_or(rest.len());
                let (word, tail) = rest.split_at(end);
                rest = tail;

                if word.chars().all(|c| c.is_ascii_digit()) {
                    // Move number.
                    saw_structure = true;
                } else if matches!(word, "1-0" | "0-1" | "1/2-1/2") {
                    saw_structure = true;
                    break;
                } else {
                    match board.resolve_san(word) {
                        Ok(mv) => {
                            board.apply(&mv);
                            moves.push(mv);
                        }
                        Err(SanError::Syntax(_)) => {}
                        Err(SanError::NoMatch(san)) => {
                            return Err(ParseError::IllegalMove {
                                san,
                                ply: moves.len() + 1,
                            });
                        }
                        Err(SanError::Ambiguous(san)) => {
                            return Err(ParseError::AmbiguousMove {
                                san,
                                ply: moves.len() + 1,
                            });
                        }
                    }
                }
            }
        }
    }

    if moves.is_empty() {
        if saw_structure {
            return Err(ParseError::EmptyGame);
        }
        return Err(ParseError::MalformedInput);
    }
    Ok(Game { headers, moves })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;

    const SAMPLE_PGN: &str = r#"[Event "Casual Game"]
[Site "Internet"]
[Date "2024.03.01"]
[White "Alice"]
[Black "Bob"]
[Result "1-0"]

1. e4 e5 2. Nf3 Nc6 3. Bb5 1-0
"#;

    #[test]
    fn test_parse_sample_game() {
        let game = parse(SAMPLE_PGN).unwrap();
        assert_eq!(game.move_count(), 5);
        assert_eq!(game.headers["White"], "Alice");
        assert_eq!(game.headers["Black"], "Bob");
        assert_eq!(game.headers["Result"], "1-0");
    }

    #[test]
    fn test_game_summary() {
        let game = parse(SAMPLE_PGN).unwrap();
        assert_eq!(game.summary(), "Alice vs Bob - 1-0");
    }

    #[test]
    fn test_moves_resolve_against_live_board() {
        let game = parse("1. e4 e5 2. Nf3 Nc6").unwrap();
        let expected = [
            Move::new(Square::new(1, 4), Square::new(3, 4)),
            Move::new(Square::new(6, 4), Square::new(4, 4)),
            Move::new(Square::new(0, 6), Square::new(2, 5)),
            Move::new(Square::new(7, 1), Square::new(5, 2)),
        ];
        assert_eq!(game.moves, expected);
    }

    #[test]
    fn test_seven_tag_roster_defaults() {
        let game = parse("1. e4").unwrap();
        assert_eq!(game.headers.len(), 7);
        assert_eq!(game.headers["Event"], "?");
        assert_eq!(game.headers["Site"], "?");
        assert_eq!(game.headers["Date"], "????.??.??");
        assert_eq!(game.headers["Round"], "?");
        assert_eq!(game.headers["White"], "?");
        assert_eq!(game.headers["Black"], "?");
        assert_eq!(game.headers["Result"], "*");
    }

    #[test]
    fn test_duplicate_tag_last_wins() {
        let game = parse("[Event \"First\"]\n[Event \"Second\"]\n\n1. e4 *").unwrap();
        assert_eq!(game.headers["Event"], "Second");
    }

    #[test]
    fn test_escaped_quotes_in_tag_value() {
        let game = parse("[Event \"The \\\"big\\\" one\"]\n\n1. e4 *").unwrap();
        assert_eq!(game.headers["Event"], "The \"big\" one");
    }

    #[test]
    fn test_illegal_move_aborts_parse() {
        let result = parse("1. e4 e5 2. e5");
        assert_eq!(
            result,
            Err(ParseError::IllegalMove {
                san: "e5".to_string(),
                ply: 3,
            })
        );

        // A pawn already standing on e4 cannot go there again.
        let result = parse("1. e4 e5 2. Nf3 Nc6 3. e4");
        assert_eq!(
            result,
            Err(ParseError::IllegalMove {
                san: "e4".to_string(),
                ply: 5,
            })
        );
    }

    #[test]
    fn test_bare_pawn_move_cannot_capture() {
        // e4 is only reachable by capture here, and a capture is spelled
        // with its origin file ("dxe4").
        let result = parse("1. d3 e5 2. a3 e4 3. e4");
        assert_eq!(
            result,
            Err(ParseError::IllegalMove {
                san: "e4".to_string(),
                ply: 5,
            })
        );

        // The same with two candidate capturers: still illegal, not
        // ambiguous.
        let result = parse("1. d3 e5 2. f3 e4 3. e4");
        assert_eq!(
            result,
            Err(ParseError::IllegalMove {
                san: "e4".to_string(),
                ply: 5,
            })
        );
    }

    #[test]
    fn test_ambiguous_move_aborts_parse() {
        // After 3... c6 both the e4 and f3 knights can reach g5.
        let result = parse("1. Nc3 a6 2. Nf3 b6 3. Ne4 c6 4. Ng5");
        assert_eq!(
            result,
            Err(ParseError::AmbiguousMove {
                san: "Ng5".to_string(),
                ply: 7,
            })
        );
    }

    #[test]
    fn test_moves_after_checkmate_rejected() {
        let result = parse("1. f3 e5 2. g4 Qh4# 3. e4");
        assert_eq!(
            result,
            Err(ParseError::IllegalMove {
                san: "e4".to_string(),
                ply: 5,
            })
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse(""), Err(ParseError::MalformedInput));
        assert_eq!(parse("   \n\n  "), Err(ParseError::MalformedInput));
    }

    #[test]
    fn test_non_pgn_input() {
        assert_eq!(
            parse("this is not a chess game at all"),
            Err(ParseError::MalformedInput)
        );
    }

    #[test]
    fn test_tags_without_moves() {
        assert_eq!(
            parse("[Event \"Header only\"]\n[Result \"*\"]"),
            Err(ParseError::EmptyGame)
        );
    }

    #[test]
    fn test_result_without_moves() {
        assert_eq!(parse("1-0"), Err(ParseError::EmptyGame));
        assert_eq!(parse("*"), Err(ParseError::EmptyGame));
    }

    #[test]
    fn test_comments_and_annotations_skipped() {
        let game = parse("1. e4 {best by test} e5 (1... c5 {Sicilian} 2. Nf3) 2. Nf3 $1 Nc6")
            .unwrap();
        assert_eq!(game.move_count(), 4);
    }

    #[test]
    fn test_nested_variations_skipped() {
        let game = parse("1. d4 (1. e4 e5 (1... c5 2. Nf3 {open}) 2. Nf3) 1... d5").unwrap();
        assert_eq!(game.move_count(), 2);
    }

    #[test]
    fn test_semicolon_comment_runs_to_end_of_line() {
        let game = parse("1. e4 ; the king's pawn (no variation here)\n1... e5").unwrap();
        assert_eq!(game.move_count(), 2);
    }

    #[test]
    fn test_semicolon_comment_inside_variation() {
        // The ')' inside the line comment does not close the variation.
        let game = parse("1. e4 e5 (1... c5 ; sicilian)\n2. Nf3 d6) 2. Nf3 Nc6").unwrap();
        assert_eq!(game.move_count(), 4);
    }

    #[test]
    fn test_stops_at_result_marker() {
        let game = parse("1. e4 e5 1-0 2. Nf3 Nc6").unwrap();
        assert_eq!(game.move_count(), 2);
    }

    #[test]
    fn test_first_game_only() {
        let two_games = "[Event \"One\"]\n\n1. e4 e5 1-0\n\n[Event \"Two\"]\n\n1. d4 d5 0-1\n";
        let game = parse(two_games).unwrap();
        assert_eq!(game.headers["Event"], "One");
        assert_eq!(game.move_count(), 2);
    }

    #[test]
    fn test_castling_resolves() {
        let game = parse("1. e4 e5 2. Nf3 Nc6 3. Bc4 Bc5 4. O-O").unwrap();
        assert_eq!(game.move_count(), 7);
        assert_eq!(
            game.moves[6],
            Move::new(Square::new(0, 4), Square::new(0, 6))
        );
    }
}
