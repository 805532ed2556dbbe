use hidden_maze_core::{Direction, Instruction};
use hidden_maze_system_interpreter::{parse, parse_probe, ParseError};

#[test]
fn movement_keys_map_to_directions_in_order() {
    assert_eq!(
        parse("WASD"),
        Ok(vec![
            Instruction::new(Direction::North, 1),
            Instruction::new(Direction::West, 1),
            Instruction::new(Direction::South, 1),
            Instruction::new(Direction::East, 1),
        ]),
        "each key should become a single-step move in source order",
    );
}

#[test]
fn digit_after_key_sets_step_count() {
    assert_eq!(
        parse("W3A"),
        Ok(vec![
            Instruction::new(Direction::North, 3),
            Instruction::new(Direction::West, 1),
        ])
    );
}

#[test]
fn lower_case_is_accepted() {
    assert_eq!(parse("wasd"), parse("WASD"));
    assert_eq!(parse("s9d2"), parse("S9D2"));
}

#[test]
fn invalid_token_fails_the_whole_command() {
    assert_eq!(
        parse("WXD"),
        Err(ParseError::InvalidToken {
            token: 'X',
            index: 1
        }),
        "no partial program may be produced when a token is invalid",
    );
}

#[test]
fn only_one_digit_is_read_per_key() {
    assert_eq!(
        parse("W12"),
        Err(ParseError::InvalidToken {
            token: '2',
            index: 2
        }),
        "multi-digit counts are not part of the language",
    );
}

#[test]
fn leading_digit_is_invalid() {
    assert_eq!(
        parse("3W"),
        Err(ParseError::InvalidToken {
            token: '3',
            index: 0
        })
    );
}

#[test]
fn interior_whitespace_is_invalid() {
    assert_eq!(
        parse("W D"),
        Err(ParseError::InvalidToken {
            token: ' ',
            index: 1
        })
    );
}

#[test]
fn empty_text_is_distinct_from_malformed_text() {
    assert_eq!(parse(""), Err(ParseError::Empty));
    assert_eq!(parse("   "), Err(ParseError::Empty));
}

#[test]
fn probe_accepts_arrow_names_and_keys() {
    assert_eq!(parse_probe("up"), Ok(Direction::North));
    assert_eq!(parse_probe("DOWN"), Ok(Direction::South));
    assert_eq!(parse_probe("Left"), Ok(Direction::West));
    assert_eq!(parse_probe("right"), Ok(Direction::East));
    assert_eq!(parse_probe("d"), Ok(Direction::East));
}

#[test]
fn probe_rejects_unknown_tokens() {
    assert_eq!(
        parse_probe("x"),
        Err(ParseError::InvalidToken {
            token: 'X',
            index: 0
        })
    );
    assert_eq!(
        parse_probe("wd"),
        Err(ParseError::InvalidToken {
            token: 'D',
            index: 1
        })
    );
    assert_eq!(parse_probe(" "), Err(ParseError::Empty));
}
