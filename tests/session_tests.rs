// Integration tests for the spreadsheet session layer

use cellscript::config::SessionConfig;
use cellscript::session::{CellInput, CellState, Session, SessionError};
use cellscript::sheet::{Outcome, Value};

fn session(rows: usize, cols: usize) -> Session {
    Session::new(SessionConfig {
        rows,
        cols,
        ..SessionConfig::default()
    })
}

#[test]
fn test_dependent_cell_recomputes() {
    let mut session = session(4, 4);
    session.commit(0, 0, "21").unwrap();
    let state = session.commit(0, 1, "=#[0,0] * 2").unwrap();
    assert_eq!(state, &CellState::Value(Value::Integer(42)));

    session.commit(0, 0, "0.5").unwrap();
    assert_eq!(session.state(0, 1), &CellState::Value(Value::Float(1.0)));
}

#[test]
fn test_row_major_order() {
    let mut session = session(3, 3);
    // (1, 0) is computed after (0, 2), so it sees the fresh value
    session.commit(0, 2, "=3 * 3").unwrap();
    session.commit(1, 0, "=#[0, 2] + 1").unwrap();
    assert_eq!(session.state(1, 0), &CellState::Value(Value::Integer(10)));
}

#[test]
fn test_statistics_over_sheet() {
    let mut session = session(3, 3);
    session.commit(0, 0, "1").unwrap();
    session.commit(1, 0, "2").unwrap();
    session.commit(2, 0, "3.5").unwrap();
    session.commit(2, 2, "=sum([0,0],[2,0])").unwrap();
    assert_eq!(session.state(2, 2), &CellState::Value(Value::Float(6.5)));

    session.commit(2, 1, "=max([0,0],[1,0])").unwrap();
    assert_eq!(session.state(2, 1), &CellState::Value(Value::Integer(2)));
}

#[test]
fn test_string_literal_cells() {
    let mut session = session(2, 2);
    session.commit(0, 0, "\"label\"").unwrap();
    assert_eq!(
        session.runtime().cell_value(0, 0),
        Some(&Value::String("label".into()))
    );

    // Strings are not numeric and statistics skip them
    session.commit(0, 1, "=mean([0,0],[0,0])").unwrap();
    assert_eq!(session.state(0, 1), &CellState::Value(Value::Float(0.0)));

    // A formula may carry a string into its own cell
    session.commit(1, 0, "=#[0, 0]").unwrap();
    assert_eq!(session.state(1, 0), &CellState::Value(Value::String("label".into())));
}

#[test]
fn test_huge_loop_commits_promptly() {
    let mut session = session(3, 3);
    session.commit(0, 0, "2").unwrap();
    let state = session
        .commit(1, 1, "=n -> 0\nfor v in [0,0]..[100000,100000] do\nn -> n + 1\nend")
        .unwrap();

    // The shared grid is 3 wide, so indices 0..=3 in each direction
    assert_eq!(state, &CellState::Value(Value::Integer(16)));
}

#[test]
fn test_error_states_and_log() {
    let mut session = session(2, 2);
    let state = session.commit(0, 0, "=1 % 0").unwrap().clone();
    match state {
        CellState::Error(message) => assert!(message.starts_with("Arithmetic error")),
        other => panic!("Expected an error state, got {:?}", other),
    }

    session.commit(1, 1, "=nope").unwrap();
    assert_eq!(session.log().len(), 2);
    assert_eq!(
        session.log()[1],
        "Cell (1, 1): Uninitialized variable referenced: nope at index 0"
    );

    // Fixing the cell clears its error state
    session.commit(1, 1, "=2").unwrap();
    assert!(!session.state(1, 1).is_error());
}

#[test]
fn test_canonical_text() {
    let session = session(2, 2);
    assert_eq!(session.canonical("=a -> 1 + 2 + 3").unwrap(), "a -> ((1 + 2) + 3)");
    assert!(matches!(session.canonical("1 +"), Err(SessionError::Parse(_))));
}

#[test]
fn test_headless_evaluation() {
    let mut session = session(2, 2);
    assert_eq!(session.evaluate_formula("x -> 2 ** 10").unwrap(), Outcome::Value(Value::Integer(1024)));
    assert_eq!(session.evaluate_formula("=x >> 2").unwrap(), Outcome::Value(Value::Integer(256)));
    assert_eq!(session.evaluate_formula("if x < 0\n1\nend").unwrap(), Outcome::Unit);
}

#[test]
fn test_depth_limit_applies_to_cells() {
    let mut session = Session::new(SessionConfig {
        rows: 1,
        cols: 1,
        max_depth: 16,
        ..SessionConfig::default()
    });
    let nested = format!("={}1{}", "(".repeat(40), ")".repeat(40));
    assert!(session.commit(0, 0, &nested).unwrap().is_error());
}

#[test]
fn test_classify_reexport() {
    assert_eq!(CellInput::classify(" =1 "), CellInput::Formula("1".into()));
    assert_eq!(CellInput::classify("-2.5"), CellInput::Literal(Value::Float(-2.5)));
}
