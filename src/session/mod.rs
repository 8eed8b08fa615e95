//! Spreadsheet session: cell inputs, eager recomputation and the error log
//!
//! A [`Session`] owns the [`Runtime`] and the text the user typed into every
//! cell of a `rows × cols` sheet. Each commit stores the new text and then
//! recomputes the whole sheet in row-major order:
//!
//! - blank cells are cleared
//! - literal cells write their value
//! - formula cells are lexed, parsed and evaluated against the shared runtime
//!
//! A failing cell keeps its previous grid value, is marked
//! [`CellState::Error`] and gets a `Cell (r, c): message` entry in the log.
//!
//! - [`input`]: classification of raw cell text
//! - [`errors`]: the [`SessionError`] type

pub mod errors;
pub mod input;

pub use errors::SessionError;
pub use input::CellInput;

use crate::config::SessionConfig;
use crate::interpreter::constants::MAX_LOG_ENTRIES;
use crate::interpreter::engine::Evaluator;
use crate::parser::ast::AstNode;
use crate::parser::lexer::lex;
use crate::parser::parse::Parser;
use crate::serializer::serialize;
use crate::sheet::{Outcome, Runtime, Value};

/// Displayed state of one cell after the last recomputation
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellState {
    #[default]
    Empty,
    Value(Value),
    Error(String),
}

impl CellState {
    pub fn is_error(&self) -> bool {
        matches!(self, CellState::Error(_))
    }
}

pub struct Session {
    config: SessionConfig,
    runtime: Runtime,

    /// Raw input text per cell, row-major
    inputs: Vec<String>,

    states: Vec<CellState>,

    /// Error/debug log shown in the UI, oldest first, at most `MAX_LOG_ENTRIES`
    log: Vec<String>,

    /// Entries ever logged, including those dropped from `log`
    logged: usize,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let cells = config.rows * config.cols;
        Session {
            config,
            runtime: Runtime::with_size(config.rows.max(config.cols)),
            inputs: vec![String::new(); cells],
            states: vec![CellState::Empty; cells],
            log: Vec::new(),
            logged: 0,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn rows(&self) -> usize {
        self.config.rows
    }

    pub fn cols(&self) -> usize {
        self.config.cols
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Number of entries logged so far, including dropped ones
    pub fn logged(&self) -> usize {
        self.logged
    }

    fn push_log(&mut self, entry: String) {
        if self.log.len() >= MAX_LOG_ENTRIES {
            let excess = self.log.len() + 1 - MAX_LOG_ENTRIES;
            self.log.drain(..excess);
        }
        self.log.push(entry);
        self.logged += 1;
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, SessionError> {
        if row < self.config.rows && col < self.config.cols {
            Ok(row * self.config.cols + col)
        } else {
            Err(SessionError::OutOfSheet { row, col })
        }
    }

    /// Raw text of a cell ("" when empty or outside the sheet)
    pub fn input(&self, row: usize, col: usize) -> &str {
        self.index(row, col)
            .map(|i| self.inputs[i].as_str())
            .unwrap_or("")
    }

    pub fn state(&self, row: usize, col: usize) -> &CellState {
        const EMPTY: &CellState = &CellState::Empty;
        self.index(row, col).map_or(EMPTY, |i| &self.states[i])
    }

    /// Store new input for a cell and recompute the sheet
    pub fn commit(&mut self, row: usize, col: usize, input: &str) -> Result<&CellState, SessionError> {
        let index = self.index(row, col)?;
        tracing::debug!(row, col, input, "cell committed");

        self.inputs[index] = input.to_string();
        self.recompute();
        Ok(&self.states[index])
    }

    pub fn clear_cell(&mut self, row: usize, col: usize) -> Result<&CellState, SessionError> {
        self.commit(row, col, "")
    }

    /// Re-evaluate every cell in row-major order
    pub fn recompute(&mut self) {
        let mut formulas = 0;

        for row in 0..self.config.rows {
            for col in 0..self.config.cols {
                let index = row * self.config.cols + col;
                let input = CellInput::classify(&self.inputs[index]);
                if input.is_formula() {
                    formulas += 1;
                }

                let state = match self.update_cell(row, col, input) {
                    Ok(Some(value)) => CellState::Value(value),
                    Ok(None) => CellState::Empty,
                    Err(err) => {
                        let message = err.to_string();
                        // Report each failure once, not on every recompute
                        if self.states[index] != CellState::Error(message.clone()) {
                            self.push_log(format!("Cell ({}, {}): {}", row, col, message));
                        }
                        CellState::Error(message)
                    }
                };
                self.states[index] = state;
            }
        }

        tracing::debug!(formulas, "sheet recomputed");
    }

    /// Apply one classified input to the grid
    fn update_cell(
        &mut self,
        row: usize,
        col: usize,
        input: CellInput,
    ) -> Result<Option<Value>, SessionError> {
        let (r, c) = (row as i64, col as i64);

        match input {
            CellInput::Blank => {
                self.runtime.grid_mut().clear(r, c);
                Ok(None)
            }
            CellInput::Literal(value) => {
                self.runtime.grid_mut().write(r, c, value.clone());
                Ok(Some(value))
            }
            CellInput::Invalid(text) => Err(SessionError::InvalidInput(text)),
            CellInput::Formula(text) => {
                let value = match self.run_formula(&text)? {
                    Outcome::Value(value) => value,
                    Outcome::Unit => return Err(SessionError::NoCellValue),
                };
                if let Value::CellAddress { .. } = value {
                    return Err(SessionError::UnsupportedResult(value.kind()));
                }
                self.runtime.grid_mut().write(r, c, value.clone());
                Ok(Some(value))
            }
        }
    }

    fn parse(&self, text: &str) -> Result<AstNode, SessionError> {
        let ast = Parser::new(lex(text))
            .with_max_depth(self.config.max_depth)
            .parse_program()?;
        Ok(ast)
    }

    fn run_formula(&mut self, text: &str) -> Result<Outcome, SessionError> {
        let ast = self.parse(text)?;

        if self.config.isolate_variables {
            self.runtime.clear_variables();
        }

        let outcome = Evaluator::new(&mut self.runtime)
            .with_max_depth(self.config.max_depth)
            .evaluate(&ast)?;
        Ok(outcome)
    }

    /// Evaluate formula text outside any cell (a leading `=` is optional)
    pub fn evaluate_formula(&mut self, text: &str) -> Result<Outcome, SessionError> {
        let text = text.trim();
        let text = text.strip_prefix('=').unwrap_or(text);
        self.run_formula(text)
    }

    /// Canonical text of formula input (a leading `=` is optional)
    pub fn canonical(&self, text: &str) -> Result<String, SessionError> {
        let text = text.trim();
        let text = text.strip_prefix('=').unwrap_or(text);
        Ok(serialize(&self.parse(text)?))
    }

    /// Canonical text of a formula cell, `None` for other cells or parse failures
    pub fn canonical_form(&self, row: usize, col: usize) -> Option<String> {
        match CellInput::classify(self.input(row, col)) {
            CellInput::Formula(text) => self.canonical(&text).ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(SessionConfig {
            rows: 3,
            cols: 3,
            ..SessionConfig::default()
        })
    }

    #[test]
    fn test_literal_commit() {
        let mut session = session();
        assert_eq!(
            session.commit(0, 0, "21").unwrap(),
            &CellState::Value(Value::Integer(21))
        );
        assert_eq!(session.runtime().cell_value(0, 0), Some(&Value::Integer(21)));
        assert_eq!(session.input(0, 0), "21");
    }

    #[test]
    fn test_formula_depends_on_cell() {
        let mut session = session();
        session.commit(0, 0, "21").unwrap();
        assert_eq!(
            session.commit(0, 1, "=#[0,0] * 2").unwrap(),
            &CellState::Value(Value::Integer(42))
        );

        // Eager recompute updates the dependent cell
        session.commit(0, 0, "5").unwrap();
        assert_eq!(session.state(0, 1), &CellState::Value(Value::Integer(10)));
    }

    #[test]
    fn test_errors_are_logged_once() {
        let mut session = session();
        assert!(session.commit(1, 1, "=1 +").unwrap().is_error());
        session.commit(0, 0, "1").unwrap();
        assert_eq!(session.log().len(), 1);
        assert!(session.log()[0].starts_with("Cell (1, 1): Parse error"));
    }

    #[test]
    fn test_log_keeps_newest_entries() {
        let mut session = session();
        for n in 0..MAX_LOG_ENTRIES + 10 {
            session.commit(0, 0, &format!("=missing_{}", n)).unwrap();
        }

        assert_eq!(session.log().len(), MAX_LOG_ENTRIES);
        assert_eq!(session.logged(), MAX_LOG_ENTRIES + 10);
        assert!(session.log()[0].contains("missing_10 "));
        assert!(session.log()[MAX_LOG_ENTRIES - 1].contains(&format!("missing_{} ", MAX_LOG_ENTRIES + 9)));
    }

    #[test]
    fn test_invalid_and_unsupported_results() {
        let mut session = session();
        assert_eq!(
            session.commit(0, 0, "hello").unwrap(),
            &CellState::Error("Invalid input 'hello'".into())
        );
        assert_eq!(
            session.commit(0, 1, "=[1, 1]").unwrap(),
            &CellState::Error("Unsupported result type: CellAddress".into())
        );
        assert_eq!(
            session.commit(0, 2, "=if false \n 1 \n end").unwrap(),
            &CellState::Error("Formula produced no value".into())
        );
    }

    #[test]
    fn test_failed_cell_keeps_grid_value() {
        let mut session = session();
        session.commit(2, 2, "7").unwrap();
        session.commit(2, 2, "=missing").unwrap();
        assert_eq!(session.runtime().cell_value(2, 2), Some(&Value::Integer(7)));
    }

    #[test]
    fn test_clear_cell() {
        let mut session = session();
        session.commit(1, 0, "true").unwrap();
        assert_eq!(session.clear_cell(1, 0).unwrap(), &CellState::Empty);
        assert_eq!(session.runtime().cell_value(1, 0), None);
    }

    #[test]
    fn test_out_of_sheet() {
        let mut session = session();
        assert_eq!(
            session.commit(3, 0, "1").unwrap_err(),
            SessionError::OutOfSheet { row: 3, col: 0 }
        );
        assert_eq!(session.state(9, 9), &CellState::Empty);
    }

    #[test]
    fn test_canonical_form() {
        let mut session = session();
        session.commit(0, 0, "=1+2*3").unwrap();
        assert_eq!(session.canonical_form(0, 0).as_deref(), Some("(1 + (2 * 3))"));
        session.commit(0, 1, "4").unwrap();
        assert_eq!(session.canonical_form(0, 1), None);
    }

    #[test]
    fn test_variable_sharing() {
        let mut shared = session();
        shared.evaluate_formula("x -> 5").unwrap();
        assert_eq!(shared.evaluate_formula("=x + 1").unwrap(), Value::Integer(6).into());

        let mut isolated = Session::new(SessionConfig {
            isolate_variables: true,
            ..SessionConfig::default()
        });
        isolated.evaluate_formula("x -> 5").unwrap();
        assert!(matches!(
            isolated.evaluate_formula("x + 1"),
            Err(SessionError::Eval(_))
        ));
    }
}
