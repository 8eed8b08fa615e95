// Evaluation environment: one grid plus a flat variable mapping

use super::grid::Grid;
use super::value::Value;
use rustc_hash::FxHashMap;

/// Shared mutable state for formula evaluation
///
/// Variables live in a single flat namespace: no nested scopes, last write
/// wins, and bindings persist across evaluations until cleared.
#[derive(Debug, Clone)]
pub struct Runtime {
    grid: Grid,
    variables: FxHashMap<String, Value>,
}

impl Runtime {
    pub fn new(grid: Grid) -> Self {
        Runtime {
            grid,
            variables: FxHashMap::default(),
        }
    }

    pub fn with_size(size: usize) -> Self {
        Self::new(Grid::new(size))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn cell_value(&self, row: i64, col: i64) -> Option<&Value> {
        self.grid.read(row, col)
    }

    pub fn bind(&mut self, name: impl Into<String>, value: Value) {
        self.variables.insert(name.into(), value);
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn unbind(&mut self, name: &str) -> Option<Value> {
        self.variables.remove(name)
    }

    pub fn clear_variables(&mut self) {
        self.variables.clear();
    }

    /// Variables sorted by name
    pub fn variables(&self) -> Vec<(&str, &Value)> {
        let mut vars: Vec<(&str, &Value)> = self
            .variables
            .iter()
            .map(|(name, value)| (name.as_str(), value))
            .collect();
        vars.sort_by(|a, b| a.0.cmp(b.0));
        vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_lookup_last_write_wins() {
        let mut runtime = Runtime::with_size(2);
        runtime.bind("x", Value::Integer(1));
        runtime.bind("x", Value::Float(2.5));
        assert_eq!(runtime.lookup("x"), Some(&Value::Float(2.5)));
        assert_eq!(runtime.lookup("y"), None);

        assert_eq!(runtime.unbind("x"), Some(Value::Float(2.5)));
        assert_eq!(runtime.lookup("x"), None);
    }

    #[test]
    fn test_variables_sorted() {
        let mut runtime = Runtime::with_size(1);
        runtime.bind("b", Value::Integer(2));
        runtime.bind("a", Value::Integer(1));
        let names: Vec<&str> = runtime.variables().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["a", "b"]);

        runtime.clear_variables();
        assert!(runtime.variables().is_empty());
    }

    #[test]
    fn test_cell_value_reads_grid() {
        let mut runtime = Runtime::with_size(1);
        runtime.grid_mut().write(1, 1, Value::Integer(7));
        assert_eq!(runtime.cell_value(1, 1), Some(&Value::Integer(7)));
        assert_eq!(runtime.cell_value(5, 5), None);
    }
}
