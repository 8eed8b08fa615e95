//! Fixed-size 2D store of cell values
//!
//! A grid of size `n` addresses rows and columns `0..=n`, so it holds
//! `(n + 1) * (n + 1)` cells. Empty cells are `None`, which no [`Value`]
//! can be confused with.

use super::value::Value;

/// Square grid of optional cell values
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Value>>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        let side = size + 1;
        Grid {
            size,
            cells: vec![None; side * side],
        }
    }

    /// Largest valid row or column index
    pub fn size(&self) -> usize {
        self.size
    }

    /// Flat index for an in-bounds coordinate
    fn index(&self, row: i64, col: i64) -> Option<usize> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        if row > self.size || col > self.size {
            return None;
        }
        Some(row * (self.size + 1) + col)
    }

    pub fn in_bounds(&self, row: i64, col: i64) -> bool {
        self.index(row, col).is_some()
    }

    /// Read a cell; out-of-range coordinates read as empty
    pub fn read(&self, row: i64, col: i64) -> Option<&Value> {
        self.index(row, col)
            .and_then(|index| self.cells[index].as_ref())
    }

    /// Store a value. Returns false and leaves the grid untouched when the
    /// coordinate is outside `[0, size]`.
    pub fn write(&mut self, row: i64, col: i64, value: Value) -> bool {
        match self.index(row, col) {
            Some(index) => {
                self.cells[index] = Some(value);
                true
            }
            None => {
                tracing::warn!(row, col, size = self.size, "cell write out of bounds ignored");
                false
            }
        }
    }

    /// Reset a cell to empty
    pub fn clear(&mut self, row: i64, col: i64) -> bool {
        match self.index(row, col) {
            Some(index) => {
                self.cells[index] = None;
                true
            }
            None => false,
        }
    }

    /// Filled cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (i64, i64, &Value)> + '_ {
        let side = self.size + 1;
        self.cells.iter().enumerate().filter_map(move |(index, cell)| {
            cell.as_ref()
                .map(|value| ((index / side) as i64, (index % side) as i64, value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        let mut grid = Grid::new(3);
        assert!(grid.write(3, 3, Value::Integer(1)));
        assert_eq!(grid.read(3, 3), Some(&Value::Integer(1)));
        assert!(!grid.write(4, 0, Value::Integer(2)));
        assert!(!grid.write(0, -1, Value::Integer(2)));
        assert_eq!(grid.read(4, 0), None);
        assert_eq!(grid.read(-1, 0), None);
    }

    #[test]
    fn test_out_of_bounds_write_leaves_grid_unchanged() {
        let mut grid = Grid::new(2);
        grid.write(0, 0, Value::Integer(5));
        let before = grid.clone();
        grid.write(3, 0, Value::Integer(9));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_clear_and_iter() {
        let mut grid = Grid::new(2);
        grid.write(1, 0, Value::Boolean(true));
        grid.write(0, 2, Value::Float(0.5));

        let filled: Vec<(i64, i64)> = grid.iter().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(filled, [(0, 2), (1, 0)]);

        assert!(grid.clear(1, 0));
        assert_eq!(grid.read(1, 0), None);
        assert_eq!(grid.iter().count(), 1);
    }
}
