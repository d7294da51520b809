use gridstar_core::Coord;

/// Dense row-major table of cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    rows: i32,
    cols: i32,
    cells: Box<[T]>,
}

impl<T> Grid<T> {
    #[track_caller]
    pub fn new(rows: i32, cols: i32, f: impl FnMut(Coord) -> T) -> Self {
        let r: usize = rows.try_into().expect("rows must be non-negative");
        let c: usize = cols.try_into().expect("cols must be non-negative");
        let cells = (0..r)
            .flat_map(move |row| (0..c).map(move |col| Coord::new(row as i32, col as i32)))
            .map(f)
            .collect();
        Grid { rows, cols, cells }
    }

    #[inline(always)]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline(always)]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    #[inline(always)]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row >= 0 && coord.col >= 0 && coord.row < self.rows && coord.col < self.cols
    }

    #[inline(always)]
    pub fn get(&self, coord: Coord) -> Option<&T> {
        if self.contains(coord) {
            Some(&self.cells[self.index(coord)])
        } else {
            None
        }
    }

    #[inline(always)]
    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut T> {
        if self.contains(coord) {
            let index = self.index(coord);
            Some(&mut self.cells[index])
        } else {
            None
        }
    }

    pub fn storage(&self) -> &[T] {
        &self.cells
    }

    /// Iterates over the rows of the table, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        // chunks_exact panics on 0, and an empty table has no rows anyway
        self.cells.chunks_exact(self.cols.max(1) as usize)
    }

    #[inline(always)]
    fn index(&self, coord: Coord) -> usize {
        self.cols as usize * coord.row as usize + coord.col as usize
    }

    #[track_caller]
    #[inline(always)]
    fn bounds_check(&self, coord: Coord) {
        assert!(coord.row >= 0, "row out of bounds");
        assert!(coord.col >= 0, "col out of bounds");
        assert!(coord.row < self.rows, "row out of bounds");
        assert!(coord.col < self.cols, "col out of bounds");
    }
}

impl<T> std::ops::Index<Coord> for Grid<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, coord: Coord) -> &T {
        self.bounds_check(coord);
        &self.cells[self.index(coord)]
    }
}

impl<T> std::ops::IndexMut<Coord> for Grid<T> {
    #[track_caller]
    fn index_mut(&mut self, coord: Coord) -> &mut T {
        self.bounds_check(coord);
        let index = self.index(coord);
        &mut self.cells[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_are_row_major() {
        let grid = Grid::new(2, 3, |c| c.row * 10 + c.col);
        assert_eq!(grid.storage(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(grid[Coord::new(1, 2)], 12);
        let rows: Vec<_> = grid.iter_rows().collect();
        assert_eq!(rows, [&[0, 1, 2][..], &[10, 11, 12][..]]);
    }

    #[test]
    fn get_is_bounds_checked() {
        let mut grid = Grid::new(2, 2, |_| false);
        assert_eq!(grid.get(Coord::new(-1, 0)), None);
        assert_eq!(grid.get(Coord::new(0, 2)), None);
        *grid.get_mut(Coord::new(1, 1)).unwrap() = true;
        assert_eq!(grid.get(Coord::new(1, 1)), Some(&true));
    }

    #[test]
    #[should_panic(expected = "col out of bounds")]
    fn index_panics_out_of_bounds() {
        let grid = Grid::new(2, 2, |_| 0u8);
        let _ = grid[Coord::new(0, 5)];
    }
}
