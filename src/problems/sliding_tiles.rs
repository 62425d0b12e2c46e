//! The sliding-tiles puzzle.
//!
//! A square board with one blank cell (`0`). A move slides a tile adjacent to
//! the blank into it.

use rand::Rng;
use rand::seq::IndexedRandom;
use smallvec::SmallVec;
use thiserror::Error;

/// Errors building a grid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlidingTilesError {
    #[error("The grid has no cells")]
    Empty,

    #[error("Grid side {0} is too large")]
    TooLarge(usize),

    #[error("Grid must be square, but it has {0} cells")]
    NotSquare(usize),

    #[error("Malformed grid, tile {missing} is missing")]
    Malformed { missing: usize },

    #[error("Invalid tile {0:?}")]
    InvalidToken(String),
}

/// Result when building a grid might fail.
pub type Result<T> = std::result::Result<T, SlidingTilesError>;

/// Up to four neighbours, one per direction the blank can move.
pub type SlidingTilesNeighbours = SmallVec<[SlidingTilesGrid; 4]>;

/// A board, stored row-major.
///
/// `tile_index` is the inverse of `cells`, it tells where each tile is.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SlidingTilesGrid {
    side: usize,
    cells: Box<[u8]>,
    tile_index: Box<[usize]>,
}

impl SlidingTilesGrid {
    /// The goal layout, `1..n` row-major with the blank last.
    ///
    /// ```
    /// use greedy_search::problems::sliding_tiles::SlidingTilesGrid;
    ///
    /// let g = SlidingTilesGrid::solved(2).unwrap();
    /// assert_eq!(g.cells(), &[1, 2, 3, 0]);
    /// ```
    pub fn solved(side: usize) -> Result<Self> {
        if side == 0 {
            return Err(SlidingTilesError::Empty);
        }
        let len = side
            .checked_mul(side)
            .filter(|len| *len <= usize::from(u8::MAX) + 1)
            .ok_or(SlidingTilesError::TooLarge(side))?;

        let mut cells: Vec<u8> = (1..len).filter_map(|t| u8::try_from(t).ok()).collect();
        cells.push(0);
        Self::try_from(cells)
    }

    #[inline(always)]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline(always)]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Position of the blank, as `(row, column)`.
    #[inline(always)]
    pub fn blank(&self) -> (usize, usize) {
        let i = self.tile_index[0];
        (i / self.side, i % self.side)
    }

    /// The grid after sliding the tile at `from` into the blank.
    fn slide(&self, from: usize) -> Self {
        let blank = self.tile_index[0];
        let tile = self.cells[from];
        debug_assert_ne!(tile, 0);

        let mut next = self.clone();
        next.cells.swap(blank, from);
        next.tile_index[0] = from;
        next.tile_index[usize::from(tile)] = blank;
        next
    }

    /// Every grid one move away.
    pub fn neighbours(&self) -> SlidingTilesNeighbours {
        let (row, column) = self.blank();
        let blank = self.tile_index[0];
        let side = self.side;

        let mut result = SlidingTilesNeighbours::new();
        if row > 0 {
            result.push(self.slide(blank - side));
        }
        if row + 1 < side {
            result.push(self.slide(blank + side));
        }
        if column > 0 {
            result.push(self.slide(blank - 1));
        }
        if column + 1 < side {
            result.push(self.slide(blank + 1));
        }
        result
    }

    /// Sum over tiles of the row and column distance to their place in
    /// `other`. The blank is not counted.
    ///
    /// Both grids must have the same side.
    pub fn manhattan_distance(&self, other: &Self) -> u64 {
        debug_assert_eq!(self.side, other.side);

        let side = self.side;
        let mut total = 0u64;
        for tile in 1..self.cells.len() {
            let a = self.tile_index[tile];
            let b = other.tile_index[tile];
            let dx = (a % side).abs_diff(b % side);
            let dy = (a / side).abs_diff(b / side);
            total += (dx + dy) as u64;
        }
        total
    }

    /// Makes `moves` random moves from this grid.
    ///
    /// The result can always be solved back into `self`.
    pub fn scramble<R: Rng>(&self, rng: &mut R, moves: usize) -> Self {
        let mut grid = self.clone();
        for _ in 0..moves {
            match grid.neighbours().choose(rng) {
                Some(next) => grid = next.clone(),
                None => break,
            }
        }
        grid
    }

    fn horizontal_rule(
        &self,
        f: &mut std::fmt::Formatter,
        left: char,
        middle: char,
        right: char,
    ) -> std::fmt::Result {
        write!(f, "{left}")?;
        for column in 0..self.side {
            let end = if column + 1 < self.side { middle } else { right };
            write!(f, "─────{end}")?;
        }
        Ok(())
    }

    fn padding_row(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "\n│")?;
        for _ in 0..self.side {
            write!(f, "     │")?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<u8>> for SlidingTilesGrid {
    type Error = SlidingTilesError;

    fn try_from(cells: Vec<u8>) -> Result<Self> {
        if cells.is_empty() {
            return Err(SlidingTilesError::Empty);
        }
        let len = cells.len();
        let side = len.isqrt();
        if side * side != len {
            return Err(SlidingTilesError::NotSquare(len));
        }

        let mut tile_index = vec![usize::MAX; len];
        for (i, tile) in cells.iter().enumerate() {
            if let Some(slot) = tile_index.get_mut(usize::from(*tile)) {
                *slot = i;
            }
        }
        if let Some(missing) = tile_index.iter().position(|i| *i == usize::MAX) {
            return Err(SlidingTilesError::Malformed { missing });
        }

        Ok(Self {
            side,
            cells: cells.into_boxed_slice(),
            tile_index: tile_index.into_boxed_slice(),
        })
    }
}

impl TryFrom<&str> for SlidingTilesGrid {
    type Error = SlidingTilesError;

    /// Reads whitespace-separated tiles, row-major.
    ///
    /// ```
    /// use greedy_search::problems::sliding_tiles::SlidingTilesGrid;
    ///
    /// let g = SlidingTilesGrid::try_from("1 2\n3 0").unwrap();
    /// assert_eq!(g.side(), 2);
    /// assert_eq!(g.blank(), (1, 1));
    /// ```
    fn try_from(s: &str) -> Result<Self> {
        let cells = s
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<u8>()
                    .map_err(|_| SlidingTilesError::InvalidToken(token.to_owned()))
            })
            .collect::<Result<Vec<u8>>>()?;
        Self::try_from(cells)
    }
}

impl std::str::FromStr for SlidingTilesGrid {
    type Err = SlidingTilesError;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_from(s)
    }
}

impl std::fmt::Display for SlidingTilesGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.horizontal_rule(f, '┌', '┬', '┐')?;
        for (r, row) in self.cells.chunks(self.side).enumerate() {
            self.padding_row(f)?;
            write!(f, "\n│")?;
            for tile in row {
                match tile {
                    0 => write!(f, "     │")?,
                    t => write!(f, "{t:3}  │")?,
                }
            }
            self.padding_row(f)?;

            writeln!(f)?;
            if r + 1 < self.side {
                self.horizontal_rule(f, '├', '┼', '┤')?;
            } else {
                self.horizontal_rule(f, '└', '┴', '┘')?;
            }
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::algorithms::greedy::search;

    fn grid(s: &str) -> SlidingTilesGrid {
        SlidingTilesGrid::try_from(s).unwrap()
    }

    #[test]
    fn parse() {
        let g = grid(indoc! {"
            0 2 1
            6 7 4
            3 8 5
        "});
        assert_eq!(g.side(), 3);
        assert_eq!(g.cells(), &[0, 2, 1, 6, 7, 4, 3, 8, 5]);
        assert_eq!(g.blank(), (0, 0));
        assert_eq!("1 0 2 3".parse::<SlidingTilesGrid>(), Ok(grid("1 0 2 3")));
    }

    #[test]
    fn validation() {
        assert_eq!(
            SlidingTilesGrid::try_from(""),
            Err(SlidingTilesError::Empty)
        );
        assert_eq!(
            SlidingTilesGrid::try_from("0 1 2"),
            Err(SlidingTilesError::NotSquare(3))
        );
        assert_eq!(
            SlidingTilesGrid::try_from("0 1 1 3"),
            Err(SlidingTilesError::Malformed { missing: 2 })
        );
        assert_eq!(
            SlidingTilesGrid::try_from("0 1 2 9"),
            Err(SlidingTilesError::Malformed { missing: 3 })
        );
        assert_eq!(
            SlidingTilesGrid::try_from("0 1 x 3"),
            Err(SlidingTilesError::InvalidToken("x".to_owned()))
        );
        assert_eq!(SlidingTilesGrid::solved(0), Err(SlidingTilesError::Empty));
        assert_eq!(
            SlidingTilesGrid::solved(17),
            Err(SlidingTilesError::TooLarge(17))
        );
        assert_eq!(
            SlidingTilesError::NotSquare(3).to_string(),
            "Grid must be square, but it has 3 cells"
        );
    }

    #[test]
    fn neighbour_counts() {
        // Corner, edge and centre blanks.
        assert_eq!(grid("0 1 2 3 4 5 6 7 8").neighbours().len(), 2);
        assert_eq!(grid("1 0 2 3 4 5 6 7 8").neighbours().len(), 3);
        assert_eq!(grid("1 2 3 4 0 5 6 7 8").neighbours().len(), 4);
        assert_eq!(grid("0").neighbours().len(), 0);
    }

    #[test]
    fn neighbours_slide_one_tile() {
        let g = grid("1 2 3 4 0 5 6 7 8");
        let n = g.neighbours();
        assert!(n.contains(&grid("1 0 3 4 2 5 6 7 8")));
        assert!(n.contains(&grid("1 2 3 4 7 5 6 0 8")));
        assert!(n.contains(&grid("1 2 3 0 4 5 6 7 8")));
        assert!(n.contains(&grid("1 2 3 4 5 0 6 7 8")));

        // Moving back restores the grid, index included.
        for next in &n {
            assert!(next.neighbours().contains(&g));
        }
    }

    #[test]
    fn manhattan() {
        let goal = SlidingTilesGrid::solved(3).unwrap();
        assert_eq!(goal.manhattan_distance(&goal), 0);

        // One move away.
        let g = grid("1 2 3 4 5 6 7 0 8");
        assert_eq!(g.manhattan_distance(&goal), 1);

        // Tiles 1, 2, 7 and 8 are 3 away each. The blank is ignored.
        let g = grid("8 7 3 4 5 6 2 1 0");
        assert_eq!(g.manhattan_distance(&goal), 12);
    }

    #[test]
    fn scrambles_are_reproducible() {
        let goal = SlidingTilesGrid::solved(3).unwrap();
        let a = goal.scramble(&mut ChaCha8Rng::seed_from_u64(7), 30);
        let b = goal.scramble(&mut ChaCha8Rng::seed_from_u64(7), 30);
        assert_eq!(a, b);
        assert_eq!(goal.scramble(&mut ChaCha8Rng::seed_from_u64(7), 0), goal);
    }

    #[test]
    fn display() {
        let g = grid("1 2 3 0");
        let expected = indoc! {"
            ┌─────┬─────┐
            │     │     │
            │  1  │  2  │
            │     │     │
            ├─────┼─────┤
            │     │     │
            │  3  │     │
            │     │     │
            └─────┴─────┘
        "};
        assert_eq!(g.to_string(), expected);
    }

    #[test]
    fn solves_the_classic_puzzle() {
        let start = grid("0 2 1 6 7 4 3 8 5");
        let goal = grid("1 2 3 8 0 4 7 6 5");

        let path = search(
            start.clone(),
            |g| g.manhattan_distance(&goal) as f64,
            |g| *g == goal,
            SlidingTilesGrid::neighbours,
        )
        .unwrap();

        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        for w in path.windows(2) {
            assert!(w[0].neighbours().contains(&w[1]));
        }
    }

    #[test]
    fn solves_scrambles() {
        let goal = SlidingTilesGrid::solved(3).unwrap();
        for seed in 0..5u64 {
            let start = goal.scramble(&mut ChaCha8Rng::seed_from_u64(seed), 40);
            let path = search(
                start.clone(),
                |g| g.manhattan_distance(&goal) as f64,
                |g| *g == goal,
                SlidingTilesGrid::neighbours,
            )
            .unwrap();
            assert_eq!(path.first(), Some(&start));
            assert_eq!(path.last(), Some(&goal));
        }
    }
}
