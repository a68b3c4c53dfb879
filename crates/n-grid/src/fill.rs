// SPDX-License-Identifier: MIT
//
// Region fill — repaint the 4-connected region around a seed cell.
//
// The region is every cell reachable from the seed through up/down/left/
// right steps whose color equals the seed's color when the fill starts.
// Diagonal neighbours never count.
//
// Eligibility is inspect-then-act: a cell qualifies if it is on the grid
// and still holds the region color. Repainting a cell removes it from the
// region on the spot, so no separate "visited" set is needed. Filling a
// region with its own color would break that argument (nothing ever stops
// qualifying), which is why `fill_region` returns before visiting anything
// when the seed already has the target color.
//
// Two traversals, same result:
//
//   Iterative  — explicit `Vec` work stack on the heap. A cell is repainted
//                as it is pushed, so it is never queued twice and the stack
//                holds at most `width × height` entries.
//
//   Recursive  — repaint, then recurse up, down, right, left. Call depth
//                grows with region size, up to `width × height` frames. The
//                filler only runs it on grids no larger than its
//                `recursion_limit`; bigger grids use the iterative walk.
//
// The final coloring is the connected-component closure either way. Only
// the memory used while getting there differs.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::color::Color;
use crate::error::Result;
use crate::grid::Grid;

/// Hard ceiling on the recursion limit, in cells.
///
/// 4 096 cells is a 64×64 canvas; at a few hundred bytes per frame in
/// debug builds that stays well inside a 2 MiB thread stack. Larger limits
/// are clamped to this value.
pub const MAX_RECURSION_LIMIT: usize = 4_096;

/// Largest grid (in cells) the recursive strategy runs on by default.
pub const DEFAULT_RECURSION_LIMIT: usize = MAX_RECURSION_LIMIT;

// ─── FillStrategy ───────────────────────────────────────────────────────────────

/// How [`RegionFiller`] walks a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FillStrategy {
    /// Heap-backed work stack. Safe on any grid size.
    #[default]
    Iterative,
    /// Call-stack recursion, bounded by the filler's recursion limit.
    Recursive,
}

impl FillStrategy {
    /// Lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Iterative => "iterative",
            Self::Recursive => "recursive",
        }
    }
}

impl fmt::Display for FillStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A strategy name that is neither `iterative` nor `recursive`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown fill strategy '{0}' (expected 'iterative' or 'recursive')")]
pub struct ParseStrategyError(pub String);

impl FromStr for FillStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "iterative" => Ok(Self::Iterative),
            "recursive" => Ok(Self::Recursive),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

// ─── RegionFiller ───────────────────────────────────────────────────────────────

/// Flood-fills regions of a [`Grid`] with a configured strategy.
///
/// The strategy belongs to whoever owns the filler (the editing session),
/// never to the grid.
///
/// # Examples
///
/// ```
/// use n_grid::{Color, FillStrategy, Grid, RegionFiller};
///
/// let mut grid: Grid = "000\n0X0\n000\n".parse().unwrap();
/// let filler = RegionFiller::new(FillStrategy::Recursive);
///
/// let painted = filler.fill_region(&mut grid, 1, 1, Color::new('o')).unwrap();
/// assert_eq!(painted, 8);
/// assert_eq!(grid.serialize(), "ooo\noXo\nooo\n");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionFiller {
    strategy: FillStrategy,
    recursion_limit: usize,
}

impl RegionFiller {
    /// A filler using `strategy` and [`DEFAULT_RECURSION_LIMIT`].
    #[must_use]
    pub const fn new(strategy: FillStrategy) -> Self {
        Self {
            strategy,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Replace the largest grid size (in cells) that may be filled recursively.
    ///
    /// Values above [`MAX_RECURSION_LIMIT`] are clamped to it.
    #[must_use]
    pub const fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = if limit < MAX_RECURSION_LIMIT {
            limit
        } else {
            MAX_RECURSION_LIMIT
        };
        self
    }

    /// The configured strategy.
    #[inline]
    #[must_use]
    pub const fn strategy(&self) -> FillStrategy {
        self.strategy
    }

    /// The configured recursion limit, in cells.
    #[inline]
    #[must_use]
    pub const fn recursion_limit(&self) -> usize {
        self.recursion_limit
    }

    /// The strategy that will actually run on `grid`.
    ///
    /// `Recursive` degrades to `Iterative` when the grid has more cells than
    /// the recursion limit, because a region can span the whole grid.
    #[must_use]
    pub fn effective_strategy(&self, grid: &Grid) -> FillStrategy {
        match self.strategy {
            FillStrategy::Recursive if grid.cell_count() <= self.recursion_limit => {
                FillStrategy::Recursive
            }
            _ => FillStrategy::Iterative,
        }
    }

    /// Repaint the region containing `(x, y)` with `color`.
    ///
    /// Returns the number of cells repainted, which is `0` when the seed
    /// already has `color`.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`](crate::GridError::OutOfBounds) if the seed
    /// is off the grid. The grid is untouched in that case.
    pub fn fill_region(&self, grid: &mut Grid, x: i32, y: i32, color: Color) -> Result<usize> {
        let region = grid.get(x, y)?;
        if region == color {
            return Ok(0);
        }

        let painted = match self.effective_strategy(grid) {
            FillStrategy::Iterative => fill_iterative(grid, x, y, region, color),
            FillStrategy::Recursive => fill_recursive(grid, x, y, region, color),
        };
        Ok(painted)
    }
}

impl Default for RegionFiller {
    fn default() -> Self {
        Self::new(FillStrategy::default())
    }
}

// ─── Traversals ─────────────────────────────────────────────────────────────────

/// The four orthogonal neighbours of `(x, y)` in visiting order:
/// up, down, right, left.
const fn neighbors(x: i32, y: i32) -> [(i32, i32); 4] {
    [
        (x, y.saturating_sub(1)),
        (x, y.saturating_add(1)),
        (x.saturating_add(1), y),
        (x.saturating_sub(1), y),
    ]
}

/// Repaint `(x, y)` if it is on the grid and still holds `region`.
///
/// Returns whether the cell was repainted.
fn claim(grid: &mut Grid, x: i32, y: i32, region: Color, color: Color) -> bool {
    grid.color_at(x, y) == Some(region) && grid.set(x, y, color).is_ok()
}

fn fill_iterative(grid: &mut Grid, x: i32, y: i32, region: Color, color: Color) -> usize {
    if !claim(grid, x, y, region, color) {
        return 0;
    }

    let mut pending = vec![(x, y)];
    let mut painted = 1;

    while let Some((cx, cy)) = pending.pop() {
        for (nx, ny) in neighbors(cx, cy) {
            if claim(grid, nx, ny, region, color) {
                painted += 1;
                pending.push((nx, ny));
            }
        }
    }
    painted
}

fn fill_recursive(grid: &mut Grid, x: i32, y: i32, region: Color, color: Color) -> usize {
    if !claim(grid, x, y, region, color) {
        return 0;
    }

    let mut painted = 1;
    for (nx, ny) in neighbors(x, y) {
        painted += fill_recursive(grid, nx, ny, region, color);
    }
    painted
}

// ─── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;
    use pretty_assertions::assert_eq;

    const BOTH: [FillStrategy; 2] = [FillStrategy::Iterative, FillStrategy::Recursive];

    fn c(ch: char) -> Color {
        Color::new(ch)
    }

    fn grid(text: &str) -> Grid {
        text.parse().unwrap()
    }

    // ── Strategy parsing ────────────────────────────────────────────────

    #[test]
    fn strategy_from_str() {
        assert_eq!("iterative".parse::<FillStrategy>(), Ok(FillStrategy::Iterative));
        assert_eq!("Recursive".parse::<FillStrategy>(), Ok(FillStrategy::Recursive));
        assert_eq!(" recursive ".parse::<FillStrategy>(), Ok(FillStrategy::Recursive));
        assert_eq!(
            "rec".parse::<FillStrategy>(),
            Err(ParseStrategyError("rec".into()))
        );
        assert_eq!(
            "bfs".parse::<FillStrategy>(),
            Err(ParseStrategyError("bfs".into()))
        );
    }

    #[test]
    fn strategy_display_round_trips() {
        for strategy in BOTH {
            assert_eq!(strategy.to_string().parse::<FillStrategy>(), Ok(strategy));
        }
    }

    #[test]
    fn default_filler_is_iterative() {
        let filler = RegionFiller::default();
        assert_eq!(filler.strategy(), FillStrategy::Iterative);
        assert_eq!(filler.recursion_limit(), DEFAULT_RECURSION_LIMIT);
    }

    // ── Fill semantics ──────────────────────────────────────────────────

    #[test]
    fn fills_enclosed_background_only() {
        for strategy in BOTH {
            let mut g = grid("XXXXX\nX000X\nX0X0X\nX000X\nXXXXX\n");
            let painted = RegionFiller::new(strategy)
                .fill_region(&mut g, 2, 2, c('o'))
                .unwrap();
            assert_eq!(painted, 8, "{strategy}");
            assert_eq!(
                g.serialize(),
                "XXXXX\nXoooX\nXoXoX\nXoooX\nXXXXX\n",
                "{strategy}"
            );
        }
    }

    #[test]
    fn diagonal_neighbours_are_not_connected() {
        for strategy in BOTH {
            let mut g = grid("0X0\nX0X\n0X0\n");
            let painted = RegionFiller::new(strategy)
                .fill_region(&mut g, 2, 2, c('d'))
                .unwrap();
            assert_eq!(painted, 1, "{strategy}");
            assert_eq!(g.serialize(), "0X0\nXdX\n0X0\n", "{strategy}");
        }
    }

    #[test]
    fn same_color_fill_is_a_no_op() {
        for strategy in BOTH {
            let mut g = grid("AAB\nABB\n");
            let before = g.clone();
            let painted = RegionFiller::new(strategy)
                .fill_region(&mut g, 1, 1, c('A'))
                .unwrap();
            assert_eq!(painted, 0);
            assert_eq!(g, before);
        }
    }

    #[test]
    fn fill_is_idempotent() {
        for strategy in BOTH {
            let filler = RegionFiller::new(strategy);
            let mut g = grid("0110\n0010\n1100\n");
            filler.fill_region(&mut g, 1, 1, c('z')).unwrap();
            let once = g.clone();
            assert_eq!(filler.fill_region(&mut g, 1, 1, c('z')).unwrap(), 0);
            assert_eq!(g, once);
        }
    }

    #[test]
    fn any_seed_in_region_gives_same_grid() {
        let base = grid("..#..\n.##..\n...#.\n#....\n");
        for strategy in BOTH {
            let filler = RegionFiller::new(strategy);
            let mut results = Vec::new();
            for (x, y) in [(1, 1), (5, 1), (3, 3), (5, 4), (2, 4)] {
                let mut g = base.clone();
                filler.fill_region(&mut g, x, y, c('~')).unwrap();
                results.push(g);
            }
            assert!(results.windows(2).all(|w| w[0] == w[1]), "{strategy}");
        }
    }

    #[test]
    fn strategies_agree() {
        let base = grid(
            "0000000000\n0111111110\n0100000010\n0101111010\n\
             0101001010\n0101111010\n0100000010\n0111101110\n0000000000\n",
        );
        for (x, y) in [(1, 1), (3, 3), (5, 5), (2, 2), (6, 8)] {
            let mut iterative = base.clone();
            let mut recursive = base.clone();
            let a = RegionFiller::new(FillStrategy::Iterative)
                .fill_region(&mut iterative, x, y, c('*'))
                .unwrap();
            let b = RegionFiller::new(FillStrategy::Recursive)
                .fill_region(&mut recursive, x, y, c('*'))
                .unwrap();
            assert_eq!(a, b, "seed ({x}, {y})");
            assert_eq!(iterative, recursive, "seed ({x}, {y})");
        }
    }

    #[test]
    fn whole_grid_region() {
        for strategy in BOTH {
            let mut g = Grid::new(8, 8).unwrap();
            let painted = RegionFiller::new(strategy)
                .fill_region(&mut g, 8, 8, c('W'))
                .unwrap();
            assert_eq!(painted, 64);
            assert!(g.rows().flatten().all(|&cell| cell == c('W')));
        }
    }

    #[test]
    fn seed_out_of_bounds_fails_without_painting() {
        for strategy in BOTH {
            let mut g = Grid::new(3, 3).unwrap();
            let err = RegionFiller::new(strategy)
                .fill_region(&mut g, 4, 1, c('x'))
                .unwrap_err();
            assert!(matches!(err, GridError::OutOfBounds { x: 4, y: 1, .. }));
            assert_eq!(g, Grid::new(3, 3).unwrap());
        }
    }

    #[test]
    fn rectangles_example() {
        for strategy in BOTH {
            let mut g = Grid::new(10, 9).unwrap();
            g.draw_rectangle(1, 1, 4, 2, c('X')).unwrap();
            g.draw_rectangle(2, 7, 8, 8, c('E')).unwrap();
            g.draw_rectangle(1, 3, 2, 6, c('R')).unwrap();

            let filler = RegionFiller::new(strategy);
            assert_eq!(filler.fill_region(&mut g, 2, 2, c('K')).unwrap(), 8);
            assert_eq!(filler.fill_region(&mut g, 3, 8, c('J')).unwrap(), 14);

            assert_eq!(
                g.serialize(),
                "KKKK000000\n\
                 KKKK000000\n\
                 RR00000000\n\
                 RR00000000\n\
                 RR00000000\n\
                 RR00000000\n\
                 0JJJJJJJ00\n\
                 0JJJJJJJ00\n\
                 0000000000\n",
                "{strategy}"
            );
        }
    }

    #[test]
    fn background_fill_around_shapes() {
        for strategy in BOTH {
            let mut g = Grid::new(10, 9).unwrap();
            g.draw_rectangle(1, 1, 4, 2, c('X')).unwrap();
            g.draw_rectangle(2, 7, 8, 8, c('E')).unwrap();
            g.draw_rectangle(1, 3, 2, 6, c('R')).unwrap();

            let painted = RegionFiller::new(strategy)
                .fill_region(&mut g, 10, 9, c('.'))
                .unwrap();
            assert_eq!(painted, 90 - 8 - 14 - 8);
            assert_eq!(g.get(5, 1).unwrap(), c('.'));
            assert_eq!(g.get(1, 9).unwrap(), c('.'));
            assert_eq!(g.get(1, 7).unwrap(), c('.'));
            assert_eq!(g.get(3, 3).unwrap(), c('.'));
        }
    }

    // ── Recursion limit ─────────────────────────────────────────────────

    #[test]
    fn recursive_runs_within_limit() {
        let g = Grid::new(10, 10).unwrap();
        let filler = RegionFiller::new(FillStrategy::Recursive).with_recursion_limit(100);
        assert_eq!(filler.effective_strategy(&g), FillStrategy::Recursive);
    }

    #[test]
    fn recursive_falls_back_above_limit() {
        let mut g = Grid::new(300, 300).unwrap();
        let filler = RegionFiller::new(FillStrategy::Recursive).with_recursion_limit(99);
        assert_eq!(filler.effective_strategy(&g), FillStrategy::Iterative);

        let painted = filler.fill_region(&mut g, 150, 150, c('f')).unwrap();
        assert_eq!(painted, 300 * 300);
    }

    #[test]
    fn iterative_never_switches() {
        let g = Grid::new(2, 2).unwrap();
        let filler = RegionFiller::new(FillStrategy::Iterative).with_recursion_limit(usize::MAX);
        assert_eq!(filler.effective_strategy(&g), FillStrategy::Iterative);
    }

    #[test]
    fn oversized_limit_is_clamped() {
        let filler =
            RegionFiller::new(FillStrategy::Recursive).with_recursion_limit(2_000_000);
        assert_eq!(filler.recursion_limit(), MAX_RECURSION_LIMIT);

        let mut g = Grid::new(1000, 1000).unwrap();
        assert_eq!(filler.effective_strategy(&g), FillStrategy::Iterative);
        let painted = filler.fill_region(&mut g, 1, 1, c('z')).unwrap();
        assert_eq!(painted, 1000 * 1000);
    }

    #[test]
    fn recursive_whole_grid_at_max_limit() {
        let mut g = Grid::new(64, 64).unwrap();
        let filler = RegionFiller::new(FillStrategy::Recursive);
        assert_eq!(g.cell_count(), MAX_RECURSION_LIMIT);
        assert_eq!(filler.effective_strategy(&g), FillStrategy::Recursive);

        let painted = filler.fill_region(&mut g, 1, 1, c('r')).unwrap();
        assert_eq!(painted, 64 * 64);
        assert!(g.rows().flatten().all(|&cell| cell == c('r')));
    }
}
