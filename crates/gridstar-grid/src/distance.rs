//! Distance functions used both as edge costs and as heuristic estimates.

use std::f64::consts::SQRT_2;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use gridstar_core::Coord;

/// A distance between two cells.
///
/// The search calls this both to cost the move from an expanded cell to a candidate and to
/// estimate the remaining cost from a candidate to the goal. Implementations must be pure and
/// return non-negative values.
pub trait DistanceStrategy: Send + Sync {
    fn distance(&self, from: Coord, to: Coord) -> f64;

    /// Short human-readable name.
    fn label(&self) -> &'static str;

    /// Longer description for help text. Empty by default.
    fn explanation(&self) -> &'static str {
        ""
    }
}

#[inline(always)]
fn deltas(from: Coord, to: Coord) -> (i32, i32) {
    ((from.row - to.row).abs(), (from.col - to.col).abs())
}

/// Taxicab distance: |Δrow| + |Δcol|.
#[derive(Clone, Copy, Debug, Default)]
pub struct Manhattan;

impl DistanceStrategy for Manhattan {
    fn distance(&self, from: Coord, to: Coord) -> f64 {
        let (dr, dc) = deltas(from, to);
        (dr + dc) as f64
    }

    fn label(&self) -> &'static str {
        "Manhattan"
    }

    fn explanation(&self) -> &'static str {
        "Counts moves along rows and columns only, so one diagonal step costs 2. \
         Pairs with 4-directional movement."
    }
}

/// Chessboard distance: max(|Δrow|, |Δcol|).
#[derive(Clone, Copy, Debug, Default)]
pub struct Chebyshev;

impl DistanceStrategy for Chebyshev {
    fn distance(&self, from: Coord, to: Coord) -> f64 {
        let (dr, dc) = deltas(from, to);
        dr.max(dc) as f64
    }

    fn label(&self) -> &'static str {
        "Chebyshev"
    }

    fn explanation(&self) -> &'static str {
        "Treats a diagonal step as costing the same as a straight one. \
         Pairs with 8-directional movement."
    }
}

/// Octile distance: √2 per diagonal step plus 1 per remaining straight step.
#[derive(Clone, Copy, Debug, Default)]
pub struct Octile;

impl DistanceStrategy for Octile {
    fn distance(&self, from: Coord, to: Coord) -> f64 {
        let (dr, dc) = deltas(from, to);
        let diagonals = dr.min(dc);
        let orthos = dr.max(dc) - diagonals;
        orthos as f64 + diagonals as f64 * SQRT_2
    }

    fn label(&self) -> &'static str {
        "Diagonal"
    }

    fn explanation(&self) -> &'static str {
        "Exact distance when movement is restricted to horizontal, vertical and diagonal \
         steps. Pairs with 8-directional movement."
    }
}

/// Straight-line distance.
#[derive(Clone, Copy, Debug, Default)]
pub struct Euclidean;

impl DistanceStrategy for Euclidean {
    fn distance(&self, from: Coord, to: Coord) -> f64 {
        let (dr, dc) = deltas(from, to);
        ((dr * dr + dc * dc) as f64).sqrt()
    }

    fn label(&self) -> &'static str {
        "Euclidean"
    }

    fn explanation(&self) -> &'static str {
        "Ordinary straight-line distance, sqrt(dr^2 + dc^2)."
    }
}

/// Squared straight-line distance.
///
/// Accumulated costs are sums of many small squared steps while the estimate to the goal is one
/// large square, so the estimate dominates and the search runs greedily towards the goal.
#[derive(Clone, Copy, Debug, Default)]
pub struct EuclideanSquared;

impl DistanceStrategy for EuclideanSquared {
    fn distance(&self, from: Coord, to: Coord) -> f64 {
        let (dr, dc) = deltas(from, to);
        (dr * dr + dc * dc) as f64
    }

    fn label(&self) -> &'static str {
        "Euclidean Squared"
    }

    fn explanation(&self) -> &'static str {
        "Euclidean distance without the square root. Cheaper to compute, but it weighs the \
         remaining estimate far above the cost already travelled, so it tends to trade path \
         quality for speed."
    }
}

/// Another strategy multiplied by a constant factor.
///
/// A factor above 1 inflates the estimate (weighted A*): fewer expansions, no optimality
/// guarantee.
#[derive(Clone, Copy, Debug)]
pub struct Scaled<D> {
    pub inner: D,
    pub factor: f64,
}

impl<D: DistanceStrategy> Scaled<D> {
    #[track_caller]
    pub fn new(inner: D, factor: f64) -> Self {
        assert!(factor >= 0.0, "scale factor must be non-negative");
        Scaled { inner, factor }
    }
}

impl<D: DistanceStrategy> DistanceStrategy for Scaled<D> {
    fn distance(&self, from: Coord, to: Coord) -> f64 {
        self.inner.distance(from, to) * self.factor
    }

    fn label(&self) -> &'static str {
        self.inner.label()
    }

    fn explanation(&self) -> &'static str {
        self.inner.explanation()
    }
}

impl<D: DistanceStrategy + ?Sized> DistanceStrategy for Arc<D> {
    fn distance(&self, from: Coord, to: Coord) -> f64 {
        (**self).distance(from, to)
    }

    fn label(&self) -> &'static str {
        (**self).label()
    }

    fn explanation(&self) -> &'static str {
        (**self).explanation()
    }
}

impl<D: DistanceStrategy + ?Sized> DistanceStrategy for Box<D> {
    fn distance(&self, from: Coord, to: Coord) -> f64 {
        (**self).distance(from, to)
    }

    fn label(&self) -> &'static str {
        (**self).label()
    }

    fn explanation(&self) -> &'static str {
        (**self).explanation()
    }
}

/// The built-in distance strategies as a closed set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Heuristic {
    #[default]
    Manhattan,
    Chebyshev,
    Diagonal,
    Euclidean,
    EuclideanSquared,
}

impl Heuristic {
    pub const ALL: [Heuristic; 5] = [
        Heuristic::Manhattan,
        Heuristic::Chebyshev,
        Heuristic::Diagonal,
        Heuristic::Euclidean,
        Heuristic::EuclideanSquared,
    ];

    fn strategy(self) -> &'static dyn DistanceStrategy {
        match self {
            Heuristic::Manhattan => &Manhattan,
            Heuristic::Chebyshev => &Chebyshev,
            Heuristic::Diagonal => &Octile,
            Heuristic::Euclidean => &Euclidean,
            Heuristic::EuclideanSquared => &EuclideanSquared,
        }
    }
}

impl DistanceStrategy for Heuristic {
    #[inline]
    fn distance(&self, from: Coord, to: Coord) -> f64 {
        self.strategy().distance(from, to)
    }

    fn label(&self) -> &'static str {
        self.strategy().label()
    }

    fn explanation(&self) -> &'static str {
        self.strategy().explanation()
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Error returned when parsing an unknown [`Heuristic`] or [`Topology`](crate::Topology) name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} {name:?}")]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
}

impl FromStr for Heuristic {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, UnknownName> {
        match s.to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "manhattan" | "taxicab" => Ok(Heuristic::Manhattan),
            "chebyshev" | "chessboard" => Ok(Heuristic::Chebyshev),
            "diagonal" | "octile" => Ok(Heuristic::Diagonal),
            "euclidean" => Ok(Heuristic::Euclidean),
            "euclideansquared" | "squared" => Ok(Heuristic::EuclideanSquared),
            _ => Err(UnknownName {
                kind: "heuristic",
                name: s.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Coord = Coord::new(1, 2);
    const B: Coord = Coord::new(4, 6);

    #[test]
    fn formulas() {
        assert_eq!(Manhattan.distance(A, B), 7.0);
        assert_eq!(Chebyshev.distance(A, B), 4.0);
        assert!((Octile.distance(A, B) - (3.0 * SQRT_2 + 1.0)).abs() < 1e-12);
        assert_eq!(Euclidean.distance(A, B), 5.0);
        assert_eq!(EuclideanSquared.distance(A, B), 25.0);
    }

    #[test]
    fn symmetric_and_zero_on_self() {
        for h in Heuristic::ALL {
            assert_eq!(h.distance(A, A), 0.0, "{h}");
            assert_eq!(h.distance(A, B), h.distance(B, A), "{h}");
        }
    }

    #[test]
    fn ordering_between_metrics() {
        // chebyshev <= octile <= manhattan and chebyshev <= euclidean <= octile
        for (r, c) in [(0, 5), (3, 3), (2, 7), (9, 1)] {
            let to = Coord::new(r, c);
            let o = Coord::new(0, 0);
            assert!(Chebyshev.distance(o, to) <= Euclidean.distance(o, to));
            assert!(Euclidean.distance(o, to) <= Octile.distance(o, to) + 1e-12);
            assert!(Octile.distance(o, to) <= Manhattan.distance(o, to));
        }
    }

    #[test]
    fn scaled_multiplies() {
        let h = Scaled::new(Manhattan, 2.5);
        assert_eq!(h.distance(A, B), 17.5);
        assert_eq!(h.label(), "Manhattan");
    }

    #[test]
    fn names_parse() {
        for h in Heuristic::ALL {
            assert_eq!(h.label().parse::<Heuristic>(), Ok(h));
        }
        assert_eq!("octile".parse(), Ok(Heuristic::Diagonal));
        assert!("crow".parse::<Heuristic>().is_err());
    }
}
