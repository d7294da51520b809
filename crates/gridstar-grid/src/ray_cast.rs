use std::f64::consts::TAU;

use gridstar_core::{Coord, Point};

use crate::{DistanceStrategy, GridMap, NeighborStrategy};

/// Ray-casting "jump point" neighbor selection.
///
/// Casts `spokes` rays at even angular intervals from the expanded cell. Each ray advances one
/// unit at a time, snapping to the nearest cell, and ends on the last traversable cell it reached
/// before:
/// - reaching the goal,
/// - getting as far from the origin as the jump limit, measured with the active distance
///   strategy, where the limit is a quarter of the map's shorter side but at least 2,
/// - stepping off the map or onto an obstacle.
///
/// The resulting candidates are usually not adjacent to the origin, which lets the search cross
/// open areas in a handful of expansions. A cell reached by several rays is emitted once.
#[derive(Clone, Copy, Debug)]
pub struct RayCast {
    spokes: u32,
}

impl RayCast {
    pub const DEFAULT_SPOKES: u32 = 64;

    pub const fn new() -> Self {
        RayCast {
            spokes: Self::DEFAULT_SPOKES,
        }
    }

    #[track_caller]
    pub fn with_spokes(spokes: u32) -> Self {
        assert!(spokes > 0, "at least one spoke is required");
        RayCast { spokes }
    }

    pub fn spokes(&self) -> u32 {
        self.spokes
    }

    /// How far a single ray may travel on `map`.
    pub fn jump_limit(map: &GridMap) -> f64 {
        (map.rows().min(map.cols()) / 4).max(2) as f64
    }

    fn cast(
        &self,
        map: &GridMap,
        origin: Coord,
        angle: f64,
        limit: f64,
        distance: &dyn DistanceStrategy,
    ) -> Coord {
        let goal = map.goal();
        let (sin, cos) = angle.sin_cos();
        let mut last = origin;
        for step in 1.. {
            let step = step as f64;
            let next = Coord::new(
                (origin.row as f64 + sin * step).round() as i32,
                (origin.col as f64 + cos * step).round() as i32,
            );
            if !map.is_traversable(next) {
                break;
            }
            last = next;
            if next == goal || distance.distance(origin, next) >= limit {
                break;
            }
        }
        last
    }
}

impl Default for RayCast {
    fn default() -> Self {
        Self::new()
    }
}

impl NeighborStrategy for RayCast {
    fn neighbors(
        &self,
        map: &GridMap,
        cursor: Coord,
        distance: &dyn DistanceStrategy,
        out: &mut Vec<Point>,
    ) {
        let limit = Self::jump_limit(map);
        let first = out.len();
        for spoke in 0..self.spokes {
            let angle = TAU * spoke as f64 / self.spokes as f64;
            let end = self.cast(map, cursor, angle, limit, distance);
            if end != cursor && !out[first..].iter().any(|p| p.coord == end) {
                out.push(Point::new(end));
            }
        }
    }

    fn label(&self) -> &'static str {
        "Jump Point"
    }

    fn explanation(&self) -> &'static str {
        "Casts rays outwards from the cursor and offers the far end of each one instead of the \
         adjacent cells. Crosses open areas in few steps, at the cost of paths that bend at \
         odd angles."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Euclidean, Manhattan};

    fn cast_all(map: &GridMap, at: Coord, distance: &dyn DistanceStrategy) -> Vec<Coord> {
        let mut out = vec![];
        RayCast::new().neighbors(map, at, distance, &mut out);
        out.iter().map(|p| p.coord).collect()
    }

    #[test]
    fn rays_stop_at_the_jump_limit() {
        let map = GridMap::open(20, 20, Coord::new(0, 0), Coord::new(19, 19)).unwrap();
        let origin = Coord::new(10, 10);
        assert_eq!(RayCast::jump_limit(&map), 5.0);

        let ends = cast_all(&map, origin, &Manhattan);
        assert!(ends.len() >= 8);
        for &end in &ends {
            let d = Manhattan.distance(origin, end);
            assert!((5.0..=6.0).contains(&d), "{end} at {d}");
        }
        assert!(ends.contains(&Coord::new(10, 15)));
        assert!(ends.contains(&Coord::new(5, 10)));
    }

    #[test]
    fn rays_stop_on_the_goal() {
        let map = GridMap::open(20, 20, Coord::new(10, 10), Coord::new(10, 13)).unwrap();
        let ends = cast_all(&map, Coord::new(10, 10), &Euclidean);
        assert!(ends.contains(&Coord::new(10, 13)));
        assert!(!ends.contains(&Coord::new(10, 15)));
    }

    #[test]
    fn rays_never_cross_walls() {
        let mut map = GridMap::open(20, 20, Coord::new(10, 10), Coord::new(0, 0)).unwrap();
        for row in 0..20 {
            map.set_traversable(Coord::new(row, 12), false).unwrap();
        }
        let ends = cast_all(&map, Coord::new(10, 10), &Euclidean);
        assert!(ends.iter().all(|c| c.col < 12));
        assert!(ends.iter().all(|&c| map.is_traversable(c)));
        assert!(ends.contains(&Coord::new(10, 11)));
    }

    #[test]
    fn no_duplicates_and_never_the_origin() {
        let map = GridMap::open(3, 3, Coord::new(0, 0), Coord::new(2, 2)).unwrap();
        assert_eq!(RayCast::jump_limit(&map), 2.0);
        let origin = Coord::new(1, 1);
        let ends = cast_all(&map, origin, &Manhattan);
        assert!(!ends.contains(&origin));
        let mut dedup = ends.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), ends.len());
        // every other cell of a 3x3 map is the end of some ray
        assert_eq!(ends.len(), 8);
    }

    #[test]
    fn boxed_in_origin_has_no_candidates() {
        let map = GridMap::parse(
            "
            ###.
            #S#.
            ###G
            ",
        )
        .unwrap();
        assert!(cast_all(&map, Coord::new(1, 1), &Manhattan).is_empty());
    }
}
