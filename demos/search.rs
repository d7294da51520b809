use std::path::PathBuf;

use clap::Parser;
use gridstar::grid::{Grid, GridMap, Heuristic, Topology};
use gridstar::{Coord, SearchConfig, SearchEngine, Status};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use rayon::prelude::*;

#[derive(Parser)]
struct Options {
    /// ASCII map to search. Random maps are generated when omitted.
    map: Option<PathBuf>,
    /// Only run this heuristic.
    #[arg(long)]
    heuristic: Option<Heuristic>,
    /// Only run this neighbor topology.
    #[arg(long)]
    topology: Option<Topology>,
    #[arg(long)]
    dijkstra: bool,
    #[arg(long)]
    shuffle: bool,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value_t = 40)]
    rows: i32,
    #[arg(long, default_value_t = 60)]
    cols: i32,
    #[arg(long, default_value_t = 0.3)]
    density: f64,
    #[arg(long, default_value_t = 4)]
    count: u64,
}

fn random_map(seed: u64, rows: i32, cols: i32, density: f64) -> GridMap {
    let mut rng = Pcg64::seed_from_u64(seed);
    let start = Coord::new(rng.gen_range(0..rows), rng.gen_range(0..cols));
    let goal = Coord::new(rng.gen_range(0..rows), rng.gen_range(0..cols));
    let obstacles = Grid::new(rows, cols, |c| c != start && c != goal && rng.gen_bool(density));
    GridMap::new(obstacles, start, goal, seed).unwrap()
}

fn main() {
    let opt = Options::parse();

    let maps = match &opt.map {
        Some(path) => vec![std::fs::read_to_string(path).unwrap().parse().unwrap()],
        None => (0..opt.count)
            .map(|i| random_map(opt.seed + i, opt.rows, opt.cols, opt.density))
            .collect(),
    };

    let heuristics: Vec<Heuristic> = match opt.heuristic {
        Some(h) => vec![h],
        None => Heuristic::ALL.to_vec(),
    };
    let topologies: Vec<Topology> = match opt.topology {
        Some(t) => vec![t],
        None => Topology::ALL.to_vec(),
    };

    let mut runs = vec![];
    for map in &maps {
        for &heuristic in &heuristics {
            for &topology in &topologies {
                runs.push((map, heuristic, topology));
            }
        }
    }

    let results: Vec<_> = runs
        .par_iter()
        .map(|&(map, heuristic, topology)| {
            let config = SearchConfig::default()
                .with_heuristic(heuristic)
                .with_neighbors(topology)
                .with_dijkstra(opt.dijkstra)
                .with_shuffle(opt.shuffle, opt.seed);
            let mut search = SearchEngine::with_config(map.clone(), config);
            let t = std::time::Instant::now();
            let status = search.solve();
            let elapsed = t.elapsed();
            let path = search.path();
            (map, heuristic, topology, status, path, search.steps(), elapsed)
        })
        .collect();

    let mut last_map = None;
    for (map, heuristic, topology, status, path, steps, elapsed) in results {
        if last_map != Some(map.seed()) {
            println!("{}", map.summary());
            last_map = Some(map.seed());
        }
        match status {
            Status::CompletedFound => println!(
                "  {heuristic:<18} {topology:<14} cost {:>8.2} cells {:>4} steps {:>6} {:.2?}",
                path[0].from_cost,
                path.len(),
                steps,
                elapsed,
            ),
            _ => println!("  {heuristic:<18} {topology:<14} {status} after {steps} steps"),
        }
    }
}
