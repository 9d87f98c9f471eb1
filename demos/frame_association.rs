//! Per-frame track-to-detection association
//!
//! Simulates a handful of targets moving at constant velocity, observed with
//! noise and in random order, and re-identifies them every frame.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use trackmatch::prelude::*;

const NUM_TARGETS: usize = 6;
const NUM_FRAMES: usize = 5;
const MEASUREMENT_NOISE_STD: f64 = 1.5;

fn main() {
    println!("trackmatch: frame-to-frame association");
    println!("======================================\n");

    let mut rng = StdRng::seed_from_u64(42);
    let noise = Normal::new(0.0, MEASUREMENT_NOISE_STD).unwrap();

    let mut tracks: Vec<([f64; 2], [f64; 2])> = (0..NUM_TARGETS)
        .map(|i| {
            let angle = i as f64 * core::f64::consts::TAU / NUM_TARGETS as f64;
            ([100.0 + 60.0 * angle.cos(), 100.0 + 60.0 * angle.sin()], [angle.sin(), -angle.cos()])
        })
        .collect();

    for frame in 0..NUM_FRAMES {
        // Predict
        for (pos, vel) in tracks.iter_mut() {
            pos[0] += vel[0];
            pos[1] += vel[1];
        }

        // Observe in shuffled order
        let mut order: Vec<usize> = (0..NUM_TARGETS).collect();
        order.shuffle(&mut rng);
        let detections: Vec<[f64; 2]> = order
            .iter()
            .map(|&i| {
                let (pos, _) = tracks[i];
                [pos[0] + noise.sample(&mut rng), pos[1] + noise.sample(&mut rng)]
            })
            .collect();

        let costs: Vec<f64> = tracks
            .iter()
            .flat_map(|(pos, _)| {
                detections.iter().map(move |d| {
                    let dx = pos[0] - d[0];
                    let dy = pos[1] - d[1];
                    (dx * dx + dy * dy).sqrt()
                })
            })
            .collect();

        let solver = Solver::new(&costs, tracks.len(), detections.len(), Mode::Minimize)
            .unwrap()
            .solve();
        let result = solver.result();

        println!(
            "Frame {}: {} pairs, total distance {:.2} ({} dual updates)",
            frame,
            result.num_assigned(),
            result.objective,
            solver.stats().dual_updates
        );
        for (track, det) in result.pairs() {
            let ok = if order[det] == track { "ok" } else { "SWAP" };
            println!("  track {} -> detection {} [{}]", track, det, ok);
            tracks[track].0 = detections[det];
        }
        println!();

        solver.finalize();
    }
}
