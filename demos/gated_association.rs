//! Association with missed detections and clutter
//!
//! A gate keeps far-away clutter from being paired with a track whose own
//! detection was missed.

use trackmatch::{assign, assign_gated, Mode};

const GATE: f64 = 10.0;

fn main() {
    let tracks = [[10.0, 10.0], [50.0, 10.0], [90.0, 10.0]];
    // Track 1 is missed; the last detection is clutter
    let detections = [[11.0, 9.5], [89.0, 11.0], [70.0, 80.0]];

    let costs: Vec<f64> = tracks
        .iter()
        .flat_map(|t: &[f64; 2]| {
            detections.iter().map(move |d: &[f64; 2]| {
                let dx = t[0] - d[0];
                let dy = t[1] - d[1];
                (dx * dx + dy * dy).sqrt()
            })
        })
        .collect();

    let plain = assign(&costs, tracks.len(), detections.len(), Mode::Minimize).unwrap();
    let gated =
        assign_gated(&costs, tracks.len(), detections.len(), Mode::Minimize, GATE).unwrap();

    println!("Without gate: {:?} (total {:.2})", plain.mapping, plain.objective);
    println!("With gate {}: {:?} (total {:.2})", GATE, gated.mapping, gated.objective);

    for track in gated.unassigned_rows() {
        println!("  track {} coasts this frame", track);
    }
    for det in 0..detections.len() {
        if gated.row_of(det).is_none() {
            println!("  detection {} starts a tentative track", det);
        }
    }
}
