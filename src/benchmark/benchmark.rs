use std::time::Instant;

use crate::simulation::engine::Simulation;
use crate::simulation::generator::{GroupKind, GroupParams};
use crate::simulation::params::{Parameters, M0};
use crate::simulation::states::{Color, NVec2};

/// Simulation with `n` bodies in one disk around a stationary singularity
fn make_simulation(n: usize, p: &Parameters) -> Simulation {
    let mut sim = Simulation::seeded(p.clone(), NVec2::zeros(), NVec2::zeros(), M0, 42);

    // disk wide enough that most bodies sit outside the influence radius
    let group = GroupParams::new(n, NVec2::zeros(), 2.0 * p.screen_width, NVec2::zeros(), Color::WHITE);
    sim.spawn_group(GroupKind::Disk, &group);
    sim
}

/// Time one physics tick for growing field sizes
/// Paste output directly into excel to graph
pub fn bench_tick() {
    println!("N,tick_ms");

    let p = Parameters::default();

    for n in (1000..=50_000).step_by(1000) {
        // Small n: average over more ticks to smooth noise
        let ticks = if n <= 10_000 { 40 } else { 10 };

        let mut sim = make_simulation(n, &p);

        // Warm-up one tick
        sim.tick();

        let t0 = Instant::now();
        for _ in 0..ticks {
            sim.tick();
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / ticks as f64;

        println!("{},{:.6}", n, ms);
    }
}
