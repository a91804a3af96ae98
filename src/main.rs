use gssim::{hud_text, bench_tick};
use gssim::{InputAdapter, RenderAdapter, Scenario, ScenarioConfig, Snapshot, ThrustDirection, ThrustRepeater};

use clap::{Parser, ValueEnum};
use anyhow::Result;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Thrust {
    Left,
    Right,
    Up,
    Down,
}

impl From<Thrust> for ThrustDirection {
    fn from(t: Thrust) -> Self {
        match t {
            Thrust::Left => ThrustDirection::Left,
            Thrust::Right => ThrustDirection::Right,
            Thrust::Up => ThrustDirection::Up,
            Thrust::Down => ThrustDirection::Down,
        }
    }
}

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Wall-clock seconds to run
    #[arg(long, default_value_t = 60.0)]
    seconds: f64,

    /// Display frames per second
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Hold thrust in one direction for the whole run
    #[arg(long, value_enum)]
    thrust: Option<Thrust>,

    /// Override the scenario's RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Run the tick benchmark instead of a simulation
    #[arg(long)]
    bench: bool,
}

/// Logs the HUD once per simulated second
struct HudLogger {
    next_report: f64,
}

impl RenderAdapter for HudLogger {
    fn render(&mut self, snapshot: &Snapshot) {
        if snapshot.time >= self.next_report {
            log::info!("t = {:.1} s, {} bodies\n{}", snapshot.time, snapshot.bodies.len(), hud_text(snapshot));
            self.next_report += 1.0;
        }
    }
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_tick();
        return Ok(());
    }

    let mut scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    if args.seed.is_some() {
        scenario_cfg.engine.seed = args.seed;
    }

    let Scenario { mut simulation, thrust_repeat, .. } = Scenario::build_scenario(scenario_cfg)?;

    let frame_dt = 1.0 / args.fps.max(1.0);
    let frames = (args.seconds.max(0.0) / frame_dt).ceil() as u64;

    let mut input = ThrustRepeater::new(thrust_repeat);
    if let Some(dir) = args.thrust {
        input.press(dir.into(), 0.0);
    }
    let mut renderer = HudLogger { next_report: 0.0 };

    for frame in 0..frames {
        let now = frame as f64 * frame_dt;

        for dir in input.poll(now) {
            simulation.apply_thrust(&dir.unit());
        }
        simulation.advance(frame_dt);
        renderer.render(&simulation.snapshot());

        if simulation.is_terminal() {
            break;
        }
    }

    let last = simulation.snapshot();
    println!("{}", hud_text(&last));
    println!(
        "state: {:?}, simulated {:.2} s in {} ticks",
        last.state,
        last.time,
        simulation.ticks()
    );

    Ok(())
}
