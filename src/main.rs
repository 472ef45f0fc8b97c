//! Headless demo: runs a scripted input sequence through the full
//! control → movement → physics stack and logs what the simulation reports.

use std::path::PathBuf;

use clap::Parser;
use log::info;
use pollster::block_on;

use aetherfall_core::scene::load_demo_level;
use aetherfall_core::{
    run_tick, ActionState, MovementCoordinator, PhysicsCoordinator, PlayerController, Tuning,
};

const TICK_DT: f32 = 1.0 / 60.0;

#[derive(Parser)]
#[command(name = "aetherfall-core", about = "Platformer physics core demo")]
struct Args {
    /// Number of fixed simulation ticks to run
    #[arg(long, default_value_t = 360)]
    ticks: u32,

    /// Optional RON tuning file overriding the default physics numbers
    #[arg(long)]
    tuning: Option<PathBuf>,
}

/// Scripted input: walk right, one held jump, later one tapped jump so the
/// variable-height cut is visible in the trace.
fn scripted_input(tick: u32) -> ActionState {
    ActionState {
        move_left: false,
        move_right: tick < 240,
        jump_pressed: tick == 40 || tick == 150,
        jump_held: (40..70).contains(&tick) || tick == 150,
        dash_pressed: tick == 220,
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => match aetherfall_core::tuning::load_tuning(path) {
            Ok(tuning) => tuning,
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let mut physics = PhysicsCoordinator::new(tuning.clone());
    let mut movement = MovementCoordinator::new();
    let level = load_demo_level(&mut physics).expect("demo level geometry is valid");
    let mut controller = PlayerController::new(level.player);

    for tick in 0..args.ticks {
        let input = scripted_input(tick);
        controller
            .update(&input, &mut physics, &mut movement, &tuning, TICK_DT)
            .expect("player entity stays registered");

        for event in run_tick(&mut physics, &mut movement, TICK_DT) {
            info!("tick {tick:4}: {event:?}");
        }
    }

    let position = block_on(physics.position(level.player)).expect("player exists");
    let velocity = block_on(physics.velocity(level.player)).expect("player exists");
    let grounded = block_on(physics.is_grounded(level.player)).expect("player exists");

    println!(
        "after {} ticks: pos=({:.1}, {:.1}) vel=({:.1}, {:.1}) grounded={} phase={:?}",
        args.ticks, position.x, position.y, velocity.x, velocity.y, grounded, controller.phase()
    );
}
