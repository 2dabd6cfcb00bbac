//! Bramble - headless demo driver.
//!
//! Runs the test arena for a few hundred ticks with scripted input and
//! logs what the player does: walking into the slope, jumping, riding the
//! moving platform's neighborhood, dropping through the one-way ledge.
//! Run with `RUST_LOG=info` (or `debug` for per-tick anomalies).

use bramble_game::input::MovementKeys;
use bramble_game::{Level, PlayerInput, Simulation, SimulationConfig};

fn main() {
    env_logger::init();

    let mut sim = Simulation::new(SimulationConfig::default(), Level::test_arena());
    let id = sim
        .add_player(0)
        .expect("default player dimensions fit the ray spacing");

    log::info!("simulating {} at {} Hz", sim.level.name, sim.config.tick_rate);

    for tick in 0..600u32 {
        let mut input = PlayerInput::default();

        // Walk right toward the slope, jump twice on the way, then hold
        // down for a spell to demonstrate the one-way drop-through.
        input.movement.right = tick < 420;
        input.jump_pressed = tick == 90 || tick == 210;
        input.jump_released = tick == 100 || tick == 240;
        if tick >= 480 {
            input.movement = MovementKeys {
                down: true,
                ..MovementKeys::default()
            };
        }

        sim.tick(&[input]);

        if tick % 60 == 0 {
            let player = sim.get_player(id).expect("player exists");
            let state = player.collision_state();
            log::info!(
                "t={:5.2}s pos=({:6.2},{:5.2}) vel=({:6.2},{:6.2}) below={} climbing={} wall={}",
                sim.now(),
                player.position().x,
                player.position().y,
                player.velocity().x,
                player.velocity().y,
                state.below,
                state.climbing_slope,
                state.left || state.right,
            );
        }
    }

    let player = sim.get_player(id).expect("player exists");
    log::info!(
        "done after {} ticks: player at ({:.2}, {:.2}), platform at ({:.2}, {:.2})",
        sim.frame,
        player.position().x,
        player.position().y,
        sim.level.platforms[0].position().x,
        sim.level.platforms[0].position().y,
    );
}
