//! Orbital motion module
//!
//! Owns the simulation clock and the per-frame motion pass that positions
//! every body: circular orbit, selection pull-out blending, self rotation
//! and hover scaling.

use bevy::prelude::*;

pub mod motion;
pub mod systems;

pub use motion::{BlendConfig, OrbitParams, OrbitState, orbit_angle, orbit_position};
pub use systems::{OrbitStates, init_orbit_states, run_orbit_pass, sync_body_transforms};

use crate::AppSet;

/// Simulation clock: seconds of scaled elapsed time driving orbit phase.
#[derive(Resource)]
pub struct SimulationClock {
    pub elapsed: f32,
    pub time_scale: f32,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            time_scale: 1.0,
        }
    }
}

/// System to advance the simulation clock by scaled frame time.
pub fn advance_simulation_clock(time: Res<Time>, mut clock: ResMut<SimulationClock>) {
    clock.elapsed += (time.delta_secs() * clock.time_scale).max(0.0);
}

/// Plugin for the simulation clock and orbital motion pass
pub struct OrbitPlugin;

impl Plugin for OrbitPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationClock>()
            .init_resource::<BlendConfig>()
            .init_resource::<OrbitStates>()
            .add_systems(Startup, init_orbit_states)
            .add_systems(
                Update,
                (
                    advance_simulation_clock,
                    run_orbit_pass.after(advance_simulation_clock),
                    sync_body_transforms.after(run_orbit_pass),
                )
                    .in_set(AppSet::Motion),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_defaults_to_unscaled_zero() {
        let clock = SimulationClock::default();
        assert_eq!(clock.elapsed, 0.0);
        assert_eq!(clock.time_scale, 1.0);
    }
}
