//! Per-frame orbital state pass

use bevy::prelude::*;
use std::collections::HashMap;

use crate::catalog::{BodyCatalog, BodyId};
use crate::orbit::motion::{BlendConfig, OrbitParams, OrbitState, orbit_position, step_orbit};
use crate::orbit::SimulationClock;

/// Arena of per-body motion state, keyed by catalog id. One owner, one
/// update pass per frame; everything else reads.
#[derive(Resource, Default, Debug)]
pub struct OrbitStates {
    map: HashMap<BodyId, OrbitState>,
}

impl OrbitStates {
    pub fn get(&self, id: BodyId) -> Option<&OrbitState> {
        self.map.get(&id)
    }

    pub fn set_hovered(&mut self, id: BodyId, hovered: bool) {
        if let Some(state) = self.map.get_mut(&id) {
            state.hovered = hovered;
        }
    }

    /// Capture the current position as the pull-out origin. Called by the
    /// selection layer the instant a body becomes selected.
    pub fn capture_pull(&mut self, id: BodyId) -> Option<Vec3> {
        let state = self.map.get_mut(&id)?;
        state.pulled = Some(state.position);
        state.pulled
    }

    /// Drop the cached pull position; the body blends back to its orbit.
    pub fn clear_pull(&mut self, id: BodyId) {
        if let Some(state) = self.map.get_mut(&id) {
            state.pulled = None;
        }
    }

    fn insert(&mut self, id: BodyId, state: OrbitState) {
        self.map.insert(id, state);
    }

    fn step_all(&mut self, catalog: &BodyCatalog, cfg: &BlendConfig, elapsed: f32, dt: f32) {
        for (id, body) in catalog.iter() {
            let params = OrbitParams::from_body(body, catalog.initial_angle(id));
            if let Some(state) = self.map.get_mut(&id) {
                step_orbit(state, &params, elapsed, dt, cfg);
            }
        }
    }
}

/// System to seed the arena with every body at its initial orbit phase.
pub fn init_orbit_states(catalog: Res<BodyCatalog>, mut states: ResMut<OrbitStates>) {
    for (id, body) in catalog.iter() {
        let params = OrbitParams::from_body(body, catalog.initial_angle(id));
        states.insert(id, OrbitState::at(orbit_position(0.0, &params)));
    }
    info!("orbit arena initialized for {} bodies", catalog.len());
}

/// System running the single motion pass over the arena.
pub fn run_orbit_pass(
    clock: Res<SimulationClock>,
    time: Res<Time>,
    catalog: Res<BodyCatalog>,
    cfg: Res<BlendConfig>,
    mut states: ResMut<OrbitStates>,
) {
    states.step_all(&catalog, &cfg, clock.elapsed, time.delta_secs());
}

/// System copying arena state onto the rendered body transforms.
pub fn sync_body_transforms(
    states: Res<OrbitStates>,
    mut bodies: Query<(&BodyId, &mut Transform)>,
) {
    for (id, mut transform) in bodies.iter_mut() {
        if let Some(state) = states.get(*id) {
            transform.translation = state.position;
            transform.rotation = Quat::from_rotation_y(state.spin);
            transform.scale = Vec3::splat(state.scale);
        }
    }
}
