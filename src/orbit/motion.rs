//! Orbital motion math
//!
//! Pure functions and records for the per-body motion model. Everything here
//! is deterministic in `(elapsed, params)` so the motion pass stays testable
//! without a running app.

use bevy::prelude::*;

use crate::catalog::Body;

/// Orbital parameters for one body, fixed at catalog load.
#[derive(Copy, Clone, Debug)]
pub struct OrbitParams {
    pub radius: f32,
    pub speed: f32,
    pub rotation_speed: f32,
    /// Phase the body starts at, derived from catalog order.
    pub initial_angle: f32,
}

impl OrbitParams {
    pub fn from_body(body: &Body, initial_angle: f32) -> Self {
        Self {
            radius: body.orbit_radius,
            speed: body.orbit_speed,
            rotation_speed: body.rotation_speed,
            initial_angle,
        }
    }
}

/// Per-body mutable motion state, owned by the arena in [`super::OrbitStates`].
/// Recreated on scene startup, recomputed every frame.
#[derive(Copy, Clone, Debug)]
pub struct OrbitState {
    pub position: Vec3,
    pub spin: f32,
    pub scale: f32,
    pub hovered: bool,
    /// Orbit position captured the instant the body was selected.
    /// `Some` exactly while the body's id is in the selection set.
    pub pulled: Option<Vec3>,
}

impl OrbitState {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            spin: 0.0,
            scale: 1.0,
            hovered: false,
            pulled: None,
        }
    }
}

/// Per-frame blend factors. The source treats these as magic constants with
/// no stated rationale, so they stay configurable rather than derived.
#[derive(Resource, Copy, Clone, Debug)]
pub struct BlendConfig {
    /// Blend toward the pulled-out target while selected.
    pub pull: f32,
    /// Slower blend back to the live orbit after deselection.
    pub release: f32,
    /// Hover scale smoothing.
    pub hover: f32,
    /// Lateral displacement added to the captured position, simulating the
    /// body flying toward the viewer.
    pub pull_offset: Vec3,
    /// Scale factor while hovered.
    pub hover_scale: f32,
}

impl Default for BlendConfig {
    fn default() -> Self {
        Self {
            pull: 0.2,
            release: 0.1,
            hover: 0.1,
            pull_offset: Vec3::new(0.0, 4.0, 10.0),
            hover_scale: 1.1,
        }
    }
}

/// Orbit phase at `elapsed` seconds. Advances linearly:
/// `angle(t + d) - angle(t) == speed * d`.
pub fn orbit_angle(elapsed: f32, speed: f32, initial_angle: f32) -> f32 {
    elapsed * speed + initial_angle
}

/// Position on the orbit ring at `elapsed` seconds.
///
/// Degenerate parameters never error: a non-positive or non-finite radius
/// pins the body to the origin, a non-positive or non-finite speed freezes
/// it at its initial phase.
pub fn orbit_position(elapsed: f32, params: &OrbitParams) -> Vec3 {
    if !params.radius.is_finite() || params.radius <= 0.0 {
        return Vec3::ZERO;
    }
    let angle = if !params.speed.is_finite() || params.speed <= 0.0 {
        params.initial_angle
    } else {
        orbit_angle(elapsed, params.speed, params.initial_angle)
    };
    Vec3::new(angle.cos() * params.radius, 0.0, angle.sin() * params.radius)
}

/// Frame-rate normalization for a 60 Hz per-frame blend factor.
pub fn frame_lerp_factor(per_frame: f32, dt: f32) -> f32 {
    1.0 - (1.0 - per_frame.clamp(0.0, 1.0)).powf(dt * 60.0)
}

// When the release blend has converged this close it snaps exact, so an
// undisturbed body tracks its orbit without residual lag.
const SNAP_EPSILON: f32 = 0.05;

/// Advance one body's motion state by one frame.
pub fn step_orbit(
    state: &mut OrbitState,
    params: &OrbitParams,
    elapsed: f32,
    dt: f32,
    cfg: &BlendConfig,
) {
    let live = orbit_position(elapsed, params);

    match state.pulled {
        Some(pulled) => {
            let target = pulled + cfg.pull_offset;
            let k = frame_lerp_factor(cfg.pull, dt);
            state.position = state.position.lerp(target, k);
        }
        None => {
            let k = frame_lerp_factor(cfg.release, dt);
            state.position = state.position.lerp(live, k);
            if state.position.distance(live) < SNAP_EPSILON {
                state.position = live;
            }
        }
    }

    // Self rotation is independent of orbit and selection.
    state.spin += params.rotation_speed * dt * 60.0;

    let target_scale = if state.hovered { cfg.hover_scale } else { 1.0 };
    let k = frame_lerp_factor(cfg.hover, dt);
    state.scale += (target_scale - state.scale) * k;
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn params(radius: f32, speed: f32) -> OrbitParams {
        OrbitParams {
            radius,
            speed,
            rotation_speed: 0.003,
            initial_angle: 0.0,
        }
    }

    #[test]
    fn phase_advances_linearly() {
        let speed = 0.05;
        for t in [0.0_f32, 1.0, 17.3, 4000.0] {
            for delta in [0.1_f32, 1.0, 30.0] {
                let diff = orbit_angle(t + delta, speed, 0.7) - orbit_angle(t, speed, 0.7);
                assert!((diff - speed * delta).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn half_orbit_scenario() {
        let p = params(10.0, 0.05);
        let start = orbit_position(0.0, &p);
        assert!((start - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-4);

        // A quarter of the way round the body has swung onto the +Z axis.
        let quarter = orbit_position(std::f32::consts::FRAC_PI_2 / 0.05, &p);
        assert!((quarter - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-2);

        // Half an orbit later the body sits on the opposite side of the ring.
        let t = std::f32::consts::PI / 0.05;
        let half = orbit_position(t, &p);
        assert!((half - Vec3::new(-10.0, 0.0, 0.0)).length() < 1e-2);
    }

    #[test]
    fn degenerate_radius_pins_to_origin() {
        for radius in [0.0, -3.0, f32::NAN, f32::INFINITY] {
            let p = params(radius, 0.05);
            assert_eq!(orbit_position(123.4, &p), Vec3::ZERO);
        }
    }

    #[test]
    fn degenerate_speed_freezes_phase() {
        let mut p = params(10.0, 0.0);
        p.initial_angle = std::f32::consts::FRAC_PI_2;
        let a = orbit_position(0.0, &p);
        let b = orbit_position(9999.0, &p);
        assert!((a - b).length() < 1e-6);
        assert!((a - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-4);
    }

    #[test]
    fn pull_blend_converges_to_pulled_target() {
        let p = params(10.0, 0.05);
        let cfg = BlendConfig::default();
        let mut state = OrbitState::at(orbit_position(0.0, &p));
        let captured = state.position;
        state.pulled = Some(captured);

        for frame in 1..=120 {
            step_orbit(&mut state, &p, frame as f32 * DT, DT, &cfg);
        }
        let target = captured + cfg.pull_offset;
        assert!(state.position.distance(target) < 0.05);
    }

    #[test]
    fn release_blend_returns_to_live_orbit() {
        let p = params(10.0, 0.05);
        let cfg = BlendConfig::default();
        let mut state = OrbitState::at(Vec3::new(0.0, 4.0, 20.0));

        let mut elapsed = 0.0;
        for _ in 0..600 {
            elapsed += DT;
            step_orbit(&mut state, &p, elapsed, DT, &cfg);
        }
        assert!(state.position.distance(orbit_position(elapsed, &p)) < 0.1);
    }

    #[test]
    fn spin_is_monotonic_while_pulled() {
        let p = params(10.0, 0.05);
        let cfg = BlendConfig::default();
        let mut state = OrbitState::at(orbit_position(0.0, &p));
        state.pulled = Some(state.position);

        let mut last = state.spin;
        for frame in 1..=30 {
            step_orbit(&mut state, &p, frame as f32 * DT, DT, &cfg);
            assert!(state.spin > last);
            last = state.spin;
        }
    }

    #[test]
    fn hover_scale_blends_both_ways() {
        let p = params(10.0, 0.05);
        let cfg = BlendConfig::default();
        let mut state = OrbitState::at(orbit_position(0.0, &p));

        state.hovered = true;
        for frame in 1..=120 {
            step_orbit(&mut state, &p, frame as f32 * DT, DT, &cfg);
        }
        assert!((state.scale - cfg.hover_scale).abs() < 0.01);

        state.hovered = false;
        for frame in 121..=240 {
            step_orbit(&mut state, &p, frame as f32 * DT, DT, &cfg);
        }
        assert!((state.scale - 1.0).abs() < 0.01);
    }
}
