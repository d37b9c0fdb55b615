//! Transition choreography
//!
//! Watches selection membership and drives the two animated hand-offs: the
//! selected body's promotion to an overlay draw tier, and the two-phase
//! panel timeline (container enters, then the embedded preview mounts).
//! Logical selection state changes immediately elsewhere; this module only
//! schedules the visual echo.

use bevy::camera::visibility::RenderLayers;
use bevy::prelude::*;

pub mod timeline;

pub use timeline::{PanelPhase, PanelTimeline, PanelVisual};

use crate::AppSet;
use crate::catalog::BodyId;
use crate::selection::SelectionSet;

/// Render layer drawn by the overlay camera, above the panel backdrop.
pub const OVERLAY_LAYER: usize = 1;

/// Entrance/exit speeds in progress units per second.
#[derive(Resource, Copy, Clone, Debug)]
pub struct ChoreographyConfig {
    pub enter_rate: f32,
    pub exit_rate: f32,
}

impl Default for ChoreographyConfig {
    fn default() -> Self {
        Self {
            enter_rate: 3.0,
            exit_rate: 4.0,
        }
    }
}

/// System diffing the panel timeline against selection membership.
pub fn sync_panel_timeline(set: Res<SelectionSet>, mut tl: ResMut<PanelTimeline>) {
    tl.sync(&set);
}

/// System advancing entrance/exit progress and retiring finished exits.
pub fn advance_panel_timeline(
    time: Res<Time>,
    cfg: Res<ChoreographyConfig>,
    mut tl: ResMut<PanelTimeline>,
) {
    tl.advance(time.delta_secs(), cfg.enter_rate, cfg.exit_rate);
}

/// System moving selected bodies onto the overlay draw tier and back.
///
/// The overlay camera renders after the main camera's UI, so a promoted body
/// cannot be occluded by the panel backdrop.
pub fn promote_selected_bodies(
    set: Res<SelectionSet>,
    mut bodies: Query<(&BodyId, &mut RenderLayers, Option<&Children>)>,
    mut parts: Query<&mut RenderLayers, Without<BodyId>>,
) {
    for (id, mut layers, children) in bodies.iter_mut() {
        let wanted = if set.contains(*id) {
            RenderLayers::layer(OVERLAY_LAYER)
        } else {
            RenderLayers::default()
        };
        if *layers == wanted {
            continue;
        }
        *layers = wanted.clone();
        // Layers don't propagate; carry the atmosphere shell and fill light
        // along with the body.
        for &child in children.into_iter().flatten() {
            if let Ok(mut part_layers) = parts.get_mut(child) {
                *part_layers = wanted.clone();
            }
        }
    }
}

/// Plugin for selection-driven transition choreography
pub struct ChoreographyPlugin;

impl Plugin for ChoreographyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ChoreographyConfig>()
            .init_resource::<PanelTimeline>()
            .add_systems(
                Update,
                (
                    sync_panel_timeline,
                    advance_panel_timeline.after(sync_panel_timeline),
                    promote_selected_bodies,
                )
                    .in_set(AppSet::Choreography),
            );
    }
}
