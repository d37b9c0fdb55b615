//! Detail panel layer
//!
//! Mirrors the choreography timeline with actual `bevy_ui` node trees: one
//! anchored panel per visual entry, animated from the timeline's progress,
//! with the preview block mounted only once the entrance has completed.

use bevy::prelude::*;

pub mod panels;
pub mod systems;

pub use systems::{animate_panels, mount_panel_previews, sync_panel_entities};

use crate::AppSet;
use crate::catalog::BodyId;

/// Root node of one detail panel.
#[derive(Component, Copy, Clone, Debug)]
pub struct PanelRoot(pub BodyId);

/// Placeholder the deferred preview content mounts into.
#[derive(Component, Copy, Clone, Debug)]
pub struct PreviewSlot(pub BodyId);

/// Plugin for the panel UI layer
pub struct PanelUiPlugin;

impl Plugin for PanelUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                sync_panel_entities,
                animate_panels.after(sync_panel_entities),
                mount_panel_previews.after(sync_panel_entities),
            )
                .in_set(AppSet::PanelUi),
        );
    }
}
