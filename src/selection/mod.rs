//! Selection state machine
//!
//! Tracks which bodies currently have a panel open. Each body is either
//! `Orbiting` or `Selected`; a click toggles between the two, and dismiss /
//! backdrop / Escape close an open one. Logical membership changes are
//! immediate; any closing animation is a visual echo handled downstream by
//! the choreography module.

use bevy::prelude::*;

pub mod set;
pub mod systems;

pub use set::{SelectionEntry, SelectionSet};
pub use systems::{escape_closes_panels, handle_body_clicks, handle_close_requests};

use crate::AppSet;
use crate::catalog::BodyId;

/// A pointer click or tap on a body's hit geometry. `screen` carries the
/// pointer's own viewport coordinate when the input event supplies one.
#[derive(Message, Debug, Clone, Copy)]
pub struct BodyClicked {
    pub id: BodyId,
    pub screen: Option<Vec2>,
}

/// Close request for one open panel (dismiss button, backdrop, Escape).
#[derive(Message, Debug, Clone, Copy)]
pub struct ClosePanel {
    pub id: BodyId,
}

/// A body entered `Selected`; its panel opens anchored at `anchor`.
#[derive(Message, Debug, Clone, Copy)]
pub struct PanelOpened {
    pub id: BodyId,
    pub anchor: Vec2,
}

/// A body returned to `Orbiting`; its panel is logically closed.
#[derive(Message, Debug, Clone, Copy)]
pub struct PanelClosed {
    pub id: BodyId,
}

/// Plugin for click-driven selection state
pub struct SelectionPlugin;

impl Plugin for SelectionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SelectionSet>()
            .add_message::<BodyClicked>()
            .add_message::<ClosePanel>()
            .add_message::<PanelOpened>()
            .add_message::<PanelClosed>()
            .add_systems(
                Update,
                (
                    escape_closes_panels,
                    handle_close_requests.after(escape_closes_panels),
                    handle_body_clicks.after(handle_close_requests),
                )
                    .in_set(AppSet::Input),
            );
    }
}
