//! Panel lifecycle systems

use bevy::prelude::*;

use crate::catalog::BodyCatalog;
use crate::choreography::PanelTimeline;
use crate::ui::panels::{panel_colors, panel_corner, spawn_panel, spawn_preview};
use crate::ui::{PanelRoot, PreviewSlot};

/// System keeping one panel entity per timeline entry.
///
/// Spawn happens when an entry first appears; despawn only once the
/// timeline has retired the entry, which is after its exit animation
/// finished, not when the selection set dropped the id.
pub fn sync_panel_entities(
    mut commands: Commands,
    timeline: Res<PanelTimeline>,
    catalog: Res<BodyCatalog>,
    roots: Query<(Entity, &PanelRoot)>,
) {
    for visual in timeline.iter() {
        if roots.iter().any(|(_, root)| root.0 == visual.id) {
            continue;
        }
        if let Some(body) = catalog.get(visual.id) {
            spawn_panel(&mut commands, visual.id, body, visual.anchor);
        }
    }

    for (entity, root) in roots.iter() {
        if timeline.get(root.0).is_none() {
            commands.entity(entity).despawn();
        }
    }
}

/// System applying timeline progress to the panel nodes: slide-in offset
/// plus background/border fade.
pub fn animate_panels(
    timeline: Res<PanelTimeline>,
    mut roots: Query<(&PanelRoot, &mut Node, &mut BackgroundColor, &mut BorderColor)>,
) {
    for (root, mut node, mut bg, mut border) in roots.iter_mut() {
        let Some(visual) = timeline.get(root.0) else {
            continue;
        };
        let corner = panel_corner(visual.anchor, visual.progress);
        node.left = Val::Px(corner.x);
        node.top = Val::Px(corner.y);

        let (bg_color, border_color) = panel_colors(visual.progress);
        bg.0 = bg_color;
        *border = BorderColor::all(border_color);
    }
}

/// System mounting the deferred preview content. Strictly phase two: the
/// slot stays empty until the timeline reports the entrance complete, and
/// the content is spawned at most once.
pub fn mount_panel_previews(
    mut commands: Commands,
    timeline: Res<PanelTimeline>,
    catalog: Res<BodyCatalog>,
    slots: Query<(Entity, &PreviewSlot, Has<Children>), With<Node>>,
) {
    for (entity, slot, has_content) in slots.iter() {
        if has_content {
            continue;
        }
        let mounted = timeline
            .get(slot.0)
            .is_some_and(|visual| visual.preview_mounted);
        if mounted && let Some(body) = catalog.get(slot.0) {
            spawn_preview(&mut commands, entity, body);
            info!("panel preview mounted for {}", body.id);
        }
    }
}
