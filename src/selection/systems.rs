//! Selection transition systems

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::catalog::BodyCatalog;
use crate::orbit::OrbitStates;
use crate::projection;
use crate::scene::MainCamera;
use crate::selection::set::SelectionSet;
use crate::selection::{BodyClicked, ClosePanel, PanelClosed, PanelOpened};

/// System toggling selection membership on body clicks.
///
/// `Orbiting -> Selected` captures the body's current position as the
/// pull-out origin and anchors the panel at the click's own screen
/// coordinate when present, otherwise at the projected body position.
/// `Selected -> Orbiting` drops the entry and the cached pull position
/// immediately.
pub fn handle_body_clicks(
    mut clicks: MessageReader<BodyClicked>,
    camera: Single<(&Camera, &GlobalTransform), With<MainCamera>>,
    window: Option<Single<&Window, With<PrimaryWindow>>>,
    catalog: Res<BodyCatalog>,
    mut set: ResMut<SelectionSet>,
    mut states: ResMut<OrbitStates>,
    mut opened: MessageWriter<PanelOpened>,
    mut closed: MessageWriter<PanelClosed>,
) {
    let (camera, camera_transform) = *camera;
    // A camera that hasn't rendered yet reports no viewport. Fall back to
    // the window size so center-anchored panels still land mid-screen.
    let viewport = camera
        .logical_viewport_size()
        .or_else(|| window.as_ref().map(|w| w.size()))
        .unwrap_or(Vec2::ZERO);
    for click in clicks.read() {
        let slug = catalog
            .get(click.id)
            .map(|b| b.id.as_str())
            .unwrap_or("unknown");

        if set.remove(click.id) {
            states.clear_pull(click.id);
            closed.write(PanelClosed { id: click.id });
            info!("deselected body {slug}");
            continue;
        }

        let Some(world) = states.capture_pull(click.id) else {
            // A click for an id the arena doesn't know is a stale event.
            warn!("ignoring click on unknown body {:?}", click.id);
            continue;
        };
        let anchor = match click.screen {
            Some(px) => px,
            None => projection::camera_anchor(camera, camera_transform, world).resolve(viewport),
        };
        set.insert(click.id, anchor);
        opened.write(PanelOpened {
            id: click.id,
            anchor,
        });
        info!("selected body {slug} anchored at {anchor:?}");
    }
}

/// System applying explicit close requests (dismiss button, backdrop click,
/// Escape). Removal is immediate; the exit animation is downstream.
pub fn handle_close_requests(
    mut requests: MessageReader<ClosePanel>,
    mut set: ResMut<SelectionSet>,
    mut states: ResMut<OrbitStates>,
    mut closed: MessageWriter<PanelClosed>,
) {
    for request in requests.read() {
        if set.remove(request.id) {
            states.clear_pull(request.id);
            closed.write(PanelClosed { id: request.id });
        }
    }
}

/// System mapping Escape to a close of every open panel at once.
pub fn escape_closes_panels(
    input: Res<ButtonInput<KeyCode>>,
    set: Res<SelectionSet>,
    mut requests: MessageWriter<ClosePanel>,
) {
    if input.just_pressed(KeyCode::Escape) {
        for entry in set.iter() {
            requests.write(ClosePanel { id: entry.id });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::orbit::{init_orbit_states, OrbitStates};
    use crate::selection::BodyClicked;

    fn test_app() -> App {
        let mut app = App::new();
        app.insert_resource(catalog::load_embedded().unwrap())
            .init_resource::<SelectionSet>()
            .init_resource::<OrbitStates>()
            .init_resource::<ButtonInput<KeyCode>>()
            .add_message::<BodyClicked>()
            .add_message::<ClosePanel>()
            .add_message::<PanelOpened>()
            .add_message::<PanelClosed>()
            .add_systems(Startup, init_orbit_states)
            .add_systems(
                Update,
                (
                    escape_closes_panels,
                    handle_close_requests,
                    handle_body_clicks,
                )
                    .chain(),
            );
        app.world_mut().spawn((
            Camera::default(),
            GlobalTransform::default(),
            MainCamera,
        ));
        app
    }

    fn click(app: &mut App, id: crate::catalog::BodyId) {
        app.world_mut()
            .resource_mut::<Messages<BodyClicked>>()
            .write(BodyClicked {
                id,
                screen: Some(Vec2::new(300.0, 180.0)),
            });
        app.update();
    }

    #[test]
    fn click_toggles_selection_and_pull_capture() {
        let mut app = test_app();
        app.update();
        let earth = app.world().resource::<catalog::BodyCatalog>().find("earth").unwrap();

        click(&mut app, earth);
        {
            let set = app.world().resource::<SelectionSet>();
            assert_eq!(set.len(), 1);
            assert_eq!(set.top().unwrap().id, earth);
            let states = app.world().resource::<OrbitStates>();
            assert!(states.get(earth).unwrap().pulled.is_some());
        }

        click(&mut app, earth);
        let set = app.world().resource::<SelectionSet>();
        assert!(set.is_empty());
        let states = app.world().resource::<OrbitStates>();
        assert!(states.get(earth).unwrap().pulled.is_none());
    }

    #[test]
    fn projected_anchor_falls_back_to_window_center() {
        let mut app = test_app();
        app.world_mut().spawn((Window::default(), PrimaryWindow));
        app.update();
        let venus = app
            .world()
            .resource::<catalog::BodyCatalog>()
            .find("venus")
            .unwrap();

        // No screen coordinate on the event and no rendered viewport yet:
        // the panel must anchor mid-window, not at the top-left corner.
        app.world_mut()
            .resource_mut::<Messages<BodyClicked>>()
            .write(BodyClicked {
                id: venus,
                screen: None,
            });
        app.update();

        let set = app.world().resource::<SelectionSet>();
        let expected = Window::default().size() * 0.5;
        assert_eq!(set.top().unwrap().anchor, expected);
    }

    #[test]
    fn escape_dismisses_every_open_panel() {
        let mut app = test_app();
        app.update();
        let (earth, mars) = {
            let catalog = app.world().resource::<catalog::BodyCatalog>();
            (
                catalog.find("earth").unwrap(),
                catalog.find("mars").unwrap(),
            )
        };
        click(&mut app, earth);
        click(&mut app, mars);
        assert_eq!(app.world().resource::<SelectionSet>().len(), 2);

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Escape);
        app.update();

        // One press clears the whole stack, not just the newest entry.
        assert!(app.world().resource::<SelectionSet>().is_empty());
        let states = app.world().resource::<OrbitStates>();
        assert!(states.get(earth).unwrap().pulled.is_none());
        assert!(states.get(mars).unwrap().pulled.is_none());
    }

    #[test]
    fn close_request_clears_entry_and_pull() {
        let mut app = test_app();
        app.update();
        let mars = app.world().resource::<catalog::BodyCatalog>().find("mars").unwrap();
        click(&mut app, mars);

        app.world_mut()
            .resource_mut::<Messages<ClosePanel>>()
            .write(ClosePanel { id: mars });
        app.update();

        assert!(app.world().resource::<SelectionSet>().is_empty());
        let states = app.world().resource::<OrbitStates>();
        assert!(states.get(mars).unwrap().pulled.is_none());
    }
}
