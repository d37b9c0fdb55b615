//! Scene setup and body visuals
//!
//! Spawns the sun and one mesh per catalog body, wires the picking
//! observers that feed selection and hover, and draws the orbit rings.
//! Motion never happens here; transforms are written by the orbit pass.

use bevy::camera::visibility::RenderLayers;
use bevy::picking::mesh_picking::ray_cast::RayCastBackfaces;
use bevy::picking::prelude::*;
use bevy::prelude::*;

use crate::AppSet;
use crate::catalog::{BodyCatalog, BodyId};
use crate::orbit::{OrbitStates, SimulationClock, orbit_position, OrbitParams};
use crate::selection::{BodyClicked, ClosePanel, SelectionSet};

/// Marker for the primary scene camera.
#[derive(Component)]
pub struct MainCamera;

/// Marker for the overlay camera drawing promoted bodies above the panels.
#[derive(Component)]
pub struct OverlayCamera;

/// Marker for the sun entity.
#[derive(Component)]
pub struct Sun;

/// Marker for the far space sphere that catches empty-space clicks.
#[derive(Component)]
pub struct Backdrop;

/// Plugin for the 3D scene content
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_scene).add_systems(
            Update,
            (draw_orbit_rings, pulse_sun).in_set(AppSet::Choreography),
        );
    }
}

/// Spawn the sun and every catalog body with its picking observers.
fn spawn_scene(
    mut commands: Commands,
    catalog: Res<BodyCatalog>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Space backdrop: an inward-facing far sphere. Clicking it (i.e. empty
    // space) dismisses the most recently opened panel, so panels never have
    // to block pointer access to the bodies themselves.
    commands
        .spawn((
            Mesh3d(meshes.add(Sphere::new(800.0).mesh().ico(3).unwrap())),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(0.0, 0.0, 0.06),
                unlit: true,
                cull_mode: None,
                ..default()
            })),
            Transform::from_xyz(0.0, 0.0, 0.0),
            // The camera sits inside the sphere, so rays only ever meet its
            // back faces. Without this the backdrop is unpickable.
            RayCastBackfaces,
            Backdrop,
            Name::new("Backdrop"),
        ))
        .observe(
            |mut event: On<Pointer<Click>>,
             set: Res<SelectionSet>,
             mut requests: MessageWriter<ClosePanel>| {
                if let Some(top) = set.top() {
                    requests.write(ClosePanel { id: top.id });
                }
                event.propagate(false);
            },
        );

    // Sun: unlit emissive core at the origin.
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(4.0).mesh().ico(5).unwrap())),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.85, 0.3),
            emissive: Color::srgb(1.0, 0.6, 0.1).to_linear() * 8.0,
            unlit: true,
            ..default()
        })),
        Transform::from_xyz(0.0, 0.0, 0.0),
        Sun,
        Name::new("Sun"),
    ));

    for (id, body) in catalog.iter() {
        let params = OrbitParams::from_body(body, catalog.initial_angle(id));
        let start = orbit_position(0.0, &params);
        let color = body.atmosphere();

        let mesh = meshes.add(Sphere::new(body.size).mesh().ico(5).unwrap());
        let material = materials.add(StandardMaterial {
            base_color: color,
            emissive: color.to_linear() * 0.4,
            perceptual_roughness: 0.6,
            metallic: 0.4,
            ..default()
        });

        let hover_id = id;
        let click_id = id;
        commands
            .spawn((
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::from_translation(start),
                RenderLayers::default(),
                id,
                Name::new(body.name.clone()),
                children![
                    // Translucent atmosphere shell, slightly larger than the body.
                    (
                        Mesh3d(meshes.add(Sphere::new(body.size * 1.25).mesh().ico(4).unwrap())),
                        MeshMaterial3d(materials.add(StandardMaterial {
                            base_color: color.with_alpha(0.15),
                            alpha_mode: AlphaMode::Blend,
                            unlit: true,
                            ..default()
                        })),
                        RenderLayers::default(),
                        Pickable::IGNORE,
                    ),
                    // Per-body fill light so the dark side stays readable.
                    (
                        PointLight {
                            intensity: 80_000.0,
                            range: 15.0,
                            color,
                            ..default()
                        },
                        RenderLayers::default(),
                        Transform::default(),
                    ),
                ],
            ))
            .observe(
                move |mut event: On<Pointer<Click>>, mut clicks: MessageWriter<BodyClicked>| {
                    clicks.write(BodyClicked {
                        id: click_id,
                        screen: Some(event.pointer_location.position),
                    });
                    event.propagate(false);
                },
            )
            .observe(move |_: On<Pointer<Over>>, mut states: ResMut<OrbitStates>| {
                states.set_hovered(hover_id, true);
            })
            .observe(move |_: On<Pointer<Out>>, mut states: ResMut<OrbitStates>| {
                states.set_hovered(hover_id, false);
            });
    }
    info!("scene spawned with {} bodies", catalog.len());
}

/// System drawing a faint ring along each body's orbit.
fn draw_orbit_rings(catalog: Res<BodyCatalog>, mut gizmos: Gizmos) {
    let flat = Quat::from_rotation_x(std::f32::consts::FRAC_PI_2);
    for (_, body) in catalog.iter() {
        if body.orbit_radius <= 0.0 {
            continue;
        }
        gizmos
            .circle(
                Isometry3d::from_rotation(flat),
                body.orbit_radius,
                body.atmosphere().with_alpha(0.2),
            )
            .resolution(128);
    }
}

/// System giving the sun a slow breathing pulse.
fn pulse_sun(clock: Res<SimulationClock>, mut sun: Query<&mut Transform, With<Sun>>) {
    for mut transform in sun.iter_mut() {
        let pulse = 1.0 + 0.1 * clock.elapsed.sin();
        transform.scale = Vec3::splat(pulse);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_app() -> App {
        let mut app = App::new();
        app.insert_resource(Assets::<Mesh>::default())
            .insert_resource(Assets::<StandardMaterial>::default())
            .insert_resource(crate::catalog::load_embedded().unwrap())
            .insert_resource(SelectionSet::default())
            .add_message::<BodyClicked>()
            .add_message::<ClosePanel>()
            .add_systems(Startup, spawn_scene);
        app.update();
        app
    }

    #[test]
    fn backdrop_is_hittable_from_inside() {
        let mut app = spawn_app();
        let mut query = app
            .world_mut()
            .query_filtered::<Has<RayCastBackfaces>, With<Backdrop>>();
        // The camera looks at the sphere's interior, so ray hits arrive on
        // back faces and must not be culled away.
        let hits_backfaces = query.single(app.world()).expect("one backdrop");
        assert!(hits_backfaces);
    }

    #[test]
    fn every_catalog_body_gets_an_entity() {
        let mut app = spawn_app();
        let catalog_len = app.world().resource::<BodyCatalog>().len();
        let mut bodies = app.world_mut().query::<&BodyId>();
        assert_eq!(bodies.iter(app.world()).count(), catalog_len);
    }
}
