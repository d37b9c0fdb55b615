use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::light::GlobalAmbientLight;
use bevy::camera::visibility::RenderLayers;
use bevy::picking::prelude::*;
use bevy::prelude::*;
use bevy::ui::IsDefaultUiCamera;
use bevy::window::{PresentMode, Window, WindowPlugin};

use bevy_feathers::FeathersPlugins;
use bevy_feathers::dark_theme::create_dark_theme;
use bevy_feathers::palette;
use bevy_feathers::theme::UiTheme;
use bevy_input_focus::directional_navigation::DirectionalNavigationPlugin;
use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};

#[cfg(feature = "dev")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;

mod catalog;
mod choreography;
mod orbit;
mod projection;
mod scene;
mod selection;
mod ui;

use choreography::{ChoreographyPlugin, OVERLAY_LAYER};
use orbit::OrbitPlugin;
use scene::{MainCamera, OverlayCamera, ScenePlugin};
use selection::SelectionPlugin;
use ui::PanelUiPlugin;

/// Frame-order buckets: input-driven selection updates run before the
/// motion pass, which runs before the visual choreography and the panel UI.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppSet {
    Input,
    Motion,
    Choreography,
    PanelUi,
}

/// Setup cameras and the lighting rig
fn setup(mut commands: Commands) {
    commands.insert_resource(GlobalAmbientLight {
        brightness: 120.0,
        ..default()
    });

    // Match the scene framing of the source material: camera above and back
    // from the ring, shallow orbit pitch range, no roll.
    let start = Vec3::new(0.0, 35.0, 45.0);
    let pan_orbit = PanOrbitCamera {
        focus: Vec3::ZERO,
        radius: Some(start.length()),
        yaw: Some(0.0),
        pitch: Some(start.y.atan2(start.z)),
        // Polar angle clamps, expressed as pitch limits.
        pitch_upper_limit: Some(std::f32::consts::FRAC_PI_2 - std::f32::consts::PI / 3.5),
        pitch_lower_limit: Some(std::f32::consts::FRAC_PI_2 - std::f32::consts::PI / 2.2),
        zoom_upper_limit: Some(100.0),
        zoom_lower_limit: 20.0,
        force_update: true,
        ..default()
    };

    let projection = Projection::Perspective(PerspectiveProjection {
        fov: 40.0_f32.to_radians(),
        near: 0.1,
        far: 2000.0,
        ..default()
    });

    commands.spawn((
        Camera3d::default(),
        projection.clone(),
        Camera {
            order: 0,
            clear_color: ClearColorConfig::Custom(Color::srgb(0.0, 0.0, 0.06)),
            ..default()
        },
        pan_orbit,
        MainCamera,
        // Panels belong to the main camera's pass; the overlay camera then
        // draws promoted bodies over them.
        IsDefaultUiCamera,
        Tonemapping::TonyMcMapface,
        Transform::from_translation(start).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Overlay camera: renders only promoted (selected) bodies, after the
    // main camera and its UI, so they draw above the panel backdrop.
    commands.spawn((
        Camera3d::default(),
        projection,
        Camera {
            order: 1,
            clear_color: ClearColorConfig::None,
            ..default()
        },
        RenderLayers::layer(OVERLAY_LAYER),
        OverlayCamera,
        Tonemapping::TonyMcMapface,
        Transform::from_translation(start).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Key light from the sun's position plus two soft directional fills.
    commands.spawn((
        PointLight {
            intensity: 2_000_000.0,
            range: 200.0,
            color: Color::srgb(1.0, 0.9, 0.7),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 3_000.0,
            ..default()
        },
        Transform::from_xyz(50.0, 30.0, -20.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 1_500.0,
            ..default()
        },
        Transform::from_xyz(-50.0, -30.0, 20.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// System keeping the overlay camera glued to the user-controlled main camera.
fn sync_overlay_camera(
    main: Single<&Transform, (With<MainCamera>, Without<OverlayCamera>)>,
    mut overlay: Single<&mut Transform, (With<OverlayCamera>, Without<MainCamera>)>,
) {
    **overlay = **main;
}

fn main() -> anyhow::Result<()> {
    let catalog = catalog::load_embedded()?;

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Orrery".to_string(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));

    #[cfg(feature = "dev")]
    app.add_plugins(FpsOverlayPlugin::default());

    // Feathers initializes `UiTheme` but does not populate it by default.
    let mut theme = UiTheme(create_dark_theme());
    theme.set_color("feathers.text.main", palette::LIGHT_GRAY_1);
    theme.set_color("feathers.text.dim", palette::LIGHT_GRAY_2);
    theme.set_color("feathers.focus", palette::ACCENT);
    app.insert_resource(theme);

    app.add_plugins(FeathersPlugins);
    app.add_plugins(DirectionalNavigationPlugin);
    app.add_plugins(PanOrbitCameraPlugin);
    app.add_plugins(MeshPickingPlugin);

    app.insert_resource(catalog);

    app.configure_sets(
        Update,
        (
            AppSet::Input,
            AppSet::Motion,
            AppSet::Choreography,
            AppSet::PanelUi,
        )
            .chain(),
    );

    app.add_plugins(OrbitPlugin);
    app.add_plugins(SelectionPlugin);
    app.add_plugins(ChoreographyPlugin);
    app.add_plugins(ScenePlugin);
    app.add_plugins(PanelUiPlugin);

    app.add_systems(Startup, setup);
    app.add_systems(Update, sync_overlay_camera.in_set(AppSet::Choreography));

    app.run();
    Ok(())
}
