//! Panel node construction

use bevy::picking::prelude::*;
use bevy::prelude::*;

use crate::catalog::{Body, BodyId};
use crate::selection::ClosePanel;
use crate::ui::{PanelRoot, PreviewSlot};

pub const PANEL_WIDTH: f32 = 340.0;
/// Vertical slide distance of the entrance animation, in pixels.
pub const ENTER_SLIDE: f32 = 20.0;

const TEXT_MAIN: Color = Color::srgb(0.45, 0.9, 0.95);
const TEXT_DIM: Color = Color::srgb(0.62, 0.66, 0.7);
const PANEL_BORDER: Color = Color::srgb(0.2, 0.75, 0.85);

/// Panel top-left corner for a given anchor and animation progress. The
/// panel sits beside the anchor and slides up as it enters.
pub fn panel_corner(anchor: Vec2, progress: f32) -> Vec2 {
    Vec2::new(
        anchor.x + 24.0,
        anchor.y - 40.0 + (1.0 - progress) * ENTER_SLIDE,
    )
}

/// Background and border colors at a given animation progress.
pub fn panel_colors(progress: f32) -> (Color, Color) {
    (
        Color::srgba(0.01, 0.03, 0.05, 0.86 * progress),
        PANEL_BORDER.with_alpha(0.5 * progress),
    )
}

/// Spawn the node tree for one detail panel, anchored but still invisible
/// (progress 0); the animation system takes it from there.
pub fn spawn_panel(commands: &mut Commands, id: BodyId, body: &Body, anchor: Vec2) -> Entity {
    let corner = panel_corner(anchor, 0.0);
    let (bg, border) = panel_colors(0.0);

    let root = commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(corner.x),
                top: Val::Px(corner.y),
                width: Val::Px(PANEL_WIDTH),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(14.0)),
                row_gap: Val::Px(8.0),
                border: UiRect::all(Val::Px(1.0)),
                border_radius: BorderRadius::all(Val::Px(6.0)),
                ..default()
            },
            BackgroundColor(bg),
            BorderColor::all(border),
            GlobalZIndex(2),
            PanelRoot(id),
            Pickable::default(),
            Name::new(format!("Panel: {}", body.name)),
        ))
        // Swallow clicks so a panel click never reaches the backdrop.
        .observe(|mut event: On<Pointer<Click>>| {
            event.propagate(false);
        })
        .id();

    let dismiss = commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(8.0),
                top: Val::Px(6.0),
                padding: UiRect::axes(Val::Px(6.0), Val::Px(2.0)),
                ..default()
            },
            Text::new("×"),
            TextFont::from_font_size(14.0),
            TextColor(TEXT_DIM),
            Pickable::default(),
        ))
        .observe(
            move |mut event: On<Pointer<Click>>, mut requests: MessageWriter<ClosePanel>| {
                requests.write(ClosePanel { id });
                event.propagate(false);
            },
        )
        .id();

    let title = commands
        .spawn((
            Text::new(format!("///// {}", body.name)),
            TextFont::from_font_size(20.0),
            TextColor(TEXT_MAIN),
        ))
        .id();
    let trivia = commands
        .spawn((
            Text::new(body.trivia.clone()),
            TextFont::from_font_size(11.0),
            TextColor(TEXT_DIM),
        ))
        .id();
    let description = commands
        .spawn((
            Text::new(body.description.clone()),
            TextFont::from_font_size(13.0),
            TextColor(Color::srgb(0.8, 0.82, 0.84)),
        ))
        .id();

    let features = commands
        .spawn((
            Node {
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(2.0),
                ..default()
            },
            Name::new("Features"),
        ))
        .id();
    for feature in &body.features {
        let row = commands
            .spawn((
                Text::new(format!("· {feature}")),
                TextFont::from_font_size(12.0),
                TextColor(TEXT_MAIN.with_alpha(0.8)),
            ))
            .id();
        commands.entity(features).add_child(row);
    }

    for (label, url) in [("nasa", &body.links.nasa), ("wiki", &body.links.wiki)] {
        if let Some(url) = url {
            let row = commands
                .spawn((
                    Text::new(format!("{label}: {url}")),
                    TextFont::from_font_size(10.0),
                    TextColor(TEXT_DIM.with_alpha(0.8)),
                ))
                .id();
            commands.entity(features).add_child(row);
        }
    }

    // The preview slot stays empty until the entrance completes.
    let preview = commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Px(90.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            PreviewSlot(id),
        ))
        .id();

    commands
        .entity(root)
        .add_children(&[dismiss, title, trivia, description, features, preview]);
    root
}

/// Spawn the deferred preview content into its slot: a shaded disc standing
/// in for the embedded 3D view.
pub fn spawn_preview(commands: &mut Commands, slot: Entity, body: &Body) {
    let color = body.atmosphere();
    let disc = commands
        .spawn((
            Node {
                width: Val::Px(72.0),
                height: Val::Px(72.0),
                border_radius: BorderRadius::all(Val::Percent(50.0)),
                ..default()
            },
            BackgroundColor(color.with_alpha(0.9)),
            Name::new("Preview"),
        ))
        .id();
    commands.entity(slot).add_child(disc);
}
