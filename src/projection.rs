//! World-to-viewport projection for panel anchoring
//!
//! Converts a body's world position into the 2D pixel coordinate its detail
//! panel is anchored to. One consolidated fallback decision covers the two
//! degenerate cases, evaluated in order: behind the camera, then off-screen
//! or non-finite pixels. Both resolve to the viewport center. The panel
//! loses visual correspondence to the body in those cases, but it can never
//! be anchored at an invalid or off-screen coordinate; that trade-off is
//! deliberate.

use bevy::prelude::*;

/// Result of projecting a world position for anchoring.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Anchor {
    /// Valid on-screen pixel coordinate (Y grows downward).
    OnScreen(Vec2),
    /// Behind the camera or outside the viewport; anchor at the center.
    ViewportCenter,
}

impl Anchor {
    /// Resolve to a concrete pixel coordinate for a viewport of `size`.
    pub fn resolve(self, size: Vec2) -> Vec2 {
        match self {
            Anchor::OnScreen(px) => px,
            Anchor::ViewportCenter => size * 0.5,
        }
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, Anchor::ViewportCenter)
    }
}

/// Project `world` through `clip_from_world` into viewport pixels.
///
/// `cam_forward` must be the camera's forward direction in world space and
/// `viewport` the viewport size in pixels.
pub fn project_anchor(
    world: Vec3,
    cam_pos: Vec3,
    cam_forward: Vec3,
    clip_from_world: Mat4,
    viewport: Vec2,
) -> Anchor {
    // A body behind the camera would project to mirrored coordinates; don't
    // attempt it.
    if (world - cam_pos).dot(cam_forward) < 0.0 {
        return Anchor::ViewportCenter;
    }

    let clip = clip_from_world * world.extend(1.0);
    if clip.w.abs() <= f32::EPSILON {
        return Anchor::ViewportCenter;
    }
    let ndc = clip.truncate() / clip.w;

    // NDC up is screen up; pixel Y grows downward.
    let px = Vec2::new(
        (ndc.x * 0.5 + 0.5) * viewport.x,
        (1.0 - (ndc.y * 0.5 + 0.5)) * viewport.y,
    );

    let in_bounds = px.x.is_finite()
        && px.y.is_finite()
        && (0.0..=viewport.x).contains(&px.x)
        && (0.0..=viewport.y).contains(&px.y);
    if in_bounds {
        Anchor::OnScreen(px)
    } else {
        Anchor::ViewportCenter
    }
}

/// Project using a live camera. Thin wrapper so systems don't assemble
/// matrices by hand.
pub fn camera_anchor(
    camera: &Camera,
    camera_transform: &GlobalTransform,
    world: Vec3,
) -> Anchor {
    let Some(viewport) = camera.logical_viewport_size() else {
        return Anchor::ViewportCenter;
    };
    let clip_from_world =
        camera.clip_from_view() * camera_transform.to_matrix().inverse();
    project_anchor(
        world,
        camera_transform.translation(),
        camera_transform.forward().as_vec3(),
        clip_from_world,
        viewport,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

    /// Camera at origin looking down -Z, like bevy's default view space.
    fn test_clip_from_world() -> Mat4 {
        Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, VIEWPORT.x / VIEWPORT.y, 0.1, 2000.0)
    }

    #[test]
    fn centered_body_projects_to_viewport_center() {
        let anchor = project_anchor(
            Vec3::new(0.0, 0.0, -50.0),
            Vec3::ZERO,
            Vec3::NEG_Z,
            test_clip_from_world(),
            VIEWPORT,
        );
        match anchor {
            Anchor::OnScreen(px) => {
                assert!((px - VIEWPORT * 0.5).length() < 1.0, "got {px:?}");
            }
            Anchor::ViewportCenter => panic!("expected a projected point"),
        }
    }

    #[test]
    fn offset_body_lands_in_correct_quadrant() {
        let anchor = project_anchor(
            Vec3::new(5.0, 5.0, -50.0),
            Vec3::ZERO,
            Vec3::NEG_Z,
            test_clip_from_world(),
            VIEWPORT,
        );
        let Anchor::OnScreen(px) = anchor else {
            panic!("expected a projected point");
        };
        // Right of center, and above it in pixel space (smaller Y).
        assert!(px.x > VIEWPORT.x * 0.5);
        assert!(px.y < VIEWPORT.y * 0.5);
    }

    #[test]
    fn behind_camera_falls_back_to_center() {
        for pos in [
            Vec3::new(0.0, 0.0, 50.0),
            Vec3::new(30.0, -4.0, 1.0),
            Vec3::new(-100.0, 35.0, 0.5),
        ] {
            let anchor = project_anchor(
                pos,
                Vec3::ZERO,
                Vec3::NEG_Z,
                test_clip_from_world(),
                VIEWPORT,
            );
            assert_eq!(anchor, Anchor::ViewportCenter, "at {pos:?}");
        }
    }

    #[test]
    fn out_of_frustum_falls_back_to_center() {
        // In front of the camera but far outside the horizontal field of view.
        let anchor = project_anchor(
            Vec3::new(500.0, 0.0, -10.0),
            Vec3::ZERO,
            Vec3::NEG_Z,
            test_clip_from_world(),
            VIEWPORT,
        );
        assert_eq!(anchor, Anchor::ViewportCenter);
    }

    #[test]
    fn non_finite_projection_falls_back_to_center() {
        let anchor = project_anchor(
            Vec3::new(f32::NAN, 0.0, -10.0),
            Vec3::ZERO,
            Vec3::NEG_Z,
            test_clip_from_world(),
            VIEWPORT,
        );
        assert_eq!(anchor, Anchor::ViewportCenter);
    }

    #[test]
    fn fallback_resolves_to_center_pixel() {
        assert_eq!(Anchor::ViewportCenter.resolve(VIEWPORT), VIEWPORT * 0.5);
        assert!(Anchor::ViewportCenter.is_fallback());
        assert!(!Anchor::OnScreen(Vec2::new(4.0, 4.0)).is_fallback());
    }
}
