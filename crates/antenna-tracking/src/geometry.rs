//! Canvas Geometry
//!
//! Converts pointer drags into a mobile angle and lays out the icons a sink
//! draws: the mobile square pinned to the circle, the base-station lobe
//! triangle rotated to the heading, the two labels and the ray fan.
//!
//! Canvas coordinates are pixels with the y axis pointing down, so positive
//! angles turn clockwise on screen.

use nalgebra::{Point2, Rotation2, Vector2};
use std::f64::consts::PI;

use crate::config::CanvasConfig;
use crate::frame::{CanvasPoint, IconRect, Label, Ray, Scene};
use crate::gain_pattern::linspace;

/// Half the side of the mobile square
pub const MOBILE_ICON_HALF_SIZE: f64 = 5.0;
/// Mobile label offset from the icon centre
pub const MOBILE_LABEL_OFFSET: (f64, f64) = (25.0, 25.0);
/// Base-station label offset from the canvas centre
pub const BASE_LABEL_OFFSET: (f64, f64) = (10.0, 10.0);

/// Lobe triangle at heading 0, relative to the canvas centre
const BASE_LOBE_VERTICES: [(f64, f64); 3] = [
    (-10.0, 17.320_508_075_688_775),
    (10.0, 17.320_508_075_688_775),
    (0.0, -17.320_508_075_688_775),
];

#[derive(Debug, Clone, Copy)]
pub struct CanvasGeometry {
    center: Point2<f64>,
    radius: f64,
    ray_count: usize,
    ray_length: f64,
}

impl CanvasGeometry {
    pub fn new(config: &CanvasConfig) -> Self {
        Self {
            center: Point2::new(config.center_x, config.center_y),
            radius: config.radius,
            ray_count: config.ray_count,
            ray_length: config.ray_length,
        }
    }

    pub fn center(&self) -> CanvasPoint {
        self.center.into()
    }

    /// Angle of the pointer around the canvas centre
    pub fn pointer_angle(&self, x: f64, y: f64) -> f64 {
        (y - self.center.y).atan2(x - self.center.x)
    }

    /// Point on the tracking circle at `angle`
    pub fn project(&self, angle: f64) -> CanvasPoint {
        let p = self.center + Vector2::new(angle.cos(), angle.sin()) * self.radius;
        p.into()
    }

    pub fn mobile_icon(&self, mobile_angle: f64) -> IconRect {
        let c = self.project(mobile_angle);
        IconRect {
            top_left: CanvasPoint::new(c.x - MOBILE_ICON_HALF_SIZE, c.y - MOBILE_ICON_HALF_SIZE),
            bottom_right: CanvasPoint::new(c.x + MOBILE_ICON_HALF_SIZE, c.y + MOBILE_ICON_HALF_SIZE),
        }
    }

    /// Lobe triangle rotated about the centre to `base_angle`
    pub fn base_lobe(&self, base_angle: f64) -> [CanvasPoint; 3] {
        let rotation = Rotation2::new(base_angle);
        BASE_LOBE_VERTICES.map(|(dx, dy)| (self.center + rotation * Vector2::new(dx, dy)).into())
    }

    /// Fan of rays from the mobile icon out past the canvas edge
    pub fn rays(&self, from: CanvasPoint) -> Vec<Ray> {
        linspace(-PI, PI, self.ray_count)
            .into_iter()
            .map(|theta| Ray {
                from,
                to: (self.center + Vector2::new(theta.cos(), theta.sin()) * self.ray_length).into(),
            })
            .collect()
    }

    pub fn scene(&self, mobile_angle: f64, base_angle: f64) -> Scene {
        let mobile = self.project(mobile_angle);
        Scene {
            mobile_icon: self.mobile_icon(mobile_angle),
            base_lobe: self.base_lobe(base_angle),
            mobile_label: Label {
                text: "Omni".to_string(),
                at: CanvasPoint::new(mobile.x + MOBILE_LABEL_OFFSET.0, mobile.y + MOBILE_LABEL_OFFSET.1),
            },
            base_label: Label {
                text: "Base Station".to_string(),
                at: CanvasPoint::new(
                    self.center.x + BASE_LABEL_OFFSET.0,
                    self.center.y + BASE_LABEL_OFFSET.1,
                ),
            },
            rays: self.rays(mobile),
        }
    }
}

impl Default for CanvasGeometry {
    fn default() -> Self {
        Self::new(&CanvasConfig::default())
    }
}

impl From<Point2<f64>> for CanvasPoint {
    fn from(p: Point2<f64>) -> Self {
        Self::new(p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dist(a: CanvasPoint, b: CanvasPoint) -> f64 {
        ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
    }

    #[test]
    fn test_pointer_angle_quadrants() {
        let geo = CanvasGeometry::default();

        assert_eq!(geo.pointer_angle(300.0, 200.0), 0.0);
        assert!((geo.pointer_angle(200.0, 300.0) - PI / 2.0).abs() < 1e-12);
        assert!((geo.pointer_angle(100.0, 200.0) - PI).abs() < 1e-12);
        assert!((geo.pointer_angle(200.0, 100.0) + PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_initial_lobe_matches_classic_layout() {
        let lobe = CanvasGeometry::default().base_lobe(0.0);

        assert!((lobe[0].x - 190.0).abs() < 1e-9);
        assert!((lobe[0].y - 217.320_508_075_688_77).abs() < 1e-9);
        assert!((lobe[1].x - 210.0).abs() < 1e-9);
        assert!((lobe[2].x - 200.0).abs() < 1e-9);
        assert!((lobe[2].y - 182.679_491_924_311_23).abs() < 1e-9);
    }

    #[test]
    fn test_lobe_half_turn() {
        let lobe = CanvasGeometry::default().base_lobe(PI);

        // Tip flips to the other side of the centre
        assert!((lobe[2].x - 200.0).abs() < 1e-9);
        assert!((lobe[2].y - 217.320_508_075_688_77).abs() < 1e-9);
    }

    #[test]
    fn test_scene_layout() {
        let geo = CanvasGeometry::default();
        let scene = geo.scene(0.0, 0.0);

        assert_eq!(scene.rays.len(), 90);
        assert_eq!(scene.mobile_icon.top_left, CanvasPoint::new(295.0, 195.0));
        assert_eq!(scene.mobile_icon.bottom_right, CanvasPoint::new(305.0, 205.0));
        assert_eq!(scene.mobile_label.at, CanvasPoint::new(325.0, 225.0));
        assert_eq!(scene.base_label.at, CanvasPoint::new(210.0, 210.0));
        assert!(scene.rays.iter().all(|r| r.from == CanvasPoint::new(300.0, 200.0)));
        assert!(scene.rays.iter().all(|r| (dist(r.to, geo.center()) - 400.0).abs() < 1e-9));
    }

    proptest! {
        #[test]
        fn test_drag_reprojects_onto_circle(x in -500.0f64..900.0, y in -500.0f64..900.0) {
            let geo = CanvasGeometry::default();
            let angle = geo.pointer_angle(x, y);
            let on_circle = geo.project(angle);

            prop_assert!(angle >= -PI && angle <= PI);
            prop_assert!((dist(on_circle, geo.center()) - 100.0).abs() < 1e-9);
        }

        #[test]
        fn test_lobe_rotation_preserves_shape(angle in -10.0f64..10.0) {
            let geo = CanvasGeometry::default();
            let rest = geo.base_lobe(0.0);
            let turned = geo.base_lobe(angle);

            for i in 0..3 {
                prop_assert!((dist(rest[i], geo.center()) - dist(turned[i], geo.center())).abs() < 1e-9);
                let j = (i + 1) % 3;
                prop_assert!((dist(rest[i], rest[j]) - dist(turned[i], turned[j])).abs() < 1e-9);
            }
        }
    }
}
