//! The main visualization scene: a large view with graph and parameter panels.

use super::panel::{Panel, PanelStyle};
use super::{Object, Scene};
use crate::assets::Assets;
use crate::error::Result;
use crate::math::Vec2;

/// Name the visual scene is registered under.
pub const VISUAL_SCENE: &str = "visual";

/// Builds the visual scene.
pub fn visual_scene() -> Scene {
    Scene::new(VISUAL_SCENE, panels).with_bg_color("white")
}

fn panels(assets: &Assets) -> Result<Vec<Box<dyn Object>>> {
    let black = assets.color("black")?;
    let base = PanelStyle {
        color: black,
        line_color: black.correct_gamma(1.1),
        line_thickness: 2,
        border_color: black,
        border_height: 30.0,
        text_color: assets.color("white")?,
        text_size: 20.0,
        text_x_offset: 5.0,
    };

    let layout = [
        ("visual", "Visualization", (0.0, 0.0), (0.66, 0.66), "light_gray"),
        ("graph", "Graphs", (0.0, 0.66), (0.66, 1.0), "gray"),
        ("param", "Parameters", (0.66, 0.0), (1.0, 1.0), "dark_gray"),
    ];

    layout
        .into_iter()
        .map(|(name, title, start, end, color)| {
            let style = PanelStyle {
                color: assets.color(color)?,
                ..base
            };
            let panel = Panel::new(name, title, Vec2::from(start), Vec2::from(end), style);
            Ok(Box::new(panel) as Box<dyn Object>)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Size;
    use crate::testing::{Harness, bundled_assets};

    #[test]
    fn test_three_panels_in_order() {
        let mut harness = Harness::new(Size::new(1200, 900));
        let mut assets = bundled_assets();
        let mut scene = visual_scene();
        scene.start(&mut harness.scene_context(&mut assets)).unwrap();

        let names: Vec<&str> = scene.objects().map(|o| o.name()).collect();
        assert_eq!(names, vec!["visual", "graph", "param"]);
        assert_eq!(harness.renderer.bg_color(), assets.color("white").unwrap());
    }

    #[test]
    fn test_panels_release_handlers_on_end() {
        let mut harness = Harness::new(Size::new(1200, 900));
        let mut assets = bundled_assets();
        let before = harness.events.len();
        let mut scene = visual_scene();

        scene.start(&mut harness.scene_context(&mut assets)).unwrap();
        assert_eq!(harness.events.len(), before + 3);

        scene.end(&mut harness.scene_context(&mut assets)).unwrap();
        harness.dispatch(Vec::new()).unwrap();
        assert_eq!(harness.events.len(), before);
    }

    #[test]
    fn test_panels_draw_without_errors() {
        let mut harness = Harness::new(Size::new(1200, 900));
        let mut assets = bundled_assets();
        let mut scene = visual_scene();
        {
            let mut ctx = harness.scene_context(&mut assets);
            scene.start(&mut ctx).unwrap();
            scene.draw(&mut ctx).unwrap();
        }
        // Body, title bar, title and four edges per panel.
        assert_eq!(harness.renderer.pending(), 3 * 7);
    }
}
