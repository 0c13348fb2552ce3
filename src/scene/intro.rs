//! The startup title sequence.
//!
//! Seven seconds long: the title and author fade in one after the other, hold,
//! and fade out together; then the license and repository lines fade in, hold
//! and fade out. The visual scene is requested once six seconds have passed.

use super::{GUI_FONT, Object, Scene, SceneContext};
use crate::error::Result;
use crate::math::Vec2;

/// Name the intro scene is registered under.
pub const INTRO_SCENE: &str = "intro";

const NEXT_SCENE: &str = "visual";
const SWITCH_AFTER: f32 = 6.0;

/// One line of intro text.
///
/// A non-negative `offset` places the text's bottom edge on the drawable
/// center and raises it by `offset`; a negative one places its top edge there
/// and lowers it.
#[derive(Debug, Clone, Copy)]
struct Line {
    text: &'static str,
    size: f32,
    offset: f32,
}

const TITLE: Line = Line {
    text: "Zipline Simulation",
    size: 48.0,
    offset: 10.0,
};
const AUTHOR: Line = Line {
    text: "By Shamim Siddique",
    size: 30.0,
    offset: -10.0,
};
const LICENSE: Line = Line {
    text: "Copyrighted under the GPLv3 license.",
    size: 36.0,
    offset: 10.0,
};
const REPOSITORY: Line = Line {
    text: "(https://github.com/abxh/zipline-simulator)",
    size: 28.0,
    offset: -10.0,
};

/// Builds the intro scene.
pub fn intro_scene() -> Scene {
    Scene::new(INTRO_SCENE, |_| Ok(vec![Box::new(IntroText::new()) as Box<dyn Object>]))
        .with_bg_color("white")
}

/// The fading intro text.
#[derive(Debug, Default)]
pub struct IntroText {
    elapsed: f32,
}

impl IntroText {
    /// Starts the sequence at zero seconds.
    pub fn new() -> Self {
        Self::default()
    }

    /// The lines visible at `elapsed` seconds with their opacity (0..=1).
    fn visible_lines(elapsed: f32) -> Vec<(Line, f32)> {
        let t = elapsed;
        match t {
            t if t <= 1.0 => vec![(TITLE, t)],
            t if t <= 2.0 => vec![(TITLE, 1.0), (AUTHOR, t - 1.0)],
            t if t <= 3.0 => vec![(TITLE, 1.0), (AUTHOR, 1.0)],
            t if t <= 4.0 => vec![(TITLE, 4.0 - t), (AUTHOR, 4.0 - t)],
            t if t <= 5.0 => vec![(LICENSE, t - 4.0), (REPOSITORY, t - 4.0)],
            t if t <= 6.0 => vec![(LICENSE, 1.0), (REPOSITORY, 1.0)],
            t if t <= 7.0 => vec![(LICENSE, 7.0 - t), (REPOSITORY, 7.0 - t)],
            _ => Vec::new(),
        }
    }

    fn draw_line(ctx: &mut SceneContext<'_>, line: Line, opacity: f32) -> Result<()> {
        let scale = ctx.renderer.height_scale();
        let font = ctx.assets.font(GUI_FONT, (line.size * scale).round())?;
        let color = ctx.assets.color("black")?;
        let alpha = (255.0 * opacity).clamp(0.0, 255.0) as u8;
        let surface = ctx.assets.render_text(&font, line.text, color).with_alpha(alpha);

        let center = ctx.renderer.drawable().rect().center();
        let width = surface.width() as f32;
        let height = surface.height() as f32;
        let top = if line.offset >= 0.0 {
            center.y() - height
        } else {
            center.y()
        };
        let pos = Vec2::new(center.x() - width / 2.0, top - line.offset * scale);

        ctx.renderer.draw_surface(0, surface, pos)?;
        Ok(())
    }
}

impl Object for IntroText {
    fn name(&self) -> &str {
        "introtext"
    }

    fn update(&mut self, dt: f32, ctx: &mut SceneContext<'_>) -> Result<()> {
        self.elapsed += dt;
        if self.elapsed > SWITCH_AFTER {
            ctx.request_scene(NEXT_SCENE);
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut SceneContext<'_>) -> Result<()> {
        for (line, opacity) in Self::visible_lines(self.elapsed) {
            Self::draw_line(ctx, line, opacity)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Size;
    use crate::testing::{DrawOp, Harness, bundled_assets};

    fn texts(elapsed: f32) -> Vec<&'static str> {
        IntroText::visible_lines(elapsed)
            .into_iter()
            .map(|(line, _)| line.text)
            .collect()
    }

    #[test]
    fn test_sequence() {
        assert_eq!(texts(0.5), vec![TITLE.text]);
        assert_eq!(texts(1.5), vec![TITLE.text, AUTHOR.text]);
        assert_eq!(texts(3.5), vec![TITLE.text, AUTHOR.text]);
        assert_eq!(texts(4.5), vec![LICENSE.text, REPOSITORY.text]);
        assert_eq!(texts(6.5), vec![LICENSE.text, REPOSITORY.text]);
        assert!(texts(7.5).is_empty());
    }

    #[test]
    fn test_fades() {
        let fading_in = IntroText::visible_lines(1.25);
        assert_eq!(fading_in[0].1, 1.0);
        assert_eq!(fading_in[1].1, 0.25);

        let fading_out = IntroText::visible_lines(3.75);
        assert_eq!(fading_out[0].1, 0.25);
    }

    #[test]
    fn test_requests_visual_scene_after_six_seconds() {
        let mut harness = Harness::new(Size::new(800, 600));
        let mut assets = bundled_assets();
        harness.next_scene = INTRO_SCENE.to_string();
        let mut intro = IntroText::new();
        let mut ctx = harness.scene_context(&mut assets);

        intro.update(5.9, &mut ctx).unwrap();
        assert_eq!(ctx.next_scene.as_str(), INTRO_SCENE);
        intro.update(0.2, &mut ctx).unwrap();
        assert_eq!(ctx.next_scene.as_str(), "visual");
    }

    #[test]
    fn test_title_sits_above_center() {
        let mut harness = Harness::new(Size::new(800, 600));
        let mut assets = bundled_assets();
        let mut intro = IntroText::new();
        {
            let mut ctx = harness.scene_context(&mut assets);
            intro.update(1.0, &mut ctx).unwrap();
            intro.draw(&mut ctx).unwrap();
        }
        harness.renderer.flush(&mut harness.screen).unwrap();

        let blits: Vec<(Vec2, Size, u8)> = harness
            .screen
            .canvas
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Blit { pos, size, alpha } => Some((*pos, *size, *alpha)),
                _ => None,
            })
            .collect();
        assert_eq!(blits.len(), 1);

        let (pos, size, alpha) = blits[0];
        assert_eq!(alpha, 255);
        assert_eq!(pos.y() + size.height as f32, 300.0 - 10.0);
        assert!((pos.x() + size.width as f32 / 2.0 - 400.0).abs() < 0.01);
    }
}
