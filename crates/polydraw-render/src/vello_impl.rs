//! Vello-backed rendering surface.

use crate::paint::{paint_color, visual_transform};
use kurbo::{Affine, Size, Stroke};
use parley::layout::PositionedLayoutItem;
use parley::{FontContext, Layout, LayoutContext, StyleProperty};
use peniko::{Brush, Fill};
use polydraw_core::{RenderingSurface, SceneObject, TextStyle, TextureHandle, VectorPath, Viewport};
use std::collections::HashMap;
use vello::Scene;

/// Rendering surface that keeps one Vello scene fragment per texture.
pub struct VelloSurface {
    /// Live fragments keyed by texture id.
    fragments: HashMap<u64, Scene>,
    next_id: u64,
    /// Font context for text layout (system fonts).
    font_cx: FontContext,
    layout_cx: LayoutContext<Brush>,
}

impl Default for VelloSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloSurface {
    pub fn new() -> Self {
        Self {
            fragments: HashMap::new(),
            next_id: 0,
            font_cx: FontContext::new(),
            layout_cx: LayoutContext::new(),
        }
    }

    /// Scene fragment of a live texture.
    pub fn fragment(&self, texture: TextureHandle) -> Option<&Scene> {
        self.fragments.get(&texture.id)
    }

    /// Number of live textures.
    pub fn live_textures(&self) -> usize {
        self.fragments.len()
    }

    fn layout(&mut self, text: &str, style: &TextStyle) -> Layout<Brush> {
        let brush = Brush::Solid(paint_color(style.color, 1.0));
        let mut builder = self.layout_cx.ranged_builder(&mut self.font_cx, text, 1.0, false);
        builder.push_default(StyleProperty::FontSize(style.font_size as f32));
        builder.push_default(StyleProperty::Brush(brush));
        let mut layout = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    /// Build the frame scene: every object's fragment placed through the
    /// viewport, followed by its label.
    pub fn compose<'a>(
        &mut self,
        objects: impl IntoIterator<Item = &'a SceneObject>,
        viewport: &impl Viewport,
    ) -> Scene {
        let mut scene = Scene::new();
        for object in objects {
            let visual = object.visual();
            let transform = visual_transform(visual, viewport);

            if let Some(fragment) = visual.texture().and_then(|t| self.fragments.get(&t.id)) {
                scene.append(fragment, Some(transform));
            }

            if let Some(label) = visual.label() {
                let layout = self.layout(&label.text, &label.style);
                let origin = Affine::translate(label.position.to_vec2());
                draw_layout(&mut scene, &layout, transform * origin);
            }
        }
        scene
    }
}

/// Minimum line height as a multiple of the font size.
const LINE_HEIGHT: f64 = 1.2;

impl RenderingSurface for VelloSurface {
    fn generate_texture(&mut self, path: &VectorPath) -> TextureHandle {
        let mut fragment = Scene::new();
        if let Some(fill) = path.fill {
            fragment.fill(
                Fill::NonZero,
                Affine::IDENTITY,
                paint_color(fill, path.alpha),
                None,
                &path.path,
            );
        }
        if let Some(stroke) = path.stroke {
            fragment.stroke(
                &Stroke::new(stroke.width),
                Affine::IDENTITY,
                paint_color(stroke.color, path.alpha),
                None,
                &path.path,
            );
        }

        self.next_id += 1;
        let handle = TextureHandle {
            id: self.next_id,
            bounds: path.bounds(),
        };
        self.fragments.insert(handle.id, fragment);
        handle
    }

    fn release_texture(&mut self, texture: TextureHandle) {
        if self.fragments.remove(&texture.id).is_none() {
            log::warn!("Released unknown texture {}", texture.id);
        }
    }

    fn measure_text(&mut self, text: &str, style: &TextStyle) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }
        let layout = self.layout(text, style);
        let width = layout.width() as f64;
        let height = (layout.height() as f64).max(style.font_size * LINE_HEIGHT);
        Size::new(width, height)
    }
}

fn draw_layout(scene: &mut Scene, layout: &Layout<Brush>, transform: Affine) {
    for line in layout.lines() {
        for item in line.items() {
            let PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                continue;
            };
            let mut x = glyph_run.offset();
            let y = glyph_run.baseline();
            let run = glyph_run.run();
            let style = glyph_run.style();

            let glyphs: Vec<vello::Glyph> = glyph_run
                .glyphs()
                .map(|glyph| {
                    let gx = x + glyph.x;
                    let gy = y - glyph.y;
                    x += glyph.advance;
                    vello::Glyph {
                        id: glyph.id,
                        x: gx,
                        y: gy,
                    }
                })
                .collect();

            if glyphs.is_empty() {
                continue;
            }
            scene
                .draw_glyphs(run.font())
                .brush(&style.brush)
                .transform(transform)
                .font_size(run.font_size())
                .normalized_coords(run.normalized_coords())
                .draw(Fill::NonZero, glyphs.into_iter());
        }
    }
}
