use egui::{Align2, CornerRadius, FontId, Pos2, Rect, Stroke, StrokeKind};
use glide_protocol::{RenderCommand, TextAlign};

use crate::theme::{self, ThemeMode};

/// Draws one opaque item into the rect the carousel reserved for it.
pub type ItemPainter<'a> = dyn FnMut(&egui::Painter, Rect, usize) + 'a;

/// Render a list of `RenderCommand` into an egui `Painter`.
///
/// `origin` is the top-left pixel position of the carousel viewport.
/// `strip_x`, when set, replaces the committed translation of the item
/// strip with the animator's displayed one.
pub fn render_commands(
    painter: &mut egui::Painter,
    commands: &[RenderCommand],
    origin: Pos2,
    strip_x: Option<f64>,
    mode: ThemeMode,
    paint_item: &mut ItemPainter<'_>,
) {
    let mut translate_stack: Vec<egui::Vec2> = vec![egui::Vec2::ZERO];
    let mut clip_stack: Vec<Rect> = Vec::new();

    for cmd in commands {
        let shift = translate_stack.last().copied().unwrap_or(egui::Vec2::ZERO);
        let place = |x: f64, y: f64| origin + shift + egui::vec2(x as f32, y as f32);

        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                ..
            } => {
                let egui_rect =
                    Rect::from_min_size(place(rect.x, rect.y), egui::vec2(rect.w as f32, rect.h as f32));
                if !painter.clip_rect().intersects(egui_rect) {
                    continue;
                }
                let radius = CornerRadius::same(8);
                painter.rect_filled(egui_rect, radius, theme::resolve(*color, mode));
                if let Some(bc) = border_color {
                    painter.rect_stroke(
                        egui_rect,
                        radius,
                        Stroke::new(1.0, theme::resolve(*bc, mode)),
                        StrokeKind::Inside,
                    );
                }
            }

            RenderCommand::PlaceItem { rect, index } => {
                let egui_rect =
                    Rect::from_min_size(place(rect.x, rect.y), egui::vec2(rect.w as f32, rect.h as f32));
                // Cull off-screen cards
                if !painter.clip_rect().intersects(egui_rect) {
                    continue;
                }
                paint_item(painter, egui_rect, *index);
            }

            RenderCommand::DrawText {
                position,
                text,
                color,
                font_size,
                align,
            } => {
                let size = *font_size as f32;
                if size < 1.0 {
                    continue;
                }
                let anchor = match align {
                    TextAlign::Left => Align2::LEFT_CENTER,
                    TextAlign::Center => Align2::CENTER_CENTER,
                    TextAlign::Right => Align2::RIGHT_CENTER,
                };
                painter.text(
                    place(position.x, position.y),
                    anchor,
                    text,
                    FontId::proportional(size),
                    theme::resolve(*color, mode),
                );
            }

            RenderCommand::SetClip { rect } => {
                let clip_rect =
                    Rect::from_min_size(place(rect.x, rect.y), egui::vec2(rect.w as f32, rect.h as f32));
                clip_stack.push(painter.clip_rect());
                let intersected = painter.clip_rect().intersect(clip_rect);
                painter.set_clip_rect(intersected);
            }

            RenderCommand::ClearClip => {
                if let Some(prev) = clip_stack.pop() {
                    painter.set_clip_rect(prev);
                }
            }

            RenderCommand::PushTransform { translate, .. } => {
                let x = strip_x.unwrap_or(translate.x);
                translate_stack.push(shift + egui::vec2(x as f32, translate.y as f32));
            }

            RenderCommand::PopTransform => {
                if translate_stack.len() > 1 {
                    translate_stack.pop();
                }
            }

            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {
                // Groups carry no visuals in egui
            }
        }
    }
}
