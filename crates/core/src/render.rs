use glide_protocol::{HitTarget, Point, Rect, RenderCommand, TextAlign, ThemeToken};

use crate::carousel::Carousel;

const CONTROL_SIZE: f64 = 40.0;
const CONTROL_INSET: f64 = 8.0;
const CONTROL_GLYPH_SIZE: f64 = 22.0;

/// Lay out a carousel as render commands, in carousel-local coordinates
/// (origin at the viewport's top-left).
///
/// Items are emitted in caller order, one `PlaceItem` per item, inside a
/// clip of the viewport and a translation by the committed offset. The
/// prev/next controls follow, outside the clip, only while their
/// affordance is visible.
pub fn render_carousel(carousel: &Carousel, height: f64) -> Vec<RenderCommand> {
    let config = carousel.config();
    let width = carousel.viewport_width().max(0.0);
    let viewport = Rect::new(0.0, 0.0, width, height);

    let mut commands = Vec::with_capacity(carousel.item_count() + 14);
    commands.push(RenderCommand::BeginGroup {
        id: "carousel".into(),
        label: Some("Carousel".into()),
    });
    commands.push(RenderCommand::DrawRect {
        rect: viewport,
        color: ThemeToken::Surface,
        border_color: None,
        hit: None,
    });
    commands.push(RenderCommand::SetClip { rect: viewport });
    commands.push(RenderCommand::PushTransform {
        translate: Point::new(carousel.offset(), 0.0),
        transition: carousel.transition(),
    });

    let stride = config.stride();
    for index in 0..carousel.item_count() {
        commands.push(RenderCommand::PlaceItem {
            rect: Rect::new(index as f64 * stride, 0.0, config.item_width, height),
            index,
        });
    }

    commands.push(RenderCommand::PopTransform);
    commands.push(RenderCommand::ClearClip);

    if carousel.show_prev() {
        push_control(&mut commands, HitTarget::PrevControl, CONTROL_INSET, height);
    }
    if carousel.show_next() {
        let x = width - CONTROL_INSET - CONTROL_SIZE;
        push_control(&mut commands, HitTarget::NextControl, x, height);
    }

    commands.push(RenderCommand::EndGroup);
    commands
}

fn push_control(commands: &mut Vec<RenderCommand>, target: HitTarget, x: f64, height: f64) {
    let y = (height - CONTROL_SIZE) / 2.0;
    let rect = Rect::new(x, y, CONTROL_SIZE, CONTROL_SIZE);
    let glyph = match target {
        HitTarget::PrevControl => "‹",
        HitTarget::NextControl => "›",
    };
    commands.push(RenderCommand::DrawRect {
        rect,
        color: ThemeToken::ControlFill,
        border_color: Some(ThemeToken::ControlBorder),
        hit: Some(target),
    });
    commands.push(RenderCommand::DrawText {
        position: Point::new(x + CONTROL_SIZE / 2.0, y + CONTROL_SIZE / 2.0),
        text: glyph.into(),
        color: ThemeToken::ControlGlyph,
        font_size: CONTROL_GLYPH_SIZE,
        align: TextAlign::Center,
    });
}

/// Find the topmost hit target under `point` (carousel-local coordinates).
pub fn hit_test(commands: &[RenderCommand], point: Point) -> Option<HitTarget> {
    commands.iter().rev().find_map(|cmd| match cmd {
        RenderCommand::DrawRect {
            rect,
            hit: Some(target),
            ..
        } if rect.contains(point) => Some(*target),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CarouselConfig;

    fn carousel(items: usize) -> Carousel {
        let mut c = Carousel::new(CarouselConfig::new(300.0, 16.0).unwrap(), items);
        c.set_viewport_width(1000.0);
        c
    }

    fn placed(commands: &[RenderCommand]) -> Vec<(usize, f64)> {
        commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::PlaceItem { rect, index } => Some((*index, rect.x)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn places_items_in_order_at_stride() {
        let cmds = render_carousel(&carousel(3), 200.0);
        assert_eq!(placed(&cmds), vec![(0, 0.0), (1, 316.0), (2, 632.0)]);
        assert!(matches!(cmds.first(), Some(RenderCommand::BeginGroup { .. })));
        assert!(matches!(cmds.last(), Some(RenderCommand::EndGroup)));
    }

    #[test]
    fn strip_is_translated_by_offset() {
        let mut c = carousel(10);
        c.scroll_right();
        let cmds = render_carousel(&c, 200.0);
        let translate = cmds.iter().find_map(|cmd| match cmd {
            RenderCommand::PushTransform { translate, .. } => Some(*translate),
            _ => None,
        });
        assert_eq!(translate, Some(Point::new(-316.0, 0.0)));
    }

    #[test]
    fn controls_render_only_when_visible() {
        let mut c = carousel(10);
        let cmds = render_carousel(&c, 200.0);
        assert_eq!(hit_test(&cmds, Point::new(20.0, 100.0)), None);
        assert_eq!(
            hit_test(&cmds, Point::new(970.0, 100.0)),
            Some(HitTarget::NextControl)
        );

        c.scroll_right();
        let cmds = render_carousel(&c, 200.0);
        assert_eq!(
            hit_test(&cmds, Point::new(20.0, 100.0)),
            Some(HitTarget::PrevControl)
        );
        assert_eq!(hit_test(&cmds, Point::new(500.0, 100.0)), None);
    }

    #[test]
    fn empty_list_renders_bare_viewport() {
        let cmds = render_carousel(&carousel(0), 200.0);
        assert!(placed(&cmds).is_empty());
        assert!(!cmds.iter().any(|c| matches!(c, RenderCommand::DrawText { .. })));
    }
}
