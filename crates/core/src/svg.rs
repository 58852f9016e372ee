//! SVG renderer: converts `RenderCommand` lists into standalone SVG strings.
//!
//! Used for script-free snapshots of a carousel, e.g. server-rendered
//! markup before the interactive host attaches.

use glide_protocol::{RenderCommand, TextAlign, ThemeToken};

/// Render a list of commands as an SVG document string.
///
/// `width` and `height` define the SVG viewBox dimensions. `labels[i]`
/// captions the card placed for item `i`; missing labels leave the card
/// blank. `dark` selects the color palette.
pub fn render_svg(
    commands: &[RenderCommand],
    width: f64,
    height: f64,
    labels: &[String],
    dark: bool,
) -> String {
    let mut svg = String::with_capacity(commands.len() * 160);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:system-ui,-apple-system,sans-serif;font-size:13px">"#,
    ));

    let mut clip_id = 0usize;
    // Each SetClip/PushTransform opens a <g>; the matching pop closes it.
    let mut open_groups = 0usize;

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                ..
            } => {
                let fill = resolve_color(*color, dark);
                svg.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}" rx="6""#,
                    rect.x, rect.y, rect.w, rect.h,
                ));
                if let Some(bc) = border_color {
                    svg.push_str(&format!(r#" stroke="{}""#, resolve_color(*bc, dark)));
                }
                svg.push_str("/>");
            }
            RenderCommand::PlaceItem { rect, index } => {
                let fill = resolve_color(ThemeToken::CardFill, dark);
                let stroke = resolve_color(ThemeToken::CardBorder, dark);
                svg.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}" stroke="{stroke}" rx="8"/>"#,
                    rect.x, rect.y, rect.w, rect.h,
                ));
                if let Some(label) = labels.get(*index).filter(|l| !l.is_empty()) {
                    let text_color = resolve_color(ThemeToken::CardText, dark);
                    svg.push_str(&format!(
                        r#"<text x="{}" y="{}" fill="{text_color}" style="pointer-events:none">{}</text>"#,
                        rect.x + 12.0,
                        rect.y + 24.0,
                        escape_xml(&truncate(label, rect.w)),
                    ));
                }
            }
            RenderCommand::DrawText {
                text,
                position,
                color,
                font_size,
                align,
            } => {
                let fill = resolve_color(*color, dark);
                let anchor = match align {
                    TextAlign::Left => "start",
                    TextAlign::Center => "middle",
                    TextAlign::Right => "end",
                };
                svg.push_str(&format!(
                    r#"<text x="{}" y="{}" fill="{fill}" font-size="{font_size}" text-anchor="{anchor}" dominant-baseline="central">{}</text>"#,
                    position.x,
                    position.y,
                    escape_xml(text),
                ));
            }
            RenderCommand::SetClip { rect } => {
                clip_id += 1;
                svg.push_str(&format!(
                    r#"<clipPath id="clip{clip_id}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath><g clip-path="url(#clip{clip_id})">"#,
                    rect.x, rect.y, rect.w, rect.h,
                ));
                open_groups += 1;
            }
            RenderCommand::PushTransform { translate, .. } => {
                svg.push_str(&format!(
                    r#"<g transform="translate({} {})">"#,
                    translate.x, translate.y
                ));
                open_groups += 1;
            }
            RenderCommand::ClearClip | RenderCommand::PopTransform => {
                if open_groups > 0 {
                    svg.push_str("</g>");
                    open_groups -= 1;
                }
            }
            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
        }
    }

    for _ in 0..open_groups {
        svg.push_str("</g>");
    }
    svg.push_str("</svg>");
    svg
}

fn truncate(label: &str, width: f64) -> String {
    let max_chars = ((width - 24.0) / 7.5).max(0.0) as usize;
    if label.chars().count() > max_chars && max_chars > 2 {
        let truncated: String = label.chars().take(max_chars - 1).collect();
        format!("{truncated}…")
    } else {
        label.to_string()
    }
}

fn resolve_color(token: ThemeToken, dark: bool) -> &'static str {
    if dark {
        match token {
            ThemeToken::Background => "#11111b",
            ThemeToken::Surface => "#181825",
            ThemeToken::Border | ThemeToken::CardBorder | ThemeToken::ControlBorder => "#313244",
            ThemeToken::CardFill => "#1e1e2e",
            ThemeToken::CardText | ThemeToken::ControlGlyph => "#cdd6f4",
            ThemeToken::CardTextMuted => "#a6adc8",
            ThemeToken::ControlFill => "#45475a",
        }
    } else {
        match token {
            ThemeToken::Background => "#eff1f5",
            ThemeToken::Surface => "#e6e9ef",
            ThemeToken::Border | ThemeToken::CardBorder | ThemeToken::ControlBorder => "#ccd0da",
            ThemeToken::CardFill => "#ffffff",
            ThemeToken::CardText | ThemeToken::ControlGlyph => "#4c4f69",
            ThemeToken::CardTextMuted => "#6c6f85",
            ThemeToken::ControlFill => "#ffffff",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::Carousel;
    use crate::config::CarouselConfig;
    use crate::render::render_carousel;

    fn snapshot(labels: &[String]) -> String {
        let mut carousel = Carousel::new(CarouselConfig::new(300.0, 16.0).unwrap(), 3);
        carousel.set_viewport_width(700.0);
        let commands = render_carousel(&carousel, 180.0);
        render_svg(&commands, 700.0, 180.0, labels, true)
    }

    #[test]
    fn renders_cards_inside_clipped_strip() {
        let labels = vec!["Lisbon".to_string(), "Porto".to_string()];
        let svg = snapshot(&labels);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("clip-path=\"url(#clip1)\""));
        assert!(svg.contains("translate(0 0)"));
        assert!(svg.contains("Lisbon"));
        assert!(svg.contains("Porto"));
        // Next control is visible at offset 0.
        assert!(svg.contains("›"));
        assert!(!svg.contains("‹"));
        assert_eq!(svg.matches("<g").count(), svg.matches("</g>").count());
    }

    #[test]
    fn escapes_xml_entities() {
        let svg = snapshot(&["Tours & <Cruises>".to_string()]);
        assert!(svg.contains("Tours &amp; &lt;Cruises&gt;"));
    }

    #[test]
    fn every_command_reaches_the_document() {
        let svg = snapshot(&[]);
        assert!(svg.contains(r#"viewBox="0 0 700 180""#));
        // Surface, clip path, three cards and the next control.
        assert_eq!(svg.matches("<rect").count(), 6);
        assert!(svg.contains(r#"text-anchor="middle""#));
    }
}
