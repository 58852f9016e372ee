use std::io::{Stdout, stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use glide_core::render::{hit_test, render_carousel};
use glide_core::{Animator, Carousel, Phase, PointerEvent, PointerSource};
use glide_protocol::{HitTarget, Point, RenderCommand, ThemeToken};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Paragraph},
};

/// Pixels per terminal cell; the carousel works in px.
const CELL_W: f64 = 8.0;
const CELL_H: f64 = 16.0;
const CAROUSEL_ROWS: u16 = 10;

fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::Background => Color::Black,
        ThemeToken::Surface => Color::Rgb(24, 24, 37),
        ThemeToken::Border => Color::DarkGray,
        ThemeToken::CardFill => Color::Rgb(30, 30, 46),
        ThemeToken::CardBorder => Color::Rgb(88, 91, 112),
        ThemeToken::CardText => Color::White,
        ThemeToken::CardTextMuted => Color::Gray,
        ThemeToken::ControlFill => Color::Rgb(69, 71, 90),
        ThemeToken::ControlBorder => Color::DarkGray,
        ThemeToken::ControlGlyph => Color::LightBlue,
    }
}

/// Cell-space rectangle as half-open column and row ranges.
#[derive(Debug, Clone, Copy)]
struct CellRect {
    x0: i32,
    x1: i32,
    y0: i32,
    y1: i32,
}

impl CellRect {
    fn from_px(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x0: (x / CELL_W).floor() as i32,
            x1: ((x + w) / CELL_W).ceil() as i32,
            y0: (y / CELL_H).floor() as i32,
            y1: ((y + h) / CELL_H).ceil() as i32,
        }
    }

    fn intersect(self, o: Self) -> Self {
        Self {
            x0: self.x0.max(o.x0),
            x1: self.x1.min(o.x1),
            y0: self.y0.max(o.y0),
            y1: self.y1.min(o.y1),
        }
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}

/// Paint carousel commands into `area`. `strip_x` is the displayed
/// translation of the item strip in px.
fn draw_commands(
    buf: &mut Buffer,
    area: Rect,
    commands: &[RenderCommand],
    strip_x: f64,
    labels: &[String],
) {
    let bounds = CellRect {
        x0: 0,
        x1: i32::from(area.width),
        y0: 0,
        y1: i32::from(area.height),
    };
    let mut clip_stack: Vec<CellRect> = vec![bounds];
    let mut shift_stack: Vec<f64> = vec![0.0];

    let put = |buf: &mut Buffer, clip: CellRect, x: i32, y: i32, ch: char, fg: Color, bg: Color| {
        if !clip.contains(x, y) {
            return;
        }
        // `clip` lies within `bounds`, so both casts are in range.
        let pos = (area.x + x as u16, area.y + y as u16);
        buf[pos].set_char(ch).set_fg(fg).set_bg(bg);
    };

    for cmd in commands {
        let clip = clip_stack.last().copied().unwrap_or(bounds);
        let shift = shift_stack.last().copied().unwrap_or(0.0);

        match cmd {
            RenderCommand::DrawRect { rect, color, .. } => {
                let r = CellRect::from_px(rect.x + shift, rect.y, rect.w, rect.h);
                let bg = theme_to_color(*color);
                for y in r.y0..r.y1 {
                    for x in r.x0..r.x1 {
                        put(buf, clip, x, y, ' ', bg, bg);
                    }
                }
            }
            RenderCommand::PlaceItem { rect, index } => {
                let r = CellRect::from_px(rect.x + shift, rect.y, rect.w, rect.h);
                let border = theme_to_color(ThemeToken::CardBorder);
                let fill = theme_to_color(ThemeToken::CardFill);
                for y in r.y0..r.y1 {
                    for x in r.x0..r.x1 {
                        let ch = match (x == r.x0, x == r.x1 - 1, y == r.y0, y == r.y1 - 1) {
                            (true, _, true, _) => '╭',
                            (_, true, true, _) => '╮',
                            (true, _, _, true) => '╰',
                            (_, true, _, true) => '╯',
                            (_, _, true, _) | (_, _, _, true) => '─',
                            (true, _, _, _) | (_, true, _, _) => '│',
                            _ => ' ',
                        };
                        put(buf, clip, x, y, ch, border, fill);
                    }
                }
                if let Some(label) = labels.get(*index) {
                    let text = theme_to_color(ThemeToken::CardText);
                    let room = (r.x1 - r.x0 - 4).max(0) as usize;
                    for (i, ch) in label.chars().take(room).enumerate() {
                        put(buf, clip, r.x0 + 2 + i as i32, r.y0 + 1, ch, text, fill);
                    }
                    let muted = theme_to_color(ThemeToken::CardTextMuted);
                    let caption = format!("#{}", index + 1);
                    for (i, ch) in caption.chars().take(room).enumerate() {
                        put(buf, clip, r.x0 + 2 + i as i32, r.y1 - 2, ch, muted, fill);
                    }
                }
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                ..
            } => {
                let x = ((position.x + shift) / CELL_W).floor() as i32;
                let y = (position.y / CELL_H).floor() as i32;
                let fg = theme_to_color(*color);
                let bg = theme_to_color(ThemeToken::ControlFill);
                let width = text.chars().count() as i32;
                for (i, ch) in text.chars().enumerate() {
                    put(buf, clip, x - width / 2 + i as i32, y, ch, fg, bg);
                }
            }
            RenderCommand::SetClip { rect } => {
                let r = CellRect::from_px(rect.x + shift, rect.y, rect.w, rect.h);
                clip_stack.push(clip.intersect(r));
            }
            RenderCommand::ClearClip => {
                if clip_stack.len() > 1 {
                    clip_stack.pop();
                }
            }
            RenderCommand::PushTransform { .. } => {
                // The animator's displayed offset stands in for the
                // committed one.
                shift_stack.push(shift + strip_x);
            }
            RenderCommand::PopTransform => {
                if shift_stack.len() > 1 {
                    shift_stack.pop();
                }
            }
            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
        }
    }
}

fn carousel_area(width: u16, height: u16) -> Rect {
    let rows = CAROUSEL_ROWS.min(height.saturating_sub(4));
    Rect::new(0, 2, width, rows)
}

/// Carousel-local px position of the center of a terminal cell.
fn cell_center(mouse: &MouseEvent, area: Rect) -> Point {
    let col = f64::from(mouse.column) - f64::from(area.x);
    let row = f64::from(mouse.row) - f64::from(area.y);
    Point::new(col * CELL_W + CELL_W / 2.0, row * CELL_H + CELL_H / 2.0)
}

/// Presses only start a session inside the carousel; drags and releases
/// are tracked anywhere on screen.
fn pressed_inside(mouse: &MouseEvent, area: Rect) -> bool {
    (area.x..area.x + area.width).contains(&mouse.column)
        && (area.y..area.y + area.height).contains(&mouse.row)
}

fn navigate(carousel: &mut Carousel, target: HitTarget) {
    match target {
        HitTarget::PrevControl => carousel.scroll_left(),
        HitTarget::NextControl => carousel.scroll_right(),
    };
}

pub fn run(mut carousel: Carousel, labels: &[String]) -> Result<()> {
    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;
    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut carousel, labels);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    carousel: &mut Carousel,
    labels: &[String],
) -> Result<()> {
    let mut animator = Animator::new(carousel.offset());
    let mut last_frame = Instant::now();
    // Where the current mouse press landed, for control clicks.
    let mut press: Option<Point> = None;

    loop {
        let size = terminal.size()?;
        let area = carousel_area(size.width, size.height);
        carousel.set_viewport_width(f64::from(area.width) * CELL_W);
        let commands = render_carousel(carousel, f64::from(area.height) * CELL_H);

        let now = Instant::now();
        let dt_ms = now.duration_since(last_frame).as_secs_f64() * 1000.0;
        last_frame = now;
        animator.retarget(carousel.offset(), carousel.transition());
        let displayed = animator.advance(dt_ms);

        terminal.draw(|frame| {
            let full = frame.area();

            let header = Block::default()
                .title(format!(
                    " glide: {} items | drag with mouse | ←→ page | +/- items | q quit ",
                    carousel.item_count()
                ))
                .style(Style::default().fg(Color::White).bg(Color::DarkGray));
            frame.render_widget(header, Rect::new(0, 0, full.width, 1));

            draw_commands(frame.buffer_mut(), area, &commands, displayed, labels);

            let status = format!(
                " {} | offset {:.0} of -{:.0} | {} visible | prev {} | next {}",
                carousel.phase().as_str(),
                carousel.offset(),
                carousel.max_offset(),
                carousel.visible_count(),
                if carousel.show_prev() { "on" } else { "off" },
                if carousel.show_next() { "on" } else { "off" },
            );
            let status_y = (area.y + area.height + 1).min(full.height.saturating_sub(1));
            frame.render_widget(
                Paragraph::new(status).style(Style::default().fg(Color::Gray)),
                Rect::new(0, status_y, full.width, 1),
            );
        })?;

        let timeout = if animator.is_animating() {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(250)
        };
        if !event::poll(timeout)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Left => {
                    carousel.scroll_left();
                }
                KeyCode::Right => {
                    carousel.scroll_right();
                }
                KeyCode::Char('+') | KeyCode::Char('=') => {
                    carousel.set_item_count((carousel.item_count() + 1).min(labels.len()));
                }
                KeyCode::Char('-') => {
                    carousel.set_item_count(carousel.item_count().saturating_sub(1));
                }
                _ => {}
            },
            Event::Mouse(mouse) => {
                let pos = cell_center(&mouse, area);
                let source = PointerSource::Mouse;
                match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        if pressed_inside(&mouse, area) {
                            press = Some(pos);
                            carousel.handle(PointerEvent::Down {
                                position: pos,
                                source,
                            });
                        }
                    }
                    MouseEventKind::Drag(MouseButton::Left) => {
                        carousel.handle(PointerEvent::Move {
                            position: pos,
                            source,
                        });
                    }
                    MouseEventKind::Up(MouseButton::Left) => {
                        let dragged = carousel.phase() == Phase::HorizontalDrag;
                        carousel.handle(PointerEvent::Up { source });
                        if !dragged
                            && let Some(target) = press.take().and_then(|p| hit_test(&commands, p))
                        {
                            navigate(carousel, target);
                        }
                        press = None;
                    }
                    MouseEventKind::ScrollLeft => navigate(carousel, HitTarget::PrevControl),
                    MouseEventKind::ScrollRight => navigate(carousel, HitTarget::NextControl),
                    _ => {}
                }
            }
            Event::FocusLost => carousel.cancel_gesture(),
            // Re-measured at the top of the next iteration.
            Event::Resize(..) => {}
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_core::CarouselConfig;

    fn mounted(items: usize, cols: u16) -> Carousel {
        let config = CarouselConfig::new(240.0, 16.0).unwrap();
        let mut c = Carousel::new(config, items);
        c.set_viewport_width(f64::from(cols) * CELL_W);
        c
    }

    #[test]
    fn cards_land_in_cells_at_stride() {
        let c = mounted(3, 80);
        let area = Rect::new(0, 0, 80, CAROUSEL_ROWS);
        let mut buf = Buffer::empty(area);
        let commands = render_carousel(&c, f64::from(CAROUSEL_ROWS) * CELL_H);
        let labels = vec!["Lisbon".to_string(), "Porto".to_string(), "Faro".to_string()];
        draw_commands(&mut buf, area, &commands, 0.0, &labels);

        // Card 0 starts at column 0, card 1 at 256px = column 32.
        assert_eq!(buf[(0, 0)].symbol(), "╭");
        assert_eq!(buf[(32, 0)].symbol(), "╭");
        assert_eq!(buf[(2, 1)].symbol(), "L");
        assert_eq!(buf[(34, 1)].symbol(), "P");
    }

    #[test]
    fn strip_shift_moves_cards_and_clips() {
        let c = mounted(3, 40);
        let area = Rect::new(0, 0, 40, CAROUSEL_ROWS);
        let mut buf = Buffer::empty(area);
        let commands = render_carousel(&c, f64::from(CAROUSEL_ROWS) * CELL_H);
        draw_commands(&mut buf, area, &commands, -256.0, &[]);
        // Card 1 now sits at column 0.
        assert_eq!(buf[(0, 0)].symbol(), "╭");
    }

    fn mouse_at(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: crossterm::event::KeyModifiers::NONE,
        }
    }

    #[test]
    fn presses_only_count_inside_the_carousel() {
        let area = carousel_area(80, 24);
        let press = MouseEventKind::Down(MouseButton::Left);
        assert!(pressed_inside(&mouse_at(press, 0, 2), area));
        assert!(pressed_inside(&mouse_at(press, 79, 11), area));
        // Header row, status row and below.
        assert!(!pressed_inside(&mouse_at(press, 10, 0), area));
        assert!(!pressed_inside(&mouse_at(press, 10, 12), area));
        assert!(!pressed_inside(&mouse_at(press, 10, 20), area));
    }

    #[test]
    fn drags_outside_the_carousel_still_move_the_strip() {
        let mut c = mounted(10, 80);
        let area = carousel_area(80, 24);
        let down = mouse_at(MouseEventKind::Down(MouseButton::Left), 40, 5);
        assert!(pressed_inside(&down, area));
        c.handle(PointerEvent::Down {
            position: cell_center(&down, area),
            source: PointerSource::Mouse,
        });
        let lock = mouse_at(MouseEventKind::Drag(MouseButton::Left), 30, 5);
        c.handle(PointerEvent::Move {
            position: cell_center(&lock, area),
            source: PointerSource::Mouse,
        });
        assert_eq!(c.phase(), Phase::HorizontalDrag);
        assert_eq!(c.offset(), -80.0);

        // Below the carousel, past the status row.
        let drag = mouse_at(MouseEventKind::Drag(MouseButton::Left), 20, 20);
        assert!(!pressed_inside(&drag, area));
        c.handle(PointerEvent::Move {
            position: cell_center(&drag, area),
            source: PointerSource::Mouse,
        });
        assert_eq!(c.offset(), -160.0);
    }

    #[test]
    fn mouse_cells_map_to_local_px() {
        let area = Rect::new(0, 2, 80, CAROUSEL_ROWS);
        let mouse = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 10,
            row: 3,
            modifiers: crossterm::event::KeyModifiers::NONE,
        };
        assert_eq!(cell_center(&mouse, area), Point::new(84.0, 24.0));
    }
}
