use eframe::egui;
use glide_core::render::{hit_test, render_carousel};
use glide_core::{Animator, Carousel, CarouselConfig, Phase, PointerEvent, PointerSource};
use glide_protocol::{HitTarget, Point, ThemeToken};

use crate::renderer;
use crate::theme::{self, ThemeMode};

const ROW_HEIGHT: f32 = 190.0;
const MAX_TOURS: usize = 12;

/// Demo card content. The carousel itself only ever sees the card count.
struct Card {
    title: String,
    subtitle: String,
}

impl Card {
    fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }
}

/// One titled carousel row on the page.
struct CarouselRow {
    title: &'static str,
    cards: Vec<Card>,
    /// How many of `cards` the caller currently hands to the carousel.
    shown: usize,
    carousel: Carousel,
    animator: Animator,
}

impl CarouselRow {
    fn new(
        title: &'static str,
        item_width: f64,
        cards: Vec<Card>,
    ) -> Result<Self, glide_core::ConfigError> {
        let config = CarouselConfig::new(item_width, 16.0)?;
        let shown = cards.len();
        Ok(Self {
            title,
            cards,
            shown,
            carousel: Carousel::new(config, shown),
            animator: Animator::new(0.0),
        })
    }

    fn set_shown(&mut self, shown: usize) {
        self.shown = shown.min(self.cards.len());
        self.carousel.set_item_count(self.shown);
    }
}

/// What a row reports back to the page after a frame.
#[derive(Default)]
struct RowFrame {
    suppress_page_scroll: bool,
    hovered: bool,
}

/// Main application state.
pub struct GlideApp {
    rows: Vec<CarouselRow>,
    theme_mode: ThemeMode,
    /// Tours slider value; drives the item count of the tours row.
    tour_count: usize,
    /// Latched from the previous frame: a carousel owns the current drag,
    /// so the page must not scroll with it.
    suppress_page_scroll: bool,
    /// Row under the pointer, for the status bar and keyboard paging.
    hovered_row: Option<usize>,
}

impl GlideApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let theme_mode = ThemeMode::Dark;
        cc.egui_ctx.set_visuals(theme_mode.visuals());

        #[cfg(target_arch = "wasm32")]
        web_sys::console::log_1(&"glide: demo started".into());

        Self {
            rows: demo_rows(),
            theme_mode,
            tour_count: MAX_TOURS,
            suppress_page_scroll: false,
            hovered_row: None,
        }
    }

    fn show_row(
        ui: &mut egui::Ui,
        row: &mut CarouselRow,
        mode: ThemeMode,
        events: &[egui::Event],
        dt_ms: f64,
    ) -> RowFrame {
        ui.label(
            egui::RichText::new(row.title)
                .size(theme::FONT_TITLE)
                .strong(),
        );

        let size = egui::vec2(ui.available_width(), ROW_HEIGHT);
        let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
        row.carousel.set_viewport_width(f64::from(rect.width()));

        for event in events {
            if let Some(pointer) = pointer_event(event, rect) {
                row.carousel.handle(pointer);
            } else if matches!(event, egui::Event::WindowFocused(false)) {
                row.carousel.cancel_gesture();
            }
        }

        let commands = render_carousel(&row.carousel, f64::from(ROW_HEIGHT));

        // Controls: clicks land after the gesture that produced them ended.
        if response.clicked()
            && let Some(pos) = response.interact_pointer_pos()
        {
            match hit_test(&commands, local(pos, rect)) {
                Some(HitTarget::PrevControl) => {
                    row.carousel.scroll_left();
                }
                Some(HitTarget::NextControl) => {
                    row.carousel.scroll_right();
                }
                None => {}
            }
        }

        if response.hovered() {
            ui.input(|i| {
                if i.key_pressed(egui::Key::ArrowLeft) {
                    row.carousel.scroll_left();
                }
                if i.key_pressed(egui::Key::ArrowRight) {
                    row.carousel.scroll_right();
                }
            });
        }

        // Navigation above may have moved the offset; lay out again.
        let commands = render_carousel(&row.carousel, f64::from(ROW_HEIGHT));

        row.animator
            .retarget(row.carousel.offset(), row.carousel.transition());
        let displayed = row.animator.advance(dt_ms);
        if row.animator.is_animating() {
            ui.ctx().request_repaint();
        }

        let dragging = row.carousel.phase() == Phase::HorizontalDrag;
        if dragging {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
        } else if let Some(pos) = response.hover_pos() {
            let icon = if hit_test(&commands, local(pos, rect)).is_some() {
                egui::CursorIcon::PointingHand
            } else {
                egui::CursorIcon::Grab
            };
            ui.ctx().set_cursor_icon(icon);
        }

        let cards = &row.cards[..row.shown];
        let mut painter = ui.painter_at(rect);
        renderer::render_commands(
            &mut painter,
            &commands,
            rect.min,
            Some(displayed),
            mode,
            &mut |painter: &egui::Painter, card_rect: egui::Rect, index: usize| {
                if let Some(card) = cards.get(index) {
                    paint_card(painter, card_rect, card, mode);
                }
            },
        );

        ui.add_space(12.0);

        RowFrame {
            suppress_page_scroll: row.carousel.gesture().suppresses_native_scroll(),
            hovered: response.hovered() || dragging,
        }
    }
}

impl eframe::App for GlideApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("glide");
                ui.separator();

                let tours = ui.add(
                    egui::Slider::new(&mut self.tour_count, 0..=MAX_TOURS).text("tours shown"),
                );
                if tours.changed()
                    && let Some(row) = self.rows.iter_mut().find(|r| r.title == "Tours")
                {
                    row.set_shown(self.tour_count);
                }

                ui.separator();

                let theme_label = match self.theme_mode {
                    ThemeMode::Dark => "🌙 Dark",
                    ThemeMode::Light => "☀ Light",
                };
                if ui.button(theme_label).clicked() {
                    self.theme_mode = self.theme_mode.toggled();
                    ctx.set_visuals(self.theme_mode.visuals());
                }
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| match self.hovered_row.and_then(|i| self.rows.get(i)) {
                Some(row) => {
                    let c = &row.carousel;
                    ui.label(format!(
                        "{} | {:?} | offset {:.0} / -{:.0} | {} items, {} visible",
                        row.title,
                        c.phase(),
                        c.offset(),
                        c.max_offset(),
                        c.item_count(),
                        c.visible_count(),
                    ));
                }
                None => {
                    ui.label("Drag or swipe a row sideways · ←/→ page the hovered row");
                }
            });
        });

        let events = ctx.input(|i| i.events.clone());
        let dt_ms = f64::from(ctx.input(|i| i.stable_dt)) * 1000.0;
        let mode = self.theme_mode;

        egui::CentralPanel::default().show(ctx, |ui| {
            let mut suppress = false;
            let mut hovered = None;

            egui::ScrollArea::vertical()
                .drag_to_scroll(!self.suppress_page_scroll)
                .show(ui, |ui| {
                    for (i, row) in self.rows.iter_mut().enumerate() {
                        let frame = Self::show_row(ui, row, mode, &events, dt_ms);
                        suppress |= frame.suppress_page_scroll;
                        if frame.hovered {
                            hovered = Some(i);
                        }
                    }
                });

            self.suppress_page_scroll = suppress;
            self.hovered_row = hovered;
        });
    }
}

/// Map an egui input event to a carousel pointer event in row-local
/// coordinates. Presses only count inside the row; moves and releases are
/// global.
fn pointer_event(event: &egui::Event, rect: egui::Rect) -> Option<PointerEvent> {
    match event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            ..
        } => {
            if *pressed {
                rect.contains(*pos).then(|| PointerEvent::Down {
                    position: local(*pos, rect),
                    source: PointerSource::Mouse,
                })
            } else {
                Some(PointerEvent::Up {
                    source: PointerSource::Mouse,
                })
            }
        }
        egui::Event::PointerMoved(pos) => Some(PointerEvent::Move {
            position: local(*pos, rect),
            source: PointerSource::Mouse,
        }),
        egui::Event::Touch { phase, pos, .. } => {
            let source = PointerSource::Touch;
            match phase {
                egui::TouchPhase::Start => rect.contains(*pos).then(|| PointerEvent::Down {
                    position: local(*pos, rect),
                    source,
                }),
                egui::TouchPhase::Move => Some(PointerEvent::Move {
                    position: local(*pos, rect),
                    source,
                }),
                egui::TouchPhase::End => Some(PointerEvent::Up { source }),
                egui::TouchPhase::Cancel => Some(PointerEvent::Cancel { source }),
            }
        }
        _ => None,
    }
}

fn local(pos: egui::Pos2, rect: egui::Rect) -> Point {
    Point::new(
        f64::from(pos.x - rect.min.x),
        f64::from(pos.y - rect.min.y),
    )
}

fn paint_card(painter: &egui::Painter, rect: egui::Rect, card: &Card, mode: ThemeMode) {
    let radius = egui::CornerRadius::same(10);
    painter.rect_filled(rect, radius, theme::resolve(ThemeToken::CardFill, mode));
    painter.rect_stroke(
        rect,
        radius,
        egui::Stroke::new(1.0, theme::resolve(ThemeToken::CardBorder, mode)),
        egui::StrokeKind::Inside,
    );

    // Image placeholder band across the top of the card
    let band = egui::Rect::from_min_size(rect.min, egui::vec2(rect.width(), rect.height() * 0.55));
    painter.rect_filled(
        band.shrink(6.0),
        egui::CornerRadius::same(6),
        theme::resolve(ThemeToken::Surface, mode),
    );

    let text_left = rect.left() + 14.0;
    painter.text(
        egui::pos2(text_left, band.bottom() + 18.0),
        egui::Align2::LEFT_CENTER,
        &card.title,
        egui::FontId::proportional(theme::FONT_EMPHASIS),
        theme::resolve(ThemeToken::CardText, mode),
    );
    painter.text(
        egui::pos2(text_left, band.bottom() + 40.0),
        egui::Align2::LEFT_CENTER,
        &card.subtitle,
        egui::FontId::proportional(theme::FONT_BODY),
        theme::resolve(ThemeToken::CardTextMuted, mode),
    );
}

fn demo_rows() -> Vec<CarouselRow> {
    let categories = [
        ("Beaches", "Coastal escapes"),
        ("Mountains", "Alpine hikes and lodges"),
        ("Cities", "Culture and food"),
        ("Deserts", "Dunes and starry nights"),
        ("Islands", "Ferries and lagoons"),
        ("Safaris", "Wildlife drives"),
        ("Rivers", "Cruises and canoes"),
    ]
    .into_iter()
    .map(|(t, s)| Card::new(t, s))
    .collect();

    let packages = (1..=8)
        .map(|n| {
            Card::new(
                format!("Package {n}"),
                format!("{} nights · from €{}", 2 + n % 5, 390 + n * 85),
            )
        })
        .collect();

    let tours = (1..=MAX_TOURS)
        .map(|n| Card::new(format!("Tour {n}"), format!("Day trip · {} h", 3 + n % 6)))
        .collect();

    let features = [
        ("Local guides", "Hosted by people who live there"),
        ("Flexible dates", "Free changes up to 14 days out"),
        ("Small groups", "Never more than 12 travellers"),
        ("Support", "Reachable around the clock"),
    ]
    .into_iter()
    .map(|(t, s)| Card::new(t, s))
    .collect();

    [
        CarouselRow::new("Categories", 220.0, categories),
        CarouselRow::new("Packages", 300.0, packages),
        CarouselRow::new("Tours", 260.0, tours),
        CarouselRow::new("Features", 340.0, features),
    ]
    .into_iter()
    .filter_map(|row| match row {
        Ok(row) => Some(row),
        Err(e) => {
            tracing::warn!("skipping carousel row: {e}");
            None
        }
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(100.0, 50.0), egui::vec2(400.0, 190.0))
    }

    fn button(x: f32, y: f32, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos: egui::pos2(x, y),
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }
    }

    fn touch(phase: egui::TouchPhase, x: f32, y: f32) -> egui::Event {
        egui::Event::Touch {
            device_id: egui::TouchDeviceId(0),
            id: egui::TouchId(0),
            phase,
            pos: egui::pos2(x, y),
            force: None,
        }
    }

    #[test]
    fn presses_only_count_inside_the_row() {
        let rect = row_rect();
        assert_eq!(pointer_event(&button(20.0, 60.0, true), rect), None);
        assert_eq!(
            pointer_event(&button(150.0, 70.0, true), rect),
            Some(PointerEvent::Down {
                position: Point::new(50.0, 20.0),
                source: PointerSource::Mouse,
            })
        );
        assert_eq!(pointer_event(&touch(egui::TouchPhase::Start, 600.0, 60.0), rect), None);
    }

    #[test]
    fn moves_and_releases_are_global() {
        let rect = row_rect();
        assert_eq!(
            pointer_event(&egui::Event::PointerMoved(egui::pos2(-300.0, 900.0)), rect),
            Some(PointerEvent::Move {
                position: Point::new(-400.0, 850.0),
                source: PointerSource::Mouse,
            })
        );
        assert_eq!(
            pointer_event(&button(900.0, 900.0, false), rect),
            Some(PointerEvent::Up {
                source: PointerSource::Mouse,
            })
        );
        assert_eq!(
            pointer_event(&touch(egui::TouchPhase::End, -5.0, -5.0), rect),
            Some(PointerEvent::Up {
                source: PointerSource::Touch,
            })
        );
    }

    #[test]
    fn touch_cancel_maps_to_cancel() {
        assert_eq!(
            pointer_event(&touch(egui::TouchPhase::Cancel, 0.0, 0.0), row_rect()),
            Some(PointerEvent::Cancel {
                source: PointerSource::Touch,
            })
        );
    }

    #[test]
    fn secondary_button_is_ignored() {
        let event = egui::Event::PointerButton {
            pos: egui::pos2(150.0, 70.0),
            button: egui::PointerButton::Secondary,
            pressed: true,
            modifiers: egui::Modifiers::NONE,
        };
        assert_eq!(pointer_event(&event, row_rect()), None);
    }
}
