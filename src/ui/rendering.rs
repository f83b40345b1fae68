//! Board rendering for cards, profile lines and status messages.
//!
//! Cards are drawn as rotated polygons with their text laid out in the card's
//! local frame and rotated with it, so the card and its contents turn as one.

use super::state::BoardApp;
use crate::constants::GITHUB_WEB_BASE;
use crate::profile::ProfileEntry;
use crate::types::Card;
use eframe::egui;
use eframe::epaint::TextShape;

/// Inner padding of a card in points.
const CARD_PADDING: f32 = 20.0;
/// Corner rounding is approximated by this many points per corner arc.
const CORNER_SEGMENTS: usize = 4;
/// Corner radius in points.
const CORNER_RADIUS: f32 = 12.0;
/// Side length of the author avatar.
const AVATAR_SIZE: f32 = 40.0;
/// Share of the inner card width covered by the avatar and name link.
const PROFILE_LINK_FRACTION: f32 = 0.6;

/// Primary and secondary profile text for a handle.
///
/// While loading the primary line reads `Loading...`; after a failure only the
/// bare handle is shown.
pub fn profile_lines(entry: Option<&ProfileEntry>, handle: &str) -> (String, Option<String>) {
    match entry {
        None | Some(ProfileEntry::Loading) => ("Loading...".to_string(), None),
        Some(ProfileEntry::Ready(profile)) => {
            (profile.display_name.clone(), Some(profile.stats_line()))
        }
        Some(ProfileEntry::Failed) => (handle.to_string(), None),
    }
}

/// GitHub profile page of `handle`.
pub fn profile_url(handle: &str) -> String {
    format!("{GITHUB_WEB_BASE}/{handle}")
}

fn avatar_url(handle: &str) -> String {
    format!("{GITHUB_WEB_BASE}/{handle}.png")
}

/// Rotates `point` around `center` by `angle` radians.
pub(super) fn rotate_around(point: egui::Pos2, center: egui::Pos2, angle: f32) -> egui::Pos2 {
    let (sin, cos) = angle.sin_cos();
    let d = point - center;
    center + egui::vec2(d.x * cos - d.y * sin, d.x * sin + d.y * cos)
}

/// Outline of a rounded rectangle, clockwise from the top-left arc.
fn rounded_outline(rect: egui::Rect, radius: f32) -> Vec<egui::Pos2> {
    let r = radius.min(rect.width() / 2.0).min(rect.height() / 2.0);
    let corners = [
        (egui::pos2(rect.min.x + r, rect.min.y + r), std::f32::consts::PI),
        (egui::pos2(rect.max.x - r, rect.min.y + r), 1.5 * std::f32::consts::PI),
        (egui::pos2(rect.max.x - r, rect.max.y - r), 0.0),
        (egui::pos2(rect.min.x + r, rect.max.y - r), 0.5 * std::f32::consts::PI),
    ];
    let mut points = Vec::with_capacity(corners.len() * (CORNER_SEGMENTS + 1));
    for (center, start) in corners {
        for step in 0..=CORNER_SEGMENTS {
            let a = start + step as f32 / CORNER_SEGMENTS as f32 * std::f32::consts::FRAC_PI_2;
            points.push(center + egui::vec2(a.cos(), a.sin()) * r);
        }
    }
    points
}

/// Where a card sits on screen: its unrotated rectangle and its tilt.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CardFrame {
    /// Card rectangle before rotation, in window coordinates
    pub body: egui::Rect,
    /// Tilt around the body center, in radians
    pub angle: f32,
}

impl CardFrame {
    /// Avatar and name area before rotation. Clicking it opens the profile.
    pub fn profile_link_area(&self) -> egui::Rect {
        let min = self.body.min
            + egui::vec2(CARD_PADDING, self.body.height() - CARD_PADDING - AVATAR_SIZE);
        let width = (self.body.width() - 2.0 * CARD_PADDING) * PROFILE_LINK_FRACTION;
        egui::Rect::from_min_size(min, egui::vec2(width, AVATAR_SIZE))
    }

    /// Whether the window point `pos` falls on the tilted profile link area.
    pub fn profile_link_contains(&self, pos: egui::Pos2) -> bool {
        let local = rotate_around(pos, self.body.center(), -self.angle);
        self.profile_link_area().contains(local)
    }
}

impl BoardApp {
    /// Screen frame of `card` at the current offset.
    pub(crate) fn card_frame(&self, card: &Card) -> CardFrame {
        let transform = card.transform(self.view.offset());
        let origin = self.board_origin + egui::vec2(transform.screen_x as f32, transform.screen_y as f32);
        CardFrame {
            body: egui::Rect::from_min_size(origin, egui::vec2(card.width as f32, card.height as f32)),
            angle: card.rotation as f32,
        }
    }

    /// Profile page linked from the card under `pos`, if `pos` is on an
    /// avatar or name.
    pub fn profile_link_at(&self, pos: egui::Pos2) -> Option<String> {
        let camera = self.view.camera();
        // Later cards are painted on top.
        self.view
            .cards()
            .iter()
            .rev()
            .filter(|card| camera.overlaps_viewport(card))
            .find(|card| self.card_frame(card).profile_link_contains(pos))
            .map(|card| profile_url(&card.record.author))
    }

    /// Paints the background, every on-screen card and any status message.
    ///
    /// # Arguments
    ///
    /// * `ui` - The board's UI, used to paint avatar images
    /// * `painter` - The egui painter for drawing operations
    /// * `rect` - The screen-space rectangle of the board area
    pub fn render_board(&self, ui: &egui::Ui, painter: &egui::Painter, rect: egui::Rect) {
        let visuals = painter.ctx().style().visuals.clone();
        painter.rect_filled(rect, 0.0, visuals.extreme_bg_color);

        if let Some(message) = self.status_message() {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                message,
                egui::FontId::proportional(20.0),
                visuals.weak_text_color(),
            );
            return;
        }

        let painter = painter.with_clip_rect(rect);
        let camera = self.view.camera();
        for card in self.view.cards() {
            if camera.overlaps_viewport(card) {
                self.draw_card(ui, &painter, &visuals, card);
            }
        }
    }

    /// Draws a single card at its projected position.
    fn draw_card(&self, ui: &egui::Ui, painter: &egui::Painter, visuals: &egui::Visuals, card: &Card) {
        let frame = self.card_frame(card);
        let body = frame.body;
        let origin = body.min;
        let size = body.size();
        let center = body.center();
        let angle = frame.angle;

        let outline: Vec<egui::Pos2> = rounded_outline(body, CORNER_RADIUS)
            .into_iter()
            .map(|p| rotate_around(p, center, angle))
            .collect();
        painter.add(egui::Shape::convex_polygon(
            outline,
            visuals.window_fill,
            egui::Stroke::new(1.0, visuals.window_stroke.color),
        ));

        let text_color = visuals.text_color();
        let weak_color = visuals.weak_text_color();
        let link_color = visuals.hyperlink_color;
        let wrap_width = size.x - 2.0 * CARD_PADDING;
        let put = |local: egui::Vec2, galley: std::sync::Arc<egui::Galley>, color: egui::Color32| {
            let pos = rotate_around(origin + local, center, angle);
            painter.add(TextShape::new(pos, galley, color).with_angle(angle));
        };

        let record = &card.record;
        let quote = painter.layout(
            format!("\u{201c}{}\u{201d}", record.text),
            egui::FontId::proportional(18.0),
            text_color,
            wrap_width,
        );
        let quote_height = quote.size().y;
        put(egui::vec2(CARD_PADDING, CARD_PADDING), quote, text_color);

        let author = painter.layout_no_wrap(
            format!("— @{}", record.author),
            egui::FontId::proportional(15.0),
            weak_color,
        );
        put(
            egui::vec2(CARD_PADDING, CARD_PADDING + quote_height + 12.0),
            author,
            weak_color,
        );

        let link = frame.profile_link_area();
        let avatar_center = rotate_around(
            link.min + egui::vec2(AVATAR_SIZE / 2.0, AVATAR_SIZE / 2.0),
            center,
            angle,
        );
        painter.circle_filled(avatar_center, AVATAR_SIZE / 2.0, visuals.faint_bg_color);
        if self.avatars {
            egui::Image::from_uri(avatar_url(&record.author))
                .rotate(angle, egui::Vec2::splat(0.5))
                .paint_at(
                    ui,
                    egui::Rect::from_center_size(avatar_center, egui::Vec2::splat(AVATAR_SIZE)),
                );
        }

        let (name, stats) = profile_lines(self.profiles.get(&record.author), &record.author);
        let footer_y = link.min.y - origin.y;
        let text_x = CARD_PADDING + AVATAR_SIZE + 10.0;
        let name = painter.layout_no_wrap(name, egui::FontId::proportional(15.0), link_color);
        put(egui::vec2(text_x, footer_y + 2.0), name, link_color);
        if let Some(stats) = stats {
            let stats = painter.layout(
                stats,
                egui::FontId::proportional(12.0),
                weak_color,
                size.x - CARD_PADDING - text_x,
            );
            put(egui::vec2(text_x, footer_y + 22.0), stats, weak_color);
        }

        if let Some(date) = &record.date {
            let date = painter.layout_no_wrap(date.clone(), egui::FontId::proportional(12.0), weak_color);
            let x = size.x - CARD_PADDING - date.size().x;
            put(egui::vec2(x, footer_y + 2.0), date, weak_color);
        }
    }
}
