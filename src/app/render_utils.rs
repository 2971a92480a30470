use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

pub(super) fn draw_background(painter: &Painter, rect: Rect, pan: Vec2, zoom: f32) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    let step = (56.0 * zoom.clamp(0.6, 1.8)).max(20.0);
    let origin = rect.center() + pan;

    let mut x = origin.x.rem_euclid(step);
    while x < rect.right() {
        painter.line_segment(
            [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())],
            Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70)),
        );
        x += step;
    }

    let mut y = origin.y.rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment(
            [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
            Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70)),
        );
        y += step;
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Vec2) -> Pos2 {
    rect.center() + pan + world * zoom
}

pub(super) fn screen_to_world(rect: Rect, pan: Vec2, zoom: f32, screen: Pos2) -> Vec2 {
    (screen - rect.center() - pan) / zoom
}

pub(super) const GENESIS_COLOR: Color32 = Color32::from_rgb(34, 197, 94);
pub(super) const TIP_COLOR: Color32 = Color32::from_rgb(59, 130, 246);
pub(super) const CRITICAL_COLOR: Color32 = Color32::from_rgb(245, 158, 11);
pub(super) const FROM_CRITICAL_EDGE_COLOR: Color32 = Color32::from_rgb(139, 92, 246);

/// Five-band gradient for non-critical beads, normalized against the
/// braid's work range: red for the lowest work up to indigo for the
/// highest.
pub(super) fn work_color(work: f64, min: f64, max: f64) -> Color32 {
    let normalized = if max == min {
        0.5
    } else {
        ((work - min) / (max - min)).clamp(0.0, 1.0)
    };

    if normalized < 0.2 {
        Color32::from_rgb(220, 38, 38)
    } else if normalized < 0.4 {
        Color32::from_rgb(234, 88, 12)
    } else if normalized < 0.6 {
        Color32::from_rgb(202, 138, 4)
    } else if normalized < 0.8 {
        Color32::from_rgb(22, 163, 74)
    } else {
        Color32::from_rgb(79, 70, 229)
    }
}

/// Edge color keyed on the parent bead's cohort, cycling a five-color
/// palette; gray for beads without a cohort.
pub(super) fn cohort_edge_color(cohort: Option<usize>) -> Color32 {
    match cohort.map(|index| index % 5) {
        Some(0) => Color32::from_rgb(239, 68, 68),
        Some(1) => Color32::from_rgb(249, 115, 22),
        Some(2) => Color32::from_rgb(234, 179, 8),
        Some(3) => Color32::from_rgb(34, 197, 94),
        Some(4) => Color32::from_rgb(59, 130, 246),
        _ => Color32::from_rgb(107, 114, 128),
    }
}
