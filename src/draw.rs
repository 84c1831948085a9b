use tiny_skia::{
    Color, FillRule, LineCap, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, Transform,
};

/// Solid anti-aliased paint.
pub fn solid(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.anti_alias = true;
    paint.set_color(color);
    paint
}

pub fn polyline(points: &[(f32, f32)]) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut builder = PathBuilder::new();
    builder.move_to(first.0, first.1);
    for (x, y) in rest {
        builder.line_to(*x, *y);
    }
    builder.finish()
}

pub fn polygon(points: &[(f32, f32)]) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut builder = PathBuilder::new();
    builder.move_to(first.0, first.1);
    for (x, y) in rest {
        builder.line_to(*x, *y);
    }
    builder.close();
    builder.finish()
}

pub fn fill(pixmap: &mut Pixmap, path: &Path, color: Color) {
    pixmap.fill_path(
        path,
        &solid(color),
        FillRule::Winding,
        Transform::identity(),
        None,
    );
}

pub fn stroke(pixmap: &mut Pixmap, path: &Path, color: Color, width: f32) {
    let stroke = Stroke {
        width,
        line_cap: LineCap::Round,
        ..Stroke::default()
    };
    pixmap.stroke_path(path, &solid(color), &stroke, Transform::identity(), None);
}

pub fn fill_rect(pixmap: &mut Pixmap, x: f32, y: f32, w: f32, h: f32, color: Color) {
    // Rects thinner than 2px with fractional edges take tiny-skia's hairline
    // scan path, which rejects a zero inner width in debug builds. Snap them
    // to the pixel grid.
    let (x, y, w, h) = if w > 0.0 && h > 0.0 && (w < 2.0 || h < 2.0) {
        (x.floor(), y.floor(), w.round().max(1.0), h.round().max(1.0))
    } else {
        (x, y, w, h)
    };
    if let Some(rect) = Rect::from_xywh(x, y, w, h) {
        pixmap.fill_rect(rect, &solid(color), Transform::identity(), None);
    }
}

pub fn stroke_rect(pixmap: &mut Pixmap, x: f32, y: f32, w: f32, h: f32, color: Color, width: f32) {
    if let Some(rect) = Rect::from_xywh(x, y, w, h) {
        let mut builder = PathBuilder::new();
        builder.push_rect(rect);
        if let Some(path) = builder.finish() {
            stroke(pixmap, &path, color, width);
        }
    }
}

pub fn fill_circle(pixmap: &mut Pixmap, cx: f32, cy: f32, radius: f32, color: Color) {
    if let Some(path) = circle(cx, cy, radius) {
        fill(pixmap, &path, color);
    }
}

pub fn stroke_circle(pixmap: &mut Pixmap, cx: f32, cy: f32, radius: f32, color: Color, width: f32) {
    if let Some(path) = circle(cx, cy, radius) {
        stroke(pixmap, &path, color, width);
    }
}

pub fn line(pixmap: &mut Pixmap, x1: f32, y1: f32, x2: f32, y2: f32, color: Color, width: f32) {
    if let Some(path) = polyline(&[(x1, y1), (x2, y2)]) {
        stroke(pixmap, &path, color, width);
    }
}

fn circle(cx: f32, cy: f32, radius: f32) -> Option<Path> {
    if radius <= 0.0 {
        return None;
    }
    let mut builder = PathBuilder::new();
    builder.push_circle(cx, cy, radius);
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polyline_needs_at_least_one_point() {
        assert!(polyline(&[]).is_none());
        assert!(polyline(&[(0.0, 0.0), (5.0, 5.0)]).is_some());
    }

    #[test]
    fn fill_rect_marks_pixels() {
        let mut pixmap = Pixmap::new(20, 20).unwrap();
        fill_rect(&mut pixmap, 5.0, 5.0, 10.0, 10.0, Color::WHITE);
        assert!(pixmap.pixel(10, 10).unwrap().red() > 0);
        assert_eq!(pixmap.pixel(1, 1).unwrap().red(), 0);
    }

    #[test]
    fn hairline_rects_at_fractional_positions_are_safe() {
        // Sub-pixel bar slots on a tiny canvas, both edges fractional.
        let mut pixmap = Pixmap::new(8, 8).unwrap();
        let slot = 8.0 / 60.0;
        for i in 0..60 {
            fill_rect(&mut pixmap, i as f32 * slot, 3.3, 1.0, 1.7, Color::WHITE);
        }
        assert!(pixmap.data().iter().any(|byte| *byte != 0));
    }

    #[test]
    fn degenerate_shapes_are_ignored() {
        let mut pixmap = Pixmap::new(10, 10).unwrap();
        fill_rect(&mut pixmap, 0.0, 0.0, -5.0, 3.0, Color::WHITE);
        fill_circle(&mut pixmap, 5.0, 5.0, 0.0, Color::WHITE);
        assert!(pixmap.data().iter().all(|byte| *byte == 0));
    }
}
