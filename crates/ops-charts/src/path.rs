//! SVG path construction: lines, closed areas, arcs and polygons.

use std::fmt::Write;

// ============================================================================
// PATH BUILDER (fluent API)
// ============================================================================

/// SVG path builder with fluent API
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    commands: String,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            commands: String::with_capacity(256),
        }
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        write!(self.commands, "M{:.2},{:.2}", x, y).unwrap();
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        write!(self.commands, "L{:.2},{:.2}", x, y).unwrap();
        self
    }

    pub fn arc_to(mut self, radius: f64, large_arc: bool, sweep: bool, x: f64, y: f64) -> Self {
        write!(
            self.commands,
            "A{:.2},{:.2},0,{},{},{:.2},{:.2}",
            radius, radius, large_arc as u8, sweep as u8, x, y
        )
        .unwrap();
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push('Z');
        self
    }

    pub fn build(self) -> String {
        self.commands
    }
}

// ============================================================================
// LINES AND AREAS
// ============================================================================

/// Open polyline through `points` in order
pub fn line_path(points: &[(f64, f64)]) -> String {
    let Some((&(x0, y0), rest)) = points.split_first() else {
        return String::new();
    };

    rest.iter()
        .fold(PathBuilder::new().move_to(x0, y0), |b, &(x, y)| b.line_to(x, y))
        .build()
}

/// Closed area: walks `top` left to right, then `base` right to left.
/// `base` is either a flat baseline or the top edge of the layer below.
pub fn area_path(top: &[(f64, f64)], base: &[(f64, f64)]) -> String {
    let Some((&(x0, y0), rest)) = top.split_first() else {
        return String::new();
    };

    let builder = rest
        .iter()
        .fold(PathBuilder::new().move_to(x0, y0), |b, &(x, y)| b.line_to(x, y));

    base.iter()
        .rev()
        .fold(builder, |b, &(x, y)| b.line_to(x, y))
        .close()
        .build()
}

/// Flat base under `top` at height `baseline_y`
pub fn baseline_points(top: &[(f64, f64)], baseline_y: f64) -> Vec<(f64, f64)> {
    top.iter().map(|&(x, _)| (x, baseline_y)).collect()
}

/// Closed polygon through `points`
pub fn polygon_path(points: &[(f64, f64)]) -> String {
    if points.is_empty() {
        return String::new();
    }
    let mut path = line_path(points);
    path.push('Z');
    path
}

// ============================================================================
// ARCS
// ============================================================================

/// Point on a circle at `angle_deg`, measured clockwise from +x in screen space
pub fn polar_point(cx: f64, cy: f64, radius: f64, angle_deg: f64) -> (f64, f64) {
    let rad = angle_deg.to_radians();
    (cx + radius * rad.cos(), cy + radius * rad.sin())
}

/// SVG large-arc flag: set only when the swept angle exceeds 180 degrees
pub fn large_arc_flag(start_deg: f64, end_deg: f64) -> bool {
    (end_deg - start_deg).abs() > 180.0
}

/// Clockwise circular arc from `start_deg` to `end_deg`
pub fn arc_path(cx: f64, cy: f64, radius: f64, start_deg: f64, end_deg: f64) -> String {
    let (sx, sy) = polar_point(cx, cy, radius, start_deg);
    let (ex, ey) = polar_point(cx, cy, radius, end_deg);

    PathBuilder::new()
        .move_to(sx, sy)
        .arc_to(radius, large_arc_flag(start_deg, end_deg), true, ex, ey)
        .build()
}
