//! Scanline coverage for arcs.
//!
//! The controller has no arc command, so a ring segment is broken into vertical runs
//! that the line engine can draw. Angles are degrees, zero on the positive x axis and
//! growing clockwise on screen (y points down).

/// A vertical run of `len` pixels starting at (`x`, `y`), relative to the arc center.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Span {
    pub x: i16,
    pub y: i16,
    pub len: i16,
}

/// Bring an angle into [0, 360]. 360 stays 360 so a sweep can end on the full turn.
pub(crate) fn normalize_degrees(mut angle: f32) -> f32 {
    while angle < 0.0 {
        angle += 360.0;
    }
    while angle > 360.0 {
        angle -= 360.0;
    }
    angle
}

/// Unit vector at `degrees`, snapped so multiples of 90 are exact.
fn unit(degrees: f32) -> (f32, f32) {
    let radians = degrees * core::f32::consts::PI / 180.0;
    let snap = |v: f32| if libm::fabsf(v) < 1e-6 { 0.0 } else { v };
    (snap(libm::cosf(radians)), snap(libm::sinf(radians)))
}

/// Whether `angle` lies in the closed sweep `start..=end`.
fn sweep_contains(start: f32, end: f32, angle: f32) -> bool {
    (start <= angle && angle <= end) || (angle == 0.0 && end >= 360.0)
}

/// Vertical runs covering the ring between `radius - thickness` and `radius` inside the
/// sweep from `start` to `end`. Requires `0 <= start <= end <= 360`.
pub(crate) struct ArcSpans {
    start: (f32, f32),
    end: (f32, f32),
    full: bool,
    reflex: bool,
    inner2: i32,
    outer2: i32,
    x: i16,
    y: i16,
    x_max: i16,
    y_min: i16,
    y_max: i16,
}

impl ArcSpans {
    pub fn new(radius: u16, thickness: u16, start: f32, end: f32) -> Self {
        let radius = radius.min(i16::MAX as u16) as i16;
        let inner = (radius - thickness.min(radius as u16) as i16).max(0);
        let sweep = end - start;
        let full = sweep >= 360.0;
        let (s, e) = (unit(start), unit(end));

        let mut x_min = f32::MAX;
        let mut x_max = f32::MIN;
        let mut y_min = f32::MAX;
        let mut y_max = f32::MIN;
        for r in [f32::from(radius), f32::from(inner)] {
            for (c, sn) in [s, e] {
                x_min = x_min.min(r * c);
                x_max = x_max.max(r * c);
                y_min = y_min.min(r * sn);
                y_max = y_max.max(r * sn);
            }
        }
        let r = f32::from(radius);
        if full || sweep_contains(start, end, 0.0) {
            x_max = r;
        }
        if full || sweep_contains(start, end, 90.0) {
            y_max = r;
        }
        if full || sweep_contains(start, end, 180.0) {
            x_min = -r;
        }
        if full || sweep_contains(start, end, 270.0) {
            y_min = -r;
        }
        let clamp = |v: f32| (v as i16).clamp(-radius, radius);
        let x_min = clamp(libm::floorf(x_min));
        let y_min = clamp(libm::floorf(y_min));

        ArcSpans {
            start: s,
            end: e,
            full,
            reflex: sweep > 180.0,
            inner2: i32::from(inner) * i32::from(inner),
            outer2: i32::from(radius) * i32::from(radius),
            x: x_min,
            y: y_min,
            x_max: clamp(libm::ceilf(x_max)),
            y_min,
            y_max: clamp(libm::ceilf(y_max)),
        }
    }

    fn covers(&self, x: i16, y: i16) -> bool {
        let (x, y) = (i32::from(x), i32::from(y));
        let d2 = x * x + y * y;
        if d2 >= self.outer2 || d2 < self.inner2 {
            return false;
        }
        if self.full {
            return true;
        }
        let (px, py) = (x as f32, y as f32);
        let after_start = self.start.0 * py - self.start.1 * px >= 0.0;
        let before_end = px * self.end.1 - py * self.end.0 >= 0.0;
        if self.reflex {
            after_start || before_end
        } else {
            after_start && before_end
        }
    }
}

impl Iterator for ArcSpans {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        while self.x <= self.x_max {
            while self.y <= self.y_max {
                if self.covers(self.x, self.y) {
                    let top = self.y;
                    while self.y <= self.y_max && self.covers(self.x, self.y) {
                        self.y += 1;
                    }
                    return Some(Span {
                        x: self.x,
                        y: top,
                        len: self.y - top,
                    });
                }
                self.y += 1;
            }
            self.x += 1;
            self.y = self.y_min;
        }
        None
    }
}

/// Split a sweep that wraps past 360 into the pieces [`ArcSpans`] accepts.
pub(crate) fn split_sweep(start: f32, end: f32) -> [Option<(f32, f32)>; 2] {
    let (start, end) = (normalize_degrees(start), normalize_degrees(end));
    if start > end {
        [Some((start, 360.0)), Some((0.0, end))]
    } else {
        [Some((start, end)), None]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::vec::Vec;

    fn pixels(radius: u16, thickness: u16, start: f32, end: f32) -> HashSet<(i16, i16)> {
        let mut set = HashSet::new();
        for piece in split_sweep(start, end).into_iter().flatten() {
            for span in ArcSpans::new(radius, thickness, piece.0, piece.1) {
                assert!(span.len > 0);
                for dy in 0..span.len {
                    set.insert((span.x, span.y + dy));
                }
            }
        }
        set
    }

    fn annulus(radius: i16, thickness: i16) -> HashSet<(i16, i16)> {
        let (outer, inner) = (i32::from(radius).pow(2), i32::from(radius - thickness).pow(2));
        let mut set = HashSet::new();
        for x in -radius..=radius {
            for y in -radius..=radius {
                let d = i32::from(x).pow(2) + i32::from(y).pow(2);
                if d < outer && d >= inner {
                    set.insert((x, y));
                }
            }
        }
        set
    }

    #[test]
    fn full_sweep_is_the_whole_ring() {
        assert_eq!(pixels(20, 5, 0.0, 360.0), annulus(20, 5));
    }

    #[test]
    fn quadrants_cover_the_full_ring() {
        let mut union = HashSet::new();
        for q in 0..4 {
            let start = q as f32 * 90.0;
            union.extend(pixels(30, 8, start, start + 90.0));
        }
        assert_eq!(union, pixels(30, 8, 0.0, 360.0));
    }

    #[test]
    fn wrapping_sweep_matches_its_two_halves() {
        let mut halves = pixels(25, 6, 300.0, 360.0);
        halves.extend(pixels(25, 6, 0.0, 60.0));
        assert_eq!(pixels(25, 6, 300.0, 60.0), halves);
    }

    #[test]
    fn quarter_stays_in_its_quadrant() {
        for (x, y) in pixels(15, 4, 0.0, 90.0) {
            assert!(x >= 0 && y >= 0, "({x}, {y}) outside first quadrant");
        }
        for (x, y) in pixels(15, 4, 180.0, 270.0) {
            assert!(x <= 0 && y <= 0, "({x}, {y}) outside third quadrant");
        }
    }

    #[test]
    fn reflex_sweep_excludes_only_the_gap() {
        let arc = pixels(20, 20, 45.0, 315.0);
        assert!(!arc.contains(&(10, 0)));
        assert!(arc.contains(&(-10, 0)));
        assert!(arc.contains(&(0, 10)));
        assert!(arc.contains(&(0, -10)));
    }

    #[test]
    fn normalize_keeps_full_turn() {
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(360.0), 360.0);
        assert_eq!(normalize_degrees(450.0), 90.0);
    }

    #[test]
    fn spans_in_one_column_are_disjoint() {
        let spans: Vec<Span> = ArcSpans::new(10, 3, 0.0, 360.0).collect();
        let middle: Vec<&Span> = spans.iter().filter(|s| s.x == 0).collect();
        assert_eq!(middle.len(), 2);
        assert_eq!(middle[0].y + middle[0].len, -6);
        assert_eq!(middle[1].y, 7);
    }
}
