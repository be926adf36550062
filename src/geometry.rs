//! Orientation, windows and the clamping rules for shape parameters.
//!
//! Callers draw in logical coordinates. Under a portrait rotation the axes are swapped
//! before anything reaches a register, and every clamp below works on physical values.

/// Display orientation in 90 degree steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    /// Landscape, panel native scan.
    #[default]
    Rotate0,
    /// Portrait, horizontal scan reversed.
    Rotate90,
    /// Landscape, both scans reversed.
    Rotate180,
    /// Portrait, vertical scan reversed.
    Rotate270,
}

impl Rotation {
    /// Whether logical axes are swapped against the panel.
    pub const fn is_portrait(self) -> bool {
        matches!(self, Rotation::Rotate90 | Rotation::Rotate270)
    }

    /// Horizontal and vertical scan reversal for `DPCR`.
    pub(crate) const fn scan_reversed(self) -> (bool, bool) {
        match self {
            Rotation::Rotate0 => (false, false),
            Rotation::Rotate90 => (true, false),
            Rotation::Rotate180 => (true, true),
            Rotation::Rotate270 => (false, true),
        }
    }
}

impl From<u8> for Rotation {
    fn from(value: u8) -> Self {
        match value % 4 {
            0 => Rotation::Rotate0,
            1 => Rotation::Rotate90,
            2 => Rotation::Rotate180,
            _ => Rotation::Rotate270,
        }
    }
}

/// A coordinate that may ask to be centered on its axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pos {
    /// An explicit logical coordinate.
    At(i16),
    /// The middle of the logical axis.
    Center,
}

impl Pos {
    pub(crate) fn resolve(self, extent: u16) -> i16 {
        match self {
            Pos::At(v) => v,
            Pos::Center => (extent / 2) as i16,
        }
    }
}

impl From<i16> for Pos {
    fn from(value: i16) -> Self {
        Pos::At(value)
    }
}

// Untyped integer literals fall back to i32.
impl From<i32> for Pos {
    fn from(value: i32) -> Self {
        Pos::At(value.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16)
    }
}

/// A rectangle in physical panel coordinates, bounds inclusive of left/top.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Window {
    /// Left edge.
    pub left: u16,
    /// Right edge.
    pub right: u16,
    /// Top edge.
    pub top: u16,
    /// Bottom edge.
    pub bottom: u16,
}

impl Window {
    /// The whole panel.
    pub const fn full(panel_width: u16, panel_height: u16) -> Self {
        Window {
            left: 0,
            right: panel_width,
            top: 0,
            bottom: panel_height,
        }
    }

    /// Whether every bound is zero, the "not configured" state of a scroll window.
    pub const fn is_empty(&self) -> bool {
        self.left == 0 && self.right == 0 && self.top == 0 && self.bottom == 0
    }
}

/// Panel size plus the rotation applied to it.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Geometry {
    pub panel_width: u16,
    pub panel_height: u16,
    pub width: u16,
    pub height: u16,
    pub rotation: Rotation,
    pub window: Window,
    pub scroll_window: Window,
}

impl Geometry {
    pub fn new(panel_width: u16, panel_height: u16) -> Self {
        Geometry {
            panel_width,
            panel_height,
            width: panel_width,
            height: panel_height,
            rotation: Rotation::Rotate0,
            window: Window::full(panel_width, panel_height),
            scroll_window: Window::default(),
        }
    }

    pub fn portrait(&self) -> bool {
        self.rotation.is_portrait()
    }

    /// Recompute logical size for `rotation`.
    pub fn rotate(&mut self, rotation: Rotation) {
        self.rotation = rotation;
        if rotation.is_portrait() {
            self.width = self.panel_height;
            self.height = self.panel_width;
        } else {
            self.width = self.panel_width;
            self.height = self.panel_height;
        }
    }

    /// Logical to physical.
    pub fn to_physical(&self, x: i16, y: i16) -> (i16, i16) {
        if self.portrait() {
            (y, x)
        } else {
            (x, y)
        }
    }
}

/// Clamp right and bottom to the panel. Left and top pass through untouched.
pub(crate) fn clamp_window(window: Window, panel_width: u16, panel_height: u16) -> Window {
    Window {
        right: window.right.min(panel_width),
        bottom: window.bottom.min(panel_height),
        ..window
    }
}

/// Pull a physical point onto the panel.
pub(crate) fn check_limits(x: i16, y: i16, panel_width: u16, panel_height: u16) -> (i16, i16) {
    let max_x = panel_width as i16 - 1;
    let max_y = panel_height as i16 - 1;
    (x.clamp(0, max_x), y.clamp(0, max_y))
}

/// Circles at or past half the shorter panel side corrupt the shape engine output.
pub(crate) fn clamp_circle_radius(r: i16, panel_width: u16, panel_height: u16) -> i16 {
    let half = (panel_width.min(panel_height) / 2) as i16;
    if r > half {
        half - 1
    } else {
        r
    }
}

/// Ellipse axes in physical orientation, each kept under half its panel side.
pub(crate) fn clamp_ellipse_axes(
    horizontal: i16,
    vertical: i16,
    panel_width: u16,
    panel_height: u16,
) -> (i16, i16) {
    let half_w = (panel_width / 2) as i16;
    let half_h = (panel_height / 2) as i16;
    let horizontal = if horizontal > half_w { half_w - 1 } else { horizontal };
    let vertical = if vertical > half_h { half_h - 1 } else { vertical };
    (horizontal, vertical)
}

/// Corner radius that still fits twice along the shorter side.
pub(crate) fn clamp_corner_radius(w: i16, h: i16, r: i16) -> i16 {
    let short = w.min(h);
    if r.saturating_mul(2) >= short {
        (short / 2 - 1).max(0)
    } else {
        r
    }
}

/// Below this [`triangle_area_ratio`] a filled triangle is drawn as an outline.
pub(crate) const TRIANGLE_FILL_MIN_RATIO: f32 = 0.9;

/// Twice the triangle area over its longest side: roughly how far the far vertex sits
/// from the longest edge. Slivers near zero make the fill engine misdraw.
pub(crate) fn triangle_area_ratio(p0: (i16, i16), p1: (i16, i16), p2: (i16, i16)) -> f32 {
    let (ax, ay) = (i64::from(p0.0), i64::from(p0.1));
    let (bx, by) = (i64::from(p1.0), i64::from(p1.1));
    let (cx, cy) = (i64::from(p2.0), i64::from(p2.1));
    let area = (ax * (by - cy) + bx * (cy - ay) + cx * (ay - by)).abs() as f32;
    let side = |dx: i64, dy: i64| libm::sqrtf((dx * dx + dy * dy) as f32);
    let longest = side(bx - ax, by - ay)
        .max(side(cx - ax, cy - ay))
        .max(side(cx - bx, cy - by));
    if longest == 0.0 {
        return 0.0;
    }
    area / longest
}

/// Whether a filled triangle may go to the shape engine as a fill.
pub(crate) fn triangle_fillable(p0: (i16, i16), p1: (i16, i16), p2: (i16, i16)) -> bool {
    if p0 == p1 || p0 == p2 || p1 == p2 {
        return false;
    }
    if p0.0 == p1.0 && p0.0 == p2.0 {
        return false;
    }
    if p0.1 == p1.1 && p0.1 == p2.1 {
        return false;
    }
    triangle_area_ratio(p0, p1, p2) >= TRIANGLE_FILL_MIN_RATIO
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_wraps_modulo_four() {
        assert_eq!(Rotation::from(4), Rotation::Rotate0);
        assert_eq!(Rotation::from(5), Rotation::Rotate90);
        assert_eq!(Rotation::from(255), Rotation::Rotate270);
    }

    #[test]
    fn rotate_swaps_logical_size_in_portrait() {
        let mut g = Geometry::new(800, 480);
        for r in 0..4u8 {
            let rotation = Rotation::from(r);
            g.rotate(rotation);
            if rotation.is_portrait() {
                assert_eq!((g.width, g.height), (480, 800));
                assert_eq!(g.to_physical(3, 7), (7, 3));
            } else {
                assert_eq!((g.width, g.height), (800, 480));
                assert_eq!(g.to_physical(3, 7), (3, 7));
            }
            assert_eq!(g.to_physical(0, 0), (0, 0));
        }
    }

    #[test]
    fn clamp_window_only_limits_right_and_bottom() {
        let w = Window {
            left: 10,
            right: 900,
            top: 20,
            bottom: 600,
        };
        let c = clamp_window(w, 800, 480);
        assert_eq!(
            c,
            Window {
                left: 10,
                right: 800,
                top: 20,
                bottom: 480
            }
        );
    }

    #[test]
    fn check_limits_clamps_both_ends() {
        assert_eq!(check_limits(-5, 900, 800, 480), (0, 479));
        assert_eq!(check_limits(900, -1, 800, 480), (799, 0));
        assert_eq!(check_limits(5, 6, 800, 480), (5, 6));
    }

    #[test]
    fn circle_radius_stays_under_half_short_side() {
        assert_eq!(clamp_circle_radius(100, 800, 480), 100);
        assert_eq!(clamp_circle_radius(240, 800, 480), 240);
        assert_eq!(clamp_circle_radius(241, 800, 480), 239);
        assert_eq!(clamp_circle_radius(1000, 640, 480), 239);
    }

    #[test]
    fn ellipse_axes_clamp_per_axis() {
        assert_eq!(clamp_ellipse_axes(500, 300, 800, 480), (399, 239));
        assert_eq!(clamp_ellipse_axes(100, 50, 800, 480), (100, 50));
    }

    #[test]
    fn corner_radius_fits_short_side() {
        assert_eq!(clamp_corner_radius(100, 40, 30), 19);
        assert_eq!(clamp_corner_radius(40, 100, 10), 10);
        assert_eq!(clamp_corner_radius(20, 20, 10), 9);
        assert_eq!(clamp_corner_radius(1, 1, 5), 0);
        assert_eq!(clamp_corner_radius(i16::MAX, i16::MAX, i16::MAX), 16382);
    }

    #[test]
    fn coincident_or_colinear_triangles_are_not_fillable() {
        assert!(!triangle_fillable((0, 0), (0, 0), (10, 5)));
        assert!(!triangle_fillable((3, 0), (3, 9), (3, 20)));
        assert!(!triangle_fillable((0, 4), (9, 4), (20, 4)));
        assert!(!triangle_fillable((0, 0), (100, 0), (200, 1)));
        assert!(triangle_fillable((0, 0), (100, 0), (50, 80)));
        assert!(triangle_fillable((i16::MIN, i16::MIN), (i16::MAX, i16::MIN), (0, i16::MAX)));
    }

    #[test]
    fn area_ratio_of_right_triangle() {
        // legs 3 and 4: area*2 = 12, hypotenuse 5
        let ratio = triangle_area_ratio((0, 0), (3, 0), (0, 4));
        assert!((ratio - 2.4).abs() < 1e-5);
    }
}
