//! Construction-time settings.
use crate::panel::{Panel, PanelSelect};
use crate::touch::TouchCalibration;

/// Settings the driver is created with.
///
/// ```
/// use ra8875::config::Config;
/// use ra8875::panel::{Panel, PanelSelect};
///
/// let config = Config::new()
///     .panel(PanelSelect::Fixed(Panel::Tft56))
///     .arc_params(360.0, -90.0);
/// assert_eq!(config.selected_panel(), PanelSelect::Fixed(Panel::Tft56));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Config {
    pub(crate) panel: PanelSelect,
    pub(crate) touch: TouchCalibration,
    pub(crate) arc_angle_max: f32,
    pub(crate) arc_angle_offset: f32,
    pub(crate) angle_offset: i16,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            panel: PanelSelect::Strapped,
            touch: TouchCalibration::default(),
            arc_angle_max: 360.0,
            arc_angle_offset: -90.0,
            angle_offset: crate::shapes::DEFAULT_ANGLE_OFFSET,
        }
    }
}

impl Config {
    /// Defaults: strapped panel detection, stock touch calibration, arcs in degrees
    /// starting at twelve o'clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// How to pick the panel during init.
    #[must_use]
    pub fn panel(mut self, panel: PanelSelect) -> Self {
        self.panel = panel;
        self
    }

    /// Raw ADC bounds of the touch panel in the unrotated orientation.
    #[must_use]
    pub fn touch_calibration(mut self, calibration: TouchCalibration) -> Self {
        self.touch = calibration;
        self
    }

    /// Units per full turn for arc angles, and where zero sits in degrees from three
    /// o'clock.
    #[must_use]
    pub fn arc_params(mut self, max: f32, offset: f32) -> Self {
        self.arc_angle_max = max;
        self.arc_angle_offset = offset;
        self
    }

    /// Degrees added to every angled line.
    #[must_use]
    pub fn angle_offset(mut self, offset: i16) -> Self {
        self.angle_offset = offset;
        self
    }

    /// The configured panel selection.
    pub fn selected_panel(&self) -> PanelSelect {
        self.panel
    }

    pub(crate) fn initial_panel(&self) -> Panel {
        match self.panel {
            PanelSelect::Fixed(panel) => panel,
            PanelSelect::Strapped => Panel::Tft50,
        }
    }
}
