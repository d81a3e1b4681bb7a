//! Plot settings shared by every plotting function

use plotters::prelude::*;

/// Size, labels and colors of a plot
///
/// ```rust,ignore
/// use transport_rs::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::profile("Gaussian pulse, RK-6 + CD4");
/// config.width = 1920;
/// config.height = 1080;
/// config.series_colors = Some(vec![BLACK, RED]);
/// ```
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    pub title: String,
    pub xlabel: String,
    pub ylabel: String,

    /// Colors of the series, in drawing order
    ///
    /// `None` (or a list shorter than the number of series) falls back to
    /// the default palette.
    pub series_colors: Option<Vec<RGBColor>>,

    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: String::new(),
            ylabel: "U".to_string(),
            series_colors: None,
            background: WHITE,
            line_width: 2,
            show_grid: true,
        }
    }
}

/// Accepts `&str`, `String` or [`NO_TITLE`] wherever a title is optional
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Keep the default title
pub const NO_TITLE: Option<&str> = None;

const DEFAULT_PALETTE: [RGBColor; 8] = [
    BLUE,
    RED,
    GREEN,
    MAGENTA,
    CYAN,
    BLACK,
    RGBColor(255, 165, 0),
    RGBColor(128, 0, 128),
];

impl PlotConfig {
    /// U against x, titled "Solution profile" unless told otherwise
    pub fn profile(title: impl IntoOptionalTitle) -> Self {
        Self {
            xlabel: "x".to_string(),
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Solution profile".to_string()),
            ..Self::default()
        }
    }

    /// dt against t, titled "Time steps" unless told otherwise
    pub fn time_steps(title: impl IntoOptionalTitle) -> Self {
        Self {
            xlabel: "t".to_string(),
            ylabel: "dt".to_string(),
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Time steps".to_string()),
            ..Self::default()
        }
    }

    /// Color of the `index`-th series
    pub(crate) fn series_color(&self, index: usize) -> RGBColor {
        if let Some(color) = self.series_colors.as_ref().and_then(|colors| colors.get(index)) {
            return *color;
        }

        DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()]
    }
}

// =================================================================================================
// Tests
// =================================================================================================
