use std::fmt;

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const ORANGE: Self = Self::rgb(1.0, 0.647, 0.0);
    pub const MAGENTA: Self = Self::rgb(1.0, 0.0, 1.0);
    pub const GREEN: Self = Self::rgb(0.0, 0.502, 0.0);
    pub const BROWN: Self = Self::rgb(0.647, 0.165, 0.165);
    pub const GRID: Self = Self::rgba(3.0 / 255.0, 3.0 / 255.0, 3.0 / 255.0, 0.1);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// CSS `rgb(...)` notation; alpha is emitted separately as an opacity.
    #[must_use]
    pub fn css(self) -> CssColor {
        CssColor(self)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CssColor(Color);

impl fmt::Display for CssColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let channel = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        write!(
            f,
            "rgb({},{},{})",
            channel(self.0.red),
            channel(self.0.green),
            channel(self.0.blue)
        )
    }
}

/// Line colors handed out to y series in order, wrapping around.
pub const SERIES_PALETTE: [Color; 6] = [
    Color::BLACK,
    Color::RED,
    Color::ORANGE,
    Color::MAGENTA,
    Color::GREEN,
    Color::BROWN,
];

#[must_use]
pub fn series_color(index: usize) -> Color {
    SERIES_PALETTE[index % SERIES_PALETTE.len()]
}

/// Dash pattern distinguishing y series even without color:
/// a dash growing with the index, then one dot per index step.
#[must_use]
pub fn series_dash_pattern(index: usize) -> String {
    let mut pattern = format!("{},3", 5 * (index + 1));
    for _ in 0..=index {
        pattern.push_str(",1,1");
    }
    pattern
}
