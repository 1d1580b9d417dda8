use serde::{Deserialize, Serialize};

use crate::core::ScalePolicy;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;
use crate::style::{StylePalette, Theme, ThemedColor};

/// Chart view bootstrap configuration.
///
/// Serializable so host applications can ship palettes and view defaults as
/// JSON next to their other settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartViewConfig {
    #[serde(default)]
    pub scale_policy: ScalePolicy,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_background")]
    pub background: ThemedColor,
    #[serde(default)]
    pub palette: StylePalette,
}

impl ChartViewConfig {
    #[must_use]
    pub fn with_scale_policy(mut self, scale_policy: ScalePolicy) -> Self {
        self.scale_policy = scale_policy;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: StylePalette) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn with_background(mut self, background: ThemedColor) -> Self {
        self.background = background;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.background.light.validate()?;
        self.background.dark.validate()?;
        self.palette.validate()
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart view config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse chart view config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for ChartViewConfig {
    fn default() -> Self {
        Self {
            scale_policy: ScalePolicy::Fit,
            theme: Theme::Light,
            background: default_background(),
            palette: StylePalette::standard(),
        }
    }
}

fn default_background() -> ThemedColor {
    ThemedColor::new(Color::WHITE, Color::from_rgb_u32(0x1e1e1e))
}
