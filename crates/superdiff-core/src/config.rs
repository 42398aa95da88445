use crate::{style::Palette, ConfigError};

/// Configuration knobs shared by the inspector, the differ, and the renderer.
///
/// Both the inspector's line-collapsing rules and the renderer's indentation
/// are driven by the same `indent_width` and `max_single_line_width` values,
/// so the two always agree on layout.
#[derive(Clone, Debug)]
pub struct Config {
    max_single_line_width: usize,
    indent_width: usize,
    color_enabled: bool,
    palette: Palette,
    max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_single_line_width: 80,
            indent_width: 2,
            color_enabled: false,
            palette: Palette::default(),
            max_depth: 64,
        }
    }
}

impl Config {
    /// Constructs a configuration with default settings (80-column collapse
    /// budget, two-space indentation, no color, 64-level depth budget).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collapse threshold in columns.
    #[must_use]
    pub fn max_single_line_width(&self) -> usize {
        self.max_single_line_width
    }

    /// Returns the number of spaces per nesting level.
    #[must_use]
    pub fn indent_width(&self) -> usize {
        self.indent_width
    }

    /// Indicates whether styled output is enabled.
    #[must_use]
    pub fn color_enabled(&self) -> bool {
        self.color_enabled
    }

    /// Returns the role-to-token style map.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Returns the per-call recursion budget.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Sets the collapse threshold.
    ///
    /// ```
    /// # use superdiff_core::Config;
    /// let config = Config::default().with_max_single_line_width(100)?;
    /// assert_eq!(config.max_single_line_width(), 100);
    /// # Ok::<(), superdiff_core::ConfigError>(())
    /// ```
    pub fn with_max_single_line_width(mut self, width: usize) -> Result<Self, ConfigError> {
        if width == 0 {
            return Err(ConfigError::ZeroLineWidth);
        }
        self.max_single_line_width = width;
        Ok(self)
    }

    /// Sets the number of spaces per nesting level.
    ///
    /// ```
    /// # use superdiff_core::Config;
    /// let config = Config::default().with_indent_width(4)?;
    /// assert_eq!(config.indent_width(), 4);
    /// # Ok::<(), superdiff_core::ConfigError>(())
    /// ```
    pub fn with_indent_width(mut self, width: usize) -> Result<Self, ConfigError> {
        if width == 0 {
            return Err(ConfigError::ZeroIndentWidth);
        }
        self.indent_width = width;
        Ok(self)
    }

    /// Enables or disables styled output.
    #[must_use]
    pub fn with_color(mut self, enabled: bool) -> Self {
        self.color_enabled = enabled;
        self
    }

    /// Replaces the role-to-token style map.
    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Sets the per-call recursion budget used as the cycle guard.
    pub fn with_max_depth(mut self, depth: usize) -> Result<Self, ConfigError> {
        if depth == 0 {
            return Err(ConfigError::ZeroDepthBudget);
        }
        self.max_depth = depth;
        Ok(self)
    }

    /// Returns the indentation string for the given nesting level.
    pub(crate) fn indentation(&self, level: usize) -> String {
        " ".repeat(level * self.indent_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_indent_width_is_rejected() {
        let err = Config::default().with_indent_width(0).unwrap_err();
        assert_eq!(err, ConfigError::ZeroIndentWidth);
    }

    #[test]
    fn zero_depth_budget_is_rejected() {
        let err = Config::default().with_max_depth(0).unwrap_err();
        assert_eq!(err, ConfigError::ZeroDepthBudget);
    }

    #[test]
    fn indentation_scales_with_level() {
        let config = Config::default().with_indent_width(4).unwrap();
        assert_eq!(config.indentation(2), "        ");
    }
}
