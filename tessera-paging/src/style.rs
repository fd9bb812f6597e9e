//! Style options for the tab strip and the composed views.

use derive_setters::Setters;

use crate::{color::Color, error::PagingError};

/// Default values for [`TabStyleOptions`].
pub struct TabStyleDefaults;

impl TabStyleDefaults {
    /// Height of the tab strip.
    pub const TAB_STRIP_HEIGHT: f32 = 38.0;
    /// Inset before the first tab.
    pub const LEFT_SPACING: f32 = 16.0;
    /// Inset after the last tab.
    pub const RIGHT_SPACING: f32 = 16.0;
    /// Gap between neighbouring tabs.
    pub const ITEM_SPACING: f32 = 20.0;
    /// Height of the indicator bar.
    pub const INDICATOR_HEIGHT: f32 = 4.0;
    /// Height of the separator line under the strip.
    pub const SEPARATOR_HEIGHT: f32 = 1.0;
    /// Height of the spacer between the strip and the pages.
    pub const FIXED_SPACER_HEIGHT: f32 = 38.0;
    /// Height of the collapsing header in the header variant.
    pub const HEADER_HEIGHT: f32 = 200.0;
}

/// How tab cells are sized along the strip.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemSize {
    /// Every cell has the same fixed width.
    Fixed(f32),
    /// The viewport width, minus insets and spacing, is shared evenly.
    Average,
    /// Each cell takes the intrinsic width its data source reports.
    #[default]
    SelfSizing,
}

/// Font weight of a tab label.
///
/// Fonts cannot be blended, so a cell switches weight once a transition has
/// crossed its midpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FontWeight {
    #[default]
    Regular,
    Medium,
    Bold,
}

/// A label font: point size plus weight.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabFont {
    pub size: f32,
    pub weight: FontWeight,
}

impl TabFont {
    pub const fn new(size: f32, weight: FontWeight) -> Self {
        Self { size, weight }
    }
}

impl Default for TabFont {
    fn default() -> Self {
        Self::new(17.0, FontWeight::Regular)
    }
}

/// Visual configuration of the tab strip.
#[derive(Clone, Debug, PartialEq, Setters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TabStyleOptions {
    /// Height of the tab strip.
    pub tab_strip_height: f32,
    /// Inset before the first tab.
    pub left_spacing: f32,
    /// Inset after the last tab.
    pub right_spacing: f32,
    /// Gap between neighbouring tabs.
    pub item_spacing: f32,
    /// Cell height as a fraction of the strip height.
    pub item_height_ratio: f32,
    /// Sizing mode for the cells.
    pub item_size: ItemSize,
    /// Background of the whole strip.
    pub strip_background_color: Color,
    pub background_color: Color,
    pub selected_background_color: Color,
    pub border_color: Color,
    pub selected_border_color: Color,
    pub text_color: Color,
    pub selected_text_color: Color,
    pub text_font: TabFont,
    pub selected_text_font: TabFont,
    /// Whether the indicator bar is shown.
    pub has_indicator: bool,
    pub indicator_height: f32,
    pub indicator_color: Color,
    /// Indicator width as a fraction of the cell width, in `(0, 1]`.
    pub indicator_width_ratio: f32,
    /// Whether a separator line is drawn below the strip.
    pub has_separator: bool,
    pub separator_color: Color,
    pub separator_height: f32,
    /// Whether a fixed spacer sits between the strip and the pages. Only
    /// used by the plain variant.
    pub has_fixed_spacer: bool,
    pub fixed_spacer_height: f32,
}

impl Default for TabStyleOptions {
    fn default() -> Self {
        Self {
            tab_strip_height: TabStyleDefaults::TAB_STRIP_HEIGHT,
            left_spacing: TabStyleDefaults::LEFT_SPACING,
            right_spacing: TabStyleDefaults::RIGHT_SPACING,
            item_spacing: TabStyleDefaults::ITEM_SPACING,
            item_height_ratio: 1.0,
            item_size: ItemSize::default(),
            strip_background_color: Color::WHITE,
            background_color: Color::WHITE,
            selected_background_color: Color::WHITE,
            border_color: Color::TRANSPARENT,
            selected_border_color: Color::TRANSPARENT,
            text_color: Color::BLACK,
            selected_text_color: Color::BLACK,
            text_font: TabFont::default(),
            selected_text_font: TabFont::default(),
            has_indicator: true,
            indicator_height: TabStyleDefaults::INDICATOR_HEIGHT,
            indicator_color: Color::RED,
            indicator_width_ratio: 1.0,
            has_separator: true,
            separator_color: Color::LIGHT_GRAY,
            separator_height: TabStyleDefaults::SEPARATOR_HEIGHT,
            has_fixed_spacer: true,
            fixed_spacer_height: TabStyleDefaults::FIXED_SPACER_HEIGHT,
        }
    }
}

impl TabStyleOptions {
    /// Checks that every length can be laid out.
    pub fn validate(&self) -> Result<(), PagingError> {
        let lengths = [
            ("tab_strip_height", self.tab_strip_height),
            ("left_spacing", self.left_spacing),
            ("right_spacing", self.right_spacing),
            ("item_spacing", self.item_spacing),
            ("indicator_height", self.indicator_height),
            ("separator_height", self.separator_height),
            ("fixed_spacer_height", self.fixed_spacer_height),
        ];
        for (field, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(PagingError::InvalidStyle {
                    field,
                    reason: "must be a finite, non-negative length",
                });
            }
        }
        if !(self.item_height_ratio > 0.0 && self.item_height_ratio <= 1.0) {
            return Err(PagingError::InvalidStyle {
                field: "item_height_ratio",
                reason: "must be in (0, 1]",
            });
        }
        if !(self.indicator_width_ratio > 0.0 && self.indicator_width_ratio <= 1.0) {
            return Err(PagingError::InvalidStyle {
                field: "indicator_width_ratio",
                reason: "must be in (0, 1]",
            });
        }
        if let ItemSize::Fixed(width) = self.item_size
            && !(width.is_finite() && width > 0.0)
        {
            return Err(PagingError::InvalidStyle {
                field: "item_size",
                reason: "fixed width must be finite and greater than zero",
            });
        }
        Ok(())
    }

    /// Height of the strip including the separator line, if any.
    pub fn strip_total_height(&self) -> f32 {
        if self.has_separator {
            self.tab_strip_height + self.separator_height
        } else {
            self.tab_strip_height
        }
    }
}
