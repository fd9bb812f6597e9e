//! Horizontal strip of selectable tab cells with an indicator bar.
//!
//! The strip owns cell geometry and styling only. It never decides which
//! tab is selected: a tap is reported back to the owner, and the owner
//! drives every visual change through [`TabStripSink`].

use tracing::{debug, trace};

use crate::{
    color::Color,
    coordinator::TabStripSink,
    geometry::Rect,
    interpolate::blend,
    style::{ItemSize, TabFont, TabStyleOptions},
};

/// Content of one tab cell, supplied by a [`TabStripDataSource`].
#[derive(Clone, Debug, PartialEq)]
pub struct TabCellContent {
    pub title: String,
    /// Width the cell wants when the strip uses [`ItemSize::SelfSizing`].
    pub intrinsic_width: f32,
}

/// Supplies the cells of a [`TabStrip`].
pub trait TabStripDataSource {
    fn number_of_items(&self) -> usize;
    fn cell_for_item(&self, index: usize) -> TabCellContent;
}

/// Resolved styling of a cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellStyle {
    pub text_color: Color,
    pub background_color: Color,
    pub border_color: Color,
    pub font: TabFont,
}

impl CellStyle {
    fn selected(options: &TabStyleOptions) -> Self {
        Self {
            text_color: options.selected_text_color,
            background_color: options.selected_background_color,
            border_color: options.selected_border_color,
            font: options.selected_text_font,
        }
    }

    fn unselected(options: &TabStyleOptions) -> Self {
        Self {
            text_color: options.text_color,
            background_color: options.background_color,
            border_color: options.border_color,
            font: options.text_font,
        }
    }

    /// Blends colours linearly; the font switches at the midpoint.
    fn blend(from: Self, to: Self, progress: f32) -> Self {
        Self {
            text_color: blend(from.text_color, to.text_color, progress),
            background_color: blend(from.background_color, to.background_color, progress),
            border_color: blend(from.border_color, to.border_color, progress),
            font: if progress < 0.5 { from.font } else { to.font },
        }
    }
}

/// A laid out tab cell.
#[derive(Clone, Debug, PartialEq)]
pub struct TabCell {
    pub title: String,
    pub intrinsic_width: f32,
    /// Frame in strip content coordinates; `None` until the first layout.
    pub frame: Option<Rect>,
    pub style: CellStyle,
}

/// The tab strip widget.
#[derive(Clone, Debug)]
pub struct TabStrip {
    options: TabStyleOptions,
    cells: Vec<TabCell>,
    viewport_width: f32,
    content_width: f32,
    scroll_offset_x: f32,
    indicator: Option<Rect>,
}

impl TabStrip {
    pub fn new(options: TabStyleOptions) -> Self {
        Self {
            options,
            cells: Vec::new(),
            viewport_width: 0.0,
            content_width: 0.0,
            scroll_offset_x: 0.0,
            indicator: None,
        }
    }

    pub fn options(&self) -> &TabStyleOptions {
        &self.options
    }

    /// Pulls every cell from `data_source`. Cells start unselected and lose
    /// their geometry until the next [`TabStrip::layout`].
    pub fn reload(&mut self, data_source: &dyn TabStripDataSource) {
        let unselected = CellStyle::unselected(&self.options);
        self.cells = (0..data_source.number_of_items())
            .map(|index| {
                let content = data_source.cell_for_item(index);
                TabCell {
                    title: content.title,
                    intrinsic_width: content.intrinsic_width.max(0.0),
                    frame: None,
                    style: unselected,
                }
            })
            .collect();
        self.content_width = 0.0;
        self.scroll_offset_x = 0.0;
        self.indicator = None;
        debug!(count = self.cells.len(), "tab strip reloaded");
    }

    pub fn number_of_tabs(&self) -> usize {
        self.cells.len()
    }

    pub fn cell(&self, index: usize) -> Option<&TabCell> {
        self.cells.get(index)
    }

    pub fn cells(&self) -> &[TabCell] {
        &self.cells
    }

    pub fn is_laid_out(&self) -> bool {
        self.cells.first().is_some_and(|cell| cell.frame.is_some())
    }

    /// Width of all cells plus insets and spacing.
    pub fn content_width(&self) -> f32 {
        self.content_width
    }

    /// Horizontal scroll position of the strip's content.
    pub fn scroll_offset_x(&self) -> f32 {
        self.scroll_offset_x
    }

    /// Indicator frame in strip content coordinates, once positioned.
    pub fn indicator(&self) -> Option<Rect> {
        self.indicator
    }

    /// Lays the cells out for a strip `viewport_width` wide.
    pub fn layout(&mut self, viewport_width: f32) {
        self.viewport_width = viewport_width.max(0.0);
        let options = &self.options;
        let count = self.cells.len();
        let height = options.tab_strip_height * options.item_height_ratio;
        let y = (options.tab_strip_height - height) / 2.0;
        let average_width = if count == 0 {
            0.0
        } else {
            let gaps = options.item_spacing * count.saturating_sub(1) as f32;
            ((self.viewport_width - options.left_spacing - options.right_spacing - gaps)
                / count as f32)
                .max(0.0)
        };

        let mut x = options.left_spacing;
        for (index, cell) in self.cells.iter_mut().enumerate() {
            let width = match options.item_size {
                ItemSize::Fixed(width) => width,
                ItemSize::Average => average_width,
                ItemSize::SelfSizing => cell.intrinsic_width,
            };
            if index > 0 {
                x += options.item_spacing;
            }
            cell.frame = Some(Rect::new(x, y, width, height));
            x += width;
        }
        self.content_width = x + options.right_spacing;
        self.scroll_offset_x = self.clamp_scroll(self.scroll_offset_x);
        trace!(
            viewport_width = self.viewport_width,
            content_width = self.content_width,
            "tab strip laid out"
        );
    }

    /// Reports a tap on cell `index`. Returns the index to select, or `None`
    /// when the tap hit nothing. The strip itself does not change.
    pub fn tap(&self, index: usize) -> Option<usize> {
        (index < self.cells.len()).then_some(index)
    }

    /// Maps a tap at `x` (viewport coordinates) to a cell.
    pub fn hit_test(&self, x: f32) -> Option<usize> {
        let content_x = x + self.scroll_offset_x;
        self.cells.iter().position(|cell| {
            cell.frame
                .is_some_and(|frame| content_x >= frame.x && content_x < frame.max_x())
        })
    }

    /// Scrolls so that cell `index` is centred as far as the content allows.
    pub fn scroll_into_view(&mut self, index: usize) {
        let Some(frame) = self.cells.get(index).and_then(|cell| cell.frame) else {
            return;
        };
        self.scroll_offset_x = self.clamp_scroll(frame.center_x() - self.viewport_width / 2.0);
    }

    fn clamp_scroll(&self, offset: f32) -> f32 {
        let max = (self.content_width - self.viewport_width).max(0.0);
        offset.clamp(0.0, max)
    }

    fn indicator_frame_for(&self, cell: Rect) -> Rect {
        let height = self.options.indicator_height;
        let width = cell.width * self.options.indicator_width_ratio;
        Rect::new(
            cell.x + (cell.width - width) / 2.0,
            self.options.tab_strip_height - height,
            width,
            height,
        )
    }

    fn frame(&self, index: usize) -> Option<Rect> {
        self.cells.get(index).and_then(|cell| cell.frame)
    }
}

impl TabStripSink for TabStrip {
    fn set_initial_selection(&mut self, index: usize) -> bool {
        let Some(frame) = self.frame(index) else {
            debug!(index, "initial selection requested before layout");
            return false;
        };
        if self.options.has_indicator {
            self.indicator = Some(self.indicator_frame_for(frame));
        }
        true
    }

    fn update_cells(&mut self, from: usize, to: usize, progress: f32) {
        if from >= self.cells.len() || to >= self.cells.len() {
            return;
        }
        let selected = CellStyle::selected(&self.options);
        let unselected = CellStyle::unselected(&self.options);
        self.cells[from].style = CellStyle::blend(selected, unselected, progress);
        self.cells[to].style = CellStyle::blend(unselected, selected, progress);
        self.scroll_into_view(to);
    }

    fn update_indicator(&mut self, from: usize, to: usize, progress: f32) {
        if !self.options.has_indicator {
            return;
        }
        let (Some(from_frame), Some(to_frame)) = (self.frame(from), self.frame(to)) else {
            return;
        };
        let from_frame = self.indicator_frame_for(from_frame);
        let to_frame = self.indicator_frame_for(to_frame);
        self.indicator = Some(Rect::new(
            blend(from_frame.x, to_frame.x, progress),
            from_frame.y,
            blend(from_frame.width, to_frame.width, progress),
            from_frame.height,
        ));
    }
}
