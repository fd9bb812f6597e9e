//! Plain paging view: a tab strip above a horizontally paging container.
//!
//! [`PagingView`] owns the three parts and routes every gesture through the
//! [`PagingCoordinator`]. The host feeds it layout passes, gestures and
//! animation frames; everything else follows from the coordinator's state.

use std::time::Instant;

use derive_setters::Setters;
use tracing::{debug, warn};

use crate::{
    coordinator::PagingCoordinator,
    error::PagingError,
    geometry::Rect,
    lifecycle::PageSet,
    page_container::{ContainerEvents, PageContainer, PageContainerArgs},
    style::{TabFont, TabStyleOptions},
    tab_strip::{TabCellContent, TabStrip, TabStripDataSource},
};

/// Page width assumed until the first layout pass.
pub const DEFAULT_SCREEN_WIDTH: f32 = 390.0;

/// Average glyph advance as a fraction of the font size, used to estimate
/// self-sizing tab widths.
const TITLE_ADVANCE_RATIO: f32 = 0.6;

/// Arguments for [`PagingView`].
#[derive(Clone, Debug, PartialEq, Setters)]
pub struct PagingViewArgs {
    /// Styling of the tab strip and the spacer below it.
    pub style: TabStyleOptions,
    /// Motion tuning of the page container.
    pub container: PageContainerArgs,
    /// Width of one page before the first layout pass.
    pub screen_width: f32,
}

impl Default for PagingViewArgs {
    fn default() -> Self {
        Self {
            style: TabStyleOptions::default(),
            container: PageContainerArgs::default(),
            screen_width: DEFAULT_SCREEN_WIDTH,
        }
    }
}

/// Frames of the plain variant, in view coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PagingLayout {
    pub tab_strip: Rect,
    pub separator: Option<Rect>,
    pub fixed_spacer: Option<Rect>,
    pub container: Rect,
}

/// Tab titles of a page set, with estimated intrinsic widths.
struct PageTitles<'a> {
    pages: &'a PageSet,
    font: TabFont,
}

impl TabStripDataSource for PageTitles<'_> {
    fn number_of_items(&self) -> usize {
        self.pages.len()
    }

    fn cell_for_item(&self, index: usize) -> TabCellContent {
        let title = self
            .pages
            .get(index)
            .map(|page| page.title().to_owned())
            .unwrap_or_default();
        let intrinsic_width = estimate_title_width(&title, self.font);
        TabCellContent {
            title,
            intrinsic_width,
        }
    }
}

/// Rough label width of `title` set in `font`.
pub fn estimate_title_width(title: &str, font: TabFont) -> f32 {
    title.chars().count() as f32 * font.size * TITLE_ADVANCE_RATIO
}

/// The plain paging view.
#[derive(Debug)]
pub struct PagingView {
    strip: TabStrip,
    container: PageContainer,
    coordinator: PagingCoordinator,
    layout: Option<PagingLayout>,
}

impl PagingView {
    pub fn new(pages: PageSet, args: PagingViewArgs) -> Result<Self, PagingError> {
        args.style.validate()?;
        let PagingViewArgs {
            style,
            container,
            screen_width,
        } = args;

        let mut strip = TabStrip::new(style);
        strip.reload(&PageTitles {
            pages: &pages,
            font: strip.options().selected_text_font,
        });
        let container = PageContainer::new(pages.len(), screen_width, container);
        let coordinator = PagingCoordinator::new(pages, screen_width)?;
        Ok(Self {
            strip,
            container,
            coordinator,
            layout: None,
        })
    }

    pub fn tab_strip(&self) -> &TabStrip {
        &self.strip
    }

    pub fn container(&self) -> &PageContainer {
        &self.container
    }

    pub fn coordinator(&self) -> &PagingCoordinator {
        &self.coordinator
    }

    pub fn pages(&self) -> &PageSet {
        self.coordinator.pages()
    }

    pub fn selected_index(&self) -> usize {
        self.coordinator.selected_index()
    }

    /// Frames from the last layout pass.
    pub fn layout(&self) -> Option<&PagingLayout> {
        self.layout.as_ref()
    }

    /// Lays the view out inside `bounds`: the strip on top, then the
    /// separator and the fixed spacer when enabled, and the pages below.
    pub fn layout_in(&mut self, bounds: Rect) {
        if !self.resize(bounds.width) {
            return;
        }
        let style = self.strip.options();
        let tab_strip = Rect::new(bounds.x, bounds.y, bounds.width, style.tab_strip_height);
        let mut y = tab_strip.max_y();
        let separator = style.has_separator.then(|| {
            let frame = Rect::new(bounds.x, y, bounds.width, style.separator_height);
            y = frame.max_y();
            frame
        });
        let fixed_spacer = style.has_fixed_spacer.then(|| {
            let frame = Rect::new(bounds.x, y, bounds.width, style.fixed_spacer_height);
            y = frame.max_y();
            frame
        });
        let container = Rect::new(bounds.x, y, bounds.width, (bounds.max_y() - y).max(0.0));
        debug!(?container, "paging view laid out");
        self.layout = Some(PagingLayout {
            tab_strip,
            separator,
            fixed_spacer,
            container,
        });
    }

    /// Applies a new width to the strip and the pages. Returns `false` when
    /// the width cannot host a page.
    pub(crate) fn resize(&mut self, width: f32) -> bool {
        if let Err(error) = self.coordinator.set_page_width(width) {
            warn!(%error, "skipping layout");
            return false;
        }
        self.strip.layout(width);
        let events = self.container.set_page_width(width);
        self.route(events);
        true
    }

    /// First appearance after layout. See [`PagingCoordinator::did_appear`].
    pub fn did_appear(&mut self) -> bool {
        self.coordinator.did_appear(&mut self.strip)
    }

    /// A tap on tab `index`.
    pub fn tap_tab(&mut self, index: usize) {
        if let Some(index) = self.strip.tap(index) {
            self.coordinator.did_select_item(index, &mut self.container);
        }
    }

    /// A tap at `x` in strip viewport coordinates.
    pub fn tap_at(&mut self, x: f32) {
        if let Some(index) = self.strip.hit_test(x) {
            self.tap_tab(index);
        }
    }

    pub fn begin_drag(&mut self) {
        let events = self.container.begin_drag();
        self.route(events);
    }

    pub fn drag_by(&mut self, delta: f32) {
        let events = self.container.drag_by(delta);
        self.route(events);
    }

    pub fn end_drag(&mut self, velocity: f32) {
        let events = self.container.end_drag(velocity);
        self.route(events);
    }

    /// Advances animations by one frame.
    pub fn tick(&mut self, now: Instant) {
        let events = self.container.tick(now);
        self.route(events);
    }

    /// Whether a deceleration or programmatic scroll is still running.
    pub fn is_animating(&self) -> bool {
        self.container.is_animating()
    }

    fn route(&mut self, events: ContainerEvents) {
        for event in events {
            self.coordinator.handle_container_event(event, &mut self.strip);
        }
    }
}
