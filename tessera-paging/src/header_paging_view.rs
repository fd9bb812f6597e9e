//! Paging view under a collapsing header.
//!
//! An outer vertical list carries the header, the tab strip and, as its
//! single row, the page container. Each page may host its own vertical
//! list. The [`OuterScrollArbiter`] decides which of the two vertical
//! surfaces moves; the horizontal paging flow is the one of
//! [`PagingView`].

use derive_setters::Setters;
use tracing::debug;

use crate::{
    arbiter::{GestureSource, ListHandle, OuterScrollArbiter},
    error::PagingError,
    geometry::Rect,
    lifecycle::PageSet,
    paging_view::{PagingView, PagingViewArgs},
    style::TabStyleDefaults,
};

/// Arguments for [`HeaderPagingView`].
#[derive(Clone, Debug, PartialEq, Setters)]
pub struct HeaderPagingArgs {
    /// Arguments of the embedded paging view.
    pub paging: PagingViewArgs,
    /// Height of the collapsing header.
    pub header_height: f32,
    /// Whether the tab strip stays at the top once the header is gone. When
    /// `false` the strip scrolls away with the header.
    pub is_tab_view_pinned: bool,
}

impl Default for HeaderPagingArgs {
    fn default() -> Self {
        Self {
            paging: PagingViewArgs::default(),
            header_height: TabStyleDefaults::HEADER_HEIGHT,
            is_tab_view_pinned: true,
        }
    }
}

/// Frames of the header variant, in outer list content coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeaderLayout {
    pub header: Rect,
    pub tab_strip: Rect,
    pub separator: Option<Rect>,
    pub container: Rect,
    /// Total scrollable height of the outer list.
    pub content_height: f32,
}

/// The header variant of the paging view.
#[derive(Debug)]
pub struct HeaderPagingView {
    paging: PagingView,
    arbiter: OuterScrollArbiter,
    header_height: f32,
    is_tab_view_pinned: bool,
    layout: Option<HeaderLayout>,
}

impl HeaderPagingView {
    pub fn new(pages: PageSet, args: HeaderPagingArgs) -> Result<Self, PagingError> {
        let HeaderPagingArgs {
            paging,
            header_height,
            is_tab_view_pinned,
        } = args;
        if !header_height.is_finite() || header_height < 0.0 {
            return Err(PagingError::InvalidStyle {
                field: "header_height",
                reason: "must be a finite, non-negative length",
            });
        }
        let paging = PagingView::new(pages, paging)?;
        let collapse_threshold = if is_tab_view_pinned {
            header_height
        } else {
            header_height + paging.tab_strip().options().strip_total_height()
        };
        Ok(Self {
            paging,
            arbiter: OuterScrollArbiter::new(collapse_threshold),
            header_height,
            is_tab_view_pinned,
            layout: None,
        })
    }

    pub fn paging(&self) -> &PagingView {
        &self.paging
    }

    /// The embedded paging view, for horizontal gestures and frames.
    pub fn paging_mut(&mut self) -> &mut PagingView {
        &mut self.paging
    }

    pub fn arbiter(&self) -> &OuterScrollArbiter {
        &self.arbiter
    }

    pub fn header_height(&self) -> f32 {
        self.header_height
    }

    pub fn is_tab_view_pinned(&self) -> bool {
        self.is_tab_view_pinned
    }

    /// Outer offset at which the header counts as collapsed.
    pub fn collapse_threshold(&self) -> f32 {
        self.arbiter.collapse_threshold()
    }

    pub fn layout(&self) -> Option<&HeaderLayout> {
        self.layout.as_ref()
    }

    /// Lays the outer list out for a viewport of `bounds`. The page row is
    /// as tall as the viewport minus the pinned strip, so a collapsed header
    /// leaves the pages filling the screen.
    pub fn layout_in(&mut self, bounds: Rect) {
        if !self.paging.resize(bounds.width) {
            return;
        }
        let style = self.paging.tab_strip().options();
        let header = Rect::new(0.0, 0.0, bounds.width, self.header_height);
        let tab_strip = Rect::new(0.0, header.max_y(), bounds.width, style.tab_strip_height);
        let separator = style.has_separator.then(|| {
            Rect::new(0.0, tab_strip.max_y(), bounds.width, style.separator_height)
        });
        let strip_total_height = style.strip_total_height();
        let pinned_height = if self.is_tab_view_pinned {
            strip_total_height
        } else {
            0.0
        };
        let container = Rect::new(
            0.0,
            header.max_y() + strip_total_height,
            bounds.width,
            (bounds.height - pinned_height).max(0.0),
        );
        debug!(?container, threshold = self.collapse_threshold(), "header paging view laid out");
        self.layout = Some(HeaderLayout {
            header,
            tab_strip,
            separator,
            container,
            content_height: container.max_y(),
        });
    }

    /// Where the tab strip shows inside the viewport at the current outer
    /// offset. A pinned strip sticks to the top once the header is gone.
    pub fn visible_tab_strip_frame(&self) -> Option<Rect> {
        let layout = self.layout.as_ref()?;
        let y = layout.tab_strip.y - self.arbiter.state().outer_offset_y;
        let y = if self.is_tab_view_pinned { y.max(0.0) } else { y };
        Some(Rect { y, ..layout.tab_strip })
    }

    /// First appearance after layout.
    pub fn did_appear(&mut self) -> bool {
        self.paging.did_appear()
    }

    /// The outer list wants to scroll to `offset_y`. Returns the offset it
    /// must take.
    pub fn outer_did_scroll(&mut self, offset_y: f32) -> f32 {
        self.arbiter.outer_did_scroll(offset_y)
    }

    /// An inner list started a drag. Ignored while a horizontal page
    /// transition is in flight. Returns whether `list` became the active
    /// inner list.
    pub fn inner_will_begin_dragging(&mut self, list: &ListHandle) -> bool {
        if !self.paging.coordinator().is_settled() {
            debug!("ignoring inner list drag during page transition");
            return false;
        }
        self.arbiter.inner_will_begin_dragging(list);
        true
    }

    /// An inner list scrolled. Returns the offset the outer list must be
    /// reset to, if any.
    pub fn inner_did_scroll(&mut self, list: &ListHandle) -> Option<f32> {
        self.arbiter.inner_did_scroll(list)
    }

    /// Whether an inner list's pan may run together with `other`.
    pub fn should_recognize_simultaneously(&self, other: GestureSource) -> bool {
        self.arbiter.should_recognize_simultaneously(other)
    }

    /// The inner list of the selected page, if it hosts one.
    pub fn selected_inner_list(&self) -> Option<ListHandle> {
        self.paging
            .pages()
            .get(self.paging.selected_index())
            .and_then(|page| page.inner_list())
    }
}
