//! Vertical scroll ownership for the collapsing-header variant.
//!
//! Two vertical surfaces compete for the same drag: the outer list that
//! carries the header, and the list inside the current page. A single gate,
//! [`HeaderScrollState::is_outer_scroll_enabled`], decides which one moves.
//!
//! While the gate is open the outer list scrolls and inner lists are parked
//! at their top. Once the outer offset reaches the collapse threshold the
//! gate closes: the outer list is pinned at the threshold and the active
//! inner list scrolls freely. Scrolling that inner list back to its top
//! reopens the gate.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tracing::{debug, trace};

/// Scroll position of an inner list.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InnerListState {
    /// Vertical content offset; `0` is the top.
    pub offset_y: f32,
}

/// Shared handle to an inner list's scroll state.
///
/// The page owns the list; the arbiter only keeps a weak reference to the
/// list that was dragged last.
#[derive(Clone, Debug, Default)]
pub struct ListHandle {
    inner: Arc<RwLock<InnerListState>>,
}

impl ListHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<R>(&self, f: impl FnOnce(&InnerListState) -> R) -> R {
        f(&self.inner.read())
    }

    pub fn with_mut<R>(&self, f: impl FnOnce(&mut InnerListState) -> R) -> R {
        f(&mut self.inner.write())
    }

    pub fn offset_y(&self) -> f32 {
        self.with(|state| state.offset_y)
    }

    pub fn set_offset_y(&self, offset_y: f32) {
        self.with_mut(|state| state.offset_y = offset_y);
    }

    /// Whether both handles point at the same list.
    pub fn same_list(&self, other: &ListHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn downgrade(&self) -> Weak<RwLock<InnerListState>> {
        Arc::downgrade(&self.inner)
    }
}

/// Which pan gesture another recogniser belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureSource {
    /// The outer list carrying the header.
    OuterList,
    /// A vertically scrolling list inside a page.
    InnerList,
    /// The horizontal page container.
    Pager,
}

/// Observed vertical scroll state of the header variant.
#[derive(Clone, Debug)]
pub struct HeaderScrollState {
    /// Last offset reported for the outer list, after clamping.
    pub outer_offset_y: f32,
    /// The shared gate: `true` while the outer list owns vertical scrolling.
    pub is_outer_scroll_enabled: bool,
    active_inner_list: Option<Weak<RwLock<InnerListState>>>,
}

impl Default for HeaderScrollState {
    fn default() -> Self {
        Self {
            outer_offset_y: 0.0,
            is_outer_scroll_enabled: true,
            active_inner_list: None,
        }
    }
}

impl HeaderScrollState {
    /// The most recently dragged inner list, while it is still alive.
    pub fn active_inner_list(&self) -> Option<ListHandle> {
        self.active_inner_list
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|inner| ListHandle { inner })
    }
}

/// Decides which vertical surface may scroll.
#[derive(Clone, Debug)]
pub struct OuterScrollArbiter {
    collapse_threshold: f32,
    state: HeaderScrollState,
}

impl OuterScrollArbiter {
    /// Creates an arbiter that collapses the header at `collapse_threshold`.
    pub fn new(collapse_threshold: f32) -> Self {
        Self {
            collapse_threshold: collapse_threshold.max(0.0),
            state: HeaderScrollState::default(),
        }
    }

    pub fn collapse_threshold(&self) -> f32 {
        self.collapse_threshold
    }

    /// Moves the collapse point, e.g. after the header was measured again.
    pub fn set_collapse_threshold(&mut self, collapse_threshold: f32) {
        self.collapse_threshold = collapse_threshold.max(0.0);
    }

    pub fn state(&self) -> &HeaderScrollState {
        &self.state
    }

    pub fn is_outer_scroll_enabled(&self) -> bool {
        self.state.is_outer_scroll_enabled
    }

    /// Handles an offset change of the outer list and returns the offset the
    /// outer list must actually take.
    pub fn outer_did_scroll(&mut self, new_offset_y: f32) -> f32 {
        let threshold = self.collapse_threshold;
        let old_offset_y = self.state.outer_offset_y;

        if new_offset_y < threshold
            && old_offset_y < threshold
            && self.state.is_outer_scroll_enabled
        {
            if let Some(list) = self.state.active_inner_list() {
                list.set_offset_y(0.0);
            }
        } else if new_offset_y >= threshold && self.state.is_outer_scroll_enabled {
            self.state.is_outer_scroll_enabled = false;
            debug!(
                offset = new_offset_y,
                threshold, "header collapsed, inner list takes over"
            );
        }

        let reported = if self.state.is_outer_scroll_enabled {
            new_offset_y
        } else {
            threshold
        };
        trace!(requested = new_offset_y, reported, "outer list scrolled");
        self.state.outer_offset_y = reported;
        reported
    }

    /// Records `list` as the active inner list. The last dragged list wins.
    pub fn inner_will_begin_dragging(&mut self, list: &ListHandle) {
        self.state.active_inner_list = Some(list.downgrade());
    }

    /// Handles an offset change of an inner list.
    ///
    /// Returns the offset the outer list must be reset to while the header
    /// is collapsed, or `None` when the outer list is free.
    pub fn inner_did_scroll(&mut self, list: &ListHandle) -> Option<f32> {
        if self.state.is_outer_scroll_enabled {
            return None;
        }
        let correction = self.collapse_threshold;
        self.state.outer_offset_y = correction;

        let deciding_list = self
            .state
            .active_inner_list()
            .unwrap_or_else(|| list.clone());
        if deciding_list.same_list(list) && list.offset_y() <= 0.0 {
            self.state.is_outer_scroll_enabled = true;
            debug!("inner list back at top, outer list takes over");
        }
        Some(correction)
    }

    /// Whether an inner list's pan may run together with `other`.
    ///
    /// Vertical pans cooperate; the horizontal pager's pan never runs
    /// together with an inner list.
    pub fn should_recognize_simultaneously(&self, other: GestureSource) -> bool {
        !matches!(other, GestureSource::Pager)
    }
}
