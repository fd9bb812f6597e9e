//! The paging state machine.
//!
//! [`PagingCoordinator`] consumes page container events and tab taps, turns
//! the horizontal offset into a `(from, to, progress)` triple, forwards
//! visual updates to the tab strip and sequences the page appearance
//! lifecycle.
//!
//! A transition runs `begin drag -> scroll* -> decelerate -> settle` for a
//! drag, or `tap -> scroll* -> settle` for a tab tap. The mid-transition
//! lifecycle (outgoing page `begin(false)`, incoming page `begin(true)`)
//! fires once per transition: on deceleration for drags, once progress
//! passes one half for taps. Settle commits it with `end` calls.

use tracing::{debug, trace, warn};

use crate::{error::PagingError, lifecycle::PageSet, page_container::ContainerEvent};

/// Visual updates the coordinator drives on the tab strip.
pub trait TabStripSink {
    /// Places the indicator under cell `index` without animation. Returns
    /// `false` when the cell has no geometry yet.
    fn set_initial_selection(&mut self, index: usize) -> bool;

    /// Blends the styling of cell `from` (selected at `0`) and cell `to`
    /// (selected at `1`).
    fn update_cells(&mut self, from: usize, to: usize, progress: f32);

    /// Blends the indicator between cell `from` and cell `to`.
    fn update_indicator(&mut self, from: usize, to: usize, progress: f32);
}

/// Programmatic scrolling of the page container.
pub trait PageScroller {
    /// Scrolls to page `index` with animation. Out-of-range indices are
    /// ignored.
    fn programmatic_select(&mut self, index: usize);
}

/// Whether a horizontal transition is in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransitionPhase {
    Settled,
    /// `from_index` and `start_offset_x` are always recorded together.
    Transitioning {
        from_index: usize,
        start_offset_x: f32,
    },
}

/// Transition bookkeeping, owned by the coordinator.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionState {
    /// The settled, authoritative page.
    pub selected_index: usize,
    pub phase: TransitionPhase,
    /// Best estimate of the destination; meaningful while transitioning.
    pub target_index: usize,
    /// Set when a tab tap started the transition.
    pub tap_index: Option<usize>,
    pub has_fired_mid_transition_lifecycle: bool,
}

impl Default for TransitionState {
    fn default() -> Self {
        Self {
            selected_index: 0,
            phase: TransitionPhase::Settled,
            target_index: 0,
            tap_index: None,
            has_fired_mid_transition_lifecycle: false,
        }
    }
}

impl TransitionState {
    pub fn is_settled(&self) -> bool {
        self.phase == TransitionPhase::Settled
    }

    pub fn from_index(&self) -> Option<usize> {
        match self.phase {
            TransitionPhase::Transitioning { from_index, .. } => Some(from_index),
            TransitionPhase::Settled => None,
        }
    }

    pub fn start_offset_x(&self) -> Option<f32> {
        match self.phase {
            TransitionPhase::Transitioning { start_offset_x, .. } => Some(start_offset_x),
            TransitionPhase::Settled => None,
        }
    }

    fn reset(&mut self) {
        self.phase = TransitionPhase::Settled;
        self.target_index = self.selected_index;
        self.tap_index = None;
        self.has_fired_mid_transition_lifecycle = false;
    }
}

/// Coordinates the tab strip, the page container and the hosted pages.
#[derive(Debug)]
pub struct PagingCoordinator {
    pages: PageSet,
    page_width: f32,
    state: TransitionState,
    has_appeared: bool,
}

impl PagingCoordinator {
    /// Creates a coordinator for `pages`, each `page_width` points wide.
    pub fn new(pages: PageSet, page_width: f32) -> Result<Self, PagingError> {
        validate_page_width(page_width)?;
        Ok(Self {
            pages,
            page_width,
            state: TransitionState::default(),
            has_appeared: false,
        })
    }

    pub fn pages(&self) -> &PageSet {
        &self.pages
    }

    pub fn state(&self) -> &TransitionState {
        &self.state
    }

    pub fn selected_index(&self) -> usize {
        self.state.selected_index
    }

    pub fn is_settled(&self) -> bool {
        self.state.is_settled()
    }

    pub fn page_width(&self) -> f32 {
        self.page_width
    }

    /// Changes the page width. A running transition keeps its origin page
    /// and measures progress in the new width.
    pub fn set_page_width(&mut self, page_width: f32) -> Result<(), PagingError> {
        validate_page_width(page_width)?;
        self.page_width = page_width;
        if let TransitionPhase::Transitioning { from_index, .. } = self.state.phase {
            self.state.phase = TransitionPhase::Transitioning {
                from_index,
                start_offset_x: from_index as f32 * page_width,
            };
        }
        Ok(())
    }

    /// First appearance after layout: positions the indicator, styles the
    /// selected cell and runs a full appearance on the selected page.
    ///
    /// Returns `false`, without side effects, if the strip is not laid out
    /// yet or the view already appeared.
    pub fn did_appear(&mut self, strip: &mut impl TabStripSink) -> bool {
        if self.has_appeared {
            return false;
        }
        let selected = self.state.selected_index;
        if !strip.set_initial_selection(selected) {
            return false;
        }
        strip.update_cells(selected, selected, 1.0);
        self.pages.begin(selected, true);
        self.pages.end(selected);
        self.has_appeared = true;
        debug!(selected, "paging view appeared");
        true
    }

    /// A tab was tapped.
    pub fn did_select_item(&mut self, index: usize, scroller: &mut impl PageScroller) {
        if index == self.state.selected_index {
            return;
        }
        if !self.pages.contains(index) {
            warn!(index, count = self.pages.len(), "ignoring tap on missing tab");
            return;
        }
        debug!(from = self.state.selected_index, to = index, "tab tapped");
        self.state.tap_index = Some(index);
        scroller.programmatic_select(index);
    }

    /// Routes one page container event.
    pub fn handle_container_event(
        &mut self,
        event: ContainerEvent,
        strip: &mut impl TabStripSink,
    ) {
        match event {
            ContainerEvent::WillBeginDragging { at_index, offset_x } => {
                self.will_begin_dragging(at_index, offset_x)
            }
            ContainerEvent::DidScroll { offset_x } => self.did_scroll(offset_x, strip),
            ContainerEvent::WillBeginDecelerating => self.will_begin_decelerating(),
            ContainerEvent::DidSettle { index, .. } => self.did_settle(index, strip),
            ContainerEvent::MaterializePage { index } => {
                self.materialize_page(index);
            }
        }
    }

    /// A drag started at page `at_index` with the container at `offset_x`.
    pub fn will_begin_dragging(&mut self, at_index: usize, offset_x: f32) {
        let from_index = if self.state.is_settled() {
            self.clamp_index(at_index as f32)
        } else {
            // The previous transition has not settled yet; trust the live
            // offset over the recorded origin.
            self.index_at_offset(offset_x)
        };
        // Only user drags report a drag start, so this is no longer a tap.
        self.state.tap_index = None;
        self.state.phase = TransitionPhase::Transitioning {
            from_index,
            start_offset_x: from_index as f32 * self.page_width,
        };
        debug!(from_index, offset_x, "page transition started");
    }

    /// The container scrolled to `offset_x`.
    pub fn did_scroll(&mut self, offset_x: f32, strip: &mut impl TabStripSink) {
        let TransitionPhase::Transitioning {
            from_index,
            start_offset_x,
        } = self.state.phase
        else {
            // A programmatic scroll reports motion without a drag start.
            let from_index = self.index_at_offset(offset_x);
            self.state.phase = TransitionPhase::Transitioning {
                from_index,
                start_offset_x: from_index as f32 * self.page_width,
            };
            debug!(from_index, offset_x, "page transition started by scroll");
            return;
        };

        let last = self.pages.len() - 1;
        let width = self.page_width;
        let travelled = offset_x - from_index as f32 * width;
        let (mut target_index, mut progress) = if offset_x > start_offset_x {
            ((from_index + 1).min(last), travelled / width)
        } else {
            (from_index.saturating_sub(1), -travelled / width)
        };

        if let Some(tap_index) = self.state.tap_index {
            target_index = tap_index;
            let spacing = (tap_index as f32 - from_index as f32) * width;
            progress = if spacing == 0.0 {
                0.0
            } else {
                travelled / spacing
            };
            self.state.target_index = target_index;
            if progress > 0.5 && !self.state.has_fired_mid_transition_lifecycle {
                self.fire_mid_transition_lifecycle();
            }
        } else {
            self.state.target_index = target_index;
            strip.update_cells(from_index, target_index, progress);
        }
        trace!(from_index, target_index, progress, "page transition progress");
        strip.update_indicator(from_index, target_index, progress);
    }

    /// A released drag started decelerating.
    pub fn will_begin_decelerating(&mut self) {
        if self.state.is_settled() || self.state.has_fired_mid_transition_lifecycle {
            return;
        }
        self.fire_mid_transition_lifecycle();
    }

    /// The container came to rest at page `to_index`.
    pub fn did_settle(&mut self, to_index: usize, strip: &mut impl TabStripSink) {
        let selected = self.state.selected_index;
        strip.update_cells(selected, to_index, 1.0);
        strip.update_indicator(selected, to_index, 1.0);

        if !self.pages.contains(to_index) {
            warn!(to_index, "settled on a missing page");
            self.roll_back_pending(&[]);
            self.state.reset();
            return;
        }

        if to_index == selected {
            self.roll_back_pending(&[]);
            self.state.reset();
            debug!(selected, "page transition returned to its origin");
            return;
        }

        self.pages.commit(selected, false);
        self.pages.commit(to_index, true);
        self.roll_back_pending(&[selected, to_index]);
        self.state.selected_index = to_index;
        self.state.reset();
        debug!(from = selected, to = to_index, "page transition settled");
    }

    /// Attaches the content of page `index` on its first materialisation.
    pub fn materialize_page(&mut self, index: usize) -> bool {
        self.pages.attach(index)
    }

    fn fire_mid_transition_lifecycle(&mut self) {
        let Some(from_index) = self.state.from_index() else {
            return;
        };
        let target_index = self.state.target_index;
        if from_index == target_index || !self.pages.contains(target_index) {
            return;
        }
        self.pages.begin(from_index, false);
        self.pages.begin(target_index, true);
        self.state.has_fired_mid_transition_lifecycle = true;
        debug!(from_index, target_index, "page appearance transition began");
    }

    /// Reverts begun transitions on every page not in `keep`.
    fn roll_back_pending(&mut self, keep: &[usize]) {
        let stale: Vec<usize> = self
            .pages
            .pending()
            .filter(|index| !keep.contains(index))
            .collect();
        for index in stale {
            self.pages.roll_back(index);
        }
    }

    fn index_at_offset(&self, offset_x: f32) -> usize {
        self.clamp_index((offset_x / self.page_width).round())
    }

    fn clamp_index(&self, index: f32) -> usize {
        if !index.is_finite() {
            return 0;
        }
        index.clamp(0.0, (self.pages.len() - 1) as f32) as usize
    }
}

fn validate_page_width(page_width: f32) -> Result<(), PagingError> {
    if page_width.is_finite() && page_width > 0.0 {
        Ok(())
    } else {
        Err(PagingError::InvalidPageWidth(page_width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::{
        PageVisibility,
        testing::{CallLog, LifecycleCall::*, recording_pages},
    };

    const W: f32 = 400.0;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum StripCall {
        Initial(usize),
        Cells(usize, usize, f32),
        Indicator(usize, usize, f32),
    }

    #[derive(Default)]
    struct RecordingStrip {
        calls: Vec<StripCall>,
        laid_out: bool,
    }

    impl TabStripSink for RecordingStrip {
        fn set_initial_selection(&mut self, index: usize) -> bool {
            if self.laid_out {
                self.calls.push(StripCall::Initial(index));
            }
            self.laid_out
        }

        fn update_cells(&mut self, from: usize, to: usize, progress: f32) {
            self.calls.push(StripCall::Cells(from, to, progress));
        }

        fn update_indicator(&mut self, from: usize, to: usize, progress: f32) {
            self.calls.push(StripCall::Indicator(from, to, progress));
        }
    }

    impl RecordingStrip {
        fn indicator_progress(&self) -> Vec<f32> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    StripCall::Indicator(_, _, p) => Some(*p),
                    _ => None,
                })
                .collect()
        }

        fn cell_updates(&self) -> usize {
            self.calls
                .iter()
                .filter(|call| matches!(call, StripCall::Cells(..)))
                .count()
        }
    }

    #[derive(Default)]
    struct RecordingScroller(Vec<usize>);

    impl PageScroller for RecordingScroller {
        fn programmatic_select(&mut self, index: usize) {
            self.0.push(index);
        }
    }

    fn coordinator(count: usize) -> (PagingCoordinator, CallLog) {
        let (pages, log) = recording_pages(count);
        (PagingCoordinator::new(pages, W).expect("valid coordinator"), log)
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn rejects_invalid_page_width() {
        let (pages, _) = recording_pages(1);
        assert!(matches!(
            PagingCoordinator::new(pages, 0.0),
            Err(PagingError::InvalidPageWidth(width)) if width == 0.0
        ));
    }

    #[test]
    fn page_width_change_rebases_running_transition() {
        let (mut coordinator, _) = coordinator(3);
        let mut strip = RecordingStrip::default();
        coordinator.will_begin_dragging(1, W);
        coordinator.set_page_width(2.0 * W).expect("valid width");
        assert_eq!(coordinator.state().from_index(), Some(1));
        assert_eq!(coordinator.state().start_offset_x(), Some(2.0 * W));

        coordinator.did_scroll(3.0 * W, &mut strip);
        assert_eq!(strip.calls.last(), Some(&StripCall::Indicator(1, 2, 0.5)));
        assert!(coordinator.set_page_width(f32::NAN).is_err());
        assert_eq!(coordinator.page_width(), 2.0 * W);
    }

    #[test]
    fn appearance_waits_for_layout_and_runs_once() {
        let (mut coordinator, log) = coordinator(3);
        let mut strip = RecordingStrip::default();
        assert!(!coordinator.did_appear(&mut strip));
        assert!(log.snapshot().is_empty());

        strip.laid_out = true;
        assert!(coordinator.did_appear(&mut strip));
        assert!(!coordinator.did_appear(&mut strip));
        assert_eq!(
            strip.calls,
            vec![StripCall::Initial(0), StripCall::Cells(0, 0, 1.0)]
        );
        assert_eq!(
            log.take(),
            vec![
                Begin {
                    page: 0,
                    appearing: true
                },
                End { page: 0 }
            ]
        );
    }

    #[test]
    fn drag_to_next_page() {
        let (mut coordinator, log) = coordinator(3);
        let mut strip = RecordingStrip::default();

        coordinator.will_begin_dragging(0, 0.0);
        assert!(!coordinator.is_settled());
        assert_eq!(coordinator.state().start_offset_x(), Some(0.0));

        coordinator.did_scroll(0.0, &mut strip);
        coordinator.did_scroll(0.5 * W, &mut strip);
        coordinator.will_begin_decelerating();
        coordinator.did_scroll(W, &mut strip);
        assert_eq!(coordinator.state().target_index, 1);

        let progress = strip.indicator_progress();
        assert!(approx(progress[1], 0.5));
        assert!(approx(progress[2], 1.0));
        assert!(strip.calls.iter().all(|call| match call {
            StripCall::Cells(from, to, _) | StripCall::Indicator(from, to, _) =>
                (*from, *to) == (0, 1) || (*from, *to) == (0, 0),
            StripCall::Initial(_) => false,
        }));

        assert_eq!(
            log.take(),
            vec![
                Begin {
                    page: 0,
                    appearing: false
                },
                Begin {
                    page: 1,
                    appearing: true
                }
            ]
        );

        coordinator.did_settle(1, &mut strip);
        assert_eq!(log.take(), vec![End { page: 0 }, End { page: 1 }]);
        assert_eq!(coordinator.selected_index(), 1);
        assert!(coordinator.is_settled());
        assert_eq!(coordinator.state().from_index(), None);
        assert_eq!(coordinator.state().tap_index, None);
        assert!(!coordinator.state().has_fired_mid_transition_lifecycle);
        assert!(strip.calls.contains(&StripCall::Cells(0, 1, 1.0)));
        assert!(strip.calls.contains(&StripCall::Indicator(0, 1, 1.0)));
    }

    #[test]
    fn drag_backwards_targets_previous_page() {
        let (mut coordinator, _) = coordinator(3);
        let mut strip = RecordingStrip::default();
        coordinator.will_begin_dragging(2, 2.0 * W);
        coordinator.did_scroll(1.75 * W, &mut strip);
        assert_eq!(coordinator.state().target_index, 1);
        assert_eq!(
            strip.calls.last(),
            Some(&StripCall::Indicator(2, 1, 0.25))
        );
    }

    #[test]
    fn tap_two_tabs_away() {
        let (mut coordinator, log) = coordinator(4);
        let mut strip = RecordingStrip::default();
        let mut scroller = RecordingScroller::default();

        coordinator.did_select_item(2, &mut scroller);
        assert_eq!(scroller.0, vec![2]);
        assert_eq!(coordinator.state().tap_index, Some(2));

        // First frame of the animation reports the start offset.
        coordinator.did_scroll(0.0, &mut strip);
        assert_eq!(coordinator.state().from_index(), Some(0));
        assert!(strip.calls.is_empty());

        coordinator.did_scroll(0.5 * W, &mut strip);
        assert!(log.snapshot().is_empty());
        coordinator.did_scroll(1.2 * W, &mut strip);
        assert_eq!(log.snapshot().len(), 2, "lifecycle fires once past half way");
        coordinator.did_scroll(1.6 * W, &mut strip);
        coordinator.did_scroll(2.0 * W, &mut strip);

        let progress = strip.indicator_progress();
        assert!(approx(progress[0], 0.25));
        assert!(approx(progress[1], 0.6));
        assert!(approx(progress[3], 1.0));
        assert_eq!(strip.cell_updates(), 0, "tap path skips colour blending");
        assert_eq!(coordinator.state().target_index, 2);

        coordinator.did_settle(2, &mut strip);
        assert_eq!(strip.cell_updates(), 1);
        assert!(strip.calls.contains(&StripCall::Cells(0, 2, 1.0)));
        assert_eq!(
            log.take(),
            vec![
                Begin {
                    page: 0,
                    appearing: false
                },
                Begin {
                    page: 2,
                    appearing: true
                },
                End { page: 0 },
                End { page: 2 }
            ]
        );
        assert_eq!(coordinator.selected_index(), 2);
    }

    #[test]
    fn tapping_selected_tab_does_nothing() {
        let (mut coordinator, log) = coordinator(3);
        let mut scroller = RecordingScroller::default();
        coordinator.did_select_item(0, &mut scroller);
        coordinator.did_select_item(7, &mut scroller);
        assert!(scroller.0.is_empty());
        assert!(log.snapshot().is_empty());
        assert_eq!(coordinator.state(), &TransitionState::default());
    }

    #[test]
    fn rapid_redrag_resynthesizes_origin_from_offset() {
        let (mut coordinator, log) = coordinator(3);
        let mut strip = RecordingStrip::default();
        coordinator.will_begin_dragging(0, 0.0);
        coordinator.did_scroll(0.7 * W, &mut strip);
        coordinator.will_begin_decelerating();

        coordinator.will_begin_dragging(0, 1.4 * W);
        assert_eq!(coordinator.state().from_index(), Some(1));
        assert_eq!(coordinator.state().start_offset_x(), Some(W));

        coordinator.did_scroll(1.8 * W, &mut strip);
        assert_eq!(coordinator.state().target_index, 2);
        coordinator.did_settle(2, &mut strip);

        assert_eq!(coordinator.selected_index(), 2);
        // Page 1 began appearing but never committed, so it is rolled back.
        let pages = coordinator.pages();
        assert_eq!(pages.get(0).map(|p| p.visibility()), Some(PageVisibility::Hidden));
        assert_eq!(pages.get(1).map(|p| p.visibility()), Some(PageVisibility::Hidden));
        assert_eq!(pages.get(2).map(|p| p.visibility()), Some(PageVisibility::Visible));
        assert_pairs(&log.take());
    }

    #[test]
    fn settle_on_origin_fires_no_end_calls() {
        let (mut coordinator, log) = coordinator(3);
        let mut strip = RecordingStrip::default();
        coordinator.will_begin_dragging(0, 0.0);
        coordinator.did_scroll(0.2 * W, &mut strip);
        coordinator.did_settle(0, &mut strip);
        assert!(log.snapshot().is_empty());
        assert!(coordinator.is_settled());
        assert_eq!(coordinator.selected_index(), 0);
        assert!(strip.calls.contains(&StripCall::Cells(0, 0, 1.0)));
    }

    #[test]
    fn bounce_back_after_deceleration_rolls_back_begun_pages() {
        let (mut coordinator, log) = coordinator(3);
        let mut strip = RecordingStrip::default();
        coordinator.will_begin_dragging(0, 0.0);
        coordinator.did_scroll(0.3 * W, &mut strip);
        coordinator.will_begin_decelerating();
        coordinator.did_settle(0, &mut strip);

        assert!(coordinator.pages().pending().next().is_none());
        assert_pairs(&log.take());
        assert_eq!(coordinator.selected_index(), 0);
    }

    #[test]
    fn settle_without_deceleration_still_pairs_calls() {
        let (mut coordinator, log) = coordinator(2);
        let mut strip = RecordingStrip::default();
        coordinator.will_begin_dragging(0, 0.0);
        coordinator.did_scroll(W, &mut strip);
        coordinator.did_settle(1, &mut strip);
        let calls = log.take();
        assert_eq!(calls.len(), 4);
        assert_pairs(&calls);
    }

    #[test]
    fn settle_on_missing_page_is_ignored() {
        let (mut coordinator, log) = coordinator(2);
        let mut strip = RecordingStrip::default();
        coordinator.will_begin_dragging(0, 0.0);
        coordinator.did_settle(5, &mut strip);
        assert_eq!(coordinator.selected_index(), 0);
        assert!(coordinator.is_settled());
        assert!(log.snapshot().is_empty());
    }

    #[test]
    fn target_index_stays_in_range() {
        for count in 1..=5usize {
            for from in 0..count {
                for step in -4..=((count as i32 + 1) * 4) {
                    let (mut coordinator, _) = coordinator(count);
                    let mut strip = RecordingStrip::default();
                    coordinator.will_begin_dragging(from, from as f32 * W);
                    coordinator.did_scroll(step as f32 * W / 4.0, &mut strip);
                    assert!(
                        coordinator.state().target_index < count,
                        "count {count}, from {from}, step {step}"
                    );
                }
            }
        }
    }

    #[test]
    fn tap_progress_is_monotonic_in_both_directions() {
        for (from, to) in [(0usize, 3usize), (3, 0), (1, 2), (4, 1)] {
            let (mut coordinator, _) = coordinator(5);
            let mut strip = RecordingStrip::default();
            let mut scroller = RecordingScroller::default();
            if from != 0 {
                coordinator.will_begin_dragging(from, from as f32 * W);
                coordinator.did_scroll(from as f32 * W, &mut strip);
                coordinator.did_settle(from, &mut strip);
                strip.calls.clear();
            }

            coordinator.did_select_item(to, &mut scroller);
            let start = from as f32 * W;
            let end = to as f32 * W;
            for step in 0..=20 {
                let offset = start + (end - start) * step as f32 / 20.0;
                coordinator.did_scroll(offset, &mut strip);
            }
            let progress = strip.indicator_progress();
            assert!(approx(progress[0], 1.0 / 20.0));
            assert!(progress.windows(2).all(|pair| pair[0] < pair[1]));
            assert!(approx(*progress.last().expect("progress"), 1.0));
        }
    }

    #[test]
    fn tap_during_drag_targets_tapped_page() {
        let (mut coordinator, _) = coordinator(4);
        let mut strip = RecordingStrip::default();
        let mut scroller = RecordingScroller::default();
        coordinator.will_begin_dragging(0, 0.0);
        coordinator.did_scroll(0.1 * W, &mut strip);
        coordinator.did_select_item(3, &mut scroller);
        coordinator.did_scroll(1.5 * W, &mut strip);
        assert_eq!(coordinator.state().target_index, 3);
        assert_eq!(strip.calls.last(), Some(&StripCall::Indicator(0, 3, 0.5)));
    }

    #[test]
    fn materialization_is_forwarded_once() {
        let (mut coordinator, log) = coordinator(2);
        let mut strip = RecordingStrip::default();
        let event = ContainerEvent::MaterializePage { index: 1 };
        coordinator.handle_container_event(event, &mut strip);
        coordinator.handle_container_event(event, &mut strip);
        assert_eq!(log.take(), vec![Attach { page: 1 }]);
        assert!(coordinator.pages().get(1).is_some_and(|p| p.is_attached()));
    }

    /// Every page sees begin/end strictly alternating, starting with begin.
    fn assert_pairs(calls: &[crate::lifecycle::testing::LifecycleCall]) {
        let mut open = std::collections::HashMap::new();
        for call in calls {
            match call {
                Begin { page, .. } => {
                    assert!(open.insert(*page, true).is_none(), "double begin on {page}");
                }
                End { page } => {
                    assert!(open.remove(page).is_some(), "end without begin on {page}");
                }
                Attach { .. } => {}
            }
        }
        assert!(open.is_empty(), "unfinished transitions: {open:?}");
    }
}
