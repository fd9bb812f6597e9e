//! Horizontally paging scroll surface hosting one page per screen width.
//!
//! The container turns raw gestures and animation frames into the event
//! stream its owner consumes: [`ContainerEvent::WillBeginDragging`],
//! [`ContainerEvent::DidScroll`], [`ContainerEvent::WillBeginDecelerating`]
//! and [`ContainerEvent::DidSettle`]. It comes to rest only at multiples of
//! the page width.

use std::time::Instant;

use derive_setters::Setters;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::coordinator::PageScroller;

const DEFAULT_SCROLL_SMOOTHING: f32 = 0.12;
const DEFAULT_FLING_VELOCITY: f32 = 300.0;
const SETTLE_DISTANCE: f32 = 0.5;

/// What brought the container to rest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettleCause {
    /// A released drag finished decelerating.
    Deceleration,
    /// A programmatic scroll finished its animation.
    ScrollAnimation,
    /// A page width change cut the motion short.
    Relayout,
}

/// Events emitted to the container's owner, in gesture order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContainerEvent {
    /// A drag started. `at_index` is the page under the left edge;
    /// `offset_x` the live offset at that moment.
    WillBeginDragging { at_index: usize, offset_x: f32 },
    DidScroll { offset_x: f32 },
    /// A released drag is about to coast to a page boundary.
    WillBeginDecelerating,
    /// Motion stopped at page `index`.
    DidSettle { index: usize, cause: SettleCause },
    /// Page `index` entered a display slot for the first time and needs its
    /// content attached.
    MaterializePage { index: usize },
}

pub type ContainerEvents = SmallVec<[ContainerEvent; 4]>;

/// Tuning of the container's motion.
#[derive(Clone, Debug, PartialEq, Setters)]
pub struct PageContainerArgs {
    /// Smoothing factor of snapping and programmatic animations, in
    /// `[0, 1]`. Higher is slower.
    pub scroll_smoothing: f32,
    /// Release velocity (points per second) above which a drag snaps to the
    /// neighbouring page in the fling direction.
    pub fling_velocity: f32,
    /// Extra pages materialised on either side of the visible ones.
    pub beyond_viewport_page_count: usize,
}

impl Default for PageContainerArgs {
    fn default() -> Self {
        Self {
            scroll_smoothing: DEFAULT_SCROLL_SMOOTHING,
            fling_velocity: DEFAULT_FLING_VELOCITY,
            beyond_viewport_page_count: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Motion {
    Idle,
    Dragging,
    Decelerating { target: f32 },
    Animating { target: f32 },
}

/// A reusable display slot. Page `i` is shown in slot `i % slot_count`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageSlot {
    content: Option<usize>,
}

impl PageSlot {
    /// The page currently placed in this slot.
    pub fn content(&self) -> Option<usize> {
        self.content
    }
}

/// The page container widget.
#[derive(Clone, Debug)]
pub struct PageContainer {
    args: PageContainerArgs,
    page_count: usize,
    page_width: f32,
    offset_x: f32,
    motion: Motion,
    slots: Vec<PageSlot>,
    last_frame_time: Option<Instant>,
    pending_events: ContainerEvents,
}

impl PageContainer {
    pub fn new(page_count: usize, page_width: f32, args: PageContainerArgs) -> Self {
        let slots = vec![PageSlot::default(); slot_count(page_count, &args)];
        Self {
            args,
            page_count,
            page_width: page_width.max(0.0),
            offset_x: 0.0,
            motion: Motion::Idle,
            slots,
            last_frame_time: None,
            pending_events: ContainerEvents::new(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn page_width(&self) -> f32 {
        self.page_width
    }

    pub fn offset_x(&self) -> f32 {
        self.offset_x
    }

    /// The slot page `index` is displayed in.
    pub fn slot_for_page(&self, index: usize) -> Option<&PageSlot> {
        if index >= self.page_count {
            return None;
        }
        self.slots.get(index % self.slots.len())
    }

    /// Page nearest to the current offset.
    pub fn current_page(&self) -> usize {
        self.page_at_offset(self.offset_x)
    }

    pub fn is_dragging(&self) -> bool {
        self.motion == Motion::Dragging
    }

    /// Whether a deceleration or programmatic animation is running.
    pub fn is_animating(&self) -> bool {
        matches!(
            self.motion,
            Motion::Decelerating { .. } | Motion::Animating { .. }
        )
    }

    /// Changes the page width, keeping the current page in view.
    ///
    /// Running motion ends at once: an animation or deceleration jumps to
    /// its destination page, a drag to the nearest page, and the container
    /// reports [`SettleCause::Relayout`].
    pub fn set_page_width(&mut self, page_width: f32) -> ContainerEvents {
        let interrupted = match self.motion {
            Motion::Idle => None,
            Motion::Dragging => Some(self.current_page()),
            Motion::Decelerating { target } | Motion::Animating { target } => {
                Some(self.page_at_offset(target))
            }
        };
        let page = interrupted.unwrap_or_else(|| self.current_page());
        self.page_width = page_width.max(0.0);
        self.offset_x = self.offset_for_page(page);
        self.motion = Motion::Idle;

        let mut events = self.materialize_visible();
        if let Some(index) = interrupted {
            // Queued frames describe the old geometry.
            self.pending_events.clear();
            debug!(index, "relayout interrupted page motion");
            events.push(ContainerEvent::DidSettle {
                index,
                cause: SettleCause::Relayout,
            });
        }
        events
    }

    /// Places every page currently in view into its display slot. A page
    /// is requested again whenever its slot holds another page.
    pub fn materialize_visible(&mut self) -> ContainerEvents {
        let mut events = ContainerEvents::new();
        if self.page_count == 0 || self.page_width <= f32::EPSILON {
            return events;
        }
        let first = (self.offset_x / self.page_width).floor();
        let last = (self.offset_x / self.page_width).ceil();
        let beyond = self.args.beyond_viewport_page_count as f32;
        let start = self.clamp_page(first - beyond);
        let end = self.clamp_page(last + beyond);
        let slot_count = self.slots.len();
        for index in start..=end {
            let slot = &mut self.slots[index % slot_count];
            if slot.content == Some(index) {
                continue;
            }
            slot.content = Some(index);
            events.push(ContainerEvent::MaterializePage { index });
        }
        events
    }

    /// Starts a drag, interrupting any running animation.
    pub fn begin_drag(&mut self) -> ContainerEvents {
        let at_index = if self.page_width <= f32::EPSILON {
            0
        } else {
            self.clamp_page((self.offset_x / self.page_width).floor())
        };
        if self.is_animating() {
            debug!(offset = self.offset_x, "drag interrupts page animation");
        }
        self.motion = Motion::Dragging;
        let mut events = ContainerEvents::new();
        events.push(ContainerEvent::WillBeginDragging {
            at_index,
            offset_x: self.offset_x,
        });
        events
    }

    /// Moves the content by `delta` points during a drag. Positive values
    /// move toward later pages.
    pub fn drag_by(&mut self, delta: f32) -> ContainerEvents {
        if self.motion != Motion::Dragging {
            return ContainerEvents::new();
        }
        self.scroll_to_offset(self.offset_x + delta)
    }

    /// Releases the drag with a horizontal `velocity` in points per second
    /// (positive toward later pages).
    pub fn end_drag(&mut self, velocity: f32) -> ContainerEvents {
        let mut events = ContainerEvents::new();
        if self.motion != Motion::Dragging {
            return events;
        }
        if self.page_width <= f32::EPSILON {
            self.motion = Motion::Idle;
            return events;
        }
        let page_float = self.offset_x / self.page_width;
        let target_page = if velocity > self.args.fling_velocity {
            page_float.ceil()
        } else if velocity < -self.args.fling_velocity {
            page_float.floor()
        } else {
            page_float.round()
        };
        let target = self.offset_for_page(self.clamp_page(target_page));

        if (target - self.offset_x).abs() < SETTLE_DISTANCE {
            self.offset_x = target;
            self.motion = Motion::Idle;
            events.push(ContainerEvent::DidSettle {
                index: self.current_page(),
                cause: SettleCause::Deceleration,
            });
            return events;
        }

        self.motion = Motion::Decelerating { target };
        self.last_frame_time = None;
        events.push(ContainerEvent::WillBeginDecelerating);
        events
    }

    /// Advances decelerations and programmatic animations by one frame.
    pub fn tick(&mut self, now: Instant) -> ContainerEvents {
        let mut events = std::mem::take(&mut self.pending_events);
        let (target, cause) = match self.motion {
            Motion::Decelerating { target } => (target, SettleCause::Deceleration),
            Motion::Animating { target } => (target, SettleCause::ScrollAnimation),
            Motion::Idle | Motion::Dragging => {
                self.last_frame_time = Some(now);
                return events;
            }
        };

        let delta_time = match self.last_frame_time {
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => 1.0 / 60.0,
        };
        self.last_frame_time = Some(now);

        let diff = target - self.offset_x;
        let next = if diff.abs() < SETTLE_DISTANCE {
            target
        } else {
            let smoothing = self.args.scroll_smoothing.clamp(0.0, 1.0);
            let movement = ((1.0 - smoothing) * delta_time * 60.0).min(1.0);
            let next = self.offset_x + diff * movement;
            if (target - next).abs() < SETTLE_DISTANCE {
                target
            } else {
                next
            }
        };
        events.extend(self.scroll_to_offset(next));

        if self.offset_x == target {
            self.motion = Motion::Idle;
            let index = self.current_page();
            debug!(index, ?cause, "page container settled");
            events.push(ContainerEvent::DidSettle { index, cause });
        }
        events
    }

    fn scroll_to_offset(&mut self, offset: f32) -> ContainerEvents {
        let offset = self.clamp_offset(offset);
        if offset == self.offset_x {
            return ContainerEvents::new();
        }
        self.offset_x = offset;
        trace!(offset, "page container scrolled");
        let mut events = ContainerEvents::new();
        events.push(ContainerEvent::DidScroll { offset_x: offset });
        events.extend(self.materialize_visible());
        events
    }

    fn page_at_offset(&self, offset: f32) -> usize {
        if self.page_width <= f32::EPSILON {
            return 0;
        }
        self.clamp_page((offset / self.page_width).round())
    }

    fn clamp_page(&self, page: f32) -> usize {
        if self.page_count == 0 || !page.is_finite() {
            return 0;
        }
        page.clamp(0.0, (self.page_count - 1) as f32) as usize
    }

    fn offset_for_page(&self, page: usize) -> f32 {
        page as f32 * self.page_width
    }

    fn clamp_offset(&self, offset: f32) -> f32 {
        if self.page_count <= 1 {
            return 0.0;
        }
        offset.clamp(0.0, self.offset_for_page(self.page_count - 1))
    }
}

/// Slots needed to show every page in view: two neighbours while between
/// pages, plus the extra pages on either side.
fn slot_count(page_count: usize, args: &PageContainerArgs) -> usize {
    (2 + 2 * args.beyond_viewport_page_count).clamp(1, page_count.max(1))
}

impl PageScroller for PageContainer {
    fn programmatic_select(&mut self, index: usize) {
        if index >= self.page_count {
            debug!(index, count = self.page_count, "ignoring selection of missing page");
            return;
        }
        let target = self.offset_for_page(index);
        if self.motion == Motion::Idle && self.offset_x == target {
            // Already there; the next frame reports arrival.
            self.pending_events.push(ContainerEvent::DidSettle {
                index,
                cause: SettleCause::ScrollAnimation,
            });
            return;
        }
        if self.motion == Motion::Dragging {
            // The finger is lifted by the programmatic scroll.
            self.pending_events.push(ContainerEvent::WillBeginDecelerating);
        }
        // The first animation frame reports where the animation starts.
        self.pending_events.push(ContainerEvent::DidScroll {
            offset_x: self.offset_x,
        });
        debug!(index, from = self.offset_x, "animating to page");
        self.motion = Motion::Animating { target };
        self.last_frame_time = None;
    }
}
