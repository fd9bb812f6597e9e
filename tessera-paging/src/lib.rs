//! Paging tab view for tessera.
//!
//! A horizontally swipeable pager kept in sync with a strip of tabs. Dragging
//! the pages moves the tab indicator and blends the tab styling; tapping a
//! tab scrolls the pages. Hosted pages receive paired appearance callbacks
//! as they come and go. [`HeaderPagingView`] adds a collapsing header above
//! the tabs and shares vertical scrolling between an outer list and the
//! lists inside the pages.
//!
//! # Example
//!
//! ```
//! use tessera_paging::{Page, PageLifecycle, PageSet, PagingView, PagingViewArgs, Rect};
//!
//! struct Feed;
//!
//! impl PageLifecycle for Feed {
//!     fn begin_appearance_transition(&mut self, _is_appearing: bool) {}
//!     fn end_appearance_transition(&mut self) {}
//! }
//!
//! let pages = PageSet::new(vec![Page::new("Home", Feed), Page::new("News", Feed)])?;
//! let mut view = PagingView::new(pages, PagingViewArgs::default())?;
//! view.layout_in(Rect::new(0.0, 0.0, 390.0, 844.0));
//! view.did_appear();
//!
//! view.tap_tab(1);
//! assert!(view.is_animating());
//! # Ok::<(), tessera_paging::PagingError>(())
//! ```
#![deny(clippy::unwrap_used)]

pub mod arbiter;
pub mod color;
pub mod coordinator;
pub mod error;
pub mod geometry;
pub mod header_paging_view;
pub mod interpolate;
pub mod lifecycle;
pub mod page_container;
pub mod paging_view;
pub mod style;
pub mod tab_strip;

pub use arbiter::{GestureSource, HeaderScrollState, ListHandle, OuterScrollArbiter};
pub use color::Color;
pub use coordinator::{PageScroller, PagingCoordinator, TabStripSink, TransitionState};
pub use error::PagingError;
pub use geometry::Rect;
pub use header_paging_view::{HeaderPagingArgs, HeaderPagingView};
pub use lifecycle::{Page, PageLifecycle, PageSet, PageVisibility};
pub use page_container::{ContainerEvent, PageContainer, PageContainerArgs, SettleCause};
pub use paging_view::{PagingView, PagingViewArgs};
pub use style::{FontWeight, ItemSize, TabFont, TabStyleDefaults, TabStyleOptions};
pub use tab_strip::{TabStrip, TabStripDataSource};
