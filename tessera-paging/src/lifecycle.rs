//! Hosted pages and their appearance lifecycle.
//!
//! Every page is told when it is about to appear or disappear
//! ([`PageLifecycle::begin_appearance_transition`]) and when that change has
//! committed ([`PageLifecycle::end_appearance_transition`]). [`PageSet`]
//! keeps the calls paired: a page never sees two `begin`s without an `end`
//! in between, and never an `end` without a `begin`.

use tracing::{debug, warn};

use crate::{arbiter::ListHandle, error::PagingError};

/// Capability implemented by every hosted page.
pub trait PageLifecycle {
    /// The page is about to appear (`true`) or disappear (`false`).
    fn begin_appearance_transition(&mut self, is_appearing: bool);

    /// The change announced by the last `begin` has committed.
    fn end_appearance_transition(&mut self);

    /// Called once, the first time the page content is placed in the pager.
    fn did_attach(&mut self) {}

    /// The vertically scrolling list this page hosts, if any. Only the
    /// header variant asks for it.
    fn inner_list(&self) -> Option<ListHandle> {
        None
    }
}

/// Where a page stands in its appearance lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PageVisibility {
    #[default]
    Hidden,
    Appearing,
    Visible,
    Disappearing,
}

impl PageVisibility {
    /// Whether a `begin` is waiting for its `end`.
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Appearing | Self::Disappearing)
    }
}

/// A hosted page.
pub struct Page {
    title: String,
    lifecycle: Box<dyn PageLifecycle>,
    visibility: PageVisibility,
    is_attached: bool,
}

impl Page {
    pub fn new(title: impl Into<String>, lifecycle: impl PageLifecycle + 'static) -> Self {
        Self {
            title: title.into(),
            lifecycle: Box::new(lifecycle),
            visibility: PageVisibility::Hidden,
            is_attached: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn visibility(&self) -> PageVisibility {
        self.visibility
    }

    pub fn is_attached(&self) -> bool {
        self.is_attached
    }

    pub fn inner_list(&self) -> Option<ListHandle> {
        self.lifecycle.inner_list()
    }

    fn begin(&mut self, is_appearing: bool) -> bool {
        if self.visibility.is_pending() {
            warn!(
                title = %self.title,
                visibility = ?self.visibility,
                "ignoring begin_appearance_transition while a transition is pending"
            );
            return false;
        }
        self.visibility = if is_appearing {
            PageVisibility::Appearing
        } else {
            PageVisibility::Disappearing
        };
        self.lifecycle.begin_appearance_transition(is_appearing);
        true
    }

    fn end(&mut self) -> bool {
        self.visibility = match self.visibility {
            PageVisibility::Appearing => PageVisibility::Visible,
            PageVisibility::Disappearing => PageVisibility::Hidden,
            other => {
                warn!(
                    title = %self.title,
                    visibility = ?other,
                    "ignoring end_appearance_transition without a pending begin"
                );
                return false;
            }
        };
        self.lifecycle.end_appearance_transition();
        true
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("title", &self.title)
            .field("visibility", &self.visibility)
            .field("is_attached", &self.is_attached)
            .finish_non_exhaustive()
    }
}

/// The ordered, fixed set of pages of one paging view.
#[derive(Debug)]
pub struct PageSet {
    pages: Vec<Page>,
}

impl PageSet {
    /// Builds the set. At least one page is required.
    pub fn new(pages: Vec<Page>) -> Result<Self, PagingError> {
        if pages.is_empty() {
            return Err(PagingError::NoPages);
        }
        Ok(Self { pages })
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.pages.len()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(Page::title)
    }

    /// Announces an appearance change on page `index`. Returns whether the
    /// call reached the page.
    pub(crate) fn begin(&mut self, index: usize, is_appearing: bool) -> bool {
        match self.pages.get_mut(index) {
            Some(page) => page.begin(is_appearing),
            None => false,
        }
    }

    /// Commits the pending appearance change on page `index`.
    pub(crate) fn end(&mut self, index: usize) -> bool {
        match self.pages.get_mut(index) {
            Some(page) => page.end(),
            None => false,
        }
    }

    /// Makes sure page `index` has a pending transition in the given
    /// direction, then commits it.
    pub(crate) fn commit(&mut self, index: usize, is_appearing: bool) {
        let Some(page) = self.pages.get_mut(index) else {
            return;
        };
        let wanted = if is_appearing {
            PageVisibility::Appearing
        } else {
            PageVisibility::Disappearing
        };
        if page.visibility != wanted {
            if page.visibility.is_pending() {
                page.end();
            }
            page.begin(is_appearing);
        }
        page.end();
    }

    /// Reverts a transition that began but will not commit: the page
    /// finishes the announced change and is then taken straight back.
    pub(crate) fn roll_back(&mut self, index: usize) {
        let Some(page) = self.pages.get_mut(index) else {
            return;
        };
        let was_appearing = match page.visibility {
            PageVisibility::Appearing => true,
            PageVisibility::Disappearing => false,
            _ => return,
        };
        debug!(title = %page.title, was_appearing, "rolling back uncommitted appearance");
        page.end();
        page.begin(!was_appearing);
        page.end();
    }

    /// Indices of every page with a pending transition.
    pub(crate) fn pending(&self) -> impl Iterator<Item = usize> + '_ {
        self.pages
            .iter()
            .enumerate()
            .filter(|(_, page)| page.visibility.is_pending())
            .map(|(index, _)| index)
    }

    /// Attaches page `index` on its first materialisation. Returns `false`
    /// when the index is out of range or the page is already attached.
    pub(crate) fn attach(&mut self, index: usize) -> bool {
        let Some(page) = self.pages.get_mut(index) else {
            return false;
        };
        if page.is_attached {
            return false;
        }
        page.is_attached = true;
        page.lifecycle.did_attach();
        debug!(index, title = %page.title, "attached page content");
        true
    }
}


#[cfg(test)]
mod tests {
    use super::{
        testing::{LifecycleCall::*, recording_pages},
        *,
    };

    #[test]
    fn empty_set_is_rejected() {
        assert!(matches!(PageSet::new(Vec::new()), Err(PagingError::NoPages)));
    }

    #[test]
    fn begin_and_end_are_paired() {
        let (mut pages, log) = recording_pages(2);
        assert!(pages.begin(0, true));
        assert!(!pages.begin(0, false), "second begin is dropped");
        assert!(pages.end(0));
        assert!(!pages.end(0), "end without begin is dropped");
        assert_eq!(pages.get(0).map(Page::visibility), Some(PageVisibility::Visible));
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
    fn commit_fills_in_a_missing_begin() {
        let (mut pages, log) = recording_pages(2);
        pages.commit(1, true);
        assert_eq!(
            log.take(),
            vec![
                Begin {
                    page: 1,
                    appearing: true
                },
                End { page: 1 }
            ]
        );
        pages.begin(1, false);
        pages.commit(1, false);
        assert_eq!(
            log.take(),
            vec![
                Begin {
                    page: 1,
                    appearing: false
                },
                End { page: 1 }
            ]
        );
    }

    #[test]
    fn roll_back_restores_previous_visibility() {
        let (mut pages, log) = recording_pages(3);
        pages.begin(2, true);
        pages.roll_back(2);
        assert_eq!(pages.get(2).map(Page::visibility), Some(PageVisibility::Hidden));
        assert_eq!(pages.pending().count(), 0);
        assert_eq!(log.take().len(), 4);
    }

    #[test]
    fn attach_happens_once() {
        let (mut pages, log) = recording_pages(2);
        assert!(pages.attach(1));
        assert!(!pages.attach(1));
        assert!(!pages.attach(7));
        assert_eq!(log.take(), vec![Attach { page: 1 }]);
    }
}
