//! Scripted session through both paging view variants.
//!
//! Run with `RUST_LOG=tessera_paging=debug` to watch the coordinator.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use parking_lot::Mutex;
use tessera_paging::{
    GestureSource, HeaderPagingArgs, HeaderPagingView, ItemSize, ListHandle, Page,
    PageLifecycle, PageSet, PagingError, PagingView, PagingViewArgs, Rect, TabStyleOptions,
};
use tracing::info;

const SCREEN: Rect = Rect::new(0.0, 0.0, 390.0, 844.0);
const FRAME: Duration = Duration::from_millis(16);

type Journal = Arc<Mutex<Vec<String>>>;

/// A page that writes its lifecycle into a shared journal.
struct JournalPage {
    title: &'static str,
    journal: Journal,
    list: Option<ListHandle>,
}

impl JournalPage {
    fn record(&self, entry: String) {
        info!(page = self.title, "{entry}");
        self.journal.lock().push(format!("{}: {entry}", self.title));
    }
}

impl PageLifecycle for JournalPage {
    fn begin_appearance_transition(&mut self, is_appearing: bool) {
        let entry = if is_appearing {
            "will appear"
        } else {
            "will disappear"
        };
        self.record(entry.to_owned());
    }

    fn end_appearance_transition(&mut self) {
        self.record("transition committed".to_owned());
    }

    fn did_attach(&mut self) {
        self.record("content attached".to_owned());
    }

    fn inner_list(&self) -> Option<ListHandle> {
        self.list.clone()
    }
}

fn pages(
    titles: &[&'static str],
    journal: &Journal,
    with_lists: bool,
) -> Result<PageSet, PagingError> {
    PageSet::new(
        titles
            .iter()
            .map(|&title| {
                Page::new(
                    title,
                    JournalPage {
                        title,
                        journal: journal.clone(),
                        list: with_lists.then(ListHandle::new),
                    },
                )
            })
            .collect(),
    )
}

/// Runs frames until the pager comes to rest.
fn settle(view: &mut PagingView, clock: &mut Instant) {
    while view.is_animating() {
        *clock += FRAME;
        view.tick(*clock);
    }
}

fn plain_session(journal: &Journal) -> Result<(), PagingError> {
    info!("plain paging view");
    let style = TabStyleOptions::default().item_size(ItemSize::Average);
    let mut view = PagingView::new(
        pages(&["Home", "News", "Sports", "Weather"], journal, false)?,
        PagingViewArgs::default().style(style),
    )?;
    view.layout_in(SCREEN);
    view.did_appear();
    let mut clock = Instant::now();

    info!("drag from Home toward News");
    view.begin_drag();
    for _ in 0..10 {
        view.drag_by(24.0);
    }
    view.end_drag(0.0);
    settle(&mut view, &mut clock);
    info!(selected = view.selected_index(), "drag settled");

    info!("tap Weather");
    view.tap_tab(3);
    settle(&mut view, &mut clock);
    info!(selected = view.selected_index(), "tap settled");

    info!("fling back, then grab the pages again before they settle");
    view.begin_drag();
    view.drag_by(-120.0);
    view.end_drag(-900.0);
    clock += FRAME;
    view.tick(clock);
    view.begin_drag();
    view.drag_by(-40.0);
    view.end_drag(-900.0);
    settle(&mut view, &mut clock);
    info!(selected = view.selected_index(), "re-drag settled");
    Ok(())
}

fn header_session(journal: &Journal) -> Result<(), PagingError> {
    info!("header paging view");
    let mut view = HeaderPagingView::new(
        pages(&["Feed", "Saved"], journal, true)?,
        HeaderPagingArgs::default().is_tab_view_pinned(true),
    )?;
    view.layout_in(SCREEN);
    view.did_appear();

    let Some(list) = view.selected_inner_list() else {
        return Ok(());
    };
    view.inner_will_begin_dragging(&list);
    info!(
        with_pager = view.should_recognize_simultaneously(GestureSource::Pager),
        "inner list pan"
    );

    for requested in [80.0, 160.0, 230.0, 300.0] {
        let offset = view.outer_did_scroll(requested);
        info!(requested, offset, "outer list scrolled");
    }

    list.set_offset_y(120.0);
    let correction = view.inner_did_scroll(&list);
    info!(?correction, "inner list scrolled while collapsed");

    list.set_offset_y(0.0);
    view.inner_did_scroll(&list);
    let offset = view.outer_did_scroll(140.0);
    info!(
        offset,
        enabled = view.arbiter().is_outer_scroll_enabled(),
        "header expanding again"
    );
    Ok(())
}

fn main() -> Result<(), PagingError> {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new("info") {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let journal = Journal::default();
    plain_session(&journal)?;
    header_session(&journal)?;

    info!(entries = journal.lock().len(), "lifecycle journal");
    for entry in journal.lock().iter() {
        println!("{entry}");
    }
    Ok(())
}
