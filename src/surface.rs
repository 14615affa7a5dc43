//! Output / History / Bookmarks tabs

use crate::pipeline::ChatHistoryEntry;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveTab {
    #[default]
    Output,
    History,
    Bookmarks,
}

impl ActiveTab {
    pub fn all() -> &'static [ActiveTab] {
        &[ActiveTab::Output, ActiveTab::History, ActiveTab::Bookmarks]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActiveTab::Output => "Output",
            ActiveTab::History => "History",
            ActiveTab::Bookmarks => "Bookmarks",
        }
    }

    fn index(&self) -> usize {
        match self {
            ActiveTab::Output => 0,
            ActiveTab::History => 1,
            ActiveTab::Bookmarks => 2,
        }
    }

    pub fn next(&self) -> Self {
        Self::all()[(self.index() + 1) % 3]
    }
}

/// A saved copy of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub id: String,
    pub content: String,
}

/// Short random id. Collisions are possible and tolerated.
pub fn bookmark_id() -> String {
    Uuid::new_v4().simple().to_string()[..9].to_string()
}

#[derive(Debug, Clone, Default)]
pub struct TabSurface {
    pub active: ActiveTab,
    pub bookmarks: Vec<Bookmark>,
    /// Scroll offset per tab, indexed like [`ActiveTab::all`]
    scroll: [usize; 3],
    /// History entry the bookmark key acts on
    pub history_cursor: usize,
}

impl TabSurface {
    pub fn switch(&mut self, tab: ActiveTab) {
        self.active = tab;
    }

    pub fn scroll(&self, tab: ActiveTab) -> usize {
        self.scroll[tab.index()]
    }

    pub fn scroll_down(&mut self) {
        let slot = &mut self.scroll[self.active.index()];
        *slot = slot.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        let slot = &mut self.scroll[self.active.index()];
        *slot = slot.saturating_sub(1);
    }

    pub fn scroll_home(&mut self) {
        self.scroll[self.active.index()] = 0;
    }

    /// Clamp the active tab's offset to the rendered content height
    pub fn clamp_scroll(&mut self, tab: ActiveTab, max: usize) {
        let slot = &mut self.scroll[tab.index()];
        if *slot > max {
            *slot = max;
        }
    }

    pub fn history_cursor_down(&mut self, history_len: usize) {
        if self.history_cursor + 1 < history_len {
            self.history_cursor += 1;
        }
    }

    pub fn history_cursor_up(&mut self) {
        self.history_cursor = self.history_cursor.saturating_sub(1);
    }

    /// Copy a history entry's response into the bookmarks.
    ///
    /// The history itself is never touched.
    pub fn bookmark(&mut self, history: &[ChatHistoryEntry], index: usize) -> Option<&Bookmark> {
        let entry = history.get(index)?;
        self.bookmarks.push(Bookmark {
            id: bookmark_id(),
            content: entry.response.clone(),
        });
        self.bookmarks.last()
    }
}
