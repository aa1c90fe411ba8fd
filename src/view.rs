// Presentation-side view state: active tab, search text, displayed rows

use crate::error::StoreError;
use crate::filter::{Filter, Tab};
use crate::store::Store;
use crate::task::{Task, TaskId};
use serde::Serialize;

/// One displayed line of the current view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    /// 1-based row number as shown to the user
    pub number: usize,
    pub id: TaskId,
    pub title: String,
    pub is_finished: bool,
}

impl Row {
    fn new(number: usize, task: &Task) -> Self {
        Self {
            number,
            id: task.id,
            title: task.title.clone(),
            is_finished: task.is_finished,
        }
    }
}

/// Tab and search query owned by the front end
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub tab: Tab,
    pub search_query: String,
}

impl ViewState {
    pub fn new(tab: Tab) -> Self {
        Self {
            tab,
            search_query: String::new(),
        }
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
    }

    pub fn filter(&self) -> Filter {
        Filter::new(self.tab, self.search_query.clone())
    }

    /// Rows currently visible, numbered from 1
    pub fn rows(&self, store: &Store) -> Vec<Row> {
        store
            .view(&self.filter())
            .into_iter()
            .enumerate()
            .map(|(i, task)| Row::new(i + 1, task))
            .collect()
    }

    /// Map a displayed row number back to the task it shows
    pub fn resolve(&self, store: &Store, row: usize) -> Result<TaskId, StoreError> {
        let visible = store.view(&self.filter());
        row.checked_sub(1)
            .and_then(|i| visible.get(i))
            .map(|task| task.id)
            .ok_or(StoreError::RowOutOfRange {
                row,
                visible: visible.len(),
            })
    }
}
