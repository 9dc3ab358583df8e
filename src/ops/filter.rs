use crate::model::filter::FilterMode;
use crate::model::task::Task;

/// Holds the active filter mode and derives the visible list from it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSelector {
    mode: FilterMode,
}

impl FilterSelector {
    pub fn new(mode: FilterMode) -> Self {
        FilterSelector { mode }
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn set_filter(&mut self, mode: FilterMode) {
        self.mode = mode;
    }

    /// Tasks visible under the current mode, in collection order
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.mode.matches(t)).collect()
    }
}
