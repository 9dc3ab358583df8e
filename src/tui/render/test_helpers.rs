use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::persistence::{TASKS_KEY, TaskPersistence};
use crate::io::storage::MemoryStore;
use crate::model::Config;
use crate::ops::task_store::TaskStore;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// A task store over `storage`, after its initial load.
pub fn store_from(storage: MemoryStore) -> TaskStore {
    TaskStore::open(TaskPersistence::new(storage)).0
}

/// An App over an empty in-memory store.
pub fn empty_app() -> App {
    App::new(store_from(MemoryStore::new()), &Config::default())
}

/// An App whose storage starts out holding `json`.
pub fn app_with_tasks(json: &str) -> App {
    let store = store_from(MemoryStore::new().with_item(TASKS_KEY, json));
    App::new(store, &Config::default())
}

/// Two pending tasks around a completed one.
pub const THREE_TASKS_JSON: &str = r#"[
  {"id":1,"title":"Buy milk","completed":false},
  {"id":2,"title":"Walk dog","completed":true},
  {"id":3,"title":"Write report","completed":false}
]"#;
