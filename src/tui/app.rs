use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Position, Rect};

use crate::io::config_io::read_config;
use crate::io::persistence::{TASKS_KEY, TaskPersistence};
use crate::io::recovery;
use crate::io::storage::FileStore;
use crate::io::watcher::StoreWatcher;
use crate::model::{Alert, Config, FilterMode, Task, TaskId};
use crate::ops::filter::FilterSelector;
use crate::ops::task_store::{StoreError, TaskStore};

use super::input;
use super::render;
use super::theme::Theme;

/// Which control receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    List,
}

/// Something clickable, recorded while rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Input,
    AddButton,
    Filter(FilterMode),
    Row(TaskId),
    Delete(TaskId),
}

/// Main application state
pub struct App {
    pub store: TaskStore,
    pub filter: FilterSelector,
    /// Text typed into the input field
    pub input: String,
    /// Byte offset of the caret within `input`
    pub input_cursor: usize,
    pub focus: Focus,
    /// Index into the filtered list
    pub cursor: usize,
    /// First visible row of the list
    pub scroll: usize,
    /// Modal alert; blocks other input until dismissed
    pub alert: Option<Alert>,
    pub theme: Theme,
    pub show_key_hints: bool,
    pub should_quit: bool,
    /// Click targets from the last frame, first match wins
    pub hit_regions: Vec<(Rect, HitTarget)>,
}

impl App {
    pub fn new(store: TaskStore, config: &Config) -> Self {
        App {
            store,
            filter: FilterSelector::default(),
            input: String::new(),
            input_cursor: 0,
            focus: Focus::Input,
            cursor: 0,
            scroll: 0,
            alert: None,
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
            should_quit: false,
            hit_regions: Vec::new(),
        }
    }

    /// Tasks shown under the active filter
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.filter.apply(self.store.tasks())
    }

    /// Id of the task under the list cursor
    pub fn selected_id(&self) -> Option<TaskId> {
        self.visible_tasks().get(self.cursor).map(|t| t.id)
    }

    /// Show `err` as an alert
    pub fn report(&mut self, err: &StoreError) {
        self.alert = Some(err.alert());
    }

    /// Surface warnings held back while the terminal is in raw mode. They join
    /// the open alert's detail, or get an alert of their own.
    pub fn show_warnings(&mut self, warnings: Vec<String>) {
        if warnings.is_empty() {
            return;
        }
        let text = warnings.join("; ");
        match &mut self.alert {
            Some(alert) => {
                alert.detail = Some(match alert.detail.take() {
                    Some(detail) => format!("{}; {}", detail, text),
                    None => text,
                });
            }
            None => {
                self.alert =
                    Some(Alert::new("Warning", "Recovery log unavailable").with_detail(text));
            }
        }
    }

    /// Add the typed text as a task. The field is cleared whatever the outcome.
    pub fn submit_input(&mut self) {
        let title = std::mem::take(&mut self.input);
        self.input_cursor = 0;
        match self.store.add(&title) {
            Ok(id) => self.select(id),
            Err(e) => self.report(&e),
        }
    }

    pub fn toggle(&mut self, id: TaskId) {
        if let Err(e) = self.store.toggle(id) {
            self.report(&e);
        }
        self.clamp_cursor();
    }

    pub fn delete(&mut self, id: TaskId) {
        if let Err(e) = self.store.delete(id) {
            self.report(&e);
        }
        self.clamp_cursor();
    }

    pub fn set_filter(&mut self, mode: FilterMode) {
        let selected = self.selected_id();
        self.filter.set_filter(mode);
        self.cursor = 0;
        self.scroll = 0;
        if let Some(id) = selected {
            self.select(id);
        }
    }

    /// Move the list cursor onto `id` if it is visible
    pub fn select(&mut self, id: TaskId) {
        if let Some(idx) = self.visible_tasks().iter().position(|t| t.id == id) {
            self.cursor = idx;
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.visible_tasks().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
    }

    /// Keep the cursor inside the visible list after it shrinks
    pub fn clamp_cursor(&mut self) {
        let len = self.visible_tasks().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Pick up changes another process wrote to storage
    pub fn reload_from_storage(&mut self) {
        let selected = self.selected_id();
        match self.store.reload() {
            Ok(false) => {}
            Ok(true) => {
                self.clamp_cursor();
                if let Some(id) = selected {
                    self.select(id);
                }
            }
            Err(e) => {
                self.report(&e);
                self.clamp_cursor();
            }
        }
    }

    /// The click target under a terminal cell, if any
    pub fn hit_test(&self, column: u16, row: u16) -> Option<HitTarget> {
        let pos = Position::new(column, row);
        self.hit_regions
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, target)| *target)
    }
}

/// Run the TUI against the data directory `data_dir`
pub fn run(data_dir: &Path, no_watch: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = read_config(data_dir)?;
    let file_store = FileStore::new(data_dir);
    let tasks_path = file_store.path_for(TASKS_KEY);
    let (store, load_err) = TaskStore::open(TaskPersistence::new(file_store));

    let mut app = App::new(store, &config);
    if let Some(e) = load_err {
        app.report(&e);
    }

    // Watching needs the directory to exist before the first save
    let watcher = if config.storage.watch && !no_watch {
        std::fs::create_dir_all(data_dir)?;
        StoreWatcher::start(&tasks_path).ok()
    } else {
        None
    };

    // Setup terminal
    recovery::hold_warnings(true);
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    recovery::hold_warnings(false);
    for warning in recovery::take_warnings() {
        eprintln!("warning: {}", warning);
    }

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&StoreWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if watcher.is_some_and(|w| w.poll_changed()) {
            app.reload_from_storage();
        }

        app.show_warnings(recovery::take_warnings());

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
