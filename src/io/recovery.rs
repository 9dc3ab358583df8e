use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

use super::lock::WriteLock;

/// Maximum size of the recovery log before inline trimming (1 MB).
const MAX_LOG_SIZE: u64 = 1_048_576;

/// Size the log is trimmed down to, keeping the newest entries.
const TRIM_TARGET: usize = 512 * 1024;

/// While set, warnings are queued for [`take_warnings`] instead of printed.
static HOLD_WARNINGS: AtomicBool = AtomicBool::new(false);
static PENDING_WARNINGS: Mutex<Vec<String>> = Mutex::new(Vec::new());

/// Self-documenting header written at the top of a new recovery log.
const FILE_HEADER: &str = "\
<!-- jot recovery log: append-only error recovery data
     Task lists that could not be saved or read are copied here.
     If something went missing, check here.
     Safe to delete if empty or stale. -->

---
";

/// Category of a recovery entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryCategory {
    /// Stored value could not be decoded
    Parser,
    /// Value could not be written
    Write,
}

impl fmt::Display for RecoveryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryCategory::Parser => write!(f, "parser"),
            RecoveryCategory::Write => write!(f, "write"),
        }
    }
}

/// A single entry in the recovery log.
#[derive(Debug, Clone)]
pub struct RecoveryEntry {
    pub timestamp: DateTime<Utc>,
    pub category: RecoveryCategory,
    pub description: String,
    pub fields: Vec<(String, String)>,
    pub body: String,
}

impl RecoveryEntry {
    pub fn new(category: RecoveryCategory, description: impl Into<String>) -> Self {
        RecoveryEntry {
            timestamp: Utc::now(),
            category,
            description: description.into(),
            fields: Vec::new(),
            body: String::new(),
        }
    }

    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields.push((key.to_string(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Format this entry as a markdown block for the recovery log.
    fn to_markdown(&self) -> String {
        let mut out = format!(
            "## {} {}: {}\n\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.category,
            self.description,
        );

        for (key, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", key, value));
        }

        if !self.body.is_empty() {
            out.push_str("\n```text\n");
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n");
        }

        out.push_str("\n---\n");
        out
    }
}

/// Return the path to the recovery log file.
pub fn recovery_log_path(data_dir: &Path) -> PathBuf {
    data_dir.join(".recovery.log")
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Append a recovery entry to the log. Errors are swallowed and reported as
/// warnings (stderr, or queued while held).
pub fn log_recovery(data_dir: &Path, entry: RecoveryEntry) {
    if let Err(e) = log_recovery_inner(data_dir, entry) {
        warn(format!("could not write to recovery log: {}", e));
    }
}

/// Hold warnings in memory instead of printing them, e.g. while the
/// terminal is in raw mode.
pub fn hold_warnings(hold: bool) {
    HOLD_WARNINGS.store(hold, Ordering::SeqCst);
}

/// Drain warnings queued while held.
pub fn take_warnings() -> Vec<String> {
    PENDING_WARNINGS
        .lock()
        .map(|mut w| std::mem::take(&mut *w))
        .unwrap_or_default()
}

fn warn(message: String) {
    if HOLD_WARNINGS.load(Ordering::SeqCst) {
        if let Ok(mut pending) = PENDING_WARNINGS.lock() {
            pending.push(message);
        }
    } else {
        eprintln!("warning: {}", message);
    }
}

fn log_recovery_inner(data_dir: &Path, entry: RecoveryEntry) -> io::Result<()> {
    std::fs::create_dir_all(data_dir)?;
    let path = recovery_log_path(data_dir);

    if let Ok(meta) = std::fs::metadata(&path)
        && meta.len() > MAX_LOG_SIZE
    {
        try_inline_trim(data_dir, &path);
    }

    let needs_header = std::fs::metadata(&path).map_or(true, |m| m.len() == 0);

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }
    file.write_all(entry.to_markdown().as_bytes())?;
    Ok(())
}

/// Drop the oldest entries so the log fits in `TRIM_TARGET`. Skipped when
/// another writer holds the data directory lock.
fn try_inline_trim(data_dir: &Path, path: &Path) {
    let Ok(_lock) = WriteLock::acquire(data_dir, std::time::Duration::ZERO) else {
        return;
    };
    let Ok(content) = std::fs::read_to_string(path) else {
        return;
    };
    let trimmed = trim_to_size(&content, TRIM_TARGET);
    if trimmed.len() < content.len() {
        let _ = atomic_write(path, trimmed.as_bytes());
    }
}

/// Keep the header and the newest whole entries that fit in `max_len` bytes.
fn trim_to_size(content: &str, max_len: usize) -> String {
    let starts = entry_starts(content);
    let Some(&first) = starts.first() else {
        return content.to_string();
    };

    let keep_from = starts
        .iter()
        .copied()
        .find(|&start| content.len() - start <= max_len)
        .unwrap_or(content.len());

    let mut out = content[..first].to_string();
    out.push_str(&content[keep_from..]);
    out
}

/// Byte offsets of entry headings (`## ` lines outside code fences).
fn entry_starts(content: &str) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut in_fence = false;
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        if line.starts_with("```") {
            in_fence = !in_fence;
        } else if !in_fence && line.starts_with("## ") {
            starts.push(offset);
        }
        offset += line.len();
    }
    starts
}
