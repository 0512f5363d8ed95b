//! Chat transcript persistence
//!
//! Appends room messages to plain-text files without blocking the UI thread.
//! Transcripts live under the data directory as `logs/<room>/YYYY-MM-DD.log`.

use chrono::Local;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::thread;

/// A transcript line to be written to disk
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub room: String,
    pub timestamp: String,
    pub username: String,
    pub message: String,
}

/// Logger hands entries to a background writer thread
pub struct Logger {
    tx: Sender<LogEntry>,
}

impl Logger {
    /// Logger writing to the default per-user log directory
    pub fn new() -> Result<Self, String> {
        Self::with_dir(get_log_directory()?)
    }

    /// Logger writing below `log_dir`
    pub fn with_dir(log_dir: PathBuf) -> Result<Self, String> {
        fs::create_dir_all(&log_dir)
            .map_err(|e| format!("Failed to create log directory: {}", e))?;

        let (tx, rx) = unbounded::<LogEntry>();
        thread::Builder::new()
            .name("transcript-logger".into())
            .spawn(move || run_logger_thread(rx, log_dir))
            .map_err(|e| format!("Failed to start logger thread: {}", e))?;

        Ok(Self { tx })
    }

    /// Queue an entry; never blocks
    pub fn log(&self, entry: LogEntry) {
        // A closed channel means the writer thread is gone; nothing to do
        let _ = self.tx.send(entry);
    }
}

fn run_logger_thread(rx: Receiver<LogEntry>, log_dir: PathBuf) {
    // Open writers, keyed by room and date
    let mut file_cache: HashMap<String, BufWriter<File>> = HashMap::new();

    while let Ok(entry) = rx.recv() {
        if let Err(e) = write_log_entry(&mut file_cache, &log_dir, &entry) {
            tracing::error!("transcript logger: {}", e);
        }
    }

    for (_, mut writer) in file_cache.drain() {
        let _ = writer.flush();
    }
}

fn write_log_entry(
    file_cache: &mut HashMap<String, BufWriter<File>>,
    log_dir: &Path,
    entry: &LogEntry,
) -> Result<(), String> {
    let date = Local::now().format("%Y-%m-%d").to_string();
    let room_dir_name = sanitize_filename(&entry.room);
    let cache_key = format!("{}/{}", room_dir_name, date);

    let writer = match file_cache.entry(cache_key) {
        std::collections::hash_map::Entry::Occupied(slot) => slot.into_mut(),
        std::collections::hash_map::Entry::Vacant(slot) => {
            let room_dir = log_dir.join(&room_dir_name);
            fs::create_dir_all(&room_dir)
                .map_err(|e| format!("Failed to create room directory: {}", e))?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(room_dir.join(format!("{}.log", date)))
                .map_err(|e| format!("Failed to open log file: {}", e))?;
            slot.insert(BufWriter::new(file))
        }
    };

    // Format: [HH:MM:SS] <user> message
    writeln!(
        writer,
        "[{}] <{}> {}",
        entry.timestamp, entry.username, entry.message
    )
    .map_err(|e| format!("Failed to write log entry: {}", e))?;

    writer
        .flush()
        .map_err(|e| format!("Failed to flush log: {}", e))?;

    Ok(())
}

fn get_log_directory() -> Result<PathBuf, String> {
    let base = directories::BaseDirs::new().ok_or("Failed to determine home directory")?;
    Ok(base.data_dir().join("roomchat-client").join("logs"))
}

/// Make a room name safe to use as a directory name below the log root
fn sanitize_filename(name: &str) -> String {
    // `.` and `..` would resolve outside the room's own directory
    if name.chars().all(|c| c == '.') {
        return "_".repeat(name.len().max(1));
    }
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
