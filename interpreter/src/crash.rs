// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{
    backtrace::Backtrace, fs::{self, File}, io::{self, Write}, panic, path::{Path, PathBuf}, sync::Mutex
};

use chrono::{Local, NaiveDateTime};
use colored::Colorize;

pub const CRASH_DIRECTORY: &str = "crash";

/// Text of the last panic, recorded by the hook installed in
/// [`install_panic_hook`].
static LAST_PANIC: Mutex<Option<String>> = Mutex::new(None);

/// Writes the details of an internal failure to `crash/<timestamp>.log`.
pub struct CrashReport {
    directory: PathBuf,
}

impl CrashReport {
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn write(&self, message: &str, source_file: &Path) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.directory)?;

        let path = self.directory.join(format!("{}.log", timestamp(&Local::now().naive_local())));
        let mut file = File::create(&path)?;

        writeln!(file, "pdc {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(file, "Source file: {}", source_file.display())?;
        writeln!(file)?;
        writeln!(file, "{message}")?;

        if !message.contains("stack backtrace") {
            writeln!(file)?;
            writeln!(file, "{}", Backtrace::force_capture())?;
        }

        Ok(path)
    }
}

/// Keeps panics off the terminal and remembers them for the crash report.
pub fn install_panic_hook() {
    panic::set_hook(Box::new(|info| {
        let report = format!("{info}\n\nstack backtrace:\n{}", Backtrace::force_capture());

        if let Ok(mut last) = LAST_PANIC.lock() {
            *last = Some(report);
        }
    }));
}

#[must_use]
pub fn take_panic_report() -> String {
    LAST_PANIC.lock()
        .ok()
        .and_then(|mut last| last.take())
        .unwrap_or_else(|| "panic without a message".to_string())
}

/// Tells the user something went wrong on our side, and where the details
/// went.
pub fn report(message: &str, source_file: &Path) {
    log::error!("Internal fault: {message}");

    eprintln!("{}: {}", "błąd".red().bold(), "Runtime error has occurred!".bold());
    eprintln!();
    eprintln!("Wow! You encountered a bug! Please tell us how you did that.");

    let report = CrashReport::new(CRASH_DIRECTORY);
    match report.write(message, source_file) {
        Ok(path) => {
            let path = std::env::current_dir()
                .map(|dir| dir.join(&path))
                .unwrap_or(path);
            eprintln!("Error message was copied to {}", path.display());
        }

        Err(e) => eprintln!("Could not write the crash report: {e}"),
    }
}

/// `HH-MM-SS-DD-MM-YYYY`
fn timestamp(time: &NaiveDateTime) -> String {
    time.format("%H-%M-%S-%d-%m-%Y").to_string()
}
