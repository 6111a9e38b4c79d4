// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use log::{LevelFilter, Log, Metadata, Record};

pub(crate) struct Logger;

static LOGGER: Logger = Logger;

impl Logger {
    pub fn initialize(level: LevelFilter) {
        log::set_max_level(level);

        if let Err(e) = log::set_logger(&LOGGER) {
            eprintln!("Could not install the logger: {e}");
            return;
        }

        log::info!("Logger installed at level {level}");
    }

    pub fn raise_to(level: LevelFilter) {
        if level > log::max_level() {
            log::set_max_level(level);
            log::debug!("Log level raised to {level}");
        }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}: {}", record.level(), record.file().unwrap_or_default(), record.args());
        }
    }

    fn flush(&self) {}
}
