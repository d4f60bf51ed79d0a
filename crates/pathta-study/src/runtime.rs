//! Wall-clock timing of study scripts.

use std::fs::OpenOptions;
use std::io::Write;
use std::time::{Duration, Instant};

use chrono::NaiveDateTime;
use pathta_core::CACHE_FOLDER;
use pathta_core::timestamp::local_now;

use crate::error::StudyError;
use crate::study::Study;

/// History file inside the study's `cache/` folder.
pub const RUNTIME_FILE: &str = "runtime.txt";

const DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// A running timer, from [`Study::start_timer`].
#[derive(Debug, Clone)]
pub struct RuntimeTimer {
    script: String,
    started_at: NaiveDateTime,
    started: Instant,
}

impl RuntimeTimer {
    pub(crate) fn start() -> Self {
        let timer = Self {
            script: std::env::args().next().unwrap_or_default(),
            started_at: local_now(),
            started: Instant::now(),
        };
        tracing::info!(start = %timer.started_at.format(DATE_FORMAT), "timer started");
        timer
    }

    #[must_use]
    pub const fn started_at(&self) -> NaiveDateTime {
        self.started_at
    }

    /// Stop the timer. With `save`, append
    /// `start<TAB>end<TAB>script<TAB>elapsed\r\n` to `<study>/cache/runtime.txt`.
    ///
    /// # Errors
    ///
    /// Folder creation or append failures when `save` is set.
    pub fn finish(self, study: &Study, save: bool) -> Result<Duration, StudyError> {
        let elapsed = self.started.elapsed();
        if save {
            let path = study.join(RUNTIME_FILE, Some(CACHE_FOLDER), true)?;
            let line = format!(
                "{}\t{}\t{}\t{}\r\n",
                self.started_at.format(DATE_FORMAT),
                local_now().format(DATE_FORMAT),
                self.script,
                format_elapsed(elapsed)
            );
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .and_then(|mut file| file.write_all(line.as_bytes()))
                .map_err(|e| StudyError::io(&path, e))?;
        }
        tracing::info!(elapsed = %format_elapsed(elapsed), "timer stopped");
        Ok(elapsed)
    }
}

/// `H:MM:SS.ffffff`.
fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!(
        "{}:{:02}:{:02}.{:06}",
        secs / 3600,
        (secs / 60) % 60,
        secs % 60,
        elapsed.subsec_micros()
    )
}
