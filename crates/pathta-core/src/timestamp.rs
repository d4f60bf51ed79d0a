//! Second-resolution timestamp formats.
//!
//! Both formats drop zero padding: `3/7/2024, 9:5:2` rather than `03/07/2024, 09:05:02`.

use chrono::{Local, NaiveDateTime};

const CREATED_FORMAT: &str = "%-m/%-d/%Y, %-H:%-M:%-S";
const BACKUP_FORMAT: &str = "_%Y_%-m_%-d_%-H_%-M_%-S";

/// Current wall-clock time in the local timezone.
#[must_use]
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Study creation stamp, formatted `M/D/YYYY, H:M:S`.
#[must_use]
pub fn created_stamp(at: &NaiveDateTime) -> String {
    at.format(CREATED_FORMAT).to_string()
}

/// Suffix appended to a backup's file stem, formatted `_Y_M_D_h_m_s`.
#[must_use]
pub fn backup_suffix(at: &NaiveDateTime) -> String {
    at.format(BACKUP_FORMAT).to_string()
}
