use std::sync::LazyLock;

use chrono::{DateTime, TimeZone, Utc};

pub mod contact;

pub static NOW: LazyLock<DateTime<Utc>> =
    LazyLock::new(|| Utc.with_ymd_and_hms(2024, 5, 1, 10, 20, 30).unwrap());
