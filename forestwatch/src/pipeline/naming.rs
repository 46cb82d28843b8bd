//! Output file naming.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};

/// Timestamp layout used in mosaic file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// `area_{id}_{YYYYmmddHHMMSS}.png` for the given moment.
pub fn mosaic_file_name<Tz: TimeZone>(area_id: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("area_{}_{}.png", area_id, at.format(TIMESTAMP_FORMAT))
}

/// Path inside `dir` for a mosaic of `area_id` created now.
pub fn timestamped_output(dir: &Path, area_id: &str) -> PathBuf {
    dir.join(mosaic_file_name(area_id, &Local::now()))
}

/// Sibling path of `image` with `suffix` added to the file stem, always PNG.
///
/// `images/area_1.png` with `mask` becomes `images/area_1_mask.png`.
pub fn derived_path(image: &Path, suffix: &str) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    image.with_file_name(format!("{}_{}.png", stem, suffix))
}
