use chrono::{DateTime, Local, Utc};

/// Format bytes into human-readable size string
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format a file age in the largest unit it fills: seconds, minutes,
/// hours, or days
pub fn format_age(modified: DateTime<Utc>) -> String {
    let mut age = (Utc::now() - modified).num_seconds().max(0);
    for (unit, step) in [("s", 60), ("m", 60), ("h", 24)] {
        if age < step {
            return format!("{}{}", age, unit);
        }
        age /= step;
    }
    format!("{}d", age)
}

/// Format a modification time in local time
pub fn format_mtime(modified: DateTime<Utc>) -> String {
    modified
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Format file count with appropriate plural
pub fn format_count(count: usize) -> String {
    if count == 1 {
        "1 file".to_string()
    } else {
        format!("{} files", count)
    }
}
