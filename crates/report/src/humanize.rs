//! Byte-size formatting for table headings and chart ticks.

const KB: f64 = 1024.0;
const MB: f64 = KB * 1024.0;
const GB: f64 = MB * 1024.0;
const TB: f64 = GB * 1024.0;

/// Format a byte count as `N Bytes` below one kilobyte, else with two
/// decimals in the largest fitting 1024-based unit.
pub fn human_bytes(bytes: u64) -> String {
    let b = bytes as f64;
    if b < KB {
        if bytes == 1 {
            "1 Byte".to_string()
        } else {
            format!("{bytes} Bytes")
        }
    } else if b < MB {
        format!("{:.2} KB", b / KB)
    } else if b < GB {
        format!("{:.2} MB", b / MB)
    } else if b < TB {
        format!("{:.2} GB", b / GB)
    } else {
        format!("{:.2} TB", b / TB)
    }
}

/// Human-readable size of an array of `elements` values `element_bytes` wide.
pub fn human_array_size(elements: u64, element_bytes: u64) -> String {
    human_bytes(elements.saturating_mul(element_bytes))
}
