//! Theme and formatting helpers for ptop.
//!
//! btop-style dark theme: cool colors for idle values, warm for loaded.

use ratatui::style::Color;

/// Color for percentage values (0-100).
///
/// Cyan at idle, green through yellow in the middle, red when critical.
pub fn percent_color(percent: f64) -> Color {
    let p = percent.clamp(0.0, 100.0);

    if p >= 90.0 {
        Color::Rgb(255, 64, 64)
    } else if p >= 75.0 {
        Color::Rgb(255, 140, 64)
    } else if p >= 50.0 {
        Color::Rgb(255, 210, 64)
    } else if p >= 25.0 {
        Color::Rgb(140, 220, 80)
    } else {
        Color::Rgb(80, 200, 200)
    }
}

/// Color for I/O rates (bytes per second).
///
/// Same ramp as [`percent_color`], scaled so 100 MB/s is critical.
pub fn rate_color(bytes_per_sec: f64) -> Color {
    const FULL_SCALE: f64 = 100.0 * 1024.0 * 1024.0;
    percent_color(bytes_per_sec / FULL_SCALE * 100.0)
}

/// Unit labels for [`humanize_bytes`], in ascending order.
const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Formats a byte count through B -> KB -> MB -> GB -> TB.
///
/// Divides by 1024 while the value reaches the next unit and a larger unit
/// remains, then prints two decimal places: `1536.0` -> `"1.50 KB"`.
pub fn humanize_bytes(bytes: f64) -> String {
    let mut value = bytes;
    let mut unit = 0;

    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{:.2} {}", value, UNITS[unit])
}

/// Formats a per-second rate: `"1.50 KB/s"`.
pub fn humanize_rate(bytes_per_sec: f64) -> String {
    format!("{}/s", humanize_bytes(bytes_per_sec))
}
