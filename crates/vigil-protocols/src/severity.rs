//! Conventional severity bands.
//!
//! Severity levels are plain integers; these constants name the bands used
//! by the built-in plugins when choosing a log level or a display label.

/// Informational.
pub const INFO: i32 = 100;
/// Warning.
pub const WARNING: i32 = 200;
/// Severe.
pub const SEVERE: i32 = 300;

/// Display label for a severity level.
pub fn severity_name(level: i32) -> &'static str {
    if level >= SEVERE {
        "SEVERE"
    } else if level >= WARNING {
        "WARNING"
    } else {
        "INFO"
    }
}
