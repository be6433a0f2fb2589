//! Sliding-window smoothing of raw check values.

use std::collections::{HashMap, VecDeque};

/// Bounded per-key windows of recent values.
#[derive(Debug, Default)]
pub struct WindowAverager {
    windows: HashMap<String, VecDeque<i64>>,
}

impl WindowAverager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` under `key` and return the window mean once the window
    /// holds exactly `window_size` values.
    ///
    /// A window size of 0 or 1 returns `value` unchanged without buffering.
    /// The mean truncates toward zero.
    pub fn observe(&mut self, key: &str, value: i64, window_size: u32) -> Option<i64> {
        if window_size <= 1 {
            return Some(value);
        }

        let size = window_size as usize;
        let window = self.windows.entry(key.to_string()).or_default();
        window.push_back(value);
        while window.len() > size {
            window.pop_front();
        }

        if window.len() == size {
            let sum: i128 = window.iter().map(|v| *v as i128).sum();
            Some((sum / size as i128) as i64)
        } else {
            None
        }
    }

    /// Number of values buffered for `key`.
    pub fn len(&self, key: &str) -> usize {
        self.windows.get(key).map_or(0, VecDeque::len)
    }

    /// Whether no window has been created.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}
