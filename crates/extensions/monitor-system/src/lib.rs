//! Host resource checks for Vigil.
//!
//! This extension provides:
//! - `cpu`: global CPU usage percent
//! - `memory`: used memory percent
//! - `disk`: used space percent of the fullest disk, or of one mount point

mod cpu;
mod disk;
mod extension;
mod memory;

pub use cpu::CpuMonitorType;
pub use disk::DiskMonitorType;
pub use extension::SystemMonitorsExtension;
pub use memory::MemoryMonitorType;

/// Integer percentage of `used` over `total`, rounded down. Zero when
/// `total` is zero.
pub fn percent(used: u64, total: u64) -> i64 {
    if total == 0 {
        return 0;
    }
    ((used as u128 * 100) / total as u128) as i64
}
