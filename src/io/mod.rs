//! I/O operations module
//!
//! Directory listing and timed file reads, behind a trait so the
//! benchmark stages can be exercised without real disks.

pub mod buffer;
pub mod disk;

pub use buffer::ReadBuffer;
pub use disk::{BenchFile, DiskIO, PlatformDiskIO, ReadTiming};
