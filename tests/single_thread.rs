//! The benchmark pipeline must stay on the calling thread, progress display
//! included. Kept as its own test binary so no sibling tests add threads.
#![cfg(target_os = "linux")]

use readbench::bench::BenchmarkRunner;
use readbench::config::BenchmarkConfig;
use readbench::io::{BenchFile, DiskIO, ReadTiming};
use std::cell::Cell;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::tempdir;

fn thread_count() -> usize {
    std::fs::read_dir("/proc/self/task").unwrap().count()
}

/// Records the highest process thread count seen during any read
struct ThreadCountingDisk {
    lens: Vec<u64>,
    peak: Cell<usize>,
}

impl DiskIO for ThreadCountingDisk {
    fn list_files(&self, _folder: &Path) -> io::Result<Vec<BenchFile>> {
        Ok(self
            .lens
            .iter()
            .enumerate()
            .map(|(i, &len)| BenchFile {
                path: PathBuf::from(format!("file{}", i)),
                len,
            })
            .collect())
    }

    fn timed_read(&self, _path: &Path, buf: &mut [u8]) -> io::Result<ReadTiming> {
        self.peak.set(self.peak.get().max(thread_count()));
        std::thread::sleep(Duration::from_millis(5));
        Ok(ReadTiming {
            elapsed: Duration::from_millis(5),
            bytes_read: buf.len() as u64,
        })
    }
}

#[test]
fn test_progress_display_spawns_no_threads() {
    let temp_dir = tempdir().unwrap();
    let config =
        BenchmarkConfig::new(temp_dir.path()).with_warmup_duration(Duration::from_millis(400));
    let disk = ThreadCountingDisk {
        lens: vec![500; 6],
        peak: Cell::new(0),
    };

    let before = thread_count();
    let runner = BenchmarkRunner::with_disk_io(config, disk).with_progress(true);
    let mut out = Vec::new();
    let report = runner.run(&mut out).unwrap();

    assert!(report.warmup.iterations > 1);
    let peak = runner.disk_io().peak.get();
    assert!(
        peak <= before,
        "thread count rose from {} to {} during the run",
        before,
        peak
    );
}
