use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// A file taking part in the benchmark, with its length at scan time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchFile {
    pub path: PathBuf,
    pub len: u64,
}

/// Outcome of a single timed read
#[derive(Debug, Clone, Copy)]
pub struct ReadTiming {
    /// Time spent inside the read calls only
    pub elapsed: Duration,
    /// Bytes actually transferred
    pub bytes_read: u64,
}

/// Filesystem operations needed by the benchmark
pub trait DiskIO {
    /// List the regular files of `folder` in the order the filesystem returns them
    fn list_files(&self, folder: &Path) -> io::Result<Vec<BenchFile>>;

    /// Open `path`, time reads until `buf` is full or end-of-file, then close it.
    /// Opening and closing happen outside the timed region.
    fn timed_read(&self, path: &Path, buf: &mut [u8]) -> io::Result<ReadTiming>;
}

/// `std::fs` implementation, reading through the OS page cache
#[derive(Clone, Debug, Default)]
pub struct PlatformDiskIO;

impl PlatformDiskIO {
    pub fn new() -> Self {
        Self
    }
}

impl DiskIO for PlatformDiskIO {
    fn list_files(&self, folder: &Path) -> io::Result<Vec<BenchFile>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(folder)? {
            let entry = entry?;
            let path = entry.path();
            // fs::metadata follows symlinks
            let metadata = match fs::metadata(&path) {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!("Skipping dangling entry {}", path.display());
                    continue;
                }
                Err(e) => {
                    return Err(io::Error::new(e.kind(), format!("{}: {}", path.display(), e)));
                }
            };
            if !metadata.is_file() {
                log::debug!("Skipping non-file entry {}", path.display());
                continue;
            }
            files.push(BenchFile {
                path,
                len: metadata.len(),
            });
        }
        Ok(files)
    }

    fn timed_read(&self, path: &Path, buf: &mut [u8]) -> io::Result<ReadTiming> {
        let mut file = File::open(path)?;

        let start = Instant::now();
        let bytes_read = fill_from(&mut file, buf)?;
        let elapsed = start.elapsed();

        drop(file);
        Ok(ReadTiming {
            elapsed,
            bytes_read: bytes_read as u64,
        })
    }
}

/// Read into `buf` until it is full or the reader hits end-of-file.
/// Returns the number of bytes read.
fn fill_from<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
