//! Benchmark runner
//!
//! Drives one run from folder scan to report: validate the folder, pick the
//! measurement mode from the warm-up file, warm caches for a fixed time,
//! time one read per remaining file, then aggregate.

use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{BenchmarkConfig, MeasurementMode};
use crate::io::{BenchFile, DiskIO, PlatformDiskIO, ReadBuffer, ReadTiming};
use crate::models::{BenchmarkReport, Measurement, Statistics, WarmupSummary};
use crate::util::units::{format_bytes, format_duration};
use crate::{ReadBenchError, Result};

/// The files of one run: the warm-up file plus the measured files in
/// directory-listing order, all measured files sharing one length.
#[derive(Debug, Clone)]
pub struct FileSet {
    pub folder: PathBuf,
    pub warmup: BenchFile,
    pub files: Vec<BenchFile>,
}

impl FileSet {
    /// List and check the folder named by `config`
    pub fn scan<D: DiskIO>(config: &BenchmarkConfig, disk_io: &D) -> Result<Self> {
        config.validate()?;

        let mut files = disk_io.list_files(&config.folder)?;
        log::debug!(
            "Found {} files in {}",
            files.len(),
            config.folder.display()
        );

        if files.len() < config.min_files {
            return Err(ReadBenchError::InsufficientFiles {
                folder: config.folder.clone(),
                found: files.len(),
                required: config.min_files,
            });
        }

        let warmup = files.remove(0);
        let expected = files[0].len;
        if let Some(odd) = files.iter().find(|f| f.len != expected) {
            return Err(ReadBenchError::SizeMismatch {
                path: odd.path.clone(),
                expected,
                actual: odd.len,
            });
        }

        Ok(Self {
            folder: config.folder.clone(),
            warmup,
            files,
        })
    }

    /// Length shared by every measured file
    pub fn file_len(&self) -> u64 {
        self.files.first().map(|f| f.len).unwrap_or(0)
    }
}

/// Everything fixed before the first timed read
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub files: FileSet,
    pub mode: MeasurementMode,
    /// Bytes per timed read of a measured file
    pub read_len: u64,
    /// Bytes per timed read of the warm-up file
    pub warmup_read_len: u64,
    /// True when measured files are longer than the read cap
    pub capped: bool,
}

impl RunPlan {
    /// Buffer size large enough for both warm-up and measured reads
    pub fn buffer_len(&self) -> u64 {
        self.read_len.max(self.warmup_read_len).max(1)
    }
}

/// Sequential benchmark executor
pub struct BenchmarkRunner<D: DiskIO = PlatformDiskIO> {
    config: BenchmarkConfig,
    disk_io: D,
    show_progress: bool,
}

impl BenchmarkRunner<PlatformDiskIO> {
    /// Create a runner reading through `std::fs`
    pub fn new(config: BenchmarkConfig) -> Self {
        Self::with_disk_io(config, PlatformDiskIO::new())
    }
}

impl<D: DiskIO> BenchmarkRunner<D> {
    pub fn with_disk_io(config: BenchmarkConfig, disk_io: D) -> Self {
        Self {
            config,
            disk_io,
            show_progress: false,
        }
    }

    /// Draw progress on stderr while warming up and measuring
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    pub fn disk_io(&self) -> &D {
        &self.disk_io
    }

    /// Execute the whole benchmark, writing user notices to `out`
    pub fn run<W: Write>(&self, out: &mut W) -> Result<BenchmarkReport> {
        let plan = self.prepare()?;

        writeln!(out, "{}", plan.mode.description())?;
        if plan.capped {
            let cap = format_bytes(self.config.read_cap);
            writeln!(
                out,
                "Files are larger than {cap}, only the first {cap} of each file will be read"
            )?;
        }

        let mut buffer = ReadBuffer::new(plan.buffer_len())?;

        writeln!(
            out,
            "Warming up for {}",
            format_duration(self.config.warmup_duration)
        )?;
        out.flush()?;
        let warmup = self.warm_up(&plan, &mut buffer)?;

        let samples = self.measure(&plan, &mut buffer)?;
        self.report(&plan, warmup, &samples)
    }

    /// Scan the folder and fix the measurement mode
    pub fn prepare(&self) -> Result<RunPlan> {
        let files = FileSet::scan(&self.config, &self.disk_io)?;

        let mode = MeasurementMode::select(files.warmup.len, self.config.latency_threshold);
        let read_len = mode.read_len(files.file_len(), self.config.read_cap);
        let warmup_read_len = mode.read_len(files.warmup.len, self.config.read_cap);
        let capped = !mode.is_latency() && files.file_len() > self.config.read_cap;

        log::info!(
            "{:?} mode: {} measured files of {}, warm-up file {}",
            mode,
            files.files.len(),
            format_bytes(files.file_len()),
            files.warmup.path.display()
        );
        log::debug!("Read length {} bytes, warm-up read length {} bytes", read_len, warmup_read_len);

        Ok(RunPlan {
            files,
            mode,
            read_len,
            warmup_read_len,
            capped,
        })
    }

    /// Read the warm-up file repeatedly until the warm-up duration has
    /// passed. Samples are discarded.
    pub fn warm_up(&self, plan: &RunPlan, buffer: &mut ReadBuffer) -> Result<WarmupSummary> {
        let pb = self.progress_bar(None, "Warming up");
        let deadline = self.config.warmup_duration;
        let start = Instant::now();
        let mut iterations = 0u64;

        loop {
            self.timed_read(&plan.files.warmup, plan.mode, plan.warmup_read_len, buffer)?;
            iterations += 1;
            pb.set_position(iterations);
            pb.tick();
            if start.elapsed() >= deadline {
                break;
            }
        }

        pb.finish_and_clear();
        let elapsed = start.elapsed();
        log::info!("Warm-up finished: {} reads in {:?}", iterations, elapsed);
        Ok(WarmupSummary { iterations, elapsed })
    }

    /// Time exactly one read of every measured file, in listing order
    pub fn measure(&self, plan: &RunPlan, buffer: &mut ReadBuffer) -> Result<Vec<Duration>> {
        let pb = self.progress_bar(Some(plan.files.files.len() as u64), "Measuring");
        let mut samples = Vec::with_capacity(plan.files.files.len());

        for file in &plan.files.files {
            let timing = self.timed_read(file, plan.mode, plan.read_len, buffer)?;
            log::trace!("{}: {:?}", file.path.display(), timing.elapsed);
            samples.push(timing.elapsed);
            pb.inc(1);
        }

        pb.finish_and_clear();
        Ok(samples)
    }

    /// Aggregate samples into the final report
    pub fn report(
        &self,
        plan: &RunPlan,
        warmup: WarmupSummary,
        samples: &[Duration],
    ) -> Result<BenchmarkReport> {
        let statistics =
            Statistics::from_samples(samples).ok_or_else(|| ReadBenchError::InsufficientFiles {
                folder: plan.files.folder.clone(),
                found: 0,
                required: self.config.min_files,
            })?;
        log::debug!(
            "mean {:.6} ms, std dev {:.6} ms, 95% half-width {:.6} ms",
            statistics.mean_ms(),
            statistics.std_dev_ms(),
            statistics.error_ms()
        );

        let report = BenchmarkReport {
            timestamp: chrono::Utc::now(),
            config: self.config.clone(),
            file_count: plan.files.files.len(),
            file_len: plan.files.file_len(),
            warmup,
            statistics,
            measurement: Measurement::derive(plan.mode, &statistics, plan.read_len),
        };

        match serde_json::to_string(&report) {
            Ok(json) => log::debug!("Report: {}", json),
            Err(e) => log::warn!("Could not serialize report: {}", e),
        }
        log::info!("{}", report.summary());
        Ok(report)
    }

    fn timed_read(
        &self,
        file: &BenchFile,
        mode: MeasurementMode,
        len: u64,
        buffer: &mut ReadBuffer,
    ) -> Result<ReadTiming> {
        let timing = self
            .disk_io
            .timed_read(&file.path, buffer.slice(len))
            .map_err(|source| ReadBenchError::Read {
                path: file.path.clone(),
                source,
            })?;

        // an empty file yields no byte in latency mode, which is still a valid sample
        if !mode.is_latency() && timing.bytes_read < len {
            return Err(ReadBenchError::ShortRead {
                path: file.path.clone(),
                expected: len,
                actual: timing.bytes_read,
            });
        }
        Ok(timing)
    }

    fn progress_bar(&self, len: Option<u64>, msg: &'static str) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = match len {
            Some(len) => {
                let pb = ProgressBar::new(len);
                if let Ok(style) = ProgressStyle::with_template("{msg} [{bar:30}] {pos}/{len}") {
                    pb.set_style(style);
                }
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} ({pos} reads, {elapsed})") {
                    pb.set_style(style);
                }
                pb
            }
        };
        pb.set_message(msg);
        pb
    }
}
