use std::{
  fs::{self, File, OpenOptions},
  io::{self, BufRead, BufReader, Write},
  path::{Path, PathBuf},
  sync::{Arc, Mutex},
};

use tracing_subscriber::{EnvFilter, fmt::{self, time::LocalTime}, prelude::*};

use crate::configs::{LogFileConfig, LoggingConfig};

/// Builds the filter directive from `[logging]`: the base level followed by
/// any extra per-target filters.
pub fn filter_directive(logging: Option<&LoggingConfig>) -> String {
  let level = logging
    .and_then(|l| l.level.as_deref())
    .unwrap_or("info");

  match logging.and_then(|l| l.filters.as_deref()) {
    Some(filters) if !filters.is_empty() => format!("{},{}", level, filters),
    _ => level.to_string(),
  }
}

pub fn init(logging: Option<&LoggingConfig>) {
  // RUST_LOG wins over the config file
  let env_filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(filter_directive(logging)));

  let stdout_layer = fmt::layer()
    .with_timer(LocalTime::rfc_3339())
    .with_target(true)
    .with_line_number(true)
    .with_file(false);

  let file_layer = logging.and_then(|l| l.file.as_ref()).map(|file_config| {
    fmt::layer()
      .with_writer(LineCappedWriter::new(file_config))
      .with_timer(LocalTime::rfc_3339())
      .with_target(true)
      .with_line_number(true)
      .with_file(false)
      .with_ansi(false)
  });

  tracing_subscriber::registry()
    .with(env_filter)
    .with(stdout_layer)
    .with(file_layer)
    .init();
}

/// Appends log output to a file and trims it back to the newest `max_lines`
/// lines every time enough new lines have accumulated.
#[derive(Clone)]
pub struct LineCappedWriter {
  path: PathBuf,
  max_lines: u32,
  pending_lines: Arc<Mutex<u32>>,
}

impl LineCappedWriter {
  pub fn new(config: &LogFileConfig) -> Self {
    let path = PathBuf::from(&config.path);
    if let Some(parent) = path.parent() {
      if let Err(e) = fs::create_dir_all(parent) {
        eprintln!("Failed to create log directory {}: {}", parent.display(), e);
      }
    }

    Self {
      path,
      max_lines: config.max_lines.max(1),
      pending_lines: Arc::new(Mutex::new(0)),
    }
  }

  fn trim_threshold(&self) -> u32 {
    (self.max_lines / 10).max(50)
  }

  fn trim(&self) -> io::Result<()> {
    if !Path::new(&self.path).exists() {
      return Ok(());
    }

    let reader = BufReader::new(File::open(&self.path)?);
    let lines: Vec<String> = reader.lines().collect::<Result<_, _>>()?;
    let keep = self.max_lines as usize;
    if lines.len() <= keep {
      return Ok(());
    }

    let mut file = File::create(&self.path)?;
    for line in &lines[lines.len() - keep..] {
      writeln!(file, "{}", line)?;
    }
    Ok(())
  }
}

impl io::Write for LineCappedWriter {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    OpenOptions::new()
      .create(true)
      .append(true)
      .open(&self.path)?
      .write_all(buf)?;

    let mut pending = self.pending_lines.lock().unwrap_or_else(|e| e.into_inner());
    *pending += buf.iter().filter(|&&b| b == b'\n').count() as u32;

    if *pending >= self.trim_threshold() {
      if let Err(e) = self.trim() {
        eprintln!("Failed to trim log file: {}", e);
      }
      *pending = 0;
    }

    Ok(buf.len())
  }

  fn flush(&mut self) -> io::Result<()> {
    Ok(())
  }
}

impl<'a> fmt::MakeWriter<'a> for LineCappedWriter {
  type Writer = Self;

  fn make_writer(&'a self) -> Self::Writer {
    self.clone()
  }
}
