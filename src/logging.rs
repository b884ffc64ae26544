use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

/// Appends one `timestamp,level,message` row to `logs-YYYY-MM-DD.csv` in `dir`.
pub fn log_to_csv(dir: &Path, level: &str, message: &str) {
    let now = chrono::Utc::now();
    let filename = dir.join(format!("logs-{}.csv", now.format("%Y-%m-%d")));

    if let Ok(file) = OpenOptions::new().append(true).create(true).open(&filename) {
        let mut writer = csv::Writer::from_writer(file);
        if writer
            .write_record([now.to_rfc3339().as_str(), level, message])
            .is_ok()
        {
            let _ = writer.flush();
        }
    } else {
        eprintln!("could not open log file {}", filename.display());
    }
}

/// Mirrors every tracing event into the daily CSV log.
pub struct CsvLogLayer {
    dir: PathBuf,
}

impl CsvLogLayer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        CsvLogLayer { dir: dir.into() }
    }
}

impl<S: Subscriber> Layer<S> for CsvLogLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        log_to_csv(&self.dir, event.metadata().level().as_str(), &visitor.finish());
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields.trim_start().to_string()
        } else {
            format!("{}{}", self.message, self.fields)
        }
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

/// Installs stdout + CSV logging. Safe to call more than once.
pub fn init(log_dir: &Path, level: LevelFilter) {
    if let Err(e) = std::fs::create_dir_all(log_dir) {
        eprintln!("could not create log directory {}: {}", log_dir.display(), e);
    }

    let result = tracing_subscriber::registry()
        .with(level)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .with(CsvLogLayer::new(log_dir))
        .try_init();

    if result.is_err() {
        tracing::debug!("logging already initialised");
    }
}
