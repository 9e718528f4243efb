//! Logger builder implementation

use std::io;

use tracing::dispatcher::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::config::{Config, Format, WriterConfig};
use crate::error::{LogError, LogResult};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Logger builder
pub struct LoggerBuilder {
    config: Config,
    writer: Option<BoxMakeWriter>,
}

impl std::fmt::Debug for LoggerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerBuilder")
            .field("config", &self.config)
            .field("custom_writer", &self.writer.is_some())
            .finish()
    }
}

/// Keeps a logger installed.
///
/// A guard from [`LoggerBuilder::build`] is inert: the global logger lives for
/// the rest of the process. A guard from [`LoggerBuilder::build_scoped`]
/// uninstalls its thread-local logger when dropped.
#[derive(Debug)]
#[must_use = "dropping a scoped guard uninstalls the logger"]
pub struct LoggerGuard {
    _scope: Option<DefaultGuard>,
}

impl LoggerBuilder {
    /// Create builder from config
    pub fn from_config(config: Config) -> Self {
        Self {
            config,
            writer: None,
        }
    }

    /// Send output to `writer` instead of the configured stream.
    pub fn with_writer<W>(mut self, writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        self.writer = Some(BoxMakeWriter::new(writer));
        self
    }

    /// Install as the process-wide logger.
    ///
    /// # Errors
    ///
    /// [`LogError::Filter`] for a bad level directive and
    /// [`LogError::AlreadyInitialized`] if a global logger is already set.
    pub fn build(self) -> LogResult<LoggerGuard> {
        let subscriber = self.subscriber()?;
        subscriber
            .try_init()
            .map_err(|_| LogError::AlreadyInitialized)?;
        Ok(LoggerGuard { _scope: None })
    }

    /// Install for the current thread only, until the guard is dropped.
    pub fn build_scoped(self) -> LogResult<LoggerGuard> {
        let subscriber = self.subscriber()?;
        Ok(LoggerGuard {
            _scope: Some(subscriber.set_default()),
        })
    }

    fn subscriber(self) -> LogResult<impl tracing::Subscriber + Send + Sync + 'static> {
        let filter = EnvFilter::try_new(&self.config.level).map_err(|e| LogError::Filter {
            filter: self.config.level.clone(),
            reason: e.to_string(),
        })?;
        let writer = self
            .writer
            .unwrap_or_else(|| stream_writer(self.config.writer));
        let layer = fmt_layer(&self.config, writer);
        Ok(Registry::default().with(layer).with(filter))
    }
}

fn stream_writer(config: WriterConfig) -> BoxMakeWriter {
    match config {
        WriterConfig::Stderr => BoxMakeWriter::new(io::stderr),
        WriterConfig::Stdout => BoxMakeWriter::new(io::stdout),
    }
}

fn fmt_layer(config: &Config, writer: BoxMakeWriter) -> BoxedLayer {
    let display = &config.display;
    let base = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(display.colors && config.format != Format::Json)
        .with_target(display.target)
        .with_file(display.source)
        .with_line_number(display.source)
        .with_thread_ids(display.thread_ids)
        .with_thread_names(display.thread_names);

    match (config.format, display.time) {
        (Format::Pretty, true) => base.pretty().boxed(),
        (Format::Pretty, false) => base.pretty().without_time().boxed(),
        (Format::Compact, true) => base.compact().boxed(),
        (Format::Compact, false) => base.compact().without_time().boxed(),
        (Format::Json, time) => {
            let json = base
                .json()
                .with_current_span(true)
                .with_span_list(display.span_list)
                .flatten_event(display.flatten);
            if time {
                json.boxed()
            } else {
                json.without_time().boxed()
            }
        }
    }
}
