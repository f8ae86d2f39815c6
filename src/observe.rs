//! Observer interface for conversion progress and data-quality signals.
//!
//! Converters never print. Every noteworthy step is reported as a
//! [`ConversionEvent`] to an injected [`ConversionObserver`]; the
//! [`LogObserver`] forwards events to the `log` facade at a configurable
//! [`Verbosity`], and the [`RecordingObserver`] keeps them for inspection.
//!
//! # Example
//!
//! ```
//! use olx2pl::observe::{ConversionEvent, ConversionObserver, RecordingObserver};
//! use olx2pl::model::ProblemShape;
//!
//! let mut observer = RecordingObserver::new();
//! observer.on_event(&ConversionEvent::Classified {
//!     shape: ProblemShape::Checkbox,
//! });
//! assert_eq!(observer.events().len(), 1);
//! ```

use std::fmt;

use crate::model::ProblemShape;

/// Where a question prompt was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptSource {
    /// A `<label>` element
    Label,
    /// A run of this many `<p>` elements
    Paragraphs(usize),
}

/// Something that happened while converting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionEvent {
    /// Conversion of a source document started.
    Started { source: String },
    /// The document was classified.
    Classified { shape: ProblemShape },
    /// A prompt source was selected.
    PromptSelected { source: PromptSource },
    /// Neither a label nor a paragraph was found; an empty prompt is emitted.
    MissingPrompt,
    /// Choice answers were collected.
    ChoicesCollected { total: usize, correct: usize },
    /// A numeric sub-question was emitted.
    SubQuestion {
        slot: String,
        prompt: String,
        answer: String,
    },
    /// Hints were collected.
    HintsCollected { count: usize },
    /// Worked-solution paragraphs were collected.
    ExplanationsCollected { containers: usize, paragraphs: usize },
    /// The document matched no known shape.
    Unrecognized { tags: Vec<String> },
    /// A problem could not be converted and was left out.
    ProblemSkipped { source: String, reason: String },
    /// A problem folder was written.
    ProblemWritten { id: String, shape: ProblemShape },
}

/// How loud an event is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventLevel {
    /// Internal detail of a single conversion
    Detail,
    /// Progress of a conversion run
    Progress,
    /// Data-quality problem the operator should look at
    Warning,
}

impl ConversionEvent {
    /// Severity of this event.
    pub fn level(&self) -> EventLevel {
        match self {
            // An unrecognized document also fails with an error, which the
            // caller reports once.
            ConversionEvent::MissingPrompt | ConversionEvent::ProblemSkipped { .. } => {
                EventLevel::Warning
            }
            ConversionEvent::Started { .. }
            | ConversionEvent::Classified { .. }
            | ConversionEvent::ProblemWritten { .. } => EventLevel::Progress,
            _ => EventLevel::Detail,
        }
    }
}

impl fmt::Display for ConversionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionEvent::Started { source } => write!(f, "converting {}", source),
            ConversionEvent::Classified { shape } => write!(f, "classified as {}", shape),
            ConversionEvent::PromptSelected { source } => match source {
                PromptSource::Label => write!(f, "prompt taken from <label>"),
                PromptSource::Paragraphs(n) => write!(f, "prompt taken from {} paragraph(s)", n),
            },
            ConversionEvent::MissingPrompt => write!(f, "no prompt found, emitting empty panel"),
            ConversionEvent::ChoicesCollected { total, correct } => {
                write!(f, "{} choice(s), {} correct", total, correct)
            }
            ConversionEvent::SubQuestion {
                slot,
                prompt,
                answer,
            } => write!(f, "{} = {} ({:?})", slot, answer, prompt),
            ConversionEvent::HintsCollected { count } => write!(f, "{} hint(s)", count),
            ConversionEvent::ExplanationsCollected {
                containers,
                paragraphs,
            } => write!(
                f,
                "{} solution block(s), {} paragraph(s)",
                containers, paragraphs
            ),
            ConversionEvent::Unrecognized { tags } => {
                write!(f, "unhandled problem shape (tags: {})", tags.join(", "))
            }
            ConversionEvent::ProblemSkipped { source, reason } => {
                write!(f, "skipped {}: {}", source, reason)
            }
            ConversionEvent::ProblemWritten { id, shape } => write!(f, "wrote {} ({})", id, shape),
        }
    }
}

/// Receiver of conversion events.
pub trait ConversionObserver {
    /// Called for every event, in order.
    fn on_event(&mut self, event: &ConversionEvent);
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl ConversionObserver for NullObserver {
    fn on_event(&mut self, _event: &ConversionEvent) {}
}

/// How much the [`LogObserver`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Warnings only
    Quiet,
    /// Warnings and progress
    #[default]
    Normal,
    /// Everything
    Verbose,
}

impl Verbosity {
    /// Whether events of `level` are reported.
    pub fn admits(self, level: EventLevel) -> bool {
        match self {
            Verbosity::Quiet => level >= EventLevel::Warning,
            Verbosity::Normal => level >= EventLevel::Progress,
            Verbosity::Verbose => true,
        }
    }

    /// Map a `-v` count to a verbosity: warnings only by default, then
    /// progress, then everything.
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Verbosity::Quiet,
            1 => Verbosity::Normal,
            _ => Verbosity::Verbose,
        }
    }

    /// `env_logger` filter matching this verbosity.
    pub fn log_filter(self) -> &'static str {
        match self {
            Verbosity::Quiet => "warn",
            Verbosity::Normal => "info",
            Verbosity::Verbose => "debug",
        }
    }
}

/// Observer that forwards events to the `log` facade.
///
/// Warnings go to `warn!`, progress to `info!`, details to `debug!`. The
/// source of the most recent [`ConversionEvent::Started`] prefixes every
/// line so each warning names its document.
#[derive(Debug, Clone, Default)]
pub struct LogObserver {
    verbosity: Verbosity,
    current: Option<String>,
}

impl LogObserver {
    /// Create a log observer with the given verbosity.
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            current: None,
        }
    }

    /// The configured verbosity.
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }
}

impl ConversionObserver for LogObserver {
    fn on_event(&mut self, event: &ConversionEvent) {
        if let ConversionEvent::Started { source } = event {
            self.current = Some(source.clone());
        }

        let level = event.level();
        if !self.verbosity.admits(level) {
            return;
        }

        let prefix = match (&self.current, event) {
            (_, ConversionEvent::Started { .. } | ConversionEvent::ProblemSkipped { .. }) => {
                String::new()
            }
            (Some(source), _) => format!("[{}] ", source),
            (None, _) => String::new(),
        };

        match level {
            EventLevel::Warning => log::warn!("{}{}", prefix, event),
            EventLevel::Progress => log::info!("{}{}", prefix, event),
            EventLevel::Detail => log::debug!("{}{}", prefix, event),
        }
    }
}

/// Observer that stores every event.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Vec<ConversionEvent>,
}

impl RecordingObserver {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, in order.
    pub fn events(&self) -> &[ConversionEvent] {
        &self.events
    }

    /// Recorded events at warning level.
    pub fn warnings(&self) -> Vec<&ConversionEvent> {
        self.events
            .iter()
            .filter(|e| e.level() == EventLevel::Warning)
            .collect()
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl ConversionObserver for RecordingObserver {
    fn on_event(&mut self, event: &ConversionEvent) {
        self.events.push(event.clone());
    }
}

/// Observer that fans events out to several observers, in order.
#[derive(Default)]
pub struct CompositeObserver<'a> {
    observers: Vec<&'a mut dyn ConversionObserver>,
}

impl<'a> CompositeObserver<'a> {
    /// Create an empty composite.
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    /// Add an observer to the chain.
    pub fn with_observer(mut self, observer: &'a mut dyn ConversionObserver) -> Self {
        self.observers.push(observer);
        self
    }
}

impl ConversionObserver for CompositeObserver<'_> {
    fn on_event(&mut self, event: &ConversionEvent) {
        for observer in self.observers.iter_mut() {
            observer.on_event(event);
        }
    }
}
