//! Problem and course conversion.
//!
//! [`ProblemConverter`] turns one problem document into an
//! [`EmissionResult`]; [`CourseConverter`] walks a chapter and writes a
//! question folder per problem plus the assessment manifest.
//!
//! # Example
//!
//! ```no_run
//! use olx2pl::convert::{ConvertOptions, ProblemConverter};
//! use olx2pl::observe::NullObserver;
//!
//! fn main() -> olx2pl::Result<()> {
//!     let converter = ProblemConverter::new(ConvertOptions::default());
//!     let result = converter.convert_file("course/problem/abc.xml", &mut NullObserver)?;
//!     println!("{}", result.question_markup);
//!     Ok(())
//! }
//! ```

mod course;
mod manifest;
mod paths;
mod report;

pub use course::{parse_highlights, CourseConverter};
pub use manifest::{
    uuid_v4, write_json, AccessRule, AssessmentInfo, ManifestOptions, QuestionInfo, Zone,
    ZoneQuestion, ASSESSMENT_INFO_FILE, QUESTION_INFO_FILE,
};
pub use paths::{allocate_dir, sanitize_filename, DEFAULT_FILENAME};
pub use report::{ConversionReport, ConversionStats, ConvertedProblem, SkippedProblem};

use std::fs;
use std::path::Path;

use crate::classify::classify;
use crate::error::Result;
use crate::model::{tags, EmissionResult, Element};
use crate::observe::{ConversionEvent, ConversionObserver, Verbosity};
use crate::parser::{OlxParser, ParseOptions};
use crate::render::{emit, JsonFormat, RenderOptions};

/// File name of the question markup.
pub const QUESTION_MARKUP_FILE: &str = "question.html";

/// File name of the answer-key script.
pub const ANSWER_KEY_FILE: &str = "server.py";

/// Options for problem and course conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Rendering options
    pub render: RenderOptions,

    /// Metadata options
    pub manifest: ManifestOptions,

    /// Verbosity of the default log observer
    pub verbosity: Verbosity,

    /// Format of written JSON files
    pub json_format: JsonFormat,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Set metadata options.
    pub fn with_manifest_options(mut self, options: ManifestOptions) -> Self {
        self.manifest = options;
        self
    }

    /// Set verbosity.
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set JSON output format.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }
}

/// Converts single problem documents.
#[derive(Debug, Clone, Default)]
pub struct ProblemConverter {
    options: ConvertOptions,
}

impl ProblemConverter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Classify and emit a parsed problem.
    ///
    /// Unrecognized documents fail with
    /// [`Error::UnrecognizedShape`](crate::Error::UnrecognizedShape).
    pub fn convert(
        &self,
        doc: &Element,
        observer: &mut dyn ConversionObserver,
    ) -> Result<EmissionResult> {
        let shape = classify(doc)?;
        observer.on_event(&ConversionEvent::Classified { shape });
        emit(doc, shape, &self.options.render, observer)
    }

    /// Parse a `<problem>` file and convert it.
    pub fn convert_file<P: AsRef<Path>>(
        &self,
        path: P,
        observer: &mut dyn ConversionObserver,
    ) -> Result<EmissionResult> {
        let path = path.as_ref();
        observer.on_event(&ConversionEvent::Started {
            source: path.display().to_string(),
        });
        let doc = OlxParser::with_options(ParseOptions::new().expect_root(tags::PROBLEM))
            .parse_file(path)?;
        self.convert(&doc, observer)
    }
}

/// Files making up one question folder.
#[derive(Debug, Clone)]
pub struct ProblemArtifacts {
    /// Markup and optional answer key
    pub emission: EmissionResult,

    /// Metadata, if `info.json` should be written
    pub info: Option<QuestionInfo>,
}

impl ProblemArtifacts {
    pub fn new(emission: EmissionResult) -> Self {
        Self {
            emission,
            info: None,
        }
    }

    /// Attach question metadata.
    pub fn with_info(mut self, info: QuestionInfo) -> Self {
        self.info = Some(info);
        self
    }

    /// Write the question files into an existing directory.
    pub fn write_to(&self, dir: &Path, format: JsonFormat) -> Result<()> {
        if let Some(info) = &self.info {
            write_json(dir, QUESTION_INFO_FILE, info, format)?;
        }
        fs::write(
            dir.join(QUESTION_MARKUP_FILE),
            &self.emission.question_markup,
        )?;
        if let Some(code) = &self.emission.answer_key {
            fs::write(dir.join(ANSWER_KEY_FILE), code)?;
        }
        Ok(())
    }
}
