//! # olx2pl
//!
//! Convert Open edX (OLX) course exports into PrairieLearn questions and
//! assessments.
//!
//! A problem document is classified into one of a few supported shapes
//! and rendered to question markup; numeric problems also get a generated
//! answer key. The course walker turns a whole chapter into one
//! assessment with a question folder per problem.
//!
//! ## Quick Start
//!
//! ```no_run
//! use olx2pl::{classify, parse_file, render, observe::NullObserver};
//!
//! fn main() -> olx2pl::Result<()> {
//!     let doc = parse_file("course/problem/abc.xml")?;
//!     let shape = classify(&doc)?;
//!
//!     let options = render::RenderOptions::default();
//!     let result = render::emit(&doc, shape, &options, &mut NullObserver)?;
//!     println!("{}", result.question_markup);
//!     if let Some(key) = &result.answer_key {
//!         println!("{}", key);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Supported shapes
//!
//! - **Choice**: `<multiplechoiceresponse>` and `<choiceresponse>`
//! - **Numeric**: one `<numericalresponse>`, several paired with `<ul>`
//!   lists, or several with interleaved paragraph prompts

pub mod classify;
pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod observe;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use classify::{classify, MarkerCounts};
pub use convert::{
    ConversionReport, ConvertOptions, CourseConverter, ManifestOptions, ProblemArtifacts,
    ProblemConverter,
};
pub use detect::{detect_kind, detect_kind_from_bytes, detect_kind_from_path, OlxKind};
pub use error::{Error, Result};
pub use model::{EmissionResult, Element, ProblemShape};
pub use observe::{ConversionEvent, ConversionObserver, LogObserver, Verbosity};
pub use parser::{OlxParser, ParseOptions};
pub use render::{JsonFormat, PromptRule, RenderOptions};

use std::path::{Path, PathBuf};

/// Parse an OLX file into an element tree.
///
/// # Example
///
/// ```no_run
/// use olx2pl::parse_file;
///
/// let doc = parse_file("course/problem/abc.xml").unwrap();
/// println!("root: <{}>", doc.name);
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Element> {
    OlxParser::new().parse_file(path)
}

/// Parse OLX markup from a string.
pub fn parse_str(content: &str) -> Result<Element> {
    OlxParser::new().parse_str(content)
}

/// Parse OLX markup from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Element> {
    OlxParser::new().parse_bytes(data)
}

/// Convert one problem file with default options.
///
/// Progress and data-quality warnings go to the `log` facade.
///
/// # Example
///
/// ```no_run
/// use olx2pl::convert_problem_file;
///
/// let result = convert_problem_file("course/problem/abc.xml").unwrap();
/// std::fs::write("question.html", &result.question_markup).unwrap();
/// ```
pub fn convert_problem_file<P: AsRef<Path>>(path: P) -> Result<EmissionResult> {
    Olx2Pl::new().convert_problem(path)
}

/// Convert a chapter into `output_base/chapter_<n>` with default options.
pub fn convert_chapter<P: AsRef<Path>, Q: AsRef<Path>>(
    chapter_file: P,
    output_base: Q,
) -> Result<ConversionReport> {
    Olx2Pl::new().convert_chapter(chapter_file, output_base)
}

/// Builder for converting problems and chapters.
///
/// # Example
///
/// ```no_run
/// use olx2pl::Olx2Pl;
///
/// let report = Olx2Pl::new()
///     .with_hint_after(2)
///     .with_points(vec![3, 2, 1])
///     .with_course_root("export/course")
///     .convert_chapter("export/course/chapter/week1.xml", "out")?;
/// println!("{} problems converted", report.stats.converted());
/// # Ok::<(), olx2pl::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Olx2Pl {
    options: ConvertOptions,
    course_root: Option<PathBuf>,
}

impl Olx2Pl {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all conversion options.
    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    /// Set after how many submissions hints appear.
    pub fn with_hint_after(mut self, submissions: u32) -> Self {
        self.options.render = self.options.render.with_hint_after(submissions);
        self
    }

    /// Set numeric tolerances.
    pub fn with_tolerance(mut self, rtol: f64, atol: f64) -> Self {
        self.options.render = self.options.render.with_tolerance(rtol, atol);
        self
    }

    /// Set points per attempt for every question.
    pub fn with_points(mut self, points: Vec<u32>) -> Self {
        self.options.manifest = self.options.manifest.with_points(points);
        self
    }

    /// Set log verbosity.
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.options.verbosity = verbosity;
        self
    }

    /// Set the format of written JSON files.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.options.json_format = format;
        self
    }

    /// Set the course root used to resolve referenced files.
    pub fn with_course_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.course_root = Some(root.into());
        self
    }

    /// The configured options.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert one problem file, logging through a [`LogObserver`].
    pub fn convert_problem<P: AsRef<Path>>(&self, path: P) -> Result<EmissionResult> {
        let mut observer = LogObserver::new(self.options.verbosity);
        ProblemConverter::new(self.options.clone()).convert_file(path, &mut observer)
    }

    /// Convert a chapter, logging through a [`LogObserver`].
    pub fn convert_chapter<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        chapter_file: P,
        output_base: Q,
    ) -> Result<ConversionReport> {
        let mut observer = LogObserver::new(self.options.verbosity);
        self.course_converter().convert_chapter(
            chapter_file.as_ref(),
            output_base.as_ref(),
            &mut observer,
        )
    }

    /// A course converter carrying this builder's settings.
    pub fn course_converter(&self) -> CourseConverter {
        let converter = CourseConverter::new(self.options.clone());
        match &self.course_root {
            Some(root) => converter.with_course_root(root.clone()),
            None => converter,
        }
    }
}
