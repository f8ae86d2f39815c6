//! Course walker: chapter → sequentials → verticals → problems.
//!
//! A chapter file lists its sequentials by `url_name`; each of those lives
//! in `<course root>/sequential/<url_name>.xml`, and likewise for
//! verticals and problems. Every convertible problem becomes a question
//! folder under `<output>/chapter_<n>/`, and the chapter becomes one
//! assessment whose zones are the sequentials.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use super::manifest::{
    write_json, AssessmentInfo, QuestionInfo, Zone, ZoneQuestion, ASSESSMENT_INFO_FILE,
};
use super::paths::{allocate_dir, sanitize_filename};
use super::report::ConversionReport;
use super::{ConvertOptions, ProblemArtifacts, ProblemConverter};
use crate::error::{Error, Result};
use crate::model::{tags, Element};
use crate::observe::{ConversionEvent, ConversionObserver};
use crate::parser::{OlxParser, ParseOptions};

fn chapter_number_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{1,2}").unwrap())
}

/// Turn a `highlights` attribute such as `['Motion', "Forces"]` into
/// `Motion. Forces`.
pub fn parse_highlights(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c| c == '[' || c == ']')
        .split(", ")
        .map(|item| item.trim().trim_matches(|c| c == '\'' || c == '"'))
        .collect::<Vec<_>>()
        .join(". ")
}

/// Display name of a course element, falling back to its `url_name`.
fn display_name(element: &Element, url_name: &str) -> String {
    element
        .attr(tags::ATTR_DISPLAY_NAME)
        .unwrap_or(url_name)
        .to_string()
}

/// Walks a chapter and writes question folders plus the assessment
/// manifest.
#[derive(Debug, Clone, Default)]
pub struct CourseConverter {
    options: ConvertOptions,
    course_root: Option<PathBuf>,
}

impl CourseConverter {
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            options,
            course_root: None,
        }
    }

    /// Read sequential, vertical and problem files from `root` instead of
    /// the chapter file's grandparent directory.
    pub fn with_course_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.course_root = Some(root.into());
        self
    }

    fn resolve_root(&self, chapter_file: &Path) -> Result<PathBuf> {
        if let Some(root) = &self.course_root {
            return Ok(root.clone());
        }
        chapter_file
            .parent()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .ok_or_else(|| {
                Error::Other(format!(
                    "cannot infer course root from {}",
                    chapter_file.display()
                ))
            })
    }

    /// Convert every problem of a chapter.
    ///
    /// Problems that fail to load or convert are reported to the observer,
    /// recorded in the report and skipped; they get no output folder. I/O
    /// errors while writing output abort the run.
    pub fn convert_chapter(
        &self,
        chapter_file: &Path,
        output_base: &Path,
        observer: &mut dyn ConversionObserver,
    ) -> Result<ConversionReport> {
        let chapter = OlxParser::with_options(ParseOptions::new().expect_root(tags::CHAPTER))
            .parse_file(chapter_file)?;
        let title = chapter
            .attr(tags::ATTR_DISPLAY_NAME)
            .ok_or_else(|| Error::missing_attribute(tags::CHAPTER, tags::ATTR_DISPLAY_NAME))?
            .to_string();
        let number = chapter_number_pattern()
            .find(&title)
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| {
                Error::Other(format!("chapter name {:?} contains no chapter number", title))
            })?;
        let text = chapter
            .attr(tags::ATTR_HIGHLIGHTS)
            .map(parse_highlights)
            .unwrap_or_default();

        let root = self.resolve_root(chapter_file)?;
        let chapter_dir_name = format!("chapter_{}", number);
        let output_dir = output_base.join(&chapter_dir_name);
        fs::create_dir_all(&output_dir)?;
        log::info!(
            "Converting {} into {}",
            chapter_file.display(),
            output_dir.display()
        );

        let mut walk = ChapterWalk {
            converter: ProblemConverter::new(self.options.clone()),
            options: &self.options,
            root: &root,
            output_dir: &output_dir,
            chapter_dir_name: &chapter_dir_name,
            number: &number,
            report: ConversionReport::new(&output_dir, &title),
            observer,
        };

        let mut zones = Vec::new();
        for url_name in walk.refs(&chapter, chapter_file, tags::SEQUENTIAL) {
            if let Some(zone) = walk.sequential(&url_name)? {
                zones.push(zone);
            }
        }

        let mut report = walk.report;
        report.stats.zones = zones.len() as u32;

        let info = AssessmentInfo::new(&title, &number, zones, &text, &self.options.manifest);
        write_json(
            &output_dir,
            ASSESSMENT_INFO_FILE,
            &info,
            self.options.json_format,
        )?;
        log::info!(
            "Wrote {} questions in {} zones",
            info.question_count(),
            report.stats.zones
        );

        Ok(report)
    }
}

/// State of one chapter conversion.
struct ChapterWalk<'a> {
    converter: ProblemConverter,
    options: &'a ConvertOptions,
    root: &'a Path,
    output_dir: &'a Path,
    chapter_dir_name: &'a str,
    number: &'a str,
    report: ConversionReport,
    observer: &'a mut dyn ConversionObserver,
}

impl ChapterWalk<'_> {
    fn source_path(&self, kind: &str, url_name: &str) -> PathBuf {
        self.root.join(kind).join(format!("{}.xml", url_name))
    }

    fn load(&self, kind: &str, path: &Path) -> Result<Element> {
        OlxParser::with_options(ParseOptions::new().expect_root(kind)).parse_file(path)
    }

    fn skip(&mut self, source: PathBuf, err: &Error) {
        self.observer.on_event(&ConversionEvent::ProblemSkipped {
            source: source.display().to_string(),
            reason: err.to_string(),
        });
        self.report.add_skipped(source, err.to_string());
    }

    /// `url_name`s of the direct `kind` children of `parent`. A reference
    /// without one is skipped and reported against `parent_path`.
    fn refs(&mut self, parent: &Element, parent_path: &Path, kind: &str) -> Vec<String> {
        let mut names = Vec::new();
        for child in parent.child_elements().filter(|child| child.is(kind)) {
            match child.attr(tags::ATTR_URL_NAME) {
                Some(name) => names.push(name.to_string()),
                None => self.skip(
                    parent_path.to_path_buf(),
                    &Error::missing_attribute(kind, tags::ATTR_URL_NAME),
                ),
            }
        }
        names
    }

    /// Convert a sequential; `None` when it yields no question.
    fn sequential(&mut self, url_name: &str) -> Result<Option<Zone>> {
        let path = self.source_path(tags::SEQUENTIAL, url_name);
        let seq = match self.load(tags::SEQUENTIAL, &path) {
            Ok(seq) => seq,
            Err(e) => {
                self.skip(path, &e);
                return Ok(None);
            }
        };
        let seq_title = display_name(&seq, url_name);
        log::debug!("sequential {}: {}", url_name, seq_title);

        let mut zone = Zone::new(&seq_title);
        for url_name in self.refs(&seq, &path, tags::VERTICAL) {
            self.vertical(&url_name, &seq_title, &mut zone)?;
        }

        Ok(if zone.is_empty() { None } else { Some(zone) })
    }

    fn vertical(&mut self, url_name: &str, seq_title: &str, zone: &mut Zone) -> Result<()> {
        let path = self.source_path(tags::VERTICAL, url_name);
        let vert = match self.load(tags::VERTICAL, &path) {
            Ok(vert) => vert,
            Err(e) => {
                self.skip(path, &e);
                return Ok(());
            }
        };
        let vert_title = display_name(&vert, url_name);
        log::debug!("vertical {}: {}", url_name, vert_title);

        for url_name in self.refs(&vert, &path, tags::PROBLEM) {
            if let Some(question) = self.problem(&url_name, seq_title, &vert_title)? {
                zone.questions.push(question);
            }
        }
        Ok(())
    }

    fn problem(
        &mut self,
        url_name: &str,
        seq_title: &str,
        vert_title: &str,
    ) -> Result<Option<ZoneQuestion>> {
        let path = self.source_path(tags::PROBLEM, url_name);
        self.observer.on_event(&ConversionEvent::Started {
            source: path.display().to_string(),
        });

        let converted = self.load(tags::PROBLEM, &path).and_then(|doc| {
            let emission = self.converter.convert(&doc, &mut *self.observer)?;
            Ok((display_name(&doc, url_name), emission))
        });
        let (prob_title, emission) = match converted {
            Ok(converted) => converted,
            Err(e) => {
                self.skip(path, &e);
                return Ok(None);
            }
        };

        let base = sanitize_filename(&format!("{}-{}-p{}", seq_title, vert_title, prob_title));
        let dir = allocate_dir(self.output_dir, &base)?;
        let folder = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or(base);

        let info = QuestionInfo::new(
            format!("{}: {}", vert_title, prob_title),
            format!("hw{}", self.number),
            vec![self.chapter_dir_name.to_string()],
        );
        let shape = emission.shape;
        ProblemArtifacts::new(emission)
            .with_info(info)
            .write_to(&dir, self.options.json_format)?;

        let id = format!("{}/{}", self.chapter_dir_name, folder);
        self.observer.on_event(&ConversionEvent::ProblemWritten {
            id: id.clone(),
            shape,
        });
        self.report.add_converted(id.clone(), path, shape);

        Ok(Some(ZoneQuestion {
            id,
            points: self.options.manifest.points.clone(),
        }))
    }
}
