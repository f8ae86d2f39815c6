//! Question and assessment metadata files.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::render::{to_json, JsonFormat};

/// File name of per-question metadata.
pub const QUESTION_INFO_FILE: &str = "info.json";

/// File name of the assessment manifest.
pub const ASSESSMENT_INFO_FILE: &str = "infoAssessment.json";

/// Options for generated metadata.
#[derive(Debug, Clone)]
pub struct ManifestOptions {
    /// Points awarded per attempt
    pub points: Vec<u32>,

    /// Start of the access window
    pub start_date: NaiveDateTime,

    /// End of the access window
    pub end_date: NaiveDateTime,

    /// Assessment type
    pub assessment_type: String,

    /// Assessment set
    pub assessment_set: String,

    /// Credit granted inside the access window
    pub credit: u32,
}

impl ManifestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set points per attempt.
    pub fn with_points(mut self, points: Vec<u32>) -> Self {
        self.points = points;
        self
    }

    /// Set the access window.
    pub fn with_access_window(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Set assessment type and set.
    pub fn with_assessment(mut self, kind: impl Into<String>, set: impl Into<String>) -> Self {
        self.assessment_type = kind.into();
        self.assessment_set = set.into();
        self
    }

    /// Set the credit.
    pub fn with_credit(mut self, credit: u32) -> Self {
        self.credit = credit;
        self
    }
}

fn datetime(date: (i32, u32, u32), time: (u32, u32, u32)) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(date.0, date.1, date.2)
        .and_then(|d| d.and_hms_opt(time.0, time.1, time.2))
        .expect("constant date is valid")
}

impl Default for ManifestOptions {
    fn default() -> Self {
        Self {
            points: vec![2, 1],
            start_date: datetime((2020, 9, 1), (0, 0, 1)),
            end_date: datetime((2024, 9, 30), (23, 59, 59)),
            assessment_type: "Exam".to_string(),
            assessment_set: "Homework".to_string(),
            credit: 100,
        }
    }
}

/// Per-question `info.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionInfo {
    pub uuid: String,
    pub title: String,
    pub topic: String,
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub kind: String,
}

impl QuestionInfo {
    /// New metadata with a fresh UUID.
    pub fn new(title: impl Into<String>, topic: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            uuid: uuid_v4(),
            title: title.into(),
            topic: topic.into(),
            tags,
            kind: "v3".to_string(),
        }
    }
}

/// One access rule of an assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRule {
    pub mode: String,
    pub credit: u32,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}

/// A question reference inside a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneQuestion {
    /// `chapter_<n>/<folder>`
    pub id: String,
    pub points: Vec<u32>,
}

/// A group of questions; one per sequential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub title: String,
    pub comment: String,
    pub questions: Vec<ZoneQuestion>,
}

impl Zone {
    /// Empty zone for a sequential.
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            comment: format!("comment for {}", title),
            title,
            questions: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// The assessment manifest, `infoAssessment.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentInfo {
    pub uuid: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub set: String,
    pub number: String,
    pub multiple_instance: bool,
    pub shuffle_questions: bool,
    pub require_honor_code: bool,
    pub auto_close: bool,
    pub allow_access: Vec<AccessRule>,
    pub zones: Vec<Zone>,
    pub text: String,
}

impl AssessmentInfo {
    /// Build a manifest; `text` is plain text wrapped in one paragraph.
    pub fn new(
        title: impl Into<String>,
        number: impl Into<String>,
        zones: Vec<Zone>,
        text: &str,
        options: &ManifestOptions,
    ) -> Self {
        Self {
            uuid: uuid_v4(),
            kind: options.assessment_type.clone(),
            title: title.into(),
            set: options.assessment_set.clone(),
            number: number.into(),
            multiple_instance: false,
            shuffle_questions: false,
            require_honor_code: false,
            auto_close: false,
            allow_access: vec![AccessRule {
                mode: "Public".to_string(),
                credit: options.credit,
                start_date: options.start_date,
                end_date: options.end_date,
            }],
            zones,
            text: format!("<p>{}</p>", text),
        }
    }

    /// Total number of questions across zones.
    pub fn question_count(&self) -> usize {
        self.zones.iter().map(|z| z.questions.len()).sum()
    }
}

/// Serialize `value` into `dir/name`.
pub fn write_json<T: Serialize>(dir: &Path, name: &str, value: &T, format: JsonFormat) -> Result<()> {
    fs::write(dir.join(name), to_json(value, format)?)?;
    Ok(())
}

static UUID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a random version-4 UUID string.
///
/// Seeded from the clock plus a process-wide counter, so identifiers
/// created within the same clock tick still differ.
pub fn uuid_v4() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let count = UUID_COUNTER.fetch_add(1, Ordering::Relaxed);

    // LCG; identifiers only, not cryptographic
    let mut state = nanos ^ count.wrapping_mul(0x9e37_79b9_7f4a_7c15);
    let mut bytes = [0u8; 16];
    for byte in &mut bytes {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        *byte = (state >> 33) as u8;
    }

    // Set version (4) and variant (2)
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}
