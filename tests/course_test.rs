//! Integration tests for the course walker.

use std::fs;
use std::path::{Path, PathBuf};

use olx2pl::convert::{AssessmentInfo, QuestionInfo, ASSESSMENT_INFO_FILE, QUESTION_INFO_FILE};
use olx2pl::observe::{ConversionEvent, RecordingObserver};
use olx2pl::{ConvertOptions, CourseConverter, Error, ManifestOptions, ProblemShape};
use tempfile::TempDir;

/// Writes a small course: one chapter, two sequentials (the second holds
/// only a non-problem vertical), problems of several shapes.
fn write_course(root: &Path) -> PathBuf {
    let files: &[(&str, &str)] = &[
        (
            "chapter/ch.xml",
            r#"<chapter display_name="Chapter 3: Forces" highlights="['Newton', &quot;Friction&quot;]">
  <sequential url_name="seq1"/>
  <sequential url_name="seq2"/>
</chapter>"#,
        ),
        (
            "sequential/seq1.xml",
            r#"<sequential display_name="Homework 3.1">
  <vertical url_name="vert1"/>
</sequential>"#,
        ),
        (
            "sequential/seq2.xml",
            r#"<sequential display_name="Discussion">
  <vertical url_name="vert2"/>
</sequential>"#,
        ),
        (
            "vertical/vert1.xml",
            r#"<vertical display_name="Blocks">
  <problem url_name="choice"/>
  <html url_name="intro"/>
  <problem url_name="numeric"/>
  <problem url_name="broken"/>
  <problem url_name="dup"/>
</vertical>"#,
        ),
        ("vertical/vert2.xml", r#"<vertical display_name="Talk"><discussion url_name="d"/></vertical>"#),
        (
            "problem/choice.xml",
            r#"<problem display_name="1">
  <multiplechoiceresponse>
    <label>Which law?</label>
    <choicegroup><choice correct="true">Second</choice><choice>Zeroth</choice></choicegroup>
  </multiplechoiceresponse>
</problem>"#,
        ),
        (
            "problem/numeric.xml",
            r#"<problem display_name="2"><p>Force?</p><numericalresponse answer="9.8"/></problem>"#,
        ),
        (
            "problem/broken.xml",
            r#"<problem display_name="3"><multiplechoiceresponse/><choiceresponse/></problem>"#,
        ),
        (
            "problem/dup.xml",
            r#"<problem display_name="1"><choiceresponse><choice correct="true">x</choice></choiceresponse></problem>"#,
        ),
    ];

    for (path, content) in files {
        let full = root.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }
    root.join("chapter/ch.xml")
}

#[test]
fn test_convert_chapter_layout() {
    let course = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let chapter = write_course(course.path());

    let mut observer = RecordingObserver::new();
    let report = CourseConverter::new(ConvertOptions::default())
        .convert_chapter(&chapter, out.path(), &mut observer)
        .unwrap();

    let chapter_dir = out.path().join("chapter_3");
    assert_eq!(report.output_dir, chapter_dir);
    assert_eq!(report.title, "Chapter 3: Forces");

    // Problem folders, allocated without clobbering
    let choice_dir = chapter_dir.join("Homework_3_1_Blocks_p1");
    let dup_dir = chapter_dir.join("Homework_3_1_Blocks_p1_1");
    let numeric_dir = chapter_dir.join("Homework_3_1_Blocks_p2");
    assert!(choice_dir.join("question.html").exists());
    assert!(!choice_dir.join("server.py").exists());
    assert!(dup_dir.join("question.html").exists());
    assert!(numeric_dir.join("server.py").exists());
    assert!(!chapter_dir.join("Homework_3_1_Blocks_p3").exists());

    let info: QuestionInfo =
        serde_json::from_str(&fs::read_to_string(numeric_dir.join(QUESTION_INFO_FILE)).unwrap())
            .unwrap();
    assert_eq!(info.title, "Blocks: 2");
    assert_eq!(info.topic, "hw3");
    assert_eq!(info.tags, vec!["chapter_3"]);
    assert_eq!(info.kind, "v3");

    // Report
    assert_eq!(report.stats.converted(), 3);
    assert_eq!(report.stats.multiple_choice, 1);
    assert_eq!(report.stats.checkbox, 1);
    assert_eq!(report.stats.single_numeric, 1);
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].source.ends_with("problem/broken.xml"));
    assert!(report.skipped[0].reason.contains("Ambiguous"));

    assert!(observer
        .events()
        .iter()
        .any(|e| matches!(e, ConversionEvent::ProblemSkipped { .. })));
}

#[test]
fn test_convert_chapter_manifest() {
    let course = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let chapter = write_course(course.path());

    let options = ConvertOptions::new()
        .with_manifest_options(ManifestOptions::new().with_points(vec![3, 2, 1]));
    CourseConverter::new(options)
        .convert_chapter(&chapter, out.path(), &mut RecordingObserver::new())
        .unwrap();

    let raw = fs::read_to_string(out.path().join("chapter_3").join(ASSESSMENT_INFO_FILE)).unwrap();
    let manifest: AssessmentInfo = serde_json::from_str(&raw).unwrap();

    assert_eq!(manifest.title, "Chapter 3: Forces");
    assert_eq!(manifest.number, "3");
    assert_eq!(manifest.text, "<p>Newton. Friction</p>");

    // The discussion-only sequential contributes no zone
    assert_eq!(manifest.zones.len(), 1);
    let zone = &manifest.zones[0];
    assert_eq!(zone.title, "Homework 3.1");
    assert_eq!(zone.comment, "comment for Homework 3.1");

    let ids: Vec<&str> = zone.questions.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "chapter_3/Homework_3_1_Blocks_p1",
            "chapter_3/Homework_3_1_Blocks_p2",
            "chapter_3/Homework_3_1_Blocks_p1_1",
        ]
    );
    assert!(zone.questions.iter().all(|q| q.points == vec![3, 2, 1]));
}

#[test]
fn test_explicit_course_root() {
    let course = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let chapter = write_course(course.path());

    // Move the chapter file somewhere unrelated
    let elsewhere = TempDir::new().unwrap();
    let moved = elsewhere.path().join("ch.xml");
    fs::copy(&chapter, &moved).unwrap();

    let report = CourseConverter::default()
        .with_course_root(course.path())
        .convert_chapter(&moved, out.path(), &mut RecordingObserver::new())
        .unwrap();
    assert_eq!(report.stats.converted(), 3);
    assert_eq!(report.converted[0].shape, ProblemShape::SingleOrMultiChoice);
}

#[test]
fn test_missing_sequential_is_skipped() {
    let course = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let chapter = write_course(course.path());
    fs::remove_file(course.path().join("sequential/seq2.xml")).unwrap();

    let report = CourseConverter::default()
        .convert_chapter(&chapter, out.path(), &mut RecordingObserver::new())
        .unwrap();
    assert_eq!(report.stats.converted(), 3);
    assert!(report
        .skipped
        .iter()
        .any(|s| s.source.ends_with("sequential/seq2.xml")));
}

#[test]
fn test_chapter_without_number_fails() {
    let course = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let chapter = course.path().join("chapter/ch.xml");
    fs::create_dir_all(chapter.parent().unwrap()).unwrap();
    fs::write(&chapter, r#"<chapter display_name="Introduction"/>"#).unwrap();

    let err = CourseConverter::default()
        .convert_chapter(&chapter, out.path(), &mut RecordingObserver::new())
        .unwrap_err();
    assert!(matches!(err, Error::Other(_)));
}

#[test]
fn test_chapter_requires_display_name() {
    let course = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let chapter = course.path().join("chapter/ch.xml");
    fs::create_dir_all(chapter.parent().unwrap()).unwrap();
    fs::write(&chapter, "<chapter/>").unwrap();

    let err = CourseConverter::default()
        .convert_chapter(&chapter, out.path(), &mut RecordingObserver::new())
        .unwrap_err();
    assert!(matches!(err, Error::MissingAttribute { .. }));
}

/// Writes a one-sequential, one-vertical course with the given vertical
/// body and problem files.
fn write_small_course(root: &Path, vertical: &str, problems: &[(&str, &str)]) -> PathBuf {
    let mut files = vec![
        (
            "chapter/ch.xml".to_string(),
            r#"<chapter display_name="Chapter 4"><sequential url_name="s"/></chapter>"#.to_string(),
        ),
        (
            "sequential/s.xml".to_string(),
            r#"<sequential display_name="HW"><vertical url_name="v"/></sequential>"#.to_string(),
        ),
        ("vertical/v.xml".to_string(), vertical.to_string()),
    ];
    for (name, body) in problems {
        files.push((format!("problem/{}.xml", name), body.to_string()));
    }
    for (path, content) in files {
        let full = root.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }
    root.join("chapter/ch.xml")
}

#[test]
fn test_reference_without_url_name_is_skipped() {
    let course = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let chapter = write_small_course(
        course.path(),
        r#"<vertical display_name="V"><problem url_name="good"/><problem display_name="inline"/></vertical>"#,
        &[(
            "good",
            r#"<problem display_name="1"><p>g?</p><numericalresponse answer="9.8"/></problem>"#,
        )],
    );

    let report = CourseConverter::default()
        .convert_chapter(&chapter, out.path(), &mut RecordingObserver::new())
        .unwrap();

    assert_eq!(report.stats.converted(), 1);
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].source.ends_with("vertical/v.xml"));
    assert!(report.skipped[0].reason.contains("url_name"));

    let raw = fs::read_to_string(out.path().join("chapter_4").join(ASSESSMENT_INFO_FILE)).unwrap();
    let manifest: AssessmentInfo = serde_json::from_str(&raw).unwrap();
    assert_eq!(manifest.question_count(), 1);
}

#[test]
fn test_unrecognized_problem_warns_once() {
    let course = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let chapter = write_small_course(
        course.path(),
        r#"<vertical display_name="V"><problem url_name="essay"/></vertical>"#,
        &[("essay", r#"<problem><p>Discuss.</p><textbox/></problem>"#)],
    );

    let mut observer = RecordingObserver::new();
    let report = CourseConverter::default()
        .convert_chapter(&chapter, out.path(), &mut observer)
        .unwrap();

    assert_eq!(report.stats.skipped, 1);
    let warnings = observer.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(matches!(warnings[0], ConversionEvent::ProblemSkipped { .. }));
}
