use slackmark_anonymizer::{AnonymizeError, Category, FileProcessor, Mapper, MappingTable, NameStyle};
use std::path::Path;

const USER_DMS: &str = r#"<!DOCTYPE NETSCAPE-Bookmark-file-1>
<DL><p>
    <DT><H3 ADD_DATE="1700000000" LAST_MODIFIED="1700000000">Slack Users</H3>
    <DL><p>
            <DT><A HREF="slack://user?team=T0ACME0001&id=U0000AAAA1" ADD_DATE="1700000000">山口 次郎 (@jiro)</A>
            <DT><A HREF="slack://user?team=T0ACME0001&id=U0000BBBB2" ADD_DATE="1700000000">Alice Walker</A>
    </DL><p>
</DL><p>
"#;

const CHANNELS: &str = r#"<!DOCTYPE NETSCAPE-Bookmark-file-1>
<DL><p>
    <DT><H3 ADD_DATE="1700000000" LAST_MODIFIED="1700000000">Slack</H3>
    <DL><p>
            <DT><A HREF="slack://channel?team=T0ACME0001&id=C0000CCCC3" ADD_DATE="1700000000">#general</A>
            <DT><A HREF="slack://channel?team=T0ACME0001&id=C0000DDDD4" ADD_DATE="1700000000">🔒 #sales-tokyo</A>
    </DL><p>
</DL><p>
"#;

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_batch_processes_generated_files_only() {
    let dir = tempfile::tempdir().unwrap();
    let dms = write(dir.path(), "slack_user_dms.html", USER_DMS);
    let channels = write(dir.path(), "slack_all_channels.html", CHANNELS);
    let guide = write(dir.path(), "user_dm_guide.html", "<p>slack_user_dms.html</p>");
    let other = write(dir.path(), "notes.html", USER_DMS);
    let mapping = dir.path().join("anonymizer_mappings.json");

    let mut processor = FileProcessor::new(Mapper::with_seed(1), &mapping);
    let mut processed = processor.process(None, None, dir.path()).unwrap();
    processed.sort();

    let mut expected = vec![channels.clone(), dms.clone(), guide];
    expected.sort();
    assert_eq!(processed, expected);
    assert_eq!(std::fs::read_to_string(&other).unwrap(), USER_DMS);

    let dms_out = std::fs::read_to_string(&dms).unwrap();
    for leaked in ["T0ACME0001", "U0000AAAA1", "山口 次郎", "jiro", "Alice Walker"] {
        assert!(!dms_out.contains(leaked), "{} leaked", leaked);
    }
    assert!(dms_out.contains("(@display_0)"));

    let channels_out = std::fs::read_to_string(&channels).unwrap();
    assert!(!channels_out.contains("sales"));
    assert!(channels_out.contains(">🔒 #category"));

    // Every link points at the same dummy team
    let team = processor.mapper().table().workspace_id_map["T0ACME0001"].clone();
    assert_eq!(dms_out.matches(&format!("team={}&", team)).count(), 2);
    assert_eq!(channels_out.matches(&format!("team={}&", team)).count(), 2);

    let saved = MappingTable::load(&mapping);
    assert_eq!(&saved, processor.mapper().table());
}

#[test]
fn test_batch_skips_unreadable_file() {
    let dir = tempfile::tempdir().unwrap();
    let good = write(dir.path(), "slack_all_channels.html", CHANNELS);
    std::fs::write(dir.path().join("slack_user_dms.html"), [0xff, 0xfe, 0x00, 0xc3]).unwrap();

    let mut processor = FileProcessor::new(Mapper::with_seed(2), dir.path().join("m.json"));
    let processed = processor.process(None, None, dir.path()).unwrap();

    assert_eq!(processed, vec![good]);
}

#[test]
fn test_batch_with_no_matches() {
    let dir = tempfile::tempdir().unwrap();
    let mapping = dir.path().join("m.json");

    let mut processor = FileProcessor::new(Mapper::with_seed(3), &mapping);
    let processed = processor.process(None, None, dir.path()).unwrap();

    assert!(processed.is_empty());
    assert!(mapping.exists());
}

#[test]
fn test_missing_single_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("slack_missing.html");
    let output = dir.path().join("out.html");

    let mut processor = FileProcessor::new(Mapper::with_seed(4), dir.path().join("m.json"));
    let err = processor
        .process(Some(&missing), Some(&output), dir.path())
        .unwrap_err();

    assert!(matches!(err, AnonymizeError::NotFound(_)));
    assert!(!output.exists());
}

#[test]
fn test_unwritable_output_is_processing_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "slack_user_dms.html", USER_DMS);
    let output = dir.path().join("missing").join("out.html");
    let mapping = dir.path().join("anonymizer_mappings.json");

    let mut processor = FileProcessor::new(Mapper::with_seed(5), &mapping);
    let err = processor
        .process(Some(&input), Some(&output), dir.path())
        .unwrap_err();

    match err {
        AnonymizeError::Processing { path, .. } => assert_eq!(path, output),
        other => panic!("unexpected error: {}", other),
    }
    assert!(!mapping.exists());
    assert_eq!(std::fs::read_to_string(&input).unwrap(), USER_DMS);
}

#[test]
fn test_mappings_consistent_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let mapping = dir.path().join("anonymizer_mappings.json");
    let first = write(dir.path(), "first.html", USER_DMS);
    let second = write(dir.path(), "second.html", USER_DMS);

    FileProcessor::open(&mapping)
        .process(Some(&first), None, dir.path())
        .unwrap();
    let mut later = FileProcessor::open(&mapping);
    later.process(Some(&second), None, dir.path()).unwrap();

    assert_eq!(
        std::fs::read_to_string(&first).unwrap(),
        std::fs::read_to_string(&second).unwrap()
    );
    assert!(later
        .mapper()
        .lookup(Category::PersonalName(NameStyle::Japanese), "山口 次郎")
        .is_some());
}
