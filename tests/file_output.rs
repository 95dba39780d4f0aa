use logfence::{Router, RouterConfig};
use std::fs;
use tempfile::TempDir;

#[test]
fn file_line_format_has_timestamp_and_nature() {
    let tmp_dir = TempDir::new().unwrap();
    let target = tmp_dir.path().join("app.log");

    let router = Router::default();
    router
        .add_log_file("app", target.to_str().unwrap(), false, 0)
        .unwrap();
    router.warning("disk nearly full", Some(&["app"])).unwrap();

    let content = fs::read_to_string(&target).unwrap();
    let line = content.lines().next().unwrap();
    // [YYYY-MM-DD HH:MM:SS] [NATURE] message
    assert!(line.starts_with('['));
    assert!(line.contains("] [WARNING] disk nearly full"));
    assert_eq!(line.as_bytes()[11], b' ');
}

#[test]
fn multiline_message_is_flattened_to_one_line() {
    let tmp_dir = TempDir::new().unwrap();
    let target = tmp_dir.path().join("app.log");

    let router = Router::default();
    router
        .add_log_file("app", target.to_str().unwrap(), false, 0)
        .unwrap();
    router.info("line1\nline2\r\nline3", Some(&["app"])).unwrap();

    let content = fs::read_to_string(&target).unwrap();
    assert!(content.contains("line1 line2 line3"));
    assert_eq!(content.lines().count(), 1);
}

#[test]
fn writes_append_in_call_order() {
    let tmp_dir = TempDir::new().unwrap();
    let target = tmp_dir.path().join("app.log");

    let router = Router::default();
    router
        .add_log_file("app", target.to_str().unwrap(), false, 0)
        .unwrap();
    router.info("one", Some(&["app"])).unwrap();
    router.info("two", Some(&["app"])).unwrap();
    router.info("three", Some(&["app"])).unwrap();

    let content = fs::read_to_string(&target).unwrap();
    let messages: Vec<&str> = content
        .lines()
        .map(|line| line.rsplit("] ").next().unwrap())
        .collect();
    assert_eq!(messages, vec!["one", "two", "three"]);
}

#[test]
fn oversized_append_rotates_first() {
    let tmp_dir = TempDir::new().unwrap();
    let target = tmp_dir.path().join("size.log");

    let mut config = RouterConfig::default();
    config.file.max_file_size_bytes = 160;
    let router = Router::new(config).unwrap();
    router
        .add_log_file("app", target.to_str().unwrap(), false, 2)
        .unwrap();

    for idx in 0..10 {
        let message = format!("line-{idx} {}", "X".repeat(50));
        router.info(&message, Some(&["app"])).unwrap();
    }

    let rotated = tmp_dir.path().join("size.log.1");
    assert!(rotated.exists());
    assert!(fs::metadata(&rotated).unwrap().len() > 0);
    assert!(fs::metadata(&target).unwrap().len() <= 160);
}

#[test]
fn existing_file_is_reused_without_rotate_on_start() {
    let tmp_dir = TempDir::new().unwrap();
    let target = tmp_dir.path().join("app.log");
    fs::write(&target, "old content\n").unwrap();

    let router = Router::default();
    router
        .add_log_file("app", target.to_str().unwrap(), false, 0)
        .unwrap();
    router.info("appended", Some(&["app"])).unwrap();

    let content = fs::read_to_string(&target).unwrap();
    assert!(content.starts_with("old content\n"));
    assert!(content.contains("appended"));
}
