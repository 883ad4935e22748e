use assert_cmd::Command;
use content_crawl_core::article::PostArticle;
use content_crawl_core::content_type::ContentType;
use content_crawl_core::item::ContentItem;
use content_crawl_core::resource::{JobResource, PublicationResource};
use predicates::prelude::*;
use std::fs::{self, write};
use tempfile::NamedTempFile;

const CONFIG_YAML: &str = r#"
provider: static
targets:
  - organisation: ACME
    type: post
    sites: [1]
    pages:
      - url: https://acme.example/blog
        teasers:
          selector: div.post
          fields:
            title: { selector: h2 }
            publishedDate: { selector: time, expr: '(\d{4}-\d{2}-\d{2})', format: '$1' }
  - organisation: ACME
    type: video
    enabled: false
    pages:
      - url: https://acme.example/videos
        articles:
          fields:
            url: { selector: iframe, attribute: src }
"#;

fn create_config() -> NamedTempFile {
    let config = NamedTempFile::new().expect("Creating temp config file failed");
    write(config.path(), CONFIG_YAML).expect("Writing temp config failed");
    config
}

fn content_crawl() -> Command {
    let mut cmd = Command::cargo_bin("content-crawl").expect("Binary exists");
    cmd.env_remove("CONTENT_CRAWL_PROVIDER")
        .env_remove("CONTENT_CRAWL_SITES");
    cmd
}

#[test]
fn validate_prints_one_line_per_target() {
    let config = create_config();
    content_crawl()
        .arg("validate")
        .arg("--config")
        .arg(config.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("ACME\tpost\tstatic\tpages=1\tsites=1\tenabled")
                .and(predicate::str::contains("ACME\tvideo\tstatic\tpages=1\tsites=all\tdisabled"))
                .and(predicate::str::contains("2 targets OK")),
        );
}

#[test]
fn validate_fails_for_invalid_config() {
    let config = NamedTempFile::new().unwrap();
    write(config.path(), "targets:\n  - organisation: ''\n    type: post\n").unwrap();
    content_crawl()
        .arg("validate")
        .arg("--config")
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid"));
}

#[test]
fn extract_applies_configured_pattern() {
    let config = create_config();
    content_crawl()
        .args(["extract", "--organisation", "acme", "--content-type", "post"])
        .args(["--field", "publishedDate", "--text", "Posted on 2024-03-05 by Jo"])
        .arg("--config")
        .arg(config.path())
        .assert()
        .success()
        .stdout("2024-03-05\n");
}

#[test]
fn extract_passes_text_through_without_pattern() {
    let config = create_config();
    content_crawl()
        .args(["extract", "--organisation", "ACME", "--content-type", "video"])
        .args(["--section", "articles", "--field", "url"])
        .args(["--text", "https://player.vimeo.com/video/76979871"])
        .arg("--config")
        .arg(config.path())
        .assert()
        .success()
        .stdout("https://player.vimeo.com/video/76979871\n");
}

#[test]
fn extract_fails_for_unknown_field() {
    let config = create_config();
    content_crawl()
        .args(["extract", "--organisation", "ACME", "--content-type", "post"])
        .args(["--field", "author", "--text", "Jo"])
        .arg("--config")
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no field 'author'"));
}

#[test]
fn import_prints_json_lines() {
    let rows = NamedTempFile::new().unwrap();
    write(
        rows.path(),
        "3\t\t1\tACME\t0\tSTAGED\t2024-01-02 09:30:00\tRust engineer\t\t\tRemote (EU)\t1\trust,tokio\n\n",
    )
    .unwrap();

    let output = content_crawl()
        .args(["import", "--content-type", "job", "--rows"])
        .arg(rows.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1);
    let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(value["type"], "job");
    assert_eq!(value["location"], "Remote (EU)");
    assert_eq!(value["title"], "Rust engineer");
    assert!(value["uuid"].as_str().is_some_and(|u| !u.is_empty()));
}

#[test]
fn import_reports_short_rows() {
    let rows = NamedTempFile::new().unwrap();
    write(rows.path(), "3\t\t1\tACME\n").unwrap();
    content_crawl()
        .args(["import", "--content-type", "job", "--rows"])
        .arg(rows.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 1"));
}

#[test]
fn export_writes_one_file_per_type() {
    let mut job = JobResource::new();
    job.core.id = 7;
    job.core.org_code = "ACME".into();
    job.location = "Berlin".into();
    let mut post = PostArticle::new();
    post.core.org_code = "ACME".into();
    post.core.summary.title = "Hello".into();
    let paper = PublicationResource::new(ContentType::WhitePaper).unwrap();

    let items: Vec<ContentItem> = vec![job.into(), post.into(), paper.into()];
    let jsonl = items
        .iter()
        .map(|i| i.to_json().unwrap().to_string())
        .collect::<Vec<_>>()
        .join("\n");
    let items_file = NamedTempFile::new().unwrap();
    write(items_file.path(), jsonl).unwrap();
    let out_dir = tempfile::tempdir().unwrap();

    content_crawl()
        .arg("export")
        .arg("--items")
        .arg(items_file.path())
        .arg("--output-dir")
        .arg(out_dir.path())
        .args(["--prefix", "ACME"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exported 3 items"));

    let jobs = fs::read_to_string(out_dir.path().join("acme-jobs.tsv")).unwrap();
    assert!(jobs.starts_with("7\t"));
    assert!(jobs.contains("Berlin"));
    assert!(out_dir.path().join("acme-posts.tsv").exists());
    assert!(out_dir.path().join("acme-white-papers.tsv").exists());
    assert!(!out_dir.path().join("acme-videos.tsv").exists());
}

use std::sync::{Arc, Mutex};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{layer::Context, Layer, Registry};

/// Custom Layer to collect emitted event messages.
struct EventCollector {
    events: Arc<Mutex<Vec<String>>>,
}

impl<S> Layer<S> for EventCollector
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        self.events.lock().unwrap().push(format!("{:?}", event));
    }
}

#[test]
fn emits_trace_initialised_event() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let collector = EventCollector {
        events: events.clone(),
    };
    let subscriber = Registry::default().with(collector);
    let _guard = tracing::subscriber::set_default(subscriber);

    use content_crawl::cli::{run_with_output, Cli, Commands};

    let cli = Cli {
        command: Commands::Validate {
            config: std::path::PathBuf::from("dummy.yaml"),
        },
    };
    let mut out = Vec::new();
    let _ = run_with_output(cli, &mut out);

    let event_msgs = events.lock().unwrap();
    assert!(
        event_msgs.iter().any(|msg| msg.contains("trace_initialised")),
        "Expected a 'trace_initialised' trace event, got: {:?}",
        event_msgs
    );
}
