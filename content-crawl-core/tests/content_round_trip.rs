use chrono::{TimeZone, Utc};
use content_crawl_core::article::{PostArticle, RoundupArticle, VideoArticle};
use content_crawl_core::content_type::ContentType;
use content_crawl_core::item::ContentItem;
use content_crawl_core::resource::{
    EventResource, JobResource, ProjectResource, PublicationResource, ToolResource,
};
use content_crawl_core::{Content, ContentCore, ContentStatus};

fn core(id: i64, title: &str) -> ContentCore {
    let mut core = ContentCore::new();
    core.id = id;
    core.set_uuid(format!("00000000-0000-4000-8000-{id:012}"));
    core.site_id = 2;
    core.org_code = "ACME".into();
    core.published = true;
    core.status = ContentStatus::Deployed;
    core.summary.title = title.into();
    core.summary.summary = "A short summary".into();
    core.summary.url = format!("https://acme.example/{id}");
    core.summary.published_date = Some(Utc.with_ymd_and_hms(2024, 2, 29, 12, 15, 0).unwrap());
    core
}

/// One fully populated value of every content subtype.
fn every_item() -> Vec<ContentItem> {
    let mut roundup = RoundupArticle::new();
    roundup.core = core(1, "Weekly roundup");
    roundup.tracked_by = "newsdesk".into();
    roundup.social = "@acme".into();
    roundup.technologies = vec!["rust".into(), "wasm".into()];

    let mut post = PostArticle::new();
    post.core = core(2, "Release notes");
    post.details.author = "Jo Bloggs".into();
    post.details.body = "<p>Body</p>".into();
    post.details.image_url = "https://acme.example/cover.png".into();
    post.technologies = vec!["rust".into()];

    let mut video = VideoArticle::from_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ", "Demo day")
        .expect("youtube url is recognised");
    video.core = core(3, "Demo day");
    video.video.duration = Some(754);
    video.video.thumbnail = "https://img.example/thumb.jpg".into();

    let mut job = JobResource::new();
    job.core = core(4, "Rust engineer");
    job.location = "Amsterdam".into();
    job.remote = true;
    job.technologies = vec!["rust".into(), "postgres".into()];

    let mut event = EventResource::new();
    event.core = core(5, "RustConf");
    event.location = "Montreal".into();
    event.start_date = Some(Utc.with_ymd_and_hms(2030, 9, 10, 9, 0, 0).unwrap());
    event.end_date = Some(Utc.with_ymd_and_hms(2030, 9, 12, 17, 0, 0).unwrap());

    let mut tool = ToolResource::new();
    tool.core = core(6, "cargo-crawl");
    tool.repository = "https://github.com/acme/cargo-crawl".into();
    tool.technologies = vec!["rust".into()];

    let mut project = ProjectResource::new();
    project.core = core(7, "Crawler");
    project.website = "https://crawler.acme.example".into();
    project.repository = "https://github.com/acme/crawler".into();

    let mut paper = PublicationResource::new(ContentType::WhitePaper).unwrap();
    paper.core = core(8, "State of Rust");
    paper.author = "Research team".into();
    paper.file_url = "https://acme.example/state.pdf".into();

    vec![
        roundup.into(),
        post.into(),
        video.into(),
        job.into(),
        event.into(),
        tool.into(),
        project.into(),
        paper.into(),
    ]
}

#[test]
fn json_round_trip_keeps_every_field() {
    for item in every_item() {
        let value = item.to_json().unwrap();
        assert_eq!(value["type"], item.content_type().value());
        let back = ContentItem::from_json(&value).unwrap();
        assert_eq!(back, item, "JSON round trip changed {}", item.content_type());
    }
}

#[test]
fn row_round_trip_keeps_every_field() {
    for item in every_item() {
        let row = item.to_row();
        let back = ContentItem::from_row(item.content_type(), &row).unwrap();
        assert_eq!(back, item, "row round trip changed {}", item.content_type());
    }
}

#[test]
fn short_rows_fail_for_every_type() {
    for item in every_item() {
        let mut row = item.to_row();
        row.pop();
        assert!(
            ContentItem::from_row(item.content_type(), &row).is_err(),
            "short {} row was accepted",
            item.content_type()
        );
    }
}

#[test]
fn clones_are_equal_and_independent() {
    for item in every_item() {
        let mut copy = item.clone();
        assert_eq!(copy, item);
        copy.content_mut().set_status(ContentStatus::Archived);
        assert_ne!(copy, item);
    }
}

#[test]
fn guids_use_type_code_and_padded_id() {
    let guids: Vec<String> = every_item().iter().map(|i| i.content().guid()).collect();
    assert_eq!(guids[0], "RUP-ACME-00001");
    assert_eq!(guids[2], "VID-ACME-00003");
    assert_eq!(guids[7], "WPR-ACME-00008");

    let unsaved = JobResource::new();
    assert_eq!(unsaved.guid(), "JOB---0001");
}

#[test]
fn serde_traits_match_json_form() {
    let items = every_item();
    let text = serde_json::to_string(&items).unwrap();
    let back: Vec<ContentItem> = serde_json::from_str(&text).unwrap();
    assert_eq!(back, items);
}
