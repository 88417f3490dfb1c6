use super::*;

fn ts() -> DateTime<Utc> {
    "2024-05-01T12:00:00Z".parse().unwrap()
}

#[test]
fn closed_with_merge_timestamp_is_merged() {
    assert_eq!(PrState::derive("closed", Some(&ts())), PrState::Merged);
}

#[test]
fn closed_without_merge_timestamp_stays_closed() {
    assert_eq!(PrState::derive("closed", None), PrState::Closed);
}

#[test]
fn open_is_open_even_with_stray_timestamp() {
    assert_eq!(PrState::derive("open", None), PrState::Open);
    assert_eq!(PrState::derive("open", Some(&ts())), PrState::Open);
}

#[test]
fn commit_headline_and_author_fallbacks() {
    let mut c = CommitRecord {
        sha: "c1".to_owned(),
        message: "Fix parser\n\nLonger body".to_owned(),
        author_name: None,
        author_login: Some("octocat".to_owned()),
        avatar_url: None,
        authored_at: None,
    };
    assert_eq!(c.headline(), "Fix parser");
    assert_eq!(c.display_author(), "octocat");

    c.author_name = Some("Mona".to_owned());
    assert_eq!(c.display_author(), "Mona");

    c.author_name = None;
    c.author_login = None;
    assert_eq!(c.display_author(), "Unknown User");
}

#[test]
fn check_enums_use_github_spelling() {
    let run: CheckRun = serde_json::from_str(
        r#"{"id":1,"name":"ci","status":"in_progress","conclusion":"timed_out"}"#,
    )
    .unwrap();
    assert_eq!(run.status, CheckStatus::InProgress);
    assert_eq!(run.conclusion, Some(CheckConclusion::TimedOut));
}
