use super::*;

const PULL_JSON: &str = r#"{
  "id": 1,
  "number": 42,
  "html_url": "https://github.com/octo/repo/pull/42",
  "title": "Add spring transitions",
  "user": {"login": "mona", "avatar_url": "https://avatars.example/mona.png", "html_url": ""},
  "body": null,
  "state": "closed",
  "created_at": "2024-05-01T10:00:00Z",
  "merged_at": "2024-05-02T10:00:00Z",
  "merged_by": {"login": "hubot", "avatar_url": ""},
  "comments": 3,
  "review_comments": 1,
  "commits": 2,
  "additions": 120,
  "deletions": 30,
  "changed_files": 4,
  "head": {"ref": "feature", "sha": "abc123", "repo": {"full_name": "mona/repo"}},
  "base": {"ref": "main", "sha": "def456", "repo": {"full_name": "octo/repo"}}
}"#;

#[test]
fn pull_request_parses_and_derives_merged() {
    let pr: ApiPullRequest = serde_json::from_str(PULL_JSON).unwrap();
    assert_eq!(pr.derived_state(), PrState::Merged);
    assert_eq!(pr.stats().additions, 120);
    assert_eq!(pr.head_ref().name, "feature");
    assert_eq!(pr.base.repo.as_ref().unwrap().full_name, "octo/repo");

    let merger: UserRef = pr.merged_by.unwrap().into();
    assert_eq!(merger.login, "hubot");
    assert_eq!(merger.avatar_url, None);
}

#[test]
fn commit_converts_with_missing_account() {
    let c: ApiCommit = serde_json::from_str(
        r#"{"sha":"c1","commit":{"message":"Initial\n\nbody","author":{"name":"Mona","email":"m@x","date":"2024-05-01T10:00:00Z"}},"author":null}"#,
    )
    .unwrap();
    let rec: CommitRecord = c.into();
    assert_eq!(rec.author_name.as_deref(), Some("Mona"));
    assert_eq!(rec.author_login, None);
    assert!(rec.authored_at.is_some());
}

#[test]
fn file_without_patch_maps_to_none() {
    let f: ApiFile = serde_json::from_str(
        r#"{"sha":"","filename":"img.png","status":"added","additions":0,"deletions":0,"changes":0}"#,
    )
    .unwrap();
    let file: ChangedFile = f.into();
    assert_eq!(file.status, FileStatus::Added);
    assert_eq!(file.patch, None);
}

#[test]
fn check_run_list_parses_null_conclusion() {
    let list: ApiCheckRunList = serde_json::from_str(
        r#"{"total_count":1,"check_runs":[{"id":7,"name":"build","status":"queued","conclusion":null}]}"#,
    )
    .unwrap();
    assert_eq!(list.check_runs.len(), 1);
    assert_eq!(list.check_runs[0].conclusion, None);
}
