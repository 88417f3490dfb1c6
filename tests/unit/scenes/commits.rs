use super::*;
use crate::github::sample::sample_snapshot;
use crate::storage::theme::Palette;
use crate::timeline::config::VideoConfig;
use chrono::{DateTime, Utc};

fn commit(sha: &str, message: &str) -> CommitRecord {
    CommitRecord {
        sha: sha.to_owned(),
        message: message.to_owned(),
        author_name: None,
        author_login: None,
        avatar_url: None,
        authored_at: None,
    }
}

#[test]
fn recent_commits_are_latest_first_and_capped() {
    let commits: Vec<_> = (1..=6).map(|i| commit(&format!("s{i}"), "m")).collect();
    let shas: Vec<&str> = recent_commits(&commits, 4)
        .iter()
        .map(|c| c.sha.as_str())
        .collect();
    assert_eq!(shas, ["s6", "s5", "s4", "s3"]);
}

#[test]
fn byline_falls_back_to_unknown_user() {
    let mut c = commit("s", "m");
    assert_eq!(byline(&c), "by Unknown User");
    c.author_login = Some("octo".into());
    c.authored_at = DateTime::<Utc>::from_timestamp(1_714_564_800, 0);
    assert_eq!(byline(&c), "by octo on May 1, 2024");
}

#[test]
fn scene_shows_headlines_only() {
    let cfg = VideoConfig::default();
    let pal = Palette::dark();
    let pr = sample_snapshot();
    let mut commits = pr.commits.clone();
    commits.push(commit("abcdef123", "Tidy up\n\nlong body text"));
    let n = commit_history_scene(&SceneCtx::new(48.0, &cfg, &pal), &commits);
    let texts = n.texts();
    assert!(texts.contains(&"Commit History"));
    assert!(texts.contains(&"Tidy up"));
    assert!(texts.contains(&"abcdef1"));
    assert!(!texts.iter().any(|t| t.contains("long body text")));
}

#[test]
fn commit_without_avatar_uses_icon() {
    let cfg = VideoConfig::default();
    let pal = Palette::dark();
    let n = commit_history_scene(&SceneCtx::new(48.0, &cfg, &pal), &[commit("s", "m")]);
    assert!(n.image_sources().is_empty());
    let mut icons = 0;
    n.visit(&mut |node| {
        if matches!(node, Node::Icon(i) if i.icon == Icon::GitCommit) {
            icons += 1;
        }
    });
    assert_eq!(icons, 1);
}
