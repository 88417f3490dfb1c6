use pretty_assertions::assert_eq;

use super::*;
use crate::storage::theme::Palette;
use crate::timeline::config::VideoConfig;

const COMBINED: &str = concat!(
    "diff --git a/src/a.rs b/src/a.rs\n",
    "index 1..2 100644\n",
    "--- a/src/a.rs\n",
    "+++ b/src/a.rs\n",
    "@@ -1,2 +1,2 @@\n",
    "-old\n",
    "+new\n",
    " same\n",
    "@@ -10 +10 @@\n",
    "-x\n",
    "+y\n",
    "diff --git a/README.md b/README.md\n",
    "--- /dev/null\n",
    "+++ b/README.md\n",
    "@@ -0,0 +1 @@\n",
    "+Hello",
);

fn file(name: &str, status: FileStatus, patch: Option<&str>) -> ChangedFile {
    ChangedFile {
        filename: name.to_owned(),
        status,
        additions: 3,
        deletions: 2,
        patch: patch.map(str::to_owned),
        previous_filename: None,
    }
}

#[test]
fn classifies_lines_by_prefix() {
    assert_eq!(DiffLineKind::classify("+added"), DiffLineKind::Added);
    assert_eq!(DiffLineKind::classify("+++ b/file"), DiffLineKind::Context);
    assert_eq!(DiffLineKind::classify("-gone"), DiffLineKind::Deleted);
    assert_eq!(DiffLineKind::classify("--- a/file"), DiffLineKind::Context);
    assert_eq!(DiffLineKind::classify("@@ -1 +1 @@"), DiffLineKind::Header);
    assert_eq!(DiffLineKind::classify(" ctx"), DiffLineKind::Context);
    assert_eq!(DiffLineKind::classify(""), DiffLineKind::Context);
}

#[test]
fn own_patch_wins() {
    let f = file("src/a.rs", FileStatus::Modified, Some("@@ -1 +1 @@\n+z"));
    assert_eq!(resolve_patch(&f, COMBINED), "@@ -1 +1 @@\n+z");
}

#[test]
fn missing_patch_is_cut_from_combined_diff() {
    let f = file("src/a.rs", FileStatus::Modified, None);
    assert_eq!(
        resolve_patch(&f, COMBINED),
        "@@ -1,2 +1,2 @@\n-old\n+new\n same\n@@ -10 +10 @@\n-x\n+y"
    );
    let f = file("README.md", FileStatus::Added, Some(""));
    assert_eq!(resolve_patch(&f, COMBINED), "@@ -0,0 +1 @@\n+Hello");
}

#[test]
fn placeholders_for_added_and_removed_files() {
    let added = file("new.txt", FileStatus::Added, None);
    assert_eq!(
        resolve_patch(&added, ""),
        "@@ -0,0 +1,3 @@\n+Added line 1\n+Added line 2\n+Added line 3"
    );
    let removed = file("old.txt", FileStatus::Removed, None);
    assert_eq!(
        resolve_patch(&removed, ""),
        "@@ -1,2 +0,0 @@\n-Removed line 1\n-Removed line 2"
    );
    let modified = file("bin.dat", FileStatus::Modified, None);
    assert_eq!(
        resolve_patch(&modified, ""),
        "Patch data unavailable for bin.dat"
    );
}

#[test]
fn huge_files_without_patch_are_capped() {
    let mut added = file("Cargo.lock", FileStatus::Added, None);
    added.additions = 2_000_000;
    let patch = resolve_patch(&added, "");
    assert!(patch.starts_with("@@ -0,0 +1,2000000 @@\n+Added line 1\n"));
    assert!(patch.ends_with(&format!("+Added line {MAX_LINES}")));
    assert_eq!(patch.lines().count(), MAX_LINES + 1);

    let mut removed = file("dist/bundle.js", FileStatus::Removed, None);
    removed.deletions = 750_000;
    assert_eq!(resolve_patch(&removed, "").lines().count(), MAX_LINES + 1);

    let cfg = VideoConfig::default();
    let pal = Palette::dark();
    let area = Rect::new(64.0, 140.0, 1216.0, 660.0);
    let node = file_diff(&SceneCtx::new(60.0, &cfg, &pal), &added, "", area, 120.0);
    assert!(node.texts().contains(&"Cargo.lock (added)"));
    assert!(node.texts().contains(&"+Added line 1"));
}

#[test]
fn scroll_never_passes_content_end() {
    let cfg = VideoConfig::default();
    let pal = Palette::dark();
    let window = cfg.per_file_frames() as f64;
    let mut last = 0.0;
    for f in 0..=cfg.per_file_frames() {
        let ctx = SceneCtx::new(f as f64, &cfg, &pal);
        let s = scroll_offset(f as f64, &ctx, window, 1000.0, 300.0);
        assert!(s >= last - 1e-9);
        assert!(s <= 700.0 + 1e-9);
        last = s;
    }
    assert!((last - 700.0).abs() < 1e-9);
}

#[test]
fn short_content_does_not_scroll() {
    let cfg = VideoConfig::default();
    let pal = Palette::dark();
    let ctx = SceneCtx::new(100.0, &cfg, &pal);
    assert_eq!(scroll_offset(100.0, &ctx, 120.0, 200.0, 300.0), 0.0);
}

#[test]
fn lines_reveal_in_index_order() {
    let cfg = VideoConfig::default();
    let pal = Palette::dark();
    let f = file("src/a.rs", FileStatus::Modified, Some("@@ -1 +1 @@\n-a\n+b\n c"));
    let area = Rect::new(64.0, 140.0, 1216.0, 660.0);
    let early = file_diff(&SceneCtx::new(6.0, &cfg, &pal), &f, "", area, 120.0);
    let later = file_diff(&SceneCtx::new(60.0, &cfg, &pal), &f, "", area, 120.0);
    let early_lines = early.texts().len();
    let later_lines = later.texts().len();
    assert!(early_lines < later_lines);
    assert!(later.texts().contains(&"+b"));
    assert!(later.texts().contains(&"src/a.rs (modified)"));
}
