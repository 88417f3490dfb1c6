use super::*;
use crate::github::sample::sample_snapshot;
use crate::storage::theme::Palette;
use crate::timeline::config::VideoConfig;

#[test]
fn shows_title_author_and_branches() {
    let cfg = VideoConfig::default();
    let pal = Palette::dark();
    let pr = sample_snapshot();
    let n = title_scene(&SceneCtx::new(60.0, &cfg, &pal), &pr, None);
    let texts = n.texts();
    assert!(texts.contains(&"Default PR Title: Fix an amazing bug"));
    assert!(texts.contains(&"@defaultUser"));
    assert!(texts.contains(&"PR #1"));
    assert!(texts.contains(&"feature-branch"));
    assert!(texts.contains(&"main"));
}

#[test]
fn author_row_is_omitted_without_author() {
    let cfg = VideoConfig::default();
    let pal = Palette::dark();
    let mut pr = sample_snapshot();
    pr.author = None;
    let n = title_scene(&SceneCtx::new(60.0, &cfg, &pal), &pr, None);
    assert!(n.texts().iter().all(|t| !t.starts_with('@')));
    assert!(n.image_sources().is_empty());
}

#[test]
fn background_and_avatar_are_requested() {
    let cfg = VideoConfig::default();
    let pal = Palette::dark();
    let pr = sample_snapshot();
    let bg = ImageSource::Remote("https://placehold.co/1280x720.png".into());
    let n = title_scene(&SceneCtx::new(0.0, &cfg, &pal), &pr, Some(&bg));
    let sources = n.image_sources();
    assert!(sources.contains(&&bg));
    assert!(sources.contains(&&ImageSource::Remote("https://placehold.co/80x80.png".into())));
}

#[test]
fn long_titles_wrap_to_two_lines() {
    let cfg = VideoConfig::default();
    let pal = Palette::dark();
    let mut pr = sample_snapshot();
    pr.title = "word ".repeat(60);
    let n = title_scene(&SceneCtx::new(60.0, &cfg, &pal), &pr, None);
    let long: Vec<_> = n.texts().into_iter().filter(|t| t.starts_with("word")).collect();
    assert_eq!(long.len(), 2);
    assert!(long[1].ends_with('…'));
}
