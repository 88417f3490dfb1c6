use super::*;
use crate::storage::theme::Palette;
use crate::timeline::config::VideoConfig;

fn stats() -> PrStats {
    PrStats {
        commits: 12,
        comments: 0,
        review_comments: 0,
        additions: 340,
        deletions: 85,
        changed_files: 7,
    }
}

#[test]
fn bar_percent_is_relative_to_larger_side_and_capped() {
    assert_eq!(bar_percent(340, 340), 100.0);
    assert_eq!(bar_percent(85, 340), 25.0);
    assert_eq!(bar_percent(0, 0), 0.0);
    assert_eq!(bar_percent(5, 0), 100.0);
}

#[test]
fn counters_start_at_zero_and_settle_on_value() {
    let cfg = VideoConfig::default();
    let pal = Palette::dark();
    assert_eq!(counter_value(&SceneCtx::new(0.0, &cfg, &pal), 340, 1.5), 0);
    let settled = counter_value(&SceneCtx::new(cfg.fps.secs_to_frames(3.0), &cfg, &pal), 340, 1.5);
    assert!((338..=342).contains(&settled), "got {settled}");
}

#[test]
fn settled_scene_shows_final_numbers_and_labels() {
    let cfg = VideoConfig::default();
    let pal = Palette::dark();
    let n = stats_scene(&SceneCtx::new(cfg.fps.secs_to_frames(4.5), &cfg, &pal), &stats());
    let texts = n.texts();
    for want in [
        "Pull Request Stats",
        "Commits",
        "Files Changed",
        "Lines Added",
        "Lines Deleted",
        "12",
        "7",
        "340",
        "85",
    ] {
        assert!(texts.contains(&want), "missing {want:?} in {texts:?}");
    }
}
