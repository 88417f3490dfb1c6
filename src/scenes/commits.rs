use crate::animation::interpolate::{InterpolateOpts, interpolate};
use crate::animation::spring::{Spring, SpringConfig};
use crate::foundation::core::{Point, Rect, Transform2D};
use crate::github::model::CommitRecord;
use crate::scene::icons::Icon;
use crate::scene::node::{FontFamily, ImageSource, Node, TextAnchor};
use crate::scene::text::{fit_chars, truncate};
use crate::scenes::SceneCtx;
use crate::scenes::container::{ContainerProps, content_rect, scene_container};

const ROW_HEIGHT: f64 = 88.0;
const ROW_GAP: f64 = 14.0;
const ROW_MAX_WIDTH: f64 = 960.0;
const AVATAR: f64 = 48.0;

/// The commits shown, most recent first.
pub fn recent_commits(commits: &[CommitRecord], max: usize) -> Vec<&CommitRecord> {
    commits.iter().rev().take(max).collect()
}

/// Byline under a commit headline.
pub fn byline(commit: &CommitRecord) -> String {
    match commit.authored_at {
        Some(at) => format!(
            "by {} on {}",
            commit.display_author(),
            at.format("%b %-d, %Y")
        ),
        None => format!("by {}", commit.display_author()),
    }
}

fn commit_row(ctx: &SceneCtx<'_>, commit: &CommitRecord, row: Rect) -> Vec<Node> {
    let pal = ctx.palette;
    let avatar = Rect::new(
        row.x0 + 20.0,
        row.center().y - AVATAR / 2.0,
        row.x0 + 20.0 + AVATAR,
        row.center().y + AVATAR / 2.0,
    );
    let mut nodes = vec![Node::panel(row, 10.0, pal.panel, pal.panel_border)];
    match commit.avatar_url.as_deref() {
        Some(url) => nodes.push(Node::image(
            avatar,
            ImageSource::parse(url),
            true,
            pal.panel_border,
        )),
        None => {
            nodes.push(Node::ring(avatar.center(), AVATAR / 2.0, pal.primary.with_alpha(0.4), 2.0));
            nodes.push(Node::icon(Icon::GitCommit, avatar.center(), 26.0, pal.primary));
        }
    }

    let text_x = avatar.x1 + 18.0;
    let sha_w = 90.0;
    let max_chars = fit_chars(row.x1 - text_x - sha_w - 20.0, 20.0, FontFamily::Sans);
    nodes.push(
        Node::text(
            Point::new(text_x, row.y0 + 36.0),
            truncate(commit.headline(), max_chars),
            20.0,
            pal.foreground,
        )
        .weight(600)
        .build(),
    );
    nodes.push(
        Node::text(
            Point::new(text_x, row.y0 + 64.0),
            byline(commit),
            15.0,
            pal.muted,
        )
        .build(),
    );
    let short: String = commit.sha.chars().take(7).collect();
    nodes.push(
        Node::text(
            Point::new(row.x1 - 20.0, row.y0 + 36.0),
            short,
            15.0,
            pal.primary.with_alpha(0.8),
        )
        .mono()
        .anchor(TextAnchor::End)
        .build(),
    );
    nodes
}

/// Latest commits as staggered cards.
pub fn commit_history_scene(ctx: &SceneCtx<'_>, commits: &[CommitRecord]) -> Node {
    let area = content_rect(ctx, true);
    let w = area.width().min(ROW_MAX_WIDTH);
    let x0 = area.center().x - w / 2.0;
    let stagger = ctx.fps.as_f64() / 2.5;
    let lin = InterpolateOpts::default();

    let body = recent_commits(commits, ctx.cfg.max_commits_shown)
        .into_iter()
        .enumerate()
        .map(|(i, commit)| {
            let p = Spring::new(SpringConfig::new(100.0, 15.0).mass(0.7))
                .delay(i as f64 * stagger)
                .sample(ctx.frame, ctx.fps);
            let y0 = area.y0 + i as f64 * (ROW_HEIGHT + ROW_GAP);
            let row = Rect::new(x0, y0, x0 + w, y0 + ROW_HEIGHT);
            let mut t = Transform2D::scale_about(
                interpolate(p, [0.0, 1.0], [0.9, 1.0], lin),
                row.center(),
            );
            t.translate.y = interpolate(p, [0.0, 1.0], [25.0, 0.0], lin);
            Node::layer(t, p.clamp(0.0, 1.0), commit_row(ctx, commit, row))
        })
        .collect();

    scene_container(
        ctx,
        &ContainerProps {
            title: Some("Commit History"),
            background: None,
        },
        body,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/commits.rs"]
mod tests;
