use crate::animation::interpolate::{InterpolateOpts, interpolate, interpolate_points};
use crate::animation::spring::{Spring, SpringConfig};
use crate::foundation::core::{Point, Rect, Transform2D};
use crate::github::model::ChangedFile;
use crate::scene::icons::Icon;
use crate::scene::node::{FontFamily, Node};
use crate::scene::text::{fit_chars, wrap};
use crate::scenes::SceneCtx;
use crate::scenes::container::{ContainerProps, content_rect, scene_container};
use crate::scenes::file_diff::file_diff;

const INSIGHT_HEIGHT: f64 = 118.0;
const INSIGHT_TEXT: f64 = 13.0;
const INSIGHT_MAX_WIDTH: f64 = 768.0;

/// Index of the file shown at `frame` and the frame within its window.
///
/// Past the last window the last file stays up.
pub fn file_window(frame: f64, window_frames: f64, files: usize) -> Option<(usize, f64)> {
    if files == 0 || window_frames <= 0.0 {
        return None;
    }
    let idx = ((frame.max(0.0) / window_frames).floor() as usize).min(files - 1);
    Some((idx, frame - idx as f64 * window_frames))
}

fn insight_panel(ctx: &SceneCtx<'_>, insight: &str, area: Rect) -> Node {
    let pal = ctx.palette;
    let s = Spring::new(SpringConfig::new(100.0, 20.0))
        .delay(ctx.secs(0.2))
        .duration(ctx.secs(1.0))
        .sample(ctx.frame, ctx.fps);
    let dy = interpolate(s, [0.0, 1.0], [20.0, 0.0], InterpolateOpts::default());

    let w = area.width().min(INSIGHT_MAX_WIDTH);
    let cx = area.center().x;
    let card = Rect::new(cx - w / 2.0, area.y0, cx + w / 2.0, area.y0 + INSIGHT_HEIGHT);

    let mut children = vec![
        Node::panel(
            card,
            10.0,
            pal.primary.with_alpha(0.1),
            pal.primary.with_alpha(0.2),
        ),
        Node::icon(
            Icon::Lightbulb,
            Point::new(card.x0 + 24.0, card.y0 + 22.0),
            20.0,
            pal.primary,
        ),
        Node::text(
            Point::new(card.x0 + 42.0, card.y0 + 28.0),
            "AI Code Insights:",
            18.0,
            pal.primary,
        )
        .weight(600)
        .build(),
    ];
    let max_chars = fit_chars(w - 28.0, INSIGHT_TEXT, FontFamily::Sans);
    for (i, line) in wrap(insight, max_chars, 4).into_iter().enumerate() {
        children.push(
            Node::text(
                Point::new(card.x0 + 14.0, card.y0 + 52.0 + i as f64 * 18.0),
                line,
                INSIGHT_TEXT,
                pal.foreground,
            )
            .build(),
        );
    }

    Node::layer(Transform2D::translate(0.0, dy), s.clamp(0.0, 1.0), children)
}

/// Optional insight panel above a walkthrough of `files`, one per-file window each.
pub fn code_diff_scene(
    ctx: &SceneCtx<'_>,
    files: &[ChangedFile],
    combined_diff: &str,
    insight: Option<&str>,
) -> Node {
    let pal = ctx.palette;
    let area = content_rect(ctx, true);
    let mut body = Vec::new();

    let mut files_area = area;
    if let Some(text) = insight.filter(|t| !t.trim().is_empty()) {
        body.push(insight_panel(ctx, text, area));
        files_area.y0 += INSIGHT_HEIGHT + 12.0;
    }

    let window = ctx.cfg.per_file_frames() as f64;
    match file_window(ctx.frame, window, files.len()) {
        Some((idx, local)) => {
            let fade = ctx.secs(0.25);
            let first = if idx > 0 { 0.0 } else { 1.0 };
            let last = if idx + 1 < files.len() { 0.0 } else { 1.0 };
            let opacity = interpolate_points(
                local,
                &[0.0, fade, window - fade, window],
                &[first, 1.0, 1.0, last],
                InterpolateOpts::clamped(),
            );
            let file_ctx = ctx.offset(idx as f64 * window);
            body.push(Node::layer(
                Transform2D::default(),
                opacity,
                vec![file_diff(&file_ctx, &files[idx], combined_diff, files_area, window)],
            ));
        }
        None => {
            let c = files_area.center();
            body.push(Node::icon(
                Icon::Lightbulb,
                Point::new(c.x, c.y - 40.0),
                64.0,
                pal.muted,
            ));
            body.push(
                Node::text(
                    Point::new(c.x, c.y + 30.0),
                    "No code changes to display.",
                    20.0,
                    pal.muted,
                )
                .centered()
                .build(),
            );
        }
    }

    scene_container(
        ctx,
        &ContainerProps {
            title: Some("Code Changes & AI Insights"),
            background: None,
        },
        body,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/code_diff.rs"]
mod tests;
