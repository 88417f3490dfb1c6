use crate::animation::interpolate::{InterpolateOpts, interpolate};
use crate::animation::spring::SpringConfig;
use crate::foundation::core::{Point, Rect, Transform2D};
use crate::github::model::PullRequestSnapshot;
use crate::scene::node::{FontFamily, ImageSource, Node, TextAnchor};
use crate::scene::text::{fit_chars, measure, wrap};
use crate::scenes::SceneCtx;
use crate::scenes::container::{ContainerProps, scene_container};

const TITLE_SIZE: f64 = 56.0;
const TITLE_LINE: f64 = 66.0;
const AVATAR: f64 = 80.0;

/// Opening card: PR title, author and branch badges.
pub fn title_scene(
    ctx: &SceneCtx<'_>,
    pr: &PullRequestSnapshot,
    background: Option<&ImageSource>,
) -> Node {
    let pal = ctx.palette;
    let lin = InterpolateOpts::default();
    let cx = ctx.width() / 2.0;

    let title_p = ctx.spring(SpringConfig::new(100.0, 15.0).mass(1.2), 0.2);
    let avatar_p = ctx.spring(SpringConfig::new(120.0, 10.0), 0.5);
    let details_p = ctx.spring(SpringConfig::new(90.0, 18.0), 0.8);

    let max_chars = fit_chars(ctx.width() - 320.0, TITLE_SIZE, FontFamily::Sans);
    let lines = wrap(&pr.title, max_chars, 2);
    let title_top = 250.0 - (lines.len().saturating_sub(1) as f64) * TITLE_LINE / 2.0;
    let title_nodes: Vec<Node> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            Node::text(
                Point::new(cx, title_top + i as f64 * TITLE_LINE),
                line.as_str(),
                TITLE_SIZE,
                pal.foreground,
            )
            .bold()
            .centered()
            .build()
        })
        .collect();
    let title_block_bottom = title_top + (lines.len().max(1) - 1) as f64 * TITLE_LINE;

    let title_scale = interpolate(title_p, [0.0, 1.0], [0.9, 1.0], lin);
    let title_dy = interpolate(title_p, [0.0, 1.0], [50.0, 0.0], lin);
    let title_center = Point::new(cx, title_top);
    let mut t = Transform2D::scale_about(title_scale, title_center);
    t.translate.y = title_dy;

    let mut body = vec![Node::layer(t, title_p.clamp(0.0, 1.0), title_nodes)];

    let row_y = title_block_bottom + 40.0;
    if let Some(author) = &pr.author {
        let label = format!("@{}", author.login);
        let label_w = measure(&label, 30.0, FontFamily::Sans);
        let row_w = AVATAR + 16.0 + label_w;
        let x0 = cx - row_w / 2.0;
        let avatar_rect = Rect::new(x0, row_y, x0 + AVATAR, row_y + AVATAR);

        let mut row = vec![Node::ring(
            avatar_rect.center(),
            AVATAR / 2.0 + 2.0,
            pal.primary.with_alpha(0.8),
            4.0,
        )];
        if let Some(url) = author.avatar_url.as_deref() {
            row.push(Node::image(
                avatar_rect,
                ImageSource::parse(url),
                true,
                pal.panel_border,
            ));
        }
        row.push(
            Node::text(
                Point::new(avatar_rect.x1 + 16.0, row_y + AVATAR / 2.0 + 11.0),
                label,
                30.0,
                pal.foreground.with_alpha(0.85),
            )
            .weight(500)
            .build(),
        );
        let s = interpolate(avatar_p, [0.0, 1.0], [0.5, 1.0], lin);
        body.push(Node::layer(
            Transform2D::scale_about(s, Point::new(cx, row_y + AVATAR / 2.0)),
            avatar_p.clamp(0.0, 1.0),
            row,
        ));
    }

    let details_y = row_y + AVATAR + 48.0;
    let arrow = " → ";
    let arrow_half = measure(arrow, 24.0, FontFamily::Sans) / 2.0;
    let details = vec![
        Node::text(
            Point::new(cx, details_y),
            format!("PR #{}", pr.number),
            24.0,
            pal.muted,
        )
        .centered()
        .build(),
        Node::text(
            Point::new(cx - arrow_half, details_y + 36.0),
            pr.head.name.as_str(),
            24.0,
            pal.accent.with_alpha(0.9),
        )
        .weight(600)
        .anchor(TextAnchor::End)
        .build(),
        Node::text(Point::new(cx, details_y + 36.0), arrow, 24.0, pal.muted)
            .centered()
            .build(),
        Node::text(
            Point::new(cx + arrow_half, details_y + 36.0),
            pr.base.name.as_str(),
            24.0,
            pal.primary.with_alpha(0.9),
        )
        .weight(600)
        .build(),
    ];
    let details_dy = interpolate(details_p, [0.0, 1.0], [30.0, 0.0], lin);
    body.push(Node::layer(
        Transform2D::translate(0.0, details_dy),
        details_p.clamp(0.0, 1.0),
        details,
    ));

    scene_container(
        ctx,
        &ContainerProps {
            title: None,
            background,
        },
        body,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/title.rs"]
mod tests;
