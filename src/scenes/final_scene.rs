use crate::animation::ease::Ease;
use crate::animation::interpolate::{InterpolateOpts, interpolate};
use crate::animation::spring::SpringConfig;
use crate::foundation::core::{Point, Rect, Rgba8, Transform2D};
use crate::github::model::{PrState, PullRequestSnapshot, UserRef};
use crate::scene::icons::Icon;
use crate::scene::node::{ImageSource, Node};
use crate::scenes::SceneCtx;
use crate::scenes::container::{ContainerProps, content_rect, scene_container};
use crate::storage::theme::Palette;

const AVATAR: f64 = 64.0;

/// What the closing card says about the PR.
#[derive(Clone, Debug, PartialEq)]
pub struct FinalStatus<'a> {
    pub icon: Icon,
    pub headline: &'static str,
    pub subline: String,
    pub color: Rgba8,
    /// Shown next to the subline when the PR was merged by a known user.
    pub merger: Option<&'a UserRef>,
}

pub fn final_status<'a>(pr: &'a PullRequestSnapshot, pal: &Palette) -> FinalStatus<'a> {
    let default_sub = format!("PR #{}", pr.number);
    match pr.state {
        PrState::Open => FinalStatus {
            icon: Icon::GitPullRequest,
            headline: "Ready for Review",
            subline: default_sub,
            color: pal.info,
            merger: None,
        },
        PrState::Merged if pr.merged_at.is_some() => FinalStatus {
            icon: Icon::GitMerge,
            headline: "Successfully Merged!",
            subline: pr
                .merged_by
                .as_ref()
                .map(|u| format!("Merged by @{}", u.login))
                .unwrap_or(default_sub),
            color: pal.merged,
            merger: pr.merged_by.as_ref(),
        },
        PrState::Closed if pr.merged_at.is_none() => FinalStatus {
            icon: Icon::XCircle,
            headline: "PR Closed",
            subline: default_sub,
            color: pal.destructive,
            merger: None,
        },
        _ => FinalStatus {
            icon: Icon::GitPullRequest,
            headline: "PR Status",
            subline: default_sub,
            color: pal.muted,
            merger: None,
        },
    }
}

/// Closing card with the PR's final state.
pub fn final_scene(ctx: &SceneCtx<'_>, pr: &PullRequestSnapshot) -> Node {
    let pal = ctx.palette;
    let status = final_status(pr, pal);
    let lin = InterpolateOpts::default();
    let c = content_rect(ctx, true).center();

    let icon_p = ctx.spring(SpringConfig::new(80.0, 15.0).mass(1.2), 0.0);
    let head_p = ctx.spring(SpringConfig::new(90.0, 18.0), 0.2);
    let avatar_p = ctx.spring(SpringConfig::new(90.0, 18.0), 0.3);
    let sub_p = ctx.spring(SpringConfig::new(90.0, 18.0), 0.4);

    let icon_center = Point::new(c.x, c.y - 80.0);
    let icon_scale = interpolate(icon_p, [0.0, 1.0], [0.3, 1.0], lin);
    let mut body = vec![
        Node::layer(
            Transform2D::scale_about(icon_scale, icon_center),
            icon_p.clamp(0.0, 1.0),
            vec![Node::icon(status.icon, icon_center, 120.0, status.color)],
        ),
        Node::layer(
            Transform2D::translate(0.0, interpolate(head_p, [0.0, 1.0], [20.0, 0.0], lin)),
            head_p.clamp(0.0, 1.0),
            vec![
                Node::text(Point::new(c.x, c.y + 40.0), status.headline, 48.0, status.color)
                    .bold()
                    .centered()
                    .build(),
            ],
        ),
    ];

    let sub_y = c.y + 100.0;
    let mut sub_x = c.x;
    if let Some(url) = status.merger.and_then(|u| u.avatar_url.as_deref()) {
        let avatar_center = Point::new(c.x - 170.0, sub_y - 9.0);
        let avatar = Rect::from_center_size(avatar_center, (AVATAR, AVATAR));
        let s = interpolate(
            avatar_p,
            [0.0, 1.0],
            [0.0, 1.0],
            InterpolateOpts::clamped().ease(Ease::OutBack(1.5)),
        );
        body.push(Node::layer(
            Transform2D::scale_about(s, avatar_center),
            avatar_p.clamp(0.0, 1.0),
            vec![Node::image(avatar, ImageSource::parse(url), true, pal.panel_border)],
        ));
        sub_x += AVATAR / 2.0;
    }
    body.push(Node::layer(
        Transform2D::translate(0.0, interpolate(sub_p, [0.0, 1.0], [20.0, 0.0], lin)),
        sub_p.clamp(0.0, 1.0),
        vec![
            Node::text(Point::new(sub_x, sub_y), status.subline, 26.0, pal.muted)
                .centered()
                .build(),
        ],
    ));

    scene_container(
        ctx,
        &ContainerProps {
            title: Some("Final Status"),
            background: None,
        },
        body,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/final_scene.rs"]
mod tests;
