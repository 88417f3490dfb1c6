use serde::Serialize;

use crate::animation::interpolate::{InterpolateOpts, interpolate};
use crate::animation::spring::SpringConfig;
use crate::foundation::core::{Point, Rgba8, Transform2D};
use crate::github::model::{CheckConclusion, CheckRun, CheckStatus};
use crate::scene::icons::Icon;
use crate::scene::node::Node;
use crate::scenes::SceneCtx;
use crate::scenes::container::{ContainerProps, content_rect, scene_container};
use crate::storage::theme::Palette;

/// Aggregate CI state across all check runs of the head commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CiOverall {
    Unknown,
    Pending,
    Failure,
    Success,
    Mixed,
}

impl CiOverall {
    pub fn label(self) -> &'static str {
        match self {
            Self::Unknown => "No Checks Found",
            Self::Pending => "Checks In Progress...",
            Self::Failure => "Some Checks Failed",
            Self::Success => "All Checks Passed!",
            Self::Mixed => "Checks Completed",
        }
    }

    pub fn icon(self) -> Icon {
        match self {
            Self::Unknown => Icon::HelpCircle,
            Self::Pending => Icon::Clock,
            Self::Failure => Icon::XCircle,
            Self::Success => Icon::CheckCircle,
            Self::Mixed => Icon::AlertCircle,
        }
    }

    pub fn color(self, pal: &Palette) -> Rgba8 {
        match self {
            Self::Unknown | Self::Mixed => pal.warning,
            Self::Pending => pal.info,
            Self::Failure => pal.destructive,
            Self::Success => pal.accent,
        }
    }
}

/// Reduce check runs to one overall state.
///
/// Precedence: no runs, then anything still running, then any failure, then all passing.
/// The result does not depend on the order of `runs`.
pub fn overall_status(runs: &[CheckRun]) -> CiOverall {
    if runs.is_empty() {
        return CiOverall::Unknown;
    }
    let all_completed = runs.iter().all(|r| r.status == CheckStatus::Completed);
    let any_running = runs
        .iter()
        .any(|r| matches!(r.status, CheckStatus::InProgress | CheckStatus::Queued));
    if !all_completed && any_running {
        return CiOverall::Pending;
    }
    let any_failed = runs.iter().any(|r| {
        matches!(
            r.conclusion,
            Some(CheckConclusion::Failure | CheckConclusion::TimedOut | CheckConclusion::Cancelled)
        )
    });
    if any_failed {
        return CiOverall::Failure;
    }
    if all_completed {
        let all_ok = runs.iter().all(|r| {
            matches!(
                r.conclusion,
                Some(CheckConclusion::Success | CheckConclusion::Skipped | CheckConclusion::Neutral)
            )
        });
        return if all_ok {
            CiOverall::Success
        } else {
            CiOverall::Mixed
        };
    }
    CiOverall::Pending
}

/// One icon and one line summarizing CI.
pub fn ci_status_scene(ctx: &SceneCtx<'_>, runs: &[CheckRun]) -> Node {
    let status = overall_status(runs);
    let color = status.color(ctx.palette);
    let lin = InterpolateOpts::default();
    let c = content_rect(ctx, true).center();

    let icon_p = ctx.spring(SpringConfig::new(110.0, 12.0).mass(0.7), 0.0);
    let text_p = ctx.spring(SpringConfig::new(130.0, 16.0).mass(0.6), 0.3);
    let icon_center = Point::new(c.x, c.y - 50.0);

    let body = vec![
        Node::layer(
            Transform2D::scale_about(icon_p.max(0.0), icon_center),
            icon_p.clamp(0.0, 1.0),
            vec![Node::icon(status.icon(), icon_center, 120.0, color)],
        ),
        Node::layer(
            Transform2D::translate(0.0, interpolate(text_p, [0.0, 1.0], [15.0, 0.0], lin)),
            text_p.clamp(0.0, 1.0),
            vec![
                Node::text(Point::new(c.x, c.y + 70.0), status.label(), 40.0, color)
                    .bold()
                    .centered()
                    .build(),
            ],
        ),
    ];

    scene_container(
        ctx,
        &ContainerProps {
            title: Some("CI/CD Status"),
            background: None,
        },
        body,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/ci_status.rs"]
mod tests;
