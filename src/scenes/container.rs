use crate::animation::ease::Ease;
use crate::animation::interpolate::{InterpolateOpts, interpolate};
use crate::foundation::core::{Point, Rect, Transform2D};
use crate::scene::node::{ImageSource, Node};
use crate::scenes::SceneCtx;

const MARGIN: f64 = 32.0;
const PANEL_RADIUS: f64 = 16.0;
const TITLE_SIZE: f64 = 44.0;
const BACKGROUND_OPACITY: f64 = 0.2;

#[derive(Clone, Debug, Default)]
pub struct ContainerProps<'a> {
    pub title: Option<&'a str>,
    pub background: Option<&'a ImageSource>,
}

/// Panel every scene is drawn on.
pub fn panel_rect(ctx: &SceneCtx<'_>) -> Rect {
    Rect::new(MARGIN, MARGIN, ctx.width() - MARGIN, ctx.height() - MARGIN)
}

/// Area left for scene content inside the panel.
pub fn content_rect(ctx: &SceneCtx<'_>, titled: bool) -> Rect {
    let top = if titled { 140.0 } else { 2.0 * MARGIN };
    Rect::new(
        2.0 * MARGIN,
        top,
        ctx.width() - 2.0 * MARGIN,
        ctx.height() - 1.75 * MARGIN,
    )
}

/// Entrance progress over the first half second.
pub fn entrance_progress(ctx: &SceneCtx<'_>) -> f64 {
    interpolate(
        ctx.frame,
        [0.0, ctx.secs(0.5)],
        [0.0, 1.0],
        InterpolateOpts::clamped().ease(Ease::OutEase),
    )
}

/// Wraps `body` in the shared panel with fade/scale entrance, optional title and background.
pub fn scene_container(ctx: &SceneCtx<'_>, props: &ContainerProps<'_>, body: Vec<Node>) -> Node {
    let pal = ctx.palette;
    let panel = panel_rect(ctx);
    let mut children = Vec::with_capacity(4);

    children.push(Node::panel(
        panel,
        PANEL_RADIUS,
        pal.panel.with_alpha(0.72),
        pal.panel_border,
    ));

    if let Some(bg) = props.background {
        children.push(Node::layer(
            Transform2D::default(),
            BACKGROUND_OPACITY,
            vec![Node::clipped(
                panel,
                vec![Node::image(panel, bg.clone(), false, pal.panel)],
            )],
        ));
    }

    if let Some(title) = props.title {
        let window = [ctx.secs(0.2), ctx.secs(0.7)];
        let opacity = interpolate(
            ctx.frame,
            window,
            [0.0, 1.0],
            InterpolateOpts::clamped().ease(Ease::OutEase),
        );
        let dy = interpolate(
            ctx.frame,
            window,
            [20.0, 0.0],
            InterpolateOpts::clamped().ease(Ease::OutBack(0.5)),
        );
        children.push(Node::layer(
            Transform2D::translate(0.0, dy),
            opacity,
            vec![
                Node::text(
                    Point::new(ctx.width() / 2.0, panel.y0 + 32.0 + TITLE_SIZE),
                    title,
                    TITLE_SIZE,
                    pal.primary,
                )
                .bold()
                .centered()
                .build(),
            ],
        ));
    }

    children.push(Node::group(body));

    let p = entrance_progress(ctx);
    let scale = interpolate(p, [0.0, 1.0], [0.95, 1.0], InterpolateOpts::default());
    Node::layer(
        Transform2D::scale_about(scale, ctx.canvas.center()),
        p,
        children,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/container.rs"]
mod tests;
