use crate::animation::interpolate::{InterpolateOpts, interpolate};
use crate::animation::spring::{Spring, SpringConfig};
use crate::foundation::core::{Point, Rect, Rgba8, Transform2D};
use crate::github::model::PrStats;
use crate::scene::icons::Icon;
use crate::scene::node::{Node, TextAnchor};
use crate::scenes::SceneCtx;
use crate::scenes::container::{ContainerProps, content_rect, scene_container};

const TILE: f64 = 192.0;
const TILE_GAP: f64 = 24.0;
const BAR_WIDTH: f64 = 448.0;
const BAR_CARD_HEIGHT: f64 = 72.0;

/// Count-up value at the current frame, reaching `to` after roughly `duration_secs`.
pub fn counter_value(ctx: &SceneCtx<'_>, to: u64, duration_secs: f64) -> u64 {
    let p = Spring::new(SpringConfig::new(100.0, 30.0).mass(1.5))
        .duration(ctx.secs(duration_secs))
        .sample(ctx.frame, ctx.fps);
    interpolate(p, [0.0, 1.0], [0.0, to as f64], InterpolateOpts::default())
        .round()
        .max(0.0) as u64
}

/// Final bar fill in percent: `value / max(1, max_value)`, capped at 100.
pub fn bar_percent(value: u64, max_value: u64) -> f64 {
    let max = max_value.max(1) as f64;
    (value as f64 / max * 100.0).min(100.0)
}

struct Tile<'a> {
    icon: Icon,
    label: &'a str,
    value: u64,
    color: Rgba8,
    delay_secs: f64,
}

fn stat_tile(ctx: &SceneCtx<'_>, tile: &Tile<'_>, origin: Point) -> Node {
    let pal = ctx.palette;
    let s = ctx.spring(SpringConfig::new(120.0, 15.0).mass(0.8), tile.delay_secs);
    let dy = interpolate(s, [0.0, 1.0], [20.0, 0.0], InterpolateOpts::default());
    let rect = Rect::new(origin.x, origin.y, origin.x + TILE, origin.y + TILE);
    let cx = rect.center().x;

    let children = vec![
        Node::panel(rect, 12.0, pal.panel.with_alpha(0.6), pal.panel_border),
        Node::icon(tile.icon, Point::new(cx, rect.y0 + 52.0), 48.0, tile.color),
        Node::text(
            Point::new(cx, rect.y0 + 126.0),
            counter_value(ctx, tile.value, 1.5).to_string(),
            40.0,
            tile.color,
        )
        .bold()
        .centered()
        .build(),
        Node::text(Point::new(cx, rect.y0 + 158.0), tile.label, 14.0, pal.muted)
            .centered()
            .build(),
    ];

    let mut t = Transform2D::scale_about(s.max(0.0), rect.center());
    t.translate.y = dy;
    Node::layer(t, s.clamp(0.0, 1.0), children)
}

struct Bar<'a> {
    icon: Icon,
    label: &'a str,
    value: u64,
    color: Rgba8,
    delay_secs: f64,
}

fn stat_bar(ctx: &SceneCtx<'_>, bar: &Bar<'_>, max_value: u64, origin: Point) -> Node {
    let pal = ctx.palette;
    let s = ctx.spring(SpringConfig::new(130.0, 18.0), bar.delay_secs);
    let lin = InterpolateOpts::default();
    let dy = interpolate(s, [0.0, 1.0], [15.0, 0.0], lin);
    let pct = interpolate(s, [0.0, 1.0], [0.0, bar_percent(bar.value, max_value)], lin);

    let card = Rect::new(
        origin.x,
        origin.y,
        origin.x + BAR_WIDTH,
        origin.y + BAR_CARD_HEIGHT,
    );
    let track = Rect::new(card.x0 + 12.0, card.y0 + 44.0, card.x1 - 12.0, card.y0 + 60.0);
    let fill_w = (track.width() * pct / 100.0).clamp(0.0, track.width());

    let children = vec![
        Node::panel(card, 8.0, pal.panel.with_alpha(0.6), pal.panel_border),
        Node::icon(bar.icon, Point::new(card.x0 + 22.0, card.y0 + 22.0), 20.0, bar.color),
        Node::text(
            Point::new(card.x0 + 40.0, card.y0 + 27.0),
            bar.label,
            14.0,
            bar.color,
        )
        .weight(500)
        .build(),
        Node::text(
            Point::new(card.x1 - 12.0, card.y0 + 27.0),
            counter_value(ctx, bar.value, 1.2).to_string(),
            14.0,
            bar.color,
        )
        .bold()
        .anchor(TextAnchor::End)
        .build(),
        Node::panel(track, 4.0, bar.color.with_alpha(0.2), pal.panel_border.with_alpha(0.5)),
        Node::rect(
            Rect::new(track.x0, track.y0, track.x0 + fill_w, track.y1),
            4.0,
            bar.color,
        ),
    ];
    Node::layer(Transform2D::translate(0.0, dy), s.clamp(0.0, 1.0), children)
}

/// Commit and file counters plus addition/deletion bars.
pub fn stats_scene(ctx: &SceneCtx<'_>, stats: &PrStats) -> Node {
    let pal = ctx.palette;
    let area = content_rect(ctx, true);
    let cx = area.center().x;

    let tiles = [
        Tile {
            icon: Icon::GitCommit,
            label: "Commits",
            value: stats.commits,
            color: pal.primary,
            delay_secs: 0.1,
        },
        Tile {
            icon: Icon::FileText,
            label: "Files Changed",
            value: stats.changed_files,
            color: pal.warning,
            delay_secs: 0.3,
        },
    ];
    let tiles_x0 = cx - TILE - TILE_GAP / 2.0;
    let mut body: Vec<Node> = tiles
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let x = tiles_x0 + i as f64 * (TILE + TILE_GAP);
            stat_tile(ctx, t, Point::new(x, area.y0 + 8.0))
        })
        .collect();

    let max_changes = stats.additions.max(stats.deletions).max(1);
    let bars = [
        Bar {
            icon: Icon::PlusCircle,
            label: "Lines Added",
            value: stats.additions,
            color: pal.accent,
            delay_secs: 0.5,
        },
        Bar {
            icon: Icon::MinusCircle,
            label: "Lines Deleted",
            value: stats.deletions,
            color: pal.destructive,
            delay_secs: 0.7,
        },
    ];
    let bars_y0 = area.y0 + 8.0 + TILE + TILE_GAP;
    for (i, b) in bars.iter().enumerate() {
        let y = bars_y0 + i as f64 * (BAR_CARD_HEIGHT + 12.0);
        body.push(stat_bar(ctx, b, max_changes, Point::new(cx - BAR_WIDTH / 2.0, y)));
    }

    scene_container(
        ctx,
        &ContainerProps {
            title: Some("Pull Request Stats"),
            background: None,
        },
        body,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/stats.rs"]
mod tests;
