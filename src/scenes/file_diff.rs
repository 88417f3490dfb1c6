use crate::animation::ease::Ease;
use crate::animation::interpolate::{InterpolateOpts, interpolate};
use crate::animation::spring::{Spring, SpringConfig};
use crate::foundation::core::{Point, Rect, Transform2D};
use crate::github::model::{ChangedFile, FileStatus};
use crate::scene::node::{FontFamily, Node};
use crate::scene::text::{fit_chars, measure, truncate};
use crate::scenes::SceneCtx;

pub const LINE_HEIGHT: f64 = 22.0;
const CODE_SIZE: f64 = 12.0;
const HEADING_HEIGHT: f64 = 44.0;
/// Lines beyond this are not laid out at all.
const MAX_LINES: usize = 2000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiffLineKind {
    Added,
    Deleted,
    Header,
    Context,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffLine {
    pub text: String,
    pub kind: DiffLineKind,
}

impl DiffLineKind {
    /// `+`/`-` mark changes unless they are `+++`/`---` file headers; `@@` opens a hunk.
    pub fn classify(line: &str) -> Self {
        if line.starts_with('+') && !line.starts_with("+++") {
            Self::Added
        } else if line.starts_with('-') && !line.starts_with("---") {
            Self::Deleted
        } else if line.starts_with("@@") {
            Self::Header
        } else {
            Self::Context
        }
    }
}

pub fn parse_patch(patch: &str) -> Vec<DiffLine> {
    diff_lines(patch).collect()
}

fn diff_lines(patch: &str) -> impl Iterator<Item = DiffLine> + '_ {
    patch
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .map(|text| DiffLine {
            kind: DiffLineKind::classify(text),
            text: text.to_owned(),
        })
}

/// Hunks for `filename` cut out of a combined multi-file diff.
///
/// Matches the `diff --git a/… b/{filename}` section header (so renames match on the new name)
/// and returns everything from its first `@@` line to the next section.
pub fn extract_file_hunks(diff: &str, filename: &str) -> Option<String> {
    let suffix = format!(" b/{filename}");
    let mut lines = diff.lines();
    lines.find(|l| l.starts_with("diff --git a/") && l.ends_with(&suffix))?;

    let mut out = Vec::new();
    let mut in_hunk = false;
    for line in lines {
        if line.starts_with("diff --git ") {
            break;
        }
        in_hunk |= line.starts_with("@@");
        if in_hunk {
            out.push(line);
        }
    }
    (!out.is_empty()).then(|| out.join("\n"))
}

/// Patch text shown for `file`.
///
/// Falls back from the file's own patch to its hunks in the combined diff, then to synthetic
/// lines for wholly added or removed files, then to a single notice line. Synthetic bodies stop
/// at the number of lines a file view can show; the hunk header keeps the real count.
pub fn resolve_patch(file: &ChangedFile, combined_diff: &str) -> String {
    if let Some(patch) = file.patch.as_deref().filter(|p| !p.is_empty()) {
        return patch.to_owned();
    }
    if let Some(hunks) = extract_file_hunks(combined_diff, &file.filename) {
        return hunks;
    }
    match file.status {
        FileStatus::Added => {
            let mut s = format!("@@ -0,0 +1,{} @@", file.additions);
            for i in 1..=file.additions.min(MAX_LINES as u64) {
                s.push_str(&format!("\n+Added line {i}"));
            }
            s
        }
        FileStatus::Removed => {
            let mut s = format!("@@ -1,{} +0,0 @@", file.deletions);
            for i in 1..=file.deletions.min(MAX_LINES as u64) {
                s.push_str(&format!("\n-Removed line {i}"));
            }
            s
        }
        _ => format!("Patch data unavailable for {}", file.filename),
    }
}

/// Upward scroll in pixels at `frame` of a file window lasting `window_frames`.
///
/// Eases in and out from 0.3s until half a second before the window ends, and never scrolls
/// past the last line.
pub fn scroll_offset(
    frame: f64,
    ctx: &SceneCtx<'_>,
    window_frames: f64,
    content_height: f64,
    container_height: f64,
) -> f64 {
    let max_scroll = (content_height - container_height).max(0.0);
    if max_scroll == 0.0 {
        return 0.0;
    }
    let start = ctx.secs(0.3);
    let end = (window_frames - ctx.secs(0.5)).max(start + 1.0);
    let progress = interpolate(
        frame,
        [start, end],
        [0.0, 1.0],
        InterpolateOpts::clamped().ease(Ease::InOutEase),
    );
    progress * max_scroll
}

/// One file's diff inside `area`, scrolled and revealed line by line.
pub fn file_diff(
    ctx: &SceneCtx<'_>,
    file: &ChangedFile,
    combined_diff: &str,
    area: Rect,
    window_frames: f64,
) -> Node {
    let pal = ctx.palette;
    let lin = InterpolateOpts::default();

    let heading = format!("{} ({})", file.filename, file.status.as_str());
    let heading = truncate(&heading, fit_chars(area.width() - 24.0, 20.0, FontFamily::Sans));
    let heading_w = measure(&heading, 20.0, FontFamily::Sans) + 20.0;
    let hs = Spring::new(SpringConfig::new(100.0, 15.0))
        .delay(ctx.secs(0.1))
        .sample(ctx.frame, ctx.fps);
    let heading_dy = interpolate(hs, [0.0, 1.0], [15.0, 0.0], lin);
    let cx = area.center().x;
    let heading_card = Rect::new(
        cx - heading_w / 2.0,
        area.y0,
        cx + heading_w / 2.0,
        area.y0 + 32.0,
    );

    let lines: Vec<DiffLine> = diff_lines(&resolve_patch(file, combined_diff))
        .take(MAX_LINES)
        .collect();

    let code = Rect::new(area.x0, area.y0 + HEADING_HEIGHT, area.x1, area.y1);
    let content_h = lines.len() as f64 * LINE_HEIGHT;
    let scroll = scroll_offset(ctx.frame, ctx, window_frames, content_h, code.height());
    let max_chars = fit_chars(code.width() - 24.0, CODE_SIZE, FontFamily::Mono);

    let mut rows = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let y = code.y0 + i as f64 * LINE_HEIGHT - scroll;
        if y + LINE_HEIGHT < code.y0 || y > code.y1 {
            continue;
        }
        let s = Spring::new(SpringConfig::new(150.0, 20.0))
            .delay(i as f64 * 1.5 + ctx.secs(0.2))
            .sample(ctx.frame, ctx.fps);
        if s <= 0.0 {
            continue;
        }
        let (bg, fg) = match line.kind {
            DiffLineKind::Added => (Some(pal.accent.with_alpha(0.15)), pal.accent),
            DiffLineKind::Deleted => (Some(pal.destructive.with_alpha(0.15)), pal.destructive),
            DiffLineKind::Header => (Some(pal.panel_border.with_alpha(0.5)), pal.muted),
            DiffLineKind::Context => (None, pal.foreground),
        };
        let mut row = Vec::with_capacity(2);
        if let Some(bg) = bg {
            row.push(Node::rect(
                Rect::new(code.x0, y, code.x1, y + LINE_HEIGHT),
                0.0,
                bg,
            ));
        }
        let text = if line.text.is_empty() {
            " ".to_owned()
        } else {
            truncate(&line.text.replace('\t', "    "), max_chars)
        };
        row.push(
            Node::text(Point::new(code.x0 + 12.0, y + 15.0), text, CODE_SIZE, fg)
                .mono()
                .build(),
        );
        let dx = interpolate(s, [0.0, 1.0], [-15.0, 0.0], lin);
        rows.push(Node::layer(
            Transform2D::translate(dx, 0.0),
            s.clamp(0.0, 1.0),
            row,
        ));
    }

    Node::group(vec![
        Node::layer(
            Transform2D::translate(0.0, heading_dy),
            hs.clamp(0.0, 1.0),
            vec![
                Node::rect(heading_card, 6.0, pal.panel.with_alpha(0.8)),
                Node::text(
                    Point::new(cx, heading_card.y0 + 23.0),
                    heading,
                    20.0,
                    pal.primary,
                )
                .centered()
                .build(),
            ],
        ),
        Node::panel(code, 6.0, pal.code_bg, pal.panel_border.with_alpha(0.7)),
        Node::clipped(code, rows),
    ])
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/file_diff.rs"]
mod tests;
