//! Stroke icons drawn on a 24x24 grid, 2px round strokes.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    GitCommit,
    FileText,
    PlusCircle,
    MinusCircle,
    Lightbulb,
    CheckCircle,
    XCircle,
    AlertCircle,
    Clock,
    HelpCircle,
    GitPullRequest,
    GitMerge,
}

/// One primitive of an icon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IconShape {
    Path(&'static str),
    Circle { cx: f64, cy: f64, r: f64 },
}

/// Side of the square grid icon coordinates live in.
pub const ICON_GRID: f64 = 24.0;

const RING: IconShape = IconShape::Circle {
    cx: 12.0,
    cy: 12.0,
    r: 10.0,
};

impl Icon {
    pub fn shapes(self) -> &'static [IconShape] {
        use IconShape::{Circle, Path};
        match self {
            Self::GitCommit => &[
                Circle {
                    cx: 12.0,
                    cy: 12.0,
                    r: 3.0,
                },
                Path("M3 12h6"),
                Path("M15 12h6"),
            ],
            Self::FileText => &[
                Path("M15 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V7Z"),
                Path("M14 2v4a2 2 0 0 0 2 2h4"),
                Path("M10 9H8"),
                Path("M16 13H8"),
                Path("M16 17H8"),
            ],
            Self::PlusCircle => &[RING, Path("M8 12h8"), Path("M12 8v8")],
            Self::MinusCircle => &[RING, Path("M8 12h8")],
            Self::Lightbulb => &[
                Path(
                    "M15 14c.2-1 .7-1.7 1.5-2.5 1-.9 1.5-2.2 1.5-3.5A6 6 0 0 0 6 8c0 1 .2 2.2 1.5 3.5.7.7 1.3 1.5 1.5 2.5",
                ),
                Path("M9 18h6"),
                Path("M10 22h4"),
            ],
            Self::CheckCircle => &[RING, Path("m9 12 2 2 4-4")],
            Self::XCircle => &[RING, Path("m15 9-6 6"), Path("m9 9 6 6")],
            Self::AlertCircle => &[RING, Path("M12 8v4"), Path("M12 16h.01")],
            Self::Clock => &[RING, Path("M12 6v6l4 2")],
            Self::HelpCircle => &[
                RING,
                Path("M9.09 9a3 3 0 0 1 5.83 1c0 2-3 3-3 3"),
                Path("M12 17h.01"),
            ],
            Self::GitPullRequest => &[
                Circle {
                    cx: 18.0,
                    cy: 18.0,
                    r: 3.0,
                },
                Circle {
                    cx: 6.0,
                    cy: 6.0,
                    r: 3.0,
                },
                Path("M13 6h3a2 2 0 0 1 2 2v7"),
                Path("M6 9v12"),
            ],
            Self::GitMerge => &[
                Circle {
                    cx: 18.0,
                    cy: 18.0,
                    r: 3.0,
                },
                Circle {
                    cx: 6.0,
                    cy: 6.0,
                    r: 3.0,
                },
                Path("M6 21V9a9 9 0 0 0 9 9"),
            ],
        }
    }
}
