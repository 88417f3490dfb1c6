use serde::Serialize;

use crate::foundation::core::{Point, Rect, Rgba8, Transform2D};
use crate::scene::icons::Icon;

/// Typeface class; concrete faces are resolved by the rasterizer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Sans,
    Mono,
}

impl FontFamily {
    pub fn css(self) -> &'static str {
        match self {
            Self::Sans => "sans-serif",
            Self::Mono => "monospace",
        }
    }
}

/// Horizontal alignment of a text run relative to its position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

/// Where an image's pixels come from. Resolved to bytes before rendering.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSource {
    /// `http(s)://` URL.
    Remote(String),
    /// Path relative to the asset directory.
    Local(String),
}

impl ImageSource {
    /// Classify `s` as remote when it carries an http(s) scheme.
    pub fn parse(s: &str) -> Self {
        if s.starts_with("http://") || s.starts_with("https://") {
            Self::Remote(s.to_owned())
        } else {
            Self::Local(s.to_owned())
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::Remote(s) | Self::Local(s) => s,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GroupNode {
    pub transform: Transform2D,
    pub opacity: f64,
    /// Clip rectangle in the group's local space.
    pub clip: Option<Rect>,
    pub children: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RectNode {
    pub rect: Rect,
    pub radius: f64,
    pub fill: Rgba8,
    pub stroke: Option<(Rgba8, f64)>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CircleNode {
    pub center: Point,
    pub radius: f64,
    pub fill: Option<Rgba8>,
    pub stroke: Option<(Rgba8, f64)>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TextNode {
    /// Baseline origin.
    pub pos: Point,
    pub text: String,
    pub size: f64,
    pub weight: u16,
    pub fill: Rgba8,
    pub anchor: TextAnchor,
    pub family: FontFamily,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImageNode {
    pub rect: Rect,
    pub source: ImageSource,
    /// Clip to the inscribed circle (avatars).
    pub round: bool,
    /// Painted instead of the image when it could not be loaded.
    pub fallback: Rgba8,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IconNode {
    pub icon: Icon,
    pub center: Point,
    pub size: f64,
    pub color: Rgba8,
}

/// Visual tree produced by a scene for one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Group(GroupNode),
    Rect(RectNode),
    Circle(CircleNode),
    Text(TextNode),
    Image(ImageNode),
    Icon(IconNode),
}

impl Node {
    pub fn group(children: Vec<Node>) -> Self {
        Self::Group(GroupNode {
            transform: Transform2D::default(),
            opacity: 1.0,
            clip: None,
            children,
        })
    }

    /// Group with `transform` and `opacity` applied to `children`.
    pub fn layer(transform: Transform2D, opacity: f64, children: Vec<Node>) -> Self {
        Self::Group(GroupNode {
            transform,
            opacity,
            clip: None,
            children,
        })
    }

    pub fn clipped(clip: Rect, children: Vec<Node>) -> Self {
        Self::Group(GroupNode {
            transform: Transform2D::default(),
            opacity: 1.0,
            clip: Some(clip),
            children,
        })
    }

    pub fn rect(rect: Rect, radius: f64, fill: Rgba8) -> Self {
        Self::Rect(RectNode {
            rect,
            radius,
            fill,
            stroke: None,
        })
    }

    pub fn panel(rect: Rect, radius: f64, fill: Rgba8, border: Rgba8) -> Self {
        Self::Rect(RectNode {
            rect,
            radius,
            fill,
            stroke: Some((border, 1.5)),
        })
    }

    pub fn ring(center: Point, radius: f64, color: Rgba8, width: f64) -> Self {
        Self::Circle(CircleNode {
            center,
            radius,
            fill: None,
            stroke: Some((color, width)),
        })
    }

    pub fn text(pos: Point, text: impl Into<String>, size: f64, fill: Rgba8) -> TextBuilder {
        TextBuilder(TextNode {
            pos,
            text: text.into(),
            size,
            weight: 400,
            fill,
            anchor: TextAnchor::Start,
            family: FontFamily::Sans,
        })
    }

    pub fn image(rect: Rect, source: ImageSource, round: bool, fallback: Rgba8) -> Self {
        Self::Image(ImageNode {
            rect,
            source,
            round,
            fallback,
        })
    }

    pub fn icon(icon: Icon, center: Point, size: f64, color: Rgba8) -> Self {
        Self::Icon(IconNode {
            icon,
            center,
            size,
            color,
        })
    }

    /// Invisible node; serializes to nothing.
    pub fn empty() -> Self {
        Self::group(Vec::new())
    }

    /// Calls `f` for every node in depth-first order.
    pub fn visit<'a>(&'a self, f: &mut dyn FnMut(&'a Node)) {
        f(self);
        if let Self::Group(g) = self {
            for child in &g.children {
                child.visit(f);
            }
        }
    }

    /// Concatenated text of every text node, in tree order.
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.visit(&mut |n| {
            if let Node::Text(t) = n {
                out.push(t.text.as_str());
            }
        });
        out
    }

    /// Image sources referenced anywhere in the tree.
    pub fn image_sources(&self) -> Vec<&ImageSource> {
        let mut out = Vec::new();
        self.visit(&mut |n| {
            if let Node::Image(i) = n {
                out.push(&i.source);
            }
        });
        out
    }
}

/// Builder for [`TextNode`] options.
#[derive(Clone, Debug)]
pub struct TextBuilder(TextNode);

impl TextBuilder {
    pub fn weight(mut self, weight: u16) -> Self {
        self.0.weight = weight;
        self
    }

    pub fn bold(self) -> Self {
        self.weight(700)
    }

    pub fn centered(mut self) -> Self {
        self.0.anchor = TextAnchor::Middle;
        self
    }

    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.0.anchor = anchor;
        self
    }

    pub fn mono(mut self) -> Self {
        self.0.family = FontFamily::Mono;
        self
    }

    pub fn build(self) -> Node {
        Node::Text(self.0)
    }
}

impl From<TextBuilder> for Node {
    fn from(b: TextBuilder) -> Self {
        b.build()
    }
}
