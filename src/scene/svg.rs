//! Serialization of a [`Node`] tree into a standalone SVG document.

use std::fmt::Write as _;

use crate::foundation::core::{Canvas, Rgba8};
use crate::scene::icons::{ICON_GRID, IconShape};
use crate::scene::node::{
    CircleNode, GroupNode, IconNode, ImageNode, ImageSource, Node, RectNode, TextAnchor, TextNode,
};

/// Maps image sources to embeddable `data:` URLs.
pub trait ImageResolver {
    fn data_url(&self, source: &ImageSource) -> Option<&str>;
}

/// Resolver that knows no images; every image paints its fallback.
pub struct NoImages;

impl ImageResolver for NoImages {
    fn data_url(&self, _source: &ImageSource) -> Option<&str> {
        None
    }
}

/// Escape text for use in SVG character data and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            // Control characters other than tab are not allowed in XML 1.0.
            c if c.is_control() && c != '\t' => {}
            c => out.push(c),
        }
    }
    out
}

fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_owned();
    }
    let r = (v * 1000.0).round() / 1000.0;
    if r == r.trunc() {
        format!("{}", r as i64)
    } else {
        format!("{r}")
    }
}

fn paint(attr: &str, c: Rgba8) -> String {
    if c.a == 255 {
        format!(r#" {attr}="{}""#, c.css_rgb())
    } else {
        format!(
            r#" {attr}="{}" {attr}-opacity="{}""#,
            c.css_rgb(),
            num(c.opacity())
        )
    }
}

struct Writer<'a> {
    out: String,
    images: &'a dyn ImageResolver,
    next_id: usize,
}

impl Writer<'_> {
    fn fresh_id(&mut self) -> String {
        self.next_id += 1;
        format!("c{}", self.next_id)
    }

    fn node(&mut self, n: &Node) {
        match n {
            Node::Group(g) => self.group(g),
            Node::Rect(r) => self.rect(r),
            Node::Circle(c) => self.circle(c),
            Node::Text(t) => self.text(t),
            Node::Image(i) => self.image(i),
            Node::Icon(i) => self.icon(i),
        }
    }

    fn group(&mut self, g: &GroupNode) {
        if g.children.is_empty() || g.opacity <= 0.0 {
            return;
        }
        let mut attrs = String::new();
        if !g.transform.is_identity() {
            let [a, b, c, d, e, f] = g.transform.to_affine().as_coeffs();
            let _ = write!(
                attrs,
                r#" transform="matrix({} {} {} {} {} {})""#,
                num(a),
                num(b),
                num(c),
                num(d),
                num(e),
                num(f)
            );
        }
        if g.opacity < 1.0 {
            let _ = write!(attrs, r#" opacity="{}""#, num(g.opacity));
        }
        if let Some(clip) = g.clip {
            let id = self.fresh_id();
            let _ = write!(
                self.out,
                r#"<clipPath id="{id}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
                num(clip.x0),
                num(clip.y0),
                num(clip.width()),
                num(clip.height())
            );
            let _ = write!(attrs, r#" clip-path="url(#{id})""#);
        }
        let _ = write!(self.out, "<g{attrs}>");
        for child in &g.children {
            self.node(child);
        }
        self.out.push_str("</g>");
    }

    fn rect(&mut self, r: &RectNode) {
        if r.rect.width() <= 0.0 || r.rect.height() <= 0.0 {
            return;
        }
        let _ = write!(
            self.out,
            r#"<rect x="{}" y="{}" width="{}" height="{}""#,
            num(r.rect.x0),
            num(r.rect.y0),
            num(r.rect.width()),
            num(r.rect.height())
        );
        if r.radius > 0.0 {
            let _ = write!(self.out, r#" rx="{}""#, num(r.radius));
        }
        self.out.push_str(&paint("fill", r.fill));
        if let Some((color, width)) = r.stroke {
            self.out.push_str(&paint("stroke", color));
            let _ = write!(self.out, r#" stroke-width="{}""#, num(width));
        }
        self.out.push_str("/>");
    }

    fn circle(&mut self, c: &CircleNode) {
        let _ = write!(
            self.out,
            r#"<circle cx="{}" cy="{}" r="{}""#,
            num(c.center.x),
            num(c.center.y),
            num(c.radius)
        );
        match c.fill {
            Some(fill) => self.out.push_str(&paint("fill", fill)),
            None => self.out.push_str(r#" fill="none""#),
        }
        if let Some((color, width)) = c.stroke {
            self.out.push_str(&paint("stroke", color));
            let _ = write!(self.out, r#" stroke-width="{}""#, num(width));
        }
        self.out.push_str("/>");
    }

    fn text(&mut self, t: &TextNode) {
        if t.text.is_empty() {
            return;
        }
        let anchor = match t.anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        };
        let _ = write!(
            self.out,
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}" font-weight="{}" text-anchor="{anchor}" xml:space="preserve""#,
            num(t.pos.x),
            num(t.pos.y),
            t.family.css(),
            num(t.size),
            t.weight
        );
        self.out.push_str(&paint("fill", t.fill));
        let _ = write!(self.out, ">{}</text>", escape(&t.text));
    }

    fn image(&mut self, i: &ImageNode) {
        let r = i.rect;
        let Some(href) = self.images.data_url(&i.source) else {
            let radius = if i.round { r.width().min(r.height()) / 2.0 } else { 0.0 };
            self.rect(&RectNode {
                rect: r,
                radius,
                fill: i.fallback,
                stroke: None,
            });
            return;
        };

        let mut clip_attr = String::new();
        if i.round {
            let id = self.fresh_id();
            let _ = write!(
                self.out,
                r#"<clipPath id="{id}"><circle cx="{}" cy="{}" r="{}"/></clipPath>"#,
                num(r.center().x),
                num(r.center().y),
                num(r.width().min(r.height()) / 2.0)
            );
            clip_attr = format!(r#" clip-path="url(#{id})""#);
        }
        let _ = write!(
            self.out,
            r#"<image x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="xMidYMid slice" href="{}"{clip_attr}/>"#,
            num(r.x0),
            num(r.y0),
            num(r.width()),
            num(r.height()),
            escape(href)
        );
    }

    fn icon(&mut self, i: &IconNode) {
        let s = i.size / ICON_GRID;
        let x = i.center.x - i.size / 2.0;
        let y = i.center.y - i.size / 2.0;
        let _ = write!(
            self.out,
            r#"<g transform="matrix({} 0 0 {} {} {})" fill="none" stroke-width="2" stroke-linecap="round" stroke-linejoin="round""#,
            num(s),
            num(s),
            num(x),
            num(y)
        );
        self.out.push_str(&paint("stroke", i.color));
        self.out.push('>');
        for shape in i.icon.shapes() {
            match *shape {
                IconShape::Path(d) => {
                    let _ = write!(self.out, r#"<path d="{d}"/>"#);
                }
                IconShape::Circle { cx, cy, r } => {
                    let _ = write!(
                        self.out,
                        r#"<circle cx="{}" cy="{}" r="{}"/>"#,
                        num(cx),
                        num(cy),
                        num(r)
                    );
                }
            }
        }
        self.out.push_str("</g>");
    }
}

/// Serialize `root` over a solid `background` into an SVG document sized to `canvas`.
pub fn to_svg(
    root: &Node,
    canvas: Canvas,
    background: Rgba8,
    images: &dyn ImageResolver,
) -> String {
    let mut w = Writer {
        out: String::with_capacity(8 * 1024),
        images,
        next_id: 0,
    };
    let _ = write!(
        w.out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{0}" height="{1}" viewBox="0 0 {0} {1}">"#,
        canvas.width, canvas.height
    );
    let _ = write!(
        w.out,
        r#"<rect width="{}" height="{}""#,
        canvas.width, canvas.height
    );
    w.out.push_str(&paint("fill", Rgba8 { a: 255, ..background }));
    w.out.push_str("/>");
    w.node(root);
    w.out.push_str("</svg>");
    w.out
}

#[cfg(test)]
#[path = "../../tests/unit/scene/svg.rs"]
mod tests;
