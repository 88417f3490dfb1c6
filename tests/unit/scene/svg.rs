use super::*;
use crate::foundation::core::{Point, Rect, Transform2D};
use crate::scene::icons::Icon;

const CANVAS: Canvas = Canvas {
    width: 320,
    height: 180,
};

struct OneImage;

impl ImageResolver for OneImage {
    fn data_url(&self, source: &ImageSource) -> Option<&str> {
        (source.key() == "avatar.png").then_some("data:image/png;base64,AAAA")
    }
}

#[test]
fn escape_handles_markup_characters() {
    assert_eq!(escape(r#"<a & "b">'"#), "&lt;a &amp; &quot;b&quot;&gt;&apos;");
    assert_eq!(escape("tab\there\u{7}"), "tab\there");
}

#[test]
fn document_has_canvas_size_and_background() {
    let svg = to_svg(&Node::empty(), CANVAS, Rgba8::hex(0x102030), &NoImages);
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="320" height="180""#));
    assert!(svg.contains(r##"fill="#102030""##));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn text_is_escaped_and_anchored() {
    let n = Node::text(Point::new(10.0, 20.0), "a<b", 12.0, Rgba8::hex(0xffffff))
        .centered()
        .bold()
        .build();
    let svg = to_svg(&n, CANVAS, Rgba8::hex(0), &NoImages);
    assert!(svg.contains(">a&lt;b</text>"));
    assert!(svg.contains(r#"text-anchor="middle""#));
    assert!(svg.contains(r#"font-weight="700""#));
}

#[test]
fn translucent_group_emits_opacity_and_matrix() {
    let n = Node::layer(
        Transform2D::translate(5.0, 7.5),
        0.25,
        vec![Node::rect(Rect::new(0.0, 0.0, 10.0, 10.0), 2.0, Rgba8::hex(0xff0000))],
    );
    let svg = to_svg(&n, CANVAS, Rgba8::hex(0), &NoImages);
    assert!(svg.contains(r#"transform="matrix(1 0 0 1 5 7.5)""#));
    assert!(svg.contains(r#"opacity="0.25""#));
}

#[test]
fn invisible_groups_are_skipped() {
    let n = Node::layer(
        Transform2D::default(),
        0.0,
        vec![Node::rect(Rect::new(0.0, 0.0, 10.0, 10.0), 0.0, Rgba8::hex(0xff0000))],
    );
    let svg = to_svg(&n, CANVAS, Rgba8::hex(0), &NoImages);
    assert!(!svg.contains("ff0000"));
}

#[test]
fn missing_image_paints_fallback_and_known_image_is_embedded() {
    let fallback = Rgba8::hex(0x445566);
    let n = Node::group(vec![
        Node::image(
            Rect::new(0.0, 0.0, 40.0, 40.0),
            ImageSource::Local("avatar.png".into()),
            true,
            fallback,
        ),
        Node::image(
            Rect::new(50.0, 0.0, 90.0, 40.0),
            ImageSource::Remote("https://x/y.png".into()),
            true,
            fallback,
        ),
    ]);
    let svg = to_svg(&n, CANVAS, Rgba8::hex(0), &OneImage);
    assert!(svg.contains(r#"href="data:image/png;base64,AAAA""#));
    assert!(svg.contains(r##"rx="20" fill="#445566""##));
    assert_eq!(svg.matches("<clipPath").count(), 1);
}

#[test]
fn icons_scale_from_the_grid() {
    let n = Node::icon(Icon::CheckCircle, Point::new(50.0, 50.0), 48.0, Rgba8::hex(0x00ff00));
    let svg = to_svg(&n, CANVAS, Rgba8::hex(0), &NoImages);
    assert!(svg.contains(r#"transform="matrix(2 0 0 2 26 26)""#));
    assert!(svg.contains(r#"<path d="m9 12 2 2 4-4"/>"#));
}

#[test]
fn image_source_parse_splits_remote_and_local() {
    assert_eq!(
        ImageSource::parse("https://a/b.png"),
        ImageSource::Remote("https://a/b.png".into())
    );
    assert_eq!(
        ImageSource::parse("bg/tech.png"),
        ImageSource::Local("bg/tech.png".into())
    );
}
