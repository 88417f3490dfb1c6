use super::*;

fn empty_rasterizer() -> SvgRasterizer {
    SvgRasterizer::with_fontdb(Arc::new(usvg::fontdb::Database::new()))
}

#[test]
fn fills_background_in_premultiplied_rgba() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="2" viewBox="0 0 4 2"><rect width="4" height="2" fill="rgb(255,0,0)"/></svg>"#;
    let frame = empty_rasterizer().rasterize(svg, 4, 2).unwrap();
    assert_eq!((frame.width, frame.height), (4, 2));
    assert!(frame.premultiplied);
    assert_eq!(frame.data.len(), 4 * 2 * 4);
    assert_eq!(&frame.data[..4], &[255, 0, 0, 255]);
}

#[test]
fn scales_document_to_target_size() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="2" height="2" viewBox="0 0 2 2"><rect width="1" height="2" fill="rgb(0,0,255)"/></svg>"#;
    let frame = empty_rasterizer().rasterize(svg, 8, 8).unwrap();
    let px = |x: usize, y: usize| &frame.data[(y * 8 + x) * 4..(y * 8 + x) * 4 + 4];
    assert_eq!(px(1, 4), &[0, 0, 255, 255]);
    assert_eq!(px(6, 4)[3], 0);
}

#[test]
fn rejects_malformed_svg() {
    assert!(empty_rasterizer().rasterize("<svg", 2, 2).is_err());
}

#[test]
fn missing_font_dirs_are_ignored() {
    let mut db = usvg::fontdb::Database::new();
    load_fonts_from_dir(&mut db, Path::new("/definitely/not/here"));
    assert_eq!(db.len(), 0);
}
