use super::*;

const SAMPLE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="10" height="10">
  <g id="art" class="layer main">
    <line x1="0" y1="0" x2="3" y2="4"/>
    <use xlink:href="#art"/>
    <text>a &amp; b</text>
  </g>
</svg>"##;

#[test]
fn parse_keeps_document_order_and_structure() {
    let doc = Document::parse(SAMPLE).unwrap();
    let root = doc.root();
    assert_eq!(doc.tag(root), Some("svg"));

    let tags: Vec<&str> = doc
        .descendants(root)
        .filter_map(|n| doc.tag(n))
        .collect();
    assert_eq!(tags, vec!["g", "line", "use", "text"]);

    let art = doc.find_by_id("art").unwrap();
    assert_eq!(doc.parent(art), Some(root));
    assert!(doc.has_class(art, "main"));
    assert!(!doc.has_class(art, "mai"));
}

#[test]
fn parse_rejects_malformed_xml() {
    let err = Document::parse("<svg><g></svg>").unwrap_err();
    assert!(err.to_string().contains("markup error:"));
}

#[test]
fn ancestors_are_nearest_first() {
    let doc = Document::parse(SAMPLE).unwrap();
    let line = doc
        .descendants(doc.root())
        .find(|&n| doc.tag(n) == Some("line"))
        .unwrap();
    let chain: Vec<NodeId> = doc.ancestors(line).collect();
    assert_eq!(chain, vec![doc.find_by_id("art").unwrap(), doc.root()]);
}

#[test]
fn inline_style_updates_preserve_other_declarations() {
    let mut doc =
        Document::parse(r#"<svg><rect id="r" style="fill: red; opacity: 0.5"/></svg>"#).unwrap();
    let r = doc.find_by_id("r").unwrap();

    doc.set_inline_style(r, "opacity", "1");
    doc.set_inline_style(r, "stroke-dashoffset", "20");

    assert_eq!(doc.inline_style(r, "fill").as_deref(), Some("red"));
    assert_eq!(doc.inline_style(r, "opacity").as_deref(), Some("1"));
    assert_eq!(
        doc.attr(r, "style"),
        Some("fill: red; opacity: 1; stroke-dashoffset: 20")
    );
}

#[test]
fn serialization_round_trips_namespaces_and_escapes() {
    let doc = Document::parse(SAMPLE).unwrap();
    let text = doc.to_svg_string();

    assert!(text.starts_with("<svg "));
    assert!(text.contains("xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(text.contains("xmlns:xlink=\"http://www.w3.org/1999/xlink\""));
    assert!(text.contains("<use xlink:href=\"#art\"/>"));
    assert!(text.contains("a &amp; b"));

    let again = Document::parse(&text).unwrap();
    assert_eq!(again.len(), doc.len());
    assert_eq!(again.to_svg_string(), text);
}

#[test]
fn inline_style_skips_malformed_declarations() {
    let doc = Document::parse(
        r#"<svg><rect id="r" style=": x; stray;; fill : url(a:b) ;opacity:0"/></svg>"#,
    )
    .unwrap();
    let r = doc.find_by_id("r").unwrap();
    assert_eq!(doc.inline_style(r, "fill").as_deref(), Some("url(a:b)"));
    assert_eq!(doc.inline_style(r, "opacity").as_deref(), Some("0"));
    assert_eq!(doc.inline_style(r, "stray"), None);
    assert_eq!(doc.inline_style(r, ""), None);
}
