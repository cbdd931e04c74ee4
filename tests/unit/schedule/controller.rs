use super::*;
use crate::{
    animation::timeline::{PlayState, StyleValue},
    markup::document::Document,
    options::model::Effect,
};

const DRAWING: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" id="root" data-speed="3" data-delay="0.5">
  <g id="five">
    <line x1="0" y1="0" x2="10" y2="0"/>
    <line x1="0" y1="0" x2="10" y2="0"/>
    <line x1="0" y1="0" x2="10" y2="0"/>
    <line x1="0" y1="0" x2="10" y2="0"/>
    <line x1="0" y1="0" x2="10" y2="0"/>
    <line class="exclude" x1="0" y1="0" x2="10" y2="0"/>
  </g>
  <g id="tuned" data-offset="0.1" data-effect="fadeIn">
    <rect width="1" height="1"/>
    <rect width="1" height="1"/>
  </g>
</svg>"#;

fn doc() -> Document {
    Document::parse(DRAWING).unwrap()
}

#[test]
fn to_complete_spreads_over_selected_shapes() {
    let doc = doc();
    let mut ctl = SvgController::default();
    let seq = ctl
        .init_svg(&doc, "five", PartialOptions::new().with_to_complete(10.0))
        .unwrap();

    assert_eq!(seq.shape_count, 5);
    assert_eq!(seq.options.speed, 2.0);
    assert_eq!(seq.timeline.len(), 5);
    assert!(seq.timeline.children().iter().all(|c| c.tween.duration == 2.0));
}

#[test]
fn layering_runs_svg_then_call_site_then_container() {
    let doc = doc();
    let mut ctl = SvgController::default();

    // Owning <svg> sets speed 3 and delay 0.5 under the call-site arguments.
    let seq = ctl.init_svg(&doc, "five", PartialOptions::new()).unwrap();
    assert_eq!(seq.options.speed, 3.0);
    assert_eq!(seq.options.delay, 0.5);
    assert_eq!(seq.timeline.delay(), 0.5);

    let seq = ctl
        .init_svg(&doc, "five", PartialOptions::new().with_speed(1.0))
        .unwrap();
    assert_eq!(seq.options.speed, 1.0);

    // Container inline attributes beat the call site.
    let seq = ctl
        .init_svg(
            &doc,
            "tuned",
            PartialOptions::new()
                .with_offset(-0.4)
                .with_effect(Effect::Draw),
        )
        .unwrap();
    assert_eq!(seq.options.offset, 0.1);
    assert_eq!(seq.options.effect, Effect::FadeIn);
    assert!(
        seq.timeline
            .children()
            .iter()
            .all(|c| c.effect == Effect::FadeIn)
    );
}

#[test]
fn container_reveal_fires_once_per_container() {
    let doc = doc();
    let mut ctl = SvgController::default();
    let root = doc.find_by_id("root").unwrap();

    let first = ctl.init_svg(&doc, "five", PartialOptions::new()).unwrap();
    let reveal = first.reveal.expect("first call reveals the svg");
    assert_eq!(reveal.target, root);
    assert_eq!((reveal.from, reveal.to, reveal.duration), (0.0, 1.0, 2.0));
    assert!(ctl.is_revealed("five"));

    let second = ctl.init_svg(&doc, "five", PartialOptions::new()).unwrap();
    assert!(second.reveal.is_none());
    assert_eq!(second.timeline.len(), 5);

    let other = ctl.init_svg(&doc, "tuned", PartialOptions::new()).unwrap();
    assert!(other.reveal.is_some());
}

#[test]
fn missing_container_builds_an_empty_playing_timeline() {
    let doc = doc();
    let mut ctl = SvgController::default();
    let seq = ctl
        .init_svg(&doc, "nope", PartialOptions::new().with_to_complete(4.0))
        .unwrap();

    assert_eq!(seq.container, None);
    assert_eq!(seq.shape_count, 0);
    assert!(seq.reveal.is_none());
    assert!(seq.timeline.is_empty());
    assert_eq!(seq.timeline.state(), PlayState::Playing);
    assert_eq!(ctl.state("nope"), ContainerState::Playing);
    assert!(seq.sample(1.0).is_empty());
}

#[test]
fn invalid_call_site_arguments_fail_before_any_state_change() {
    let doc = doc();
    let mut ctl = SvgController::default();
    let err = ctl
        .init_svg(&doc, "five", PartialOptions::new().with_speed(-1.0))
        .unwrap_err();
    assert!(err.to_string().contains("validation error:"));
    assert_eq!(ctl.state("five"), ContainerState::Uninitialized);
    assert!(!ctl.is_revealed("five"));
}

#[test]
fn lifecycle_reaches_complete_only_from_playing() {
    let doc = doc();
    let mut ctl = SvgController::default();
    assert!(ctl.mark_complete("five").is_err());

    ctl.init_svg(&doc, "five", PartialOptions::new()).unwrap();
    assert_eq!(ctl.state("five"), ContainerState::Playing);
    ctl.mark_complete("five").unwrap();
    assert_eq!(ctl.state("five"), ContainerState::Complete);
    assert!(ctl.mark_complete("five").is_err());
}

#[test]
fn apply_at_writes_reveal_and_shape_styles() {
    let mut doc = doc();
    let mut ctl = SvgController::default();
    let seq = ctl
        .init_svg(&doc, "five", PartialOptions::new().with_delay(1.0))
        .unwrap();
    let root = doc.find_by_id("root").unwrap();

    let at_zero = seq.sample(0.0);
    assert_eq!(at_zero[0].target, root);
    assert_eq!(at_zero[0].value, StyleValue::Number(0.0));

    seq.apply_at(&mut doc, 0.0);
    assert_eq!(doc.inline_style(root, "opacity").as_deref(), Some("0"));
    let first_line = seq.timeline.children()[0].tween.target;
    assert_eq!(
        doc.inline_style(first_line, "stroke-dasharray").as_deref(),
        Some("10 10")
    );
    assert_eq!(
        doc.inline_style(first_line, "stroke-dashoffset").as_deref(),
        Some("10")
    );

    seq.apply_at(&mut doc, seq.duration() + 1.0);
    assert_eq!(doc.inline_style(root, "opacity").as_deref(), Some("1"));
    assert_eq!(
        doc.inline_style(first_line, "stroke-dashoffset").as_deref(),
        Some("0")
    );
}
