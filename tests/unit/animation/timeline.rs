use super::*;

fn fade(target: u32, duration: f64) -> SubAnimation {
    let tween = Tween::new(NodeId(target), StyleProp::Opacity, 0.0, 1.0, duration)
        .with_ease(Ease::Linear);
    SubAnimation::new(format!("n{target}"), Effect::FadeIn, tween).with_initial(vec![
        StyleAssignment::new(NodeId(target), StyleProp::Opacity, StyleValue::Number(0.0)),
    ])
}

fn starts(tl: &Timeline) -> Vec<f64> {
    tl.children().iter().map(|c| c.start).collect()
}

#[test]
fn position_text_round_trips() {
    for (text, pos) in [
        ("", Position::Append),
        ("2.5", Position::At(2.5)),
        ("-=0.8", Position::FromEnd(-0.8)),
        ("+=0.3", Position::FromEnd(0.3)),
        ("<-=0.8", Position::FromPreviousStart(-0.8)),
        ("<+=0.3", Position::FromPreviousStart(0.3)),
    ] {
        assert_eq!(text.parse::<Position>().unwrap(), pos, "{text}");
        assert_eq!(pos.to_string(), text);
    }
    assert_eq!(" < ".parse::<Position>().unwrap(), Position::FromPreviousStart(0.0));
    assert_eq!("+= 1".parse::<Position>().unwrap(), Position::FromEnd(1.0));
}

#[test]
fn position_rejects_garbage() {
    for text in ["abc", "*=2", "<3", "+=", "-=inf", "<+=x"] {
        assert!(text.parse::<Position>().is_err(), "{text}");
    }
}

#[test]
fn offset_anchor_picks_expression_kind() {
    assert_eq!(
        OffsetAnchor::PreviousStart.position(-0.8),
        Position::FromPreviousStart(-0.8)
    );
    assert_eq!(OffsetAnchor::TimelineEnd.position(0.3), Position::FromEnd(0.3));
    assert_eq!(OffsetAnchor::default(), OffsetAnchor::PreviousStart);
    assert_eq!(
        "timeline-end".parse::<OffsetAnchor>().unwrap(),
        OffsetAnchor::TimelineEnd
    );
    assert!("middle".parse::<OffsetAnchor>().is_err());
}

#[test]
fn new_timeline_is_paused_and_empty() {
    let tl = Timeline::new(1.5);
    assert_eq!(tl.state(), PlayState::Paused);
    assert!(tl.is_empty());
    assert_eq!(tl.duration(), 0.0);
    assert_eq!(tl.total_duration(), 1.5);
    assert_eq!(Timeline::new(-3.0).delay(), 0.0);
}

#[test]
fn add_resolves_positions() {
    let mut tl = Timeline::new(0.0);
    assert_eq!(tl.add(fade(1, 1.0), Position::At(0.0)).unwrap(), 0.0);
    assert_eq!(tl.add(fade(2, 1.0), Position::Append).unwrap(), 1.0);
    assert_eq!(tl.add(fade(3, 1.0), Position::FromEnd(-0.5)).unwrap(), 1.5);
    assert_eq!(
        tl.add(fade(4, 1.0), Position::FromPreviousStart(0.25)).unwrap(),
        1.75
    );
    assert_eq!(tl.duration(), 2.75);
    assert_eq!(tl.children()[3].position, Position::FromPreviousStart(0.25));
}

#[test]
fn negative_start_shifts_existing_children() {
    let mut tl = Timeline::new(0.0);
    tl.add(fade(1, 0.5), Position::At(0.0)).unwrap();
    tl.add(fade(2, 0.5), Position::FromPreviousStart(-0.8))
        .unwrap();
    tl.add(fade(3, 0.5), Position::FromPreviousStart(0.3)).unwrap();

    let s = starts(&tl);
    assert!((s[0] - 0.8).abs() < 1e-12);
    assert_eq!(s[1], 0.0);
    assert!((s[2] - 0.3).abs() < 1e-12);
}

#[test]
fn playing_timeline_rejects_new_children() {
    let mut tl = Timeline::new(0.0);
    tl.add(fade(1, 1.0), Position::Append).unwrap();
    tl.play();
    assert_eq!(tl.state(), PlayState::Playing);
    let err = tl.add(fade(2, 1.0), Position::Append).unwrap_err();
    assert!(err.to_string().contains("playing timeline"));
    assert_eq!(tl.len(), 1);

    tl.pause();
    assert!(tl.add(fade(2, 1.0), Position::Append).is_ok());
}

#[test]
fn add_rejects_invalid_tweens() {
    let mut tl = Timeline::new(0.0);
    let mut bad = fade(1, 1.0);
    bad.tween.duration = f64::NAN;
    assert!(tl.add(bad, Position::Append).is_err());
    assert!(tl.is_empty());
}

#[test]
fn sample_reports_initial_then_tweened_values() {
    let mut tl = Timeline::new(1.0);
    tl.add(fade(1, 2.0), Position::At(0.0)).unwrap();
    tl.add(fade(2, 2.0), Position::At(1.0)).unwrap();

    let before = tl.sample(0.5);
    assert_eq!(before.len(), 2);
    assert!(
        before
            .iter()
            .all(|a| a.value == StyleValue::Number(0.0))
    );

    // One second into the timeline: child 1 halfway, child 2 just starting.
    let mid = tl.sample(2.0);
    assert_eq!(
        mid,
        vec![
            StyleAssignment::new(NodeId(1), StyleProp::Opacity, StyleValue::Number(0.5)),
            StyleAssignment::new(NodeId(2), StyleProp::Opacity, StyleValue::Number(0.0)),
        ]
    );

    let after = tl.sample(10.0);
    assert!(after.iter().all(|a| a.value == StyleValue::Number(1.0)));
}

#[test]
fn zero_duration_tween_jumps_to_target() {
    let t = Tween::new(NodeId(0), StyleProp::StrokeDashoffset, 40.0, 0.0, 0.0);
    assert_eq!(t.value_at(-0.1), 40.0);
    assert_eq!(t.value_at(0.0), 0.0);
}

#[test]
fn completion_requires_playing_state() {
    let mut tl = Timeline::new(0.5);
    tl.add(fade(1, 1.0), Position::Append).unwrap();
    assert!(!tl.is_complete_at(5.0));
    tl.play();
    assert!(!tl.is_complete_at(1.0));
    assert!(tl.is_complete_at(1.5));
}

#[test]
fn style_values_format_as_css() {
    assert_eq!(StyleValue::Number(0.5).to_string(), "0.5");
    assert_eq!(StyleValue::Dash([12.0, 12.0]).to_string(), "12 12");
    assert_eq!(StyleProp::StrokeDashoffset.css_name(), "stroke-dashoffset");
}
