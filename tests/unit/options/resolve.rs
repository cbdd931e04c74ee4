use super::*;
use crate::options::model::Effect;

#[test]
fn empty_chain_yields_library_defaults() {
    assert_eq!(resolve(&[]), OptionSet::LIBRARY_DEFAULTS);
}

#[test]
fn later_layers_win_field_by_field() {
    let call_site = PartialOptions::new().with_speed(1.0).with_offset(-0.2);
    let group = PartialOptions::new().with_speed(2.0).with_effect(Effect::FadeIn);
    let element = PartialOptions::new().with_speed(3.0);

    let out = resolve(&[call_site, group, element]);
    assert_eq!(out.speed, 3.0);
    assert_eq!(out.offset, -0.2);
    assert_eq!(out.effect, Effect::FadeIn);
    assert_eq!(out.delay, 0.0);
}

#[test]
fn each_layer_overrides_every_lower_one_independently() {
    // Default < call-site < group < element, checked per field.
    let call_site = PartialOptions {
        speed: Some(1.0),
        delay: Some(1.0),
        offset: Some(1.0),
        to_complete: Some(1.0),
        effect: Some(Effect::FadeIn),
    };
    let group = PartialOptions {
        speed: Some(2.0),
        delay: Some(2.0),
        offset: Some(2.0),
        to_complete: Some(2.0),
        effect: Some(Effect::Draw),
    };
    let element = PartialOptions {
        speed: Some(3.0),
        delay: Some(3.0),
        offset: Some(3.0),
        to_complete: Some(3.0),
        effect: Some(Effect::FadeIn),
    };

    assert_eq!(resolve(&[call_site]).speed, 1.0);
    assert_eq!(resolve(&[call_site, group]).delay, 2.0);
    assert_eq!(resolve(&[call_site, group]).effect, Effect::Draw);
    let all = resolve(&[call_site, group, element]);
    assert_eq!(
        (all.speed, all.delay, all.offset, all.to_complete, all.effect),
        (3.0, 3.0, 3.0, Some(3.0), Effect::FadeIn)
    );
}

#[test]
fn resolve_over_does_not_touch_base() {
    let base = OptionSet {
        speed: 9.0,
        ..OptionSet::default()
    };
    let out = resolve_over(&base, &[PartialOptions::new().with_speed(1.0)]);
    assert_eq!(out.speed, 1.0);
    assert_eq!(base.speed, 9.0);
    assert_eq!(resolve(&[]).speed, 0.5);
}

#[test]
fn to_complete_spreads_speed_over_shapes() {
    let opts = resolve(&[PartialOptions::new().with_to_complete(10.0)]);
    assert_eq!(apply_to_complete(opts, 5).speed, 2.0);
}

#[test]
fn to_complete_with_no_shapes_is_a_no_op() {
    let opts = resolve(&[PartialOptions::new().with_to_complete(10.0)]);
    assert_eq!(apply_to_complete(opts, 0), opts);
    let plain = resolve(&[]);
    assert_eq!(apply_to_complete(plain, 4), plain);
}
