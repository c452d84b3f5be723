use assert_matches::assert_matches;
use simple_test_case::test_case;

use parver::*;

fn parse(input: &str) -> Version {
    Version::parse(input).expect("must parse")
}

#[test_case("1.4", 0, "2.0"; "major")]
#[test_case("1.4", 1, "1.5"; "minor")]
#[test_case("1.4", 2, "1.4.1"; "past_end")]
#[test_case("1.4", 3, "1.4.0.1"; "gap")]
#[test_case("1", 2, "1.0.1"; "single")]
#[test_case("1.2.3.4", 1, "1.3.0.0"; "zeroes_after")]
#[test_case("v1!1.4rc1+abc", 0, "v1!2.0rc1+abc"; "keeps_other_segments")]
#[test]
fn bump_release(input: &str, index: usize, expected: &str) {
    let bumped = parse(input).bump_release(index).expect("must bump");
    pretty_assertions::assert_eq!(expected, bumped.to_string());
}

#[test]
fn bump_release_overflow() {
    let version = parse("18446744073709551615.1");
    assert_matches!(
        version.bump_release(0),
        Err(ValidationError::Overflow { field: "release" })
    );
    pretty_assertions::assert_eq!("18446744073709551615.2", version.bump_release(1).expect("must bump").to_string());
}

#[test_case("1.4.2", 1, 7, "1.7.0"; "middle")]
#[test_case("1.4.2", 0, 0, "0.0.0"; "to_zero")]
#[test_case("1", 2, 5, "1.0.5"; "past_end")]
#[test]
fn bump_release_to(input: &str, index: usize, value: u64, expected: &str) {
    pretty_assertions::assert_eq!(expected, parse(input).bump_release_to(index, value).expect("must bump").to_string());
}

#[test_case("1.4.2", 1, 7, "1.7.2"; "middle")]
#[test_case("1.4.2", 2, 0, "1.4.0"; "last")]
#[test_case("1", 2, 5, "1.0.5"; "past_end")]
#[test]
fn set_release(input: &str, index: usize, value: u64, expected: &str) {
    pretty_assertions::assert_eq!(expected, parse(input).set_release(index, value).expect("must set").to_string());
}

#[test_case(usize::MAX; "max")]
#[test_case(usize::MAX / 2; "unallocatable")]
#[test]
fn release_index_too_large(index: usize) {
    let version = parse("1");
    assert_matches!(
        version.set_release(index, 1),
        Err(ValidationError::Overflow { field: "release" })
    );
    assert_matches!(
        version.bump_release_to(index, 1),
        Err(ValidationError::Overflow { field: "release" })
    );
    assert_matches!(
        version.bump_release(index),
        Err(ValidationError::Overflow { field: "release" })
    );
}

#[test_case("1.4", Some(PreTag::A), "1.4a0"; "new_a")]
#[test_case("1.4", Some(PreTag::Rc), "1.4rc0"; "new_rc")]
#[test_case("1.4b1", None, "1.4b2"; "existing")]
#[test_case("1.4b1", Some(PreTag::B), "1.4b2"; "existing_same_tag")]
#[test_case("1.4a", None, "1.4a1"; "implicit")]
#[test_case("1.4-alpha.3", None, "1.4-alpha.4"; "keeps_spelling")]
#[test_case("1.4.post1.dev2", Some(PreTag::B), "1.4b0.post1.dev2"; "keeps_post_dev")]
#[test]
fn bump_pre(input: &str, tag: Option<PreTag>, expected: &str) {
    let bumped = parse(input).bump_pre(tag).expect("must bump");
    pretty_assertions::assert_eq!(expected, bumped.to_string());
}

#[test]
fn bump_pre_requires_tag() {
    assert_matches!(parse("1.4").bump_pre(None), Err(ValidationError::BumpPreWithoutTag));
}

#[test_case("1.4a1", PreTag::B; "different_tag")]
#[test_case("1.4alpha1", PreTag::A; "different_spelling")]
#[test]
fn bump_pre_tag_mismatch(input: &str, requested: PreTag) {
    let current = parse(input).pre_tag().expect("has pre-release");
    pretty_assertions::assert_eq!(
        parse(input).bump_pre(Some(requested)).expect_err("must not bump"),
        ValidationError::PreTagMismatch { current, requested }
    );
}

#[test_case("1.4", None, "1.4.post0"; "new")]
#[test_case("1.4.post0", None, "1.4.post1"; "existing")]
#[test_case("1.4.post", None, "1.4.post1"; "implicit")]
#[test_case("1.4.post0", Some(PostTag::Dash), "1.4-1"; "to_dash")]
#[test_case("1.4_post-1", Some(PostTag::Rev), "1.4_rev-2"; "keeps_separators")]
#[test_case("1.4-1", None, "1.4-2"; "dash_kept")]
#[test_case("1.4-1", Some(PostTag::Post), "1.4.post2"; "from_dash")]
#[test_case("1.4", Some(PostTag::R), "1.4.r0"; "new_r")]
#[test_case("1.4rc1", Some(PostTag::Dash), "1.4rc1-0"; "dash_after_explicit_pre")]
#[test]
fn bump_post(input: &str, tag: Option<PostTag>, expected: &str) {
    let bumped = parse(input).bump_post(tag).expect("must bump");
    pretty_assertions::assert_eq!(expected, bumped.to_string());
}

#[test]
fn bump_post_dash_after_implicit_pre() {
    assert_matches!(
        parse("1.4rc").bump_post(Some(PostTag::Dash)),
        Err(ValidationError::AmbiguousImplicitPost)
    );
}

#[test_case("1.4", "1.4.dev0"; "new")]
#[test_case("1.4_dev1", "1.4_dev2"; "keeps_separator")]
#[test_case("1.4.dev", "1.4.dev1"; "implicit")]
#[test_case("1.4a1.post2", "1.4a1.post2.dev0"; "after_post")]
#[test]
fn bump_dev(input: &str, expected: &str) {
    pretty_assertions::assert_eq!(expected, parse(input).bump_dev().expect("must bump").to_string());
}

#[test_case("1.0", "1!1.0"; "implicit")]
#[test_case("0!1.0", "1!1.0"; "explicit_zero")]
#[test_case("v3!1.0", "v4!1.0"; "explicit")]
#[test]
fn bump_epoch(input: &str, expected: &str) {
    pretty_assertions::assert_eq!(expected, parse(input).bump_epoch().expect("must bump").to_string());
}

#[test]
fn bump_by() {
    let version = parse("1.4");
    pretty_assertions::assert_eq!("1.4a2", version.bump_pre_by(Some(PreTag::A), 3).expect("must bump").to_string());
    pretty_assertions::assert_eq!("1.4.post4", version.bump_post_by(None, 5).expect("must bump").to_string());
    pretty_assertions::assert_eq!("1.4.dev9", version.bump_dev_by(10).expect("must bump").to_string());
    pretty_assertions::assert_eq!("2!1.4", version.bump_epoch_by(2).expect("must bump").to_string());

    let version = parse("2!1.4b3.post3.dev3");
    pretty_assertions::assert_eq!("2!1.4b1.post3.dev3", version.bump_pre_by(None, -2).expect("must bump").to_string());
    pretty_assertions::assert_eq!("2!1.4b3.post0.dev3", version.bump_post_by(None, -3).expect("must bump").to_string());
    pretty_assertions::assert_eq!("2!1.4b3.post3.dev2", version.bump_dev_by(-1).expect("must bump").to_string());
    pretty_assertions::assert_eq!("0!1.4b3.post3.dev3", version.bump_epoch_by(-2).expect("must bump").to_string());
}

#[test]
fn bump_by_negative() {
    let version = parse("1.4b0.post0");
    assert_matches!(
        version.bump_pre_by(None, -1),
        Err(ValidationError::Negative { field: "pre-release", value: -1 })
    );
    assert_matches!(
        version.bump_post_by(None, -2),
        Err(ValidationError::Negative { field: "post-release", value: -2 })
    );
    assert_matches!(
        version.bump_epoch_by(-1),
        Err(ValidationError::Negative { field: "epoch", value: -1 })
    );
    assert_matches!(
        version.bump_dev_by(0),
        Err(ValidationError::Negative { field: "dev-release", value: -1 })
    );
}

#[test_case("1.0.2.0", "1.0.2"; "trailing")]
#[test_case("1.0.0", "1"; "all_zeros")]
#[test_case("0.0", "0"; "keeps_one")]
#[test_case("1.2", "1.2"; "nothing_to_remove")]
#[test_case("v1!1.0rc1+abc", "v1!1rc1+abc"; "keeps_other_segments")]
#[test]
fn truncate(input: &str, expected: &str) {
    pretty_assertions::assert_eq!(expected, parse(input).truncate().to_string());
}

#[test_case("1.0.0.0", 2, "1.0"; "stops_at_min")]
#[test_case("1.2.3.0", 2, "1.2.3"; "trailing_only")]
#[test_case("1", 3, "1.0.0"; "pads")]
#[test]
fn truncate_to(input: &str, min_length: usize, expected: &str) {
    let truncated = parse(input).truncate_to(min_length).expect("must truncate");
    pretty_assertions::assert_eq!(expected, truncated.to_string());
}

#[test]
fn truncate_to_zero() {
    assert_matches!(parse("1.0").truncate_to(0), Err(ValidationError::MinLength));
}

#[test]
fn replace_sets_fields() {
    let version = parse("1.3");
    let replaced = version
        .replace(|parts| parts.post = Some(Number::Implicit))
        .expect("must replace");
    pretty_assertions::assert_eq!("1.3.post", replaced.to_string());

    let replaced = version
        .replace(|parts| {
            parts.epoch = Some(2);
            parts.pre_tag = Some(PreTag::Beta);
            parts.pre = Some(1);
            parts.local = Some(String::from("build.5"));
        })
        .expect("must replace");
    pretty_assertions::assert_eq!("2!1.3beta1+build.5", replaced.to_string());

    pretty_assertions::assert_eq!("1.3", version.to_string());
}

#[test_case("1.3.post0", "1.3"; "post")]
#[test_case("1.3_rev-1", "1.3"; "post_separators")]
#[test_case("1.3-1", "1.3"; "dash")]
#[test]
fn replace_removes_post(input: &str, expected: &str) {
    let replaced = parse(input)
        .replace(|parts| {
            parts.post = None;
            parts.post_tag = None;
        })
        .expect("must replace");
    pretty_assertions::assert_eq!(expected, replaced.to_string());
}

#[test]
fn replace_removes_pre_and_dev() {
    let replaced = parse("1.3-rc_1-dev_2")
        .replace(|parts| {
            parts.pre_tag = None;
            parts.pre = None;
            parts.dev = None;
        })
        .expect("must replace");
    pretty_assertions::assert_eq!("1.3", replaced.to_string());
}

#[test]
fn replace_validates() {
    assert_matches!(
        parse("1.3").replace(|parts| parts.release.clear()),
        Err(ValidationError::EmptyRelease)
    );
    assert_matches!(
        parse("1.3").replace(|parts| parts.local = Some(String::from("a..b"))),
        Err(ValidationError::InvalidLocal { .. })
    );
}

#[test]
fn replace_to_dash_drops_separators() {
    let replaced = parse("1.3_post-4")
        .replace(|parts| parts.post_tag = Some(PostTag::Dash))
        .expect("must replace");
    pretty_assertions::assert_eq!("1.3-4", replaced.to_string());
}

#[test_case("1.3a1.post2.dev3+abc", true, false, false, "1.3.post2.dev3+abc"; "pre")]
#[test_case("1.3a1.post2.dev3+abc", false, true, false, "1.3a1.dev3+abc"; "post")]
#[test_case("1.3a1.post2.dev3+abc", false, false, true, "1.3a1.post2+abc"; "dev")]
#[test_case("1.3a1.post2.dev3+abc", true, true, true, "1.3+abc"; "all")]
#[test_case("1.3rc-2", false, false, false, "1.3rc-2"; "nothing")]
#[test]
fn clear(input: &str, pre: bool, post: bool, dev: bool, expected: &str) {
    pretty_assertions::assert_eq!(expected, parse(input).clear(pre, post, dev).to_string());
}

#[test_case("2!1.3a1.post2.dev3+abc", "2!1.3"; "everything")]
#[test_case("v1.0rc1", "v1.0"; "keeps_v")]
#[test_case("1.0.0", "1.0.0"; "keeps_trailing_zeros")]
#[test_case("0!1", "0!1"; "keeps_explicit_epoch")]
#[test]
fn base_version(input: &str, expected: &str) {
    pretty_assertions::assert_eq!(expected, parse(input).base_version().to_string());
}
