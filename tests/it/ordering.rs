use std::{
    cmp::Ordering,
    collections::HashSet,
    hash::{DefaultHasher, Hash, Hasher},
};

use itertools::Itertools;
use simple_test_case::test_case;

use parver::*;

/// Versions in ascending order.
const VERSIONS: &[&str] = &[
    // Implicit epoch of 0
    "1.0.dev456",
    "1.0a1",
    "1.0a2.dev456",
    "1.0a12.dev456",
    "1.0a12",
    "1.0b1.dev456",
    "1.0b2",
    "1.0b2.post345.dev456",
    "1.0b2.post345",
    "1.0b2-346",
    "1.0c1.dev456",
    "1.0c1",
    "1.0rc2",
    "1.0c3",
    "1.0",
    "1.0.post456.dev34",
    "1.0.post456",
    "1.1.dev1",
    "1.2+123abc",
    "1.2+123abc456",
    "1.2+abc",
    "1.2+abc123",
    "1.2+abc123def",
    "1.2+1234.abc",
    "1.2+123456",
    "1.2.r32+123456",
    "1.2.rev33+123456",
    // Explicit epoch of 1
    "1!1.0.dev456",
    "1!1.0a1",
    "1!1.0a2.dev456",
    "1!1.0a12.dev456",
    "1!1.0a12",
    "1!1.0b1.dev456",
    "1!1.0b2",
    "1!1.0b2.post345.dev456",
    "1!1.0b2.post345",
    "1!1.0b2-346",
    "1!1.0c1.dev456",
    "1!1.0c1",
    "1!1.0rc2",
    "1!1.0c3",
    "1!1.0",
    "1!1.0.post456.dev34",
    "1!1.0.post456",
    "1!1.1.dev1",
    "1!1.2+123abc",
    "1!1.2+123abc456",
    "1!1.2+abc",
    "1!1.2+abc123",
    "1!1.2+abc123def",
    "1!1.2+1234.abc",
    "1!1.2+123456",
    "1!1.2.r32+123456",
    "1!1.2.rev33+123456",
];

fn parsed() -> Vec<Version> {
    VERSIONS
        .iter()
        .map(|input| Version::parse(input).expect("must parse"))
        .collect()
}

fn hash_of(version: &Version) -> u64 {
    let mut hasher = DefaultHasher::new();
    version.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn fixture_roundtrips() {
    for (input, version) in VERSIONS.iter().zip(parsed()) {
        pretty_assertions::assert_eq!(*input, version.to_string());
    }
}

#[test]
fn fixture_is_ordered() {
    let versions = parsed();
    for ((i, left), (j, right)) in versions.iter().enumerate().tuple_combinations() {
        assert!(left < right, "{left} < {right}");
        assert!(left <= right, "{left} <= {right}");
        assert!(right > left, "{right} > {left}");
        assert!(right >= left, "{right} >= {left}");
        assert_ne!(left, right, "{left} != {right}");
        pretty_assertions::assert_eq!(i.cmp(&j), left.cmp(right), "{left} cmp {right}");
    }
}

#[test]
fn fixture_is_reflexive() {
    for version in parsed() {
        pretty_assertions::assert_eq!(version, version.clone());
        pretty_assertions::assert_eq!(version.cmp(&version), Ordering::Equal);
        pretty_assertions::assert_eq!(hash_of(&version), hash_of(&version));
    }
}

#[test]
fn sorting_restores_fixture() {
    let mut shuffled = parsed();
    shuffled.reverse();
    shuffled.rotate_left(17);
    shuffled.sort();

    let sorted = shuffled.iter().map(Version::to_string).collect_vec();
    pretty_assertions::assert_eq!(VERSIONS, sorted.as_slice());
}

#[test_case("1.0rc1", "1.0c1"; "rc_c")]
#[test_case("1.0a1", "1.0alpha1"; "a_alpha")]
#[test_case("1.0b", "1.0beta0"; "b_beta_implicit")]
#[test_case("1.0pre2", "1.0preview2"; "pre_preview")]
#[test_case("1.0", "1.0.0.0"; "trailing_zeros")]
#[test_case("1.0", "0!1.0"; "implicit_epoch")]
#[test_case("1.0", "v1.0"; "v")]
#[test_case("1.0.post", "1.0-0"; "post_forms")]
#[test_case("1.0.post1", "1.0_r-1"; "post_rev_forms")]
#[test_case("1.0dev", "1.0.dev0"; "dev_forms")]
#[test_case("1.0+ABC.1", "1.0+abc-01"; "local_case_separator_zeros")]
#[test]
fn equivalent(left: &str, right: &str) {
    let left = Version::parse(left).expect("must parse");
    let right = Version::parse(right).expect("must parse");
    pretty_assertions::assert_eq!(left, right);
    pretty_assertions::assert_eq!(hash_of(&left), hash_of(&right));
}

#[test_case("1.0.dev456", "1.0a1"; "dev_before_pre")]
#[test_case("1.0a1", "1.0a1.post5"; "pre_before_pre_post")]
#[test_case("1.0a1.post5", "1.0"; "pre_post_before_final")]
#[test_case("1.0", "1.0.post456"; "final_before_post")]
#[test_case("1.0.post456", "1.1.dev1"; "post_before_next_dev")]
#[test_case("1.0+abc", "1.0+abc123"; "local_prefix")]
#[test_case("1.0+abc", "1.0+1"; "local_text_before_number")]
#[test_case("1.0+2", "1.0+10"; "local_numeric")]
#[test_case("1.0+1.a", "1.0+1.1"; "local_second_token")]
#[test_case("1.0+99999999999999999999999", "1.0+100000000000000000000000"; "local_wide_numbers")]
#[test_case("1.0", "1.0+0"; "no_local_before_local")]
#[test_case("1.0a1", "1.0b0"; "a_before_b")]
#[test_case("1.0pre1", "1.0.post0.dev0"; "rc_before_post_dev")]
#[test_case("99.0", "1!0.1"; "epoch_wins")]
#[test]
fn less_than(left: &str, right: &str) {
    let left = Version::parse(left).expect("must parse");
    let right = Version::parse(right).expect("must parse");
    assert!(left < right, "{left} < {right}");
    assert!(right > left, "{right} > {left}");
    assert_ne!(left, right);
}

#[test]
fn hash_set_dedupes_equivalent() {
    let versions = ["1.0", "1.0.0", "v1.0", "1.0rc1", "1.0c1", "1.0-RC-1"]
        .into_iter()
        .map(|input| Version::parse(input).expect("must parse"))
        .collect::<HashSet<_>>();
    pretty_assertions::assert_eq!(versions.len(), 2);
}
