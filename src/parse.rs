//! The version grammar.
//!
//! Two grammars share this module:
//! - [`Mode::Permissive`] accepts everything PEP 440 says a parser should
//!   normalize: alternate tag spellings, optional and alternate separators,
//!   implicit numbers, a leading `v`, and any letter case for keywords.
//! - [`Mode::Strict`] accepts only the canonical form.
//!
//! Both trim surrounding whitespace.
//! Neither normalizes anything: tag spellings and separators are reported as read
//! (keywords lowercased) so the version can be written back out exactly.

use derive_new::new;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while1},
    character::complete::{alphanumeric1, char, digit1},
    combinator::{cut, opt, recognize, value, verify},
    error::{ContextError, ErrorKind, FromExternalError, ParseError as NomParseError, context},
    multi::separated_list1,
    sequence::{pair, preceded, terminated},
};
use tracing::{debug, trace};

use crate::{ParseError, PostTag, PreTag, Segment, Separator};

/// Which grammar to parse with.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Mode {
    /// Accept any version PEP 440 can normalize.
    #[default]
    Permissive,

    /// Accept only the canonical PEP 440 form.
    Strict,
}

/// Characters trimmed from either end of the input.
fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

/// Parse `input` into its segments, in textual order.
///
/// The release segment is always present;
/// every other segment appears only if it was written.
#[tracing::instrument(level = "trace")]
pub fn parse_segments(input: &str, mode: Mode) -> Result<Vec<Segment>, ParseError> {
    let leading = input.len() - input.trim_start_matches(is_whitespace).len();
    let trimmed = input.trim_matches(is_whitespace);

    let result = match mode {
        Mode::Permissive => permissive::version(trimmed),
        Mode::Strict => strict::version(trimmed),
    };

    let (rest, segments, expected) = match result {
        Ok((_, parsed)) => parsed,
        Err(nom::Err::Error(err) | nom::Err::Failure(err)) => {
            let offset = leading + trimmed.len() - err.input.len();
            let err = ParseError::new(input, offset, err.expected);
            debug!(%err, "parse version");
            return Err(err);
        }
        Err(nom::Err::Incomplete(_)) => {
            let err = ParseError::new(input, input.len(), vec!["more input"]);
            debug!(%err, "parse version");
            return Err(err);
        }
    };

    if !rest.is_empty() {
        let offset = leading + trimmed.len() - rest.len();
        let err = ParseError::new(input, offset, expected);
        debug!(%err, "parse version");
        return Err(err);
    }

    trace!(?segments, "parsed version");
    Ok(segments)
}

/// Tracks the furthest point a parse reached, and what was expected there.
#[derive(Clone, PartialEq, Eq, Debug, new)]
pub(crate) struct GrammarError<'a> {
    /// The remaining input where the failure happened.
    input: &'a str,

    /// What the grammar would have accepted.
    expected: Vec<&'static str>,
}

impl<'a> NomParseError<&'a str> for GrammarError<'a> {
    fn from_error_kind(input: &'a str, _: ErrorKind) -> Self {
        Self::new(input, Vec::new())
    }

    fn append(_: &'a str, _: ErrorKind, other: Self) -> Self {
        other
    }

    fn or(self, other: Self) -> Self {
        // Less remaining input means the alternative got further.
        match self.input.len().cmp(&other.input.len()) {
            std::cmp::Ordering::Less => self,
            std::cmp::Ordering::Greater => other,
            std::cmp::Ordering::Equal => {
                let mut expected = self.expected;
                for item in other.expected {
                    if !expected.contains(&item) {
                        expected.push(item);
                    }
                }
                Self::new(self.input, expected)
            }
        }
    }
}

impl<'a> ContextError<&'a str> for GrammarError<'a> {
    fn add_context(input: &'a str, ctx: &'static str, other: Self) -> Self {
        // A failure right where the context began is best described by the context,
        // unless it is an overflow.
        if other.expected == [TOO_LARGE] {
            other
        } else if other.input.len() == input.len() || other.expected.is_empty() {
            Self::new(other.input, vec![ctx])
        } else {
            other
        }
    }
}

impl<'a, E> FromExternalError<&'a str, E> for GrammarError<'a> {
    fn from_external_error(input: &'a str, kind: ErrorKind, _: E) -> Self {
        Self::from_error_kind(input, kind)
    }
}

type Res<'a, T> = IResult<&'a str, T, GrammarError<'a>>;

/// A parsed version, the unparsed remainder, and what could have followed.
type Parsed<'a> = (&'a str, Vec<Segment>, Vec<&'static str>);

/// What may still follow after each part of a version.
const AFTER_RELEASE: &[&str] = &["pre-release", "post-release", "dev-release", "local version", "end of input"];
const AFTER_PRE: &[&str] = &["post-release", "dev-release", "local version", "end of input"];
const AFTER_POST: &[&str] = &["dev-release", "local version", "end of input"];
const AFTER_DEV: &[&str] = &["local version", "end of input"];
const AFTER_LOCAL: &[&str] = &["end of input"];

const TOO_LARGE: &str = "integer no larger than 18446744073709551615";

fn separator(input: &str) -> Res<'_, Separator> {
    alt((
        value(Separator::Dot, char('.')),
        value(Separator::Hyphen, char('-')),
        value(Separator::Underscore, char('_')),
    ))
    .parse(input)
}

/// Convert a digit run read from `input`.
/// A run that does not fit is reported where it starts, with no fallback to other alternatives.
fn integer<'a>(input: &'a str, rest: &'a str, digits: &str) -> Res<'a, u64> {
    match digits.parse::<u64>() {
        Ok(number) => Ok((rest, number)),
        Err(_) => Err(nom::Err::Failure(GrammarError::new(input, vec![TOO_LARGE]))),
    }
}

/// Assemble the parsed parts in textual order.
fn assemble<'a>(
    rest: &'a str,
    head: impl IntoIterator<Item = Segment>,
    pre: Option<Segment>,
    post: Option<Segment>,
    dev: Option<Segment>,
    local: Option<Segment>,
) -> Parsed<'a> {
    let expected = if local.is_some() {
        AFTER_LOCAL
    } else if dev.is_some() {
        AFTER_DEV
    } else if post.is_some() {
        AFTER_POST
    } else if pre.is_some() {
        AFTER_PRE
    } else {
        AFTER_RELEASE
    };

    let segments = head
        .into_iter()
        .chain(pre)
        .chain(post)
        .chain(dev)
        .chain(local)
        .collect();
    (rest, segments, expected.to_vec())
}

mod permissive {
    use super::*;

    fn number(input: &str) -> Res<'_, u64> {
        let (rest, digits) = context("integer", digit1).parse(input)?;
        integer(input, rest, digits)
    }

    /// An optional separator followed by a number.
    fn trailing_number(input: &str) -> Res<'_, Option<(Option<Separator>, u64)>> {
        opt(pair(opt(separator), number)).parse(input)
    }

    fn split(trailing: Option<(Option<Separator>, u64)>) -> (Option<Separator>, Option<u64>) {
        match trailing {
            Some((sep, number)) => (sep, Some(number)),
            None => (None, None),
        }
    }

    fn v(input: &str) -> Res<'_, Segment> {
        value(Segment::V, tag_no_case("v")).parse(input)
    }

    fn epoch(input: &str) -> Res<'_, Segment> {
        let (input, epoch) = terminated(number, char('!')).parse(input)?;
        Ok((input, Segment::Epoch(epoch)))
    }

    fn release(input: &str) -> Res<'_, Segment> {
        let (input, release) = context("release", separated_list1(char('.'), number)).parse(input)?;
        Ok((input, Segment::Release(release)))
    }

    fn pre_tag(input: &str) -> Res<'_, PreTag> {
        context(
            "pre-release tag",
            alt((
                value(PreTag::Alpha, tag_no_case("alpha")),
                value(PreTag::A, tag_no_case("a")),
                value(PreTag::Beta, tag_no_case("beta")),
                value(PreTag::B, tag_no_case("b")),
                value(PreTag::Preview, tag_no_case("preview")),
                value(PreTag::Pre, tag_no_case("pre")),
                value(PreTag::Rc, tag_no_case("rc")),
                value(PreTag::C, tag_no_case("c")),
            )),
        )
        .parse(input)
    }

    fn pre(input: &str) -> Res<'_, Segment> {
        let (input, sep1) = opt(separator).parse(input)?;
        let (input, tag) = pre_tag(input)?;
        let (input, trailing) = trailing_number(input)?;
        let (sep2, number) = split(trailing);
        Ok((input, Segment::Pre { tag, number, sep1, sep2 }))
    }

    fn post_tag(input: &str) -> Res<'_, PostTag> {
        context(
            "post-release tag",
            alt((
                value(PostTag::Post, tag_no_case("post")),
                value(PostTag::Rev, tag_no_case("rev")),
                value(PostTag::R, tag_no_case("r")),
            )),
        )
        .parse(input)
    }

    fn implicit_post(input: &str) -> Res<'_, Segment> {
        let (input, number) = preceded(char('-'), number).parse(input)?;
        let segment = Segment::Post {
            tag: PostTag::Dash,
            number: Some(number),
            sep1: None,
            sep2: None,
        };
        Ok((input, segment))
    }

    fn tagged_post(input: &str) -> Res<'_, Segment> {
        let (input, sep1) = opt(separator).parse(input)?;
        let (input, tag) = post_tag(input)?;
        let (input, trailing) = trailing_number(input)?;
        let (sep2, number) = split(trailing);
        Ok((input, Segment::Post { tag, number, sep1, sep2 }))
    }

    fn dev(input: &str) -> Res<'_, Segment> {
        let (input, sep1) = opt(separator).parse(input)?;
        let (input, _) = context("dev-release", tag_no_case("dev")).parse(input)?;
        let (input, trailing) = trailing_number(input)?;
        let (sep2, number) = split(trailing);
        Ok((input, Segment::Dev { number, sep1, sep2 }))
    }

    fn local(input: &str) -> Res<'_, Segment> {
        let (input, _) = char('+').parse(input)?;
        let (input, local) = cut(context(
            "local version segment",
            recognize(separated_list1(separator, alphanumeric1)),
        ))
        .parse(input)?;
        Ok((input, Segment::Local(local.to_string())))
    }

    pub(super) fn version(input: &str) -> Res<'_, Parsed<'_>> {
        let (input, v) = opt(v).parse(input)?;
        let (input, epoch) = opt(epoch).parse(input)?;
        let (input, release) = release(input)?;
        let (input, pre) = opt(pre).parse(input)?;
        let (input, post) = opt(alt((implicit_post, tagged_post))).parse(input)?;
        let (input, dev) = opt(dev).parse(input)?;
        let (input, local) = opt(local).parse(input)?;

        let head = v.into_iter().chain(epoch).chain(Some(release));
        Ok((input, assemble(input, head, pre, post, dev, local)))
    }
}

mod strict {
    use super::*;

    /// `0`, or digits without a leading zero.
    fn number(input: &str) -> Res<'_, u64> {
        let canonical = verify(digit1, |digits: &str| digits == "0" || !digits.starts_with('0'));
        let (rest, digits) = context("integer", canonical).parse(input)?;
        integer(input, rest, digits)
    }

    fn epoch(input: &str) -> Res<'_, Segment> {
        let (input, epoch) = terminated(number, char('!')).parse(input)?;
        Ok((input, Segment::Epoch(epoch)))
    }

    fn release(input: &str) -> Res<'_, Segment> {
        let (input, release) = context("release", separated_list1(char('.'), number)).parse(input)?;
        Ok((input, Segment::Release(release)))
    }

    fn pre(input: &str) -> Res<'_, Segment> {
        let (input, tag) = alt((
            value(PreTag::Rc, tag("rc")),
            value(PreTag::A, tag("a")),
            value(PreTag::B, tag("b")),
        ))
        .parse(input)?;
        let (input, number) = cut(number).parse(input)?;
        let segment = Segment::Pre {
            tag,
            number: Some(number),
            sep1: None,
            sep2: None,
        };
        Ok((input, segment))
    }

    fn post(input: &str) -> Res<'_, Segment> {
        let (input, number) = preceded(tag(".post"), cut(number)).parse(input)?;
        let segment = Segment::Post {
            tag: PostTag::Post,
            number: Some(number),
            sep1: Some(Separator::Dot),
            sep2: None,
        };
        Ok((input, segment))
    }

    fn dev(input: &str) -> Res<'_, Segment> {
        let (input, number) = preceded(tag(".dev"), cut(number)).parse(input)?;
        let segment = Segment::Dev {
            number: Some(number),
            sep1: Some(Separator::Dot),
            sep2: None,
        };
        Ok((input, segment))
    }

    fn local(input: &str) -> Res<'_, Segment> {
        let (input, _) = char('+').parse(input)?;
        // Numeric parts have no leading zeros.
        let part = verify(
            take_while1(|c: char| c.is_ascii_lowercase() || c.is_ascii_digit()),
            |part: &str| !part.starts_with('0') || part.len() == 1 || !part.bytes().all(|b| b.is_ascii_digit()),
        );
        let (input, local) = cut(context(
            "local version segment",
            recognize(separated_list1(char('.'), part)),
        ))
        .parse(input)?;
        Ok((input, Segment::Local(local.to_string())))
    }

    pub(super) fn version(input: &str) -> Res<'_, Parsed<'_>> {
        let (input, epoch) = opt(epoch).parse(input)?;
        let (input, release) = release(input)?;
        let (input, pre) = opt(pre).parse(input)?;
        let (input, post) = opt(post).parse(input)?;
        let (input, dev) = opt(dev).parse(input)?;
        let (input, local) = opt(local).parse(input)?;

        let head = epoch.into_iter().chain(Some(release));
        Ok((input, assemble(input, head, pre, post, dev, local)))
    }
}
