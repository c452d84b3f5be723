use getset::{CopyGetters, Getters};
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::PreTag;

/// Records all errors reported by this library.
#[derive(Error, Diagnostic, Clone, PartialEq, Eq, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The input could not be derived from the version grammar.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    /// The fields of a version are not a valid combination.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),
}

/// The input did not match the version grammar.
///
/// Reports the furthest point the grammar reached
/// and what it expected to find there.
#[derive(Error, Diagnostic, Clone, PartialEq, Eq, Debug, Getters, CopyGetters)]
#[error("expected {} at line {line}, column {column} of {input:?}", .expected.join(" or "))]
#[diagnostic(code(parver::parse))]
pub struct ParseError {
    /// The input originally provided to the parser.
    #[source_code]
    #[getset(get = "pub")]
    input: String,

    /// The location of the error.
    #[label("here")]
    span: SourceSpan,

    /// The byte offset of the error in the input.
    #[getset(get_copy = "pub")]
    offset: usize,

    /// The 1-based line of the error.
    #[getset(get_copy = "pub")]
    line: usize,

    /// The 1-based column of the error, in characters.
    #[getset(get_copy = "pub")]
    column: usize,

    /// Descriptions of what the grammar would have accepted at this point.
    #[getset(get = "pub")]
    expected: Vec<&'static str>,
}

impl ParseError {
    /// Create an error at `offset` bytes into `input`.
    pub(crate) fn new(input: &str, offset: usize, expected: Vec<&'static str>) -> Self {
        let offset = offset.min(input.len());
        let before = &input[..offset];
        let line = before.matches('\n').count() + 1;
        let column = match before.rfind('\n') {
            Some(newline) => before[newline + 1..].chars().count() + 1,
            None => before.chars().count() + 1,
        };

        // Point at the offending character, or at the end of the input.
        let width = input[offset..].chars().next().map_or(0, char::len_utf8);

        Self {
            input: input.to_string(),
            span: (offset, width).into(),
            offset,
            line,
            column,
            expected,
        }
    }
}

/// The fields of a version are not a valid combination.
#[derive(Error, Diagnostic, Clone, PartialEq, Eq, Debug)]
#[non_exhaustive]
pub enum ValidationError {
    /// The release segment must have at least one number.
    #[error("release must contain at least one number")]
    EmptyRelease,

    /// A pre-release number was given without a pre-release tag.
    #[error("a pre-release number requires a pre-release tag")]
    #[diagnostic(help("set `pre_tag`, or use `bump_pre` with a tag"))]
    PreNumberWithoutTag,

    /// Pre-release separators were given without a pre-release tag.
    #[error("pre-release separators require a pre-release tag")]
    PreSeparatorWithoutTag,

    /// Post-release separators were given without a post-release.
    #[error("post-release separators require a post-release")]
    PostSeparatorWithoutPost,

    /// Dev-release separators were given without a dev-release.
    #[error("dev-release separators require a dev-release")]
    DevSeparatorWithoutDev,

    /// A separator between a tag and its number was given, but the number is implicit.
    #[error("{segment} separator before the number requires an explicit {segment} number")]
    SeparatorWithoutNumber {
        /// The segment with the stray separator.
        segment: &'static str,
    },

    /// The dash form of a post-release was requested without a number.
    #[error("implicit post-releases (`-N`) require an explicit post-release number")]
    ImplicitPostWithoutNumber,

    /// Separators were given for the dash form of a post-release.
    #[error("implicit post-releases (`-N`) cannot have post-release separators")]
    ImplicitPostSeparators,

    /// A pre-release without a number directly followed by `-N` reads back as a pre-release number.
    #[error("a pre-release without a number followed by an implicit post-release (`-N`) is ambiguous")]
    #[diagnostic(help("give the pre-release an explicit number, or use a tagged post-release"))]
    AmbiguousImplicitPost,

    /// The local version is not alphanumeric parts joined by `.`, `-`, or `_`.
    #[error("invalid local version {local:?}")]
    InvalidLocal {
        /// The rejected local version.
        local: String,
    },

    /// The operation would make a number negative.
    #[error("{field} cannot be negative (got {value})")]
    Negative {
        /// The field that went negative.
        field: &'static str,

        /// The value it would have had.
        value: i128,
    },

    /// The operation would overflow a number.
    #[error("{field} is too large")]
    Overflow {
        /// The field that overflowed.
        field: &'static str,
    },

    /// Truncation must keep at least one release number.
    #[error("minimum release length must be at least 1")]
    MinLength,

    /// `bump_pre` needs a tag when the version is not already a pre-release.
    #[error("cannot bump a pre-release without a pre-release tag")]
    #[diagnostic(help("pass a tag, e.g. `bump_pre(Some(PreTag::A))`"))]
    BumpPreWithoutTag,

    /// `bump_pre` was given a tag other than the current one.
    #[error("cannot bump with pre-release tag mismatch ({current} != {requested})")]
    #[diagnostic(help("use `replace` to change the pre-release tag"))]
    PreTagMismatch {
        /// The tag on the version.
        current: PreTag,

        /// The tag that was requested.
        requested: PreTag,
    },
}

/// Return early with the provided error, converted into the function's error type.
macro_rules! fatal {
    ($err:expr) => {
        return Err(From::from($err))
    };
}
pub(crate) use fatal;
