//! Tags, separators, and the segments the grammar emits.
//!
//! The spellings recognized here are fixed at compile time:
//! every recognized pre-release tag is a [`PreTag`] variant,
//! every post-release tag is a [`PostTag`] variant,
//! and every separator is a [`Separator`] variant.

use enum_assoc::Assoc;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// A pre-release tag, in any of the spellings PEP 440 accepts.
///
/// The parser preserves the spelling it read (lowercased),
/// so that `1.0alpha1` formats back as `1.0alpha1`.
/// Use [`PreTag::normalize`] to get the canonical `a`, `b`, or `rc`.
///
/// Variants are declared so that the canonical tags order as `a < b < rc`.
#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Debug,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
    Serialize,
    Deserialize,
    Assoc,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
#[func(const fn canonical(&self) -> PreTag)]
pub enum PreTag {
    /// `a`, the canonical alpha tag.
    #[strum(serialize = "a")]
    #[assoc(canonical = PreTag::A)]
    A,

    /// `alpha`, normalizes to `a`.
    #[strum(serialize = "alpha")]
    #[assoc(canonical = PreTag::A)]
    Alpha,

    /// `b`, the canonical beta tag.
    #[strum(serialize = "b")]
    #[assoc(canonical = PreTag::B)]
    B,

    /// `beta`, normalizes to `b`.
    #[strum(serialize = "beta")]
    #[assoc(canonical = PreTag::B)]
    Beta,

    /// `rc`, the canonical release candidate tag.
    #[strum(serialize = "rc")]
    #[assoc(canonical = PreTag::Rc)]
    Rc,

    /// `c`, normalizes to `rc`.
    #[strum(serialize = "c")]
    #[assoc(canonical = PreTag::Rc)]
    C,

    /// `pre`, normalizes to `rc`.
    #[strum(serialize = "pre")]
    #[assoc(canonical = PreTag::Rc)]
    Pre,

    /// `preview`, normalizes to `rc`.
    #[strum(serialize = "preview")]
    #[assoc(canonical = PreTag::Rc)]
    Preview,
}

/// A post-release tag.
///
/// [`PostTag::Dash`] is the implicit form `1.0-5`:
/// there is no textual tag, and the number is mandatory.
#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Debug,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum PostTag {
    /// `post`, the canonical post-release tag.
    #[strum(serialize = "post")]
    Post,

    /// `rev`, normalizes to `post`.
    #[strum(serialize = "rev")]
    Rev,

    /// `r`, normalizes to `post`.
    #[strum(serialize = "r")]
    R,

    /// The bare `-N` form.
    #[strum(serialize = "-")]
    #[serde(rename = "-")]
    Dash,
}

impl PreTag {
    /// The canonical spelling of this tag: `a`, `b`, or `rc`.
    pub fn normalize(self) -> PreTag {
        self.canonical()
    }

    /// Whether this is one of the canonical spellings `a`, `b`, or `rc`.
    pub fn is_canonical(self) -> bool {
        matches!(self, PreTag::A | PreTag::B | PreTag::Rc)
    }
}

impl PostTag {
    /// Whether this is the bare dash form, which has no textual tag.
    pub fn is_dash(self) -> bool {
        self == PostTag::Dash
    }
}

/// A separator character between version parts.
#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Debug,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
    Serialize,
    Deserialize,
    Assoc,
)]
#[func(const fn character(&self) -> char)]
pub enum Separator {
    /// `.`
    #[strum(serialize = ".")]
    #[serde(rename = ".")]
    #[assoc(character = '.')]
    Dot,

    /// `-`
    #[strum(serialize = "-")]
    #[serde(rename = "-")]
    #[assoc(character = '-')]
    Hyphen,

    /// `_`
    #[strum(serialize = "_")]
    #[serde(rename = "_")]
    #[assoc(character = '_')]
    Underscore,
}

impl Separator {
    /// The separator character.
    pub fn as_char(self) -> char {
        self.character()
    }

    /// Look up the separator for a character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Separator::Dot),
            '-' => Some(Separator::Hyphen),
            '_' => Some(Separator::Underscore),
            _ => None,
        }
    }
}

/// One piece of a version string, in the order the grammar reads them.
///
/// Segments are transient: [`crate::parse_segments`] emits them
/// and [`crate::Version`] consumes them once during parsing.
/// Numbers are `None` when the text omitted them (an implicit zero).
#[derive(Clone, Eq, PartialEq, Debug)]
#[non_exhaustive]
pub enum Segment {
    /// A leading `v` or `V`.
    V,

    /// `N!`
    Epoch(u64),

    /// `N(.N)*`
    Release(Vec<u64>),

    /// `[sep1]tag[sep2][N]`
    Pre {
        /// The tag as written, lowercased.
        tag: PreTag,
        /// The number, if written.
        number: Option<u64>,
        /// The separator before the tag.
        sep1: Option<Separator>,
        /// The separator between the tag and the number.
        sep2: Option<Separator>,
    },

    /// `[sep1]tag[sep2][N]`, or `-N` when the tag is [`PostTag::Dash`].
    Post {
        /// The tag as written, lowercased.
        tag: PostTag,
        /// The number, if written.
        number: Option<u64>,
        /// The separator before the tag.
        sep1: Option<Separator>,
        /// The separator between the tag and the number.
        sep2: Option<Separator>,
    },

    /// `[sep1]dev[sep2][N]`
    Dev {
        /// The number, if written.
        number: Option<u64>,
        /// The separator before `dev`.
        sep1: Option<Separator>,
        /// The separator between `dev` and the number.
        sep2: Option<Separator>,
    },

    /// The text after `+`, untokenized.
    Local(String),
}

/// Write an optional separator.
pub(crate) fn write_sep(f: &mut std::fmt::Formatter<'_>, sep: Option<Separator>) -> std::fmt::Result {
    match sep {
        Some(sep) => write!(f, "{}", sep.as_char()),
        None => Ok(()),
    }
}
