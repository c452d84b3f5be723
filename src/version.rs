use std::{fmt, str::FromStr};

use bon::bon;
use derivative::Derivative;
use getset::CopyGetters;
use lazy_regex::regex_is_match;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Error, Mode, PostTag, PreTag, Segment, Separator, ValidationError, error::fatal, key::Key,
    parse_segments, segment::write_sep,
};

/// Convenience macro for creating a [`Version`].
///
/// ```
/// let version = parver::version!(1, 2, 3)?;
/// assert_eq!("1.2.3", version.to_string());
///
/// let version = parver::version!(parse "v1.2-dev")?;
/// assert_eq!("v1.2-dev", version.to_string());
///
/// let version = parver::version!(strict "1.2rc1")?;
/// assert_eq!("1.2rc1", version.to_string());
/// # Ok::<(), parver::Error>(())
/// ```
#[macro_export]
macro_rules! version {
    (strict $input:expr) => {
        $crate::Version::parse_strict($input)
    };
    (parse $input:expr) => {
        $crate::Version::parse($input)
    };
    ($($release:expr),+ $(,)?) => {
        $crate::Version::builder()
            .release(::std::vec![$($release),+])
            .build()
    };
}

/// A pre-release, post-release, or dev-release number.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Number {
    /// The number was omitted from the text, as in `1.0.post`.
    /// It compares as zero.
    Implicit,

    /// The number was written out.
    Explicit(u64),
}

impl Number {
    /// The numeric value, treating an implicit number as zero.
    pub fn value(self) -> u64 {
        match self {
            Number::Implicit => 0,
            Number::Explicit(n) => n,
        }
    }

    /// Whether the number was omitted.
    pub fn is_implicit(self) -> bool {
        self == Number::Implicit
    }

    fn explicit(self) -> Option<u64> {
        match self {
            Number::Implicit => None,
            Number::Explicit(n) => Some(n),
        }
    }
}

impl From<Option<u64>> for Number {
    fn from(number: Option<u64>) -> Self {
        number.map_or(Number::Implicit, Number::Explicit)
    }
}

impl From<u64> for Number {
    fn from(number: u64) -> Self {
        Number::Explicit(number)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Implicit => Ok(()),
            Number::Explicit(n) => write!(f, "{n}"),
        }
    }
}

/// The pre-release segment of a version, e.g. `-rc.1`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct PreRelease {
    /// The tag, as written.
    tag: PreTag,

    /// The number after the tag.
    number: Number,

    /// The separator before the tag.
    sep1: Option<Separator>,

    /// The separator between the tag and the number.
    sep2: Option<Separator>,
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sep(f, self.sep1)?;
        write!(f, "{}", self.tag)?;
        write_sep(f, self.sep2)?;
        write!(f, "{}", self.number)
    }
}

/// The post-release segment of a version, e.g. `.post1` or `-1`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct PostRelease {
    /// The tag, as written.
    tag: PostTag,

    /// The number after the tag.
    /// Always explicit for [`PostTag::Dash`].
    number: Number,

    /// The separator before the tag.
    /// For [`PostTag::Dash`] this is the dash itself.
    sep1: Option<Separator>,

    /// The separator between the tag and the number.
    sep2: Option<Separator>,
}

impl fmt::Display for PostRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tag.is_dash() {
            return write!(f, "-{}", self.number);
        }

        write_sep(f, self.sep1)?;
        write!(f, "{}", self.tag)?;
        write_sep(f, self.sep2)?;
        write!(f, "{}", self.number)
    }
}

/// The dev-release segment of a version, e.g. `.dev0`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct DevRelease {
    /// The number after `dev`.
    number: Number,

    /// The separator before `dev`.
    sep1: Option<Separator>,

    /// The separator between `dev` and the number.
    sep2: Option<Separator>,
}

impl fmt::Display for DevRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sep(f, self.sep1)?;
        f.write_str("dev")?;
        write_sep(f, self.sep2)?;
        write!(f, "{}", self.number)
    }
}

/// Every field that describes a [`Version`], exactly as it is written.
///
/// This is the record [`Version::from_parts`] validates and [`Version::to_parts`] produces.
/// Unlike [`Version::builder`], no separator defaults are applied:
/// a `post` with `post_sep1: None` is written `1post1`, not `1.post1`.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct VersionParts {
    /// The release numbers. Must not be empty.
    pub release: Vec<u64>,

    /// Whether the version is written with a leading `v`.
    pub v: bool,

    /// The epoch; `None` means an implicit `0` that is not written.
    pub epoch: Option<u64>,

    /// The pre-release tag; `None` means no pre-release.
    pub pre_tag: Option<PreTag>,

    /// The pre-release number; `None` with a tag means an implicit number.
    pub pre: Option<u64>,

    /// The separator before the pre-release tag.
    pub pre_sep1: Option<Separator>,

    /// The separator between the pre-release tag and number.
    pub pre_sep2: Option<Separator>,

    /// The post-release number; `None` means no post-release unless `post_tag` is set.
    pub post: Option<Number>,

    /// The post-release tag; `None` with a number means [`PostTag::Post`].
    pub post_tag: Option<PostTag>,

    /// The separator before the post-release tag.
    pub post_sep1: Option<Separator>,

    /// The separator between the post-release tag and number.
    pub post_sep2: Option<Separator>,

    /// The dev-release number; `None` means no dev-release.
    pub dev: Option<Number>,

    /// The separator before `dev`.
    pub dev_sep1: Option<Separator>,

    /// The separator between `dev` and its number.
    pub dev_sep2: Option<Separator>,

    /// The local version, without the leading `+`.
    pub local: Option<String>,
}

/// A PEP 440 version.
///
/// A `Version` remembers exactly how it was written
/// (tag spellings, separators, implicit numbers, a leading `v`)
/// so that it formats back to the same text it was parsed from:
///
/// ```
/// let version = parver::Version::parse("v1.0-ALPHA_2.post")?;
/// assert_eq!("v1.0-alpha_2.post", version.to_string());
/// assert_eq!("1.0a2.post0", version.normalize().to_string());
/// # Ok::<(), parver::Error>(())
/// ```
///
/// Comparison, equality, and hashing follow PEP 440 and ignore the way a version is written:
///
/// ```
/// use parver::Version;
/// assert_eq!(Version::parse("1.0c1")?, Version::parse("1.0rc1")?);
/// assert!(Version::parse("1.0.dev456")? < Version::parse("1.0a1")?);
/// assert!(Version::parse("1.0a1")? < Version::parse("1.0")?);
/// assert!(Version::parse("1.0")? < Version::parse("1.0.post1")?);
/// # Ok::<(), parver::Error>(())
/// ```
///
/// A `Version` is immutable: the `replace`, `clear`, `truncate`, and `bump_*`
/// methods return a new version.
#[derive(Clone, Derivative, derive_more::Debug)]
#[derivative(Eq, PartialEq, Ord, PartialOrd, Hash)]
#[debug("Version({:?})", self.to_string())]
pub struct Version {
    #[derivative(PartialEq = "ignore", PartialOrd = "ignore", Ord = "ignore", Hash = "ignore")]
    release: Vec<u64>,

    #[derivative(PartialEq = "ignore", PartialOrd = "ignore", Ord = "ignore", Hash = "ignore")]
    v: bool,

    /// `None` when the epoch is implicit.
    #[derivative(PartialEq = "ignore", PartialOrd = "ignore", Ord = "ignore", Hash = "ignore")]
    epoch: Option<u64>,

    #[derivative(PartialEq = "ignore", PartialOrd = "ignore", Ord = "ignore", Hash = "ignore")]
    pre: Option<PreRelease>,

    #[derivative(PartialEq = "ignore", PartialOrd = "ignore", Ord = "ignore", Hash = "ignore")]
    post: Option<PostRelease>,

    #[derivative(PartialEq = "ignore", PartialOrd = "ignore", Ord = "ignore", Hash = "ignore")]
    dev: Option<DevRelease>,

    #[derivative(PartialEq = "ignore", PartialOrd = "ignore", Ord = "ignore", Hash = "ignore")]
    local: Option<String>,

    /// The only field that participates in comparison.
    key: Key,
}

#[bon]
impl Version {
    /// Construct a version from its fields.
    ///
    /// `post_sep1` and `dev_sep1` default to `.` when the segment is present;
    /// use `maybe_post_sep1(Some(None))` to write the segment with no separator.
    /// All other separators default to none.
    ///
    /// ```
    /// use parver::{Number, PreTag, Version};
    ///
    /// let version = Version::builder()
    ///     .release(vec![1, 4])
    ///     .pre_tag(PreTag::Rc)
    ///     .pre(1)
    ///     .post(Number::Explicit(2))
    ///     .build()?;
    /// assert_eq!("1.4rc1.post2", version.to_string());
    /// # Ok::<(), parver::Error>(())
    /// ```
    #[builder]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        release: Vec<u64>,
        #[builder(default)] v: bool,
        epoch: Option<u64>,
        pre_tag: Option<PreTag>,
        pre: Option<u64>,
        pre_sep1: Option<Separator>,
        pre_sep2: Option<Separator>,
        post: Option<Number>,
        post_tag: Option<PostTag>,
        post_sep1: Option<Option<Separator>>,
        post_sep2: Option<Separator>,
        dev: Option<Number>,
        dev_sep1: Option<Option<Separator>>,
        dev_sep2: Option<Separator>,
        #[builder(into)] local: Option<String>,
    ) -> Result<Self, ValidationError> {
        let tagged_post = post_tag.map_or(post.is_some(), |tag| !tag.is_dash());
        let post_sep1 = post_sep1.unwrap_or_else(|| tagged_post.then_some(Separator::Dot));
        let dev_sep1 = dev_sep1.unwrap_or_else(|| dev.is_some().then_some(Separator::Dot));

        Self::from_parts(VersionParts {
            release,
            v,
            epoch,
            pre_tag,
            pre,
            pre_sep1,
            pre_sep2,
            post,
            post_tag,
            post_sep1,
            post_sep2,
            dev,
            dev_sep1,
            dev_sep2,
            local,
        })
    }
}

impl Version {
    /// Parse a version permissively.
    /// Accepts any version PEP 440 says should be normalized, and reports how it was written.
    pub fn parse(input: &str) -> Result<Self, Error> {
        Self::parse_with(input, Mode::Permissive)
    }

    /// Parse a version that must already be in canonical PEP 440 form.
    pub fn parse_strict(input: &str) -> Result<Self, Error> {
        Self::parse_with(input, Mode::Strict)
    }

    /// Parse a version with the provided grammar.
    pub fn parse_with(input: &str, mode: Mode) -> Result<Self, Error> {
        let mut parts = VersionParts::default();
        for segment in parse_segments(input, mode)? {
            match segment {
                Segment::V => parts.v = true,
                Segment::Epoch(epoch) => parts.epoch = Some(epoch),
                Segment::Release(release) => parts.release = release,
                Segment::Pre {
                    tag,
                    number,
                    sep1,
                    sep2,
                } => {
                    parts.pre_tag = Some(tag);
                    parts.pre = number;
                    parts.pre_sep1 = sep1;
                    parts.pre_sep2 = sep2;
                }
                Segment::Post {
                    tag,
                    number,
                    sep1,
                    sep2,
                } => {
                    parts.post_tag = Some(tag);
                    parts.post = Some(Number::from(number));
                    parts.post_sep1 = sep1;
                    parts.post_sep2 = sep2;
                }
                Segment::Dev { number, sep1, sep2 } => {
                    parts.dev = Some(Number::from(number));
                    parts.dev_sep1 = sep1;
                    parts.dev_sep2 = sep2;
                }
                Segment::Local(local) => parts.local = Some(local),
            }
        }

        Ok(Self::from_parts(parts)?)
    }

    /// Validate the fields and construct a version.
    pub fn from_parts(parts: VersionParts) -> Result<Self, ValidationError> {
        Self::validate(parts).inspect_err(|err| debug!(%err, "rejected version fields"))
    }

    fn validate(parts: VersionParts) -> Result<Self, ValidationError> {
        let VersionParts {
            release,
            v,
            epoch,
            pre_tag,
            pre,
            pre_sep1,
            pre_sep2,
            post,
            post_tag,
            post_sep1,
            post_sep2,
            dev,
            dev_sep1,
            dev_sep2,
            local,
        } = parts;

        if release.is_empty() {
            fatal!(ValidationError::EmptyRelease);
        }

        let pre = match pre_tag {
            None if pre.is_some() => fatal!(ValidationError::PreNumberWithoutTag),
            None if pre_sep1.is_some() || pre_sep2.is_some() => {
                fatal!(ValidationError::PreSeparatorWithoutTag)
            }
            None => None,
            Some(_) if pre.is_none() && pre_sep2.is_some() => {
                fatal!(ValidationError::SeparatorWithoutNumber {
                    segment: "pre-release"
                })
            }
            Some(tag) => Some(PreRelease {
                tag,
                number: Number::from(pre),
                sep1: pre_sep1,
                sep2: pre_sep2,
            }),
        };

        let post = match (post_tag, post) {
            (None, None) => {
                if post_sep1.is_some() || post_sep2.is_some() {
                    fatal!(ValidationError::PostSeparatorWithoutPost);
                }
                None
            }
            (Some(PostTag::Dash), number) => {
                let Some(Number::Explicit(number)) = number else {
                    fatal!(ValidationError::ImplicitPostWithoutNumber);
                };
                if post_sep1.is_some() || post_sep2.is_some() {
                    fatal!(ValidationError::ImplicitPostSeparators);
                }
                // `1rc-2` reads back as pre-release `rc2`.
                if pre.is_some_and(|pre| pre.number.is_implicit()) {
                    fatal!(ValidationError::AmbiguousImplicitPost);
                }
                Some(PostRelease {
                    tag: PostTag::Dash,
                    number: Number::Explicit(number),
                    sep1: Some(Separator::Hyphen),
                    sep2: None,
                })
            }
            (tag, number) => {
                let number = number.unwrap_or(Number::Implicit);
                if number.is_implicit() && post_sep2.is_some() {
                    fatal!(ValidationError::SeparatorWithoutNumber {
                        segment: "post-release"
                    });
                }
                Some(PostRelease {
                    tag: tag.unwrap_or(PostTag::Post),
                    number,
                    sep1: post_sep1,
                    sep2: post_sep2,
                })
            }
        };

        let dev = match dev {
            None if dev_sep1.is_some() || dev_sep2.is_some() => {
                fatal!(ValidationError::DevSeparatorWithoutDev)
            }
            None => None,
            Some(Number::Implicit) if dev_sep2.is_some() => {
                fatal!(ValidationError::SeparatorWithoutNumber {
                    segment: "dev-release"
                })
            }
            Some(number) => Some(DevRelease {
                number,
                sep1: dev_sep1,
                sep2: dev_sep2,
            }),
        };

        if let Some(local) = &local {
            if !regex_is_match!(r"^[a-zA-Z0-9]+(?:[-_.][a-zA-Z0-9]+)*$", local) {
                fatal!(ValidationError::InvalidLocal {
                    local: local.clone()
                });
            }
        }

        Ok(Self::assemble(release, v, epoch, pre, post, dev, local))
    }

    /// Construct from fields that are already known to be valid.
    fn assemble(
        release: Vec<u64>,
        v: bool,
        epoch: Option<u64>,
        pre: Option<PreRelease>,
        post: Option<PostRelease>,
        dev: Option<DevRelease>,
        local: Option<String>,
    ) -> Self {
        let key = Key::new(
            epoch.unwrap_or(0),
            &release,
            pre.map(|pre| (pre.tag, pre.number.value())),
            post.map(|post| post.number.value()),
            dev.map(|dev| dev.number.value()),
            local.as_deref(),
        );

        Self {
            release,
            v,
            epoch,
            pre,
            post,
            dev,
            local,
            key,
        }
    }

    /// The fields that reconstruct this version through [`Version::from_parts`].
    ///
    /// Implicit numbers are reported as absent (`pre`, `epoch`)
    /// or as [`Number::Implicit`] (`post`, `dev`).
    pub fn to_parts(&self) -> VersionParts {
        let mut parts = VersionParts {
            release: self.release.clone(),
            v: self.v,
            epoch: self.epoch,
            local: self.local.clone(),
            ..Default::default()
        };

        if let Some(pre) = self.pre {
            parts.pre_tag = Some(pre.tag);
            parts.pre = pre.number.explicit();
            parts.pre_sep1 = pre.sep1;
            parts.pre_sep2 = pre.sep2;
        }

        if let Some(post) = self.post {
            parts.post_tag = Some(post.tag);
            parts.post = Some(post.number);
            if !post.tag.is_dash() {
                parts.post_sep1 = post.sep1;
                parts.post_sep2 = post.sep2;
            }
        }

        if let Some(dev) = self.dev {
            parts.dev = Some(dev.number);
            parts.dev_sep1 = dev.sep1;
            parts.dev_sep2 = dev.sep2;
        }

        parts
    }

    /// Construct a new version with some fields changed.
    ///
    /// `edit` receives the fields of this version and may change any of them.
    /// When it adds a tagged post-release or a dev-release that was not there before
    /// and leaves its separators empty, the separator before the tag defaults to `.`.
    /// When it removes a segment or switches the post-release to [`PostTag::Dash`],
    /// separators it did not change are dropped.
    ///
    /// ```
    /// use parver::{Number, Version};
    ///
    /// let version = Version::parse("1.3")?.replace(|parts| parts.post = Some(Number::Explicit(1)))?;
    /// assert_eq!("1.3.post1", version.to_string());
    /// # Ok::<(), parver::Error>(())
    /// ```
    pub fn replace(&self, edit: impl FnOnce(&mut VersionParts)) -> Result<Self, ValidationError> {
        let before = self.to_parts();
        let mut parts = before.clone();
        edit(&mut parts);

        let is_dash = |parts: &VersionParts| parts.post_tag.is_some_and(PostTag::is_dash);
        let is_tagged =
            |parts: &VersionParts| !is_dash(parts) && (parts.post.is_some() || parts.post_tag.is_some());

        if parts.pre_tag.is_none() && parts.pre.is_none() {
            if parts.pre_sep1 == before.pre_sep1 {
                parts.pre_sep1 = None;
            }
            if parts.pre_sep2 == before.pre_sep2 {
                parts.pre_sep2 = None;
            }
        }

        if parts.post_tag.is_none() && parts.post.is_none() {
            if parts.post_sep1 == before.post_sep1 {
                parts.post_sep1 = None;
            }
            if parts.post_sep2 == before.post_sep2 {
                parts.post_sep2 = None;
            }
        }

        if parts.dev.is_none() {
            if parts.dev_sep1 == before.dev_sep1 {
                parts.dev_sep1 = None;
            }
            if parts.dev_sep2 == before.dev_sep2 {
                parts.dev_sep2 = None;
            }
        }

        if is_dash(&parts) && !is_dash(&before) {
            if parts.post_sep1 == before.post_sep1 {
                parts.post_sep1 = None;
            }
            if parts.post_sep2 == before.post_sep2 {
                parts.post_sep2 = None;
            }
        }

        if is_tagged(&parts) && !is_tagged(&before) && parts.post_sep1.is_none() && parts.post_sep2.is_none() {
            parts.post_sep1 = Some(Separator::Dot);
        }

        if parts.dev.is_some() && before.dev.is_none() && parts.dev_sep1.is_none() && parts.dev_sep2.is_none() {
            parts.dev_sep1 = Some(Separator::Dot);
        }

        Self::from_parts(parts)
    }

    /// Construct a new version without the selected segments.
    ///
    /// Unlike [`Version::replace`], this removes segments entirely
    /// instead of setting their numbers to implicit.
    pub fn clear(&self, pre: bool, post: bool, dev: bool) -> Self {
        Self::assemble(
            self.release.clone(),
            self.v,
            self.epoch,
            if pre { None } else { self.pre },
            if post { None } else { self.post },
            if dev { None } else { self.dev },
            self.local.clone(),
        )
    }

    /// The version with only its epoch and release.
    pub fn base_version(&self) -> Self {
        Self::assemble(self.release.clone(), self.v, self.epoch, None, None, None, None)
    }

    /// The canonical PEP 440 form of this version.
    ///
    /// Tags are normalized to `a`, `b`, `rc`, and `post`;
    /// separators are reset to the canonical ones;
    /// implicit numbers become explicit;
    /// a `0` epoch and the `v` prefix are dropped;
    /// and the local version is lowercased with its separators replaced by `.`
    /// and leading zeros removed from its numeric parts.
    pub fn normalize(&self) -> Self {
        let pre = self.pre.map(|pre| PreRelease {
            tag: pre.tag.normalize(),
            number: Number::Explicit(pre.number.value()),
            sep1: None,
            sep2: None,
        });
        let post = self.post.map(|post| PostRelease {
            tag: PostTag::Post,
            number: Number::Explicit(post.number.value()),
            sep1: Some(Separator::Dot),
            sep2: None,
        });
        let dev = self.dev.map(|dev| DevRelease {
            number: Number::Explicit(dev.number.value()),
            sep1: Some(Separator::Dot),
            sep2: None,
        });
        let local = self.local.as_deref().map(|local| {
            local
                .split(['.', '-', '_'])
                .map(|part| {
                    if part.bytes().all(|b| b.is_ascii_digit()) {
                        let digits = part.trim_start_matches('0');
                        if digits.is_empty() { "0" } else { digits }.to_string()
                    } else {
                        part.to_ascii_lowercase()
                    }
                })
                .collect::<Vec<_>>()
                .join(".")
        });
        let epoch = self.epoch.filter(|&epoch| epoch != 0);

        Self::assemble(self.release.clone(), false, epoch, pre, post, dev, local)
    }

    /// The version without its local version, as text.
    pub fn public(&self) -> String {
        Public(self).to_string()
    }

    /// The release numbers.
    pub fn release(&self) -> &[u64] {
        &self.release
    }

    /// Whether the version is written with a leading `v`.
    pub fn v_marker(&self) -> bool {
        self.v
    }

    /// The epoch; `0` when not written.
    pub fn epoch(&self) -> u64 {
        self.epoch.unwrap_or(0)
    }

    /// Whether the epoch was omitted.
    pub fn epoch_implicit(&self) -> bool {
        self.epoch.is_none()
    }

    /// The pre-release segment.
    pub fn pre_release(&self) -> Option<PreRelease> {
        self.pre
    }

    /// The pre-release tag, as written.
    pub fn pre_tag(&self) -> Option<PreTag> {
        self.pre.map(|pre| pre.tag)
    }

    /// The pre-release number.
    pub fn pre(&self) -> Option<u64> {
        self.pre.map(|pre| pre.number.value())
    }

    /// Whether the pre-release number was omitted.
    pub fn pre_implicit(&self) -> bool {
        self.pre.is_some_and(|pre| pre.number.is_implicit())
    }

    /// The separator before the pre-release tag.
    pub fn pre_sep1(&self) -> Option<Separator> {
        self.pre.and_then(|pre| pre.sep1)
    }

    /// The separator between the pre-release tag and number.
    pub fn pre_sep2(&self) -> Option<Separator> {
        self.pre.and_then(|pre| pre.sep2)
    }

    /// The post-release segment.
    pub fn post_release(&self) -> Option<PostRelease> {
        self.post
    }

    /// The post-release tag, as written.
    pub fn post_tag(&self) -> Option<PostTag> {
        self.post.map(|post| post.tag)
    }

    /// The post-release number.
    pub fn post(&self) -> Option<u64> {
        self.post.map(|post| post.number.value())
    }

    /// Whether the post-release number was omitted.
    pub fn post_implicit(&self) -> bool {
        self.post.is_some_and(|post| post.number.is_implicit())
    }

    /// The separator before the post-release tag; `-` for the dash form.
    pub fn post_sep1(&self) -> Option<Separator> {
        self.post.and_then(|post| post.sep1)
    }

    /// The separator between the post-release tag and number.
    pub fn post_sep2(&self) -> Option<Separator> {
        self.post.and_then(|post| post.sep2)
    }

    /// The dev-release segment.
    pub fn dev_release(&self) -> Option<DevRelease> {
        self.dev
    }

    /// The dev-release number.
    pub fn dev(&self) -> Option<u64> {
        self.dev.map(|dev| dev.number.value())
    }

    /// Whether the dev-release number was omitted.
    pub fn dev_implicit(&self) -> bool {
        self.dev.is_some_and(|dev| dev.number.is_implicit())
    }

    /// The separator before `dev`.
    pub fn dev_sep1(&self) -> Option<Separator> {
        self.dev.and_then(|dev| dev.sep1)
    }

    /// The separator between `dev` and its number.
    pub fn dev_sep2(&self) -> Option<Separator> {
        self.dev.and_then(|dev| dev.sep2)
    }

    /// The local version, without the leading `+`.
    pub fn local(&self) -> Option<&str> {
        self.local.as_deref()
    }

    /// Whether this is a pre-release or a dev-release.
    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some() || self.dev.is_some()
    }

    /// Whether this is a post-release.
    pub fn is_postrelease(&self) -> bool {
        self.post.is_some()
    }

    /// Whether this is a dev-release.
    pub fn is_devrelease(&self) -> bool {
        self.dev.is_some()
    }

    /// Whether the pre-release tag normalizes to `a`.
    pub fn is_alpha(&self) -> bool {
        self.pre_tag().map(|tag| tag.normalize()) == Some(PreTag::A)
    }

    /// Whether the pre-release tag normalizes to `b`.
    pub fn is_beta(&self) -> bool {
        self.pre_tag().map(|tag| tag.normalize()) == Some(PreTag::B)
    }

    /// Whether the pre-release tag normalizes to `rc`.
    pub fn is_release_candidate(&self) -> bool {
        self.pre_tag().map(|tag| tag.normalize()) == Some(PreTag::Rc)
    }

    /// Construct a new version with a different release, keeping everything else.
    fn with_release(&self, release: Vec<u64>) -> Self {
        Self::assemble(
            release,
            self.v,
            self.epoch,
            self.pre,
            self.post,
            self.dev,
            self.local.clone(),
        )
    }

    /// Increment the release number at `index` and zero every number after it.
    ///
    /// `index` may be past the end of the release; the gap is filled with zeros.
    ///
    /// ```
    /// let version = parver::Version::parse("1.4")?;
    /// assert_eq!("2.0", version.bump_release(0)?.to_string());
    /// assert_eq!("1.5", version.bump_release(1)?.to_string());
    /// assert_eq!("1.4.0.1", version.bump_release(3)?.to_string());
    /// # Ok::<(), parver::Error>(())
    /// ```
    pub fn bump_release(&self, index: usize) -> Result<Self, ValidationError> {
        let current = self.release.get(index).copied().unwrap_or(0);
        let Some(value) = current.checked_add(1) else {
            fatal!(ValidationError::Overflow { field: "release" });
        };
        self.bump_release_to(index, value)
    }

    /// Set the release number at `index` to `value` and zero every number after it.
    pub fn bump_release_to(&self, index: usize, value: u64) -> Result<Self, ValidationError> {
        let mut release = self.release_through(index)?;
        release[index] = value;
        release[index + 1..].fill(0);
        Ok(self.with_release(release))
    }

    /// Set the release number at `index` to `value`, leaving the other numbers alone.
    pub fn set_release(&self, index: usize, value: u64) -> Result<Self, ValidationError> {
        let mut release = self.release_through(index)?;
        release[index] = value;
        Ok(self.with_release(release))
    }

    /// The release numbers, zero-filled so that `index` is in bounds.
    fn release_through(&self, index: usize) -> Result<Vec<u64>, ValidationError> {
        let overflow = ValidationError::Overflow { field: "release" };
        let Some(len) = index.checked_add(1) else {
            fatal!(overflow);
        };

        let mut release = self.release.clone();
        if release.len() < len {
            release
                .try_reserve_exact(len - release.len())
                .map_err(|_| overflow)?;
            release.resize(len, 0);
        }
        Ok(release)
    }

    /// Increment the pre-release number.
    /// Shorthand for [`Version::bump_pre_by`] with `by` of 1.
    ///
    /// ```
    /// use parver::{PreTag, Version};
    /// assert_eq!("1.4a0", Version::parse("1.4")?.bump_pre(Some(PreTag::A))?.to_string());
    /// assert_eq!("1.4b2", Version::parse("1.4b1")?.bump_pre(None)?.to_string());
    /// # Ok::<(), parver::Error>(())
    /// ```
    pub fn bump_pre(&self, tag: Option<PreTag>) -> Result<Self, ValidationError> {
        self.bump_pre_by(tag, 1)
    }

    /// Add `by` to the pre-release number.
    ///
    /// A version that is not a pre-release needs a `tag`, and starts from `by - 1`.
    /// A version that is a pre-release keeps its tag;
    /// requesting a different tag is an error, since tags are not interchangeable.
    pub fn bump_pre_by(&self, tag: Option<PreTag>, by: i64) -> Result<Self, ValidationError> {
        let tag = match (self.pre, tag) {
            (None, None) => fatal!(ValidationError::BumpPreWithoutTag),
            (None, Some(tag)) => tag,
            (Some(pre), Some(tag)) if pre.tag != tag => {
                fatal!(ValidationError::PreTagMismatch {
                    current: pre.tag,
                    requested: tag,
                })
            }
            (Some(pre), _) => pre.tag,
        };

        let number = bumped("pre-release", self.pre(), by)?;
        self.replace(|parts| {
            parts.pre_tag = Some(tag);
            parts.pre = Some(number);
        })
    }

    /// Increment the post-release number.
    /// Shorthand for [`Version::bump_post_by`] with `by` of 1.
    ///
    /// ```
    /// use parver::{PostTag, Version};
    /// assert_eq!("1.4.post0", Version::parse("1.4")?.bump_post(None)?.to_string());
    /// assert_eq!("1.4-1", Version::parse("1.4.post0")?.bump_post(Some(PostTag::Dash))?.to_string());
    /// assert_eq!("1.4_rev-2", Version::parse("1.4_post-1")?.bump_post(Some(PostTag::Rev))?.to_string());
    /// # Ok::<(), parver::Error>(())
    /// ```
    pub fn bump_post(&self, tag: Option<PostTag>) -> Result<Self, ValidationError> {
        self.bump_post_by(tag, 1)
    }

    /// Add `by` to the post-release number.
    ///
    /// Without a `tag`, the current tag is kept, or `post` is used if this is not a post-release.
    /// A version that is not a post-release starts from `by - 1`.
    pub fn bump_post_by(&self, tag: Option<PostTag>, by: i64) -> Result<Self, ValidationError> {
        let tag = tag.or(self.post_tag()).unwrap_or(PostTag::Post);
        let number = bumped("post-release", self.post(), by)?;
        self.replace(|parts| {
            parts.post_tag = Some(tag);
            parts.post = Some(Number::Explicit(number));
        })
    }

    /// Increment the dev-release number.
    ///
    /// ```
    /// use parver::Version;
    /// assert_eq!("1.4.dev0", Version::parse("1.4")?.bump_dev()?.to_string());
    /// assert_eq!("1.4_dev2", Version::parse("1.4_dev1")?.bump_dev()?.to_string());
    /// # Ok::<(), parver::Error>(())
    /// ```
    pub fn bump_dev(&self) -> Result<Self, ValidationError> {
        self.bump_dev_by(1)
    }

    /// Add `by` to the dev-release number.
    /// A version that is not a dev-release starts from `by - 1`.
    pub fn bump_dev_by(&self, by: i64) -> Result<Self, ValidationError> {
        let number = bumped("dev-release", self.dev(), by)?;
        self.replace(|parts| parts.dev = Some(Number::Explicit(number)))
    }

    /// Increment the epoch, writing it out if it was implicit.
    pub fn bump_epoch(&self) -> Result<Self, ValidationError> {
        self.bump_epoch_by(1)
    }

    /// Add `by` to the epoch, writing it out if it was implicit.
    pub fn bump_epoch_by(&self, by: i64) -> Result<Self, ValidationError> {
        let epoch = bumped("epoch", Some(self.epoch()), by)?;
        self.replace(|parts| parts.epoch = Some(epoch))
    }

    /// Remove trailing zeros from the release, keeping at least one number.
    ///
    /// ```
    /// let version = parver::Version::parse("1.0.2.0")?;
    /// assert_eq!("1.0.2", version.truncate().to_string());
    /// # Ok::<(), parver::Error>(())
    /// ```
    pub fn truncate(&self) -> Self {
        self.truncated(1)
    }

    /// Remove trailing zeros from the release, keeping at least `min_length` numbers.
    ///
    /// A release shorter than `min_length` is padded with zeros.
    pub fn truncate_to(&self, min_length: usize) -> Result<Self, ValidationError> {
        if min_length == 0 {
            fatal!(ValidationError::MinLength);
        }
        Ok(self.truncated(min_length))
    }

    fn truncated(&self, min_length: usize) -> Self {
        let mut release = self.release.clone();
        while release.len() > min_length && release.last() == Some(&0) {
            release.pop();
        }
        if release.len() < min_length {
            release.resize(min_length, 0);
        }
        self.with_release(release)
    }

    fn fmt_public(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.v {
            f.write_str("v")?;
        }

        if let Some(epoch) = self.epoch {
            write!(f, "{epoch}!")?;
        }

        for (i, number) in self.release.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{number}")?;
        }

        if let Some(pre) = &self.pre {
            write!(f, "{pre}")?;
        }

        if let Some(post) = &self.post {
            write!(f, "{post}")?;
        }

        if let Some(dev) = &self.dev {
            write!(f, "{dev}")?;
        }

        Ok(())
    }
}

/// Add `by` to a number, starting from `by - 1` when the number is absent.
fn bumped(field: &'static str, current: Option<u64>, by: i64) -> Result<u64, ValidationError> {
    let value = match current {
        Some(current) => i128::from(current) + i128::from(by),
        None => i128::from(by) - 1,
    };

    if value < 0 {
        fatal!(ValidationError::Negative { field, value });
    }

    u64::try_from(value).map_err(|_| ValidationError::Overflow { field })
}

/// Formats a version without its local version.
struct Public<'a>(&'a Version);

impl fmt::Display for Public<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_public(f)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_public(f)?;
        if let Some(local) = &self.local {
            write!(f, "+{local}")?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Version {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Version {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<VersionParts> for Version {
    type Error = ValidationError;

    fn try_from(parts: VersionParts) -> Result<Self, Self::Error> {
        Self::from_parts(parts)
    }
}

impl From<&Version> for Version {
    fn from(value: &Version) -> Self {
        value.clone()
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::try_from(s).map_err(serde::de::Error::custom)
    }
}
