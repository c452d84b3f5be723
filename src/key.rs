//! The comparison key for versions.
//!
//! Two versions are equal exactly when their keys are equal,
//! and order the same way their keys order.
//! The key discards everything that only affects how a version is written:
//! the `v` prefix, separators, tag spellings, and implicit-versus-explicit numbers.

use crate::PreTag;

/// A value that may sort before or after every present value.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub(crate) enum Bound<T> {
    NegInf,
    Value(T),
    PosInf,
}

/// One dot-separated part of a local version, as compared.
///
/// Text parts sort before numeric parts;
/// numeric parts compare by value without size limit.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub(crate) enum LocalToken {
    Text(String),
    /// Digit count (after stripping leading zeros) then the digits,
    /// which orders the same as the numeric value.
    Number(usize, String),
}

impl LocalToken {
    fn new(part: &str) -> Self {
        if part.bytes().all(|b| b.is_ascii_digit()) {
            let digits = part.trim_start_matches('0');
            LocalToken::Number(digits.len(), digits.to_string())
        } else {
            LocalToken::Text(part.to_ascii_lowercase())
        }
    }
}

/// Split a local version into comparable tokens.
pub(crate) fn local_tokens(local: &str) -> Vec<LocalToken> {
    local
        .split(['.', '-', '_'])
        .map(LocalToken::new)
        .collect()
}

/// The fields of a version that participate in comparison, in priority order.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub(crate) struct Key {
    epoch: u64,
    release: Vec<u64>,
    pre: Bound<(PreTag, u64)>,
    post: Bound<u64>,
    dev: Bound<u64>,
    local: Bound<Vec<LocalToken>>,
}

impl Key {
    /// Build the key.
    ///
    /// `pre`, `post`, and `dev` hold the numbers with implicit numbers already resolved to zero.
    pub(crate) fn new(
        epoch: u64,
        release: &[u64],
        pre: Option<(PreTag, u64)>,
        post: Option<u64>,
        dev: Option<u64>,
        local: Option<&str>,
    ) -> Self {
        let end = release.iter().rposition(|&n| n != 0).map_or(0, |i| i + 1);
        let release = release[..end].to_vec();

        // A dev release of the final release sorts before any of its pre-releases.
        let pre = match (pre, post, dev) {
            (None, None, Some(_)) => Bound::NegInf,
            (None, _, _) => Bound::PosInf,
            (Some((tag, number)), _, _) => Bound::Value((tag.normalize(), number)),
        };

        let post = post.map_or(Bound::NegInf, Bound::Value);
        let dev = dev.map_or(Bound::PosInf, Bound::Value);
        let local = local.map_or(Bound::NegInf, |local| Bound::Value(local_tokens(local)));

        Self {
            epoch,
            release,
            pre,
            post,
            dev,
            local,
        }
    }
}
