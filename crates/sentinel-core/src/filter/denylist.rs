use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// How incoming method names are compared against the denylist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// Lower-case and trim surrounding whitespace on both sides before comparing.
    #[default]
    Normalized,

    /// Byte-for-byte comparison.
    Exact,
}

impl MatchPolicy {
    /// Applies the policy to a method name.
    ///
    /// Borrows when no rewrite is needed, which is always the case for [`MatchPolicy::Exact`]
    /// and for already-canonical names under [`MatchPolicy::Normalized`].
    #[must_use]
    pub fn normalize<'a>(&self, method: &'a str) -> Cow<'a, str> {
        match self {
            Self::Exact => Cow::Borrowed(method),
            Self::Normalized => {
                let trimmed = method.trim();
                if trimmed.chars().any(|c| c.to_lowercase().next() != Some(c)) {
                    Cow::Owned(trimmed.to_lowercase())
                } else {
                    Cow::Borrowed(trimmed)
                }
            }
        }
    }
}

impl std::fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normalized => f.write_str("normalized"),
            Self::Exact => f.write_str("exact"),
        }
    }
}

/// Immutable set of denylisted method names.
///
/// Entries are stored already normalized under the set's [`MatchPolicy`], so a lookup only
/// normalizes the incoming name.
#[derive(Debug, Clone)]
pub struct Denylist {
    methods: AHashSet<String>,
    policy: MatchPolicy,
}

impl Denylist {
    /// Builds the set from configured method names.
    pub fn new<I, S>(methods: I, policy: MatchPolicy) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let methods =
            methods.into_iter().map(|m| policy.normalize(m.as_ref()).into_owned()).collect();
        Self { methods, policy }
    }

    /// Returns `true` if `method` is denylisted under this set's policy.
    #[inline]
    #[must_use]
    pub fn contains(&self, method: &str) -> bool {
        self.methods.contains(self.policy.normalize(method).as_ref())
    }

    #[must_use]
    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Number of distinct entries after normalization.
    #[must_use]
    pub fn distinct_methods(&self) -> usize {
        self.methods.len()
    }
}
