//! Multi-word token resolution
//!
//! Contractions such as German `zum` (`zu` + `dem`) or French `au` are split
//! by UD parsers into grammatical words that have no character range of
//! their own. Each word is anchored to the range of its container and keeps
//! its own surface text in `form`.

use serde::{Deserialize, Serialize};

use crate::adapter::{MwtRole, RawToken};
use crate::error::AdapterError;
use crate::model::{Offset, Token};
use crate::offset::OffsetConverter;

/// What happens to the multi-word token container itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MwtContainerPolicy {
    /// Drop containers: no id, no token, no dependency
    #[default]
    Omit,
    /// Emit an anchor token carrying only offsets; it takes an id but never
    /// receives a dependency
    Emit,
}

impl std::str::FromStr for MwtContainerPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "omit" => Ok(MwtContainerPolicy::Omit),
            "emit" => Ok(MwtContainerPolicy::Emit),
            other => Err(format!("unknown container policy: {other}")),
        }
    }
}

/// Placement of one raw token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedToken {
    /// Role reported by the adapter
    pub role: MwtRole,
    /// Codepoint range relative to the span text
    pub offset: Offset,
    /// Surface override for multi-word parts
    pub form: Option<String>,
}

impl ResolvedToken {
    /// Whether the token receives a dependency edge
    pub fn is_word(&self) -> bool {
        self.role != MwtRole::IsMwt
    }
}

/// Classifies raw tokens and computes their canonical offsets
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiWordTokenResolver {
    policy: MwtContainerPolicy,
}

impl MultiWordTokenResolver {
    /// Create a resolver
    pub fn new(policy: MwtContainerPolicy) -> Self {
        Self { policy }
    }

    /// Container policy in effect
    pub fn policy(&self) -> MwtContainerPolicy {
        self.policy
    }

    /// Place `token` inside the span described by `converter`.
    ///
    /// Returns `Ok(None)` for containers dropped by the policy.
    pub fn resolve<T: RawToken>(
        &self,
        token: &T,
        converter: &OffsetConverter<'_>,
    ) -> Result<Option<ResolvedToken>, AdapterError> {
        let role = token.mwt_role();
        let (range, form) = match role {
            MwtRole::NotMwt => (token.char_range(), None),
            MwtRole::PartOfMwt => (
                token.container_range(),
                Some(token.surface_text().to_string()),
            ),
            MwtRole::IsMwt => {
                if self.policy == MwtContainerPolicy::Omit {
                    return Ok(None);
                }
                (token.char_range(), None)
            }
        };

        let range = range.ok_or_else(|| AdapterError::MissingRange {
            form: token.surface_text().to_string(),
        })?;

        Ok(Some(ResolvedToken {
            role,
            offset: converter.convert_offset(range)?,
            form,
        }))
    }

    /// Build the canonical token for a resolved raw token.
    ///
    /// `base` is the codepoint offset of the span within the document.
    pub fn to_token<T: RawToken>(
        &self,
        raw: &T,
        resolved: &ResolvedToken,
        id: usize,
        base: usize,
    ) -> Token {
        let offset = resolved.offset.shift(base);
        if resolved.role == MwtRole::IsMwt {
            return Token::anchor(offset, id);
        }

        Token {
            pos: raw.pos_coarse().map(str::to_string),
            tag: raw.pos_fine().map(str::to_string),
            lemma: raw.lemma().map(str::to_string),
            morph: raw.morphology(),
            form: resolved.form.clone(),
            ..Token::anchor(offset, id)
        }
    }
}
