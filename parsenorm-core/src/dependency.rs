//! Head resolution and edge construction

use tracing::warn;

use crate::adapter::{Head, RawToken, RelationCasing};
use crate::error::AdapterError;
use crate::ids::{TokenIdAllocator, TokenKey};
use crate::model::{Dependency, Offset, ROOT_RELATION};

/// Relation used for non-root edges that a backend labelled as root
pub const FALLBACK_RELATION: &str = "dep";

/// Where head references of one raw sentence are looked up
#[derive(Debug, Clone, Copy)]
pub struct HeadScope<'a> {
    /// Index of the span the sentence was parsed in
    pub span: usize,
    /// Ids of the raw sentence's words in order, containers excluded
    pub words: &'a [usize],
    /// First id allocated for the logical sentence
    pub first_id: usize,
    /// Ids registered so far
    pub ids: &'a TokenIdAllocator,
}

impl HeadScope<'_> {
    fn lookup(&self, head: Head) -> Option<usize> {
        let id = match head {
            Head::Root => return None,
            Head::Position(k) => *self.words.get(k.checked_sub(1)?)?,
            Head::Token(handle) => self.ids.get(&TokenKey::new(self.span, handle))?,
        };
        (id >= self.first_id).then_some(id)
    }
}

/// Maps raw heads to canonical governor ids and cases relation labels
#[derive(Debug, Clone)]
pub struct DependencyNormalizer {
    casing: RelationCasing,
    flavor: String,
}

impl DependencyNormalizer {
    /// Create a normalizer
    pub fn new(casing: RelationCasing, flavor: impl Into<String>) -> Self {
        Self {
            casing,
            flavor: flavor.into(),
        }
    }

    /// Flavor attached to every edge
    pub fn flavor(&self) -> &str {
        &self.flavor
    }

    /// Resolve the governor and relation of `token`, whose id is `dependent`.
    ///
    /// Root heads and heads pointing at the token itself yield
    /// `(dependent, "root")`.
    pub fn resolve_head<T: RawToken>(
        &self,
        token: &T,
        dependent: usize,
        scope: &HeadScope<'_>,
    ) -> Result<(usize, String), AdapterError> {
        let head = token.head();
        let governor = if head.is_root() || head == Head::Token(token.handle()) {
            dependent
        } else {
            scope
                .lookup(head)
                .ok_or_else(|| AdapterError::DanglingHead {
                    form: token.surface_text().to_string(),
                })?
        };

        if governor == dependent {
            return Ok((dependent, ROOT_RELATION.to_string()));
        }

        let relation = self.casing.apply(token.relation());
        if relation.eq_ignore_ascii_case(ROOT_RELATION) {
            warn!(
                dependent,
                governor,
                "relabelling non-root edge '{}' as '{}'",
                relation,
                FALLBACK_RELATION
            );
            return Ok((governor, FALLBACK_RELATION.to_string()));
        }

        Ok((governor, relation))
    }

    /// Resolve the head of `token` and build its edge
    pub fn edge<T: RawToken>(
        &self,
        token: &T,
        dependent: usize,
        offset: Offset,
        scope: &HeadScope<'_>,
    ) -> Result<Dependency, AdapterError> {
        let (governor, relation) = self.resolve_head(token, dependent, scope)?;
        Ok(Dependency {
            begin: offset.begin,
            end: offset.end,
            governor,
            dependent,
            relation,
            flavor: self.flavor.clone(),
        })
    }
}
