//! Parser adapter replaying pre-parsed CoNLL-U output

use std::collections::VecDeque;
use std::path::Path;

use parsenorm_core::{
    AdapterError, OffsetUnit, OwnedSentence, ParserAdapter, RelationCasing, SegmentationMode,
    VerbTags,
};
use tracing::debug;

use crate::align::Aligner;
use crate::error::{ConlluError, Result};
use crate::parser::{parse_document, SentenceGroup};

/// Adapter that answers each parse call with sentences of a CoNLL-U
/// document.
///
/// With `# newdoc` markers every parse call takes the next document. Without
/// them, [`SegmentationMode::Discover`] takes sentences until the span text
/// is used up, and [`SegmentationMode::CallerSupplied`] takes one sentence per
/// call. Either way the input must follow the order the normalizer visits
/// spans.
#[derive(Debug)]
pub struct ConlluAdapter {
    groups: VecDeque<SentenceGroup>,
    total_groups: usize,
    delimited: bool,
    mode: SegmentationMode,
    casing: RelationCasing,
    verb_tags: VerbTags,
    unit: OffsetUnit,
}

impl ConlluAdapter {
    /// Adapter with default settings over CoNLL-U text
    pub fn parse(input: &str) -> Result<Self> {
        ConlluAdapterBuilder::new().build(input)
    }

    /// Builder for customized adapters
    pub fn builder() -> ConlluAdapterBuilder {
        ConlluAdapterBuilder::new()
    }

    /// Sentence groups not yet handed out
    pub fn remaining(&self) -> usize {
        self.groups.len()
    }

    /// Sentence groups the document held
    pub fn total_groups(&self) -> usize {
        self.total_groups
    }

    fn next_group(&mut self) -> Result<SentenceGroup> {
        self.groups.pop_front().ok_or(ConlluError::Exhausted {
            groups: self.total_groups,
        })
    }

    /// Align undelimited sentences until only whitespace is left in `text`
    fn align_until_exhausted(
        &mut self,
        text: &str,
        language: &str,
    ) -> Result<Vec<OwnedSentence>> {
        let mut aligner = Aligner::new(text, self.unit);
        let mut sentences = Vec::new();

        while !aligner.is_exhausted() {
            for sentence in self.next_group()? {
                sentences.push(aligner.align_sentence(&sentence)?);
            }
        }
        debug!(
            "aligned {} undelimited sentences ({}) against {} characters",
            sentences.len(),
            language,
            text.chars().count()
        );

        Ok(sentences)
    }
}

impl ParserAdapter for ConlluAdapter {
    type Sentence = OwnedSentence;

    fn mode(&self) -> SegmentationMode {
        self.mode
    }

    fn segment(
        &mut self,
        text: &str,
        language: &str,
    ) -> std::result::Result<Vec<OwnedSentence>, AdapterError> {
        if !self.delimited && self.mode == SegmentationMode::Discover {
            return Ok(self.align_until_exhausted(text, language)?);
        }

        let group = self.next_group()?;
        debug!(
            "aligning {} sentences ({}) against {} characters",
            group.len(),
            language,
            text.chars().count()
        );

        Ok(Aligner::new(text, self.unit).align_group(&group)?)
    }

    fn verb_tags(&self) -> &VerbTags {
        &self.verb_tags
    }

    fn relation_casing(&self) -> RelationCasing {
        self.casing
    }

    fn offset_unit(&self) -> OffsetUnit {
        self.unit
    }
}

/// Builder for [`ConlluAdapter`]
#[derive(Debug, Default)]
pub struct ConlluAdapterBuilder {
    mode: Option<SegmentationMode>,
    relation_casing: Option<RelationCasing>,
    verb_tags: Option<VerbTags>,
    offset_unit: Option<OffsetUnit>,
}

impl ConlluAdapterBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the segmentation mode
    pub fn mode(mut self, mode: SegmentationMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set the relation casing
    pub fn relation_casing(mut self, casing: RelationCasing) -> Self {
        self.relation_casing = Some(casing);
        self
    }

    /// Set the tags counted as verbs
    pub fn verb_tags(mut self, tags: VerbTags) -> Self {
        self.verb_tags = Some(tags);
        self
    }

    /// Set the unit token ranges are reported in
    pub fn offset_unit(mut self, unit: OffsetUnit) -> Self {
        self.offset_unit = Some(unit);
        self
    }

    /// Build the adapter over CoNLL-U text
    pub fn build(self, input: &str) -> Result<ConlluAdapter> {
        let document = parse_document(input)?;
        let groups: VecDeque<SentenceGroup> = document.groups.into();
        debug!("loaded {} CoNLL-U sentence groups", groups.len());

        Ok(ConlluAdapter {
            total_groups: groups.len(),
            groups,
            delimited: document.delimited,
            mode: self.mode.unwrap_or_default(),
            casing: self.relation_casing.unwrap_or_default(),
            verb_tags: self.verb_tags.unwrap_or_default(),
            unit: self.offset_unit.unwrap_or_default(),
        })
    }

    /// Build the adapter over a CoNLL-U file
    pub fn build_from_path(self, path: impl AsRef<Path>) -> Result<ConlluAdapter> {
        let input = std::fs::read_to_string(path)?;
        self.build(&input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parsenorm_core::{Offset, RawSentence, RawToken};

    const TWO_DOCS: &str = "\
# newdoc
# text = Es regnet.
1\tEs\tes\tPRON\tPPER\t_\t2\texpl\t_\t_
2\tregnet\tregnen\tVERB\tVVFIN\t_\t0\troot\t_\tSpaceAfter=No
3\t.\t.\tPUNCT\t$.\t_\t2\tpunct\t_\t_

# newdoc
1\tJa\tja\tINTJ\tITJ\t_\t0\troot\t_\t_
";

    #[test]
    fn test_groups_are_consumed_in_order() {
        let mut adapter = ConlluAdapter::parse(TWO_DOCS).unwrap();
        assert_eq!(adapter.total_groups(), 2);

        let first = adapter.segment("Es regnet.", "de").unwrap();
        assert_eq!(first[0].text(), "Es regnet.");
        assert_eq!(adapter.remaining(), 1);

        let second = adapter.segment("Ja", "de").unwrap();
        assert_eq!(second[0].tokens().len(), 1);

        let exhausted = adapter.segment("mehr", "de");
        assert!(matches!(exhausted, Err(AdapterError::Backend(_))));
    }

    #[test]
    fn test_undelimited_sentences_fill_the_span() {
        let input = "\
1\tEs\tes\tPRON\tPPER\t_\t2\texpl\t_\t_
2\tregnet\tregnen\tVERB\tVVFIN\t_\t0\troot\t_\tSpaceAfter=No
3\t.\t.\tPUNCT\t$.\t_\t2\tpunct\t_\t_

1\tJa\tja\tINTJ\tITJ\t_\t0\troot\t_\tSpaceAfter=No
2\t!\t!\tPUNCT\t$.\t_\t1\tpunct\t_\t_

1\tNein\tnein\tINTJ\tITJ\t_\t0\troot\t_\t_
";
        let mut adapter = ConlluAdapter::parse(input).unwrap();

        let first = adapter.segment("Es regnet. Ja! ", "de").unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first[1].text(), "Ja!");
        assert_eq!(first[1].tokens()[0].char_range(), Some(Offset::new(11, 13)));
        assert_eq!(adapter.remaining(), 1);

        let second = adapter.segment("Nein", "de").unwrap();
        assert_eq!(second[0].text(), "Nein");

        assert!(adapter.segment("   ", "de").unwrap().is_empty());
        assert!(matches!(
            adapter.segment("Doch", "de"),
            Err(AdapterError::Backend(_))
        ));
    }

    #[test]
    fn test_builder_settings() {
        let adapter = ConlluAdapter::builder()
            .mode(SegmentationMode::CallerSupplied)
            .relation_casing(RelationCasing::Lower)
            .verb_tags(VerbTags::penn_treebank())
            .offset_unit(OffsetUnit::Utf16)
            .build(TWO_DOCS)
            .unwrap();

        assert_eq!(adapter.mode(), SegmentationMode::CallerSupplied);
        assert_eq!(adapter.relation_casing(), RelationCasing::Lower);
        assert!(adapter.verb_tags().contains("VBZ"));
        assert_eq!(adapter.offset_unit(), OffsetUnit::Utf16);
    }

    #[test]
    fn test_default_settings() {
        let adapter = ConlluAdapter::parse("").unwrap();
        assert_eq!(adapter.mode(), SegmentationMode::Discover);
        assert_eq!(adapter.offset_unit(), OffsetUnit::Codepoint);
        assert_eq!(adapter.remaining(), 0);
    }
}
