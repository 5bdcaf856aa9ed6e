//! Alignment of CoNLL-U tokens with the text they were parsed from
//!
//! CoNLL-U carries no offsets of its own. Stanza writes `start_char` and
//! `end_char` into MISC, UDPipe writes `TokenRange`; both count codepoints
//! from the start of the parsed text. Tokens without either are located by
//! skipping whitespace and matching the surface form at the cursor.

use parsenorm_core::{
    Head, Offset, OffsetConverter, OffsetUnit, OwnedSentence, OwnedToken, TokenHandle,
};
use tracing::trace;

use crate::error::{ConlluError, Result};
use crate::parser::{ConlluSentence, ConlluWord, Entry, Misc, MultiWordRange};

/// Relation given to words whose DEPREL column is empty
pub const UNLABELLED_RELATION: &str = "dep";

/// Walks a text left to right, handing out token ranges
#[derive(Debug)]
pub struct Aligner<'t> {
    text: &'t str,
    converter: OffsetConverter<'t>,
    /// Cursor as codepoint index
    cursor: usize,
    next_handle: usize,
    misc_offsets: bool,
}

impl<'t> Aligner<'t> {
    /// Align against `text`, reporting ranges in `unit`
    pub fn new(text: &'t str, unit: OffsetUnit) -> Self {
        Self {
            text,
            converter: OffsetConverter::new(text, unit),
            cursor: 0,
            next_handle: 0,
            misc_offsets: true,
        }
    }

    /// Locate every token by its surface form, ignoring MISC ranges
    pub fn without_misc_offsets(mut self) -> Self {
        self.misc_offsets = false;
        self
    }

    /// Whether only whitespace is left after the cursor
    pub fn is_exhausted(&self) -> bool {
        self.converter
            .internal_to_byte(self.cursor)
            .map_or(true, |byte| self.text[byte..].trim().is_empty())
    }

    /// Convert the sentences of one parser call
    pub fn align_group(mut self, sentences: &[ConlluSentence]) -> Result<Vec<OwnedSentence>> {
        sentences
            .iter()
            .map(|sentence| self.align_sentence(sentence))
            .collect()
    }

    /// Convert one sentence, continuing where the previous one ended
    pub fn align_sentence(&mut self, sentence: &ConlluSentence) -> Result<OwnedSentence> {
        let mut tokens = Vec::with_capacity(sentence.entries.len());
        let mut container: Option<(&MultiWordRange, Offset)> = None;
        let mut first_char = None;

        for entry in &sentence.entries {
            match entry {
                Entry::Range(range) => {
                    let (internal, external) = self.locate(&range.form, &range.misc, range.line)?;
                    first_char.get_or_insert(internal.begin);
                    let mut token = OwnedToken::new(self.handle(), range.form.as_str())
                        .as_mwt_container();
                    token.range = Some(external);
                    tokens.push(token);
                    container = Some((range, external));
                }
                Entry::Word(word) => {
                    let part_of = container.filter(|(range, _)| range.covers(word.id));
                    let mut token = self.word_token(word);
                    match part_of {
                        Some((range, external)) => {
                            token = token.as_mwt_part(external);
                            if word.id == range.last {
                                container = None;
                            }
                        }
                        None => {
                            container = None;
                            let (internal, external) = self.locate(&word.form, &word.misc, word.line)?;
                            first_char.get_or_insert(internal.begin);
                            token.range = Some(external);
                        }
                    }
                    tokens.push(token);
                }
            }
        }

        let text = match first_char {
            Some(begin) => {
                let end = self.cursor;
                self.converter
                    .slice(Offset::new(begin, end))
                    .map_err(|_| ConlluError::RangeOutOfText {
                        line: sentence.first_line(),
                        begin,
                        end,
                    })?
                    .to_string()
            }
            None => sentence.surface_text(),
        };
        trace!(tokens = tokens.len(), "aligned sentence {:?}", text);

        Ok(OwnedSentence::new(text, tokens))
    }

    fn handle(&mut self) -> TokenHandle {
        let handle = TokenHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    fn word_token(&mut self, word: &ConlluWord) -> OwnedToken {
        let head = match word.head {
            None | Some(0) => Head::Root,
            Some(position) => Head::Position(position),
        };
        let mut token = OwnedToken::new(self.handle(), word.form.as_str()).with_head(
            head,
            word.deprel.as_deref().unwrap_or(UNLABELLED_RELATION),
        );
        token.upos = word.upos.clone();
        token.xpos = word.xpos.clone();
        token.lemma = word.lemma.clone();
        token.feats = word.feats.clone();
        token
    }

    /// Codepoint range and unit range of the next token
    fn locate(&mut self, form: &str, misc: &Misc, line: usize) -> Result<(Offset, Offset)> {
        let ranges = if self.misc_offsets {
            misc.char_range()
        } else {
            None
        };
        let internal = match ranges {
            Some((begin, end)) => {
                if begin > end || end > self.converter.char_len() {
                    return Err(ConlluError::RangeOutOfText { line, begin, end });
                }
                Offset::new(begin, end)
            }
            None => self.find(form, line)?,
        };

        self.cursor = self.cursor.max(internal.end);
        let external = self
            .converter
            .externalize(internal)
            .map_err(|_| ConlluError::RangeOutOfText {
                line,
                begin: internal.begin,
                end: internal.end,
            })?;
        Ok((internal, external))
    }

    fn find(&self, form: &str, line: usize) -> Result<Offset> {
        let alignment_error = || ConlluError::Alignment {
            line,
            form: form.to_string(),
            position: self.cursor,
        };

        let start_byte = self
            .converter
            .internal_to_byte(self.cursor)
            .map_err(|_| alignment_error())?;
        let rest = &self.text[start_byte..];
        let trimmed = rest.trim_start();
        if form.is_empty() || !trimmed.starts_with(form) {
            return Err(alignment_error());
        }

        let skipped = rest[..rest.len() - trimmed.len()].chars().count();
        let begin = self.cursor + skipped;
        Ok(Offset::new(begin, begin + form.chars().count()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;
    use parsenorm_core::{MwtRole, RawSentence, RawToken};

    fn group(input: &str) -> Vec<ConlluSentence> {
        parse_str(input).unwrap().remove(0)
    }

    #[test]
    fn test_alignment_by_surface_form() {
        let sentences = group(
            "1\tDie\t_\tDET\t_\t_\t2\tdet\t_\t_\n\
             2\tKatze\t_\tNOUN\t_\t_\t3\tnsubj\t_\t_\n\
             3\tschläft\t_\tVERB\t_\t_\t0\troot\t_\tSpaceAfter=No\n\
             4\t.\t_\tPUNCT\t_\t_\t3\tpunct\t_\t_\n",
        );
        let aligned = Aligner::new("  Die Katze schläft.", OffsetUnit::Codepoint)
            .align_group(&sentences)
            .unwrap();

        let sentence = &aligned[0];
        assert_eq!(sentence.text(), "Die Katze schläft.");
        let ranges: Vec<_> = sentence.tokens().iter().map(|t| t.char_range()).collect();
        assert_eq!(
            ranges,
            vec![
                Some(Offset::new(2, 5)),
                Some(Offset::new(6, 11)),
                Some(Offset::new(12, 19)),
                Some(Offset::new(19, 20)),
            ]
        );
        assert_eq!(sentence.tokens()[0].head(), Head::Position(2));
        assert_eq!(sentence.tokens()[2].head(), Head::Root);
    }

    #[test]
    fn test_multi_word_parts_get_container_range() {
        let sentences = group(
            "1\tEr\t_\tPRON\t_\t_\t2\tnsubj\t_\t_\n\
             2\tgeht\t_\tVERB\t_\t_\t0\troot\t_\t_\n\
             3-4\tzum\t_\t_\t_\t_\t_\t_\t_\t_\n\
             3\tzu\t_\tADP\t_\t_\t5\tcase\t_\t_\n\
             4\tdem\t_\tDET\t_\t_\t5\tdet\t_\t_\n\
             5\tBahnhof\t_\tNOUN\t_\t_\t2\tobl\t_\t_\n",
        );
        let aligned = Aligner::new("Er geht zum Bahnhof", OffsetUnit::Codepoint)
            .align_group(&sentences)
            .unwrap();
        let tokens = aligned[0].tokens();

        assert_eq!(tokens[2].mwt_role(), MwtRole::IsMwt);
        assert_eq!(tokens[2].char_range(), Some(Offset::new(8, 11)));
        assert_eq!(tokens[3].mwt_role(), MwtRole::PartOfMwt);
        assert_eq!(tokens[3].container_range(), Some(Offset::new(8, 11)));
        assert_eq!(tokens[4].surface_text(), "dem");
        assert_eq!(tokens[5].mwt_role(), MwtRole::NotMwt);
        assert_eq!(tokens[5].char_range(), Some(Offset::new(12, 19)));
    }

    #[test]
    fn test_misc_offsets_take_precedence() {
        let sentences = group(
            "1\tHi\t_\tINTJ\t_\t_\t0\troot\t_\tstart_char=3|end_char=5\n\
             2\t!\t_\tPUNCT\t_\t_\t1\tpunct\t_\tTokenRange=5:6\n",
        );
        let aligned = Aligner::new("Hi Hi!", OffsetUnit::Codepoint)
            .align_group(&sentences)
            .unwrap();
        assert_eq!(aligned[0].tokens()[0].char_range(), Some(Offset::new(3, 5)));
        assert_eq!(aligned[0].text(), "Hi!");
    }

    #[test]
    fn test_document_offsets_can_be_ignored() {
        let sentences = group(
            "1\tJa\t_\tINTJ\t_\t_\t0\troot\t_\tstart_char=11|end_char=13|SpaceAfter=No\n\
             2\t.\t_\tPUNCT\t_\t_\t1\tpunct\t_\tstart_char=13|end_char=14\n",
        );
        let aligned = Aligner::new("Ja.", OffsetUnit::Codepoint)
            .without_misc_offsets()
            .align_group(&sentences)
            .unwrap();
        assert_eq!(aligned[0].text(), "Ja.");
        assert_eq!(aligned[0].tokens()[1].char_range(), Some(Offset::new(2, 3)));

        let strict = Aligner::new("Ja.", OffsetUnit::Codepoint).align_group(&sentences);
        assert!(matches!(strict, Err(ConlluError::RangeOutOfText { .. })));
    }

    #[test]
    fn test_exhaustion_ignores_trailing_whitespace() {
        let sentences = group("1\tJa\t_\tINTJ\t_\t_\t0\troot\t_\t_\n");
        let mut aligner = Aligner::new(" Ja \n", OffsetUnit::Codepoint);
        assert!(!aligner.is_exhausted());
        aligner.align_sentence(&sentences[0]).unwrap();
        assert!(aligner.is_exhausted());
    }

    #[test]
    fn test_ranges_in_utf16() {
        let sentences = group(
            "1\t😀\t_\tSYM\t_\t_\t2\tdep\t_\t_\n\
             2\tgut\t_\tADJ\t_\t_\t0\troot\t_\t_\n",
        );
        let aligned = Aligner::new("😀 gut", OffsetUnit::Utf16)
            .align_group(&sentences)
            .unwrap();
        let tokens = aligned[0].tokens();
        assert_eq!(tokens[0].char_range(), Some(Offset::new(0, 2)));
        assert_eq!(tokens[1].char_range(), Some(Offset::new(3, 6)));
    }

    #[test]
    fn test_handles_are_unique_across_the_group() {
        let sentences = parse_str(
            "# newdoc\n1\tA.\t_\t_\t_\t_\t0\troot\t_\t_\n\n1\tB.\t_\t_\t_\t_\t0\troot\t_\t_\n",
        )
        .unwrap()
        .remove(0);
        let aligned = Aligner::new("A. B.", OffsetUnit::Codepoint)
            .align_group(&sentences)
            .unwrap();
        assert_eq!(aligned.len(), 2);
        assert_eq!(aligned[0].tokens()[0].handle(), TokenHandle(0));
        assert_eq!(aligned[1].tokens()[0].handle(), TokenHandle(1));
        assert_eq!(aligned[1].text(), "B.");
    }

    #[test]
    fn test_misaligned_form() {
        let sentences = group("1\tHallo\t_\t_\t_\t_\t0\troot\t_\t_\n");
        let result = Aligner::new("Hello", OffsetUnit::Codepoint).align_group(&sentences);
        assert!(matches!(
            result,
            Err(ConlluError::Alignment { line: 1, position: 0, .. })
        ));
    }
}
