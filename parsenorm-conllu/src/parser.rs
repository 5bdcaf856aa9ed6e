//! CoNLL-U reader
//!
//! Reads the ten-column format written by UD parsers:
//!
//! ```text
//! # newdoc
//! # text = Er geht zum Bahnhof.
//! 1     Er       er       PRON  PPER   Case=Nom  2  nsubj  _  _
//! 2     geht     gehen    VERB  VVFIN  _         0  root   _  _
//! 3-4   zum      _        _     _      _         _  _      _  _
//! 3     zu       zu       ADP   APPR   _         5  case   _  _
//! ...
//! ```
//!
//! Multi-word ranges (`3-4`) precede the words they cover. Empty nodes
//! (`8.1`) belong to enhanced graphs and are skipped. `_` marks an absent
//! value.

use std::collections::BTreeMap;

use parsenorm_core::{parse_ud_features, Morphology};

use crate::error::{ConlluError, Result};

/// One syntactic word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConlluWord {
    /// 1-based position in the sentence
    pub id: usize,
    /// Surface form
    pub form: String,
    /// Lemma
    pub lemma: Option<String>,
    /// Universal part-of-speech tag
    pub upos: Option<String>,
    /// Language-specific tag
    pub xpos: Option<String>,
    /// Morphological features
    pub feats: Option<Morphology>,
    /// Head position, `Some(0)` for the root, `None` when unannotated
    pub head: Option<usize>,
    /// Relation to the head
    pub deprel: Option<String>,
    /// MISC attributes
    pub misc: Misc,
    /// 1-based line number in the input
    pub line: usize,
}

/// Multi-word token line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiWordRange {
    /// First word id covered
    pub first: usize,
    /// Last word id covered
    pub last: usize,
    /// Surface form of the whole token
    pub form: String,
    /// MISC attributes
    pub misc: Misc,
    /// 1-based line number in the input
    pub line: usize,
}

impl MultiWordRange {
    /// Whether word `id` lies inside the range
    pub fn covers(&self, id: usize) -> bool {
        (self.first..=self.last).contains(&id)
    }
}

/// Token line in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Syntactic word
    Word(ConlluWord),
    /// Multi-word token
    Range(MultiWordRange),
}

/// MISC column as key/value pairs; flags without `=` map to an empty value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Misc(BTreeMap<String, String>);

impl Misc {
    fn parse(column: &str) -> Self {
        if column == "_" {
            return Self::default();
        }
        Self(
            column
                .split('|')
                .filter(|item| !item.is_empty())
                .map(|item| match item.split_once('=') {
                    Some((key, value)) => (key.to_string(), value.to_string()),
                    None => (item.to_string(), String::new()),
                })
                .collect(),
        )
    }

    /// Value of a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Character range from `start_char`/`end_char` or `TokenRange=b:e`
    pub fn char_range(&self) -> Option<(usize, usize)> {
        if let (Some(begin), Some(end)) = (self.get("start_char"), self.get("end_char")) {
            return Some((begin.parse().ok()?, end.parse().ok()?));
        }
        let (begin, end) = self.get("TokenRange")?.split_once(':')?;
        Some((begin.parse().ok()?, end.parse().ok()?))
    }

    /// Whether the token is followed by whitespace in the source text
    pub fn space_after(&self) -> bool {
        self.get("SpaceAfter") != Some("No")
    }
}

/// One sentence block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConlluSentence {
    /// `# sent_id` comment
    pub sent_id: Option<String>,
    /// `# text` comment
    pub text: Option<String>,
    /// Token lines in input order
    pub entries: Vec<Entry>,
}

impl ConlluSentence {
    /// Syntactic words, multi-word ranges skipped
    pub fn words(&self) -> impl Iterator<Item = &ConlluWord> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Word(word) => Some(word),
            Entry::Range(_) => None,
        })
    }

    /// The `# text` comment, or the text rebuilt from surface tokens
    pub fn surface_text(&self) -> String {
        if let Some(text) = &self.text {
            return text.clone();
        }

        let mut text = String::new();
        let mut covered_until = 0;
        for entry in &self.entries {
            let (form, misc) = match entry {
                Entry::Range(range) => {
                    covered_until = range.last;
                    (&range.form, &range.misc)
                }
                Entry::Word(word) if word.id > covered_until => (&word.form, &word.misc),
                Entry::Word(_) => continue,
            };
            text.push_str(form);
            if misc.space_after() {
                text.push(' ');
            }
        }
        text.truncate(text.trim_end().len());
        text
    }

    /// Line number of the first token line, 0 if there is none
    pub fn first_line(&self) -> usize {
        match self.entries.first() {
            Some(Entry::Word(word)) => word.line,
            Some(Entry::Range(range)) => range.line,
            None => 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sentences parsed together in one call to the parser
pub type SentenceGroup = Vec<ConlluSentence>;

/// Parsed CoNLL-U input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConlluDocument {
    /// Sentence groups in input order
    pub groups: Vec<SentenceGroup>,
    /// Whether the groups were delimited by `# newdoc` comments
    pub delimited: bool,
}

/// Parse CoNLL-U text into sentence groups.
///
/// Sentences are grouped by `# newdoc` comments. Without any such comment
/// every sentence forms its own group.
pub fn parse_str(input: &str) -> Result<Vec<SentenceGroup>> {
    Ok(parse_document(input)?.groups)
}

/// Parse CoNLL-U text, keeping track of document markers
pub fn parse_document(input: &str) -> Result<ConlluDocument> {
    let mut sentences: Vec<(bool, ConlluSentence)> = Vec::new();
    let mut current = ConlluSentence::default();
    let mut newdoc_pending = false;
    let mut saw_newdoc = false;

    let mut flush = |current: &mut ConlluSentence, newdoc_pending: &mut bool| {
        if !current.is_empty() {
            sentences.push((std::mem::take(newdoc_pending), std::mem::take(current)));
        }
    };

    for (index, raw_line) in input.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw_line.trim_end_matches('\r');

        if trimmed.trim().is_empty() {
            flush(&mut current, &mut newdoc_pending);
            current = ConlluSentence::default();
            continue;
        }

        if let Some(comment) = trimmed.strip_prefix('#') {
            let comment = comment.trim();
            if comment == "newdoc" || comment.starts_with("newdoc ") {
                flush(&mut current, &mut newdoc_pending);
                current = ConlluSentence::default();
                newdoc_pending = true;
                saw_newdoc = true;
            } else if let Some(value) = comment_value(comment, "text") {
                current.text = Some(value.to_string());
            } else if let Some(value) = comment_value(comment, "sent_id") {
                current.sent_id = Some(value.to_string());
            }
            continue;
        }

        if let Some(entry) = parse_token_line(trimmed, line)? {
            current.entries.push(entry);
        }
    }
    flush(&mut current, &mut newdoc_pending);

    if !saw_newdoc {
        return Ok(ConlluDocument {
            groups: sentences
                .into_iter()
                .map(|(_, sentence)| vec![sentence])
                .collect(),
            delimited: false,
        });
    }

    let mut groups: Vec<SentenceGroup> = Vec::new();
    for (starts_document, sentence) in sentences {
        match groups.last_mut() {
            Some(group) if !starts_document => group.push(sentence),
            _ => groups.push(vec![sentence]),
        }
    }
    Ok(ConlluDocument {
        groups,
        delimited: true,
    })
}

fn comment_value<'a>(comment: &'a str, key: &str) -> Option<&'a str> {
    let rest = comment.strip_prefix(key)?.trim_start();
    Some(rest.strip_prefix('=')?.trim())
}

fn optional(column: &str) -> Option<String> {
    (column != "_").then(|| column.to_string())
}

fn parse_token_line(line_text: &str, line: usize) -> Result<Option<Entry>> {
    let columns: Vec<&str> = line_text.split('\t').collect();
    if columns.len() != 10 {
        return Err(ConlluError::ColumnCount {
            line,
            found: columns.len(),
        });
    }

    let id = columns[0];
    let invalid_id = || ConlluError::InvalidId {
        line,
        value: id.to_string(),
    };

    if id.contains('.') {
        return Ok(None);
    }

    if let Some((first, last)) = id.split_once('-') {
        let first: usize = first.parse().map_err(|_| invalid_id())?;
        let last: usize = last.parse().map_err(|_| invalid_id())?;
        if first == 0 || first > last {
            return Err(invalid_id());
        }
        return Ok(Some(Entry::Range(MultiWordRange {
            first,
            last,
            form: columns[1].to_string(),
            misc: Misc::parse(columns[9]),
            line,
        })));
    }

    let id: usize = id.parse().map_err(|_| invalid_id())?;
    if id == 0 {
        return Err(invalid_id());
    }

    let head = match columns[6] {
        "_" => None,
        value => Some(value.parse().map_err(|_| ConlluError::InvalidHead {
            line,
            value: value.to_string(),
        })?),
    };

    Ok(Some(Entry::Word(ConlluWord {
        id,
        form: columns[1].to_string(),
        lemma: optional(columns[2]),
        upos: optional(columns[3]),
        xpos: optional(columns[4]),
        feats: parse_ud_features(columns[5]),
        head,
        deprel: optional(columns[7]),
        misc: Misc::parse(columns[9]),
        line,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZUM: &str = "# text = Er geht zum Bahnhof.\n\
        1\tEr\ter\tPRON\tPPER\tCase=Nom|Number=Sing\t2\tnsubj\t_\t_\n\
        2\tgeht\tgehen\tVERB\tVVFIN\t_\t0\troot\t_\t_\n\
        3-4\tzum\t_\t_\t_\t_\t_\t_\t_\t_\n\
        3\tzu\tzu\tADP\tAPPR\t_\t5\tcase\t_\t_\n\
        4\tdem\tder\tDET\tART\t_\t5\tdet\t_\t_\n\
        5\tBahnhof\tBahnhof\tNOUN\tNN\t_\t2\tobl\t_\tSpaceAfter=No\n\
        6\t.\t.\tPUNCT\t$.\t_\t2\tpunct\t_\t_\n";

    #[test]
    fn test_parse_words_and_ranges() {
        let groups = parse_str(ZUM).unwrap();
        assert_eq!(groups.len(), 1);
        let sentence = &groups[0][0];
        assert_eq!(sentence.text.as_deref(), Some("Er geht zum Bahnhof."));
        assert_eq!(sentence.entries.len(), 7);
        assert_eq!(sentence.words().count(), 6);

        match &sentence.entries[2] {
            Entry::Range(range) => {
                assert_eq!((range.first, range.last), (3, 4));
                assert_eq!(range.form, "zum");
                assert!(range.covers(4));
                assert!(!range.covers(5));
            }
            other => panic!("expected range, got {other:?}"),
        }

        let er = sentence.words().next().unwrap();
        assert_eq!(er.head, Some(2));
        assert_eq!(er.feats.as_ref().unwrap()["case"], "Nom");
        assert_eq!(er.lemma.as_deref(), Some("er"));
        assert_eq!(er.line, 2);
    }

    #[test]
    fn test_surface_text_without_comment() {
        let input = ZUM.lines().skip(1).collect::<Vec<_>>().join("\n");
        let groups = parse_str(&input).unwrap();
        assert_eq!(groups[0][0].surface_text(), "Er geht zum Bahnhof.");
    }

    #[test]
    fn test_sentences_without_newdoc_are_separate_groups() {
        let input = "1\tA\t_\t_\t_\t_\t0\troot\t_\t_\n\n1\tB\t_\t_\t_\t_\t0\troot\t_\t_\n";
        let document = parse_document(input).unwrap();
        assert!(!document.delimited);
        assert_eq!(document.groups.len(), 2);
        assert!(document.groups.iter().all(|group| group.len() == 1));
    }

    #[test]
    fn test_newdoc_groups_sentences() {
        let input = "# newdoc id = a\n\
            1\tA\t_\t_\t_\t_\t0\troot\t_\t_\n\n\
            1\tB\t_\t_\t_\t_\t0\troot\t_\t_\n\n\
            # newdoc\n\
            1\tC\t_\t_\t_\t_\t0\troot\t_\t_\n";
        let document = parse_document(input).unwrap();
        assert!(document.delimited);
        let groups = document.groups;
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[1].len(), 1);
    }

    #[test]
    fn test_empty_nodes_are_skipped() {
        let input = "1\tA\t_\t_\t_\t_\t0\troot\t_\t_\n1.1\tX\t_\t_\t_\t_\t_\t_\t0:root\t_\n";
        let groups = parse_str(input).unwrap();
        assert_eq!(groups[0][0].entries.len(), 1);
    }

    #[test]
    fn test_malformed_lines() {
        assert!(matches!(
            parse_str("1\tA\t_\n"),
            Err(ConlluError::ColumnCount { line: 1, found: 3 })
        ));
        assert!(matches!(
            parse_str("x\tA\t_\t_\t_\t_\t0\troot\t_\t_\n"),
            Err(ConlluError::InvalidId { line: 1, .. })
        ));
        assert!(matches!(
            parse_str("3-2\tA\t_\t_\t_\t_\t_\t_\t_\t_\n"),
            Err(ConlluError::InvalidId { .. })
        ));
        assert!(matches!(
            parse_str("1\tA\t_\t_\t_\t_\tfoo\troot\t_\t_\n"),
            Err(ConlluError::InvalidHead { line: 1, .. })
        ));
    }

    #[test]
    fn test_misc_ranges() {
        let stanza = Misc::parse("start_char=4|end_char=9");
        assert_eq!(stanza.char_range(), Some((4, 9)));
        let udpipe = Misc::parse("SpaceAfter=No|TokenRange=10:17");
        assert_eq!(udpipe.char_range(), Some((10, 17)));
        assert!(!udpipe.space_after());
        assert_eq!(Misc::parse("_").char_range(), None);
    }
}
