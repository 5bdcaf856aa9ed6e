//! Request orchestration
//!
//! A request moves through `Idle -> SpanLoop -> SentenceLoop -> Done`. Each
//! span is handed to the adapter, the raw sentences are merged into logical
//! sentences, and every logical sentence is validated and emitted on its own:
//! either all of its tokens and edges reach the response or none do.
//!
//! Failures are scoped. Bad caller offsets and configuration problems abort
//! the request; an adapter failure only costs the span or sentence it
//! happened in.

use serde::Serialize;
use tracing::{debug, error, info, trace};

use crate::adapter::{ParserAdapter, RawSentence, RawToken, SegmentationMode};
use crate::config::NormalizerConfig;
use crate::dependency::{DependencyNormalizer, HeadScope};
use crate::error::{AdapterError, NormalizeError, Result};
use crate::ids::{TokenIdAllocator, TokenKey};
use crate::merger::{LogicalSentence, SentenceContinuationMerger};
use crate::model::{Dependency, NormalizeRequest, NormalizeResponse, Offset, Token};
use crate::mwt::MultiWordTokenResolver;
use crate::offset::OffsetConverter;
use crate::validator::SentenceValidator;

/// Orchestrator state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Request received, spans not yet planned
    Idle,
    /// Iterating spans
    SpanLoop,
    /// Iterating the logical sentences of one span
    SentenceLoop,
    /// Response assembled
    Done,
    /// Request aborted
    Error,
}

/// Counters collected while normalizing one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct NormalizeStats {
    /// Spans the adapter returned sentences for
    pub spans_processed: usize,
    /// Spans skipped because the adapter failed
    pub spans_failed: usize,
    /// Logical sentences emitted
    pub sentences_emitted: usize,
    /// Logical sentences dropped by validation
    pub sentences_skipped: usize,
    /// Logical sentences dropped because of adapter errors
    pub sentences_failed: usize,
    /// Tokens emitted
    pub tokens: usize,
    /// Dependencies emitted
    pub dependencies: usize,
}

/// One unit of text handed to the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SpanPlan {
    /// Offset as given by the caller, `{0,0}` for the implicit whole-text span
    requested: Offset,
    /// Codepoint range of the span within the request text
    range: Offset,
}

/// Everything one logical sentence contributes to the response
struct StagedSentence {
    offset: Offset,
    tokens: Vec<Token>,
    dependencies: Vec<Dependency>,
}

/// Turns adapter output into the canonical response
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    /// Create a normalizer with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a normalizer with custom configuration
    pub fn with_config(config: NormalizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in effect
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize one request
    pub fn normalize<A: ParserAdapter>(
        &self,
        adapter: &mut A,
        request: &NormalizeRequest,
    ) -> Result<NormalizeResponse> {
        self.normalize_with_stats(adapter, request)
            .map(|(response, _)| response)
    }

    /// Normalize one request and report what was kept and dropped
    pub fn normalize_with_stats<A: ParserAdapter>(
        &self,
        adapter: &mut A,
        request: &NormalizeRequest,
    ) -> Result<(NormalizeResponse, NormalizeStats)> {
        let mut run = Run::new(self, adapter, request);
        match run.execute() {
            Ok(()) => Ok(run.finish()),
            Err(err) => {
                run.transition(State::Error);
                error!("normalization aborted: {}", err);
                Err(err)
            }
        }
    }
}

/// State of one request
struct Run<'n, 'r, A: ParserAdapter> {
    config: &'n NormalizerConfig,
    adapter: &'r mut A,
    request: &'r NormalizeRequest,
    caller: OffsetConverter<'r>,
    mode: SegmentationMode,
    validate: bool,
    resolver: MultiWordTokenResolver,
    dependencies: DependencyNormalizer,
    state: State,
    ids: TokenIdAllocator,
    response: NormalizeResponse,
    stats: NormalizeStats,
}

impl<'n, 'r, A: ParserAdapter> Run<'n, 'r, A> {
    fn new(normalizer: &'n Normalizer, adapter: &'r mut A, request: &'r NormalizeRequest) -> Self {
        let config = &normalizer.config;
        let mode = adapter.mode();
        let casing = adapter.relation_casing();

        Self {
            config,
            caller: OffsetConverter::new(&request.text, config.caller_offset_unit()),
            mode,
            validate: request
                .validate_sentences
                .unwrap_or(config.validate_sentences()),
            resolver: MultiWordTokenResolver::new(config.mwt_containers()),
            dependencies: DependencyNormalizer::new(casing, config.flavor()),
            state: State::Idle,
            ids: TokenIdAllocator::new(),
            response: NormalizeResponse::empty(mode.reports_sentences()),
            stats: NormalizeStats::default(),
            adapter,
            request,
        }
    }

    fn transition(&mut self, next: State) {
        trace!(from = ?self.state, to = ?next, "normalizer state");
        self.state = next;
    }

    fn execute(&mut self) -> Result<()> {
        let spans = self.plan_spans()?;

        self.transition(State::SpanLoop);
        for (index, span) in spans.iter().enumerate() {
            self.run_span(index, span)?;
            if self.state == State::SentenceLoop {
                self.transition(State::SpanLoop);
            }
        }

        if self.config.report_external_offsets() {
            self.externalize()?;
        }

        Ok(())
    }

    fn finish(mut self) -> (NormalizeResponse, NormalizeStats) {
        self.transition(State::Done);
        self.stats.tokens = self.response.tokens.len();
        self.stats.dependencies = self.response.dependencies.len();

        info!(
            language = %self.request.language,
            mode = %self.mode,
            spans = self.stats.spans_processed,
            spans_failed = self.stats.spans_failed,
            sentences = self.stats.sentences_emitted,
            skipped = self.stats.sentences_skipped,
            failed = self.stats.sentences_failed,
            tokens = self.stats.tokens,
            "normalized request"
        );

        (self.response, self.stats)
    }

    /// Choose the spans to parse, converting caller offsets to codepoints
    fn plan_spans(&self) -> Result<Vec<SpanPlan>> {
        let requested = match self.mode {
            SegmentationMode::CallerSupplied => match &self.request.sentences {
                Some(sentences) => sentences.clone(),
                None => {
                    return Err(NormalizeError::Configuration(
                        "this backend requires caller-supplied sentence offsets".into(),
                    ))
                }
            },
            SegmentationMode::Discover => {
                let sentences = self.request.sentences.as_deref().unwrap_or_default();
                let paragraphs = self.request.paragraphs.as_deref().unwrap_or_default();
                if !sentences.is_empty() {
                    sentences.to_vec()
                } else if !paragraphs.is_empty() {
                    paragraphs.to_vec()
                } else {
                    return Ok(vec![SpanPlan {
                        requested: Offset::new(0, 0),
                        range: Offset::new(0, self.caller.char_len()),
                    }]);
                }
            }
        };

        requested
            .into_iter()
            .map(|offset| {
                Ok(SpanPlan {
                    requested: offset,
                    range: self.caller.convert_offset(offset)?,
                })
            })
            .collect()
    }

    fn run_span(&mut self, index: usize, span: &SpanPlan) -> Result<()> {
        let request = self.request;
        let text = self.caller.slice(span.range)?;
        let language = request.language.as_str();

        let parsed = match self.mode {
            SegmentationMode::Discover => self.adapter.segment(text, language),
            SegmentationMode::CallerSupplied => self
                .adapter
                .parse_one_sentence(text, language)
                .map(|sentence| vec![sentence]),
        };

        let sentences = match parsed {
            Ok(sentences) => sentences,
            Err(err) => {
                error!(
                    span = index,
                    begin = span.requested.begin,
                    end = span.requested.end,
                    "skipping span: {}",
                    err
                );
                self.stats.spans_failed += 1;
                return Ok(());
            }
        };
        self.stats.spans_processed += 1;

        let local = OffsetConverter::new(text, self.adapter.offset_unit());
        self.transition(State::SentenceLoop);
        for sentence in SentenceContinuationMerger::merge(&sentences) {
            self.run_sentence(index, sentence, &local, span.range.begin);
        }

        Ok(())
    }

    fn run_sentence(
        &mut self,
        span: usize,
        sentence: LogicalSentence<'_, A::Sentence>,
        local: &OffsetConverter<'_>,
        base: usize,
    ) {
        if self.validate {
            let result = SentenceValidator::new(self.adapter.verb_tags()).check_logical(&sentence);
            if let Some(check) = result.failed_check() {
                debug!(
                    span,
                    check = check.name(),
                    fused = sentence.is_fused(),
                    "dropping sentence {:?}",
                    sentence.text()
                );
                self.stats.sentences_skipped += 1;
                return;
            }
        }

        let checkpoint = self.ids.checkpoint();
        match self.stage(span, sentence, local, base) {
            Ok(staged) => {
                if let Some(sentences) = self.response.sentences.as_mut() {
                    sentences.push(staged.offset);
                }
                self.response.tokens.extend(staged.tokens);
                self.response.dependencies.extend(staged.dependencies);
                self.stats.sentences_emitted += 1;
            }
            Err(err) => {
                self.ids.rollback(checkpoint);
                error!(span, "skipping sentence {:?}: {}", sentence.text(), err);
                self.stats.sentences_failed += 1;
            }
        }
    }

    /// Allocate ids and build tokens and edges without touching the response
    fn stage(
        &mut self,
        span: usize,
        sentence: LogicalSentence<'_, A::Sentence>,
        local: &OffsetConverter<'_>,
        base: usize,
    ) -> std::result::Result<StagedSentence, AdapterError> {
        let first_id = self.ids.next_id();
        let mut placed = Vec::new();
        let mut words = Vec::with_capacity(sentence.parts().len());

        for (part_index, part) in sentence.parts().iter().enumerate() {
            let mut part_words = Vec::new();
            for raw in part.tokens() {
                let Some(resolved) = self.resolver.resolve(raw, local)? else {
                    continue;
                };
                let id = self.ids.add(TokenKey::new(span, raw.handle()))?;
                if resolved.is_word() {
                    part_words.push(id);
                }
                placed.push((part_index, raw, resolved, id));
            }
            words.push(part_words);
        }

        let (first, last) = match (placed.first(), placed.last()) {
            (Some(first), Some(last)) => (first.2.offset, last.2.offset),
            _ => return Err(AdapterError::EmptySentence),
        };

        let mut tokens = Vec::with_capacity(placed.len());
        let mut dependencies = Vec::with_capacity(placed.len());
        for (part_index, raw, resolved, id) in &placed {
            tokens.push(self.resolver.to_token(*raw, resolved, *id, base));
            if !resolved.is_word() {
                continue;
            }
            let scope = HeadScope {
                span,
                words: &words[*part_index],
                first_id,
                ids: &self.ids,
            };
            dependencies.push(self.dependencies.edge(
                *raw,
                *id,
                resolved.offset.shift(base),
                &scope,
            )?);
        }

        Ok(StagedSentence {
            offset: Offset::new(first.begin, last.end).shift(base),
            tokens,
            dependencies,
        })
    }

    /// Rewrite every emitted offset in the caller's unit
    fn externalize(&mut self) -> Result<()> {
        let caller = &self.caller;
        if let Some(sentences) = self.response.sentences.as_mut() {
            for offset in sentences.iter_mut() {
                *offset = caller.externalize(*offset)?;
            }
        }
        for token in self.response.tokens.iter_mut() {
            let offset = caller.externalize(token.offset())?;
            token.begin = offset.begin;
            token.end = offset.end;
        }
        for dependency in self.response.dependencies.iter_mut() {
            let offset = caller.externalize(Offset::new(dependency.begin, dependency.end))?;
            dependency.begin = offset.begin;
            dependency.end = offset.end;
        }
        Ok(())
    }
}
