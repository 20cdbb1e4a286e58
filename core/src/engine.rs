// core/src/engine.rs
//
// Candidate engine: composition buffer, input mode and the segmentation
// search that turns a typed code into ranked transcriptions.

use std::collections::HashMap;
use std::sync::Arc;

use crate::candidate::CandidateRecord;
use crate::input_buffer::InputBuffer;
use crate::lexicon::Dictionary;
use crate::segmentation::Partitions;
use crate::tone::tone_digits;
use crate::utf8::decode_lenient;
use crate::Config;

/// Input mode of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Keys are echoed as typed; no candidates are produced.
    Literal,
    /// Keys are collected as codes and transcribed through the dictionary.
    #[default]
    Transliterate,
}

/// Candidate engine bound to one shared dictionary.
///
/// The engine owns the composition buffer of a single input session. The
/// dictionary is shared read-only through `Arc`, so many engines can use the
/// same loaded schemes. An engine created with [`Engine::detached`] has no
/// dictionary and answers every query with an empty result.
#[derive(Debug, Clone)]
pub struct Engine {
    dict: Option<Arc<Dictionary>>,
    buffer: InputBuffer,
    mode: Mode,
    config: Config,
}

impl Engine {
    /// Create an engine in `Transliterate` mode with default limits.
    pub fn new(dict: Arc<Dictionary>) -> Self {
        Self {
            dict: Some(dict),
            buffer: InputBuffer::new(),
            mode: Mode::default(),
            config: Config::default(),
        }
    }

    /// Create an engine with no dictionary bound.
    pub fn detached() -> Self {
        Self {
            dict: None,
            buffer: InputBuffer::new(),
            mode: Mode::default(),
            config: Config::default(),
        }
    }

    /// Replace the search limits.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Feed one typed character.
    ///
    /// In `Literal` mode the character is appended for the caller to echo.
    /// In `Transliterate` mode a space leaves the buffer alone (it is the
    /// caller's "commit first candidate" key) and anything else is appended.
    /// Returns `true` when the caller should refresh; `false` only when a
    /// non-ASCII character was refused.
    pub fn input_char(&mut self, c: char) -> bool {
        match self.mode {
            Mode::Literal => self.buffer.push(c),
            Mode::Transliterate if c == ' ' => true,
            Mode::Transliterate => self.buffer.push(c),
        }
    }

    /// Remove the last typed character, if any.
    pub fn delete_last_char(&mut self) {
        self.buffer.pop();
    }

    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
    }

    /// Switch between `Literal` and `Transliterate`; the buffer is cleared.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            Mode::Literal => Mode::Transliterate,
            Mode::Transliterate => Mode::Literal,
        };
        self.buffer.clear();
    }

    pub fn buffer(&self) -> &str {
        self.buffer.text()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Ranked transcriptions of the current buffer.
    pub fn candidates(&self) -> Vec<String> {
        self.candidate_records()
            .into_iter()
            .map(|r| r.output)
            .collect()
    }

    /// Ranked candidates of the current buffer with their ranking counters.
    pub fn candidate_records(&self) -> Vec<CandidateRecord> {
        if self.mode == Mode::Literal {
            return Vec::new();
        }
        self.rank(self.buffer.text())
    }

    /// Rank an arbitrary code against the bound dictionary without touching
    /// the buffer or looking at the mode. A code that is not pure ASCII only
    /// gets the exact step.
    pub fn rank(&self, code: &str) -> Vec<CandidateRecord> {
        match &self.dict {
            Some(dict) => Ranker {
                dict,
                config: &self.config,
            }
            .rank(code),
            None => Vec::new(),
        }
    }

    /// Commit the candidate at `index` of the current candidate list.
    ///
    /// Returns the chosen text and clears the buffer. An out of range index
    /// or a missing dictionary returns an empty string and changes nothing.
    pub fn choose_candidate(&mut self, index: usize) -> String {
        if self.dict.is_none() {
            return String::new();
        }
        match self.candidates().into_iter().nth(index) {
            Some(chosen) => {
                self.buffer.clear();
                chosen
            }
            None => String::new(),
        }
    }

    /// Commit entry `index` of `listed`, a candidate list the caller already
    /// computed for the current buffer. Same contract as
    /// [`Engine::choose_candidate`] without re-running the search.
    pub(crate) fn commit_listed(&mut self, listed: &[String], index: usize) -> Option<String> {
        if self.dict.is_none() {
            return None;
        }
        let chosen = listed.get(index)?.clone();
        self.buffer.clear();
        Some(chosen)
    }
}

/// Best record seen per distinct output.
#[derive(Debug, Default)]
struct Pool {
    best: HashMap<String, CandidateRecord>,
}

impl Pool {
    fn offer(&mut self, record: CandidateRecord) {
        match self.best.get_mut(&record.output) {
            Some(existing) => {
                if record.outranks(existing) {
                    *existing = record;
                }
            }
            None => {
                self.best.insert(record.output.clone(), record);
            }
        }
    }

    fn len(&self) -> usize {
        self.best.len()
    }

    /// Sort, then cap at `limit`. Outputs named in `pinned` that would be
    /// cut replace the last kept entries, earlier pins first.
    fn finish(self, limit: usize, pinned: &[String]) -> Vec<CandidateRecord> {
        let limit = limit.max(1);
        let mut records: Vec<CandidateRecord> = self.best.into_values().collect();
        records.sort_by(CandidateRecord::display_cmp);

        if records.len() > limit {
            let mut rescued = Vec::new();
            for output in pinned {
                if rescued.len() == limit {
                    break;
                }
                if let Some(pos) = records[limit..].iter().position(|r| &r.output == output) {
                    rescued.push(records.remove(limit + pos));
                }
            }
            records.truncate(limit - rescued.len());
            rescued.sort_by(CandidateRecord::display_cmp);
            records.extend(rescued);
        }
        records
    }
}

/// One dictionary value chosen for one part of a partition.
struct Choice<'d> {
    text: &'d str,
    converted: bool,
}

/// Per-part information that does not depend on the chosen value.
struct Part<'d> {
    choices: Vec<Choice<'d>>,
    tone: Option<usize>,
}

/// The search itself, borrowed from an engine for one query.
struct Ranker<'a> {
    dict: &'a Dictionary,
    config: &'a Config,
}

impl<'a> Ranker<'a> {
    fn rank(&self, code: &str) -> Vec<CandidateRecord> {
        if code.is_empty() {
            return Vec::new();
        }

        // Partitions and the head cut work on byte offsets.
        if !code.is_ascii() {
            let mut pool = Pool::default();
            let literal = self.exact_step(code, &mut pool);
            return pool.finish(self.config.exact_limit, literal.as_slice());
        }

        if code.len() >= self.config.long_buffer_threshold {
            let mut pool = Pool::default();
            let literal = self.exact_step(code, &mut pool);
            if self.long_buffer_step(code, &mut pool) {
                return pool.finish(self.config.segmented_limit, literal.as_slice());
            }
            tracing::debug!(code, "no head candidates, falling back to full search");
        }

        self.rank_exhaustive(code)
    }

    /// Exact lookup plus every partition, without the long-buffer cutoff.
    fn rank_exhaustive(&self, code: &str) -> Vec<CandidateRecord> {
        if code.is_empty() {
            return Vec::new();
        }

        let mut pool = Pool::default();
        let mut pinned: Vec<String> = self.exact_step(code, &mut pool).into_iter().collect();

        let segmented = code.len() >= 2;
        if segmented {
            self.segment_step(code, &mut pool);
            pinned.push(self.first_values(code));
        }
        tracing::debug!(code, distinct = pool.len(), "ranked candidates");

        let limit = if segmented {
            self.config.segmented_limit
        } else {
            self.config.exact_limit
        };
        pool.finish(limit, &pinned)
    }

    /// Output of the one-character split taking every character's first
    /// value; unknown characters stay literal.
    fn first_values(&self, code: &str) -> String {
        (0..code.len())
            .map(|i| {
                let piece = &code[i..i + 1];
                self.dict
                    .get(piece)
                    .and_then(|values| values.first())
                    .map_or(piece, String::as_str)
            })
            .collect()
    }

    /// Offer the whole-code matches. Returns the literal fallback text when
    /// the code itself is not in the dictionary.
    fn exact_step(&self, code: &str, pool: &mut Pool) -> Option<String> {
        let values = self.dict.get(code).unwrap_or_default();
        if values.is_empty() {
            let literal = decode_lenient(code.as_bytes());
            pool.offer(CandidateRecord::literal(literal.clone()));
            return Some(literal);
        }

        let tone = tone_digits(code);
        for value in values {
            pool.offer(CandidateRecord {
                output: value.clone(),
                tone_converted: usize::from(tone.is_some()),
                max_tone_digits: tone.unwrap_or(0),
                segment_count: 1,
                total_converted: 1,
                transformed: true,
            });
        }
        None
    }

    fn part<'c>(&self, code: &'c str) -> Part<'c>
    where
        'a: 'c,
    {
        let tone = tone_digits(code);
        let choices = match self.dict.get(code) {
            Some(values) if !values.is_empty() => values
                .iter()
                .map(|v| Choice {
                    text: v.as_str(),
                    converted: v.as_str() != code,
                })
                .collect(),
            // Unknown parts stand for themselves; codes are ASCII, so the
            // literal decoding is the code text.
            _ => vec![Choice {
                text: code,
                converted: false,
            }],
        };
        Part { choices, tone }
    }

    /// Offer the Cartesian product of every partition's per-part choices.
    fn segment_step<'c>(&self, code: &'c str, pool: &mut Pool)
    where
        'a: 'c,
    {
        for pieces in Partitions::new(code) {
            let parts: Vec<Part<'c>> = pieces.into_iter().map(|p| self.part(p)).collect();
            let max_tone_digits = parts.iter().filter_map(|p| p.tone).max().unwrap_or(0);

            // odometer over one choice index per part
            let mut picks = vec![0usize; parts.len()];
            loop {
                let mut output = String::new();
                let mut total_converted = 0;
                let mut tone_converted = 0;
                for (part, &pick) in parts.iter().zip(&picks) {
                    let choice = &part.choices[pick];
                    output.push_str(choice.text);
                    if choice.converted {
                        total_converted += 1;
                        if part.tone.is_some() {
                            tone_converted += 1;
                        }
                    }
                }
                pool.offer(CandidateRecord {
                    output,
                    tone_converted,
                    max_tone_digits,
                    segment_count: parts.len(),
                    total_converted,
                    transformed: total_converted > 0,
                });

                if !advance(&mut picks, &parts) {
                    break;
                }
            }
        }
    }

    /// Rank a fixed head, stretch it over directly following dictionary
    /// codes, then rank the rest recursively. Returns `false` when the head
    /// produced nothing.
    fn long_buffer_step(&self, code: &str, pool: &mut Pool) -> bool {
        let head_len = self.config.head_len.clamp(1, code.len());
        let Some(top) = self.rank_exhaustive(&code[..head_len]).into_iter().next() else {
            return false;
        };

        let mut head = top;
        let mut boundary = head_len;
        let last_trial = self.config.max_boundary.min(code.len());
        for trial in boundary + 1..=last_trial {
            let piece = &code[boundary..trial];
            let Some(value) = self.dict.get(piece).and_then(|v| v.first()) else {
                break;
            };
            let converted = value.as_str() != piece;
            let tone = tone_digits(piece);
            head.output.push_str(value);
            head.segment_count += 1;
            if converted {
                head.total_converted += 1;
                head.transformed = true;
                if tone.is_some() {
                    head.tone_converted += 1;
                }
            }
            head.max_tone_digits = head.max_tone_digits.max(tone.unwrap_or(0));
            boundary = trial;
        }
        tracing::debug!(code, boundary, head = %head.output, "fixed long-buffer head");

        let rest = &code[boundary..];
        if rest.is_empty() {
            pool.offer(head);
            return true;
        }

        for tail in self.rank(rest) {
            pool.offer(CandidateRecord {
                output: format!("{}{}", head.output, tail.output),
                tone_converted: head.tone_converted + tail.tone_converted,
                max_tone_digits: head.max_tone_digits.max(tail.max_tone_digits),
                segment_count: head.segment_count + tail.segment_count,
                total_converted: head.total_converted + tail.total_converted,
                transformed: head.transformed || tail.transformed,
            });
        }
        true
    }
}

/// Step the odometer; `false` once every combination has been produced.
fn advance(picks: &mut [usize], parts: &[Part<'_>]) -> bool {
    for (pick, part) in picks.iter_mut().zip(parts).rev() {
        *pick += 1;
        if *pick < part.choices.len() {
            return true;
        }
        *pick = 0;
    }
    false
}
