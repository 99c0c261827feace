use crate::config::Config;
use crate::default_emitter::DefaultEmitter;
use crate::error::Error;
use crate::reader::{Readable, Reader};
use crate::state::{surrogate_pat, ControlToken, State};
use crate::token::{Emitter, TextKind};

// A stack that can hold 0 to 2 `char`s: enough to push back both the character that ended a
// lookahead and, occasionally, the one behind it (e.g. unreading `<` then the character after
// it when a tag-open candidate turns out not to be a tag).
#[derive(Debug, Default)]
pub(crate) struct Stack2(Option<(char, Option<char>)>);

impl Stack2 {
    #[inline]
    fn push(&mut self, c: char) {
        self.0 = match self.0 {
            None => Some((c, None)),
            Some((c1, None)) => Some((c1, Some(c))),
            Some((_c1, Some(_c2))) => panic!("reconsume stack full"),
        }
    }

    #[inline]
    fn pop(&mut self) -> Option<char> {
        let (new_self, rv) = match self.0 {
            Some((c1, Some(c2))) => (Some((c1, None)), Some(c2)),
            Some((c1, None)) => (None, Some(c1)),
            None => (None, None),
        };
        self.0 = new_self;
        rv
    }
}

/// A streaming HTML5 tokenizer.
///
/// Construct one with [`Tokenizer::new`] over any `&str`/`&String`, or
/// [`Tokenizer::new_with_emitter`] for a custom [`Emitter`]. Pull tokens with
/// [`Tokenizer::read_next_token`], or iterate it directly since `Tokenizer` implements
/// [`Iterator`].
///
/// The tokenizer is infallible: it never rejects input, and always produces a finite, terminating
/// stream of tokens, recovering from malformed markup per the policies documented on [`Error`].
pub struct Tokenizer<R: Reader, E: Emitter = DefaultEmitter> {
    eof: bool,
    pub(crate) state: State,
    pub(crate) emitter: E,
    config: Config,
    reader: R,
    to_reconsume: Stack2,

    /// Current lexeme accumulator: used by character-reference matching, the generic raw-text
    /// end-tag candidate, and the script-data double-escape identifier.
    pub(crate) temporary_buffer: String,

    /// Raw-replay buffer: mirrors characters consumed while constructing a tag, comment, doctype,
    /// or CDATA section, so that an unexpected EOF can re-emit them as a `Data` token instead of
    /// silently discarding them.
    data: String,

    /// The markup declaration keyword that led into the DOCTYPE sub-machine, captured exactly as
    /// spelled in the input (e.g. `"DOCTYPE"` or `"doctype"`).
    pub(crate) doctype_raw_tag_name: String,

    pub(crate) character_reference_code: u32,
    pub(crate) return_state: Option<State>,
    pub(crate) quote: Option<char>,
    html_namespace: Option<String>,

    line: u64,
    column: u64,
}

impl<R: Reader> Tokenizer<R> {
    /// Create a new tokenizer over some input, using the [`DefaultEmitter`].
    ///
    /// `input` can be `&str` or `&String`, since those are the types [`Readable`] is implemented
    /// for; implement `Reader`/`Readable` yourself to tokenize another source.
    pub fn new<'a, S: Readable<'a, Reader = R>>(input: S) -> Self {
        Tokenizer::<S::Reader>::new_with_emitter(input, DefaultEmitter::default())
    }

    /// Create a new tokenizer with explicit [`Config`].
    pub fn with_config<'a, S: Readable<'a, Reader = R>>(input: S, config: Config) -> Self {
        let mut tokenizer =
            Tokenizer::<S::Reader>::new_with_emitter(input, DefaultEmitter::default());
        tokenizer.config = config;
        tokenizer
    }
}

impl<R: Reader, E: Emitter> Tokenizer<R, E> {
    /// Construct a new tokenizer from some input and a custom emitter.
    ///
    /// Use this over [`Tokenizer::new`] for control over token allocation, e.g. to avoid
    /// allocating tokens you don't care about.
    pub fn new_with_emitter<'a, S: Readable<'a, Reader = R>>(input: S, emitter: E) -> Self {
        Tokenizer {
            eof: false,
            state: State::Data,
            emitter,
            config: Config::default(),
            reader: input.to_reader(),
            to_reconsume: Stack2::default(),
            temporary_buffer: String::new(),
            data: String::new(),
            doctype_raw_tag_name: String::new(),
            character_reference_code: 0,
            return_state: None,
            quote: None,
            html_namespace: None,
            line: 1,
            column: 1,
        }
    }

    /// Switch to [`State::PlainText`] ahead of time. The tokenizer never enters this state on its
    /// own, since nothing in a standalone tokenizer's input can name the `<plaintext>` element's
    /// special handling without a preceding start tag having already been observed by the caller.
    pub fn set_plaintext_state(&mut self) {
        self.state = State::PlainText;
    }

    /// The current line (1-based), reflecting the position just past the last consumed
    /// character.
    #[must_use]
    pub fn line(&self) -> u64 {
        self.line
    }

    /// The current column (1-based), reflecting the position just past the last consumed
    /// character. Resets to 1 after every `\n`.
    #[must_use]
    pub fn column(&self) -> u64 {
        self.column
    }

    /// The HTML namespace declared on the root `<html>` element's `xmlns` attribute, if one has
    /// been emitted yet.
    #[must_use]
    pub fn html_namespace(&self) -> Option<&str> {
        self.html_namespace.as_deref()
    }

    #[cfg(feature = "integration-tests")]
    /// Test-internal function to override internal state. Not public API.
    pub fn set_state(&mut self, state: State) {
        self.state = state;
    }

    #[cfg(feature = "integration-tests")]
    /// Test-internal function to observe internal state. Not public API.
    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    #[cfg(feature = "integration-tests")]
    /// Test-internal function to override the _last start tag_. Not public API.
    pub fn set_last_start_tag(&mut self, last_start_tag: Option<&str>) {
        self.emitter.set_last_start_tag(last_start_tag);
    }

    #[inline]
    pub(crate) fn unread_char(&mut self, c: char) {
        self.to_reconsume.push(c);
    }

    fn validate_char(&mut self, c: char) {
        match c as u32 {
            surrogate_pat!() => {
                self.report_error(Error::SurrogateInInputStream);
            }
            crate::state::noncharacter_pat!() => {
                self.report_error(Error::NoncharacterInInputStream);
            }
            x if (0x0001..=0x001f).contains(&x) || (0x007f..=0x009f).contains(&x) => {
                if !matches!(x, 0x0009 | 0x000a | 0x000c | 0x000d | 0x0020) {
                    self.report_error(Error::ControlCharacterInInputStream);
                }
            }
            _ => (),
        }
    }

    /// Read the next raw input character, applying the reconsume stack, position tracking, and
    /// validity checks. Does **not** append to the raw-replay buffer; callers inside a
    /// tag/comment/doctype/CDATA construction do that explicitly via [`Tokenizer::push_data`].
    pub(crate) fn read_char(&mut self) -> Option<char> {
        let c = match self.to_reconsume.pop() {
            Some(c) => Some(c),
            None => self.reader.read_char(),
        };

        if let Some(c) = c {
            self.validate_char(c);
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }

        c
    }

    pub(crate) fn try_read_string(&mut self, s: &str, case_sensitive: bool) -> Option<String> {
        // only ever called right after peeking ASCII characters, so the reconsume stack is
        // guaranteed empty here.
        debug_assert!(self.to_reconsume.pop().is_none());
        let matched = self.reader.try_read_string(s, case_sensitive)?;
        self.column += matched.chars().count() as u64;
        self.data.push_str(&matched);
        Some(matched)
    }

    pub(crate) fn push_data(&mut self, c: char) {
        self.data.push(c);
    }

    pub(crate) fn push_data_str(&mut self, s: &str) {
        self.data.push_str(s);
    }

    pub(crate) fn clear_data(&mut self) {
        self.data.clear();
    }

    /// Flush the raw-replay buffer as a `Data` token, used when EOF interrupts tag/comment/
    /// doctype/CDATA construction.
    pub(crate) fn flush_data_as_text(&mut self) {
        if !self.data.is_empty() {
            let text = std::mem::take(&mut self.data);
            self.emitter.emit_string(TextKind::Data, &text);
        }
    }

    pub(crate) fn report_error(&mut self, error: Error) {
        tracing::debug!(error = %error, line = self.line, column = self.column, "html parse error");
        self.emitter.emit_error(error);
    }

    pub(crate) fn switch_to(&mut self, state: State) {
        tracing::trace!(from = ?self.state, to = ?state, "switch_to");
        self.state = state;
    }

    pub(crate) fn reconsume_in(&mut self, c: char, state: State) {
        self.unread_char(c);
        self.switch_to(state);
    }

    pub(crate) fn decode_character_references(&self) -> bool {
        self.config.decode_character_references
    }

    pub(crate) fn note_html_namespace(&mut self, tag_name: &str, attribute: Option<&str>) {
        if tag_name.eq_ignore_ascii_case("html") {
            if let Some(ns) = attribute {
                self.html_namespace = Some(ns.to_owned());
            }
        }
    }

    /// Pull the next token from the input, or `None` once EOF has been fully processed.
    ///
    /// Once this returns `None` it will always return `None` again: EOF is an absorbing state.
    pub fn read_next_token(&mut self) -> Option<E::Token> {
        loop {
            if let Some(token) = self.emitter.pop_token() {
                return Some(token);
            }

            if self.eof {
                return None;
            }

            match crate::machine::consume(self) {
                ControlToken::Continue => continue,
                ControlToken::Eof => {
                    self.eof = true;
                    self.emitter.emit_eof();
                }
            }
        }
    }
}

impl<R: Reader, E: Emitter> Iterator for Tokenizer<R, E> {
    type Item = E::Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_next_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_and_column_track_newlines() {
        let mut tok = Tokenizer::new("ab\ncd");
        for _ in 0..3 {
            tok.read_char();
        }
        assert_eq!(tok.line(), 2);
        assert_eq!(tok.column(), 1);
        tok.read_char();
        tok.read_char();
        assert_eq!(tok.line(), 2);
        assert_eq!(tok.column(), 3);
    }

    #[test]
    fn carriage_returns_are_normalized_to_newlines() {
        let mut tok = Tokenizer::new("a\r\nb\rc");
        let chars: Vec<_> = std::iter::from_fn(|| tok.read_char()).collect();
        assert_eq!(chars, vec!['a', '\n', 'b', '\n', 'c']);
    }

    #[test]
    fn iterator_is_absorbing_at_eof() {
        let mut tok = Tokenizer::new("");
        assert_eq!(tok.next(), None);
        assert_eq!(tok.next(), None);
    }
}
