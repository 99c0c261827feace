//! The tokenizer's state machine, one function-call-worth of work per [`State`].
//!
//! [`consume`] is called in a loop by [`crate::Tokenizer::read_next_token`]; each call reads
//! input according to the current state, mutates the tokenizer and its [`crate::token::Emitter`],
//! and returns [`ControlToken::Continue`] to keep going or [`ControlToken::Eof`] once input is
//! exhausted. Tokens themselves surface through `Emitter::pop_token`, checked by the caller
//! between calls, so a single `consume` call may do anywhere from one character's worth of work
//! up to a whole fixed-length keyword lookahead.

use crate::entity::EntityDecoder;
use crate::error::Error;
use crate::reader::Reader;
use crate::state::{ctostr, ContentModel, ControlToken, State};
use crate::token::{Emitter, TextKind};
use crate::tokenizer::Tokenizer;

macro_rules! cont {
    () => {
        return ControlToken::Continue
    };
}

macro_rules! eof {
    () => {
        return ControlToken::Eof
    };
}

macro_rules! switch_to {
    ($tok:expr, $state:expr) => {{
        $tok.switch_to($state);
        cont!()
    }};
}

macro_rules! reconsume_in {
    ($tok:expr, $c:expr, $state:expr) => {{
        $tok.reconsume_in($c, $state);
        cont!()
    }};
}

fn is_ascii_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\u{a}' | '\u{c}' | ' ')
}

fn is_char_ref_in_attribute(return_state: Option<State>) -> bool {
    matches!(
        return_state,
        Some(
            State::AttributeValueDoubleQuoted
                | State::AttributeValueSingleQuoted
                | State::AttributeValueUnquoted
        )
    )
}

fn emit_current_tag_and_switch<R: Reader, E: Emitter>(tok: &mut Tokenizer<R, E>) -> ControlToken {
    if let Some(name) = tok.emitter.current_start_tag_name() {
        let name = name.to_owned();
        let xmlns = tok
            .emitter
            .current_tag_attribute("xmlns")
            .map(ToOwned::to_owned);
        tok.note_html_namespace(&name, xmlns.as_deref());
    }
    let content_model = tok.emitter.emit_current_tag();
    tok.clear_data();
    tok.switch_to(content_model.map_or(State::Data, ContentModel::initial_state));
    ControlToken::Continue
}

/// Flush `</` plus the generic end-tag candidate buffer as literal text, then reconsume `c` (or
/// hit EOF) in `state`. Used whenever a `LessThanSign`/`EndTagOpen`/`EndTagName` trio gives up
/// because the candidate didn't turn out to be an appropriate end tag.
fn abandon_end_tag_candidate<R: Reader, E: Emitter>(
    tok: &mut Tokenizer<R, E>,
    kind: TextKind,
    c: Option<char>,
    state: State,
) -> ControlToken {
    tok.emitter.emit_string(kind, "</");
    if !tok.temporary_buffer.is_empty() {
        let buf = std::mem::take(&mut tok.temporary_buffer);
        tok.emitter.emit_string(kind, &buf);
    }
    match c {
        Some(c) => {
            tok.reconsume_in(c, state);
            ControlToken::Continue
        }
        None => ControlToken::Eof,
    }
}

fn generic_end_tag_name<R: Reader, E: Emitter>(
    tok: &mut Tokenizer<R, E>,
    c: Option<char>,
    kind: TextKind,
    fallback_state: State,
) -> ControlToken {
    match c {
        Some(c) if is_ascii_whitespace(c) => {
            if tok.emitter.current_is_appropriate_end_tag_token() {
                tok.switch_to(State::BeforeAttributeName);
                ControlToken::Continue
            } else {
                abandon_end_tag_candidate(tok, kind, Some(c), fallback_state)
            }
        }
        Some('/') => {
            if tok.emitter.current_is_appropriate_end_tag_token() {
                tok.switch_to(State::SelfClosingStartTag);
                ControlToken::Continue
            } else {
                abandon_end_tag_candidate(tok, kind, Some('/'), fallback_state)
            }
        }
        Some('>') => {
            if tok.emitter.current_is_appropriate_end_tag_token() {
                emit_current_tag_and_switch(tok)
            } else {
                abandon_end_tag_candidate(tok, kind, Some('>'), fallback_state)
            }
        }
        Some(c) if c.is_ascii_alphabetic() => {
            tok.emitter
                .push_tag_name(&c.to_ascii_lowercase().to_string());
            tok.temporary_buffer.push(c);
            ControlToken::Continue
        }
        Some(c) => abandon_end_tag_candidate(tok, kind, Some(c), fallback_state),
        None => abandon_end_tag_candidate(tok, kind, None, fallback_state),
    }
}

fn mutate_character_reference<R: Reader, E: Emitter>(tok: &mut Tokenizer<R, E>, base: u32, digit: u32) {
    tok.character_reference_code = tok
        .character_reference_code
        .checked_mul(base)
        .and_then(|v| v.checked_add(digit))
        .unwrap_or(0x0011_0000);
}

/// Append text to whatever buffer the current return state is accumulating into: the pending
/// attribute value if we're inside one, or straight to the emitter otherwise.
fn push_to_return_state_buffer<R: Reader, E: Emitter>(tok: &mut Tokenizer<R, E>, s: &str) {
    if is_char_ref_in_attribute(tok.return_state) {
        tok.emitter.push_attribute_value(s);
    } else {
        let kind = match tok.return_state {
            Some(State::RcData) => TextKind::RcData,
            _ => TextKind::Data,
        };
        tok.emitter.emit_string(kind, s);
    }
}

fn flush_character_reference_as_is<R: Reader, E: Emitter>(tok: &mut Tokenizer<R, E>) {
    let buf = std::mem::take(&mut tok.temporary_buffer);
    push_to_return_state_buffer(tok, &buf);
}

const WINDOWS_1252_REMAP: &[(u32, u32)] = &[
    (0x80, 0x20ac),
    (0x82, 0x201a),
    (0x83, 0x0192),
    (0x84, 0x201e),
    (0x85, 0x2026),
    (0x86, 0x2020),
    (0x87, 0x2021),
    (0x88, 0x02c6),
    (0x89, 0x2030),
    (0x8a, 0x0160),
    (0x8b, 0x2039),
    (0x8c, 0x0152),
    (0x8e, 0x017d),
    (0x91, 0x2018),
    (0x92, 0x2019),
    (0x93, 0x201c),
    (0x94, 0x201d),
    (0x95, 0x2022),
    (0x96, 0x2013),
    (0x97, 0x2014),
    (0x98, 0x02dc),
    (0x99, 0x2122),
    (0x9a, 0x0161),
    (0x9b, 0x203a),
    (0x9c, 0x0153),
    (0x9e, 0x017e),
    (0x9f, 0x0178),
];

/// Perform one step of the tokenizer's state machine.
#[allow(clippy::too_many_lines)]
pub(crate) fn consume<R: Reader, E: Emitter>(tok: &mut Tokenizer<R, E>) -> ControlToken {
    match tok.state {
        State::Data => {
            let c = match tok.read_char() {
                Some(c) => c,
                None => eof!(),
            };
            match c {
                '&' if tok.decode_character_references() => {
                    tok.return_state = Some(State::Data);
                    switch_to!(tok, State::CharacterReference);
                }
                '<' => {
                    tok.push_data('<');
                    switch_to!(tok, State::TagOpen);
                }
                '\0' => {
                    tok.report_error(Error::UnexpectedNullCharacter);
                    tok.emitter.emit_string(TextKind::Data, "\u{fffd}");
                    cont!();
                }
                c => {
                    tok.emitter.emit_string(TextKind::Data, ctostr!(c));
                    cont!();
                }
            }
        }

        State::RcData => {
            let c = match tok.read_char() {
                Some(c) => c,
                None => eof!(),
            };
            match c {
                '&' if tok.decode_character_references() => {
                    tok.return_state = Some(State::RcData);
                    switch_to!(tok, State::CharacterReference);
                }
                '<' => switch_to!(tok, State::RcDataLessThanSign),
                '\0' => {
                    tok.report_error(Error::UnexpectedNullCharacter);
                    tok.emitter.emit_string(TextKind::RcData, "\u{fffd}");
                    cont!();
                }
                c => {
                    tok.emitter.emit_string(TextKind::RcData, ctostr!(c));
                    cont!();
                }
            }
        }

        State::RawText => {
            let c = match tok.read_char() {
                Some(c) => c,
                None => eof!(),
            };
            match c {
                '<' => switch_to!(tok, State::RawTextLessThanSign),
                '\0' => {
                    tok.report_error(Error::UnexpectedNullCharacter);
                    tok.emitter.emit_string(TextKind::RawText, "\u{fffd}");
                    cont!();
                }
                c => {
                    tok.emitter.emit_string(TextKind::RawText, ctostr!(c));
                    cont!();
                }
            }
        }

        State::ScriptData => {
            let c = match tok.read_char() {
                Some(c) => c,
                None => eof!(),
            };
            match c {
                '<' => switch_to!(tok, State::ScriptDataLessThanSign),
                '\0' => {
                    tok.report_error(Error::UnexpectedNullCharacter);
                    tok.emitter.emit_string(TextKind::ScriptData, "\u{fffd}");
                    cont!();
                }
                c => {
                    tok.emitter.emit_string(TextKind::ScriptData, ctostr!(c));
                    cont!();
                }
            }
        }

        State::PlainText => {
            let c = match tok.read_char() {
                Some(c) => c,
                None => eof!(),
            };
            match c {
                '\0' => {
                    tok.report_error(Error::UnexpectedNullCharacter);
                    tok.emitter.emit_string(TextKind::RawText, "\u{fffd}");
                    cont!();
                }
                c => {
                    tok.emitter.emit_string(TextKind::RawText, ctostr!(c));
                    cont!();
                }
            }
        }

        // ---- tag open family ---------------------------------------------------------------
        State::TagOpen => {
            let c = match tok.read_char() {
                Some(c) => c,
                None => {
                    tok.report_error(Error::EofBeforeTagName);
                    tok.flush_data_as_text();
                    eof!();
                }
            };
            match c {
                '!' => {
                    tok.push_data('!');
                    switch_to!(tok, State::MarkupDeclarationOpen);
                }
                '/' => {
                    tok.push_data('/');
                    switch_to!(tok, State::EndTagOpen);
                }
                c if c.is_ascii_alphabetic() => {
                    tok.emitter.init_start_tag();
                    reconsume_in!(tok, c, State::TagName);
                }
                '?' => {
                    tok.report_error(Error::UnexpectedQuestionMarkInsteadOfTagName);
                    tok.emitter.init_comment();
                    reconsume_in!(tok, c, State::BogusComment);
                }
                c => {
                    tok.report_error(Error::InvalidFirstCharacterOfTagName);
                    tok.clear_data();
                    tok.emitter.emit_string(TextKind::Data, "<");
                    reconsume_in!(tok, c, State::Data);
                }
            }
        }

        State::EndTagOpen => {
            let c = match tok.read_char() {
                Some(c) => c,
                None => {
                    tok.report_error(Error::EofBeforeTagName);
                    tok.flush_data_as_text();
                    eof!();
                }
            };
            match c {
                c if c.is_ascii_alphabetic() => {
                    tok.emitter.init_end_tag();
                    reconsume_in!(tok, c, State::TagName);
                }
                '>' => {
                    tok.report_error(Error::MissingEndTagName);
                    tok.clear_data();
                    switch_to!(tok, State::Data);
                }
                c => {
                    tok.report_error(Error::InvalidFirstCharacterOfTagName);
                    tok.emitter.init_comment();
                    reconsume_in!(tok, c, State::BogusComment);
                }
            }
        }

        State::TagName => {
            let c = match tok.read_char() {
                Some(c) => c,
                None => {
                    tok.report_error(Error::EofInTag);
                    tok.flush_data_as_text();
                    eof!();
                }
            };
            tok.push_data(c);
            match c {
                c if is_ascii_whitespace(c) => switch_to!(tok, State::BeforeAttributeName),
                '/' => switch_to!(tok, State::SelfClosingStartTag),
                '>' => emit_current_tag_and_switch(tok),
                '\0' => {
                    tok.report_error(Error::UnexpectedNullCharacter);
                    tok.emitter.push_tag_name("\u{fffd}");
                    cont!();
                }
                c if c.is_ascii_uppercase() => {
                    tok.emitter.push_tag_name(&c.to_ascii_lowercase().to_string());
                    cont!();
                }
                c => {
                    tok.emitter.push_tag_name(ctostr!(c));
                    cont!();
                }
            }
        }

        // ---- RCDATA / RAWTEXT / ScriptData end-tag candidate trios ---------------------------
        State::RcDataLessThanSign => match tok.read_char() {
            Some('/') => {
                tok.temporary_buffer.clear();
                switch_to!(tok, State::RcDataEndTagOpen);
            }
            Some(c) => {
                tok.emitter.emit_string(TextKind::RcData, "<");
                reconsume_in!(tok, c, State::RcData);
            }
            None => {
                tok.emitter.emit_string(TextKind::RcData, "<");
                eof!();
            }
        },
        State::RcDataEndTagOpen => match tok.read_char() {
            Some(c) if c.is_ascii_alphabetic() => {
                tok.emitter.init_end_tag();
                reconsume_in!(tok, c, State::RcDataEndTagName);
            }
            Some(c) => {
                tok.emitter.emit_string(TextKind::RcData, "</");
                reconsume_in!(tok, c, State::RcData);
            }
            None => {
                tok.emitter.emit_string(TextKind::RcData, "</");
                eof!();
            }
        },
        State::RcDataEndTagName => {
            let c = tok.read_char();
            generic_end_tag_name(tok, c, TextKind::RcData, State::RcData)
        }

        State::RawTextLessThanSign => match tok.read_char() {
            Some('/') => {
                tok.temporary_buffer.clear();
                switch_to!(tok, State::RawTextEndTagOpen);
            }
            Some(c) => {
                tok.emitter.emit_string(TextKind::RawText, "<");
                reconsume_in!(tok, c, State::RawText);
            }
            None => {
                tok.emitter.emit_string(TextKind::RawText, "<");
                eof!();
            }
        },
        State::RawTextEndTagOpen => match tok.read_char() {
            Some(c) if c.is_ascii_alphabetic() => {
                tok.emitter.init_end_tag();
                reconsume_in!(tok, c, State::RawTextEndTagName);
            }
            Some(c) => {
                tok.emitter.emit_string(TextKind::RawText, "</");
                reconsume_in!(tok, c, State::RawText);
            }
            None => {
                tok.emitter.emit_string(TextKind::RawText, "</");
                eof!();
            }
        },
        State::RawTextEndTagName => {
            let c = tok.read_char();
            generic_end_tag_name(tok, c, TextKind::RawText, State::RawText)
        }

        State::ScriptDataLessThanSign => match tok.read_char() {
            Some('/') => {
                tok.temporary_buffer.clear();
                switch_to!(tok, State::ScriptDataEndTagOpen);
            }
            Some('!') => {
                tok.emitter.emit_string(TextKind::ScriptData, "<!");
                switch_to!(tok, State::ScriptDataEscapeStart);
            }
            Some(c) => {
                tok.emitter.emit_string(TextKind::ScriptData, "<");
                reconsume_in!(tok, c, State::ScriptData);
            }
            None => {
                tok.emitter.emit_string(TextKind::ScriptData, "<");
                eof!();
            }
        },
        State::ScriptDataEndTagOpen => match tok.read_char() {
            Some(c) if c.is_ascii_alphabetic() => {
                tok.emitter.init_end_tag();
                reconsume_in!(tok, c, State::ScriptDataEndTagName);
            }
            Some(c) => {
                tok.emitter.emit_string(TextKind::ScriptData, "</");
                reconsume_in!(tok, c, State::ScriptData);
            }
            None => {
                tok.emitter.emit_string(TextKind::ScriptData, "</");
                eof!();
            }
        },
        State::ScriptDataEndTagName => {
            let c = tok.read_char();
            generic_end_tag_name(tok, c, TextKind::ScriptData, State::ScriptData)
        }

        // ---- script-data escape nesting -------------------------------------------------------
        State::ScriptDataEscapeStart => match tok.read_char() {
            Some('-') => {
                tok.emitter.emit_string(TextKind::ScriptData, "-");
                switch_to!(tok, State::ScriptDataEscapeStartDash);
            }
            Some(c) => reconsume_in!(tok, c, State::ScriptData),
            None => eof!(),
        },
        State::ScriptDataEscapeStartDash => match tok.read_char() {
            Some('-') => {
                tok.emitter.emit_string(TextKind::ScriptData, "-");
                switch_to!(tok, State::ScriptDataEscapedDashDash);
            }
            Some(c) => reconsume_in!(tok, c, State::ScriptData),
            None => eof!(),
        },
        State::ScriptDataEscaped => {
            let c = match tok.read_char() {
                Some(c) => c,
                None => {
                    tok.report_error(Error::EofInScriptHtmlCommentLikeText);
                    eof!();
                }
            };
            match c {
                '-' => {
                    tok.emitter.emit_string(TextKind::ScriptData, "-");
                    switch_to!(tok, State::ScriptDataEscapedDash);
                }
                '<' => switch_to!(tok, State::ScriptDataEscapedLessThanSign),
                '\0' => {
                    tok.report_error(Error::UnexpectedNullCharacter);
                    tok.emitter.emit_string(TextKind::ScriptData, "\u{fffd}");
                    cont!();
                }
                c => {
                    tok.emitter.emit_string(TextKind::ScriptData, ctostr!(c));
                    cont!();
                }
            }
        }
        State::ScriptDataEscapedDash => {
            let c = match tok.read_char() {
                Some(c) => c,
                None => {
                    tok.report_error(Error::EofInScriptHtmlCommentLikeText);
                    eof!();
                }
            };
            match c {
                '-' => {
                    tok.emitter.emit_string(TextKind::ScriptData, "-");
                    switch_to!(tok, State::ScriptDataEscapedDashDash);
                }
                '<' => switch_to!(tok, State::ScriptDataEscapedLessThanSign),
                '\0' => {
                    tok.report_error(Error::UnexpectedNullCharacter);
                    tok.emitter.emit_string(TextKind::ScriptData, "\u{fffd}");
                    switch_to!(tok, State::ScriptDataEscaped);
                }
                c => {
                    tok.emitter.emit_string(TextKind::ScriptData, ctostr!(c));
                    switch_to!(tok, State::ScriptDataEscaped);
                }
            }
        }
        State::ScriptDataEscapedDashDash => {
            let c = match tok.read_char() {
                Some(c) => c,
                None => {
                    tok.report_error(Error::EofInScriptHtmlCommentLikeText);
                    eof!();
                }
            };
            match c {
                '-' => {
                    tok.emitter.emit_string(TextKind::ScriptData, "-");
                    cont!();
                }
                '<' => switch_to!(tok, State::ScriptDataEscapedLessThanSign),
                '>' => {
                    tok.emitter.emit_string(TextKind::ScriptData, ">");
                    switch_to!(tok, State::ScriptData);
                }
                '\0' => {
                    tok.report_error(Error::UnexpectedNullCharacter);
                    tok.emitter.emit_string(TextKind::ScriptData, "\u{fffd}");
                    switch_to!(tok, State::ScriptDataEscaped);
                }
                c => {
                    tok.emitter.emit_string(TextKind::ScriptData, ctostr!(c));
                    switch_to!(tok, State::ScriptDataEscaped);
                }
            }
        }
        State::ScriptDataEscapedLessThanSign => match tok.read_char() {
            Some('/') => {
                tok.temporary_buffer.clear();
                switch_to!(tok, State::ScriptDataEscapedEndTagOpen);
            }
            Some(c) if c.is_ascii_alphabetic() => {
                tok.temporary_buffer.clear();
                tok.emitter.emit_string(TextKind::ScriptData, "<");
                reconsume_in!(tok, c, State::ScriptDataDoubleEscapeStart);
            }
            Some(c) => {
                tok.emitter.emit_string(TextKind::ScriptData, "<");
                reconsume_in!(tok, c, State::ScriptDataEscaped);
            }
            None => {
                tok.emitter.emit_string(TextKind::ScriptData, "<");
                eof!();
            }
        },
        State::ScriptDataEscapedEndTagOpen => match tok.read_char() {
            Some(c) if c.is_ascii_alphabetic() => {
                tok.emitter.init_end_tag();
                reconsume_in!(tok, c, State::ScriptDataEscapedEndTagName);
            }
            Some(c) => {
                tok.emitter.emit_string(TextKind::ScriptData, "</");
                reconsume_in!(tok, c, State::ScriptDataEscaped);
            }
            None => {
                tok.emitter.emit_string(TextKind::ScriptData, "</");
                eof!();
            }
        },
        State::ScriptDataEscapedEndTagName => {
            let c = tok.read_char();
            generic_end_tag_name(tok, c, TextKind::ScriptData, State::ScriptDataEscaped)
        }
        State::ScriptDataDoubleEscapeStart => {
            let c = match tok.read_char() {
                Some(c) => c,
                None => eof!(),
            };
            match c {
                c if is_ascii_whitespace(c) || matches!(c, '/' | '>') => {
                    let next = if tok.temporary_buffer == "script" {
                        State::ScriptDataDoubleEscaped
                    } else {
                        State::ScriptDataEscaped
                    };
                    tok.emitter.emit_string(TextKind::ScriptData, ctostr!(c));
                    switch_to!(tok, next);
                }
                c if c.is_ascii_alphabetic() => {
                    tok.temporary_buffer.push(c.to_ascii_lowercase());
                    tok.emitter.emit_string(TextKind::ScriptData, ctostr!(c));
                    cont!();
                }
                c => reconsume_in!(tok, c, State::ScriptDataEscaped),
            }
        }
        State::ScriptDataDoubleEscaped => {
            let c = match tok.read_char() {
                Some(c) => c,
                None => {
                    tok.report_error(Error::EofInScriptHtmlCommentLikeText);
                    eof!();
                }
            };
            match c {
                '-' => {
                    tok.emitter.emit_string(TextKind::ScriptData, "-");
                    switch_to!(tok, State::ScriptDataDoubleEscapedDash);
                }
                '<' => {
                    tok.emitter.emit_string(TextKind::ScriptData, "<");
                    switch_to!(tok, State::ScriptDataDoubleEscapedLessThanSign);
                }
                '\0' => {
                    tok.report_error(Error::UnexpectedNullCharacter);
                    tok.emitter.emit_string(TextKind::ScriptData, "\u{fffd}");
                    cont!();
                }
                c => {
                    tok.emitter.emit_string(TextKind::ScriptData, ctostr!(c));
                    cont!();
                }
            }
        }
        State::ScriptDataDoubleEscapedDash => {
            let c = match tok.read_char() {
                Some(c) => c,
                None => {
                    tok.report_error(Error::EofInScriptHtmlCommentLikeText);
                    eof!();
                }
            };
            match c {
                '-' => {
                    tok.emitter.emit_string(TextKind::ScriptData, "-");
                    switch_to!(tok, State::ScriptDataDoubleEscapedDashDash);
                }
                '<' => {
                    tok.emitter.emit_string(TextKind::ScriptData, "<");
                    switch_to!(tok, State::ScriptDataDoubleEscapedLessThanSign);
                }
                '\0' => {
                    tok.report_error(Error::UnexpectedNullCharacter);
                    tok.emitter.emit_string(TextKind::ScriptData, "\u{fffd}");
                    switch_to!(tok, State::ScriptDataDoubleEscaped);
                }
                c => {
                    tok.emitter.emit_string(TextKind::ScriptData, ctostr!(c));
                    switch_to!(tok, State::ScriptDataDoubleEscaped);
                }
            }
        }
        State::ScriptDataDoubleEscapedDashDash => {
            let c = match tok.read_char() {
                Some(c) => c,
                None => {
                    tok.report_error(Error::EofInScriptHtmlCommentLikeText);
                    eof!();
                }
            };
            match c {
                '-' => {
                    tok.emitter.emit_string(TextKind::ScriptData, "-");
                    cont!();
                }
                '<' => {
                    tok.emitter.emit_string(TextKind::ScriptData, "<");
                    switch_to!(tok, State::ScriptDataDoubleEscapedLessThanSign);
                }
                '>' => {
                    tok.emitter.emit_string(TextKind::ScriptData, ">");
                    switch_to!(tok, State::ScriptData);
                }
                '\0' => {
                    tok.report_error(Error::UnexpectedNullCharacter);
                    tok.emitter.emit_string(TextKind::ScriptData, "\u{fffd}");
                    switch_to!(tok, State::ScriptDataDoubleEscaped);
                }
                c => {
                    tok.emitter.emit_string(TextKind::ScriptData, ctostr!(c));
                    switch_to!(tok, State::ScriptDataDoubleEscaped);
                }
            }
        }
        State::ScriptDataDoubleEscapedLessThanSign => match tok.read_char() {
            Some('/') => {
                tok.temporary_buffer.clear();
                tok.emitter.emit_string(TextKind::ScriptData, "/");
                switch_to!(tok, State::ScriptDataDoubleEscapeEnd);
            }
            Some(c) => reconsume_in!(tok, c, State::ScriptDataDoubleEscaped),
            None => eof!(),
        },
        State::ScriptDataDoubleEscapeEnd => {
            let c = match tok.read_char() {
                Some(c) => c,
                None => eof!(),
            };
            match c {
                c if is_ascii_whitespace(c) || matches!(c, '/' | '>') => {
                    let next = if tok.temporary_buffer == "script" {
                        State::ScriptDataEscaped
                    } else {
                        State::ScriptDataDoubleEscaped
                    };
                    tok.emitter.emit_string(TextKind::ScriptData, ctostr!(c));
                    switch_to!(tok, next);
                }
                c if c.is_ascii_alphabetic() => {
                    tok.temporary_buffer.push(c.to_ascii_lowercase());
                    tok.emitter.emit_string(TextKind::ScriptData, ctostr!(c));
                    cont!();
                }
                c => reconsume_in!(tok, c, State::ScriptDataDoubleEscaped),
            }
        }

        // ---- attribute sub-machine -----------------------------------------------------------
        State::BeforeAttributeName => match tok.read_char() {
            Some(c) if is_ascii_whitespace(c) => {
                tok.push_data(c);
                cont!();
            }
            Some(c) if matches!(c, '/' | '>') => reconsume_in!(tok, c, State::AfterAttributeName),
            None => {
                tok.report_error(Error::EofInTag);
                tok.flush_data_as_text();
                eof!();
            }
            Some('=') => {
                tok.report_error(Error::UnexpectedEqualsSignBeforeAttributeName);
                tok.push_data('=');
                tok.emitter.init_attribute();
                tok.emitter.push_attribute_name("=");
                switch_to!(tok, State::AttributeName);
            }
            Some(c) => {
                tok.emitter.init_attribute();
                reconsume_in!(tok, c, State::AttributeName);
            }
        },
        State::AttributeName => match tok.read_char() {
            Some(c) if is_ascii_whitespace(c) || matches!(c, '/' | '>') => {
                reconsume_in!(tok, c, State::AfterAttributeName)
            }
            None => {
                tok.report_error(Error::EofInTag);
                tok.flush_data_as_text();
                eof!();
            }
            Some('=') => {
                tok.push_data('=');
                switch_to!(tok, State::BeforeAttributeValue);
            }
            Some('\0') => {
                tok.push_data('\0');
                tok.report_error(Error::UnexpectedNullCharacter);
                tok.emitter.push_attribute_name("\u{fffd}");
                cont!();
            }
            Some(c) if matches!(c, '"' | '\'' | '<') => {
                tok.push_data(c);
                tok.report_error(Error::UnexpectedCharacterInAttributeName);
                tok.emitter.push_attribute_name(ctostr!(c));
                cont!();
            }
            Some(c) if c.is_ascii_uppercase() => {
                tok.push_data(c);
                tok.emitter
                    .push_attribute_name(&c.to_ascii_lowercase().to_string());
                cont!();
            }
            Some(c) => {
                tok.push_data(c);
                tok.emitter.push_attribute_name(ctostr!(c));
                cont!();
            }
        },
        State::AfterAttributeName => match tok.read_char() {
            Some(c) if is_ascii_whitespace(c) => {
                tok.push_data(c);
                cont!();
            }
            Some('/') => {
                tok.push_data('/');
                switch_to!(tok, State::SelfClosingStartTag);
            }
            Some('=') => {
                tok.push_data('=');
                switch_to!(tok, State::BeforeAttributeValue);
            }
            Some('>') => {
                tok.push_data('>');
                emit_current_tag_and_switch(tok)
            }
            None => {
                tok.report_error(Error::EofInTag);
                tok.flush_data_as_text();
                eof!();
            }
            Some(c) => {
                tok.emitter.init_attribute();
                reconsume_in!(tok, c, State::AttributeName);
            }
        },
        State::BeforeAttributeValue => match tok.read_char() {
            Some(c) if is_ascii_whitespace(c) => {
                tok.push_data(c);
                cont!();
            }
            Some('"') => {
                tok.push_data('"');
                tok.quote = Some('"');
                switch_to!(tok, State::AttributeValueDoubleQuoted);
            }
            Some('\'') => {
                tok.push_data('\'');
                tok.quote = Some('\'');
                switch_to!(tok, State::AttributeValueSingleQuoted);
            }
            Some('>') => {
                tok.report_error(Error::MissingAttributeValue);
                tok.push_data('>');
                emit_current_tag_and_switch(tok)
            }
            Some(c) => reconsume_in!(tok, c, State::AttributeValueUnquoted),
            None => {
                tok.report_error(Error::EofInTag);
                tok.flush_data_as_text();
                eof!();
            }
        },
        State::AttributeValueDoubleQuoted | State::AttributeValueSingleQuoted => {
            let quote = tok.quote.unwrap_or('"');
            match tok.read_char() {
                Some(c) if c == quote => {
                    tok.push_data(c);
                    switch_to!(tok, State::AfterAttributeValueQuoted);
                }
                Some('&') if tok.decode_character_references() => {
                    tok.push_data('&');
                    tok.return_state = Some(tok.state);
                    switch_to!(tok, State::CharacterReference);
                }
                Some('\0') => {
                    tok.push_data('\0');
                    tok.report_error(Error::UnexpectedNullCharacter);
                    tok.emitter.push_attribute_value("\u{fffd}");
                    cont!();
                }
                Some(c) => {
                    tok.push_data(c);
                    tok.emitter.push_attribute_value(ctostr!(c));
                    cont!();
                }
                None => {
                    tok.report_error(Error::EofInTag);
                    tok.flush_data_as_text();
                    eof!();
                }
            }
        }
        State::AttributeValueUnquoted => match tok.read_char() {
            Some(c) if is_ascii_whitespace(c) => {
                tok.push_data(c);
                switch_to!(tok, State::BeforeAttributeName);
            }
            Some('&') if tok.decode_character_references() => {
                tok.push_data('&');
                tok.return_state = Some(State::AttributeValueUnquoted);
                switch_to!(tok, State::CharacterReference);
            }
            Some('>') => {
                tok.push_data('>');
                emit_current_tag_and_switch(tok)
            }
            Some('\0') => {
                tok.push_data('\0');
                tok.report_error(Error::UnexpectedNullCharacter);
                tok.emitter.push_attribute_value("\u{fffd}");
                cont!();
            }
            Some(c) if matches!(c, '"' | '\'' | '<' | '=' | '`') => {
                tok.push_data(c);
                tok.report_error(Error::UnexpectedCharacterInUnquotedAttributeValue);
                tok.emitter.push_attribute_value(ctostr!(c));
                cont!();
            }
            Some(c) => {
                tok.push_data(c);
                tok.emitter.push_attribute_value(ctostr!(c));
                cont!();
            }
            None => {
                tok.report_error(Error::EofInTag);
                tok.flush_data_as_text();
                eof!();
            }
        },
        State::AfterAttributeValueQuoted => match tok.read_char() {
            Some(c) if is_ascii_whitespace(c) => {
                tok.push_data(c);
                switch_to!(tok, State::BeforeAttributeName);
            }
            Some('/') => {
                tok.push_data('/');
                switch_to!(tok, State::SelfClosingStartTag);
            }
            Some('>') => {
                tok.push_data('>');
                emit_current_tag_and_switch(tok)
            }
            Some(c) => {
                tok.report_error(Error::MissingWhitespaceBetweenAttributes);
                reconsume_in!(tok, c, State::BeforeAttributeName);
            }
            None => {
                tok.report_error(Error::EofInTag);
                tok.flush_data_as_text();
                eof!();
            }
        },
        State::SelfClosingStartTag => match tok.read_char() {
            Some('>') => {
                tok.push_data('>');
                tok.emitter.set_self_closing();
                emit_current_tag_and_switch(tok)
            }
            Some(c) => {
                tok.report_error(Error::UnexpectedSolidusInTag);
                reconsume_in!(tok, c, State::BeforeAttributeName);
            }
            None => {
                tok.report_error(Error::EofInTag);
                tok.flush_data_as_text();
                eof!();
            }
        },

        // ---- comments --------------------------------------------------------------------
        State::BogusComment => match tok.read_char() {
            Some('>') => {
                tok.push_data('>');
                tok.emitter.emit_current_comment();
                tok.clear_data();
                switch_to!(tok, State::Data);
            }
            Some('\0') => {
                tok.report_error(Error::UnexpectedNullCharacter);
                tok.push_data('\u{fffd}');
                tok.emitter.push_comment("\u{fffd}");
                cont!();
            }
            Some(c) => {
                tok.push_data(c);
                tok.emitter.push_comment(ctostr!(c));
                cont!();
            }
            None => {
                tok.emitter.emit_current_comment();
                tok.clear_data();
                eof!();
            }
        },

        State::MarkupDeclarationOpen => {
            if tok.try_read_string("--", true).is_some() {
                tok.emitter.init_comment();
                switch_to!(tok, State::CommentStart);
            }
            if let Some(raw_tag_name) = tok.try_read_string("doctype", false) {
                tok.doctype_raw_tag_name = raw_tag_name;
                switch_to!(tok, State::Doctype);
            }
            if tok.try_read_string("[CDATA[", true).is_some() {
                switch_to!(tok, State::CdataSection);
            }
            tok.report_error(Error::IncorrectlyOpenedComment);
            tok.emitter.init_comment();
            switch_to!(tok, State::BogusComment);
        }

        State::CommentStart => match tok.read_char() {
            Some('-') => {
                tok.push_data('-');
                switch_to!(tok, State::CommentStartDash);
            }
            Some('>') => {
                tok.report_error(Error::AbruptClosingOfEmptyComment);
                tok.push_data('>');
                tok.emitter.emit_current_comment();
                tok.clear_data();
                switch_to!(tok, State::Data);
            }
            Some(c) => reconsume_in!(tok, c, State::Comment),
            None => switch_to!(tok, State::Comment),
        },

        State::CommentStartDash => match tok.read_char() {
            Some('-') => {
                tok.push_data('-');
                switch_to!(tok, State::CommentEnd);
            }
            Some('>') => {
                tok.report_error(Error::AbruptClosingOfEmptyComment);
                tok.push_data('>');
                tok.emitter.emit_current_comment();
                tok.clear_data();
                switch_to!(tok, State::Data);
            }
            Some(c) => reconsume_in!(tok, c, State::Comment),
            None => {
                tok.report_error(Error::EofInComment);
                tok.emitter.emit_current_comment();
                tok.clear_data();
                eof!();
            }
        },

        State::Comment => match tok.read_char() {
            Some('<') => {
                tok.push_data('<');
                tok.emitter.push_comment("<");
                switch_to!(tok, State::CommentLessThanSign);
            }
            Some('-') => {
                tok.push_data('-');
                switch_to!(tok, State::CommentEndDash);
            }
            Some('\0') => {
                tok.report_error(Error::UnexpectedNullCharacter);
                tok.push_data('\u{fffd}');
                tok.emitter.push_comment("\u{fffd}");
                cont!();
            }
            Some(c) => {
                tok.push_data(c);
                tok.emitter.push_comment(ctostr!(c));
                cont!();
            }
            None => {
                tok.report_error(Error::EofInComment);
                tok.emitter.emit_current_comment();
                tok.clear_data();
                eof!();
            }
        },

        State::CommentLessThanSign => match tok.read_char() {
            Some('!') => {
                tok.push_data('!');
                tok.emitter.push_comment("!");
                switch_to!(tok, State::CommentLessThanSignBang);
            }
            Some('<') => {
                tok.push_data('<');
                tok.emitter.push_comment("<");
                cont!();
            }
            Some(c) => reconsume_in!(tok, c, State::Comment),
            None => switch_to!(tok, State::Comment),
        },
        State::CommentLessThanSignBang => match tok.read_char() {
            Some('-') => {
                tok.push_data('-');
                switch_to!(tok, State::CommentLessThanSignBangDash);
            }
            Some(c) => reconsume_in!(tok, c, State::Comment),
            None => switch_to!(tok, State::Comment),
        },
        State::CommentLessThanSignBangDash => match tok.read_char() {
            Some('-') => {
                tok.push_data('-');
                switch_to!(tok, State::CommentLessThanSignBangDashDash);
            }
            Some(c) => reconsume_in!(tok, c, State::CommentEndDash),
            None => switch_to!(tok, State::CommentEndDash),
        },
        State::CommentLessThanSignBangDashDash => match tok.read_char() {
            Some('>') => switch_to!(tok, State::CommentEnd),
            Some(c) => {
                tok.report_error(Error::NestedComment);
                reconsume_in!(tok, c, State::CommentEnd);
            }
            None => switch_to!(tok, State::CommentEnd),
        },
        State::CommentEndDash => match tok.read_char() {
            Some('-') => {
                tok.push_data('-');
                switch_to!(tok, State::CommentEnd);
            }
            Some(c) => reconsume_in!(tok, c, State::Comment),
            None => {
                tok.report_error(Error::EofInComment);
                tok.emitter.emit_current_comment();
                tok.clear_data();
                eof!();
            }
        },
        State::CommentEnd => match tok.read_char() {
            Some('>') => {
                tok.push_data('>');
                tok.emitter.emit_current_comment();
                tok.clear_data();
                switch_to!(tok, State::Data);
            }
            Some('!') => {
                tok.push_data('!');
                switch_to!(tok, State::CommentEndBang);
            }
            Some('-') => {
                tok.push_data('-');
                tok.emitter.push_comment("-");
                cont!();
            }
            Some(c) => reconsume_in!(tok, c, State::Comment),
            None => {
                tok.report_error(Error::EofInComment);
                tok.emitter.emit_current_comment();
                tok.clear_data();
                eof!();
            }
        },
        State::CommentEndBang => match tok.read_char() {
            Some('-') => {
                tok.emitter.push_comment("--!");
                tok.push_data('-');
                switch_to!(tok, State::CommentEndDash);
            }
            Some('>') => {
                tok.report_error(Error::IncorrectlyClosedComment);
                tok.push_data('>');
                tok.emitter.emit_current_comment();
                tok.clear_data();
                switch_to!(tok, State::Data);
            }
            Some(c) => {
                tok.emitter.push_comment("--!");
                reconsume_in!(tok, c, State::Comment);
            }
            None => {
                tok.report_error(Error::EofInComment);
                tok.emitter.emit_current_comment();
                tok.clear_data();
                eof!();
            }
        },

        // ---- doctype ---------------------------------------------------------------------
        State::Doctype => match tok.read_char() {
            Some(c) if is_ascii_whitespace(c) => {
                tok.push_data(c);
                switch_to!(tok, State::BeforeDoctypeName);
            }
            Some('>') => reconsume_in!(tok, '>', State::BeforeDoctypeName),
            Some(c) => {
                tok.report_error(Error::MissingWhitespaceBeforeDoctypeName);
                reconsume_in!(tok, c, State::BeforeDoctypeName);
            }
            None => {
                tok.report_error(Error::EofInDoctype);
                let raw_tag_name = tok.doctype_raw_tag_name.clone();
                tok.emitter.init_doctype(&raw_tag_name);
                tok.emitter.set_force_quirks();
                tok.emitter.emit_current_doctype();
                tok.clear_data();
                eof!();
            }
        },
        State::BeforeDoctypeName => match tok.read_char() {
            Some(c) if is_ascii_whitespace(c) => {
                tok.push_data(c);
                cont!();
            }
            Some('\0') => {
                tok.report_error(Error::UnexpectedNullCharacter);
                let raw_tag_name = tok.doctype_raw_tag_name.clone();
                tok.emitter.init_doctype(&raw_tag_name);
                tok.emitter.push_doctype_name("\u{fffd}");
                switch_to!(tok, State::DoctypeName);
            }
            Some('>') => {
                tok.report_error(Error::MissingDoctypeName);
                tok.push_data('>');
                let raw_tag_name = tok.doctype_raw_tag_name.clone();
                tok.emitter.init_doctype(&raw_tag_name);
                tok.emitter.set_force_quirks();
                tok.emitter.emit_current_doctype();
                tok.clear_data();
                switch_to!(tok, State::Data);
            }
            Some(c) => {
                tok.push_data(c);
                let raw_tag_name = tok.doctype_raw_tag_name.clone();
                tok.emitter.init_doctype(&raw_tag_name);
                tok.emitter
                    .push_doctype_name(&c.to_ascii_lowercase().to_string());
                switch_to!(tok, State::DoctypeName);
            }
            None => {
                tok.report_error(Error::EofInDoctype);
                let raw_tag_name = tok.doctype_raw_tag_name.clone();
                tok.emitter.init_doctype(&raw_tag_name);
                tok.emitter.set_force_quirks();
                tok.emitter.emit_current_doctype();
                tok.clear_data();
                eof!();
            }
        },
        State::DoctypeName => match tok.read_char() {
            Some(c) if is_ascii_whitespace(c) => {
                tok.push_data(c);
                switch_to!(tok, State::AfterDoctypeName);
            }
            Some('>') => {
                tok.push_data('>');
                tok.emitter.emit_current_doctype();
                tok.clear_data();
                switch_to!(tok, State::Data);
            }
            Some('\0') => {
                tok.report_error(Error::UnexpectedNullCharacter);
                tok.emitter.push_doctype_name("\u{fffd}");
                cont!();
            }
            Some(c) => {
                tok.push_data(c);
                tok.emitter
                    .push_doctype_name(&c.to_ascii_lowercase().to_string());
                cont!();
            }
            None => {
                tok.report_error(Error::EofInDoctype);
                tok.emitter.set_force_quirks();
                tok.emitter.emit_current_doctype();
                tok.clear_data();
                eof!();
            }
        },
        State::AfterDoctypeName => {
            if let Some(spelling) = tok.try_read_string("public", false) {
                tok.emitter.set_doctype_keyword(true, &spelling);
                switch_to!(tok, State::AfterDoctypePublicKeyword);
            }
            if let Some(spelling) = tok.try_read_string("system", false) {
                tok.emitter.set_doctype_keyword(false, &spelling);
                switch_to!(tok, State::AfterDoctypeSystemKeyword);
            }
            match tok.read_char() {
                Some(c) if is_ascii_whitespace(c) => {
                    tok.push_data(c);
                    cont!();
                }
                Some('>') => {
                    tok.push_data('>');
                    tok.emitter.emit_current_doctype();
                    tok.clear_data();
                    switch_to!(tok, State::Data);
                }
                Some(c) => {
                    tok.report_error(Error::InvalidCharacterSequenceAfterDoctypeName);
                    tok.emitter.set_force_quirks();
                    reconsume_in!(tok, c, State::BogusDoctype);
                }
                None => {
                    tok.report_error(Error::EofInDoctype);
                    tok.emitter.set_force_quirks();
                    tok.emitter.emit_current_doctype();
                    tok.clear_data();
                    eof!();
                }
            }
        }
        State::AfterDoctypePublicKeyword => {
            match tok.read_char() {
                Some(c) if is_ascii_whitespace(c) => {
                    tok.push_data(c);
                    switch_to!(tok, State::BeforeDoctypePublicIdentifier);
                }
                Some(c) if matches!(c, '"' | '\'') => {
                    tok.report_error(Error::MissingWhitespaceAfterDoctypePublicKeyword);
                    tok.push_data(c);
                    tok.emitter.set_doctype_public_identifier("");
                    tok.quote = Some(c);
                    switch_to!(
                        tok,
                        if c == '"' {
                            State::DoctypePublicIdentifierDoubleQuoted
                        } else {
                            State::DoctypePublicIdentifierSingleQuoted
                        }
                    );
                }
                Some('>') => {
                    tok.report_error(Error::MissingDoctypePublicIdentifier);
                    tok.push_data('>');
                    tok.emitter.set_force_quirks();
                    tok.emitter.emit_current_doctype();
                    tok.clear_data();
                    switch_to!(tok, State::Data);
                }
                Some(c) => {
                    tok.report_error(Error::MissingQuoteBeforeDoctypePublicIdentifier);
                    tok.emitter.set_force_quirks();
                    reconsume_in!(tok, c, State::BogusDoctype);
                }
                None => {
                    tok.report_error(Error::EofInDoctype);
                    tok.emitter.set_force_quirks();
                    tok.emitter.emit_current_doctype();
                    tok.clear_data();
                    eof!();
                }
            }
        }
        State::BeforeDoctypePublicIdentifier => match tok.read_char() {
            Some(c) if is_ascii_whitespace(c) => {
                tok.push_data(c);
                cont!();
            }
            Some(c) if matches!(c, '"' | '\'') => {
                tok.push_data(c);
                tok.emitter.set_doctype_public_identifier("");
                tok.quote = Some(c);
                switch_to!(
                    tok,
                    if c == '"' {
                        State::DoctypePublicIdentifierDoubleQuoted
                    } else {
                        State::DoctypePublicIdentifierSingleQuoted
                    }
                );
            }
            Some('>') => {
                tok.report_error(Error::MissingDoctypePublicIdentifier);
                tok.push_data('>');
                tok.emitter.set_force_quirks();
                tok.emitter.emit_current_doctype();
                tok.clear_data();
                switch_to!(tok, State::Data);
            }
            Some(c) => {
                tok.report_error(Error::MissingQuoteBeforeDoctypePublicIdentifier);
                tok.emitter.set_force_quirks();
                reconsume_in!(tok, c, State::BogusDoctype);
            }
            None => {
                tok.report_error(Error::EofInDoctype);
                tok.emitter.set_force_quirks();
                tok.emitter.emit_current_doctype();
                tok.clear_data();
                eof!();
            }
        },
        State::DoctypePublicIdentifierDoubleQuoted | State::DoctypePublicIdentifierSingleQuoted => {
            let quote = tok.quote.unwrap_or('"');
            match tok.read_char() {
                Some(c) if c == quote => {
                    tok.push_data(c);
                    switch_to!(tok, State::AfterDoctypePublicIdentifier);
                }
                Some('\0') => {
                    tok.report_error(Error::UnexpectedNullCharacter);
                    tok.emitter.push_doctype_public_identifier("\u{fffd}");
                    cont!();
                }
                Some('>') => {
                    tok.report_error(Error::AbruptDoctypePublicIdentifier);
                    tok.push_data('>');
                    tok.emitter.set_force_quirks();
                    tok.emitter.emit_current_doctype();
                    tok.clear_data();
                    switch_to!(tok, State::Data);
                }
                Some(c) => {
                    tok.push_data(c);
                    tok.emitter.push_doctype_public_identifier(ctostr!(c));
                    cont!();
                }
                None => {
                    tok.report_error(Error::EofInDoctype);
                    tok.emitter.set_force_quirks();
                    tok.emitter.emit_current_doctype();
                    tok.clear_data();
                    eof!();
                }
            }
        }
        State::AfterDoctypePublicIdentifier => match tok.read_char() {
            Some(c) if is_ascii_whitespace(c) => {
                tok.push_data(c);
                switch_to!(tok, State::BetweenDoctypePublicAndSystemIdentifiers);
            }
            Some('>') => {
                tok.push_data('>');
                tok.emitter.emit_current_doctype();
                tok.clear_data();
                switch_to!(tok, State::Data);
            }
            Some(c) if matches!(c, '"' | '\'') => {
                tok.report_error(Error::MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers);
                tok.push_data(c);
                tok.emitter.set_doctype_system_identifier("");
                tok.quote = Some(c);
                switch_to!(
                    tok,
                    if c == '"' {
                        State::DoctypeSystemIdentifierDoubleQuoted
                    } else {
                        State::DoctypeSystemIdentifierSingleQuoted
                    }
                );
            }
            Some(c) => {
                tok.report_error(Error::MissingQuoteBeforeDoctypeSystemIdentifier);
                tok.emitter.set_force_quirks();
                reconsume_in!(tok, c, State::BogusDoctype);
            }
            None => {
                tok.report_error(Error::EofInDoctype);
                tok.emitter.set_force_quirks();
                tok.emitter.emit_current_doctype();
                tok.clear_data();
                eof!();
            }
        },
        State::BetweenDoctypePublicAndSystemIdentifiers => match tok.read_char() {
            Some(c) if is_ascii_whitespace(c) => {
                tok.push_data(c);
                cont!();
            }
            Some('>') => {
                tok.push_data('>');
                tok.emitter.emit_current_doctype();
                tok.clear_data();
                switch_to!(tok, State::Data);
            }
            Some(c) if matches!(c, '"' | '\'') => {
                tok.push_data(c);
                tok.emitter.set_doctype_system_identifier("");
                tok.quote = Some(c);
                switch_to!(
                    tok,
                    if c == '"' {
                        State::DoctypeSystemIdentifierDoubleQuoted
                    } else {
                        State::DoctypeSystemIdentifierSingleQuoted
                    }
                );
            }
            Some(c) => {
                tok.report_error(Error::MissingQuoteBeforeDoctypeSystemIdentifier);
                tok.emitter.set_force_quirks();
                reconsume_in!(tok, c, State::BogusDoctype);
            }
            None => {
                tok.report_error(Error::EofInDoctype);
                tok.emitter.set_force_quirks();
                tok.emitter.emit_current_doctype();
                tok.clear_data();
                eof!();
            }
        },
        State::AfterDoctypeSystemKeyword => {
            match tok.read_char() {
                Some(c) if is_ascii_whitespace(c) => {
                    tok.push_data(c);
                    switch_to!(tok, State::BeforeDoctypeSystemIdentifier);
                }
                Some(c) if matches!(c, '"' | '\'') => {
                    tok.report_error(Error::MissingWhitespaceAfterDoctypeSystemKeyword);
                    tok.push_data(c);
                    tok.emitter.set_doctype_system_identifier("");
                    tok.quote = Some(c);
                    switch_to!(
                        tok,
                        if c == '"' {
                            State::DoctypeSystemIdentifierDoubleQuoted
                        } else {
                            State::DoctypeSystemIdentifierSingleQuoted
                        }
                    );
                }
                Some('>') => {
                    tok.report_error(Error::MissingDoctypeSystemIdentifier);
                    tok.push_data('>');
                    tok.emitter.set_force_quirks();
                    tok.emitter.emit_current_doctype();
                    tok.clear_data();
                    switch_to!(tok, State::Data);
                }
                Some(c) => {
                    tok.report_error(Error::MissingQuoteBeforeDoctypeSystemIdentifier);
                    tok.emitter.set_force_quirks();
                    reconsume_in!(tok, c, State::BogusDoctype);
                }
                None => {
                    tok.report_error(Error::EofInDoctype);
                    tok.emitter.set_force_quirks();
                    tok.emitter.emit_current_doctype();
                    tok.clear_data();
                    eof!();
                }
            }
        }
        State::BeforeDoctypeSystemIdentifier => match tok.read_char() {
            Some(c) if is_ascii_whitespace(c) => {
                tok.push_data(c);
                cont!();
            }
            Some(c) if matches!(c, '"' | '\'') => {
                tok.push_data(c);
                tok.emitter.set_doctype_system_identifier("");
                tok.quote = Some(c);
                switch_to!(
                    tok,
                    if c == '"' {
                        State::DoctypeSystemIdentifierDoubleQuoted
                    } else {
                        State::DoctypeSystemIdentifierSingleQuoted
                    }
                );
            }
            Some('>') => {
                tok.report_error(Error::MissingDoctypeSystemIdentifier);
                tok.push_data('>');
                tok.emitter.set_force_quirks();
                tok.emitter.emit_current_doctype();
                tok.clear_data();
                switch_to!(tok, State::Data);
            }
            Some(c) => {
                tok.report_error(Error::MissingQuoteBeforeDoctypeSystemIdentifier);
                tok.emitter.set_force_quirks();
                reconsume_in!(tok, c, State::BogusDoctype);
            }
            None => {
                tok.report_error(Error::EofInDoctype);
                tok.emitter.set_force_quirks();
                tok.emitter.emit_current_doctype();
                tok.clear_data();
                eof!();
            }
        },
        State::DoctypeSystemIdentifierDoubleQuoted | State::DoctypeSystemIdentifierSingleQuoted => {
            let quote = tok.quote.unwrap_or('"');
            match tok.read_char() {
                Some(c) if c == quote => {
                    tok.push_data(c);
                    switch_to!(tok, State::AfterDoctypeSystemIdentifier);
                }
                Some('\0') => {
                    tok.report_error(Error::UnexpectedNullCharacter);
                    tok.emitter.push_doctype_system_identifier("\u{fffd}");
                    cont!();
                }
                Some('>') => {
                    tok.report_error(Error::AbruptDoctypeSystemIdentifier);
                    tok.push_data('>');
                    tok.emitter.set_force_quirks();
                    tok.emitter.emit_current_doctype();
                    tok.clear_data();
                    switch_to!(tok, State::Data);
                }
                Some(c) => {
                    tok.push_data(c);
                    tok.emitter.push_doctype_system_identifier(ctostr!(c));
                    cont!();
                }
                None => {
                    tok.report_error(Error::EofInDoctype);
                    tok.emitter.set_force_quirks();
                    tok.emitter.emit_current_doctype();
                    tok.clear_data();
                    eof!();
                }
            }
        }
        State::AfterDoctypeSystemIdentifier => match tok.read_char() {
            Some(c) if is_ascii_whitespace(c) => {
                tok.push_data(c);
                cont!();
            }
            Some('>') => {
                tok.push_data('>');
                tok.emitter.emit_current_doctype();
                tok.clear_data();
                switch_to!(tok, State::Data);
            }
            Some(c) => {
                tok.report_error(Error::UnexpectedCharacterAfterDoctypeSystemIdentifier);
                reconsume_in!(tok, c, State::BogusDoctype);
            }
            None => {
                tok.report_error(Error::EofInDoctype);
                tok.emitter.set_force_quirks();
                tok.emitter.emit_current_doctype();
                tok.clear_data();
                eof!();
            }
        },
        State::BogusDoctype => match tok.read_char() {
            Some('>') => {
                tok.push_data('>');
                tok.emitter.emit_current_doctype();
                tok.clear_data();
                switch_to!(tok, State::Data);
            }
            Some('\0') => {
                tok.report_error(Error::UnexpectedNullCharacter);
                cont!();
            }
            Some(c) => {
                tok.push_data(c);
                cont!();
            }
            None => {
                tok.emitter.emit_current_doctype();
                tok.clear_data();
                eof!();
            }
        },

        // ---- CDATA -------------------------------------------------------------------------
        State::CdataSection => match tok.read_char() {
            Some(']') => switch_to!(tok, State::CdataSectionBracket),
            Some(c) => {
                tok.emitter.emit_string(TextKind::CData, ctostr!(c));
                cont!();
            }
            None => {
                tok.report_error(Error::EofInCdata);
                eof!();
            }
        },
        State::CdataSectionBracket => match tok.read_char() {
            Some(']') => switch_to!(tok, State::CdataSectionEnd),
            Some(c) => {
                tok.emitter.emit_string(TextKind::CData, "]");
                reconsume_in!(tok, c, State::CdataSection);
            }
            None => {
                tok.emitter.emit_string(TextKind::CData, "]");
                tok.report_error(Error::EofInCdata);
                eof!();
            }
        },
        State::CdataSectionEnd => match tok.read_char() {
            Some(']') => {
                tok.emitter.emit_string(TextKind::CData, "]");
                cont!();
            }
            Some('>') => switch_to!(tok, State::Data),
            Some(c) => {
                tok.emitter.emit_string(TextKind::CData, "]]");
                reconsume_in!(tok, c, State::CdataSection);
            }
            None => {
                tok.emitter.emit_string(TextKind::CData, "]]");
                tok.report_error(Error::EofInCdata);
                eof!();
            }
        },

        // ---- character references -----------------------------------------------------------
        State::CharacterReference => {
            tok.temporary_buffer.clear();
            tok.temporary_buffer.push('&');
            match tok.read_char() {
                Some(c) if c.is_ascii_alphanumeric() => {
                    reconsume_in!(tok, c, State::NamedCharacterReference)
                }
                Some('#') => {
                    tok.temporary_buffer.push('#');
                    switch_to!(tok, State::NumericCharacterReference);
                }
                maybe_c => {
                    flush_character_reference_as_is(tok);
                    let return_state = tok.return_state.unwrap_or(State::Data);
                    match maybe_c {
                        Some(c) => reconsume_in!(tok, c, return_state),
                        None => {
                            tok.switch_to(return_state);
                            eof!();
                        }
                    }
                }
            }
        }

        State::NamedCharacterReference => {
            let mut decoder = EntityDecoder::new();
            for c in tok.temporary_buffer.chars() {
                decoder.push(c);
            }
            let in_attribute = is_char_ref_in_attribute(tok.return_state);

            loop {
                match tok.read_char() {
                    Some(c) if decoder.push(c) => {
                        tok.temporary_buffer.push(c);
                    }
                    maybe_c => {
                        if let Some(c) = maybe_c {
                            tok.unread_char(c);
                        }
                        break;
                    }
                }
            }

            if !decoder.has_match() {
                flush_character_reference_as_is(tok);
                switch_to!(tok, State::AmbiguousAmpersand);
            }

            let next_char = {
                let peek = tok.read_char();
                if let Some(c) = peek {
                    tok.unread_char(c);
                }
                peek
            };

            if in_attribute
                && !decoder.last_match_had_semicolon()
                && next_char.is_some_and(|c| c.is_ascii_alphanumeric() || c == '=')
            {
                flush_character_reference_as_is(tok);
                let return_state = tok.return_state.unwrap_or(State::Data);
                switch_to!(tok, return_state);
            }

            if !decoder.last_match_had_semicolon() {
                tok.report_error(Error::MissingSemicolonAfterCharacterReference);
            }

            let value = decoder.get_value().to_owned();
            push_to_return_state_buffer(tok, &value);
            let return_state = tok.return_state.unwrap_or(State::Data);
            switch_to!(tok, return_state);
        }

        State::AmbiguousAmpersand => match tok.read_char() {
            Some(c) if c.is_ascii_alphanumeric() => {
                push_to_return_state_buffer(tok, ctostr!(c));
                cont!();
            }
            Some(';') => {
                tok.report_error(Error::UnknownNamedCharacterReference);
                let return_state = tok.return_state.unwrap_or(State::Data);
                reconsume_in!(tok, ';', return_state);
            }
            maybe_c => {
                let return_state = tok.return_state.unwrap_or(State::Data);
                match maybe_c {
                    Some(c) => reconsume_in!(tok, c, return_state),
                    None => {
                        tok.switch_to(return_state);
                        eof!();
                    }
                }
            }
        },

        State::NumericCharacterReference => {
            tok.character_reference_code = 0;
            match tok.read_char() {
                Some(c) if matches!(c, 'x' | 'X') => {
                    tok.temporary_buffer.push(c);
                    switch_to!(tok, State::HexadecimalCharacterReferenceStart);
                }
                maybe_c => {
                    if let Some(c) = maybe_c {
                        tok.unread_char(c);
                    }
                    switch_to!(tok, State::DecimalCharacterReference);
                }
            }
        }

        State::HexadecimalCharacterReferenceStart => match tok.read_char() {
            Some(c) if c.is_ascii_hexdigit() => {
                reconsume_in!(tok, c, State::HexadecimalCharacterReference)
            }
            maybe_c => {
                tok.report_error(Error::AbsenceOfDigitsInNumericCharacterReference);
                flush_character_reference_as_is(tok);
                let return_state = tok.return_state.unwrap_or(State::Data);
                match maybe_c {
                    Some(c) => reconsume_in!(tok, c, return_state),
                    None => {
                        tok.switch_to(return_state);
                        eof!();
                    }
                }
            }
        },

        State::HexadecimalCharacterReference => match tok.read_char() {
            Some(c) if c.is_ascii_digit() => {
                mutate_character_reference(tok, 16, c as u32 - '0' as u32);
                cont!();
            }
            Some(c) if ('a'..='f').contains(&c) => {
                mutate_character_reference(tok, 16, c as u32 - 'a' as u32 + 10);
                cont!();
            }
            Some(c) if ('A'..='F').contains(&c) => {
                mutate_character_reference(tok, 16, c as u32 - 'A' as u32 + 10);
                cont!();
            }
            Some(';') => switch_to!(tok, State::NumericCharacterReferenceEnd),
            maybe_c => {
                tok.report_error(Error::MissingSemicolonAfterCharacterReference);
                match maybe_c {
                    Some(c) => reconsume_in!(tok, c, State::NumericCharacterReferenceEnd),
                    None => switch_to!(tok, State::NumericCharacterReferenceEnd),
                }
            }
        },

        State::DecimalCharacterReference => match tok.read_char() {
            Some(c) if c.is_ascii_digit() => {
                mutate_character_reference(tok, 10, c as u32 - '0' as u32);
                cont!();
            }
            Some(';') => switch_to!(tok, State::NumericCharacterReferenceEnd),
            maybe_c => {
                tok.report_error(Error::MissingSemicolonAfterCharacterReference);
                match maybe_c {
                    Some(c) => reconsume_in!(tok, c, State::NumericCharacterReferenceEnd),
                    None => switch_to!(tok, State::NumericCharacterReferenceEnd),
                }
            }
        },

        State::NumericCharacterReferenceEnd => {
            let code = tok.character_reference_code;
            let resolved = match code {
                0 => {
                    tok.report_error(Error::NullCharacterReference);
                    0xfffd
                }
                c if c > 0x0010_ffff => {
                    tok.report_error(Error::CharacterReferenceOutsideUnicodeRange);
                    0xfffd
                }
                crate::state::surrogate_pat!() => {
                    tok.report_error(Error::SurrogateCharacterReference);
                    0xfffd
                }
                crate::state::noncharacter_pat!() => {
                    tok.report_error(Error::NoncharacterCharacterReference);
                    code
                }
                c if WINDOWS_1252_REMAP.iter().any(|(k, _)| *k == c) => {
                    tok.report_error(Error::ControlCharacterReference);
                    WINDOWS_1252_REMAP
                        .iter()
                        .find(|(k, _)| *k == c)
                        .map_or(c, |(_, v)| *v)
                }
                c if matches!(c, 0x0001..=0x0008 | 0x000b | 0x000d..=0x001f | 0x007f..=0x009f) => {
                    tok.report_error(Error::ControlCharacterReference);
                    c
                }
                c => c,
            };

            let ch = char::from_u32(resolved).unwrap_or('\u{fffd}');
            let mut buf = [0u8; 4];
            let s = ch.encode_utf8(&mut buf);
            push_to_return_state_buffer(tok, s);
            let return_state = tok.return_state.unwrap_or(State::Data);
            switch_to!(tok, return_state);
        }
    }
}
