use thiserror::Error as ThisError;

/// All [parsing errors](https://html.spec.whatwg.org/#parse-errors) this tokenizer can emit.
///
/// These never abort tokenization. Each one is handled by one of the three recovery policies
/// described in the crate documentation (insert a replacement character, force quirks mode on the
/// active DOCTYPE, or flush the raw input consumed so far as a [`crate::token::Token::Data`]) and
/// is additionally logged through [`tracing`] at `debug` level so a caller can observe malformed
/// input without having to thread an error channel through every state.
#[derive(Debug, ThisError, Eq, PartialEq, Clone, Copy)]
pub enum Error {
    #[error("abrupt-closing-of-empty-comment")]
    AbruptClosingOfEmptyComment,
    #[error("abrupt-doctype-public-identifier")]
    AbruptDoctypePublicIdentifier,
    #[error("abrupt-doctype-system-identifier")]
    AbruptDoctypeSystemIdentifier,
    #[error("absence-of-digits-in-numeric-character-reference")]
    AbsenceOfDigitsInNumericCharacterReference,
    #[error("cdata-in-html-content")]
    CdataInHtmlContent,
    #[error("character-reference-outside-unicode-range")]
    CharacterReferenceOutsideUnicodeRange,
    #[error("control-character-reference")]
    ControlCharacterReference,
    #[error("end-tag-with-attributes")]
    EndTagWithAttributes,
    #[error("end-tag-with-trailing-solidus")]
    EndTagWithTrailingSolidus,
    #[error("eof-before-tag-name")]
    EofBeforeTagName,
    #[error("eof-in-cdata")]
    EofInCdata,
    #[error("eof-in-comment")]
    EofInComment,
    #[error("eof-in-doctype")]
    EofInDoctype,
    #[error("eof-in-script-html-comment-like-text")]
    EofInScriptHtmlCommentLikeText,
    #[error("eof-in-tag")]
    EofInTag,
    #[error("incorrectly-closed-comment")]
    IncorrectlyClosedComment,
    #[error("incorrectly-opened-comment")]
    IncorrectlyOpenedComment,
    #[error("invalid-character-sequence-after-doctype-name")]
    InvalidCharacterSequenceAfterDoctypeName,
    #[error("invalid-first-character-of-tag-name")]
    InvalidFirstCharacterOfTagName,
    #[error("missing-attribute-value")]
    MissingAttributeValue,
    #[error("missing-doctype-name")]
    MissingDoctypeName,
    #[error("missing-doctype-public-identifier")]
    MissingDoctypePublicIdentifier,
    #[error("missing-doctype-system-identifier")]
    MissingDoctypeSystemIdentifier,
    #[error("missing-end-tag-name")]
    MissingEndTagName,
    #[error("missing-quote-before-doctype-public-identifier")]
    MissingQuoteBeforeDoctypePublicIdentifier,
    #[error("missing-quote-before-doctype-system-identifier")]
    MissingQuoteBeforeDoctypeSystemIdentifier,
    #[error("missing-semicolon-after-character-reference")]
    MissingSemicolonAfterCharacterReference,
    #[error("missing-whitespace-after-doctype-public-keyword")]
    MissingWhitespaceAfterDoctypePublicKeyword,
    #[error("missing-whitespace-after-doctype-system-keyword")]
    MissingWhitespaceAfterDoctypeSystemKeyword,
    #[error("missing-whitespace-before-doctype-name")]
    MissingWhitespaceBeforeDoctypeName,
    #[error("missing-whitespace-between-attributes")]
    MissingWhitespaceBetweenAttributes,
    #[error("missing-whitespace-between-doctype-public-and-system-identifiers")]
    MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
    #[error("nested-comment")]
    NestedComment,
    #[error("noncharacter-character-reference")]
    NoncharacterCharacterReference,
    #[error("noncharacter-in-input-stream")]
    NoncharacterInInputStream,
    #[error("null-character-reference")]
    NullCharacterReference,
    #[error("surrogate-character-reference")]
    SurrogateCharacterReference,
    #[error("surrogate-in-input-stream")]
    SurrogateInInputStream,
    #[error("unexpected-character-after-doctype-system-identifier")]
    UnexpectedCharacterAfterDoctypeSystemIdentifier,
    #[error("unexpected-character-in-attribute-name")]
    UnexpectedCharacterInAttributeName,
    #[error("unexpected-character-in-unquoted-attribute-value")]
    UnexpectedCharacterInUnquotedAttributeValue,
    #[error("unexpected-equals-sign-before-attribute-name")]
    UnexpectedEqualsSignBeforeAttributeName,
    #[error("unexpected-null-character")]
    UnexpectedNullCharacter,
    #[error("unexpected-question-mark-instead-of-tag-name")]
    UnexpectedQuestionMarkInsteadOfTagName,
    #[error("unexpected-solidus-in-tag")]
    UnexpectedSolidusInTag,
    #[error("unknown-named-character-reference")]
    UnknownNamedCharacterReference,
    #[error("duplicate-attribute")]
    DuplicateAttribute,
    #[error("control-character-in-input-stream")]
    ControlCharacterInInputStream,
}

impl Error {
    /// Convert an enum variant back into the `kebab-case` error code as typically written
    /// in the WHATWG spec.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        // thiserror's Display impl above already renders exactly this string; this helper
        // exists for callers that want a `&'static str` instead of going through `Display`.
        match self {
            Self::AbruptClosingOfEmptyComment => "abrupt-closing-of-empty-comment",
            Self::AbruptDoctypePublicIdentifier => "abrupt-doctype-public-identifier",
            Self::AbruptDoctypeSystemIdentifier => "abrupt-doctype-system-identifier",
            Self::AbsenceOfDigitsInNumericCharacterReference => {
                "absence-of-digits-in-numeric-character-reference"
            }
            Self::CdataInHtmlContent => "cdata-in-html-content",
            Self::CharacterReferenceOutsideUnicodeRange => {
                "character-reference-outside-unicode-range"
            }
            Self::ControlCharacterReference => "control-character-reference",
            Self::EndTagWithAttributes => "end-tag-with-attributes",
            Self::EndTagWithTrailingSolidus => "end-tag-with-trailing-solidus",
            Self::EofBeforeTagName => "eof-before-tag-name",
            Self::EofInCdata => "eof-in-cdata",
            Self::EofInComment => "eof-in-comment",
            Self::EofInDoctype => "eof-in-doctype",
            Self::EofInScriptHtmlCommentLikeText => "eof-in-script-html-comment-like-text",
            Self::EofInTag => "eof-in-tag",
            Self::IncorrectlyClosedComment => "incorrectly-closed-comment",
            Self::IncorrectlyOpenedComment => "incorrectly-opened-comment",
            Self::InvalidCharacterSequenceAfterDoctypeName => {
                "invalid-character-sequence-after-doctype-name"
            }
            Self::InvalidFirstCharacterOfTagName => "invalid-first-character-of-tag-name",
            Self::MissingAttributeValue => "missing-attribute-value",
            Self::MissingDoctypeName => "missing-doctype-name",
            Self::MissingDoctypePublicIdentifier => "missing-doctype-public-identifier",
            Self::MissingDoctypeSystemIdentifier => "missing-doctype-system-identifier",
            Self::MissingEndTagName => "missing-end-tag-name",
            Self::MissingQuoteBeforeDoctypePublicIdentifier => {
                "missing-quote-before-doctype-public-identifier"
            }
            Self::MissingQuoteBeforeDoctypeSystemIdentifier => {
                "missing-quote-before-doctype-system-identifier"
            }
            Self::MissingSemicolonAfterCharacterReference => {
                "missing-semicolon-after-character-reference"
            }
            Self::MissingWhitespaceAfterDoctypePublicKeyword => {
                "missing-whitespace-after-doctype-public-keyword"
            }
            Self::MissingWhitespaceAfterDoctypeSystemKeyword => {
                "missing-whitespace-after-doctype-system-keyword"
            }
            Self::MissingWhitespaceBeforeDoctypeName => "missing-whitespace-before-doctype-name",
            Self::MissingWhitespaceBetweenAttributes => "missing-whitespace-between-attributes",
            Self::MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers => {
                "missing-whitespace-between-doctype-public-and-system-identifiers"
            }
            Self::NestedComment => "nested-comment",
            Self::NoncharacterCharacterReference => "noncharacter-character-reference",
            Self::NoncharacterInInputStream => "noncharacter-in-input-stream",
            Self::NullCharacterReference => "null-character-reference",
            Self::SurrogateCharacterReference => "surrogate-character-reference",
            Self::SurrogateInInputStream => "surrogate-in-input-stream",
            Self::UnexpectedCharacterAfterDoctypeSystemIdentifier => {
                "unexpected-character-after-doctype-system-identifier"
            }
            Self::UnexpectedCharacterInAttributeName => "unexpected-character-in-attribute-name",
            Self::UnexpectedCharacterInUnquotedAttributeValue => {
                "unexpected-character-in-unquoted-attribute-value"
            }
            Self::UnexpectedEqualsSignBeforeAttributeName => {
                "unexpected-equals-sign-before-attribute-name"
            }
            Self::UnexpectedNullCharacter => "unexpected-null-character",
            Self::UnexpectedQuestionMarkInsteadOfTagName => {
                "unexpected-question-mark-instead-of-tag-name"
            }
            Self::UnexpectedSolidusInTag => "unexpected-solidus-in-tag",
            Self::UnknownNamedCharacterReference => "unknown-named-character-reference",
            Self::DuplicateAttribute => "duplicate-attribute",
            Self::ControlCharacterInInputStream => "control-character-in-input-stream",
        }
    }
}
