use crate::error::Error;
use crate::state::ContentModel;

/// A single HTML attribute, in source order.
///
/// Unlike a map, a `Vec<Attribute>` preserves the order attributes appeared in, which matters to
/// callers that want to re-serialize a tag faithfully.
#[derive(Debug, Default, Eq, PartialEq, Clone)]
pub struct Attribute {
    /// The attribute's name, lowercased.
    pub name: String,
    /// The attribute's value. Empty (not absent) for valueless attributes like `disabled`.
    pub value: String,
}

/// A HTML start or end tag, such as `<p class="x">` or `</p>`.
#[derive(Debug, Default, Eq, PartialEq, Clone)]
pub struct Tag {
    /// The tag's name, lowercased, such as `"p"` or `"a"`.
    pub name: String,
    /// `true` for `</name>`, `false` for `<name>`.
    pub is_end_tag: bool,
    /// `true` if the tag was closed with `/>`. Only meaningful on start tags; WHATWG does not
    /// treat this as self-closing for most HTML elements, but the flag is still surfaced so
    /// callers that care (e.g. when handling foreign content) can see it.
    pub is_empty_element: bool,
    /// This tag's attributes, in the order they appeared in the source.
    ///
    /// Duplicate attribute names are rejected: only the first occurrence is kept, and a
    /// [`Error::DuplicateAttribute`] is logged for each later one, preserving the first
    /// occurrence's position in this list.
    pub attributes: Vec<Attribute>,
}

impl Tag {
    /// Look up an attribute's value by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }
}

/// A doctype declaration, such as `<!DOCTYPE html>`.
#[derive(Debug, Default, Eq, PartialEq, Clone)]
pub struct Doctype {
    /// The markup declaration keyword exactly as it was spelled in the source, e.g. `"DOCTYPE"`
    /// or `"doctype"`. WHATWG tree construction never looks at this; it is kept for callers that
    /// want to round-trip the original casing.
    pub raw_tag_name: String,
    /// The doctype's name, lowercased. `None` if no name was present at all.
    pub name: Option<String>,
    /// The `PUBLIC` keyword exactly as spelled in the source, if one was present. Doctype
    /// keywords are matched ASCII-case-insensitively, so this may read e.g. `"Public"`.
    pub public_keyword: Option<String>,
    /// The `SYSTEM` keyword exactly as spelled in the source, if one was present and it
    /// introduced a system identifier with no public identifier.
    pub system_keyword: Option<String>,
    /// The doctype's public identifier, if any.
    pub public_identifier: Option<String>,
    /// The doctype's system identifier, if any.
    pub system_identifier: Option<String>,
    /// The [force-quirks flag](https://html.spec.whatwg.org/#force-quirks-flag).
    pub force_quirks: bool,
}

/// The token type used by [`crate::tokenizer::DefaultEmitter`].
///
/// You can define your own token type by implementing [`Emitter`] and constructing a
/// [`crate::Tokenizer`] with [`crate::Tokenizer::new_with_emitter`].
#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    /// Character data, decoded according to [`crate::Config::with_decode_character_references`].
    Data {
        /// The text itself.
        text: String,
        /// `true` if this text came from a context (Data, RCDATA) where character references are
        /// resolved; `false` if it came from a raw-text context where `&` is always literal.
        encode_entities: bool,
    },
    /// Character data from inside a `<![CDATA[ ... ]]>` section.
    CData(String),
    /// Character data from inside a `<script>` element, never entity-decoded.
    ScriptData(String),
    /// A HTML comment's contents, without the `<!--`/`-->` delimiters.
    Comment(String),
    /// A `<!DOCTYPE ...>` declaration.
    DocType(Doctype),
    /// A HTML start or end tag.
    Tag(Tag),
}

/// What kind of token [`Emitter::emit_string`] is currently contributing to.
///
/// The tokenizer's text-mode states (§4.2) all funnel through the same accumulate-then-flush
/// buffer; this tells the emitter which [`Token`] variant to wrap the flushed text in.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TextKind {
    /// Plain character data; entities are decoded unless turned off in [`crate::Config`].
    Data,
    /// Character data inside RCDATA (`<title>`, `<textarea>`); entities are always decoded.
    RcData,
    /// Character data inside RAWTEXT (`<style>`, `<xmp>`, ...); entities are never decoded.
    RawText,
    /// Character data inside a CDATA section.
    CData,
    /// Character data inside `<script>`.
    ScriptData,
}

/// An emitter is an object providing methods to the tokenizer to produce tokens.
///
/// Domain-specific applications of the HTML tokenizer can manually implement this trait to
/// customize per-token allocations, or avoid them altogether.
///
/// An emitter is assumed to have these internal states:
///
/// * _last start tag_: the most recently emitted start tag's name.
/// * _current token_: can be a tag, doctype, or comment token. There's only one current token.
/// * _current attribute_: the currently processed HTML attribute, consisting of a name and value.
///
/// The following methods describe the behavior the WHATWG tokenization algorithm expects, but
/// that does not mean an implementation needs to follow it exactly. For example, an emitter whose
/// caller ignores errors can make `emit_error` a no-op.
///
/// The state machine needs a functional `current_is_appropriate_end_tag_token` to perform correct
/// transitions between raw-text and data states, however.
pub trait Emitter {
    /// The token type emitted by this emitter. This controls what type of values the
    /// [`crate::Tokenizer`] yields when used as an iterator.
    type Token;

    /// Set the name of the _last start tag_. Primarily for testing; this does not affect the
    /// current tag.
    fn set_last_start_tag(&mut self, last_start_tag: Option<&str>);

    /// The state machine has reached the end of the file. It will soon call `pop_token` for the
    /// last time.
    fn emit_eof(&mut self);

    /// A (probably recoverable) parse error has occurred.
    ///
    /// Positional context is logged by the tokenizer itself at the call site, where the current
    /// line/column is known; this method exists for emitters that want to react to error
    /// *kinds* (e.g. counting them) without re-deriving position.
    fn emit_error(&mut self, error: Error);

    /// After every state change, the tokenizer calls this to retrieve a new token that can be
    /// returned via the tokenizer's iterator interface.
    fn pop_token(&mut self) -> Option<Self::Token>;

    /// Emit a run of plain characters as a text token of the given kind.
    fn emit_string(&mut self, kind: TextKind, s: &str);

    /// Set the _current token_ to a start tag.
    fn init_start_tag(&mut self);
    /// Set the _current token_ to an end tag.
    fn init_end_tag(&mut self);
    /// Set the _current token_ to a comment with empty contents.
    fn init_comment(&mut self);
    /// Set the _current token_ to a fresh doctype: empty `raw_tag_name`, no name, no public or
    /// system identifier, `force_quirks = false`.
    fn init_doctype(&mut self, raw_tag_name: &str);

    /// Emit the _current token_, assuming it is a tag.
    ///
    /// Also flushes the current attribute and appends it to the tag. See
    /// [`Emitter::init_attribute`] for duplicate handling.
    ///
    /// If a start tag is emitted, updates the _last start tag_.
    ///
    /// The return value tells the tokenizer which content model to switch to, approximating the
    /// tree-construction feedback loop a standalone tokenizer does not have access to (see
    /// `ContentModel::from_tag_name`).
    ///
    /// Panics if the current token is not a tag.
    fn emit_current_tag(&mut self) -> Option<ContentModel>;

    /// Emit the _current token_, assuming it is a comment. Panics otherwise.
    fn emit_current_comment(&mut self);
    /// Emit the _current token_, assuming it is a doctype. Panics otherwise.
    fn emit_current_doctype(&mut self);

    /// Assuming the _current token_ is a start or end tag, set the self-closing flag.
    ///
    /// If it is an end tag, the emitter should emit [`Error::EndTagWithTrailingSolidus`].
    fn set_self_closing(&mut self);
    /// Assuming the _current token_ is a doctype, set its force-quirks flag to `true`.
    fn set_force_quirks(&mut self);

    /// Append to the current tag's name. Panics if the current token is not a tag.
    fn push_tag_name(&mut self, s: &str);
    /// Append to the current comment's contents. Panics if the current token is not a comment.
    fn push_comment(&mut self, s: &str);
    /// Append to the current doctype's name (creating it if absent). Panics if the current token
    /// is not a doctype.
    fn push_doctype_name(&mut self, s: &str);

    /// Record that a `PUBLIC`/`SYSTEM` keyword was seen, exactly as spelled.
    fn set_doctype_keyword(&mut self, public: bool, spelling: &str);

    /// Set the _current attribute_ to a new one with an empty name and value.
    ///
    /// The previous attribute, if any, is flushed onto the _current token_. If an attribute with
    /// that name already exists on the tag, the new one is dropped and
    /// [`Error::DuplicateAttribute`] is emitted; the existing one keeps its original position.
    ///
    /// If the current token is an end tag, [`Error::EndTagWithAttributes`] is emitted once the tag
    /// itself is emitted.
    fn init_attribute(&mut self);
    /// Append to the current attribute's name. Panics if there is no current attribute.
    fn push_attribute_name(&mut self, s: &str);
    /// Append to the current attribute's value. Panics if there is no current attribute.
    fn push_attribute_value(&mut self, s: &str);

    /// Set the current doctype's public identifier (creating it, as distinct from empty).
    fn set_doctype_public_identifier(&mut self, value: &str);
    /// Set the current doctype's system identifier (creating it, as distinct from empty).
    fn set_doctype_system_identifier(&mut self, value: &str);
    /// Append to the current doctype's public identifier.
    fn push_doctype_public_identifier(&mut self, s: &str);
    /// Append to the current doctype's system identifier.
    fn push_doctype_system_identifier(&mut self, s: &str);

    /// Returns `true` iff the _current token_ is an end tag, a _last start tag_ exists, and their
    /// names match (the "appropriate end tag token" rule used to decide whether a raw-text
    /// end-tag candidate actually closes the current element).
    fn current_is_appropriate_end_tag_token(&mut self) -> bool;

    /// Returns the _current token_'s name, but only if it is a start tag (`None` for an end tag
    /// or any other current token). Used by the tokenizer to detect `<html ...>` so it can look
    /// up the `xmlns` attribute via [`Emitter::current_tag_attribute`].
    fn current_start_tag_name(&self) -> Option<&str>;

    /// Returns the current tag's attribute value by name, including the in-progress attribute
    /// that has not yet been flushed onto the tag. `None` if the current token is not a tag or
    /// has no such attribute.
    fn current_tag_attribute(&self, name: &str) -> Option<&str>;
}
