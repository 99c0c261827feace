use std::collections::VecDeque;
use std::mem;

use crate::error::Error;
use crate::state::ContentModel;
use crate::token::{Attribute, Doctype, Emitter, Tag, TextKind, Token};

enum PendingToken {
    Tag(Tag),
    Comment(String),
    Doctype(Doctype),
}

/// The default implementation of [`Emitter`], used to produce ("emit") [`Token`]s.
#[derive(Debug, Default)]
pub struct DefaultEmitter {
    current_characters: String,
    current_text_kind: Option<TextKind>,
    current_token: Option<PendingToken>,
    last_start_tag: String,
    current_attribute: Option<Attribute>,
    emitted_tokens: VecDeque<Token>,
}

impl std::fmt::Debug for PendingToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PendingToken::Tag(tag) => write!(f, "{tag:?}"),
            PendingToken::Comment(s) => write!(f, "Comment({s:?})"),
            PendingToken::Doctype(d) => write!(f, "{d:?}"),
        }
    }
}

impl DefaultEmitter {
    fn emit_token(&mut self, token: Token) {
        self.flush_current_characters();
        self.emitted_tokens.push_front(token);
    }

    fn flush_current_attribute(&mut self) {
        if let Some(attr) = self.current_attribute.take() {
            match self.current_token {
                Some(PendingToken::Tag(ref mut tag)) => {
                    if tag.attributes.iter().any(|a| a.name == attr.name) {
                        // first occurrence wins, per WHATWG "when an attribute name is encountered
                        // that does not match any other attributes previously added" wording.
                        self.emit_error(Error::DuplicateAttribute);
                    } else {
                        tag.attributes.push(attr);
                    }
                }
                _ => debug_assert!(false, "no tag to attach attribute to"),
            }
        }
    }

    fn flush_current_characters(&mut self) {
        if self.current_characters.is_empty() {
            return;
        }

        let s = mem::take(&mut self.current_characters);
        let token = match self.current_text_kind.take() {
            Some(TextKind::Data) => Token::Data {
                text: s,
                encode_entities: true,
            },
            Some(TextKind::RcData) => Token::Data {
                text: s,
                encode_entities: true,
            },
            Some(TextKind::RawText) => Token::Data {
                text: s,
                encode_entities: false,
            },
            Some(TextKind::CData) => Token::CData(s),
            Some(TextKind::ScriptData) => Token::ScriptData(s),
            None => Token::Data {
                text: s,
                encode_entities: true,
            },
        };
        self.emitted_tokens.push_front(token);
    }
}

impl Emitter for DefaultEmitter {
    type Token = Token;

    fn set_last_start_tag(&mut self, last_start_tag: Option<&str>) {
        self.last_start_tag.clear();
        self.last_start_tag
            .push_str(last_start_tag.unwrap_or_default());
    }

    fn emit_eof(&mut self) {
        self.flush_current_characters();
    }

    fn emit_error(&mut self, error: Error) {
        tracing::debug!(error = %error, "html parse error");
    }

    fn pop_token(&mut self) -> Option<Self::Token> {
        self.emitted_tokens.pop_back()
    }

    fn emit_string(&mut self, kind: TextKind, s: &str) {
        if self.current_text_kind.is_some() && self.current_text_kind != Some(kind) {
            self.flush_current_characters();
        }
        self.current_text_kind = Some(kind);
        self.current_characters.push_str(s);
    }

    fn init_start_tag(&mut self) {
        self.current_token = Some(PendingToken::Tag(Tag {
            is_end_tag: false,
            ..Tag::default()
        }));
    }

    fn init_end_tag(&mut self) {
        self.current_token = Some(PendingToken::Tag(Tag {
            is_end_tag: true,
            ..Tag::default()
        }));
    }

    fn init_comment(&mut self) {
        self.current_token = Some(PendingToken::Comment(String::new()));
    }

    fn init_doctype(&mut self, raw_tag_name: &str) {
        self.current_token = Some(PendingToken::Doctype(Doctype {
            raw_tag_name: raw_tag_name.to_owned(),
            ..Doctype::default()
        }));
    }

    fn emit_current_tag(&mut self) -> Option<ContentModel> {
        self.flush_current_attribute();
        let token = self.current_token.take().expect("no current tag");
        let tag = match token {
            PendingToken::Tag(tag) => tag,
            _ => panic!("current token is not a tag"),
        };

        if tag.is_end_tag {
            if !tag.attributes.is_empty() {
                self.emit_error(Error::EndTagWithAttributes);
            }
            self.set_last_start_tag(None);
            self.emit_token(Token::Tag(tag));
            None
        } else {
            self.set_last_start_tag(Some(&tag.name));
            let content_model = ContentModel::from_tag_name(&tag.name);
            self.emit_token(Token::Tag(tag));
            Some(content_model)
        }
    }

    fn emit_current_comment(&mut self) {
        let token = self.current_token.take().expect("no current comment");
        match token {
            PendingToken::Comment(text) => self.emit_token(Token::Comment(text)),
            _ => panic!("current token is not a comment"),
        }
    }

    fn emit_current_doctype(&mut self) {
        let token = self.current_token.take().expect("no current doctype");
        match token {
            PendingToken::Doctype(doctype) => self.emit_token(Token::DocType(doctype)),
            _ => panic!("current token is not a doctype"),
        }
    }

    fn set_self_closing(&mut self) {
        match self.current_token {
            Some(PendingToken::Tag(ref mut tag)) if !tag.is_end_tag => {
                tag.is_empty_element = true;
            }
            Some(PendingToken::Tag(_)) => {
                self.emit_error(Error::EndTagWithTrailingSolidus);
            }
            _ => debug_assert!(false),
        }
    }

    fn set_force_quirks(&mut self) {
        match self.current_token {
            Some(PendingToken::Doctype(ref mut doctype)) => doctype.force_quirks = true,
            _ => debug_assert!(false),
        }
    }

    fn push_tag_name(&mut self, s: &str) {
        match self.current_token {
            Some(PendingToken::Tag(ref mut tag)) => tag.name.push_str(s),
            _ => debug_assert!(false),
        }
    }

    fn push_comment(&mut self, s: &str) {
        match self.current_token {
            Some(PendingToken::Comment(ref mut text)) => text.push_str(s),
            _ => debug_assert!(false),
        }
    }

    fn push_doctype_name(&mut self, s: &str) {
        match self.current_token {
            Some(PendingToken::Doctype(ref mut doctype)) => {
                doctype.name.get_or_insert_with(String::new).push_str(s);
            }
            _ => debug_assert!(false),
        }
    }

    fn set_doctype_keyword(&mut self, public: bool, spelling: &str) {
        match self.current_token {
            Some(PendingToken::Doctype(ref mut doctype)) => {
                if public {
                    doctype.public_keyword = Some(spelling.to_owned());
                } else {
                    doctype.system_keyword = Some(spelling.to_owned());
                }
            }
            _ => debug_assert!(false),
        }
    }

    fn init_attribute(&mut self) {
        self.flush_current_attribute();
        self.current_attribute = Some(Attribute::default());
    }

    fn push_attribute_name(&mut self, s: &str) {
        self.current_attribute
            .as_mut()
            .expect("no current attribute")
            .name
            .push_str(s);
    }

    fn push_attribute_value(&mut self, s: &str) {
        self.current_attribute
            .as_mut()
            .expect("no current attribute")
            .value
            .push_str(s);
    }

    fn set_doctype_public_identifier(&mut self, value: &str) {
        match self.current_token {
            Some(PendingToken::Doctype(ref mut doctype)) => {
                doctype.public_identifier = Some(value.to_owned());
            }
            _ => debug_assert!(false),
        }
    }

    fn set_doctype_system_identifier(&mut self, value: &str) {
        match self.current_token {
            Some(PendingToken::Doctype(ref mut doctype)) => {
                doctype.system_identifier = Some(value.to_owned());
            }
            _ => debug_assert!(false),
        }
    }

    fn push_doctype_public_identifier(&mut self, s: &str) {
        match self.current_token {
            Some(PendingToken::Doctype(Doctype {
                public_identifier: Some(ref mut id),
                ..
            })) => id.push_str(s),
            _ => debug_assert!(false),
        }
    }

    fn push_doctype_system_identifier(&mut self, s: &str) {
        match self.current_token {
            Some(PendingToken::Doctype(Doctype {
                system_identifier: Some(ref mut id),
                ..
            })) => id.push_str(s),
            _ => debug_assert!(false),
        }
    }

    fn current_is_appropriate_end_tag_token(&mut self) -> bool {
        match self.current_token {
            Some(PendingToken::Tag(ref tag)) => {
                tag.is_end_tag && !self.last_start_tag.is_empty() && self.last_start_tag == tag.name
            }
            _ => false,
        }
    }

    fn current_start_tag_name(&self) -> Option<&str> {
        match self.current_token {
            Some(PendingToken::Tag(ref tag)) if !tag.is_end_tag => Some(tag.name.as_str()),
            _ => None,
        }
    }

    fn current_tag_attribute(&self, name: &str) -> Option<&str> {
        if let Some(ref attr) = self.current_attribute {
            if attr.name == name {
                return Some(attr.value.as_str());
            }
        }
        match self.current_token {
            Some(PendingToken::Tag(ref tag)) => tag.attribute(name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_attribute_name_keeps_first_value() {
        let mut emitter = DefaultEmitter::default();
        emitter.init_start_tag();
        emitter.push_tag_name("a");
        emitter.init_attribute();
        emitter.push_attribute_name("href");
        emitter.push_attribute_value("first");
        emitter.init_attribute();
        emitter.push_attribute_name("href");
        emitter.push_attribute_value("second");
        emitter.emit_current_tag();

        let Some(Token::Tag(tag)) = emitter.pop_token() else {
            panic!("expected a tag token");
        };
        assert_eq!(tag.attributes.len(), 1);
        assert_eq!(tag.attribute("href"), Some("first"));
    }

    #[test]
    fn adjacent_same_kind_text_merges_into_one_token() {
        let mut emitter = DefaultEmitter::default();
        emitter.emit_string(TextKind::Data, "a");
        emitter.emit_string(TextKind::Data, "b");
        emitter.emit_eof();

        assert_eq!(
            emitter.pop_token(),
            Some(Token::Data {
                text: "ab".to_owned(),
                encode_entities: true,
            })
        );
        assert_eq!(emitter.pop_token(), None);
    }

    #[test]
    fn start_tag_updates_last_start_tag_for_appropriate_end_tag_check() {
        let mut emitter = DefaultEmitter::default();
        emitter.init_start_tag();
        emitter.push_tag_name("title");
        emitter.emit_current_tag();
        emitter.pop_token();

        emitter.init_end_tag();
        emitter.push_tag_name("title");
        assert!(emitter.current_is_appropriate_end_tag_token());
    }
}
