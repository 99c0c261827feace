use tagstream::{Token, Tokenizer};

fn tokenize(input: &str) -> Vec<Token> {
    Tokenizer::new(input).collect()
}

#[test]
fn simple_tag_with_attribute_and_text() {
    let tokens = tokenize(r#"<p class="x">hi</p>"#);
    assert_eq!(tokens.len(), 3);

    let Token::Tag(open) = &tokens[0] else {
        panic!("expected tag, got {:?}", tokens[0]);
    };
    assert_eq!(open.name, "p");
    assert!(!open.is_end_tag);
    assert_eq!(open.attribute("class"), Some("x"));

    assert_eq!(
        tokens[1],
        Token::Data {
            text: "hi".to_owned(),
            encode_entities: true,
        }
    );

    let Token::Tag(close) = &tokens[2] else {
        panic!("expected tag, got {:?}", tokens[2]);
    };
    assert_eq!(close.name, "p");
    assert!(close.is_end_tag);
}

#[test]
fn script_data_is_not_entity_decoded_and_swallows_comment_like_text() {
    let tokens = tokenize("<script>a<!--b--></script>");
    assert_eq!(
        tokens,
        vec![
            Token::Tag(tagstream::Tag {
                name: "script".into(),
                ..Default::default()
            }),
            Token::ScriptData("a<!--b-->".into()),
            Token::Tag(tagstream::Tag {
                name: "script".into(),
                is_end_tag: true,
                ..Default::default()
            }),
        ]
    );
}

#[test]
fn doctype_html() {
    let tokens = tokenize("<!DOCTYPE html>");
    let Token::DocType(doctype) = &tokens[0] else {
        panic!("expected doctype, got {:?}", tokens[0]);
    };
    assert_eq!(doctype.raw_tag_name, "DOCTYPE");
    assert_eq!(doctype.name.as_deref(), Some("html"));
    assert!(!doctype.force_quirks);
}

#[test]
fn doctype_preserves_source_casing_of_keywords() {
    let tokens = tokenize(r#"<!doctype html Public "-//x//" "y">"#);
    let Token::DocType(doctype) = &tokens[0] else {
        panic!("expected doctype, got {:?}", tokens[0]);
    };
    assert_eq!(doctype.raw_tag_name, "doctype");
    assert_eq!(doctype.public_keyword.as_deref(), Some("Public"));
    assert_eq!(doctype.public_identifier.as_deref(), Some("-//x//"));
    assert_eq!(doctype.system_identifier.as_deref(), Some("y"));
}

#[test]
fn html_tag_with_xmlns_sets_html_namespace() {
    let mut tokenizer = Tokenizer::new(r#"<html xmlns="http://www.w3.org/1999/xhtml">"#);
    assert_eq!(tokenizer.html_namespace(), None);
    tokenizer.next();
    assert_eq!(
        tokenizer.html_namespace(),
        Some("http://www.w3.org/1999/xhtml")
    );
}

#[test]
fn comment_with_internal_double_dash_is_preserved() {
    let tokens = tokenize("<!-- a -- b -->");
    assert_eq!(tokens, vec![Token::Comment(" a -- b ".into())]);
}

#[test]
fn attribute_value_decodes_entity() {
    let tokens = tokenize("<a href=foo&amp;bar>");
    let Token::Tag(tag) = &tokens[0] else {
        panic!("expected tag, got {:?}", tokens[0]);
    };
    assert_eq!(tag.attribute("href"), Some("foo&bar"));
}

#[test]
fn rcdata_title_decodes_entities_and_sets_encode_entities_flag() {
    let tokens = tokenize("<title>X &amp; Y</title>");
    assert_eq!(
        tokens,
        vec![
            Token::Tag(tagstream::Tag {
                name: "title".into(),
                ..Default::default()
            }),
            Token::Data {
                text: "X & Y".into(),
                encode_entities: true,
            },
            Token::Tag(tagstream::Tag {
                name: "title".into(),
                is_end_tag: true,
                ..Default::default()
            }),
        ]
    );
}

#[test]
fn cdata_section_is_always_accepted() {
    let tokens = tokenize("<![CDATA[x]]>");
    assert_eq!(tokens, vec![Token::CData("x".into())]);
}

#[test]
fn plaintext_consumes_everything_until_eof() {
    let mut tokenizer = Tokenizer::new("<plaintext>abc<xyz");
    let tag = tokenizer.next().unwrap();
    assert_eq!(
        tag,
        Token::Tag(tagstream::Tag {
            name: "plaintext".into(),
            ..Default::default()
        })
    );
    assert_eq!(
        tokenizer.next(),
        Some(Token::Data {
            text: "abc<xyz".into(),
            encode_entities: false,
        })
    );
    assert_eq!(tokenizer.next(), None);
}

#[test]
fn decode_character_references_can_be_disabled() {
    let tokens: Vec<_> = Tokenizer::with_config(
        "a &amp; b",
        tagstream::Config::new().with_decode_character_references(false),
    )
    .collect();
    assert_eq!(
        tokens,
        vec![Token::Data {
            text: "a &amp; b".into(),
            encode_entities: true,
        }]
    );
}

#[test]
fn duplicate_attribute_keeps_first_occurrence() {
    let tokens = tokenize(r#"<a href="first" href="second">"#);
    let Token::Tag(tag) = &tokens[0] else {
        panic!("expected tag, got {:?}", tokens[0]);
    };
    assert_eq!(tag.attributes.len(), 1);
    assert_eq!(tag.attribute("href"), Some("first"));
}

#[test]
fn eof_mid_tag_flushes_raw_input_as_text() {
    let tokens = tokenize("<a href=");
    assert_eq!(
        tokens,
        vec![Token::Data {
            text: "<a href=".into(),
            encode_entities: true,
        }]
    );
}
