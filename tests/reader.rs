use anyhow::Result;
use ednish::lex::{lex, Token};
use ednish::read::{read, read_all, read_with, ReadError};
use ednish::settings::{Modes, Settings, DEFAULT_MODES, INTERPRETED_FORMAT,
                       VERBATIM_FORMAT};
use ednish::value::{Node, NodeKind};

/// Equality up to kind, text and child structure; positions are
/// allowed to differ.
fn structurally_eq(a: &Node, b: &Node) -> bool {
    a.kind == b.kind
        && a.text == b.text
        && a.children.len() == b.children.len()
        && a.children
            .iter()
            .zip(b.children.iter())
            .all(|(x, y)| structurally_eq(x, y))
}

fn read_err(input: &str) -> (ReadError, u32) {
    let e = read(input).unwrap_err();
    (e.err, e.pos.line)
}

#[test]
fn nil_reads_and_prints() -> Result<()> {
    let n = read("nil")?;
    assert_eq!(n.kind, NodeKind::Nil);
    assert_eq!(n.text.as_str(), "nil");
    assert!(n.children.is_empty());
    assert_eq!(n.to_string(), "nil");
    Ok(())
}

#[test]
fn booleans() -> Result<()> {
    assert_eq!(read("true")?.kind, NodeKind::Bool);
    assert_eq!(read("false")?.kind, NodeKind::Bool);
    assert_eq!(read("true")?.to_string(), "true");
    Ok(())
}

#[test]
fn keywords_and_symbols() -> Result<()> {
    let k = read(":foo")?;
    assert_eq!(k.kind, NodeKind::Keyword);
    assert_eq!(k.text.as_str(), ":foo");
    let s = read("foo")?;
    assert_eq!(s.kind, NodeKind::Symbol);
    assert_eq!(s.text.as_str(), "foo");
    Ok(())
}

#[test]
fn digits_fall_back_to_symbols() -> Result<()> {
    // numeric literals are an extension point; see NodeKind
    let n = read("42")?;
    assert_eq!(n.kind, NodeKind::Symbol);
    assert_eq!(n.text.as_str(), "42");
    Ok(())
}

#[test]
fn list_children_in_source_order() -> Result<()> {
    let n = read("(1 2 3)")?;
    assert_eq!(n.kind, NodeKind::List);
    assert_eq!(n.children.len(), 3);
    let texts: Vec<&str> =
        n.children.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, ["1", "2", "3"]);
    Ok(())
}

#[test]
fn printing_normalizes_whitespace() -> Result<()> {
    assert_eq!(read("( 1   2\n3 )")?.to_string(), "(1 2 3)");
    assert_eq!(read("{:a 1,}")?.to_string(), "{:a 1,}");
    // ^ comma is an ordinary atom character here, not whitespace
    Ok(())
}

#[test]
fn nested_vectors() -> Result<()> {
    let n = read("[1 [2 3] 4]")?;
    assert_eq!(n.kind, NodeKind::Vector);
    assert_eq!(n.children.len(), 3);
    let mid = &n.children[1];
    assert_eq!(mid.kind, NodeKind::Vector);
    assert_eq!(mid.children.len(), 2);
    assert_eq!(n.to_string(), "[1 [2 3] 4]");
    Ok(())
}

#[test]
fn maps_do_not_require_even_child_counts() -> Result<()> {
    let n = read("{:a}")?;
    assert_eq!(n.kind, NodeKind::Map);
    assert_eq!(n.children.len(), 1);
    Ok(())
}

#[test]
fn empty_collections() -> Result<()> {
    for (input, kind) in [("()", NodeKind::List),
                          ("[]", NodeKind::Vector),
                          ("{}", NodeKind::Map)] {
        let n = read(input)?;
        assert_eq!(n.kind, kind);
        assert!(n.children.is_empty());
        assert_eq!(n.to_string(), input);
    }
    Ok(())
}

#[test]
fn tagged_element() -> Result<()> {
    let n = read("#inst \"2020\"")?;
    assert_eq!(n.kind, NodeKind::Tagged);
    assert_eq!(n.children.len(), 2);
    assert_eq!(n.children[0].kind, NodeKind::Symbol);
    assert_eq!(n.children[0].text.as_str(), "inst");
    assert_eq!(n.children[1].kind, NodeKind::String);
    assert_eq!(n.children[1].text.as_str(), "2020");
    assert_eq!(n.to_string(), "#inst \"2020\"");
    Ok(())
}

#[test]
fn discard_element() -> Result<()> {
    let n = read("#_ 1")?;
    assert_eq!(n.kind, NodeKind::Discard);
    assert!(n.kind.is_collection());
    assert!(n.text.is_empty());
    assert_eq!(n.children.len(), 2);
    assert_eq!(n.children[0].kind, NodeKind::Symbol);
    assert_eq!(n.children[0].text.as_str(), "_");
    assert_eq!(n.children[1].kind, NodeKind::Symbol);
    assert_eq!(n.children[1].text.as_str(), "1");
    assert_eq!(n.to_string(), "#_ 1");
    Ok(())
}

#[test]
fn discard_splits_without_a_separator() -> Result<()> {
    // `#_value` tokenizes as `#_` followed by `value`
    let n = read("#_value")?;
    assert_eq!(n.kind, NodeKind::Discard);
    assert_eq!(n.children[1].text.as_str(), "value");
    Ok(())
}

#[test]
fn set_from_hash_brace() -> Result<()> {
    let n = read("#{1 2}")?;
    assert_eq!(n.kind, NodeKind::Set);
    assert_eq!(n.children.len(), 2);
    assert_eq!(n.to_string(), "#{1 2}");
    assert_eq!(read("#{}")?.to_string(), "#{}");
    Ok(())
}

#[test]
fn set_requires_a_map() {
    let (e, _) = read_err("#[1 2]");
    assert!(matches!(e, ReadError::SetRequiresMap));
    let (e, _) = read_err("# 1");
    assert!(matches!(e, ReadError::SetRequiresMap));
}

#[test]
fn invalid_tag_names_are_rejected() {
    let (e, _) = read_err("#foo,bar 1");
    match e {
        ReadError::InvalidTagName(t) => assert_eq!(t.as_str(), "foo,bar"),
        other => panic!("expected InvalidTagName, got {other:?}"),
    }
}

#[test]
fn tag_at_end_of_input() {
    let (e, _) = read_err("#inst");
    assert!(matches!(e, ReadError::UnexpectedEndOfInput));
}

#[test]
fn empty_input() {
    let (e, _) = read_err("");
    assert!(matches!(e, ReadError::EmptyInput));
    let (e, _) = read_err("   ; only a comment\n");
    assert!(matches!(e, ReadError::EmptyInput));
    assert!(read_all("").unwrap().is_empty());
}

#[test]
fn unclosed_collection() {
    let (e, line) = read_err("(1 2");
    assert!(matches!(e, ReadError::UnexpectedEndOfInput));
    assert_eq!(line, 1);
}

#[test]
fn closer_in_value_position() {
    let (e, _) = read_err(")");
    match e {
        ReadError::UnexpectedToken(t) => assert_eq!(t.as_str(), ")"),
        other => panic!("expected UnexpectedToken, got {other:?}"),
    }
    let (_, line) = read_err("\n\n)");
    assert_eq!(line, 3);
}

#[test]
fn mismatched_closers_are_rejected() {
    let (e, _) = read_err("(1 2]");
    match e {
        ReadError::UnexpectedToken(t) => assert_eq!(t.as_str(), "]"),
        other => panic!("expected UnexpectedToken, got {other:?}"),
    }
}

#[test]
fn comments_contribute_no_tokens() -> Result<()> {
    let n = read("1 ; comment\n")?;
    assert_eq!(n.kind, NodeKind::Symbol);
    assert_eq!(n.text.as_str(), "1");
    assert_eq!(read_all("1 ; comment\n")?.len(), 1);
    Ok(())
}

#[test]
fn retained_comments_are_skipped_by_the_reader() -> Result<()> {
    let settings = Settings {
        format: &VERBATIM_FORMAT,
        modes: &Modes {
            retain_comments: true,
        },
    };
    let tokens = lex("1 ; comment", &settings);
    assert!(tokens
            .iter()
            .any(|t| matches!(&t.0, Token::Comment(s)
                              if s.as_str() == " comment")));
    let n = read_with("1 ; comment", &settings)?;
    assert_eq!(n.text.as_str(), "1");
    Ok(())
}

#[test]
fn string_escapes_verbatim_by_default() -> Result<()> {
    let n = read("\"a\\tb\\\"c\"")?;
    assert_eq!(n.kind, NodeKind::String);
    // `\t` stays two characters, the escaped quote loses its backslash
    assert_eq!(n.text.as_str(), "a\\tb\"c");
    assert_eq!(n.to_string(), "\"a\\tb\"c\"");
    Ok(())
}

#[test]
fn string_escapes_interpreted_format() -> Result<()> {
    let settings = Settings {
        format: &INTERPRETED_FORMAT,
        modes: &DEFAULT_MODES,
    };
    let n = read_with("\"a\\tb\\nc\"", &settings)?;
    assert_eq!(n.text.as_str(), "a\tb\nc");
    Ok(())
}

#[test]
fn string_nil_reads_as_nil() -> Result<()> {
    // `nil` outranks the string rule in the classification order
    let n = read("\"nil\"")?;
    assert_eq!(n.kind, NodeKind::Nil);
    Ok(())
}

#[test]
fn unterminated_string_content_is_dropped() {
    let (e, _) = read_err("\"abc");
    assert!(matches!(e, ReadError::EmptyInput));
}

#[test]
fn char_atoms() -> Result<()> {
    let n = read("\\a")?;
    assert_eq!(n.kind, NodeKind::Char);
    assert_eq!(n.text.as_str(), "\\a");
    assert_eq!(n.to_string(), "\\a");
    // an escaped quote or semicolon still lexes as part of the atom
    let l = read("(\\\" \\;)")?;
    assert_eq!(l.children.len(), 2);
    assert_eq!(l.children[0].kind, NodeKind::Char);
    assert_eq!(l.children[0].text.as_str(), "\\\"");
    assert_eq!(l.children[1].text.as_str(), "\\;");
    Ok(())
}

#[test]
fn crlf_counts_as_one_line_break() {
    let settings = Settings::default();
    let tokens = lex("a\r\nb\rc", &settings);
    let lines: Vec<u32> = tokens.iter().map(|t| t.1.line).collect();
    assert_eq!(lines, [1, 2, 3]);
}

#[test]
fn trailing_tokens_after_the_first_form() -> Result<()> {
    let n = read("1 2")?;
    assert_eq!(n.text.as_str(), "1");
    let all = read_all("1 2")?;
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].text.as_str(), "2");
    Ok(())
}

#[test]
fn nesting_depth_is_bounded() {
    let input = "(".repeat(600);
    let (e, _) = read_err(&input);
    assert!(matches!(e, ReadError::NestingTooDeep));
}

#[test]
fn reading_printed_output_reproduces_the_tree() -> Result<()> {
    for input in ["nil", "(1 2 3)", "[1 [2 3] 4]", "{:a 1 :b x}",
                  "#{1 2}", "#tag (a b)", "#_ x",
                  "(foo [bar {:k \"v\"}] \\c)"] {
        let t = read(input)?;
        let u = read(&t.to_string())?;
        assert!(structurally_eq(&t, &u), "not idempotent for {input:?}");
    }
    Ok(())
}
