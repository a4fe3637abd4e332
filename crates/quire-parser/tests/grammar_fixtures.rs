//! Grammar fixtures for the inline dialect, through both the raw tokenizer
//! and the markdown-it bridge

use quire_parser::{create_parser, parse_ast, tokenize, NodeKind, TokenKind};
use test_case::test_case;

fn ast_kinds(input: &str) -> Vec<NodeKind> {
    let ast = parse_ast(&create_parser(), input);
    ast.iter()
        .map(|id| ast.kind(id).clone())
        .filter(|kind| {
            matches!(
                kind,
                NodeKind::Wikilink { .. } | NodeKind::Embed { .. } | NodeKind::Tag { .. } | NodeKind::Priority { .. }
            )
        })
        .collect()
}

#[test_case("[[123]]", "123", "" ; "wikilink text defaults to empty")]
#[test_case("[[123|hello]]", "123", "hello" ; "wikilink custom text")]
#[test_case("[[a b]]", "a b", "" ; "wikilink with space")]
fn test_wikilink_payload(input: &str, id: &str, text: &str) {
    assert_eq!(
        ast_kinds(input),
        vec![NodeKind::Wikilink {
            id: id.to_string(),
            text: text.to_string()
        }]
    );
}

#[test_case("![[123]]", "123", "123" ; "embed text defaults to id")]
#[test_case("![[123|hello]]", "123", "hello" ; "embed custom text")]
fn test_embed_payload(input: &str, id: &str, text: &str) {
    assert_eq!(
        ast_kinds(input),
        vec![NodeKind::Embed {
            id: id.to_string(),
            text: text.to_string()
        }]
    );
}

#[test_case("[[" ; "open only")]
#[test_case("[[]]" ; "empty id")]
#[test_case("![[" ; "embed open only")]
#[test_case("[[abc" ; "unterminated")]
#[test_case("[[abc|]]" ; "empty text")]
#[test_case("![[abc|]]" ; "embed empty text")]
#[test_case("[[a\nb]]" ; "newline in id")]
fn test_invalid_shapes_stay_text(input: &str) {
    assert!(ast_kinds(input).is_empty());
    let tokens = tokenize(input);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Text(input.to_string()));
}

#[test]
fn test_extra_brackets() {
    assert_eq!(
        ast_kinds("[[[123]]]"),
        vec![NodeKind::Wikilink {
            id: "123".to_string(),
            text: String::new()
        }]
    );
}

#[test]
fn test_tag_fixture() {
    assert_eq!(
        ast_kinds("#hello-world"),
        vec![NodeKind::Tag {
            name: "hello-world".to_string()
        }]
    );
}

#[test]
fn test_priority_position() {
    let input = "Task !!2 with priority";
    let tokens = tokenize(input);
    let priority = tokens
        .iter()
        .find(|t| t.kind == TokenKind::Priority { level: 2 })
        .unwrap();
    assert_eq!(&input[priority.range.clone()], "!!2");
    assert_eq!(ast_kinds(input), vec![NodeKind::Priority { level: 2 }]);
}

#[test]
fn test_dialect_is_inert_in_code() {
    let input = "`[[a]] #b !!1 ![[c]]`\n\n```\n[[a]] #b !!1 ![[c]]\n```\n";
    assert!(ast_kinds(input).is_empty());
}

#[test]
fn test_mixed_line() {
    assert_eq!(
        ast_kinds("- [ ] call [[bob|Bob]] #work/client !!1 ![[agenda]]"),
        vec![
            NodeKind::Wikilink {
                id: "bob".to_string(),
                text: "Bob".to_string()
            },
            NodeKind::Tag {
                name: "work/client".to_string()
            },
            NodeKind::Priority { level: 1 },
            NodeKind::Embed {
                id: "agenda".to_string(),
                text: "agenda".to_string()
            },
        ]
    );
}
