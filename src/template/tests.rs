use super::*;
use crate::error::CourierError;

fn concat(tokens: &[Token]) -> String {
    tokens.iter().map(Token::text).collect()
}

#[test]
fn test_plain_text_is_single_static_token() {
    let tokens = tokenize("no placeholders here").unwrap();
    assert_eq!(tokens, vec![Token::Static("no placeholders here".to_string())]);
}

#[test]
fn test_empty_input_yields_no_tokens() {
    let tokens = tokenize("").unwrap();
    assert!(tokens.is_empty());
}

#[test]
fn test_single_macro_block() {
    let tokens = tokenize("{{first_name}}").unwrap();
    assert_eq!(tokens, vec![Token::Macro("{{first_name}}".to_string())]);
}

#[test]
fn test_static_macro_static() {
    let tokens = tokenize("Hello {{name}}, welcome!").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::Static("Hello ".to_string()),
            Token::Macro("{{name}}".to_string()),
            Token::Static(", welcome!".to_string()),
        ]
    );
}

#[test]
fn test_macro_at_start_emits_no_empty_static() {
    let tokens = tokenize("{{name}} trailing").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::Macro("{{name}}".to_string()),
            Token::Static(" trailing".to_string()),
        ]
    );
}

#[test]
fn test_macro_at_end_emits_no_empty_static() {
    let tokens = tokenize("leading {{name}}").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::Static("leading ".to_string()),
            Token::Macro("{{name}}".to_string()),
        ]
    );
}

#[test]
fn test_adjacent_macro_blocks() {
    let tokens = tokenize("{{a}}{{b}}").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::Macro("{{a}}".to_string()),
            Token::Macro("{{b}}".to_string()),
        ]
    );
}

#[test]
fn test_nested_placeholder_stays_in_one_block() {
    let tokens = tokenize("{{ upper {{first_name}} }}").unwrap();
    assert_eq!(
        tokens,
        vec![Token::Macro("{{ upper {{first_name}} }}".to_string())]
    );
}

#[test]
fn test_triple_brace_balances_to_single_block() {
    let tokens = tokenize("{{{ext_upper}}}").unwrap();
    assert_eq!(tokens, vec![Token::Macro("{{{ext_upper}}}".to_string())]);
}

#[test]
fn test_trailing_extra_brace_is_static() {
    let tokens = tokenize("{{ext_upper}}}").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::Macro("{{ext_upper}}".to_string()),
            Token::Static("}".to_string()),
        ]
    );
}

#[test]
fn test_unmatched_open_is_an_error() {
    let err = tokenize("{{{ foo }}").unwrap_err();
    match err {
        CourierError::MismatchedBrace { snippet } => {
            assert_eq!(snippet, "{{{ foo }}");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_unmatched_open_after_static_text_reports_tail_only() {
    let err = tokenize("intro {{never closed").unwrap_err();
    match err {
        CourierError::MismatchedBrace { snippet } => {
            assert_eq!(snippet, "{{never closed");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_lone_closing_braces_are_static() {
    let tokens = tokenize("a }} b").unwrap();
    assert_eq!(tokens, vec![Token::Static("a }} b".to_string())]);
}

#[test]
fn test_round_trip_reproduces_input() {
    let inputs = [
        "plain",
        "{{a}}",
        "x {{ upper {{inner}} }} y {{b}}}",
        "{{{deep}}} tail",
        "mixed } braces {{key}} and {{ m {{n}} }}",
        "日本語 {{emoji}} 🎉",
    ];
    for input in inputs {
        let tokens = tokenize(input).unwrap();
        assert_eq!(concat(&tokens), input, "round-trip failed for {:?}", input);
    }
}

#[test]
fn test_every_character_covered_exactly_once() {
    let input = "a{{b}}c{{ d {{e}} }}f";
    let tokens = tokenize(input).unwrap();
    let total: usize = tokens.iter().map(|t| t.text().len()).sum();
    assert_eq!(total, input.len());
}

#[test]
fn test_macro_body_strips_delimiters_and_whitespace() {
    let tokens = tokenize("{{  ext_upper {{abc}}  }}").unwrap();
    assert_eq!(tokens[0].macro_body(), Some("ext_upper {{abc}}"));
}

#[test]
fn test_degenerate_block_closing_on_single_brace() {
    // The counter reaches zero on a lone `}` when the body contains its own
    // closing brace. Still one block, still lossless.
    let tokens = tokenize("{{a} b}").unwrap();
    assert_eq!(tokens, vec![Token::Macro("{{a} b}".to_string())]);
    assert_eq!(tokens[0].macro_body(), Some("a} b"));
}

#[test]
fn test_static_token_has_no_macro_body() {
    let tokens = tokenize("just text").unwrap();
    assert_eq!(tokens[0].macro_body(), None);
}

#[test]
fn test_multiline_content() {
    let tokens = tokenize("Subject: {{subject}}\n\nDear {{name}},\n").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::Static("Subject: ".to_string()),
            Token::Macro("{{subject}}".to_string()),
            Token::Static("\n\nDear ".to_string()),
            Token::Macro("{{name}}".to_string()),
            Token::Static(",\n".to_string()),
        ]
    );
}
