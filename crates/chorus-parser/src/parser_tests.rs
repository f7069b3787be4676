//! Unit tests for the line parser.
//!
//! These drive the whole front half of the pipeline (tokenize, split, parse)
//! and check the statements and metadata each statement form produces.

use chorus_core::{BlockMode, LineStyle, Meta, NoteMode, NotePosition, Terminator};

use crate::{
    error::{ErrorCode, ParseError},
    lexer,
    lines::{self, Line},
    parser,
    parser_types::{Arrow, LineOutcome, ParseConfig, ParseResult, Participation, RawAgent, RawStatement},
};

/// Helper function to parse a source string with the default config
fn parse_source(source: &str) -> Result<ParseResult, ParseError> {
    parse_with(source, &ParseConfig::default())
}

fn parse_with(source: &str, config: &ParseConfig) -> Result<ParseResult, ParseError> {
    let tokens = lexer::tokenize(source)?;
    let lines = lines::split_lines(tokens);
    parser::parse_lines(&lines, config)
}

/// Helper to parse a source string and return its statements
fn statements(source: &str) -> Vec<RawStatement> {
    match parse_source(source) {
        Ok(result) => result
            .statements
            .into_iter()
            .map(|statement| statement.inner().clone())
            .collect(),
        Err(err) => panic!("Expected parsing to succeed, but got error: {}", err),
    }
}

/// Helper to parse a single-statement source
fn statement(source: &str) -> RawStatement {
    let mut statements = statements(source);
    assert_eq!(statements.len(), 1, "expected one statement for {:?}", source);
    statements.remove(0)
}

/// Helper to parse a source string and assert failure with a given code
fn assert_fails_with(source: &str, code: ErrorCode) -> ParseError {
    match parse_source(source) {
        Ok(result) => panic!("Expected parsing to fail, but got {:?}", result.statements),
        Err(err) => {
            assert_eq!(err.code(), Some(code), "wrong error for {:?}: {}", source, err);
            err
        }
    }
}

fn agents(names: &[&str]) -> Vec<RawAgent> {
    names.iter().map(|name| RawAgent::named(*name)).collect()
}

fn single_line(source: &str) -> Line {
    let mut lines = lines::split_lines(lexer::tokenize(source).unwrap());
    assert_eq!(lines.len(), 1);
    lines.remove(0)
}

mod meta_tests {
    use super::*;

    #[test]
    fn test_title_keeps_inner_spacing() {
        let result = parse_source("title  My  Diagram  ").unwrap();
        assert_eq!(result.meta.title, "My  Diagram");
        assert!(result.statements.is_empty());
    }

    #[test]
    fn test_title_alone_is_empty() {
        let result = parse_source("title Old\ntitle").unwrap();
        assert_eq!(result.meta.title, "");
    }

    #[test]
    fn test_quoted_title() {
        let result = parse_source("title \"Login: the \\\"happy\\\" path\"").unwrap();
        assert_eq!(result.meta.title, "Login: the \"happy\" path");
    }

    #[test]
    fn test_terminators() {
        let result = parse_source("terminators bar").unwrap();
        assert_eq!(result.meta.terminators, Terminator::Bar);

        let result = parse_source("terminators cross\nterminators box extra").unwrap();
        assert_eq!(result.meta.terminators, Terminator::Box);
    }

    #[test]
    fn test_meta_defaults() {
        let result = parse_source("").unwrap();
        assert_eq!(result.meta, Meta::default());
        assert!(result.statements.is_empty());
    }

    #[test]
    fn test_config_sets_initial_terminators() {
        let config = ParseConfig::new(Terminator::Cross);
        let result = parse_with("A -> B", &config).unwrap();
        assert_eq!(result.meta.terminators, Terminator::Cross);

        let result = parse_with("terminators none", &config).unwrap();
        assert_eq!(result.meta.terminators, Terminator::None);
    }

    #[test]
    fn test_unknown_terminator() {
        let err = assert_fails_with("terminators fancy", ErrorCode::E102);
        assert!(err.to_string().contains("terminators fancy"));
        assert_fails_with("terminators", ErrorCode::E102);
        assert_fails_with("terminators BOX", ErrorCode::E102);
    }

    #[test]
    fn test_parse_line_applies_meta_updates() {
        let mut meta = Meta::default();
        let outcome = parser::parse_line(&single_line("title Hello"), &mut meta).unwrap();
        assert!(matches!(outcome, LineOutcome::Meta(_)));
        assert_eq!(meta.title, "Hello");

        let outcome = parser::parse_line(&single_line("A -> B"), &mut meta).unwrap();
        assert!(matches!(outcome, LineOutcome::Statement(_)));
        assert_eq!(meta.title, "Hello");
    }
}

mod block_tests {
    use super::*;

    fn begin(mode: BlockMode, label: &str) -> RawStatement {
        RawStatement::BlockBegin {
            mode,
            label: label.to_string(),
        }
    }

    fn split(label: &str) -> RawStatement {
        RawStatement::BlockSplit {
            mode: BlockMode::Else,
            label: label.to_string(),
        }
    }

    #[test]
    fn test_if_labels() {
        assert_eq!(statement("if"), begin(BlockMode::If, ""));
        assert_eq!(statement("if: ready"), begin(BlockMode::If, "ready"));
        assert_eq!(statement("if user is  ready"), begin(BlockMode::If, "user is  ready"));
        assert_eq!(statement("if : a: b"), begin(BlockMode::If, "a: b"));
    }

    #[test]
    fn test_repeat() {
        assert_eq!(statement("repeat"), begin(BlockMode::Repeat, ""));
        assert_eq!(statement("repeat: 3 times"), begin(BlockMode::Repeat, "3 times"));
    }

    #[test]
    fn test_else_forms() {
        assert_eq!(statement("else"), split(""));
        assert_eq!(statement("else: otherwise"), split("otherwise"));
        assert_eq!(statement("else if"), split(""));
        assert_eq!(statement("else if: retry"), split("retry"));
        assert_eq!(statement("else if retry"), split("retry"));
        assert_eq!(statement("elif retry"), split("retry"));
        assert_eq!(statement("elif: retry"), split("retry"));
    }

    #[test]
    fn test_else_with_unexpected_token() {
        let err = assert_fails_with("else retry", ErrorCode::E101);
        assert!(err.to_string().contains("else retry"));
    }

    #[test]
    fn test_bare_end() {
        assert_eq!(statement("end"), RawStatement::BlockEnd);
        assert_eq!(statement("  end  # done"), RawStatement::BlockEnd);
    }
}

mod agent_tests {
    use super::*;

    #[test]
    fn test_define() {
        assert_eq!(
            statement("define A, B"),
            RawStatement::AgentDefine {
                agents: agents(&["A", "B"])
            }
        );
    }

    #[test]
    fn test_begin_and_end_modes() {
        assert_eq!(
            statement("begin A"),
            RawStatement::AgentBegin {
                agents: agents(&["A"]),
                mode: Terminator::Box,
            }
        );
        assert_eq!(
            statement("end A, B"),
            RawStatement::AgentEnd {
                agents: agents(&["A", "B"]),
                mode: Terminator::Cross,
            }
        );
    }

    #[test]
    fn test_agent_names_keep_spacing_and_skip_empty_entries() {
        assert_eq!(
            statement("define Big  Bob, , \"C, D\",E"),
            RawStatement::AgentDefine {
                agents: agents(&["Big  Bob", "C, D", "E"])
            }
        );
    }

    #[test]
    fn test_keyword_without_agents_is_unrecognised() {
        assert_fails_with("define", ErrorCode::E100);
        assert_fails_with("begin", ErrorCode::E100);
    }
}

mod async_tests {
    use super::*;

    #[test]
    fn test_simultaneously() {
        assert_eq!(
            statement("simultaneously:"),
            RawStatement::Async {
                target: String::new()
            }
        );
        assert_eq!(
            statement("simultaneously with first  step:"),
            RawStatement::Async {
                target: "first  step".to_string()
            }
        );
    }

    #[test]
    fn test_simultaneously_without_with_is_a_marker() {
        assert_eq!(
            statement("simultaneously foo:"),
            RawStatement::Mark {
                name: "simultaneously foo".to_string()
            }
        );
    }

    #[test]
    fn test_simultaneously_without_colon_is_unrecognised() {
        assert_fails_with("simultaneously with foo", ErrorCode::E100);
    }
}

mod note_tests {
    use super::*;

    fn note(position: NotePosition, mode: NoteMode, names: &[&str], label: &str) -> RawStatement {
        RawStatement::Note {
            position,
            mode,
            agents: agents(names),
            label: label.to_string(),
        }
    }

    #[test]
    fn test_note_positions() {
        assert_eq!(
            statement("note over A: hi"),
            note(NotePosition::Over, NoteMode::Note, &["A"], "hi")
        );
        assert_eq!(
            statement("note left of A, B: x"),
            note(NotePosition::Left, NoteMode::Note, &["A", "B"], "x")
        );
        assert_eq!(
            statement("note right A: x"),
            note(NotePosition::Right, NoteMode::Note, &["A"], "x")
        );
        assert_eq!(
            statement("note between A, B: x"),
            note(NotePosition::Between, NoteMode::Note, &["A", "B"], "x")
        );
    }

    #[test]
    fn test_note_without_agents() {
        assert_eq!(
            statement("note right: edge"),
            note(NotePosition::Right, NoteMode::Note, &[], "edge")
        );
        assert_eq!(
            statement("note over: everywhere"),
            note(NotePosition::Over, NoteMode::Note, &[], "everywhere")
        );
    }

    #[test]
    fn test_text_and_state_modes() {
        assert_eq!(
            statement("text left of A: aside"),
            note(NotePosition::Left, NoteMode::Text, &["A"], "aside")
        );
        assert_eq!(
            statement("state over A: idle"),
            note(NotePosition::Over, NoteMode::State, &["A"], "idle")
        );
    }

    #[test]
    fn test_note_label_spacing() {
        assert_eq!(
            statement("note over A:   spaced  out: yes"),
            note(NotePosition::Over, NoteMode::Note, &["A"], "spaced  out: yes")
        );
    }

    #[test]
    fn test_note_arity() {
        let err = assert_fails_with("note between A: x", ErrorCode::E103);
        assert!(err.to_string().contains("note between A: x"));
        assert_fails_with("state over A, B: x", ErrorCode::E103);
        assert_fails_with("state over: x", ErrorCode::E103);
    }

    #[test]
    fn test_unknown_note_forms_fall_through() {
        assert_fails_with("text over A: x", ErrorCode::E100);
        assert_fails_with("state left of A: x", ErrorCode::E100);
        assert_fails_with("note over A", ErrorCode::E100);
    }
}

mod connection_tests {
    use super::*;

    fn arrow_of(source: &str) -> Arrow {
        match statement(source) {
            RawStatement::Connection { arrow, .. } => arrow,
            other => panic!("Expected connection, got {:?}", other),
        }
    }

    #[test]
    fn test_simple_connection() {
        assert_eq!(statement("A -> B"), RawStatement::connection("A", "B", ""));
        assert_eq!(statement("A->B: hello  world"), RawStatement::connection("A", "B", "hello  world"));
    }

    #[test]
    fn test_operator_styles() {
        let cases = [
            ("A -> B", LineStyle::Solid, false, true),
            ("A <- B", LineStyle::Solid, true, false),
            ("A <-> B", LineStyle::Solid, true, true),
            ("A --> B", LineStyle::Dash, false, true),
            ("A <-- B", LineStyle::Dash, true, false),
            ("A <--> B", LineStyle::Dash, true, true),
        ];
        for (source, line, left, right) in cases {
            assert_eq!(arrow_of(source), Arrow { line, left, right }, "{}", source);
        }
    }

    #[test]
    fn test_multi_word_and_quoted_agents() {
        assert_eq!(
            statement("Big Bob -> Little  Sue: hi"),
            RawStatement::connection("Big Bob", "Little  Sue", "hi")
        );
        assert_eq!(
            statement("\"A -> B\" -> C"),
            RawStatement::connection("A -> B", "C", "")
        );
    }

    #[test]
    fn test_participation_flags() {
        match statement("+A -> -B: bye") {
            RawStatement::Connection { agents, label, .. } => {
                assert_eq!(agents[0], RawAgent::named("A").with_participation(Participation::Show));
                assert_eq!(agents[1], RawAgent::named("B").with_participation(Participation::Hide));
                assert_eq!(label, "bye");
            }
            other => panic!("Expected connection, got {:?}", other),
        }
    }

    #[test]
    fn test_trailing_comment_is_ignored() {
        assert_eq!(statement("A -> B # why"), RawStatement::connection("A", "B", ""));
    }

    #[test]
    fn test_malformed_connections() {
        assert_fails_with("-> B", ErrorCode::E100);
        assert_fails_with("A ->: x", ErrorCode::E100);
        assert_fails_with("A: B -> C", ErrorCode::E100);
        assert_fails_with("A -->> B", ErrorCode::E100);
        assert_fails_with("A B C", ErrorCode::E100);
    }

    #[test]
    fn test_participation_flag_needs_a_name() {
        assert_fails_with("+ -> B", ErrorCode::E100);
        assert_fails_with("A -> +: hi", ErrorCode::E100);
        assert_fails_with("- -> -", ErrorCode::E100);
    }
}

mod marker_tests {
    use super::*;

    #[test]
    fn test_marker() {
        assert_eq!(
            statement("first step:"),
            RawStatement::Mark {
                name: "first step".to_string()
            }
        );
    }

    #[test]
    fn test_lone_colon_is_unrecognised() {
        assert_fails_with(":", ErrorCode::E100);
    }
}

mod document_tests {
    use super::*;

    #[test]
    fn test_statements_keep_line_spans() {
        let source = "A -> B\n  note over A: x\n";
        let result = parse_source(source).unwrap();
        assert_eq!(result.statements.len(), 2);
        assert_eq!(&source[result.statements[0].span().range()], "A -> B");
        assert_eq!(&source[result.statements[1].span().range()], "note over A: x");
    }

    #[test]
    fn test_quoted_keywords_still_match() {
        assert_eq!(
            statement("\"if\": quoted"),
            RawStatement::BlockBegin {
                mode: BlockMode::If,
                label: "quoted".to_string()
            }
        );
    }

    #[test]
    fn test_unrecognised_error_details() {
        let err = assert_fails_with("A -> B\nA  B C", ErrorCode::E100);
        let diagnostic = err.diagnostic();
        assert_eq!(diagnostic.message(), "unrecognised command: A  B C");
        assert_eq!(diagnostic.labels()[0].span().range(), 7..13);
    }

    #[test]
    fn test_lexer_errors_propagate() {
        assert_fails_with("A -> B: \"open", ErrorCode::E001);
    }

    #[test]
    fn test_full_document() {
        let source = r#"
            title Checkout
            terminators box

            define Shop, Bank
            Shop -> Bank: charge   # pay up
            if: declined
              Bank --> Shop: no
            else
              Bank --> Shop: ok
            end
        "#;
        let result = parse_source(source).unwrap();
        assert_eq!(result.meta.title, "Checkout");
        assert_eq!(result.meta.terminators, Terminator::Box);
        let kinds: Vec<&str> = result.statements.iter().map(|s| s.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                "agent-define",
                "connection",
                "block-begin",
                "connection",
                "block-split",
                "connection",
                "block-end"
            ]
        );
    }
}
