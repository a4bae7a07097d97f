use renelle::interpreter::lexer::{Lexer, TokenKind};

fn lex(input: &str) -> Vec<(TokenKind, String, usize, usize)> {
    let mut lexer = Lexer::new(input, "test");
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::Eof;
        tokens.push((token.kind, token.literal, token.line, token.column));
        if done {
            break;
        }
    }
    tokens
}

fn kinds(input: &str) -> Vec<TokenKind> {
    lex(input).into_iter().map(|(kind, ..)| kind).collect()
}

#[test]
fn tokens_carry_line_and_column() {
    let input = "let five = 5\nlet pi = 3.14";
    let expected = [(TokenKind::Let, "let", 1, 1),
                    (TokenKind::Ident, "five", 1, 5),
                    (TokenKind::Assign, "=", 1, 10),
                    (TokenKind::Int, "5", 1, 12),
                    (TokenKind::Let, "let", 2, 1),
                    (TokenKind::Ident, "pi", 2, 5),
                    (TokenKind::Assign, "=", 2, 8),
                    (TokenKind::Float, "3.14", 2, 10),
                    (TokenKind::Eof, "", 2, 14)];

    let tokens = lex(input);
    assert_eq!(tokens.len(), expected.len());
    for (got, want) in tokens.iter().zip(expected.iter()) {
        assert_eq!(got.0, want.0, "kind of {want:?}");
        assert_eq!(got.1, want.1, "literal of {want:?}");
        assert_eq!((got.2, got.3), (want.2, want.3), "position of {want:?}");
    }
}

#[test]
fn multi_character_operators() {
    let input = "a == b != c <= d >= e ** f |> g => h :: i ++ j";
    let expected = [TokenKind::Ident,
                    TokenKind::Eq,
                    TokenKind::Ident,
                    TokenKind::Neq,
                    TokenKind::Ident,
                    TokenKind::Lte,
                    TokenKind::Ident,
                    TokenKind::Gte,
                    TokenKind::Ident,
                    TokenKind::Pow,
                    TokenKind::Ident,
                    TokenKind::Pipe,
                    TokenKind::Ident,
                    TokenKind::Arrow,
                    TokenKind::Ident,
                    TokenKind::ColonColon,
                    TokenKind::Ident,
                    TokenKind::Concat,
                    TokenKind::Ident,
                    TokenKind::Eof];
    assert_eq!(kinds(input), expected);
}

#[test]
fn deep_equality_operators() {
    assert_eq!(kinds("x === y !== z"),
               [TokenKind::Ident,
                TokenKind::DeepEq,
                TokenKind::Ident,
                TokenKind::DeepNeq,
                TokenKind::Ident,
                TokenKind::Eof]);
}

#[test]
fn call_heads_and_atoms_depend_on_adjacency() {
    let tokens = lex("add(1) name: :ok a::b");
    let expected = [(TokenKind::FuncCall, "add", 1, 1),
                    (TokenKind::LParen, "(", 1, 4),
                    (TokenKind::Int, "1", 1, 5),
                    (TokenKind::RParen, ")", 1, 6),
                    (TokenKind::Atom, "name", 1, 8),
                    (TokenKind::Atom, "ok", 1, 14),
                    (TokenKind::Ident, "a", 1, 18),
                    (TokenKind::ColonColon, "::", 1, 19),
                    (TokenKind::Ident, "b", 1, 21),
                    (TokenKind::Eof, "", 1, 22)];

    for (got, want) in tokens.iter().zip(expected.iter()) {
        assert_eq!((got.0, got.1.as_str(), got.2, got.3), *want);
    }
}

#[test]
fn keywords_are_recognized() {
    assert_eq!(kinds("let fn if else cond case return module with true false and or"),
               [TokenKind::Let,
                TokenKind::Function,
                TokenKind::If,
                TokenKind::Else,
                TokenKind::Cond,
                TokenKind::Case,
                TokenKind::Return,
                TokenKind::Module,
                TokenKind::With,
                TokenKind::True,
                TokenKind::False,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Eof]);
}

#[test]
fn commas_semicolons_and_comments_are_separators() {
    let tokens = lex("1, 2 # trailing comment\n3; 4");
    let expected = [(TokenKind::Int, "1", 1, 1),
                    (TokenKind::Int, "2", 1, 4),
                    (TokenKind::Int, "3", 2, 1),
                    (TokenKind::Int, "4", 2, 4),
                    (TokenKind::Eof, "", 2, 5)];
    for (got, want) in tokens.iter().zip(expected.iter()) {
        assert_eq!((got.0, got.1.as_str(), got.2, got.3), *want);
    }
}

#[test]
fn numeric_separators_are_stripped() {
    let tokens = lex("1_000_000 1_0.5");
    assert_eq!((tokens[0].0, tokens[0].1.as_str()), (TokenKind::Int, "1000000"));
    assert_eq!((tokens[1].0, tokens[1].1.as_str()), (TokenKind::Float, "10.5"));
}

#[test]
fn string_escapes_are_processed() {
    let tokens = lex(r#""a\nb\t\"c\" \\ \q""#);
    assert_eq!(tokens[0].0, TokenKind::Str);
    assert_eq!(tokens[0].1, "a\nb\t\"c\" \\ \\q");
}

#[test]
fn interpolated_strings_keep_their_body() {
    let tokens = lex(r#"$"hi {name}!""#);
    assert_eq!(tokens[0].0, TokenKind::Interpolated);
    assert_eq!(tokens[0].1, "hi {name}!");
}

#[test]
fn identifiers_may_contain_question_and_bang() {
    let tokens = lex("has_key? open! exists?(m)");
    assert_eq!((tokens[0].0, tokens[0].1.as_str()), (TokenKind::Ident, "has_key?"));
    assert_eq!((tokens[1].0, tokens[1].1.as_str()), (TokenKind::Ident, "open!"));
    assert_eq!((tokens[2].0, tokens[2].1.as_str()), (TokenKind::FuncCall, "exists?"));
}

#[test]
fn stray_characters_are_illegal() {
    assert_eq!(kinds("|"), [TokenKind::Illegal, TokenKind::Eof]);
    assert_eq!(kinds("$x"), [TokenKind::Illegal, TokenKind::Eof]);
}
