//! Lexical analysis: source text to a token stream.
//!
//! [`tokenize`] is the entry point every other crate uses; [`Lexer`] is
//! exposed for callers that want to drive scanning themselves.

mod cursor;
mod lexer;
mod token;

pub use lexer::{tokenize, Lexer};
pub use token::{Token, TokenKind};

#[cfg(test)]
mod tests {
    use super::*;
    use meowc_util::CompileError;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn empty_source_is_just_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn keywords_are_case_sensitive() {
        assert_eq!(kinds("Wake"), vec![TokenKind::Wake, TokenKind::Eof]);
        assert_eq!(
            kinds("wake"),
            vec![TokenKind::Ident("wake".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn integer_and_float_literals() {
        assert_eq!(kinds("7"), vec![TokenKind::Int(7), TokenKind::Eof]);
        assert_eq!(kinds("3.5"), vec![TokenKind::Float(3.5), TokenKind::Eof]);
    }

    #[test]
    fn float_with_trailing_dot_is_an_error() {
        assert!(tokenize("3.").is_err());
    }

    #[test]
    fn float_with_two_dots_is_an_error() {
        assert!(tokenize("1.2.3").is_err());
    }

    #[test]
    fn string_with_known_escapes() {
        let toks = kinds(r#""a\nb\tc\"d\\e""#);
        assert_eq!(toks, vec![TokenKind::Str("a\nb\tc\"d\\e".into()), TokenKind::Eof]);
    }

    #[test]
    fn string_with_unknown_escape_drops_backslash() {
        assert_eq!(
            kinds(r#""a\zb""#),
            vec![TokenKind::Str("azb".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn unterminated_string_is_an_error() {
        assert!(tokenize("\"abc").is_err());
        assert!(tokenize("\"abc\ndef\"").is_err());
    }

    #[test]
    fn unterminated_block_comment_is_an_error() {
        assert!(tokenize("/* never closed").is_err());
    }

    #[test]
    fn line_and_block_comments_are_skipped() {
        assert_eq!(
            kinds("// comment\n7 /* also \n a comment */ 8"),
            vec![TokenKind::Int(7), TokenKind::Int(8), TokenKind::Eof]
        );
    }

    #[test]
    fn two_char_operators_win_over_one_char_prefixes() {
        assert_eq!(
            kinds("== != <= >= && ||"),
            vec![
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::AndAnd,
                TokenKind::OrOr,
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            kinds("< > !"),
            vec![TokenKind::Lt, TokenKind::Gt, TokenKind::Bang, TokenKind::Eof]
        );
    }

    #[test]
    fn positions_track_lines_and_columns() {
        let tokens = tokenize("Wake\n  meow").unwrap();
        assert_eq!(tokens[0].pos, meowc_util::Pos::new(1, 1));
        assert_eq!(tokens[1].pos, meowc_util::Pos::new(2, 3));
    }

    #[test]
    fn lone_ampersand_is_a_lexical_error() {
        match tokenize("&") {
            Err(CompileError::Lexical(_, _)) => {}
            other => panic!("expected lexical error, got {other:?}"),
        }
    }
}
