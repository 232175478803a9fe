use jackc::grammer::token::{Kw, Pos, TokenKind, TokenKind::*};
use jackc::{Error, Lexer};

fn kinds(code: &str) -> Vec<TokenKind> {
    let tokens = Lexer::new(code).parse().unwrap();
    for (idx, token) in tokens.iter().enumerate() {
        println!("{:>2}: {:?} at {}", idx, token.kind, token.pos);
    }
    tokens.into_iter().map(|token| token.kind).collect()
}

fn ident(name: &str) -> TokenKind {
    Ident(name.to_string())
}

#[test]
fn tests() {
    assert_eq!(
        kinds("class Main { function void main() { do Output.printString(\"Hi all\"); return; } } // done"),
        vec![
            Keyword(Kw::Class),
            ident("Main"),
            Symbol('{'),
            Keyword(Kw::Function),
            Keyword(Kw::Void),
            ident("main"),
            Symbol('('),
            Symbol(')'),
            Symbol('{'),
            Keyword(Kw::Do),
            ident("Output"),
            Symbol('.'),
            ident("printString"),
            Symbol('('),
            Str("Hi all".to_string()),
            Symbol(')'),
            Symbol(';'),
            Keyword(Kw::Return),
            Symbol(';'),
            Symbol('}'),
            Symbol('}'),
        ]
    );
}

#[test]
fn symbols_split_words() {
    assert_eq!(
        kinds("let a[i]=~x-1;"),
        vec![
            Keyword(Kw::Let),
            ident("a"),
            Symbol('['),
            ident("i"),
            Symbol(']'),
            Symbol('='),
            Symbol('~'),
            ident("x"),
            Symbol('-'),
            Int(1),
            Symbol(';'),
        ]
    );
}

#[test]
fn keyword_prefix_is_identifier() {
    assert_eq!(kinds("classy do_it"), vec![ident("classy"), ident("do_it")]);
}

#[test]
fn integer_bounds() {
    assert_eq!(kinds("0 32767"), vec![Int(0), Int(32767)]);
    assert!(matches!(
        Lexer::new("32768").parse(),
        Err(Error::IntegerOverflow(_, lexeme)) if lexeme == "32768"
    ));
    assert!(matches!(
        Lexer::new("let x = 12ab;").parse(),
        Err(Error::InvalidInteger(Pos { row: 0, col: 8 }, lexeme)) if lexeme == "12ab"
    ));
}

#[test]
fn strings() {
    assert_eq!(kinds("\"\""), vec![Str(String::new())]);
    assert_eq!(
        kinds(r#""say \"hi\" // not a comment""#),
        vec![Str("say \"hi\" // not a comment".to_string())]
    );
    assert!(matches!(
        Lexer::new("let s = \"open;\nlet t = 1;").parse(),
        Err(Error::UnterminatedString(Pos { row: 0, col: 8 }))
    ));
}

#[test]
fn block_comments() {
    let code = "\
/** Doc comment
 * spanning lines
 */
class /* inline */ Main {
    /* one line */ field int x;
}";
    assert_eq!(
        kinds(code),
        vec![
            Keyword(Kw::Class),
            ident("Main"),
            Symbol('{'),
            Keyword(Kw::Field),
            Keyword(Kw::Int),
            ident("x"),
            Symbol(';'),
            Symbol('}'),
        ]
    );
}

#[test]
fn block_comment_closes_mid_line() {
    assert_eq!(
        kinds("/* start\n * end */ let"),
        vec![Keyword(Kw::Let)]
    );
}

#[test]
fn malformed_comment_continuation() {
    let code = "/** Doc\n   missing star\n */";
    assert!(matches!(
        Lexer::new(code).parse(),
        Err(Error::MalformedComment(Pos { row: 1, col: 3 }))
    ));
}

#[test]
fn unterminated_comment() {
    assert!(matches!(
        Lexer::new("class Main {\n/* never\n * closed").parse(),
        Err(Error::UnterminatedComment(Pos { row: 1, col: 0 }))
    ));
}

#[test]
fn positions() {
    let tokens = Lexer::new("class A {\n  field int x;\n}").parse().unwrap();
    assert_eq!(tokens[0].pos, Pos { row: 0, col: 0 });
    assert_eq!(tokens[3].pos, Pos { row: 1, col: 2 });
    assert_eq!(tokens[5].pos, Pos { row: 1, col: 12 });
    assert_eq!(tokens[7].pos, Pos { row: 2, col: 0 });
}

#[test]
fn blank_line_in_block_comment() {
    assert!(matches!(
        Lexer::new("/*\n\n*/").parse(),
        Err(Error::MalformedComment(Pos { row: 1, .. }))
    ));
}

#[test]
fn string_characters_fit_constants() {
    assert_eq!(kinds("\"~é\""), vec![Str("~é".to_string())]);
    assert!(matches!(
        Lexer::new("let s = \"ok\u{1F600}\";").parse(),
        Err(Error::InvalidCharacter(Pos { row: 0, col: 11 }, '\u{1F600}'))
    ));
}

#[test]
fn string_length_fits_constant() {
    let code = format!("\"{}\"", "a".repeat(32767));
    assert!(matches!(kinds(&code).as_slice(), [Str(text)] if text.len() == 32767));

    let code = format!("let s = \"{}\";", "a".repeat(32768));
    assert!(matches!(
        Lexer::new(&code).parse(),
        Err(Error::StringTooLong(Pos { row: 0, col: 8 }, 32768))
    ));
}
