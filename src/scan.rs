use crate::engine::{Decl, DeclKind, TranslationUnit};
use logos::{Logos, Span};
use std::collections::HashSet;

#[derive(Debug, Logos, Copy, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
#[logos(skip r"#[^\n]*")]
pub(crate) enum Token {
    #[token("typedef")]
    Typedef,
    #[token("struct")]
    Struct,
    #[token("union")]
    Union,
    #[token("enum")]
    Enum,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token("*")]
    Star,
    #[token("=")]
    Equals,
    #[regex("[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,
    #[regex(r"[0-9][A-Za-z0-9_.]*")]
    Number,
    #[regex(r#""([^"\\]|\\.)*""#)]
    StringLit,
    #[regex(r"'([^'\\]|\\.)*'")]
    CharLit,
    #[regex(r"[\[\]<>.+\-!&|^%?:~/]")]
    Punct,
}

const KEYWORDS: &[&str] = &[
    "void", "int", "char", "short", "long", "float", "double", "signed", "unsigned", "const",
    "volatile", "static", "extern", "inline", "register", "auto", "restrict", "return", "if",
    "else", "while", "do", "for", "switch", "case", "default", "break", "continue", "goto",
    "sizeof",
];

struct ScanToken {
    token: Token,
    span: Span,
    brace: usize,
    paren: usize,
}

/// Scan the top-level declarations of one translation unit. This is a
/// structural scan, not a C parse: macros are not expanded and declarator
/// syntax is only approximated.
pub(crate) fn scan_translation_unit(
    main_file: &str,
    source: &str,
    skip_function_bodies: bool,
) -> Result<TranslationUnit, String> {
    let tokens = lex(main_file, source)?;

    let mut decls = Vec::new();
    let mut start = 0;
    while start < tokens.len() {
        let end = find_item_end(main_file, source, &tokens, start)?;
        if let Some(decl) = classify_item(source, &tokens[start..end], skip_function_bodies) {
            decls.push(decl);
        }
        start = end;
    }

    Ok(TranslationUnit {
        main_file: main_file.to_string(),
        decls,
    })
}

fn lex(main_file: &str, source: &str) -> Result<Vec<ScanToken>, String> {
    let mut res = Vec::new();
    let mut brace = 0usize;
    let mut paren = 0usize;

    for (token, span) in Token::lexer(source).spanned() {
        let token = token.map_err(|_| {
            format!(
                "{main_file}:{}: unrecognized token",
                line_of(source, span.start)
            )
        })?;

        match token {
            Token::RBrace if brace > 0 => brace -= 1,
            Token::RParen if paren > 0 => paren -= 1,
            _ => {}
        }
        res.push(ScanToken {
            token,
            span: span.clone(),
            brace,
            paren,
        });
        match token {
            Token::LBrace => brace += 1,
            Token::LParen => paren += 1,
            _ => {}
        }
    }

    Ok(res)
}

/// Find the end of the item starting at `start`: a top-level semicolon, or
/// the closing brace of a function definition body.
fn find_item_end(
    main_file: &str,
    source: &str,
    tokens: &[ScanToken],
    start: usize,
) -> Result<usize, String> {
    let base = tokens[start].brace;
    let mut saw_paren = false;

    for (offset, tok) in tokens[start..].iter().enumerate() {
        let at_top = tok.brace == base && tok.paren == 0;
        match tok.token {
            Token::LParen if tok.brace == base => saw_paren = true,
            Token::Semicolon if at_top => return Ok(start + offset + 1),
            Token::RBrace if tok.brace == base => {
                if saw_paren {
                    // Function definition bodies are not followed by ';'.
                    return Ok(start + offset + 1);
                }
            }
            Token::RBrace if tok.brace < base => {
                return Err(format!(
                    "{main_file}:{}: unbalanced '}}'",
                    line_of(source, tok.span.start)
                ));
            }
            _ => {}
        }
    }

    Err(format!("{main_file}: unexpected end of file"))
}

fn classify_item(source: &str, item: &[ScanToken], skip_function_bodies: bool) -> Option<Decl> {
    let base = item[0].brace;

    let top_idents: Vec<&str> = item
        .iter()
        .filter(|t| t.token == Token::Identifier && t.brace == base && t.paren == 0)
        .map(|t| token_text(source, t))
        .collect();

    let first_paren = item
        .iter()
        .position(|t| t.token == Token::LParen && t.brace == base);
    let first_equals = item
        .iter()
        .position(|t| t.token == Token::Equals && t.brace == base && t.paren == 0);
    let has_body = item.iter().any(|t| t.token == Token::LBrace);

    let (kind, name) = if item[0].token == Token::Typedef {
        let name = top_idents
            .iter()
            .rev()
            .copied()
            .find(|name| !is_keyword(name))
            .or_else(|| last_non_keyword(source, item))?;
        (DeclKind::Typedef, name)
    } else if let Some(paren) = first_paren.filter(|p| first_equals.map_or(true, |e| e > *p)) {
        // A top-level parenthesis with no initializer before it marks a
        // function declarator.
        let name = item[..paren]
            .iter()
            .rev()
            .find(|t| t.token == Token::Identifier && t.brace == base && t.paren == 0)
            .map(|t| token_text(source, t))
            .filter(|name| !is_keyword(name));
        match name {
            Some(name) => (DeclKind::Function, name),
            // Function-pointer declarators such as `int (*fp)(void);` have
            // only type names before the parenthesis.
            None => (DeclKind::Variable, first_non_keyword(source, item)?),
        }
    } else if let Some(kind) = aggregate_kind(item[0].token) {
        let name = match top_idents.first() {
            Some(name) if !is_keyword(name) => *name,
            _ => first_non_keyword(source, item)?,
        };
        if has_body || top_idents.len() == 1 {
            (kind, name)
        } else {
            // `struct s v;` declares a variable of an existing aggregate.
            (DeclKind::Variable, *top_idents.last()?)
        }
    } else {
        let declarator_end = first_equals.unwrap_or(item.len());
        let name = item[..declarator_end]
            .iter()
            .rev()
            .find(|t| t.token == Token::Identifier && t.brace == base && t.paren == 0)
            .map(|t| token_text(source, t))
            .filter(|name| !is_keyword(name))?;
        (DeclKind::Variable, name)
    };

    let ref_end = if kind == DeclKind::Function && skip_function_bodies {
        item.iter()
            .position(|t| t.token == Token::LBrace)
            .unwrap_or(item.len())
    } else {
        item.len()
    };

    let mut seen = HashSet::new();
    let refs = item[..ref_end]
        .iter()
        .filter(|t| t.token == Token::Identifier)
        .map(|t| token_text(source, t))
        .filter(|id| *id != name && !is_keyword(id) && seen.insert(*id))
        .map(String::from)
        .collect();

    Some(Decl {
        kind,
        name: name.to_string(),
        refs,
    })
}

fn token_text<'s>(source: &'s str, tok: &ScanToken) -> &'s str {
    &source[tok.span.start..tok.span.end]
}

fn aggregate_kind(token: Token) -> Option<DeclKind> {
    match token {
        Token::Struct => Some(DeclKind::Struct),
        Token::Union => Some(DeclKind::Union),
        Token::Enum => Some(DeclKind::Enum),
        _ => None,
    }
}

fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

fn first_non_keyword<'s>(source: &'s str, item: &[ScanToken]) -> Option<&'s str> {
    item.iter()
        .filter(|t| t.token == Token::Identifier)
        .map(|t| &source[t.span.start..t.span.end])
        .find(|name| !is_keyword(name))
}

fn last_non_keyword<'s>(source: &'s str, item: &[ScanToken]) -> Option<&'s str> {
    item.iter()
        .rev()
        .filter(|t| t.token == Token::Identifier)
        .map(|t| &source[t.span.start..t.span.end])
        .find(|name| !is_keyword(name))
}

fn line_of(source: &str, offset: usize) -> usize {
    source[..offset].matches('\n').count() + 1
}
