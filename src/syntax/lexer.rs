//! Minimal source lexer built on logos.
//!
//! Only what declaration scanning needs is distinguished: names, the
//! handful of declaration keywords, block/statement markers and the member
//! access operators that turn a keyword back into a plain name. Everything
//! else collapses into [`SyntaxKind::Other`].
//!
//! Once a source contains an open tag, text outside `<?php ... ?>` regions
//! is inline output and never lexed. A source with no open tag at all is
//! lexed as code throughout.

use logos::Logos;

/// Raw tokens produced by logos inside a code region.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"#([^\[\n][^\n]*)?")]
#[logos(skip r"/\*([^*]|\*+[^*/])*\*+/")]
enum RawToken {
    #[regex(r"\\?[a-zA-Z_\u{80}-\u{10FFFF}][a-zA-Z0-9_\u{80}-\u{10FFFF}]*(\\[a-zA-Z_\u{80}-\u{10FFFF}][a-zA-Z0-9_\u{80}-\u{10FFFF}]*)*")]
    Name,

    #[regex(r"\$[a-zA-Z_\u{80}-\u{10FFFF}][a-zA-Z0-9_\u{80}-\u{10FFFF}]*")]
    Variable,

    #[regex(r"'([^'\\]|\\.)*'")]
    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    #[regex(r"[0-9][0-9a-zA-Z_.]*")]
    Number,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token(";")]
    Semicolon,

    #[token("::")]
    DoubleColon,

    #[token("->")]
    #[token("?->")]
    Arrow,

    #[token("#[")]
    AttributeOpen,

    #[token("?>")]
    CloseTag,
}

/// Token kinds seen by the declaration scanner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    Namespace,
    Class,
    Interface,
    Trait,
    Enum,
    Return,
    New,
    /// Identifier or (fully) qualified name.
    Name,
    LBrace,
    RBrace,
    Semicolon,
    DoubleColon,
    Arrow,
    /// Variables, literals, operators and anything unrecognised.
    Other,
}

impl SyntaxKind {
    /// Check if this keyword opens a type declaration.
    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            SyntaxKind::Class | SyntaxKind::Interface | SyntaxKind::Trait | SyntaxKind::Enum
        )
    }

    /// Check if a keyword right after this token is a member name instead.
    fn is_member_access(self) -> bool {
        matches!(self, SyntaxKind::DoubleColon | SyntaxKind::Arrow)
    }
}

/// A token with the source text it was lexed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
}

/// Classify a name as one of the recognised keywords (case-insensitive).
fn keyword(text: &str) -> Option<SyntaxKind> {
    const KEYWORDS: [(&str, SyntaxKind); 7] = [
        ("namespace", SyntaxKind::Namespace),
        ("class", SyntaxKind::Class),
        ("interface", SyntaxKind::Interface),
        ("trait", SyntaxKind::Trait),
        ("enum", SyntaxKind::Enum),
        ("return", SyntaxKind::Return),
        ("new", SyntaxKind::New),
    ];
    KEYWORDS
        .iter()
        .find(|(kw, _)| text.eq_ignore_ascii_case(kw))
        .map(|&(_, kind)| kind)
}

/// Find the end offset of the next open tag (`<?php` or `<?=`).
fn find_open_tag(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut from = 0;
    while let Some(pos) = text[from..].find("<?") {
        let start = from + pos;
        let after = start + 2;
        if bytes.get(after) == Some(&b'=') {
            return Some(after + 1);
        }
        let word = bytes.get(after..after + 3);
        if word.is_some_and(|w| w.eq_ignore_ascii_case(b"php")) {
            match bytes.get(after + 3) {
                None => return Some(after + 3),
                Some(b) if b.is_ascii_whitespace() => return Some(after + 3),
                _ => {}
            }
        }
        from = after;
    }
    None
}

/// Tokenize every code region of `source`.
///
/// A source without any open tag is treated as one code region.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut tokens: Vec<Token<'_>> = Vec::new();

    if find_open_tag(source).is_none() {
        lex_region(source, &mut tokens);
        return tokens;
    }

    let mut rest = source;
    while let Some(start) = find_open_tag(rest) {
        let code = &rest[start..];
        match lex_region(code, &mut tokens) {
            Some(end) => rest = &code[end..],
            None => break,
        }
    }

    tokens
}

/// Lex `code` up to a close tag, returning the offset just past it.
fn lex_region<'a>(code: &'a str, tokens: &mut Vec<Token<'a>>) -> Option<usize> {
    let mut lexer = RawToken::lexer(code);

    while let Some(raw) = lexer.next() {
        let text = lexer.slice();
        let kind = match raw {
            Ok(RawToken::CloseTag) => return Some(lexer.span().end),
            Ok(RawToken::Name) => {
                let after_member_access = tokens.last().is_some_and(|t| t.kind.is_member_access());
                match keyword(text) {
                    Some(kw) if !after_member_access => kw,
                    _ => SyntaxKind::Name,
                }
            }
            Ok(RawToken::LBrace) => SyntaxKind::LBrace,
            Ok(RawToken::RBrace) => SyntaxKind::RBrace,
            Ok(RawToken::Semicolon) => SyntaxKind::Semicolon,
            Ok(RawToken::DoubleColon) => SyntaxKind::DoubleColon,
            Ok(RawToken::Arrow) => SyntaxKind::Arrow,
            Ok(RawToken::Variable | RawToken::String | RawToken::Number | RawToken::AttributeOpen)
            | Err(()) => SyntaxKind::Other,
        };
        tokens.push(Token { kind, text });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<SyntaxKind> {
        tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_keywords_and_names() {
        let tokens = tokenize("<?php namespace Foo\\Bar; class Baz {}");
        let pairs: Vec<_> = tokens.iter().map(|t| (t.kind, t.text)).collect();

        assert_eq!(
            pairs,
            vec![
                (SyntaxKind::Namespace, "namespace"),
                (SyntaxKind::Name, "Foo\\Bar"),
                (SyntaxKind::Semicolon, ";"),
                (SyntaxKind::Class, "class"),
                (SyntaxKind::Name, "Baz"),
                (SyntaxKind::LBrace, "{"),
                (SyntaxKind::RBrace, "}"),
            ]
        );
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        assert_eq!(
            kinds("<?php CLASS Foo {}"),
            vec![SyntaxKind::Class, SyntaxKind::Name, SyntaxKind::LBrace, SyntaxKind::RBrace]
        );
    }

    #[test]
    fn test_text_outside_open_tag_is_ignored() {
        assert!(!kinds("<h1>class Page {}</h1>\n<?php echo 1; ?>").contains(&SyntaxKind::Class));
        assert!(!kinds("<?phpclass Foo {}").contains(&SyntaxKind::Class));
    }

    #[test]
    fn test_source_without_open_tag_is_code() {
        assert_eq!(
            kinds("interface Qux {}"),
            vec![SyntaxKind::Interface, SyntaxKind::Name, SyntaxKind::LBrace, SyntaxKind::RBrace]
        );
    }

    #[test]
    fn test_close_tag_ends_region() {
        let source = "<?php $a = 1; ?>\nclass Inline {}\n<?= $b ?>";
        assert!(!kinds(source).contains(&SyntaxKind::Class));
    }

    #[test]
    fn test_comments_and_strings_are_skipped() {
        let source = "<?php\n// class A {}\n# class B {}\n/* class C {} */\n$s = 'class D {}';\n$t = \"class E {}\";";
        assert!(!kinds(source).contains(&SyntaxKind::Class));
    }

    #[test]
    fn test_attribute_is_not_a_comment() {
        let source = "<?php #[Attr] class Foo {}";
        assert!(kinds(source).contains(&SyntaxKind::Class));
    }

    #[test]
    fn test_member_access_demotes_keywords() {
        let tokens = tokenize("<?php Foo::class; $x->class; $y?->return;");
        assert!(tokens.iter().all(|t| !t.kind.is_type_keyword()));
        assert!(tokens.iter().all(|t| t.kind != SyntaxKind::Return));
    }

    #[test]
    fn test_keyword_prefix_is_a_name() {
        assert_eq!(kinds("<?php class_exists"), vec![SyntaxKind::Name]);
    }
}
