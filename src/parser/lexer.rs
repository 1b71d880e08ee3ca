//! Producing tokens for the parser
//!
//! The lexer works on a `&str` and hands out one token at a time. What counts as one piece of text depends on the
//! mode: in math mode, text is split at operators and brackets (`x+y` gives three tokens) and whitespace is a
//! separator, in text mode runs of text are kept together and `--`/`---` become dashes.

use std::fmt;


/// A token of the math-text syntax
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// A run of text. Escapes (`\"a`, `\char"41`) and dashes are already replaced.
    Text(String),
    /// An instruction, e.g. `\frac` gives `frac`, `\,` gives `,`
    Instruction(&'a str),
    /// `\begin{name}`
    BeginEnvironment(&'a str),
    /// `\end{name}`
    EndEnvironment(&'a str),
    /// The contents of `\verb|...|`
    Verbatim(&'a str),
    /// `\\`
    Newline,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `_`
    Subscript,
    /// `^`
    Superscript,
    /// `&`
    Ampersand,
    /// `$`
    Dollar,
    /// `~`
    Tilde,
    /// A series of whitespaces
    WhiteSpace,
    /// End of input
    EOF,
}

impl<'a> fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Token::Text(ref text)            => write!(f, "'{}'", text),
            Token::Instruction(name)         => write!(f, r#""\{}""#, name),
            Token::BeginEnvironment(name)    => write!(f, r"\begin{{{}}}", name),
            Token::EndEnvironment(name)      => write!(f, r"\end{{{}}}", name),
            Token::Verbatim(text)            => write!(f, r"\verb|{}|", text),
            Token::Newline                   => write!(f, r"'\\'"),
            Token::OpenBrace                 => write!(f, "'{{'"),
            Token::CloseBrace                => write!(f, "'}}'"),
            Token::OpenBracket               => write!(f, "'['"),
            Token::CloseBracket              => write!(f, "']'"),
            Token::Subscript                 => write!(f, "'_'"),
            Token::Superscript               => write!(f, "'^'"),
            Token::Ampersand                 => write!(f, "'&'"),
            Token::Dollar                    => write!(f, "'$'"),
            Token::Tilde                     => write!(f, "'~'"),
            Token::WhiteSpace                => write!(f, "' '"),
            Token::EOF                       => write!(f, "EOF"),
        }
    }
}

/// Characters which end a run of text in every mode
fn is_special(c: char) -> bool {
    matches!(c, '\\' | '{' | '}' | '[' | ']' | '_' | '^' | '&' | '$' | '~') || c.is_whitespace()
}

/// Characters which are split off text in math mode
fn is_math_operator(c: char) -> bool {
    matches!(c, '(' | ')' | '|' | '+' | '-' | '*' | '/' | '<' | '>' | '=')
}

/// The main structure for producing tokens from an input string
#[derive(Clone, Debug)]
pub struct Lexer<'a> {
    source : &'a str,
    input  : &'a str,
    /// split text as in math mode
    pub math : bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer at the start of `input`, in text mode
    pub fn new(input: &'a str) -> Lexer<'a> {
        Self { source: input, input, math: false }
    }

    /// Byte offset of the next character
    pub fn pos(&self) -> usize {
        self.source.len() - self.input.len()
    }

    /// Returns the part of the input not consumed yet
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Advances through the input so that the first character pointed to
    /// is not a whitespace
    pub fn consume_whitespace(&mut self) {
        self.input = self.input.trim_start();
    }

    /// Reads the contents of a group `{...}` without tokenizing it (nested braces are kept).
    /// Leading whitespace is skipped. Returns `None`, without consuming anything, if no group follows.
    /// An unclosed group extends to the end of the input.
    pub fn raw_group(&mut self) -> Option<&'a str> {
        let rest = self.input.trim_start();
        let inner = rest.strip_prefix('{')?;
        let mut depth = 0usize;
        for (i, c) in inner.char_indices() {
            match c {
                '{' => depth += 1,
                '}' if depth == 0 => {
                    self.input = &inner[i + 1 ..];
                    return Some(&inner[.. i]);
                },
                '}' => depth -= 1,
                _ => (),
            }
        }
        self.input = "";
        Some(inner)
    }

    /// Reads the input up to `\end{name}` without tokenizing it and consumes the `\end{name}`.
    /// Returns the text read, and whether the end was found; without it, the rest of the input is read.
    pub fn raw_environment(&mut self, name: &str) -> (&'a str, bool) {
        let end = format!("\\end{{{}}}", name);
        match self.input.find(&end) {
            Some(i) => {
                let body = &self.input[.. i];
                self.input = &self.input[i + end.len() ..];
                (body, true)
            },
            None => {
                let body = self.input;
                self.input = "";
                (body, false)
            },
        }
    }

    /// Produces the next token
    pub fn next_token(&mut self) -> Token<'a> {
        let mut chars = self.input.chars();
        let c = match chars.next() {
            Some(c) => c,
            None => return Token::EOF,
        };
        if c.is_whitespace() {
            self.consume_whitespace();
            return Token::WhiteSpace;
        }
        let simple = match c {
            '{' => Some(Token::OpenBrace),
            '}' => Some(Token::CloseBrace),
            '[' => Some(Token::OpenBracket),
            ']' => Some(Token::CloseBracket),
            '_' => Some(Token::Subscript),
            '^' => Some(Token::Superscript),
            '&' => Some(Token::Ampersand),
            '$' => Some(Token::Dollar),
            '~' => Some(Token::Tilde),
            _   => None,
        };
        if let Some(token) = simple {
            self.input = chars.as_str();
            return token;
        }
        if c == '\\' {
            return self.escape();
        }
        if self.math && is_math_operator(c) {
            self.input = chars.as_str();
            return Token::Text(c.to_string());
        }
        if !self.math && c == '-' {
            return self.dash();
        }

        let end = self.input
            .find(|c: char| is_special(c) || (self.math && is_math_operator(c)) || (!self.math && c == '-'))
            .unwrap_or(self.input.len());
        let text = &self.input[.. end];
        self.input = &self.input[end ..];
        Token::Text(text.to_string())
    }

    fn dash(&mut self) -> Token<'a> {
        let count = self.input.chars().take_while(|&c| c == '-').count().min(3);
        self.input = &self.input[count ..];
        Token::Text(match count {
            3 => "\u{2014}",
            2 => "\u{2013}",
            _ => "-",
        }.to_string())
    }

    /// Lexes what follows a backslash
    fn escape(&mut self) -> Token<'a> {
        let after = &self.input[1 ..];
        let mut chars = after.chars();
        let character = match chars.next() {
            Some(c) => c,
            // a backslash at the end of input is dropped
            None => {
                self.input = after;
                return Token::EOF;
            },
        };

        if !character.is_ascii_alphabetic() {
            self.input = chars.as_str();
            if character == '\\' {
                return Token::Newline;
            }
            if let Some(mark) = accent_mark(character) {
                if let Some(text) = self.accented(mark) {
                    return Token::Text(text);
                }
            }
            return Token::Instruction(&after[.. character.len_utf8()]);
        }

        let end = after.find(|c: char| !c.is_ascii_alphabetic()).unwrap_or(after.len());
        let name = &after[.. end];
        self.input = &after[end ..];
        match name {
            "begin" | "end" => {
                let env = self.raw_group().unwrap_or("");
                if name == "begin" { Token::BeginEnvironment(env) } else { Token::EndEnvironment(env) }
            },
            "verb" => self.verbatim(),
            "char" => match self.char_code() {
                Some(c) => Token::Text(c.to_string()),
                None => Token::Instruction(name),
            },
            _ => {
                // whitespace after a named instruction only separates it from what follows
                if !self.math {
                    self.consume_whitespace();
                }
                Token::Instruction(name)
            },
        }
    }

    /// Reads the letter after an accent escape, either bare (`\"a`) or in braces (`\"{a}`).
    fn accented(&mut self, mark: char) -> Option<String> {
        let mut chars = self.input.chars();
        let base = match chars.next()? {
            '{' => {
                let base = chars.next()?;
                if chars.next()? != '}' {
                    return None;
                }
                base
            },
            c if c.is_alphabetic() => c,
            _ => return None,
        };
        self.input = chars.as_str();
        Some(compose(base, mark))
    }

    /// `\verb` followed by a delimiter, the verbatim text and the delimiter again
    fn verbatim(&mut self) -> Token<'a> {
        let mut chars = self.input.chars();
        let delimiter = match chars.next() {
            Some(c) => c,
            None => return Token::Verbatim(""),
        };
        let rest = chars.as_str();
        match rest.find(delimiter) {
            Some(end) => {
                self.input = &rest[end + delimiter.len_utf8() ..];
                Token::Verbatim(&rest[.. end])
            },
            None => {
                self.input = "";
                Token::Verbatim(rest)
            },
        }
    }

    /// The character code after `\char`: `"HEX`, `'OCT` or decimal
    fn char_code(&mut self) -> Option<char> {
        let (radix, digits) = match self.input.chars().next()? {
            '"'  => (16, &self.input[1 ..]),
            '\'' => (8, &self.input[1 ..]),
            _    => (10, self.input),
        };
        let end = digits.find(|c: char| !c.is_digit(radix)).unwrap_or(digits.len());
        let code = u32::from_str_radix(&digits[.. end], radix).ok()?;
        let c = char::from_u32(code)?;
        self.input = &digits[end ..];
        Some(c)
    }
}

/// The combining mark of the accent escape `\c`
fn accent_mark(c: char) -> Option<char> {
    match c {
        '"'  => Some('\u{308}'),
        '\'' => Some('\u{301}'),
        '`'  => Some('\u{300}'),
        '^'  => Some('\u{302}'),
        '~'  => Some('\u{303}'),
        '='  => Some('\u{304}'),
        '.'  => Some('\u{307}'),
        _    => None,
    }
}

/// `base` with the accent `mark`, precomposed where Latin-1 has the character
fn compose(base: char, mark: char) -> String {
    const TABLE: &[(char, &str, &str)] = &[
        ('\u{308}', "aeiouyAEIOU", "äëïöüÿÄËÏÖÜ"),
        ('\u{301}', "aeiouyAEIOUY", "áéíóúýÁÉÍÓÚÝ"),
        ('\u{300}', "aeiouAEIOU", "àèìòùÀÈÌÒÙ"),
        ('\u{302}', "aeiouAEIOU", "âêîôûÂÊÎÔÛ"),
        ('\u{303}', "anoANO", "ãñõÃÑÕ"),
    ];
    for &(m, bases, composed) in TABLE {
        if m != mark {
            continue;
        }
        if let Some(i) = bases.chars().position(|b| b == base) {
            if let Some(c) = composed.chars().nth(i) {
                return c.to_string();
            }
        }
    }
    let mut text = base.to_string();
    text.push(mark);
    text
}


#[cfg(test)]
mod tests {
    use super::{Lexer, Token};

    fn tokens(input: &str, math: bool) -> Vec<Token<'_>> {
        let mut lexer = Lexer::new(input);
        lexer.math = math;
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            if token == Token::EOF { break; }
            tokens.push(token);
        }
        tokens
    }

    fn text(s: &str) -> Token<'static> {
        Token::Text(s.to_string())
    }

    #[test]
    fn math_text_is_split() {
        assert_eq!(tokens("x+y=(ab)", true), vec![
            text("x"), text("+"), text("y"), text("="), text("("), text("ab"), text(")"),
        ]);
        assert_eq!(tokens("x+y", false), vec![text("x+y")]);
    }

    #[test]
    fn instructions() {
        let tests = [
            (r"\alpha", vec![Token::Instruction("alpha")]),
            (r"\frac12", vec![Token::Instruction("frac"), text("12")]),
            (r"\,\;", vec![Token::Instruction(","), Token::Instruction(";")]),
            (r"a\\b", vec![text("a"), Token::Newline, text("b")]),
            (r"\alpha  b", vec![Token::Instruction("alpha"), text("b")]),
            (r"\{x\}", vec![Token::Instruction("{"), text("x"), Token::Instruction("}")]),
            (r"\begin{matrix}a\end{matrix}", vec![Token::BeginEnvironment("matrix"), text("a"), Token::EndEnvironment("matrix")]),
            (r"\verb|\a b|c", vec![Token::Verbatim(r"\a b"), text("c")]),
            ("x_1^{2}", vec![text("x"), Token::Subscript, text("1"), Token::Superscript, Token::OpenBrace, text("2"), Token::CloseBrace]),
            ("a & b~c", vec![text("a"), Token::WhiteSpace, Token::Ampersand, Token::WhiteSpace, text("b"), Token::Tilde, text("c")]),
        ];
        for (input, expected) in tests {
            eprintln!("Input: {:?}", input);
            assert_eq!(tokens(input, false), expected);
        }
    }

    #[test]
    fn escapes() {
        let tests = [
            (r#"\"a"#, "ä"),
            (r"\'{e}", "é"),
            (r"\~n", "ñ"),
            (r"\.z", "z\u{307}"),
            (r#"\char"41"#, "A"),
            (r"\char'101", "A"),
            (r"\char65", "A"),
            ("a--b", "a"),
        ];
        for (input, expected) in tests {
            eprintln!("Input: {:?}", input);
            assert_eq!(tokens(input, false)[0], text(expected));
        }
        assert_eq!(tokens("a--b---c", false), vec![text("a"), text("\u{2013}"), text("b"), text("\u{2014}"), text("c")]);
        assert_eq!(tokens("a--b", true), vec![text("a"), text("-"), text("-"), text("b")]);
    }

    #[test]
    fn raw_groups() {
        let mut lexer = Lexer::new(" {red!{x}} rest");
        assert_eq!(lexer.raw_group(), Some("red!{x}"));
        assert_eq!(lexer.input(), " rest");
        assert_eq!(lexer.raw_group(), None);
        assert_eq!(lexer.pos(), 10);
        let mut lexer = Lexer::new("{open");
        assert_eq!(lexer.raw_group(), Some("open"));
        assert_eq!(lexer.next_token(), Token::EOF);
    }

    #[test]
    fn raw_environments() {
        let mut lexer = Lexer::new("a \\x{b}\n\\end{verbatim}c");
        assert_eq!(lexer.raw_environment("verbatim"), ("a \\x{b}\n", true));
        assert_eq!(lexer.input(), "c");
        let mut lexer = Lexer::new("no end");
        assert_eq!(lexer.raw_environment("verbatim"), ("no end", false));
        assert_eq!(lexer.input(), "");
    }
}
