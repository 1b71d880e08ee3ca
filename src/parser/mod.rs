//! Parses strings of LaTeX-like math text into a [`Node`] tree.
//!
//! Defines the [`parse`] function. The [`Parser`] struct gives access to the [`Diagnostic`]s separately.
//!
//! Parsing never fails: constructs which cannot be understood (unknown instructions, unbalanced braces, rows of a
//! matrix with the wrong number of cells ...) are reported as [`Diagnostic`]s and replaced by [`Node::Noop`] or
//! by the closest valid tree.

pub mod environments;
pub mod lexer;
pub mod style;

use crate::css::{self, Rgba};
use crate::environment::FontRole;
use crate::error::{Diagnostic, DiagnosticKind};
use crate::node::{
    BoxColorArgs, BoxNode, BoxStyle, BraceNode, BraceType, DecoratedNode, DecorationKind, EnvChange, FracMode,
    FracNode, LineAlign, LineSpacing, LineType, MatrixNode, ModifyNode, Node, SqrtNode, SymbolNode, TextNode,
    VerticalListNode, WhitespaceKind, WhitespaceNode,
};
use crate::symbols::{self, GlobalSymbolFlags};

use self::environments::{parse_column_spec, Environment};
use self::lexer::{Lexer, Token};
use self::style::{big_instruction, style_instruction, StyleScope};


/// Parses `input` and returns the tree with the problems found on the way.
/// `base_font_size` is the size `\normalsize` stands for, the other size instructions are relative to it.
pub fn parse(input: &str, base_font_size: f64) -> (Node, Vec<Diagnostic>) {
    let mut parser = Parser::new(input, base_font_size);
    let node = parser.parse();
    (node, parser.into_diagnostics())
}

/// What ended a list of nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator<'a> {
    EOF,
    /// `}`
    CloseBrace,
    /// `]`, inside an optional argument
    CloseBracket,
    /// `\right`
    Right,
    /// `$`, in math mode
    Dollar,
    /// `&`, inside a matrix
    Ampersand,
    /// `\\`, inside a matrix or a list of lines
    Newline,
    /// `\end{name}`
    End(&'a str),
}

/// Which tokens end the list being parsed, besides the ones ending every list
#[derive(Debug, Clone, Copy, Default)]
struct Stops {
    bracket: bool,
    matrix:  bool,
    /// `\\` ends the list, but `&` does not
    lines:   bool,
}

impl Stops {
    fn lines() -> Self {
        Self { lines: true, ..Self::default() }
    }
}

/// Operators split off math text, drawn as symbols
const MATH_OPERATORS: &str = "()[]|+-*/<>=";

/// Builds the node tree, collecting [`Diagnostic`]s on the way.
pub struct Parser<'a> {
    lexer:          Lexer<'a>,
    /// the next token with its position, when it has been looked at already
    peeked:         Option<(Token<'a>, usize)>,
    /// a terminator found by an inner list which belongs to an outer one
    pending:        Option<Terminator<'a>>,
    math:           bool,
    base_font_size: f64,
    /// rule requested by `\hline` and friends in the current matrix
    row_rule:       Option<LineType>,
    diagnostics:    Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    /// Creates a parser starting in text mode
    pub fn new(input: &'a str, base_font_size: f64) -> Self {
        Self {
            lexer: Lexer::new(input),
            peeked: None,
            pending: None,
            math: false,
            base_font_size,
            row_rule: None,
            diagnostics: Vec::new(),
        }
    }

    /// Problems found so far
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consumes the parser and returns the problems it found
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Parses the whole input. Text broken with `\\` becomes a [`VerticalListNode`] of left-aligned lines.
    pub fn parse(&mut self) -> Node {
        let mut lines = Vec::new();
        let mut nodes = Vec::new();
        loop {
            let (mut list, end) = self.parse_list(Stops::lines());
            nodes.append(&mut list);
            let pos = self.lexer.pos();
            match end {
                Terminator::EOF => break,
                Terminator::Newline => lines.push(list_node(std::mem::take(&mut nodes))),
                Terminator::CloseBrace | Terminator::CloseBracket => self.error(DiagnosticKind::UnbalancedBraces, pos),
                Terminator::Right => {
                    self.error(DiagnosticKind::UnmatchedDelimiter, pos);
                    self.delimiter();
                },
                Terminator::End(name) => self.error(DiagnosticKind::UnmatchedEnd(name.to_string()), pos),
                Terminator::Dollar | Terminator::Ampersand => (),
            }
        }
        if lines.is_empty() {
            return list_node(nodes);
        }
        lines.push(list_node(nodes));
        vertical_list(lines, LineAlign::Left, LineSpacing::Default)
    }

    fn error(&mut self, kind: DiagnosticKind, pos: usize) {
        warn!("{} (at byte {})", kind, pos);
        self.diagnostics.push(Diagnostic::new(kind, pos));
    }

    fn set_math(&mut self, math: bool) {
        self.math = math;
        self.lexer.math = math;
    }

    fn peek(&mut self) -> &Token<'a> {
        let lexer = &mut self.lexer;
        &self.peeked.get_or_insert_with(|| {
            let pos = lexer.pos();
            (lexer.next_token(), pos)
        }).0
    }

    fn bump(&mut self) -> (Token<'a>, usize) {
        match self.peeked.take() {
            Some(peeked) => peeked,
            None => {
                let pos = self.lexer.pos();
                (self.lexer.next_token(), pos)
            },
        }
    }

    fn skip_whitespace(&mut self) {
        while *self.peek() == Token::WhiteSpace {
            self.bump();
        }
    }

    /// Reads a `{...}` group verbatim. Only possible while no token is peeked.
    fn raw_group(&mut self) -> Option<&'a str> {
        if let Some((Token::WhiteSpace, _)) = self.peeked {
            self.peeked = None;
        }
        if self.peeked.is_some() {
            return None;
        }
        self.lexer.raw_group()
    }

    /// Takes the first character of a text token and leaves the rest for later
    fn split_text(&mut self, text: String, pos: usize) -> String {
        let mut chars = text.chars();
        let first = chars.next().map(String::from).unwrap_or_default();
        let rest = chars.as_str();
        if !rest.is_empty() {
            self.peeked = Some((Token::Text(rest.to_string()), pos + first.len()));
        }
        first
    }

    fn parse_list(&mut self, stops: Stops) -> (Vec<Node>, Terminator<'a>) {
        let mut nodes = Vec::new();
        let mut text = String::new();
        loop {
            if let Some(end) = self.pending.take() {
                flush_text(&mut text, &mut nodes);
                return (nodes, end);
            }
            let (token, pos) = self.bump();
            let end = match token {
                Token::EOF                            => Some(Terminator::EOF),
                Token::CloseBrace                     => Some(Terminator::CloseBrace),
                Token::CloseBracket if stops.bracket  => Some(Terminator::CloseBracket),
                Token::Ampersand if stops.matrix      => Some(Terminator::Ampersand),
                Token::Newline if stops.matrix || stops.lines => Some(Terminator::Newline),
                Token::Dollar if self.math            => Some(Terminator::Dollar),
                Token::EndEnvironment(name)           => Some(Terminator::End(name)),
                Token::Instruction("right")           => Some(Terminator::Right),
                _                                     => None,
            };
            if let Some(end) = end {
                flush_text(&mut text, &mut nodes);
                return (nodes, end);
            }

            match token {
                Token::Text(ref s) if !self.math => {
                    text.push_str(s);
                    continue;
                },
                Token::WhiteSpace if self.math => continue,
                Token::WhiteSpace => {
                    if text.is_empty() {
                        if !nodes.is_empty() {
                            nodes.push(Node::Text(TextNode::new(" ", false, false)));
                        }
                    } else if !text.ends_with(' ') {
                        text.push(' ');
                    }
                    continue;
                },
                _ => flush_text(&mut text, &mut nodes),
            }

            match token {
                Token::Text(s)              => nodes.push(math_text(&s)),
                Token::OpenBracket          => nodes.push(self.text_node("[")),
                Token::CloseBracket         => nodes.push(self.text_node("]")),
                Token::Ampersand            => nodes.push(self.text_node("&")),
                Token::Newline              => (),
                Token::Tilde                => nodes.push(Node::Whitespace(WhitespaceNode::new(WhitespaceKind::Nonbreaking))),
                Token::OpenBrace            => nodes.push(self.group(pos)),
                Token::Subscript            => nodes.push(Node::Subscript(Box::new(self.argument("_")))),
                Token::Superscript          => nodes.push(Node::Superscript(Box::new(self.argument("^")))),
                Token::Dollar               => nodes.push(self.math_block()),
                Token::Verbatim(s)          => nodes.push(Node::ModifyEnvironment(ModifyNode::new(
                    "verb",
                    vec![EnvChange::LeaveMath, EnvChange::Font(FontRole::Typewriter)],
                    Some(Node::Text(TextNode::new(s, false, false))),
                ))),
                Token::BeginEnvironment(name) => nodes.push(self.environment(name, pos)),
                Token::Instruction(name)    => self.instruction(name, pos, &mut nodes, stops),
                // handled above
                Token::EOF | Token::CloseBrace | Token::EndEnvironment(_) | Token::WhiteSpace => (),
            }
        }
    }

    fn text_node(&self, text: &str) -> Node {
        if self.math {
            math_text(text)
        } else {
            Node::Text(TextNode::new(text, false, false))
        }
    }

    /// The contents of a `{...}` group whose `{` was at `pos`
    fn group(&mut self, pos: usize) -> Node {
        let (nodes, end) = self.parse_list(Stops::default());
        match end {
            Terminator::CloseBrace => (),
            Terminator::EOF => self.error(DiagnosticKind::UnbalancedBraces, pos),
            other => {
                self.error(DiagnosticKind::UnbalancedBraces, pos);
                self.pending = Some(other);
            },
        }
        list_node(nodes)
    }

    /// `$ ... $`, the first `$` being consumed already
    fn math_block(&mut self) -> Node {
        let outer = self.math;
        self.set_math(true);
        let (nodes, end) = self.parse_list(Stops::default());
        self.set_math(outer);
        match end {
            Terminator::Dollar | Terminator::EOF => (),
            other => self.pending = Some(other),
        }
        Node::ModifyEnvironment(ModifyNode::new("$", vec![EnvChange::EnterMath], Some(list_node(nodes))))
    }

    /// The mandatory argument of `instruction`: a group, the first character of a text, or an instruction
    fn argument(&mut self, instruction: &str) -> Node {
        self.skip_whitespace();
        let (token, pos) = self.bump();
        match token {
            Token::OpenBrace => self.group(pos),
            Token::Text(s) => {
                let first = self.split_text(s, pos);
                self.text_node(&first)
            },
            Token::Tilde => Node::Whitespace(WhitespaceNode::new(WhitespaceKind::Nonbreaking)),
            Token::Instruction(name) if name != "right" => {
                let mut nodes = Vec::new();
                self.instruction(name, pos, &mut nodes, Stops::default());
                list_node(nodes)
            },
            token => {
                self.peeked = Some((token, pos));
                self.error(DiagnosticKind::MissingArgument(instruction.to_string()), pos);
                Node::Noop
            },
        }
    }

    /// The label of `\underbrace`, given as a second argument or as a script: `\underbrace{a+b}_{n}`
    fn brace_label(&mut self, instruction: &str) -> Node {
        self.skip_whitespace();
        if matches!(*self.peek(), Token::Subscript | Token::Superscript) {
            self.bump();
        }
        self.argument(instruction)
    }

    /// An optional argument `[...]`
    fn optional_argument(&mut self) -> Option<Node> {
        self.skip_whitespace();
        if *self.peek() != Token::OpenBracket {
            return None;
        }
        let (_, pos) = self.bump();
        let (nodes, end) = self.parse_list(Stops { bracket: true, ..Stops::default() });
        match end {
            Terminator::CloseBracket => (),
            Terminator::EOF => self.error(DiagnosticKind::UnbalancedBraces, pos),
            other => {
                self.error(DiagnosticKind::UnbalancedBraces, pos);
                self.pending = Some(other);
            },
        }
        Some(list_node(nodes))
    }

    /// The name of the delimiter following `\left`, `\right` or `\big`
    fn delimiter(&mut self) -> Option<String> {
        self.skip_whitespace();
        let (token, pos) = self.bump();
        match token {
            Token::Text(s) => Some(self.split_text(s, pos)),
            Token::Instruction(name) if name.chars().all(|c| c.is_ascii_alphabetic()) => Some(name.to_string()),
            Token::Instruction(name) => Some(format!("\\{}", name)),
            Token::OpenBracket => Some("[".to_string()),
            Token::CloseBracket => Some("]".to_string()),
            token => {
                self.peeked = Some((token, pos));
                None
            },
        }
    }

    fn brace_type(&mut self, delimiter: Option<String>, instruction: &str, pos: usize) -> BraceType {
        match delimiter {
            Some(name) => match BraceType::from_delimiter(&name) {
                Some(brace) => brace,
                None => {
                    self.error(DiagnosticKind::UnknownDelimiter(name), pos);
                    BraceType::None
                },
            },
            None => {
                self.error(DiagnosticKind::MissingArgument(instruction.to_string()), pos);
                BraceType::None
            },
        }
    }

    /// `\left<delim> ... \right<delim>`, `\left` being consumed already
    fn left_right(&mut self, pos: usize) -> Node {
        let delimiter = self.delimiter();
        let open = self.brace_type(delimiter, "left", pos);
        let (nodes, end) = self.parse_list(Stops::default());
        let close = match end {
            Terminator::Right => {
                let pos = self.lexer.pos();
                let delimiter = self.delimiter();
                self.brace_type(delimiter, "right", pos)
            },
            Terminator::EOF => {
                self.error(DiagnosticKind::UnmatchedDelimiter, pos);
                BraceType::None
            },
            other => {
                self.error(DiagnosticKind::UnmatchedDelimiter, pos);
                self.pending = Some(other);
                BraceType::None
            },
        };
        Node::Brace(BraceNode::new(open, close, list_node(nodes)))
    }

    /// `\star` after an instruction, as in `\operatorname*`
    fn star(&mut self) -> bool {
        let starred = matches!(*self.peek(), Token::Text(ref s) if s.starts_with('*'));
        if starred {
            if let (Token::Text(s), pos) = self.bump() {
                self.split_text(s, pos);
            }
        }
        starred
    }

    fn symbol(&self, name: &str) -> Option<Node> {
        let props = symbols::lookup(name)?;
        let mut node = SymbolNode::new(name);
        if self.math && props.global_flags.contains(GlobalSymbolFlags::SUB_SUPERSCRIPT_BELOW_ABOVE_SYMBOL) {
            node.set_limits(true);
        }
        Some(Node::Symbol(node))
    }

    fn instruction(&mut self, name: &'a str, pos: usize, nodes: &mut Vec<Node>, stops: Stops) {
        trace!("instruction \\{} at {}", name, pos);

        if name == "left" {
            let node = self.left_right(pos);
            nodes.push(node);
            return;
        }

        if let Some((height, side)) = big_instruction(name) {
            let delimiter = self.delimiter();
            let opening = side.unwrap_or_else(|| !delimiter.as_deref().map_or(false, is_closing_delimiter));
            let brace = self.brace_type(delimiter, name, pos);
            let node = if opening {
                BraceNode::new(brace, BraceType::None, Node::Noop)
            } else {
                BraceNode::new(BraceType::None, brace, Node::Noop)
            };
            nodes.push(Node::Brace(node.with_min_height(height)));
            return;
        }

        if let Some(mode) = FracMode::from_instruction(name) {
            let first = self.argument(name);
            let second = match mode {
                FracMode::UnderBrace | FracMode::OverBrace => self.brace_label(name),
                _                                          => self.argument(name),
            };
            // `\underset{below}{base}`: the base comes second
            let (first, second) = match mode {
                FracMode::UnderSet | FracMode::OverSet => (second, first),
                _                                      => (first, second),
            };
            nodes.push(Node::Frac(FracNode::new(mode, first, second)));
            return;
        }

        if let Some(kind) = DecorationKind::from_instruction(name) {
            let child = self.argument(name);
            nodes.push(Node::Decorated(DecoratedNode::new(kind, child)));
            return;
        }

        if let Some((changes, scope)) = style_instruction(name, self.base_font_size) {
            let limits = name == "operatorname" && self.star();
            let mut node = match scope {
                StyleScope::Switch => ModifyNode::new(name, changes, None),
                StyleScope::Argument => {
                    let outer = self.math;
                    if changes.contains(&EnvChange::LeaveMath) {
                        self.set_math(false);
                    } else if changes.contains(&EnvChange::EnterMath) {
                        self.set_math(true);
                    }
                    let child = self.argument(name);
                    self.set_math(outer);
                    ModifyNode::new(name, changes, Some(child))
                },
            };
            node.set_limits(limits);
            nodes.push(Node::ModifyEnvironment(node));
            return;
        }

        if let Some(kind) = WhitespaceKind::from_instruction(name) {
            nodes.push(Node::Whitespace(WhitespaceNode::new(kind)));
            return;
        }

        if let Some((mut style, colors)) = BoxStyle::from_instruction(name) {
            if matches!(colors, BoxColorArgs::Frame | BoxColorArgs::FrameAndBackground) {
                if let Some(color) = self.color_argument(name, pos) {
                    style = style.with_frame_color(color);
                }
            }
            if matches!(colors, BoxColorArgs::Background | BoxColorArgs::FrameAndBackground) {
                if let Some(color) = self.color_argument(name, pos) {
                    style = style.with_background(color);
                }
            }
            let child = self.argument(name);
            nodes.push(Node::Boxed(BoxNode::new(name, style, child)));
            return;
        }

        match name {
            "binom" | "dbinom" | "tbinom" => {
                let top = self.argument(name);
                let bottom = self.argument(name);
                let stack = Node::Frac(FracNode::new(FracMode::Stackrel, top, bottom));
                nodes.push(Node::Brace(BraceNode::new(BraceType::Paren, BraceType::Paren, stack)));
            },
            "sqrt" => {
                let degree = self.optional_argument();
                let child = self.argument(name);
                nodes.push(Node::Sqrt(SqrtNode::new(child, degree)));
            },
            "cbrt" => {
                let child = self.argument(name);
                nodes.push(Node::Sqrt(SqrtNode::new(child, Some(Node::Text(TextNode::new("3", false, false))))));
            },
            "limits" | "nolimits" | "displaylimits" => {
                if let Some(last) = nodes.last_mut() {
                    if !last.set_limits(name != "nolimits") {
                        debug!("\\{} after a node which cannot carry limits", name);
                    }
                }
            },
            "textcolor" | "mathcolor" | "color" => {
                let changes = self.color_argument(name, pos).map(EnvChange::Color).into_iter().collect();
                let child = if name == "color" { None } else { Some(self.argument(name)) };
                nodes.push(Node::ModifyEnvironment(ModifyNode::new(name, changes, child)));
            },
            "userfont" => {
                let changes = match self.raw_group() {
                    Some(family) => vec![EnvChange::Font(FontRole::Custom(family.trim().to_string()))],
                    None => {
                        self.error(DiagnosticKind::MissingArgument(name.to_string()), pos);
                        Vec::new()
                    },
                };
                let child = self.argument(name);
                nodes.push(Node::ModifyEnvironment(ModifyNode::new(name, changes, Some(child))));
            },
            "fontsize" | "userfontsize" => {
                let changes = match self.raw_group() {
                    Some(size) => match size.trim().parse::<f64>() {
                        Ok(points) if points > 0.0 && points.is_finite() => vec![EnvChange::FontSize(points)],
                        _ => {
                            self.error(DiagnosticKind::InvalidFontSize(size.to_string()), pos);
                            Vec::new()
                        },
                    },
                    None => {
                        self.error(DiagnosticKind::MissingArgument(name.to_string()), pos);
                        Vec::new()
                    },
                };
                nodes.push(Node::ModifyEnvironment(ModifyNode::new(name, changes, None)));
            },
            "substack" | "lsubstack" | "rsubstack" => {
                let node = self.substack(name, pos);
                nodes.push(node);
            },
            "hline" | "midrule" | "toprule" | "bottomrule" | "hdashline" if stops.matrix => {
                let rule = match name {
                    "toprule" | "bottomrule" => LineType::Heavy,
                    "hdashline"              => LineType::Dashed,
                    _                        => LineType::Solid,
                };
                self.row_rule = Some(combine_rules(self.row_rule.unwrap_or(LineType::None), rule));
            },
            "hline" | "midrule" | "toprule" | "bottomrule" | "hdashline" => {
                debug!("\\{} outside of a matrix is ignored", name);
            },
            _ => {
                let symbol = if name == "|" { "Vert" } else { name };
                match self.symbol(symbol) {
                    Some(node) => nodes.push(node),
                    None => {
                        self.error(DiagnosticKind::UnknownInstruction(name.to_string()), pos);
                        nodes.push(Node::Noop);
                    },
                }
            },
        }
    }

    /// A color given in braces, as in `\textcolor{red}`. Problems are reported and give `None`.
    fn color_argument(&mut self, instruction: &str, pos: usize) -> Option<Rgba> {
        match self.raw_group() {
            Some(spec) => match css::parse_color(spec.trim()) {
                Ok(color) => Some(color),
                Err(e) => {
                    self.error(DiagnosticKind::InvalidColor(e.to_string()), pos);
                    None
                },
            },
            None => {
                self.error(DiagnosticKind::MissingArgument(instruction.to_string()), pos);
                None
            },
        }
    }

    /// Lines separated by `\\` up to the terminator `until`, which has been started at `pos`
    /// (`}` of a `\substack` argument, or `\end{name}`)
    fn lines(&mut self, until: Terminator<'a>, name: &str, pos: usize) -> Vec<Node> {
        let mut lines = Vec::new();
        loop {
            let (nodes, end) = self.parse_list(Stops::lines());
            lines.push(list_node(nodes));
            match end {
                Terminator::Newline => continue,
                end if end == until => (),
                Terminator::EOF => self.unclosed(until, name, pos),
                other => {
                    self.unclosed(until, name, pos);
                    self.pending = Some(other);
                },
            }
            break;
        }
        // `\\` after the last line
        if lines.len() > 1 && lines.last().map_or(false, Node::is_empty) {
            lines.pop();
        }
        lines
    }

    fn unclosed(&mut self, until: Terminator<'a>, name: &str, pos: usize) {
        let kind = match until {
            Terminator::End(_) => DiagnosticKind::UnclosedEnvironment(name.to_string()),
            _ => DiagnosticKind::UnbalancedBraces,
        };
        self.error(kind, pos);
    }

    /// `\substack[align]{line \\ line ...}`, the instruction being consumed already
    fn substack(&mut self, name: &str, pos: usize) -> Node {
        let default = match name {
            "lsubstack" => LineAlign::Left,
            "rsubstack" => LineAlign::Right,
            _           => LineAlign::Center,
        };
        let align = match self.optional_argument() {
            Some(option) => match plain_text(&option).as_deref().and_then(LineAlign::from_letter) {
                Some(align) => align,
                None => {
                    debug!("\\{}: unknown alignment {:?}", name, option);
                    default
                },
            },
            None => default,
        };
        self.skip_whitespace();
        if *self.peek() != Token::OpenBrace {
            let line = self.argument(name);
            return vertical_list(vec![line], align, LineSpacing::Minimal);
        }
        let (_, brace) = self.bump();
        let lines = self.lines(Terminator::CloseBrace, name, brace);
        trace!("\\{} at {} with {} lines", name, pos, lines.len());
        vertical_list(lines, align, LineSpacing::Minimal)
    }

    /// `\begin{name} ... \end{name}`, `\begin{name}` being consumed already
    fn environment(&mut self, name: &'a str, pos: usize) -> Node {
        let aligned = match name {
            "center" | "document" => Some(LineAlign::Center),
            "flushleft"           => Some(LineAlign::Left),
            "flushright"          => Some(LineAlign::Right),
            _                     => None,
        };
        if let Some(align) = aligned {
            let lines = self.lines(Terminator::End(name), name, pos);
            return vertical_list(lines, align, LineSpacing::Default);
        }

        if let "framed" | "shaded" | "snugshade" = name {
            let lines = self.lines(Terminator::End(name), name, pos);
            let (style, colors) = BoxStyle::from_instruction(name).unwrap_or((BoxStyle::default(), BoxColorArgs::None));
            let style = match colors {
                BoxColorArgs::Background => style.with_background(SHADED_BACKGROUND),
                _ => style,
            };
            return Node::Boxed(BoxNode::new(name, style, vertical_list(lines, LineAlign::Left, LineSpacing::Default)));
        }

        if let "verbatim" | "verbatim*" | "lstlisting" = name {
            return self.verbatim_environment(name, pos);
        }

        match Environment::try_from_str(name) {
            Some(env) => self.matrix(env, name, pos),
            None => {
                self.error(DiagnosticKind::UnknownEnvironment(name.to_string()), pos);
                // the body is skipped like a group: `&` and `\\` mean nothing in it
                loop {
                    let (_, end) = self.parse_list(Stops::default());
                    match end {
                        Terminator::End(end_name) if end_name == name => break,
                        Terminator::EOF => {
                            self.error(DiagnosticKind::UnclosedEnvironment(name.to_string()), pos);
                            break;
                        },
                        Terminator::End(_) | Terminator::CloseBrace | Terminator::Right => continue,
                        other => {
                            self.pending = Some(other);
                            break;
                        },
                    }
                }
                Node::Noop
            },
        }
    }

    /// `verbatim` and `lstlisting`: the body is drawn line by line in the typewriter font, as written
    fn verbatim_environment(&mut self, name: &str, pos: usize) -> Node {
        let (body, closed) = self.lexer.raw_environment(name);
        if !closed {
            self.error(DiagnosticKind::UnclosedEnvironment(name.to_string()), pos);
        }
        let body = body.strip_prefix("\r\n").or_else(|| body.strip_prefix('\n')).unwrap_or(body);
        let mut lines: Vec<Node> = body.lines().map(verbatim_line).collect();
        if lines.len() > 1 && lines.last().map_or(false, Node::is_empty) {
            lines.pop();
        }
        Node::ModifyEnvironment(ModifyNode::new(
            name,
            vec![EnvChange::LeaveMath, EnvChange::Font(FontRole::Typewriter)],
            Some(vertical_list(lines, LineAlign::Left, LineSpacing::Default)),
        ))
    }

    fn matrix(&mut self, env: Environment, name: &'a str, pos: usize) -> Node {
        let spec = if env.takes_column_spec() {
            let spec = match self.raw_group() {
                Some(spec) => spec,
                None => {
                    self.error(DiagnosticKind::MissingArgument(name.to_string()), pos);
                    ""
                },
            };
            let (spec, errors) = parse_column_spec(spec);
            for kind in errors {
                self.error(kind, pos);
            }
            Some(spec)
        } else {
            None
        };

        let outer_rule = self.row_rule.take();
        let mut rows: Vec<Vec<Node>> = Vec::new();
        let mut row: Vec<Node> = Vec::new();
        let mut top_line = LineType::None;
        let mut bottom_lines: Vec<LineType> = Vec::new();
        loop {
            let (cell, end) = self.parse_list(Stops { matrix: true, ..Stops::default() });
            if let Some(rule) = self.row_rule.take() {
                match bottom_lines.last_mut() {
                    Some(line) => *line = combine_rules(*line, rule),
                    None => top_line = combine_rules(top_line, rule),
                }
            }
            row.push(list_node(cell));
            match end {
                Terminator::Ampersand => continue,
                Terminator::Newline => {
                    rows.push(std::mem::take(&mut row));
                    bottom_lines.push(LineType::None);
                    continue;
                },
                Terminator::End(end_name) if end_name == name => (),
                Terminator::EOF => self.error(DiagnosticKind::UnclosedEnvironment(name.to_string()), pos),
                other => {
                    self.error(DiagnosticKind::UnclosedEnvironment(name.to_string()), pos);
                    self.pending = Some(other);
                },
            }
            break;
        }
        // `\\` at the end of the last row
        let trailing = row.len() == 1 && row[0].is_empty();
        if !trailing || rows.is_empty() {
            rows.push(row);
            bottom_lines.push(LineType::None);
        }
        self.row_rule = outer_rule;

        let expected = rows.first().map_or(0, Vec::len);
        for (i, cells) in rows.iter().enumerate() {
            if cells.len() != expected {
                self.error(DiagnosticKind::WrongNumberOfCells { row: i, found: cells.len(), expected }, pos);
            }
        }

        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        let (alignments, vertical_lines) = match spec {
            Some(spec) => (spec.alignments, spec.vertical_lines),
            None => ((0..columns).map(|j| env.default_alignment(j)).collect(), Vec::new()),
        };
        let matrix = Node::Matrix(MatrixNode::new(rows)
            .with_columns(alignments, vertical_lines)
            .with_row_lines(top_line, bottom_lines));
        match env.delimiters() {
            Some((open, close)) => Node::Brace(BraceNode::new(open, close, matrix)),
            None => matrix,
        }
    }
}

/// Background of the `shaded` and `snugshade` environments
const SHADED_BACKGROUND: Rgba = Rgba::new(211, 211, 211, 255);

fn flush_text(text: &mut String, nodes: &mut Vec<Node>) {
    if !text.is_empty() {
        nodes.push(Node::Text(TextNode::new(text.as_str(), false, false)));
        text.clear();
    }
}

/// Text in math mode: operators become symbols
fn math_text(text: &str) -> Node {
    let mut chars = text.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if MATH_OPERATORS.contains(c) && symbols::lookup(text).is_some() {
            return Node::Symbol(SymbolNode::new(text));
        }
    }
    Node::Text(TextNode::new(text, false, true))
}

/// A single node for a list of lines
fn vertical_list(lines: Vec<Node>, align: LineAlign, spacing: LineSpacing) -> Node {
    Node::VerticalList(VerticalListNode::new(lines, align, spacing))
}

/// One line of a verbatim environment; leading blanks are kept as spaces
fn verbatim_line(line: &str) -> Node {
    let text = line.replace('\t', "    ");
    let content = text.trim_start_matches(' ');
    let indent = text.len() - content.len();
    let mut nodes: Vec<Node> = (0..indent).map(|_| Node::Whitespace(WhitespaceNode::new(WhitespaceKind::Space))).collect();
    if !content.is_empty() {
        nodes.push(Node::Text(TextNode::new(content, false, false)));
    }
    match nodes.len() {
        0 => Node::Noop,
        _ => list_node(nodes),
    }
}

/// The text of a node made of text only, such as the optional argument `[l]`
fn plain_text(node: &Node) -> Option<String> {
    match *node {
        Node::Text(ref text) => Some(text.text().to_string()),
        Node::List(ref children) => children.iter().map(plain_text).collect(),
        _ => None,
    }
}

/// A single node for a list of nodes
fn list_node(mut nodes: Vec<Node>) -> Node {
    if nodes.len() == 1 {
        nodes.remove(0)
    } else {
        Node::List(nodes)
    }
}

fn is_closing_delimiter(name: &str) -> bool {
    matches!(name, ")" | "]" | "\\}" | "}" | ">" | "rangle" | "rfloor" | "rceil" | "rbrace" | "urcorner" | "lrcorner")
}

/// A rule requested twice becomes a double rule
fn combine_rules(current: LineType, new: LineType) -> LineType {
    match (current, new) {
        (LineType::Solid, LineType::Solid)   => LineType::Double,
        (LineType::Dashed, LineType::Dashed) => LineType::DoubleDashed,
        (_, new)                             => new,
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::ColumnAlign;

    fn parse_ok(input: &str) -> Node {
        let (node, diagnostics) = parse(input, 10.0);
        assert!(diagnostics.is_empty(), "{:?}: {:?}", input, diagnostics);
        node
    }

    fn text(s: &str) -> Node {
        Node::Text(TextNode::new(s, false, false))
    }

    /// The list inside `$...$`
    fn math_content(node: Node) -> Node {
        match node {
            Node::ModifyEnvironment(m) => m.child().cloned().unwrap_or(Node::Noop),
            other => panic!("not a math block: {:?}", other),
        }
    }

    #[test]
    fn text_merging() {
        let tests = [
            ("Hello World", text("Hello World")),
            ("a   b", text("a b")),
            ("a--b", text("a\u{2013}b")),
            ("a\\&b", Node::List(vec![text("a"), Node::Symbol(SymbolNode::new("&")), text("b")])),
        ];
        for (input, expected) in tests {
            eprintln!("Input: {:?}", input);
            assert_eq!(parse_ok(input), expected);
        }
    }

    #[test]
    fn math_mode() {
        let content = math_content(parse_ok("$x + 12$"));
        assert_eq!(content, Node::List(vec![
            Node::Text(TextNode::new("x", false, true)),
            Node::Symbol(SymbolNode::new("+")),
            Node::Text(TextNode::new("12", false, true)),
        ]));

        let node = parse_ok("a $b$ c");
        match node {
            Node::List(ref children) => {
                assert_eq!(children.len(), 4);
                assert_eq!(children[2], text(" "));
                assert_eq!(children[3], text("c"));
            },
            ref other => panic!("{:?}", other),
        }
    }

    #[test]
    fn scripts() {
        let success_cases = [
            r"$x_1^2$",
            r"$x_{1+2}$",
            r"$x^{2+3}_{2+3}$",
            r"$a^{b^c}$",
            r"$1_\frac12$",
            r"$2^\alpha$",
        ];
        for case in success_cases {
            eprintln!("Input: {:?}", case);
            parse_ok(case);
        }

        // only the first character of a text is the script
        let content = math_content(parse_ok("$x^23$"));
        assert_eq!(content, Node::List(vec![
            Node::Text(TextNode::new("x", false, true)),
            Node::Superscript(Box::new(Node::Text(TextNode::new("2", false, true)))),
            Node::Text(TextNode::new("3", false, true)),
        ]));
    }

    #[test]
    fn limits() {
        let tests = [
            (r"$\sum_a^b$", true),
            (r"$\int_a^b$", true),
            (r"$\int\nolimits_a^b$", false),
            (r"$\sum\nolimits_a^b$", false),
            (r"$\operatorname*{argmax}_x$", true),
            (r"$\operatorname{argmax}_x$", false),
        ];
        for (input, limits) in tests {
            eprintln!("Input: {:?}", input);
            match math_content(parse_ok(input)) {
                Node::List(children) => assert_eq!(children[0].has_limits(), limits),
                other => panic!("{:?}", other),
            }
        }
        // outside of math, big operators are plain symbols
        assert!(!parse_ok(r"\sum").has_limits());
    }

    #[test]
    fn instructions() {
        let tests = [
            (r"$\frac{a}{b}$", 4),
            (r"$\frac\alpha\beta$", 4),
            (r"$\sqrt[3]{x}$", 4),
            (r"$\cbrt{x}$", 4),
            (r"$\binom{n}{k}$", 5),
            (r"$\left(\frac12\right]$", 5),
            (r"$\left.x\right|$", 3),
            (r"$\bigl( x \bigr)$", 7),
            (r"$\hat{x}\vec y$", 6),
            (r"\textbf{bold} \it italic", 6),
            (r"\textcolor{red}{x}", 2),
            (r"\textcolor{rgb(255, 0, 0)}{x}", 2),
            (r"\userfont{Arial}{x}", 2),
            (r"a\,b\quad c~d", 8),
            (r"\verb|$x$|", 2),
            (r"$\underset{below}{x}$", 4),
        ];
        for (input, count) in tests {
            eprintln!("Input: {:?}", input);
            assert_eq!(parse_ok(input).count(), count);
        }
    }

    #[test]
    fn delimiters() {
        let content = math_content(parse_ok(r"$\left\langle x \right\|$"));
        match content {
            Node::Brace(ref brace) => {
                assert_eq!(brace.open(), BraceType::Angle);
                assert_eq!(brace.close(), BraceType::Double);
            },
            ref other => panic!("{:?}", other),
        }
        match math_content(parse_ok(r"$\Bigr\rangle$")) {
            Node::Brace(ref brace) => {
                assert_eq!(brace.open(), BraceType::None);
                assert_eq!(brace.close(), BraceType::Angle);
            },
            ref other => panic!("{:?}", other),
        }
    }

    #[test]
    fn underset_keeps_the_base_first() {
        match math_content(parse_ok(r"$\underset{0}{x}$")) {
            Node::Frac(ref frac) => {
                assert_eq!(frac.mode(), FracMode::UnderSet);
                assert_eq!(*frac.numerator(), Node::Text(TextNode::new("x", false, true)));
            },
            ref other => panic!("{:?}", other),
        }
    }

    #[test]
    fn matrices() {
        let node = math_content(parse_ok(r"$\begin{array}{|lc||r}a&b&c\\\hline d&e&f\\\hline\hline\end{array}$"));
        let matrix = match node {
            Node::Matrix(m) => m,
            other => panic!("{:?}", other),
        };
        assert_eq!(matrix.rows(), 2);
        assert_eq!(matrix.alignments(), &[ColumnAlign::Left, ColumnAlign::Center, ColumnAlign::Right]);
        assert_eq!(matrix.vertical_lines(), &[LineType::Solid, LineType::None, LineType::Double, LineType::None]);
        assert_eq!(matrix.top_line(), LineType::None);
        assert_eq!(matrix.row_bottom_lines(), &[LineType::Solid, LineType::Double]);

        let node = math_content(parse_ok(r"$\begin{pmatrix}1&0\\0&1\end{pmatrix}$"));
        match node {
            Node::Brace(ref brace) => {
                assert_eq!(brace.open(), BraceType::Paren);
                assert!(matches!(*brace.child(), Node::Matrix(_)));
            },
            ref other => panic!("{:?}", other),
        }

        let node = math_content(parse_ok(r"$\begin{cases}x & a\\y & b\end{cases}$"));
        match node {
            Node::Brace(ref brace) => match *brace.child() {
                Node::Matrix(ref m) => assert_eq!(m.alignments(), &[ColumnAlign::Left, ColumnAlign::Left]),
                ref other => panic!("{:?}", other),
            },
            ref other => panic!("{:?}", other),
        }

        let node = parse_ok(r"\begin{tabular}{c}\toprule a\\\bottomrule\end{tabular}");
        match node {
            Node::Matrix(ref m) => {
                assert_eq!(m.top_line(), LineType::Heavy);
                assert_eq!(m.row_bottom_lines(), &[LineType::Heavy]);
            },
            ref other => panic!("{:?}", other),
        }
    }

    #[test]
    fn diagnostics() {
        use crate::error::DiagnosticKind::*;
        let tests = [
            (r"\foo", vec![UnknownInstruction("foo".to_string())]),
            (r"\begin{figure}x\end{figure}", vec![UnknownEnvironment("figure".to_string())]),
            (r"a\end{matrix}", vec![UnmatchedEnd("matrix".to_string())]),
            (r"\begin{matrix}a", vec![UnclosedEnvironment("matrix".to_string())]),
            ("{a", vec![UnbalancedBraces]),
            ("a}", vec![UnbalancedBraces]),
            (r"\begin{array}{lx}a&b\end{array}", vec![UnknownColumnSpec('x')]),
            (r"\begin{matrix}a&b\\c\end{matrix}", vec![WrongNumberOfCells { row: 1, found: 1, expected: 2 }]),
            (r"$\frac{a}$", vec![MissingArgument("frac".to_string())]),
            (r"$\left( x$", vec![UnmatchedDelimiter]),
            (r"$x \right)$", vec![UnmatchedDelimiter]),
            (r"$\left\foo x \right)$", vec![UnknownDelimiter("foo".to_string())]),
        ];
        for (input, expected) in tests {
            eprintln!("Input: {:?}", input);
            let (node, diagnostics) = parse(input, 10.0);
            let kinds: Vec<DiagnosticKind> = diagnostics.into_iter().map(|d| d.kind).collect();
            assert_eq!(kinds, expected);
            // the tree is still usable
            assert!(node.count() >= 1);
        }

        let (_, diagnostics) = parse(r"\textcolor{nocolor}{x}", 10.0);
        assert!(matches!(diagnostics[0].kind, InvalidColor(_)));
        let (_, diagnostics) = parse(r"ab\foo", 10.0);
        assert_eq!(diagnostics[0].pos, 2);
    }

    #[test]
    fn boxes() {
        match parse_ok(r"\fcolorbox{red}{yellow}{x}") {
            Node::Boxed(ref boxed) => {
                assert_eq!(boxed.instruction(), "fcolorbox");
                assert_eq!(boxed.style().frame_color, Some(Rgba::new(255, 0, 0, 255)));
                assert_eq!(boxed.style().background, Some(Rgba::new(255, 255, 0, 255)));
                assert_eq!(*boxed.child(), text("x"));
            },
            ref other => panic!("{:?}", other),
        }
        match parse_ok(r"\colorbox{blue}{x}") {
            Node::Boxed(ref boxed) => {
                assert_eq!(boxed.style().frame_color, Some(Rgba::new(0, 0, 255, 255)));
                assert_eq!(boxed.style().background, None);
            },
            ref other => panic!("{:?}", other),
        }
        match parse_ok(r"\begin{shaded}a\\b\end{shaded}") {
            Node::Boxed(ref boxed) => {
                assert_eq!(boxed.style().frame, None);
                assert_eq!(boxed.style().background, Some(SHADED_BACKGROUND));
                assert!(matches!(*boxed.child(), Node::VerticalList(ref v) if v.lines().len() == 2));
            },
            ref other => panic!("{:?}", other),
        }
    }

    #[test]
    fn line_breaks() {
        let tests = [
            ("a", 0, LineAlign::Left),
            (r"a\\b", 2, LineAlign::Left),
            (r"a\\b\\", 3, LineAlign::Left),
            (r"\begin{center}a\\b\\\end{center}", 2, LineAlign::Center),
            (r"\begin{flushright}a\\b\\c\end{flushright}", 3, LineAlign::Right),
            (r"\begin{flushleft}a\end{flushleft}", 1, LineAlign::Left),
        ];
        for (input, lines, align) in tests {
            eprintln!("Input: {:?}", input);
            match parse_ok(input) {
                Node::VerticalList(ref v) => {
                    assert_eq!(v.lines().len(), lines);
                    assert_eq!(v.align(), align);
                    assert_eq!(v.spacing(), LineSpacing::Default);
                },
                ref other => assert_eq!(lines, 0, "{:?}", other),
            }
        }
        // inside a matrix, `\\` still separates rows
        assert!(matches!(parse_ok(r"\begin{matrix}a\\b\end{matrix}"), Node::Matrix(ref m) if m.rows() == 2));
    }

    #[test]
    fn substacks() {
        let tests = [
            (r"$\substack{a\\b\\c}$", LineAlign::Center, 3),
            (r"$\lsubstack{a\\b}$", LineAlign::Left, 2),
            (r"$\rsubstack{a}$", LineAlign::Right, 1),
            (r"$\substack[l]{a\\b}$", LineAlign::Left, 2),
            (r"$\substack x$", LineAlign::Center, 1),
        ];
        for (input, align, lines) in tests {
            eprintln!("Input: {:?}", input);
            match math_content(parse_ok(input)) {
                Node::VerticalList(ref v) => {
                    assert_eq!(v.align(), align);
                    assert_eq!(v.lines().len(), lines);
                    assert_eq!(v.spacing(), LineSpacing::Minimal);
                },
                ref other => panic!("{:?}", other),
            }
        }
        // `&` is plain text in a stack
        let (_, diagnostics) = parse(r"$\substack{a & b}$", 10.0);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn verbatim() {
        let node = parse_ok("\\begin{verbatim}\n  $x$ \\foo\n\tb\n\\end{verbatim}");
        let m = match node {
            Node::ModifyEnvironment(m) => m,
            other => panic!("{:?}", other),
        };
        assert_eq!(m.changes(), &[EnvChange::LeaveMath, EnvChange::Font(FontRole::Typewriter)]);
        let lines = match m.child() {
            Some(Node::VerticalList(v)) => v.lines().to_vec(),
            other => panic!("{:?}", other),
        };
        assert_eq!(lines.len(), 2);
        let space = Node::Whitespace(WhitespaceNode::new(WhitespaceKind::Space));
        assert_eq!(lines[0], Node::List(vec![space.clone(), space.clone(), text(r"$x$ \foo")]));
        assert_eq!(lines[1].children().len(), 5);
    }

    #[test]
    fn sizes() {
        let tests = [
            (r"\scriptstyle", EnvChange::FontSize(7.5)),
            (r"\displaystyle", EnvChange::FontSize(10.0)),
            (r"\fontsize{14}", EnvChange::FontSize(14.0)),
            (r"\userfontsize{8.5}", EnvChange::FontSize(8.5)),
        ];
        for (input, change) in tests {
            eprintln!("Input: {:?}", input);
            match parse_ok(input) {
                Node::ModifyEnvironment(ref m) => {
                    assert_eq!(m.changes(), &[change]);
                    assert!(m.child().is_none());
                },
                ref other => panic!("{:?}", other),
            }
        }
        let (_, diagnostics) = parse(r"\fontsize{-2}x", 10.0);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::InvalidFontSize("-2".to_string()));
    }

    #[test]
    fn unknown_environment_body_is_a_group() {
        use crate::error::DiagnosticKind::*;
        let tests = [
            r"\begin{foo}a&b\\c&d&e\end{foo}",
            r"\begin{foo}\begin{matrix}a\end{matrix}}\end{foo}",
        ];
        for input in tests {
            eprintln!("Input: {:?}", input);
            let (node, diagnostics) = parse(input, 10.0);
            let kinds: Vec<DiagnosticKind> = diagnostics.into_iter().map(|d| d.kind).collect();
            assert_eq!(kinds, vec![UnknownEnvironment("foo".to_string())]);
            assert_eq!(node, Node::Noop);
        }
    }

    #[test]
    fn unknown_instruction_becomes_noop() {
        let (node, _) = parse(r"a\foo b", 10.0);
        assert_eq!(node, Node::List(vec![text("a"), Node::Noop, text("b")]));
    }
}
