//! Style changes: `\bf`, `\textit{..}`, `\mathrm{..}`, `\textcolor{red}{..}`, `\large` ...
//!
//! With a child, the changes apply to the child only. Without a child (`\bf` on its own), the node has no size
//! and the changes apply to the siblings following it in the enclosing list.

use crate::css::Rgba;
use crate::environment::{Environment, FontRole, FontSettings, LetterCase};
use crate::layout::{MathContext, NodeSize};
use crate::render::Canvas;

use super::Node;

/// One change applied to an [`Environment`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EnvChange {
    /// `\bf`, `\textbf`, `\textmd` ...
    Bold(bool),
    /// `\it`, `\textit`, `\textup` ...
    Italic(bool),
    /// `\emph`: italic becomes upright and the other way round
    ToggleItalic,
    /// `\mathrm`, `\texttt`, `\mathbb` ...: switches the font role
    Font(FontRole),
    /// `\underlined`
    Underlined,
    /// `\overlined`
    Overline,
    /// `\strike`
    Strike,
    /// `\textsc`
    SmallCaps,
    /// `\uppercase`, `\lowercase`
    LetterCase(LetterCase),
    /// `\textcolor`, `\color`
    Color(Rgba),
    /// `\ensuremath`, `\mathop` ...
    EnterMath,
    /// `\text`, `\mbox` ...: back to upright text
    LeaveMath,
    /// multiplies the font size
    ScaleFontSize(f64),
    /// sets the font size in points
    FontSize(f64),
}

impl EnvChange {
    fn apply(&self, env: &mut Environment) {
        match *self {
            EnvChange::Bold(bold)             => env.bold = bold,
            EnvChange::Italic(italic)         => env.italic = italic,
            EnvChange::ToggleItalic           => env.italic = !env.italic,
            EnvChange::Font(ref role)         => env.font = role.clone(),
            EnvChange::Underlined             => env.underlined = true,
            EnvChange::Overline               => env.overline = true,
            EnvChange::Strike                 => env.strike = true,
            EnvChange::SmallCaps              => env.small_caps = true,
            EnvChange::LetterCase(case)       => env.letter_case = case,
            EnvChange::Color(color)           => env.color = color,
            EnvChange::EnterMath              => env.enter_math(),
            EnvChange::LeaveMath              => {
                env.inside_math = false;
                env.italic = false;
            },
            EnvChange::ScaleFontSize(factor)  => env.font_size *= factor,
            EnvChange::FontSize(size)         => env.font_size = size,
        }
    }
}

/// A set of [`EnvChange`]s, with the child they apply to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModifyNode {
    instruction: String,
    changes:     Vec<EnvChange>,
    child:       Option<Box<Node>>,
    limits:      bool,
}

impl ModifyNode {
    /// Creates the node for `instruction` (the name it was parsed from, kept for diagnostics and debugging)
    pub fn new(instruction: &str, changes: Vec<EnvChange>, child: Option<Node>) -> Self {
        Self {
            instruction: instruction.to_string(),
            changes,
            child: child.map(Box::new),
            limits: false,
        }
    }

    /// Name of the instruction the node was parsed from
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// The changes, applied in order
    pub fn changes(&self) -> &[EnvChange] {
        &self.changes
    }

    /// The child, or `None` for a switch that changes the rest of its group
    pub fn child(&self) -> Option<&Node> {
        self.child.as_deref()
    }

    /// Whether following scripts are set as limits (`\operatorname*`, `\mathop{..}\limits`)
    pub fn limits(&self) -> bool {
        self.limits
    }

    /// Sets whether following scripts are set as limits
    pub fn set_limits(&mut self, limits: bool) {
        self.limits = limits;
    }

    /// Applies the changes to `env`
    pub fn apply(&self, env: &mut Environment) {
        for change in &self.changes {
            change.apply(env);
        }
    }

    fn modified(&self, env: &Environment) -> Environment {
        let mut env = env.clone();
        self.apply(&mut env);
        env
    }

    pub(crate) fn size(&self, env: &Environment, ctx: &MathContext) -> NodeSize {
        match self.child {
            Some(ref child) => child.compute_size(&self.modified(env), ctx, None),
            None => NodeSize { strikeout_pos: ctx.strikeout_pos(env), ..NodeSize::default() },
        }
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas, x: f64, y: f64, env: &Environment, ctx: &MathContext) -> f64 {
        match self.child {
            Some(ref child) => child.draw(canvas, x, y, &self.modified(env), ctx, None),
            None => x,
        }
    }

    pub(crate) fn to_html(&self, html: &mut String, env: &Environment, default: &Environment, fonts: &FontSettings) -> bool {
        match self.child {
            Some(ref child) => child.to_html(html, &self.modified(env), default, fonts),
            None => true,
        }
    }
}
