//! The table of named symbols (`\alpha`, `\int`, `\leq`, `\sin` ...).
//!
//! Each entry gives, for every [`Encoding`] a font may have, the string to draw and how to draw it.
//! The table is built once by [`init`] and never changes afterwards; [`table`] builds it on first use
//! if [`init`] has not been called.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::font::Encoding;

bitflags::bitflags! {
    /// How one encoding's glyph string of a symbol is drawn.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct SymbolFlags: u8 {
        /// draw upright, even in an italic environment
        const ITALIC_OFF = 1 << 0;
        /// draw italic
        const ITALIC_ON  = 1 << 1;
        /// draw with normal weight, even in a bold environment
        const BOLD_OFF   = 1 << 2;
        /// draw bold
        const BOLD_ON    = 1 << 3;
        /// draw a short bar through the upper part of the glyph (`h` becomes `ħ`)
        const DRAW_BAR   = 1 << 4;
    }
}

bitflags::bitflags! {
    /// Properties of a symbol which do not depend on the encoding.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct GlobalSymbolFlags: u8 {
        /// in math mode, widen the symbol by the operator width factor and center the glyph
        const EXTEND_WIDTH_IN_MATHMODE           = 1 << 0;
        /// in math mode, widen the symbol by half the extra width of [`Self::EXTEND_WIDTH_IN_MATHMODE`]
        const SMALL_EXTEND_WIDTH_IN_MATHMODE     = 1 << 1;
        /// the symbol has no descent: its overall height is its ascent
        const HEIGHT_IS_ASCENT                   = 1 << 2;
        /// move sub- and superscripts of this symbol to account for its slant (integrals)
        const INT_LIKE_SYMBOL_CORRECTION         = 1 << 3;
        /// sub- and superscripts go below and above the symbol, not beside it
        const SUB_SUPERSCRIPT_BELOW_ABOVE_SYMBOL = 1 << 4;
    }
}

impl Default for SymbolFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl Default for GlobalSymbolFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// How to draw a symbol in fonts of one [`Encoding`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolProps {
    /// string to draw
    pub symbol:       String,
    /// style overrides
    pub flags:        SymbolFlags,
    /// the font size is multiplied by this
    pub font_scaling: f64,
    /// vertical shift, as a fraction of the symbol's overall height (positive moves down)
    pub y_shift:      f64,
}

impl SymbolProps {
    /// Draws `symbol` with no particular style
    pub fn new(symbol: impl Into<String>) -> Self {
        Self { symbol: symbol.into(), flags: SymbolFlags::empty(), font_scaling: 1.0, y_shift: 0.0 }
    }
}

impl Default for SymbolProps {
    fn default() -> Self {
        Self::new("")
    }
}

/// Everything known about a named symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolFullProps {
    /// family in which the symbol has to be drawn (with its Unicode string), whatever the current font
    pub custom_font_family: Option<String>,
    /// string for fonts covering Unicode
    pub unicode:            Option<SymbolProps>,
    /// ASCII / Latin-1 substitute
    pub standard:           Option<SymbolProps>,
    /// string for fonts in the encoding of the Windows "Symbol" font
    pub win_symbol:         Option<SymbolProps>,
    /// encoding independent properties
    pub global_flags:       GlobalSymbolFlags,
    /// HTML for the symbol
    pub html:               String,
}

impl SymbolFullProps {
    /// Properties to use for fonts of the given encoding, if the symbol exists in that encoding
    pub fn props(&self, encoding: Encoding) -> Option<&SymbolProps> {
        match encoding {
            Encoding::Unicode   => self.unicode.as_ref(),
            Encoding::Standard  => self.standard.as_ref(),
            Encoding::WinSymbol => self.win_symbol.as_ref(),
        }
    }

    fn unicode(s: &str) -> Self {
        Self {
            unicode: Some(SymbolProps::new(s)),
            html: html_escape(s),
            ..Default::default()
        }
    }

    fn standard_only(s: &str) -> Self {
        Self {
            unicode:  Some(SymbolProps::new(s)),
            standard: Some(SymbolProps::new(s)),
            html: html_escape(s),
            ..Default::default()
        }
    }

    fn std(mut self, s: &str) -> Self {
        self.standard = Some(SymbolProps::new(s));
        self
    }

    fn win(mut self, c: char) -> Self {
        self.win_symbol = Some(SymbolProps::new(c));
        self
    }

    fn html(mut self, html: &str) -> Self {
        self.html = html.to_string();
        self
    }

    fn global(mut self, flags: GlobalSymbolFlags) -> Self {
        self.global_flags |= flags;
        self
    }

    fn tiers_mut(&mut self) -> impl Iterator<Item = &mut SymbolProps> {
        self.unicode.iter_mut()
            .chain(self.standard.iter_mut())
            .chain(self.win_symbol.iter_mut())
    }

    /// Adds `flags` to every encoding defined so far
    fn flags(mut self, flags: SymbolFlags) -> Self {
        self.tiers_mut().for_each(|p| p.flags |= flags);
        self
    }

    /// Sets the font scaling of every encoding defined so far
    fn scaled(mut self, factor: f64) -> Self {
        self.tiers_mut().for_each(|p| p.font_scaling = factor);
        self
    }

    fn std_flags(mut self, flags: SymbolFlags) -> Self {
        if let Some(p) = self.standard.as_mut() {
            p.flags |= flags;
        }
        self
    }
}

pub(crate) fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            c if u32::from(c) > 0x7F => out.push_str(&format!("&#x{:X};", u32::from(c))),
            c => out.push(c),
        }
    }
    out
}

/// Font scaling of big operators (sums, products, integrals ...)
pub const BIG_OPERATOR_SCALING: f64 = 1.8;

/// Map from symbol name to its properties.
#[derive(Debug)]
pub struct SymbolTable {
    symbols: HashMap<&'static str, SymbolFullProps>,
}

impl SymbolTable {
    /// Looks a symbol up by name (without the leading backslash)
    pub fn get(&self, name: &str) -> Option<&SymbolFullProps> {
        self.symbols.get(name)
    }

    /// Whether `name` is a known symbol
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Number of symbols
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Names of all symbols, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.symbols.keys().copied()
    }

    fn build() -> Self {
        let mut symbols: HashMap<&'static str, SymbolFullProps> = HashMap::with_capacity(400);
        let mut add = |names: &[&'static str], props: SymbolFullProps| {
            for name in names {
                symbols.insert(*name, props.clone());
            }
        };

        type G = GlobalSymbolFlags;
        let extend = G::EXTEND_WIDTH_IN_MATHMODE;
        let small_extend = G::SMALL_EXTEND_WIDTH_IN_MATHMODE;
        let upright = SymbolFlags::ITALIC_OFF;

        // Greek: name, Unicode, Windows Symbol, Latin look-alike
        let lower_greek: &[(&'static str, char, Option<char>, Option<&str>)] = &[
            ("alpha",      '\u{3B1}', Some('a'), None),
            ("beta",       '\u{3B2}', Some('b'), None),
            ("gamma",      '\u{3B3}', Some('g'), None),
            ("delta",      '\u{3B4}', Some('d'), None),
            ("epsilon",    '\u{3F5}', Some('e'), None),
            ("varepsilon", '\u{3B5}', Some('e'), None),
            ("zeta",       '\u{3B6}', Some('z'), None),
            ("eta",        '\u{3B7}', Some('h'), None),
            ("theta",      '\u{3B8}', Some('q'), None),
            ("vartheta",   '\u{3D1}', Some('J'), None),
            ("iota",       '\u{3B9}', Some('i'), None),
            ("kappa",      '\u{3BA}', Some('k'), None),
            ("varkappa",   '\u{3F0}', Some('k'), None),
            ("lambda",     '\u{3BB}', Some('l'), None),
            ("mu",         '\u{3BC}', Some('m'), Some("\u{B5}")),
            ("nu",         '\u{3BD}', Some('n'), None),
            ("xi",         '\u{3BE}', Some('x'), None),
            ("omicron",    '\u{3BF}', Some('o'), Some("o")),
            ("pi",         '\u{3C0}', Some('p'), None),
            ("varpi",      '\u{3D6}', Some('v'), None),
            ("rho",        '\u{3C1}', Some('r'), None),
            ("varrho",     '\u{3F1}', Some('r'), None),
            ("sigma",      '\u{3C3}', Some('s'), None),
            ("varsigma",   '\u{3C2}', Some('V'), None),
            ("tau",        '\u{3C4}', Some('t'), None),
            ("upsilon",    '\u{3C5}', Some('u'), None),
            ("phi",        '\u{3D5}', Some('f'), None),
            ("varphi",     '\u{3C6}', Some('j'), None),
            ("chi",        '\u{3C7}', Some('c'), None),
            ("psi",        '\u{3C8}', Some('y'), None),
            ("omega",      '\u{3C9}', Some('w'), None),
        ];
        for &(name, uni, win, std) in lower_greek {
            let mut props = SymbolFullProps::unicode(&uni.to_string()).html(&format!("&{};", name));
            if let Some(win) = win { props = props.win(win); }
            if let Some(std) = std { props = props.std(std); }
            add(&[name], props);
        }

        let upper_greek: &[(&'static str, char, char, Option<&str>)] = &[
            ("Alpha",   '\u{391}', 'A', Some("A")),
            ("Beta",    '\u{392}', 'B', Some("B")),
            ("Gamma",   '\u{393}', 'G', None),
            ("Delta",   '\u{394}', 'D', None),
            ("Epsilon", '\u{395}', 'E', Some("E")),
            ("Zeta",    '\u{396}', 'Z', Some("Z")),
            ("Eta",     '\u{397}', 'H', Some("H")),
            ("Theta",   '\u{398}', 'Q', None),
            ("Iota",    '\u{399}', 'I', Some("I")),
            ("Kappa",   '\u{39A}', 'K', Some("K")),
            ("Lambda",  '\u{39B}', 'L', None),
            ("Mu",      '\u{39C}', 'M', Some("M")),
            ("Nu",      '\u{39D}', 'N', Some("N")),
            ("Xi",      '\u{39E}', 'X', None),
            ("Omicron", '\u{39F}', 'O', Some("O")),
            ("Pi",      '\u{3A0}', 'P', None),
            ("Rho",     '\u{3A1}', 'R', Some("P")),
            ("Sigma",   '\u{3A3}', 'S', None),
            ("Tau",     '\u{3A4}', 'T', Some("T")),
            ("Upsilon", '\u{3A5}', 'U', Some("Y")),
            ("Phi",     '\u{3A6}', 'F', None),
            ("Chi",     '\u{3A7}', 'C', Some("X")),
            ("Psi",     '\u{3A8}', 'Y', None),
            ("Omega",   '\u{3A9}', 'W', None),
        ];
        for &(name, uni, win, std) in upper_greek {
            let mut props = SymbolFullProps::unicode(&uni.to_string()).win(win).html(&format!("&{};", name));
            if let Some(std) = std { props = props.std(std); }
            add(&[name], props.flags(upright));
        }

        // binary operators
        let binary: &[(&[&'static str], &str, Option<&str>, Option<char>, &str)] = &[
            (&["pm"],              "\u{B1}",   Some("\u{B1}"), Some('\u{B1}'), "&plusmn;"),
            (&["mp"],              "\u{2213}", None,           None,           "&#8723;"),
            (&["times"],           "\u{D7}",   Some("\u{D7}"), Some('\u{B4}'), "&times;"),
            (&["div"],             "\u{F7}",   Some("\u{F7}"), Some('\u{B8}'), "&divide;"),
            (&["cdot"],            "\u{22C5}", Some("\u{B7}"), Some('\u{D7}'), "&sdot;"),
            (&["ast"],             "\u{2217}", Some("*"),      Some('*'),      "&lowast;"),
            (&["star"],            "\u{22C6}", Some("*"),      None,           "&#8902;"),
            (&["circ"],            "\u{2218}", Some("o"),      None,           "&#8728;"),
            (&["bullet"],          "\u{2219}", Some("\u{B7}"), Some('\u{B7}'), "&bull;"),
            (&["cap"],             "\u{2229}", None,           Some('\u{C7}'), "&cap;"),
            (&["cup"],             "\u{222A}", None,           Some('\u{C8}'), "&cup;"),
            (&["wedge", "land"],   "\u{2227}", Some("^"),      Some('\u{D9}'), "&and;"),
            (&["vee", "lor"],      "\u{2228}", Some("v"),      Some('\u{DA}'), "&or;"),
            (&["oplus"],           "\u{2295}", None,           Some('\u{C5}'), "&oplus;"),
            (&["otimes"],          "\u{2297}", None,           Some('\u{C4}'), "&otimes;"),
            (&["odot"],            "\u{2299}", None,           None,           "&#8857;"),
            (&["ominus"],          "\u{2296}", None,           None,           "&#8854;"),
            (&["oslash"],          "\u{2298}", None,           None,           "&#8856;"),
            (&["setminus"],        "\u{2216}", Some("\\"),     None,           "&#8726;"),
        ];
        // relations
        let relations: &[(&[&'static str], &str, Option<&str>, Option<char>, &str)] = &[
            (&["leq", "le"],       "\u{2264}", Some("<="),     Some('\u{A3}'), "&le;"),
            (&["geq", "ge"],       "\u{2265}", Some(">="),     Some('\u{B3}'), "&ge;"),
            (&["neq", "ne"],       "\u{2260}", Some("!="),     Some('\u{B9}'), "&ne;"),
            (&["equiv"],           "\u{2261}", None,           Some('\u{BA}'), "&equiv;"),
            (&["approx"],          "\u{2248}", Some("~"),      Some('\u{BB}'), "&asymp;"),
            (&["sim"],             "\u{223C}", Some("~"),      Some('~'),      "&sim;"),
            (&["simeq"],           "\u{2243}", None,           None,           "&#8771;"),
            (&["cong"],            "\u{2245}", None,           Some('@'),      "&cong;"),
            (&["propto"],          "\u{221D}", None,           Some('\u{B5}'), "&prop;"),
            (&["ll"],              "\u{226A}", Some("<<"),     None,           "&#8810;"),
            (&["gg"],              "\u{226B}", Some(">>"),     None,           "&#8811;"),
            (&["subset"],          "\u{2282}", None,           Some('\u{CC}'), "&sub;"),
            (&["supset"],          "\u{2283}", None,           Some('\u{C9}'), "&sup;"),
            (&["subseteq"],        "\u{2286}", None,           Some('\u{CD}'), "&sube;"),
            (&["supseteq"],        "\u{2287}", None,           Some('\u{CA}'), "&supe;"),
            (&["in"],              "\u{2208}", None,           Some('\u{CE}'), "&isin;"),
            (&["notin"],           "\u{2209}", None,           Some('\u{CF}'), "&notin;"),
            (&["ni"],              "\u{220B}", None,           None,           "&ni;"),
            (&["perp", "bot"],     "\u{22A5}", None,           Some('^'),      "&perp;"),
            (&["parallel"],        "\u{2225}", Some("||"),     None,           "&#8741;"),
            (&["mid"],             "\u{2223}", Some("|"),      Some('|'),      "&#8739;"),
            (&["therefore"],       "\u{2234}", None,           Some('\\'),     "&there4;"),
        ];
        // arrows
        let arrows: &[(&[&'static str], &str, Option<&str>, Option<char>, &str)] = &[
            (&["leftarrow", "gets"],        "\u{2190}", Some("<-"),   Some('\u{AC}'), "&larr;"),
            (&["rightarrow", "to"],         "\u{2192}", Some("->"),   Some('\u{AE}'), "&rarr;"),
            (&["leftrightarrow"],           "\u{2194}", Some("<->"),  Some('\u{AB}'), "&harr;"),
            (&["uparrow"],                  "\u{2191}", None,         Some('\u{AD}'), "&uarr;"),
            (&["downarrow"],                "\u{2193}", None,         Some('\u{AF}'), "&darr;"),
            (&["updownarrow"],              "\u{2195}", None,         None,           "&#8597;"),
            (&["Leftarrow"],                "\u{21D0}", Some("<="),   Some('\u{DC}'), "&lArr;"),
            (&["Rightarrow"],               "\u{21D2}", Some("=>"),   Some('\u{DE}'), "&rArr;"),
            (&["Leftrightarrow", "iff"],    "\u{21D4}", Some("<=>"),  Some('\u{DB}'), "&hArr;"),
            (&["Uparrow"],                  "\u{21D1}", None,         Some('\u{DD}'), "&uArr;"),
            (&["Downarrow"],                "\u{21D3}", None,         Some('\u{DF}'), "&dArr;"),
            (&["mapsto"],                   "\u{21A6}", Some("|->"),  None,           "&#8614;"),
            (&["longleftarrow"],            "\u{27F5}", Some("<--"),  None,           "&#10229;"),
            (&["longrightarrow"],           "\u{27F6}", Some("-->"),  None,           "&#10230;"),
            (&["longleftrightarrow"],       "\u{27F7}", Some("<-->"), None,           "&#10231;"),
            (&["Longleftarrow"],            "\u{27F8}", Some("<=="),  None,           "&#10232;"),
            (&["Longrightarrow"],           "\u{27F9}", Some("==>"),  None,           "&#10233;"),
            (&["Longleftrightarrow"],       "\u{27FA}", Some("<==>"), None,           "&#10234;"),
            (&["nearrow"],                  "\u{2197}", None,         None,           "&#8599;"),
            (&["searrow"],                  "\u{2198}", None,         None,           "&#8600;"),
            (&["swarrow"],                  "\u{2199}", None,         None,           "&#8601;"),
            (&["nwarrow"],                  "\u{2196}", None,         None,           "&#8598;"),
            (&["leftharpoonup"],            "\u{21BC}", None,         None,           "&#8636;"),
            (&["rightharpoonup"],           "\u{21C0}", None,         None,           "&#8640;"),
            (&["leftharpoondown"],          "\u{21BD}", None,         None,           "&#8637;"),
            (&["rightharpoondown"],         "\u{21C1}", None,         None,           "&#8641;"),
        ];
        for &(names, uni, std, win, html) in binary.iter().chain(relations).chain(arrows) {
            let mut props = SymbolFullProps::unicode(uni).html(html).global(extend);
            if let Some(std) = std { props = props.std(std); }
            if let Some(win) = win { props = props.win(win); }
            add(names, props.flags(upright));
        }

        // other symbols
        let misc: &[(&[&'static str], &str, Option<&str>, Option<char>, &str)] = &[
            (&["infty"],                "\u{221E}", None,            Some('\u{A5}'), "&infin;"),
            (&["partial"],              "\u{2202}", None,            Some('\u{B6}'), "&part;"),
            (&["nabla"],                "\u{2207}", None,            Some('\u{D1}'), "&nabla;"),
            (&["forall"],               "\u{2200}", None,            Some('"'),      "&forall;"),
            (&["exists"],               "\u{2203}", None,            Some('$'),      "&exist;"),
            (&["nexists"],              "\u{2204}", None,            None,           "&#8708;"),
            (&["emptyset", "varnothing"], "\u{2205}", Some("\u{D8}"), Some('\u{C6}'), "&empty;"),
            (&["ell"],                  "\u{2113}", Some("l"),       None,           "&#8467;"),
            (&["Re"],                   "\u{211C}", Some("Re"),      Some('\u{C2}'), "&real;"),
            (&["Im"],                   "\u{2111}", Some("Im"),      Some('\u{C1}'), "&image;"),
            (&["aleph"],                "\u{2135}", None,            Some('\u{C0}'), "&alefsym;"),
            (&["wp"],                   "\u{2118}", None,            Some('\u{C3}'), "&weierp;"),
            (&["angle"],                "\u{2220}", None,            Some('\u{D0}'), "&ang;"),
            (&["prime"],                "\u{2032}", Some("'"),       Some('\u{A2}'), "&prime;"),
            (&["dagger"],               "\u{2020}", None,            None,           "&dagger;"),
            (&["ddagger"],              "\u{2021}", None,            None,           "&Dagger;"),
            (&["dots", "ldots"],        "\u{2026}", Some("..."),     Some('\u{BC}'), "&hellip;"),
            (&["cdots"],                "\u{22EF}", Some("\u{B7}\u{B7}\u{B7}"), None, "&middot;&middot;&middot;"),
            (&["vdots"],                "\u{22EE}", None,            None,           "&#8942;"),
            (&["ddots"],                "\u{22F1}", None,            None,           "&#8945;"),
            (&["neg", "lnot"],          "\u{AC}",   Some("\u{AC}"),  Some('\u{D8}'), "&not;"),
            (&["langle"],               "\u{27E8}", Some("<"),       Some('\u{E1}'), "&lang;"),
            (&["rangle"],               "\u{27E9}", Some(">"),       Some('\u{F1}'), "&rang;"),
            (&["lfloor"],               "\u{230A}", None,            None,           "&lfloor;"),
            (&["rfloor"],               "\u{230B}", None,            None,           "&rfloor;"),
            (&["lceil"],                "\u{2308}", None,            None,           "&lceil;"),
            (&["rceil"],                "\u{2309}", None,            None,           "&rceil;"),
            (&["Vert"],                 "\u{2016}", Some("||"),      None,           "&#8214;"),
            (&["copyright"],            "\u{A9}",   Some("\u{A9}"),  Some('\u{E3}'), "&copy;"),
            (&["registered"],           "\u{AE}",   Some("\u{AE}"),  Some('\u{E2}'), "&reg;"),
            (&["trademark"],            "\u{2122}", Some("TM"),      Some('\u{E4}'), "&trade;"),
            (&["euro"],                 "\u{20AC}", Some("EUR"),     None,           "&euro;"),
            (&["pound"],                "\u{A3}",   Some("\u{A3}"),  None,           "&pound;"),
            (&["yen"],                  "\u{A5}",   Some("\u{A5}"),  None,           "&yen;"),
            (&["cent"],                 "\u{A2}",   Some("\u{A2}"),  None,           "&cent;"),
            (&["sect", "S"],            "\u{A7}",   Some("\u{A7}"),  None,           "&sect;"),
            (&["P"],                    "\u{B6}",   Some("\u{B6}"),  None,           "&para;"),
            (&["degree", "textdegree"], "\u{B0}",   Some("\u{B0}"),  Some('\u{B0}'), "&deg;"),
            (&["textmu"],               "\u{B5}",   Some("\u{B5}"),  None,           "&micro;"),
        ];
        for &(names, uni, std, win, html) in misc {
            let mut props = SymbolFullProps::unicode(uni).html(html);
            if let Some(std) = std { props = props.std(std); }
            if let Some(win) = win { props = props.win(win); }
            add(names, props.flags(upright));
        }
        add(&["hbar"], SymbolFullProps::unicode("\u{210F}").std("h").std_flags(SymbolFlags::DRAW_BAR).html("&#8463;"));
        add(&["lambdabar"], SymbolFullProps::unicode("\u{19B}").win('l').std("\u{3BB}").std_flags(SymbolFlags::DRAW_BAR).html("&#411;"));

        // characters which need an escape in LaTeX
        for &(name, text) in &[("{", "{"), ("}", "}"), ("_", "_"), ("#", "#"), ("%", "%"), ("&", "&"), ("$", "$"),
                               ("backslash", "\\"), ("textbackslash", "\\"), ("textasciitilde", "~"),
                               ("textasciicircum", "^"), ("lbrace", "{"), ("rbrace", "}")] {
            add(&[name], SymbolFullProps::standard_only(text).flags(upright));
        }

        // characters split off math text
        for &(name, uni, std, html) in &[
            ("+", "+",        "+", "+"),
            ("-", "\u{2212}", "-", "&minus;"),
            ("*", "\u{2217}", "*", "*"),
            ("/", "/",        "/", "/"),
            ("<", "<",        "<", "&lt;"),
            (">", ">",        ">", "&gt;"),
            ("=", "=",        "=", "="),
        ] {
            add(&[name], SymbolFullProps::unicode(uni).std(std).html(html).global(extend).flags(upright));
        }
        for &name in &["(", ")", "[", "]"] {
            add(&[name], SymbolFullProps::standard_only(name).flags(upright));
        }
        add(&["|"], SymbolFullProps::standard_only("|").global(small_extend).flags(upright));

        // big operators
        let below_above = G::SUB_SUPERSCRIPT_BELOW_ABOVE_SYMBOL;
        let big: &[(&[&'static str], &str, Option<char>, &str)] = &[
            (&["sum"],        "\u{2211}", Some('\u{E5}'), "&sum;"),
            (&["prod"],       "\u{220F}", Some('\u{D5}'), "&prod;"),
            (&["coprod"],     "\u{2210}", None,           "&#8720;"),
            (&["bigcap"],     "\u{22C2}", Some('\u{C7}'), "&cap;"),
            (&["bigcup"],     "\u{22C3}", Some('\u{C8}'), "&cup;"),
            (&["bigvee"],     "\u{22C1}", Some('\u{DA}'), "&or;"),
            (&["bigwedge"],   "\u{22C0}", Some('\u{D9}'), "&and;"),
            (&["bigoplus"],   "\u{2A01}", None,           "&#10753;"),
            (&["bigotimes"],  "\u{2A02}", None,           "&#10754;"),
        ];
        for &(names, uni, win, html) in big {
            let mut props = SymbolFullProps::unicode(uni).html(html).global(below_above);
            if let Some(win) = win { props = props.win(win); }
            add(names, props.flags(upright).scaled(BIG_OPERATOR_SCALING));
        }
        let integrals: &[(&[&'static str], &str, Option<char>, &str)] = &[
            (&["int"],     "\u{222B}", Some('\u{F2}'), "&int;"),
            (&["iint"],    "\u{222C}", None,           "&#8748;"),
            (&["iiint"],   "\u{222D}", None,           "&#8749;"),
            (&["oint"],    "\u{222E}", None,           "&#8750;"),
            (&["oiint"],   "\u{222F}", None,           "&#8751;"),
            (&["oiiint"],  "\u{2230}", None,           "&#8752;"),
        ];
        for &(names, uni, win, html) in integrals {
            let mut props = SymbolFullProps::unicode(uni).html(html)
                .global(below_above | G::INT_LIKE_SYMBOL_CORRECTION);
            if let Some(win) = win { props = props.win(win); }
            add(names, props.flags(upright).scaled(BIG_OPERATOR_SCALING));
        }

        // named operators, drawn upright in the current font
        let operators = [
            "sin", "cos", "tan", "sinh", "cosh", "tanh", "arcsin", "arccos", "arctan", "asin", "acos", "atan",
            "cot", "coth", "sec", "csc", "log", "ln", "lg", "ld", "lb", "exp", "det", "dim", "ker", "hom", "arg",
            "deg", "gcd", "Pr", "sgn", "sign", "mod", "erf", "median", "Tr", "rank",
        ];
        for name in operators {
            add(&[name], SymbolFullProps::standard_only(name).global(G::HEIGHT_IS_ASCENT).flags(upright));
        }
        let limit_operators = ["lim", "liminf", "limsup", "max", "min", "sup", "inf", "argmax", "argmin"];
        for name in limit_operators {
            add(&[name], SymbolFullProps::standard_only(name).global(G::HEIGHT_IS_ASCENT | below_above).flags(upright));
        }

        // the imaginary unit and the differential, upright in math
        add(&["ii"], SymbolFullProps::standard_only("i").flags(upright));
        add(&["dd"], SymbolFullProps::standard_only("d").flags(upright));
        add(&["ee"], SymbolFullProps::standard_only("e").flags(upright));

        debug!("built symbol table with {} entries", symbols.len());
        Self { symbols }
    }
}

static TABLE: OnceLock<SymbolTable> = OnceLock::new();

/// Builds the symbol table. Calling it again is a no-op.
pub fn init() -> &'static SymbolTable {
    TABLE.get_or_init(SymbolTable::build)
}

/// The symbol table
pub fn table() -> &'static SymbolTable {
    init()
}

/// Properties of the symbol `name`
pub fn lookup(name: &str) -> Option<&'static SymbolFullProps> {
    table().get(name)
}
