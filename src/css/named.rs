//! Table of named colors (CSS/X11 names plus `gray10`..`gray90` and `transparent`).

use super::color::Rgba;

/// Named colors in lookup order. When several names map to the same value, the first one wins
/// in [`color_to_string`](super::color_to_string).
pub static NAMED_COLORS: &[(&str, Rgba)] = &[
    ("aliceblue", Rgba::new(240, 248, 255, 255)),
    ("antiquewhite", Rgba::new(250, 235, 215, 255)),
    ("aqua", Rgba::new(0, 255, 255, 255)),
    ("aquamarine", Rgba::new(127, 255, 212, 255)),
    ("azure", Rgba::new(240, 255, 255, 255)),
    ("beige", Rgba::new(245, 245, 220, 255)),
    ("bisque", Rgba::new(255, 228, 196, 255)),
    ("black", Rgba::new(0, 0, 0, 255)),
    ("blanchedalmond", Rgba::new(255, 235, 205, 255)),
    ("blue", Rgba::new(0, 0, 255, 255)),
    ("blueviolet", Rgba::new(138, 43, 226, 255)),
    ("brown", Rgba::new(165, 42, 42, 255)),
    ("burlywood", Rgba::new(222, 184, 135, 255)),
    ("cadetblue", Rgba::new(95, 158, 160, 255)),
    ("chartreuse", Rgba::new(127, 255, 0, 255)),
    ("chocolate", Rgba::new(210, 105, 30, 255)),
    ("coral", Rgba::new(255, 127, 80, 255)),
    ("cornflowerblue", Rgba::new(100, 149, 237, 255)),
    ("cornsilk", Rgba::new(255, 248, 220, 255)),
    ("crimson", Rgba::new(220, 20, 60, 255)),
    ("cyan", Rgba::new(0, 255, 255, 255)),
    ("darkblue", Rgba::new(0, 0, 139, 255)),
    ("darkcyan", Rgba::new(0, 139, 139, 255)),
    ("darkgoldenrod", Rgba::new(184, 134, 11, 255)),
    ("darkgray", Rgba::new(169, 169, 169, 255)),
    ("darkgreen", Rgba::new(0, 100, 0, 255)),
    ("darkgrey", Rgba::new(169, 169, 169, 255)),
    ("darkkhaki", Rgba::new(189, 183, 107, 255)),
    ("darkmagenta", Rgba::new(139, 0, 139, 255)),
    ("darkolivegreen", Rgba::new(85, 107, 47, 255)),
    ("darkorange", Rgba::new(255, 140, 0, 255)),
    ("darkorchid", Rgba::new(153, 50, 204, 255)),
    ("darkred", Rgba::new(139, 0, 0, 255)),
    ("darksalmon", Rgba::new(233, 150, 122, 255)),
    ("darkseagreen", Rgba::new(143, 188, 143, 255)),
    ("darkslateblue", Rgba::new(72, 61, 139, 255)),
    ("darkslategray", Rgba::new(47, 79, 79, 255)),
    ("darkslategrey", Rgba::new(47, 79, 79, 255)),
    ("darkturquoise", Rgba::new(0, 206, 209, 255)),
    ("darkviolet", Rgba::new(148, 0, 211, 255)),
    ("deeppink", Rgba::new(255, 20, 147, 255)),
    ("deepskyblue", Rgba::new(0, 191, 255, 255)),
    ("dimgray", Rgba::new(105, 105, 105, 255)),
    ("dimgrey", Rgba::new(105, 105, 105, 255)),
    ("dodgerblue", Rgba::new(30, 144, 255, 255)),
    ("firebrick", Rgba::new(178, 34, 34, 255)),
    ("floralwhite", Rgba::new(255, 250, 240, 255)),
    ("forestgreen", Rgba::new(34, 139, 34, 255)),
    ("fuchsia", Rgba::new(255, 0, 255, 255)),
    ("gainsboro", Rgba::new(220, 220, 220, 255)),
    ("ghostwhite", Rgba::new(248, 248, 255, 255)),
    ("gold", Rgba::new(255, 215, 0, 255)),
    ("goldenrod", Rgba::new(218, 165, 32, 255)),
    ("gray10", Rgba::new(25, 25, 25, 255)),
    ("gray20", Rgba::new(51, 51, 51, 255)),
    ("gray30", Rgba::new(76, 76, 76, 255)),
    ("gray40", Rgba::new(102, 102, 102, 255)),
    ("gray50", Rgba::new(127, 127, 127, 255)),
    ("gray60", Rgba::new(153, 153, 153, 255)),
    ("gray70", Rgba::new(178, 178, 178, 255)),
    ("gray80", Rgba::new(204, 204, 204, 255)),
    ("gray90", Rgba::new(229, 229, 229, 255)),
    ("gray", Rgba::new(128, 128, 128, 255)),
    ("green", Rgba::new(0, 128, 0, 255)),
    ("greenyellow", Rgba::new(173, 255, 47, 255)),
    ("grey", Rgba::new(128, 128, 128, 255)),
    ("honeydew", Rgba::new(240, 255, 240, 255)),
    ("hotpink", Rgba::new(255, 105, 180, 255)),
    ("indianred", Rgba::new(205, 92, 92, 255)),
    ("indigo", Rgba::new(75, 0, 130, 255)),
    ("ivory", Rgba::new(255, 255, 240, 255)),
    ("khaki", Rgba::new(240, 230, 140, 255)),
    ("lavender", Rgba::new(230, 230, 250, 255)),
    ("lavenderblush", Rgba::new(255, 240, 245, 255)),
    ("lawngreen", Rgba::new(124, 252, 0, 255)),
    ("lemonchiffon", Rgba::new(255, 250, 205, 255)),
    ("lightblue", Rgba::new(173, 216, 230, 255)),
    ("lightcoral", Rgba::new(240, 128, 128, 255)),
    ("lightcyan", Rgba::new(224, 255, 255, 255)),
    ("lightgoldenrodyellow", Rgba::new(250, 250, 210, 255)),
    ("lightgray", Rgba::new(211, 211, 211, 255)),
    ("lightgreen", Rgba::new(144, 238, 144, 255)),
    ("lightgrey", Rgba::new(211, 211, 211, 255)),
    ("lightpink", Rgba::new(255, 182, 193, 255)),
    ("lightsalmon", Rgba::new(255, 160, 122, 255)),
    ("lightseagreen", Rgba::new(32, 178, 170, 255)),
    ("lightskyblue", Rgba::new(135, 206, 250, 255)),
    ("lightslategray", Rgba::new(119, 136, 153, 255)),
    ("lightslategrey", Rgba::new(119, 136, 153, 255)),
    ("lightsteelblue", Rgba::new(176, 196, 222, 255)),
    ("lightyellow", Rgba::new(255, 255, 224, 255)),
    ("lime", Rgba::new(0, 255, 0, 255)),
    ("limegreen", Rgba::new(50, 205, 50, 255)),
    ("linen", Rgba::new(250, 240, 230, 255)),
    ("magenta", Rgba::new(255, 0, 255, 255)),
    ("maroon", Rgba::new(128, 0, 0, 255)),
    ("mediumaquamarine", Rgba::new(102, 205, 170, 255)),
    ("mediumblue", Rgba::new(0, 0, 205, 255)),
    ("mediumorchid", Rgba::new(186, 85, 211, 255)),
    ("mediumpurple", Rgba::new(147, 112, 219, 255)),
    ("mediumseagreen", Rgba::new(60, 179, 113, 255)),
    ("mediumslateblue", Rgba::new(123, 104, 238, 255)),
    ("mediumspringgreen", Rgba::new(0, 250, 154, 255)),
    ("mediumturquoise", Rgba::new(72, 209, 204, 255)),
    ("mediumvioletred", Rgba::new(199, 21, 133, 255)),
    ("midnightblue", Rgba::new(25, 25, 112, 255)),
    ("mintcream", Rgba::new(245, 255, 250, 255)),
    ("mistyrose", Rgba::new(255, 228, 225, 255)),
    ("moccasin", Rgba::new(255, 228, 181, 255)),
    ("navajowhite", Rgba::new(255, 222, 173, 255)),
    ("navy", Rgba::new(0, 0, 128, 255)),
    ("oldlace", Rgba::new(253, 245, 230, 255)),
    ("olive", Rgba::new(128, 128, 0, 255)),
    ("olivedrab", Rgba::new(107, 142, 35, 255)),
    ("orange", Rgba::new(255, 165, 0, 255)),
    ("orangered", Rgba::new(255, 69, 0, 255)),
    ("orchid", Rgba::new(218, 112, 214, 255)),
    ("palegoldenrod", Rgba::new(238, 232, 170, 255)),
    ("palegreen", Rgba::new(152, 251, 152, 255)),
    ("paleturquoise", Rgba::new(175, 238, 238, 255)),
    ("palevioletred", Rgba::new(219, 112, 147, 255)),
    ("papayawhip", Rgba::new(255, 239, 213, 255)),
    ("peachpuff", Rgba::new(255, 218, 185, 255)),
    ("peru", Rgba::new(205, 133, 63, 255)),
    ("pink", Rgba::new(255, 192, 203, 255)),
    ("plum", Rgba::new(221, 160, 221, 255)),
    ("powderblue", Rgba::new(176, 224, 230, 255)),
    ("purple", Rgba::new(128, 0, 128, 255)),
    ("red", Rgba::new(255, 0, 0, 255)),
    ("rosybrown", Rgba::new(188, 143, 143, 255)),
    ("royalblue", Rgba::new(65, 105, 225, 255)),
    ("saddlebrown", Rgba::new(139, 69, 19, 255)),
    ("salmon", Rgba::new(250, 128, 114, 255)),
    ("sandybrown", Rgba::new(244, 164, 96, 255)),
    ("seagreen", Rgba::new(46, 139, 87, 255)),
    ("seashell", Rgba::new(255, 245, 238, 255)),
    ("sienna", Rgba::new(160, 82, 45, 255)),
    ("silver", Rgba::new(192, 192, 192, 255)),
    ("skyblue", Rgba::new(135, 206, 235, 255)),
    ("slateblue", Rgba::new(106, 90, 205, 255)),
    ("slategray", Rgba::new(112, 128, 144, 255)),
    ("slategrey", Rgba::new(112, 128, 144, 255)),
    ("snow", Rgba::new(255, 250, 250, 255)),
    ("springgreen", Rgba::new(0, 255, 127, 255)),
    ("steelblue", Rgba::new(70, 130, 180, 255)),
    ("tan", Rgba::new(210, 180, 140, 255)),
    ("teal", Rgba::new(0, 128, 128, 255)),
    ("thistle", Rgba::new(216, 191, 216, 255)),
    ("tomato", Rgba::new(255, 99, 71, 255)),
    ("transparent", Rgba::new(0, 0, 0, 0)),
    ("turquoise", Rgba::new(64, 224, 208, 255)),
    ("violet", Rgba::new(238, 130, 238, 255)),
    ("wheat", Rgba::new(245, 222, 179, 255)),
    ("white", Rgba::new(255, 255, 255, 255)),
    ("whitesmoke", Rgba::new(245, 245, 245, 255)),
    ("yellow", Rgba::new(255, 255, 0, 255)),
    ("yellowgreen", Rgba::new(154, 205, 50, 255)),
];

/// Case-insensitive lookup of a color name.
pub fn lookup(name: &str) -> Option<Rgba> {
    let name = name.trim().to_ascii_lowercase();
    NAMED_COLORS.iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, color)| color)
}

/// Returns the first name whose color equals `color`.
pub fn name_of(color: Rgba) -> Option<&'static str> {
    NAMED_COLORS.iter()
        .find(|(_, c)| *c == color)
        .map(|&(name, _)| name)
}
