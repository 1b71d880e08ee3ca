//! Outlines shared by several nodes: curly braces, arrows and rounded frames.

use super::Path;
use crate::layout::constants::{
    HBRACE_CUBIC_CONTROL_FACTOR, HBRACE_CUBIC_SHRINK, HBRACE_THICK_LINE, HBRACE_THIN_LINE,
};

/// A horizontal curly brace opening upwards (the tip points down), as drawn below `\underbrace`.
///
/// The brace is centered on `x`, spans `width` and is `height` tall around `ybrace`.
/// The outline is meant to be filled: its strokes are thin at the ends and thick in the arms.
pub fn hbrace_path(x: f64, ybrace: f64, width: f64, height: f64, line_width: f64) -> Path {
    let thin = HBRACE_THIN_LINE * line_width;
    let thick = HBRACE_THICK_LINE * line_width;
    let shrink = HBRACE_CUBIC_SHRINK * height;
    let ctrl = HBRACE_CUBIC_CONTROL_FACTOR * height;

    let xleft = x - width / 2.0;
    let xleft_inner = xleft + thin;
    let xright = x + width / 2.0;
    let xright_inner = xright - thin;
    let xlefttip = x - thin / 2.0;
    let xrighttip = x + thin / 2.0;

    let ytop = ybrace - shrink;
    let yctop = ybrace - thick / 2.0;
    let ycbottom = ybrace + thick / 2.0;
    let ybottom = ybrace + shrink;
    let ybottomtip = ybottom - thick;

    let mut path = Path::new();
    path.move_to(xleft_inner, ytop)
        .line_to(xleft, ytop)
        .cubic_to(xleft, ytop + ctrl, xleft + shrink - ctrl, ycbottom, xleft + shrink, ycbottom)
        .line_to(xlefttip - shrink, ycbottom)
        .cubic_to(xlefttip - shrink + ctrl, ycbottom, xlefttip, ybottom - ctrl, xlefttip, ybottom)
        .line_to(xrighttip, ybottom)
        .cubic_to(xrighttip, ybottom - ctrl, xrighttip + shrink - ctrl, ycbottom, xrighttip + shrink, ycbottom)
        .line_to(xright - shrink, ycbottom)
        .cubic_to(xright - shrink + ctrl, ycbottom, xright, ytop + ctrl, xright, ytop)
        .line_to(xright_inner, ytop)
        .cubic_to(xright_inner, ytop + ctrl, xright_inner - shrink + ctrl, yctop, xright_inner - shrink, yctop)
        .line_to(x + shrink, yctop)
        .cubic_to(x + shrink - ctrl, yctop, x, yctop, x, ybottomtip)
        .cubic_to(x, yctop, x - shrink + ctrl, yctop, x - shrink, yctop)
        .line_to(xleft_inner + shrink, yctop)
        .cubic_to(xleft_inner + shrink - ctrl, yctop, xleft_inner, ytop + ctrl, xleft_inner, ytop)
        .close();
    path
}

/// A horizontal arrow from `x` to `x + width` at height `y`. `head` is the size of the arrow heads.
pub fn arrow_path(x: f64, y: f64, width: f64, head: f64, left: bool, right: bool) -> Path {
    let mut path = Path::new();
    path.move_to(x, y).line_to(x + width, y);
    add_heads(&mut path, x, y, width, head, left, right);
    path
}

/// A rectangle with top-left corner `(x, y)` whose corners are quarter ellipses of radius `radius`.
/// The radius is limited to half of the smaller side; a radius of zero gives a plain rectangle.
pub fn rounded_rect_path(x: f64, y: f64, width: f64, height: f64, radius: f64) -> Path {
    // control distance of a cubic approximating a quarter circle
    const KAPPA: f64 = 0.552_284_75;
    let r = radius.min(width / 2.0).min(height / 2.0).max(0.0);
    let c = r * (1.0 - KAPPA);
    let (x2, y2) = (x + width, y + height);

    let mut path = Path::new();
    path.move_to(x + r, y).line_to(x2 - r, y);
    if r > 0.0 {
        path.cubic_to(x2 - c, y, x2, y + c, x2, y + r);
    }
    path.line_to(x2, y2 - r);
    if r > 0.0 {
        path.cubic_to(x2, y2 - c, x2 - c, y2, x2 - r, y2);
    }
    path.line_to(x + r, y2);
    if r > 0.0 {
        path.cubic_to(x + c, y2, x, y2 - c, x, y2 - r);
    }
    path.line_to(x, y + r);
    if r > 0.0 {
        path.cubic_to(x, y + c, x + c, y, x + r, y);
    }
    path.close();
    path
}

fn add_heads(path: &mut Path, x: f64, y: f64, width: f64, head: f64, left: bool, right: bool) {
    let h = head / 2.0;
    if right {
        let xr = x + width;
        path.move_to(xr - h, y - h).line_to(xr, y).line_to(xr - h, y + h);
    }
    if left {
        path.move_to(x + h, y - h).line_to(x, y).line_to(x + h, y + h);
    }
}
