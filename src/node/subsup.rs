//! Sub- and superscripts placed beside the preceding node.
//!
//! A script is drawn in a smaller font. Normally its position only depends on the font: a superscript
//! sits a fraction of the x-height above the baseline, a subscript hangs below it. After a node which is
//! taller (for superscripts) or deeper (for subscripts) than the font, the list hands the size of that
//! node in as `prev`, and the script moves out so that it overlaps the node only slightly.

use crate::environment::Environment;
use crate::layout::{MathContext, NodeSize};
use crate::render::Canvas;

use super::Node;

struct ScriptLayout {
    env:  Environment,
    size: NodeSize,
    /// offset of the script's baseline from the baseline of the list (positive is down)
    dy:   f64,
}

fn superscript_layout(child: &Node, env: &Environment, ctx: &MathContext, prev: Option<&NodeSize>) -> ScriptLayout {
    let settings = ctx.settings;
    let child_env = env.scaled(settings.subsuper_size_factor);
    let cs = child.compute_size(&child_env, ctx, None);
    let child_descent = cs.descent();

    // height of the bottom of the script above the baseline
    let mut shift = settings.super_shift_factor * ctx.tight_rect(env, "x").height;
    if let Some(prev) = prev {
        shift = shift.max(prev.baseline_height - settings.special_super_shift_factor * cs.baseline_height - child_descent);
    }

    ScriptLayout {
        env: child_env,
        size: NodeSize {
            width: cs.width,
            baseline_height: cs.overall_height + shift,
            overall_height: cs.overall_height,
            strikeout_pos: prev.map_or_else(|| ctx.strikeout_pos(env), |p| p.strikeout_pos),
            ..NodeSize::default()
        },
        dy: -(shift + child_descent),
    }
}

fn subscript_layout(child: &Node, env: &Environment, ctx: &MathContext, prev: Option<&NodeSize>) -> ScriptLayout {
    let settings = ctx.settings;
    let child_env = env.scaled(settings.subsuper_size_factor);
    let cs = child.compute_size(&child_env, ctx, None);

    // depth of the script's baseline below the baseline
    let mut shift = cs.baseline_height - settings.sub_shift_factor * ctx.tight_rect(&child_env, "x").height;
    if let Some(prev) = prev {
        shift = shift.max(prev.descent() + settings.special_sub_shift_factor * cs.baseline_height);
    }

    ScriptLayout {
        env: child_env,
        size: NodeSize {
            width: cs.width,
            baseline_height: cs.baseline_height - shift,
            overall_height: cs.overall_height,
            strikeout_pos: prev.map_or_else(|| ctx.strikeout_pos(env), |p| p.strikeout_pos),
            ..NodeSize::default()
        },
        dy: shift,
    }
}

pub(super) fn superscript_size(child: &Node, env: &Environment, ctx: &MathContext, prev: Option<&NodeSize>) -> NodeSize {
    superscript_layout(child, env, ctx, prev).size
}

pub(super) fn subscript_size(child: &Node, env: &Environment, ctx: &MathContext, prev: Option<&NodeSize>) -> NodeSize {
    subscript_layout(child, env, ctx, prev).size
}

pub(super) fn draw_superscript(child: &Node, canvas: &mut dyn Canvas, x: f64, y: f64, env: &Environment, ctx: &MathContext, prev: Option<&NodeSize>) -> f64 {
    let layout = superscript_layout(child, env, ctx, prev);
    child.draw(canvas, x, y + layout.dy, &layout.env, ctx, None);
    x + layout.size.width
}

pub(super) fn draw_subscript(child: &Node, canvas: &mut dyn Canvas, x: f64, y: f64, env: &Environment, ctx: &MathContext, prev: Option<&NodeSize>) -> f64 {
    let layout = subscript_layout(child, env, ctx, prev);
    child.draw(canvas, x, y + layout.dy, &layout.env, ctx, None);
    x + layout.size.width
}
