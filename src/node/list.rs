//! Horizontal lists: children placed next to each other on a common baseline.
//!
//! Measuring and drawing share [`arrange`], which walks the children once and decides where each of them goes.
//! Besides placing nodes one after the other it handles
//!
//!   - a superscript directly followed by a subscript (or the other way round): both start at the same x;
//!   - a node with limits (`\sum`, `\int` in display math, anything after `\limits`) followed by scripts:
//!     the scripts go below and above it, in the operator's script size;
//!   - a subscript after an italic node tucks under its overhang;
//!   - a [`Node::ModifyEnvironment`] without child, which changes the environment of the following siblings.

use crate::environment::{Environment, FontSettings};
use crate::layout::{MathContext, NodeSize};
use crate::render::Canvas;

use super::Node;

/// Where one node of the list goes
struct Placement<'n> {
    node: &'n Node,
    env:  Environment,
    prev: Option<NodeSize>,
    dx:   f64,
    dy:   f64,
}

struct Arrangement<'n> {
    placements: Vec<Placement<'n>>,
    size:       NodeSize,
}

impl<'n> Arrangement<'n> {
    fn push(&mut self, placement: Placement<'n>, size: &NodeSize) {
        let shifted = NodeSize {
            baseline_height: size.baseline_height - placement.dy,
            ..*size
        };
        self.size.cover(&shifted);
        self.placements.push(placement);
    }
}

fn is_subscript(node: Option<&Node>) -> bool {
    matches!(node, Some(Node::Subscript(_)))
}

fn is_superscript(node: Option<&Node>) -> bool {
    matches!(node, Some(Node::Superscript(_)))
}

fn script_child(node: &Node) -> &Node {
    match *node {
        Node::Subscript(ref child) | Node::Superscript(ref child) => child,
        _ => node,
    }
}

fn arrange<'n>(children: &'n [Node], env: &Environment, ctx: &MathContext) -> Arrangement<'n> {
    let settings = ctx.settings;
    let mut env = env.clone();
    let mut out = Arrangement {
        placements: Vec::with_capacity(children.len()),
        size: NodeSize { strikeout_pos: ctx.strikeout_pos(&env), ..NodeSize::default() },
    };
    let mut x = 0.0;
    let mut prev: Option<NodeSize> = None;
    let mut i = 0;

    while i < children.len() {
        let node = &children[i];
        let next = children.get(i + 1);
        let after_next = children.get(i + 2);

        let lw = ctx.line_width(&env);
        let space = ctx.loose_rect(&env, " ").width;
        let mode_factor = settings.subsuper_mode_selection_by_size_factor;
        // scripts only move out for a preceding node which is tall (superscripts) or deep (subscripts)
        let tall_prev = prev.filter(|p| p.baseline_height >= ctx.ascent(&env) * mode_factor);
        let deep_prev = prev.filter(|p| p.descent() >= ctx.descent(&env) * mode_factor);
        let sub_dx = lw / 2.0 - prev.map_or(0.0, |p| p.sub_besides_x_correction);

        let pair = match *node {
            Node::Superscript(_) if is_subscript(next) => next.map(|n| (node, n)),
            Node::Subscript(_) if is_superscript(next) => next.map(|n| (n, node)),
            _ => None,
        };

        if let Some((sup, sub)) = pair {
            let sup_size = sup.compute_size(&env, ctx, tall_prev.as_ref());
            let sub_size = sub.compute_size(&env, ctx, deep_prev.as_ref());
            out.push(Placement { node: sup, env: env.clone(), prev: tall_prev, dx: x, dy: 0.0 }, &sup_size);
            out.push(Placement { node: sub, env: env.clone(), prev: deep_prev, dx: x + sub_dx, dy: 0.0 }, &sub_size);
            let width = (sup_size.width + settings.italic_correction_factor * space).max(sub_size.width + sub_dx);
            let mut group = sup_size;
            group.cover(&sub_size);
            group.width = width;
            x += width;
            prev = Some(group);
            i += 2;
            continue;
        }

        if node.has_limits() && (is_subscript(next) || is_superscript(next)) {
            let (sub, sup, used) = match (next, after_next) {
                (Some(a @ Node::Subscript(_)), Some(b @ Node::Superscript(_))) => (Some(a), Some(b), 3),
                (Some(a @ Node::Superscript(_)), Some(b @ Node::Subscript(_))) => (Some(b), Some(a), 3),
                (Some(a @ Node::Subscript(_)), _) => (Some(a), None, 2),
                (Some(a), _) => (None, Some(a), 2),
                (None, _) => (None, None, 1),
            };
            let ns = node.compute_size(&env, ctx, None);
            let op_env = env.scaled(settings.operatorsubsuper_size_factor);
            let gap = ctx.x_height(&env) * settings.operatorsubsuper_distance_factor;
            let extra = ctx.loose_rect(&env, "x").width * settings.operatorsubsuper_extraspace_factor;
            let corr = ns.sub_super_x_correction;

            let sub = sub.map(|s| {
                let child = script_child(s);
                (child, child.compute_size(&op_env, ctx, None))
            });
            let sup = sup.map(|s| {
                let child = script_child(s);
                (child, child.compute_size(&op_env, ctx, None))
            });
            let width = [
                Some(ns.width),
                sub.as_ref().map(|(_, s)| s.width + corr),
                sup.as_ref().map(|(_, s)| s.width + corr),
            ].iter().flatten().fold(0.0_f64, |a, &b| a.max(b)) + extra;

            out.push(Placement { node, env: env.clone(), prev: None, dx: x + (width - ns.width) / 2.0, dy: 0.0 }, &ns);
            // the limits of slanted operators shift apart, the lower one to the left
            if let Some((child, size)) = sub {
                let dy = ns.descent() + gap + size.baseline_height;
                let dx = x + (width - size.width - corr) / 2.0;
                out.push(Placement { node: child, env: op_env.clone(), prev: None, dx, dy }, &size);
            }
            if let Some((child, size)) = sup {
                let dy = -(ns.baseline_height + gap + size.descent());
                let dx = x + (width - size.width + corr) / 2.0;
                out.push(Placement { node: child, env: op_env.clone(), prev: None, dx, dy }, &size);
            }
            x += width;
            prev = Some(NodeSize { width, ..ns });
            i += used;
            continue;
        }

        let (size, dx, advance) = match *node {
            Node::Subscript(_) => {
                let size = node.compute_size(&env, ctx, deep_prev.as_ref());
                (size, sub_dx, size.width + sub_dx)
            },
            Node::Superscript(_) => {
                let size = node.compute_size(&env, ctx, tall_prev.as_ref());
                (size, 0.0, size.width)
            },
            _ => {
                let size = node.compute_size(&env, ctx, None);
                (size, 0.0, size.width)
            },
        };
        let special = match *node {
            Node::Subscript(_) => deep_prev,
            Node::Superscript(_) => tall_prev,
            _ => None,
        };
        out.push(Placement { node, env: env.clone(), prev: special, dx: x + dx, dy: 0.0 }, &size);
        out.size.sub_besides_x_correction = size.sub_besides_x_correction;
        out.size.sub_super_x_correction = size.sub_super_x_correction;
        x += advance;
        prev = Some(size);

        if let Node::ModifyEnvironment(ref m) = *node {
            if m.child().is_none() {
                m.apply(&mut env);
            }
        }
        i += 1;
    }

    out.size.width = x;
    out
}

pub(super) fn size(children: &[Node], env: &Environment, ctx: &MathContext) -> NodeSize {
    arrange(children, env, ctx).size
}

pub(super) fn draw(children: &[Node], canvas: &mut dyn Canvas, x: f64, y: f64, env: &Environment, ctx: &MathContext) -> f64 {
    let arrangement = arrange(children, env, ctx);
    for p in &arrangement.placements {
        p.node.draw(canvas, x + p.dx, y + p.dy, &p.env, ctx, p.prev.as_ref());
    }
    x + arrangement.size.width
}

pub(super) fn to_html(children: &[Node], html: &mut String, env: &Environment, default: &Environment, fonts: &FontSettings) -> bool {
    let mut env = env.clone();
    let mut ok = true;
    for child in children {
        ok &= child.to_html(html, &env, default, fonts);
        if let Node::ModifyEnvironment(ref m) = *child {
            if m.child().is_none() {
                m.apply(&mut env);
            }
        }
    }
    ok
}
