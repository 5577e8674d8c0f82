//! RcDoc-based pretty-printer with termcolor annotations for [`Expr`].
//!
//! Role
//! - Convert an expression into an annotated document suitable for width-aware rendering.
//! - Provide colored output for terminals (TTY-aware) and plain strings for logs/tests.
//! - Children print as `#i` by default; callers that know what the children are (e.g. a
//!   relation holding integral labels) can supply their own naming.
//!
//! Performance
//! - Building the doc is O(n) in expression size; rendering respects line widths with
//!   linear-time layout in the size of the resulting document.

use crate::expr::{BinaryOp, Expr};
use pretty::{FmtWrite, RcDoc, RenderAnnotated};
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Styles used to annotate parts of the pretty-printed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Parentheses are colored by nesting depth so matching pairs share a color.
    Paren(u8),
    Operator, // +, -, *
    Number,
    Param,
    Child,
}

impl Style {
    fn to_color_spec(self) -> ColorSpec {
        let mut s = ColorSpec::new();
        match self {
            Style::Paren(depth) => {
                let fg = match depth % 6 {
                    0 => Color::Blue,
                    1 => Color::Green,
                    2 => Color::White,
                    3 => Color::Yellow,
                    4 => Color::Red,
                    5 => Color::Magenta,
                    _ => unreachable!(),
                };
                s.set_fg(Some(fg)).set_dimmed(true);
            }
            Style::Operator => {
                s.set_fg(Some(Color::Yellow)).set_bold(true);
            }
            Style::Number => {
                s.set_fg(Some(Color::Cyan));
            }
            Style::Param => {
                s.set_fg(Some(Color::Green)).set_bold(true);
            }
            Style::Child => {
                s.set_fg(Some(Color::Magenta));
            }
        }
        s
    }
}

/// Naming callback used to render child references.
pub type ChildNaming<'n> = &'n dyn Fn(usize) -> String;

fn default_child_name(index: usize) -> String {
    format!("#{index}")
}

#[inline]
fn lparen(depth: u8) -> RcDoc<'static, Style> {
    RcDoc::as_string("(").annotate(Style::Paren(depth))
}

#[inline]
fn rparen(depth: u8) -> RcDoc<'static, Style> {
    RcDoc::as_string(")").annotate(Style::Paren(depth))
}

fn op(o: BinaryOp) -> RcDoc<'static, Style> {
    RcDoc::as_string(o.symbol()).annotate(Style::Operator)
}

fn number(value: f64) -> RcDoc<'static, Style> {
    RcDoc::as_string(format!("{value:?}")).annotate(Style::Number)
}

fn precedence(e: &Expr) -> u8 {
    match e {
        Expr::Binary { op, .. } => op.precedence(),
        // Negative constants read as a unary minus, keep them tight but below products
        Expr::Constant(v) if v.is_sign_negative() => 3,
        Expr::Constant(_) | Expr::Parameter(_) | Expr::Child(_) => 255,
    }
}

/// Operands bind looser than their parent need parentheses. An operand on the right of an
/// operator of equal binding strength is parenthesized too, so `a - (b - c)` and
/// `a * (b * c)` keep their shape.
#[inline]
fn requires_parens(current: &Expr, parent: BinaryOp, is_rhs: bool) -> bool {
    let current_prec = precedence(current);
    let parent_prec = parent.precedence();
    match current {
        Expr::Constant(v) if v.is_sign_negative() => is_rhs,
        _ => current_prec < parent_prec || (is_rhs && current_prec == parent_prec),
    }
}

#[inline]
fn to_doc_parenthesized_with_depth(
    e: &Expr,
    parent: BinaryOp,
    is_rhs: bool,
    depth: u8,
    naming: ChildNaming<'_>,
) -> RcDoc<'static, Style> {
    if requires_parens(e, parent, is_rhs) {
        lparen(depth)
            .append(to_doc_with_depth(e, depth + 1, naming))
            .append(rparen(depth))
            .group()
    } else {
        to_doc_with_depth(e, depth, naming)
    }
}

/// Depth-aware variant that colors parentheses by nesting level.
fn to_doc_with_depth(e: &Expr, depth: u8, naming: ChildNaming<'_>) -> RcDoc<'static, Style> {
    match e {
        Expr::Constant(value) => number(*value),
        Expr::Parameter(p) => RcDoc::as_string(p.to_string()).annotate(Style::Param),
        Expr::Child(i) => RcDoc::as_string(naming(*i)).annotate(Style::Child),
        Expr::Binary { op: o, lhs, rhs } => {
            to_doc_parenthesized_with_depth(lhs, *o, false, depth, naming)
                .append(RcDoc::line())
                .append(op(*o))
                .append(RcDoc::space())
                .append(to_doc_parenthesized_with_depth(rhs, *o, true, depth, naming))
                .group()
        }
    }
}

// A writer that maps Style annotations to termcolor ColorSpec on a WriteColor sink.
struct ColorWriter<'w, W: WriteColor + Write> {
    out: &'w mut W,
}

impl<'a, 'w, W: WriteColor + Write> RenderAnnotated<'a, Style> for ColorWriter<'w, W> {
    fn push_annotation(&mut self, ann: &'a Style) -> io::Result<()> {
        self.out.set_color(&ann.to_color_spec())
    }
    fn pop_annotation(&mut self) -> io::Result<()> {
        self.out.reset()
    }
}

impl<'w, W: WriteColor + Write> pretty::Render for ColorWriter<'w, W> {
    type Error = io::Error;
    fn write_str(&mut self, s: &str) -> io::Result<usize> {
        self.out.write_all(s.as_bytes())?;
        Ok(s.len())
    }
    fn write_str_all(&mut self, s: &str) -> io::Result<()> {
        self.out.write_all(s.as_bytes())
    }
    fn fail_doc(&self) -> Self::Error {
        io::Error::other("render failed")
    }
}

/// Render a document to a `termcolor::WriteColor` with width-aware layout.
fn render_to<W: WriteColor + Write>(
    doc: &RcDoc<'_, Style>,
    width: usize,
    out: &mut W,
) -> std::io::Result<()> {
    let mut cw = ColorWriter { out };
    doc.render_raw(width, &mut cw)
}

/// Retrieve the width of the terminal, or 80 if it cannot be determined.
fn terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

/// Pretty-printing conveniences for expressions.
pub trait PrettyExpr {
    /// Build an RcDoc representation with style annotations, children printed as `#i`.
    fn pretty_doc(&self) -> RcDoc<'static, Style>;

    /// Build an RcDoc representation, children printed through `naming`.
    fn pretty_doc_with(&self, naming: ChildNaming<'_>) -> RcDoc<'static, Style>;

    /// Render with colors to any termcolor writer at the given width.
    fn pretty_render_to<W: WriteColor + Write>(&self, width: usize, out: &mut W) -> io::Result<()>;

    /// Print to stdout with colors (TTY-aware), at auto-detected width (or 80 if not a TTY).
    fn pretty_print(&self) -> io::Result<()>;

    /// Format into a plain string (no colors), 80 columns.
    fn pretty_string(&self) -> String;

    /// Format into a plain string (no colors) naming children through `naming`.
    fn pretty_string_with(&self, width: usize, naming: ChildNaming<'_>) -> String;
}

impl PrettyExpr for Expr {
    #[inline]
    fn pretty_doc(&self) -> RcDoc<'static, Style> {
        to_doc_with_depth(self, 0, &default_child_name)
    }

    #[inline]
    fn pretty_doc_with(&self, naming: ChildNaming<'_>) -> RcDoc<'static, Style> {
        to_doc_with_depth(self, 0, naming)
    }

    #[inline]
    fn pretty_render_to<W: WriteColor + Write>(&self, width: usize, out: &mut W) -> io::Result<()> {
        render_to(&self.pretty_doc(), width, out)
    }

    fn pretty_print(&self) -> io::Result<()> {
        let stdout = StandardStream::stdout(ColorChoice::Auto);
        let mut stdout = stdout.lock();
        render_to(&self.pretty_doc(), terminal_width(), &mut stdout)
    }

    #[inline]
    fn pretty_string(&self) -> String {
        self.pretty_string_with(80, &default_child_name)
    }

    fn pretty_string_with(&self, width: usize, naming: ChildNaming<'_>) -> String {
        let mut buf = String::new();
        let _ = self.pretty_doc_with(naming).render_fmt(width, &mut buf);
        buf
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut w = FmtWrite::new(f);
        let doc = self.pretty_doc();
        doc.render_raw(80, &mut w)
    }
}
