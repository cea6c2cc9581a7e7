//! Surface syntax printing for lowered expressions
//!
//! Output re-parses to the same tree, except for lifted closures, which
//! have no source form and print as `<fun>`.

use std::fmt;

use super::expr::{Expr, ExprKind};
use crate::base::ensure_sufficient_stack;
use crate::eval::Value;

const ATOM: u8 = 12;
const APPLICATION: u8 = 11;
const NOT: u8 = 10;
const OPEN: u8 = 0;

fn binary_precedence(op: &str) -> u8 {
    match op {
        "*" | "/" | "mod" => 9,
        "+" | "-" => 8,
        "&&" => 5,
        "||" => 4,
        _ => 7,
    }
}

impl Expr {
    fn precedence(&self) -> u8 {
        match &self.kind {
            ExprKind::Int(_)
            | ExprKind::Bool(_)
            | ExprKind::Var(_)
            | ExprKind::Quote(_)
            | ExprKind::Splice { .. }
            | ExprKind::Lifted(_) => ATOM,
            // Closed by `}`, but never parsed as an argument.
            ExprKind::Lambda { .. } | ExprKind::App { .. } => APPLICATION,
            ExprKind::Not(_) => NOT,
            ExprKind::Binary { op, .. } => binary_precedence(op.as_str()),
            ExprKind::ShortCircuit { op, .. } => binary_precedence(op.as_str()),
            ExprKind::If { .. } | ExprKind::Let { .. } | ExprKind::LetRec { .. } => OPEN,
        }
    }

    fn fmt_prec(&self, min: u8, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.precedence() < min {
            f.write_str("(")?;
            ensure_sufficient_stack(|| self.fmt_bare(f))?;
            f.write_str(")")
        } else {
            ensure_sufficient_stack(|| self.fmt_bare(f))
        }
    }

    fn fmt_bare(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Int(n) => write!(f, "{}", n),
            ExprKind::Bool(b) => write!(f, "{}", b),
            ExprKind::Var(name) => f.write_str(name),
            ExprKind::Lifted(value) => fmt_lifted(value, f),
            ExprKind::Lambda {
                param,
                param_ty,
                ret_ty,
                body,
            } => {
                match param_ty {
                    Some(ty) => write!(f, "({}: {})", param, ty)?,
                    None => write!(f, "({})", param)?,
                }
                if let Some(ty) = ret_ty {
                    write!(f, ": {}", ty)?;
                }
                write!(f, " => {{ {} }}", body)
            }
            ExprKind::App { func, arg } => {
                func.fmt_prec(APPLICATION, f)?;
                f.write_str(" ")?;
                arg.fmt_prec(ATOM, f)
            }
            ExprKind::Binary { op, lhs, rhs } => fmt_infix(op.as_str(), lhs, rhs, f),
            ExprKind::ShortCircuit { op, lhs, rhs } => fmt_infix(op.as_str(), lhs, rhs, f),
            ExprKind::Not(operand) => {
                f.write_str("!")?;
                operand.fmt_prec(NOT, f)
            }
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => write!(f, "if {} then {} else {}", cond, then_branch, else_branch),
            ExprKind::Let {
                name,
                ty,
                value,
                body,
            } => fmt_let("let", name, ty.as_ref(), value, body, f),
            ExprKind::LetRec {
                name,
                ty,
                value,
                body,
            } => fmt_let("let rec", name, ty.as_ref(), value, body, f),
            ExprKind::Quote(body) => write!(f, "`{{ {} }}", body),
            ExprKind::Splice { shift: 1, body } => write!(f, "~{{ {} }}", body),
            ExprKind::Splice { shift, body } => write!(f, "~{}{{ {} }}", shift, body),
        }
    }
}

fn fmt_infix(op: &str, lhs: &Expr, rhs: &Expr, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let prec = binary_precedence(op);
    lhs.fmt_prec(prec, f)?;
    write!(f, " {} ", op)?;
    rhs.fmt_prec(prec + 1, f)
}

fn fmt_let(
    keyword: &str,
    name: &str,
    ty: Option<&super::Type>,
    value: &Expr,
    body: &Expr,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    write!(f, "{} {}", keyword, name)?;
    if let Some(ty) = ty {
        write!(f, ": {}", ty)?;
    }
    write!(f, " = {} in {}", value, body)
}

/// Negative integers have no literal form
fn fmt_lifted(value: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value {
        Value::Int(i64::MIN) => write!(f, "(0 - {} - 1)", i64::MAX),
        Value::Int(n) if *n < 0 => write!(f, "(0 - {})", n.unsigned_abs()),
        other => write!(f, "{}", other),
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_prec(OPEN, f)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse;
    use crate::syntax::lower;

    fn reprint(input: &str) -> String {
        let parse = parse(input).unwrap();
        lower(&parse).unwrap().to_string()
    }

    #[test]
    fn test_precedence_is_preserved() {
        assert_eq!(reprint("(1 + 2) * 3"), "(1 + 2) * 3");
        assert_eq!(reprint("1 + 2 * 3"), "1 + 2 * 3");
        assert_eq!(reprint("1 - (2 - 3)"), "1 - (2 - 3)");
        assert_eq!(reprint("f (g x) y"), "f (g x) y");
    }

    #[test]
    fn test_lambdas_print_curried() {
        assert_eq!(
            reprint("(x: int, y: int): int => { x + y }"),
            "(x: int) => { (y: int): int => { x + y } }"
        );
    }

    #[test]
    fn test_staging_forms() {
        assert_eq!(reprint("`{ ~{x} + ~0{ y } }"), "`{ ~{ x } + ~0{ y } }");
    }

    #[test]
    fn test_output_reparses() {
        let input = "let rec f: int -> int = (n: int) => { if n <= 1 then 1 else n * f (n - 1) } in !(f 3 == 6)";
        let once = reprint(input);
        assert_eq!(reprint(&once), once);
    }
}
