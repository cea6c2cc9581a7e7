//! Lowering from the CST to [`Expr`]

use smol_str::SmolStr;

use super::expr::{BinaryOp, Expr, ExprKind, ShortCircuit};
use super::ty::Type;
use crate::base::ensure_sufficient_stack;
use crate::parser::{
    AstNode, ErrorCode, Expression, LiteralKind, Param, Parse, SourceFile, SyntaxError,
    SyntaxKind, SyntaxNode, TypeExpr,
};

/// Lower a parse into an expression tree
///
/// Fails with the first parse error if the parse has any.
pub fn lower(parse: &Parse) -> Result<Expr, SyntaxError> {
    if let Some(err) = parse.errors.first() {
        return Err(err.clone());
    }
    let root = parse.syntax();
    let file = SourceFile::cast(root.clone()).ok_or_else(|| missing("source file", &root))?;
    let expr = file.expr().ok_or_else(|| missing("expression", &root))?;
    lower_expr(&expr)
}

fn missing(what: &str, node: &SyntaxNode) -> SyntaxError {
    SyntaxError::new(format!("missing {}", what), node.text_range(), ErrorCode::E0999)
}

fn lower_child(child: Option<Expression>, what: &str, parent: &SyntaxNode) -> Result<Box<Expr>, SyntaxError> {
    let child = child.ok_or_else(|| missing(what, parent))?;
    Ok(Box::new(lower_expr(&child)?))
}

fn lower_expr(expr: &Expression) -> Result<Expr, SyntaxError> {
    ensure_sufficient_stack(|| lower_expr_inner(expr))
}

fn lower_expr_inner(expr: &Expression) -> Result<Expr, SyntaxError> {
    let node = expr.syntax();
    let range = node.text_range();

    let kind = match expr {
        Expression::Paren(paren) => {
            let inner = paren.expr().ok_or_else(|| missing("expression", node))?;
            return lower_expr(&inner);
        }
        Expression::NameRef(name_ref) => {
            let name = name_ref.ident().ok_or_else(|| missing("name", node))?;
            ExprKind::Var(SmolStr::new(name.text()))
        }
        Expression::Literal(literal) => match literal.kind() {
            Some(LiteralKind::Bool(b)) => ExprKind::Bool(b),
            Some(LiteralKind::Int(token)) => {
                let value = token.text().parse::<i64>().map_err(|_| {
                    SyntaxError::new(
                        format!("integer literal `{}` does not fit in 64 bits", token.text()),
                        token.text_range(),
                        ErrorCode::E0104,
                    )
                })?;
                ExprKind::Int(value)
            }
            None => return Err(missing("literal", node)),
        },
        Expression::Lambda(lambda) => {
            let params: Vec<Param> = lambda.params().collect();
            if params.is_empty() {
                return Err(missing("parameter", node));
            }
            let mut body = lower_child(lambda.body(), "lambda body", node)?;
            let mut ret_ty = lambda.ret_type().map(|ty| lower_type(&ty)).transpose()?;
            // Curry from the innermost parameter outward; only the innermost
            // lambda carries the return annotation.
            for param in params.iter().skip(1).rev() {
                let (name, param_ty) = lower_param(param)?;
                body = Box::new(Expr::new(
                    ExprKind::Lambda {
                        param: name,
                        param_ty,
                        ret_ty: ret_ty.take(),
                        body,
                    },
                    range,
                ));
            }
            let (name, param_ty) = lower_param(&params[0])?;
            ExprKind::Lambda {
                param: name,
                param_ty,
                ret_ty,
                body,
            }
        }
        Expression::App(app) => ExprKind::App {
            func: lower_child(app.func(), "function", node)?,
            arg: lower_child(app.arg(), "argument", node)?,
        },
        Expression::Binary(binary) => {
            let op = binary.op().ok_or_else(|| missing("operator", node))?;
            let lhs = lower_child(binary.lhs(), "left operand", node)?;
            let rhs = lower_child(binary.rhs(), "right operand", node)?;
            match op.kind() {
                SyntaxKind::AMP_AMP => ExprKind::ShortCircuit {
                    op: ShortCircuit::And,
                    lhs,
                    rhs,
                },
                SyntaxKind::PIPE_PIPE => ExprKind::ShortCircuit {
                    op: ShortCircuit::Or,
                    lhs,
                    rhs,
                },
                kind => ExprKind::Binary {
                    op: binary_op(kind).ok_or_else(|| missing("operator", node))?,
                    lhs,
                    rhs,
                },
            }
        }
        Expression::Not(not) => ExprKind::Not(lower_child(not.operand(), "operand", node)?),
        Expression::If(if_expr) => ExprKind::If {
            cond: lower_child(if_expr.condition(), "condition", node)?,
            then_branch: lower_child(if_expr.then_branch(), "then branch", node)?,
            else_branch: lower_child(if_expr.else_branch(), "else branch", node)?,
        },
        Expression::Let(let_expr) => {
            let param = let_expr.param().ok_or_else(|| missing("binding name", node))?;
            let (name, ty) = lower_param(&param)?;
            let value = lower_child(let_expr.value(), "bound expression", node)?;
            let body = lower_child(let_expr.body(), "let body", node)?;
            if let_expr.is_rec() {
                if !matches!(value.kind, ExprKind::Lambda { .. }) {
                    return Err(SyntaxError::builder(ErrorCode::E0308)
                        .message(format!("`let rec {}` must bind a function", name))
                        .range(value.range)
                        .hint("write `let rec f = (x: int): int => { ... } in ...`")
                        .build());
                }
                ExprKind::LetRec {
                    name,
                    ty,
                    value,
                    body,
                }
            } else {
                ExprKind::Let {
                    name,
                    ty,
                    value,
                    body,
                }
            }
        }
        Expression::Quote(quote) => ExprKind::Quote(lower_child(quote.body(), "quoted expression", node)?),
        Expression::Splice(splice) => {
            let shift = match splice.shift_token() {
                Some(token) => token.text().parse::<u32>().map_err(|_| {
                    SyntaxError::new(
                        format!("splice level `{}` is too large", token.text()),
                        token.text_range(),
                        ErrorCode::E0104,
                    )
                })?,
                None => 1,
            };
            ExprKind::Splice {
                shift,
                body: lower_child(splice.body(), "spliced expression", node)?,
            }
        }
    };

    Ok(Expr::new(kind, range))
}

fn lower_param(param: &Param) -> Result<(SmolStr, Option<Type>), SyntaxError> {
    let name = param
        .ident()
        .ok_or_else(|| missing("parameter name", param.syntax()))?;
    let ty = param.ty().map(|ty| lower_type(&ty)).transpose()?;
    Ok((SmolStr::new(name.text()), ty))
}

fn lower_type(ty: &TypeExpr) -> Result<Type, SyntaxError> {
    let node = ty.syntax();
    let inner = |t: Option<TypeExpr>| -> Result<Type, SyntaxError> {
        let t = t.ok_or_else(|| missing("type", node))?;
        lower_type(&t)
    };
    Ok(match ty {
        TypeExpr::Int(_) => Type::Int,
        TypeExpr::Bool(_) => Type::Bool,
        TypeExpr::Func(func) => Type::func(inner(func.param())?, inner(func.result())?),
        TypeExpr::Code(code) => Type::code(inner(code.inner())?),
        TypeExpr::Paren(paren) => inner(paren.inner())?,
    })
}

fn binary_op(kind: SyntaxKind) -> Option<BinaryOp> {
    Some(match kind {
        SyntaxKind::PLUS => BinaryOp::Add,
        SyntaxKind::MINUS => BinaryOp::Sub,
        SyntaxKind::STAR => BinaryOp::Mul,
        SyntaxKind::SLASH => BinaryOp::Div,
        SyntaxKind::MOD_KW => BinaryOp::Mod,
        SyntaxKind::EQ_EQ => BinaryOp::Eq,
        SyntaxKind::BANG_EQ => BinaryOp::Ne,
        SyntaxKind::LT => BinaryOp::Lt,
        SyntaxKind::LT_EQ => BinaryOp::Le,
        SyntaxKind::GT => BinaryOp::Gt,
        SyntaxKind::GT_EQ => BinaryOp::Ge,
        _ => return None,
    })
}
