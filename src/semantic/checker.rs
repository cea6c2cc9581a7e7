//! Type checker with stage levels
//!
//! Every binding records the level it was introduced at. Quotation raises
//! the level by one and a splice `~k{e}` lowers it by `k`. A variable may
//! be used at its own level or any later one (cross-stage persistence) but
//! never at an earlier one.
//!
//! `~0{e}` at level n runs the code `e` evaluates to, in an empty
//! environment. Bindings above level n are binders of code still under
//! construction, so they are out of scope for everything `e` builds. The
//! checker marks such a splice as a run barrier and rejects any later use of
//! those bindings inside it as scope extrusion.

use smol_str::SmolStr;
use text_size::TextRange;

use super::error::TypeError;
use crate::base::ensure_sufficient_stack;
use crate::eval::Value;
use crate::syntax::{BinaryOp, Expr, ExprKind, Type};

/// Type check a closed expression at level 0
pub fn type_check(expr: &Expr) -> Result<Type, TypeError> {
    TypeChecker::new().check(expr)
}

#[derive(Debug, Clone)]
struct Binding {
    name: SmolStr,
    ty: Type,
    level: u32,
}

/// A `~0{..}` being checked: scopes below `depth` above `level` are hidden
#[derive(Debug, Clone, Copy)]
struct RunBarrier {
    depth: usize,
    level: u32,
}

/// Lexically scoped checker state
#[derive(Debug, Default)]
pub struct TypeChecker {
    scopes: Vec<Binding>,
    barriers: Vec<RunBarrier>,
}

impl TypeChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check `expr` at level 0
    pub fn check(&mut self, expr: &Expr) -> Result<Type, TypeError> {
        let ty = self.check_at(expr, 0)?;
        tracing::debug!(%ty, "type checked expression");
        Ok(ty)
    }

    fn lookup(&self, name: &str) -> Option<(usize, &Binding)> {
        self.scopes.iter().enumerate().rev().find(|(_, b)| b.name == name)
    }

    /// The innermost run barrier that hides the binding at `index`
    fn hiding_barrier(&self, index: usize, binding: &Binding) -> Option<RunBarrier> {
        self.barriers
            .iter()
            .rev()
            .find(|barrier| index < barrier.depth && binding.level > barrier.level)
            .copied()
    }

    /// Run `f` with `name` bound, restoring the scope afterwards even on error
    fn with_binding<T>(
        &mut self,
        name: &SmolStr,
        ty: Type,
        level: u32,
        f: impl FnOnce(&mut Self) -> Result<T, TypeError>,
    ) -> Result<T, TypeError> {
        self.scopes.push(Binding {
            name: name.clone(),
            ty,
            level,
        });
        let result = f(self);
        self.scopes.pop();
        result
    }

    fn expect(&mut self, expr: &Expr, expected: &Type, level: u32) -> Result<(), TypeError> {
        let actual = self.check_at(expr, level)?;
        expect_type(expected, actual, expr.range)
    }

    fn check_at(&mut self, expr: &Expr, level: u32) -> Result<Type, TypeError> {
        ensure_sufficient_stack(|| self.check_inner(expr, level))
    }

    fn check_inner(&mut self, expr: &Expr, level: u32) -> Result<Type, TypeError> {
        match &expr.kind {
            ExprKind::Int(_) => Ok(Type::Int),
            ExprKind::Bool(_) => Ok(Type::Bool),
            ExprKind::Var(name) => {
                let (index, binding) = self.lookup(name).ok_or_else(|| TypeError::UndefinedVariable {
                    name: name.clone(),
                    range: expr.range,
                })?;
                if binding.level > level {
                    return Err(TypeError::IllStagedVariable {
                        name: name.clone(),
                        bound: binding.level,
                        used: level,
                        range: expr.range,
                    });
                }
                if let Some(barrier) = self.hiding_barrier(index, binding) {
                    return Err(TypeError::ScopeExtrusion {
                        name: name.clone(),
                        bound: binding.level,
                        run: barrier.level,
                        range: expr.range,
                    });
                }
                Ok(binding.ty.clone())
            }
            ExprKind::Lifted(value) => match value {
                Value::Int(_) => Ok(Type::Int),
                Value::Bool(_) => Ok(Type::Bool),
                _ => Err(TypeError::InsufficientTypeAnnotation {
                    name: SmolStr::new_static("lifted value"),
                    range: expr.range,
                }),
            },
            ExprKind::Lambda {
                param,
                param_ty,
                ret_ty,
                body,
            } => {
                let param_ty = param_ty
                    .clone()
                    .ok_or_else(|| TypeError::InsufficientTypeAnnotation {
                        name: param.clone(),
                        range: expr.range,
                    })?;
                let body_ty = self.with_binding(param, param_ty.clone(), level, |this| {
                    this.check_at(body, level)
                })?;
                if let Some(ret_ty) = ret_ty {
                    expect_type(ret_ty, body_ty.clone(), body.range)?;
                }
                Ok(Type::func(param_ty, body_ty))
            }
            ExprKind::App { func, arg } => match self.check_at(func, level)? {
                Type::Func(param, result) => {
                    self.expect(arg, &param, level)?;
                    Ok(*result)
                }
                actual => Err(TypeError::ExpectedFunction {
                    actual,
                    range: func.range,
                }),
            },
            ExprKind::Binary { op, lhs, rhs } if op.is_equality() => {
                let lhs_ty = self.check_at(lhs, level)?;
                if !matches!(lhs_ty, Type::Int | Type::Bool) {
                    return Err(TypeError::TypeMismatch {
                        expected: Type::Int,
                        actual: lhs_ty,
                        range: lhs.range,
                    });
                }
                self.expect(rhs, &lhs_ty, level)?;
                Ok(Type::Bool)
            }
            ExprKind::Binary { op, lhs, rhs } => {
                self.expect(lhs, &Type::Int, level)?;
                self.expect(rhs, &Type::Int, level)?;
                Ok(if op.is_arithmetic() { Type::Int } else { Type::Bool })
            }
            ExprKind::ShortCircuit { lhs, rhs, .. } => {
                self.expect(lhs, &Type::Bool, level)?;
                self.expect(rhs, &Type::Bool, level)?;
                Ok(Type::Bool)
            }
            ExprKind::Not(operand) => {
                self.expect(operand, &Type::Bool, level)?;
                Ok(Type::Bool)
            }
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.expect(cond, &Type::Bool, level)?;
                let ty = self.check_at(then_branch, level)?;
                self.expect(else_branch, &ty, level)?;
                Ok(ty)
            }
            ExprKind::Let {
                name,
                ty,
                value,
                body,
            } => {
                let value_ty = self.check_at(value, level)?;
                if let Some(ty) = ty {
                    expect_type(ty, value_ty.clone(), value.range)?;
                }
                self.with_binding(name, value_ty, level, |this| this.check_at(body, level))
            }
            ExprKind::LetRec {
                name,
                ty,
                value,
                body,
            } => {
                let rec_ty = ty
                    .clone()
                    .or_else(|| signature(value))
                    .ok_or_else(|| TypeError::InsufficientTypeAnnotation {
                        name: name.clone(),
                        range: expr.range,
                    })?;
                self.with_binding(name, rec_ty.clone(), level, |this| {
                    this.expect(value, &rec_ty, level)?;
                    this.check_at(body, level)
                })
            }
            ExprKind::Quote(body) => Ok(Type::code(self.check_at(body, level + 1)?)),
            ExprKind::Splice { shift, body } => {
                if *shift > level {
                    return Err(TypeError::InvalidSplice {
                        shift: *shift,
                        level,
                        range: expr.range,
                    });
                }
                let body_ty = if *shift == 0 {
                    self.barriers.push(RunBarrier {
                        depth: self.scopes.len(),
                        level,
                    });
                    let result = self.check_at(body, level);
                    self.barriers.pop();
                    result?
                } else {
                    self.check_at(body, level - shift)?
                };
                match body_ty {
                    Type::Code(inner) => Ok(*inner),
                    actual => Err(TypeError::ExpectedCode {
                        actual,
                        range: body.range,
                    }),
                }
            }
        }
    }
}

fn expect_type(expected: &Type, actual: Type, range: TextRange) -> Result<(), TypeError> {
    if *expected == actual {
        Ok(())
    } else {
        Err(TypeError::TypeMismatch {
            expected: expected.clone(),
            actual,
            range,
        })
    }
}

/// Type of a lambda whose parameters and return are all annotated
fn signature(expr: &Expr) -> Option<Type> {
    let ExprKind::Lambda {
        param_ty: Some(param_ty),
        ret_ty,
        body,
        ..
    } = &expr.kind
    else {
        return None;
    };
    let result = match ret_ty {
        Some(ret_ty) => ret_ty.clone(),
        None => signature(body)?,
    };
    Some(Type::func(param_ty.clone(), result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::syntax::lower;

    fn check(input: &str) -> Result<Type, TypeError> {
        let expr = lower(&parse(input).unwrap()).unwrap();
        type_check(&expr)
    }

    #[test]
    fn test_arithmetic_and_comparison() {
        assert_eq!(check("1 + 2 * 3"), Ok(Type::Int));
        assert_eq!(check("1 < 2 && !false"), Ok(Type::Bool));
        assert_eq!(check("true == false"), Ok(Type::Bool));
    }

    #[test]
    fn test_equality_rejects_functions() {
        let err = check("((x: int) => { x }) == ((x: int) => { x })").unwrap_err();
        assert!(matches!(err, TypeError::TypeMismatch { expected: Type::Int, .. }));
    }

    #[test]
    fn test_lambda_needs_annotation() {
        let err = check("(x) => { x }").unwrap_err();
        assert!(matches!(err, TypeError::InsufficientTypeAnnotation { ref name, .. } if name == "x"));
    }

    #[test]
    fn test_return_annotation_must_match() {
        let err = check("(x: int): bool => { x }").unwrap_err();
        assert!(matches!(
            err,
            TypeError::TypeMismatch {
                expected: Type::Bool,
                actual: Type::Int,
                ..
            }
        ));
    }

    #[test]
    fn test_let_rec_from_lambda_signature() {
        let ty = check("let rec f = (n: int): int => { if n == 0 then 1 else n * f (n - 1) } in f");
        assert_eq!(ty, Ok(Type::func(Type::Int, Type::Int)));
    }

    #[test]
    fn test_let_rec_needs_return_type() {
        let err = check("let rec f = (n: int) => { f n } in f").unwrap_err();
        assert!(matches!(err, TypeError::InsufficientTypeAnnotation { ref name, .. } if name == "f"));
    }

    #[test]
    fn test_application_errors() {
        assert!(matches!(check("1 2"), Err(TypeError::ExpectedFunction { .. })));
        assert!(matches!(
            check("((x: int) => { x }) true"),
            Err(TypeError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_quote_and_splice() {
        assert_eq!(check("`{ 1 + 2 }"), Ok(Type::code(Type::Int)));
        assert_eq!(check("let x = `{ 1 } in `{ 2 * ~{ x } }"), Ok(Type::code(Type::Int)));
        assert_eq!(check("~0{ `{ true } }"), Ok(Type::Bool));
    }

    #[test]
    fn test_cross_stage_persistence_is_allowed() {
        assert_eq!(check("let x = 1 in `{ x + 1 }"), Ok(Type::code(Type::Int)));
    }

    #[test]
    fn test_ill_staged_variable() {
        let err = check("`{ let y = 1 in ~{ y } }").unwrap_err();
        assert!(matches!(err, TypeError::IllStagedVariable { bound: 1, used: 0, .. }));
    }

    #[test]
    fn test_run_hides_enclosing_quote_binders() {
        let err = check("`{ (x: int) => { ~{ ~0{ `{ `{ x } } } } } }").unwrap_err();
        assert!(matches!(
            err,
            TypeError::ScopeExtrusion { ref name, bound: 1, run: 0, .. } if name == "x"
        ));
    }

    #[test]
    fn test_run_keeps_its_own_binders_and_lower_levels() {
        assert_eq!(
            check("let y = 5 in `{ (x: int) => { x + ~{ ~0{ `{ `{ y } } } } } }"),
            Ok(Type::code(Type::func(Type::Int, Type::Int)))
        );
        assert_eq!(
            check("~0{ `{ (x: int) => { ~0{ `{ x + 1 } } } } }"),
            Ok(Type::func(Type::Int, Type::Int))
        );
    }

    #[test]
    fn test_invalid_splice() {
        assert!(matches!(check("~{ `{ 1 } }"), Err(TypeError::InvalidSplice { shift: 1, level: 0, .. })));
        assert!(matches!(check("`{ ~{ 1 } }"), Err(TypeError::ExpectedCode { .. })));
    }

    #[test]
    fn test_scopes_are_restored_after_errors() {
        let mut checker = TypeChecker::new();
        let bad = lower(&parse("let x = 1 in x true").unwrap()).unwrap();
        assert!(checker.check(&bad).is_err());
        let good = lower(&parse("x").unwrap()).unwrap();
        assert!(matches!(checker.check(&good), Err(TypeError::UndefinedVariable { .. })));
    }
}
