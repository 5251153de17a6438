//! Safe expression evaluation
//!
//! Compiles a user-supplied expression over the single variable `x` into a
//! reusable [`Function`]. Only a fixed vocabulary is understood:
//!
//! - the variable `x` and numeric literals
//! - the constants `pi` and `e`
//! - the functions `sin`, `cos`, `tan`, `exp`, `log`, `sqrt`
//! - the operators `+ - * / **`, unary minus and parentheses
//!
//! Anything else is rejected while parsing, before any evaluation happens.

pub mod parser;
pub mod token;

use crate::constants::expr::{MAX_LENGTH, SMOKE_POINT};
use crate::error::{Error, Result};
use parser::{BinOp, Expr, Func};

/// A compiled single-variable real function
///
/// Read-only after compilation; one instance can be evaluated at any
/// number of points and shared across threads.
#[derive(Debug, Clone)]
pub struct Function {
    source: String,
    root: Expr,
}

/// Compile an expression string into a callable function
///
/// The function is evaluated once at `x = 0.0` as a sanity check; a failure
/// there is reported as an invalid expression like any parse error.
pub fn compile(source: &str) -> Result<Function> {
    if source.chars().count() > MAX_LENGTH {
        return Err(Error::InvalidExpression(format!(
            "expression is longer than {} characters",
            MAX_LENGTH
        )));
    }

    let tokens = token::tokenize(source)?;
    let root = parser::parse(tokens)?;
    let function = Function {
        source: source.to_string(),
        root,
    };

    function.eval(SMOKE_POINT).map_err(|e| match e {
        Error::Evaluation { x, message } => {
            Error::InvalidExpression(format!("{} (at x = {})", message, x))
        }
        other => other,
    })?;

    Ok(function)
}

impl Function {
    /// The expression this function was compiled from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluate the function at `x`
    ///
    /// Domain violations (division by zero, `log` of a non-positive value,
    /// `sqrt` of a negative value) and any non-finite intermediate result
    /// are reported as [`Error::Evaluation`] carrying `x`.
    pub fn eval(&self, x: f64) -> Result<f64> {
        eval_node(&self.root, x).map_err(|message| Error::Evaluation { x, message })
    }
}

fn eval_node(expr: &Expr, x: f64) -> std::result::Result<f64, String> {
    let value = match expr {
        Expr::Number(n) => *n,
        Expr::Var => x,
        Expr::Neg(inner) => -eval_node(inner, x)?,
        Expr::Binary { op, left, right } => {
            let l = eval_node(left, x)?;
            let r = eval_node(right, x)?;
            match op {
                BinOp::Add => l + r,
                BinOp::Sub => l - r,
                BinOp::Mul => l * r,
                BinOp::Div => {
                    if r == 0.0 {
                        return Err("division by zero".to_string());
                    }
                    l / r
                }
                BinOp::Pow => {
                    if l == 0.0 && r < 0.0 {
                        return Err("zero raised to a negative power".to_string());
                    }
                    if l < 0.0 && r.fract() != 0.0 {
                        return Err("negative number raised to a fractional power".to_string());
                    }
                    l.powf(r)
                }
            }
        }
        Expr::Call { func, arg } => {
            let a = eval_node(arg, x)?;
            match func {
                Func::Sin => a.sin(),
                Func::Cos => a.cos(),
                Func::Tan => a.tan(),
                Func::Exp => a.exp(),
                Func::Log => {
                    if a <= 0.0 {
                        return Err(format!("log of non-positive value {}", a));
                    }
                    a.ln()
                }
                Func::Sqrt => {
                    if a < 0.0 {
                        return Err(format!("sqrt of negative value {}", a));
                    }
                    a.sqrt()
                }
            }
        }
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err("result is not a finite number".to_string())
    }
}
