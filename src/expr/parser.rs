//! Recursive-descent parser producing the restricted expression tree
//!
//! Grammar, with exponent-first precedence (`-x**2` is `-(x**2)`, `**` is
//! right-associative and its exponent may carry a unary minus):
//!
//! ```text
//! expr  = term (('+' | '-') term)*
//! term  = unary (('*' | '/') unary)*
//! unary = '-' unary | power
//! power = atom ('**' unary)?
//! atom  = NUMBER | 'x' | CONST | FUNC '(' expr ')' | '(' expr ')'
//! ```
//!
//! Minus is the only prefix operator: a leading `+` (`"+x"`) is a syntax
//! error rather than a no-op.
//!
//! Names are resolved while parsing, so the tree can only ever hold the
//! bound variable, the allow-listed constants and the allow-listed functions.

use crate::constants::expr::MAX_DEPTH;
use crate::error::{Error, Result};
use crate::expr::token::Token;
use std::fmt;

/// The bound variable
pub const VARIABLE: &str = "x";

/// Allow-listed unary functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Exp,
    Log,
    Sqrt,
}

impl Func {
    fn lookup(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            "exp" => Some(Self::Exp),
            "log" => Some(Self::Log),
            "sqrt" => Some(Self::Sqrt),
            _ => None,
        }
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sin => write!(f, "sin"),
            Self::Cos => write!(f, "cos"),
            Self::Tan => write!(f, "tan"),
            Self::Exp => write!(f, "exp"),
            Self::Log => write!(f, "log"),
            Self::Sqrt => write!(f, "sqrt"),
        }
    }
}

/// Look up an allow-listed constant
fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(std::f64::consts::PI),
        "e" => Some(std::f64::consts::E),
        _ => None,
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Expression tree node
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal or resolved constant
    Number(f64),
    /// The bound variable `x`
    Var,
    Neg(Box<Expr>),
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        func: Func,
        arg: Box<Expr>,
    },
}

/// Parse a token stream into an expression tree
pub fn parse(tokens: Vec<Token>) -> Result<Expr> {
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.expr()?;
    match parser.peek() {
        Token::Eof => Ok(expr),
        tok => Err(Error::InvalidExpression(format!(
            "unexpected {} after end of expression",
            describe(tok)
        ))),
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn expr(&mut self) -> Result<Expr> {
        let mut left = self.term()?;
        loop {
            let op = match self.peek() {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Sub,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.term()?;
            left = binary(op, left, right);
        }
    }

    fn term(&mut self) -> Result<Expr> {
        let mut left = self.unary()?;
        loop {
            let op = match self.peek() {
                Token::Star => BinOp::Mul,
                Token::Slash => BinOp::Div,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.unary()?;
            left = binary(op, left, right);
        }
    }

    fn unary(&mut self) -> Result<Expr> {
        if self.peek() == &Token::Minus {
            self.advance();
            self.enter()?;
            let operand = self.unary()?;
            self.leave();
            return Ok(Expr::Neg(Box::new(operand)));
        }
        self.power()
    }

    fn power(&mut self) -> Result<Expr> {
        let base = self.atom()?;
        if self.peek() != &Token::DoubleStar {
            return Ok(base);
        }
        self.advance();
        self.enter()?;
        let exponent = self.unary()?;
        self.leave();
        Ok(binary(BinOp::Pow, base, exponent))
    }

    fn atom(&mut self) -> Result<Expr> {
        match self.peek().clone() {
            Token::Number(n) => {
                self.advance();
                Ok(Expr::Number(n))
            }
            Token::Ident(name) => {
                self.advance();
                self.name(&name)
            }
            Token::LParen => {
                self.advance();
                self.enter()?;
                let inner = self.expr()?;
                self.leave();
                self.expect_close()?;
                Ok(inner)
            }
            tok => Err(Error::InvalidExpression(format!(
                "expected a value but found {}",
                describe(&tok)
            ))),
        }
    }

    /// Resolve an identifier against the allow-list
    fn name(&mut self, name: &str) -> Result<Expr> {
        let is_call = self.peek() == &Token::LParen;

        if let Some(func) = Func::lookup(name) {
            if !is_call {
                return Err(Error::InvalidExpression(format!(
                    "function '{}' must be called with one argument",
                    func
                )));
            }
            self.advance();
            self.enter()?;
            let arg = self.expr()?;
            self.leave();
            self.expect_close()?;
            return Ok(Expr::Call {
                func,
                arg: Box::new(arg),
            });
        }

        let value = if name == VARIABLE {
            Expr::Var
        } else if let Some(value) = constant(name) {
            Expr::Number(value)
        } else {
            return Err(Error::InvalidExpression(format!(
                "name '{}' is not allowed",
                name
            )));
        };

        if is_call {
            return Err(Error::InvalidExpression(format!("'{}' is not callable", name)));
        }
        Ok(value)
    }

    fn expect_close(&mut self) -> Result<()> {
        match self.peek() {
            Token::RParen => {
                self.advance();
                Ok(())
            }
            tok => Err(Error::InvalidExpression(format!(
                "expected ')' but found {}",
                describe(tok)
            ))),
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(Error::InvalidExpression(format!(
                "expression nested deeper than {} levels",
                MAX_DEPTH
            )));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }
}

fn binary(op: BinOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Number(n) => format!("number {}", n),
        Token::Ident(name) => format!("name '{}'", name),
        Token::Plus => "'+'".to_string(),
        Token::Minus => "'-'".to_string(),
        Token::Star => "'*'".to_string(),
        Token::DoubleStar => "'**'".to_string(),
        Token::Slash => "'/'".to_string(),
        Token::LParen => "'('".to_string(),
        Token::RParen => "')'".to_string(),
        Token::Eof => "end of expression".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::token::tokenize;

    fn parse_str(input: &str) -> Result<Expr> {
        parse(tokenize(input)?)
    }

    #[test]
    fn test_power_binds_tighter_than_negation() {
        let expr = parse_str("-x**2").unwrap();
        assert_eq!(
            expr,
            Expr::Neg(Box::new(binary(BinOp::Pow, Expr::Var, Expr::Number(2.0))))
        );
    }

    #[test]
    fn test_power_is_right_associative() {
        let expr = parse_str("2**3**2").unwrap();
        assert_eq!(
            expr,
            binary(
                BinOp::Pow,
                Expr::Number(2.0),
                binary(BinOp::Pow, Expr::Number(3.0), Expr::Number(2.0))
            )
        );
    }

    #[test]
    fn test_constants_resolve_to_numbers() {
        let expr = parse_str("pi").unwrap();
        assert_eq!(expr, Expr::Number(std::f64::consts::PI));
    }

    #[test]
    fn test_call() {
        let expr = parse_str("sqrt(x)").unwrap();
        assert_eq!(
            expr,
            Expr::Call {
                func: Func::Sqrt,
                arg: Box::new(Expr::Var)
            }
        );
    }

    #[test]
    fn test_rejects_unknown_names() {
        assert!(parse_str("import os").is_err());
        assert!(parse_str("y + 1").is_err());
        assert!(parse_str("abs(x)").is_err());
        assert!(parse_str("eval(x)").is_err());
    }

    #[test]
    fn test_rejects_misused_names() {
        assert!(parse_str("sin").is_err());
        assert!(parse_str("sin + 1").is_err());
        assert!(parse_str("x(2)").is_err());
        assert!(parse_str("pi(2)").is_err());
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(parse_str("x +").is_err());
        assert!(parse_str("(x").is_err());
        assert!(parse_str("x)").is_err());
        assert!(parse_str("").is_err());
        assert!(parse_str("x x").is_err());
        assert!(parse_str("2e").is_err());
    }

    #[test]
    fn test_rejects_unary_plus() {
        assert!(matches!(parse_str("+x"), Err(Error::InvalidExpression(_))));
        assert!(matches!(parse_str("2 * +x"), Err(Error::InvalidExpression(_))));
        assert!(parse_str("-x").is_ok());
    }

    #[test]
    fn test_depth_limit() {
        let deep = format!("{}x{}", "(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
        assert!(parse_str(&deep).is_err());

        let shallow = format!("{}x{}", "(".repeat(10), ")".repeat(10));
        assert!(parse_str(&shallow).is_ok());
    }
}
