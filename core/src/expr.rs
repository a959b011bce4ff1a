/*
 * Copyright (c) 2026 Mohamad Al-Zawahreh (dba Sovereign Systems).
 *
 * This file is part of the Playground pattern interpreter.
 *
 * LICENSE: DUAL-LICENSED (AGPLv3 or COMMERCIAL).
 *
 * 1. OPEN SOURCE: You may use this file under the terms of the GNU Affero
 * General Public License v3.0. If you link to this code, your ENTIRE
 * application must be open-sourced under AGPLv3.
 *
 * 2. COMMERCIAL: For proprietary use, you must obtain a Commercial License
 * from Sovereign Systems.
 *
 * NO IMPLIED LICENSE to rights of Mohamad Al-Zawahreh or Sovereign Systems.
 */

//! Arithmetic expressions for the math scenario.
//!
//! Supports `+ - * / % ^`, unary minus, parentheses, the constants `pi` and
//! `e`, the free variable `x`, and the functions `sin cos tan sqrt log ln abs
//! exp`. `^` binds tighter than unary minus and is right-associative, so
//! `-2^2` is `-4` and `2^3^2` is `512`.

use thiserror::Error;

/// Deepest nesting of parentheses, calls, signs and exponents.
pub const MAX_DEPTH: usize = 256;

/// Longest token stream. Operator chains build trees as deep as they are long.
pub const MAX_TOKENS: usize = 1_024;

// ─── Error Types ─────────────────────────────────────────────────────────────

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("unexpected character '{ch}' at {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unexpected {found} at {pos}")]
    UnexpectedToken { found: String, pos: usize },

    #[error("unknown function: {0}")]
    UnknownFunction(String),

    #[error("unknown name: {0}")]
    UnknownName(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite number")]
    NotFinite,

    #[error("expression nested deeper than {0} levels")]
    TooDeep(usize),

    #[error("expression longer than {0} tokens")]
    TooLong(usize),
}

// ─── Token Types ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    LParen,
    RParen,
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
struct Token {
    kind: TokenKind,
    pos: usize,
}

// ─── Lexer ───────────────────────────────────────────────────────────────────

struct Lexer {
    source: Vec<char>,
    pos: usize,
}

impl Lexer {
    fn new(source: &str) -> Self {
        Lexer {
            source: source.chars().collect(),
            pos: 0,
        }
    }

    fn tokenize(&mut self) -> Result<Vec<Token>, EvalError> {
        let mut tokens = Vec::new();
        loop {
            while self.peek().is_some_and(|c| c.is_whitespace()) {
                self.pos += 1;
            }
            let start = self.pos;
            let Some(ch) = self.peek() else {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    pos: start,
                });
                return Ok(tokens);
            };
            let kind = match ch {
                '+' => self.single(TokenKind::Plus),
                '-' => self.single(TokenKind::Minus),
                '*' => self.single(TokenKind::Star),
                '/' => self.single(TokenKind::Slash),
                '%' => self.single(TokenKind::Percent),
                '^' => self.single(TokenKind::Caret),
                '(' => self.single(TokenKind::LParen),
                ')' => self.single(TokenKind::RParen),
                c if c.is_ascii_digit() || c == '.' => self.number()?,
                c if c.is_ascii_alphabetic() || c == '_' => self.ident(),
                other => return Err(EvalError::UnexpectedChar { ch: other, pos: start }),
            };
            tokens.push(Token { kind, pos: start });
            if tokens.len() > MAX_TOKENS {
                return Err(EvalError::TooLong(MAX_TOKENS));
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.pos += 1;
        kind
    }

    fn number(&mut self) -> Result<TokenKind, EvalError> {
        let start = self.pos;
        let mut seen_dot = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.pos += 1;
            } else if c == '.' && !seen_dot {
                seen_dot = true;
                self.pos += 1;
            } else {
                break;
            }
        }
        let text: String = self.source[start..self.pos].iter().collect();
        text.parse::<f64>()
            .map(TokenKind::Number)
            .map_err(|_| EvalError::UnexpectedChar { ch: '.', pos: start })
    }

    fn ident(&mut self) -> TokenKind {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.pos += 1;
        }
        TokenKind::Ident(self.source[start..self.pos].iter().collect())
    }
}

// ─── Expression Tree ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Sqrt,
    Ln,
    Abs,
    Exp,
}

impl Func {
    fn resolve(name: &str) -> Option<Func> {
        match name {
            "sin" => Some(Func::Sin),
            "cos" => Some(Func::Cos),
            "tan" => Some(Func::Tan),
            "sqrt" => Some(Func::Sqrt),
            "log" | "ln" => Some(Func::Ln),
            "abs" => Some(Func::Abs),
            "exp" => Some(Func::Exp),
            _ => None,
        }
    }

    fn apply(self, v: f64) -> f64 {
        match self {
            Func::Sin => v.sin(),
            Func::Cos => v.cos(),
            Func::Tan => v.tan(),
            Func::Sqrt => v.sqrt(),
            Func::Ln => v.ln(),
            Func::Abs => v.abs(),
            Func::Exp => v.exp(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Var,
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        func: Func,
        arg: Box<Expr>,
    },
}

impl Expr {
    pub fn parse(source: &str) -> Result<Expr, EvalError> {
        let tokens = Lexer::new(source).tokenize()?;
        let mut parser = Parser {
            tokens,
            pos: 0,
            depth: 0,
        };
        let expr = parser.parse_sum()?;
        match &parser.peek().kind {
            TokenKind::Eof => Ok(expr),
            _ => Err(parser.unexpected()),
        }
    }

    /// Evaluates with `x` bound to `x` when given. A tree that mentions `x`
    /// fails with [`EvalError::UnknownName`] when no binding is supplied.
    pub fn eval(&self, x: Option<f64>) -> Result<f64, EvalError> {
        let value = self.eval_raw(x)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::NotFinite)
        }
    }

    fn eval_raw(&self, x: Option<f64>) -> Result<f64, EvalError> {
        match self {
            Expr::Number(n) => Ok(*n),
            Expr::Var => x.ok_or_else(|| EvalError::UnknownName("x".into())),
            Expr::Neg(inner) => Ok(-inner.eval_raw(x)?),
            Expr::Call { func, arg } => Ok(func.apply(arg.eval_raw(x)?)),
            Expr::Binary { op, lhs, rhs } => {
                let l = lhs.eval_raw(x)?;
                let r = rhs.eval_raw(x)?;
                match op {
                    BinaryOp::Add => Ok(l + r),
                    BinaryOp::Sub => Ok(l - r),
                    BinaryOp::Mul => Ok(l * r),
                    BinaryOp::Div | BinaryOp::Rem if r == 0.0 => Err(EvalError::DivisionByZero),
                    BinaryOp::Div => Ok(l / r),
                    BinaryOp::Rem => Ok(l % r),
                    BinaryOp::Pow => Ok(l.powf(r)),
                }
            }
        }
    }
}

/// Parses and evaluates a closed expression.
pub fn evaluate(source: &str) -> Result<f64, EvalError> {
    Expr::parse(source)?.eval(None)
}

// ─── Parser ──────────────────────────────────────────────────────────────────

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        // the lexer always terminates the stream with Eof
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn unexpected(&self) -> EvalError {
        let tok = self.peek();
        match &tok.kind {
            TokenKind::Eof => EvalError::UnexpectedEnd,
            kind => EvalError::UnexpectedToken {
                found: describe(kind),
                pos: tok.pos,
            },
        }
    }

    // sum: product (("+" | "-") product)*
    fn parse_sum(&mut self) -> Result<Expr, EvalError> {
        let mut left = self.parse_product()?;
        loop {
            let op = match &self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_product()?;
            left = Expr::Binary {
                op,
                lhs: Box::new(left),
                rhs: Box::new(right),
            };
        }
        Ok(left)
    }

    // product: unary (("*" | "/" | "%") unary)*
    fn parse_product(&mut self) -> Result<Expr, EvalError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match &self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Rem,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = Expr::Binary {
                op,
                lhs: Box::new(left),
                rhs: Box::new(right),
            };
        }
        Ok(left)
    }

    // Every nested construct re-enters through `parse_unary`, so the depth
    // is counted here.
    fn parse_unary(&mut self) -> Result<Expr, EvalError> {
        if self.depth >= MAX_DEPTH {
            return Err(EvalError::TooDeep(MAX_DEPTH));
        }
        self.depth += 1;
        let result = self.parse_signed();
        self.depth -= 1;
        result
    }

    // unary: ("-" | "+") unary | power
    fn parse_signed(&mut self) -> Result<Expr, EvalError> {
        match &self.peek().kind {
            TokenKind::Minus => {
                self.advance();
                Ok(Expr::Neg(Box::new(self.parse_unary()?)))
            }
            TokenKind::Plus => {
                self.advance();
                self.parse_unary()
            }
            _ => self.parse_power(),
        }
    }

    // power: primary ("^" unary)?
    fn parse_power(&mut self) -> Result<Expr, EvalError> {
        let base = self.parse_primary()?;
        if matches!(self.peek().kind, TokenKind::Caret) {
            self.advance();
            let exponent = self.parse_unary()?;
            return Ok(Expr::Binary {
                op: BinaryOp::Pow,
                lhs: Box::new(base),
                rhs: Box::new(exponent),
            });
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<Expr, EvalError> {
        let tok = self.advance();
        match tok.kind {
            TokenKind::Number(n) => Ok(Expr::Number(n)),
            TokenKind::LParen => {
                let inner = self.parse_sum()?;
                self.expect_rparen()?;
                Ok(inner)
            }
            TokenKind::Ident(name) => {
                if matches!(self.peek().kind, TokenKind::LParen) {
                    let func =
                        Func::resolve(&name).ok_or_else(|| EvalError::UnknownFunction(name))?;
                    self.advance();
                    let arg = self.parse_sum()?;
                    self.expect_rparen()?;
                    return Ok(Expr::Call {
                        func,
                        arg: Box::new(arg),
                    });
                }
                match name.as_str() {
                    "x" => Ok(Expr::Var),
                    "pi" => Ok(Expr::Number(std::f64::consts::PI)),
                    "e" => Ok(Expr::Number(std::f64::consts::E)),
                    _ => Err(EvalError::UnknownName(name)),
                }
            }
            TokenKind::Eof => Err(EvalError::UnexpectedEnd),
            kind => Err(EvalError::UnexpectedToken {
                found: describe(&kind),
                pos: tok.pos,
            }),
        }
    }

    fn expect_rparen(&mut self) -> Result<(), EvalError> {
        if matches!(self.peek().kind, TokenKind::RParen) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Number(n) => format!("number {}", n),
        TokenKind::Ident(name) => format!("name {}", name),
        TokenKind::Plus => "'+'".into(),
        TokenKind::Minus => "'-'".into(),
        TokenKind::Star => "'*'".into(),
        TokenKind::Slash => "'/'".into(),
        TokenKind::Percent => "'%'".into(),
        TokenKind::Caret => "'^'".into(),
        TokenKind::LParen => "'('".into(),
        TokenKind::RParen => "')'".into(),
        TokenKind::Eof => "end of expression".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence() {
        assert_eq!(evaluate("2^2 + 1"), Ok(5.0));
        assert_eq!(evaluate("1 + 2 * 3"), Ok(7.0));
        assert_eq!(evaluate("(1 + 2) * 3"), Ok(9.0));
        assert_eq!(evaluate("-2^2"), Ok(-4.0));
        assert_eq!(evaluate("2^3^2"), Ok(512.0));
        assert_eq!(evaluate("2^-1"), Ok(0.5));
        assert_eq!(evaluate("7 % 4"), Ok(3.0));
    }

    #[test]
    fn test_functions_and_constants() {
        assert_eq!(evaluate("sqrt(16)"), Ok(4.0));
        assert_eq!(evaluate("abs(-3.5)"), Ok(3.5));
        assert_eq!(evaluate("cos(0)"), Ok(1.0));
        let pi = evaluate("pi").unwrap();
        assert!((pi - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_variable_binding() {
        let expr = Expr::parse("x^2").unwrap();
        assert_eq!(expr.eval(Some(3.0)), Ok(9.0));
        assert_eq!(expr.eval(None), Err(EvalError::UnknownName("x".into())));
    }

    #[test]
    fn test_errors() {
        assert_eq!(evaluate("1 / 0"), Err(EvalError::DivisionByZero));
        assert_eq!(evaluate("sqrt(-1)"), Err(EvalError::NotFinite));
        assert_eq!(evaluate("2 +"), Err(EvalError::UnexpectedEnd));
        assert_eq!(evaluate("foo(2)"), Err(EvalError::UnknownFunction("foo".into())));
        assert_eq!(evaluate("y + 1"), Err(EvalError::UnknownName("y".into())));
        assert_eq!(
            evaluate("2 $ 3"),
            Err(EvalError::UnexpectedChar { ch: '$', pos: 2 })
        );
        assert!(matches!(
            evaluate("(1 + 2"),
            Err(EvalError::UnexpectedEnd)
        ));
        assert!(matches!(
            evaluate("1 2"),
            Err(EvalError::UnexpectedToken { pos: 2, .. })
        ));
    }

    #[test]
    fn test_deep_nesting_is_refused() {
        let parens = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
        assert_eq!(evaluate(&parens), Err(EvalError::TooLong(MAX_TOKENS)));

        let nested = format!("{}1{}", "(".repeat(300), ")".repeat(300));
        assert_eq!(evaluate(&nested), Err(EvalError::TooDeep(MAX_DEPTH)));

        let signs = format!("{}1", "-".repeat(300));
        assert_eq!(evaluate(&signs), Err(EvalError::TooDeep(MAX_DEPTH)));

        let shallow = format!("{}1{}", "(".repeat(50), ")".repeat(50));
        assert_eq!(evaluate(&shallow), Ok(1.0));
    }

    #[test]
    fn test_long_operator_chain_is_refused() {
        let chain = vec!["1"; 100_000].join("+");
        assert_eq!(evaluate(&chain), Err(EvalError::TooLong(MAX_TOKENS)));
        let short = vec!["1"; 100].join("+");
        assert_eq!(evaluate(&short), Ok(100.0));
    }
}
