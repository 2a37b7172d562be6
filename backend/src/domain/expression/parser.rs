//! Recursive-descent parser and tree evaluator.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := factor (('*' | '/') factor)*
//! factor  := ('+' | '-') factor | power
//! power   := primary ('**' factor)?
//! primary := NUMBER | NAME | NAME '(' args? ')' | '(' expr ')'
//! args    := expr (',' expr)* ','?
//! ```
//!
//! `**` binds tighter than unary minus on its left (`-2**2 == -4`) and is
//! right-associative (`2**3**2 == 512`).

use super::functions::Function;
use super::lexer::{Token, tokenize};
use super::{EvaluationError, Number};

/// Nesting limit for parentheses, calls, and unary chains.
const MAX_DEPTH: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum UnaryOp {
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Expr {
    Literal(Number),
    Name(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        name: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    /// Evaluate the tree. Operands and call arguments are evaluated left to
    /// right; names are resolved when reached.
    pub(super) fn evaluate(&self) -> Result<Number, EvaluationError> {
        match self {
            Self::Literal(value) => Ok(*value),
            Self::Name(name) => Err(match Function::lookup(name) {
                Some(_) => EvaluationError::invalid_arguments(format!(
                    "'{name}' is a function and must be called"
                )),
                None => EvaluationError::undefined_name(name.as_str()),
            }),
            Self::Unary { op, operand } => {
                let value = operand.evaluate()?;
                Ok(match op {
                    UnaryOp::Plus => value,
                    UnaryOp::Minus => value.negate(),
                })
            }
            Self::Binary { op, lhs, rhs } => {
                let lhs = lhs.evaluate()?;
                let rhs = rhs.evaluate()?;
                match op {
                    BinaryOp::Add => Ok(lhs.add(rhs)),
                    BinaryOp::Subtract => Ok(lhs.subtract(rhs)),
                    BinaryOp::Multiply => Ok(lhs.multiply(rhs)),
                    BinaryOp::Divide => lhs.divide(rhs),
                    BinaryOp::Power => lhs.power(rhs),
                }
            }
            Self::Call { name, args } => {
                let function =
                    Function::lookup(name).ok_or_else(|| EvaluationError::undefined_name(name))?;
                let values = args
                    .iter()
                    .map(Self::evaluate)
                    .collect::<Result<Vec<_>, _>>()?;
                function.apply(&values)
            }
        }
    }
}

/// Parse canonical text into an expression tree.
pub(super) fn parse(text: &str) -> Result<Expr, EvaluationError> {
    let tokens = tokenize(text)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.expr()?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(EvaluationError::syntax(format!(
            "unexpected {}",
            token.describe()
        ))),
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned()?;
        self.pos += 1;
        Some(token)
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<(), EvaluationError> {
        if self.eat(expected) {
            return Ok(());
        }
        Err(EvaluationError::syntax(match self.peek() {
            Some(found) => format!(
                "expected {} but found {}",
                expected.describe(),
                found.describe()
            ),
            None => format!("expected {} at end of input", expected.describe()),
        }))
    }

    fn enter(&mut self) -> Result<(), EvaluationError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvaluationError::syntax("expression is nested too deeply"));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn expr(&mut self) -> Result<Expr, EvaluationError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Subtract,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.term()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn term(&mut self) -> Result<Expr, EvaluationError> {
        let mut lhs = self.factor()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Multiply,
                Some(Token::Slash) => BinaryOp::Divide,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.factor()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn factor(&mut self) -> Result<Expr, EvaluationError> {
        let op = match self.peek() {
            Some(Token::Plus) => UnaryOp::Plus,
            Some(Token::Minus) => UnaryOp::Minus,
            _ => return self.power(),
        };
        self.pos += 1;
        self.enter()?;
        let operand = self.factor();
        self.leave();
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand?),
        })
    }

    fn power(&mut self) -> Result<Expr, EvaluationError> {
        let base = self.primary()?;
        if !self.eat(&Token::DoubleStar) {
            return Ok(base);
        }
        self.enter()?;
        let exponent = self.factor();
        self.leave();
        Ok(binary(BinaryOp::Power, base, exponent?))
    }

    fn primary(&mut self) -> Result<Expr, EvaluationError> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(Expr::Literal(value)),
            Some(Token::Name(name)) => {
                if self.eat(&Token::LParen) {
                    self.enter()?;
                    let args = self.arguments();
                    self.leave();
                    Ok(Expr::Call { name, args: args? })
                } else {
                    Ok(Expr::Name(name))
                }
            }
            Some(Token::LParen) => {
                if self.peek() == Some(&Token::RParen) {
                    return Err(EvaluationError::syntax("empty parentheses"));
                }
                self.enter()?;
                let inner = self.expr();
                self.leave();
                let inner = inner?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            Some(token) => Err(EvaluationError::syntax(format!(
                "unexpected {}",
                token.describe()
            ))),
            None => Err(EvaluationError::syntax("unexpected end of input")),
        }
    }

    /// Parse call arguments after the opening parenthesis, consuming the
    /// closing one.
    fn arguments(&mut self) -> Result<Vec<Expr>, EvaluationError> {
        let mut args = Vec::new();
        while !self.eat(&Token::RParen) {
            args.push(self.expr()?);
            if !self.eat(&Token::Comma) {
                self.expect(&Token::RParen)?;
                break;
            }
        }
        Ok(args)
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn int(value: i64) -> Expr {
        Expr::Literal(Number::Integer(value))
    }

    #[rstest]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(
            parse("1+2*3").expect("parse"),
            binary(BinaryOp::Add, int(1), binary(BinaryOp::Multiply, int(2), int(3)))
        );
    }

    #[rstest]
    fn power_is_right_associative() {
        assert_eq!(
            parse("2**3**2").expect("parse"),
            binary(BinaryOp::Power, int(2), binary(BinaryOp::Power, int(3), int(2)))
        );
    }

    #[rstest]
    fn unary_minus_applies_after_power() {
        assert_eq!(
            parse("-2**2").expect("parse"),
            Expr::Unary {
                op: UnaryOp::Minus,
                operand: Box::new(binary(BinaryOp::Power, int(2), int(2))),
            }
        );
    }

    #[rstest]
    fn calls_accept_trailing_comma() {
        assert_eq!(
            parse("max(1, 2,)").expect("parse"),
            Expr::Call {
                name: "max".to_owned(),
                args: vec![int(1), int(2)],
            }
        );
        assert_eq!(
            parse("f()").expect("parse"),
            Expr::Call {
                name: "f".to_owned(),
                args: Vec::new(),
            }
        );
    }

    #[rstest]
    #[case("")]
    #[case("1+")]
    #[case("(1")]
    #[case("1)")]
    #[case("()")]
    #[case("2 3")]
    #[case("2x")]
    #[case("max(1,,2)")]
    #[case("(1, 2)")]
    #[case("*2")]
    #[case("1__000")]
    #[case("1_")]
    fn malformed_input_is_a_syntax_error(#[case] text: &str) {
        let err = parse(text).expect_err("syntax error");
        assert!(matches!(err, EvaluationError::Syntax { .. }), "{text}: {err:?}");
    }

    #[rstest]
    fn deep_nesting_is_rejected() {
        let text = format!("{}1{}", "(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
        let err = parse(&text).expect_err("too deep");
        assert!(matches!(err, EvaluationError::Syntax { .. }));

        let minus = format!("{}1", "-".repeat(MAX_DEPTH + 1));
        assert!(parse(&minus).is_err());
    }

    #[rstest]
    fn syntax_errors_win_over_undefined_names() {
        let err = parse("foo + ").expect_err("syntax error");
        assert!(matches!(err, EvaluationError::Syntax { .. }));
    }

    #[rstest]
    fn names_resolve_left_to_right() {
        let err = parse("foo + bar").expect("parse").evaluate().expect_err("undefined");
        assert_eq!(err, EvaluationError::undefined_name("foo"));

        let err = parse("1/0 + foo").expect("parse").evaluate().expect_err("zero");
        assert_eq!(err, EvaluationError::DivisionByZero);
    }
}
