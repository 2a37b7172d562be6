//! Tokeniser for canonical expression text.

use super::{EvaluationError, Number};

/// Lexical token.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Token {
    Number(Number),
    /// Identifier, possibly qualified (`math.sqrt`).
    Name(String),
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    LParen,
    RParen,
    Comma,
}

impl Token {
    /// Short description used in syntax error messages.
    pub(super) fn describe(&self) -> String {
        match self {
            Self::Number(_) => "number".to_owned(),
            Self::Name(name) => format!("name '{name}'"),
            Self::Plus => "'+'".to_owned(),
            Self::Minus => "'-'".to_owned(),
            Self::Star => "'*'".to_owned(),
            Self::DoubleStar => "'**'".to_owned(),
            Self::Slash => "'/'".to_owned(),
            Self::LParen => "'('".to_owned(),
            Self::RParen => "')'".to_owned(),
            Self::Comma => "','".to_owned(),
        }
    }
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

/// Split canonical text into tokens.
pub(super) fn tokenize(text: &str) -> Result<Vec<Token>, EvaluationError> {
    let mut lexer = Lexer {
        chars: text.chars().collect(),
        pos: 0,
    };
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

impl Lexer {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn next_token(&mut self) -> Result<Option<Token>, EvaluationError> {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        let Some(ch) = self.peek() else {
            return Ok(None);
        };
        let token = match ch {
            '0'..='9' => self.number()?,
            '.' if self.peek_at(1).is_some_and(|next| next.is_ascii_digit()) => self.number()?,
            c if is_name_start(c) => self.name(),
            _ => {
                self.pos += 1;
                match ch {
                    '+' => Token::Plus,
                    '-' => Token::Minus,
                    '*' if self.peek() == Some('*') => {
                        self.pos += 1;
                        Token::DoubleStar
                    }
                    '*' => Token::Star,
                    '/' if self.peek() == Some('/') => {
                        return Err(EvaluationError::syntax("operator '//' is not supported"));
                    }
                    '/' => Token::Slash,
                    '(' => Token::LParen,
                    ')' => Token::RParen,
                    ',' => Token::Comma,
                    other => {
                        return Err(EvaluationError::syntax(format!(
                            "invalid character '{other}'"
                        )));
                    }
                }
            }
        };
        Ok(Some(token))
    }

    /// Consume a digit run. A single `_` between two digits is a separator
    /// and is dropped from `literal`.
    fn take_digits(&mut self, literal: &mut String) -> usize {
        let mut count = 0;
        while let Some(digit) = self.peek().filter(char::is_ascii_digit) {
            literal.push(digit);
            self.pos += 1;
            count += 1;
            if self.peek() == Some('_') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        count
    }

    fn number(&mut self) -> Result<Token, EvaluationError> {
        let mut literal = String::new();
        let mut is_float = false;
        self.take_digits(&mut literal);

        if self.peek() == Some('.') {
            is_float = true;
            literal.push('.');
            self.pos += 1;
            self.take_digits(&mut literal);
        }

        if matches!(self.peek(), Some('E' | 'e')) {
            let sign = self.peek_at(1).filter(|c| matches!(c, '+' | '-'));
            let digit_offset = if sign.is_some() { 2 } else { 1 };
            if self
                .peek_at(digit_offset)
                .is_some_and(|next| next.is_ascii_digit())
            {
                is_float = true;
                literal.push('e');
                self.pos += 1;
                if let Some(sign) = sign {
                    literal.push(sign);
                    self.pos += 1;
                }
                self.take_digits(&mut literal);
            } else {
                return Err(EvaluationError::syntax(format!(
                    "invalid decimal literal '{literal}'"
                )));
            }
        }

        if is_float {
            return literal
                .parse::<f64>()
                .map(|value| Token::Number(Number::Float(value)))
                .map_err(|_| EvaluationError::syntax(format!("invalid number '{literal}'")));
        }

        if literal.len() > 1 && literal.starts_with('0') && literal.chars().any(|c| c != '0') {
            return Err(EvaluationError::syntax(
                "leading zeros in decimal integer literals are not permitted",
            ));
        }

        // Literals beyond i64 fall back to the nearest float.
        match literal.parse::<i64>() {
            Ok(value) => Ok(Token::Number(Number::Integer(value))),
            Err(_) => literal
                .parse::<f64>()
                .map(|value| Token::Number(Number::Float(value)))
                .map_err(|_| EvaluationError::syntax(format!("invalid number '{literal}'"))),
        }
    }

    fn name(&mut self) -> Token {
        let mut name = String::new();
        loop {
            while let Some(ch) = self.peek().filter(|c| is_name_continue(*c)) {
                name.push(ch);
                self.pos += 1;
            }
            let qualified = self.peek() == Some('.') && self.peek_at(1).is_some_and(is_name_start);
            if !qualified {
                break;
            }
            if let Some(dot) = self.bump() {
                name.push(dot);
            }
        }
        Token::Name(name)
    }
}

fn is_name_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

fn is_name_continue(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
