//! Arithmetic-only expression evaluator
//!
//! Grammar (usual precedence, left associative):
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := unary (('*' | '/') unary)*
//! unary  := ('+' | '-')* primary
//! primary:= number | '(' expr ')'
//! number := digits ['.' digits] | '.' digits | digits '.'
//! ```
//!
//! Anything outside this grammar is an error; nothing else is evaluated.
//! Parentheses nest at most `MAX_DEPTH` levels.

use thiserror::Error;

/// Deepest parenthesis nesting accepted.
pub const MAX_DEPTH: usize = 256;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("empty expression")]
    Empty,
    #[error("unexpected character {0:?} at {1}")]
    UnexpectedChar(char, usize),
    #[error("unexpected token at {0}")]
    UnexpectedToken(usize),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unbalanced parenthesis")]
    UnbalancedParen,
    #[error("division by zero")]
    DivisionByZero,
    #[error("result out of range")]
    Overflow,
    #[error("parentheses nested too deeply")]
    TooDeep,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(pos, c)) = chars.peek() {
        let token = match c {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                let mut seen_dot = false;
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_ascii_digit() {
                        literal.push(c);
                    } else if c == '.' && !seen_dot {
                        seen_dot = true;
                        literal.push(c);
                    } else {
                        break;
                    }
                    chars.next();
                }
                if literal == "." {
                    return Err(EvalError::UnexpectedChar('.', pos));
                }
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| EvalError::UnexpectedChar(c, pos))?;
                tokens.push((Token::Num(value), pos));
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            other => return Err(EvalError::UnexpectedChar(other, pos)),
        };
        tokens.push((token, pos));
        chars.next();
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).map(|(t, _)| *t)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn here(&self) -> usize {
        self.tokens.get(self.pos).map(|(_, at)| *at).unwrap_or(0)
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.advance();
            let rhs = self.term()?;
            value = if op == Token::Plus { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.unary()?;
        while let Some(op @ (Token::Star | Token::Slash)) = self.peek() {
            self.advance();
            let rhs = self.unary()?;
            value = if op == Token::Star {
                value * rhs
            } else if rhs == 0.0 {
                return Err(EvalError::DivisionByZero);
            } else {
                value / rhs
            };
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<f64, EvalError> {
        let mut negate = false;
        while let Some(sign @ (Token::Plus | Token::Minus)) = self.peek() {
            self.advance();
            negate ^= sign == Token::Minus;
        }
        let value = self.primary()?;
        Ok(if negate { -value } else { value })
    }

    fn primary(&mut self) -> Result<f64, EvalError> {
        let at = self.here();
        match self.advance() {
            Some(Token::Num(n)) => Ok(n),
            Some(Token::LParen) => {
                if self.depth >= MAX_DEPTH {
                    return Err(EvalError::TooDeep);
                }
                self.depth += 1;
                let value = self.expr()?;
                self.depth -= 1;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    Some(_) => Err(EvalError::UnexpectedToken(at)),
                    None => Err(EvalError::UnbalancedParen),
                }
            }
            Some(Token::RParen) => Err(EvalError::UnbalancedParen),
            Some(_) => Err(EvalError::UnexpectedToken(at)),
            None => Err(EvalError::UnexpectedEnd),
        }
    }
}

/// Evaluate an arithmetic expression.
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(EvalError::Empty);
    }

    let mut parser = Parser { tokens, pos: 0, depth: 0 };
    let value = parser.expr()?;
    match parser.peek() {
        None => {}
        Some(Token::RParen) => return Err(EvalError::UnbalancedParen),
        Some(_) => return Err(EvalError::UnexpectedToken(parser.here())),
    }

    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::Overflow)
    }
}
