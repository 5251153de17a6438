//! Tokenizer for function expressions
//!
//! Accepts numeric literals (`2`, `.5`, `1.5e-3`), identifiers, the operators
//! `+ - * / **` and parentheses. Any other character is rejected.

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    LParen,
    RParen,
    Eof,
}

/// Split an expression into tokens, terminated by `Token::Eof`
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let ch = chars[pos];
        match ch {
            c if c.is_whitespace() => pos += 1,
            '+' => {
                tokens.push(Token::Plus);
                pos += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                pos += 1;
            }
            '*' => {
                if chars.get(pos + 1) == Some(&'*') {
                    tokens.push(Token::DoubleStar);
                    pos += 2;
                } else {
                    tokens.push(Token::Star);
                    pos += 1;
                }
            }
            '/' => {
                tokens.push(Token::Slash);
                pos += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                pos += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                pos += 1;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let (number, next) = read_number(&chars, pos)?;
                tokens.push(Token::Number(number));
                pos = next;
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let start = pos;
                while pos < chars.len() && (chars[pos].is_ascii_alphanumeric() || chars[pos] == '_')
                {
                    pos += 1;
                }
                tokens.push(Token::Ident(chars[start..pos].iter().collect()));
            }
            _ => {
                return Err(Error::InvalidExpression(format!(
                    "unexpected character '{}' at position {}",
                    ch, pos
                )))
            }
        }
    }

    tokens.push(Token::Eof);
    Ok(tokens)
}

/// Read a numeric literal starting at `start`, returning the value and the
/// position just past it
fn read_number(chars: &[char], start: usize) -> Result<(f64, usize)> {
    let digits = |mut pos: usize| {
        while pos < chars.len() && chars[pos].is_ascii_digit() {
            pos += 1;
        }
        pos
    };

    let mut pos = digits(start);
    if pos < chars.len() && chars[pos] == '.' {
        pos = digits(pos + 1);
    }

    // Exponent only when digits follow, so `2e` stays `2` followed by `e`
    if pos < chars.len() && (chars[pos] == 'e' || chars[pos] == 'E') {
        let mut exp = pos + 1;
        if exp < chars.len() && (chars[exp] == '+' || chars[exp] == '-') {
            exp += 1;
        }
        if exp < chars.len() && chars[exp].is_ascii_digit() {
            pos = digits(exp);
        }
    }

    let literal: String = chars[start..pos].iter().collect();
    literal
        .parse::<f64>()
        .map(|n| (n, pos))
        .map_err(|_| Error::InvalidExpression(format!("invalid number literal '{}'", literal)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_power() {
        let tokens = tokenize("x**2").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("x".to_string()),
                Token::DoubleStar,
                Token::Number(2.0),
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_tokenize_numbers() {
        let tokens = tokenize("1.5e-3 .5 10 2E2").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(1.5e-3),
                Token::Number(0.5),
                Token::Number(10.0),
                Token::Number(200.0),
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_trailing_e_is_identifier() {
        let tokens = tokenize("2e").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Number(2.0), Token::Ident("e".to_string()), Token::Eof]
        );
    }

    #[test]
    fn test_rejects_foreign_characters() {
        assert!(tokenize("__import__('os')").is_err());
        assert!(tokenize("x.real").is_err());
        assert!(tokenize("x, 1").is_err());
        assert!(tokenize("x ^ 2").is_err());
    }

    #[test]
    fn test_lone_dot_is_invalid() {
        assert!(tokenize(".").is_err());
    }
}
