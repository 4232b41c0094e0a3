use super::token::*;

pub fn lex(s: &str) -> Vec<Token> {
    ExprLexer {
        chars: s.chars().peekable(),
    }
    .collect()
}

fn is_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

trait Tokenizers<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::Chars<'a>>;

    fn whitespace(&mut self) {
        while let Some(pk) = self.chars().peek() {
            if !is_whitespace(*pk) {
                break;
            }
            self.chars().next();
        }
    }

    fn number(&mut self) -> Option<Token> {
        let mut s = String::new();
        let mut decimal = false;
        let mut exp = false;
        loop {
            let ch = match self.chars().next() {
                Some(c) => c.to_ascii_uppercase(),
                None => {
                    debug_assert!(false, "Failed to tokenize number.");
                    return None;
                }
            };
            s.push(ch);
            if ch == '.' {
                decimal = true
            }
            if let Some(pk) = self.chars().peek() {
                if ch == 'E' {
                    exp = true;
                    if *pk == '+' || *pk == '-' {
                        continue;
                    }
                }
                if is_digit(*pk) {
                    continue;
                }
                if !decimal && !exp && *pk == '.' {
                    continue;
                }
                if !exp && (*pk == 'E' || *pk == 'e') {
                    continue;
                }
            }
            break;
        }
        if !exp && !decimal && s.parse::<i64>().is_ok() {
            return Some(Token::Literal(Literal::Integer(s)));
        }
        Some(Token::Literal(Literal::Float(s)))
    }

    fn string(&mut self) -> Option<Token> {
        let mut s = String::new();
        let quote = self.chars().next()?;
        while let Some(ch) = self.chars().next() {
            if ch == quote {
                break;
            }
            s.push(ch);
        }
        Some(Token::Literal(Literal::String(s)))
    }

    fn alphabetic(&mut self) -> Option<Token> {
        let mut s = String::new();
        while let Some(pk) = self.chars().peek() {
            if !is_ident_char(*pk) {
                break;
            }
            s.push(*pk);
            self.chars().next();
        }
        if let Some(op) = Operator::from_word(&s) {
            return Some(Token::Operator(op));
        }
        if let Some(pk) = self.chars().peek() {
            if *pk == '$' || *pk == '%' {
                s.push(*pk);
                self.chars().next();
            }
        }
        Some(Token::Ident(s))
    }

    fn minutia(&mut self) -> Option<Token> {
        let ch = self.chars().next()?;
        let single = match ch {
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            '[' => Some(Token::LBracket),
            ']' => Some(Token::RBracket),
            ',' => Some(Token::Comma),
            _ => None,
        };
        if single.is_some() {
            return single;
        }
        let mut s = ch.to_string();
        if let Some(pk) = self.chars().peek() {
            let mut pair = s.clone();
            pair.push(*pk);
            if let Some(op) = Operator::from_symbol(&pair) {
                self.chars().next();
                return Some(Token::Operator(op));
            }
        }
        if let Some(op) = Operator::from_symbol(&s) {
            return Some(Token::Operator(op));
        }
        while let Some(pk) = self.chars().peek() {
            if is_whitespace(*pk) || is_ident_char(*pk) {
                break;
            }
            s.push(*pk);
            self.chars().next();
        }
        Some(Token::Unknown(s))
    }
}

struct ExprLexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Tokenizers<'a> for ExprLexer<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::Chars<'a>> {
        &mut self.chars
    }
}

impl<'a> Iterator for ExprLexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.whitespace();
        let pk = *self.chars.peek()?;
        if is_digit(pk) || pk == '.' {
            return self.number();
        }
        if is_ident_start(pk) {
            return self.alphabetic();
        }
        if pk == '"' || pk == '\'' {
            return self.string();
        }
        self.minutia()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers() {
        assert_eq!(
            lex("12 1.5 2e3 .5"),
            vec![
                Token::Literal(Literal::Integer("12".into())),
                Token::Literal(Literal::Float("1.5".into())),
                Token::Literal(Literal::Float("2E3".into())),
                Token::Literal(Literal::Float(".5".into())),
            ]
        );
    }

    #[test]
    fn test_idents_and_words() {
        assert_eq!(
            lex("name$ mod Count%"),
            vec![
                Token::Ident("name$".into()),
                Token::Operator(Operator::Modulus),
                Token::Ident("Count%".into()),
            ]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            lex("a<=b<>c==d"),
            vec![
                Token::Ident("a".into()),
                Token::Operator(Operator::LessEqual),
                Token::Ident("b".into()),
                Token::Operator(Operator::NotEqual),
                Token::Ident("c".into()),
                Token::Operator(Operator::Equal),
                Token::Ident("d".into()),
            ]
        );
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            lex(r#""hi there" 'x'"#),
            vec![
                Token::Literal(Literal::String("hi there".into())),
                Token::Literal(Literal::String("x".into())),
            ]
        );
    }

    #[test]
    fn test_unknown() {
        assert_eq!(
            lex("1 & 2"),
            vec![
                Token::Literal(Literal::Integer("1".into())),
                Token::Unknown("&".into()),
                Token::Literal(Literal::Integer("2".into())),
            ]
        );
    }
}
