use super::{ast::*, lex, token::*, Error};
use crate::error;

type Result<T> = std::result::Result<T, Error>;

/// Parse one complete expression. Trailing tokens are a syntax error.
pub fn parse(s: &str) -> Result<Expression> {
    let tokens = lex(s);
    Parser::parse(&tokens)
}

struct Parser<'a> {
    token_stream: std::slice::Iter<'a, Token>,
    peeked: Option<&'a Token>,
    depth: usize,
}

const MAX_DEPTH: usize = 256;

const PREC_OR: usize = 1;
const PREC_AND: usize = 2;
const PREC_COMPARE: usize = 3;
const PREC_ADD: usize = 4;
const PREC_MULTIPLY: usize = 5;
const PREC_POWER: usize = 6;

impl<'a> Parser<'a> {
    fn parse(tokens: &'a [Token]) -> Result<Expression> {
        let mut parse = Parser {
            token_stream: tokens.iter(),
            peeked: None,
            depth: 0,
        };
        if parse.peek().is_none() {
            return Err(error!(SyntaxError; "EXPECTED EXPRESSION"));
        }
        let expr = parse.expression()?;
        match parse.next() {
            None => Ok(expr),
            Some(t) => Err(error!(SyntaxError; format!("UNEXPECTED {}", t))),
        }
    }

    fn next(&mut self) -> Option<&'a Token> {
        if self.peeked.is_some() {
            return self.peeked.take();
        }
        self.token_stream.next()
    }

    fn peek(&mut self) -> Option<&&'a Token> {
        if self.peeked.is_none() {
            self.peeked = self.token_stream.next();
        }
        self.peeked.as_ref()
    }

    fn expression(&mut self) -> Result<Expression> {
        fn parse(this: &mut Parser, precedence: usize) -> Result<Expression> {
            let base = this.depth;
            let mut lhs = this.unary()?;
            loop {
                let op = match this.peek() {
                    Some(Token::Operator(op)) => *op,
                    _ => break,
                };
                let op_precedence = Expression::op_precedence(op);
                if op_precedence == 0 || op_precedence < precedence {
                    break;
                }
                this.next();
                this.deeper()?;
                let rhs = if op == Operator::Caret {
                    parse(this, op_precedence)?
                } else {
                    parse(this, op_precedence + 1)?
                };
                lhs = Expression::for_binary_op(op, lhs, rhs);
            }
            this.depth = base;
            Ok(lhs)
        }
        parse(self, 0)
    }

    /// Every nested operand and every chained operator counts toward
    /// `MAX_DEPTH`, bounding the height of the tree.
    fn deeper(&mut self) -> Result<()> {
        if self.depth >= MAX_DEPTH {
            return Err(error!(OutOfMemory; "EXPRESSION TOO COMPLEX"));
        }
        self.depth += 1;
        Ok(())
    }

    fn unary(&mut self) -> Result<Expression> {
        self.deeper()?;
        let expr = self.prefixed();
        self.depth -= 1;
        expr
    }

    fn prefixed(&mut self) -> Result<Expression> {
        match self.peek() {
            Some(Token::Operator(Operator::Minus)) => {
                self.next();
                let expr = self.operand_above(PREC_MULTIPLY)?;
                Ok(match expr {
                    Expression::Integer(n) => Expression::Integer(-n),
                    Expression::Float(n) => Expression::Float(-n),
                    expr => Expression::Negation(Box::new(expr)),
                })
            }
            Some(Token::Operator(Operator::Plus)) => {
                self.next();
                self.operand_above(PREC_MULTIPLY)
            }
            Some(Token::Operator(Operator::Not)) => {
                self.next();
                let expr = self.operand_above(PREC_AND)?;
                Ok(Expression::Not(Box::new(expr)))
            }
            _ => self.primary(),
        }
    }

    /// Parse an operand of a prefix operator, absorbing binary operators
    /// that bind tighter than `precedence`.
    fn operand_above(&mut self, precedence: usize) -> Result<Expression> {
        let base = self.depth;
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Operator(op)) => *op,
                _ => break,
            };
            let op_precedence = Expression::op_precedence(op);
            if op_precedence <= precedence {
                break;
            }
            self.next();
            self.deeper()?;
            let rhs = if op == Operator::Caret {
                self.operand_above(op_precedence - 1)?
            } else {
                self.operand_above(op_precedence)?
            };
            lhs = Expression::for_binary_op(op, lhs, rhs);
        }
        self.depth = base;
        Ok(lhs)
    }

    fn primary(&mut self) -> Result<Expression> {
        match self.next() {
            Some(Token::LParen) => {
                let expr = self.expression()?;
                self.expect(Token::RParen)?;
                Ok(expr)
            }
            Some(Token::Ident(name)) => match self.peek() {
                Some(&&Token::LParen) => {
                    self.next();
                    let indices = self.expression_list(Token::RParen)?;
                    Ok(Expression::Index(name.clone(), indices))
                }
                Some(&&Token::LBracket) => {
                    let mut indices = vec![];
                    while let Some(&&Token::LBracket) = self.peek() {
                        self.next();
                        indices.append(&mut self.expression_list(Token::RBracket)?);
                    }
                    Ok(Expression::Index(name.clone(), indices))
                }
                _ => Ok(Expression::Var(name.clone())),
            },
            Some(Token::Literal(l)) => Expression::for_literal(l),
            Some(t) => Err(error!(SyntaxError; format!("UNEXPECTED {}", t))),
            None => Err(error!(SyntaxError; "EXPECTED EXPRESSION")),
        }
    }

    fn expression_list(&mut self, close: Token) -> Result<Vec<Expression>> {
        let mut v: Vec<Expression> = vec![];
        loop {
            v.push(self.expression()?);
            match self.next() {
                Some(t) if *t == close => return Ok(v),
                Some(Token::Comma) => continue,
                _ => return Err(error!(SyntaxError; "EXPECTED END OR SEPARATOR")),
            }
        }
    }

    fn expect(&mut self, token: Token) -> Result<()> {
        if let Some(t) = self.next() {
            if *t == token {
                return Ok(());
            }
        }
        use Token::*;
        Err(error!(SyntaxError;
            match token {
                Unknown(_) => "UNEXPECTED TOKEN",
                Literal(_) => "EXPECTED LITERAL",
                Operator(_) => "EXPECTED OPERATOR",
                Ident(_) => "EXPECTED IDENTIFIER",
                LParen => "EXPECTED LEFT PARENTHESIS",
                RParen => "EXPECTED RIGHT PARENTHESIS",
                LBracket => "EXPECTED LEFT BRACKET",
                RBracket => "EXPECTED RIGHT BRACKET",
                Comma => "EXPECTED COMMA",
            }
        ))
    }
}

impl Expression {
    fn for_binary_op(op: Operator, lhs: Expression, rhs: Expression) -> Expression {
        use Operator::*;
        let (lhs, rhs) = (Box::new(lhs), Box::new(rhs));
        match op {
            Caret => Expression::Power(lhs, rhs),
            Multiply => Expression::Multiply(lhs, rhs),
            Divide => Expression::Divide(lhs, rhs),
            Modulus => Expression::Modulus(lhs, rhs),
            Plus => Expression::Add(lhs, rhs),
            Minus => Expression::Subtract(lhs, rhs),
            Equal => Expression::Equal(lhs, rhs),
            NotEqual => Expression::NotEqual(lhs, rhs),
            Less => Expression::Less(lhs, rhs),
            LessEqual => Expression::LessEqual(lhs, rhs),
            Greater => Expression::Greater(lhs, rhs),
            GreaterEqual => Expression::GreaterEqual(lhs, rhs),
            And => Expression::And(lhs, rhs),
            Or => Expression::Or(lhs, rhs),
            Not => unreachable!("NOT is prefix only"),
        }
    }

    fn op_precedence(op: Operator) -> usize {
        use Operator::*;
        match op {
            Or => PREC_OR,
            And => PREC_AND,
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => PREC_COMPARE,
            Plus | Minus => PREC_ADD,
            Multiply | Divide | Modulus => PREC_MULTIPLY,
            Caret => PREC_POWER,
            Not => 0,
        }
    }

    fn for_literal(lit: &Literal) -> Result<Expression> {
        match lit {
            Literal::Integer(s) => match s.parse() {
                Ok(n) => Ok(Expression::Integer(n)),
                Err(_) => Err(error!(Overflow)),
            },
            Literal::Float(s) => match s.parse() {
                Ok(n) => Ok(Expression::Float(n)),
                Err(_) => Err(error!(SyntaxError; format!("BAD NUMBER {}", s))),
            },
            Literal::String(s) => Ok(Expression::String(s.to_string())),
        }
    }
}
