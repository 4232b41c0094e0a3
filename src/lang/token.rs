#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Unknown(String),
    Literal(Literal),
    Ident(String),
    Operator(Operator),
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            Unknown(s) => write!(f, "{}", s),
            Literal(s) => write!(f, "{}", s),
            Ident(s) => write!(f, "{}", s),
            Operator(s) => write!(f, "{}", s),
            LParen => write!(f, "("),
            RParen => write!(f, ")"),
            LBracket => write!(f, "["),
            RBracket => write!(f, "]"),
            Comma => write!(f, ","),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    Float(String),
    Integer(String),
    String(String),
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Literal::*;
        match self {
            Float(s) => write!(f, "{}", s),
            Integer(s) => write!(f, "{}", s),
            String(s) => write!(f, "\"{}\"", s),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Operator {
    Caret,
    Multiply,
    Divide,
    Modulus,
    Plus,
    Minus,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Not,
    And,
    Or,
}

impl Operator {
    /// Operators spelled as words. The lexer checks identifiers against these.
    pub fn from_word(s: &str) -> Option<Operator> {
        use Operator::*;
        match s.to_ascii_uppercase().as_str() {
            "MOD" => Some(Modulus),
            "NOT" => Some(Not),
            "AND" => Some(And),
            "OR" => Some(Or),
            _ => None,
        }
    }

    pub fn from_symbol(s: &str) -> Option<Operator> {
        use Operator::*;
        match s {
            "^" => Some(Caret),
            "*" => Some(Multiply),
            "/" => Some(Divide),
            "%" => Some(Modulus),
            "+" => Some(Plus),
            "-" => Some(Minus),
            "=" | "==" => Some(Equal),
            "<>" | "!=" => Some(NotEqual),
            "<" => Some(Less),
            "<=" | "=<" => Some(LessEqual),
            ">" => Some(Greater),
            ">=" | "=>" => Some(GreaterEqual),
            _ => None,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operator::*;
        match self {
            Caret => write!(f, "^"),
            Multiply => write!(f, "*"),
            Divide => write!(f, "/"),
            Modulus => write!(f, "MOD"),
            Plus => write!(f, "+"),
            Minus => write!(f, "-"),
            Equal => write!(f, "="),
            NotEqual => write!(f, "<>"),
            Less => write!(f, "<"),
            LessEqual => write!(f, "<="),
            Greater => write!(f, ">"),
            GreaterEqual => write!(f, ">="),
            Not => write!(f, "NOT"),
            And => write!(f, "AND"),
            Or => write!(f, "OR"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_word() {
        assert_eq!(Operator::from_word("mod"), Some(Operator::Modulus));
        assert_eq!(Operator::from_word("PICKLES"), None);
    }

    #[test]
    fn test_from_symbol() {
        assert_eq!(Operator::from_symbol("=="), Some(Operator::Equal));
        assert_eq!(Operator::from_symbol("!="), Some(Operator::NotEqual));
        assert_eq!(Operator::from_symbol("=<"), Some(Operator::LessEqual));
        assert_eq!(Operator::from_symbol("&"), None);
    }
}
