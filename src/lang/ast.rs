/// Expression tree produced by [`parse`](super::parse).
///
/// The grammar has literals, variables, array element reads and operators.
/// There are no calls, so evaluating a tree can never have side effects.
#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Integer(i64),
    Float(f64),
    String(String),
    Var(String),
    Index(String, Vec<Expression>),
    Negation(Box<Expression>),
    Not(Box<Expression>),
    Power(Box<Expression>, Box<Expression>),
    Multiply(Box<Expression>, Box<Expression>),
    Divide(Box<Expression>, Box<Expression>),
    Modulus(Box<Expression>, Box<Expression>),
    Add(Box<Expression>, Box<Expression>),
    Subtract(Box<Expression>, Box<Expression>),
    Equal(Box<Expression>, Box<Expression>),
    NotEqual(Box<Expression>, Box<Expression>),
    Less(Box<Expression>, Box<Expression>),
    LessEqual(Box<Expression>, Box<Expression>),
    Greater(Box<Expression>, Box<Expression>),
    GreaterEqual(Box<Expression>, Box<Expression>),
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
}

pub trait Visitor {
    fn visit_expression(&mut self, _: &Expression) {}
}

pub trait AcceptVisitor {
    fn accept<V: Visitor>(&self, visitor: &mut V);
}

impl AcceptVisitor for Expression {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        use Expression::*;
        match self {
            Integer(_) | Float(_) | String(_) | Var(_) => {}
            Index(_, vec_expr) => {
                for expr in vec_expr {
                    expr.accept(visitor);
                }
            }
            Negation(expr) | Not(expr) => expr.accept(visitor),
            Power(expr1, expr2)
            | Multiply(expr1, expr2)
            | Divide(expr1, expr2)
            | Modulus(expr1, expr2)
            | Add(expr1, expr2)
            | Subtract(expr1, expr2)
            | Equal(expr1, expr2)
            | NotEqual(expr1, expr2)
            | Less(expr1, expr2)
            | LessEqual(expr1, expr2)
            | Greater(expr1, expr2)
            | GreaterEqual(expr1, expr2)
            | And(expr1, expr2)
            | Or(expr1, expr2) => {
                expr1.accept(visitor);
                expr2.accept(visitor);
            }
        }
        visitor.visit_expression(self)
    }
}

impl Expression {
    /// Names of every variable and array the expression reads.
    pub fn variables(&self) -> Vec<std::string::String> {
        struct Names(Vec<std::string::String>);
        impl Visitor for Names {
            fn visit_expression(&mut self, expr: &Expression) {
                match expr {
                    Expression::Var(name) | Expression::Index(name, _) => {
                        if !self.0.contains(name) {
                            self.0.push(name.clone())
                        }
                    }
                    _ => {}
                }
            }
        }
        let mut names = Names(vec![]);
        self.accept(&mut names);
        names.0
    }
}
