use super::{Operation, Val, Var};
use crate::error;
use crate::lang::{ast::Expression, parse, Error};
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// Parse and evaluate in one step.
pub fn eval_str(s: &str, var: &Var) -> Result<Val> {
    evaluate(&parse(s)?, var)
}

/// Evaluate against the variable store. Every unknown name is reported
/// before anything is computed.
pub fn evaluate(expr: &Expression, var: &Var) -> Result<Val> {
    let unknown: Vec<String> = expr
        .variables()
        .into_iter()
        .filter(|name| !var.contains(name))
        .collect();
    if !unknown.is_empty() {
        return Err(error!(UnknownIdentifier; unknown.join(", ")));
    }
    Evaluator { var }.eval(expr)
}

/// Evaluate subscripts into an index path.
pub fn index_path(index: &[Expression], var: &Var) -> Result<Vec<usize>> {
    let mut path = Vec::with_capacity(index.len());
    for expr in index {
        path.push(usize::try_from(&evaluate(expr, var)?)?);
    }
    Ok(path)
}

struct Evaluator<'a> {
    var: &'a Var,
}

impl<'a> Evaluator<'a> {
    fn eval(&self, expr: &Expression) -> Result<Val> {
        use Expression as E;
        match expr {
            E::Integer(n) => Ok(Val::Integer(*n)),
            E::Float(n) => Ok(Val::Float(*n)),
            E::String(s) => Ok(Val::String(s.clone())),
            E::Var(name) => self.var.fetch(name),
            E::Index(name, index) => {
                let path = index_path(index, self.var)?;
                self.var.fetch_index(name, &path)
            }
            E::Negation(e) => Operation::negate(self.eval(e)?),
            E::Not(e) => Operation::not(self.eval(e)?),
            E::Power(l, r) => self.binary(Operation::power, l, r),
            E::Multiply(l, r) => self.binary(Operation::multiply, l, r),
            E::Divide(l, r) => self.binary(Operation::divide, l, r),
            E::Modulus(l, r) => self.binary(Operation::modulus, l, r),
            E::Add(l, r) => self.binary(Operation::sum, l, r),
            E::Subtract(l, r) => self.binary(Operation::subtract, l, r),
            E::Equal(l, r) => self.binary(Operation::equal_to, l, r),
            E::NotEqual(l, r) => self.binary(Operation::not_equal, l, r),
            E::Less(l, r) => self.binary(Operation::less, l, r),
            E::LessEqual(l, r) => self.binary(Operation::less_equal, l, r),
            E::Greater(l, r) => self.binary(Operation::greater, l, r),
            E::GreaterEqual(l, r) => self.binary(Operation::greater_equal, l, r),
            E::And(l, r) => self.binary(Operation::and, l, r),
            E::Or(l, r) => self.binary(Operation::or, l, r),
        }
    }

    fn binary(
        &self,
        op: fn(Val, Val) -> Result<Val>,
        lhs: &Expression,
        rhs: &Expression,
    ) -> Result<Val> {
        op(self.eval(lhs)?, self.eval(rhs)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    fn eval(s: &str) -> Result<Val> {
        let mut var = Var::new();
        var.store("X", Val::Integer(4));
        var.store("N$", Val::String("Bob".into()));
        var.store_index("A", &[1], Val::Float(2.5));
        eval_str(s, &var)
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval("X * 2 + 1").unwrap(), Val::Integer(9));
        assert_eq!(eval("X / 8").unwrap(), Val::Float(0.5));
        assert_eq!(eval("2 ^ 10").unwrap(), Val::Integer(1024));
        assert_eq!(eval("7 MOD 3").unwrap(), Val::Integer(1));
        assert_eq!(eval("A(1) * 2").unwrap(), Val::Float(5.0));
        assert_eq!(eval("A(9)").unwrap(), Val::Integer(0));
    }

    #[test]
    fn test_strings_and_logic() {
        assert_eq!(
            eval(r#""Hi " + N$"#).unwrap(),
            Val::String("Hi Bob".into())
        );
        assert_eq!(eval("X > 3 AND X < 5").unwrap(), Val::Integer(1));
        assert_eq!(eval("NOT X = 4").unwrap(), Val::Integer(0));
    }

    #[test]
    fn test_errors() {
        let e = eval("Y + Z").unwrap_err();
        assert_eq!(e.code(), ErrorCode::UnknownIdentifier);
        assert_eq!(e.to_string(), "Unknown identifier; Y, Z");
        assert_eq!(eval("1 / 0").unwrap_err().code(), ErrorCode::DivisionByZero);
        assert_eq!(eval("1 +").unwrap_err().code(), ErrorCode::SyntaxError);
        assert_eq!(eval("A(-1)").unwrap_err().code(), ErrorCode::SubscriptOutOfRange);
    }
}
