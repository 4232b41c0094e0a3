use super::Val;
use crate::error;
use crate::lang::{Builtin, Error};
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// ## Built-in functions over evaluated arguments

pub struct Function {}

impl Function {
    /// Accepted argument counts for builtins that take evaluated values.
    pub fn arity(builtin: Builtin) -> std::ops::RangeInclusive<usize> {
        use Builtin as B;
        match builtin {
            B::Sin | B::Cos | B::Tan | B::Sqrt | B::Abs | B::Int => 1..=1,
            B::Len | B::Str | B::Val | B::Upper | B::Lower => 1..=1,
            B::Rnd => 0..=1,
            B::Left | B::Right | B::Instr => 2..=2,
            B::Mid => 2..=3,
            B::Sum | B::Avg | B::Min | B::Max => 1..=usize::max_value(),
            _ => 0..=usize::max_value(),
        }
    }

    pub fn check_arity(builtin: Builtin, args: &[Val]) -> Result<()> {
        if Function::arity(builtin).contains(&args.len()) {
            Ok(())
        } else {
            let name = format!("{:?}", builtin).to_uppercase();
            Err(error!(SyntaxError; format!("WRONG NUMBER OF ARGUMENTS TO {}", name)))
        }
    }

    pub fn sin(val: &Val) -> Result<Val> {
        Ok(Val::Float(f64::try_from(val)?.sin()))
    }

    pub fn cos(val: &Val) -> Result<Val> {
        Ok(Val::Float(f64::try_from(val)?.cos()))
    }

    pub fn tan(val: &Val) -> Result<Val> {
        Ok(Val::Float(f64::try_from(val)?.tan()))
    }

    pub fn sqrt(val: &Val) -> Result<Val> {
        let n = f64::try_from(val)?;
        if n < 0.0 {
            return Err(error!(IllegalFunctionCall; "SQRT OF NEGATIVE"));
        }
        Ok(Val::Float(n.sqrt()))
    }

    pub fn abs(val: &Val) -> Result<Val> {
        match val {
            Val::Integer(n) => match n.checked_abs() {
                Some(n) => Ok(Val::Integer(n)),
                None => Ok(Val::Float((*n as f64).abs())),
            },
            _ => Ok(Val::Float(f64::try_from(val)?.abs())),
        }
    }

    /// Largest integer not greater than the argument.
    pub fn int(val: &Val) -> Result<Val> {
        match val {
            Val::Integer(n) => Ok(Val::Integer(*n)),
            _ => Ok(Val::Integer(i64::try_from(&Val::Float(
                f64::try_from(val)?.floor(),
            ))?)),
        }
    }

    pub fn len(val: &Val) -> Result<Val> {
        match val {
            Val::String(s) => Ok(Val::Integer(s.chars().count() as i64)),
            Val::Array(a) => Ok(Val::Integer(a.len() as i64)),
            _ => Ok(Val::Integer(val.to_string().chars().count() as i64)),
        }
    }

    /// One-based start; the length defaults to the rest of the string.
    pub fn mid(s: &Val, start: &Val, len: Option<&Val>) -> Result<Val> {
        let s = s.to_string();
        let start = i64::try_from(start)?;
        if start < 1 {
            return Err(error!(IllegalFunctionCall; "MID START"));
        }
        let len = match len {
            Some(len) => Function::count(len)?,
            None => usize::max_value(),
        };
        Ok(Val::String(
            s.chars().skip(start as usize - 1).take(len).collect(),
        ))
    }

    pub fn left(s: &Val, n: &Val) -> Result<Val> {
        let n = Function::count(n)?;
        Ok(Val::String(s.to_string().chars().take(n).collect()))
    }

    pub fn right(s: &Val, n: &Val) -> Result<Val> {
        let s = s.to_string();
        let n = Function::count(n)?;
        let skip = s.chars().count().saturating_sub(n);
        Ok(Val::String(s.chars().skip(skip).collect()))
    }

    /// One-based position of `needle`, zero if absent.
    pub fn instr(s: &Val, needle: &Val) -> Result<Val> {
        let s = s.to_string();
        let needle = needle.to_string();
        Ok(Val::Integer(match s.find(&needle) {
            Some(byte) => s[..byte].chars().count() as i64 + 1,
            None => 0,
        }))
    }

    pub fn str(val: &Val) -> Result<Val> {
        Ok(Val::String(val.to_string()))
    }

    /// Numeric value of a string; text that is not a number reads as zero.
    pub fn val(val: &Val) -> Result<Val> {
        match val {
            Val::String(s) => match Val::from_input(s) {
                Val::String(_) => Ok(Val::Integer(0)),
                n => Ok(n),
            },
            Val::Array(_) => Err(error!(TypeMismatch)),
            n => Ok(n.clone()),
        }
    }

    pub fn upper(val: &Val) -> Result<Val> {
        Ok(Val::String(val.to_string().to_uppercase()))
    }

    pub fn lower(val: &Val) -> Result<Val> {
        Ok(Val::String(val.to_string().to_lowercase()))
    }

    pub fn sum(values: &[Val]) -> Result<Val> {
        let mut total = Val::Integer(0);
        for v in values {
            if !v.is_number() {
                return Err(error!(TypeMismatch));
            }
            total = super::Operation::sum(total, v.clone())?;
        }
        Ok(total)
    }

    pub fn avg(values: &[Val]) -> Result<Val> {
        if values.is_empty() {
            return Ok(Val::Integer(0));
        }
        let total = f64::try_from(&Function::sum(values)?)?;
        Ok(Val::Float(total / values.len() as f64))
    }

    pub fn min(values: &[Val]) -> Result<Val> {
        Function::extreme(values, std::cmp::Ordering::Less)
    }

    pub fn max(values: &[Val]) -> Result<Val> {
        Function::extreme(values, std::cmp::Ordering::Greater)
    }

    fn extreme(values: &[Val], want: std::cmp::Ordering) -> Result<Val> {
        let mut best: Option<&Val> = None;
        for v in values {
            best = match best {
                None => Some(v),
                Some(b) if super::Operation::compare(v, b)? == want => Some(v),
                keep => keep,
            };
        }
        match best {
            Some(v) => Ok(v.clone()),
            None => Err(error!(IllegalFunctionCall; "EMPTY LIST")),
        }
    }

    fn count(val: &Val) -> Result<usize> {
        let n = i64::try_from(val)?;
        if n < 0 {
            return Err(error!(IllegalFunctionCall; "NEGATIVE LENGTH"));
        }
        Ok(n as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(s: &str) -> Val {
        Val::String(s.to_string())
    }

    #[test]
    fn test_strings() {
        let hello = s("HELLO");
        assert_eq!(Function::mid(&hello, &Val::Integer(2), Some(&Val::Integer(3))).unwrap(), s("ELL"));
        assert_eq!(Function::mid(&hello, &Val::Integer(4), None).unwrap(), s("LO"));
        assert_eq!(Function::left(&hello, &Val::Integer(2)).unwrap(), s("HE"));
        assert_eq!(Function::right(&hello, &Val::Integer(9)).unwrap(), s("HELLO"));
        assert_eq!(Function::instr(&hello, &s("LL")).unwrap(), Val::Integer(3));
        assert_eq!(Function::instr(&hello, &s("Z")).unwrap(), Val::Integer(0));
        assert_eq!(Function::val(&s("2.5")).unwrap(), Val::Float(2.5));
        assert_eq!(Function::val(&s("abc")).unwrap(), Val::Integer(0));
    }

    #[test]
    fn test_math() {
        assert_eq!(Function::int(&Val::Float(-2.5)).unwrap(), Val::Integer(-3));
        assert_eq!(Function::abs(&Val::Integer(-4)).unwrap(), Val::Integer(4));
        assert_eq!(Function::sqrt(&Val::Integer(16)).unwrap(), Val::Float(4.0));
        assert!(Function::sqrt(&Val::Integer(-1)).is_err());
    }

    #[test]
    fn test_aggregates() {
        let v = vec![Val::Integer(3), Val::Float(1.5), Val::Integer(6)];
        assert_eq!(Function::sum(&v).unwrap(), Val::Float(10.5));
        assert_eq!(Function::avg(&v).unwrap(), Val::Float(3.5));
        assert_eq!(Function::min(&v).unwrap(), Val::Float(1.5));
        assert_eq!(Function::max(&v).unwrap(), Val::Integer(6));
        assert!(Function::max(&[]).is_err());
    }

    #[test]
    fn test_arity() {
        assert!(Function::check_arity(Builtin::Mid, &[s("a"), Val::Integer(1)]).is_ok());
        assert!(Function::check_arity(Builtin::Sin, &[]).is_err());
    }
}
