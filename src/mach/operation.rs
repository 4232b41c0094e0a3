use super::Val;
use crate::error;
use crate::lang::Error;
use std::cmp::Ordering;
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// ## Operators over values
///
/// Integer arithmetic that overflows continues in floating point.
/// Division always yields a float.

pub struct Operation {}

impl Operation {
    pub fn negate(val: Val) -> Result<Val> {
        use Val::*;
        match val {
            Integer(n) => match n.checked_neg() {
                Some(n) => Ok(Integer(n)),
                None => Ok(Float(-(n as f64))),
            },
            Float(n) => Ok(Float(-n)),
            String(_) | Array(_) => Err(error!(TypeMismatch)),
        }
    }

    pub fn not(val: Val) -> Result<Val> {
        match val {
            Val::Array(_) => Err(error!(TypeMismatch)),
            _ => Ok(Val::from_bool(!val.is_truthy())),
        }
    }

    pub fn power(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        if let (Integer(l), Integer(r)) = (&lhs, &rhs) {
            if *r >= 0 && *r <= u32::max_value() as i64 {
                if let Some(n) = l.checked_pow(*r as u32) {
                    return Ok(Integer(n));
                }
            }
        }
        let (l, r) = Operation::floats(&lhs, &rhs)?;
        Ok(Float(l.powf(r)))
    }

    pub fn multiply(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (&lhs, &rhs) {
            (Integer(l), Integer(r)) => match l.checked_mul(*r) {
                Some(i) => Ok(Integer(i)),
                None => Ok(Float(*l as f64 * *r as f64)),
            },
            _ => {
                let (l, r) = Operation::floats(&lhs, &rhs)?;
                Ok(Float(l * r))
            }
        }
    }

    pub fn divide(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::floats(&lhs, &rhs)?;
        if r == 0.0 {
            return Err(error!(DivisionByZero));
        }
        Ok(Val::Float(l / r))
    }

    pub fn modulus(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (&lhs, &rhs) {
            (Integer(_), Integer(0)) => Err(error!(DivisionByZero)),
            (Integer(l), Integer(r)) => Ok(Integer(l.checked_rem(*r).unwrap_or(0))),
            _ => {
                let (l, r) = Operation::floats(&lhs, &rhs)?;
                if r == 0.0 {
                    return Err(error!(DivisionByZero));
                }
                Ok(Float(l % r))
            }
        }
    }

    /// `+` adds numbers and concatenates when either side is a string.
    pub fn sum(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Array(_), _) | (_, Array(_)) => Err(error!(TypeMismatch)),
            (String(l), r) => Ok(String(l + &r.to_string())),
            (l, String(r)) => Ok(String(l.to_string() + &r)),
            (Integer(l), Integer(r)) => match l.checked_add(r) {
                Some(i) => Ok(Integer(i)),
                None => Ok(Float(l as f64 + r as f64)),
            },
            (l, r) => {
                let (l, r) = Operation::floats(&l, &r)?;
                Ok(Float(l + r))
            }
        }
    }

    pub fn subtract(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (&lhs, &rhs) {
            (Integer(l), Integer(r)) => match l.checked_sub(*r) {
                Some(i) => Ok(Integer(i)),
                None => Ok(Float(*l as f64 - *r as f64)),
            },
            _ => {
                let (l, r) = Operation::floats(&lhs, &rhs)?;
                Ok(Float(l - r))
            }
        }
    }

    pub fn equal(lhs: &Val, rhs: &Val) -> bool {
        match Operation::compare(lhs, rhs) {
            Ok(ordering) => ordering == Ordering::Equal,
            Err(_) => false,
        }
    }

    pub fn compare(lhs: &Val, rhs: &Val) -> Result<Ordering> {
        use Val::*;
        match (lhs, rhs) {
            (String(l), String(r)) => Ok(l.cmp(r)),
            (Integer(l), Integer(r)) => Ok(l.cmp(r)),
            (String(_), _) | (_, String(_)) | (Array(_), _) | (_, Array(_)) => {
                Err(error!(TypeMismatch))
            }
            _ => {
                let (l, r) = Operation::floats(lhs, rhs)?;
                l.partial_cmp(&r).ok_or_else(|| error!(IllegalFunctionCall; "NAN"))
            }
        }
    }

    pub fn less(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::from_bool(Operation::compare(&lhs, &rhs)? == Ordering::Less))
    }

    pub fn less_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::from_bool(Operation::compare(&lhs, &rhs)? != Ordering::Greater))
    }

    pub fn greater(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::from_bool(Operation::compare(&lhs, &rhs)? == Ordering::Greater))
    }

    pub fn greater_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::from_bool(Operation::compare(&lhs, &rhs)? != Ordering::Less))
    }

    /// Values of different types are never equal.
    pub fn equal_to(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::from_bool(Operation::equal(&lhs, &rhs)))
    }

    pub fn not_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::from_bool(!Operation::equal(&lhs, &rhs)))
    }

    pub fn and(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::from_bool(lhs.is_truthy() && rhs.is_truthy()))
    }

    pub fn or(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::from_bool(lhs.is_truthy() || rhs.is_truthy()))
    }

    fn floats(lhs: &Val, rhs: &Val) -> Result<(f64, f64)> {
        Ok((f64::try_from(lhs)?, f64::try_from(rhs)?))
    }
}
