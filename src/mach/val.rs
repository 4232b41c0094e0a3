use crate::error;
use crate::lang::Error;
use std::collections::BTreeMap;
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// ## Dynamically typed value

#[derive(Debug, Clone, PartialEq)]
pub enum Val {
    Integer(i64),
    Float(f64),
    String(String),
    Array(Array),
}

impl Default for Val {
    fn default() -> Val {
        Val::Integer(0)
    }
}

impl Val {
    /// Numbers are true when non-zero, strings when they read `true` or `1`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Val::Integer(n) => *n != 0,
            Val::Float(n) => *n != 0.0,
            Val::String(s) => {
                let s = s.trim();
                s.eq_ignore_ascii_case("true") || s == "1"
            }
            Val::Array(_) => false,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Val::Integer(_) | Val::Float(_))
    }

    pub fn from_bool(b: bool) -> Val {
        Val::Integer(if b { 1 } else { 0 })
    }

    /// Text typed by a user becomes a number when it looks like one.
    pub fn from_input(s: &str) -> Val {
        let t = s.trim();
        if let Ok(n) = t.parse::<i64>() {
            return Val::Integer(n);
        }
        match t.parse::<f64>() {
            Ok(n) if n.is_finite() => Val::Float(n),
            _ => Val::String(t.to_string()),
        }
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Val::Integer(n) => write!(f, "{}", n),
            Val::Float(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Val::String(s) => write!(f, "{}", s),
            Val::Array(a) => {
                write!(f, "[")?;
                for (i, v) in a.values().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl TryFrom<&Val> for f64 {
    type Error = Error;
    fn try_from(val: &Val) -> Result<f64> {
        match val {
            Val::Integer(n) => Ok(*n as f64),
            Val::Float(n) => Ok(*n),
            Val::String(_) | Val::Array(_) => Err(error!(TypeMismatch)),
        }
    }
}

impl TryFrom<&Val> for i64 {
    type Error = Error;
    fn try_from(val: &Val) -> Result<i64> {
        match val {
            Val::Integer(n) => Ok(*n),
            Val::Float(n) => {
                let n = n.trunc();
                if n.is_finite() && n >= i64::min_value() as f64 && n <= i64::max_value() as f64 {
                    Ok(n as i64)
                } else {
                    Err(error!(Overflow))
                }
            }
            Val::String(_) | Val::Array(_) => Err(error!(TypeMismatch)),
        }
    }
}

impl TryFrom<&Val> for usize {
    type Error = Error;
    fn try_from(val: &Val) -> Result<usize> {
        let n = i64::try_from(val)?;
        if n < 0 {
            return Err(error!(SubscriptOutOfRange; format!("NEGATIVE INDEX {}", n)));
        }
        Ok(n as usize)
    }
}

/// ## Sparse array
///
/// Elements live in an ordered map keyed by index. Nested arrays give
/// extra dimensions. Missing elements read as absent, callers pick the
/// default.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Array(BTreeMap<usize, Val>);

impl Array {
    pub fn new() -> Array {
        Array::default()
    }

    pub fn from_vec(values: Vec<Val>) -> Array {
        Array(values.into_iter().enumerate().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Val> {
        self.0.get(&index)
    }

    pub fn get_path(&self, path: &[usize]) -> Option<&Val> {
        let (first, rest) = path.split_first()?;
        let val = self.0.get(first)?;
        if rest.is_empty() {
            return Some(val);
        }
        match val {
            Val::Array(inner) => inner.get_path(rest),
            _ => None,
        }
    }

    /// Store at `path`, creating nested arrays on the way down.
    pub fn set_path(&mut self, path: &[usize], value: Val) {
        let (first, rest) = match path.split_first() {
            Some(split) => split,
            None => return,
        };
        if rest.is_empty() {
            self.0.insert(*first, value);
            return;
        }
        let slot = self
            .0
            .entry(*first)
            .or_insert_with(|| Val::Array(Array::new()));
        if !matches!(slot, Val::Array(_)) {
            *slot = Val::Array(Array::new());
        }
        if let Val::Array(inner) = slot {
            inner.set_path(rest, value);
        }
    }

    pub fn values(&self) -> impl Iterator<Item = &Val> {
        self.0.values()
    }

    /// Index of the first element equal to `needle`.
    pub fn find(&self, needle: &Val) -> Option<usize> {
        self.0
            .iter()
            .find(|(_, v)| super::Operation::equal(v, needle))
            .map(|(i, _)| *i)
    }

    /// Sort values and renumber them from zero. Numbers sort before strings.
    pub fn sort(&mut self) {
        let mut values: Vec<Val> = std::mem::take(&mut self.0).into_values().collect();
        values.sort_by(|a, b| match (a, b) {
            (Val::String(a), Val::String(b)) => a.cmp(b),
            (Val::String(_), _) => std::cmp::Ordering::Greater,
            (_, Val::String(_)) => std::cmp::Ordering::Less,
            (a, b) => {
                let a = f64::try_from(a).unwrap_or(0.0);
                let b = f64::try_from(b).unwrap_or(0.0);
                a.partial_cmp(&b).unwrap_or(std::cmp::Ordering::Equal)
            }
        });
        *self = Array::from_vec(values);
    }

    pub fn shuffle<R: rand::Rng>(&mut self, rng: &mut R) {
        use rand::seq::SliceRandom;
        let mut values: Vec<Val> = std::mem::take(&mut self.0).into_values().collect();
        values.shuffle(rng);
        *self = Array::from_vec(values);
    }
}
