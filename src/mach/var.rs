use super::{Array, Val};
use crate::error;
use crate::lang::Error;
use std::collections::HashMap;

type Result<T> = std::result::Result<T, Error>;

/// Where built-in functions leave their value.
pub const RESULT: &str = "RESULT";

/// ## Variable memory
///
/// One global, case-sensitive namespace.

#[derive(Debug, Default)]
pub struct Var {
    vars: HashMap<String, Val>,
}

impl Var {
    pub fn new() -> Var {
        Var::default()
    }

    pub fn clear(&mut self) {
        self.vars.clear();
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn get(&self, var_name: &str) -> Option<&Val> {
        self.vars.get(var_name)
    }

    pub fn contains(&self, var_name: &str) -> bool {
        self.vars.contains_key(var_name)
    }

    pub fn fetch(&self, var_name: &str) -> Result<Val> {
        match self.vars.get(var_name) {
            Some(val) => Ok(val.clone()),
            None => Err(error!(UnknownIdentifier; var_name)),
        }
    }

    /// Read an element. Unset elements read as zero, or as an empty
    /// string when the array name ends in `$`.
    pub fn fetch_index(&self, var_name: &str, path: &[usize]) -> Result<Val> {
        let array = self.array(var_name)?;
        match array.get_path(path) {
            Some(val) => Ok(val.clone()),
            None if var_name.ends_with('$') => Ok(Val::String(String::new())),
            None => Ok(Val::Integer(0)),
        }
    }

    pub fn store(&mut self, var_name: &str, value: Val) {
        match self.vars.get_mut(var_name) {
            Some(var) => *var = value,
            None => {
                self.vars.insert(var_name.to_string(), value);
            }
        }
    }

    /// Store an element, creating the array (or replacing a scalar) as needed.
    pub fn store_index(&mut self, var_name: &str, path: &[usize], value: Val) {
        let slot = self
            .vars
            .entry(var_name.to_string())
            .or_insert_with(|| Val::Array(Array::new()));
        if !matches!(slot, Val::Array(_)) {
            *slot = Val::Array(Array::new());
        }
        if let Val::Array(array) = slot {
            array.set_path(path, value);
        }
    }

    pub fn store_result(&mut self, value: Val) {
        self.store(RESULT, value)
    }

    pub fn dimension(&mut self, var_name: &str) {
        self.store(var_name, Val::Array(Array::new()))
    }

    pub fn array(&self, var_name: &str) -> Result<&Array> {
        match self.vars.get(var_name) {
            Some(Val::Array(array)) => Ok(array),
            Some(_) => Err(error!(TypeMismatch; format!("{} IS NOT AN ARRAY", var_name))),
            None => Err(error!(UnknownIdentifier; var_name)),
        }
    }

    pub fn array_mut(&mut self, var_name: &str) -> Result<&mut Array> {
        match self.vars.get_mut(var_name) {
            Some(Val::Array(array)) => Ok(array),
            Some(_) => Err(error!(TypeMismatch; format!("{} IS NOT AN ARRAY", var_name))),
            None => Err(error!(UnknownIdentifier; var_name)),
        }
    }

    /// Variables sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Val)> {
        let mut names: Vec<&String> = self.vars.keys().collect();
        names.sort();
        names
            .into_iter()
            .filter_map(move |name| self.vars.get(name).map(|val| (name.as_str(), val)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_identifier() {
        let var = Var::new();
        assert_eq!(
            var.fetch("X").unwrap_err().code(),
            crate::lang::ErrorCode::UnknownIdentifier
        );
    }

    #[test]
    fn test_case_sensitive() {
        let mut var = Var::new();
        var.store("x", Val::Integer(1));
        assert!(var.get("X").is_none());
        assert_eq!(var.fetch("x").unwrap(), Val::Integer(1));
    }

    #[test]
    fn test_array_defaults() {
        let mut var = Var::new();
        var.store_index("A", &[3], Val::Integer(9));
        var.dimension("N$");
        assert_eq!(var.fetch_index("A", &[3]).unwrap(), Val::Integer(9));
        assert_eq!(var.fetch_index("A", &[1000]).unwrap(), Val::Integer(0));
        assert_eq!(
            var.fetch_index("N$", &[0]).unwrap(),
            Val::String(String::new())
        );
    }

    #[test]
    fn test_iter_sorted() {
        let mut var = Var::new();
        var.store("B", Val::Integer(2));
        var.store("A", Val::Integer(1));
        let names: Vec<&str> = var.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["A", "B"]);
    }
}
