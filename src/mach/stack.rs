use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Stack enforced and size limited vector

pub struct Stack<T> {
    overflow_message: &'static str,
    limit: usize,
    vec: Vec<T>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.vec)
    }
}

impl<T> Stack<T> {
    pub fn new(overflow_message: &'static str, limit: usize) -> Stack<T> {
        Stack {
            overflow_message,
            limit,
            vec: vec![],
        }
    }
    pub fn clear(&mut self) {
        self.vec.clear()
    }
    pub fn len(&self) -> usize {
        self.vec.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }
    pub fn get(&self, idx: usize) -> Option<&T> {
        self.vec.get(idx)
    }
    pub fn push(&mut self, val: T) -> Result<()> {
        if self.vec.len() >= self.limit {
            return Err(error!(OutOfMemory; self.overflow_message));
        }
        self.vec.push(val);
        Ok(())
    }
    pub fn pop(&mut self) -> Option<T> {
        self.vec.pop()
    }
    pub fn remove(&mut self, idx: usize) -> T {
        self.vec.remove(idx)
    }
    /// Index of the topmost element matching `f`.
    pub fn rposition<F>(&self, f: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        self.vec.iter().rposition(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit() {
        let mut s = Stack::new("STACK FULL", 2);
        assert!(s.push(1).is_ok());
        assert!(s.push(2).is_ok());
        let e = s.push(3).unwrap_err();
        assert_eq!(e.to_string(), "Out of memory; STACK FULL");
        assert_eq!(s.pop(), Some(2));
    }

    #[test]
    fn test_rposition() {
        let mut s = Stack::new("", 8);
        for n in &[1, 2, 1, 3] {
            s.push(*n).unwrap();
        }
        assert_eq!(s.rposition(|n| *n == 1), Some(2));
        assert_eq!(s.rposition(|n| *n == 9), None);
    }
}
