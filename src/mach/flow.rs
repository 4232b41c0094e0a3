use super::{Stack, Val, Var};
use crate::error;
use crate::lang::Error;
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// What the driver does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Continue,
    End,
    /// Continue at this index into the program.
    Jump(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForFrame {
    pub var: String,
    pub end: i64,
    pub step: i64,
    /// Program index of the FOR. `None` for a direct-mode loop.
    pub for_line: Option<usize>,
}

impl ForFrame {
    pub fn continues(&self, value: i64) -> bool {
        if self.step >= 0 {
            value <= self.end
        } else {
            value >= self.end
        }
    }
}

/// ## Control-flow state
///
/// FOR frames, GOSUB return addresses and the PILOT match flag.

#[derive(Debug)]
pub struct Flow {
    fors: Stack<ForFrame>,
    calls: Stack<usize>,
    matched: bool,
    armed: bool,
}

impl Flow {
    pub fn new(limit: usize) -> Flow {
        Flow {
            fors: Stack::new("FOR STACK OVERFLOW", limit),
            calls: Stack::new("GOSUB STACK OVERFLOW", limit),
            matched: false,
            armed: false,
        }
    }

    pub fn clear(&mut self) {
        self.fors.clear();
        self.calls.clear();
        self.matched = false;
        self.armed = false;
    }

    pub fn for_depth(&self) -> usize {
        self.fors.len()
    }

    pub fn call_depth(&self) -> usize {
        self.calls.len()
    }

    /// A new frame replaces any active frame for the same variable.
    pub fn push_for(&mut self, frame: ForFrame) -> Result<()> {
        if let Some(idx) = self.fors.rposition(|f| f.var == frame.var) {
            self.fors.remove(idx);
        }
        self.fors.push(frame)
    }

    /// Advance the topmost frame, or the topmost frame for `name`.
    /// On completion only that frame is removed; frames above it stay.
    pub fn next(&mut self, name: Option<&str>, var: &mut Var) -> Result<Directive> {
        let idx = match name {
            None if self.fors.is_empty() => None,
            None => Some(self.fors.len() - 1),
            Some(name) => self.fors.rposition(|f| f.var == name),
        };
        let idx = match idx {
            Some(idx) => idx,
            None => return Err(error!(NextWithoutFor)),
        };
        let frame = match self.fors.get(idx) {
            Some(frame) => frame.clone(),
            None => return Err(error!(InternalError; "FOR FRAME")),
        };
        let current = match var.get(&frame.var) {
            Some(val) => i64::try_from(val)?,
            None => 0,
        };
        let value = match current.checked_add(frame.step) {
            Some(value) => value,
            None => return Err(error!(Overflow)),
        };
        var.store(&frame.var, Val::Integer(value));
        if frame.continues(value) {
            match frame.for_line {
                Some(line) => Ok(Directive::Jump(line + 1)),
                None => Ok(Directive::Continue),
            }
        } else {
            self.fors.remove(idx);
            Ok(Directive::Continue)
        }
    }

    pub fn gosub(&mut self, return_to: usize) -> Result<()> {
        self.calls.push(return_to)
    }

    pub fn r#return(&mut self) -> Option<usize> {
        self.calls.pop()
    }

    pub fn matched(&self) -> bool {
        self.matched
    }

    /// Set the match flag and arm the one-shot sentinel.
    pub fn set_match(&mut self, matched: bool) {
        self.matched = matched;
        self.armed = true;
    }

    /// The flag value if the sentinel was armed, disarming it.
    pub fn take_sentinel(&mut self) -> Option<bool> {
        if self.armed {
            self.armed = false;
            Some(self.matched)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(var: &str, end: i64, for_line: usize) -> ForFrame {
        ForFrame {
            var: var.to_string(),
            end,
            step: 1,
            for_line: Some(for_line),
        }
    }

    #[test]
    fn test_next_without_for() {
        let mut flow = Flow::new(16);
        let mut var = Var::new();
        assert_eq!(
            flow.next(None, &mut var).unwrap_err().to_string(),
            "NEXT without FOR"
        );
    }

    #[test]
    fn test_next_by_name_leaves_inner_frame() {
        let mut flow = Flow::new(16);
        let mut var = Var::new();
        var.store("I", Val::Integer(2));
        var.store("J", Val::Integer(1));
        flow.push_for(frame("I", 2, 0)).unwrap();
        flow.push_for(frame("J", 5, 1)).unwrap();
        assert_eq!(flow.next(Some("I"), &mut var).unwrap(), Directive::Continue);
        assert_eq!(flow.for_depth(), 1);
        assert_eq!(flow.next(None, &mut var).unwrap(), Directive::Jump(2));
        assert_eq!(var.get("J"), Some(&Val::Integer(2)));
    }

    #[test]
    fn test_for_replaces_same_variable() {
        let mut flow = Flow::new(16);
        flow.push_for(frame("I", 3, 0)).unwrap();
        flow.push_for(frame("I", 3, 4)).unwrap();
        assert_eq!(flow.for_depth(), 1);
    }

    #[test]
    fn test_sentinel_is_one_shot() {
        let mut flow = Flow::new(16);
        assert_eq!(flow.take_sentinel(), None);
        flow.set_match(false);
        assert_eq!(flow.take_sentinel(), Some(false));
        assert_eq!(flow.take_sentinel(), None);
        assert!(!flow.matched());
    }

    #[test]
    fn test_call_stack_is_lifo() {
        let mut flow = Flow::new(16);
        flow.gosub(3).unwrap();
        flow.gosub(7).unwrap();
        assert_eq!(flow.r#return(), Some(7));
        assert_eq!(flow.r#return(), Some(3));
        assert_eq!(flow.r#return(), None);
    }
}
