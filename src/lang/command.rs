use super::ast::Expression;
use super::split::*;
use super::{parse, Error};
use crate::error;

type Result<T> = std::result::Result<T, Error>;

/// A classified source line.
///
/// Classification happens once, when a line is entered or loaded. The
/// runtime then matches on the variant instead of re-examining prefixes.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Nop,
    Assign(Target, Rhs),
    Pilot(Pilot),
    Print(String),
    Input(String),
    If(String, String, Option<String>),
    For(String, String, String, Option<String>),
    Next(Option<String>),
    Goto(String),
    Gosub(String),
    Return,
    Dim(String),
    End,
    Turtle(Turtle, String),
    Repeat(String, String),
    Define(String, String),
    Call(String),
    Builtin(Builtin, String),
    Unknown(String),
    Invalid(Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub name: String,
    pub index: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rhs {
    List(Vec<Expression>),
    Expr(Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pilot {
    pub op: PilotOp,
    pub cond: Conditioner,
    pub text: String,
}

/// Optional guard in front of the colon: `T(X>1):`, `TY:` or `TN:`.
#[derive(Debug, Clone, PartialEq)]
pub enum Conditioner {
    Always,
    Yes,
    No,
    Expr(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PilotOp {
    Type,
    Accept,
    Yes,
    No,
    Jump,
    Match,
    MatchText,
    Compute,
    Use,
    End,
    Label,
    Runtime,
    File,
    Web,
    Database,
    Str,
    DateTime,
    Game,
    Audio,
    Math,
    Branch,
    Multimedia,
    Storage,
}

impl PilotOp {
    pub fn from_name(s: &str) -> Option<PilotOp> {
        use PilotOp::*;
        Some(match s {
            "T" => Type,
            "A" => Accept,
            "Y" => Yes,
            "N" => No,
            "J" => Jump,
            "M" => Match,
            "MT" => MatchText,
            "C" => Compute,
            "U" => Use,
            "E" => End,
            "L" => Label,
            "R" => Runtime,
            "F" => File,
            "W" => Web,
            "D" => Database,
            "S" => Str,
            "DT" => DateTime,
            "GAME" => Game,
            "AUDIO" => Audio,
            "MATH" => Math,
            "BRANCH" => Branch,
            "MULTIMEDIA" => Multimedia,
            "STORAGE" => Storage,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turtle {
    Forward,
    Back,
    Left,
    Right,
    PenUp,
    PenDown,
    ClearScreen,
    Home,
    SetXY,
    SetColor,
    SetPenSize,
    Circle,
    Dot,
    Rect,
    Text,
    ShowTurtle,
    HideTurtle,
}

impl Turtle {
    pub fn from_word(s: &str) -> Option<Turtle> {
        use Turtle::*;
        Some(match s {
            "FORWARD" | "FD" => Forward,
            "BACK" | "BK" => Back,
            "LEFT" | "LT" => Left,
            "RIGHT" | "RT" => Right,
            "PENUP" | "PU" => PenUp,
            "PENDOWN" | "PD" => PenDown,
            "CLEARSCREEN" | "CS" => ClearScreen,
            "HOME" => Home,
            "SETXY" => SetXY,
            "SETCOLOR" => SetColor,
            "SETPENSIZE" => SetPenSize,
            "CIRCLE" => Circle,
            "DOT" => Dot,
            "RECT" => Rect,
            "TEXT" => Text,
            "SHOWTURTLE" | "ST" => ShowTurtle,
            "HIDETURTLE" | "HT" => HideTurtle,
            _ => return None,
        })
    }

    /// Number of whitespace tokens the verb takes inside a Logo body.
    pub fn arity(self) -> usize {
        use Turtle::*;
        match self {
            PenUp | PenDown | ClearScreen | Home | Dot | ShowTurtle | HideTurtle => 0,
            Forward | Back | Left | Right | SetColor | SetPenSize | Circle | Text => 1,
            SetXY | Rect => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Sin,
    Cos,
    Tan,
    Sqrt,
    Abs,
    Int,
    Rnd,
    Len,
    Mid,
    Left,
    Right,
    Instr,
    Str,
    Val,
    Upper,
    Lower,
    Sort,
    Find,
    Sum,
    Avg,
    Min,
    Max,
    Line,
    Box,
    Triangle,
    Ellipse,
    Fill,
    Beep,
    Play,
    Sound,
    Note,
    Open,
    Close,
    Read,
    Write,
    Eof,
}

impl Builtin {
    pub fn from_word(s: &str) -> Option<Builtin> {
        use Builtin::*;
        Some(match s {
            "SIN" => Sin,
            "COS" => Cos,
            "TAN" => Tan,
            "SQRT" => Sqrt,
            "ABS" => Abs,
            "INT" => Int,
            "RND" => Rnd,
            "LEN" => Len,
            "MID" => Mid,
            "LEFT" => Left,
            "RIGHT" => Right,
            "INSTR" => Instr,
            "STR" => Str,
            "VAL" => Val,
            "UPPER" => Upper,
            "LOWER" => Lower,
            "SORT" => Sort,
            "FIND" => Find,
            "SUM" => Sum,
            "AVG" => Avg,
            "MIN" => Min,
            "MAX" => Max,
            "LINE" => Line,
            "BOX" => Box,
            "TRIANGLE" => Triangle,
            "ELLIPSE" => Ellipse,
            "FILL" => Fill,
            "BEEP" => Beep,
            "PLAY" => Play,
            "SOUND" => Sound,
            "NOTE" => Note,
            "OPEN" => Open,
            "CLOSE" => Close,
            "READ" => Read,
            "WRITE" => Write,
            "EOF" => Eof,
            _ => return None,
        })
    }
}

const KEYWORDS: &[&str] = &[
    "LET", "PRINT", "INPUT", "IF", "FOR", "NEXT", "GOTO", "GOSUB", "RETURN", "DIM", "END",
    "REM", "REPEAT", "DEFINE", "CALL", "THEN", "ELSE", "TO", "STEP",
];

impl Command {
    pub fn parse(source: &str) -> Command {
        let s = source.trim();
        if s.is_empty() || s.starts_with('\'') {
            return Command::Nop;
        }
        if let Some(rest) = s.strip_prefix('?') {
            return Command::Print(rest.trim().to_string());
        }
        if let Some(command) = Command::assignment(s) {
            return command;
        }
        if let Some(command) = Command::pilot(s) {
            return command;
        }
        let (word, rest) = leading_word(s);
        let upper = word.to_ascii_uppercase();
        if upper.starts_with("REM") {
            return Command::Nop;
        }
        if let Some(command) = Command::basic(&upper, rest) {
            return command;
        }
        if let Some(command) = Command::logo(&upper, rest) {
            return command;
        }
        match upper.as_str() {
            "DEFINE" => return Command::define(rest),
            "CALL" => return Command::Call(rest.to_string()),
            _ => {}
        }
        if let Some(builtin) = Builtin::from_word(&upper) {
            return Command::Builtin(builtin, rest.to_string());
        }
        Command::Unknown(s.to_string())
    }

    /// The label name if this is an `L:` line.
    pub fn label(&self) -> Option<&str> {
        match self {
            Command::Pilot(Pilot {
                op: PilotOp::Label,
                text,
                ..
            }) => Some(text.as_str()),
            _ => None,
        }
    }

    fn assignment(s: &str) -> Option<Command> {
        let eq = find_assignment(s)?;
        let lhs = s[..eq].trim();
        let rhs = s[eq + 1..].trim();
        let name_end = lhs.find(|c: char| c == '(' || c == '[').unwrap_or_else(|| lhs.len());
        let name = lhs[..name_end].trim_end();
        if !is_identifier(name) {
            return None;
        }
        if KEYWORDS.iter().any(|k| name.eq_ignore_ascii_case(k)) {
            return None;
        }
        if name_end < lhs.len() && !(lhs.ends_with(')') || lhs.ends_with(']')) {
            return None;
        }
        Some(match Command::assign(lhs, rhs) {
            Ok(command) => command,
            Err(error) => Command::Invalid(error),
        })
    }

    fn assign(lhs: &str, rhs: &str) -> Result<Command> {
        let target = match parse(lhs)? {
            Expression::Var(name) => Target {
                name,
                index: vec![],
            },
            Expression::Index(name, index) => Target { name, index },
            _ => return Err(error!(SyntaxError; "EXPECTED VARIABLE")),
        };
        if rhs.is_empty() {
            return Err(error!(SyntaxError; "EXPECTED EXPRESSION"));
        }
        if rhs.starts_with('[') && rhs.ends_with(']') {
            let items = split_top(&rhs[1..rhs.len() - 1], ',')
                .into_iter()
                .map(Command::list_item)
                .collect();
            return Ok(Command::Assign(target, Rhs::List(items)));
        }
        Ok(Command::Assign(target, Rhs::Expr(parse(rhs)?)))
    }

    fn list_item(s: &str) -> Expression {
        if let Ok(n) = s.parse::<i64>() {
            return Expression::Integer(n);
        }
        if let Ok(n) = s.parse::<f64>() {
            return Expression::Float(n);
        }
        Expression::String(unquote(s).to_string())
    }

    fn pilot(s: &str) -> Option<Command> {
        let colon = find_top(s, ':')?;
        let prefix = s[..colon].trim();
        let text = s[colon + 1..].trim().to_string();
        let (name, cond) = match prefix.find('(') {
            Some(open) if prefix.ends_with(')') => (
                &prefix[..open],
                Conditioner::Expr(prefix[open + 1..prefix.len() - 1].trim().to_string()),
            ),
            Some(_) => return None,
            None => (prefix, Conditioner::Always),
        };
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        let upper = name.to_ascii_uppercase();
        if let Some(op) = PilotOp::from_name(&upper) {
            return Some(Command::Pilot(Pilot { op, cond, text }));
        }
        let (head, tail) = upper.split_at(upper.len() - 1);
        let op = PilotOp::from_name(head)?;
        let cond = match (tail, cond) {
            ("Y", Conditioner::Always) => Conditioner::Yes,
            ("N", Conditioner::Always) => Conditioner::No,
            _ => return None,
        };
        Some(Command::Pilot(Pilot { op, cond, text }))
    }

    fn basic(word: &str, rest: &str) -> Option<Command> {
        Some(match word {
            "LET" => Command::assignment(rest).unwrap_or_else(|| {
                Command::Invalid(error!(SyntaxError; "EXPECTED ASSIGNMENT"))
            }),
            "PRINT" => Command::Print(rest.to_string()),
            "INPUT" => Command::Input(rest.to_string()),
            "IF" => Command::r#if(rest),
            "FOR" => Command::r#for(rest),
            "NEXT" => Command::Next(if rest.is_empty() {
                None
            } else {
                Some(rest.to_string())
            }),
            "GOTO" => Command::Goto(rest.to_string()),
            "GOSUB" => Command::Gosub(rest.to_string()),
            "RETURN" => Command::Return,
            "DIM" => Command::Dim(rest.to_string()),
            "END" => Command::End,
            _ => return None,
        })
    }

    fn r#if(rest: &str) -> Command {
        let then = match find_keyword(rest, "THEN") {
            Some(range) => range,
            None => return Command::Invalid(error!(SyntaxError; "EXPECTED THEN")),
        };
        let cond = rest[..then.start].trim();
        if cond.is_empty() {
            return Command::Invalid(error!(SyntaxError; "EXPECTED CONDITION"));
        }
        let tail = &rest[then.end..];
        let (yes, no) = match find_keyword(tail, "ELSE") {
            Some(r) => (tail[..r.start].trim(), Some(tail[r.end..].trim().to_string())),
            None => (tail.trim(), None),
        };
        Command::If(cond.to_string(), yes.to_string(), no)
    }

    fn r#for(rest: &str) -> Command {
        let eq = match find_assignment(rest) {
            Some(eq) => eq,
            None => return Command::Invalid(error!(SyntaxError; "EXPECTED =")),
        };
        let var = rest[..eq].trim();
        if !is_identifier(var) {
            return Command::Invalid(error!(SyntaxError; "EXPECTED VARIABLE"));
        }
        let tail = &rest[eq + 1..];
        let to = match find_keyword(tail, "TO") {
            Some(to) => to,
            None => return Command::Invalid(error!(SyntaxError; "EXPECTED TO")),
        };
        let from = tail[..to.start].trim();
        let after = &tail[to.end..];
        let (end, step) = match find_keyword(after, "STEP") {
            Some(st) => (after[..st.start].trim(), Some(after[st.end..].trim().to_string())),
            None => (after.trim(), None),
        };
        Command::For(var.to_string(), from.to_string(), end.to_string(), step)
    }

    fn logo(word: &str, rest: &str) -> Option<Command> {
        if word == "REPEAT" {
            return Some(match rest.find('[') {
                Some(open) => Command::Repeat(
                    rest[..open].trim().to_string(),
                    unbracket(&rest[open..]).to_string(),
                ),
                None => Command::Invalid(error!(SyntaxError; "EXPECTED [")),
            });
        }
        let verb = Turtle::from_word(word)?;
        // LEFT s$, n and RIGHT s$, n are the string functions.
        if (word == "LEFT" || word == "RIGHT") && split_top(rest, ',').len() > 1 {
            return None;
        }
        Some(Command::Turtle(verb, rest.to_string()))
    }

    fn define(rest: &str) -> Command {
        let (name, body) = match rest.find(char::is_whitespace) {
            Some(i) => (&rest[..i], rest[i..].trim()),
            None => (rest, ""),
        };
        if !is_identifier(name) {
            return Command::Invalid(error!(SyntaxError; "EXPECTED MACRO NAME"));
        }
        Command::Define(name.to_string(), unbracket(body).to_string())
    }
}
