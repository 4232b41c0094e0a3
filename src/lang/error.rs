use super::LineNumber;

/// One recoverable statement failure. Carries the code, the program line
/// it happened in (if any) and an optional detail message.
#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    line_number: LineNumber,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, $line:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line_number: None,
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    pub fn line_number(&self) -> LineNumber {
        self.line_number
    }

    pub fn is_direct(&self) -> bool {
        self.line_number.is_none()
    }

    pub fn in_line_number(self, line: LineNumber) -> Error {
        Error {
            line_number: line,
            ..self
        }
    }

    pub fn message<S: Into<String>>(self, message: S) -> Error {
        Error {
            message: message.into(),
            ..self
        }
    }
}

/// The four recovery classes every error falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Expression,
    ControlFlow,
    Io,
    UnknownCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NextWithoutFor = 1,
    SyntaxError = 2,
    IllegalFunctionCall = 5,
    Overflow = 6,
    OutOfMemory = 7,
    UndefinedLine = 8,
    SubscriptOutOfRange = 9,
    DivisionByZero = 11,
    TypeMismatch = 13,
    UnknownIdentifier = 24,
    UndefinedLabel = 25,
    UndefinedMacro = 26,
    UnknownCommand = 27,
    Break = 28,
    InternalError = 51,
    BadFileNumber = 52,
    FileNotFound = 53,
    BadFileMode = 54,
    DiskIoError = 57,
    InputPastEnd = 62,
    NetworkError = 70,
}

impl ErrorCode {
    pub fn kind(self) -> ErrorKind {
        use ErrorCode::*;
        match self {
            SyntaxError | IllegalFunctionCall | Overflow | SubscriptOutOfRange
            | DivisionByZero | TypeMismatch | UnknownIdentifier | InternalError => {
                ErrorKind::Expression
            }
            NextWithoutFor | OutOfMemory | UndefinedLine | UndefinedLabel | UndefinedMacro
            | Break => ErrorKind::ControlFlow,
            BadFileNumber | FileNotFound | BadFileMode | DiskIoError | InputPastEnd
            | NetworkError => ErrorKind::Io,
            UnknownCommand => ErrorKind::UnknownCommand,
        }
    }

    fn as_str(self) -> &'static str {
        use ErrorCode::*;
        match self {
            NextWithoutFor => "NEXT without FOR",
            SyntaxError => "Syntax error",
            IllegalFunctionCall => "Illegal function call",
            Overflow => "Overflow",
            OutOfMemory => "Out of memory",
            UndefinedLine => "Undefined line",
            SubscriptOutOfRange => "Subscript out of range",
            DivisionByZero => "Division by zero",
            TypeMismatch => "Type mismatch",
            UnknownIdentifier => "Unknown identifier",
            UndefinedLabel => "Undefined label",
            UndefinedMacro => "Undefined macro",
            UnknownCommand => "Unknown command",
            Break => "Break",
            InternalError => "Internal error",
            BadFileNumber => "Bad file number",
            FileNotFound => "File not found",
            BadFileMode => "Bad file mode",
            DiskIoError => "Disk I/O error",
            InputPastEnd => "Input past end",
            NetworkError => "Network error",
        }
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.code.as_str())?;
        if let Some(line_number) = self.line_number {
            write!(f, " in {}", line_number)?;
        }
        if !self.message.is_empty() {
            write!(f, "; {}", self.message)?;
        }
        Ok(())
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Error {
        use std::io::ErrorKind::*;
        let msg = error.to_string();
        match error.kind() {
            NotFound => error!(FileNotFound; msg),
            UnexpectedEof => error!(InputPastEnd; msg),
            _ => error!(DiskIoError; msg),
        }
    }
}
