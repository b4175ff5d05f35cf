//! Errors for atom scanning, token extraction, date parsing, probing,
//! and the resolver that ties them together.

use std::fmt;

use crate::FourCC;

/// Atom scan errors.
#[derive(Debug)]
pub enum AtomError {
    /// Declared atom size is below the 8 byte header size.
    MalformedAtom{name: FourCC, size: u64, offset: u64},
    /// Stream (or scan bound) exhausted before the target atom was found.
    AtomNotFound(FourCC),
    /// Stream ended inside a read.
    Eof,
    /// 64-bit atom size (32-bit size set to `1`). Not supported.
    UnsupportedExtendedSize{name: FourCC, offset: u64},
    /// A field inside a located atom holds a value that can not be used,
    /// e.g. a zero time scale.
    InvalidField{name: FourCC, field: &'static str},
    /// Converted `binrw` error that is not an IO error.
    Decode(binrw::Error),
    /// IO error
    Io(std::io::Error),
}

impl std::error::Error for AtomError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AtomError::Decode(err) => Some(err),
            AtomError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for AtomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtomError::MalformedAtom{name, size, offset} => write!(f, "Malformed atom '{name}' @ offset {offset}: declared size {size} is less than 8 bytes."),
            AtomError::AtomNotFound(name) => write!(f, "No such atom '{name}'."),
            AtomError::Eof => write!(f, "Unexpected end of stream."),
            AtomError::UnsupportedExtendedSize{name, offset} => write!(f, "Atom '{name}' @ offset {offset} uses an unsupported 64-bit size."),
            AtomError::InvalidField{name, field} => write!(f, "Invalid value for '{field}' in atom '{name}'."),
            AtomError::Decode(err) => write!(f, "{err}"),
            AtomError::Io(err) => write!(f, "IO error: {err}"),
        }
    }
}

/// Converts std::io::Error to AtomError.
/// Unexpected EOF becomes `AtomError::Eof`.
impl From<std::io::Error> for AtomError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::UnexpectedEof => AtomError::Eof,
            _ => AtomError::Io(err),
        }
    }
}

/// Converts binrw::Error to AtomError.
/// Unexpected EOF, also when nested inside a decoded struct,
/// becomes `AtomError::Eof`.
impl From<binrw::Error> for AtomError {
    fn from(err: binrw::Error) -> Self {
        match err {
            binrw::Error::Io(err) => err.into(),
            other if other.is_eof() => AtomError::Eof,
            other => AtomError::Decode(other),
        }
    }
}

/// Token window errors.
#[derive(Debug)]
pub enum TokenError {
    /// Fewer non-empty tokens than required to reach `index`.
    TokenIndexOutOfRange{index: usize, available: usize},
    /// Stream ended before the full window could be read.
    ShortWindow{got: usize, expected: usize},
    /// IO error
    Io(std::io::Error),
}

impl std::error::Error for TokenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TokenError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::TokenIndexOutOfRange{index, available} => write!(f, "Token index {index} out of range, window contains {available} tokens."),
            TokenError::ShortWindow{got, expected} => write!(f, "Read {got} bytes, expected a {expected} byte token window."),
            TokenError::Io(err) => write!(f, "IO error: {err}"),
        }
    }
}

/// Converts std::io::Error to TokenError
impl From<std::io::Error> for TokenError {
    fn from(err: std::io::Error) -> Self {
        TokenError::Io(err)
    }
}

/// Fixed layout date/duration errors.
#[derive(Debug)]
pub enum FormatError {
    /// Input does not follow the literal layout.
    InvalidLayout{input: String, expected: &'static str},
    /// Layout is correct but a field holds an impossible value
    /// (month 13, minute 60, ...).
    OutOfRange{input: String, field: &'static str},
    /// Converted `time` formatting error.
    Formatting(time::error::Format),
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormatError::Formatting(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::InvalidLayout{input, expected} => write!(f, "'{input}' does not match layout '{expected}'."),
            FormatError::OutOfRange{input, field} => write!(f, "Value for '{field}' in '{input}' is out of range."),
            FormatError::Formatting(err) => write!(f, "{err}"),
        }
    }
}

/// Converts time::error::Format to FormatError
impl From<time::error::Format> for FormatError {
    fn from(err: time::error::Format) -> Self {
        FormatError::Formatting(err)
    }
}

/// Why running the external probe tool failed.
#[derive(Debug)]
pub enum ProcessFailure {
    /// Probe program could not be located.
    ToolNotFound{tool: String},
    /// Spawning or waiting on the process failed.
    Spawn(std::io::Error),
    /// Process exited with a non-zero status.
    /// `code` is `None` if terminated by a signal.
    Exit{code: Option<i32>, stderr: String},
    /// Process produced no output at all.
    EmptyOutput,
    /// Process did not finish within the timeout and was killed.
    Timeout(std::time::Duration),
}

impl std::error::Error for ProcessFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessFailure::Spawn(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for ProcessFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessFailure::ToolNotFound{tool} => write!(f, "Probe tool '{tool}' not found."),
            ProcessFailure::Spawn(err) => write!(f, "Failed to run probe tool: {err}"),
            ProcessFailure::Exit{code: Some(code), stderr} => write!(f, "Probe tool exited with status {code}: {stderr}"),
            ProcessFailure::Exit{code: None, stderr} => write!(f, "Probe tool terminated by signal: {stderr}"),
            ProcessFailure::EmptyOutput => write!(f, "Probe tool produced no output."),
            ProcessFailure::Timeout(limit) => write!(f, "Probe tool did not finish within {limit:?}."),
        }
    }
}

/// External probe errors.
#[derive(Debug)]
pub enum ProbeError {
    /// Running the probe tool failed.
    ProcessFailure(ProcessFailure),
    /// No line for the named field in the probe output.
    MissingField(&'static str),
    /// A matching line could not be parsed.
    Format(FormatError),
}

impl std::error::Error for ProbeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProbeError::ProcessFailure(failure) => Some(failure),
            ProbeError::Format(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::ProcessFailure(failure) => write!(f, "{failure}"),
            ProbeError::MissingField(field) => write!(f, "Probe output contains no '{field}' line."),
            ProbeError::Format(err) => write!(f, "Failed to parse probe output: {err}"),
        }
    }
}

impl From<ProcessFailure> for ProbeError {
    fn from(failure: ProcessFailure) -> Self {
        ProbeError::ProcessFailure(failure)
    }
}

impl From<FormatError> for ProbeError {
    fn from(err: FormatError) -> Self {
        ProbeError::Format(err)
    }
}

/// Errors returned when resolving time info for a video file.
#[derive(Debug)]
pub enum ResolveError {
    Atom(AtomError),
    Token(TokenError),
    Format(FormatError),
    Probe(ProbeError),
    /// Failed to open the video file.
    Io(std::io::Error),
}

impl std::error::Error for ResolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResolveError::Atom(err) => Some(err),
            ResolveError::Token(err) => Some(err),
            ResolveError::Format(err) => Some(err),
            ResolveError::Probe(err) => Some(err),
            ResolveError::Io(err) => Some(err),
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::Atom(err) => write!(f, "{err}"),
            ResolveError::Token(err) => write!(f, "{err}"),
            ResolveError::Format(err) => write!(f, "{err}"),
            ResolveError::Probe(err) => write!(f, "{err}"),
            ResolveError::Io(err) => write!(f, "IO error: {err}"),
        }
    }
}

impl From<AtomError> for ResolveError {
    fn from(err: AtomError) -> Self {
        ResolveError::Atom(err)
    }
}

impl From<TokenError> for ResolveError {
    fn from(err: TokenError) -> Self {
        ResolveError::Token(err)
    }
}

impl From<FormatError> for ResolveError {
    fn from(err: FormatError) -> Self {
        ResolveError::Format(err)
    }
}

impl From<ProbeError> for ResolveError {
    fn from(err: ProbeError) -> Self {
        ResolveError::Probe(err)
    }
}

impl From<std::io::Error> for ResolveError {
    fn from(err: std::io::Error) -> Self {
        ResolveError::Io(err)
    }
}
