//! ASCII command protocol between a host and the keyboard.
//!
//! Frames are delimited by `\n` or `\r`:
//! ```text
//! <prefix:2> <action:1> <payload...> <'\n' | '\r'>
//! ```
//! The only action defined is `L` (layer control), whose payload is
//! `<op: S | R | T> <decimal digits>`, e.g. `KBLS1` turns layer 1 on.
//!
//! Every frame is answered with `OK\n` or `ERR:<d>\n`.
use heapless::Vec;

/// Frame marker expected in the first two bytes of every command
pub const FRAME_PREFIX: [u8; 2] = *b"KB";

/// Action code for layer control commands
pub const ACTION_LAYER: u8 = b'L';

/// Shortest valid frame: prefix plus action code
pub const MIN_FRAME_LEN: usize = 3;

/// Acknowledgement sent for every successful command
pub const OK_RESPONSE: [u8; 3] = *b"OK\n";

/// Length of an `ERR:<d>\n` record
pub const ERR_RESPONSE_LEN: usize = 6;

/// Longest response on the wire
pub const MAX_RESPONSE_LEN: usize = ERR_RESPONSE_LEN;

/// Buffer type for an encoded response
pub type ResponseBuffer = Vec<u8, MAX_RESPONSE_LEN>;

/// Firmware version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// True for the bytes that terminate a frame.
pub fn is_delimiter(byte: u8) -> bool {
    byte == b'\n' || byte == b'\r'
}

/// Error codes reported to the host as `ERR:<code>\n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorCode {
    /// Malformed header or frame too short
    Frame = 1,
    /// Input buffer filled up before a delimiter arrived
    Overflow = 2,
    /// Unknown action code or sub-operation
    BadCommand = 3,
    /// Numeric argument missing, non-numeric, or out of range
    BadArgument = 4,
}

impl ErrorCode {
    /// Wire value; 0 is reserved for success and never sent as an error.
    pub const OK: u8 = 0;

    pub fn code(self) -> u8 {
        self as u8
    }

    /// The single ASCII digit embedded in the error record.
    pub fn as_digit(self) -> u8 {
        b'0' + self.code()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Frame => "frame",
            ErrorCode::Overflow => "overflow",
            ErrorCode::BadCommand => "bad_command",
            ErrorCode::BadArgument => "bad_argument",
        }
    }
}

/// A reply to one frame (or to an input overflow).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Ok,
    Err(ErrorCode),
}

impl Response {
    /// Number of bytes this response occupies on the wire.
    pub fn wire_len(&self) -> usize {
        match self {
            Response::Ok => OK_RESPONSE.len(),
            Response::Err(_) => ERR_RESPONSE_LEN,
        }
    }

    pub fn encode(&self) -> ResponseBuffer {
        let mut buf = ResponseBuffer::new();
        // Both records fit MAX_RESPONSE_LEN
        match self {
            Response::Ok => {
                let _ = buf.extend_from_slice(&OK_RESPONSE);
            }
            Response::Err(code) => {
                let _ = buf.extend_from_slice(&[b'E', b'R', b'R', b':', code.as_digit(), b'\n']);
            }
        }
        buf
    }
}

impl From<Result<(), ErrorCode>> for Response {
    fn from(result: Result<(), ErrorCode>) -> Self {
        match result {
            Ok(()) => Response::Ok,
            Err(code) => Response::Err(code),
        }
    }
}

/// Layer operation selected by the first payload byte of an `L` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerOp {
    /// `S`: turn the layer on
    Set,
    /// `R`: turn the layer off
    Reset,
    /// `T`: invert the layer
    Toggle,
}

impl LayerOp {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'S' => Some(LayerOp::Set),
            b'R' => Some(LayerOp::Reset),
            b'T' => Some(LayerOp::Toggle),
            _ => None,
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            LayerOp::Set => b'S',
            LayerOp::Reset => b'R',
            LayerOp::Toggle => b'T',
        }
    }
}

/// A validated layer command, ready to apply to the layer store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerCommand {
    pub op: LayerOp,
    pub layer: u8,
}
