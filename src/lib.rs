//! LayerLink library: serial remote control of keyboard layers.
//!
//! A host sends short ASCII frames (`KBLS1\n`, `KBLT3\r`, ...) over a virtual
//! serial port; the keyboard turns layers on, off, or inverts them, and
//! answers every frame with `OK\n` or `ERR:<d>\n`. This crate contains the
//! framing, dispatch, and buffering logic with no platform dependencies,
//! testable on any host with `cargo test`. The firmware binary is a thin
//! consumer that supplies the USB endpoint and the tick.
//!
//! Modules, leaves first:
//! - `ringbuf`, `cmdbuf`: fixed-capacity byte buffers
//! - `protocol`, `config`: wire format, error codes, parser settings
//! - `layer`: the layer store seam and a bitmask store
//! - `response`, `dispatch`: response queue and command handlers
//! - `transport`: transport seam and the buffered USB serial adapter
//! - `control`: the per-tick receive / dispatch / send loop
//!
//! All state lives in owned structs with const-generic capacities; nothing
//! allocates and nothing blocks.

#![cfg_attr(not(test), no_std)]

pub mod board;
pub mod cmdbuf;
pub mod config;
pub mod control;
pub mod dispatch;
pub mod layer;
pub mod protocol;
pub mod response;
pub mod ringbuf;
pub mod transport;

pub use config::{ArgumentEncoding, ControlConfig, PrefixCheck};
pub use control::{ControlStats, RemoteControl};
pub use layer::{LayerState, LayerStore};
pub use protocol::{ErrorCode, Response};
pub use transport::{Endpoint, EndpointError, SerialPort, Transport};
