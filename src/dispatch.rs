//! Frame validation and command dispatch.
//!
//! A frame is checked for length and prefix, then routed by its action code
//! through [`HANDLERS`]. Handlers parse their own payload and either apply it
//! or return the [`ErrorCode`] to report; the layer store is never touched
//! when validation fails.

use crate::config::{ArgumentEncoding, ControlConfig};
use crate::layer::LayerStore;
use crate::protocol::{ErrorCode, LayerCommand, LayerOp, Response, ACTION_LAYER, MIN_FRAME_LEN};

/// Signature shared by every action handler: payload after the action code,
/// parser settings, and the layer store to act on.
pub type Handler = fn(&[u8], &ControlConfig, &mut dyn LayerStore) -> Result<(), ErrorCode>;

/// Action code to handler routing table.
pub static HANDLERS: &[(u8, Handler)] = &[(ACTION_LAYER, handle_layer as Handler)];

/// Validate one frame (delimiter already stripped) and run its handler.
pub fn dispatch(frame: &[u8], config: &ControlConfig, layers: &mut dyn LayerStore) -> Response {
    let result = dispatch_inner(frame, config, layers);
    if let Err(code) = result {
        log::debug!("frame rejected: {} ({} bytes)", code.as_str(), frame.len());
    }
    Response::from(result)
}

fn dispatch_inner(frame: &[u8], config: &ControlConfig, layers: &mut dyn LayerStore) -> Result<(), ErrorCode> {
    if frame.len() < MIN_FRAME_LEN {
        return Err(ErrorCode::Frame);
    }
    if !config.prefix_matches([frame[0], frame[1]]) {
        return Err(ErrorCode::Frame);
    }

    let action = frame[2];
    let handler = HANDLERS
        .iter()
        .find(|(code, _)| *code == action)
        .map(|&(_, handler)| handler)
        .ok_or(ErrorCode::BadCommand)?;

    handler(&frame[MIN_FRAME_LEN..], config, layers)
}

/// `L` action: `<S|R|T><digits>`.
fn handle_layer(payload: &[u8], config: &ControlConfig, layers: &mut dyn LayerStore) -> Result<(), ErrorCode> {
    let cmd = parse_layer_command(payload, config.argument)?;
    log::debug!("layer command: {:?} {}", cmd.op, cmd.layer);
    match cmd.op {
        LayerOp::Set => layers.layer_on(cmd.layer),
        LayerOp::Reset => layers.layer_off(cmd.layer),
        LayerOp::Toggle => layers.layer_invert(cmd.layer),
    }
    Ok(())
}

/// Parse the payload of an `L` command.
pub fn parse_layer_command(payload: &[u8], encoding: ArgumentEncoding) -> Result<LayerCommand, ErrorCode> {
    let (&op, digits) = payload.split_first().ok_or(ErrorCode::BadCommand)?;
    let op = LayerOp::from_byte(op).ok_or(ErrorCode::BadCommand)?;
    let layer = parse_arg8(digits, encoding)?;
    Ok(LayerCommand { op, layer })
}

/// Parse an unsigned 8-bit argument made of ASCII digits.
///
/// Empty input, any non-digit byte, or a value above 255 is `BadArgument`.
pub fn parse_arg8(digits: &[u8], encoding: ArgumentEncoding) -> Result<u8, ErrorCode> {
    if digits.is_empty() {
        return Err(ErrorCode::BadArgument);
    }
    let mut value: u16 = 0;
    for &byte in digits {
        if !byte.is_ascii_digit() {
            return Err(ErrorCode::BadArgument);
        }
        let digit = u16::from(byte - b'0');
        value = match encoding {
            ArgumentEncoding::Decimal => value * 10 + digit,
            ArgumentEncoding::DigitSum => value + digit,
        };
        if value > u16::from(u8::MAX) {
            return Err(ErrorCode::BadArgument);
        }
    }
    Ok(value as u8)
}
