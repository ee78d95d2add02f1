use std::{borrow::Cow, fmt};

use bytes::BufMut;

// byte widths of the fixed-width encodings
pub const BYTE: usize = 1;
pub const SHORT: usize = 2;
pub const INT: usize = 4;
pub const FLOAT: usize = 4;
pub const LONG: usize = 2 * INT;
pub const LENGTH_PREFIX: usize = INT;

/// Tag identifying the encoder a [`RenderAction`] dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
	UInt32BE,
	Int32BE,
	Utf8String,
	Int8,
	UInt8,
	Int16BE,
	UInt16BE,
	Float32BE,
}

impl Kind {
	/// Width in bytes of a fixed-width kind. `None` for [`Kind::Utf8String`].
	pub const fn width(self) -> Option<usize> {
		match self {
			Kind::UInt32BE | Kind::Int32BE => Some(INT),
			Kind::Float32BE => Some(FLOAT),
			Kind::Int16BE | Kind::UInt16BE => Some(SHORT),
			Kind::Int8 | Kind::UInt8 => Some(BYTE),
			Kind::Utf8String => None,
		}
	}
}

impl fmt::Display for Kind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Kind::UInt32BE => "UInt32BE",
			Kind::Int32BE => "Int32BE",
			Kind::Utf8String => "UTF8String",
			Kind::Int8 => "Int8",
			Kind::UInt8 => "UInt8",
			Kind::Int16BE => "Int16BE",
			Kind::UInt16BE => "UInt16BE",
			Kind::Float32BE => "Float32BE",
		};
		f.write_str(name)
	}
}

/// A write request recorded by a `WriteBuffer` and replayed when it renders.
///
/// `offset` is the absolute position of the first byte in the rendered output.
/// A string action covers only the payload; its length prefix is a separate
/// [`RenderAction::UInt32BE`] recorded right before it.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderAction<'a> {
	UInt32BE { offset: usize, value: u32 },
	Int32BE { offset: usize, value: i32 },
	Utf8String {
		offset: usize,
		value: Cow<'a, str>,
		len: usize,
	},
	Int8 { offset: usize, value: i8 },
	UInt8 { offset: usize, value: u8 },
	Int16BE { offset: usize, value: i16 },
	UInt16BE { offset: usize, value: u16 },
	Float32BE { offset: usize, value: f32 },
}

impl RenderAction<'_> {
	pub fn kind(&self) -> Kind {
		match self {
			RenderAction::UInt32BE { .. } => Kind::UInt32BE,
			RenderAction::Int32BE { .. } => Kind::Int32BE,
			RenderAction::Utf8String { .. } => Kind::Utf8String,
			RenderAction::Int8 { .. } => Kind::Int8,
			RenderAction::UInt8 { .. } => Kind::UInt8,
			RenderAction::Int16BE { .. } => Kind::Int16BE,
			RenderAction::UInt16BE { .. } => Kind::UInt16BE,
			RenderAction::Float32BE { .. } => Kind::Float32BE,
		}
	}

	pub fn offset(&self) -> usize {
		match *self {
			RenderAction::UInt32BE { offset, .. }
			| RenderAction::Int32BE { offset, .. }
			| RenderAction::Utf8String { offset, .. }
			| RenderAction::Int8 { offset, .. }
			| RenderAction::UInt8 { offset, .. }
			| RenderAction::Int16BE { offset, .. }
			| RenderAction::UInt16BE { offset, .. }
			| RenderAction::Float32BE { offset, .. } => offset,
		}
	}

	/// Number of bytes this action writes.
	pub fn width(&self) -> usize {
		match self {
			RenderAction::Utf8String { len, .. } => *len,
			other => other.kind().width().unwrap_or_default(),
		}
	}
}

/// Encodes `action` into `out`.
///
/// Actions are replayed in ledger order into a buffer reserved for the final
/// size, so the action's offset is always the current end of `out`.
pub(crate) fn render(out: &mut Vec<u8>, action: &RenderAction<'_>) {
	debug_assert_eq!(out.len(), action.offset(), "gap or overlap before {:?}", action.kind());

	match action {
		RenderAction::UInt32BE { value, .. } => out.put_u32(*value),
		RenderAction::Int32BE { value, .. } => out.put_i32(*value),
		RenderAction::Utf8String { value, len, .. } => out.put_slice(&value.as_bytes()[..*len]),
		RenderAction::Int8 { value, .. } => out.put_i8(*value),
		RenderAction::UInt8 { value, .. } => out.put_u8(*value),
		RenderAction::Int16BE { value, .. } => out.put_i16(*value),
		RenderAction::UInt16BE { value, .. } => out.put_u16(*value),
		RenderAction::Float32BE { value, .. } => out.put_f32(*value),
	}
}
