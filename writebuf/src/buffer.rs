use std::{borrow::Cow, fmt::Display};

use bytes::Bytes;
use num_traits::ToPrimitive;
use tracing::{debug, error, trace, warn};

use crate::{
	action::{self, Kind, RenderAction},
	error::{Error, Result},
	hex, Long,
};

/// Collects typed writes and renders them into a single buffer.
///
/// Writes only record a [`RenderAction`] and advance the running size. The
/// first call to [`WriteBuffer::get_buffer`] allocates exactly that many bytes
/// once, replays every action in the order it was written, and caches the
/// result. All multi-byte values are big-endian.
///
/// # Panics
///
/// Every `write_*` method panics once the buffer has been rendered. The
/// rendered bytes are frozen.
///
/// ```
/// use writebuf::WriteBuffer;
///
/// let mut buffer = WriteBuffer::new();
/// buffer.write_uint8(0xFF);
/// buffer.write_int16_be(-1);
/// buffer.write_float32_be(1.5);
///
/// let bytes = buffer.get_buffer().unwrap();
/// assert_eq!(&bytes[..], &[0xFF, 0xFF, 0xFF, 0x3F, 0xC0, 0x00, 0x00]);
/// ```
#[derive(Debug, Default)]
pub struct WriteBuffer<'a> {
	size: usize,
	actions: Vec<RenderAction<'a>>,
	output: Option<Bytes>,
}

impl<'a> WriteBuffer<'a> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn create() -> Self {
		Self::new()
	}

	/// Pre-sizes the action ledger for `actions` writes. The output buffer is
	/// still only allocated on render.
	pub fn with_capacity(actions: usize) -> Self {
		Self {
			size: 0,
			actions: Vec::with_capacity(actions),
			output: None,
		}
	}

	/// Number of bytes the rendered buffer holds.
	pub fn len(&self) -> usize {
		self.size
	}

	pub fn is_empty(&self) -> bool {
		self.size == 0
	}

	/// Pending actions. The ledger is dropped once rendered.
	pub fn action_count(&self) -> usize {
		self.actions.len()
	}

	pub fn is_rendered(&self) -> bool {
		self.output.is_some()
	}

	/// Renders the buffer on first call and returns the cached result after.
	///
	/// # Errors
	///
	/// [`Error::Allocation`] if the output can not be reserved. The buffer is
	/// then left unrendered and a later call retries.
	pub fn get_buffer(&mut self) -> Result<&Bytes> {
		let output = match self.output.take() {
			Some(output) => output,
			None => self.render()?,
		};
		let output: &Bytes = self.output.insert(output);
		Ok(output)
	}

	/// Renders if needed and hands over the buffer.
	pub fn into_bytes(mut self) -> Result<Bytes> {
		match self.output.take() {
			Some(output) => Ok(output),
			None => self.render(),
		}
	}

	fn render(&mut self) -> Result<Bytes> {
		let mut out = Vec::new();
		if let Err(source) = out.try_reserve_exact(self.size) {
			error!(size = self.size, "unable to allocate render buffer: {source}");
			return Err(Error::Allocation {
				size: self.size,
				source,
			});
		}

		for action in &self.actions {
			action::render(&mut out, action);
		}
		debug_assert_eq!(out.len(), self.size);

		debug!(size = self.size, actions = self.actions.len(), "rendered write buffer");
		trace!("rendered bytes: {}", hex(&out));

		self.actions = Vec::new();
		Ok(Bytes::from(out))
	}

	fn push(&mut self, action: RenderAction<'a>) {
		assert!(
			self.output.is_none(),
			"{} written to a WriteBuffer that was already rendered",
			action.kind()
		);
		self.size += action.width();
		self.actions.push(action);
	}

	pub fn write_uint32_be(&mut self, value: u32) {
		self.push(RenderAction::UInt32BE {
			offset: self.size,
			value,
		});
	}

	pub fn write_int32_be(&mut self, value: i32) {
		self.push(RenderAction::Int32BE {
			offset: self.size,
			value,
		});
	}

	/// Writes the UTF8 byte length as a [`LENGTH_PREFIX`](action::LENGTH_PREFIX) byte [`u32`]
	/// followed by the bytes.
	///
	/// # Errors
	///
	/// [`Error::OutOfRange`] if the string is longer than [`u32::MAX`] bytes.
	/// Nothing is recorded.
	pub fn write_utf8_string(&mut self, value: impl Into<Cow<'a, str>>) -> Result<()> {
		let value = value.into();
		let len = value.len();
		let prefix = length_prefix(len)?;

		self.write_uint32_be(prefix);
		self.push(RenderAction::Utf8String {
			offset: self.size,
			value,
			len,
		});
		Ok(())
	}

	pub fn write_int8(&mut self, value: i8) {
		self.push(RenderAction::Int8 {
			offset: self.size,
			value,
		});
	}

	pub fn write_uint8(&mut self, value: u8) {
		self.push(RenderAction::UInt8 {
			offset: self.size,
			value,
		});
	}

	pub fn write_boolean(&mut self, value: bool) {
		self.write_uint8(u8::from(value));
	}

	pub fn write_int16_be(&mut self, value: i16) {
		self.push(RenderAction::Int16BE {
			offset: self.size,
			value,
		});
	}

	pub fn write_uint16_be(&mut self, value: u16) {
		self.push(RenderAction::UInt16BE {
			offset: self.size,
			value,
		});
	}

	/// Writes the high word then the low word, signed or unsigned per
	/// [`Long::unsigned`].
	pub fn write_long_be(&mut self, value: Long) {
		if value.unsigned {
			self.write_uint32_be(value.high);
			self.write_uint32_be(value.low);
		} else {
			self.write_int32_be(value.high as i32);
			self.write_int32_be(value.low as i32);
		}
	}

	pub fn write_int64_be(&mut self, value: i64) {
		self.write_long_be(Long::from(value));
	}

	pub fn write_uint64_be(&mut self, value: u64) {
		self.write_long_be(Long::from(value));
	}

	pub fn write_float32_be(&mut self, value: f32) {
		self.push(RenderAction::Float32BE {
			offset: self.size,
			value,
		});
	}

	/// Writes any primitive number as `kind`, rejecting values that do not fit
	/// instead of truncating them. Nothing is recorded on error.
	///
	/// Integer kinds only take values they represent exactly, so `2.7` is
	/// rejected as [`Kind::UInt8`] while `2.0` is accepted. [`Kind::Float32BE`]
	/// rounds to the nearest `f32` but rejects finite values that overflow it.
	pub fn write_checked<N>(&mut self, kind: Kind, value: N) -> Result<()>
	where
		N: ToPrimitive + Display,
	{
		let out_of_range = || {
			warn!(%kind, %value, "rejected out of range write");
			Error::OutOfRange {
				kind,
				value: value.to_string(),
			}
		};

		match kind {
			Kind::UInt32BE => {
				self.write_uint32_be(exact(&value, value.to_u32()).ok_or_else(out_of_range)?)
			}
			Kind::Int32BE => {
				self.write_int32_be(exact(&value, value.to_i32()).ok_or_else(out_of_range)?)
			}
			Kind::Int8 => self.write_int8(exact(&value, value.to_i8()).ok_or_else(out_of_range)?),
			Kind::UInt8 => self.write_uint8(exact(&value, value.to_u8()).ok_or_else(out_of_range)?),
			Kind::Int16BE => {
				self.write_int16_be(exact(&value, value.to_i16()).ok_or_else(out_of_range)?)
			}
			Kind::UInt16BE => {
				self.write_uint16_be(exact(&value, value.to_u16()).ok_or_else(out_of_range)?)
			}
			Kind::Float32BE => self.write_float32_be(narrowed(&value).ok_or_else(out_of_range)?),
			Kind::Utf8String => return Err(Error::NotNumeric(kind)),
		}
		Ok(())
	}
}

fn length_prefix(len: usize) -> Result<u32> {
	u32::try_from(len).map_err(|_| {
		warn!(len, "string overflows its length prefix");
		Error::OutOfRange {
			kind: Kind::UInt32BE,
			value: len.to_string(),
		}
	})
}

// keeps an integer conversion only if it round-trips, which drops fractions
fn exact<N, T>(source: &N, converted: Option<T>) -> Option<T>
where
	N: ToPrimitive,
	T: ToPrimitive,
{
	let converted = converted?;
	(converted.to_f64()? == source.to_f64()?).then_some(converted)
}

fn narrowed<N: ToPrimitive>(source: &N) -> Option<f32> {
	let narrowed = source.to_f32()?;
	let finite = source.to_f64().is_some_and(f64::is_finite);
	(narrowed.is_finite() || !finite).then_some(narrowed)
}
