/// A 64-bit integer split into two 32-bit words.
///
/// `unsigned` selects how each word is encoded when written: as two unsigned
/// 32-bit words, or as two two's-complement signed words. The bytes on the
/// wire are the same either way, high word first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Long {
	pub high: u32,
	pub low: u32,
	pub unsigned: bool,
}

impl Long {
	pub const fn new(high: u32, low: u32, unsigned: bool) -> Self {
		Self {
			high,
			low,
			unsigned,
		}
	}

	pub const fn as_u64(&self) -> u64 {
		((self.high as u64) << 32) | self.low as u64
	}

	pub const fn as_i64(&self) -> i64 {
		self.as_u64() as i64
	}
}

impl From<u64> for Long {
	fn from(value: u64) -> Self {
		Self::new((value >> 32) as u32, value as u32, true)
	}
}

impl From<i64> for Long {
	fn from(value: i64) -> Self {
		let bits = value as u64;
		Self::new((bits >> 32) as u32, bits as u32, false)
	}
}
