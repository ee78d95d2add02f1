use proptest::prelude::*;
use writebuf::{Long, WriteBuffer};

#[derive(Debug, Clone)]
enum Write {
	UInt32(u32),
	Int32(i32),
	String(String),
	Int8(i8),
	UInt8(u8),
	Boolean(bool),
	Int16(i16),
	UInt16(u16),
	Long(u32, u32, bool),
	Float32(f32),
}

impl Write {
	fn apply(&self, buffer: &mut WriteBuffer<'_>) {
		match self {
			Write::UInt32(value) => buffer.write_uint32_be(*value),
			Write::Int32(value) => buffer.write_int32_be(*value),
			Write::String(value) => buffer.write_utf8_string(value.clone()).unwrap(),
			Write::Int8(value) => buffer.write_int8(*value),
			Write::UInt8(value) => buffer.write_uint8(*value),
			Write::Boolean(value) => buffer.write_boolean(*value),
			Write::Int16(value) => buffer.write_int16_be(*value),
			Write::UInt16(value) => buffer.write_uint16_be(*value),
			Write::Long(high, low, unsigned) => {
				buffer.write_long_be(Long::new(*high, *low, *unsigned))
			}
			Write::Float32(value) => buffer.write_float32_be(*value),
		}
	}

	// what a buffer grown one write at a time would hold
	fn encode(&self, out: &mut Vec<u8>) {
		match self {
			Write::UInt32(value) => out.extend_from_slice(&value.to_be_bytes()),
			Write::Int32(value) => out.extend_from_slice(&value.to_be_bytes()),
			Write::String(value) => {
				out.extend_from_slice(&(value.len() as u32).to_be_bytes());
				out.extend_from_slice(value.as_bytes());
			}
			Write::Int8(value) => out.extend_from_slice(&value.to_be_bytes()),
			Write::UInt8(value) => out.push(*value),
			Write::Boolean(value) => out.push(*value as u8),
			Write::Int16(value) => out.extend_from_slice(&value.to_be_bytes()),
			Write::UInt16(value) => out.extend_from_slice(&value.to_be_bytes()),
			Write::Long(high, low, _) => {
				out.extend_from_slice(&high.to_be_bytes());
				out.extend_from_slice(&low.to_be_bytes());
			}
			Write::Float32(value) => out.extend_from_slice(&value.to_bits().to_be_bytes()),
		}
	}
}

fn writes() -> impl Strategy<Value = Vec<Write>> {
	let write = prop_oneof![
		any::<u32>().prop_map(Write::UInt32),
		any::<i32>().prop_map(Write::Int32),
		".{0,16}".prop_map(Write::String),
		any::<i8>().prop_map(Write::Int8),
		any::<u8>().prop_map(Write::UInt8),
		any::<bool>().prop_map(Write::Boolean),
		any::<i16>().prop_map(Write::Int16),
		any::<u16>().prop_map(Write::UInt16),
		(any::<u32>(), any::<u32>(), any::<bool>())
			.prop_map(|(high, low, unsigned)| Write::Long(high, low, unsigned)),
		any::<f32>().prop_map(Write::Float32),
	];
	prop::collection::vec(write, 0..32)
}

proptest! {
	#[test]
	fn prop_render_matches_sequential_encoding(writes in writes()) {
		let mut buffer = WriteBuffer::new();
		let mut expected = Vec::new();
		for write in &writes {
			write.apply(&mut buffer);
			write.encode(&mut expected);
		}

		prop_assert_eq!(buffer.len(), expected.len());
		let rendered = buffer.get_buffer().unwrap();
		prop_assert_eq!(&rendered[..], &expected[..]);
	}

	#[test]
	fn prop_render_is_idempotent(writes in writes()) {
		let mut buffer = WriteBuffer::new();
		for write in &writes {
			write.apply(&mut buffer);
		}

		let first = buffer.get_buffer().unwrap().clone();
		let second = buffer.get_buffer().unwrap().clone();
		prop_assert_eq!(first, second);
		prop_assert_eq!(buffer.action_count(), 0);
	}
}
