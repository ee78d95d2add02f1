pub mod action;
mod buffer;
mod error;
mod long;

pub use action::{Kind, RenderAction};
pub use buffer::WriteBuffer;
pub use error::{Error, Result};
pub use long::Long;

pub fn hex(data: &[u8]) -> String {
	format!("{:x?}", data)
}
