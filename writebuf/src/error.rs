use std::collections::TryReserveError;

use thiserror::Error;

use crate::action::Kind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
	/// The output buffer could not be reserved. Nothing was rendered.
	#[error("unable to allocate {size} bytes for the rendered buffer")]
	Allocation {
		size: usize,
		#[source]
		source: TryReserveError,
	},

	#[error("{value} does not fit in {kind}")]
	OutOfRange { kind: Kind, value: String },

	#[error("{0} is not a numeric encoding")]
	NotNumeric(Kind),
}
