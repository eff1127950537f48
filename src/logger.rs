//! Warning sinks for the configuration loader.
//!
//! The loader only needs to hand off warning lines; where they end up is the
//! caller's choice.

use std::cell::RefCell;
use std::io::Write;

/// Receives warning-level lines.
pub trait Logger {
	fn warning(&self, message: &str);
}

impl<L: Logger + ?Sized> Logger for &L {
	fn warning(&self, message: &str) {
		(**self).warning(message);
	}
}

/// Forwards warnings to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
	fn warning(&self, message: &str) {
		tracing::warn!("{message}");
	}
}

/// Writes each warning as a line to a writer such as stderr or a buffer.
#[derive(Debug)]
pub struct StreamLogger<W: Write> {
	out: RefCell<W>,
}

impl<W: Write> StreamLogger<W> {
	pub fn new(out: W) -> Self {
		Self {
			out: RefCell::new(out),
		}
	}

	/// Recover the underlying writer.
	pub fn into_inner(self) -> W {
		self.out.into_inner()
	}
}

impl<W: Write> Logger for StreamLogger<W> {
	fn warning(&self, message: &str) {
		// A failing sink must not fail the load.
		if let Err(e) = writeln!(self.out.borrow_mut(), "{message}") {
			tracing::debug!(error = %e, "failed to write warning");
		}
	}
}
