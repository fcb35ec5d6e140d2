//! Request body guard.

use std::io::{self, Read};

/// Owns a request body and drains whatever is left of it when dropped.
///
/// Wrapping the body as soon as a request arrives means every exit from the
/// verifier releases the stream the same way, whether or not it was read.
pub(crate) struct DrainingBody<R: Read> {
    inner: R,
}

impl<R: Read> DrainingBody<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Read the remaining body into memory.
    pub(crate) fn read_all(&mut self) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.inner.read_to_end(&mut buffer)?;
        Ok(buffer)
    }
}

impl<R: Read> Drop for DrainingBody<R> {
    fn drop(&mut self) {
        if let Err(e) = io::copy(&mut self.inner, &mut io::sink()) {
            tracing::debug!(error = %e, "Failed to drain request body");
        }
    }
}

#[cfg(test)]
#[path = "body_tests.rs"]
mod tests;
