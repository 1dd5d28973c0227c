//! Flat-buffer marshalling errors

use std::fmt;

/// A float slice had the wrong length for the type being loaded or stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferSizeError {
    /// Number of floats the type occupies
    pub expected: usize,
    /// Length of the slice that was passed
    pub actual: usize,
}

impl fmt::Display for BufferSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Flat buffer holds {} floats, expected {}",
            self.actual, self.expected
        )
    }
}

impl std::error::Error for BufferSizeError {}

/// View a slice as a fixed-size array
pub(crate) fn as_fixed<const N: usize>(buf: &[f32]) -> Result<&[f32; N], BufferSizeError> {
    let actual = buf.len();
    <&[f32; N]>::try_from(buf).map_err(|_| BufferSizeError { expected: N, actual })
}

/// View a mutable slice as a fixed-size array
pub(crate) fn as_fixed_mut<const N: usize>(
    buf: &mut [f32],
) -> Result<&mut [f32; N], BufferSizeError> {
    let actual = buf.len();
    <&mut [f32; N]>::try_from(buf).map_err(|_| BufferSizeError { expected: N, actual })
}
