//! User photo input for try-on requests.

/// An uploaded user photo: opaque binary payload plus filename.
///
/// Absence of a photo is a valid state ("no photo yet"); replacing the
/// photo invalidates any prior try-on result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoInput {
    bytes: Vec<u8>,
    filename: String,
}

impl PhotoInput {
    /// Create a photo input from raw bytes and a filename.
    #[must_use]
    pub fn new(bytes: Vec<u8>, filename: impl Into<String>) -> Self {
        Self {
            bytes,
            filename: filename.into(),
        }
    }

    /// The raw photo bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The filename supplied by the user.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }
}
