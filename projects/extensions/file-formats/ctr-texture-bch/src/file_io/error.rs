//! Error types for file I/O operations.

use crate::error::BchError;
use thiserror::Error;

/// Result type for file operations
pub type FileOperationResult<T> = Result<T, FileOperationError>;

/// Errors that can occur while loading or saving a container file.
///
/// Either the file could not be accessed, or its contents could not be read or written
/// as a BCH container.
#[derive(Debug, Error)]
pub enum FileOperationError {
    /// I/O operation failed
    #[error("I/O operation failed: {0}")]
    Io(#[from] FileIoError),

    /// Container operation failed
    #[error("BCH operation failed: {0}")]
    Bch(#[from] BchError),
}

/// Errors raised by the `lightweight-mmap` backend.
#[cfg(feature = "lightweight-mmap")]
#[derive(Debug, Error)]
pub enum LightweightMmapError {
    /// Error opening file handle
    #[error("Failed to open file handle: {0}")]
    FileHandle(#[from] lightweight_mmap::handles::HandleOpenError),

    /// Error creating memory mapping
    #[error("Failed to create memory mapping: {0}")]
    MemoryMapping(#[from] lightweight_mmap::mmap::MmapError),
}

/// File I/O errors that can occur with different backends
#[derive(Debug, Error)]
pub enum FileIoError {
    /// Error from lightweight-mmap backend
    #[cfg(feature = "lightweight-mmap")]
    #[error("lightweight-mmap error: {0}")]
    LightweightMmap(#[from] LightweightMmapError),
}

// Direct From implementations so `?` works on backend calls.
#[cfg(feature = "lightweight-mmap")]
impl From<lightweight_mmap::handles::HandleOpenError> for FileOperationError {
    fn from(e: lightweight_mmap::handles::HandleOpenError) -> Self {
        Self::Io(FileIoError::LightweightMmap(
            LightweightMmapError::FileHandle(e),
        ))
    }
}

#[cfg(feature = "lightweight-mmap")]
impl From<lightweight_mmap::mmap::MmapError> for FileOperationError {
    fn from(e: lightweight_mmap::mmap::MmapError) -> Self {
        Self::Io(FileIoError::LightweightMmap(
            LightweightMmapError::MemoryMapping(e),
        ))
    }
}

impl From<crate::error::MalformedContainerError> for FileOperationError {
    fn from(e: crate::error::MalformedContainerError) -> Self {
        Self::Bch(e.into())
    }
}
