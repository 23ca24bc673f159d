//! File I/O implementation using lightweight-mmap.

use crate::bch::constants::BCH_MIN_HEADER_SIZE;
use crate::container::BchContainer;
use crate::error::MalformedContainerError;
use crate::file_io::FileOperationResult;
use crate::pipeline::write_payloads;
use ctr_texture_api::PixelCodec;
use lightweight_mmap::handles::*;
use lightweight_mmap::mmap::*;
use std::path::Path;
use tracing::debug;

impl<C: PixelCodec> BchContainer<C> {
    /// Loads a BCH file and extracts all of its texture levels with `codec`.
    ///
    /// The file is memory-mapped while it is parsed; the container keeps its own copy of
    /// the bytes, so the file may change or disappear afterwards.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the BCH file
    /// * `codec` - Codec used to decode (and later encode) the texture levels
    ///
    /// # Returns
    ///
    /// The loaded container, or the I/O or container error that stopped it.
    pub fn open(path: &Path, codec: C) -> FileOperationResult<Self> {
        let handle = ReadOnlyFileHandle::open(path)?;
        let size = handle.size()? as usize;
        if size < BCH_MIN_HEADER_SIZE {
            return Err(MalformedContainerError::HeaderTooShort {
                required: BCH_MIN_HEADER_SIZE,
                actual: size,
            }
            .into());
        }

        let mapping = ReadOnlyMmap::new(&handle, 0, size)?;
        let container = Self::from_bytes(mapping.as_slice(), codec)?;

        debug!(
            path = %path.display(),
            size,
            images = container.images().len(),
            "Opened BCH file"
        );
        Ok(container)
    }

    /// Writes the container, with all images re-encoded, to `path`.
    ///
    /// Every image is validated and encoded before the output file is created. If that
    /// fails no file is created and an existing file at `path` is left as it was.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the output file (will be created or replaced). The output
    ///   directory must exist.
    pub fn save(&self, path: &Path) -> FileOperationResult<()> {
        let payloads = self.encode_payloads()?;

        let original = self.original_bytes();
        let size = original.len();
        let output_handle = ReadWriteFileHandle::create_preallocated(path, size as i64)?;
        let mut output_mapping = ReadWriteMmap::new(&output_handle, 0, size)?;

        let output = output_mapping.as_mut_slice();
        output.copy_from_slice(original);
        write_payloads(output, self.layout(), &payloads)?;

        debug!(path = %path.display(), levels = payloads.len(), "Saved BCH file");
        Ok(())
    }
}
