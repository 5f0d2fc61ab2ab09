// Reading a file's data through its file map.
//
// A file's logical records are scattered wherever the allocator put them;
// the file map says which physical record holds each 1024-word logical
// record. A map entry with the high bit set means nothing was ever
// allocated there, and those spans read as zeros without touching the
// image at all.

use log::{debug, warn};

use crate::error_types::image::ImageError;
use crate::volume::geometry::geometry_struct::{RECORD_BYTES, RECORD_WORDS};
use crate::volume::image::image_struct::ImageFile;
use crate::volume::vtoc::FILE_MAP_HOLE;
use crate::words::codec::extract_word36;
use crate::words::Word36;

/// A borrowed view of one file's data: the image handle plus the file map
/// that scatters the file across it.
pub struct FileWindow<'a> {
    image: &'a mut ImageFile,
    file_map: &'a [u32],
    subvolume: usize,
}

impl<'a> FileWindow<'a> {
    pub fn new(image: &'a mut ImageFile, file_map: &'a [u32], subvolume: usize) -> Self {
        Self {
            image,
            file_map,
            subvolume,
        }
    }

    /// Which physical record holds logical record `index`, or `None` for a
    /// hole. An index past the end of the map is also a hole; a 24-bit bit
    /// count can describe more data than the 256-entry map can place.
    fn physical_record(&self, index: usize) -> Option<usize> {
        match self.file_map.get(index) {
            Some(&entry) if entry & FILE_MAP_HOLE == 0 => Some(entry as usize),
            Some(_) => None,
            None => {
                warn!("logical record {index} is past the file map, treating as a hole");
                None
            }
        }
    }

    /// One word of file data, by file-relative word offset. Holes read as
    /// zero.
    pub fn read_word(&mut self, word_index: usize) -> Result<Word36, ImageError> {
        let logical = word_index / RECORD_WORDS;
        let offset = word_index % RECORD_WORDS;
        match self.physical_record(logical) {
            None => {
                debug!("word read inside unallocated record {logical}, yielding zero");
                Ok(0)
            }
            Some(record) => {
                let data = self.image.read_record(record, self.subvolume)?;
                Ok(extract_word36(&data, offset))
            }
        }
    }

    /// Copy file bytes `[offset, offset + buf.len())` into `buf`, clamped
    /// to the declared bit count (rounded up to bytes). Returns how many
    /// bytes were produced; fewer than asked for means the request ran off
    /// the end of the file.
    pub fn read_bytes(
        &mut self,
        bit_count: u64,
        offset: u64,
        buf: &mut [u8],
    ) -> Result<usize, ImageError> {
        let byte_length = bit_count.div_ceil(8);
        if offset >= byte_length {
            return Ok(0);
        }
        let end = byte_length.min(offset + buf.len() as u64);

        let mut produced = 0usize;
        let mut cursor = offset;
        while cursor < end {
            let logical = (cursor / RECORD_BYTES as u64) as usize;
            let within = (cursor % RECORD_BYTES as u64) as usize;
            let span = ((RECORD_BYTES - within) as u64).min(end - cursor) as usize;

            let out = &mut buf[produced..produced + span];
            match self.physical_record(logical) {
                None => out.fill(0),
                Some(record) => {
                    let data = self.image.read_record(record, self.subvolume)?;
                    out.copy_from_slice(&data[within..within + span]);
                }
            }
            produced += span;
            cursor += span as u64;
        }
        Ok(produced)
    }
}
