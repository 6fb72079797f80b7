use crate::error::GridCellError;
use crate::grib::edition2::parse_grib2_message;
use crate::grib::grid::Grid;
use crate::grib::sections::{be_u24, parse_grib1_grid, parse_grib1_product};
use crate::grib::{GribField, GribMessage};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;
use tracing::{debug, trace};

const END_MARKER: &[u8; 4] = b"7777";

/// Streams GRIB messages out of a seekable source.
///
/// GRIB1 messages are read section by section: only the product and grid
/// definitions are loaded, bitmaps and packed data are skipped with seeks.
/// GRIB2 messages are loaded one at a time and decoded with the `grib`
/// crate. Bytes between messages are ignored.
///
/// # Example
///
/// ```no_run
/// use era5_gridcells::GribReader;
///
/// # fn main() -> Result<(), era5_gridcells::GridCellError> {
/// for message in GribReader::open("data/era5_land.grib")? {
///     let message = message?;
///     println!("message {} has {} field(s)", message.index, message.fields.len());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GribReader<R> {
    inner: R,
    next_index: usize,
    finished: bool,
}

impl GribReader<BufReader<File>> {
    /// Opens a GRIB file for reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GridCellError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| GridCellError::IoError(format!("{}: {}", path.display(), e)))?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read + Seek> GribReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            next_index: 0,
            finished: false,
        }
    }

    /// Reads the next message, or `None` at end of input.
    pub fn next_message(&mut self) -> Result<Option<GribMessage>, GridCellError> {
        if self.finished {
            return Ok(None);
        }
        let Some(offset) = self.find_magic()? else {
            self.finished = true;
            return Ok(None);
        };

        let mut rest = [0u8; 4];
        self.inner.read_exact(&mut rest)?;
        let edition = rest[3];

        let (length, fields) = match edition {
            1 => self.read_grib1(offset, rest)?,
            2 => self.read_grib2(offset)?,
            other => return Err(GridCellError::UnsupportedEdition(other)),
        };

        let message = GribMessage {
            index: self.next_index,
            offset,
            edition,
            length,
            fields,
        };
        self.next_index += 1;

        debug!(
            index = message.index,
            offset = message.offset,
            edition = message.edition,
            fields = message.fields.len(),
            "Read GRIB message"
        );
        Ok(Some(message))
    }

    /// Advances past the next `GRIB` marker and returns its offset.
    fn find_magic(&mut self) -> Result<Option<u64>, GridCellError> {
        let mut window = [0u8; 4];
        let mut seen = 0usize;
        let mut byte = [0u8; 1];

        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => {}
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
            window.rotate_left(1);
            window[3] = byte[0];
            seen += 1;

            if seen >= 4 && &window == b"GRIB" {
                let position = self.inner.stream_position()?;
                return Ok(Some(position - 4));
            }
        }
    }

    /// Reads a section whose first three octets hold its length (GRIB1).
    fn read_section_u24(&mut self) -> Result<Vec<u8>, GridCellError> {
        let mut section = vec![0u8; 3];
        self.inner.read_exact(&mut section)?;
        let len = be_u24(&section, 0, "GRIB1 section header")? as usize;
        if len < 3 {
            return Err(GridCellError::GribParseError(format!(
                "GRIB1 section length {} is too short",
                len
            )));
        }
        section.resize(len, 0);
        self.inner.read_exact(&mut section[3..])?;
        Ok(section)
    }

    fn skip(&mut self, bytes: u64) -> Result<(), GridCellError> {
        let bytes = i64::try_from(bytes)
            .map_err(|_| GridCellError::GribParseError("Section too large".to_string()))?;
        self.inner.seek(SeekFrom::Current(bytes))?;
        Ok(())
    }

    /// Reads the body of a GRIB1 message positioned just after Section 0.
    fn read_grib1(
        &mut self,
        offset: u64,
        rest: [u8; 4],
    ) -> Result<(u64, Vec<GribField>), GridCellError> {
        let total = be_u24(&rest, 0, "GRIB1 Section 0")? as u64;

        let pds = self.read_section_u24()?;
        let flags = pds.get(7).copied().ok_or_else(|| {
            GridCellError::GribParseError("GRIB1 PDS is missing its flag octet".to_string())
        })?;
        let product = parse_grib1_product(&pds)?;

        let grid = if flags & 0x80 != 0 {
            parse_grib1_grid(&self.read_section_u24()?)?
        } else {
            // Predefined grid, identified only by its catalogue number
            Grid::Unsupported(pds[6] as u16)
        };

        if flags & 0x40 != 0 {
            let mut header = [0u8; 3];
            self.inner.read_exact(&mut header)?;
            let len = be_u24(&header, 0, "GRIB1 BMS")? as u64;
            self.skip(len.saturating_sub(3))?;
        }

        let mut header = [0u8; 3];
        self.inner.read_exact(&mut header)?;
        let bds_len = be_u24(&header, 0, "GRIB1 BDS")? as u64;

        // ECMWF convention for messages longer than 2^23 octets
        let length = if total & 0x80_0000 != 0 && bds_len < 120 {
            (total & 0x7F_FFFF) * 120 - bds_len + 4
        } else {
            total
        };
        trace!(total, bds_len, length, "GRIB1 message length");

        let consumed = self.inner.stream_position()? - offset;
        if length < consumed + 4 {
            return Err(GridCellError::GribParseError(format!(
                "GRIB1 message at offset {} declares length {} but its sections take {} bytes",
                offset,
                length,
                consumed + 4
            )));
        }
        self.check_end_marker(offset, length)?;

        Ok((
            length,
            vec![GribField {
                level: product.level,
                step_seconds: product.step_seconds,
                grid,
            }],
        ))
    }

    /// Reads a whole GRIB2 message positioned just after octet 8 and
    /// decodes its fields.
    fn read_grib2(&mut self, offset: u64) -> Result<(u64, Vec<GribField>), GridCellError> {
        let mut len_bytes = [0u8; 8];
        self.inner.read_exact(&mut len_bytes)?;
        let length = u64::from_be_bytes(len_bytes);
        if length < 16 + 4 {
            return Err(GridCellError::GribParseError(format!(
                "GRIB2 message length {} is too short",
                length
            )));
        }

        self.check_end_marker(offset, length)?;
        self.inner.seek(SeekFrom::Start(offset))?;
        let mut message = Vec::new();
        (&mut self.inner).take(length).read_to_end(&mut message)?;

        let fields = parse_grib2_message(message)?;
        Ok((length, fields))
    }

    fn check_end_marker(&mut self, offset: u64, length: u64) -> Result<(), GridCellError> {
        let end = length
            .checked_sub(4)
            .and_then(|body| offset.checked_add(body))
            .ok_or_else(|| {
                GridCellError::GribParseError(format!(
                    "Message at offset {} has invalid length {}",
                    offset, length
                ))
            })?;
        self.inner.seek(SeekFrom::Start(end))?;
        let mut marker = [0u8; 4];
        self.inner.read_exact(&mut marker).map_err(|e| {
            GridCellError::GribParseError(format!(
                "Message at offset {} is truncated: {}",
                offset, e
            ))
        })?;
        if &marker != END_MARKER {
            return Err(GridCellError::GribParseError(format!(
                "Message at offset {} does not end with 7777",
                offset
            )));
        }
        Ok(())
    }
}

impl<R: Read + Seek> Iterator for GribReader<R> {
    type Item = Result<GribMessage, GridCellError>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.next_message();
        if result.is_err() {
            self.finished = true;
        }
        result.transpose()
    }
}
