use std::io::{self, Read};

use flate2::read::{GzDecoder, ZlibDecoder};
use log::debug;

#[derive(Debug, PartialEq)]
enum Compression {
    Gzip,
    Zlib,
    None,
}

fn detect(data: &[u8]) -> Compression {
    match data {
        [0x1f, 0x8b, ..] => Compression::Gzip,
        [cmf @ 0x78, flg, ..] if (u16::from(*cmf) << 8 | u16::from(*flg)) % 31 == 0 => {
            Compression::Zlib
        }
        _ => Compression::None,
    }
}

/// Inflate gzip or zlib compressed data, passing anything else through
/// untouched. Uncompressed NBT starts with a tag id between 0 and 12, which
/// can never be mistaken for either header.
pub(crate) fn inflate(data: Vec<u8>) -> io::Result<Vec<u8>> {
    let compression = detect(&data);
    if compression != Compression::None {
        debug!("inflating {} bytes of {:?} data", data.len(), compression);
    }

    match compression {
        Compression::Gzip => read_all(GzDecoder::new(data.as_slice())),
        Compression::Zlib => read_all(ZlibDecoder::new(data.as_slice())),
        Compression::None => Ok(data),
    }
}

fn read_all(mut decoder: impl Read) -> io::Result<Vec<u8>> {
    let mut buf = vec![];
    decoder.read_to_end(&mut buf)?;
    Ok(buf)
}
