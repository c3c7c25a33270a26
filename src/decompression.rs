use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Chain, Cursor, Read};
use std::path::Path;

type ChainReader = Chain<Cursor<Vec<u8>>, File>;
type GzipReader = BufReader<MultiGzDecoder<ChainReader>>;
type ZstdReader = BufReader<zstd::Decoder<'static, BufReader<ChainReader>>>;
type PlainReader = BufReader<ChainReader>;

/// Streaming decompression wrapper that implements BufRead.
/// Detects gzip (1F 8B 08) and zstd (28 B5 2F FD) compression using magic bytes.
pub enum InputReader {
    /// Gzip decompression
    Gzip(GzipReader),
    /// Zstd decompression - decoder requires BufRead input and provides Read output
    Zstd(ZstdReader),
    /// Passthrough for non-compressed files
    Plain(PlainReader),
}

// Manually implement Debug since zstd::Decoder doesn't implement it
impl std::fmt::Debug for InputReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputReader::Gzip(_) => write!(f, "InputReader::Gzip"),
            InputReader::Zstd(_) => write!(f, "InputReader::Zstd"),
            InputReader::Plain(_) => write!(f, "InputReader::Plain"),
        }
    }
}

impl BufRead for InputReader {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        match self {
            InputReader::Gzip(reader) => reader.fill_buf(),
            InputReader::Zstd(reader) => reader.fill_buf(),
            InputReader::Plain(reader) => reader.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            InputReader::Gzip(reader) => reader.consume(amt),
            InputReader::Zstd(reader) => reader.consume(amt),
            InputReader::Plain(reader) => reader.consume(amt),
        }
    }
}

impl Read for InputReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            InputReader::Gzip(reader) => reader.read(buf),
            InputReader::Zstd(reader) => reader.read(buf),
            InputReader::Plain(reader) => reader.read(buf),
        }
    }
}

/// Open a file for reading, transparently decompressing gzip or zstd input.
/// Reads the first 4 bytes to check for magic signatures, then replays them
/// in front of the remaining stream using a cursor chain.
pub fn open_path(path: &Path) -> std::io::Result<InputReader> {
    let mut file = File::open(path)?;
    let mut head = [0u8; 4];
    let n = file.read(&mut head)?;

    let prefix = Cursor::new(head[..n].to_vec());
    let chained = prefix.chain(file);

    // Gzip magic bytes: 1F 8B 08
    let is_gzip = n >= 3 && head[0] == 0x1F && head[1] == 0x8B && head[2] == 0x08;

    // Zstd magic bytes: 28 B5 2F FD
    let is_zstd = n >= 4 && head[0] == 0x28 && head[1] == 0xB5 && head[2] == 0x2F && head[3] == 0xFD;

    if is_gzip {
        let decoder = MultiGzDecoder::new(chained);
        Ok(InputReader::Gzip(BufReader::new(decoder)))
    } else if is_zstd {
        let decoder = zstd::Decoder::new(chained)?;
        Ok(InputReader::Zstd(BufReader::new(decoder)))
    } else {
        Ok(InputReader::Plain(BufReader::new(chained)))
    }
}
