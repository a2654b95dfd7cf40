use std::{
    fs::File,
    io::{ErrorKind, Read},
    path::Path,
};
use tracing::debug;

const CHUNK_SIZE: usize = 64 * 1024;

/// CRC-32 (zlib polynomial) over the whole file, read in fixed-size chunks.
pub fn checksum_file(path: &Path) -> std::io::Result<u32> {
    debug!("Generating checksum for {}", path.display());
    let mut file = File::open(path)?;
    checksum_reader(&mut file)
}

pub fn checksum_reader<R: Read>(reader: &mut R) -> std::io::Result<u32> {
    let mut hasher = crc32fast::Hasher::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];
    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(read) => read,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..read]);
    }
    Ok(hasher.finalize())
}
