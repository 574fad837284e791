use async_compression::tokio::bufread::GzipDecoder;
use async_compression::tokio::write::GzipEncoder;
use std::io;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};

/// On-disk encoding of a table file, inferred from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
}

impl Compression {
    pub fn from_path(path: &Path) -> Self {
        if path.to_string_lossy().ends_with(".gz") {
            Compression::Gzip
        } else {
            Compression::None
        }
    }
}

/// Read the whole file into memory, gunzipping `.gz` paths.
pub async fn read_source(path: &Path) -> io::Result<Vec<u8>> {
    let file = File::open(path).await?;
    let mut buf = Vec::new();

    match Compression::from_path(path) {
        Compression::None => {
            let mut reader = BufReader::new(file);
            reader.read_to_end(&mut buf).await?;
        }
        Compression::Gzip => {
            let mut decoder = GzipDecoder::new(BufReader::new(file));
            decoder.multiple_members(true);
            decoder.read_to_end(&mut buf).await?;
        }
    }

    Ok(buf)
}

/// Create or truncate `path` and write `bytes` to it, gzipping `.gz` paths.
pub async fn write_sink(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let file = File::create(path).await?;

    match Compression::from_path(path) {
        Compression::None => {
            let mut writer = tokio::io::BufWriter::new(file);
            writer.write_all(bytes).await?;
            writer.flush().await?;
        }
        Compression::Gzip => {
            let mut encoder = GzipEncoder::new(file);
            encoder.write_all(bytes).await?;
            // finishes the gzip trailer
            encoder.shutdown().await?;
        }
    }

    Ok(())
}
