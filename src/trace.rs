//! Recorded register traces: a flat file of `(register, value)` byte pairs.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{info, warn};

pub fn load_trace<P: AsRef<Path>>(path: P) -> std::io::Result<Vec<(u32, u32)>> {
    let mut bytes = Vec::new();
    File::open(&path)?.read_to_end(&mut bytes)?;
    info!(path = %path.as_ref().display(), len = bytes.len(), "loaded register trace");
    Ok(parse_trace(&bytes))
}

pub fn parse_trace(bytes: &[u8]) -> Vec<(u32, u32)> {
    let pairs = bytes.chunks_exact(2);
    if !pairs.remainder().is_empty() {
        warn!(len = bytes.len(), "trace has an odd length, dropping the last byte");
    }
    pairs
        .map(|pair| (pair[0] as u32, pair[1] as u32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_become_writes() {
        assert_eq!(parse_trace(&[0, 0xFF, 15, 1]), vec![(0, 0xFF), (15, 1)]);
    }

    #[test]
    fn trailing_byte_is_dropped() {
        assert_eq!(parse_trace(&[1, 2, 3]), vec![(1, 2)]);
        assert!(parse_trace(&[]).is_empty());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_trace("/nonexistent/matrix.trace").is_err());
    }

    #[test]
    fn loads_from_disk() {
        let path = std::env::temp_dir().join(format!("matrix-{}.trace", std::process::id()));
        std::fs::write(&path, [0u8, 0x81, 1, 0x01]).unwrap();

        let writes = load_trace(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(writes, vec![(0, 0x81), (1, 0x01)]);
    }
}
