//! Loading a channel from a CSV recording
//!
//! Recordings have a header row naming columns `channel-0`, `channel-1`, ...
//! (other columns such as timestamps are allowed) and one sample per row.

use log::debug;
use std::io::BufRead;
use std::path::Path;

use crate::error::{AlphaError, Result};

/// Header name of a channel column
pub fn channel_column(channel: usize) -> String {
    format!("channel-{channel}")
}

/// Read one channel from CSV text
pub fn read_channel_from<R: BufRead>(reader: R, channel: usize) -> Result<Vec<f64>> {
    let mut lines = reader.lines();
    let wanted = channel_column(channel);

    let header = match lines.next() {
        Some(line) => line?,
        None => return Err(AlphaError::ChannelNotFound { channel }),
    };
    let column = header
        .split(',')
        .map(|name| name.trim().trim_matches('"'))
        .position(|name| name == wanted)
        .ok_or(AlphaError::ChannelNotFound { channel })?;

    let mut samples = Vec::new();
    for (idx, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        // Header is line 1
        let line_no = idx + 2;

        let cell = line
            .split(',')
            .nth(column)
            .map(|c| c.trim().trim_matches('"'))
            .ok_or_else(|| AlphaError::Parse {
                line: line_no,
                value: line.clone(),
            })?;
        let value = cell.parse::<f64>().map_err(|_| AlphaError::Parse {
            line: line_no,
            value: cell.to_string(),
        })?;
        samples.push(value);
    }

    debug!("read {} samples from column '{}'", samples.len(), wanted);
    Ok(samples)
}

/// Read one channel from a CSV file
pub fn read_channel(path: impl AsRef<Path>, channel: usize) -> Result<Vec<f64>> {
    let file = std::fs::File::open(path.as_ref())?;
    read_channel_from(std::io::BufReader::new(file), channel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const RECORDING: &str = "timestamp,channel-0,channel-1\n\
                             0.000,1.5,-2\n\
                             0.004,2.5,3e-1\n\
                             \n";

    #[test]
    fn test_reads_requested_channel() {
        let ch0 = read_channel_from(Cursor::new(RECORDING), 0).unwrap();
        let ch1 = read_channel_from(Cursor::new(RECORDING), 1).unwrap();
        assert_eq!(ch0, vec![1.5, 2.5]);
        assert_eq!(ch1, vec![-2.0, 0.3]);
    }

    #[test]
    fn test_missing_channel() {
        let err = read_channel_from(Cursor::new(RECORDING), 4).unwrap_err();
        assert!(matches!(err, AlphaError::ChannelNotFound { channel: 4 }));

        let err = read_channel_from(Cursor::new(""), 0).unwrap_err();
        assert!(matches!(err, AlphaError::ChannelNotFound { channel: 0 }));
    }

    #[test]
    fn test_malformed_value() {
        let text = "channel-0\n1.0\nabc\n";
        let err = read_channel_from(Cursor::new(text), 0).unwrap_err();
        match err {
            AlphaError::Parse { line, value } => {
                assert_eq!(line, 3);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_quoted_header() {
        let text = "\"channel-0\"\n4\n5\n";
        assert_eq!(read_channel_from(Cursor::new(text), 0).unwrap(), vec![4.0, 5.0]);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_channel("/definitely/not/here.csv", 0),
            Err(AlphaError::Io(_))
        ));
    }
}
