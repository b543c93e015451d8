use std::io::{BufRead, Seek, SeekFrom};

use crate::error::{Error, Result};

/// Strips trailing CR and LF bytes. Other whitespace is part of the word.
#[inline]
pub fn trim_line_ending(line: &[u8]) -> &[u8] {
    let mut end = line.len();
    while end > 0 && matches!(line[end - 1], b'\n' | b'\r') {
        end -= 1;
    }
    &line[..end]
}

/// Reads the word starting at byte `offset` of a dictionary.
///
/// Fails with [`Error::DictionaryOffset`] when `offset` is at or past the end
/// of the dictionary.
pub fn read_word_at<R: BufRead + Seek>(dict: &mut R, offset: u64) -> Result<Vec<u8>> {
    dict.seek(SeekFrom::Start(offset))?;
    let mut line = Vec::new();
    if dict.read_until(b'\n', &mut line)? == 0 {
        return Err(Error::DictionaryOffset { offset });
    }
    let len = trim_line_ending(&line).len();
    line.truncate(len);
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_trim_line_ending() {
        assert_eq!(trim_line_ending(b"grape\n"), b"grape");
        assert_eq!(trim_line_ending(b"grape\r\n"), b"grape");
        assert_eq!(trim_line_ending(b"grape"), b"grape");
        assert_eq!(trim_line_ending(b" grape \t\n"), b" grape \t");
        assert_eq!(trim_line_ending(b"\r\n"), b"");
    }

    #[test]
    fn test_read_word_at() {
        let mut dict = Cursor::new(b"apple\r\nbanana\n grape \nlast".to_vec());
        assert_eq!(read_word_at(&mut dict, 0).unwrap(), b"apple");
        assert_eq!(read_word_at(&mut dict, 7).unwrap(), b"banana");
        assert_eq!(read_word_at(&mut dict, 14).unwrap(), b" grape ");
        assert_eq!(read_word_at(&mut dict, 22).unwrap(), b"last");
        // Mid-word offsets read the tail of the line.
        assert_eq!(read_word_at(&mut dict, 9).unwrap(), b"nana");
    }

    #[test]
    fn test_read_word_past_end() {
        let mut dict = Cursor::new(b"apple\n".to_vec());
        assert!(matches!(read_word_at(&mut dict, 6), Err(Error::DictionaryOffset { offset: 6 })));
        assert!(matches!(read_word_at(&mut dict, 600), Err(Error::DictionaryOffset { offset: 600 })));
    }
}
