use std::io::{self, BufRead, IsTerminal};

/// Where secrets are read from.
///
/// On a terminal the password is read without echo. Piped input is read one line at
/// a time so the checker can be scripted.
pub enum SecretReader {
    Terminal,
    Piped(io::StdinLock<'static>),
}

impl SecretReader {
    pub fn from_stdin() -> Self {
        let stdin = io::stdin();
        if stdin.is_terminal() { Self::Terminal } else { Self::Piped(stdin.lock()) }
    }

    /// Reads the next secret. Returns `None` once input is exhausted.
    pub fn read_secret(&mut self) -> io::Result<Option<String>> {
        match self {
            Self::Terminal => match rpassword::read_password() {
                Ok(secret) => Ok(Some(secret)),
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
                Err(e) => Err(e),
            },
            Self::Piped(lock) => read_secret_line(lock),
        }
    }
}

/// Reads one line, without its `\n` or `\r\n` terminator.
pub fn read_secret_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_read_lines_with_mixed_terminators() {
        let mut input = Cursor::new("password123\r\nhunter2\nlast");
        assert_eq!(read_secret_line(&mut input).unwrap().as_deref(), Some("password123"));
        assert_eq!(read_secret_line(&mut input).unwrap().as_deref(), Some("hunter2"));
        assert_eq!(read_secret_line(&mut input).unwrap().as_deref(), Some("last"));
        assert_eq!(read_secret_line(&mut input).unwrap(), None);
    }

    #[test]
    fn test_keeps_inner_whitespace() {
        let mut input = Cursor::new(" pass word \n\n");
        assert_eq!(read_secret_line(&mut input).unwrap().as_deref(), Some(" pass word "));
        assert_eq!(read_secret_line(&mut input).unwrap().as_deref(), Some(""));
    }
}
