use std::io::{self, BufRead};

/// Blocking source of input lines
pub trait LineSource {
    /// Next line without its terminator, `None` at end of input
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

/// Reads from the process stdin, locking it per line.
///
/// Several `StdinLines` can coexist (event loop and picker) without one
/// buffering input that belongs to the other.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinLines;

impl LineSource for StdinLines {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        match io::stdin().read_line(&mut buf)? {
            0 => Ok(None),
            _ => Ok(Some(trim_newline(buf))),
        }
    }
}

/// Lines from any buffered reader
#[derive(Debug)]
pub struct ReaderLines<R> {
    reader: R,
}

impl<R: BufRead> ReaderLines<R> {
    /// Wrap a reader
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ReaderLines<R> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        match self.reader.read_line(&mut buf)? {
            0 => Ok(None),
            _ => Ok(Some(trim_newline(buf))),
        }
    }
}

fn trim_newline(mut line: String) -> String {
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    line
}
