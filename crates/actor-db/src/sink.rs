//! Output destination for the converted text.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Where converted text goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sink {
    /// Printed to standard output, followed by a newline.
    Stdout,
    /// Written to a file, replacing any previous content.
    File(PathBuf),
}

impl Sink {
    pub fn new(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => Sink::File(path),
            None => Sink::Stdout,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Sink::Stdout => None,
            Sink::File(path) => Some(path),
        }
    }

    /// Writes the whole text in one go.
    pub fn write(&self, text: &str) -> io::Result<()> {
        match self {
            Sink::Stdout => print_to(&mut io::stdout().lock(), text),
            Sink::File(path) => std::fs::write(path, text),
        }
    }
}

fn print_to(out: &mut impl Write, text: &str) -> io::Result<()> {
    out.write_all(text.as_bytes())?;
    out.write_all(b"\n")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn console_output_ends_with_newline() {
        let mut out = Vec::new();
        print_to(&mut out, "\n[[Actor]]").unwrap();
        assert_eq!(out, b"\n[[Actor]]\n");
    }

    #[test]
    fn file_output_is_exact_and_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("actors.toml");
        std::fs::write(&path, "previous content that is longer").unwrap();

        let sink = Sink::new(Some(path.clone()));
        sink.write("\n[[Actor]]\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "\n[[Actor]]\n");
        assert_eq!(sink.path(), Some(path.as_path()));
    }

    #[test]
    fn missing_path_means_stdout() {
        assert_eq!(Sink::new(None), Sink::Stdout);
        assert_eq!(Sink::Stdout.path(), None);
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let sink = Sink::new(Some(temp_dir.path().join("missing").join("actors.toml")));
        assert!(sink.write("x").is_err());
    }
}
