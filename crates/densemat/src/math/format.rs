use std::fmt;
use std::io;

use crate::config::FormatConfig;
use crate::math::{Matrix, Scalar};

impl<T: Scalar> Matrix<T> {
    fn render<W: fmt::Write>(&self, out: &mut W, config: &FormatConfig) -> fmt::Result {
        for row in self.dense().chunks(self.cols) {
            for (idx, value) in row.iter().enumerate() {
                if idx > 0 {
                    out.write_str(&config.separator)?;
                }
                match config.precision {
                    Some(p) => write!(out, "{:.*}", p, value)?,
                    None => write!(out, "{}", value)?,
                }
            }
            out.write_char('\n')?;
        }
        Ok(())
    }

    /// Print the matrix to `sink`, one row per line, elements separated by a
    /// single space.
    pub fn write_to<W: io::Write>(&self, sink: &mut W) -> io::Result<()> {
        self.write_with(sink, &FormatConfig::default())
    }

    pub fn write_with<W: io::Write>(&self, sink: &mut W, config: &FormatConfig) -> io::Result<()> {
        let mut text = String::new();
        self.render(&mut text, config)
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "failed to format matrix"))?;
        sink.write_all(text.as_bytes())
    }
}

impl<T: Scalar> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, &FormatConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_to_rows_per_line() {
        let m = Matrix::from_shape_vec((2, 3), vec![1, 2, 3, 4, 5, 6]).unwrap();
        let mut sink = Vec::new();
        m.write_to(&mut sink).unwrap();
        assert_eq!(String::from_utf8(sink).unwrap(), "1 2 3\n4 5 6\n");
        assert_eq!(m.to_string(), "1 2 3\n4 5 6\n");
    }

    #[test]
    fn test_write_with_precision() {
        let m = Matrix::from_shape_vec((1, 2), vec![0.5, -1.25]).unwrap();
        let mut sink = Vec::new();
        m.write_with(&mut sink, &FormatConfig::new(", ", Some(2)))
            .unwrap();
        assert_eq!(String::from_utf8(sink).unwrap(), "0.50, -1.25\n");
    }
}
