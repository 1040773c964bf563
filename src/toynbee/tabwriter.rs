//! # Column-Aligned Output
//!
//! [`TabWriter`] buffers everything written to it and, on [`flush`](Write::flush),
//! turns tab-terminated cells into aligned columns using elastic tab stops:
//!
//! - A cell is the text preceding a `\t`. Text after the last tab of a line is
//!   not a cell and is never padded.
//! - A column block is a run of adjacent lines that all have a cell in that
//!   column. Every cell in the block is padded to the block width, which is the
//!   widest cell plus `padding`, but at least `min_width`.
//! - A line with fewer cells ends the blocks it does not take part in, so a
//!   diagnostic paragraph in the middle of a report does not stretch the rows
//!   around it.
//!
//! Widths are measured in terminal columns (via `unicode-width`), not bytes.
//!
//! Nothing reaches the inner writer until `flush`. The report is flushed once at
//! the end of a run.

use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

pub const DEFAULT_MIN_WIDTH: usize = 8;
pub const DEFAULT_PADDING: usize = 8;

#[derive(Debug)]
struct Cell {
    text: String,
    width: usize,
}

impl Cell {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            width: text.width(),
        }
    }
}

pub struct TabWriter<W: Write> {
    inner: W,
    buf: Vec<u8>,
    min_width: usize,
    padding: usize,
}

impl<W: Write> TabWriter<W> {
    /// Creates a writer with the default layout: min width 8, padding 8, spaces.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            min_width: DEFAULT_MIN_WIDTH,
            padding: DEFAULT_PADDING,
        }
    }

    pub fn min_width(mut self, min_width: usize) -> Self {
        self.min_width = min_width;
        self
    }

    pub fn padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    /// Returns the inner writer. Unflushed text is discarded.
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Formats the buffered text without writing it anywhere.
    fn layout(&self) -> String {
        let text = String::from_utf8_lossy(&self.buf);
        let lines: Vec<Vec<Cell>> = text
            .split('\n')
            .map(|line| line.split('\t').map(Cell::new).collect())
            .collect();

        let mut out = String::with_capacity(text.len());
        let mut widths = Vec::new();
        self.format(&mut out, &lines, &mut widths, 0, lines.len());
        out
    }

    fn format(
        &self,
        out: &mut String,
        lines: &[Vec<Cell>],
        widths: &mut Vec<usize>,
        mut line0: usize,
        line1: usize,
    ) {
        let column = widths.len();
        let mut this = line0;
        while this < line1 {
            if column + 1 >= lines[this].len() {
                this += 1;
                continue;
            }

            // This line opens a block in `column`; lines above it are done.
            self.write_lines(out, lines, widths, line0, this);
            line0 = this;

            let mut width = self.min_width;
            while this < line1 && column + 1 < lines[this].len() {
                width = width.max(lines[this][column].width + self.padding);
                this += 1;
            }

            widths.push(width);
            self.format(out, lines, widths, line0, this);
            widths.pop();
            line0 = this;
        }
        self.write_lines(out, lines, widths, line0, line1);
    }

    fn write_lines(
        &self,
        out: &mut String,
        lines: &[Vec<Cell>],
        widths: &[usize],
        line0: usize,
        line1: usize,
    ) {
        for (i, line) in lines.iter().enumerate().take(line1).skip(line0) {
            for (j, cell) in line.iter().enumerate() {
                out.push_str(&cell.text);
                if j < widths.len() {
                    let pad = widths[j].saturating_sub(cell.width);
                    out.push_str(&" ".repeat(pad));
                }
            }
            // The last segment is whatever followed the final newline.
            if i + 1 < lines.len() {
                out.push('\n');
            }
        }
    }
}

impl<W: Write> Write for TabWriter<W> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.buf.is_empty() {
            let formatted = self.layout();
            self.buf.clear();
            self.inner.write_all(formatted.as_bytes())?;
        }
        self.inner.flush()
    }
}
