use crate::util::{single_line, truncate_with_ellipsis};
use anyhow::Result;
use crossterm::{
    cursor::MoveToColumn,
    queue,
    style::Print,
    terminal::{Clear, ClearType, SetTitle},
};
use std::io::{self, Write};

/// The always-visible place the current task name is written to.
pub trait StatusIndicator: Send {
    /// Replace the visible label.
    fn set_label(&mut self, label: &str) -> Result<()>;

    /// Called once when polling stops.
    fn clear(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Shows the label as the terminal window title and as a status line that
/// is redrawn in place.
pub struct TerminalIndicator<W: Write + Send = io::Stdout> {
    out: W,
    max_width: usize,
    drawn: bool,
}

impl TerminalIndicator<io::Stdout> {
    pub fn stdout(max_width: usize) -> Self {
        Self::new(io::stdout(), max_width)
    }
}

impl<W: Write + Send> TerminalIndicator<W> {
    pub fn new(out: W, max_width: usize) -> Self {
        Self {
            out,
            max_width,
            drawn: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> StatusIndicator for TerminalIndicator<W> {
    fn set_label(&mut self, label: &str) -> Result<()> {
        let text = truncate_with_ellipsis(&single_line(label), self.max_width);
        queue!(
            self.out,
            SetTitle(&text),
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(&text)
        )?;
        self.out.flush()?;
        self.drawn = true;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        if self.drawn {
            queue!(self.out, SetTitle(""), Print("\n"))?;
            self.out.flush()?;
            self.drawn = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(indicator: TerminalIndicator<Vec<u8>>) -> String {
        String::from_utf8(indicator.into_inner()).unwrap()
    }

    #[test]
    fn test_label_is_written_and_flattened() {
        let mut indicator = TerminalIndicator::new(Vec::new(), 40);
        indicator.set_label("Write\nreport").unwrap();
        let out = rendered(indicator);
        assert!(out.contains("Write report"));
        assert!(!out.contains("Write\nreport"));
    }

    #[test]
    fn test_long_label_is_truncated() {
        let mut indicator = TerminalIndicator::new(Vec::new(), 8);
        indicator.set_label("A very long task name").unwrap();
        let out = rendered(indicator);
        assert!(out.contains("A very …"));
        assert!(!out.contains("long task"));
    }

    #[test]
    fn test_clear_only_after_drawing() {
        let mut indicator = TerminalIndicator::new(Vec::new(), 40);
        indicator.clear().unwrap();
        assert!(rendered(indicator).is_empty());

        let mut indicator = TerminalIndicator::new(Vec::new(), 40);
        indicator.set_label("x").unwrap();
        indicator.clear().unwrap();
        assert!(rendered(indicator).ends_with('\n'));
    }
}
