//! Terminal status readout
//!
//! One line holding each lane's last distance (`-1` when nothing is seen),
//! rewritten in place with a carriage return every cycle.

use std::io::{self, Write};

use dmxtrack_core::LaneState;

/// Format the distances of all lanes, 5 columns each
pub fn format_status(lanes: &[LaneState]) -> String {
    lanes
        .iter()
        .map(|lane| format!("{:5}", lane.last_distance.unwrap_or(-1)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// In-place status line on a terminal
pub struct StatusLine<W: Write> {
    out: W,
    written: bool,
}

impl StatusLine<io::Stdout> {
    /// Status line on stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> StatusLine<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            written: false,
        }
    }

    /// Overwrite the line with the current distances
    pub fn update(&mut self, lanes: &[LaneState]) -> io::Result<()> {
        write!(self.out, "\r{}", format_status(lanes))?;
        self.out.flush()?;
        self.written = true;
        Ok(())
    }

    /// Terminate the line so later output starts on a fresh one
    pub fn finish(&mut self) -> io::Result<()> {
        if self.written {
            writeln!(self.out)?;
            self.out.flush()?;
            self.written = false;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lane(distance: Option<i32>) -> LaneState {
        LaneState {
            lateral_offset: 0,
            max_range: 13300,
            last_distance: distance,
            velocity: 0,
        }
    }

    #[test]
    fn test_format_status() {
        assert_eq!(format_status(&[lane(None), lane(Some(4210))]), "   -1  4210");
        assert_eq!(format_status(&[lane(Some(13300))]), "13300");
    }

    #[test]
    fn test_status_line_rewrites() {
        let mut line = StatusLine::new(Vec::new());
        line.update(&[lane(Some(600)), lane(None)]).unwrap();
        line.update(&[lane(Some(700)), lane(None)]).unwrap();
        line.finish().unwrap();
        line.finish().unwrap();

        let text = String::from_utf8(line.into_inner()).unwrap();
        assert_eq!(text, "\r  600    -1\r  700    -1\n");
    }
}
