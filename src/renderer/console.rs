use crate::models::{Reading, Snapshot};
use std::io::{self, Stdout, Write};

pub fn format_reading(reading: &Reading) -> String {
    match &reading.extra {
        Some(extra) => format!(
            "{}: {} {} ({})",
            reading.name, reading.value, reading.unit, extra
        ),
        None => format!("{}: {} {}", reading.name, reading.value, reading.unit),
    }
}

/// Writes each snapshot as plain text lines.
pub struct ConsoleRenderer<W: Write> {
    out: W,
}

impl ConsoleRenderer<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn render(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        writeln!(self.out, "{}", snapshot.updated_at_display())?;
        for reading in &snapshot.readings {
            writeln!(self.out, "{}", format_reading(reading))?;
        }
        self.out.flush()
    }
}
