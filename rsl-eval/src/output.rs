//! Destinations for `print` output.

use std::io::{self, Write};

use tracing::warn;

/// Receives the text of every executed `print` statement.
pub trait OutputSink {
    fn write(&mut self, text: &str);
}

/// Writes each printed value on its own line of the process' standard output.
///
/// A closed or failing stdout (e.g. `rsl prog.rsl | head -1`) does not abort the run;
/// the failure is logged and the value dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct Stdout;

impl OutputSink for Stdout {
    fn write(&mut self, text: &str) {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write_line(&mut handle, text);
    }
}

fn write_line<W: Write>(out: &mut W, text: &str) {
    if let Err(err) = writeln!(out, "{}", text).and_then(|()| out.flush()) {
        warn!(%err, "cannot write output");
    }
}

/// Captures printed values, one entry per `print`.
impl OutputSink for Vec<String> {
    fn write(&mut self, text: &str) {
        self.push(text.to_string());
    }
}

impl<T: OutputSink + ?Sized> OutputSink for &mut T {
    fn write(&mut self, text: &str) {
        (**self).write(text);
    }
}
