use std::io::BufRead;

/// Reads one trimmed line. `None` on end of input or a read error, which
/// callers treat alike: nobody is there to answer.
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(e) => {
            tracing::warn!(error = %e, "reading input failed");
            None
        }
    }
}
