use std::io::{self, BufRead, Write};

/// Ask a yes/no question on stdout and read the answer from stdin.
///
/// An empty answer takes `default`; with no default the question is
/// repeated. End of input counts as "no".
pub fn confirm(prompt: &str, default: Option<bool>) -> io::Result<bool> {
    let stdin = io::stdin();
    let mut input = String::new();

    loop {
        input.clear();

        match default {
            Some(true) => print!("{prompt} (Y/n): "),
            Some(false) | None => print!("{prompt} (y/N): "),
        }
        io::stdout().flush()?;

        if stdin.lock().read_line(&mut input)? == 0 {
            return Ok(false);
        }

        match input.trim().to_uppercase().as_str() {
            "Y" | "YES" => return Ok(true),
            "N" | "NO" => return Ok(false),
            "" => {
                if let Some(default) = default {
                    return Ok(default);
                }
            }
            _ => {}
        }
    }
}
