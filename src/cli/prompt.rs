//! Blocking prompt helpers for the interactive loop.

use std::io::{self, Write};

/// Print a prompt and read one trimmed line from stdin.
pub fn prompt_line(prompt: &str) -> io::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Prompt for an integer, re-asking until a valid value at or above
/// `minimum` is entered. An empty line takes the default, when given.
pub fn prompt_int(prompt: &str, default: Option<i64>, minimum: i64) -> io::Result<i64> {
    loop {
        let suffix = match default {
            Some(value) => format!(" [default {value}]: "),
            None => ": ".to_string(),
        };
        let raw = prompt_line(&format!("{prompt}{suffix}"))?;
        if raw.is_empty() {
            if let Some(value) = default {
                return Ok(value);
            }
        }
        match raw.parse::<i64>() {
            Ok(value) if value >= minimum => return Ok(value),
            Ok(_) => println!("Enter a number >= {minimum}."),
            Err(_) => println!("Please enter a valid number."),
        }
    }
}

/// Yes/no prompt; an empty line takes the default.
pub fn prompt_yes_no(prompt: &str, default: bool) -> io::Result<bool> {
    let options = if default { "[Y/n]" } else { "[y/N]" };
    loop {
        let raw = prompt_line(&format!("{prompt} {options}: "))?.to_lowercase();
        match raw.as_str() {
            "" => return Ok(default),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => println!("Please respond with y or n."),
        }
    }
}
