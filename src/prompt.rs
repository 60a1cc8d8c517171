use std::io::{self, BufRead, Write};

/// Line-based question/answer interface over any reader and writer
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a question and return the trimmed answer
    pub fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }
        Ok(line.trim().to_string())
    }

    /// Ask a y/n question; anything but "y" or "yes" counts as no
    pub fn ask_yes_no(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.ask(&format!("{question} (y/n) "))?;
        Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
    }

    /// Ask for a positive number, repeating until one is given
    pub fn ask_count(&mut self, question: &str) -> io::Result<usize> {
        let mut answer = self.ask(question)?;
        loop {
            match answer.parse::<usize>() {
                Ok(n) if n > 0 => return Ok(n),
                _ => answer = self.ask("Please enter a valid number: ")?,
            }
        }
    }

    /// Write a line of output
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}
