use std::collections::VecDeque;
use std::io::{ self, BufRead, Write };

use crate::error::ChatError;

/// Source of operator lines: chat input and the answers to setup prompts.
pub trait InputProvider {
    /// Shows `prompt` and blocks for one line. `Ok(None)` means end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ChatError>;
}

/// Reads from any buffered reader, echoing prompts to a writer.
pub struct LineInput<R, W> {
    reader: R,
    prompt_out: W,
}

impl<R: BufRead, W: Write> LineInput<R, W> {
    pub fn new(reader: R, prompt_out: W) -> Self {
        Self { reader, prompt_out }
    }
}

pub type StdinInput = LineInput<io::StdinLock<'static>, io::Stdout>;

pub fn stdin() -> StdinInput {
    LineInput::new(io::stdin().lock(), io::stdout())
}

impl<R: BufRead, W: Write> InputProvider for LineInput<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ChatError> {
        write!(self.prompt_out, "{}", prompt).map_err(ChatError::Input)?;
        self.prompt_out.flush().map_err(ChatError::Input)?;

        let mut raw = Vec::new();
        let read = self.reader.read_until(b'\n', &mut raw).map_err(ChatError::Input)?;
        if read == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&raw);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Fixed lines handed out in order; runs dry like a closed stdin.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self where I: IntoIterator<Item = S>, S: Into<String> {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Prompts shown so far.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl InputProvider for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ChatError> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_input_strips_line_endings_and_echoes_prompt() {
        let mut out = Vec::new();
        {
            let mut input = LineInput::new("first\r\nsecond\n".as_bytes(), &mut out);
            assert_eq!(input.read_line("> ").unwrap().as_deref(), Some("first"));
            assert_eq!(input.read_line("> ").unwrap().as_deref(), Some("second"));
            assert_eq!(input.read_line("> ").unwrap(), None);
        }
        assert_eq!(String::from_utf8(out).unwrap(), "> > > ");
    }

    #[test]
    fn invalid_utf8_is_replaced_not_fatal() {
        let bytes: &[u8] = b"caf\xe9\nnext\n";
        let mut input = LineInput::new(bytes, io::sink());
        assert_eq!(input.read_line("").unwrap().as_deref(), Some("caf\u{FFFD}"));
        assert_eq!(input.read_line("").unwrap().as_deref(), Some("next"));
    }

    #[test]
    fn empty_line_is_not_end_of_input() {
        let mut input = LineInput::new("\n".as_bytes(), io::sink());
        assert_eq!(input.read_line("").unwrap().as_deref(), Some(""));
        assert_eq!(input.read_line("").unwrap(), None);
    }

    #[test]
    fn scripted_input_records_prompts() {
        let mut input = ScriptedInput::new(["a"]);
        assert_eq!(input.read_line("key: ").unwrap().as_deref(), Some("a"));
        assert_eq!(input.read_line("file: ").unwrap(), None);
        assert_eq!(input.prompts(), ["key: ", "file: "]);
    }
}
