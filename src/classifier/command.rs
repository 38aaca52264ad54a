use super::{Classifier, ClassifierError, LabelScore};
use serde_json::Value;
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use std::thread;

/// Runs an external program that hosts the model.
///
/// The text is written to the program's stdin. Its stdout must be JSON, either
/// a list of `{"label", "score"}` objects or the pipeline's nested `[[...]]`
/// form. The configured model name is exported as `NEWSCHECK_MODEL`.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandClassifier {
    program: String,
    args: Vec<String>,
    model: Option<String>,
}

impl CommandClassifier {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            model: None,
        }
    }

    /// Build from an argv list such as `["python3", "classify.py"]`.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.clone()).args(args.iter().cloned()))
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Classifier for CommandClassifier {
    fn name(&self) -> &'static str {
        "command"
    }

    fn classify(&self, text: &str) -> Result<Vec<LabelScore>, ClassifierError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(model) = &self.model {
            cmd.env("NEWSCHECK_MODEL", model);
        }

        tracing::debug!(program = %self.program, args = ?self.args, "spawning classifier");
        let mut child = cmd.spawn().map_err(|e| {
            ClassifierError::Unavailable(format!("failed to start {}: {}", self.program, e))
        })?;

        // Feed stdin from its own thread while stdout and stderr are drained,
        // otherwise a chatty child fills a pipe and both sides block.
        let stdin = child.stdin.take();
        let (written, output) = thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(text.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            (writer.join(), output)
        });

        let output = output.map_err(|e| {
            ClassifierError::Unavailable(format!("{} did not finish: {}", self.program, e))
        })?;

        match written {
            // A classifier that exits without reading its input still gets
            // its output inspected below.
            Ok(Err(e)) if e.kind() != ErrorKind::BrokenPipe => {
                return Err(ClassifierError::Unavailable(format!(
                    "failed to send text to {}: {}",
                    self.program, e
                )));
            }
            Err(_) => {
                return Err(ClassifierError::Unavailable(format!(
                    "writer for {} panicked",
                    self.program
                )));
            }
            Ok(_) => {}
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ClassifierError::Unavailable(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        parse_scores(&output.stdout)
    }
}

/// Parse classifier stdout into label scores.
pub fn parse_scores(bytes: &[u8]) -> Result<Vec<LabelScore>, ClassifierError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| ClassifierError::MalformedOutput(e.to_string()))?;

    let entries = match value {
        Value::Array(mut items) if items.first().is_some_and(Value::is_array) => {
            items.swap_remove(0)
        }
        other => other,
    };

    serde_json::from_value(entries).map_err(|e| ClassifierError::MalformedOutput(e.to_string()))
}
