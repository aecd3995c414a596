use crate::application::app::Command;
use crate::error::{LearnHubError, Result};
use serde::Deserialize;
use std::io::Read;

/// One row of a session script: `command, arg, value`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct ScriptRow {
    pub command: String,
    pub arg: Option<String>,
    pub value: Option<String>,
}

impl ScriptRow {
    fn arg(&self) -> Result<&str> {
        self.arg.as_deref().ok_or_else(|| {
            LearnHubError::CommandError(format!("'{}' needs an argument", self.command))
        })
    }
}

impl TryFrom<ScriptRow> for Command {
    type Error = LearnHubError;

    fn try_from(row: ScriptRow) -> Result<Self> {
        let command = match row.command.to_ascii_lowercase().as_str() {
            "login" => Command::Login {
                email: row.arg()?.to_string(),
                name: row.value.clone().unwrap_or_default(),
            },
            "select" => Command::SelectCourse {
                course_id: row.arg()?.to_string(),
            },
            "method" => Command::SelectMethod(row.arg()?.parse()?),
            "field" => Command::SetField {
                field: row.arg()?.parse()?,
                value: row.value.clone().unwrap_or_default(),
            },
            "pay" => Command::Pay,
            "back" => Command::Back,
            "receipt" => Command::DownloadReceipt,
            "logout" => Command::Logout,
            other => {
                return Err(LearnHubError::CommandError(format!(
                    "unknown command '{other}'"
                )));
            }
        };
        Ok(command)
    }
}

/// Reads session commands from a CSV source.
///
/// Wraps `csv::Reader` with whitespace trimming and flexible record lengths,
/// so trailing empty columns may be left out.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily yields one command per row; bad rows yield an error and the
    /// iteration continues.
    pub fn commands(self) -> impl Iterator<Item = Result<Command>> {
        self.reader
            .into_deserialize::<ScriptRow>()
            .map(|row| row.map_err(LearnHubError::from).and_then(Command::try_from))
    }
}
