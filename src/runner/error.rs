use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("`{command}` failed: {diagnostic}")]
    Failed {
        command: String,
        exit_code: Option<i32>,
        diagnostic: String,
    },

    #[error("Unexpected output from `{command}`: {reason}")]
    UnexpectedOutput { command: String, reason: String },
}

impl RunnerError {
    /// The text worth showing to an operator
    pub fn diagnostic(&self) -> String {
        match self {
            RunnerError::Spawn { source, .. } => source.to_string(),
            RunnerError::Failed { diagnostic, .. } => diagnostic.clone(),
            RunnerError::UnexpectedOutput { reason, .. } => reason.clone(),
        }
    }
}
