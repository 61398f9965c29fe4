//! Text command protocol spoken by the `recall` binary.
//!
//! Each request is `COMMAND[ DATA]`; each reply is one JSON document.

use crate::memory::{EngineError, RetentionEngine};
use crate::report::{concept_records, StatsRecord};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

/// Weight given to concepts created through `ADD_CONCEPT`
pub const NEW_CONCEPT_WEIGHT: f64 = 1.0;

/// Line that ends an interactive session
pub const EXIT: &str = "EXIT";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("Unknown command")]
    UnknownCommand(String),
    #[error("Malformed {command} request: {reason}")]
    Malformed { command: String, reason: String },
    #[error(transparent)]
    Engine(#[from] EngineError),
}

fn malformed(command: &str, reason: impl Into<String>) -> CommandError {
    CommandError::Malformed {
        command: command.to_string(),
        reason: reason.into(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    GetAllConcepts,
    GetStats,
    /// `None` uses the processor's default queue length
    GetRevisionQueue(Option<usize>),
    ReviseConcept(String),
    SimulateTime(u32),
    AddConcept {
        name: String,
        id: String,
        category: String,
        prerequisites: Vec<String>,
    },
    SetDecayRate(f64),
}

impl Command {
    pub fn parse(command: &str, data: &str) -> Result<Self, CommandError> {
        let data = data.trim();
        match command {
            "GET_ALL_CONCEPTS" => Ok(Self::GetAllConcepts),
            "GET_STATS" => Ok(Self::GetStats),
            "GET_REVISION_QUEUE" if data.is_empty() => Ok(Self::GetRevisionQueue(None)),
            "GET_REVISION_QUEUE" => data
                .parse()
                .map(|count| Self::GetRevisionQueue(Some(count)))
                .map_err(|e| malformed(command, format!("bad count {data:?}: {e}"))),
            "REVISE_CONCEPT" if data.is_empty() => Err(malformed(command, "missing concept id")),
            "REVISE_CONCEPT" => Ok(Self::ReviseConcept(data.to_string())),
            "SIMULATE_TIME" => {
                let days: i64 = data
                    .parse()
                    .map_err(|e| malformed(command, format!("bad day count {data:?}: {e}")))?;
                u32::try_from(days)
                    .map(Self::SimulateTime)
                    .map_err(|_| {
                        CommandError::from(EngineError::InvalidArgument(format!(
                            "days must be between 0 and {}, got {days}",
                            u32::MAX
                        )))
                    })
            }
            "ADD_CONCEPT" => Self::parse_add(data),
            "SET_DECAY_RATE" => data
                .parse()
                .map(Self::SetDecayRate)
                .map_err(|e| malformed(command, format!("bad rate {data:?}: {e}"))),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }

    /// Parses `name|id|category|prereq,prereq`
    fn parse_add(data: &str) -> Result<Self, CommandError> {
        let mut fields = data.split('|');
        let mut next = || fields.next().unwrap_or("").trim().to_string();
        let (name, id, category, prerequisites) = (next(), next(), next(), next());
        if id.is_empty() {
            return Err(malformed("ADD_CONCEPT", "expected name|id|category|prerequisites"));
        }

        let prerequisites = prerequisites
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        Ok(Self::AddConcept {
            name,
            id,
            category,
            prerequisites,
        })
    }

    /// Splits an input line at the first space
    pub fn parse_line(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (command, data) = line.split_once(' ').unwrap_or((line, ""));
        Self::parse(command, data)
    }
}

/// Owns an engine and answers protocol requests against it
#[derive(Debug)]
pub struct CommandProcessor {
    engine: RetentionEngine,
    queue_length: usize,
}

impl CommandProcessor {
    pub fn new(engine: RetentionEngine, queue_length: usize) -> Self {
        Self {
            engine,
            queue_length,
        }
    }

    pub fn engine(&self) -> &RetentionEngine {
        &self.engine
    }

    pub fn execute(&mut self, command: Command) -> Result<Value, CommandError> {
        debug!(?command, "executing command");
        let engine = &mut self.engine;
        let value = match command {
            Command::GetAllConcepts => json!(concept_records(engine.concepts())),
            Command::GetStats => json!(StatsRecord::from(&engine.stats())),
            Command::GetRevisionQueue(count) => {
                let count = count.unwrap_or(self.queue_length);
                json!(concept_records(engine.revision_queue(count)))
            }
            Command::ReviseConcept(id) => {
                engine.revise_concept(&id)?;
                json!({"status": "success", "message": "Concept revised"})
            }
            Command::SimulateTime(days) => {
                engine.advance_time(days)?;
                json!({"status": "success", "days": days})
            }
            Command::AddConcept {
                name,
                id,
                category,
                prerequisites,
            } => {
                engine.insert_concept(name, id, category, NEW_CONCEPT_WEIGHT, prerequisites)?;
                json!({"status": "success", "message": "Concept added"})
            }
            Command::SetDecayRate(rate) => {
                engine.set_decay_rate(rate)?;
                engine.refresh_strengths();
                json!({"status": "success", "rate": rate})
            }
        };
        Ok(value)
    }

    /// Parses and runs one request; failures become error documents
    pub fn respond(&mut self, command: &str, data: &str) -> Value {
        let result = Command::parse(command, data).and_then(|c| self.execute(c));
        Self::render(result)
    }

    /// Handles one input line; `None` means the session should end
    pub fn respond_line(&mut self, line: &str) -> Option<Value> {
        let line = line.trim();
        if line.is_empty() || line == EXIT {
            return None;
        }
        let result = Command::parse_line(line).and_then(|c| self.execute(c));
        Some(Self::render(result))
    }

    fn render(result: Result<Value, CommandError>) -> Value {
        result.unwrap_or_else(|err| {
            warn!(error = %err, "command failed");
            json!({"status": "error", "message": err.to_string()})
        })
    }
}
