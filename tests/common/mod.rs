//! Scripted package manager for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use rustle_cask::config::ToolConfig;
use rustle_cask::runner::{CommandLine, CommandRunner, ExecutionOutcome, RunnerError};
use rustle_cask::PackageManagerClient;
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::Mutex;

pub const ROOT: &str = "/usr/local/Caskroom";

/// Answers commands from a script keyed by their argument list.
///
/// Each key holds a queue; the last response is repeated once the queue is
/// down to one entry.
#[derive(Default)]
pub struct ScriptedRunner {
    responses: Mutex<HashMap<Vec<String>, VecDeque<Response>>>,
    calls: Mutex<Vec<CommandLine>>,
}

#[derive(Clone)]
enum Response {
    Outcome(ExecutionOutcome),
    SpawnFailure(String),
}

fn key(args: &[&str]) -> Vec<String> {
    args.iter().map(|arg| arg.to_string()).collect()
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, args: &[&str], outcome: ExecutionOutcome) -> Self {
        self.push(args, Response::Outcome(outcome));
        self
    }

    pub fn on_success(self, args: &[&str], stdout: &str) -> Self {
        self.on(args, ExecutionOutcome::success(stdout))
    }

    pub fn on_spawn_failure(self, args: &[&str], reason: &str) -> Self {
        self.push(args, Response::SpawnFailure(reason.to_string()));
        self
    }

    fn push(&self, args: &[&str], response: Response) {
        self.responses
            .lock()
            .unwrap()
            .entry(key(args))
            .or_default()
            .push_back(response);
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|command| command.args.clone())
            .collect()
    }

    pub fn count(&self, args: &[&str]) -> usize {
        let wanted = key(args);
        self.calls().iter().filter(|call| **call == wanted).count()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, command: &CommandLine) -> Result<ExecutionOutcome, RunnerError> {
        self.calls.lock().unwrap().push(command.clone());

        let response = {
            let mut responses = self.responses.lock().unwrap();
            match responses.get_mut(&command.args) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match response {
            Some(Response::Outcome(outcome)) => Ok(outcome),
            Some(Response::SpawnFailure(reason)) => Err(RunnerError::Spawn {
                command: command.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, reason),
            }),
            None => Ok(ExecutionOutcome::failure(
                127,
                format!("unexpected command: {command}"),
            )),
        }
    }
}

pub fn config() -> ToolConfig {
    ToolConfig {
        install_root: Some(PathBuf::from(ROOT)),
        ..ToolConfig::default()
    }
}

pub fn client(runner: ScriptedRunner) -> PackageManagerClient<ScriptedRunner> {
    PackageManagerClient::new(config(), runner)
}

pub fn firefox_info(version: &str) -> String {
    format!(
        "firefox: {version} (auto_updates)\n\
         https://www.mozilla.org/firefox/\n\
         {ROOT}/firefox/{version} (123B)\n\
         From: https://github.com/Homebrew/homebrew-cask/blob/HEAD/Casks/firefox.rb\n\
         ==> Name\n\
         Mozilla Firefox\n"
    )
}
