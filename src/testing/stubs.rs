use std::cell::RefCell;
use std::collections::VecDeque;

use anyhow::{Result, anyhow, bail};

use crate::ui::cli::drivers::PromptDriver;

#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Select(usize),
    F64(f64),
    Str(String),
}

/// Replays a fixed list of answers; errors once the script runs out.
pub struct ScriptedDriver {
    answers: RefCell<VecDeque<Answer>>,
}

impl ScriptedDriver {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: RefCell::new(answers.into()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }

    fn next(&self, title: &str) -> Result<Answer> {
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted answer left for '{title}'"))
    }
}

impl PromptDriver for ScriptedDriver {
    fn ask_string(&self, title: &str, _help: &str, _default: &str) -> Result<String> {
        match self.next(title)? {
            Answer::Str(s) => Ok(s),
            other => bail!("expected a string answer for '{title}', got {other:?}"),
        }
    }

    fn ask_f64(&self, title: &str, _help: &str, _default: f64, min: f64, max: f64) -> Result<f64> {
        match self.next(title)? {
            Answer::F64(v) if v >= min && v <= max => Ok(v),
            Answer::F64(v) => bail!("{v} outside [{min}, {max}] for '{title}'"),
            other => bail!("expected a number for '{title}', got {other:?}"),
        }
    }

    fn ask_select(&self, title: &str, _help: &str, options: &[String]) -> Result<usize> {
        match self.next(title)? {
            Answer::Select(i) if i < options.len() => Ok(i),
            Answer::Select(i) => bail!("option {i} out of range for '{title}'"),
            other => bail!("expected a selection for '{title}', got {other:?}"),
        }
    }
}
