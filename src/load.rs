//! Loading grammars from text.
//!
//! Each line holds one rule, `HEAD -> SYM SYM ...`, with symbols separated by
//! whitespace. Blank lines and lines starting with `#` are skipped. The symbol `ε`
//! stands for the empty string, so `A -> ε` and `A ->` mean the same.

use std::error;
use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::grammar::Cfg;
use crate::symbol::source::{END_OF_INPUT_NAME, EPSILON_NAME};

const ARROW: &str = "->";

/// An error in a grammar's text. Lines are numbered from 1.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LoadError {
    /// The line has no `->` after its head.
    MissingArrow {
        /// The line number.
        line: usize,
    },
    /// The line starts with `->`.
    MissingHead {
        /// The line number.
        line: usize,
    },
    /// ε or `$` is used as a head.
    ReservedHead {
        /// The line number.
        line: usize,
        /// The reserved name.
        name: String,
    },
    /// `$` is used in a right-hand side.
    ReservedInBody {
        /// The line number.
        line: usize,
        /// The reserved name.
        name: String,
    },
    /// The text has no rules.
    Empty,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoadError::MissingArrow { line } => {
                write!(f, "line {}: expected `{}` after the head", line, ARROW)
            }
            LoadError::MissingHead { line } => {
                write!(f, "line {}: rule has no head", line)
            }
            LoadError::ReservedHead { line, name } => {
                write!(f, "line {}: reserved symbol `{}` used as a head", line, name)
            }
            LoadError::ReservedInBody { line, name } => write!(
                f,
                "line {}: reserved symbol `{}` used in a right-hand side",
                line, name
            ),
            LoadError::Empty => write!(f, "the grammar has no rules"),
        }
    }
}

impl error::Error for LoadError {}

impl Cfg {
    /// Parses a grammar from text.
    pub fn load(text: &str) -> Result<Self, LoadError> {
        let mut cfg = Cfg::new();
        let mut rhs = vec![];
        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut tokens = line.split_whitespace();
            let head = match tokens.next() {
                Some(ARROW) | None => return Err(LoadError::MissingHead { line: line_no }),
                Some(head) => head,
            };
            if head == EPSILON_NAME || head == END_OF_INPUT_NAME {
                return Err(LoadError::ReservedHead {
                    line: line_no,
                    name: head.to_owned(),
                });
            }
            if tokens.next() != Some(ARROW) {
                return Err(LoadError::MissingArrow { line: line_no });
            }
            let lhs = cfg.named(head);
            rhs.clear();
            for token in tokens {
                if token == END_OF_INPUT_NAME {
                    return Err(LoadError::ReservedInBody {
                        line: line_no,
                        name: token.to_owned(),
                    });
                }
                rhs.push(cfg.named(token));
            }
            cfg.add_rule(lhs, &rhs);
        }
        if cfg.num_rules() == 0 {
            return Err(LoadError::Empty);
        }
        debug!(
            "loaded {} rules over {} symbols",
            cfg.num_rules(),
            cfg.sym_source().num_syms()
        );
        Ok(cfg)
    }
}

impl FromStr for Cfg {
    type Err = LoadError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Cfg::load(text)
    }
}
