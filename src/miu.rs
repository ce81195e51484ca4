use std::collections::{HashSet, VecDeque};

use crate::error::{StrangeloopError, StrangeloopResult};

/// The axiom every derivation starts from.
pub const AXIOM: &str = "MI";

/// The four rewrite rules of the MIU system.
///
/// The substring rules (III and IV) rewrite exactly the first occurrence;
/// multi-match strings are never rewritten exhaustively or
/// nondeterministically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Rule I: `xI -> xIU`.
    AppendU,
    /// Rule II: `Mx -> Mxx`.
    DoubleTail,
    /// Rule III: `xIIIy -> xUy`, first occurrence.
    CollapseTripleI,
    /// Rule IV: `xUUy -> xy`, first occurrence.
    DropDoubleU,
}

impl Rule {
    pub const ALL: [Rule; 4] = [
        Rule::AppendU,
        Rule::DoubleTail,
        Rule::CollapseTripleI,
        Rule::DropDoubleU,
    ];

    /// Roman numeral as the lesson names the rules.
    pub fn numeral(self) -> &'static str {
        match self {
            Rule::AppendU => "I",
            Rule::DoubleTail => "II",
            Rule::CollapseTripleI => "III",
            Rule::DropDoubleU => "IV",
        }
    }
}

impl std::str::FromStr for Rule {
    type Err = StrangeloopError;

    fn from_str(s: &str) -> StrangeloopResult<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "I" | "1" => Ok(Rule::AppendU),
            "II" | "2" => Ok(Rule::DoubleTail),
            "III" | "3" => Ok(Rule::CollapseTripleI),
            "IV" | "4" => Ok(Rule::DropDoubleU),
            other => Err(StrangeloopError::derivation(format!(
                "unknown rule '{other}' (expected I, II, III or IV)"
            ))),
        }
    }
}

/// Apply one rule to a string, or explain why it does not apply.
pub fn apply(s: &str, rule: Rule) -> StrangeloopResult<String> {
    match rule {
        Rule::AppendU => {
            if s.ends_with('I') {
                Ok(format!("{s}U"))
            } else {
                Err(StrangeloopError::derivation(
                    "rule I needs a string ending in I",
                ))
            }
        }
        Rule::DoubleTail => match s.strip_prefix('M') {
            Some(tail) => Ok(format!("M{tail}{tail}")),
            None => Err(StrangeloopError::derivation(
                "rule II needs a string starting with M",
            )),
        },
        Rule::CollapseTripleI => {
            if s.contains("III") {
                Ok(s.replacen("III", "U", 1))
            } else {
                Err(StrangeloopError::derivation(
                    "rule III needs the string to contain III",
                ))
            }
        }
        Rule::DropDoubleU => {
            if s.contains("UU") {
                Ok(s.replacen("UU", "", 1))
            } else {
                Err(StrangeloopError::derivation(
                    "rule IV needs the string to contain UU",
                ))
            }
        }
    }
}

/// A derivation: the axiom plus every accepted rewrite, oldest first.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Derivation {
    history: Vec<String>,
}

impl Derivation {
    pub fn new(axiom: impl Into<String>) -> Self {
        Self {
            history: vec![axiom.into()],
        }
    }

    pub fn current(&self) -> &str {
        self.history.last().expect("history is never empty")
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Apply a rule to the current theorem. A rejected rule leaves the
    /// derivation unchanged.
    pub fn apply(&mut self, rule: Rule) -> StrangeloopResult<&str> {
        let next = apply(self.current(), rule)?;
        self.history.push(next);
        Ok(self.current())
    }

    /// Truncate back to the axiom.
    pub fn reset(&mut self) {
        self.history.truncate(1);
    }
}

impl Default for Derivation {
    fn default() -> Self {
        Self::new(AXIOM)
    }
}

/// Bounded breadth-first search: can `target` be derived from `start`?
///
/// Strings longer than `max_len` are not expanded and at most
/// `max_visited` distinct strings are explored, so the search always
/// terminates. A `false` result means the target was not found within the
/// bounds. For "MU" that is the whole lesson: the system loops forever
/// and only stepping outside it reveals why.
pub fn reachable(start: &str, target: &str, max_len: usize, max_visited: usize) -> bool {
    let mut seen: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<String> = VecDeque::new();
    seen.insert(start.to_string());
    queue.push_back(start.to_string());

    while let Some(s) = queue.pop_front() {
        if s == target {
            return true;
        }
        if seen.len() >= max_visited {
            return false;
        }
        for rule in Rule::ALL {
            let Ok(next) = apply(&s, rule) else {
                continue;
            };
            if next.len() > max_len || seen.contains(&next) {
                continue;
            }
            seen.insert(next.clone());
            queue.push_back(next);
        }
    }
    false
}
