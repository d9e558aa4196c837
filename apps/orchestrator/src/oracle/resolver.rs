//! Map an oracle's free-text reply onto one of the offered options.
//!
//! Precedence:
//! 1. an exact option-id token, case-insensitive (`"I pick p3."` -> `P3`);
//! 2. an option label (player name) appearing verbatim, earliest occurrence
//!    first and the longest label on ties;
//! 3. the abstain token, when abstaining is allowed;
//! 4. otherwise [`ResolveError::NoMatch`].

use lazy_regex::regex;
use thiserror::Error;

use crate::domain::decision::{ActionOption, Choice, ABSTAIN_ID};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no offered option found in reply '{0}'")]
    NoMatch(String),
}

pub fn resolve_choice(
    reply: &str,
    options: &[ActionOption],
    allow_abstain: bool,
) -> Result<Choice, ResolveError> {
    let tokens = regex!(r"[A-Za-z0-9_]+");
    for token in tokens.find_iter(reply) {
        if let Some(opt) = options
            .iter()
            .find(|o| o.id.eq_ignore_ascii_case(token.as_str()))
        {
            return Ok(Choice::Pick(opt.id.clone()));
        }
    }

    let by_label = options
        .iter()
        .filter(|o| !o.label.is_empty())
        .filter_map(|o| reply.find(o.label.as_str()).map(|pos| (pos, o)))
        .min_by(|(pa, a), (pb, b)| pa.cmp(pb).then(b.label.len().cmp(&a.label.len())));
    if let Some((_, opt)) = by_label {
        return Ok(Choice::Pick(opt.id.clone()));
    }

    if allow_abstain
        && tokens
            .find_iter(reply)
            .any(|t| t.as_str().eq_ignore_ascii_case(ABSTAIN_ID))
    {
        return Ok(Choice::Abstain);
    }

    Err(ResolveError::NoMatch(reply.to_string()))
}
