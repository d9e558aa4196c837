//! Sheriff election sub-machine.
//!
//! Signup, then speeches (with withdrawal), then up to two voting rounds.
//! A round-1 tie restricts the contest to the tied candidates; a round-2 tie
//! forfeits the badge. The election runs once, on its scheduled day; a wolf
//! self-destruct mid-election pushes it to the following day.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::domain::roster::{PlayerId, Roster};
use crate::domain::tally::{self, NORMAL_WEIGHT, SHERIFF_WEIGHT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum ElectionStage {
    NotStarted,
    Signup,
    Speech,
    Vote { round: u8 },
    Decided,
    Forfeited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForfeitReason {
    NoCandidates,
    AllWithdrew,
    NoVoters,
    NoBallots,
    RunoffTie,
}

impl ForfeitReason {
    pub const fn describe(self) -> &'static str {
        match self {
            ForfeitReason::NoCandidates => "nobody ran",
            ForfeitReason::AllWithdrew => "every candidate withdrew",
            ForfeitReason::NoVoters => "nobody was left to vote",
            ForfeitReason::NoBallots => "no ballots were cast",
            ForfeitReason::RunoffTie => "the runoff tied again",
        }
    }
}

/// What closing a stage produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElectionOutcome {
    /// Moved on to the named stage.
    Advanced(ElectionStage),
    Elected { sheriff: PlayerId, unopposed: bool },
    Runoff(Vec<PlayerId>),
    Forfeited(ForfeitReason),
}

#[derive(Debug, Clone)]
pub struct SheriffState {
    pub(crate) scheduled_day: Option<u32>,
    pub(crate) stage: ElectionStage,
    pub(crate) signups: BTreeSet<PlayerId>,
    pub(crate) candidates: Vec<PlayerId>,
    pub(crate) withdrawn: BTreeSet<PlayerId>,
    /// Candidates on the current ballot.
    pub(crate) contest: Vec<PlayerId>,
    pub(crate) ballots: BTreeMap<PlayerId, PlayerId>,
    pub(crate) elected: Option<PlayerId>,
}

impl SheriffState {
    pub fn new(enabled: bool) -> Self {
        Self {
            scheduled_day: enabled.then_some(1),
            stage: ElectionStage::NotStarted,
            signups: BTreeSet::new(),
            candidates: Vec::new(),
            withdrawn: BTreeSet::new(),
            contest: Vec::new(),
            ballots: BTreeMap::new(),
            elected: None,
        }
    }

    pub fn stage(&self) -> ElectionStage {
        self.stage
    }

    pub fn scheduled_day(&self) -> Option<u32> {
        self.scheduled_day
    }

    pub fn elected(&self) -> Option<PlayerId> {
        self.elected
    }

    pub fn candidates(&self) -> &[PlayerId] {
        &self.candidates
    }

    pub fn contest(&self) -> &[PlayerId] {
        &self.contest
    }

    pub fn is_due(&self, day: u32) -> bool {
        self.scheduled_day == Some(day)
            && !matches!(self.stage, ElectionStage::Decided | ElectionStage::Forfeited)
    }

    pub fn in_progress(&self) -> bool {
        matches!(
            self.stage,
            ElectionStage::Signup | ElectionStage::Speech | ElectionStage::Vote { .. }
        )
    }

    /// Elected sheriff, if still alive.
    pub fn active_sheriff(&self, roster: &Roster) -> Option<PlayerId> {
        self.elected.filter(|&id| roster.is_alive(id))
    }

    /// Exile-vote weight in half-votes. Only a living sheriff who may still vote counts 1.5x.
    pub fn vote_weight(&self, roster: &Roster, voter: PlayerId) -> u32 {
        let carries_badge = self.active_sheriff(roster) == Some(voter)
            && roster.get(voter).is_some_and(|p| p.flags.can_vote);
        if carries_badge {
            SHERIFF_WEIGHT
        } else {
            NORMAL_WEIGHT
        }
    }

    pub(crate) fn open_signup(&mut self) {
        self.stage = ElectionStage::Signup;
        self.signups.clear();
    }

    pub(crate) fn record_signup(&mut self, id: PlayerId) {
        self.signups.insert(id);
    }

    pub(crate) fn close_signup(&mut self) -> ElectionOutcome {
        self.candidates = self.signups.iter().copied().collect();
        if self.candidates.is_empty() {
            return self.forfeit(ForfeitReason::NoCandidates);
        }
        self.stage = ElectionStage::Speech;
        ElectionOutcome::Advanced(self.stage)
    }

    pub(crate) fn withdraw(&mut self, id: PlayerId) {
        self.withdrawn.insert(id);
    }

    /// Candidates still standing, in seat order.
    pub fn remaining(&self) -> Vec<PlayerId> {
        self.candidates
            .iter()
            .copied()
            .filter(|id| !self.withdrawn.contains(id))
            .collect()
    }

    /// Drop candidates who died (self-destructed) before the vote.
    pub(crate) fn close_speeches(&mut self, roster: &Roster) -> ElectionOutcome {
        let remaining: Vec<PlayerId> = self
            .remaining()
            .into_iter()
            .filter(|&id| roster.is_alive(id))
            .collect();
        match remaining.as_slice() {
            [] => self.forfeit(ForfeitReason::AllWithdrew),
            [only] => self.decide(*only, true),
            _ => {
                self.contest = remaining;
                self.ballots.clear();
                self.stage = ElectionStage::Vote { round: 1 };
                ElectionOutcome::Advanced(self.stage)
            }
        }
    }

    /// Living, vote-eligible players not on the ballot.
    pub fn eligible_voters(&self, roster: &Roster) -> Vec<PlayerId> {
        roster
            .living()
            .filter(|p| p.flags.can_vote && !self.contest.contains(&p.id))
            .map(|p| p.id)
            .collect()
    }

    pub(crate) fn record_ballot(&mut self, voter: PlayerId, target: PlayerId) {
        self.ballots.insert(voter, target);
    }

    pub fn ballots(&self) -> &BTreeMap<PlayerId, PlayerId> {
        &self.ballots
    }

    /// Unweighted count of the current round.
    pub(crate) fn close_round(&mut self) -> ElectionOutcome {
        let round = match self.stage {
            ElectionStage::Vote { round } => round,
            _ => 1,
        };
        let outcome = tally::count(&self.ballots);
        if outcome.is_empty() {
            return self.forfeit(ForfeitReason::NoBallots);
        }
        if let Some(winner) = outcome.unique_leader() {
            return self.decide(winner, false);
        }
        if round >= 2 {
            return self.forfeit(ForfeitReason::RunoffTie);
        }
        self.contest = outcome.leaders.clone();
        self.ballots.clear();
        self.stage = ElectionStage::Vote { round: 2 };
        ElectionOutcome::Runoff(outcome.leaders)
    }

    pub(crate) fn forfeit(&mut self, reason: ForfeitReason) -> ElectionOutcome {
        self.stage = ElectionStage::Forfeited;
        self.scheduled_day = None;
        ElectionOutcome::Forfeited(reason)
    }

    fn decide(&mut self, sheriff: PlayerId, unopposed: bool) -> ElectionOutcome {
        self.stage = ElectionStage::Decided;
        self.elected = Some(sheriff);
        self.scheduled_day = None;
        ElectionOutcome::Elected { sheriff, unopposed }
    }

    /// Abandon the current attempt and reschedule. Not counted as an attempt.
    pub(crate) fn defer_to(&mut self, day: u32) {
        *self = Self {
            scheduled_day: Some(day),
            ..Self::new(false)
        };
    }
}
