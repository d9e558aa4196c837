//! Win condition evaluation.

use crate::domain::roles::Faction;
use crate::domain::roster::Roster;

/// `None` while undecided.
///
/// Good wins when no wolf is alive; wolves win once they match or outnumber
/// everyone else still alive.
pub fn evaluate(roster: &Roster) -> Option<Faction> {
    let (wolves, others) = roster.living_counts();
    if wolves == 0 {
        Some(Faction::Good)
    } else if wolves >= others {
        Some(Faction::Wolves)
    } else {
        None
    }
}
