//! Day speaking order.

use crate::domain::roster::{PlayerId, Roster};

/// Who anchors the speaking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechAnchor {
    /// Living sheriff: starts at the neighbour in the chosen direction, speaks last.
    Sheriff { id: PlayerId, reverse: bool },
    /// No sheriff: ascending from the seat after the latest night victim.
    AfterVictim(PlayerId),
    /// No sheriff, no victim: ascending from P1.
    FromFirstSeat,
}

pub fn speaking_order(roster: &Roster, anchor: SpeechAnchor) -> Vec<PlayerId> {
    let n = roster.len();
    if n == 0 {
        return Vec::new();
    }
    let seats: Vec<PlayerId> = match anchor {
        SpeechAnchor::Sheriff { id, reverse } => {
            let s = id as usize;
            (1..=n)
                .map(|step| {
                    if reverse {
                        (s + n * step - step) % n
                    } else {
                        (s + step) % n
                    }
                })
                .map(|seat| seat as PlayerId)
                .collect()
        }
        SpeechAnchor::AfterVictim(victim) => {
            let start = victim as usize + 1;
            (0..n).map(|k| ((start + k) % n) as PlayerId).collect()
        }
        SpeechAnchor::FromFirstSeat => (0..n).map(|k| k as PlayerId).collect(),
    };
    seats.into_iter().filter(|&id| roster.is_alive(id)).collect()
}
