//! Role and faction definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed role set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Werewolf,
    Villager,
    Seer,
    Witch,
    Hunter,
    Idiot,
}

/// The two competing sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Wolves,
    Good,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Werewolf,
        Role::Villager,
        Role::Seer,
        Role::Witch,
        Role::Hunter,
        Role::Idiot,
    ];

    pub const fn faction(self) -> Faction {
        match self {
            Role::Werewolf => Faction::Wolves,
            _ => Faction::Good,
        }
    }

    pub const fn is_wolf(self) -> bool {
        matches!(self, Role::Werewolf)
    }

    /// Roles that may appear at most once at a table.
    pub const fn is_unique(self) -> bool {
        matches!(self, Role::Seer | Role::Witch | Role::Hunter | Role::Idiot)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Werewolf => "werewolf",
            Role::Villager => "villager",
            Role::Seer => "seer",
            Role::Witch => "witch",
            Role::Hunter => "hunter",
            Role::Idiot => "idiot",
        }
    }

    /// Display name used in narration.
    pub const fn title(self) -> &'static str {
        match self {
            Role::Werewolf => "Werewolf",
            Role::Villager => "Villager",
            Role::Seer => "Seer",
            Role::Witch => "Witch",
            Role::Hunter => "Hunter",
            Role::Idiot => "Idiot",
        }
    }

    /// Title with its indefinite article: "a Seer", "an Idiot".
    pub fn with_article(self) -> String {
        let title = self.title();
        let article = if title.starts_with(['A', 'E', 'I', 'O', 'U']) {
            "an"
        } else {
            "a"
        };
        format!("{article} {title}")
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == needle || (needle == "wolf" && role.is_wolf()))
            .ok_or_else(|| format!("unknown role '{s}'"))
    }
}

impl Faction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Faction::Wolves => "wolves",
            Faction::Good => "good",
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
