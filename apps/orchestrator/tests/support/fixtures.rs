//! Table builder for integration tests.
//!
//! Every bot seat gets its own [`ScriptedOracle`] bound under the seat tag,
//! so a test can script exactly what each player answers and later ask how
//! often that oracle was consulted.

use std::collections::BTreeMap;
use std::sync::Arc;

use orchestrator::domain::roster::DeathCause;
use orchestrator::oracle::ExhaustedPolicy;
use orchestrator::{
    DecisionOracle, GameConfig, GameFlow, GameSetup, GameState, OracleRegistry, PlayerId,
    PlayerSetup, Role, ScriptedOracle,
};

pub const NAMES: [&str; 12] = [
    "Ada", "Bram", "Cleo", "Dov", "Esme", "Finn", "Gus", "Hana", "Ivo", "Jun", "Kai", "Lena",
];

/// P1 and P2 wolves, P3 and P4 villagers, P5 witch, P6 seer.
pub fn six_roles() -> Vec<Role> {
    vec![
        Role::Werewolf,
        Role::Werewolf,
        Role::Villager,
        Role::Villager,
        Role::Witch,
        Role::Seer,
    ]
}

pub struct Table {
    pub flow: GameFlow,
    pub state: GameState,
    scripts: BTreeMap<usize, Arc<ScriptedOracle>>,
}

impl Table {
    /// The scripted oracle behind a 0-based bot seat.
    pub fn script(&self, seat: usize) -> &ScriptedOracle {
        self.scripts
            .get(&seat)
            .map(Arc::as_ref)
            .unwrap_or_else(|| panic!("seat {seat} has no oracle"))
    }

    pub fn alive(&self, seat: usize) -> bool {
        self.state.roster().is_alive(seat as PlayerId)
    }

    pub fn death_cause(&self, seat: usize) -> Option<DeathCause> {
        self.state
            .roster()
            .get(seat as PlayerId)
            .and_then(|p| p.flags.death)
            .map(|d| d.cause)
    }

    /// Public log text, oldest first.
    pub fn public_log(&self) -> Vec<String> {
        self.state
            .log()
            .entries()
            .iter()
            .filter(|e| e.visible_to(None))
            .map(|e| e.text.clone())
            .collect()
    }

    pub fn log_mentions(&self, needle: &str) -> bool {
        self.state.log().entries().iter().any(|e| e.text.contains(needle))
    }
}

pub struct TableBuilder {
    roles: Vec<Role>,
    human: Option<usize>,
    scripts: BTreeMap<usize, ScriptedOracle>,
    policy: ExhaustedPolicy,
    config: GameConfig,
    seed: u64,
}

impl TableBuilder {
    /// Explicit roles in seat order; election off, unscripted answers abstain.
    pub fn new(roles: Vec<Role>) -> Self {
        Self {
            roles,
            human: None,
            scripts: BTreeMap::new(),
            policy: ExhaustedPolicy::Abstain,
            config: GameConfig {
                sheriff_election: false,
                ..GameConfig::default()
            },
            seed: 42,
        }
    }

    pub fn human(mut self, seat: usize) -> Self {
        self.human = Some(seat);
        self
    }

    pub fn script(mut self, seat: usize, oracle: ScriptedOracle) -> Self {
        self.scripts.insert(seat, oracle);
        self
    }

    pub fn with_election(mut self) -> Self {
        self.config.sheriff_election = true;
        self
    }

    pub fn config(mut self, f: impl FnOnce(&mut GameConfig)) -> Self {
        f(&mut self.config);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(mut self) -> Table {
        let mut oracles = OracleRegistry::new();
        let mut scripts = BTreeMap::new();
        let mut players = Vec::new();

        for (seat, role) in self.roles.iter().enumerate() {
            let mut player = PlayerSetup::new(NAMES[seat]).with_role(*role);
            if self.human != Some(seat) {
                let script = Arc::new(
                    self.scripts
                        .remove(&seat)
                        .unwrap_or_else(|| ScriptedOracle::new(self.policy)),
                );
                let key = format!("P{}", seat + 1);
                let oracle: Arc<dyn DecisionOracle> = script.clone();
                oracles.bind(key.clone(), oracle);
                scripts.insert(seat, script);
                player = player.with_oracle(key);
            }
            players.push(player);
        }

        let flow = GameFlow::new(oracles);
        let setup = GameSetup {
            players,
            human_seat: self.human,
            deck: None,
            seed: Some(self.seed),
            config: self.config,
        };
        let state = flow.new_game(setup).expect("fixture setup is valid");
        Table {
            flow,
            state,
            scripts,
        }
    }
}

/// A scripted oracle that abstains whenever its script runs dry.
pub fn bot() -> ScriptedOracle {
    ScriptedOracle::new(ExhaustedPolicy::Abstain)
}
