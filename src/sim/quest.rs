//! Emoji Quest: a pocket arena battler
//!
//! The hero attacks on click; the current enemy strikes back on a fixed
//! interval driven by `tick`. Defeated enemies are replaced after a short
//! delay by a tougher one.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Enemy roster, one type per five stages
pub const ENEMIES: [(&str, &str); 10] = [
    ("Slime", "🦠"),
    ("Rat", "🐀"),
    ("Bat", "🦇"),
    ("Spider", "🕷️"),
    ("Snake", "🐍"),
    ("Wolf", "🐺"),
    ("Bear", "🐻"),
    ("Ghost", "👻"),
    ("Ogre", "👹"),
    ("Dragon", "🐲"),
];

pub const ENEMY_ATTACK_INTERVAL_MS: f64 = 2000.0;
pub const RESPAWN_DELAY_MS: f64 = 500.0;
pub const CRIT_CHANCE: f64 = 0.1;
pub const COMBAT_LOG_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fighter {
    pub name: String,
    pub emoji: String,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
}

impl Fighter {
    pub fn hero() -> Self {
        Self {
            name: "Hero".into(),
            emoji: "🧑‍🚀".into(),
            hp: 20,
            max_hp: 20,
            attack: 1,
        }
    }

    /// Enemy for a stage: type every five stages, stats grow 20% per stage
    pub fn enemy_for_stage(stage: u32) -> Self {
        let index = (((stage.max(1) - 1) / 5) as usize).min(ENEMIES.len() - 1);
        let (name, emoji) = ENEMIES[index];
        let scaling = 1.2f64.powi(stage as i32 - 1);
        let max_hp = (10.0 * scaling).floor() as u32;
        Self {
            name: name.into(),
            emoji: emoji.into(),
            hp: max_hp,
            max_hp,
            attack: (1.0 + stage as f64 * 0.5).floor() as u32,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Upgrade {
    /// +1 attack
    Weapon,
    /// +10 max hp and hp
    Armor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuestError {
    #[error("the hero has fallen")]
    Dead,
    #[error("not enough gold: need {cost}, have {gold}")]
    NotEnoughGold { cost: u32, gold: u32 },
}

/// What a click on the enemy did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strike {
    /// Nothing to hit (dead hero or enemy between spawns)
    Ignored,
    Hit { damage: u32, crit: bool },
    Defeated { damage: u32, crit: bool, gold: u32, xp: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quest {
    pub player: Fighter,
    pub enemy: Fighter,
    pub level: u32,
    pub xp: u32,
    pub gold: u32,
    pub stage: u32,
    pub dead: bool,
    /// Newest first
    pub log: Vec<String>,
    attack_timer_ms: f64,
    /// Time until the next enemy appears, while one is pending
    respawn_in_ms: Option<f64>,
    #[serde(skip, default = "default_rng")]
    rng: Pcg32,
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

impl Quest {
    pub fn new(seed: u64) -> Self {
        Self {
            player: Fighter::hero(),
            enemy: Fighter::enemy_for_stage(1),
            level: 1,
            xp: 0,
            gold: 0,
            stage: 1,
            dead: false,
            log: vec!["Welcome to the Arena!".into()],
            attack_timer_ms: 0.0,
            respawn_in_ms: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Start over with a fresh hero; the RNG stream continues
    pub fn restart(&mut self) {
        self.player = Fighter::hero();
        self.enemy = Fighter::enemy_for_stage(1);
        self.level = 1;
        self.xp = 0;
        self.gold = 0;
        self.stage = 1;
        self.dead = false;
        self.log = vec!["A new hero arises!".into()];
        self.attack_timer_ms = 0.0;
        self.respawn_in_ms = None;
    }

    /// XP needed for the next level
    pub fn max_xp(&self) -> u32 {
        self.level * 50
    }

    pub fn upgrade_cost(&self) -> u32 {
        20 * self.level
    }

    fn push_log(&mut self, line: String) {
        self.log.insert(0, line);
        self.log.truncate(COMBAT_LOG_LEN);
    }

    /// Hit the current enemy
    pub fn attack(&mut self) -> Strike {
        if self.dead || !self.enemy.is_alive() {
            return Strike::Ignored;
        }

        let crit = self.rng.random_bool(CRIT_CHANCE);
        let damage = if crit {
            self.player.attack * 2
        } else {
            self.player.attack
        };
        self.enemy.hp = self.enemy.hp.saturating_sub(damage);

        if self.enemy.is_alive() {
            if crit {
                self.push_log(format!("CRITICAL HIT! Dealt {} dmg!", damage));
            }
            return Strike::Hit { damage, crit };
        }

        let (gold, xp) = self.victory();
        Strike::Defeated {
            damage,
            crit,
            gold,
            xp,
        }
    }

    fn victory(&mut self) -> (u32, u32) {
        let gold = self.enemy.max_hp / 2 + self.stage;
        let xp = 10 + self.stage * 2;
        self.gold += gold;
        self.xp += xp;

        while self.xp >= self.max_xp() {
            self.xp -= self.max_xp();
            self.level_up();
        }

        let line = format!("Defeated {}! +{}g", self.enemy.name, gold);
        self.push_log(line);
        self.stage += 1;
        self.respawn_in_ms = Some(RESPAWN_DELAY_MS);
        log::debug!("Quest stage {} reached", self.stage);
        (gold, xp)
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.player.max_hp += 10;
        self.player.hp = self.player.max_hp;
        self.player.attack += 1;
        self.push_log("LEVEL UP! Stats increased!".into());
    }

    /// Damage the enemy deals per strike, after the hero's level-based defense
    pub fn enemy_damage(&self) -> u32 {
        self.enemy.attack.saturating_sub(self.level / 2).max(1)
    }

    /// Advance timers: enemy strikes and respawns
    pub fn tick(&mut self, dt_ms: f64) {
        if self.dead {
            return;
        }

        if let Some(remaining) = self.respawn_in_ms {
            let remaining = remaining - dt_ms;
            if remaining <= 0.0 {
                self.enemy = Fighter::enemy_for_stage(self.stage);
                self.respawn_in_ms = None;
                self.attack_timer_ms = 0.0;
            } else {
                self.respawn_in_ms = Some(remaining);
            }
            return;
        }

        self.attack_timer_ms += dt_ms;
        while self.attack_timer_ms >= ENEMY_ATTACK_INTERVAL_MS && !self.dead {
            self.attack_timer_ms -= ENEMY_ATTACK_INTERVAL_MS;
            if !self.enemy.is_alive() {
                continue;
            }
            let damage = self.enemy_damage();
            self.player.hp = self.player.hp.saturating_sub(damage);
            if self.player.hp == 0 {
                self.dead = true;
                let line = format!("You were killed by {}...", self.enemy.name);
                self.push_log(line);
                log::info!("Quest over at stage {}", self.stage);
            }
        }
    }

    pub fn buy_upgrade(&mut self, upgrade: Upgrade) -> Result<(), QuestError> {
        if self.dead {
            return Err(QuestError::Dead);
        }
        let cost = self.upgrade_cost();
        if self.gold < cost {
            return Err(QuestError::NotEnoughGold {
                cost,
                gold: self.gold,
            });
        }
        self.gold -= cost;
        match upgrade {
            Upgrade::Weapon => {
                self.player.attack += 1;
                self.push_log("Upgraded Weapon!".into());
            }
            Upgrade::Armor => {
                self.player.max_hp += 10;
                self.player.hp += 10;
                self.push_log("Upgraded Armor!".into());
            }
        }
        Ok(())
    }
}
