use log::{debug, info};

use crate::constants::*;
use crate::entities::MeteorKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpgradeType {
    BulletSpeed,
    Shield,
}

impl UpgradeType {
    pub fn label(self) -> &'static str {
        match self {
            UpgradeType::BulletSpeed => "Bullet Speed",
            UpgradeType::Shield => "Shield",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Economy {
    pub score: u32,
    pub coins: u32,
    pub speed_upgrade_cost: u32,
    pub shield_upgrade_cost: u32,
    pub bullet_speed: f64,
}

impl Economy {
    pub fn new() -> Self {
        Economy {
            score: 0,
            coins: 0,
            speed_upgrade_cost: INITIAL_SPEED_UPGRADE_COST,
            shield_upgrade_cost: INITIAL_SHIELD_UPGRADE_COST,
            bullet_speed: INITIAL_BULLET_SPEED,
        }
    }

    /// Costs survive a new round; score, coins and bullet speed do not.
    pub fn reset_round(&mut self) {
        self.score = 0;
        self.coins = 0;
        self.bullet_speed = INITIAL_BULLET_SPEED;
    }

    pub fn award(&mut self, kind: MeteorKind) {
        self.score = self.score.saturating_add(kind.value());
        self.coins = self.coins.saturating_add(kind.value());
    }

    pub fn cost_of(&self, upgrade: UpgradeType) -> u32 {
        match upgrade {
            UpgradeType::BulletSpeed => self.speed_upgrade_cost,
            UpgradeType::Shield => self.shield_upgrade_cost,
        }
    }

    /// Deducts the current cost and raises the next one. Leaves everything
    /// untouched when the coins do not cover it.
    pub fn charge(&mut self, upgrade: UpgradeType) -> bool {
        let cost = self.cost_of(upgrade);
        if self.coins < cost {
            debug!("Cannot afford {} upgrade: {} coins, cost {}", upgrade.label(), self.coins, cost);
            return false;
        }
        self.coins -= cost;
        match upgrade {
            UpgradeType::BulletSpeed => self.speed_upgrade_cost += SPEED_UPGRADE_COST_INCREASE,
            UpgradeType::Shield => self.shield_upgrade_cost += SHIELD_UPGRADE_COST_INCREASE,
        }
        info!("Bought {} upgrade for {} coins, {} coins left", upgrade.label(), cost, self.coins);
        true
    }

    pub fn purchase_speed_upgrade(&mut self) -> bool {
        if !self.charge(UpgradeType::BulletSpeed) {
            return false;
        }
        self.bullet_speed += BULLET_SPEED_INCREMENT;
        info!("Bullet speed increased to {}", self.bullet_speed);
        true
    }
}

impl Default for Economy {
    fn default() -> Self {
        Economy::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_upgrade_without_enough_coins_is_a_no_op() {
        let mut economy = Economy::new();
        economy.coins = 50;
        let before = economy.clone();

        assert!(!economy.purchase_speed_upgrade());
        assert_eq!(economy, before);
    }

    #[test]
    fn speed_upgrade_deducts_cost_and_raises_speed() {
        let mut economy = Economy::new();
        economy.coins = 150;

        assert!(economy.purchase_speed_upgrade());
        assert_eq!(economy.coins, 50);
        assert_eq!(economy.bullet_speed, INITIAL_BULLET_SPEED + 0.5);
        assert_eq!(economy.speed_upgrade_cost, 250);
    }

    #[test]
    fn exact_coins_are_enough() {
        let mut economy = Economy::new();
        economy.coins = 100;
        assert!(economy.purchase_speed_upgrade());
        assert_eq!(economy.coins, 0);
    }

    #[test]
    fn award_adds_kind_value_to_score_and_coins() {
        let mut economy = Economy::new();
        economy.award(MeteorKind::Small);
        economy.award(MeteorKind::Large);
        assert_eq!(economy.score, 60);
        assert_eq!(economy.coins, 60);
    }

    #[test]
    fn reset_round_keeps_costs() {
        let mut economy = Economy::new();
        economy.coins = 400;
        economy.score = 900;
        assert!(economy.purchase_speed_upgrade());
        assert!(economy.purchase_speed_upgrade());

        economy.reset_round();
        assert_eq!(economy.score, 0);
        assert_eq!(economy.coins, 0);
        assert_eq!(economy.bullet_speed, INITIAL_BULLET_SPEED);
        assert_eq!(economy.speed_upgrade_cost, 400);
        assert_eq!(economy.shield_upgrade_cost, INITIAL_SHIELD_UPGRADE_COST);
    }
}
