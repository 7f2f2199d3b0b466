//! Eco-upgrade shop

use super::state::{GameEvent, GamePhase, GameState, UpgradeType};

impl GameState {
    /// Whether the inventory covers the upgrade's full cost
    pub fn can_afford(&self, kind: UpgradeType) -> bool {
        self.inventory.covers(&self.tuning.upgrade(kind).cost)
    }

    /// Buy an upgrade from the upgrade menu.
    ///
    /// All-or-nothing: either the whole cost is debited and the benefit applied,
    /// or nothing changes and false is returned.
    pub fn purchase_upgrade(&mut self, kind: UpgradeType) -> bool {
        if self.phase != GamePhase::UpgradeMenu {
            log::debug!("Ignoring purchase of {:?} outside the upgrade menu", kind);
            return false;
        }

        let spec = self.tuning.upgrade(kind).clone();
        if !self.inventory.try_debit(&spec.cost) {
            log::debug!("Cannot afford {:?}", kind);
            return false;
        }

        self.upgrades.increment(kind);
        self.add_score(i64::from(spec.benefit) * 2);
        self.raise_eco(spec.benefit as f32);
        self.emit(GameEvent::UpgradePurchased { kind });
        log::debug!("Purchased {:?} (total {})", kind, self.upgrades.get(kind));
        true
    }
}
