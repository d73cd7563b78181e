//! Action dispatch: the gameplay side effects a line can trigger.

use game_rules::{Npc, Player, PlayerDeath};

use crate::channel::MessageSink;
use crate::config::DEFAULT_HOSTILITY_NOTICE;
use crate::line::ActionType;

/// Combat collaborator.
pub trait Combat {
    /// Fight `target` until one side falls. Returns `Err` if the player dies.
    fn attack(&mut self, player: &mut Player, target: &str) -> Result<(), PlayerDeath>;
}

/// Which sides of a trade are open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeMode {
    pub buy: bool,
    pub sell: bool,
}

impl TradeMode {
    pub const BUY_AND_SELL: TradeMode = TradeMode {
        buy: true,
        sell: true,
    };
}

/// Trading collaborator.
pub trait Trading {
    /// Run an interactive trade between `npc` and `player`.
    fn trade(&mut self, npc: &Npc, player: &mut Player, mode: TradeMode) -> Result<(), PlayerDeath>;
}

/// Routes a delivered line's action to the matching collaborator.
pub struct ActionDispatcher<'a> {
    combat: &'a mut dyn Combat,
    trading: &'a mut dyn Trading,
    hostility_notice: String,
}

impl<'a> ActionDispatcher<'a> {
    pub fn new(combat: &'a mut dyn Combat, trading: &'a mut dyn Trading) -> Self {
        Self {
            combat,
            trading,
            hostility_notice: DEFAULT_HOSTILITY_NOTICE.to_string(),
        }
    }

    /// Override the ATTACK notification. `{npc}` is replaced by the NPC name.
    pub fn with_hostility_notice(mut self, notice: impl Into<String>) -> Self {
        self.hostility_notice = notice.into();
        self
    }

    /// Perform `action` on behalf of `npc`.
    ///
    /// `Buy`, `Sell`, `Give` and `Take` have no collaborator yet and do nothing.
    pub fn dispatch(
        &mut self,
        action: ActionType,
        npc: &Npc,
        player: &mut Player,
        output: &mut dyn MessageSink,
    ) -> Result<(), PlayerDeath> {
        match action {
            ActionType::Attack => {
                tracing::debug!(npc = %npc.name, "npc turned hostile");
                output.offer(self.hostility_notice.replace("{npc}", &npc.name));
                self.combat.attack(player, &npc.name)
            }
            ActionType::Trade => {
                tracing::debug!(npc = %npc.name, "opening trade");
                self.trading.trade(npc, player, TradeMode::BUY_AND_SELL)
            }
            ActionType::NoAction
            | ActionType::Buy
            | ActionType::Sell
            | ActionType::Give
            | ActionType::Take => Ok(()),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::channel::MessageQueue;

    /// Combat double: deals fixed damage to the player per attack.
    #[derive(Default)]
    pub(crate) struct FixedDamage {
        pub damage: i32,
        pub targets: Vec<String>,
    }

    impl Combat for FixedDamage {
        fn attack(&mut self, player: &mut Player, target: &str) -> Result<(), PlayerDeath> {
            self.targets.push(target.to_string());
            if player.health.take_damage(self.damage) == 0 {
                return Err(PlayerDeath::new(&player.name, target));
            }
            Ok(())
        }
    }

    /// Trading double: records each trade.
    #[derive(Default)]
    pub(crate) struct TradeLog {
        pub trades: Vec<(String, TradeMode)>,
    }

    impl Trading for TradeLog {
        fn trade(&mut self, npc: &Npc, _player: &mut Player, mode: TradeMode) -> Result<(), PlayerDeath> {
            self.trades.push((npc.name.clone(), mode));
            Ok(())
        }
    }

    #[test]
    fn test_attack_notifies_then_fights() {
        let mut combat = FixedDamage { damage: 10, ..Default::default() };
        let mut trading = TradeLog::default();
        let mut output = MessageQueue::new();
        let mut player = Player::new("Hero", "Recruit");
        let npc = Npc::new("Guard");

        ActionDispatcher::new(&mut combat, &mut trading)
            .dispatch(ActionType::Attack, &npc, &mut player, &mut output)
            .unwrap();

        assert_eq!(output.drain(), vec!["\nGuard is now attacking you!\n".to_string()]);
        assert_eq!(combat.targets, vec!["Guard".to_string()]);
        assert_eq!(player.health.current_hp, 90);
    }

    #[test]
    fn test_attack_death_propagates() {
        let mut combat = FixedDamage { damage: 1000, ..Default::default() };
        let mut trading = TradeLog::default();
        let mut output = MessageQueue::new();
        let mut player = Player::new("Hero", "Recruit");

        let result = ActionDispatcher::new(&mut combat, &mut trading).dispatch(
            ActionType::Attack,
            &Npc::new("Guard"),
            &mut player,
            &mut output,
        );
        assert_eq!(result, Err(PlayerDeath::new("Hero", "Guard")));
    }

    #[test]
    fn test_trade_opens_both_sides() {
        let mut combat = FixedDamage::default();
        let mut trading = TradeLog::default();
        let mut output = MessageQueue::new();
        let mut player = Player::new("Hero", "Recruit");

        ActionDispatcher::new(&mut combat, &mut trading)
            .dispatch(ActionType::Trade, &Npc::new("Merchant"), &mut player, &mut output)
            .unwrap();

        assert_eq!(trading.trades, vec![("Merchant".to_string(), TradeMode::BUY_AND_SELL)]);
        assert!(output.is_empty());
    }

    #[test]
    fn test_reserved_actions_do_nothing() {
        let mut combat = FixedDamage::default();
        let mut trading = TradeLog::default();
        let mut output = MessageQueue::new();
        let mut player = Player::new("Hero", "Recruit");
        let npc = Npc::new("Merchant");

        let mut dispatcher = ActionDispatcher::new(&mut combat, &mut trading);
        for action in [
            ActionType::NoAction,
            ActionType::Buy,
            ActionType::Sell,
            ActionType::Give,
            ActionType::Take,
        ] {
            dispatcher.dispatch(action, &npc, &mut player, &mut output).unwrap();
        }
        drop(dispatcher);

        assert!(output.is_empty());
        assert!(combat.targets.is_empty());
        assert!(trading.trades.is_empty());
    }

    #[test]
    fn test_custom_hostility_notice() {
        let mut combat = FixedDamage::default();
        let mut trading = TradeLog::default();
        let mut output = MessageQueue::new();
        let mut player = Player::new("Hero", "Recruit");

        ActionDispatcher::new(&mut combat, &mut trading)
            .with_hostility_notice("{npc} draws a blade.")
            .dispatch(ActionType::Attack, &Npc::new("Bandit"), &mut player, &mut output)
            .unwrap();
        assert_eq!(output.poll().as_deref(), Some("Bandit draws a blade."));
    }
}
