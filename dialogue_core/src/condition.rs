//! Precondition evaluation for conversation entry points.

use game_rules::{ItemCatalog, Npc, Player};

use crate::error::ConditionError;
use crate::line::{ConditionType, Line};

/// Decides whether a line's precondition holds for a given NPC and player.
///
/// Evaluation reads live state and never mutates it, so entry points can be
/// rescanned as often as needed.
#[derive(Clone, Copy)]
pub struct ConditionEvaluator<'a> {
    items: &'a dyn ItemCatalog,
}

impl<'a> ConditionEvaluator<'a> {
    /// Create an evaluator that resolves `item` conditions through `items`.
    pub fn new(items: &'a dyn ItemCatalog) -> Self {
        Self { items }
    }

    /// Check a line's precondition.
    ///
    /// # Errors
    ///
    /// `MalformedConditionParameter` if a level threshold is not an integer,
    /// `UnknownItem` if an item condition names an item the catalog lacks.
    pub fn matches(&self, npc: &Npc, player: &Player, line: &Line) -> Result<bool, ConditionError> {
        let parameter = &line.condition_parameter;
        match line.condition {
            ConditionType::None => Ok(true),
            ConditionType::Ally => Ok(npc.allies.contains(&player.current_character_type)),
            ConditionType::Enemy => Ok(npc.enemies.contains(&player.current_character_type)),
            ConditionType::Level => {
                let required: i32 = parameter
                    .parse()
                    .map_err(|_| ConditionError::MalformedConditionParameter(parameter.clone()))?;
                Ok(player.level >= required)
            }
            ConditionType::Item => {
                let item = self
                    .items
                    .get_item(parameter)
                    .ok_or_else(|| ConditionError::UnknownItem(parameter.clone()))?;
                Ok(player.has_item(item))
            }
        }
    }
}
