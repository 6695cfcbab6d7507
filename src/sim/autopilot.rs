//! Idle/demo mode: jump automatically when a monster gets close
//!
//! Used by the attract screen on the web and by the native headless runner.

use super::state::GameState;

/// Jump when the nearest uncleared monster's leading edge is within this many
/// pixels of the player's trailing edge. At 6 px/frame this puts the player
/// well above the monster for the whole horizontal overlap.
pub const TRIGGER_GAP: f32 = 60.0;

/// Decide whether to jump this frame
pub fn should_jump(state: &GameState) -> bool {
    if state.player.jumping || state.game_over {
        return false;
    }

    let player = state.player.rect();
    state
        .obstacles
        .iter()
        .filter(|o| o.rect().right() > player.left())
        .map(|o| o.rect().left() - player.right())
        .filter(|gap| *gap > 0.0)
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .is_some_and(|gap| gap <= TRIGGER_GAP)
}
