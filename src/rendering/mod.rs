//! # Rendering Module
//!
//! The output side of the front-end boundary. The simulation describes what
//! to show through the [`Renderer`] trait and never touches a terminal
//! itself; [`display::TerminalFrontend`] is the stock implementation.

pub mod color;
pub mod display;

pub use color::*;
pub use display::*;

use crate::config::MENU_OPTION_LIMIT;
use crate::game::{GameState, MessageLine, Position, TileView};
use crate::{DelveError, DelveResult};

/// Drawing surface and blocking menu host.
pub trait Renderer {
    fn draw_tile(&mut self, pos: Position, glyph: char, color: Color);

    /// Horizontal gauge such as hit points.
    fn draw_bar(&mut self, label: &str, current: i32, max: i32, fill: Color, back: Color);

    fn draw_message_log(&mut self, lines: &[MessageLine]);

    /// One-line status text, e.g. names under the pointer.
    fn draw_status(&mut self, _text: &str) {}

    fn clear(&mut self) {}

    fn present(&mut self) {}

    /// Shows `header` with lettered `options` and blocks for a choice.
    /// With no options this is a message box.
    fn show_menu(&mut self, header: &str, options: &[String]) -> Option<usize>;
}

/// Presents a menu, refusing more options than there are letters. An
/// answer outside the option list counts as no choice.
///
/// # Examples
///
/// ```
/// use delve::{menu, DelveError, ScriptedFrontend};
///
/// let mut frontend = ScriptedFrontend::new().with_menu_answers([Some(1)]);
/// let options = vec!["Constitution".to_string(), "Strength".to_string()];
/// assert_eq!(menu(&mut frontend, "Level up!", &options).unwrap(), Some(1));
///
/// let too_many: Vec<String> = (0..27).map(|i| i.to_string()).collect();
/// assert!(matches!(
///     menu(&mut frontend, "Too many", &too_many),
///     Err(DelveError::MenuTooLarge { requested: 27, .. })
/// ));
/// ```
pub fn menu<R: Renderer + ?Sized>(
    renderer: &mut R,
    header: &str,
    options: &[String],
) -> DelveResult<Option<usize>> {
    if options.len() > MENU_OPTION_LIMIT {
        return Err(DelveError::MenuTooLarge {
            requested: options.len(),
            limit: MENU_OPTION_LIMIT,
        });
    }
    Ok(renderer
        .show_menu(header, options)
        .filter(|&index| index < options.len()))
}

/// Draws one full frame of the session: terrain by perception state,
/// entities in store order with the player on top, gauges and the log.
pub fn draw_world<R: Renderer + ?Sized>(state: &GameState, renderer: &mut R) {
    renderer.clear();

    let grid = &state.level.grid;
    for pos in grid.positions() {
        let wall = grid.blocks_sight(pos);
        let (glyph, color) = match (state.tile_view(pos), wall) {
            (TileView::Unknown, _) => continue,
            (TileView::Visible, true) => ('#', Color::LIGHT_WALL),
            (TileView::Visible, false) => ('.', Color::LIGHT_GROUND),
            (TileView::Remembered, true) => ('#', Color::DARK_WALL),
            (TileView::Remembered, false) => ('.', Color::DARK_GROUND),
        };
        renderer.draw_tile(pos, glyph, color);
    }

    for actor in state.level.entities.iter() {
        if actor.id == state.player_id {
            continue;
        }
        let shown = state.is_visible(actor.position)
            || (actor.always_visible && grid.is_explored(actor.position));
        if shown {
            renderer.draw_tile(actor.position, actor.glyph, actor.color);
        }
    }

    if let Some(player) = state.player() {
        renderer.draw_tile(player.position, player.glyph, player.color);
        if let Some(fighter) = &player.fighter {
            renderer.draw_bar("HP", fighter.hp, player.max_hp(), Color::RED, Color::DARK_RED);
            renderer.draw_bar("SP", fighter.sp, player.max_sp(), Color::SKY, Color::DARKER_SEA);
        }
    }

    renderer.draw_status(&format!("Archive level {}", state.depth()));
    let lines: Vec<MessageLine> = state.messages.iter().cloned().collect();
    renderer.draw_message_log(&lines);
    renderer.present();
}
