//! Character-cell rasteriser for frames
//!
//! Downsamples the terrain mask to `cols` x `rows` and overlays tanks and the
//! shell. Good enough to watch a match in a terminal or a log file.

use glam::Vec2;

use super::Frame;
use crate::sim::Side;

const GROUND: char = '#';
const SKY: char = ' ';
const SHELL: char = '*';

/// Render `frame` as a HUD line followed by `rows` lines of `cols` characters
pub fn render(frame: &Frame<'_>, cols: usize, rows: usize) -> String {
    let cols = cols.max(1);
    let rows = rows.max(1);
    let width = frame.terrain.width() as f32;
    let height = frame.terrain.height() as f32;
    let cell_w = width / cols as f32;
    let cell_h = height / rows as f32;

    let mut grid: Vec<Vec<char>> = (0..rows)
        .map(|r| {
            let y = ((r as f32 + 0.5) * cell_h) as i32;
            (0..cols)
                .map(|c| {
                    let x = ((c as f32 + 0.5) * cell_w) as i32;
                    if frame.terrain.collides(x, y) { GROUND } else { SKY }
                })
                .collect()
        })
        .collect();

    let mut plot = |pos: Vec2, glyph: char| {
        if pos.x < 0.0 || pos.y < 0.0 {
            return;
        }
        let c = (pos.x / cell_w) as usize;
        let r = (pos.y / cell_h) as usize;
        if let Some(cell) = grid.get_mut(r).and_then(|row| row.get_mut(c)) {
            *cell = glyph;
        }
    };

    for (side, tank) in frame.tanks.iter() {
        if !tank.alive {
            continue;
        }
        let glyph = match side {
            Side::One => '1',
            Side::Two => '2',
        };
        // Body sits just above the ground contact
        plot(tank.base - Vec2::new(0.0, cell_h * 0.5), glyph);
    }
    if let Some(pos) = frame.shell {
        plot(pos, SHELL);
    }

    let mut out = frame.hud_line();
    out.push('\n');
    for row in grid {
        out.extend(row);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;

    #[test]
    fn test_render_dimensions() {
        let state = GameState::new(8);
        let text = render(&Frame::capture(&state), 80, 24);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 25);
        assert!(lines[0].starts_with("Wind:"));
        assert!(lines[1..].iter().all(|l| l.chars().count() == 80));
    }

    #[test]
    fn test_render_shows_ground_and_tanks() {
        let state = GameState::new(8);
        let text = render(&Frame::capture(&state), 96, 54);
        let body: String = text.lines().skip(1).collect();
        assert!(body.contains('1'));
        assert!(body.contains('2'));
        // Bottom row is solid ground everywhere
        let last = text.lines().last().unwrap_or_default();
        assert!(last.chars().all(|c| c == GROUND));
    }

    #[test]
    fn test_shell_above_field_is_not_drawn() {
        let mut state = GameState::new(8);
        state.shell = Some(crate::sim::Shell::new(Vec2::new(400.0, -300.0), Vec2::ZERO));
        let text = render(&Frame::capture(&state), 80, 24);
        assert!(!text.contains(SHELL));
    }
}
