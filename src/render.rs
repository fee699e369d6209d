use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};

use crate::coord::Coord;
use crate::game::{Phase, Snapshot};

const TITLE: &str = "SNEKGRID";
const PLAY_MESSAGE: &str = "Press space to start!";
const HELP: &str = "WASD/arrows to move, 'q' to quit";

/// Rows below the board used for the status and help lines.
const STATUS_ROWS: u16 = 2;

/// Terminal columns and rows needed to draw a `width` x `height` board.
pub fn required_size(width: i32, height: i32) -> (u16, u16) {
    let cols = (width.max(0) as u16).saturating_add(2);
    let rows = (height.max(0) as u16).saturating_add(2 + STATUS_ROWS);
    (cols.max(HELP.len() as u16), rows)
}

fn glyph(snapshot: &Snapshot, cell: Coord) -> char {
    if snapshot.phase != Phase::Menu && snapshot.visible {
        if snapshot.body.first() == Some(&cell) {
            return 'O';
        }
        if snapshot.body.contains(&cell) {
            return 'o';
        }
    }
    if snapshot.phase != Phase::Menu && snapshot.target == Some(cell) {
        return '*';
    }
    ' '
}

fn centered(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.chars().count()) / 2;
    let mut line = " ".repeat(pad);
    line.push_str(text);
    line.push_str(&" ".repeat(width.saturating_sub(pad + text.chars().count())));
    line
}

/// The board including its `#` border, one string per terminal row.
pub fn board_rows(snapshot: &Snapshot) -> Vec<String> {
    let width = snapshot.width.max(0) as usize;
    let border = "#".repeat(width + 2);
    let mut rows = Vec::with_capacity(snapshot.height.max(0) as usize + 2);
    rows.push(border.clone());

    let title_row = snapshot.height / 2 - 1;
    for y in 0..snapshot.height {
        let inner: String = if snapshot.phase == Phase::Menu && y == title_row {
            centered(TITLE, width)
        } else if snapshot.phase == Phase::Menu && y == title_row + 2 {
            centered(if snapshot.prompt_visible { PLAY_MESSAGE } else { "" }, width)
        } else {
            (0..snapshot.width)
                .map(|x| glyph(snapshot, Coord::new(x, y)))
                .collect()
        };
        rows.push(format!("#{inner}#"));
    }

    rows.push(border);
    rows
}

pub fn status_line(snapshot: &Snapshot) -> String {
    match snapshot.phase {
        Phase::Menu => format!(
            "Last score: {}  High score: {}",
            snapshot.score, snapshot.high_score
        ),
        Phase::Playing => format!(
            "Score: {}  High score: {}  Heading: {}",
            snapshot.score, snapshot.high_score, snapshot.orientation
        ),
        Phase::Collided | Phase::Dismantling => {
            format!("Crashed! Score: {}", snapshot.score)
        }
    }
}

pub fn draw<W: Write>(out: &mut W, snapshot: &Snapshot) -> io::Result<()> {
    queue!(out, Clear(ClearType::All))?;
    let rows = board_rows(snapshot);
    for (y, row) in rows.iter().enumerate() {
        queue!(out, MoveTo(0, y as u16), Print(row))?;
    }
    let below = rows.len() as u16;
    queue!(
        out,
        MoveTo(0, below),
        Print(status_line(snapshot)),
        MoveTo(0, below + 1),
        Print(HELP)
    )?;
    out.flush()
}
