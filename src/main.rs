use std::fs::File;
use std::io::{stdout, Stdout};

use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use simplelog::{Config, WriteLogger};

use snekgrid::config::Settings;
use snekgrid::error::AppError;
use snekgrid::game::Game;
use snekgrid::{input, render};

fn main() -> Result<(), AppError> {
    let settings = Settings::parse();
    settings.validate()?;

    // The terminal belongs to the board, so logs go to a file.
    WriteLogger::init(
        settings.log_level(),
        Config::default(),
        File::create(&settings.log_file)?,
    )?;
    info!("starting snekgrid with {:?}", settings.rules());

    let (need_cols, need_rows) =
        render::required_size(settings.width as i32, settings.height as i32);
    let (have_cols, have_rows) = terminal::size()?;
    if have_cols < need_cols || have_rows < need_rows {
        return Err(AppError::TerminalTooSmall {
            have_cols,
            have_rows,
            need_cols,
            need_rows,
        });
    }

    let mut game = Game::new(settings.rules(), settings.seed);
    let mut stdout = stdout();

    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let result = run(&mut game, &settings, &mut stdout);

    terminal::disable_raw_mode()?;
    execute!(stdout, Show, LeaveAlternateScreen)?;

    if let Err(err) = &result {
        error!("game loop failed: {err}");
    }
    result?;

    info!("exiting, high score {}", game.high_score());
    println!("Thanks for playing! High score: {}", game.high_score());
    Ok(())
}

fn run(game: &mut Game, settings: &Settings, stdout: &mut Stdout) -> Result<(), AppError> {
    let tick = settings.tick_period();
    render::draw(stdout, &game.snapshot())?;
    loop {
        let input = input::poll_tick(tick)?;
        if input.quit {
            return Ok(());
        }
        game.advance(input.intents, input.start);
        render::draw(stdout, &game.snapshot())?;
    }
}
