//! Text front end: setup menu, move loop and replay prompt over any reader/writer pair.

use crate::{
    AdjacencyRule, Board, BoardConfig, Command, GameError, GameState, ParseCommandError,
    ABORT_TOKEN,
};
use itertools::Itertools;
use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};
use std::io::{self, BufRead, Write};

const MOVE_HELP: &str = "Use \"i j\" to open the cell i down and j right, \"f i j\" to flag it, \
                         \"c i j\" to chord it, or \"a\" to abort";

pub struct Session<R, W> {
    input: R,
    output: W,
    rng: StdRng,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            rng: StdRng::from_entropy(),
        }
    }

    /// A session whose mine layouts are reproducible.
    pub fn with_seed(input: R, output: W, seed: u64) -> Self {
        Self {
            input,
            output,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Plays games until the player declines a replay, aborts, or input runs out.
    pub fn run(&mut self, defaults: &BoardConfig, menu: bool) -> io::Result<()> {
        loop {
            let config = if menu {
                match self.configure(defaults)? {
                    Some(config) => config,
                    None => return Ok(()),
                }
            } else {
                *defaults
            };

            let mut board = match Board::with_rng(&config, &mut self.rng) {
                Ok(board) => board,
                Err(err) if menu => {
                    writeln!(self.output, "{err}")?;
                    continue;
                }
                Err(err) => return Err(io::Error::new(io::ErrorKind::InvalidInput, err)),
            };

            if self.play(&mut board)?.is_none() {
                return Ok(());
            }
            if !self.play_again()? {
                return Ok(());
            }
        }
    }

    /// Asks for board parameters, falling back to `defaults` for anything unparseable.
    /// Returns `None` if input ends.
    pub fn configure(&mut self, defaults: &BoardConfig) -> io::Result<Option<BoardConfig>> {
        let mut config = *defaults;

        let Some(width) = self.prompt(&format!("Length (default {})\t\t > ", defaults.width))?
        else {
            return Ok(None);
        };
        config.width = width.trim().parse().unwrap_or(defaults.width);

        let Some(height) = self.prompt(&format!("Height (default {})\t\t > ", defaults.height))?
        else {
            return Ok(None);
        };
        config.height = height.trim().parse().unwrap_or(defaults.height);

        let Some(mines) =
            self.prompt(&format!("Number of mines (default {})\t > ", defaults.mines))?
        else {
            return Ok(None);
        };
        config.mines = mines.trim().parse().unwrap_or(defaults.mines);

        let menu = AdjacencyRule::ALL
            .iter()
            .enumerate()
            .map(|(idx, &rule)| format!("[{}] {}", idx + 1, menu_label(rule)))
            .join("\n");
        let Some(rule) = self.prompt(&format!(
            "Type of game: (default {})\n{menu}\t\t > ",
            menu_label(defaults.rule)
        ))?
        else {
            return Ok(None);
        };
        config.rule = parse_rule_choice(rule.trim(), defaults.rule);

        debug!("configured {config:?}");
        Ok(Some(config))
    }

    /// Runs the move loop on `board` until the game ends. Returns `None` if the player aborted.
    pub fn play(&mut self, board: &mut Board) -> io::Result<Option<GameState>> {
        while board.state() == GameState::Playing {
            write!(self.output, "{board}")?;
            writeln!(
                self.output,
                "Mines: {}  Flags: {}",
                board.mine_count(),
                board.flag_count()
            )?;

            let Some(line) = self.prompt(&format!(
                "Your choice [\"(f)i j\" for the cell i down and j right, f to flag, \
                 {ABORT_TOKEN} to abort]\n\t> "
            ))?
            else {
                info!("input closed, aborting game");
                return Ok(None);
            };

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(ParseCommandError::NegativeCoordinate(_)) => {
                    self.bounds_hint(board)?;
                    continue;
                }
                Err(err) => {
                    writeln!(self.output, "{err}. {MOVE_HELP}")?;
                    continue;
                }
            };
            debug!("command {command:?}");

            let result = match command {
                Command::Abort => {
                    info!("game aborted by player");
                    return Ok(None);
                }
                Command::Flag(pos) => board.toggle_flag(pos).map(drop),
                Command::Chord(pos) => board.chord(pos).map(drop),
                Command::Open(pos)
                    if matches!(board.cell(pos), Ok(cell) if cell.is_flagged()) =>
                {
                    writeln!(self.output, "Cell {pos} is flagged, unflag it first")?;
                    continue;
                }
                Command::Open(pos) => board.open(pos).map(drop),
            };

            match result {
                Ok(()) => {}
                Err(GameError::OutOfBounds(_)) => self.bounds_hint(board)?,
                Err(err) => writeln!(self.output, "Error: {err}")?,
            }
        }

        let state = board.state();
        if state == GameState::Lost {
            board.set_reveal_mines(true);
        }
        write!(self.output, "{board}")?;
        if state == GameState::Won {
            writeln!(self.output, "Congratulations, you won!")?;
        } else {
            writeln!(self.output, "Boom :( You lost.")?;
        }
        info!("game finished: {state:?}");
        Ok(Some(state))
    }

    fn bounds_hint(&mut self, board: &Board) -> io::Result<()> {
        writeln!(
            self.output,
            "Please use a row between 0 and {} and a column between 0 and {}",
            board.height() - 1,
            board.width() - 1
        )
    }

    fn play_again(&mut self) -> io::Result<bool> {
        let answer = self.prompt("Would you like to play again? [y/n] ")?;
        Ok(answer.is_some_and(|answer| answer.trim().to_ascii_lowercase().starts_with('y')))
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

fn menu_label(rule: AdjacencyRule) -> &'static str {
    match rule {
        AdjacencyRule::Standard => "Standard",
        AdjacencyRule::Orthogonal => "Orthogonal",
        AdjacencyRule::Diagonal => "Diagonal",
        AdjacencyRule::Knight => "Knight's Path",
    }
}

// Menu numbers outside 1..=4 mean Standard; names are accepted too.
fn parse_rule_choice(choice: &str, default: AdjacencyRule) -> AdjacencyRule {
    match choice.parse::<usize>() {
        Ok(number) => AdjacencyRule::from_menu_choice(number).unwrap_or(AdjacencyRule::Standard),
        Err(_) => choice.parse().unwrap_or(default),
    }
}
