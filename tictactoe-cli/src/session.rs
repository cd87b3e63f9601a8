use anyhow::{Context, Result};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use tictactoe_engine::{
    CpuPlayer, Difficulty, Game, GameError, HumanPlayer, Mark, Outcome, Player,
};
use tracing::{debug, info};

use crate::config::{PlayerKind, Settings};
use crate::console;

/// Running score across rounds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    wins: BTreeMap<Mark, u32>,
    ties: u32,
}

impl Tally {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Winner(mark) => *self.wins.entry(mark.clone()).or_default() += 1,
            Outcome::Tie => self.ties += 1,
            Outcome::Ongoing => {}
        }
    }

    pub fn wins(&self, mark: &Mark) -> u32 {
        self.wins.get(mark).copied().unwrap_or(0)
    }

    pub fn ties(&self) -> u32 {
        self.ties
    }

    pub fn games(&self) -> u32 {
        self.wins.values().sum::<u32>() + self.ties
    }
}

/// A sequence of games between the same two players
///
/// Input and output are shared with the human players' prompts, so they live
/// behind `Rc<RefCell<_>>`.
pub struct Session<R, W> {
    settings: Settings,
    input: Rc<RefCell<R>>,
    output: Rc<RefCell<W>>,
    tally: Tally,
}

impl<R, W> Session<R, W>
where
    R: BufRead + 'static,
    W: Write + 'static,
{
    pub fn new(settings: Settings, input: Rc<RefCell<R>>, output: Rc<RefCell<W>>) -> Self {
        Self {
            settings,
            input,
            output,
            tally: Tally::default(),
        }
    }

    /// Play rounds until the configured count is reached or nobody wants
    /// another game, then print the score
    pub fn run(&mut self) -> Result<&Tally> {
        let players = self.build_players()?;
        info!(
            first = %players[0].mark(),
            second = %players[1].mark(),
            size = self.settings.size,
            "Session started"
        );

        let mut round = 0;
        loop {
            round += 1;
            match self.play_round(round, &players)? {
                Some(outcome) => self.tally.record(&outcome),
                None => break,
            }

            if !self.another_round(round)? {
                break;
            }
        }

        self.print_score(&players)?;
        info!(games = self.tally.games(), "Session finished");
        Ok(&self.tally)
    }

    fn build_players(&self) -> Result<[Rc<dyn Player>; 2]> {
        let build = |number: usize| -> Result<Rc<dyn Player>> {
            let seat = &self.settings.seats[number];
            let mark = Mark::new(seat.mark.as_str())?;

            let player: Rc<dyn Player> = match seat.kind {
                PlayerKind::Human => {
                    let input = Rc::clone(&self.input);
                    let output = Rc::clone(&self.output);
                    let prompt_mark = mark.clone();
                    Rc::new(HumanPlayer::with_input(mark, move |board| {
                        let mut input = input.borrow_mut();
                        let mut output = output.borrow_mut();
                        console::prompt_move(board, &prompt_mark, &mut *input, &mut *output)
                    }))
                }
                PlayerKind::Cpu => {
                    let mut cpu = CpuPlayer::new(mark)
                        .with_difficulty(Difficulty::try_from(seat.difficulty)?)
                        .with_pruning(self.settings.pruning);
                    // Each seat gets its own stream from the shared seed
                    if let Some(seed) = self.settings.seed {
                        cpu = cpu.with_seed(seed.wrapping_add(number as u64));
                    }
                    debug!(?cpu, "Built computer player");
                    Rc::new(cpu)
                }
            };
            Ok(player)
        };

        Ok([build(0)?, build(1)?])
    }

    /// `None` when the input ran out before the game finished
    fn play_round(&self, round: u32, players: &[Rc<dyn Player>; 2]) -> Result<Option<Outcome>> {
        let mut game = Game::new(self.settings.size, Rc::clone(&players[0]), Rc::clone(&players[1]))?;
        let output = Rc::clone(&self.output);

        self.show(|out| {
            writeln!(out, "Round {}: {} moves first", round, players[0].mark())?;
            write!(out, "{}", console::render(game.official_board()))
        })?;

        let mut failed_write: Option<io::Error> = None;
        let result = game.run_with(|board, mark, location| {
            let mut out = output.borrow_mut();
            let written = writeln!(out, "\n{} takes cell {}", mark, location + 1)
                .and_then(|()| write!(out, "{}", console::render(board)));
            if let Err(e) = written {
                failed_write = failed_write.take().or(Some(e));
            }
        });
        if let Some(e) = failed_write {
            return Err(e).with_context(|| format!("Failed to show a move in round {}", round));
        }

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(GameError::Input(reason)) => {
                info!(round, %reason, "Input ended, leaving session");
                return Ok(None);
            }
            Err(e) => return Err(e).with_context(|| format!("Round {} failed", round)),
        };

        info!(round, outcome = %outcome, "Round finished");
        self.show(|out| match &outcome {
            Outcome::Winner(mark) => writeln!(out, "{} wins!", mark),
            _ => writeln!(out, "It's a tie."),
        })?;
        Ok(Some(outcome))
    }

    fn another_round(&self, played: u32) -> Result<bool> {
        match self.settings.rounds {
            Some(rounds) => Ok(played < rounds),
            None if self.settings.has_human() => {
                let mut input = self.input.borrow_mut();
                let mut output = self.output.borrow_mut();
                Ok(console::confirm("Play again?", &mut *input, &mut *output)?)
            }
            None => Ok(false),
        }
    }

    fn print_score(&self, players: &[Rc<dyn Player>; 2]) -> Result<()> {
        let score = Score {
            tally: &self.tally,
            marks: [players[0].mark(), players[1].mark()],
        };
        self.show(|out| writeln!(out, "\n{}", score))
            .context("Failed to print final score")
    }

    fn show<F>(&self, print: F) -> Result<()>
    where
        F: FnOnce(&mut W) -> io::Result<()>,
    {
        let mut output = self.output.borrow_mut();
        print(&mut *output)
            .and_then(|()| output.flush())
            .context("Failed to write to output")
    }
}

struct Score<'a> {
    tally: &'a Tally,
    marks: [&'a Mark; 2],
}

impl fmt::Display for Score<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Final score after {} game(s): {} {}, {} {}, ties {}",
            self.tally.games(),
            self.marks[0],
            self.tally.wins(self.marks[0]),
            self.marks[1],
            self.tally.wins(self.marks[1]),
            self.tally.ties()
        )
    }
}
