use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tictactoe_engine::{Difficulty, Mark};
use tracing::Level;

/// Largest board the console can label with readable cell numbers
pub const MAX_SIZE: usize = 9;

/// Largest board an exhaustive search finishes on in reasonable time
pub const MAX_SEARCH_SIZE: usize = 3;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "tictactoe")]
#[command(about = "Console tic-tac-toe")]
#[command(long_about = "Play tic-tac-toe in the terminal against a person or the computer.

Settings come from the command line or environment first, then from an
optional TOML file given with --config, then from built-in defaults.")]
pub struct Config {
    /// TOML file with default settings
    #[arg(long, env = "TICTACTOE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Cells per side of the board [default: 3]
    #[arg(long, env = "TICTACTOE_SIZE")]
    pub size: Option<usize>,

    /// Who plays first [default: human]
    #[arg(long, env = "TICTACTOE_PLAYER1", value_enum)]
    pub player1: Option<PlayerKind>,

    /// Who plays second [default: cpu]
    #[arg(long, env = "TICTACTOE_PLAYER2", value_enum)]
    pub player2: Option<PlayerKind>,

    /// Mark of the first player [default: X]
    #[arg(long, env = "TICTACTOE_MARK1")]
    pub mark1: Option<String>,

    /// Mark of the second player [default: O]
    #[arg(long, env = "TICTACTOE_MARK2")]
    pub mark2: Option<String>,

    /// CPU difficulty of the first player, 1 to 3 [default: 2]
    #[arg(long, env = "TICTACTOE_DIFFICULTY1")]
    pub difficulty1: Option<u8>,

    /// CPU difficulty of the second player, 1 to 3 [default: 2]
    #[arg(long, env = "TICTACTOE_DIFFICULTY2")]
    pub difficulty2: Option<u8>,

    /// Seed for reproducible computer moves
    #[arg(long, env = "TICTACTOE_SEED")]
    pub seed: Option<u64>,

    /// Search the full game tree without alpha-beta pruning
    #[arg(long, env = "TICTACTOE_NO_PRUNING")]
    pub no_pruning: bool,

    /// Number of games to play; asks after each game when unset
    #[arg(long, env = "TICTACTOE_ROUNDS")]
    pub rounds: Option<u32>,

    /// Log level (trace, debug, info, warn, error) [default: warn]
    #[arg(long, env = "TICTACTOE_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Human,
    Cpu,
}

/// Settings read from a `--config` file; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub size: Option<usize>,
    pub player1: Option<PlayerKind>,
    pub player2: Option<PlayerKind>,
    pub mark1: Option<Mark>,
    pub mark2: Option<Mark>,
    pub difficulty1: Option<Difficulty>,
    pub difficulty2: Option<Difficulty>,
    pub seed: Option<u64>,
    pub pruning: Option<bool>,
    pub rounds: Option<u32>,
    pub log_level: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

/// One side of the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub kind: PlayerKind,
    pub mark: String,
    pub difficulty: u8,
}

/// Fully resolved settings for a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub size: usize,
    pub seats: [Seat; 2],
    pub seed: Option<u64>,
    pub pruning: bool,
    pub rounds: Option<u32>,
    pub log_level: String,
}

impl Settings {
    /// Merge the command line with the config file it names, then validate
    pub fn resolve(config: &Config) -> Result<Self> {
        let file = match &config.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        let settings = Self::merge(config, file);
        settings.validate()?;
        Ok(settings)
    }

    /// Command line over file over defaults, without validation
    pub fn merge(config: &Config, file: FileConfig) -> Self {
        let difficulty = u8::from(Difficulty::default());

        Self {
            size: config.size.or(file.size).unwrap_or(3),
            seats: [
                Seat {
                    kind: config.player1.or(file.player1).unwrap_or(PlayerKind::Human),
                    mark: config
                        .mark1
                        .clone()
                        .or(file.mark1.map(String::from))
                        .unwrap_or_else(|| "X".to_string()),
                    difficulty: config
                        .difficulty1
                        .or(file.difficulty1.map(u8::from))
                        .unwrap_or(difficulty),
                },
                Seat {
                    kind: config.player2.or(file.player2).unwrap_or(PlayerKind::Cpu),
                    mark: config
                        .mark2
                        .clone()
                        .or(file.mark2.map(String::from))
                        .unwrap_or_else(|| "O".to_string()),
                    difficulty: config
                        .difficulty2
                        .or(file.difficulty2.map(u8::from))
                        .unwrap_or(difficulty),
                },
            ],
            seed: config.seed.or(file.seed),
            pruning: !config.no_pruning && file.pruning.unwrap_or(true),
            rounds: config.rounds.or(file.rounds),
            log_level: config
                .log_level
                .clone()
                .or(file.log_level)
                .unwrap_or_else(|| "warn".to_string()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 || self.size > MAX_SIZE {
            return Err(anyhow!("size must be between 1 and {}, got {}", MAX_SIZE, self.size));
        }

        for (number, seat) in self.seats.iter().enumerate() {
            let number = number + 1;
            let mut chars = seat.mark.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if !c.is_whitespace() => {}
                _ => {
                    return Err(anyhow!(
                        "mark{} must be a single visible character, got {:?}",
                        number,
                        seat.mark
                    ))
                }
            }

            let difficulty = Difficulty::try_from(seat.difficulty)
                .map_err(|e| anyhow!("difficulty{}: {}", number, e))?;
            if seat.kind == PlayerKind::Cpu
                && difficulty == Difficulty::Hard
                && self.size > MAX_SEARCH_SIZE
            {
                return Err(anyhow!(
                    "difficulty{} {} needs a board of size {} or less, got {}",
                    number,
                    difficulty,
                    MAX_SEARCH_SIZE,
                    self.size
                ));
            }
        }

        if self.seats[0].mark == self.seats[1].mark {
            return Err(anyhow!("players need different marks, both use {:?}", self.seats[0].mark));
        }

        if self.rounds == Some(0) {
            return Err(anyhow!("rounds must be greater than 0"));
        }

        self.level()?;
        Ok(())
    }

    pub fn level(&self) -> Result<Level> {
        Level::from_str(&self.log_level)
            .map_err(|_| anyhow!("unknown log level {:?}", self.log_level))
    }

    /// Whether anybody at the table needs the keyboard
    pub fn has_human(&self) -> bool {
        self.seats.iter().any(|seat| seat.kind == PlayerKind::Human)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["tictactoe"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    fn defaults() -> Settings {
        Settings::merge(&Config::default(), FileConfig::default())
    }

    #[test]
    fn test_defaults() {
        let settings = defaults();

        assert_eq!(settings.size, 3);
        assert_eq!(settings.seats[0].kind, PlayerKind::Human);
        assert_eq!(settings.seats[1].kind, PlayerKind::Cpu);
        assert_eq!(settings.seats[0].mark, "X");
        assert_eq!(settings.seats[1].mark, "O");
        assert_eq!(settings.seats[1].difficulty, 2);
        assert!(settings.pruning);
        assert_eq!(settings.rounds, None);
        assert_eq!(settings.level().unwrap(), Level::WARN);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_command_line_values() {
        let config = parse(&[
            "--size", "4", "--player1", "cpu", "--difficulty1", "3", "--mark2", "Z",
            "--seed", "11", "--no-pruning", "--rounds", "5",
        ]);
        let settings = Settings::merge(&config, FileConfig::default());

        assert_eq!(settings.size, 4);
        assert_eq!(settings.seats[0].kind, PlayerKind::Cpu);
        assert_eq!(settings.seats[0].difficulty, 3);
        assert_eq!(settings.seats[1].mark, "Z");
        assert_eq!(settings.seed, Some(11));
        assert!(!settings.pruning);
        assert_eq!(settings.rounds, Some(5));
        assert!(!settings.has_human());
    }

    #[test]
    fn test_command_line_overrides_file() {
        let file: FileConfig = toml::from_str(
            r#"
            size = 5
            mark1 = "A"
            difficulty2 = 1
            player2 = "human"
            pruning = false
            log_level = "debug"
            "#,
        )
        .unwrap();
        let config = parse(&["--size", "4"]);
        let settings = Settings::merge(&config, file);

        assert_eq!(settings.size, 4);
        assert_eq!(settings.seats[0].mark, "A");
        assert_eq!(settings.seats[1].kind, PlayerKind::Human);
        assert_eq!(settings.seats[1].difficulty, 1);
        assert!(!settings.pruning);
        assert_eq!(settings.level().unwrap(), Level::DEBUG);
    }

    #[test]
    fn test_file_rejects_unknown_keys() {
        let result: Result<FileConfig, _> = toml::from_str("colour = \"red\"");
        assert!(result.is_err());

        let result: Result<FileConfig, _> = toml::from_str("player1 = \"robot\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_file_rejects_invalid_marks_and_difficulties() {
        for text in ["mark1 = \"\"", "mark2 = \"   \"", "difficulty1 = 7", "difficulty2 = 0"] {
            let result: Result<FileConfig, _> = toml::from_str(text);
            assert!(result.is_err(), "{} accepted", text);
        }
    }

    #[test]
    fn test_file_config_round_trip() {
        let file = FileConfig {
            size: Some(3),
            player1: Some(PlayerKind::Cpu),
            player2: Some(PlayerKind::Human),
            mark1: Some(Mark::new("A").unwrap()),
            mark2: Some(Mark::new("0").unwrap()),
            difficulty1: Some(Difficulty::Hard),
            difficulty2: Some(Difficulty::Easy),
            seed: Some(5),
            pruning: Some(false),
            rounds: Some(2),
            log_level: Some("info".to_string()),
        };

        let text = toml::to_string(&file).unwrap();
        assert!(text.contains("mark2 = \"0\""));
        assert!(text.contains("difficulty1 = 3"));
        assert_eq!(toml::from_str::<FileConfig>(&text).unwrap(), file);
    }

    #[test]
    fn test_resolve_reads_config_file() {
        let path = std::env::temp_dir().join(format!("tictactoe-config-{}.toml", std::process::id()));
        fs::write(&path, "rounds = 2\nseed = 9\n").unwrap();

        let config = Config {
            config: Some(path.clone()),
            ..Config::default()
        };
        let settings = Settings::resolve(&config).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(settings.rounds, Some(2));
        assert_eq!(settings.seed, Some(9));
    }

    #[test]
    fn test_resolve_reports_missing_file() {
        let config = Config {
            config: Some(PathBuf::from("/definitely/not/here.toml")),
            ..Config::default()
        };
        let err = Settings::resolve(&config).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_validate_size() {
        for size in [0, MAX_SIZE + 1] {
            let mut settings = defaults();
            settings.size = size;
            assert!(settings.validate().is_err(), "size {} accepted", size);
        }

        let mut settings = defaults();
        settings.size = 1;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_marks() {
        for mark in ["", " ", "XX"] {
            let mut settings = defaults();
            settings.seats[0].mark = mark.to_string();
            assert!(settings.validate().is_err(), "mark {:?} accepted", mark);
        }

        let mut settings = defaults();
        settings.seats[1].mark = "X".to_string();
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("different marks"));
    }

    #[test]
    fn test_validate_hard_cpu_board_size() {
        let mut settings = defaults();
        settings.size = 4;
        settings.seats[1].difficulty = 3;
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("size 3 or less"));

        // Medium players and hard humans are fine on big boards
        settings.seats[1].difficulty = 2;
        settings.seats[0].difficulty = 3;
        assert!(settings.validate().is_ok());

        settings.size = 3;
        settings.seats[1].difficulty = 3;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_difficulty_rounds_and_level() {
        let mut settings = defaults();
        settings.seats[1].difficulty = 4;
        assert!(settings.validate().is_err());

        let mut settings = defaults();
        settings.rounds = Some(0);
        assert!(settings.validate().is_err());

        let mut settings = defaults();
        settings.log_level = "loud".to_string();
        assert!(settings.validate().is_err());
    }
}
