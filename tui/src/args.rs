//! Parsing command-line arguments.

use clap::{
    command, error::ErrorKind, value_parser, Arg, ArgAction, ArgMatches, Command,
    Error as ClapError,
};
use rlifesim_lib::{Config, Preset, Rules, World, WorldSer};
use std::{
    error::Error,
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

/// Parses a soup size like `16x16`.
fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (width, height) = s
        .split_once(|c| c == 'x' || c == 'X')
        .ok_or_else(|| String::from("size should look like WIDTHxHEIGHT"))?;
    let width: u32 = width.trim().parse().map_err(|e| format!("{}", e))?;
    let height: u32 = height.trim().parse().map_err(|e| format!("{}", e))?;
    if width == 0 || height == 0 {
        return Err(String::from("width and height must be positive"));
    }
    Ok((width, height))
}

/// Reads a configuration file. The format is guessed from the extension:
/// `.yaml` or `.yml` for YAML, `.toml` for TOML, and JSON otherwise.
pub(crate) fn load_config(path: &Path) -> Result<Config, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let config = match path.extension().and_then(OsStr::to_str) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&text)?,
        Some("toml") => toml::from_str(&text)?,
        _ => serde_json::from_str(&text)?,
    };
    Ok(config)
}

fn command() -> Command {
    let cmd = command!()
        .long_about(
            "Simulates Life-like cellular automata on an unbounded grid.\n\
             \n\
             The initial pattern is built from a random soup, a preset and an \
             RLE file, in this order, all centered at the origin.\n\
             Options given on the command line override those read from the \
             configuration file.\n",
        )
        .arg(
            Arg::new("PATTERN")
                .help("RLE file to load")
                .index(1)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("CONFIG")
                .help("Configuration file in JSON, YAML or TOML")
                .short('c')
                .long("config")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("RULE")
                .help("Rule of the cellular automaton")
                .long_help(
                    "Rule of the cellular automaton\n\
                     Supports totalistic Life-like rules, e.g. B3/S23 or 23/3. \
                     Defaults to B3/S23.\n",
                )
                .short('r')
                .long("rule")
                .value_parser(|s: &str| {
                    s.parse::<Rules>()
                        .map(|_| s.to_string())
                        .map_err(|e| e.to_string())
                }),
        )
        .arg(
            Arg::new("PRESET")
                .help("A well-known pattern to put at the origin")
                .long_help(
                    "A well-known pattern to put at the origin\n\
                     e.g. glider, r-pentomino, gosper-glider-gun.\n",
                )
                .short('p')
                .long("preset")
                .value_parser(|s: &str| s.parse::<Preset>()),
        )
        .arg(
            Arg::new("ORIGINX")
                .help("Horizontal coordinate of the origin")
                .long("origin-x")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i32)),
        )
        .arg(
            Arg::new("ORIGINY")
                .help("Vertical coordinate of the origin")
                .long("origin-y")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i32)),
        )
        .arg(
            Arg::new("SOUP")
                .help("Size of a random soup, e.g. 16x16")
                .long("soup")
                .value_parser(parse_size),
        )
        .arg(
            Arg::new("DENSITY")
                .help("Density of the random soup, between 0 and 1")
                .long("density")
                .requires("SOUP")
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("SEED")
                .help("Seed of the random soup")
                .long("seed")
                .requires("SOUP")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("SPEED")
                .help("Generations per second")
                .short('s')
                .long("speed")
                .value_parser(value_parser!(u32).range(1..=120)),
        )
        .arg(
            Arg::new("GENERATIONS")
                .help("Number of generations to run without the TUI")
                .short('g')
                .long("generations")
                .default_value("100")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("SAVE")
                .help("Saves the final generation to this file, in JSON")
                .long("save")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("RESUME")
                .help("Resumes from a file written by --save")
                .long("resume")
                .conflicts_with_all(["PATTERN", "PRESET", "SOUP"])
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("PLAINTEXT")
                .help("Prints the final pattern in Plaintext instead of RLE")
                .long("plaintext")
                .action(ArgAction::SetTrue),
        );

    #[cfg(feature = "tui")]
    let cmd = cmd.arg(
        Arg::new("NOTUI")
            .help("Runs immediately and prints the result, without entering the TUI")
            .short('n')
            .long("no-tui")
            .action(ArgAction::SetTrue),
    );

    cmd
}

/// A struct to store the parse results.
#[derive(Debug)]
pub(crate) struct Args {
    pub(crate) config: Config,
    /// A file written by `--save`.
    pub(crate) resume: Option<PathBuf>,
    /// Whether the rule was given on the command line.
    pub(crate) rule_given: bool,
    pub(crate) generations: u64,
    pub(crate) save: Option<PathBuf>,
    pub(crate) plaintext: bool,
    #[cfg(feature = "tui")]
    pub(crate) no_tui: bool,
}

impl Args {
    /// Parses the command-line arguments.
    pub(crate) fn parse() -> Result<Self, ClapError> {
        Args::from_matches(command().try_get_matches()?)
    }

    /// Parses the given arguments. The first one is the binary name.
    #[cfg(test)]
    pub(crate) fn parse_from<I, T>(args: I) -> Result<Self, ClapError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Args::from_matches(command().try_get_matches_from(args)?)
    }

    fn from_matches(matches: ArgMatches) -> Result<Self, ClapError> {
        let mut config = match matches.get_one::<PathBuf>("CONFIG") {
            Some(path) => load_config(path).map_err(|e| {
                command().error(
                    ErrorKind::Io,
                    format!("cannot read config file {}: {}", path.display(), e),
                )
            })?,
            None => Config::default(),
        };

        let rule_given = matches.contains_id("RULE");
        if let Some(rule) = matches.get_one::<String>("RULE") {
            config = config.set_rule_string(rule);
        }
        if let Some(path) = matches.get_one::<PathBuf>("PATTERN") {
            let text = fs::read_to_string(path).map_err(|e| {
                command().error(
                    ErrorKind::Io,
                    format!("cannot read pattern file {}: {}", path.display(), e),
                )
            })?;
            config = config.set_pattern(text);
        }
        if let Some(&preset) = matches.get_one::<Preset>("PRESET") {
            config = config.set_preset(preset);
        }
        let (x, y) = config.origin;
        config = config.set_origin(
            matches.get_one::<i32>("ORIGINX").copied().unwrap_or(x),
            matches.get_one::<i32>("ORIGINY").copied().unwrap_or(y),
        );
        if let Some(&(width, height)) = matches.get_one::<(u32, u32)>("SOUP") {
            let mut soup = config.soup.take().unwrap_or_default();
            soup.width = width;
            soup.height = height;
            if let Some(&density) = matches.get_one::<f64>("DENSITY") {
                soup.density = density;
            }
            if let Some(&seed) = matches.get_one::<u64>("SEED") {
                soup.seed = Some(seed);
            }
            config = config.set_soup(soup);
        }
        if let Some(&speed) = matches.get_one::<u32>("SPEED") {
            config = config.set_speed(speed);
        }

        Ok(Args {
            config,
            resume: matches.get_one::<PathBuf>("RESUME").cloned(),
            rule_given,
            generations: matches.get_one::<u64>("GENERATIONS").copied().unwrap_or(100),
            save: matches.get_one::<PathBuf>("SAVE").cloned(),
            plaintext: matches.get_flag("PLAINTEXT"),
            #[cfg(feature = "tui")]
            no_tui: matches.get_flag("NOTUI"),
        })
    }

    /// Whether to enter the TUI.
    #[cfg(feature = "tui")]
    pub(crate) fn uses_tui(&self) -> bool {
        !self.no_tui
    }

    #[cfg(not(feature = "tui"))]
    pub(crate) fn uses_tui(&self) -> bool {
        false
    }

    /// Builds the initial world, either from the configuration or from a
    /// saved file.
    pub(crate) fn world(&self) -> Result<World, Box<dyn Error>> {
        let Some(path) = &self.resume else {
            return Ok(self.config.world()?);
        };
        let ser: WorldSer = serde_json::from_str(&fs::read_to_string(path)?)?;
        let mut world = ser.world();
        if self.rule_given {
            world.set_rules(self.config.rules()?);
        }
        Ok(world)
    }
}
