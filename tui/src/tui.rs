//! The text user interface.

use crate::{args::Args, cli};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use rlifesim_lib::{
    Config, Coord, Preset, Rules, World, MAX_COORD, MAX_SPEED, MIN_COORD, MIN_SPEED,
};
use std::{
    error::Error,
    io::{self, Write},
    time::{Duration, Instant},
};

/// The character for a living cell of the given age.
///
/// Cells placed since the last step have no age yet.
fn glyph(age: Option<u32>) -> char {
    match age {
        None | Some(0..=1) => '@',
        Some(2..=4) => 'O',
        Some(5..=16) => 'o',
        Some(_) => '*',
    }
}

/// Truncates or pads the text to exactly `width` characters.
fn fit(text: &str, width: u16) -> String {
    let width = width as usize;
    let mut line: String = text.chars().take(width).collect();
    let len = line.chars().count();
    line.extend(std::iter::repeat(' ').take(width - len));
    line
}

/// What to do after a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Continue,
    Quit,
    /// Asks before quitting.
    ConfirmQuit,
}

struct App {
    world: World,
    config: Config,
    running: bool,
    next_tick: Instant,

    cursor: Coord,
    /// Top-left corner of the viewport.
    view: Coord,
    /// Terminal size, as `(columns, rows)`.
    size: (u16, u16),

    preset: Preset,
    /// Index in [`Rules::PRESETS`] of the current rule, if it is one of them.
    rule_index: Option<usize>,
}

impl App {
    fn new(world: World, config: Config, size: (u16, u16)) -> Self {
        let rule_index = Rules::PRESETS
            .iter()
            .position(|(_, rules)| &rules() == world.rules());
        let cursor = config.origin;
        let mut app = App {
            world,
            config,
            running: false,
            next_tick: Instant::now(),
            cursor,
            view: (0, 0),
            size,
            preset: Preset::Glider,
            rule_index,
        };
        app.center_view();
        app
    }

    /// Number of rows between the two bars.
    fn rows(&self) -> u16 {
        self.size.1.saturating_sub(2)
    }

    fn center_view(&mut self) {
        self.view = (
            self.cursor.0 - (self.size.0 / 2) as i32,
            self.cursor.1 - (self.rows() / 2) as i32,
        );
    }

    /// Scrolls the viewport so that the cursor is visible.
    fn follow_cursor(&mut self) {
        let (width, height) = (self.size.0.max(1) as i32, self.rows().max(1) as i32);
        let (x, y) = self.cursor;
        let (left, top) = &mut self.view;
        if x < *left {
            *left = x;
        } else if x >= *left + width {
            *left = x - width + 1;
        }
        if y < *top {
            *top = y;
        } else if y >= *top + height {
            *top = y - height + 1;
        }
    }

    fn move_cursor(&mut self, dx: i32, dy: i32) {
        self.cursor = (
            (self.cursor.0 + dx).clamp(MIN_COORD, MAX_COORD),
            (self.cursor.1 + dy).clamp(MIN_COORD, MAX_COORD),
        );
        self.follow_cursor();
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        self.follow_cursor();
    }

    fn interval(&self) -> Duration {
        self.config.interval()
    }

    fn start(&mut self) {
        self.running = true;
        self.next_tick = Instant::now() + self.interval();
    }

    fn pause(&mut self) {
        self.running = false;
    }

    fn set_speed(&mut self, speed: u32) {
        self.config.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        if self.running {
            self.next_tick = Instant::now() + self.interval();
        }
    }

    /// Steps the world and schedules the next tick.
    fn tick(&mut self) {
        self.world.step();
        let now = Instant::now();
        self.next_tick += self.interval();
        if self.next_tick < now {
            self.next_tick = now + self.interval();
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                if self.running {
                    self.pause();
                    return Action::ConfirmQuit;
                }
                return Action::Quit;
            }
            KeyCode::Char(' ') => {
                if self.running {
                    self.pause();
                } else {
                    self.start();
                }
            }
            KeyCode::Char('n') => {
                self.world.step();
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.set_speed(self.config.speed.saturating_add(1))
            }
            KeyCode::Char('-') => self.set_speed(self.config.speed.saturating_sub(1)),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(0, 1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(1, 0),
            KeyCode::Enter => self.world.toggle_cell(self.cursor.0, self.cursor.1),
            KeyCode::Tab => self.preset = self.preset.next(),
            KeyCode::Char('p') => {
                let (x, y) = self.cursor;
                self.world.insert_pattern_at(&self.preset.pattern(), x, y);
            }
            KeyCode::Char('R') => {
                let index = self
                    .rule_index
                    .map_or(0, |i| (i + 1) % Rules::PRESETS.len());
                self.rule_index = Some(index);
                self.world.set_rules((Rules::PRESETS[index].1)());
            }
            KeyCode::Char('c') => {
                self.pause();
                self.world.clear();
            }
            _ => (),
        }
        Action::Continue
    }

    fn top_bar(&self) -> String {
        let rule_name = self
            .rule_index
            .map_or_else(String::new, |i| format!(" ({})", Rules::PRESETS[i].0));
        format!(
            "{}{}  Speed: {}/s  {}",
            cli::stats(&self.world),
            rule_name,
            self.config.speed,
            if self.running { "Running" } else { "Paused" }
        )
    }

    fn bottom_bar(&self) -> String {
        format!(
            "({}, {})  [space] run/pause  [n] step  [+/-] speed  [enter] toggle  \
             [tab] {}  [p] place  [R] rule  [c] clear  [q] quit",
            self.cursor.0, self.cursor.1, self.preset
        )
    }

    fn draw<W: Write>(&self, out: &mut W, bottom: &str) -> io::Result<()> {
        let (width, height) = self.size;
        queue!(
            out,
            Clear(ClearType::All),
            MoveTo(0, 0),
            SetAttribute(Attribute::Reverse),
            Print(fit(&self.top_bar(), width)),
            SetAttribute(Attribute::Reset)
        )?;
        let (left, top) = self.view;
        for row in 0..self.rows() {
            let y = top + row as i32;
            let line: String = (0..width as i32)
                .map(|col| {
                    let x = left + col;
                    if self.world.is_alive(x, y) {
                        glyph(self.world.age(x, y))
                    } else {
                        ' '
                    }
                })
                .collect();
            queue!(out, MoveTo(0, row + 1), Print(line))?;
        }

        let (x, y) = self.cursor;
        let under = if self.world.is_alive(x, y) {
            glyph(self.world.age(x, y))
        } else {
            ' '
        };
        if height > 2 {
            queue!(
                out,
                MoveTo((x - left) as u16, (y - top) as u16 + 1),
                SetAttribute(Attribute::Reverse),
                Print(under),
                SetAttribute(Attribute::Reset)
            )?;
        }
        queue!(
            out,
            MoveTo(0, height.saturating_sub(1)),
            SetAttribute(Attribute::Reverse),
            Print(fit(bottom, width)),
            SetAttribute(Attribute::Reset)
        )?;
        out.flush()
    }

    /// Reads the next key press, blocking.
    fn read_key() -> io::Result<KeyEvent> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Release {
                    return Ok(key);
                }
            }
        }
    }

    fn confirm_quit<W: Write>(&self, out: &mut W) -> io::Result<bool> {
        self.draw(out, "Are you sure to quit? [Y/n]")?;
        let key = App::read_key()?;
        Ok(matches!(
            key.code,
            KeyCode::Char('Y') | KeyCode::Char('y') | KeyCode::Enter
        ))
    }

    fn main_loop<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.draw(out, &self.bottom_bar())?;
        loop {
            let ready = if self.running {
                event::poll(self.next_tick.saturating_duration_since(Instant::now()))?
            } else {
                true
            };
            if ready {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        match self.handle_key(key) {
                            Action::Continue => (),
                            Action::Quit => break,
                            Action::ConfirmQuit => {
                                if self.confirm_quit(out)? {
                                    break;
                                }
                            }
                        }
                    }
                    Event::Resize(width, height) => self.resize(width, height),
                    _ => (),
                }
            } else {
                self.tick();
            }
            self.draw(out, &self.bottom_bar())?;
        }
        Ok(())
    }
}

/// Runs the TUI, then prints the final world.
pub(crate) fn run(args: &Args, world: World) -> Result<(), Box<dyn Error>> {
    let mut stdout = io::stdout();
    let mut app = App::new(world, args.config.clone(), terminal::size()?);

    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let result = app.main_loop(&mut stdout);
    execute!(stdout, Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result?;

    cli::finish(args, &app.world)
}
