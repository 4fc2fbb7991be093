mod input;
mod ui;

use arcade::build_info::version_line;
use arcade::core::constants::REALTIME_FRAME_MS;
use arcade::core::{Engine, GameEvent, GameRules, RunState};
use arcade::event_log::{EventLog, LogEntry};
use arcade::games::{GameKind, Race, Snake};
use arcade::utils::{HighScores, ScoreRecord, Settings};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use input::{menu_command, race_command, snake_command, GameCommand, MenuCommand};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::cell::Cell;
use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};
use ui::menu::{cycle_accent, cycle_difficulty, render_menu, MenuState};
use ui::race_scene::render_race_scene;
use ui::snake_scene::render_snake_scene;
use ui::Hud;

/// The game currently on screen, if any.
enum ActiveGame {
    Race(Engine<Race>),
    Snake(Engine<Snake>),
}

impl ActiveGame {
    fn kind(&self) -> GameKind {
        match self {
            ActiveGame::Race(_) => GameKind::Race,
            ActiveGame::Snake(_) => GameKind::Snake,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct App {
    settings: Settings,
    scores: HighScores,
    menu: MenuState,
    game: Option<ActiveGame>,
    log: EventLog,
    paused: bool,
    /// Highest score seen this session, fed by the engines' score callback.
    session_best: Rc<Cell<u32>>,
    new_best: bool,
}

impl App {
    fn new() -> Self {
        Self {
            settings: Settings::load(),
            scores: HighScores::load(),
            menu: MenuState::default(),
            game: None,
            log: EventLog::default(),
            paused: false,
            session_best: Rc::new(Cell::new(0)),
            new_best: false,
        }
    }

    fn score_observer(&self) -> impl FnMut(u32) + 'static {
        let best = Rc::clone(&self.session_best);
        move |score| {
            if score > best.get() {
                best.set(score);
            }
        }
    }

    fn open_game(&mut self, kind: GameKind) {
        let options = self.settings.engine_options();
        let opened = match kind {
            GameKind::Race => {
                Engine::<Race>::new(self.settings.race_config(), options).map(ActiveGame::Race)
            }
            GameKind::Snake => {
                Engine::<Snake>::new(self.settings.snake_config(), options).map(ActiveGame::Snake)
            }
        };
        match opened {
            Ok(mut game) => {
                match &mut game {
                    ActiveGame::Race(engine) => engine.on_score_change(self.score_observer()),
                    ActiveGame::Snake(engine) => engine.on_score_change(self.score_observer()),
                }
                self.session_best.set(self.scores.best(kind).unwrap_or(0));
                self.log.clear();
                self.paused = false;
                self.new_best = false;
                self.game = Some(game);
            }
            Err(e) => self.log.push(LogEntry {
                message: format!("Bad {} config: {}", kind.key(), e),
                positive: false,
            }),
        }
    }

    fn close_game(&mut self) {
        if let Some(game) = self.game.as_mut() {
            match game {
                ActiveGame::Race(engine) => engine.stop(),
                ActiveGame::Snake(engine) => engine.stop(),
            }
        }
        self.game = None;
        self.paused = false;
    }

    fn difficulty_str(&self, kind: GameKind) -> &'static str {
        match kind {
            GameKind::Race => self.settings.race_difficulty.difficulty_str(),
            GameKind::Snake => self.settings.snake_difficulty.difficulty_str(),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Flow {
        let Some(game) = self.game.as_mut() else {
            return self.handle_menu_key(key);
        };

        let command = match game {
            ActiveGame::Race(engine) => race_command(key).map(|cmd| {
                apply_command(engine, cmd, &mut self.paused, |e, mv| e.move_player(mv))
            }),
            ActiveGame::Snake(engine) => snake_command(key).map(|cmd| {
                apply_command(engine, cmd, &mut self.paused, |e, d| e.change_direction(d))
            }),
        };

        match command {
            Some(Leave::Menu) => {
                self.close_game();
                Flow::Continue
            }
            Some(Leave::Quit) => Flow::Quit,
            Some(Leave::Stay) | None => Flow::Continue,
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> Flow {
        let game = self.menu.selected_game();
        match menu_command(key) {
            Some(MenuCommand::Up) => self.menu.navigate_up(),
            Some(MenuCommand::Down) => self.menu.navigate_down(),
            Some(MenuCommand::Left) => cycle_difficulty(&mut self.settings, game, -1),
            Some(MenuCommand::Right) => cycle_difficulty(&mut self.settings, game, 1),
            Some(MenuCommand::CycleAccent) => cycle_accent(&mut self.settings),
            Some(MenuCommand::Play) => self.open_game(game),
            Some(MenuCommand::Quit) => return Flow::Quit,
            None => {}
        }
        Flow::Continue
    }

    /// Feed elapsed time to the active engine and collect its events.
    fn update(&mut self, dt_ms: u64) {
        let Some(game) = self.game.as_mut() else {
            return;
        };
        let kind = game.kind();
        let (events, level) = match game {
            ActiveGame::Race(engine) => {
                engine.update(dt_ms);
                (engine.drain_events(), engine.snapshot().pace.level)
            }
            ActiveGame::Snake(engine) => {
                engine.update(dt_ms);
                (engine.drain_events(), engine.snapshot().pace.level)
            }
        };
        if events.is_empty() {
            return;
        }
        self.log.apply_events(&events);

        for event in &events {
            match event {
                GameEvent::RunEnded { score, .. } => self.record_score(kind, *score, level),
                GameEvent::RunReset | GameEvent::RunStarted => self.new_best = false,
                _ => {}
            }
        }
    }

    fn record_score(&mut self, kind: GameKind, score: u32, level: u32) {
        let record = ScoreRecord::now(score, level, self.difficulty_str(kind));
        let Some(rank) = self.scores.submit(kind, record) else {
            return;
        };
        self.new_best = rank == 0;
        if let Err(e) = self.scores.save() {
            self.log.push(LogEntry {
                message: format!("Could not save scores: {}", e),
                positive: false,
            });
        }
    }

    fn hud(&self, kind: GameKind) -> Hud<'_> {
        let stored = self.scores.best(kind).unwrap_or(0);
        let best = stored.max(self.session_best.get());
        Hud {
            difficulty: match kind {
                GameKind::Race => self.settings.race_difficulty.name(),
                GameKind::Snake => self.settings.snake_difficulty.name(),
            },
            best: (best > 0).then_some(best),
            log: &self.log,
            paused: self.paused,
            new_best: self.new_best,
        }
    }
}

/// What the host does after a game command.
enum Leave {
    Stay,
    Menu,
    Quit,
}

fn apply_command<G: GameRules>(
    engine: &mut Engine<G>,
    command: GameCommand<G::Input>,
    paused: &mut bool,
    mut send: impl FnMut(&mut Engine<G>, G::Input),
) -> Leave {
    match command {
        GameCommand::Move(input) => {
            if *paused {
                engine.resume();
                *paused = false;
            }
            send(engine, input);
        }
        GameCommand::Start => {
            if !engine.start() && engine.run_state() == RunState::Ended {
                engine.reset();
            }
        }
        GameCommand::TogglePause => {
            if engine.run_state().is_running() {
                if *paused {
                    engine.resume();
                } else {
                    engine.stop();
                }
                *paused = !*paused;
            }
        }
        GameCommand::Back => return Leave::Menu,
        GameCommand::Quit => return Leave::Quit,
    }
    Leave::Stay
}

fn draw(frame: &mut Frame, app: &App) {
    let area = frame.size();
    match &app.game {
        None => render_menu(frame, area, &app.menu, &app.settings, &app.scores),
        Some(ActiveGame::Race(engine)) => render_race_scene(
            frame,
            area,
            &engine.snapshot(),
            engine.config(),
            &app.hud(GameKind::Race),
        ),
        Some(ActiveGame::Snake(engine)) => {
            render_snake_scene(frame, area, &engine.snapshot(), &app.hud(GameKind::Snake))
        }
    }
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    let frame_time = Duration::from_millis(REALTIME_FRAME_MS);
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|f| draw(f, app))?;

        if event::poll(frame_time)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key) == Flow::Quit {
                    return Ok(());
                }
            }
        }

        let now = Instant::now();
        let dt_ms = now.duration_since(last_frame).as_millis() as u64;
        last_frame = now;
        app.update(dt_ms);
    }
}

/// Leave raw mode and the alternate screen, ignoring failures.
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = io::stdout().execute(LeaveAlternateScreen);
}

/// Restore the terminal before the default hook prints, so a panic message
/// lands on a usable screen.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        default_hook(info);
    }));
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!("{}", version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Arcade - real-time terminal mini-games\n");
                println!("Usage: arcade [option]\n");
                println!("Options:");
                println!("  --version  Show version information");
                println!("  --help     Show this help message");
                println!("\nSettings and best scores live in ~/.arcade/");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'arcade --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    let mut app = App::new();

    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = app.settings.save() {
        eprintln!("Failed to save settings: {}", e);
    }
    result
}
