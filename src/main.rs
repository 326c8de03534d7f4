use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEventKind,
};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use maze_game::config::Settings;
use maze_game::render::WHITE;
use maze_game::terminal::{surface_point, TerminalRenderer};
use maze_game::{Direction, GameSession, Geometry, Grid, MoveOutcome, Renderer};

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;
    stdout.execute(EnableMouseCapture)?;

    let result = run(&mut stdout);

    stdout.execute(DisableMouseCapture)?;
    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(stdout: &mut Stdout) -> io::Result<()> {
    let settings = Settings::from_env();
    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let (cols, rows) = terminal::size()?;
    let mut renderer = TerminalRenderer::new(stdout, cols, rows);
    let (surface_w, surface_h) = renderer.surface_size();
    let geometry = Geometry::new(surface_w, surface_h, settings.margin);
    let grid = Grid::new(settings.width, settings.height, geometry)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let mut session = GameSession::from_grid(grid, rng);
    let mut last = MoveOutcome::Blocked;

    loop {
        render(&session, &mut renderer, last)?;

        match event::read()? {
            Event::Key(key) => {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    continue;
                }
                let dir = match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Up | KeyCode::Char('k') => Direction::North,
                    KeyCode::Down | KeyCode::Char('j') => Direction::South,
                    KeyCode::Left | KeyCode::Char('h') => Direction::West,
                    KeyCode::Right | KeyCode::Char('l') => Direction::East,
                    KeyCode::Char(c) => match Direction::from_symbol(c) {
                        Some(dir) => dir,
                        None => continue,
                    },
                    _ => continue,
                };
                last = session.move_player(dir);
            }
            Event::Mouse(mouse) => {
                if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
                    continue;
                }
                let picked = surface_point(mouse.column, mouse.row)
                    .and_then(|(x, y)| session.grid().cell_at_point(x, y));
                if let Some(outcome) = session.select(picked) {
                    last = outcome;
                }
            }
            Event::Resize(cols, rows) => {
                renderer.resize(cols, rows);
                let (w, h) = renderer.surface_size();
                session.set_surface(w, h);
            }
            _ => {}
        }
    }
}

fn render<W: Write, R: Rng>(
    session: &GameSession<R>,
    renderer: &mut TerminalRenderer<W>,
    last: MoveOutcome,
) -> io::Result<()> {
    let grid = session.grid();
    renderer.clear_surface(WHITE)?;

    if grid.layout().fits() {
        let status = match last {
            MoveOutcome::Advanced { .. } => "  Goal reached!",
            _ => "",
        };
        renderer.set_hud(&format!(
            "Round: {}  Maze: {}x{}{}  (arrows/hjkl or click to move, q to quit)",
            session.round(),
            grid.width(),
            grid.height(),
            status
        ));
        session.draw(renderer)?;
    } else {
        renderer.set_hud(&format!(
            "Terminal too small for a {}x{} maze. Enlarge it or press q.",
            grid.width(),
            grid.height()
        ));
    }

    renderer.present()
}
