use std::time::{Duration, Instant};

use bulkkot_config::Config;
use bulkkot_fonts::{GLYPH_HEIGHT, build_year_art};
use bulkkot_scene::{Scene, Starfield};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    symbols::Marker,
    text::Line,
    widgets::{Paragraph, canvas::Canvas},
};

mod greeting;
mod surface;

use greeting::GreetingMonitor;
use surface::CanvasSurface;

/// Logical height of the simulated sky, in scene units. The width follows
/// the terminal's aspect ratio each frame.
const SKY_HEIGHT: f32 = 500.0;

/// Rough cell aspect: one terminal row is about two columns tall.
const CELL_ASPECT: f32 = 2.0;

/// Event poll timeout per pass, approximating a 60 Hz frame callback.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Champagne gold for the banner and help keys.
const BANNER_COLOR: Color = Color::Rgb(255, 200, 50);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::load();
    let terminal = ratatui::init();
    let result = App::new(config).run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
pub struct App {
    /// Is the application running?
    running: bool,
    /// User configuration, read once at startup.
    config: Config,
    /// ASCII art year banner, built once.
    banner: Vec<String>,
    /// Fixed background stars.
    starfield: Starfield,
    /// Rockets and burst particles.
    scene: Scene,
    /// Location lookup for the greeting line.
    greeting: GreetingMonitor,
    /// Wall-clock launch cadence, independent of the frame rate.
    launch_interval: Duration,
    last_launch: Instant,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        let banner = build_year_art(config.year);
        let greeting = GreetingMonitor::new(config.year, config.greeting.coordinates());
        let launch_interval = Duration::from_millis(config.launch_interval_ms);

        Self {
            running: false,
            banner,
            starfield: Starfield::new(),
            scene: Scene::new(0.0, SKY_HEIGHT),
            greeting,
            launch_interval,
            last_launch: Instant::now(),
            config,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        if self.config.greeting.enabled {
            self.greeting.start();
        }
        self.last_launch = Instant::now();

        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.tick();
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Advance the simulation one frame and fire the launch clock when due.
    fn tick(&mut self) {
        if self.last_launch.elapsed() >= self.launch_interval {
            self.scene.launch();
            self.last_launch = Instant::now();
        }
        self.scene.advance();
        self.starfield.twinkle();
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Length(GLYPH_HEIGHT as u16), // Year banner
            Constraint::Length(1),                   // Spacing
            Constraint::Fill(1),                     // Sky
            Constraint::Length(2),                   // Greeting
            Constraint::Length(1),                   // Help text
        ])
        .split(area);

        self.sync_viewport(chunks[2]);

        // Year banner
        let banner: Vec<Line> = self
            .banner
            .iter()
            .map(|line| Line::from(line.as_str()).style(Style::new().fg(BANNER_COLOR)))
            .collect();
        frame.render_widget(Paragraph::new(banner).alignment(Alignment::Center), chunks[0]);

        // Sky: starfield behind, fireworks in front, one canvas pass.
        let starfield = &self.starfield;
        let scene = &self.scene;
        let (sky_width, sky_height) = scene.size();
        let sky = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, f64::from(sky_width)])
            .y_bounds([0.0, f64::from(sky_height)])
            .paint(move |ctx| {
                let mut surface = CanvasSurface::new(ctx, sky_width, sky_height);
                starfield.draw(&mut surface);
                scene.draw(&mut surface);
            });
        frame.render_widget(sky, chunks[2]);

        // Greeting
        if self.config.greeting.enabled {
            let message = self.greeting.message();
            let greeting: Vec<Line> = message
                .lines()
                .map(|line| Line::from(line.to_string()))
                .collect();
            frame.render_widget(
                Paragraph::new(greeting).alignment(Alignment::Center),
                chunks[3],
            );
        }

        // Help text
        let help = Line::from(vec![
            "q".bold().fg(BANNER_COLOR),
            " quit  ".dark_gray(),
            "space".bold().fg(BANNER_COLOR),
            " launch a rocket".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[4]);
    }

    /// Track the terminal viewport. The sky keeps a fixed logical height,
    /// so only the width follows the area's aspect ratio; applying unchanged
    /// dimensions is a no-op. Stars are seeded once, on the first frame the
    /// dimensions are known, and keep their positions across resizes.
    fn sync_viewport(&mut self, area: Rect) {
        let rows = f32::from(area.height.max(1));
        let width = SKY_HEIGHT * f32::from(area.width) / (rows * CELL_ASPECT);
        self.scene.resize(width, SKY_HEIGHT);

        if self.starfield.is_empty() {
            self.starfield.seed(width, SKY_HEIGHT, self.config.star_count);
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Uses polling with a short timeout so the animation keeps moving.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(FRAME_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(_) => {}
                // The next render pass picks the new dimensions up.
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char(' ')) => self.scene.launch(),
            _ => {}
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
