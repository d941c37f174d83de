// main.rs - Conway's Game of Life, solo and versus, stepped by a tokio clock
// The engines live in the `conway` crate; this binary only renders snapshots
// and forwards input.

use eframe::egui;
use egui::Color32;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc;

use conway::{
    Clock, Config, Coord, LifeEngine, MatchEngine, MatchResult, Pattern, SoloEngine, StepReport,
};

mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let patterns = config.pattern_library()?;
    let runtime = tokio::runtime::Runtime::new()?;
    let app = GameOfLife::new(&config, patterns, runtime);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([820.0, 980.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(app)),
    )?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Solo,
    Versus,
}

pub struct GameOfLife {
    pub mode: Mode,
    pub solo: SoloEngine,
    pub versus: MatchEngine,
    pub patterns: Vec<Pattern>,
    pub selected_pattern: usize,                      // Solo seed pattern
    pub view_center: Coord,                           // Solo viewport center
    pub result_text: Option<String>,
    pub live_color: Color32,
    pub player_colors: [Color32; 2],
    pub dead_color: Color32,
    pub border_color: Color32,

    clock: Clock,
    results: mpsc::UnboundedReceiver<MatchResult>,
    rng: StdRng,
    // Keeps the clock's worker threads alive for the app's lifetime.
    _runtime: tokio::runtime::Runtime,
}

impl GameOfLife {
    pub fn new(config: &Config, patterns: Vec<Pattern>, runtime: tokio::runtime::Runtime) -> Self {
        let solo = SoloEngine::new(&config.solo);
        let mut versus = MatchEngine::new(&config.versus, patterns.clone());

        let (sender, results) = mpsc::unbounded_channel();
        versus.on_game_over(move |result| {
            let _ = sender.send(result);
        });

        let clock = Clock::new(runtime.handle().clone(), solo.interval());
        let rng = match config.versus.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut app = Self {
            mode: Mode::Solo,
            solo,
            versus,
            patterns,
            selected_pattern: 0,
            view_center: (0, 0),
            result_text: None,
            live_color: Color32::from_rgb(0, 200, 0),
            player_colors: [Color32::from_rgb(60, 140, 255), Color32::from_rgb(255, 90, 60)],
            dead_color: Color32::from_rgb(40, 40, 40),
            border_color: Color32::from_gray(120),
            clock,
            results,
            rng,
            _runtime: runtime,
        };
        app.apply_selected_pattern();
        app
    }

    pub fn engine(&self) -> &dyn LifeEngine {
        match self.mode {
            Mode::Solo => &self.solo,
            Mode::Versus => &self.versus,
        }
    }

    fn engine_mut(&mut self) -> &mut dyn LifeEngine {
        match self.mode {
            Mode::Solo => &mut self.solo,
            Mode::Versus => &mut self.versus,
        }
    }

    /// Runs one step per due tick, then lines the clock up with the engine
    /// (a finished match stops it).
    pub fn update_generation(&mut self) -> Option<StepReport> {
        let due = self.clock.poll();
        let mut last = None;
        for _ in 0..due {
            match self.engine_mut().step() {
                Some(report) => last = Some(report),
                None => break,
            }
        }
        let running = self.engine().is_running();
        self.clock.follow(running);

        while let Ok(result) = self.results.try_recv() {
            self.result_text = Some(result.message().to_string());
        }
        last
    }

    pub fn toggle_pause(&mut self) {
        let running = self.engine_mut().toggle_pause();
        self.clock.set_interval(self.engine().interval());
        self.clock.follow(running);
    }

    pub fn switch_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        if self.engine().is_running() {
            self.engine_mut().toggle_pause();
        }
        self.clock.stop();
        self.mode = mode;
        self.result_text = None;
        log::info!("Switched to {:?} mode", mode);
    }

    pub fn restart(&mut self) {
        self.clock.stop();
        match self.mode {
            Mode::Solo => {
                if self.solo.is_running() {
                    self.solo.toggle_pause();
                }
                self.solo.clear();
            }
            Mode::Versus => self.versus.reset(),
        }
        self.result_text = None;
    }

    pub fn apply_selected_pattern(&mut self) {
        if let Some(pattern) = self.patterns.get(self.selected_pattern) {
            self.solo.seed_pattern(pattern);
        }
    }

    /// Random fill over the visible solo viewport.
    pub fn random_pattern(&mut self) {
        let half = ui::VIEW_CELLS / 2;
        let (cx, cy) = self.view_center;
        let min = (cx - half, cy - half);
        let max = (cx + half + 1, cy + half + 1);
        self.solo.random_fill(min, max, &mut self.rng);
    }

    pub fn faster(&mut self) {
        self.solo.faster();
        self.clock.set_interval(self.solo.interval());
    }

    pub fn slower(&mut self) {
        self.solo.slower();
        self.clock.set_interval(self.solo.interval());
    }
}
