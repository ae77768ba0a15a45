//! SDL shell around the simulation: window and event-pump ownership,
//! input handling, and the simulator's lifecycle (built at startup,
//! rebuilt on resize or reseed).

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use sdl2::{
    event::{Event, WindowEvent},
    keyboard::Keycode,
    render::Canvas,
    video::Window,
    EventPump,
};
use tracing::info;

use crate::render::{self, CELL, PALETTES};
use crate::sim::Simulator;
use crate::vec::Vec2;

const WINDOW_TITLE: &str = "glyph rain";

lazy_static! {
    static ref WINDOW_SIZE: Vec2<u32> = Vec2::<u32>::new(1280, 720);
    static ref GRID_SIZE: Vec2<usize> = Vec2::<usize>::new(
        WINDOW_SIZE.x as usize / CELL,
        WINDOW_SIZE.y as usize / CELL,
    );
}

pub struct App {
    running: bool,
    simulator: Simulator,
    canvas: Canvas<Window>,
    event_pump: EventPump,
    palette: usize,
}

impl App {
    pub fn new() -> Result<Self> {
        let sdl_context = sdl2::init().map_err(anyhow::Error::msg)?;
        let window = get_sdl_window(&sdl_context, WINDOW_TITLE, *WINDOW_SIZE)?;
        let event_pump = sdl_context.event_pump().map_err(anyhow::Error::msg)?;
        let canvas = window
            .into_canvas()
            .build()
            .context("building the render canvas")?;
        let simulator = Simulator::new(*GRID_SIZE, &mut rand::thread_rng())?;

        let window_size = *WINDOW_SIZE;
        let grid_size = *GRID_SIZE;
        info!(window = %window_size, grid = %grid_size, cell = CELL, "window up");

        let mut app = App {
            running: true,
            simulator,
            canvas,
            event_pump,
            palette: 0,
        };
        app.render();
        Ok(app)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn update(&mut self, elapsed_seconds: f64) {
        self.simulator.step(elapsed_seconds);
    }

    pub fn input(&mut self) -> Result<()> {
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                }
                | Event::KeyDown {
                    keycode: Some(Keycode::Q),
                    ..
                } => {
                    info!("quit requested");
                    self.running = false;
                }
                Event::KeyDown {
                    keycode: Some(Keycode::R),
                    ..
                } => {
                    self.simulator =
                        Simulator::new(self.simulator.grid_size(), &mut rand::thread_rng())?;
                    info!(grid = %self.simulator.grid_size(), "field reseeded");
                }
                Event::KeyDown {
                    keycode: Some(Keycode::C),
                    ..
                } => {
                    self.palette = render::next_palette(self.palette);
                    info!(palette = PALETTES[self.palette].name, "palette switched");
                }
                Event::Window {
                    win_event: WindowEvent::Resized(width, height),
                    ..
                } => {
                    // Keep at least one cell in each direction so the grid
                    // stays non-empty whatever the window manager reports.
                    let grid = Vec2::new(
                        width.max(CELL as i32) as usize / CELL,
                        height.max(CELL as i32) as usize / CELL,
                    );
                    self.simulator = Simulator::new(grid, &mut rand::thread_rng())?;
                    info!(grid = %grid, "window resized, field rebuilt");
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub fn render(&mut self) {
        render::clear_canvas_with_color(&mut self.canvas, render::BACKGROUND_COLOR);
        render::draw_frame(
            &mut self.canvas,
            &self.simulator.frame(),
            &PALETTES[self.palette],
        );
        self.canvas.present();
    }
}

fn get_sdl_window(sdl_context: &sdl2::Sdl, title: &str, size: Vec2<u32>) -> Result<Window> {
    let video_subsystem = sdl_context.video().map_err(anyhow::Error::msg)?;
    video_subsystem
        .window(title, size.x, size.y)
        .position_centered()
        .resizable()
        .build()
        .context("opening the main window")
}
