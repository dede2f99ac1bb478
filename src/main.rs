use arboard::Clipboard;
use macroquad::prelude::*;

use pathvis::config::Config;
use pathvis::grid::{CellState, Grid};
use pathvis::search::{AstarSearch, StepResult};

/// What the frame loop is currently doing.
enum Mode {
    Editing,
    Searching(AstarSearch),
    /// Animating path reconstruction: one pending cell marked per frame,
    /// goal end first.
    Tracing { pending: Vec<i32>, next: usize },
}

/// State -> display colour lookup. Colour is presentation only; the grid
/// itself never stores colours.
fn state_colour(state: CellState) -> Color {
    match state {
        CellState::Empty => WHITE,
        CellState::Start => RED,
        CellState::Goal => GREEN,
        CellState::Wall => BLACK,
        CellState::Frontier => YELLOW,
        CellState::Visited => ORANGE,
        CellState::Path => BLUE,
    }
}

struct App {
    config: Config,
    grid: Grid,
    mode: Mode,
    status: String,
}

impl App {
    fn new(config: Config) -> Self {
        let grid = Grid::new(config.grid.size);
        App {
            config,
            grid,
            mode: Mode::Editing,
            status: "left click to place start, goal and walls".to_string(),
        }
    }

    fn cell_size(&self) -> f32 {
        screen_width().min(screen_height()) / self.grid.size as f32
    }

    fn cell_under_mouse(&self) -> Option<i32> {
        let (mouse_x, mouse_y) = mouse_position();
        let cell = self.cell_size();
        let col = (mouse_x / cell) as i32;
        let row = (mouse_y / cell) as i32;
        if mouse_x >= 0.0 && mouse_y >= 0.0 && self.grid.in_bounds(row, col) {
            Some(self.grid.id(row, col))
        } else {
            None
        }
    }

    /// Grid edits and triggers are only honoured while idle; the grid is
    /// never mutated by input while a search is animating.
    fn handle_input(&mut self) {
        if !matches!(self.mode, Mode::Editing) {
            return;
        }

        if is_mouse_button_down(MouseButton::Left) {
            if let Some(id) = self.cell_under_mouse() {
                self.grid.paint(id);
            }
        } else if is_mouse_button_down(MouseButton::Right) {
            if let Some(id) = self.cell_under_mouse() {
                self.grid.erase(id);
            }
        }

        if is_key_pressed(KeyCode::Space) {
            self.trigger_search();
        }
        if is_key_pressed(KeyCode::R) {
            self.grid.reset();
            self.status = "grid reset".to_string();
        }
        if is_key_pressed(KeyCode::C) {
            self.copy_to_clipboard();
        }
    }

    fn trigger_search(&mut self) {
        let (Some(start), Some(goal)) = (self.grid.start, self.grid.goal) else {
            // Rejected before the engine is ever entered.
            self.status = "set both start and goal before searching".to_string();
            return;
        };

        self.grid.clear_search_markers();
        self.grid.rebuild_neighbours();
        self.mode = Mode::Searching(AstarSearch::new(&self.grid, start, goal));
        self.status = "searching...".to_string();
    }

    /// Advance the animation by one frame; the frame presentation that
    /// follows is the redraw for every expansion performed here.
    fn advance(&mut self) {
        match &mut self.mode {
            Mode::Editing => {}
            Mode::Searching(_) => self.advance_search(),
            Mode::Tracing { .. } => self.advance_trace(),
        }
    }

    fn advance_search(&mut self) {
        let steps = self.config.search.steps_per_frame.max(1);
        let Mode::Searching(search) = &mut self.mode else {
            return;
        };

        for _ in 0..steps {
            match search.step(&mut self.grid, &mut || ()) {
                StepResult::Continue => {}
                StepResult::Found(path) => {
                    self.status = format!(
                        "path found: {} edges, {} cells expanded",
                        path.len() - 1,
                        search.expanded()
                    );
                    let pending = if path.len() < 3 {
                        Vec::new()
                    } else {
                        path[1..path.len() - 1].iter().rev().copied().collect()
                    };
                    self.mode = Mode::Tracing { pending, next: 0 };
                    return;
                }
                StepResult::Exhausted => {
                    // Visited/Frontier markings stay visible as the
                    // explanation of why no path exists.
                    self.status = "no path found".to_string();
                    self.mode = Mode::Editing;
                    return;
                }
            }
        }
    }

    fn advance_trace(&mut self) {
        let Mode::Tracing { pending, next } = &mut self.mode else {
            return;
        };
        if *next < pending.len() {
            let id = pending[*next];
            *next += 1;
            self.grid.set_state(id, CellState::Path);
        } else {
            self.mode = Mode::Editing;
        }
    }

    fn copy_to_clipboard(&mut self) {
        let layout = self.grid.to_layout();
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(&layout) {
                    println!("Failed to copy to clipboard: {}", e);
                } else {
                    self.status = "grid layout copied to clipboard".to_string();
                    // Keep clipboard alive for a moment to ensure clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => {
                println!("Failed to access clipboard: {}", e);
            }
        }
    }

    fn draw(&self) {
        let visual = &self.config.visual;
        clear_background(Color::from_rgba(
            visual.background_r,
            visual.background_g,
            visual.background_b,
            255,
        ));

        let cell = self.cell_size();
        let extent = self.grid.size as f32 * cell;

        for c in &self.grid.cells {
            draw_rectangle(
                c.col as f32 * cell,
                c.row as f32 * cell,
                cell,
                cell,
                state_colour(c.state),
            );
        }

        if visual.show_gridlines {
            for i in 0..=self.grid.size {
                let p = i as f32 * cell;
                draw_line(0.0, p, extent, p, 1.0, GRAY);
                draw_line(p, 0.0, p, extent, 1.0, GRAY);
            }
        }

        let info = format!(
            "Left click: start / goal / wall | Right click: erase\n\
             Space: search | R: reset | C: copy layout | Esc: quit\n\
             {}",
            self.status
        );
        for (i, line) in info.lines().enumerate() {
            draw_text(line, 10.0, 20.0 + i as f32 * 18.0, 18.0, DARKGRAY);
        }
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: "A* Pathfinding Visualizer".to_string(),
        window_width: 800,
        window_height: 800,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = Config::load();
    let mut app = App::new(config);

    loop {
        // Quit is also the mid-run cancellation signal: observing it while a
        // search is animating abandons the run with no further mutation.
        if is_key_pressed(KeyCode::Escape) {
            if matches!(app.mode, Mode::Searching(_)) {
                println!("search cancelled");
            }
            break;
        }

        app.handle_input();
        app.advance();
        app.draw();

        next_frame().await
    }
}
