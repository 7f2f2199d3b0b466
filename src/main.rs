//! Eco Run entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent, MouseEvent};

    use eco_run::Settings;
    use eco_run::audio::AudioManager;
    use eco_run::consts::*;
    use eco_run::sim::{GamePhase, GameState, TickInput, UpgradeType, tick};

    const FACT_TITLES: [&str; 15] = [
        "Plastic Bottles",
        "Paper Recycling",
        "Metal Recycling",
        "Solar Energy",
        "Ocean Pollution",
        "Tree Benefits",
        "Electronic Waste",
        "Water Conservation",
        "Air Pollution",
        "Renewable Energy",
        "Plastic Bags",
        "Glass Recycling",
        "Food Waste",
        "Energy Conservation",
        "Wildlife Protection",
    ];

    const PIXELS_PER_UNIT: f32 = 40.0;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        audio: AudioManager,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                state: GameState::new(seed),
                audio: AudioManager::new(&settings),
                input: TickInput {
                    idle_mode: settings.idle_mode,
                    ..Default::default()
                },
                settings,
                accumulator: 0.0,
                last_time: 0.0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, &self.input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot intents after processing
                self.input.move_left = false;
                self.input.move_right = false;
                self.input.jump = false;
                self.input.slide = false;
            }

            for event in self.state.drain_events() {
                self.audio.handle(&event);
            }
        }

        /// Enter: advance through the menus
        fn confirm(&mut self) {
            let _ = match self.state.phase {
                GamePhase::StartMenu => self.state.start_game(),
                GamePhase::Tutorial => self.state.end_tutorial(),
                GamePhase::GameOver => self.state.restart_game(),
                GamePhase::Playing | GamePhase::UpgradeMenu => Ok(()),
            };
        }

        fn toggle_upgrade_menu(&mut self) {
            let _ = match self.state.phase {
                GamePhase::UpgradeMenu => self.state.hide_upgrade_menu(),
                _ => self.state.show_upgrade_menu(),
            };
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            let state = &self.state;

            set_text(document, "#hud-score .hud-value", &state.score.to_string());
            set_text(
                document,
                "#hud-distance .hud-value",
                &format!("{:.0}", state.distance),
            );
            set_text(
                document,
                "#hud-eco .hud-value",
                &format!("{:.0}%", state.eco_level),
            );
            set_text(
                document,
                "#hud-plastic .hud-value",
                &state.inventory.plastic.to_string(),
            );
            set_text(
                document,
                "#hud-paper .hud-value",
                &state.inventory.paper.to_string(),
            );
            set_text(
                document,
                "#hud-metal .hud-value",
                &state.inventory.metal.to_string(),
            );

            show(document, "start-menu", state.phase == GamePhase::StartMenu);
            show(document, "tutorial", state.phase == GamePhase::Tutorial);
            show(
                document,
                "hud",
                matches!(state.phase, GamePhase::Playing | GamePhase::UpgradeMenu),
            );
            show(document, "upgrade-menu", state.phase == GamePhase::UpgradeMenu);
            show(document, "game-over", state.phase == GamePhase::GameOver);

            if state.phase == GamePhase::UpgradeMenu {
                for (kind, id) in [
                    (UpgradeType::Tree, "buy-tree-btn"),
                    (UpgradeType::SolarPanel, "buy-solar-btn"),
                    (UpgradeType::RecyclingCenter, "buy-recycling-btn"),
                ] {
                    if let Some(el) = document.get_element_by_id(id) {
                        let _ = el
                            .class_list()
                            .toggle_with_force("disabled", !state.can_afford(kind));
                    }
                }
            }

            if state.phase == GamePhase::GameOver {
                set_text(document, "#final-score", &state.score.to_string());
                set_text(
                    document,
                    "#final-distance",
                    &format!("{:.0}", state.distance),
                );
                set_text(document, "#final-title", state.achievement().title());
                set_text(
                    document,
                    "#final-projects",
                    &state.projects_built().to_string(),
                );
            }

            let fact = state.active_fact.filter(|_| state.phase == GamePhase::Playing);
            show(document, "fact-popup", fact.is_some());
            if let Some(fact) = fact {
                let title = FACT_TITLES
                    .get(usize::from(fact.id).saturating_sub(1))
                    .copied()
                    .unwrap_or("Eco Fact");
                set_text(document, "#fact-title", title);
                set_text(document, "#fact-id", &format!("Eco Fact #{}", fact.id));
            }

            // Runner marker: world units to pixels
            if let Some(el) = document.get_element_by_id("player") {
                let pos = state.player_world_position() * PIXELS_PER_UNIT;
                let style = format!("transform: translate({:.0}px, {:.0}px)", pos.x, -pos.y);
                let _ = el.set_attribute("style", &style);
            }
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    fn show(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Eco Run starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document available");
            return;
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        let seed = js_sys::Date::now() as u64;
        let settings = load_settings(&document);
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));
        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(game.clone());
        setup_buttons(&document, game.clone());
        setup_auto_pause(&document, game.clone());

        request_animation_frame(game);

        log::info!("Eco Run running!");
    }

    /// Read preferences from `<html data-settings='{...}'>`, defaults otherwise
    fn load_settings(document: &Document) -> Settings {
        let Some(json) = document
            .document_element()
            .and_then(|root| root.get_attribute("data-settings"))
        else {
            return Settings::default();
        };
        match Settings::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from page");
                settings
            }
            Err(e) => {
                log::warn!("Invalid data-settings ({}), using defaults", e);
                Settings::default()
            }
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            match event.key().as_str() {
                "ArrowLeft" | "a" | "A" => g.input.move_left = true,
                "ArrowRight" | "d" | "D" => g.input.move_right = true,
                "ArrowUp" | "w" | "W" | " " => g.input.jump = true,
                "ArrowDown" | "s" | "S" => g.input.slide = true,
                "Enter" => g.confirm(),
                "u" | "U" => g.toggle_upgrade_menu(),
                "Escape" => {
                    let _ = g.state.hide_upgrade_menu();
                }
                "m" | "M" => {
                    let muted = !g.audio.is_muted();
                    g.audio.set_muted(muted);
                    g.settings.muted = muted;
                }
                "i" | "I" => {
                    g.input.idle_mode = !g.input.idle_mode;
                    log::info!("Idle mode: {}", g.input.idle_mode);
                }
                _ => {}
            }
        });
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_click(
        document: &Document,
        id: &str,
        game: Rc<RefCell<Game>>,
        action: impl Fn(&mut Game) + 'static,
    ) {
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                action(&mut game.borrow_mut());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        on_click(document, "start-btn", game.clone(), |g| {
            let _ = g.state.start_game();
        });
        on_click(document, "tutorial-btn", game.clone(), |g| {
            let _ = g.state.start_tutorial();
        });
        on_click(document, "end-tutorial-btn", game.clone(), |g| {
            let _ = g.state.end_tutorial();
        });
        on_click(document, "upgrade-btn", game.clone(), |g| {
            let _ = g.state.show_upgrade_menu();
        });
        on_click(document, "resume-btn", game.clone(), |g| {
            let _ = g.state.hide_upgrade_menu();
        });
        on_click(document, "restart-btn", game.clone(), |g| {
            let _ = g.state.restart_game();
        });
        on_click(document, "buy-tree-btn", game.clone(), |g| {
            g.state.purchase_upgrade(UpgradeType::Tree);
        });
        on_click(document, "buy-solar-btn", game.clone(), |g| {
            g.state.purchase_upgrade(UpgradeType::SolarPanel);
        });
        on_click(document, "buy-recycling-btn", game, |g| {
            g.state.purchase_upgrade(UpgradeType::RecyclingCenter);
        });
    }

    /// Open the upgrade menu (which freezes the run) when the page loses focus
    fn setup_auto_pause(document: &Document, game: Rc<RefCell<Game>>) {
        fn on_blur(g: &mut Game, reason: &str) {
            if g.settings.pause_on_blur && g.state.phase == GamePhase::Playing {
                let _ = g.state.show_upgrade_menu();
                log::info!("Auto-paused ({})", reason);
            }
            if g.settings.mute_on_blur {
                g.audio.set_muted(true);
            }
        }

        let Some(window) = web_sys::window() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    on_blur(&mut game.borrow_mut(), "tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                on_blur(&mut game.borrow_mut(), "window blur");
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Focus regained: restore the player's mute choice
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                let muted = g.settings.muted;
                g.audio.set_muted(muted);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Eco Run (native) starting...");
    log::info!("No renderer on native - running a headless autopilot session");

    if let Err(e) = run_headless(42) {
        log::error!("Headless session failed: {}", e);
    }
}

/// Play one autopilot session and log the outcome
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(seed: u64) -> Result<(), eco_run::sim::PhaseError> {
    use eco_run::Settings;
    use eco_run::audio::AudioManager;
    use eco_run::consts::SIM_DT;
    use eco_run::sim::{GamePhase, GameState, TickInput, UpgradeType, tick};

    // Ten minutes of simulated play
    const MAX_TICKS: u32 = 60 * 60 * 10;
    // Visit the shop every thirty seconds
    const SHOP_INTERVAL: u32 = 60 * 30;

    let settings = Settings {
        idle_mode: true,
        ..Default::default()
    };
    let mut state = GameState::new(seed);
    let mut audio = AudioManager::new(&settings);
    let input = TickInput {
        idle_mode: settings.idle_mode,
        ..Default::default()
    };

    state.start_game()?;
    state.end_tutorial()?;

    let mut ticks = 0;
    while state.phase == GamePhase::Playing && ticks < MAX_TICKS {
        tick(&mut state, &input, SIM_DT);
        ticks += 1;

        if ticks % SHOP_INTERVAL == 0
            && state.phase == GamePhase::Playing
            && UpgradeType::ALL.iter().any(|&k| state.can_afford(k))
        {
            state.show_upgrade_menu()?;
            for kind in UpgradeType::ALL {
                while state.purchase_upgrade(kind) {}
            }
            state.hide_upgrade_menu()?;
        }

        for event in state.drain_events() {
            audio.handle(&event);
        }
    }

    log::info!(
        "Session finished after {:.1}s: score {}, distance {:.1}, eco {:.1}%, {} projects, title {}",
        state.clock,
        state.score,
        state.distance,
        state.eco_level,
        state.projects_built(),
        state.achievement().title()
    );
    log::debug!("Final player position {}", state.player_world_position());
    for entity in state.all_entities() {
        log::trace!("{} at {}", entity.label(), state.entity_world_position(entity));
    }
    Ok(())
}
