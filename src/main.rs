//! WonderLab entry point
//!
//! Browser builds wire DOM events and a requestAnimationFrame loop to the
//! library. Native builds run a short console demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_shell {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::f64::consts::TAU;
    use std::rc::Rc;

    use futures::StreamExt;
    use glam::DVec2;
    use js_sys::Array;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlInputElement,
        HtmlSelectElement, PointerEvent,
    };

    use wonderlab::app::{App, ExperimentDraft, Tag, View};
    use wonderlab::services::{self, Choice, DilemmaSession, ExplainSession, GeminiClient, Generator};
    use wonderlab::sim::{
        Cart, CircleRound, CombinationRequest, CombineOutcome, ParticleField, Quest, Upgrade,
        Workspace, format_money, verdict,
    };
    use wonderlab::consts::{TILE_HALF_HEIGHT, TILE_HALF_WIDTH};
    use wonderlab::{HighScores, Point, Settings, markup};

    /// How long a refused stroke stays on screen
    const REJECT_HOLD_MS: f64 = 1000.0;

    const VIEW_KEYS: [&str; 10] = [
        "home",
        "circle",
        "explain",
        "spend",
        "dilemma",
        "craft",
        "quest",
        "custom",
        "admin-login",
        "admin-dashboard",
    ];

    fn view_key(view: &View) -> &'static str {
        match view {
            View::Home => "home",
            View::Circle => "circle",
            View::Explain => "explain",
            View::Spend => "spend",
            View::Dilemma => "dilemma",
            View::Craft => "craft",
            View::Quest => "quest",
            View::Custom(_) => "custom",
            View::AdminLogin => "admin-login",
            View::AdminDashboard => "admin-dashboard",
        }
    }

    /// Everything the page shows
    struct Shell {
        app: App,
        settings: Settings,
        round: CircleRound,
        rejected_at: Option<f64>,
        best: HighScores,
        workspace: Workspace,
        particles: ParticleField,
        quest: Quest,
        cart: Cart,
        explain: ExplainSession,
        dilemma: DilemmaSession,
        gemini: GeminiClient,
        ctx: CanvasRenderingContext2d,
        size: (f64, f64),
        last_time: f64,
        /// Last markup written per container id
        html: HashMap<&'static str, String>,
    }

    impl Shell {
        fn new(seed: u64, ctx: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
            let settings = Settings::load();
            let mut workspace = Workspace::with_settings(seed, &settings);
            workspace.set_size(width, height);
            Self {
                app: App::new(),
                round: CircleRound::new(settings.min_stroke_points),
                rejected_at: None,
                best: HighScores::load(),
                workspace,
                particles: ParticleField::new(seed.rotate_left(17), width, height, &settings),
                quest: Quest::new(seed.wrapping_add(1)),
                cart: Cart::new(),
                explain: ExplainSession::new(),
                dilemma: DilemmaSession::new(),
                gemini: GeminiClient::from_build_env(),
                settings,
                ctx,
                size: (width, height),
                last_time: 0.0,
                html: HashMap::new(),
            }
        }

        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 { time - self.last_time } else { 0.0 };
            self.last_time = time;

            self.app.tick(dt);

            let expired = self.workspace.expire_pending(time);
            if expired > 0 {
                log::warn!("{} combination(s) timed out", expired);
            }

            match self.app.view() {
                View::Quest => self.quest.tick(dt),
                View::Custom(_) => self.particles.step(),
                View::Circle => {
                    if let Some(at) = self.rejected_at {
                        if time - at > REJECT_HOLD_MS {
                            self.round.reset();
                            self.rejected_at = None;
                        }
                    }
                }
                _ => {}
            }
        }

        fn render(&self) {
            let (w, h) = self.size;
            self.ctx.clear_rect(0.0, 0.0, w, h);
            match self.app.view() {
                View::Circle => self.draw_round(),
                View::Craft => self.draw_tiles(),
                View::Custom(_) => self.draw_particles(),
                _ => {}
            }
        }

        fn draw_round(&self) {
            let ctx = &self.ctx;
            let (w, h) = self.size;

            ctx.set_fill_style_str("#e5e7eb");
            ctx.begin_path();
            if ctx.arc(w / 2.0, h / 2.0, 5.0, 0.0, TAU).is_ok() {
                ctx.fill();
            }

            if let Some((first, rest)) = self.round.stroke().and_then(|s| s.points().split_first()) {
                ctx.set_stroke_style_str("#9333ea");
                ctx.set_line_width(4.0);
                ctx.begin_path();
                ctx.move_to(first.x, first.y);
                for p in rest {
                    ctx.line_to(p.x, p.y);
                }
                ctx.stroke();
            }

            // Dashed fit over the kept stroke
            if let Some(score) = self.round.score() {
                let c = score.fit.center;
                ctx.set_stroke_style_str("rgba(156, 163, 175, 0.5)");
                ctx.set_line_width(2.0);
                let _ = ctx.set_line_dash(&Array::of2(&JsValue::from_f64(5.0), &JsValue::from_f64(5.0)));
                ctx.begin_path();
                if ctx.arc(c.x, c.y, score.fit.radius, 0.0, TAU).is_ok() {
                    ctx.stroke();
                }
                let _ = ctx.set_line_dash(&Array::new());
            }
        }

        fn draw_tiles(&self) {
            let ctx = &self.ctx;
            ctx.set_font("16px sans-serif");
            let (tw, th) = (TILE_HALF_WIDTH * 2.0, TILE_HALF_HEIGHT * 2.0);
            for tile in self.workspace.tiles() {
                let dragging = self.workspace.dragging() == Some(tile.id);
                ctx.set_fill_style_str(if dragging { "#e0e7ff" } else { "#ffffff" });
                ctx.fill_rect(tile.pos.x, tile.pos.y, tw, th);
                ctx.set_stroke_style_str("#cbd5e1");
                ctx.stroke_rect(tile.pos.x, tile.pos.y, tw, th);
                ctx.set_fill_style_str("#1e293b");
                let label = format!("{} {}", tile.emoji(), tile.name());
                let _ = ctx.fill_text(&label, tile.pos.x + 8.0, tile.pos.y + 30.0);
            }
        }

        fn draw_particles(&self) {
            let ctx = &self.ctx;
            for p in &self.particles.particles {
                ctx.set_fill_style_str(&format!("#{:06x}", p.color));
                ctx.begin_path();
                if ctx
                    .arc(p.pos.x, p.pos.y, p.radius, 0.0, TAU)
                    .is_ok()
                {
                    ctx.fill();
                }
            }
        }

        /// Replace a container's children, skipping unchanged markup
        fn set_html(&mut self, document: &Document, id: &'static str, html: String) {
            if self.html.get(id) == Some(&html) {
                return;
            }
            if let Some(el) = document.get_element_by_id(id) {
                el.set_inner_html(&html);
                self.html.insert(id, html);
            }
        }

        /// Push state into the DOM
        fn update_hud(&mut self, document: &Document) {
            let current = view_key(self.app.view());
            for key in VIEW_KEYS {
                if let Some(el) = document.get_element_by_id(&format!("view-{key}")) {
                    let class = if key == current { "view" } else { "view hidden" };
                    let _ = el.set_attribute("class", class);
                }
            }

            set_text(document, "wasted", &self.app.wasted_display());

            // Circle
            set_text(document, "circle-message", self.round.message());
            match self.round.score() {
                Some(score) => {
                    set_text(document, "circle-score", &format!("{:.1}%", score.score));
                    set_text(document, "circle-verdict", verdict(score.score));
                }
                None => {
                    set_text(document, "circle-score", "");
                    set_text(document, "circle-verdict", "");
                }
            }
            if let Some(best) = self.best.top_score() {
                set_text(document, "circle-best", &format!("{:.1}%", best));
            }

            // Explain
            set_text(document, "explain-answer", &self.explain.answer);
            set_text(document, "explain-error", self.explain.error.as_deref().unwrap_or(""));

            // Dilemma
            if self.dilemma.is_loading() {
                set_text(document, "dilemma-scenario", "Consulting the absurdity engine...");
            } else if let Some(d) = &self.dilemma.dilemma {
                set_text(document, "dilemma-scenario", &d.scenario);
                set_text(document, "dilemma-a", &d.option_a);
                set_text(document, "dilemma-b", &d.option_b);
            }

            // Quest
            let q = &self.quest;
            set_text(
                document,
                "quest-hero",
                &format!("{} Lv {} {}/{} HP", q.player.emoji, q.level, q.player.hp, q.player.max_hp),
            );
            set_text(
                document,
                "quest-enemy",
                &format!("{} {} {}/{} HP", q.enemy.emoji, q.enemy.name, q.enemy.hp, q.enemy.max_hp),
            );
            set_text(document, "quest-gold", &format!("{} gold, stage {}", q.gold, q.stage));
            set_text(document, "quest-log", &q.log.join("\n"));

            // Budget
            set_text(document, "budget-remaining", &format_money(self.cart.remaining()));
            let fraction = self.cart.spent_fraction();
            set_text(document, "budget-spent", &format!("{:.6}% spent", fraction * 100.0));
            if let Some(bar) = document.get_element_by_id("budget-bar") {
                let _ = bar.set_attribute("style", &markup::progress_style(fraction));
            }
            let shop = markup::shop(&self.cart);
            self.set_html(document, "shop", shop);
            let receipt = markup::receipt(&self.cart);
            self.set_html(document, "receipt", receipt);

            // Catalog
            let grid = markup::catalog_grid(self.app.catalog.entries());
            self.set_html(document, "catalog-grid", grid);
            let rows = markup::admin_rows(self.app.catalog.entries());
            self.set_html(document, "admin-list", rows);
            if let View::Custom(id) = self.app.view() {
                let title = self.app.catalog.get(id).map(|e| e.title.clone()).unwrap_or_default();
                set_text(document, "custom-title", &title);
            }

            // Craft
            let status = if self.workspace.is_loading() {
                "Combining...".to_string()
            } else {
                self.workspace.last_creation().unwrap_or("").to_string()
            };
            set_text(document, "craft-status", &status);
            let inventory = markup::inventory(self.workspace.inventory());
            self.set_html(document, "craft-inventory", inventory);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn input_value(document: &Document, id: &str) -> String {
        let Some(el) = document.get_element_by_id(id) else {
            return String::new();
        };
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            return input.value();
        }
        el.dyn_ref::<HtmlSelectElement>()
            .map(|select| select.value())
            .unwrap_or_default()
    }

    fn set_input_value(document: &Document, id: &str, value: &str) {
        let Some(el) = document.get_element_by_id(id) else {
            return;
        };
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        }
    }

    fn draft_from_form(document: &Document) -> ExperimentDraft {
        let tag = Tag::from_label(&input_value(document, "game-tag")).unwrap_or(Tag::Game);
        ExperimentDraft::new(
            input_value(document, "game-title"),
            input_value(document, "game-description"),
            tag,
        )
    }

    fn reset_form(document: &Document) {
        for id in ["game-id", "game-title", "game-description"] {
            set_input_value(document, id, "");
        }
        set_input_value(document, "game-tag", Tag::Game.label());
        set_text(document, "admin-error", "");
    }

    fn pointer_pos(event: &PointerEvent) -> Point {
        DVec2::new(event.offset_x() as f64, event.offset_y() as f64)
    }

    /// Hand a combination to the generator and deliver the answer back
    fn combine(shell: Rc<RefCell<Shell>>, request: CombinationRequest) {
        log::info!("Combining {} + {}", request.first.name, request.second.name);
        wasm_bindgen_futures::spawn_local(async move {
            let client = shell.borrow().gemini.clone();
            let result = services::resolve_combination(&client, &request).await;
            let outcome = shell
                .borrow_mut()
                .workspace
                .complete_combination(request.id, result);
            match outcome {
                CombineOutcome::Created { tile, discovered } => {
                    log::info!("Created {} {} (new: {})", tile.emoji(), tile.name(), discovered);
                }
                CombineOutcome::Restored { error } => log::warn!("Combination failed: {}", error),
                CombineOutcome::Stale => log::warn!("Late combination result dropped"),
            }
        });
    }

    fn ask(shell: Rc<RefCell<Shell>>, query: String) {
        let Some(topic) = shell.borrow_mut().explain.begin(&query) else {
            return;
        };
        wasm_bindgen_futures::spawn_local(async move {
            let client = shell.borrow().gemini.clone();
            match client.explain(&topic).await {
                Ok(mut stream) => {
                    while let Some(fragment) = stream.next().await {
                        match fragment {
                            Ok(text) => shell.borrow_mut().explain.push_fragment(&text),
                            Err(e) => {
                                shell.borrow_mut().explain.fail(&e);
                                return;
                            }
                        }
                    }
                    shell.borrow_mut().explain.finish();
                }
                Err(e) => shell.borrow_mut().explain.fail(&e),
            }
        });
    }

    fn next_dilemma(shell: Rc<RefCell<Shell>>) {
        shell.borrow_mut().dilemma.begin_fetch();
        wasm_bindgen_futures::spawn_local(async move {
            let client = shell.borrow().gemini.clone();
            let dilemma = services::dilemma_or_fallback(&client).await;
            shell.borrow_mut().dilemma.receive(dilemma);
        });
    }

    /// Route a `data-action` click
    fn handle_action(shell: &Rc<RefCell<Shell>>, document: &Document, action: &str, arg: &str) {
        match action {
            "open" => {
                let needs_dilemma = {
                    let mut s = shell.borrow_mut();
                    s.app.open(arg);
                    if matches!(s.app.view(), View::Custom(_)) {
                        s.particles.respawn();
                    }
                    *s.app.view() == View::Dilemma && s.dilemma.dilemma.is_none()
                };
                if needs_dilemma {
                    next_dilemma(shell.clone());
                }
            }
            "home" => shell.borrow_mut().app.go_home(),
            "admin" => {
                shell.borrow_mut().app.open_admin();
            }
            "login" => {
                let user = input_value(document, "admin-user");
                let pass = input_value(document, "admin-pass");
                let result = shell.borrow_mut().app.submit_login(&user, &pass);
                let message = result.err().map(|e| e.to_string()).unwrap_or_default();
                set_text(document, "login-error", &message);
            }
            "logout" => shell.borrow_mut().app.logout(),
            "admin-create" => {
                let draft = draft_from_form(document);
                let mut s = shell.borrow_mut();
                let Some(session) = s.app.admin().cloned() else {
                    return;
                };
                match s.app.catalog.create(&session, draft) {
                    Ok(_) => reset_form(document),
                    Err(e) => set_text(document, "admin-error", &e.to_string()),
                }
            }
            "admin-edit" => {
                let s = shell.borrow();
                let Some(entry) = s.app.catalog.get(arg) else {
                    return;
                };
                set_input_value(document, "game-id", &entry.id);
                set_input_value(document, "game-title", &entry.title);
                set_input_value(document, "game-description", &entry.description);
                set_input_value(document, "game-tag", entry.tag.label());
                set_text(document, "admin-error", "");
            }
            "admin-update" => {
                let id = input_value(document, "game-id");
                if id.is_empty() {
                    set_text(document, "admin-error", "Pick an experiment to edit first");
                    return;
                }
                let draft = draft_from_form(document);
                let mut s = shell.borrow_mut();
                let Some(session) = s.app.admin().cloned() else {
                    return;
                };
                match s.app.catalog.update(&session, &id, draft) {
                    Ok(()) => reset_form(document),
                    Err(e) => set_text(document, "admin-error", &e.to_string()),
                }
            }
            "admin-delete" => {
                let mut s = shell.borrow_mut();
                let Some(session) = s.app.admin().cloned() else {
                    return;
                };
                if let Err(e) = s.app.catalog.delete(&session, arg) {
                    log::warn!("{}", e);
                }
            }
            "circle-reset" => {
                let mut s = shell.borrow_mut();
                s.round.reset();
                s.rejected_at = None;
            }
            "explain" => ask(shell.clone(), input_value(document, "explain-input")),
            "dilemma-next" => next_dilemma(shell.clone()),
            "choose-a" => {
                shell.borrow_mut().dilemma.choose(Choice::A);
            }
            "choose-b" => {
                shell.borrow_mut().dilemma.choose(Choice::B);
            }
            "attack" => {
                shell.borrow_mut().quest.attack();
            }
            "upgrade-weapon" | "upgrade-armor" => {
                let upgrade = if action == "upgrade-weapon" { Upgrade::Weapon } else { Upgrade::Armor };
                if let Err(e) = shell.borrow_mut().quest.buy_upgrade(upgrade) {
                    log::info!("{}", e);
                }
            }
            "quest-restart" => shell.borrow_mut().quest.restart(),
            "buy" | "sell" => {
                let Ok(id) = arg.parse::<u32>() else {
                    return;
                };
                let mut s = shell.borrow_mut();
                let result = if action == "buy" { s.cart.buy(id) } else { s.cart.sell(id) };
                if let Err(e) = result {
                    log::info!("{}", e);
                }
            }
            "place" => {
                let mut s = shell.borrow_mut();
                if let Some(element) = s.workspace.inventory().get(arg).cloned() {
                    s.workspace.place(&element);
                }
            }
            "craft-clear" => shell.borrow_mut().workspace.clear(),
            "reduced-motion" => {
                let mut s = shell.borrow_mut();
                s.settings.reduced_motion = !s.settings.reduced_motion;
                s.settings.save();
                let (w, h) = s.size;
                let seed = js_sys::Date::now() as u64;
                s.particles = ParticleField::new(seed, w, h, &s.settings);
            }
            other => log::debug!("Unhandled action {}", other),
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, document: &Document, shell: Rc<RefCell<Shell>>) {
        // Pointer down
        {
            let shell = shell.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let pos = pointer_pos(&event);
                let mut s = shell.borrow_mut();
                let view = s.app.view().clone();
                match view {
                    View::Circle => {
                        let _ = canvas_clone.set_pointer_capture(event.pointer_id());
                        s.rejected_at = None;
                        s.round.pointer_down(pos);
                    }
                    View::Craft => {
                        if let Some(id) = s.workspace.tile_at(pos) {
                            let _ = canvas_clone.set_pointer_capture(event.pointer_id());
                            s.workspace.begin_drag(id, pos);
                        }
                    }
                    View::Custom(_) => s.particles.set_pointer(pos),
                    _ => {}
                }
            });
            let _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer move
        {
            let shell = shell.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let pos = pointer_pos(&event);
                let mut s = shell.borrow_mut();
                let view = s.app.view().clone();
                match view {
                    View::Circle => {
                        s.round.pointer_move(pos);
                    }
                    View::Craft => {
                        s.workspace.update_drag(pos);
                    }
                    View::Custom(_) => s.particles.set_pointer(pos),
                    _ => {}
                }
            });
            let _ = canvas.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer up. Leaving the canvas or a cancelled pointer counts as a release.
        {
            let shell = shell.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                let request = {
                    let mut s = shell.borrow_mut();
                    let view = s.app.view().clone();
                    match view {
                        View::Circle => {
                            match s.round.pointer_up() {
                                Some(Ok(score)) => {
                                    let now = js_sys::Date::now();
                                    if let Some(rank) = s.best.add_score(score.score, now) {
                                        log::info!("New best circle #{}: {:.1}", rank, score.score);
                                        s.best.save();
                                    }
                                }
                                Some(Err(e)) => {
                                    log::info!("Stroke refused: {}", e);
                                    s.rejected_at = Some(s.last_time);
                                }
                                None => {}
                            }
                            None
                        }
                        View::Craft => s.workspace.end_drag(),
                        _ => None,
                    }
                };
                if let Some(request) = request {
                    combine(shell.clone(), request);
                }
            });
            for kind in ["pointerup", "pointercancel", "pointerleave"] {
                let _ = canvas.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }

        // Clicks anywhere on the page carry a data-action
        {
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
                let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                    return;
                };
                let Ok(Some(el)) = target.closest("[data-action]") else {
                    return;
                };
                let action = el.get_attribute("data-action").unwrap_or_default();
                let arg = el.get_attribute("data-arg").unwrap_or_default();
                handle_action(&shell, &document_clone, &action, &arg);
            });
            let _ = document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(shell: Rc<RefCell<Shell>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame(shell, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(shell: Rc<RefCell<Shell>>, time: f64) {
        {
            let mut s = shell.borrow_mut();
            s.update(time);
            s.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                s.update_hud(&document);
            }
        }
        request_animation_frame(shell);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("WonderLab starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let width = canvas.client_width().max(1) as f64;
        let height = canvas.client_height().max(1) as f64;
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("context lookup failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");
        ctx.set_line_cap("round");
        ctx.set_line_join("round");

        let seed = js_sys::Date::now() as u64;
        let shell = Rc::new(RefCell::new(Shell::new(seed, ctx, width, height)));
        log::info!("Shell initialized with seed: {}", seed);
        if !shell.borrow().gemini.has_key() {
            log::warn!("Built without GEMINI_API_KEY, the AI toys will report errors");
        }

        setup_input_handlers(&canvas, &document, shell.clone());
        request_animation_frame(shell);

        log::info!("WonderLab running!");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    web_shell::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("WonderLab (native) starting...");
    log::info!("The toys run in the browser - build for wasm32 and serve index.html");

    demo_circle();
    demo_craft();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Score a hand-wobbled circle and print the verdict
#[cfg(not(target_arch = "wasm32"))]
fn demo_circle() {
    use glam::DVec2;
    use wonderlab::sim::{score_stroke, verdict};

    let points: Vec<DVec2> = (0..=120)
        .map(|i| {
            let t = i as f64 / 120.0 * std::f64::consts::TAU;
            let r = 100.0 + (t * 7.0).sin() * 3.0;
            DVec2::new(200.0 + r * t.cos(), 200.0 + r * t.sin())
        })
        .collect();

    match score_stroke(&points) {
        Ok(score) => println!(
            "Circle: {:.1}% ({}) radius {:.1}",
            score.score,
            verdict(score.score),
            score.fit.radius
        ),
        Err(e) => println!("Circle refused: {}", e),
    }
}

/// Walk one combination through the workspace with a canned answer
#[cfg(not(target_arch = "wasm32"))]
fn demo_craft() {
    use wonderlab::sim::{CombineOutcome, CraftElement, Workspace};

    let mut ws = Workspace::new(42);
    ws.set_size(800.0, 600.0);
    let water = ws.place(&CraftElement::new("Water", "💧"));
    let fire = ws.place(&CraftElement::new("Fire", "🔥"));

    ws.begin_drag(water.id, water.pos);
    ws.update_drag(fire.pos);
    let Some(request) = ws.end_drag() else {
        println!("Tiles did not meet");
        return;
    };

    let answer: Result<CraftElement, String> = Ok(CraftElement::new("Steam", "💨"));
    match ws.complete_combination(request.id, answer) {
        CombineOutcome::Created { tile, .. } => println!(
            "Craft: {} at ({:.0}, {:.0}), inventory {}",
            ws.last_creation().unwrap_or_default(),
            tile.pos.x,
            tile.pos.y,
            ws.inventory().len()
        ),
        other => println!("Craft: {:?}", other),
    }
}
