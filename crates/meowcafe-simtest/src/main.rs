//! MeowCafe Headless Simulation Harness
//!
//! Validates the café rules and a full scripted stage without a renderer.
//! Runs entirely in-process: pointer input is synthesised, every frame is
//! stepped through `MinigameSession::update`.
//!
//! Usage:
//!   cargo run -p meowcafe-simtest
//!   cargo run -p meowcafe-simtest -- --verbose
//!   cargo run -p meowcafe-simtest -- --config stage.json --seed 7 --json

use meowcafe_core::config::load_config_file;
use meowcafe_core::prelude::*;
use meowcafe_core::snapshot::FrameSnapshot;
use meowcafe_logic::config::{validate_config, StageConfig};
use meowcafe_logic::cup::{composition_key, Cup, EMPTY_KEY};
use meowcafe_logic::customer::{order_deadline, Customer, Emotion, TickOutcome};
use meowcafe_logic::ingredients::Ingredient;
use meowcafe_logic::order::{menu, validate_presented, Order};
use serde::Serialize;

// ── Test harness ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

#[derive(Debug, Default)]
struct Args {
    verbose: bool,
    json: bool,
    config: Option<String>,
    seed: Option<u64>,
}

fn parse_args() -> Args {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--verbose" => args.verbose = true,
            "--json" => args.json = true,
            "--config" => args.config = iter.next(),
            "--seed" => args.seed = iter.next().and_then(|s| s.parse().ok()),
            other => eprintln!("ignoring unknown argument {}", other),
        }
    }
    args
}

/// Section header; JSON output stays machine-readable.
fn section(title: &str, args: &Args) {
    if !args.json {
        println!("--- {} ---", title);
    }
}

#[derive(Serialize)]
struct Report<'a> {
    passed: usize,
    failed: usize,
    results: &'a [TestResult],
    final_frame: FrameSnapshot,
}

fn main() {
    let args = parse_args();
    let default_filter = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut config = match &args.config {
        Some(path) => match load_config_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load {}: {}", path, e);
                std::process::exit(2);
            }
        },
        None => StageConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if config.seed.is_none() {
        config.seed = Some(42);
    }

    if !args.json {
        println!("=== MeowCafe Simulation Harness ===\n");
    }

    let mut results = Vec::new();

    // 1. Stage config
    section("Stage Config", &args);
    results.extend(validate_stage_config(&config));

    // 2. Menu and composition keys
    section("Menu", &args);
    results.extend(validate_menu());

    // 3. Cup fill order sweep
    section("Cup Fill Order", &args);
    results.extend(validate_fill_order(args.verbose && !args.json));

    // 4. Customer patience
    section("Customer Patience", &args);
    results.extend(validate_patience(&config));

    // 5. Scripted stage: serve everyone who sits down
    section("Scripted Stage", &args);
    let (stage_results, final_frame) = run_scripted_stage(&config, args.verbose && !args.json);
    results.extend(stage_results);

    // 6. Idle stage: nobody served
    section("Idle Stage", &args);
    results.extend(run_idle_stage(&config));

    // ── Summary ──
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    if args.json {
        let report = Report {
            passed,
            failed,
            results: &results,
            final_frame,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to encode report: {}", e),
        }
    } else {
        println!();
        for r in &results {
            let icon = if r.passed { "✓" } else { "✗" };
            if !r.passed || args.verbose {
                println!("  {} {}: {}", icon, r.name, r.detail);
            }
        }
        println!(
            "\n=== RESULT: {}/{} passed, {} failed ===",
            passed, total, failed
        );
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── Pointer helpers ─────────────────────────────────────────────────────

fn drag(session: &mut MinigameSession, from: Vec2, to: Vec2) -> Vec<SessionEvent> {
    let mut events = session.update(PointerInput::press(from));
    events.extend(session.update(PointerInput::hover(to)));
    events.extend(session.update(PointerInput::release(to)));
    events
}

fn pour(session: &mut MinigameSession, ingredient: Ingredient) -> Vec<SessionEvent> {
    let Some(grip) = session.ingredient_grip(ingredient) else {
        return Vec::new();
    };
    let lift = if ingredient.has_pour_overlay() {
        Vec2::ZERO - session.config().layout.overlay_offset
    } else {
        Vec2::ZERO
    };
    let target = session.cup_grip() + lift;
    drag(session, grip, target)
}

fn zone_centre(zone: meowcafe_logic::geometry::Rect) -> Vec2 {
    Vec2::new(zone.x + zone.width / 2.0, zone.y + zone.height / 2.0)
}

/// Ingredients to drop, in order, to make what `order` asks for.
fn recipe_for(order: &Order) -> Vec<Ingredient> {
    let mut steps = Vec::new();
    for (i, label) in order.labels().iter().enumerate() {
        if let Some(ingredient) = Ingredient::from_label(label) {
            steps.push(ingredient);
        }
        if i == 0 {
            steps.push(Ingredient::HotWater);
        }
    }
    steps
}

// ── 1. Stage Config ─────────────────────────────────────────────────────

fn validate_stage_config(config: &StageConfig) -> Vec<TestResult> {
    let mut results = Vec::new();

    let errors = validate_config(config);
    results.push(TestResult {
        name: "config_valid".into(),
        passed: errors.is_empty(),
        detail: if errors.is_empty() {
            format!(
                "base {} ticks, patience {}..={}, scoring {:?}",
                config.base_duration, config.patience_min, config.patience_max, config.scoring
            )
        } else {
            errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        },
    });

    let json = serde_json::to_string(config).unwrap_or_default();
    let reparsed: Result<StageConfig, _> = serde_json::from_str(&json);
    results.push(TestResult {
        name: "config_json_stable".into(),
        passed: reparsed.map(|c| c == *config).unwrap_or(false),
        detail: format!("{} bytes", json.len()),
    });

    results
}

// ── 2. Menu ─────────────────────────────────────────────────────────────

fn validate_menu() -> Vec<TestResult> {
    let mut results = Vec::new();
    let recipes = menu();

    let mut keys: Vec<String> = recipes.iter().map(|r| composition_key(&r.slots())).collect();
    keys.sort();
    keys.dedup();
    results.push(TestResult {
        name: "menu_keys_unique".into(),
        passed: recipes.len() == 16 && keys.len() == 16,
        detail: format!("{} recipes, {} distinct keys", recipes.len(), keys.len()),
    });

    let mut all_validate = true;
    for recipe in &recipes {
        let order = Order::from_recipe(recipe);
        let mut cup = Cup::new();
        cup.activate();
        for ingredient in recipe_for(&order) {
            cup.apply(ingredient);
        }
        if !validate_presented(&order, &cup.presented_labels())
            || order.expected_key().as_deref() != Some(cup.key())
        {
            all_validate = false;
        }
    }
    results.push(TestResult {
        name: "menu_drinks_validate".into(),
        passed: all_validate,
        detail: "every menu drink built in order matches its order".into(),
    });

    results
}

// ── 3. Fill Order ───────────────────────────────────────────────────────

fn validate_fill_order(verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();
    let all = Ingredient::all();

    let mut sequences = 0usize;
    let mut violations = 0usize;
    let mut keys = std::collections::HashSet::new();
    for &a in all {
        for &b in all {
            for &c in all {
                let mut cup = Cup::new();
                cup.activate();
                for i in [a, b, c] {
                    cup.apply(i);
                    if !cup.slots().is_well_ordered() {
                        violations += 1;
                    }
                }
                keys.insert(cup.key().to_string());
                sequences += 1;
            }
        }
    }
    if verbose {
        println!("  {} sequences, {} distinct keys", sequences, keys.len());
    }
    results.push(TestResult {
        name: "fill_order_monotonic".into(),
        passed: violations == 0,
        detail: format!("{} three-drop sequences, {} violations", sequences, violations),
    });

    let mut idle = Cup::new();
    let applied = all.iter().any(|&i| idle.apply(i).is_applied());
    results.push(TestResult {
        name: "inactive_cup_ignores".into(),
        passed: !applied && idle.key() == EMPTY_KEY,
        detail: "drops on a stacked cup never change it".into(),
    });

    results
}

// ── 4. Patience ─────────────────────────────────────────────────────────

fn validate_patience(config: &StageConfig) -> Vec<TestResult> {
    let mut results = Vec::new();

    let order = Order::from_recipe(&menu()[0]);
    let mut customer = Customer::new(1, order, 1000, 1.0);
    let mut seen = Vec::new();
    let mut timed_out_at = None;
    for t in 1..=1100u32 {
        match customer.tick() {
            TickOutcome::Waiting { emotion } => {
                if seen.last() != Some(&emotion) {
                    seen.push(emotion);
                }
            }
            TickOutcome::TimedOut => timed_out_at = Some(t),
            TickOutcome::Idle => {}
        }
    }
    results.push(TestResult {
        name: "emotion_progression".into(),
        passed: seen
            == vec![
                Emotion::Happy,
                Emotion::Warning,
                Emotion::Frustrated,
                Emotion::Angry,
            ],
        detail: format!("{:?}", seen),
    });
    results.push(TestResult {
        name: "timeout_at_deadline".into(),
        passed: timed_out_at == Some(1000) && !customer.visible,
        detail: format!("timed out at tick {:?}", timed_out_at),
    });

    let shortest = order_deadline(config.base_duration, config.patience_min);
    let longest = order_deadline(config.base_duration, config.patience_max);
    results.push(TestResult {
        name: "deadline_range".into(),
        passed: shortest > 0 && shortest <= longest,
        detail: format!("{}..={} ticks", shortest, longest),
    });

    results
}

// ── 5. Scripted Stage ───────────────────────────────────────────────────

fn run_scripted_stage(config: &StageConfig, verbose: bool) -> (Vec<TestResult>, FrameSnapshot) {
    let mut results = Vec::new();
    let mut session = MinigameSession::new(config.clone());
    let mut served = 0u32;
    let mut expected_score = 0i32;
    let mut wrong_results = 0u32;

    session.update(PointerInput::default());

    for round in 0..6 {
        let Some(slot) = session.seats().iter().find(|s| s.occupant().is_some()) else {
            // Everyone left; wait for the next arrival.
            for _ in 0..config.respawn_delay + 1 {
                session.update(PointerInput::default());
            }
            continue;
        };
        let seat = slot.seat;
        let Some(order) = slot.occupant().map(|c| c.order.clone()) else {
            continue;
        };

        let grip = session.cup_grip();
        let mat = zone_centre(config.layout.mat_zone);
        drag(&mut session, grip, mat);
        for ingredient in recipe_for(&order) {
            pour(&mut session, ingredient);
        }

        if session.customer(seat).is_none() {
            // Ran out of patience while the drink was being made.
            let grip = session.cup_grip();
            drag(&mut session, grip, Vec2::new(2000.0, 2000.0));
            continue;
        }

        let grip = session.cup_grip();
        let target = zone_centre(config.layout.seat_zones[seat as usize - 1]);
        let events = drag(&mut session, grip, target);
        let served_event = events.iter().find_map(|e| match e {
            SessionEvent::Served { seat: s, matched, points } if *s == seat => {
                Some((*matched, *points))
            }
            _ => None,
        });
        match served_event {
            Some((true, points)) => {
                served += 1;
                expected_score += points;
                if verbose {
                    println!(
                        "  round {}: seat {} served {:?} (+{})",
                        round,
                        seat,
                        order.expected_key(),
                        points
                    );
                }
            }
            _ => wrong_results += 1,
        }
    }

    let board = *session.scoreboard();
    let penalties = board.timed_out as i32 * config.timeout_penalty;
    results.push(TestResult {
        name: "stage_serves_orders".into(),
        passed: served > 0 && wrong_results == 0,
        detail: format!("{} served, {} failed serves", served, wrong_results),
    });
    results.push(TestResult {
        name: "stage_score_consistent".into(),
        passed: board.score == expected_score - penalties && board.served == served,
        detail: format!(
            "score {} = {} earned - {} penalties",
            board.score, expected_score, penalties
        ),
    });
    results.push(TestResult {
        name: "stage_cup_back_on_stack".into(),
        passed: !session.cup().is_active() && session.cup_position() == config.layout.cup_stack,
        detail: format!("cup key {}", session.cup().key()),
    });

    let frame = session.snapshot();
    results.push(TestResult {
        name: "stage_snapshot".into(),
        passed: frame.customers.len() <= 3 && frame.dragging.is_none() && !frame.cup.active,
        detail: format!("tick {}, {} objects", frame.tick, frame.objects.len()),
    });

    (results, frame)
}

// ── 6. Idle Stage ───────────────────────────────────────────────────────

fn run_idle_stage(config: &StageConfig) -> Vec<TestResult> {
    let mut results = Vec::new();
    let mut session = MinigameSession::new(config.clone());

    let longest = order_deadline(config.base_duration, config.patience_max);
    let ticks = longest + 2;
    let mut timeouts = 0u32;
    for _ in 0..ticks {
        for e in session.update(PointerInput::default()) {
            if matches!(e, SessionEvent::CustomerTimedOut { .. }) {
                timeouts += 1;
            }
        }
    }

    results.push(TestResult {
        name: "idle_everyone_times_out".into(),
        passed: timeouts >= 3,
        detail: format!("{} timeouts in {} ticks", timeouts, ticks),
    });
    results.push(TestResult {
        name: "idle_penalty_applied".into(),
        passed: session.score() == -(timeouts as i32) * config.timeout_penalty,
        detail: format!("score {}", session.score()),
    });

    results
}
