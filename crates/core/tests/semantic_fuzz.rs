use hackman_core::{
    Contest, Direction, Engine, Grid, HazardSet, MatchConfig, Pos, compute_distances,
    reduce_route,
};
use proptest::{
    arbitrary::any,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

fn below(rng: &mut ChaCha8Rng, bound: usize) -> usize {
    (rng.next_u64() % bound as u64) as usize
}

/// Random match setup: walls on roughly a fifth of the cells, self always
/// present, opponent most of the time, a few hostiles and collectibles.
fn random_match(seed: u64) -> (MatchConfig, String) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let width = 3 + below(&mut rng, 17);
    let height = 1 + below(&mut rng, 15);

    let mut cells: Vec<Vec<&str>> = vec![Vec::new(); width * height];
    for cell in &mut cells {
        if below(&mut rng, 5) == 0 {
            cell.push("x");
        }
    }
    let mut open: Vec<usize> = (0..cells.len()).filter(|idx| cells[*idx].is_empty()).collect();
    if open.len() < 2 {
        cells[0].clear();
        cells[1].clear();
        open = vec![0, 1];
    }

    let self_idx = open.swap_remove(below(&mut rng, open.len()));
    cells[self_idx].push("P0");
    if below(&mut rng, 4) != 0 {
        let opponent_idx = open.swap_remove(below(&mut rng, open.len()));
        cells[opponent_idx].push("P1");
    }
    for _ in 0..below(&mut rng, 7) {
        if open.is_empty() {
            break;
        }
        let idx = open.swap_remove(below(&mut rng, open.len()));
        cells[idx].push("C");
    }
    for _ in 0..below(&mut rng, 4) {
        let idx = below(&mut rng, cells.len());
        if !cells[idx].contains(&"x") {
            cells[idx].push("E0");
        }
    }

    let text = cells
        .iter()
        .map(|cell| if cell.is_empty() { ".".to_string() } else { cell.join(";") })
        .collect::<Vec<_>>()
        .join(",");
    (MatchConfig::new(width, height, 0, 1), text)
}

fn run_decision_invariants(seed: u64) -> Result<(), String> {
    let (config, text) = random_match(seed);
    let mut engine = Engine::with_config(config).map_err(|e| format!("seed {seed}: {e}"))?;
    engine.ingest_snapshot(&text).map_err(|e| format!("seed {seed}: {e}"))?;
    let plan = engine.plan_move().map_err(|e| format!("seed {seed}: {e}"))?;

    let grid = engine.grid().ok_or("grid missing")?;
    let state = engine.state();
    let self_pos = state.self_pos.ok_or("self missing")?;
    let field = &plan.self_field;
    let decision = plan.decision;
    let forbidden = match decision.contest {
        Contest::Yielded { forbidden } => Some(forbidden),
        Contest::Held | Contest::Uncontested => None,
    };

    if field.get(self_pos) != 1 {
        return Err(format!("seed {seed}: origin stored as {}", field.get(self_pos)));
    }
    for pos in grid.positions() {
        let value = field.get(pos);
        let around: Vec<u32> = grid
            .neighbors(pos)
            .iter()
            .map(|(_, next)| field.get(*next))
            .filter(|next_value| *next_value != 0)
            .collect();
        if value > 1 && (!around.contains(&(value - 1)) || around.iter().any(|v| v + 1 < value)) {
            return Err(format!("seed {seed}: {pos} = {value} is inconsistent with {around:?}"));
        }
        let open = grid.is_enterable(pos) && state.hazards.is_safe(pos, forbidden);
        if value == 0 && open && !around.is_empty() {
            return Err(format!("seed {seed}: open cell {pos} next to the field left unreached"));
        }
    }

    if decision.target_is_collectible && !state.collectibles.contains(&decision.target) {
        return Err(format!("seed {seed}: target {} is not a collectible", decision.target));
    }
    if let Some(forbidden) = forbidden {
        if decision.target == forbidden || state.opponent_pos.is_none() {
            return Err(format!("seed {seed}: yielded to {forbidden} but kept it"));
        }
    }
    if decision.target == self_pos {
        if decision.direction != Direction::Pass {
            return Err(format!("seed {seed}: on target but moved {}", decision.direction));
        }
    } else if field.is_reached(decision.target) {
        let step = grid.step(self_pos, decision.direction);
        if field.get(step) != 2 {
            return Err(format!("seed {seed}: {} does not start the route", decision.direction));
        }
        let valid = engine.valid_moves().map_err(|e| e.to_string())?;
        if !valid.contains(&decision.direction) {
            return Err(format!("seed {seed}: {} not in {valid:?}", decision.direction));
        }
    }

    for &collectible in &state.collectibles {
        let route = reduce_route(grid, field, self_pos, collectible);
        if field.get(collectible) > 1 && field.get(route.walked_to) != 2 {
            return Err(format!("seed {seed}: walk to {collectible} stopped at {}", route.walked_to));
        }
    }
    Ok(())
}

fn wrap_manhattan(grid: &Grid, a: Pos, b: Pos) -> u32 {
    let (left, right) = grid.wrap_ends();
    let hops = |from: Pos, to: Pos| from.x.abs_diff(to.x) + from.y.abs_diff(to.y);
    let direct = hops(a, b);
    let via_left = hops(a, left) + 1 + hops(right, b);
    let via_right = hops(a, right) + 1 + hops(left, b);
    direct.min(via_left).min(via_right)
}

fn run_open_grid_optimality(seed: u64) -> Result<(), String> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let width = 1 + below(&mut rng, 19);
    let height = 1 + below(&mut rng, 15);
    let grid = Grid::new(width, height, below(&mut rng, height));
    let origin = Pos { y: below(&mut rng, height) as i32, x: below(&mut rng, width) as i32 };
    let field = compute_distances(&grid, &HazardSet::default(), origin, None);

    for pos in grid.positions() {
        let expected = wrap_manhattan(&grid, origin, pos);
        if field.hops(pos) != Some(expected) {
            return Err(format!(
                "seed {seed}: {width}x{height} from {origin} to {pos}: {:?} != {expected}",
                field.hops(pos)
            ));
        }
    }
    Ok(())
}

#[test]
fn test_fuzz_decision_invariants() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(256));
    runner
        .run(&any::<u64>(), |seed| {
            run_decision_invariants(seed).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("random snapshots should preserve decision invariants");
}

#[test]
fn test_fuzz_open_grid_distances_match_wrap_manhattan() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(128));
    runner
        .run(&any::<u64>(), |seed| {
            run_open_grid_optimality(seed).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("open grid distances should be optimal");
}
