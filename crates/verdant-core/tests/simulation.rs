//! End-to-end scenarios driving a [`Simulation`] through its tick entry
//! points.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use verdant_core::config::SimulationConfig;
use verdant_core::events::EngineEvent;
use verdant_core::{Simulation, UniformWorld};
use verdant_genes::dispatch::NullTarget;
use verdant_genes::{RuntimeEffectInstance, SeedTemplate, SequenceSlot, SkipReason};
use verdant_types::{CellKind, GrowthState, OrganismId};

const CATALOG: &str = r#"
catalog:
  - id: "0190c2a4-0000-7000-8000-000000000001"
    name: Seed
    params:
      category: passive
      stat_target: None
      max_stacks: 1
      growth: {}
  - id: "0190c2a4-0000-7000-8000-000000000002"
    name: Bountiful
    params:
      category: passive
      stat_target: FruitYield
      base_value: 2.0
  - id: "0190c2a4-0000-7000-8000-000000000003"
    name: Energy Roots
    params:
      category: passive
      stat_target: EnergyGeneration
      base_value: 1.5
      stacks_additively: true
  - id: "0190c2a4-0000-7000-8000-000000000010"
    name: Thorn Shot
    params:
      category: active
      base_energy_cost: 20
      can_execute_empty: true
      behavior:
        kind: projectile
        base_damage: 4
        range: 3
  - id: "0190c2a4-0000-7000-8000-000000000011"
    name: Slow Cloud
    params:
      category: active
      base_energy_cost: 10
      execution_delay_ticks: 2
      can_execute_empty: true
      behavior:
        kind: cloud
        radius: 2
        duration_ticks: 5
  - id: "0190c2a4-0000-7000-8000-000000000012"
    name: Basic Fruit
    params:
      category: active
      base_energy_cost: 5
      can_execute_empty: true
      behavior:
        kind: spawn_fruit
        fruit_count: 1
"#;

fn config(extra: &str) -> SimulationConfig {
    let yaml = format!("{extra}\n{CATALOG}");
    SimulationConfig::parse(&yaml).unwrap()
}

fn simulation(config: &SimulationConfig) -> Simulation {
    Simulation::from_config(
        config,
        Box::new(UniformWorld::default()),
        Box::new(NullTarget),
    )
    .unwrap()
}

fn template(yaml: &str) -> SeedTemplate {
    SeedTemplate::from_yaml(yaml).unwrap()
}

fn executed(events: &[EngineEvent], organism: OrganismId) -> Vec<(usize, u64)> {
    events
        .iter()
        .filter_map(|e| match e {
            EngineEvent::SlotExecuted {
                organism_id,
                slot_index,
                tick,
                ..
            } if *organism_id == organism => Some((*slot_index, *tick)),
            _ => None,
        })
        .collect()
}

const SHOOTER: &str = "
name: Shooter
passives:
  - effect: Seed
sequence:
  - active:
      effect: Thorn Shot
cycle_period_ticks: 1
";

#[test]
fn unaffordable_cycle_leaves_energy_untouched() {
    let config = config(
        "energy:\n  starting_energy_fraction: 0.15\n  recharge_period_ticks: 50",
    );
    let mut sim = simulation(&config);
    let id = sim.plant(&template(SHOOTER)).unwrap();
    assert_eq!(sim.organism(id).unwrap().current_energy(), 15.0);

    let summary = sim.on_cycle_tick();
    assert_eq!(summary.cycles_aborted, 1);
    assert_eq!(sim.organism(id).unwrap().current_energy(), 15.0);
    let events = sim.drain_events();
    assert!(executed(&events, id).is_empty());
    assert!(events
        .iter()
        .any(|e| matches!(e, EngineEvent::CycleAborted { total_cost, .. } if *total_cost == 20.0)));
}

#[test]
fn cycle_timer_resets_after_abort() {
    let config = config(
        "energy:\n  starting_energy_fraction: 0.1\n  recharge_period_ticks: 50",
    );
    let mut sim = simulation(&config);
    let id = sim
        .plant(&template(&SHOOTER.replace("cycle_period_ticks: 1", "cycle_period_ticks: 3")))
        .unwrap();
    let mut aborted = 0;
    for _ in 0..9 {
        aborted += sim.on_cycle_tick().cycles_aborted;
    }
    assert_eq!(aborted, 3);
    assert_eq!(sim.organism(id).unwrap().state().cycle_ticks_remaining, 3);
}

#[test]
fn affordable_cycle_spends_and_reports_execution() {
    let config = config("energy:\n  recharge_period_ticks: 50");
    let mut sim = simulation(&config);
    let id = sim.plant(&template(SHOOTER)).unwrap();
    let summary = sim.on_cycle_tick();
    assert_eq!(summary.slots_fired, 1);
    assert_eq!(sim.organism(id).unwrap().current_energy(), 80.0);
    assert_eq!(executed(sim.events(), id), vec![(0, 1)]);
}

#[test]
fn three_stem_parallel_plant_grows_ten_cells() {
    let config = config(
        "growth:\n  base_min_stem: 3\n  base_max_stem: 3\n  base_leaf_gap: 0\n  leaf_pattern: Parallel",
    );
    let mut sim = simulation(&config);
    let id = sim.plant(&template("name: Sprout\npassives:\n  - effect: Seed")).unwrap();
    for _ in 0..10 {
        sim.on_growth_tick();
    }
    let organism = sim.organism(id).unwrap();
    assert_eq!(organism.growth_state(), GrowthState::Complete);
    assert_eq!(organism.grid().count(CellKind::Stem), 3);
    assert_eq!(organism.grid().count(CellKind::Leaf), 6);
    assert_eq!(organism.grid().len(), 10);
    assert!(sim
        .events()
        .iter()
        .any(|e| matches!(e, EngineEvent::GrowthCompleted { placed_stems: 3, .. })));
}

#[test]
fn delayed_slot_fires_k_ticks_after_accumulation() {
    let config = config("energy:\n  recharge_period_ticks: 50\nticks:\n  cycle_period_ticks: 10");
    let mut sim = simulation(&config);
    let id = sim
        .plant(&template(
            "
name: Mixed
passives:
  - effect: Seed
sequence:
  - active:
      effect: Slow Cloud
  - active:
      effect: Thorn Shot
cycle_period_ticks: 1
",
        ))
        .unwrap();

    sim.on_cycle_tick();
    assert_eq!(executed(sim.events(), id), vec![(1, 1)]);
    assert_eq!(sim.pending_continuations(), 1);
    // Both slots were paid for up front.
    assert_eq!(sim.organism(id).unwrap().current_energy(), 70.0);

    sim.on_cycle_tick();
    assert_eq!(executed(sim.events(), id), vec![(1, 1), (1, 2)]);
    sim.on_cycle_tick();
    assert_eq!(
        executed(sim.events(), id),
        vec![(1, 1), (1, 2), (0, 3), (1, 3)]
    );
}

#[test]
fn deferred_slot_swapped_before_due_does_not_fire() {
    let config = config("energy:\n  recharge_period_ticks: 50");
    let mut sim = simulation(&config);
    let id = sim
        .plant(&template(
            "name: Cloud\npassives:\n  - effect: Seed\nsequence:\n  - active:\n      effect: Slow Cloud\ncycle_period_ticks: 5",
        ))
        .unwrap();
    for _ in 0..5 {
        sim.on_cycle_tick();
    }
    assert_eq!(sim.pending_continuations(), 1);
    assert_eq!(sim.organism(id).unwrap().current_energy(), 90.0);

    let shot = sim.registry().get_by_name("Thorn Shot").unwrap();
    let slots = vec![SequenceSlot {
        active: Some(RuntimeEffectInstance::new(shot)),
        ..SequenceSlot::default()
    }];
    let passives = sim.organism(id).unwrap().state().passives.clone();
    sim.reconfigure(id, passives, slots).unwrap();

    for _ in 0..4 {
        sim.on_cycle_tick();
    }
    assert_eq!(sim.pending_continuations(), 0);
    assert!(executed(sim.events(), id).is_empty());
    assert_eq!(sim.organism(id).unwrap().current_energy(), 90.0);
}

#[test]
fn removing_an_organism_drops_its_continuations() {
    let config = config("");
    let mut sim = simulation(&config);
    let id = sim
        .plant(&template(
            "name: Cloud\npassives:\n  - effect: Seed\nsequence:\n  - active:\n      effect: Slow Cloud\ncycle_period_ticks: 1",
        ))
        .unwrap();
    sim.on_cycle_tick();
    assert_eq!(sim.pending_continuations(), 1);

    assert!(sim.remove_organism(id).is_some());
    assert_eq!(sim.pending_continuations(), 0);
    for _ in 0..5 {
        sim.advance_tick();
    }
    assert!(executed(sim.events(), id).is_empty());
}

#[test]
fn organism_without_seed_marker_is_inert() {
    let config = config("");
    let mut sim = simulation(&config);
    let id = sim
        .plant(&template(
            "name: Husk\nsequence:\n  - active:\n      effect: Thorn Shot\ncycle_period_ticks: 1",
        ))
        .unwrap();
    assert!(sim.organism(id).unwrap().is_inert());
    for _ in 0..5 {
        sim.advance_tick();
    }
    let organism = sim.organism(id).unwrap();
    assert_eq!(organism.current_energy(), 100.0);
    assert_eq!(organism.grid().len(), 1);
    assert!(matches!(
        sim.events().first(),
        Some(EngineEvent::ConfigurationWarning { .. })
    ));
    assert!(executed(sim.events(), id).is_empty());
}

#[test]
fn fruiting_active_places_yield_scaled_fruit() {
    let config = config("energy:\n  recharge_period_ticks: 50");
    let mut sim = simulation(&config);
    let id = sim
        .plant(&template(
            "
name: Berry Bush
passives:
  - effect: Seed
  - effect: Bountiful
sequence:
  - active:
      effect: Basic Fruit
cycle_period_ticks: 1
",
        ))
        .unwrap();
    let summary = sim.on_cycle_tick();
    assert_eq!(summary.fruit_placed, 2);
    assert_eq!(sim.organism(id).unwrap().grid().count(CellKind::Fruit), 2);
}

#[test]
fn explicit_fruit_trigger_uses_free_sites() {
    let config = config("");
    let mut sim = simulation(&config);
    let id = sim.plant(&template("name: Sprout\npassives:\n  - effect: Seed")).unwrap();
    let placed: Vec<_> = (0..4).map(|_| sim.trigger_fruit(id).unwrap()).collect();
    assert_eq!(placed.iter().filter(|p| p.is_some()).count(), 3);
    assert!(placed.last().unwrap().is_none());
}

#[test]
fn recharge_applies_generation_multiplier() {
    let config = config(
        "energy:\n  starting_energy_fraction: 0.5\n  recharge_period_ticks: 3\nticks:\n  cycle_period_ticks: 1000",
    );
    let mut sim = simulation(&config);
    let id = sim
        .plant(&template(
            "name: Rooted\npassives:\n  - effect: Seed\n  - effect: Energy Roots",
        ))
        .unwrap();
    for _ in 0..3 {
        sim.on_cycle_tick();
    }
    let organism = sim.organism(id).unwrap();
    assert_eq!(organism.current_energy(), 65.0);
    assert_eq!(organism.recharge_progress(), 0.0);
}

#[test]
fn save_and_reload_preserves_configuration_and_energy() {
    let config = config("energy:\n  recharge_period_ticks: 50");
    let mut sim = simulation(&config);
    let id = sim.plant(&template(SHOOTER)).unwrap();
    sim.on_cycle_tick();
    let saved = sim.save_organism(id).unwrap();
    let before = sim.organism(id).unwrap().state().clone();

    let mut other = simulation(&config);
    let reloaded = other.load_organism("Shooter", &saved).unwrap();
    let after = other.organism(reloaded).unwrap().state();
    assert_eq!(after.slots, before.slots);
    assert_eq!(after.passives, before.passives);
    assert_eq!(after.energy.current(), before.energy.current());
}

#[test]
fn missing_definition_degrades_to_skip() {
    let config = config("energy:\n  recharge_period_ticks: 50");
    let mut sim = simulation(&config);
    let id = sim.plant(&template(SHOOTER)).unwrap();
    let saved = sim.save_organism(id).unwrap();

    let trimmed = config.catalog.iter().filter(|d| d.name != "Thorn Shot").cloned().collect();
    let trimmed_config = SimulationConfig {
        catalog: trimmed,
        ..config.clone()
    };
    let mut other = simulation(&trimmed_config);
    let reloaded = other.load_organism("Shooter", &saved).unwrap();
    other.on_cycle_tick();

    assert!(executed(other.events(), reloaded).is_empty());
    assert!(other.events().iter().any(|e| matches!(
        e,
        EngineEvent::SlotSkipped {
            reason: SkipReason::MissingActive,
            ..
        }
    )));
    assert_eq!(other.organism(reloaded).unwrap().current_energy(), 100.0);
    let previews = other.slot_previews(reloaded).unwrap();
    assert_eq!(previews[0].active_name.as_deref(), Some("Missing Effect"));
}

#[test]
fn independent_simulations_with_same_seed_agree() {
    let config = config("growth:\n  base_randomness: 0.5");
    let tpl = template("name: Sprout\npassives:\n  - effect: Seed");
    let mut a = simulation(&config);
    let mut b = simulation(&config);
    let ia = a.plant(&tpl).unwrap();
    let ib = b.plant(&tpl).unwrap();
    for _ in 0..8 {
        a.advance_tick();
        b.advance_tick();
    }
    let cells_a: Vec<_> = a.organism(ia).unwrap().grid().iter().collect();
    let cells_b: Vec<_> = b.organism(ib).unwrap().grid().iter().collect();
    assert_eq!(cells_a, cells_b);
}

#[test]
fn shipped_config_plants_every_seed() {
    let config = SimulationConfig::parse(include_str!("../../../verdant-config.yaml")).unwrap();
    let mut sim = simulation(&config);
    for template in &config.seeds {
        sim.plant(template).unwrap();
    }
    assert_eq!(sim.organism_count(), config.seeds.len());
    for _ in 0..config.ticks.max_ticks {
        sim.advance_tick();
    }
    assert!(sim.organisms().all(|o| !o.is_inert()));
    assert!(sim.organisms().all(|o| o.grid().count(CellKind::Stem) >= 3));
}
