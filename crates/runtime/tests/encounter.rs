use std::collections::HashSet;
use std::sync::Arc;

use creature_content::builtin;
use creature_core::spatial::DIRECTIONS8;
use creature_core::{
    AbilityKind, AiConfig, CombatTarget, CreatureKind, CreatureRng, CreatureTemplate, DamageType,
    Position,
};
use creature_runtime::{Encounter, EncounterEvent, GridMap, Player, Scenario};
use rand::Rng;
use rand::seq::SliceRandom;

fn arena(player_at: Position, seed: u64) -> Encounter {
    let catalog = Arc::new(builtin::catalog().expect("builtin catalog"));
    let player = Player::new("hero", player_at, CreatureRng::new(seed)).with_health(500);
    Encounter::new(
        catalog,
        AiConfig::default(),
        GridMap::open(16, 16),
        player,
        seed,
    )
}

fn assert_no_shared_tiles(encounter: &Encounter) {
    let mut seen = HashSet::new();
    seen.insert(encounter.player().position);
    for (_, creature) in encounter.living() {
        assert!(
            seen.insert(creature.tile()),
            "{} shares {} with another occupant",
            creature.id,
            creature.tile()
        );
    }
}

#[test]
fn crowded_rounds_never_stack_occupants() {
    for seed in 0..8 {
        let mut encounter = arena(Position::new(8, 8), seed);
        for (kind, tile) in [
            (CreatureKind::Wolf, Position::new(10, 8)),
            (CreatureKind::Wolf, Position::new(6, 8)),
            (CreatureKind::Goblin, Position::new(8, 10)),
            (CreatureKind::Goblin, Position::new(8, 6)),
            (CreatureKind::GoblinArcher, Position::new(12, 12)),
            (CreatureKind::Bandit, Position::new(4, 4)),
            (CreatureKind::Slime, Position::new(11, 5)),
            (CreatureKind::Rabbit, Position::new(5, 11)),
        ] {
            encounter.spawn(kind, tile).expect("spawn");
        }
        encounter.engage(8);

        for _ in 0..12 {
            encounter.run_round();
            assert_no_shared_tiles(&encounter);
            if encounter.is_over() {
                break;
            }
        }
    }
}

#[test]
fn slime_split_lands_on_a_free_tile_next_round() {
    let mut encounter = arena(Position::new(8, 8), 3);
    let slime = encounter
        .spawn(CreatureKind::Slime, Position::new(9, 8))
        .expect("spawn");
    encounter.engage(2);

    let first = encounter.run_round();
    let spawned: Vec<(Position, Option<String>)> = first
        .events
        .iter()
        .filter_map(|event| match event {
            EncounterEvent::Spawned { at, parent, kind, .. } => {
                assert_eq!(*kind, CreatureKind::Slimeling);
                Some((*at, parent.clone()))
            }
            _ => None,
        })
        .collect();

    assert_eq!(first.spawned, 1);
    assert_eq!(spawned.len(), 1);
    let (at, parent) = &spawned[0];
    assert_eq!(parent.as_deref(), Some(encounter.creatures()[slime].id.as_str()));
    assert!(at.chebyshev(Position::new(9, 8)) <= 3);
    assert_no_shared_tiles(&encounter);

    // Newcomers wait for the next round.
    assert_eq!(first.acted, 1);
    let second = encounter.run_round();
    assert_eq!(second.acted, 2);
}

#[test]
fn split_with_no_room_is_reported_not_forced() {
    let map = GridMap::from_ascii(
        "\
#####
#...#
#####",
    )
    .expect("map");
    let catalog = Arc::new(builtin::catalog().expect("catalog"));
    let player = Player::new("hero", Position::new(1, 1), CreatureRng::new(1)).with_health(500);
    let mut encounter = Encounter::new(catalog, AiConfig::default(), map, player, 1);
    encounter
        .spawn(CreatureKind::Slime, Position::new(2, 1))
        .expect("slime");
    encounter
        .spawn(CreatureKind::Rat, Position::new(3, 1))
        .expect("rat");
    encounter.engage(3);

    let summary = encounter.run_round();
    assert_eq!(summary.spawned, 0);
    assert!(summary
        .events
        .iter()
        .any(|e| matches!(e, EncounterEvent::SpawnFailed { kind: CreatureKind::Slimeling, .. })));
    assert_no_shared_tiles(&encounter);
}

#[test]
fn death_is_resolved_exactly_once() {
    let mut encounter = arena(Position::new(8, 8), 11);
    let rat = encounter
        .spawn(CreatureKind::Rat, Position::new(9, 8))
        .expect("spawn");

    let taken = encounter
        .player_attack(rat, 1_000, DamageType::Physical)
        .expect("attack");
    assert!(taken.killed);
    assert_eq!(encounter.loot().len(), 1);
    assert_eq!(encounter.loot()[0].kind, CreatureKind::Rat);

    let again = encounter
        .player_attack(rat, 1_000, DamageType::Physical)
        .expect("attack");
    assert!(!again.killed);
    encounter.run_round();
    assert_eq!(encounter.loot().len(), 1);
}

#[test]
fn fire_beetle_bursts_once_and_hits_neighbours() {
    let mut encounter = arena(Position::new(8, 8), 5);
    let beetle = encounter
        .spawn(CreatureKind::FireBeetle, Position::new(9, 8))
        .expect("beetle");
    let wolf = encounter
        .spawn(CreatureKind::Wolf, Position::new(10, 8))
        .expect("wolf");
    let far = encounter
        .spawn(CreatureKind::Wolf, Position::new(14, 14))
        .expect("far wolf");
    let before = encounter.player().health;

    encounter
        .player_attack(beetle, 1_000, DamageType::Physical)
        .expect("attack");

    let bursts = encounter
        .events()
        .iter()
        .filter(|e| matches!(e, EncounterEvent::Exploded { .. }))
        .count();
    assert_eq!(bursts, 1);
    assert!(encounter.player().health < before);

    let neighbour = &encounter.creatures()[wolf];
    assert!(neighbour.stats.current_health < neighbour.stats.max_health);
    let bystander = &encounter.creatures()[far];
    assert_eq!(bystander.stats.current_health, bystander.stats.max_health);

    encounter.run_round();
    let bursts = encounter
        .events()
        .iter()
        .filter(|e| matches!(e, EncounterEvent::Exploded { .. }))
        .count();
    assert_eq!(bursts, 1);
}

#[test]
fn player_hits_provoke_and_engage() {
    let mut encounter = arena(Position::new(8, 8), 2);
    let bear = encounter
        .spawn(CreatureKind::Bear, Position::new(12, 8))
        .expect("spawn");
    assert!(!encounter.creatures()[bear].in_combat_zone);

    encounter
        .player_attack(bear, 1, DamageType::Physical)
        .expect("attack");
    let bear = &encounter.creatures()[bear];
    assert!(bear.is_provoked);
    assert!(bear.in_combat_zone);
}

#[test]
fn exploration_only_moves_creatures_outside_the_fight() {
    let mut encounter = arena(Position::new(2, 2), 9);
    let wolf = encounter
        .spawn(CreatureKind::Wolf, Position::new(6, 2))
        .expect("wolf");
    let goblin = encounter
        .spawn(CreatureKind::Goblin, Position::new(12, 12))
        .expect("goblin");
    encounter.creature_mut(goblin).expect("goblin").in_combat_zone = true;
    let parked = encounter.creatures()[goblin].position;

    for _ in 0..40 {
        encounter.explore(0.25);
        assert_no_shared_tiles(&encounter);
    }

    assert_eq!(encounter.creatures()[goblin].position, parked);
    let hunter = &encounter.creatures()[wolf];
    assert!(hunter.tile().chebyshev(Position::new(2, 2)) < 4);
}

#[test]
fn report_serializes_to_json() {
    let mut encounter = arena(Position::new(8, 8), 4);
    let wolf = encounter
        .spawn(CreatureKind::Wolf, Position::new(9, 8))
        .expect("spawn");
    encounter.engage(3);
    encounter.run_round();
    encounter
        .player_attack(wolf, 1_000, DamageType::Physical)
        .expect("attack");

    let report = encounter.report();
    assert_eq!(report.rounds, 1);
    assert_eq!(report.creatures.len(), 1);

    let json = report.to_json().expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["seed"], 4);
    assert!(value["events"].as_array().is_some_and(|e| !e.is_empty()));
    assert!(json.contains("\"type\": \"player_attacked\""));
}

#[test]
fn builtin_scenario_plays_out() {
    let catalog = Arc::new(builtin::catalog().expect("catalog"));
    let scenario = Scenario::builtin().expect("scenario");
    let mut encounter = scenario
        .build(catalog, AiConfig::default(), Some(17))
        .expect("build");
    assert_eq!(encounter.creatures().len(), scenario.creatures.len());

    for _ in 0..20 {
        encounter.explore(0.25);
    }
    encounter.engage(20);
    for _ in 0..10 {
        encounter.run_round();
        assert_no_shared_tiles(&encounter);
        if encounter.is_over() {
            break;
        }
    }
    assert!(encounter.round() >= 1);
    assert!(encounter.player().is_alive() || encounter.is_over());
}

#[test]
fn busy_exploration_never_stacks_occupants() {
    const ROAMERS: [CreatureKind; 8] = [
        CreatureKind::Wolf,
        CreatureKind::Goblin,
        CreatureKind::GoblinArcher,
        CreatureKind::Bandit,
        CreatureKind::Slime,
        CreatureKind::Rabbit,
        CreatureKind::Rat,
        CreatureKind::Bear,
    ];

    for seed in 0..24 {
        let catalog = Arc::new(builtin::catalog().expect("catalog"));
        let player = Player::new("hero", Position::new(6, 6), CreatureRng::new(seed)).with_health(500);
        let config = AiConfig::default().with_patrol_chance(1.0);
        let mut encounter = Encounter::new(catalog, config, GridMap::open(12, 12), player, seed);
        let mut dice = CreatureRng::new(seed ^ 0xfeed);

        let mut placed = 0;
        while placed < 14 {
            let kind = *ROAMERS.choose(&mut dice).expect("kinds");
            let tile = Position::new(dice.gen_range(0..12), dice.gen_range(0..12));
            if encounter.spawn(kind, tile).is_ok() {
                placed += 1;
            }
        }
        assert_no_shared_tiles(&encounter);

        for step in 0..600 {
            let (dx, dy) = *DIRECTIONS8.choose(&mut dice).expect("directions");
            let to = encounter.player().position.offset(dx, dy);
            encounter.move_player(to);

            if step % 40 == 0 {
                let index = dice.gen_range(0..placed);
                if let Ok(creature) = encounter.creature_mut(index) {
                    creature.provoke();
                }
            }

            encounter.explore(0.3);
            assert_no_shared_tiles(&encounter);
        }
    }
}

#[test]
fn charge_knocks_the_player_back_during_the_round() {
    let charger = CreatureTemplate::builder("Bear")
        .combat(60, 6, 1.0)
        .abilities(Some(AbilityKind::Charge), None)
        .ability_timing(2, 1.0)
        .points(1, 3)
        .build();
    let catalog = builtin::catalog()
        .expect("catalog")
        .with_archetype(CreatureKind::Bear, charger);
    let player = Player::new("hero", Position::new(8, 8), CreatureRng::new(6))
        .with_health(500)
        .with_evasion(0.0);
    let mut encounter = Encounter::new(
        Arc::new(catalog),
        AiConfig::default(),
        GridMap::open(16, 16),
        player,
        6,
    );
    let bear = encounter
        .spawn(CreatureKind::Bear, Position::new(7, 8))
        .expect("bear");
    encounter.engage(2);

    let mut pushed = None;
    for _ in 0..10 {
        let summary = encounter.run_round();
        pushed = summary.events.iter().find_map(|event| match event {
            EncounterEvent::PlayerKnockedBack { from, to, .. } => Some((*from, *to)),
            _ => None,
        });
        if pushed.is_some() {
            break;
        }
    }

    let (from, to) = pushed.expect("a charge lands within ten rounds");
    assert_eq!(encounter.player().position, to);
    assert!((1..=2).contains(&from.chebyshev(to)));
    let bear_tile = encounter.creatures()[bear].tile();
    assert!(to.chebyshev(bear_tile) > from.chebyshev(bear_tile));
    assert_no_shared_tiles(&encounter);
}
