mod common;

use group_draw::test_util::{check_draw, confederation_counts, deterministic_rng};
use group_draw::{DrawRules, GroupLabel, RevealEvent, RevealQueue, UNSEEDED_POT, partition_by_pot};
use itertools::Itertools;
use pretty_assertions::assert_eq;

use common::load_roster;


#[test]
fn world_cup_2022() {
    let setup = load_roster("world_cup_2022.yaml");
    assert_eq!(setup.teams.len(), 32);
    setup.verify().unwrap();
    let pot_sizes = partition_by_pot(&setup.teams).values().map(Vec::len).collect_vec();
    assert_eq!(pot_sizes, vec![8, 8, 8, 8]);

    let mut rng = deterministic_rng();
    for _ in 0..200 {
        let draw = setup.draw(&mut rng).unwrap();
        check_draw(&setup.teams, &setup.rules, &draw).unwrap();
        assert!(draw.is_strict(), "{:?}", draw.relaxations);
        assert!(confederation_counts(&draw, "UEFA").iter().all(|&n| n <= 2));
        assert!(confederation_counts(&draw, "CONMEBOL").iter().all(|&n| n <= 1));
    }
}

#[test]
fn world_cup_48() {
    let setup = load_roster("world_cup_48.yaml");
    assert_eq!(setup.rules, DrawRules::world_cup_48());
    assert_eq!(setup.teams.len(), 48);
    setup.verify().unwrap();
    let pot_sizes = partition_by_pot(&setup.teams).values().map(Vec::len).collect_vec();
    assert_eq!(pot_sizes, vec![12, 12, 12, 12]);

    let mut rng = deterministic_rng();
    for _ in 0..100 {
        let draw = setup.draw(&mut rng).unwrap();
        check_draw(&setup.teams, &setup.rules, &draw).unwrap();
    }
}

#[test]
fn brasileiro() {
    let setup = load_roster("brasileiro.yaml");
    setup.verify().unwrap();
    assert_eq!(partition_by_pot(&setup.teams).keys().copied().collect_vec(), vec![UNSEEDED_POT]);

    let mut rng = deterministic_rng();
    for _ in 0..100 {
        let draw = setup.draw(&mut rng).unwrap();
        check_draw(&setup.teams, &setup.rules, &draw).unwrap();
    }
}

#[test]
fn libertadores() {
    let setup = load_roster("libertadores.yaml");
    setup.verify().unwrap();
    assert_eq!(partition_by_pot(&setup.teams).keys().copied().collect_vec(), vec![UNSEEDED_POT]);

    let mut rng = deterministic_rng();
    for _ in 0..200 {
        let draw = setup.draw(&mut rng).unwrap();
        check_draw(&setup.teams, &setup.rules, &draw).unwrap();
    }
}

#[test]
fn school_tournament_relaxes_caps() {
    let setup = load_roster("school.yaml");
    let mut rng = deterministic_rng();
    let draw = setup.draw(&mut rng).unwrap();
    check_draw(&setup.teams, &setup.rules, &draw).unwrap();
    assert_eq!(draw.relaxations.len(), 6);
    assert_eq!(confederation_counts(&draw, "School"), vec![4, 4]);

    let mut events = RevealQueue::new(&draw.assignment).collect_vec();
    assert_eq!(events.pop(), Some(RevealEvent::Complete));
    assert_eq!(events.len(), 8);
    // No pots: revealed group by group.
    let groups = events
        .iter()
        .map(|event| match event {
            RevealEvent::Reveal(item) => item.group,
            RevealEvent::Complete => panic!("Completion before the last item"),
        })
        .collect_vec();
    assert_eq!(groups, [[GroupLabel::A; 4], [GroupLabel::B; 4]].concat());
}
