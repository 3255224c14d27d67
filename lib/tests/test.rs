use rlifesim_lib::{CellKey, Config, Coord, Error, Pattern, Preset, Rules, World};
use std::{collections::HashSet, error::Error as StdError};

fn world_with(coords: &[Coord]) -> World {
    let mut world = World::new();
    world.insert_pattern_at(coords, 0, 0);
    world
}

fn coords(world: &World) -> Vec<Coord> {
    world.pattern().to_vec()
}

#[test]
fn block_is_still() {
    let block = [(0, 0), (1, 0), (0, 1), (1, 1)];
    let mut world = world_with(&block);
    for _ in 0..5 {
        world.step();
        assert_eq!(coords(&world), block.to_vec());
    }
    assert_eq!(world.generation(), 5);
    assert_eq!(world.births(), 0);
    assert_eq!(world.deaths(), 0);
}

#[test]
fn blinker_oscillates() {
    let mut world = world_with(&[(-1, 0), (0, 0), (1, 0)]);
    let born = world.step().to_vec();
    assert_eq!(born, vec![(0, -1), (0, 1)]);
    assert_eq!(coords(&world), vec![(0, -1), (0, 0), (0, 1)]);
    world.step();
    assert_eq!(coords(&world), vec![(-1, 0), (0, 0), (1, 0)]);
    assert_eq!(world.births(), 4);
    assert_eq!(world.deaths(), 4);
    assert_eq!(world.age(0, 0), Some(2));
    assert_eq!(world.age(1, 0), Some(1));
}

#[test]
fn glider_moves() -> Result<(), Box<dyn StdError>> {
    let mut world = World::new();
    world.load_from_text("x = 3, y = 3, rule = B3/S23\nbo$2bo$3o!")?;
    let before: HashSet<Coord> = world.live_coords().collect();
    world.run(4);
    let after: HashSet<Coord> = world.live_coords().collect();
    let moved: HashSet<Coord> = before.iter().map(|&(x, y)| (x + 1, y + 1)).collect();
    assert_eq!(after, moved);
    assert_eq!(world.generation(), 4);
    Ok(())
}

#[test]
fn deterministic() {
    let mut world = World::new();
    world.insert_pattern_at(&Preset::RPentomino.pattern(), 0, 0);
    let mut copy = world.clone();
    world.run(50);
    copy.run(50);
    assert_eq!(world.pattern(), copy.pattern());
    assert_eq!(world.ages(), copy.ages());
    assert_eq!(world.births(), copy.births());
    assert_eq!(world.deaths(), copy.deaths());
}

#[test]
fn births_and_deaths_are_set_differences() {
    let mut world = World::new();
    world.insert_pattern_at(&Preset::Acorn.pattern(), 0, 0);
    for _ in 0..30 {
        let before = world.cells().clone();
        let (births, deaths) = (world.births(), world.deaths());
        let born: HashSet<CellKey> = world
            .step()
            .iter()
            .map(|&coord| CellKey::from(coord))
            .collect();
        let after = world.cells();
        let expected_born: HashSet<CellKey> = after.difference(&before).copied().collect();
        assert_eq!(born, expected_born);
        assert_eq!(world.births() - births, expected_born.len() as u64);
        assert_eq!(
            world.deaths() - deaths,
            before.difference(after).count() as u64
        );
    }
}

#[test]
fn ages_follow_cells() {
    let mut world = World::new();
    world.insert_pattern_at(&Preset::Pulsar.pattern(), 0, 0);
    world.insert_pattern_at(&Preset::Block.pattern(), 40, 0);
    for k in 1..=6 {
        world.step();
        let keys: HashSet<CellKey> = world.ages().keys().copied().collect();
        assert_eq!(&keys, world.cells());
        assert_eq!(world.age(40, 0), Some(k));
        assert!(world.ages().values().all(|&age| age >= 1 && age <= k));
    }
}

#[test]
fn decodes_simple_rle() -> Result<(), Box<dyn StdError>> {
    let pattern = Pattern::from_rle("x = 3, y = 1\nbob$!")?;
    assert_eq!(pattern.cells(), &[(0, 0)]);
    let pattern: Pattern = "#C comment\nx = 3, y = 1, rule = B3/S23\n3o!".parse()?;
    assert_eq!(pattern.cells(), &[(-1, 0), (0, 0), (1, 0)]);
    Ok(())
}

#[test]
fn bad_text_leaves_world_unchanged() {
    let mut world = world_with(&[(0, 0), (1, 0), (2, 0)]);
    world.step();
    let before = world.pattern();
    assert_eq!(world.load_from_text("3o$3o!"), Err(Error::FormatError));
    assert_eq!(world.pattern(), before);
    assert_eq!(world.generation(), 1);
}

#[test]
fn load_replaces() -> Result<(), Box<dyn StdError>> {
    let mut world = world_with(&[(100, 100)]);
    world.step();
    world.load_from_text("x = 2, y = 2\n2o$2o!")?;
    assert_eq!(coords(&world), vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    assert_eq!(world.generation(), 0);
    assert_eq!(world.deaths(), 0);
    Ok(())
}

#[test]
fn toggle_twice() {
    let mut world = world_with(&[(0, 0), (1, 0), (2, 0)]);
    world.step();
    let cells = world.cells().clone();
    let ages = world.ages().clone();
    world.toggle_cell(5, 5);
    assert!(world.is_alive(5, 5));
    assert_eq!(world.age(5, 5), Some(1));
    world.toggle_cell(5, 5);
    assert_eq!(world.cells(), &cells);
    assert_eq!(world.ages(), &ages);
    assert!(world.newborn().is_empty());
}

#[test]
fn insert_is_idempotent() {
    let glider = Preset::Glider.pattern();
    let mut world = World::new();
    world.insert_pattern_at(&glider, 3, -7);
    let once = world.pattern();
    world.insert_pattern_at(&glider, 3, -7);
    assert_eq!(world.pattern(), once);
    assert_eq!(world.population(), 5);
}

#[test]
fn insert_wraps_around() {
    let mut world = World::new();
    world.insert_pattern_at(&[(0, 0), (1, 0)], 32767, 0);
    assert!(world.is_alive(32767, 0));
    assert!(world.is_alive(-32768, 0));
}

#[test]
fn clear_resets() {
    let mut world = World::with_rules(Rules::highlife());
    world.insert_pattern_at(&Preset::RPentomino.pattern(), 0, 0);
    world.run(10);
    world.clear();
    assert_eq!(world.population(), 0);
    assert_eq!(world.generation(), 0);
    assert_eq!(world.births(), 0);
    assert_eq!(world.deaths(), 0);
    assert!(world.ages().is_empty());
    assert!(world.newborn().is_empty());
    assert_eq!(world.rules(), &Rules::highlife());
}

#[test]
fn rules_take_effect_on_next_step() {
    let mut world = world_with(&[(0, 0)]);
    world.set_rules_from([0], []);
    assert!(world.is_alive(0, 0));
    world.step();
    assert!(world.is_alive(0, 0));
    world.set_rules(Rules::conway());
    world.step();
    assert_eq!(world.population(), 0);
}

#[test]
fn seeds_rule() -> Result<(), Box<dyn StdError>> {
    let mut world = World::with_rules("B2/S".parse()?);
    world.insert_pattern_at(&[(0, 0), (1, 0)], 0, 0);
    world.step();
    assert_eq!(coords(&world), vec![(0, -1), (1, -1), (0, 1), (1, 1)]);
    assert_eq!(world.deaths(), 2);
    Ok(())
}

#[test]
fn snapshot_is_frozen() {
    let mut world = world_with(&[(-1, 0), (0, 0), (1, 0)]);
    let snapshot = world.snapshot();
    world.step();
    world.toggle_cell(10, 10);
    world.clear();
    assert_eq!(snapshot.generation, 0);
    assert_eq!(snapshot.cells.len(), 3);
    assert!(snapshot.cells.contains(&CellKey::new(-1, 0)));
    assert!(snapshot.ages.is_empty());
}

#[test]
fn rle_round_trip() -> Result<(), Box<dyn StdError>> {
    let mut world = World::new();
    world.insert_pattern_at(&Preset::GosperGliderGun.pattern(), 0, 0);
    world.run(30);
    let mut copy = World::new();
    copy.load_from_text(&world.rle())?;

    let original = coords(&world);
    let reloaded = coords(&copy);
    assert_eq!(reloaded.len(), original.len());
    let (dx, dy) = (reloaded[0].0 - original[0].0, reloaded[0].1 - original[0].1);
    let shifted: Vec<Coord> = original.iter().map(|&(x, y)| (x + dx, y + dy)).collect();
    assert_eq!(reloaded, shifted);
    Ok(())
}

#[test]
fn config_world() -> Result<(), Box<dyn StdError>> {
    let config = Config::new("B3/S23")
        .set_preset(Preset::Glider)
        .set_origin(10, 10);
    let mut world = config.world()?;
    assert_eq!(world.population(), 5);
    world.run(4);
    assert_eq!(world.population(), 5);
    assert!(world.live_coords().all(|(x, y)| x >= 10 && y >= 10));
    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn save_and_resume() -> Result<(), Box<dyn StdError>> {
    use rlifesim_lib::WorldSer;

    let mut world = World::with_rules(Rules::highlife());
    world.insert_pattern_at(&Preset::RPentomino.pattern(), 0, 0);
    world.run(20);
    world.insert_pattern_at(&[(50, 50)], 0, 0);

    let json = serde_json::to_string(&world.ser())?;
    let ser: WorldSer = serde_json::from_str(&json)?;
    let mut resumed = ser.world();
    assert_eq!(resumed.pattern(), world.pattern());
    assert_eq!(resumed.ages(), world.ages());
    assert_eq!(resumed.age(50, 50), None);
    assert_eq!(resumed.generation(), 20);
    assert_eq!(resumed.rules(), &Rules::highlife());

    world.run(10);
    resumed.run(10);
    assert_eq!(resumed.pattern(), world.pattern());
    assert_eq!(resumed.births(), world.births());
    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn config_from_json() -> Result<(), Box<dyn StdError>> {
    let config: Config =
        serde_json::from_str(r#"{"rule_string": "B36/S23", "preset": "r-pentomino"}"#)?;
    assert_eq!(config.speed, 10);
    assert_eq!(config.preset, Some(Preset::RPentomino));
    assert_eq!(config.world()?.population(), 5);
    Ok(())
}
