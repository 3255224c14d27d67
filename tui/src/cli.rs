//! Running without the TUI.

use crate::args::Args;
use log::info;
use rlifesim_lib::World;
use std::{error::Error, fs, path::Path};

/// Statistics of the world, in one line.
pub(crate) fn stats(world: &World) -> String {
    format!(
        "Gen: {}  Cells: {}  Born: {}  Died: {}  Rule: {}",
        world.generation(),
        world.population(),
        world.births(),
        world.deaths(),
        world.rules()
    )
}

/// Prints the statistics and the pattern, and saves the world if asked to.
pub(crate) fn finish(args: &Args, world: &World) -> Result<(), Box<dyn Error>> {
    println!("{}", stats(world));
    if args.plaintext {
        print!("{}", world.plaintext());
    } else {
        print!("{}", world.rle());
    }
    if let Some(path) = &args.save {
        save(world, path)?;
    }
    Ok(())
}

/// Saves the current generation in JSON.
pub(crate) fn save(world: &World, path: &Path) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(&world.ser())?;
    fs::write(path, json)?;
    info!(
        "Saved generation {} to {}",
        world.generation(),
        path.display()
    );
    Ok(())
}

/// Runs the given number of generations and prints the result.
pub(crate) fn run(args: &Args, mut world: World) -> Result<(), Box<dyn Error>> {
    info!(
        "Running {} generations from {} cells, rule {}",
        args.generations,
        world.population(),
        world.rules()
    );
    world.run(args.generations);
    finish(args, &world)
}
