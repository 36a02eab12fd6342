//! # Blinker and the symmetries of the square
//!
//! Runs a blinker and a glider under Conway's Life, then builds the symmetry
//! group of the Moore neighbourhood from one quarter turn and one reflection.
//!
//! ```text
//! cargo run --example blinker
//! ```

use std::sync::Arc;

use ndlife_core::neighbourhood::moore;
use ndlife_core::{Automaton, CellPattern, CycleKey, Universe, UniverseError};

// ── Rendering ────────────────────────────────────────────────────────────────

fn render(cells: &CellPattern<2>) -> String {
    let Some((low, high)) = ndlife_core::cells::extent(cells.iter()) else {
        return String::from("(empty)\n");
    };
    let mut out = String::new();
    for y in low[1]..=high[1] {
        for x in low[0]..=high[0] {
            out.push(if cells.contains(&[x, y]) { '#' } else { '.' });
        }
        out.push('\n');
    }
    out
}

// ── Main ─────────────────────────────────────────────────────────────────────

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let universe = Arc::new(Universe::<2>::from_rulestring(moore::<2>(), "B3/S23")?);
    println!("rules {}, {} neighbours", universe.rule_spec(), universe.neighbourhood_population());

    let mut blinker: Automaton<&str, 2> = Automaton::new(Arc::clone(&universe));
    blinker.merge_cells([[0i64, 0], [1, 0], [2, 0]])?;
    for _ in 0..3 {
        println!("iteration {}:\n{}", blinker.iteration(), render(&blinker.generation()));
        blinker.step();
    }

    let mut glider: Automaton<&str, 2> = Automaton::new(Arc::clone(&universe));
    glider.merge_cells([[1i64, 0], [2, 1], [0, 2], [1, 2], [2, 2]])?;
    glider.steps(4);
    println!(
        "glider after {} iterations spans {:?}",
        glider.iteration(),
        glider.generation_extent()
    );

    let length = blinker.add_transform("rotate90", &[[0i64, -1], [1, 0]])?;
    println!("rotate90 cycles in {length} steps");
    let length = blinker.add_transform("horizontal", &[[-1i64, 0], [0, 1]])?;
    println!("horizontal cycles in {length} steps");
    let added = blinker.generate_combinations()?;
    println!("{added} composite transforms found");

    let transforms = blinker.transforms();
    let mut entries: Vec<_> = transforms.index_to_transform().iter().collect();
    entries.sort();
    for (index, matrix) in entries {
        let source = match index.cycle() {
            CycleKey::Named(name) => format!("{name} step {}", index.step()),
            CycleKey::Composite(path) => format!("composite of {} paths", path.len()),
            CycleKey::Identity => String::from("identity"),
        };
        println!("{:?}  {source}", matrix.rows());
    }

    match blinker.merge_cell(&[1, 2, 3]) {
        Err(UniverseError::DimensionMismatch { expected, actual }) => {
            println!("rejected a {actual}-coordinate address in a {expected}-D universe");
        }
        other => println!("unexpected merge result {other:?}"),
    }
    Ok(())
}
