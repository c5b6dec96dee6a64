//! Lions and tigers and bears.
//!
//! We have been to a zoo and seen three lions, two tigers, and one bear. The
//! zoo might also have cheetahs, rhinos, and elephants that we did not see.
//! How many species are there, and what is the chance that the next animal is
//! one we have not seen yet?
//!
//! Run with `cargo run --example lions_tigers_bears [draws] [seed]`.
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use std::env;
use zoo::prelude::*;

const UNIVERSE: [char; 6] = ['L', 'T', 'B', 'C', 'R', 'E'];
const OBSERVED: [char; 3] = ['L', 'T', 'B'];
const COUNTS: [f64; 3] = [3.0, 2.0, 1.0];

fn parse_arg<T: std::str::FromStr>(ix: usize, default: T) -> T {
    env::args()
        .nth(ix)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let draws: usize = parse_arg(1, 1_000);
    let seed: u64 = parse_arg(2, 0x5EED);
    let mut rng = Xoshiro256Plus::seed_from_u64(seed);

    let mut suite = species_suite(&UNIVERSE, &OBSERVED, 1.0)?;

    println!("Prior");
    for (sp, p) in suite.items() {
        println!("  {}\t{:.4}", sp.hypothesis(), p);
    }

    let z = suite.update_all(&COUNTS, &MonteCarlo::new(draws), &mut rng)?;
    println!("\nProbability of the data: {:.6}", z);

    println!("\nPosterior");
    for (sp, p) in suite.items() {
        println!("  {}\t{:.4}", sp, p);
    }

    let n_species = suite.posterior_over(|sp| sp.size());
    println!("\nNumber of species");
    print!("{}", n_species);
    println!("mean: {:.3}", n_species.expectation(|&n| n as f64));

    println!("\nNext animal");
    for label in UNIVERSE.iter() {
        println!("  {}\t{:.4}", label, prob_of_species(&suite, label));
    }
    println!("  unseen\t{:.4}", prob_of_unseen(&suite, &OBSERVED));

    Ok(())
}
