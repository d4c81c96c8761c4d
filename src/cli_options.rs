/*
cli_options.rs

Copyright 2025 Hervé Quatremain

This file is part of X-Ray.

X-Ray is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

X-Ray is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
X-Ray. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Process command-line options.
//!
//! These options are intended for developers and manual writers. For each seed, the command
//! generates the ruleset of the selected module, and can print it, play a random instance
//! against it, or save it in JSON format.
//!
//! # Examples
//!
//! Print the Not X-Ray tables and mazes of the default manual:
//!
//! ```
//! $ xray --seed 1 --print
//! ```
//!
//! Generate the X-Ray rulesets for seeds 100 to 199, save them in the `rules` directory, and
//! display statistics:
//!
//! ```
//! $ xray --module xray --seed 100 --count 100 --output rules --summary
//! ```

use clap::{Parser, ValueEnum};
use log::debug;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use xray::draw;
use xray::game::cell_name;
use xray::game::not_xray::NotXRayPuzzle;
use xray::game::xray::XRayPuzzle;
use xray::generator::cache::RuleCache;
use xray::generator::config::GeneratorConfig;
use xray::generator::not_xray_rules::{NotXRayGenerator, NotXRayRules};
use xray::generator::xray_rules::{DIRECTION_NAMES, XRayRules};
use xray::saver::rules::SaverRules;

const COPYRIGHT_NOTICE: &str = "Copyright 2025 Hervé Quatremain
License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>.
This is free software: you are free to change and redistribute it.
There is NO WARRANTY, to the extent permitted by law.";

/// Module to generate the rules for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Module {
    /// Tables of symbols and mazes
    NotXray,

    /// Lookup tables
    Xray,
}

/// Generate X-Ray and Not X-Ray rules from rule seeds.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// First rule seed
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    seed: i32,

    /// Number of consecutive seeds to generate rules for
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Module to generate the rules for
    #[arg(value_enum, short, long, default_value_t = Module::NotXray)]
    module: Module,

    /// Print the generated rules
    #[arg(short, long, default_value_t = false)]
    print: bool,

    /// Start a random puzzle instance for each ruleset and print its state
    #[arg(short, long, default_value_t = false)]
    instance: bool,

    /// Print some statistics after generating the rules
    #[arg(short = 'S', long, default_value_t = false)]
    summary: bool,

    /// Directory where to save the rules in JSON format
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Generation statistics.
#[derive(Default)]
struct Stats {
    total: f32,
    max: f32,
    attempts: usize,
    backtracks: usize,
    errors: usize,
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}

fn print_not_xray_instance(rules: Arc<NotXRayRules>) -> bool {
    let puzzle: NotXRayPuzzle = match NotXRayPuzzle::new(rules) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {e}");
            return false;
        }
    };
    let buttons: Vec<String> = puzzle.directions().iter().map(|d| d.to_string()).collect();
    println!(
        "Table #{}: start {}, goal {} ({}), buttons 1-4 go {}",
        puzzle.table() + 1,
        cell_name(puzzle.current_cell()),
        cell_name(puzzle.solution_cell()),
        puzzle.scanner_color(),
        buttons.join(", ")
    );
    println!("Scan: {}", puzzle.display());
    true
}

fn print_xray_instance(rules: Arc<XRayRules>) -> bool {
    let puzzle: XRayPuzzle = match XRayPuzzle::new(rules) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {e}");
            return false;
        }
    };
    println!(
        "Column {}, row {}, {}: press {}",
        puzzle.column() + 1,
        puzzle.row() + 1,
        DIRECTION_NAMES[puzzle.direction()],
        puzzle.solution() + 1
    );
    println!("Scan: {}", puzzle.display());
    true
}

/// Parse and process command-line options.
///
/// Return the exit code of the command.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let saver: Option<SaverRules> = match &args.output {
        Some(dir) => {
            if let Err(e) = fs::create_dir_all(dir) {
                eprintln!("Cannot create {dir:?}: {e}");
                return 1;
            }
            Some(SaverRules::new(dir.clone()))
        }
        None => None,
    };

    let mut generator: NotXRayGenerator = match NotXRayGenerator::new(GeneratorConfig::default())
    {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };
    let not_xray_cache: RuleCache<NotXRayRules> =
        match RuleCache::with_config(generator.config().clone()) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error: {e}");
                return 1;
            }
        };
    let xray_cache: RuleCache<XRayRules> = RuleCache::new();
    let mut stats: Stats = Stats::default();

    for i in 0..args.count {
        let Some(seed) = i32::try_from(i).ok().and_then(|i| args.seed.checked_add(i)) else {
            eprintln!("Seed out of range after {i} rulesets");
            return 1;
        };
        debug!("Iteration {i}: seed {seed}");

        match args.module {
            Module::NotXray => {
                let rules: Arc<NotXRayRules> =
                    match not_xray_cache.get_or_try_build(seed, || generator.generate(seed)) {
                        Ok(r) => r,
                        Err(e) => {
                            eprintln!("Error: seed {seed}: {e}");
                            return 1;
                        }
                    };
                stats.total += generator.duration;
                stats.max = stats.max.max(generator.duration);
                stats.attempts += generator.attempts;
                stats.backtracks += generator.backtracks;

                if args.print {
                    println!("Seed {seed}");
                    print_lines(draw::not_xray(&rules));
                }
                if args.instance && !print_not_xray_instance(Arc::clone(&rules)) {
                    stats.errors += 1;
                }
                if let Some(s) = &saver
                    && let Err(e) = s.save_not_xray(&rules)
                {
                    eprintln!("Cannot save the rules for seed {seed}: {e}");
                    stats.errors += 1;
                }
            }
            Module::Xray => {
                let start: Instant = Instant::now();
                let rules: Arc<XRayRules> = match xray_cache.xray(seed) {
                    Ok(r) => r,
                    Err(e) => {
                        eprintln!("Error: seed {seed}: {e}");
                        return 1;
                    }
                };
                let duration: f32 = start.elapsed().as_secs_f32();
                stats.total += duration;
                stats.max = stats.max.max(duration);

                if args.print {
                    println!("Seed {seed}");
                    print_lines(draw::xray(&rules));
                }
                if args.instance && !print_xray_instance(Arc::clone(&rules)) {
                    stats.errors += 1;
                }
                if let Some(s) = &saver
                    && let Err(e) = s.save_xray(&rules)
                {
                    eprintln!("Cannot save the rules for seed {seed}: {e}");
                    stats.errors += 1;
                }
            }
        }
    }

    // Print some stats
    if args.summary && args.count > 0 {
        println!(
            "
        total time = {}s
      average time = {}s
          max time = {}s
  average attempts = {}
average backtracks = {}
            errors = {}",
            stats.total,
            stats.total / args.count as f32,
            stats.max,
            stats.attempts / args.count,
            stats.backtracks / args.count,
            stats.errors
        );
    }
    if stats.errors > 0 { 1 } else { 0 }
}
