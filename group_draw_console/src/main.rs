// Legend for various fix-this comments:
//   * "TODO" - bug or missing crucial feature.
//   * "Improvement potential" - missing nice-to-have feature or an opportunity
//       to make code better or faster.

#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod draw;

use anyhow::Context;
use clap::{Command, arg};


fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let matches = Command::new("Group draw")
        .version(clap::crate_version!())
        .about("Tournament group draw console app")
        .subcommand_required(true)
        .subcommand(
            Command::new("draw")
                .about("Draw a roster into groups and reveal the result")
                .arg(arg!(<roster_file> "Path to the roster file: yaml-serialized DrawSetup."))
                .arg(
                    arg!(--"seed" <seed> "Seed for a reproducible draw")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(arg!(--"no-diversity" "Ignore confederation caps")),
        )
        .subcommand(
            Command::new("stress-test")
                .about(concat!(
                    "Draw random feasible rosters and verify the result of every draw. ",
                    "Can be used for testing or benchmarking."
                ))
                .arg(
                    arg!(-'n' --"iterations" <n> "Number of batches, runs forever if omitted")
                        .value_parser(clap::value_parser!(u64).range(1..)),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("draw", sub_matches)) => draw::run(draw::DrawConfig {
            roster_file: sub_matches
                .get_one::<String>("roster_file")
                .context("Missing roster file")?
                .clone(),
            seed: sub_matches.get_one::<u64>("seed").copied(),
            no_diversity: sub_matches.get_flag("no-diversity"),
        }),
        Some(("stress-test", sub_matches)) => stress_test::run(stress_test::StressTestConfig {
            batches: sub_matches.get_one::<u64>("iterations").copied(),
        }),
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    }
}
