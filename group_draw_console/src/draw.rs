use std::fmt::Write;

use anyhow::Context;
use group_draw::{Assignment, Draw, DrawSetup, RevealQueue};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;


pub struct DrawConfig {
    pub roster_file: String,
    pub seed: Option<u64>,
    pub no_diversity: bool,
}

fn read_roster_file(filename: &str) -> anyhow::Result<DrawSetup> {
    let contents = std::fs::read_to_string(filename)
        .with_context(|| format!("Failed to read roster file '{filename}'."))?;
    serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse roster file '{filename}'."))
}

// Plain text table of the final groups, one block per group:
//
//   Group A
//     1. Qatar (QAT)
//     2. ...
pub fn export_text(assignment: &Assignment) -> String {
    let mut out = String::new();
    for (idx, group) in assignment.groups().iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        // Writing into a `String` cannot fail.
        _ = writeln!(out, "Group {}", group.label);
        for (pos, team) in group.teams.iter().enumerate() {
            _ = writeln!(out, "  {}. {} ({})", pos + 1, team.name, team.short_name);
        }
    }
    out
}

fn print_reveal(draw: &Draw) {
    RevealQueue::new(&draw.assignment).run(
        |item| {
            let pot = match item.team.pot {
                Some(pot) => format!("Pot {pot}"),
                None => "Unseeded".to_owned(),
            };
            println!("{pot}: {} -> Group {}", item.team.name, item.group);
        },
        || println!("Draw complete!"),
    );
}

fn print_relaxations(draw: &Draw) {
    if draw.is_strict() {
        return;
    }
    println!();
    println!("Confederation caps could not be honored for {} team(s):", draw.relaxations.len());
    for r in &draw.relaxations {
        println!("  {} ({}) in group {}", r.team_id, r.confederation, r.group);
    }
}

pub fn run(config: DrawConfig) -> anyhow::Result<()> {
    let mut setup = read_roster_file(&config.roster_file)?;
    if config.no_diversity {
        setup.rules.enforce_diversity_rule = false;
    }
    setup.verify().with_context(|| format!("Cannot draw '{}'.", setup.name))?;
    info!("Drawing '{}': {} teams", setup.name, setup.teams.len());

    let draw = match config.seed {
        Some(seed) => setup.draw(&mut StdRng::seed_from_u64(seed)),
        None => setup.draw(&mut rand::rng()),
    }
    .with_context(|| format!("Draw of '{}' failed.", setup.name))?;

    print_reveal(&draw);
    print_relaxations(&draw);
    println!();
    print!("{}", export_text(&draw.assignment));
    Ok(())
}
