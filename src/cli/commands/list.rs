use crate::errors::AppResult;
use crate::programs::{directory, ProgramGroup};
use clap::{Args, ValueEnum};
use serde_json::json;

/// List known programs and their groupings
#[derive(Args)]
pub struct ListCommand {
    /// Print as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl ListCommand {
    pub fn run(&self) -> AppResult<()> {
        let programs: Vec<_> = directory()
            .names()
            .into_iter()
            .map(|name| (name, directory().identity(name)))
            .collect();

        if self.json {
            let groups: serde_json::Map<_, _> = ProgramGroup::value_variants()
                .iter()
                .filter_map(|group| {
                    let name = group.to_possible_value()?.get_name().to_string();
                    Some((name, json!(group.names())))
                })
                .collect();
            let programs: serde_json::Map<_, _> = programs
                .iter()
                .map(|(name, entry)| (name.to_string(), json!(entry)))
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({ "programs": programs, "groups": groups }))?
            );
            return Ok(());
        }

        println!("{:<20} {:<46} REPOSITORY", "PROGRAM", "PROGRAM ID");
        for (name, entry) in &programs {
            println!("{:<20} {:<46} {}", name, entry.id, entry.repository);
        }
        Ok(())
    }
}
