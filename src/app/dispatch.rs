use crate::app::session::run_verify;
use crate::app::status::render_status;
use crate::catalog::SkillCategory;
use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::ui::style;
use anyhow::Result;
use strum::IntoEnumIterator;

pub fn render_skills() -> String {
    let mut lines = Vec::new();
    for category in SkillCategory::iter() {
        lines.push(style::header(category.heading()));
        for skill in category.skills() {
            lines.push(format!("  {} {skill}", style::accent("›")));
        }
        lines.push(String::new());
    }
    lines.join("\n").trim_end().to_string()
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Verify { link, skills } => run_verify(&config, link, skills).await,
        Commands::Skills => {
            println!("{}", render_skills());
            Ok(())
        }
        Commands::Status => {
            println!("{}", render_status(&config));
            Ok(())
        }
    }
}
