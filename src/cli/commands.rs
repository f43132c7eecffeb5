use clap::{Parser, Subcommand};

/// `Skillproof` - guided design-skill verification with an AI verifier.
#[derive(Parser, Debug)]
#[command(name = "skillproof")]
#[command(version)]
#[command(about = "Verify claimed design skillsets against a Figma file.", long_about = None)]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run a verification session: file link, skillsets, then chat
    Verify {
        /// Figma file link (skips the link prompt)
        #[arg(short, long)]
        link: Option<String>,

        /// Skillset to claim; repeat for several (skips the selection prompt)
        #[arg(short, long = "skill", value_name = "NAME")]
        skills: Vec<String>,
    },

    /// List the selectable skillsets by category
    Skills,

    /// Show the resolved configuration
    Status,
}
