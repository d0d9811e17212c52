use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "katas", version, author, about = "Track how often and how recently you practice your katas")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start tracking the built-in katas
    Init {
        /// Add any missing built-in katas even if already initialized
        #[arg(long)]
        force: bool,
    },
    /// Mark a kata as done today
    Done {
        /// Kata name
        kata: String,
    },
    /// Track a new kata
    Add {
        /// Kata name
        name: String,
        /// Link to the exercise
        #[arg(default_value = "")]
        url: String,
    },
    /// Stop tracking a kata and forget its history
    Remove {
        /// Kata name
        name: String,
    },
    /// Show every kata with its history and mastery (default)
    List,
    /// Print all katas and their history as JSON
    Export,
    /// Show the config file location and effective settings
    Config {
        /// Write the effective settings to the config file if it does not exist yet
        #[arg(long)]
        write: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_list() {
        let cli = Cli::try_parse_from(["katas"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_done() {
        let cli = Cli::try_parse_from(["katas", "done", "bowling"]).unwrap();
        match cli.command {
            Some(Commands::Done { kata }) => assert_eq!(kata, "bowling"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn add_url_is_optional() {
        let cli = Cli::try_parse_from(["katas", "add", "tennis"]).unwrap();
        match cli.command {
            Some(Commands::Add { name, url }) => {
                assert_eq!(name, "tennis");
                assert_eq!(url, "");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn done_requires_a_name() {
        assert!(Cli::try_parse_from(["katas", "done"]).is_err());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
