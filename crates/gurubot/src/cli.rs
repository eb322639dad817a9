use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "slackguru")]
#[command(author, version, about = "Chat bot scripts: Last.fm now-playing and coffee status", long_about = None)]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Chat with the scripts on the terminal (default)
    Shell {
        /// Name messages are sent as; switch with `/user <name>`
        #[arg(short, long, default_value = "shell")]
        user: String,
    },

    /// Send one message, print the replies and exit
    Say {
        /// Sender name
        #[arg(short, long)]
        user: String,

        /// Message text
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// List the commands the scripts respond to
    Scripts,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
