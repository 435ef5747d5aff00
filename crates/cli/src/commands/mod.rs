pub mod resources;

use anyhow::Result;
use backoffice_core::ResourceKind;
use clap::Subcommand;

use crate::app::Action;
use crate::components::SignInForm;
use crate::routes::Route;
use resources::ResourceCommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Blog posts
    Blogs {
        #[command(subcommand)]
        command: ResourceCommand,
    },

    /// Blog categories
    Categories {
        #[command(subcommand)]
        command: ResourceCommand,
    },

    /// Tags
    Tags {
        #[command(subcommand)]
        command: ResourceCommand,
    },

    /// Reader comments
    Commentaries {
        #[command(subcommand)]
        command: ResourceCommand,
    },

    /// Blog authors
    Bloggers {
        #[command(subcommand)]
        command: ResourceCommand,
    },

    /// Job applications
    Applications {
        #[command(subcommand)]
        command: ResourceCommand,
    },

    /// Staff accounts
    Users {
        #[command(subcommand)]
        command: ResourceCommand,
    },

    /// Open a page by route, e.g. `/applications?page=1&size=5`
    Open {
        #[arg(default_value = "/")]
        route: String,
    },

    /// Sign in and print the session token
    SignIn {
        #[arg(long, env = "BACKOFFICE_EMAIL")]
        email: String,

        #[arg(long, env = "BACKOFFICE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// End the current session
    SignOut,

    /// Show the signed-in user's profile
    Profile,

    /// Edit the signed-in user's account
    Settings,
}

impl Commands {
    pub fn into_action(self) -> Result<Action> {
        let (kind, command) = match self {
            Commands::Open { route } => return Ok(Action::Open(Route::parse(&route))),
            Commands::SignIn { email, password } => {
                return Ok(Action::SignIn(SignInForm::new(email, password)))
            }
            Commands::SignOut => return Ok(Action::SignOut),
            Commands::Profile => return Ok(Action::Profile),
            Commands::Settings => return Ok(Action::Settings),
            Commands::Blogs { command } => (ResourceKind::Blogs, command),
            Commands::Categories { command } => (ResourceKind::BlogCategories, command),
            Commands::Tags { command } => (ResourceKind::Tags, command),
            Commands::Commentaries { command } => (ResourceKind::Commentaries, command),
            Commands::Bloggers { command } => (ResourceKind::Bloggers, command),
            Commands::Applications { command } => (ResourceKind::JobApplications, command),
            Commands::Users { command } => (ResourceKind::Users, command),
        };
        command.into_action(kind)
    }
}
