use clap::{arg, command, Parser, Subcommand};

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
    #[arg(short, long)]
    pub configuration_file: Option<String>,
    /// enable debug level logging
    #[arg(short, long)]
    pub debug: bool,
    /// modem address, defaults to 192.168.100.1
    #[arg(long)]
    pub host: Option<String>,
    #[arg(short, long)]
    pub username: Option<String>,
    #[arg(short, long)]
    pub password: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// invokes one HNAP action and prints the response
    Call {
        /// HNAP action name, e.g. GetMotoStatusSoftware
        action: String,
        /// JSON body sent as is
        #[arg(long)]
        payload: Option<String>,
        /// do not fail when the result is not OK
        #[arg(long)]
        no_check: bool,
    },
    /// invokes several actions in one GetMultipleHNAPs call
    Batch {
        #[arg(required = true)]
        actions: Vec<String>,
    },
    /// clears the modem event log
    ClearLog,
    /// restarts the modem
    Reboot,
    /// logs in and out to validate the credentials
    LoginCheck,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command};

    #[test]
    fn parse_call_with_overrides() {
        let cli = Cli::parse_from([
            "mb8611",
            "--host",
            "10.0.0.1",
            "-p",
            "secret",
            "call",
            "GetMotoStatusSoftware",
            "--no-check",
        ]);

        assert_eq!(Some("10.0.0.1".to_string()), cli.host);
        assert_eq!(Some("secret".to_string()), cli.password);
        match cli.command {
            Command::Call {
                action,
                payload,
                no_check,
            } => {
                assert_eq!("GetMotoStatusSoftware", action);
                assert!(payload.is_none());
                assert!(no_check);
            }
            _ => panic!("unexpected command"),
        }
    }

    #[test]
    fn batch_needs_actions() {
        assert!(Cli::try_parse_from(["mb8611", "batch"]).is_err());

        let cli = Cli::try_parse_from(["mb8611", "-d", "batch", "GetHomeAddress", "GetMotoStatusLog"])
            .unwrap();
        assert!(cli.debug);
        match cli.command {
            Command::Batch { actions } => assert_eq!(2, actions.len()),
            _ => panic!("unexpected command"),
        }
    }
}
