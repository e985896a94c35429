use clap::Parser;
use log::error;

use mb8611::core::{
    cli::{Cli, Command},
    configuration::{get_configuration, Configuration},
    core as commands, logger,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let conf = match &cli.configuration_file {
        Some(f) => match get_configuration(f.to_owned()).await {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        },
        None => Configuration::default(),
    };

    let conf = conf.merge(
        cli.host.to_owned(),
        cli.username.to_owned(),
        cli.password.to_owned(),
    );

    let _logger = match logger::init(&conf.log, cli.debug) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("unable to start logging: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&cli.command, &conf).await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run(
    command: &Command,
    conf: &Configuration,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let (client, authenticator) = commands::connect(conf)?;

    match command {
        Command::Call {
            action,
            payload,
            no_check,
        } => {
            let res = commands::call(
                client,
                &authenticator,
                action,
                payload.as_deref(),
                !no_check,
            )
            .await?;
            println!("{}", commands::render(&res)?);
        }
        Command::Batch { actions } => {
            let res = commands::batch(client, &authenticator, actions).await?;
            println!("{}", commands::render(&res)?);
        }
        Command::ClearLog => commands::clear_log(client, &authenticator).await?,
        Command::Reboot => commands::reboot(client, &authenticator).await?,
        Command::LoginCheck => commands::login_check(client, &authenticator).await?,
    }

    Ok(())
}
