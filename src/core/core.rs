use log::{info, warn};
use serde_json::Value;

use crate::api::{table::decode_tables, Action, ClearLog, Reboot};

use super::{authenticator::Authenticator, client::Client, configuration::Configuration};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[cfg(test)]
mod tests;

/// ### Connect
/// Builds the client and the authenticator described by the configuration
/// ## Arguments
/// * `conf` - The configuration object, command line overrides applied
/// ## Errors
/// * `ConfigurationError` - If no password source is configured
pub fn connect(conf: &Configuration) -> Result<(Client, Authenticator), BoxError> {
    let client = Client::new(&conf.host(), conf.timeout())?;
    let authenticator = Authenticator::new(conf.username(), conf.password_provider()?);

    info!("using modem at {}", conf.host());

    Ok((client, authenticator))
}

/// ### Call
/// Invokes one action inside a login/logout scope
/// ## Arguments
/// * `client` - A client that is not logged in yet
/// * `authenticator` - The login credentials
/// * `action` - The HNAP action name
/// * `payload` - Optional JSON body, sent as is
/// * `check` - Whether a result other than `OK` is an error
/// ## Returns
/// * The response with its tables decoded
pub async fn call(
    client: Client,
    authenticator: &Authenticator,
    action: &str,
    payload: Option<&str>,
    check: bool,
) -> Result<Value, BoxError> {
    let action = Action::from(action);
    let payload: Option<Value> = match payload {
        Some(p) => Some(serde_json::from_str(p)?),
        None => None,
    };

    let mut res = client
        .scoped(authenticator, |client| {
            Box::pin(async move { client.call_hnap(&action, payload.as_ref(), check).await })
        })
        .await?;

    decode_tables(&mut res);

    Ok(res)
}

/// ### Batch
/// Invokes several actions in a single `GetMultipleHNAPs` round trip
pub async fn batch(
    client: Client,
    authenticator: &Authenticator,
    actions: &[String],
) -> Result<Value, BoxError> {
    let actions: Vec<Action> = actions.iter().map(|a| Action::from(a.as_str())).collect();

    let mut res = client
        .scoped(authenticator, |client| {
            Box::pin(async move { client.call_multiple_hnaps(&actions, true).await })
        })
        .await?;

    decode_tables(&mut res);

    Ok(res)
}

pub async fn clear_log(client: Client, authenticator: &Authenticator) -> Result<(), BoxError> {
    client
        .scoped(authenticator, |client| {
            Box::pin(async move { client.call(&ClearLog::default()).await })
        })
        .await?;

    info!("event log cleared");

    Ok(())
}

/// ### Reboot
/// Restarts the modem
/// ## Notes
/// * The modem drops its sessions while restarting, a failed logout is
///   only reported as a warning
/// * The session is closed before returning, even when the request fails
pub async fn reboot(client: Client, authenticator: &Authenticator) -> Result<(), BoxError> {
    let mut session = client.open(authenticator).await?;

    let requested = session.call(&Reboot::default()).await;

    if let Err(e) = requested {
        if let Err(close) = session.close().await {
            warn!("logout failed: {close}");
        }
        return Err(e);
    }
    info!("reboot requested");

    if let Err(e) = session.close().await {
        warn!("logout after reboot failed: {e}");
    }

    Ok(())
}

pub async fn login_check(client: Client, authenticator: &Authenticator) -> Result<(), BoxError> {
    client
        .scoped(authenticator, |_| Box::pin(async { Ok(()) }))
        .await?;

    info!("credentials accepted");

    Ok(())
}

pub fn render(value: &Value) -> Result<String, BoxError> {
    Ok(serde_json::to_string_pretty(value)?)
}
