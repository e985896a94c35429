use std::{fmt::Display, str::FromStr};

use serde::{de::DeserializeOwned, Serialize};

pub mod login;
pub mod multiple;
pub mod registry;
pub mod settings;
pub mod table;

pub use login::{LoginPayload, LoginResponse};
pub use multiple::{GetMultipleHNAPsResponse, MultipleHnaps};
pub use settings::{
    ClearLog, GetNetworkModeSettings, Reboot, SetMotoLagStatus, SetMotoStatusDSTargetFreq,
    SetStatusSecuritySettings,
};

/// Actions known by the MB8611 firmware.
///
/// Names the device answers to but that are not listed here are kept as
/// [`Action::Other`], so newer firmware actions can still be invoked.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    GetHomeAddress,
    GetHomeConnection,
    GetMotoLagStatus,
    GetMotoStatusConnectionInfo,
    GetMotoStatusDownstreamChannelInfo,
    GetMotoStatusLog,
    GetMotoStatusLogXXX,
    GetMotoStatusSecAccount,
    GetMotoStatusSecXXX,
    GetMotoStatusSoftware,
    GetMotoStatusStartupSequence,
    GetMotoStatusUpstreamChannelInfo,
    GetMotoStatusXXX,
    GetMultipleHNAPs,
    GetNetworkModeSettings,
    Login,
    Logout,
    SetMotoLagStatus,
    SetMotoStatusDSTargetFreq,
    SetStatusLogSettings,
    SetStatusSecuritySettings,
    Other(String),
}

const KNOWN_ACTIONS: [Action; 21] = [
    Action::GetHomeAddress,
    Action::GetHomeConnection,
    Action::GetMotoLagStatus,
    Action::GetMotoStatusConnectionInfo,
    Action::GetMotoStatusDownstreamChannelInfo,
    Action::GetMotoStatusLog,
    Action::GetMotoStatusLogXXX,
    Action::GetMotoStatusSecAccount,
    Action::GetMotoStatusSecXXX,
    Action::GetMotoStatusSoftware,
    Action::GetMotoStatusStartupSequence,
    Action::GetMotoStatusUpstreamChannelInfo,
    Action::GetMotoStatusXXX,
    Action::GetMultipleHNAPs,
    Action::GetNetworkModeSettings,
    Action::Login,
    Action::Logout,
    Action::SetMotoLagStatus,
    Action::SetMotoStatusDSTargetFreq,
    Action::SetStatusLogSettings,
    Action::SetStatusSecuritySettings,
];

impl Action {
    pub fn as_str(&self) -> &str {
        match self {
            Action::GetHomeAddress => "GetHomeAddress",
            Action::GetHomeConnection => "GetHomeConnection",
            Action::GetMotoLagStatus => "GetMotoLagStatus",
            Action::GetMotoStatusConnectionInfo => "GetMotoStatusConnectionInfo",
            Action::GetMotoStatusDownstreamChannelInfo => "GetMotoStatusDownstreamChannelInfo",
            Action::GetMotoStatusLog => "GetMotoStatusLog",
            Action::GetMotoStatusLogXXX => "GetMotoStatusLogXXX",
            Action::GetMotoStatusSecAccount => "GetMotoStatusSecAccount",
            Action::GetMotoStatusSecXXX => "GetMotoStatusSecXXX",
            Action::GetMotoStatusSoftware => "GetMotoStatusSoftware",
            Action::GetMotoStatusStartupSequence => "GetMotoStatusStartupSequence",
            Action::GetMotoStatusUpstreamChannelInfo => "GetMotoStatusUpstreamChannelInfo",
            Action::GetMotoStatusXXX => "GetMotoStatusXXX",
            Action::GetMultipleHNAPs => "GetMultipleHNAPs",
            Action::GetNetworkModeSettings => "GetNetworkModeSettings",
            Action::Login => "Login",
            Action::Logout => "Logout",
            Action::SetMotoLagStatus => "SetMotoLagStatus",
            Action::SetMotoStatusDSTargetFreq => "SetMotoStatusDSTargetFreq",
            Action::SetStatusLogSettings => "SetStatusLogSettings",
            Action::SetStatusSecuritySettings => "SetStatusSecuritySettings",
            Action::Other(name) => name.as_str(),
        }
    }

    /// Top level key of the response body, `{Action}Response`.
    pub fn response_key(&self) -> String {
        format!("{}Response", self.as_str())
    }

    /// Status field inside the response body, `{Action}Result`.
    pub fn result_key(&self) -> String {
        format!("{}Result", self.as_str())
    }
}

impl From<&str> for Action {
    fn from(value: &str) -> Self {
        KNOWN_ACTIONS
            .iter()
            .find(|a| a.as_str() == value)
            .cloned()
            .unwrap_or_else(|| Action::Other(value.to_string()))
    }
}

impl FromStr for Action {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Action::from(s))
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A typed HNAP call: the body sent under the action name and the body
/// expected back under `{Action}Response`.
pub trait HnapRequest: Serialize {
    type Response: DeserializeOwned;

    fn action(&self) -> Action;
}
