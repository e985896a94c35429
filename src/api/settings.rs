use serde::{Deserialize, Serialize, Serializer};

use super::{Action, HnapRequest};

/// Clears the event log. Sent as `SetStatusLogSettings`.
#[derive(Serialize, Clone, Debug)]
pub struct ClearLog {
    #[serde(rename = "MotoStatusLogAction")]
    pub moto_status_log_action: String,
    #[serde(rename = "MotoStatusLogXXX")]
    pub moto_status_log_xxx: String,
}

impl Default for ClearLog {
    fn default() -> Self {
        Self {
            moto_status_log_action: "1".to_string(),
            moto_status_log_xxx: "XXX".to_string(),
        }
    }
}

impl HnapRequest for ClearLog {
    type Response = SetStatusLogSettingsResponse;

    fn action(&self) -> Action {
        Action::SetStatusLogSettings
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct SetStatusLogSettingsResponse {
    #[serde(rename = "SetStatusLogSettingsResult")]
    pub result: String,
}

/// Restarts the modem. Sent as `SetStatusSecuritySettings` with only the
/// `MotoStatusSecXXX` marker.
#[derive(Serialize, Clone, Debug)]
pub struct Reboot {
    #[serde(rename = "MotoStatusSecXXX")]
    pub moto_status_sec_xxx: String,
}

impl Default for Reboot {
    fn default() -> Self {
        Self {
            moto_status_sec_xxx: "XXX".to_string(),
        }
    }
}

impl HnapRequest for Reboot {
    type Response = SetStatusSecuritySettingsResponse;

    fn action(&self) -> Action {
        Action::SetStatusSecuritySettings
    }
}

/// Credential change. Every field must already be AES-128 encrypted with
/// the session private key.
#[derive(Serialize, Clone, Debug)]
pub struct SetStatusSecuritySettings {
    #[serde(rename = "MotoUsername")]
    pub username: String,
    #[serde(rename = "MotoPassword")]
    pub password: String,
    #[serde(rename = "MotoNewUsername")]
    pub new_username: String,
    #[serde(rename = "MotoNewPassword")]
    pub new_password: String,
    #[serde(rename = "MotoRepPassword")]
    pub repeat_password: String,
    #[serde(rename = "MotoStatusSecXXX", skip_serializing_if = "Option::is_none")]
    pub moto_status_sec_xxx: Option<String>,
}

impl HnapRequest for SetStatusSecuritySettings {
    type Response = SetStatusSecuritySettingsResponse;

    fn action(&self) -> Action {
        Action::SetStatusSecuritySettings
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct SetStatusSecuritySettingsResponse {
    #[serde(rename = "SetStatusSecuritySettingsResult")]
    pub result: String,
}

/// Not used by cable-modem only models.
#[derive(Serialize, Clone, Debug)]
pub struct SetMotoLagStatus {
    #[serde(rename = "SetMotoLagStatus")]
    pub status: String,
}

impl HnapRequest for SetMotoLagStatus {
    type Response = SetMotoLagStatusResponse;

    fn action(&self) -> Action {
        Action::SetMotoLagStatus
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct SetMotoLagStatusResponse {
    #[serde(rename = "SetMotoLagStatusResult")]
    pub result: String,
}

/// Not used by cable-modem only models.
#[derive(Serialize, Clone, Debug)]
pub struct SetMotoStatusDSTargetFreq {
    #[serde(rename = "MotoStatusConnectionAction")]
    pub connection_action: String,
    #[serde(rename = "MotoCmRescanTargetFreq")]
    pub rescan_target_freq: String,
    #[serde(rename = "MotoStatusXXX")]
    pub moto_status_xxx: String,
}

impl HnapRequest for SetMotoStatusDSTargetFreq {
    type Response = SetMotoStatusDSTargetFreqResponse;

    fn action(&self) -> Action {
        Action::SetMotoStatusDSTargetFreq
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct SetMotoStatusDSTargetFreqResponse {
    #[serde(rename = "SetMotoStatusDSTargetFreqResult")]
    pub result: String,
}

/// The device expects an empty string as body for this action.
#[derive(Clone, Debug, Default)]
pub struct GetNetworkModeSettings;

impl Serialize for GetNetworkModeSettings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("")
    }
}

impl HnapRequest for GetNetworkModeSettings {
    type Response = GetNetworkModeSettingsResponse;

    fn action(&self) -> Action {
        Action::GetNetworkModeSettings
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct GetNetworkModeSettingsResponse {
    #[serde(rename = "GetNetworkModeSettingsResult")]
    pub result: String,
    /// `router` or `bridge`
    pub global_network_mode: Option<String>,
}
