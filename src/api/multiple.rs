use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};

use super::{registry::BATCH_ACTION, Action, HnapRequest};

/// Body of a `GetMultipleHNAPs` call: every wrapped action is a sibling key
/// with an empty string value.
#[derive(Clone, Debug, PartialEq)]
pub struct MultipleHnaps {
    actions: Vec<Action>,
}

impl MultipleHnaps {
    pub fn new(actions: &[Action]) -> Self {
        let mut unique: Vec<Action> = Vec::with_capacity(actions.len());

        for action in actions {
            if !unique.contains(action) {
                unique.push(action.clone());
            }
        }

        Self { actions: unique }
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Serialize for MultipleHnaps {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.actions.len()))?;
        for action in &self.actions {
            map.serialize_entry(action.as_str(), "")?;
        }
        map.end()
    }
}

impl HnapRequest for MultipleHnaps {
    type Response = GetMultipleHNAPsResponse;

    fn action(&self) -> Action {
        BATCH_ACTION
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct GetMultipleHNAPsResponse {
    #[serde(rename = "GetMultipleHNAPsResult")]
    pub result: String,
    #[serde(rename = "GetHomeAddressResponse")]
    pub home_address: Option<GetHomeAddressResponse>,
    #[serde(rename = "GetHomeConnectionResponse")]
    pub home_connection: Option<GetHomeConnectionResponse>,
    #[serde(rename = "GetMotoLagStatusResponse")]
    pub lag_status: Option<GetMotoLagStatusResponse>,
    #[serde(rename = "GetMotoStatusConnectionInfoResponse")]
    pub connection_info: Option<GetMotoStatusConnectionInfoResponse>,
    #[serde(rename = "GetMotoStatusDownstreamChannelInfoResponse")]
    pub downstream_channel_info: Option<GetMotoStatusDownstreamChannelInfoResponse>,
    #[serde(rename = "GetMotoStatusUpstreamChannelInfoResponse")]
    pub upstream_channel_info: Option<GetMotoStatusUpstreamChannelInfoResponse>,
    #[serde(rename = "GetMotoStatusLogResponse")]
    pub log: Option<GetMotoStatusLogResponse>,
    #[serde(rename = "GetMotoStatusSecAccountResponse")]
    pub sec_account: Option<GetMotoStatusSecAccountResponse>,
    #[serde(rename = "GetMotoStatusSoftwareResponse")]
    pub software: Option<GetMotoStatusSoftwareResponse>,
    #[serde(rename = "GetMotoStatusStartupSequenceResponse")]
    pub startup_sequence: Option<GetMotoStatusStartupSequenceResponse>,
    #[serde(rename = "GetMotoStatusXXXResponse")]
    pub status_xxx: Option<XXXResponse>,
    #[serde(rename = "GetMotoStatusLogXXXResponse")]
    pub log_xxx: Option<XXXResponse>,
    #[serde(rename = "GetMotoStatusSecXXXResponse")]
    pub sec_xxx: Option<XXXResponse>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct GetHomeAddressResponse {
    #[serde(rename = "GetHomeAddressResult")]
    pub result: String,
    #[serde(rename = "MotoHomeIpAddress")]
    pub ip_address: Option<String>,
    #[serde(rename = "MotoHomeIpv6Address")]
    pub ipv6_address: Option<String>,
    #[serde(rename = "MotoHomeMacAddress")]
    pub mac_address: Option<String>,
    /// firmware version
    #[serde(rename = "MotoHomeSfVer")]
    pub software_version: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct GetHomeConnectionResponse {
    #[serde(rename = "GetHomeConnectionResult")]
    pub result: String,
    #[serde(rename = "MotoHomeOnline")]
    pub online: Option<String>,
    #[serde(rename = "MotoHomeDownNum")]
    pub downstream_channels: Option<String>,
    #[serde(rename = "MotoHomeUpNum")]
    pub upstream_channels: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct GetMotoLagStatusResponse {
    #[serde(rename = "GetMotoLagStatusResult")]
    pub result: String,
    #[serde(rename = "MotoLagCurrentStatus")]
    pub current_status: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct GetMotoStatusConnectionInfoResponse {
    #[serde(rename = "GetMotoStatusConnectionInfoResult")]
    pub result: String,
    #[serde(rename = "MotoConnNetworkAccess")]
    pub network_access: Option<String>,
    #[serde(rename = "MotoConnSystemUpTime")]
    pub system_up_time: Option<String>,
}

/// Columns: channel, lock status, modulation, channel id, frequency (MHz),
/// power (dBmV), SNR (dB), corrected, uncorrected.
#[derive(Deserialize, Clone, Debug)]
pub struct GetMotoStatusDownstreamChannelInfoResponse {
    #[serde(rename = "GetMotoStatusDownstreamChannelInfoResult")]
    pub result: String,
    #[serde(rename = "MotoConnDownstreamChannel")]
    pub downstream_channel: Option<String>,
}

/// Columns: channel, lock status, channel type, channel id, symbol rate
/// (Ksym/sec), frequency (MHz), power (dBmV).
#[derive(Deserialize, Clone, Debug)]
pub struct GetMotoStatusUpstreamChannelInfoResponse {
    #[serde(rename = "GetMotoStatusUpstreamChannelInfoResult")]
    pub result: String,
    #[serde(rename = "MotoConnUpstreamChannel")]
    pub upstream_channel: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct GetMotoStatusLogResponse {
    #[serde(rename = "GetMotoStatusLogResult")]
    pub result: String,
    /// rows are delimited with `}-{`
    #[serde(rename = "MotoStatusLogList")]
    pub log_list: Option<String>,
}

/// Every field but the result is AES-128 encrypted with the session private key.
#[derive(Deserialize, Clone, Debug)]
pub struct GetMotoStatusSecAccountResponse {
    #[serde(rename = "GetMotoStatusSecAccountResult")]
    pub result: String,
    #[serde(rename = "CurrentLogin")]
    pub current_login: Option<String>,
    #[serde(rename = "CurrentNameAdmin")]
    pub current_name_admin: Option<String>,
    #[serde(rename = "CurrentNameUser")]
    pub current_name_user: Option<String>,
    #[serde(rename = "CurrentPwAdmin")]
    pub current_pw_admin: Option<String>,
    #[serde(rename = "CurrentPwUser")]
    pub current_pw_user: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct GetMotoStatusSoftwareResponse {
    #[serde(rename = "GetMotoStatusSoftwareResult")]
    pub result: String,
    #[serde(rename = "StatusSoftwareCertificate")]
    pub certificate: Option<String>,
    #[serde(rename = "StatusSoftwareCustomerVer")]
    pub customer_version: Option<String>,
    #[serde(rename = "StatusSoftwareHdVer")]
    pub hardware_version: Option<String>,
    #[serde(rename = "StatusSoftwareMac")]
    pub mac: Option<String>,
    #[serde(rename = "StatusSoftwareSerialNum")]
    pub serial_number: Option<String>,
    #[serde(rename = "StatusSoftwareSfVer")]
    pub software_version: Option<String>,
    #[serde(rename = "StatusSoftwareSpecVer")]
    pub spec_version: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct GetMotoStatusStartupSequenceResponse {
    #[serde(rename = "GetMotoStatusStartupSequenceResult")]
    pub result: String,
    #[serde(rename = "MotoConnBootComment")]
    pub boot_comment: Option<String>,
    #[serde(rename = "MotoConnBootStatus")]
    pub boot_status: Option<String>,
    #[serde(rename = "MotoConnConfigurationFileComment")]
    pub configuration_file_comment: Option<String>,
    #[serde(rename = "MotoConnConfigurationFileStatus")]
    pub configuration_file_status: Option<String>,
    #[serde(rename = "MotoConnConnectivityComment")]
    pub connectivity_comment: Option<String>,
    #[serde(rename = "MotoConnConnectivityStatus")]
    pub connectivity_status: Option<String>,
    #[serde(rename = "MotoConnDSComment")]
    pub ds_comment: Option<String>,
    #[serde(rename = "MotoConnDSFreq")]
    pub ds_freq: Option<String>,
    #[serde(rename = "MotoConnSecurityComment")]
    pub security_comment: Option<String>,
    #[serde(rename = "MotoConnSecurityStatus")]
    pub security_status: Option<String>,
}

/// Placeholder actions whose only known field is `XXX`.
#[derive(Deserialize, Clone, Debug)]
pub struct XXXResponse {
    #[serde(rename = "XXX")]
    pub xxx: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{GetMultipleHNAPsResponse, MultipleHnaps};
    use crate::api::Action;

    #[test]
    fn envelope_lists_actions_with_empty_values() {
        let body = MultipleHnaps::new(&[Action::GetHomeAddress, Action::GetMotoStatusSoftware]);

        assert_eq!(
            json!({ "GetHomeAddress": "", "GetMotoStatusSoftware": "" }),
            serde_json::to_value(&body).unwrap()
        );
    }

    #[test]
    fn duplicate_actions_are_sent_once() {
        let body = MultipleHnaps::new(&[Action::GetHomeAddress, Action::GetHomeAddress]);

        assert_eq!(&[Action::GetHomeAddress], body.actions());
    }

    #[test]
    fn nested_responses_are_typed() {
        let res: GetMultipleHNAPsResponse = serde_json::from_value(json!({
            "GetMotoStatusSoftwareResponse": {
                "StatusSoftwareSpecVer": "DOCSIS 3.1",
                "StatusSoftwareHdVer": "V1.0",
                "StatusSoftwareSfVer": "8611-19.2.18",
                "StatusSoftwareMac": "00:AA:BB:CC:DD:EE",
                "StatusSoftwareSerialNum": "FFFF-MB8611-eE-FFF",
                "StatusSoftwareCertificate": "Installed",
                "StatusSoftwareCustomerVer": "Prod_19.2_d31",
                "GetMotoStatusSoftwareResult": "OK"
            },
            "GetMultipleHNAPsResult": "OK"
        }))
        .unwrap();

        assert_eq!("OK", res.result);
        assert!(res.home_address.is_none());
        let software = res.software.unwrap();
        assert_eq!("DOCSIS 3.1", software.spec_version.unwrap());
        assert_eq!("8611-19.2.18", software.software_version.unwrap());
    }
}
