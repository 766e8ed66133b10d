//! Authorization Profile Request Types
//!
//! Strongly-typed body for `POST /ers/config/authorizationprofile` and the
//! row-to-profile mapping.

use serde::Serialize;

use crate::rows::ProfileRow;

/// Re-authentication timer applied to every imported profile (seconds)
pub const REAUTH_TIMER_SECS: u32 = 28800;

/// RADIUS Idle-Timeout pushed via the advanced attribute (seconds)
pub const IDLE_TIMEOUT_SECS: &str = "7200";

/// VLAN tag ID used for every `vlan` block
pub const VLAN_TAG_ID: &str = "1";

/// Envelope the ERS API expects around a profile
#[derive(Debug, Serialize)]
pub struct AuthorizationProfileRequest<'a> {
    #[serde(rename = "AuthorizationProfile")]
    pub profile: &'a AuthorizationProfile,
}

impl<'a> AuthorizationProfileRequest<'a> {
    pub fn new(profile: &'a AuthorizationProfile) -> Self {
        Self { profile }
    }
}

/// ISE authorization profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationProfile {
    pub name: String,
    pub access_type: String,
    pub reauth: Reauth,
    pub advanced_attributes: Vec<AdvancedAttribute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dacl_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authz_profile_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan: Option<Vlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_redirection: Option<WebRedirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_domain_permission: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reauth {
    pub timer: u32,
    pub connectivity: String,
}

impl Default for Reauth {
    fn default() -> Self {
        Self {
            timer: REAUTH_TIMER_SECS,
            connectivity: "RADIUS_REQUEST".to_string(),
        }
    }
}

/// Advanced attribute assignment. The `Attribue` spellings are the ERS
/// schema's own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvancedAttribute {
    #[serde(rename = "leftHandSideDictionaryAttribue")]
    pub left_hand_side: DictionaryAttribute,
    #[serde(rename = "rightHandSideAttribueValue")]
    pub right_hand_side: AttributeValue,
}

impl AdvancedAttribute {
    /// `Radius:Idle-Timeout = 7200`
    pub fn radius_idle_timeout() -> Self {
        Self {
            left_hand_side: DictionaryAttribute {
                value_type: "AdvancedDictionaryAttribute".to_string(),
                dictionary_name: "Radius".to_string(),
                attribute_name: "Idle-Timeout".to_string(),
            },
            right_hand_side: AttributeValue {
                value_type: "AttributeValue".to_string(),
                value: IDLE_TIMEOUT_SECS.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryAttribute {
    #[serde(rename = "AdvancedAttributeValueType")]
    pub value_type: String,
    pub dictionary_name: String,
    pub attribute_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeValue {
    #[serde(rename = "AdvancedAttributeValueType")]
    pub value_type: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vlan {
    #[serde(rename = "nameID")]
    pub name_id: String,
    #[serde(rename = "tagID")]
    pub tag_id: String,
}

impl Vlan {
    pub fn named(name_id: &str) -> Self {
        Self {
            name_id: name_id.to_string(),
            tag_id: VLAN_TAG_ID.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebRedirection {
    #[serde(rename = "WebRedirectionType")]
    pub redirection_type: String,
    pub acl: String,
    pub portal_name: String,
}

impl AuthorizationProfile {
    /// Profile with only the mandatory fields and the fixed reauth and
    /// advanced-attribute defaults
    pub fn new(name: &str, access_type: &str) -> Self {
        Self {
            name: name.to_string(),
            access_type: access_type.to_string(),
            reauth: Reauth::default(),
            advanced_attributes: vec![AdvancedAttribute::radius_idle_timeout()],
            description: None,
            dacl_name: None,
            authz_profile_type: None,
            vlan: None,
            web_redirection: None,
            voice_domain_permission: None,
        }
    }

    /// Build the profile for a CSV row.
    ///
    /// Returns `None` when `name` or `accessType` is missing or empty.
    /// `acl` and `portalName` only surface nested under `webRedirection`,
    /// and only when `WebRedirectionType` is set. Any non-empty
    /// `voiceDomainPermission` cell enables the permission.
    pub fn from_row(row: &ProfileRow) -> Option<Self> {
        let name = non_empty(&row.name)?;
        let access_type = non_empty(&row.access_type)?;

        let mut profile = Self::new(name, access_type);
        profile.description = non_empty(&row.description).map(str::to_string);
        profile.dacl_name = non_empty(&row.dacl_name).map(str::to_string);
        profile.authz_profile_type = non_empty(&row.authz_profile_type).map(str::to_string);
        profile.vlan = non_empty(&row.vlan_name_id).map(Vlan::named);
        profile.web_redirection =
            non_empty(&row.web_redirection_type).map(|redirection_type| WebRedirection {
                redirection_type: redirection_type.to_string(),
                acl: non_empty(&row.acl).unwrap_or_default().to_string(),
                portal_name: non_empty(&row.portal_name).unwrap_or_default().to_string(),
            });
        if non_empty(&row.voice_domain_permission).is_some() {
            profile.voice_domain_permission = Some(true);
        }

        Some(profile)
    }

    /// Pretty JSON echo of the profile (4-space indent)
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        // serde_json only writes valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
