use serde::{Deserialize, Deserializer};

/// An issue as delivered by the GitHub REST API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawIssue {
    pub number: u64,
    pub title: String,
    /// GitHub sends `null` for issues created without a description.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
    #[serde(default)]
    pub state: String,
    #[serde(
        default,
        rename = "pull_request",
        deserialize_with = "present_as_true"
    )]
    pub is_pull_request: bool,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn present_as_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.is_some())
}
