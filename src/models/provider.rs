use std::fmt;

use serde::{Deserialize, Serialize};

/// External services whose contact lists can be imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Google,
    Facebook,
    Twitter,
    Yahoo,
    LinkedIn,
}

impl Provider {
    pub const ALL: [Provider; 5] = [
        Provider::Google,
        Provider::Facebook,
        Provider::Twitter,
        Provider::Yahoo,
        Provider::LinkedIn,
    ];

    /// Name the provider's import is registered under with the task backend.
    pub fn task_name(&self) -> &'static str {
        match self {
            Provider::Google => "import_google_contacts",
            Provider::Facebook => "import_facebook_contacts",
            Provider::Twitter => "import_twitter_contacts",
            Provider::Yahoo => "import_yahoo_contacts",
            Provider::LinkedIn => "import_linkedin_contacts",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provider::Google => "google",
            Provider::Facebook => "facebook",
            Provider::Twitter => "twitter",
            Provider::Yahoo => "yahoo",
            Provider::LinkedIn => "linkedin",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_provider_has_a_distinct_task_name() {
        let mut names: Vec<&str> = Provider::ALL.iter().map(|p| p.task_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn display_matches_serde_rename() {
        for provider in Provider::ALL {
            let json = serde_json::to_string(&provider).unwrap();
            assert_eq!(json, format!("\"{}\"", provider));
        }
    }
}
