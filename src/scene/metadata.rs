use crate::foundation::error::BannerResult;

/// Static page metadata shipped alongside the banner.
///
/// Nothing in the engine reads these values; the host page passes them through.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMetadata {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub authors: Vec<String>,
    pub icon: String,
    /// Accessible label for the drawing surface.
    pub aria_label: String,
    /// Footer link under the banner.
    pub credit: SiteCredit,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteCredit {
    pub text: String,
    pub url: String,
}

impl Default for SiteCredit {
    fn default() -> Self {
        Self {
            text: "by DarkLead!".to_owned(),
            url: "https://darklead.org/".to_owned(),
        }
    }
}

impl Default for SiteMetadata {
    fn default() -> Self {
        Self {
            title: "DarkLead! CTF".to_owned(),
            description: "Shadow Apocalypse CTF 2025 by DarkLead! Community".to_owned(),
            keywords: ["DarkLead", "Community", "Cybersecurity", "Open Source"]
                .map(String::from)
                .to_vec(),
            authors: ["Gowthaman", "Subir", "Mehbub", "Aflah", "Nandakishore"]
                .map(String::from)
                .to_vec(),
            icon: "/DL.svg".to_owned(),
            aria_label: "Interactive particle effect with Shadow Apocalypse CTF text".to_owned(),
            credit: SiteCredit::default(),
        }
    }
}

impl SiteMetadata {
    pub fn to_json_pretty(&self) -> BannerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/metadata.rs"]
mod tests;
