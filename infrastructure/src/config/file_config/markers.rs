//! Boundary marker configuration from TOML (`[markers]` section)

use notegpt_domain::{BoundaryMarkers, DEFAULT_ASSISTANT_MARKER, DEFAULT_USER_MARKER};
use serde::{Deserialize, Serialize};

/// Raw marker configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMarkersConfig {
    /// Written before the first fragment of a reply
    pub assistant: String,
    /// Written after the reply, opening the next user turn
    pub user: String,
}

impl Default for FileMarkersConfig {
    fn default() -> Self {
        Self {
            assistant: DEFAULT_ASSISTANT_MARKER.to_string(),
            user: DEFAULT_USER_MARKER.to_string(),
        }
    }
}

impl FileMarkersConfig {
    pub fn to_markers(&self) -> BoundaryMarkers {
        BoundaryMarkers::new(self.assistant.clone(), self.user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_domain_markers() {
        assert_eq!(FileMarkersConfig::default().to_markers(), BoundaryMarkers::default());
    }

    #[test]
    fn test_markers_deserialize() {
        let toml_str = r####"
[markers]
assistant = "### AI\n"
"####;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let markers = config.markers.to_markers();
        assert_eq!(markers.assistant, "### AI\n");
        assert_eq!(markers.user, DEFAULT_USER_MARKER);
    }
}
