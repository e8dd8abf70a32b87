//! Build-target probes run before analysis
//!
//! A probe inspects the project layout and reports which indicators of a
//! target platform it found. `--platform` makes analysis conditional on the
//! probe passing.

use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Outcome of probing one project
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeReport {
    /// Names of the indicators that were present
    pub found: Vec<&'static str>,
}

impl ProbeReport {
    /// Any single indicator is enough
    pub fn matched(&self) -> bool {
        !self.found.is_empty()
    }
}

/// Trait for platform probes
pub trait PlatformProbe {
    fn name(&self) -> &'static str;

    fn probe(&self, project_root: &Path) -> ProbeReport;
}

/// Detects projects that build for Android
pub struct AndroidProbe;

impl AndroidProbe {
    pub fn new() -> Self {
        Self
    }

    fn settings_mention_android(&self, project_root: &Path) -> bool {
        let settings = project_root.join("ProjectSettings").join("ProjectSettings.asset");
        if !settings.is_file() {
            return false;
        }

        match fs::read(&settings) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).contains("Android"),
            Err(e) => {
                warn!("Could not read {}: {}", settings.display(), e);
                false
            }
        }
    }
}

impl PlatformProbe for AndroidProbe {
    fn name(&self) -> &'static str {
        "android"
    }

    fn probe(&self, project_root: &Path) -> ProbeReport {
        let plugins = project_root.join("Assets").join("Plugins").join("Android");
        let gradle = project_root.join("Temp").join("gradleOut").join("build.gradle");

        let checks = [
            ("Assets/Plugins/Android", plugins.exists()),
            ("AndroidManifest.xml", plugins.join("AndroidManifest.xml").exists()),
            ("Temp/gradleOut/build.gradle", gradle.exists()),
            ("ProjectSettings.asset", self.settings_mention_android(project_root)),
        ];

        let found: Vec<&'static str> = checks
            .into_iter()
            .filter(|(_, present)| *present)
            .map(|(name, _)| name)
            .collect();

        debug!("Android indicators in {}: {:?}", project_root.display(), found);
        ProbeReport { found }
    }
}

impl Default for AndroidProbe {
    fn default() -> Self {
        Self::new()
    }
}

/// Look up a probe by its CLI name
pub fn probe_for(name: &str) -> Option<Box<dyn PlatformProbe>> {
    match name.to_ascii_lowercase().as_str() {
        "android" => Some(Box::new(AndroidProbe::new())),
        _ => None,
    }
}
