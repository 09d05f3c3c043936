//! Version probe with a predetermined answer.

use tfmod_core::{
    application::ports::VersionProbe,
    domain::{TerraformVersion, VersionLookup},
};

/// Always reports the same lookup. Used when the user pins a version on the
/// command line, so no process is spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedVersionProbe {
    lookup: VersionLookup,
}

impl FixedVersionProbe {
    pub fn new(lookup: VersionLookup) -> Self {
        Self { lookup }
    }

    pub fn pinned(version: TerraformVersion) -> Self {
        Self::new(VersionLookup::Resolved(version))
    }
}

impl VersionProbe for FixedVersionProbe {
    fn probe(&self) -> VersionLookup {
        self.lookup.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinned_version_is_returned() {
        let probe = FixedVersionProbe::pinned("1.2.3".parse().unwrap());
        assert_eq!(
            probe.probe(),
            VersionLookup::Resolved("1.2.3".parse().unwrap())
        );
    }
}
